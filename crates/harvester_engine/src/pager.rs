//! Async driver for the core pagination state machine.

use harvester_core::{update, Effect, Endpoint, PageDecoder, PagerMsg, PagerState};
use serde_json::Value;

use crate::engine::Harvester;
use crate::trace::HarvestEvent;
use crate::HarvestError;

impl Harvester {
    /// Send `seed` to `endpoint`, then follow continuation cursors until the
    /// sequence ends. At most `max_items` items are returned, in arrival order.
    pub async fn harvest<D: PageDecoder>(
        &self,
        decoder: &D,
        endpoint: Endpoint,
        seed: &Value,
        max_items: usize,
    ) -> Result<Vec<D::Item>, HarvestError> {
        self.open(decoder, endpoint, seed, None, max_items).await
    }

    /// Like [`Harvester::harvest`], for a sequence whose first request is
    /// itself a continuation. `cursor` counts as already issued.
    pub async fn harvest_cursor<D: PageDecoder>(
        &self,
        decoder: &D,
        endpoint: Endpoint,
        cursor: &str,
        max_items: usize,
    ) -> Result<Vec<D::Item>, HarvestError> {
        let seed = self.context.continuation_payload(cursor);
        self.open(decoder, endpoint, &seed, Some(cursor), max_items)
            .await
    }

    async fn open<D: PageDecoder>(
        &self,
        decoder: &D,
        endpoint: Endpoint,
        seed: &Value,
        opened_by: Option<&str>,
        max_items: usize,
    ) -> Result<Vec<D::Item>, HarvestError> {
        if max_items == 0 {
            return Ok(Vec::new());
        }
        let key = self.session_key().await?;
        self.emit(HarvestEvent::RequestSent {
            domain: decoder.domain(),
            endpoint,
            continuation: opened_by.is_some(),
        });
        let response = self.transport.post_json(endpoint, &key, seed).await?;
        self.run(decoder, endpoint, &key, &response, opened_by, max_items)
            .await
    }

    /// Continue a sequence whose seed response was fetched by the caller.
    pub(crate) async fn harvest_from<D: PageDecoder>(
        &self,
        decoder: &D,
        endpoint: Endpoint,
        key: &str,
        seed_response: &Value,
        max_items: usize,
    ) -> Result<Vec<D::Item>, HarvestError> {
        self.run(decoder, endpoint, key, seed_response, None, max_items)
            .await
    }

    async fn run<D: PageDecoder>(
        &self,
        decoder: &D,
        endpoint: Endpoint,
        key: &str,
        seed_response: &Value,
        opened_by: Option<&str>,
        max_items: usize,
    ) -> Result<Vec<D::Item>, HarvestError> {
        let domain = decoder.domain();
        let seed_page = decoder.decode_seed(seed_response)?;
        let mut state = PagerState::new(domain, max_items)
            .with_unproductive_limit(self.settings.unproductive_limit);
        if let Some(cursor) = opened_by {
            state = state.with_seen_cursor(cursor);
        }
        let (mut state, mut effect) = self.step(state, PagerMsg::Seed(seed_page));

        while let Effect::FetchContinuation { cursor } = effect {
            self.emit(HarvestEvent::RequestSent {
                domain,
                endpoint,
                continuation: true,
            });
            let body = self.context.continuation_payload(&cursor);
            let response = self.transport.post_json(endpoint, key, &body).await?;
            let msg = match decoder.decode_continuation(&response) {
                Some(page) => PagerMsg::Continuation(page),
                None => PagerMsg::ContainerMissing,
            };
            (state, effect) = self.step(state, msg);
        }

        if let Effect::Finish(reason) = effect {
            self.emit(HarvestEvent::Finished {
                domain,
                reason,
                total: state.len().min(max_items),
            });
        }
        Ok(state.into_items())
    }

    fn step<T>(&self, state: PagerState<T>, msg: PagerMsg<T>) -> (PagerState<T>, Effect) {
        let items = match &msg {
            PagerMsg::Seed(page) | PagerMsg::Continuation(page) => Some(page.items.len()),
            PagerMsg::ContainerMissing => None,
        };
        let (state, effect) = update(state, msg);
        if let Some(items) = items {
            self.emit(HarvestEvent::PageDecoded {
                domain: state.domain(),
                page: state.pages(),
                items,
                total: state.len(),
            });
        }
        (state, effect)
    }
}
