use harvester_core::tabs::{self, BrowseTarget};
use harvester_core::{
    channel_profile, Binding, ChannelProfile, Endpoint, HarvestResult, SeedLocator,
    CHANNEL_PLAYLISTS, CHANNEL_VIDEOS,
};
use serde_json::{json, Value};

use crate::engine::Harvester;
use crate::trace::HarvestEvent;
use crate::HarvestError;

impl Harvester {
    pub async fn channel_info(&self, channel_id: &str) -> Result<ChannelProfile, HarvestError> {
        let body = self.context.seed_payload([("browseId", json!(channel_id))]);
        let response = self.post(Endpoint::Browse, &body).await?;
        Ok(channel_profile(&response)?)
    }

    pub async fn channel_videos(
        &self,
        channel_id: &str,
        max_items: usize,
    ) -> Result<HarvestResult, HarvestError> {
        self.channel_tab(&CHANNEL_VIDEOS, channel_id, max_items).await
    }

    pub async fn channel_playlists(
        &self,
        channel_id: &str,
        max_items: usize,
    ) -> Result<HarvestResult, HarvestError> {
        self.channel_tab(&CHANNEL_PLAYLISTS, channel_id, max_items)
            .await
    }

    /// Resolve the binding's tab on the channel landing page, open it and
    /// page through its listing.
    async fn channel_tab(
        &self,
        binding: &Binding,
        channel_id: &str,
        max_items: usize,
    ) -> Result<HarvestResult, HarvestError> {
        if max_items == 0 {
            return Ok(Vec::new());
        }
        let title = match binding.locator {
            SeedLocator::Tab(title) => title,
            _ => tabs::HOME_TAB,
        };

        let key = self.session_key().await?;
        let landing = self
            .browse(binding, &key, vec![("browseId", json!(channel_id))])
            .await?;
        let target = tabs::resolve_tab(&landing, &[title], binding.domain)?;
        let mut response = self.browse_target(binding, &key, &target).await?;

        // A tab can come back as a bare link; follow it one more hop.
        let hop = tabs::find_tab(&response, title)
            .filter(|tab| !tabs::has_content(tab))
            .and_then(tabs::browse_target);
        if let Some(next) = hop {
            response = self.browse_target(binding, &key, &next).await?;
        }

        self.harvest_from(binding, binding.endpoint, &key, &response, max_items)
            .await
    }

    async fn browse_target(
        &self,
        binding: &Binding,
        key: &str,
        target: &BrowseTarget,
    ) -> Result<Value, HarvestError> {
        let mut fields = vec![("browseId", json!(target.browse_id))];
        if let Some(params) = &target.params {
            fields.push(("params", json!(params)));
        }
        self.browse(binding, key, fields).await
    }

    async fn browse(
        &self,
        binding: &Binding,
        key: &str,
        fields: Vec<(&'static str, Value)>,
    ) -> Result<Value, HarvestError> {
        let body = self.context.seed_payload(fields);
        self.emit(HarvestEvent::RequestSent {
            domain: binding.domain,
            endpoint: Endpoint::Browse,
            continuation: false,
        });
        Ok(self
            .transport
            .post_json(Endpoint::Browse, key, &body)
            .await?)
    }
}
