use std::sync::Arc;

use harvester_core::{HarvestContext, DEFAULT_UNPRODUCTIVE_LIMIT};
use serde_json::Value;
use tokio::sync::Semaphore;

use crate::fetch::{ReqwestTransport, Transport, TransportSettings};
use crate::resolve::{self, KeyResolver};
use crate::trace::{HarvestEvent, LogTraceSink, TraceSink};
use crate::HarvestError;

pub const DEFAULT_FANOUT_PERMITS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestSettings {
    /// Grid cells harvested at the same time.
    pub fanout_permits: usize,
    /// Consecutive empty follow-up pages tolerated in one sequence.
    pub unproductive_limit: u32,
}

impl Default for HarvestSettings {
    fn default() -> Self {
        Self {
            fanout_permits: DEFAULT_FANOUT_PERMITS,
            unproductive_limit: DEFAULT_UNPRODUCTIVE_LIMIT,
        }
    }
}

/// Entry point for every harvest operation. Cheap to clone; clones share
/// the transport, the session key cache and the fan-out pool.
#[derive(Clone)]
pub struct Harvester {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) context: Arc<HarvestContext>,
    pub(crate) keys: Arc<KeyResolver>,
    pub(crate) trace: Arc<dyn TraceSink>,
    pub(crate) settings: HarvestSettings,
    pub(crate) pool: Arc<Semaphore>,
}

impl Harvester {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let settings = HarvestSettings::default();
        Self {
            transport,
            context: Arc::new(HarvestContext::default()),
            keys: Arc::new(KeyResolver::new()),
            trace: Arc::new(LogTraceSink),
            pool: Arc::new(Semaphore::new(settings.fanout_permits)),
            settings,
        }
    }

    /// Harvester over a `reqwest` transport built from `settings`.
    pub fn connect(settings: TransportSettings) -> Result<Self, HarvestError> {
        let transport = ReqwestTransport::new(settings)?;
        Ok(Self::new(Arc::new(transport)))
    }

    pub fn with_context(mut self, context: HarvestContext) -> Self {
        self.context = Arc::new(context);
        self
    }

    pub fn with_trace(mut self, trace: Arc<dyn TraceSink>) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_keys(mut self, keys: KeyResolver) -> Self {
        self.keys = Arc::new(keys);
        self
    }

    pub fn with_settings(mut self, settings: HarvestSettings) -> Self {
        self.pool = Arc::new(Semaphore::new(settings.fanout_permits.max(1)));
        self.settings = settings;
        self
    }

    pub fn context(&self) -> &HarvestContext {
        &self.context
    }

    pub fn settings(&self) -> HarvestSettings {
        self.settings
    }

    pub fn key_resolver(&self) -> &KeyResolver {
        &self.keys
    }

    /// Channel id behind a `@handle`.
    pub async fn resolve_handle(&self, handle: &str) -> Result<String, HarvestError> {
        resolve::resolve_handle(self.transport.as_ref(), handle).await
    }

    pub(crate) fn emit(&self, event: HarvestEvent) {
        self.trace.emit(event);
    }

    pub(crate) async fn session_key(&self) -> Result<String, HarvestError> {
        self.keys.key(self.transport.as_ref()).await
    }

    /// Single POST outside of a pagination sequence.
    pub(crate) async fn post(
        &self,
        endpoint: harvester_core::Endpoint,
        body: &Value,
    ) -> Result<Value, HarvestError> {
        let key = self.session_key().await?;
        Ok(self.transport.post_json(endpoint, &key, body).await?)
    }
}
