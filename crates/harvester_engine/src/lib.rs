//! Harvester engine: transport, pagination driver and domain adapters.
mod adapters;
mod engine;
mod fetch;
mod pager;
mod resolve;
mod trace;
mod types;

pub use adapters::{LocatedHarvest, LocatedQuery, SortOrder};
pub use engine::{HarvestSettings, Harvester, DEFAULT_FANOUT_PERMITS};
pub use fetch::{ProxySettings, ReqwestTransport, Transport, TransportSettings, DEFAULT_BASE_URL};
pub use resolve::{extract_api_key, extract_channel_id, normalize_handle, resolve_handle, KeyResolver};
pub use trace::{ChannelTraceSink, HarvestEvent, LogTraceSink, TraceSink};
pub use types::{FailureKind, HarvestError, TransportError};
