//! Domain adapters: seed payloads, pre-fetch steps and the binding each
//! listing decodes with.
mod channel;
mod comments;
mod detail;
mod located;
mod playlist;
mod search;
mod trending;

pub use located::{LocatedQuery, LocatedHarvest};
pub use search::SortOrder;
