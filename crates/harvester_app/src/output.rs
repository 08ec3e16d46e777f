use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::Paging;

/// The requested page of a harvested list.
pub fn slice_page<T>(items: Vec<T>, paging: Paging) -> Vec<T> {
    items
        .into_iter()
        .skip(paging.start())
        .take(paging.limit as usize)
        .collect()
}

/// JSON document printed for every command.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub command: &'static str,
    pub fetched_utc: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Envelope {
    pub fn new(command: &'static str) -> Self {
        Self {
            command,
            fetched_utc: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            fields: Map::new(),
        }
    }

    pub fn field(mut self, name: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.fields.insert(name.to_string(), value);
        self
    }

    /// A paged listing: `page`, `limit`, `total` (harvested before slicing)
    /// and the `results` of the requested page.
    pub fn listing<T: Serialize>(self, items: Vec<T>, paging: Paging) -> Self {
        let total = items.len();
        self.field("page", paging.page)
            .field("limit", paging.limit)
            .field("total", total)
            .field("results", slice_page(items, paging))
    }

    pub fn render(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
