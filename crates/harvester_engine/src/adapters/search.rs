use std::fmt;
use std::str::FromStr;

use harvester_core::{HarvestResult, SEARCH, LIVE};
use serde_json::json;

use crate::engine::Harvester;
use crate::HarvestError;

/// Search filter for live broadcasts.
const LIVE_PARAMS: &str = "EgJAAQ%3D%3D";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Relevance,
    UploadDate,
    ViewCount,
    Rating,
}

impl SortOrder {
    /// Opaque `params` value selecting this order; relevance sends none.
    pub fn params(self) -> Option<&'static str> {
        match self {
            SortOrder::Relevance => None,
            SortOrder::UploadDate => Some("CAISAhAB"),
            SortOrder::ViewCount => Some("CAMSAhAB"),
            SortOrder::Rating => Some("CAESAhAB"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "relevance" => Ok(SortOrder::Relevance),
            "upload_date" | "date" => Ok(SortOrder::UploadDate),
            "view_count" | "views" => Ok(SortOrder::ViewCount),
            "rating" => Ok(SortOrder::Rating),
            other => Err(format!(
                "unknown sort order `{other}` (expected relevance, upload_date, view_count or rating)"
            )),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortOrder::Relevance => "relevance",
            SortOrder::UploadDate => "upload_date",
            SortOrder::ViewCount => "view_count",
            SortOrder::Rating => "rating",
        };
        f.write_str(name)
    }
}

impl Harvester {
    pub async fn search(
        &self,
        query: &str,
        max_items: usize,
        sort: SortOrder,
    ) -> Result<HarvestResult, HarvestError> {
        let mut fields = vec![("query", json!(query))];
        if let Some(params) = sort.params() {
            fields.push(("params", json!(params)));
        }
        let seed = self.context.seed_payload(fields);
        self.harvest(&SEARCH, SEARCH.endpoint, &seed, max_items).await
    }

    pub async fn live_videos(
        &self,
        query: &str,
        max_items: usize,
    ) -> Result<HarvestResult, HarvestError> {
        let seed = self
            .context
            .seed_payload([("query", json!(query)), ("params", json!(LIVE_PARAMS))]);
        self.harvest(&LIVE, LIVE.endpoint, &seed, max_items).await
    }
}
