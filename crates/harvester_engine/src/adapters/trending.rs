use harvester_core::{HarvestResult, TRENDING};
use serde_json::json;

use crate::engine::Harvester;
use crate::HarvestError;

const TRENDING_BROWSE_ID: &str = "FEtrending";

impl Harvester {
    pub async fn trending_videos(&self, max_items: usize) -> Result<HarvestResult, HarvestError> {
        let seed = self
            .context
            .seed_payload([("browseId", json!(TRENDING_BROWSE_ID))]);
        self.harvest(&TRENDING, TRENDING.endpoint, &seed, max_items)
            .await
    }
}
