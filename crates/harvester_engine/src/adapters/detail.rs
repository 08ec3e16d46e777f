use harvester_core::{playability_issue, video_detail, Endpoint, VideoDetail};
use serde_json::json;

use crate::engine::Harvester;
use crate::HarvestError;

impl Harvester {
    /// Player metadata for one video. A video the player refuses to play is
    /// reported as [`HarvestError::Unplayable`].
    pub async fn video_detail(&self, video_id: &str) -> Result<VideoDetail, HarvestError> {
        let body = self.context.seed_payload([("videoId", json!(video_id))]);
        let response = self.post(Endpoint::Player, &body).await?;
        if let Some((status, reason)) = playability_issue(&response) {
            return Err(HarvestError::Unplayable { status, reason });
        }
        Ok(video_detail(&response)?)
    }
}
