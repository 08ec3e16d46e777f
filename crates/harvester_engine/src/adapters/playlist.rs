use harvester_core::{HarvestResult, PLAYLIST_VIDEOS};
use serde_json::json;

use crate::engine::Harvester;
use crate::HarvestError;

/// Browse id of a playlist page: the playlist id behind a `VL` prefix.
fn playlist_browse_id(playlist_id: &str) -> String {
    let id = playlist_id.trim();
    if id.starts_with("VL") {
        id.to_string()
    } else {
        format!("VL{id}")
    }
}

impl Harvester {
    pub async fn playlist_videos(
        &self,
        playlist_id: &str,
        max_items: usize,
    ) -> Result<HarvestResult, HarvestError> {
        let seed = self
            .context
            .seed_payload([("browseId", json!(playlist_browse_id(playlist_id)))]);
        self.harvest(&PLAYLIST_VIDEOS, PLAYLIST_VIDEOS.endpoint, &seed, max_items)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::playlist_browse_id;

    #[test]
    fn browse_id_is_prefixed_once() {
        assert_eq!(playlist_browse_id("PL123"), "VLPL123");
        assert_eq!(playlist_browse_id("VLPL123"), "VLPL123");
    }
}
