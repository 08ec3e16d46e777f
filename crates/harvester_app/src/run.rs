use harvester_core::Coordinate;
use harvester_engine::{HarvestError, Harvester, LocatedQuery};

use crate::cli::Command;
use crate::output::Envelope;

/// Process exit code for a failed harvest.
pub fn exit_code(err: &HarvestError) -> u8 {
    match err {
        HarvestError::Transport(_) => 2,
        HarvestError::ShapeMismatch(_) => 3,
        HarvestError::KeyNotFound
        | HarvestError::ChannelNotFound(_)
        | HarvestError::Unplayable { .. } => 4,
        HarvestError::GridFailed { first, .. } => exit_code(first),
    }
}

/// `@handle` inputs are resolved to a channel id; anything else is taken
/// as an id already.
async fn channel_id(harvester: &Harvester, input: &str) -> Result<String, HarvestError> {
    let input = input.trim();
    if input.starts_with('@') || input.contains("/@") {
        harvester.resolve_handle(input).await
    } else {
        Ok(input.to_string())
    }
}

pub async fn execute(harvester: &Harvester, command: Command) -> Result<Envelope, HarvestError> {
    let envelope = Envelope::new(command.name());
    let envelope = match command {
        Command::Search {
            query,
            sort,
            paging,
        } => {
            let items = harvester.search(&query, paging.fetch_count(), sort).await?;
            envelope
                .field("query", &query)
                .field("sort", sort.to_string())
                .listing(items, paging)
        }
        Command::ChannelVideos { channel, paging } => {
            let id = channel_id(harvester, &channel).await?;
            let items = harvester.channel_videos(&id, paging.fetch_count()).await?;
            envelope.field("channel_id", &id).listing(items, paging)
        }
        Command::ChannelInfo { channel } => {
            let id = channel_id(harvester, &channel).await?;
            let info = harvester.channel_info(&id).await?;
            envelope.field("info", info)
        }
        Command::ChannelPlaylists { channel, paging } => {
            let id = channel_id(harvester, &channel).await?;
            let items = harvester
                .channel_playlists(&id, paging.fetch_count())
                .await?;
            envelope.field("channel_id", &id).listing(items, paging)
        }
        Command::PlaylistVideos {
            playlist_id,
            paging,
        } => {
            let items = harvester
                .playlist_videos(&playlist_id, paging.fetch_count())
                .await?;
            envelope
                .field("playlist_id", &playlist_id)
                .listing(items, paging)
        }
        Command::Comments { video_id, paging } => {
            let items = harvester.comments(&video_id, paging.fetch_count()).await?;
            envelope.field("video_id", &video_id).listing(items, paging)
        }
        Command::Live { query, paging } => {
            let items = harvester.live_videos(&query, paging.fetch_count()).await?;
            envelope.field("query", &query).listing(items, paging)
        }
        Command::Trending { paging } => {
            let items = harvester.trending_videos(paging.fetch_count()).await?;
            envelope.listing(items, paging)
        }
        Command::Located {
            lat,
            lng,
            radius_km,
            step_km,
            per_location_limit,
            max,
        } => {
            let query = LocatedQuery {
                center: Coordinate::new(lat, lng),
                step_km,
                radius_km,
                per_point_limit: per_location_limit as usize,
                max_items: max,
            };
            let harvest = harvester.located_videos(&query).await?;
            envelope
                .field("center", format!("{lat},{lng}"))
                .field("locations_scanned", harvest.cells_scanned)
                .field("locations_failed", harvest.cells_failed)
                .field("total_unique_videos", harvest.items.len())
                .field("videos", harvest.items)
        }
        Command::Video { video_id } => {
            let detail = harvester.video_detail(&video_id).await?;
            envelope.field("detail", detail)
        }
    };
    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use harvester_core::ShapeMismatch;
    use harvester_engine::{FailureKind, TransportError};

    #[test]
    fn exit_codes_follow_error_category() {
        let transport = HarvestError::Transport(TransportError {
            kind: FailureKind::Timeout,
            message: "slow".into(),
        });
        assert_eq!(exit_code(&transport), 2);
        assert_eq!(exit_code(&ShapeMismatch::new("search", "contents").into()), 3);
        assert_eq!(exit_code(&HarvestError::ChannelNotFound("x".into())), 4);
        assert_eq!(
            exit_code(&HarvestError::GridFailed {
                cells: 3,
                first: Box::new(transport),
            }),
            2
        );
    }
}
