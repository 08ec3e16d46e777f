use serde::Serialize;
use serde_json::Value;

use crate::grid::GridPoint;

pub const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

pub fn watch_url(video_id: &str) -> String {
    format!("{WATCH_URL}{video_id}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: u64,
    pub height: u64,
}

impl Thumbnail {
    pub(crate) fn list(nodes: &[Value]) -> Vec<Thumbnail> {
        nodes
            .iter()
            .filter_map(|node| {
                let url = node.get("url")?.as_str()?.to_string();
                Some(Thumbnail {
                    url,
                    width: node.get("width").and_then(Value::as_u64).unwrap_or_default(),
                    height: node.get("height").and_then(Value::as_u64).unwrap_or_default(),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoSummary {
    pub video_id: String,
    pub title: String,
    pub url: String,
    pub duration: String,
    pub views: String,
    pub channel: String,
    pub channel_id: String,
    pub published_time: String,
    pub description_snippet: String,
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelProfile {
    pub channel_id: String,
    pub name: String,
    pub handle: Option<String>,
    pub avatar: Option<String>,
    pub banner: Option<String>,
    pub subscriber_count: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistSummary {
    pub playlist_id: String,
    pub title: String,
    pub thumbnail: String,
    pub video_count: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistEntry {
    pub video_id: String,
    pub title: String,
    pub index: String,
    pub published_time: String,
    pub duration: String,
    pub thumbnail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub comment_id: String,
    pub author: String,
    pub avatar: String,
    pub content: String,
    pub published: String,
    pub likes: u64,
    pub reply_count: u64,
    pub replies: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveVideo {
    pub video_id: String,
    pub title: String,
    pub url: String,
    pub channel: String,
    pub views: String,
    pub thumbnails: Vec<Thumbnail>,
    pub is_live: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendingVideo {
    pub video_id: String,
    pub title: String,
    pub url: String,
    pub channel: String,
    pub views: String,
    pub published: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocatedVideo {
    pub video_id: String,
    pub title: String,
    pub url: String,
    pub channel: String,
    pub views: String,
    pub published_time: String,
    /// Grid cell that produced this item (last writer on duplicates).
    pub origin: Option<GridPoint>,
}

/// One harvested record, tagged by its kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalizedItem {
    Video(VideoSummary),
    Channel(ChannelProfile),
    Playlist(PlaylistSummary),
    PlaylistEntry(PlaylistEntry),
    Comment(Comment),
    Live(LiveVideo),
    Trending(TrendingVideo),
    Located(LocatedVideo),
}

impl NormalizedItem {
    /// Stable identity of the record (video, channel, playlist or comment id).
    pub fn identity(&self) -> &str {
        match self {
            NormalizedItem::Video(v) => &v.video_id,
            NormalizedItem::Channel(c) => &c.channel_id,
            NormalizedItem::Playlist(p) => &p.playlist_id,
            NormalizedItem::PlaylistEntry(e) => &e.video_id,
            NormalizedItem::Comment(c) => &c.comment_id,
            NormalizedItem::Live(v) => &v.video_id,
            NormalizedItem::Trending(v) => &v.video_id,
            NormalizedItem::Located(v) => &v.video_id,
        }
    }
}

pub type HarvestResult = Vec<NormalizedItem>;

/// Player metadata for a single video.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoDetail {
    pub video_id: String,
    pub title: String,
    pub author: String,
    pub length_seconds: u64,
    pub views: u64,
    pub is_live_content: bool,
    pub formats: Vec<Value>,
    pub adaptive_formats: Vec<Value>,
}
