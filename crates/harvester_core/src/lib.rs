//! Harvester core: pure decoding, pagination state and grid helpers.
//!
//! Nothing in this crate performs IO. Responses come in as
//! `serde_json::Value` trees; the engine crate owns transport.
mod binding;
mod comments;
mod context;
mod effect;
mod error;
mod extract;
mod grid;
mod item;
mod msg;
pub mod paths;
mod profile;
mod state;
pub mod tabs;
pub mod tree;
mod update;

pub use binding::{
    Binding, Endpoint, PageDecoder, SeedLocator, CHANNEL_PLAYLISTS, CHANNEL_VIDEOS, LIVE, LOCATED,
    PLAYLIST_VIDEOS, SEARCH, TRENDING,
};
pub use comments::{
    comment_section_cursor, entity_map, join, join_threads, view_refs, CommentEntity,
    CommentThread, CommentViewRef, EntityMap, RefLayout, ReplyDecoder, ThreadDecoder,
};
pub use context::HarvestContext;
pub use effect::{Effect, StopReason};
pub use error::ShapeMismatch;
pub use extract::{continuation_items, cursor_of, extract_page, Page, Tag, Variant};
pub use grid::{grid, merge_by_identity, Coordinate, GridPoint, EARTH_RADIUS_KM, MAX_GRID_STEPS};
pub use item::{
    watch_url, ChannelProfile, Comment, HarvestResult, LiveVideo, LocatedVideo, NormalizedItem,
    PlaylistEntry, PlaylistSummary, Thumbnail, TrendingVideo, VideoDetail, VideoSummary,
};
pub use msg::PagerMsg;
pub use profile::{channel_profile, playability_issue, video_detail};
pub use state::{PagerState, DEFAULT_UNPRODUCTIVE_LIMIT};
pub use update::update;
