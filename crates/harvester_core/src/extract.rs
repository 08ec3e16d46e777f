//! Variant extractor: decodes a page of loosely-shaped renderer nodes into
//! normalized items plus at most one continuation cursor.
//!
//! Nodes are matched against a closed set of renderer tags. Section
//! containers are flattened first, wrapper tags are unwrapped exactly one
//! level, and anything unrecognised is skipped without error.

use serde_json::Value;

use crate::item::{
    watch_url, LiveVideo, LocatedVideo, NormalizedItem, PlaylistEntry, PlaylistSummary, Thumbnail,
    TrendingVideo, VideoSummary,
};
use crate::paths::{cursor, lockup, page, video};
use crate::tree::{self, Step};

/// Renderer tags the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    VideoCard,
    GridCard,
    RichItem,
    Carousel,
    Shelf,
    RichSection,
    PlaylistVideo,
    CommentThread,
    Lockup,
    Section,
    Continuation,
}

impl Tag {
    pub fn from_key(key: &str) -> Option<Tag> {
        let tag = match key {
            "videoRenderer" => Tag::VideoCard,
            "gridVideoRenderer" => Tag::GridCard,
            "richItemRenderer" => Tag::RichItem,
            "horizontalListRenderer" | "gridRenderer" => Tag::Carousel,
            "shelfRenderer" => Tag::Shelf,
            "richSectionRenderer" => Tag::RichSection,
            "playlistVideoRenderer" => Tag::PlaylistVideo,
            "commentThreadRenderer" => Tag::CommentThread,
            "lockupViewModel" => Tag::Lockup,
            "itemSectionRenderer" => Tag::Section,
            "continuationItemRenderer" => Tag::Continuation,
            _ => return None,
        };
        Some(tag)
    }

    /// First recognised tag of a node together with the tagged body.
    pub fn classify(node: &Value) -> Option<(Tag, &Value)> {
        node.as_object()?
            .iter()
            .find_map(|(key, body)| Tag::from_key(key).map(|tag| (tag, body)))
    }

    pub fn is_wrapper(self) -> bool {
        matches!(
            self,
            Tag::RichItem | Tag::Carousel | Tag::Shelf | Tag::RichSection
        )
    }
}

/// Which normalized record a listing produces from its leaf tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    SearchVideo,
    ChannelVideo,
    Trending,
    Live,
    Located,
    PlaylistEntry,
    PlaylistSummary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub cursor: Option<String>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            cursor: None,
        }
    }
}

/// Decode one page worth of nodes for `variant`.
pub fn extract_page(nodes: &[Value], variant: Variant) -> Page<NormalizedItem> {
    let mut flat = flatten_sections(nodes);
    let mut items = Vec::new();
    let mut nested_cursor = None;
    for node in &flat.nodes {
        let Some((tag, body)) = Tag::classify(node) else {
            continue;
        };
        if tag.is_wrapper() {
            for child in unwrap(tag, body) {
                match Tag::classify(child) {
                    Some((Tag::Continuation, _)) => {
                        if nested_cursor.is_none() {
                            nested_cursor = cursor_of(child);
                        }
                    }
                    Some((child_tag, child_body)) if !child_tag.is_wrapper() => {
                        items.extend(build(variant, child_tag, child_body));
                    }
                    _ => {}
                }
            }
        } else {
            items.extend(build(variant, tag, body));
        }
    }
    if flat.continuation.is_none() {
        flat.continuation = nested_cursor;
    }
    Page {
        items,
        cursor: flat.cursor(),
    }
}

/// Items of a follow-up response, or `None` when it holds no recognised
/// continuation container at all.
pub fn continuation_items(response: &Value) -> Option<Vec<Value>> {
    let mut found = false;
    let mut items = Vec::new();
    for root in page::CONTINUATION_ROOTS {
        for entry in tree::list_at(response, &[Step::Key(*root)]) {
            for action in page::CONTINUATION_ACTIONS {
                if let Some(body) = entry.get(*action) {
                    found = true;
                    items.extend(tree::list_at(body, page::CONTINUATION_ITEMS).iter().cloned());
                }
            }
        }
    }
    found.then_some(items)
}

/// Cursor carried by a `continuationItemRenderer` node, in either the
/// endpoint or the "show more" button form.
pub fn cursor_of(node: &Value) -> Option<String> {
    tree::id_at(node, cursor::ENDPOINT_TOKEN).or_else(|| tree::id_at(node, cursor::BUTTON_TOKEN))
}

pub(crate) struct FlatNodes<'a> {
    pub nodes: Vec<&'a Value>,
    continuation: Option<String>,
    legacy: Option<String>,
}

impl FlatNodes<'_> {
    pub fn cursor(&self) -> Option<String> {
        self.continuation.clone().or_else(|| self.legacy.clone())
    }
}

/// Expand `itemSectionRenderer` containers and pull out the cursor.
/// A `continuationItemRenderer` wins over a section's legacy `continuations`.
pub(crate) fn flatten_sections(nodes: &[Value]) -> FlatNodes<'_> {
    let mut flat = FlatNodes {
        nodes: Vec::with_capacity(nodes.len()),
        continuation: None,
        legacy: None,
    };
    for node in nodes {
        match Tag::classify(node) {
            Some((Tag::Section, section)) => {
                for inner in tree::list_at(section, &[Step::Key("contents")]) {
                    flat.push(inner);
                }
                if flat.legacy.is_none() {
                    flat.legacy = tree::list_at(section, &[Step::Key("continuations")])
                        .iter()
                        .find_map(|c| cursor_of(c).or_else(|| tree::id_at(c, cursor::LEGACY_NEXT)));
                }
            }
            _ => flat.push(node),
        }
    }
    flat
}

impl<'a> FlatNodes<'a> {
    fn push(&mut self, node: &'a Value) {
        if matches!(Tag::classify(node), Some((Tag::Continuation, _))) {
            if self.continuation.is_none() {
                self.continuation = cursor_of(node);
            }
            return;
        }
        self.nodes.push(node);
    }
}

fn unwrap(tag: Tag, body: &Value) -> Vec<&Value> {
    match tag {
        Tag::RichItem => body.get("content").into_iter().collect(),
        Tag::Carousel => tree::list_at(body, &[Step::Key("items")]).iter().collect(),
        Tag::Shelf => {
            let content = body.get("content");
            [
                "horizontalListRenderer",
                "verticalListRenderer",
                "expandedShelfContentsRenderer",
                "gridRenderer",
            ]
            .iter()
            .find_map(|key| content.and_then(|c| c.get(*key)))
            .map(|list| tree::list_at(list, &[Step::Key("items")]).iter().collect())
            .unwrap_or_default()
        }
        Tag::RichSection => tree::list_at(
            body,
            &[
                Step::Key("content"),
                Step::Key("richShelfRenderer"),
                Step::Key("contents"),
            ],
        )
        .iter()
        .collect(),
        _ => Vec::new(),
    }
}

fn build(variant: Variant, tag: Tag, body: &Value) -> Option<NormalizedItem> {
    match (variant, tag) {
        (Variant::SearchVideo | Variant::ChannelVideo, Tag::VideoCard | Tag::GridCard) => {
            video_summary(body).map(NormalizedItem::Video)
        }
        (Variant::Trending, Tag::VideoCard | Tag::GridCard) => {
            trending_video(body).map(NormalizedItem::Trending)
        }
        (Variant::Live, Tag::VideoCard) => live_video(body).map(NormalizedItem::Live),
        (Variant::Located, Tag::VideoCard) => located_video(body).map(NormalizedItem::Located),
        (Variant::PlaylistEntry, Tag::PlaylistVideo) => {
            playlist_entry(body).map(NormalizedItem::PlaylistEntry)
        }
        (Variant::PlaylistSummary, Tag::Lockup) => {
            playlist_summary(body).map(NormalizedItem::Playlist)
        }
        _ => None,
    }
}

fn channel_name(body: &Value) -> String {
    let owner = tree::text_at(body, video::OWNER);
    if owner.is_empty() {
        tree::text_at(body, video::BYLINE)
    } else {
        owner
    }
}

fn view_text(body: &Value) -> String {
    let views = tree::text_at(body, video::VIEWS);
    if views.is_empty() {
        tree::text_at(body, video::SHORT_VIEWS)
    } else {
        views
    }
}

fn video_summary(body: &Value) -> Option<VideoSummary> {
    let video_id = tree::id_at(body, video::ID)?;
    Some(VideoSummary {
        url: watch_url(&video_id),
        title: tree::text_at(body, video::TITLE),
        duration: tree::text_at(body, video::LENGTH),
        views: view_text(body),
        channel: channel_name(body),
        channel_id: tree::string_at(body, video::OWNER_ID),
        published_time: tree::text_at(body, video::PUBLISHED),
        description_snippet: tree::text_at(body, video::SNIPPET),
        thumbnails: Thumbnail::list(tree::list_at(body, video::THUMBNAILS)),
        video_id,
    })
}

fn trending_video(body: &Value) -> Option<TrendingVideo> {
    let video_id = tree::id_at(body, video::ID)?;
    Some(TrendingVideo {
        url: watch_url(&video_id),
        title: tree::text_at(body, video::TITLE),
        channel: channel_name(body),
        views: {
            let short = tree::text_at(body, video::SHORT_VIEWS);
            if short.is_empty() {
                view_text(body)
            } else {
                short
            }
        },
        published: tree::text_at(body, video::PUBLISHED),
        video_id,
    })
}

fn live_video(body: &Value) -> Option<LiveVideo> {
    let video_id = tree::id_at(body, video::ID)?;
    Some(LiveVideo {
        url: watch_url(&video_id),
        title: tree::text_at(body, video::TITLE),
        channel: channel_name(body),
        views: tree::text_at(body, video::SHORT_VIEWS),
        thumbnails: Thumbnail::list(tree::list_at(body, video::THUMBNAILS)),
        is_live: true,
        video_id,
    })
}

fn located_video(body: &Value) -> Option<LocatedVideo> {
    let video_id = tree::id_at(body, video::ID)?;
    Some(LocatedVideo {
        url: watch_url(&video_id),
        title: tree::text_at(body, video::TITLE),
        channel: channel_name(body),
        views: view_text(body),
        published_time: tree::text_at(body, video::PUBLISHED),
        origin: None,
        video_id,
    })
}

fn playlist_entry(body: &Value) -> Option<PlaylistEntry> {
    let video_id = tree::id_at(body, video::ID)?;
    Some(PlaylistEntry {
        title: tree::text_at(body, video::TITLE),
        index: tree::text_at(body, video::INDEX),
        published_time: tree::text_at(body, video::PUBLISHED),
        duration: tree::text_at(body, video::LENGTH),
        thumbnail: tree::string_at(body, video::THUMBNAIL_URL),
        video_id,
    })
}

fn playlist_summary(body: &Value) -> Option<PlaylistSummary> {
    let playlist_id = tree::id_at(body, lockup::PLAYLIST_ID)
        .or_else(|| tree::id_at(body, lockup::CONTENT_ID))?;
    let thumbnail_view = tree::at(body, lockup::THUMBNAIL_VIEW);
    let thumbnail = thumbnail_view
        .map(|view| tree::string_at(view, lockup::THUMBNAIL_URL))
        .unwrap_or_default();
    let video_count = thumbnail_view
        .map(|view| tree::list_at(view, lockup::OVERLAYS))
        .unwrap_or_default()
        .iter()
        .flat_map(|overlay| tree::list_at(overlay, lockup::BADGES).first())
        .map(|badge| tree::string_at(badge, lockup::BADGE_TEXT))
        .find(|text| !text.is_empty())
        .unwrap_or_default();
    Some(PlaylistSummary {
        title: tree::string_at(body, lockup::TITLE),
        thumbnail,
        video_count,
        playlist_id,
    })
}
