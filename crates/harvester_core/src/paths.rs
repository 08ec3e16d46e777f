//! Field path tables for every response shape the harvester reads.

use crate::tree::Path;
use crate::tree::Step::{Index, Key, Last};

pub mod page {
    use super::*;

    pub const SEARCH_SECTIONS: Path = &[
        Key("contents"),
        Key("twoColumnSearchResultsRenderer"),
        Key("primaryContents"),
        Key("sectionListRenderer"),
        Key("contents"),
    ];
    pub const BROWSE_TABS: Path = &[
        Key("contents"),
        Key("twoColumnBrowseResultsRenderer"),
        Key("tabs"),
    ];
    pub const PLAYLIST_VIDEOS: Path = &[
        Key("contents"),
        Key("twoColumnBrowseResultsRenderer"),
        Key("tabs"),
        Index(0),
        Key("tabRenderer"),
        Key("content"),
        Key("sectionListRenderer"),
        Key("contents"),
        Index(0),
        Key("itemSectionRenderer"),
        Key("contents"),
        Index(0),
        Key("playlistVideoListRenderer"),
        Key("contents"),
    ];
    pub const WATCH_RESULTS: Path = &[
        Key("contents"),
        Key("twoColumnWatchNextResults"),
        Key("results"),
        Key("results"),
        Key("contents"),
    ];
    /// Top-level lists that may hold continuation actions.
    pub const CONTINUATION_ROOTS: &[&str] = &[
        "onResponseReceivedCommands",
        "onResponseReceivedActions",
        "onResponseReceivedEndpoints",
    ];
    /// Action wrappers whose `continuationItems` carry the next page.
    pub const CONTINUATION_ACTIONS: &[&str] = &[
        "appendContinuationItemsAction",
        "reloadContinuationItemsCommand",
    ];
    pub const CONTINUATION_ITEMS: Path = &[Key("continuationItems")];
}

pub mod cursor {
    use super::*;

    pub const ENDPOINT_TOKEN: Path = &[
        Key("continuationItemRenderer"),
        Key("continuationEndpoint"),
        Key("continuationCommand"),
        Key("token"),
    ];
    pub const BUTTON_TOKEN: Path = &[
        Key("continuationItemRenderer"),
        Key("button"),
        Key("buttonRenderer"),
        Key("command"),
        Key("continuationCommand"),
        Key("token"),
    ];
    pub const LEGACY_NEXT: Path = &[Key("nextContinuationData"), Key("continuation")];
}

pub mod tab {
    use super::*;

    pub const RENDERER: Path = &[Key("tabRenderer")];
    pub const TITLE: Path = &[Key("title")];
    pub const SELECTED: Path = &[Key("selected")];
    pub const CONTENT: Path = &[Key("content")];
    pub const BROWSE_ID: Path = &[Key("endpoint"), Key("browseEndpoint"), Key("browseId")];
    pub const PARAMS: Path = &[Key("endpoint"), Key("browseEndpoint"), Key("params")];
    pub const RICH_GRID: Path = &[Key("content"), Key("richGridRenderer"), Key("contents")];
    pub const SECTION_LIST: Path = &[Key("content"), Key("sectionListRenderer"), Key("contents")];
}

pub mod video {
    use super::*;

    pub const ID: Path = &[Key("videoId")];
    pub const TITLE: Path = &[Key("title")];
    pub const LENGTH: Path = &[Key("lengthText")];
    pub const VIEWS: Path = &[Key("viewCountText")];
    pub const SHORT_VIEWS: Path = &[Key("shortViewCountText")];
    pub const OWNER: Path = &[Key("ownerText")];
    pub const BYLINE: Path = &[Key("shortBylineText")];
    pub const OWNER_ID: Path = &[
        Key("ownerText"),
        Key("runs"),
        Index(0),
        Key("navigationEndpoint"),
        Key("browseEndpoint"),
        Key("browseId"),
    ];
    pub const PUBLISHED: Path = &[Key("publishedTimeText")];
    pub const SNIPPET: Path = &[
        Key("detailedMetadataSnippets"),
        Index(0),
        Key("snippetText"),
    ];
    pub const THUMBNAILS: Path = &[Key("thumbnail"), Key("thumbnails")];
    pub const THUMBNAIL_URL: Path = &[Key("thumbnail"), Key("thumbnails"), Last, Key("url")];
    pub const INDEX: Path = &[Key("index")];
}

pub mod lockup {
    use super::*;

    pub const THUMBNAIL_VIEW: Path = &[
        Key("contentImage"),
        Key("collectionThumbnailViewModel"),
        Key("primaryThumbnail"),
        Key("thumbnailViewModel"),
    ];

    pub const PLAYLIST_ID: Path = &[
        Key("rendererContext"),
        Key("commandContext"),
        Key("onTap"),
        Key("innertubeCommand"),
        Key("watchEndpoint"),
        Key("playlistId"),
    ];
    pub const CONTENT_ID: Path = &[Key("contentId")];
    pub const TITLE: Path = &[
        Key("metadata"),
        Key("lockupMetadataViewModel"),
        Key("title"),
        Key("content"),
    ];
    pub const THUMBNAIL_URL: Path = &[Key("image"), Key("sources"), Last, Key("url")];
    pub const OVERLAYS: Path = &[Key("overlays")];
    pub const BADGES: Path = &[Key("thumbnailOverlayBadgeViewModel"), Key("thumbnailBadges")];
    pub const BADGE_TEXT: Path = &[Key("thumbnailBadgeViewModel"), Key("text")];
}

pub mod comment {
    use super::*;

    pub const MUTATIONS: Path = &[
        Key("frameworkUpdates"),
        Key("entityBatchUpdate"),
        Key("mutations"),
    ];
    pub const ENTITY: Path = &[Key("payload"), Key("commentEntityPayload")];
    pub const ID: Path = &[Key("properties"), Key("commentId")];
    pub const CONTENT: Path = &[Key("properties"), Key("content"), Key("content")];
    pub const PUBLISHED: Path = &[Key("properties"), Key("publishedTime")];
    pub const AUTHOR: Path = &[Key("author"), Key("displayName")];
    pub const AVATAR: Path = &[Key("author"), Key("avatarThumbnailUrl")];
    pub const LIKES: Path = &[Key("toolbar"), Key("likeCountNotliked")];
    pub const LIKES_FALLBACK: Path = &[Key("toolbar"), Key("likeCountLiked")];
    pub const REPLY_COUNT: Path = &[Key("toolbar"), Key("replyCount")];

    /// View-model id inside a `commentThreadRenderer`.
    pub const THREAD_VIEW_ID: Path = &[
        Key("commentViewModel"),
        Key("commentViewModel"),
        Key("commentId"),
    ];
    /// View-model id of a flat reply item.
    pub const FLAT_VIEW_ID: Path = &[Key("commentViewModel"), Key("commentId")];
    pub const REPLY_CONTENTS: Path = &[
        Key("replies"),
        Key("commentRepliesRenderer"),
        Key("contents"),
    ];
}

pub mod channel {
    use super::*;

    pub const METADATA: Path = &[Key("metadata"), Key("channelMetadataRenderer")];
    pub const EXTERNAL_ID: Path = &[Key("externalId")];
    pub const TITLE: Path = &[Key("title")];
    pub const DESCRIPTION: Path = &[Key("description")];
    pub const AVATAR_URL: Path = &[Key("avatar"), Key("thumbnails"), Last, Key("url")];
    pub const BANNER_URL: Path = &[
        Key("header"),
        Key("pageHeaderRenderer"),
        Key("banner"),
        Key("imageBannerViewModel"),
        Key("image"),
        Key("sources"),
        Last,
        Key("url"),
    ];
    pub const METADATA_ROWS: Path = &[
        Key("header"),
        Key("pageHeaderRenderer"),
        Key("content"),
        Key("pageHeaderViewModel"),
        Key("metadata"),
        Key("contentMetadataViewModel"),
        Key("metadataRows"),
    ];
    pub const ROW_PARTS: Path = &[Key("metadataParts")];
    pub const PART_TEXT: Path = &[Key("text"), Key("content")];
}

pub mod player {
    use super::*;

    pub const STATUS: Path = &[Key("playabilityStatus"), Key("status")];
    pub const REASON: Path = &[Key("playabilityStatus"), Key("reason")];
    pub const DETAILS: Path = &[Key("videoDetails")];
    pub const FORMATS: Path = &[Key("streamingData"), Key("formats")];
    pub const ADAPTIVE_FORMATS: Path = &[Key("streamingData"), Key("adaptiveFormats")];
}
