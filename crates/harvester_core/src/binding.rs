//! Declarative listing bindings: which endpoint a domain talks to, where its
//! first page lives in the seed response, and which variant set decodes it.

use serde_json::Value;

use crate::error::ShapeMismatch;
use crate::extract::{continuation_items, extract_page, Page, Variant};
use crate::item::NormalizedItem;
use crate::paths::page;
use crate::tabs;
use crate::tree::{self, Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Search,
    Browse,
    Next,
    Player,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Search => "/youtubei/v1/search",
            Endpoint::Browse => "/youtubei/v1/browse",
            Endpoint::Next => "/youtubei/v1/next",
            Endpoint::Player => "/youtubei/v1/player",
        }
    }
}

/// Turns raw responses into pages. `decode_seed` treats the response as
/// authoritative; `decode_continuation` returns `None` when a follow-up has
/// no recognised container, which ends pagination.
pub trait PageDecoder: Send + Sync {
    type Item: Send;

    fn domain(&self) -> &'static str;

    fn decode_seed(&self, response: &Value) -> Result<Page<Self::Item>, ShapeMismatch>;

    fn decode_continuation(&self, response: &Value) -> Option<Page<Self::Item>>;
}

/// Where the first page of items sits in a seed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedLocator {
    /// A fixed content path.
    Path(Path),
    /// The tab with this title, or the selected tab when titles differ.
    Tab(&'static str),
    /// Every tab's content, concatenated.
    AllTabs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub domain: &'static str,
    pub endpoint: Endpoint,
    pub locator: SeedLocator,
    pub variant: Variant,
}

pub const SEARCH: Binding = Binding {
    domain: "search",
    endpoint: Endpoint::Search,
    locator: SeedLocator::Path(page::SEARCH_SECTIONS),
    variant: Variant::SearchVideo,
};

pub const LIVE: Binding = Binding {
    domain: "live",
    endpoint: Endpoint::Search,
    locator: SeedLocator::Path(page::SEARCH_SECTIONS),
    variant: Variant::Live,
};

pub const LOCATED: Binding = Binding {
    domain: "located",
    endpoint: Endpoint::Search,
    locator: SeedLocator::Path(page::SEARCH_SECTIONS),
    variant: Variant::Located,
};

pub const CHANNEL_VIDEOS: Binding = Binding {
    domain: "channel_videos",
    endpoint: Endpoint::Browse,
    locator: SeedLocator::Tab("videos"),
    variant: Variant::ChannelVideo,
};

pub const CHANNEL_PLAYLISTS: Binding = Binding {
    domain: "channel_playlists",
    endpoint: Endpoint::Browse,
    locator: SeedLocator::Tab("playlists"),
    variant: Variant::PlaylistSummary,
};

pub const PLAYLIST_VIDEOS: Binding = Binding {
    domain: "playlist_videos",
    endpoint: Endpoint::Browse,
    locator: SeedLocator::Path(page::PLAYLIST_VIDEOS),
    variant: Variant::PlaylistEntry,
};

pub const TRENDING: Binding = Binding {
    domain: "trending",
    endpoint: Endpoint::Browse,
    locator: SeedLocator::AllTabs,
    variant: Variant::Trending,
};

impl Binding {
    fn mismatch(&self, step: impl Into<String>) -> ShapeMismatch {
        ShapeMismatch::new(self.domain, step)
    }
}

impl PageDecoder for Binding {
    type Item = NormalizedItem;

    fn domain(&self) -> &'static str {
        self.domain
    }

    fn decode_seed(&self, response: &Value) -> Result<Page<NormalizedItem>, ShapeMismatch> {
        match self.locator {
            SeedLocator::Path(path) => {
                let nodes = tree::at(response, path)
                    .and_then(Value::as_array)
                    .ok_or_else(|| self.mismatch(tree::describe(path)))?;
                Ok(extract_page(nodes, self.variant))
            }
            SeedLocator::Tab(title) => {
                let renderer = tabs::find_tab(response, title)
                    .or_else(|| tabs::selected_tab(response))
                    .ok_or_else(|| self.mismatch(format!("tab {title}")))?;
                let nodes = tabs::tab_items(renderer)
                    .ok_or_else(|| self.mismatch(format!("content of tab {title}")))?;
                Ok(extract_page(nodes, self.variant))
            }
            SeedLocator::AllTabs => {
                if tree::at(response, page::BROWSE_TABS).is_none() {
                    return Err(self.mismatch(tree::describe(page::BROWSE_TABS)));
                }
                let nodes: Vec<Value> = tabs::tab_renderers(response)
                    .filter_map(tabs::tab_items)
                    .flatten()
                    .cloned()
                    .collect();
                Ok(extract_page(&nodes, self.variant))
            }
        }
    }

    fn decode_continuation(&self, response: &Value) -> Option<Page<NormalizedItem>> {
        continuation_items(response).map(|items| extract_page(&items, self.variant))
    }
}
