//! Tab resolution for channel pages.
//!
//! A channel's sub-listings (videos, playlists) have their own browse
//! identifier, which is only discoverable from the landing page's tab list.

use serde_json::Value;

use crate::error::ShapeMismatch;
use crate::paths::{page, tab};
use crate::tree;

pub const HOME_TAB: &str = "home";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseTarget {
    pub browse_id: String,
    pub params: Option<String>,
}

pub fn tab_renderers(response: &Value) -> impl Iterator<Item = &Value> {
    tree::list_at(response, page::BROWSE_TABS)
        .iter()
        .filter_map(|node| tree::at(node, tab::RENDERER))
}

/// Tab renderer whose title matches `title`, ignoring case.
pub fn find_tab<'a>(response: &'a Value, title: &str) -> Option<&'a Value> {
    tab_renderers(response).find(|renderer| {
        tree::str_at(renderer, tab::TITLE)
            .map(|t| t.trim().eq_ignore_ascii_case(title))
            .unwrap_or(false)
    })
}

pub fn selected_tab(response: &Value) -> Option<&Value> {
    tab_renderers(response).find(|renderer| tree::bool_at(renderer, tab::SELECTED))
}

pub fn browse_target(renderer: &Value) -> Option<BrowseTarget> {
    Some(BrowseTarget {
        browse_id: tree::id_at(renderer, tab::BROWSE_ID)?,
        params: tree::id_at(renderer, tab::PARAMS),
    })
}

pub fn has_content(renderer: &Value) -> bool {
    tree::at(renderer, tab::CONTENT).is_some()
}

/// Item list of a rendered tab: a rich grid or a section list.
pub fn tab_items(renderer: &Value) -> Option<&[Value]> {
    tree::at(renderer, tab::RICH_GRID)
        .or_else(|| tree::at(renderer, tab::SECTION_LIST))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
}

/// Browse target of the first tab in `titles` that exists, falling back to
/// the Home tab.
pub fn resolve_tab(
    response: &Value,
    titles: &[&str],
    domain: &'static str,
) -> Result<BrowseTarget, ShapeMismatch> {
    if tree::at(response, page::BROWSE_TABS).is_none() {
        return Err(ShapeMismatch::new(domain, tree::describe(page::BROWSE_TABS)));
    }
    titles
        .iter()
        .chain(std::iter::once(&HOME_TAB))
        .filter_map(|title| find_tab(response, title))
        .find_map(browse_target)
        .ok_or_else(|| ShapeMismatch::new(domain, format!("tab {}", titles.join("|"))))
}
