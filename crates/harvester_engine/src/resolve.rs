//! Scraping helpers that read values out of HTML pages: the session key
//! from the landing page and a channel id from a handle page.

use std::sync::LazyLock;

use engine_logging::engine_debug;
use regex::Regex;
use scraper::{Html, Selector};
use tokio::sync::RwLock;
use url::Url;

use crate::fetch::Transport;
use crate::HarvestError;

static API_KEY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#""INNERTUBE_API_KEY":"([^"]+)""#).ok());
static CHANNEL_ID_PARAM: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"channel_id=([a-zA-Z0-9_-]{24})").ok());
static BROWSE_ID: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#""browseId":"(UC[^"]+)""#).ok());

fn first_capture(pattern: &LazyLock<Option<Regex>>, haystack: &str) -> Option<String> {
    pattern
        .as_ref()?
        .captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Session key embedded in the landing page markup.
pub fn extract_api_key(html: &str) -> Option<String> {
    first_capture(&API_KEY, html)
}

/// Lazily fetched, cached session key.
#[derive(Debug, Default)]
pub struct KeyResolver {
    cached: RwLock<Option<String>>,
}

impl KeyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver that starts out with a known key and never fetches until
    /// invalidated.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            cached: RwLock::new(Some(key.into())),
        }
    }

    pub async fn key(&self, transport: &dyn Transport) -> Result<String, HarvestError> {
        if let Some(key) = self.cached.read().await.as_ref() {
            return Ok(key.clone());
        }
        let mut slot = self.cached.write().await;
        if let Some(key) = slot.as_ref() {
            return Ok(key.clone());
        }
        let html = transport.get_page("/").await?;
        let key = extract_api_key(&html).ok_or(HarvestError::KeyNotFound)?;
        engine_debug!("session key resolved");
        *slot = Some(key.clone());
        Ok(key)
    }

    /// Forget the cached key; the next call fetches a fresh one.
    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }
}

/// `"@name"`, `"name"` or a full `https://…/@name` URL, reduced to `name`.
pub fn normalize_handle(handle: &str) -> &str {
    let trimmed = handle.trim().trim_end_matches('/');
    let tail = trimmed.rsplit_once("/@").map_or(trimmed, |(_, tail)| tail);
    tail.trim_start_matches('@')
}

/// Channel id from a handle page: the RSS alternate link first, then any
/// embedded `browseId` that looks like a channel id.
pub fn extract_channel_id(html: &str) -> Option<String> {
    from_alternate_link(html)
        .or_else(|| first_capture(&CHANNEL_ID_PARAM, html))
        .or_else(|| first_capture(&BROWSE_ID, html))
}

fn from_alternate_link(html: &str) -> Option<String> {
    let selector = Selector::parse(r#"link[rel="alternate"]"#).ok()?;
    let doc = Html::parse_document(html);
    doc.select(&selector)
        .filter_map(|link| link.value().attr("href"))
        .filter_map(|href| Url::parse(href).ok())
        .find_map(|url| {
            url.query_pairs()
                .find(|(name, _)| name == "channel_id")
                .map(|(_, value)| value.into_owned())
        })
        .filter(|id| id.starts_with("UC"))
}

pub async fn resolve_handle(
    transport: &dyn Transport,
    handle: &str,
) -> Result<String, HarvestError> {
    let name = normalize_handle(handle);
    if name.is_empty() {
        return Err(HarvestError::ChannelNotFound(handle.to_string()));
    }
    let html = transport.get_page(&format!("/@{name}")).await?;
    extract_channel_id(&html).ok_or_else(|| HarvestError::ChannelNotFound(handle.to_string()))
}
