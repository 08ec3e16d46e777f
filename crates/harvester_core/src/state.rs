use std::collections::HashSet;

use crate::effect::{Effect, StopReason};

/// Consecutive zero-item follow-up pages tolerated before giving up.
pub const DEFAULT_UNPRODUCTIVE_LIMIT: u32 = 3;

/// Accumulated state of one pagination sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct PagerState<T> {
    domain: &'static str,
    max_items: usize,
    unproductive_limit: u32,
    items: Vec<T>,
    seen_cursors: HashSet<String>,
    pages: usize,
    unproductive: u32,
    stopped: Option<StopReason>,
}

impl<T> PagerState<T> {
    pub fn new(domain: &'static str, max_items: usize) -> Self {
        Self {
            domain,
            max_items,
            unproductive_limit: DEFAULT_UNPRODUCTIVE_LIMIT,
            items: Vec::new(),
            seen_cursors: HashSet::new(),
            pages: 0,
            unproductive: 0,
            stopped: None,
        }
    }

    pub fn with_unproductive_limit(mut self, limit: u32) -> Self {
        self.unproductive_limit = limit.max(1);
        self
    }

    /// Mark `cursor` as already issued, for sequences opened by a cursor
    /// rather than by a seed payload.
    pub fn with_seen_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.seen_cursors.insert(cursor.into());
        self
    }

    pub fn domain(&self) -> &'static str {
        self.domain
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn stopped(&self) -> Option<StopReason> {
        self.stopped
    }

    /// Collected items cut to `max_items`, order preserved.
    pub fn into_items(mut self) -> Vec<T> {
        self.items.truncate(self.max_items);
        self.items
    }

    pub(crate) fn finish(&mut self, reason: StopReason) -> Effect {
        self.stopped = Some(reason);
        Effect::Finish(reason)
    }

    pub(crate) fn record_page(&mut self, items: Vec<T>, follow_up: bool) {
        self.pages += 1;
        if follow_up {
            if items.is_empty() {
                self.unproductive += 1;
            } else {
                self.unproductive = 0;
            }
        }
        self.items.extend(items);
    }

    pub(crate) fn limit_reached(&self) -> bool {
        self.items.len() >= self.max_items
    }

    pub(crate) fn unproductive_exceeded(&self) -> bool {
        self.unproductive >= self.unproductive_limit
    }

    /// Returns false when the cursor was already issued in this sequence.
    pub(crate) fn remember_cursor(&mut self, cursor: &str) -> bool {
        self.seen_cursors.insert(cursor.to_string())
    }
}
