//! Comment decoding: entity batch + ordered view references, joined by id.

use std::collections::HashMap;

use serde_json::Value;

use crate::binding::PageDecoder;
use crate::error::ShapeMismatch;
use crate::extract::{continuation_items, cursor_of, Page, Tag};
use crate::item::Comment;
use crate::paths::{comment, page};
use crate::tree;

/// Canonical comment fields from an entity-batch mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentEntity {
    pub comment_id: String,
    pub content: String,
    pub author: String,
    pub avatar: String,
    pub published: String,
    pub likes: u64,
    pub reply_count: u64,
}

/// Display-order reference to a comment entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentViewRef {
    pub comment_id: String,
    pub reply_cursor: Option<String>,
}

impl CommentViewRef {
    pub fn new(comment_id: impl Into<String>) -> Self {
        Self {
            comment_id: comment_id.into(),
            reply_cursor: None,
        }
    }
}

/// A joined comment still waiting for its replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThread {
    pub comment: Comment,
    pub reply_cursor: Option<String>,
}

pub type EntityMap = HashMap<String, CommentEntity>;

pub fn entity_map(response: &Value) -> EntityMap {
    tree::list_at(response, comment::MUTATIONS)
        .iter()
        .filter_map(|mutation| tree::at(mutation, comment::ENTITY))
        .filter_map(parse_entity)
        .map(|entity| (entity.comment_id.clone(), entity))
        .collect()
}

fn parse_entity(payload: &Value) -> Option<CommentEntity> {
    let comment_id = tree::id_at(payload, comment::ID)?;
    let likes = if tree::at(payload, comment::LIKES).is_some() {
        tree::count_at(payload, comment::LIKES)
    } else {
        tree::count_at(payload, comment::LIKES_FALLBACK)
    };
    Some(CommentEntity {
        content: tree::text_at(payload, comment::CONTENT),
        author: tree::string_at(payload, comment::AUTHOR),
        avatar: tree::string_at(payload, comment::AVATAR),
        published: tree::text_at(payload, comment::PUBLISHED),
        likes,
        reply_count: tree::count_at(payload, comment::REPLY_COUNT),
        comment_id,
    })
}

/// How view references are laid out in a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefLayout {
    /// Top-level `commentThreadRenderer` nodes, each with an optional reply cursor.
    Threaded,
    /// Bare `commentViewModel` nodes as returned for a reply thread.
    Flat,
}

pub fn view_refs(items: &[Value], layout: RefLayout) -> Vec<CommentViewRef> {
    items
        .iter()
        .filter_map(|item| match layout {
            RefLayout::Threaded => match Tag::classify(item) {
                Some((Tag::CommentThread, thread)) => {
                    let comment_id = tree::id_at(thread, comment::THREAD_VIEW_ID)?;
                    let reply_cursor = tree::list_at(thread, comment::REPLY_CONTENTS)
                        .iter()
                        .find_map(cursor_of);
                    Some(CommentViewRef {
                        comment_id,
                        reply_cursor,
                    })
                }
                _ => None,
            },
            RefLayout::Flat => tree::id_at(item, comment::FLAT_VIEW_ID).map(CommentViewRef::new),
        })
        .collect()
}

/// Join view references with their entities, keeping view order. References
/// whose entity is missing (removed or unavailable comments) are dropped.
pub fn join(view_refs: &[CommentViewRef], entities: &EntityMap) -> Vec<Comment> {
    join_threads(view_refs, entities)
        .into_iter()
        .map(|thread| thread.comment)
        .collect()
}

pub fn join_threads(view_refs: &[CommentViewRef], entities: &EntityMap) -> Vec<CommentThread> {
    view_refs
        .iter()
        .filter_map(|view| {
            let entity = entities.get(&view.comment_id)?;
            Some(CommentThread {
                comment: Comment {
                    comment_id: entity.comment_id.clone(),
                    author: entity.author.clone(),
                    avatar: entity.avatar.clone(),
                    content: entity.content.clone(),
                    published: entity.published.clone(),
                    likes: entity.likes,
                    reply_count: entity.reply_count,
                    replies: Vec::new(),
                },
                reply_cursor: view.reply_cursor.clone(),
            })
        })
        .collect()
}

/// Cursor that opens the comment section of a watch-next response.
pub fn comment_section_cursor(response: &Value) -> Option<String> {
    let from_endpoints = continuation_items(response)
        .unwrap_or_default()
        .iter()
        .find_map(cursor_of);
    from_endpoints.or_else(|| {
        tree::list_at(response, page::WATCH_RESULTS)
            .iter()
            .filter_map(|node| node.get("itemSectionRenderer"))
            .flat_map(|section| tree::list_at(section, &[tree::Step::Key("contents")]))
            .find_map(cursor_of)
    })
}

fn decode_comment_page(response: &Value, layout: RefLayout) -> Option<Page<CommentThread>> {
    let items = continuation_items(response)?;
    let entities = entity_map(response);
    let refs = view_refs(&items, layout);
    let cursor = items
        .iter()
        .filter(|item| matches!(Tag::classify(item), Some((Tag::Continuation, _))))
        .find_map(cursor_of);
    Some(Page {
        items: join_threads(&refs, &entities),
        cursor,
    })
}

/// Top-level comment threads of a video.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadDecoder;

impl PageDecoder for ThreadDecoder {
    type Item = CommentThread;

    fn domain(&self) -> &'static str {
        "comments"
    }

    fn decode_seed(&self, response: &Value) -> Result<Page<CommentThread>, ShapeMismatch> {
        decode_comment_page(response, RefLayout::Threaded)
            .ok_or_else(|| ShapeMismatch::new(self.domain(), "comment continuation items"))
    }

    fn decode_continuation(&self, response: &Value) -> Option<Page<CommentThread>> {
        decode_comment_page(response, RefLayout::Threaded)
    }
}

/// Flat replies below one thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplyDecoder;

impl ReplyDecoder {
    fn flatten(page: Page<CommentThread>) -> Page<Comment> {
        Page {
            items: page.items.into_iter().map(|thread| thread.comment).collect(),
            cursor: page.cursor,
        }
    }
}

impl PageDecoder for ReplyDecoder {
    type Item = Comment;

    fn domain(&self) -> &'static str {
        "comment_replies"
    }

    fn decode_seed(&self, response: &Value) -> Result<Page<Comment>, ShapeMismatch> {
        decode_comment_page(response, RefLayout::Flat)
            .map(Self::flatten)
            .ok_or_else(|| ShapeMismatch::new(self.domain(), "reply continuation items"))
    }

    fn decode_continuation(&self, response: &Value) -> Option<Page<Comment>> {
        decode_comment_page(response, RefLayout::Flat).map(Self::flatten)
    }
}
