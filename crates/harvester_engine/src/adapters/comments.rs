use harvester_core::{
    comment_section_cursor, Comment, Endpoint, HarvestResult, NormalizedItem, PageDecoder,
    ReplyDecoder, ShapeMismatch, ThreadDecoder,
};
use serde_json::json;

use crate::engine::Harvester;
use crate::HarvestError;

impl Harvester {
    /// Top-level comments of a video in display order, each with its full
    /// reply thread. Replies do not count towards `max_items`.
    pub async fn comments(
        &self,
        video_id: &str,
        max_items: usize,
    ) -> Result<HarvestResult, HarvestError> {
        if max_items == 0 {
            return Ok(Vec::new());
        }
        let threads = ThreadDecoder;
        let watch = self
            .post(
                Endpoint::Next,
                &self.context.seed_payload([("videoId", json!(video_id))]),
            )
            .await?;
        let cursor = comment_section_cursor(&watch).ok_or_else(|| {
            ShapeMismatch::new(threads.domain(), "comment section continuation")
        })?;

        let top_level = self
            .harvest_cursor(&threads, Endpoint::Next, &cursor, max_items)
            .await?;

        let mut comments = Vec::with_capacity(top_level.len());
        for thread in top_level {
            let mut comment = thread.comment;
            if let Some(reply_cursor) = thread.reply_cursor {
                comment.replies = self.replies(&reply_cursor).await?;
            }
            comments.push(NormalizedItem::Comment(comment));
        }
        Ok(comments)
    }

    async fn replies(&self, cursor: &str) -> Result<Vec<Comment>, HarvestError> {
        self.harvest_cursor(&ReplyDecoder, Endpoint::Next, cursor, usize::MAX)
            .await
    }
}
