//! Single-record decoders: channel profile and player detail.

use serde_json::Value;

use crate::error::ShapeMismatch;
use crate::item::{ChannelProfile, VideoDetail};
use crate::paths::{channel, player};
use crate::tree;

pub fn channel_profile(response: &Value) -> Result<ChannelProfile, ShapeMismatch> {
    let metadata = tree::at(response, channel::METADATA)
        .ok_or_else(|| ShapeMismatch::new("channel_info", tree::describe(channel::METADATA)))?;
    let channel_id = tree::id_at(metadata, channel::EXTERNAL_ID)
        .ok_or_else(|| ShapeMismatch::new("channel_info", "channel id"))?;

    let mut handle = None;
    let mut subscriber_count = None;
    for row in tree::list_at(response, channel::METADATA_ROWS) {
        for part in tree::list_at(row, channel::ROW_PARTS) {
            let text = tree::string_at(part, channel::PART_TEXT);
            if text.starts_with('@') {
                handle.get_or_insert(text);
            } else if text.contains("subscriber") {
                subscriber_count.get_or_insert(text);
            }
        }
    }

    Ok(ChannelProfile {
        name: tree::string_at(metadata, channel::TITLE),
        handle,
        avatar: tree::id_at(metadata, channel::AVATAR_URL),
        banner: tree::id_at(response, channel::BANNER_URL),
        subscriber_count,
        description: tree::string_at(metadata, channel::DESCRIPTION),
        channel_id,
    })
}

/// `(status, reason)` when the player refuses to play the video.
pub fn playability_issue(response: &Value) -> Option<(String, String)> {
    let status = tree::str_at(response, player::STATUS)?.to_string();
    if status == "OK" {
        return None;
    }
    let reason = tree::str_at(response, player::REASON)
        .unwrap_or("Unavailable")
        .to_string();
    Some((status, reason))
}

pub fn video_detail(response: &Value) -> Result<VideoDetail, ShapeMismatch> {
    let details = tree::at(response, player::DETAILS)
        .ok_or_else(|| ShapeMismatch::new("video_detail", tree::describe(player::DETAILS)))?;
    let video_id = tree::id_at(details, &[tree::Step::Key("videoId")])
        .ok_or_else(|| ShapeMismatch::new("video_detail", "videoDetails.videoId"))?;
    Ok(VideoDetail {
        title: tree::string_at(details, &[tree::Step::Key("title")]),
        author: tree::string_at(details, &[tree::Step::Key("author")]),
        length_seconds: tree::count_at(details, &[tree::Step::Key("lengthSeconds")]),
        views: tree::count_at(details, &[tree::Step::Key("viewCount")]),
        is_live_content: tree::bool_at(details, &[tree::Step::Key("isLiveContent")]),
        formats: tree::list_at(response, player::FORMATS).to_vec(),
        adaptive_formats: tree::list_at(response, player::ADAPTIVE_FORMATS).to_vec(),
        video_id,
    })
}
