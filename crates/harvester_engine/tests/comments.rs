mod common;

use common::*;
use harvester_core::{Endpoint, NormalizedItem};
use harvester_engine::HarvestError;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn entity(id: &str, text: &str) -> Value {
    json!({"payload": {"commentEntityPayload": {
        "properties": {"commentId": id, "content": {"content": text}, "publishedTime": "1 hour ago"},
        "author": {"displayName": format!("@{id}")},
        "toolbar": {"likeCountNotliked": "3", "replyCount": "1"}
    }}})
}

fn thread(id: &str, reply_token: Option<&str>) -> Value {
    let mut node = json!({"commentThreadRenderer": {
        "commentViewModel": {"commentViewModel": {"commentId": id}}
    }});
    if let Some(token) = reply_token {
        node["commentThreadRenderer"]["replies"] =
            json!({"commentRepliesRenderer": {"contents": [continuation_node(token)]}});
    }
    node
}

fn comment_page(items: Vec<Value>, entities: Vec<Value>) -> Value {
    json!({
        "onResponseReceivedEndpoints": [
            {"reloadContinuationItemsCommand": {"continuationItems": items}}
        ],
        "frameworkUpdates": {"entityBatchUpdate": {"mutations": entities}}
    })
}

fn watch_page() -> Value {
    json!({"contents": {"twoColumnWatchNextResults": {"results": {"results": {"contents": [
        {"itemSectionRenderer": {"contents": [continuation_node("open-comments")]}}
    ]}}}}})
}

fn scripted_comments() -> std::sync::Arc<ScriptedTransport> {
    ScriptedTransport::new(|endpoint, body| {
        assert_eq!(endpoint, Endpoint::Next);
        let page = match continuation_of(body) {
            None => watch_page(),
            Some("open-comments") => comment_page(
                vec![
                    thread("c1", Some("replies-c1")),
                    thread("removed", None),
                    thread("c2", None),
                    continuation_node("more-comments"),
                ],
                vec![entity("c1", "first"), entity("c2", "second")],
            ),
            Some("more-comments") => comment_page(
                vec![thread("c3", Some("replies-c3"))],
                vec![entity("c3", "third")],
            ),
            Some("replies-c1") => comment_page(
                vec![
                    json!({"commentViewModel": {"commentId": "r1"}}),
                    continuation_node("replies-c1-more"),
                ],
                vec![entity("r1", "reply one")],
            ),
            Some("replies-c1-more") => comment_page(
                vec![json!({"commentViewModel": {"commentId": "r2"}})],
                vec![entity("r2", "reply two")],
            ),
            Some("replies-c3") => comment_page(Vec::new(), Vec::new()),
            Some(other) => panic!("unexpected cursor {other}"),
        };
        Ok(page)
    })
}

#[tokio::test]
async fn comments_join_entities_and_expand_replies() {
    init_logging();
    let transport = scripted_comments();
    let items = harvester(transport.clone())
        .comments("vid", 2)
        .await
        .expect("comments succeed");

    let comments: Vec<_> = items
        .iter()
        .map(|item| match item {
            NormalizedItem::Comment(comment) => comment,
            other => panic!("unexpected item {other:?}"),
        })
        .collect();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].content, "first");
    assert_eq!(comments[0].author, "@c1");
    assert_eq!(comments[0].likes, 3);
    let replies: Vec<_> = comments[0].replies.iter().map(|r| r.content.as_str()).collect();
    assert_eq!(replies, vec!["reply one", "reply two"]);
    assert_eq!(comments[1].comment_id, "c2");
    assert!(comments[1].replies.is_empty());

    // The cut happened on the first page, so c3 and its replies were never requested.
    let cursors: Vec<Option<String>> = transport
        .requests()
        .iter()
        .map(|(_, body)| continuation_of(body).map(str::to_string))
        .collect();
    assert_eq!(
        cursors,
        vec![
            None,
            Some("open-comments".into()),
            Some("replies-c1".into()),
            Some("replies-c1-more".into()),
        ]
    );
    assert_eq!(transport.requests()[0].1["videoId"], "vid");
}

#[tokio::test]
async fn comments_continue_past_first_page() {
    init_logging();
    let items = harvester(scripted_comments())
        .comments("vid", 10)
        .await
        .expect("comments succeed");
    let ids: Vec<_> = items.iter().map(NormalizedItem::identity).collect();
    assert_eq!(ids, vec!["c1", "c2", "c3"]);
}

#[tokio::test]
async fn video_without_comment_section_is_a_shape_mismatch() {
    init_logging();
    let transport = ScriptedTransport::new(|_, _| Ok(json!({"contents": {}})));
    let err = harvester(transport).comments("vid", 5).await.unwrap_err();
    assert!(matches!(err, HarvestError::ShapeMismatch(ref m) if m.domain == "comments"));
}

#[tokio::test]
async fn comment_page_echoing_its_opening_cursor_stops() {
    init_logging();
    let transport = ScriptedTransport::new(|_, body| {
        let page = match continuation_of(body) {
            None => watch_page(),
            Some("open-comments") => comment_page(
                vec![thread("c1", None), continuation_node("open-comments")],
                vec![entity("c1", "first")],
            ),
            Some(other) => panic!("unexpected cursor {other}"),
        };
        Ok(page)
    });

    let items = harvester(transport.clone())
        .comments("vid", 20)
        .await
        .expect("comments");
    assert_eq!(ids(&items), vec!["c1"]);
    assert_eq!(transport.requests().len(), 2);
}
