mod common;

use common::*;
use harvester_core::{Endpoint, NormalizedItem};
use harvester_engine::HarvestError;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn tab(title: &str, params: &str, content: Option<Value>) -> Value {
    let mut renderer = json!({
        "title": title,
        "endpoint": {"browseEndpoint": {"browseId": "UCchan", "params": params}}
    });
    if let Some(content) = content {
        renderer["content"] = content;
        renderer["selected"] = json!(true);
    }
    json!({"tabRenderer": renderer})
}

fn tabs(list: Vec<Value>) -> Value {
    json!({"contents": {"twoColumnBrowseResultsRenderer": {"tabs": list}}})
}

fn rich_grid(ids: &[&str], cursor: Option<&str>) -> Value {
    let mut contents: Vec<Value> = ids
        .iter()
        .map(|id| json!({"richItemRenderer": {"content": video(id)}}))
        .collect();
    if let Some(token) = cursor {
        contents.push(continuation_node(token));
    }
    json!({"richGridRenderer": {"contents": contents}})
}

fn lockup(id: &str, title: &str) -> Value {
    json!({"lockupViewModel": {
        "contentId": id,
        "metadata": {"lockupMetadataViewModel": {"title": {"content": title}}}
    }})
}

fn params_of(body: &Value) -> Option<&str> {
    body.get("params").and_then(Value::as_str)
}

#[tokio::test]
async fn channel_videos_resolve_tab_then_page() {
    init_logging();
    let transport = ScriptedTransport::new(|endpoint, body| {
        assert_eq!(endpoint, Endpoint::Browse);
        let page = match (params_of(body), continuation_of(body)) {
            (None, None) => tabs(vec![
                tab("Home", "home", None),
                tab("Videos", "videos-tab", None),
            ]),
            (Some("videos-tab"), None) => tabs(vec![
                tab("Home", "home", None),
                tab("Videos", "videos-tab", Some(rich_grid(&["a", "b"], Some("grid-2")))),
            ]),
            (_, Some("grid-2")) => continuation_page(videos(&["c"]), None),
            other => panic!("unexpected request {other:?}"),
        };
        Ok(page)
    });

    let items = harvester(transport.clone())
        .channel_videos("UCchan", 10)
        .await
        .expect("channel videos");
    assert_eq!(ids(&items), vec!["a", "b", "c"]);
    assert_eq!(transport.requests().len(), 3);
    assert_eq!(transport.requests()[1].1["browseId"], "UCchan");
}

#[tokio::test]
async fn channel_playlists_follow_a_bare_tab_link() {
    init_logging();
    let transport = ScriptedTransport::new(|_, body| {
        let page = match params_of(body) {
            None => tabs(vec![tab("Home", "home", None), tab("Playlists", "pl-1", None)]),
            Some("pl-1") => tabs(vec![tab("Playlists", "pl-2", None)]),
            Some("pl-2") => tabs(vec![tab(
                "Playlists",
                "pl-2",
                Some(json!({"sectionListRenderer": {"contents": [
                    {"itemSectionRenderer": {"contents": [
                        {"gridRenderer": {"items": [lockup("PL1", "First"), lockup("PL2", "Second")]}}
                    ]}}
                ]}})),
            )]),
            other => panic!("unexpected params {other:?}"),
        };
        Ok(page)
    });

    let items = harvester(transport.clone())
        .channel_playlists("UCchan", 10)
        .await
        .expect("playlists");
    assert_eq!(ids(&items), vec!["PL1", "PL2"]);
    let NormalizedItem::Playlist(first) = &items[0] else {
        panic!("expected playlist summaries");
    };
    assert_eq!(first.title, "First");
    assert_eq!(transport.requests().len(), 3);
}

#[tokio::test]
async fn channel_playlists_page_past_the_grid() {
    init_logging();
    let transport = ScriptedTransport::new(|_, body| {
        let page = match (params_of(body), continuation_of(body)) {
            (None, None) => tabs(vec![tab("Home", "home", None), tab("Playlists", "pl", None)]),
            (Some("pl"), None) => tabs(vec![tab(
                "Playlists",
                "pl",
                Some(json!({"sectionListRenderer": {"contents": [
                    {"itemSectionRenderer": {"contents": [
                        {"gridRenderer": {"items": [
                            lockup("PL1", "First"),
                            continuation_node("next-playlists")
                        ]}}
                    ]}}
                ]}})),
            )]),
            (_, Some("next-playlists")) => continuation_page(vec![lockup("PL2", "Second")], None),
            other => panic!("unexpected request {other:?}"),
        };
        Ok(page)
    });

    let items = harvester(transport.clone())
        .channel_playlists("UCchan", 10)
        .await
        .expect("playlists");
    assert_eq!(ids(&items), vec!["PL1", "PL2"]);
    assert_eq!(transport.requests().len(), 3);
    assert_eq!(
        continuation_of(&transport.requests()[2].1),
        Some("next-playlists")
    );
}

#[tokio::test]
async fn channel_without_tabs_is_a_shape_mismatch() {
    init_logging();
    let transport = ScriptedTransport::new(|_, _| Ok(json!({"alerts": []})));
    let err = harvester(transport)
        .channel_videos("UCgone", 10)
        .await
        .unwrap_err();
    assert!(matches!(err, HarvestError::ShapeMismatch(ref m) if m.domain == "channel_videos"));
}

#[tokio::test]
async fn channel_info_reads_metadata() {
    init_logging();
    let transport = ScriptedTransport::new(|_, body| {
        assert_eq!(body["browseId"], "UCinfo");
        Ok(json!({"metadata": {"channelMetadataRenderer": {
            "externalId": "UCinfo",
            "title": "Info Channel",
            "description": "desc"
        }}}))
    });
    let profile = harvester(transport)
        .channel_info("UCinfo")
        .await
        .expect("profile");
    assert_eq!(profile.name, "Info Channel");
    assert_eq!(profile.description, "desc");
}

#[tokio::test]
async fn trending_and_playlist_seed_payloads() {
    init_logging();
    let transport = ScriptedTransport::new(|_, body| {
        Ok(match body["browseId"].as_str() {
            Some("FEtrending") => tabs(vec![tab(
                "Now",
                "",
                Some(json!({"sectionListRenderer": {"contents": [
                    {"itemSectionRenderer": {"contents": [
                        {"shelfRenderer": {"content": {"expandedShelfContentsRenderer": {
                            "items": [video("t1"), video("t2")]
                        }}}}
                    ]}}
                ]}})),
            )]),
            _ => json!({}),
        })
    });
    let harvester = harvester(transport.clone());
    let trending = harvester.trending_videos(5).await.expect("trending");
    assert_eq!(ids(&trending), vec!["t1", "t2"]);
    assert!(matches!(trending[0], NormalizedItem::Trending(_)));

    let err = harvester.playlist_videos("PLx", 5).await.unwrap_err();
    assert!(matches!(err, HarvestError::ShapeMismatch(_)));
    assert_eq!(transport.requests()[1].1["browseId"], "VLPLx");
}

#[tokio::test]
async fn unplayable_video_is_reported() {
    init_logging();
    let transport = ScriptedTransport::new(|endpoint, _| {
        assert_eq!(endpoint, Endpoint::Player);
        Ok(json!({"playabilityStatus": {"status": "ERROR", "reason": "Video unavailable"}}))
    });
    let err = harvester(transport).video_detail("gone").await.unwrap_err();
    assert_eq!(
        err,
        HarvestError::Unplayable {
            status: "ERROR".into(),
            reason: "Video unavailable".into(),
        }
    );
}
