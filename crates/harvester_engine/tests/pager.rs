mod common;

use std::sync::{mpsc, Arc};

use common::*;
use harvester_core::{Endpoint, HarvestContext, StopReason, SEARCH};
use harvester_engine::{ChannelTraceSink, HarvestError, HarvestEvent, HarvestSettings, SortOrder};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn scripted_search() -> Arc<ScriptedTransport> {
    ScriptedTransport::new(|_, body| {
        let page = match continuation_of(body) {
            None => search_seed(videos(&["a", "b"]), Some("c2")),
            Some("c2") => continuation_page(videos(&["c"]), Some("c3")),
            Some("c3") => continuation_page(videos(&["d", "e"]), None),
            Some(other) => panic!("unexpected cursor {other}"),
        };
        Ok(page)
    })
}

#[tokio::test]
async fn pages_are_visited_in_order_with_cursors_echoed() {
    init_logging();
    let transport = scripted_search();
    let harvester = harvester(transport.clone());

    let items = harvester
        .search("cats", 50, SortOrder::Relevance)
        .await
        .expect("search succeeds");

    assert_eq!(ids(&items), vec!["a", "b", "c", "d", "e"]);
    let sent: Vec<Option<String>> = transport
        .requests()
        .iter()
        .map(|(_, body)| continuation_of(body).map(str::to_string))
        .collect();
    assert_eq!(sent, vec![None, Some("c2".into()), Some("c3".into())]);

    let context = HarvestContext::default().to_value();
    for (endpoint, body) in transport.requests() {
        assert_eq!(endpoint, Endpoint::Search);
        assert_eq!(body["context"], context);
    }
}

#[tokio::test]
async fn result_never_exceeds_max_items() {
    init_logging();
    for max in 0..7 {
        let transport = scripted_search();
        let items = harvester(transport)
            .search("cats", max, SortOrder::Relevance)
            .await
            .expect("search succeeds");
        assert!(items.len() <= max, "max {max} gave {}", items.len());
    }
}

#[tokio::test]
async fn zero_max_items_sends_no_request() {
    init_logging();
    let transport = scripted_search();
    let items = harvester(transport.clone())
        .search("cats", 0, SortOrder::UploadDate)
        .await
        .expect("search succeeds");
    assert!(items.is_empty());
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn limit_stops_paging_early() {
    init_logging();
    let transport = scripted_search();
    let items = harvester(transport.clone())
        .search("cats", 2, SortOrder::Relevance)
        .await
        .expect("search succeeds");
    assert_eq!(ids(&items), vec!["a", "b"]);
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn repeated_cursor_ends_the_sequence() {
    init_logging();
    let transport = ScriptedTransport::new(|_, body| {
        Ok(match continuation_of(body) {
            None => search_seed(videos(&["a"]), Some("loop")),
            Some(_) => continuation_page(videos(&["b"]), Some("loop")),
        })
    });
    let items = harvester(transport.clone())
        .search("cats", 100, SortOrder::Relevance)
        .await
        .expect("search succeeds");
    assert_eq!(ids(&items), vec!["a", "b"]);
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn empty_pages_with_fresh_cursors_are_capped() {
    init_logging();
    let transport = ScriptedTransport::new(|_, body| {
        Ok(match continuation_of(body) {
            None => search_seed(videos(&["a"]), Some("c0")),
            Some(token) => {
                let next = format!("{token}+");
                continuation_page(Vec::new(), Some(&next))
            }
        })
    });
    let harvester = harvester(transport.clone()).with_settings(HarvestSettings {
        unproductive_limit: 2,
        ..HarvestSettings::default()
    });
    let items = harvester
        .search("cats", 100, SortOrder::Relevance)
        .await
        .expect("search succeeds");
    assert_eq!(ids(&items), vec!["a"]);
    // seed plus two empty follow-ups
    assert_eq!(transport.requests().len(), 3);
}

#[tokio::test]
async fn missing_container_returns_partial_result() {
    init_logging();
    let transport = ScriptedTransport::new(|_, body| {
        Ok(match continuation_of(body) {
            None => search_seed(videos(&["a", "b"]), Some("c2")),
            Some(_) => json!({"responseContext": {"visitorData": "x"}}),
        })
    });
    let sink = Arc::new(RecordingSink::default());
    let items = harvester(transport)
        .with_trace(sink.clone())
        .search("cats", 10, SortOrder::Relevance)
        .await
        .expect("search succeeds");
    assert_eq!(ids(&items), vec!["a", "b"]);

    let finished: Vec<StopReason> = sink
        .take()
        .into_iter()
        .filter_map(|event| match event {
            HarvestEvent::Finished { reason, .. } => Some(reason),
            _ => None,
        })
        .collect();
    assert_eq!(finished, vec![StopReason::MissingContainer]);
}

#[tokio::test]
async fn seed_without_container_is_a_shape_mismatch() {
    init_logging();
    let transport = ScriptedTransport::new(|_, _| Ok(json!({"contents": {}})));
    let err = harvester(transport)
        .search("cats", 10, SortOrder::Relevance)
        .await
        .unwrap_err();
    assert!(matches!(err, HarvestError::ShapeMismatch(ref m) if m.domain == "search"));
}

#[tokio::test]
async fn transport_failure_aborts_mid_sequence() {
    init_logging();
    let transport = ScriptedTransport::new(|_, body| match continuation_of(body) {
        None => Ok(search_seed(videos(&["a"]), Some("c2"))),
        Some(_) => Err(network_error()),
    });
    let err = harvester(transport)
        .search("cats", 10, SortOrder::Relevance)
        .await
        .unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn generic_harvest_accepts_any_decoder() {
    init_logging();
    let transport = scripted_search();
    let seed = HarvestContext::default().seed_payload([("query", Value::from("dogs"))]);
    let items = harvester(transport)
        .harvest(&SEARCH, Endpoint::Search, &seed, 3)
        .await
        .expect("harvest succeeds");
    assert_eq!(ids(&items), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn channel_sink_delivers_events_to_the_receiver() {
    init_logging();
    let (tx, rx) = mpsc::channel();
    let harvester = harvester(scripted_search()).with_trace(Arc::new(ChannelTraceSink::new(tx)));

    harvester
        .search("cats", 50, SortOrder::Relevance)
        .await
        .expect("search succeeds");
    drop(harvester);

    let events: Vec<HarvestEvent> = rx.try_iter().collect();
    let requests = events
        .iter()
        .filter(|event| matches!(event, HarvestEvent::RequestSent { .. }))
        .count();
    assert_eq!(requests, 3);
    assert_eq!(
        events.last(),
        Some(&HarvestEvent::Finished {
            domain: SEARCH.domain,
            reason: StopReason::CursorExhausted,
            total: 5,
        })
    );
}
