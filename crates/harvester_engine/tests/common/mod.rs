#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use harvester_core::Endpoint;
use harvester_engine::{
    FailureKind, HarvestEvent, Harvester, KeyResolver, TraceSink, Transport, TransportError,
};
use serde_json::{json, Value};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

type Responder = dyn Fn(Endpoint, &Value) -> Result<Value, TransportError> + Send + Sync;

/// In-memory transport answering POSTs through a closure and recording
/// every request body.
pub struct ScriptedTransport {
    respond: Box<Responder>,
    requests: Mutex<Vec<(Endpoint, Value)>>,
}

impl ScriptedTransport {
    pub fn new(
        respond: impl Fn(Endpoint, &Value) -> Result<Value, TransportError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            respond: Box::new(respond),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<(Endpoint, Value)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn post_json(
        &self,
        endpoint: Endpoint,
        _key: &str,
        body: &Value,
    ) -> Result<Value, TransportError> {
        self.requests.lock().unwrap().push((endpoint, body.clone()));
        (self.respond)(endpoint, body)
    }

    async fn get_page(&self, path: &str) -> Result<String, TransportError> {
        Err(TransportError {
            kind: FailureKind::HttpStatus(404),
            message: format!("no page scripted for {path}"),
        })
    }
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<HarvestEvent>>,
}

impl RecordingSink {
    pub fn take(&self) -> Vec<HarvestEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl TraceSink for RecordingSink {
    fn emit(&self, event: HarvestEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn harvester(transport: Arc<ScriptedTransport>) -> Harvester {
    Harvester::new(transport).with_keys(KeyResolver::with_key("test-key"))
}

pub fn network_error() -> TransportError {
    TransportError {
        kind: FailureKind::Network,
        message: "connection reset".into(),
    }
}

pub fn continuation_of(body: &Value) -> Option<&str> {
    body.get("continuation").and_then(Value::as_str)
}

pub fn video(id: &str) -> Value {
    json!({"videoRenderer": {
        "videoId": id,
        "title": {"runs": [{"text": format!("title {id}")}]},
        "viewCountText": {"simpleText": "10 views"}
    }})
}

pub fn videos(ids: &[&str]) -> Vec<Value> {
    ids.iter().map(|id| video(id)).collect()
}

pub fn continuation_node(token: &str) -> Value {
    json!({"continuationItemRenderer": {"continuationEndpoint": {
        "continuationCommand": {"token": token}
    }}})
}

/// Search-shaped seed response.
pub fn search_seed(items: Vec<Value>, cursor: Option<&str>) -> Value {
    let mut sections = vec![json!({"itemSectionRenderer": {"contents": items}})];
    if let Some(token) = cursor {
        sections.push(continuation_node(token));
    }
    json!({"contents": {"twoColumnSearchResultsRenderer": {"primaryContents": {
        "sectionListRenderer": {"contents": sections}
    }}}})
}

/// Follow-up response carrying `items` and an optional next cursor.
pub fn continuation_page(mut items: Vec<Value>, cursor: Option<&str>) -> Value {
    if let Some(token) = cursor {
        items.push(continuation_node(token));
    }
    json!({"onResponseReceivedCommands": [
        {"appendContinuationItemsAction": {"continuationItems": items}}
    ]})
}

pub fn ids(items: &[harvester_core::NormalizedItem]) -> Vec<String> {
    items.iter().map(|item| item.identity().to_string()).collect()
}
