use serde_json::{json, Map, Value};

/// Client identity sent with every request. Built once and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestContext {
    pub hl: String,
    pub gl: String,
    pub client_name: String,
    pub client_version: String,
}

impl Default for HarvestContext {
    fn default() -> Self {
        Self {
            hl: "en".to_string(),
            gl: "US".to_string(),
            client_name: "WEB".to_string(),
            client_version: "2.20240115.00.00".to_string(),
        }
    }
}

impl HarvestContext {
    pub fn to_value(&self) -> Value {
        json!({
            "client": {
                "hl": self.hl,
                "gl": self.gl,
                "clientName": self.client_name,
                "clientVersion": self.client_version,
            }
        })
    }

    /// `{context, ...fields}` body for a seed request.
    pub fn seed_payload<I, K>(&self, fields: I) -> Value
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut body = Map::new();
        body.insert("context".to_string(), self.to_value());
        for (key, value) in fields {
            body.insert(key.into(), value);
        }
        Value::Object(body)
    }

    /// `{context, continuation}` body for a follow-up request.
    pub fn continuation_payload(&self, cursor: &str) -> Value {
        json!({
            "context": self.to_value(),
            "continuation": cursor,
        })
    }
}
