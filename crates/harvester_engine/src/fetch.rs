use std::time::Duration;

use futures_util::StreamExt;
use harvester_core::Endpoint;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, ORIGIN, REFERER};
use serde_json::Value;
use url::Url;

use crate::{FailureKind, TransportError};

pub const DEFAULT_BASE_URL: &str = "https://www.youtube.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub pass: Option<String>,
}

impl ProxySettings {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct TransportSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
    pub max_bytes: u64,
    pub proxy: Option<ProxySettings>,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(15),
            user_agent: "Mozilla/5.0".to_string(),
            max_bytes: 16 * 1024 * 1024,
            proxy: None,
        }
    }
}

/// Request/response channel to the remote service.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `endpoint` with the session `key`, returning the
    /// decoded JSON response.
    async fn post_json(
        &self,
        endpoint: Endpoint,
        key: &str,
        body: &Value,
    ) -> Result<Value, TransportError>;

    /// GET an HTML page relative to the base URL.
    async fn get_page(&self, path: &str) -> Result<String, TransportError>;
}

/// `reqwest`-backed transport. One client is built up front and shared by
/// every request, concurrent ones included.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base: Url,
    max_bytes: u64,
}

impl ReqwestTransport {
    pub fn new(settings: TransportSettings) -> Result<Self, TransportError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = build_client(&settings, &base)?;
        Ok(Self {
            client,
            base,
            max_bytes: settings.max_bytes,
        })
    }

    fn url(&self, path: &str) -> Result<Url, TransportError> {
        self.base
            .join(path)
            .map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, TransportError> {
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_bytes {
                return Err(too_large(self.max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.max_bytes {
                return Err(too_large(self.max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

fn build_client(settings: &TransportSettings, base: &Url) -> Result<reqwest::Client, TransportError> {
    let origin = base.origin().ascii_serialization();
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(value) = HeaderValue::from_str(&origin) {
        headers.insert(ORIGIN, value);
    }
    if let Ok(value) = HeaderValue::from_str(&format!("{origin}/")) {
        headers.insert(REFERER, value);
    }

    let mut builder = reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .user_agent(settings.user_agent.as_str())
        .default_headers(headers);

    if let Some(proxy) = &settings.proxy {
        let mut upstream = reqwest::Proxy::all(proxy.url())
            .map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if let (Some(user), Some(pass)) = (&proxy.user, &proxy.pass) {
            upstream = upstream.basic_auth(user, pass);
        }
        builder = builder.proxy(upstream);
    }

    builder
        .build()
        .map_err(|err| TransportError::new(FailureKind::Network, err.to_string()))
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(
        &self,
        endpoint: Endpoint,
        key: &str,
        body: &Value,
    ) -> Result<Value, TransportError> {
        let mut url = self.url(endpoint.path())?;
        url.query_pairs_mut().append_pair("key", key);
        let payload = serde_json::to_vec(body)
            .map_err(|err| TransportError::new(FailureKind::InvalidBody, err.to_string()))?;

        let response = self
            .client
            .post(url)
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let bytes = self.read_body(response).await?;

        serde_json::from_slice(&bytes)
            .map_err(|err| TransportError::new(FailureKind::InvalidBody, err.to_string()))
    }

    async fn get_page(&self, path: &str) -> Result<String, TransportError> {
        let url = self.url(path)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let bytes = self.read_body(response).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn too_large(max_bytes: u64, actual: u64) -> TransportError {
    TransportError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return TransportError::new(FailureKind::InvalidUrl, err.to_string());
    }
    TransportError::new(FailureKind::Network, err.to_string())
}
