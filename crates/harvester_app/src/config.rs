//! Application configuration: `harvester.ron` plus proxy credentials from
//! the environment.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::LogSettings;
use harvester_core::HarvestContext;
use harvester_engine::{HarvestSettings, ProxySettings, TransportSettings, DEFAULT_BASE_URL};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub hl: String,
    pub gl: String,
    pub client_name: String,
    pub client_version: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let context = HarvestContext::default();
        Self {
            hl: context.hl,
            gl: context.gl,
            client_name: context.client_name,
            client_version: context.client_version,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_bytes: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        let defaults = TransportSettings::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: defaults.connect_timeout.as_secs(),
            request_timeout_secs: defaults.request_timeout.as_secs(),
            user_agent: defaults.user_agent,
            max_bytes: defaults.max_bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    pub fanout_permits: usize,
    pub unproductive_limit: u32,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        let defaults = HarvestSettings::default();
        Self {
            fanout_permits: defaults.fanout_permits,
            unproductive_limit: defaults.unproductive_limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub transport: TransportConfig,
    pub harvest: HarvestConfig,
    pub log: LogSettings,
}

impl AppConfig {
    pub fn context(&self) -> HarvestContext {
        HarvestContext {
            hl: self.client.hl.clone(),
            gl: self.client.gl.clone(),
            client_name: self.client.client_name.clone(),
            client_version: self.client.client_version.clone(),
        }
    }

    pub fn transport_settings(&self, proxy: Option<ProxySettings>) -> TransportSettings {
        TransportSettings {
            base_url: self.transport.base_url.clone(),
            connect_timeout: Duration::from_secs(self.transport.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.transport.request_timeout_secs),
            user_agent: self.transport.user_agent.clone(),
            max_bytes: self.transport.max_bytes,
            proxy,
        }
    }

    pub fn harvest_settings(&self) -> HarvestSettings {
        HarvestSettings {
            fanout_permits: self.harvest.fanout_permits.max(1),
            unproductive_limit: self.harvest.unproductive_limit.max(1),
        }
    }
}

/// Read the config file. A missing file is not an error and yields `None`.
pub fn load(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    ron::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Proxy from `PROXY_HOST`/`PROXY_PORT`/`PROXY_USER`/`PROXY_PASS`. Host and
/// a numeric port are both required; credentials are optional.
pub fn proxy_from_env() -> Option<ProxySettings> {
    proxy_from(|name| std::env::var(name).ok())
}

pub(crate) fn proxy_from(var: impl Fn(&str) -> Option<String>) -> Option<ProxySettings> {
    let non_empty = |name: &str| var(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let host = non_empty("PROXY_HOST")?;
    let port = non_empty("PROXY_PORT")?.parse().ok()?;
    Some(ProxySettings {
        host,
        port,
        user: non_empty("PROXY_USER"),
        pass: non_empty("PROXY_PASS"),
    })
}
