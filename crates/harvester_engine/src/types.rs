use std::fmt;

use harvester_core::ShapeMismatch;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: FailureKind,
    pub message: String,
}

impl TransportError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    /// The body was not the JSON document the endpoint promises.
    InvalidBody,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::InvalidBody => write!(f, "invalid response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Everything a harvest call can fail with. Nothing is retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarvestError {
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
    #[error(transparent)]
    ShapeMismatch(#[from] ShapeMismatch),
    #[error("session key not found on landing page")]
    KeyNotFound,
    #[error("no channel found for handle {0}")]
    ChannelNotFound(String),
    #[error("video is not playable ({status}): {reason}")]
    Unplayable { status: String, reason: String },
    #[error("all {cells} grid cells failed, first error: {first}")]
    GridFailed {
        cells: usize,
        first: Box<HarvestError>,
    },
}

impl HarvestError {
    /// True for errors caused by the network or the remote server rather
    /// than by the content it returned.
    pub fn is_transport(&self) -> bool {
        match self {
            HarvestError::Transport(_) => true,
            HarvestError::GridFailed { first, .. } => first.is_transport(),
            _ => false,
        }
    }
}
