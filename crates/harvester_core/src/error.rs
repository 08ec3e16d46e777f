use thiserror::Error;

/// An expected path was missing from a response the harvester treats as
/// authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected response shape in {domain}: missing {step}")]
pub struct ShapeMismatch {
    pub domain: &'static str,
    pub step: String,
}

impl ShapeMismatch {
    pub fn new(domain: &'static str, step: impl Into<String>) -> Self {
        Self {
            domain,
            step: step.into(),
        }
    }
}
