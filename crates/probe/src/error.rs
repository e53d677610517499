//! Error types for player probing

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Failed to load {address}: {reason}")]
    Navigation { address: String, reason: String },

    #[error("Timed out waiting for element: {selector}")]
    LocateTimeout { selector: String },

    #[error("Element not found: {selector}")]
    ElementNotFound { selector: String },

    #[error("Script evaluation failed for {target}: {reason}")]
    Evaluation { target: String, reason: String },

    #[error("Unexpected player state shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("WebDriver session error: {0}")]
    Session(String),

    #[error("Failed to start WebDriver session at {endpoint}: {reason}")]
    SessionStartup { endpoint: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProbeError {
    /// Whether this error means an expected element never showed up.
    pub fn is_locate_timeout(&self) -> bool {
        matches!(self, ProbeError::LocateTimeout { .. })
    }

    pub(crate) fn evaluation(target: impl Into<String>, reason: impl ToString) -> Self {
        ProbeError::Evaluation {
            target: target.into(),
            reason: reason.to_string(),
        }
    }
}

pub type ProbeResult<T> = Result<T, ProbeError>;

/// Formats an optional bound for log lines.
pub(crate) fn describe_bound(bound: Option<Duration>) -> String {
    match bound {
        Some(d) => format!("{}ms", d.as_millis()),
        None => "transport default".to_string(),
    }
}
