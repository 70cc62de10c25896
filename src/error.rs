// Error types and the mapping from errors to the one-line messages the
// user sees. Every failure the tool can hit ends up as a `ShortenerError`;
// `user_message` turns it into text and never fails itself.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while resolving a key or calling the service.
#[derive(Debug, Error)]
pub enum ShortenerError {
    #[error("could not determine the user config directory")]
    ConfigDirUnavailable,

    #[error("no API key has been set")]
    KeyNotSet,

    #[error("failed to write key file {}: {source}", .path.display())]
    KeyWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("could not resolve service host: {0}")]
    HostNotFound(String),

    #[error("request failed: {0}")]
    Network(String),

    #[error("service responded with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("unreadable response from service: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShortenerError>;

/// Coarse classification used to pick the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    KeyNotSet,
    NetworkFailure,
    BadKey,
    UpstreamError,
    MalformedResponse,
    Local,
}

impl ShortenerError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ShortenerError::KeyNotSet => FailureKind::KeyNotSet,
            ShortenerError::HostNotFound(_) | ShortenerError::Network(_) => {
                FailureKind::NetworkFailure
            }
            ShortenerError::Api { status: 400, .. } => FailureKind::BadKey,
            ShortenerError::Api { .. } => FailureKind::UpstreamError,
            ShortenerError::MalformedResponse(_) => FailureKind::MalformedResponse,
            ShortenerError::ConfigDirUnavailable
            | ShortenerError::KeyWrite { .. }
            | ShortenerError::Client(_) => FailureKind::Local,
        }
    }
}

/// Render an error as the single line printed for the user.
pub fn user_message(err: &ShortenerError) -> String {
    match err {
        ShortenerError::KeyNotSet => {
            "There is no key set. See url-shortener --help for more.".to_string()
        }
        ShortenerError::HostNotFound(_) => {
            "Could not reach the URL shortener service. Check your internet connection."
                .to_string()
        }
        ShortenerError::Network(detail) => format!("Request failed: {}", detail),
        ShortenerError::Api { status: 400, .. } => {
            "The key is invalid. Set a valid one with url-shortener --key=<str>.".to_string()
        }
        ShortenerError::Api { status, message } => {
            format!("The service responded with status {}: {}", status, message)
        }
        ShortenerError::MalformedResponse(e) => {
            format!("The service returned an unreadable response: {}", e)
        }
        other => other.to_string(),
    }
}
