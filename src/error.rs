// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for csrf-relay
//!
//! A missing token, a malformed cookie encoding or an absent cookie source are
//! never errors here; those degrade to "no header attached". Errors cover
//! configuration, URL handling and the underlying transport.

use thiserror::Error;

/// Result type alias for csrf-relay operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Header name or value rejected
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// A pre-send hook aborted the request
    #[error("Request to {url} aborted: {reason}")]
    Aborted { url: String, reason: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create an invalid header error
    pub fn invalid_header(name: impl Into<String>, reason: impl ToString) -> Self {
        Error::InvalidHeader {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an aborted-request error
    pub fn aborted(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Aborted {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a network error
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// Check if a hook aborted the request
    pub fn is_aborted(&self) -> bool {
        matches!(self, Error::Aborted { .. })
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Aborted { url, .. } => Some(url),
            _ => None,
        }
    }
}
