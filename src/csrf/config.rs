// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! CSRF cookie/header configuration

use reqwest::header::HeaderName;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Default name of the cookie carrying the token
pub const DEFAULT_COOKIE_NAME: &str = "csrftoken";

/// Default name of the header the token is echoed in
pub const DEFAULT_HEADER_NAME: &str = "X-CSRFToken";

/// Which cookie to read and which header to write
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CsrfConfig {
    /// Cookie holding the token
    pub cookie_name: String,
    /// Header set on same-origin requests
    pub header_name: String,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            header_name: DEFAULT_HEADER_NAME.to_string(),
        }
    }
}

impl CsrfConfig {
    /// Create a config with the default names
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cookie name
    pub fn cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    /// Set the header name
    pub fn header_name(mut self, name: impl Into<String>) -> Self {
        self.header_name = name.into();
        self
    }

    /// Load from a JSON object; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check both names, returning the parsed header name
    pub fn validate(&self) -> Result<HeaderName> {
        if self.cookie_name.is_empty() {
            return Err(Error::config("cookie name must not be empty"));
        }
        if self.cookie_name.contains(|c: char| c == ';' || c == '=' || c.is_whitespace()) {
            return Err(Error::config(format!(
                "cookie name '{}' contains a separator",
                self.cookie_name
            )));
        }

        HeaderName::from_bytes(self.header_name.as_bytes())
            .map_err(|e| Error::invalid_header(self.header_name.clone(), e))
    }
}
