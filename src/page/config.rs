// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Page configuration

use std::time::Duration;

use crate::csrf::CsrfConfig;
use crate::http::HttpClientConfig;

/// Page configuration
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Cookie and header names for the CSRF token
    pub csrf: CsrfConfig,
    /// Settings shared by the document and request clients
    pub http: HttpClientConfig,
    /// Timeout for loading the document
    pub timeout: Duration,
    /// Log every request and response through `tracing`
    pub log_requests: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            csrf: CsrfConfig::default(),
            http: HttpClientConfig::default(),
            timeout: Duration::from_secs(30),
            log_requests: true,
        }
    }
}

impl PageConfig {
    /// Create a new page config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the CSRF names
    pub fn csrf(mut self, csrf: CsrfConfig) -> Self {
        self.csrf = csrf;
        self
    }

    /// Set HTTP client settings
    pub fn http(mut self, http: HttpClientConfig) -> Self {
        self.http = http;
        self
    }

    /// Set document load timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable/disable request logging
    pub fn log_requests(mut self, enabled: bool) -> Self {
        self.log_requests = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_config() {
        let config = PageConfig::new()
            .csrf(CsrfConfig::new().cookie_name("XSRF-TOKEN"))
            .timeout(Duration::from_secs(5))
            .log_requests(false);

        assert_eq!(config.csrf.cookie_name, "XSRF-TOKEN");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(!config.log_requests);
    }
}
