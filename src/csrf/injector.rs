// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Pre-send hook that echoes the CSRF token in a header

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};

use crate::http::Request;
use crate::network::{InterceptAction, RequestInterceptor};

/// Sets `header: token` on every same-origin request.
///
/// Cross-domain requests and pages without a token are left untouched.
#[derive(Debug, Clone)]
pub struct CsrfHeaderInjector {
    header: HeaderName,
    token: Option<String>,
}

impl CsrfHeaderInjector {
    /// Create an injector for an already validated header name
    pub fn new(header: HeaderName, token: Option<String>) -> Self {
        Self { header, token }
    }

    /// The token read when the page became ready
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The header written on same-origin requests
    pub fn header_name(&self) -> &HeaderName {
        &self.header
    }

    /// Attach the header if the request qualifies. Returns whether it did.
    pub fn apply(&self, request: &mut Request) -> bool {
        if request.is_cross_domain() {
            return false;
        }

        let Some(token) = self.token.as_deref() else {
            return false;
        };

        match HeaderValue::from_str(token) {
            Ok(value) => {
                request.headers.insert(self.header.clone(), value);
                true
            }
            Err(_) => {
                tracing::warn!(
                    header = %self.header,
                    url = %request.url,
                    "CSRF token is not a valid header value, sending without it"
                );
                false
            }
        }
    }
}

#[async_trait]
impl RequestInterceptor for CsrfHeaderInjector {
    async fn before_request(&self, request: &mut Request) -> InterceptAction {
        if self.apply(request) {
            tracing::trace!(url = %request.url, header = %self.header, "Attached CSRF header");
        }
        InterceptAction::Continue
    }

    fn priority(&self) -> i32 {
        100
    }
}
