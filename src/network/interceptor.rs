// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Pre-send hooks for outgoing requests
//!
//! Hooks are handed to the client when it is built and run, in priority
//! order, right before each request is dispatched.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::http::{Request, Response};

/// Request interceptor trait
///
/// # Example
///
/// ```rust,no_run
/// use csrf_relay::network::{RequestInterceptor, InterceptAction};
/// use csrf_relay::http::Request;
/// use async_trait::async_trait;
///
/// struct RequestedWith;
///
/// #[async_trait]
/// impl RequestInterceptor for RequestedWith {
///     async fn before_request(&self, req: &mut Request) -> InterceptAction {
///         req.headers.insert(
///             "x-requested-with",
///             "XMLHttpRequest".parse().unwrap(),
///         );
///         InterceptAction::Continue
///     }
/// }
/// ```
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    /// Called before a request is sent
    ///
    /// Can modify the request or stop it.
    async fn before_request(&self, _request: &mut Request) -> InterceptAction {
        InterceptAction::Continue
    }

    /// Called after a response is received
    async fn after_response(&self, _request: &Request, _response: &mut Response) -> Result<()> {
        Ok(())
    }

    /// Called when request fails
    async fn on_error(&self, _request: &Request, _error: &Error) {}

    /// Filter - return true if this interceptor should handle the request
    fn should_intercept(&self, _request: &Request) -> bool {
        true
    }

    /// Priority - higher priority interceptors run first
    fn priority(&self) -> i32 {
        0
    }
}

/// Action to take after interception
#[derive(Debug, Clone)]
pub enum InterceptAction {
    /// Continue with the (possibly modified) request
    Continue,
    /// Abort the request with an error
    Abort(String),
    /// Return a mock response instead of making the actual request
    MockResponse(Response),
}

/// Request logger interceptor
#[derive(Default)]
pub struct RequestLogger {
    /// Log request bodies
    pub log_bodies: bool,
    /// Filter by URL pattern
    pub url_filter: Option<String>,
}

#[async_trait]
impl RequestInterceptor for RequestLogger {
    fn should_intercept(&self, request: &Request) -> bool {
        match self.url_filter {
            Some(ref filter) => request.url.as_str().contains(filter),
            None => true,
        }
    }

    async fn before_request(&self, request: &mut Request) -> InterceptAction {
        tracing::info!(
            method = %request.method,
            url = %request.url,
            cross_domain = request.is_cross_domain(),
            "Request"
        );

        if self.log_bodies {
            if let Some(ref body) = request.body {
                tracing::debug!(body = ?String::from_utf8_lossy(body), "Request body");
            }
        }

        InterceptAction::Continue
    }

    async fn after_response(&self, request: &Request, response: &mut Response) -> Result<()> {
        tracing::info!(
            url = %request.url,
            status = %response.status,
            time_ms = response.response_time_ms,
            "Response"
        );
        Ok(())
    }

    async fn on_error(&self, request: &Request, error: &Error) {
        tracing::warn!(url = %request.url, error = %error, "Request failed");
    }

    fn priority(&self) -> i32 {
        -100 // Run last so it sees the final headers
    }
}

/// Interceptor chain - manages multiple interceptors
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl InterceptorChain {
    /// Create a new empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an interceptor
    pub fn add<I: RequestInterceptor + 'static>(&mut self, interceptor: I) {
        self.add_shared(Arc::new(interceptor));
    }

    /// Add an interceptor that is also held elsewhere
    pub fn add_shared(&mut self, interceptor: Arc<dyn RequestInterceptor>) {
        self.interceptors.push(interceptor);
        // Stable sort keeps insertion order among equal priorities
        self.interceptors.sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// Number of interceptors
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Check if the chain is empty
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Process request through all interceptors
    pub async fn process_request(&self, request: &mut Request) -> InterceptAction {
        for interceptor in &self.interceptors {
            if !interceptor.should_intercept(request) {
                continue;
            }

            match interceptor.before_request(request).await {
                InterceptAction::Continue => continue,
                action => return action,
            }
        }
        InterceptAction::Continue
    }

    /// Process response through all interceptors
    pub async fn process_response(&self, request: &Request, response: &mut Response) -> Result<()> {
        for interceptor in &self.interceptors {
            if !interceptor.should_intercept(request) {
                continue;
            }
            interceptor.after_response(request, response).await?;
        }
        Ok(())
    }

    /// Notify interceptors of an error
    pub async fn notify_error(&self, request: &Request, error: &Error) {
        for interceptor in &self.interceptors {
            if interceptor.should_intercept(request) {
                interceptor.on_error(request, error).await;
            }
        }
    }
}
