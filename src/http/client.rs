// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client implementation

use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::{Client, Method};
use url::{Origin, Url};

use super::request::{CredentialsMode, Request};
use super::response::Response;
use super::{headers, DEFAULT_USER_AGENT};
use crate::cookie::CookieJar;
use crate::error::{Error, Result};
use crate::network::{InterceptAction, InterceptorChain, RequestInterceptor};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Default timeout
    pub timeout: Duration,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Default headers
    pub default_headers: HeaderMap,
    /// Enable cookie handling
    pub handle_cookies: bool,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(headers::ACCEPT, HeaderValue::from_static("*/*"));
        default_headers.insert(
            "accept-language",
            HeaderValue::from_static("en-US,en;q=0.5"),
        );

        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            accept_invalid_certs: false,
            default_headers,
            handle_cookies: true,
            proxy: None,
        }
    }
}

/// HTTP client with cookie management and pre-send hooks
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    cookie_jar: CookieJar,
    interceptors: Arc<InterceptorChain>,
    /// Origin requests are classified against
    page_origin: Option<Origin>,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration and no hooks
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Start building a client
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Get the cookie jar
    pub fn cookie_jar(&self) -> &CookieJar {
        &self.cookie_jar
    }

    /// Get the origin requests are compared against
    pub fn page_origin(&self) -> Option<&Origin> {
        self.page_origin.as_ref()
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Number of installed hooks
    pub fn interceptor_count(&self) -> usize {
        self.interceptors.len()
    }

    /// Execute a GET request
    pub async fn get(&self, url: impl AsRef<str>) -> Result<Response> {
        self.execute(Request::get(url)?).await
    }

    /// Execute a POST request
    pub async fn post(&self, url: impl AsRef<str>, body: impl Into<Bytes>) -> Result<Response> {
        self.execute(Request::post(url)?.body(body)).await
    }

    /// Classify the request, run the hooks over it, then dispatch it.
    pub async fn execute(&self, mut request: Request) -> Result<Response> {
        if let Some(ref origin) = self.page_origin {
            request.classify(origin);
        }

        match self.interceptors.process_request(&mut request).await {
            InterceptAction::Continue => {}
            InterceptAction::Abort(reason) => {
                let err = Error::aborted(request.url.as_str(), reason);
                self.interceptors.notify_error(&request, &err).await;
                return Err(err);
            }
            InterceptAction::MockResponse(mut response) => {
                tracing::debug!(url = %request.url, "Request answered by hook");
                self.interceptors
                    .process_response(&request, &mut response)
                    .await?;
                return Ok(response);
            }
        }

        match self.dispatch(&request).await {
            Ok(mut response) => {
                self.interceptors
                    .process_response(&request, &mut response)
                    .await?;
                Ok(response)
            }
            Err(err) => {
                self.interceptors.notify_error(&request, &err).await;
                Err(err)
            }
        }
    }

    async fn dispatch(&self, request: &Request) -> Result<Response> {
        let start = Instant::now();

        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone());

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        let with_cookies = self.config.handle_cookies && self.sends_credentials(request);
        if with_cookies {
            if let Some(cookie_header) = self.cookie_jar.get_cookie_header(&request.url) {
                builder = builder.header(headers::COOKIE, cookie_header);
            }
        }

        if let Some(ref body) = request.body {
            builder = builder.body(body.clone());
        }

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let response_time = start.elapsed().as_millis() as u64;

        let final_url = response.url().clone();
        let status = response.status();
        let response_headers = response.headers().clone();

        if with_cookies {
            for cookie in response_headers.get_all(headers::SET_COOKIE) {
                if let Ok(cookie_str) = cookie.to_str() {
                    self.cookie_jar.add_from_header(cookie_str, &final_url);
                }
            }
        }

        let body = response.bytes().await?;

        Ok(Response::new(status, response_headers, body, final_url, response_time))
    }

    fn sends_credentials(&self, request: &Request) -> bool {
        match request.credentials {
            CredentialsMode::Include => true,
            CredentialsMode::SameOrigin => !request.is_cross_domain(),
            CredentialsMode::Omit => false,
        }
    }

    /// Execute multiple requests concurrently
    pub async fn execute_all(&self, requests: Vec<Request>) -> Vec<Result<Response>> {
        let futures: Vec<_> = requests.into_iter().map(|r| self.execute(r)).collect();
        futures::future::join_all(futures).await
    }

    /// Create a request builder bound to this client
    pub fn request(&self, method: Method, url: impl AsRef<str>) -> Result<RequestBuilder> {
        Ok(RequestBuilder {
            client: self.clone(),
            request: Request::new(method, url)?,
        })
    }
}

/// Builder for [`HttpClient`]
#[derive(Default)]
pub struct HttpClientBuilder {
    config: HttpClientConfig,
    cookie_jar: Option<CookieJar>,
    page_url: Option<Url>,
    interceptors: InterceptorChain,
}

impl HttpClientBuilder {
    /// Set the client configuration
    pub fn config(mut self, config: HttpClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Share an existing cookie jar
    pub fn cookie_jar(mut self, jar: CookieJar) -> Self {
        self.cookie_jar = Some(jar);
        self
    }

    /// Page URL whose origin decides which requests are cross-domain
    pub fn page_url(mut self, url: Url) -> Self {
        self.page_url = Some(url);
        self
    }

    /// Install a pre-send hook
    pub fn interceptor<I: RequestInterceptor + 'static>(mut self, interceptor: I) -> Self {
        self.interceptors.add(interceptor);
        self
    }

    /// Install a pre-send hook that is also held by the caller
    pub fn shared_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.interceptors.add_shared(interceptor);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<HttpClient> {
        let config = self.config;
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers(config.default_headers.clone());

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        Ok(HttpClient {
            client: builder.build()?,
            config,
            cookie_jar: self.cookie_jar.unwrap_or_default(),
            interceptors: Arc::new(self.interceptors),
            page_origin: self.page_url.map(|u| u.origin()),
        })
    }
}

/// Builder for executing requests with the client
pub struct RequestBuilder {
    client: HttpClient,
    request: Request,
}

impl RequestBuilder {
    /// Set a header
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.request = self.request.header(name, value);
        self
    }

    /// Set the body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.request = self.request.body(body);
        self
    }

    /// Set JSON body
    pub fn json<T: serde::Serialize>(mut self, data: &T) -> Result<Self> {
        self.request = self.request.json(data)?;
        Ok(self)
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request = self.request.timeout(timeout);
        self
    }

    /// Override cross-domain classification
    pub fn cross_domain(mut self, cross_domain: bool) -> Self {
        self.request = self.request.cross_domain(cross_domain);
        self
    }

    /// Set credentials mode
    pub fn credentials(mut self, mode: CredentialsMode) -> Self {
        self.request = self.request.credentials(mode);
        self
    }

    /// Execute the request
    pub async fn send(self) -> Result<Response> {
        self.client.execute(self.request).await
    }
}
