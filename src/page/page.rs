// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Page implementation

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use reqwest::Method;
use serde::Serialize;
use url::Url;

use super::config::PageConfig;
use crate::cookie::CookieJar;
use crate::csrf::{CsrfHeaderInjector, Installer};
use crate::error::Result;
use crate::http::{CredentialsMode, HttpClient, Request, RequestBuilder, Response};
use crate::network::RequestLogger;

/// A loaded page and the client its scripts send requests through.
///
/// The CSRF token is read once, when the page becomes ready. Cookies set by
/// later responses reach the jar but do not change the token.
pub struct Page {
    /// Page location (after redirects)
    url: Url,
    /// Page configuration
    config: PageConfig,
    /// Cookies shared by every request of this page
    cookie_jar: CookieJar,
    /// Holds the registered CSRF hook
    installer: Installer,
    /// Client with the CSRF hook installed
    client: HttpClient,
    /// Document response, when the page was fetched
    document: Option<Response>,
}

impl Page {
    /// Fetch `url`, keep its cookies, and make the page ready
    pub async fn open(url: &str, config: PageConfig) -> Result<Self> {
        let url = Url::parse(url)?;
        let cookie_jar = CookieJar::new();

        let loader = HttpClient::builder()
            .config(config.http.clone())
            .cookie_jar(cookie_jar.clone())
            .page_url(url.clone())
            .build()?;

        let request = Request::from_url(Method::GET, url)
            .credentials(CredentialsMode::Include)
            .timeout(config.timeout);
        let document = loader.execute(request).await?;

        if !document.is_success() {
            tracing::warn!(url = %document.url, status = %document.status, "Document load returned non-success status");
        }

        let location = document.url.clone();
        let visible = cookie_jar.document_cookie(&location);
        Self::ready(location, config, cookie_jar, Some(document), visible.as_deref())
    }

    /// Make a page ready from a known cookie string, without fetching anything.
    ///
    /// The token is read from `cookies` as given, so with repeated names the
    /// first one wins.
    pub fn with_cookies(url: &str, cookies: &str, config: PageConfig) -> Result<Self> {
        let url = Url::parse(url)?;
        let cookie_jar = CookieJar::new();
        cookie_jar.add_pairs(cookies, &url);
        Self::ready(url, config, cookie_jar, None, Some(cookies))
    }

    /// Document-ready: read the token once from `cookie_source` and build the
    /// request client
    fn ready(
        url: Url,
        config: PageConfig,
        cookie_jar: CookieJar,
        document: Option<Response>,
        cookie_source: Option<&str>,
    ) -> Result<Self> {
        let installer = Installer::new(config.csrf.clone())?;
        let injector: Arc<CsrfHeaderInjector> = installer.install(cookie_source);

        let mut builder = HttpClient::builder()
            .config(config.http.clone())
            .cookie_jar(cookie_jar.clone())
            .page_url(url.clone())
            .shared_interceptor(injector);
        if config.log_requests {
            builder = builder.interceptor(RequestLogger::default());
        }
        let client = builder.build()?;

        tracing::debug!(url = %url, "Page ready");

        Ok(Self {
            url,
            config,
            cookie_jar,
            installer,
            client,
            document,
        })
    }

    /// Get page URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get page configuration
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Get the page's cookie jar
    pub fn cookie_jar(&self) -> &CookieJar {
        &self.cookie_jar
    }

    /// Get the request client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Get the document response
    pub fn document(&self) -> Option<&Response> {
        self.document.as_ref()
    }

    /// The CSRF token read at ready time
    pub fn csrf_token(&self) -> Option<String> {
        self.installer
            .injector()
            .and_then(|i| i.token().map(str::to_string))
    }

    /// The CSRF hook installed on the page client
    pub fn csrf_injector(&self) -> Option<Arc<CsrfHeaderInjector>> {
        self.installer.injector()
    }

    /// Resolve a (possibly relative) target against the page URL
    pub fn resolve(&self, target: &str) -> Result<Url> {
        Ok(self.url.join(target)?)
    }

    /// Start a request to `target`, relative to the page
    pub fn request(&self, method: Method, target: &str) -> Result<RequestBuilder> {
        self.client.request(method, self.resolve(target)?)
    }

    /// GET `target`
    pub async fn get(&self, target: &str) -> Result<Response> {
        self.request(Method::GET, target)?.send().await
    }

    /// POST a raw body to `target`
    pub async fn post(&self, target: &str, body: impl Into<Bytes>) -> Result<Response> {
        self.request(Method::POST, target)?.body(body).send().await
    }

    /// POST a form to `target`
    pub async fn post_form(&self, target: &str, data: &HashMap<String, String>) -> Result<Response> {
        let request = Request::from_url(Method::POST, self.resolve(target)?).form(data);
        self.client.execute(request).await
    }

    /// POST JSON to `target`
    pub async fn post_json<T: Serialize>(&self, target: &str, data: &T) -> Result<Response> {
        self.request(Method::POST, target)?.json(data)?.send().await
    }
}
