// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP request descriptor

use super::headers;
use crate::error::Result;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use url::{Origin, Url};

/// An outgoing request, handed to pre-send hooks before dispatch
#[derive(Debug, Clone)]
pub struct Request {
    /// Request method
    pub method: Method,
    /// Request URL
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Option<Bytes>,
    /// Request timeout
    pub timeout: Option<Duration>,
    /// Credentials mode
    pub credentials: CredentialsMode,
    /// Whether the target is outside the page's origin.
    ///
    /// `None` until classified, either explicitly by the caller or by the
    /// client against its page origin.
    pub cross_domain: Option<bool>,
}

/// Credentials mode for requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialsMode {
    /// Send cookies only to same-origin requests
    #[default]
    SameOrigin,
    /// Always send cookies
    Include,
    /// Never send cookies
    Omit,
}

impl Request {
    /// Create a new request with arbitrary method
    pub fn new(method: Method, url: impl AsRef<str>) -> Result<Self> {
        Ok(Self::from_url(method, Url::parse(url.as_ref())?))
    }

    /// Create a new request for an already parsed URL
    pub fn from_url(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
            timeout: Some(Duration::from_secs(30)),
            credentials: CredentialsMode::default(),
            cross_domain: None,
        }
    }

    /// Create a new GET request
    pub fn get(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::GET, url)
    }

    /// Create a new POST request
    pub fn post(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::POST, url)
    }

    /// Set a header
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Set the request body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set JSON body
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self> {
        let json = serde_json::to_vec(data)?;
        self.body = Some(Bytes::from(json));
        Ok(self.header(headers::CONTENT_TYPE, "application/json"))
    }

    /// Set form body
    pub fn form(mut self, data: &HashMap<String, String>) -> Self {
        let body = data
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        self.body = Some(Bytes::from(body));
        self.header(headers::CONTENT_TYPE, "application/x-www-form-urlencoded")
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disable timeout
    pub fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Set credentials mode
    pub fn credentials(mut self, mode: CredentialsMode) -> Self {
        self.credentials = mode;
        self
    }

    /// Mark the request as cross-domain (or not), skipping origin comparison
    pub fn cross_domain(mut self, cross_domain: bool) -> Self {
        self.cross_domain = Some(cross_domain);
        self
    }

    /// Classify against the page origin unless the caller already did
    pub fn classify(&mut self, page_origin: &Origin) {
        if self.cross_domain.is_none() {
            self.cross_domain = Some(&self.url.origin() != page_origin);
        }
    }

    /// Whether the request targets another origin.
    ///
    /// Unclassified requests count as cross-domain.
    pub fn is_cross_domain(&self) -> bool {
        self.cross_domain.unwrap_or(true)
    }

    /// Get a header value as text
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get the origin
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }
}
