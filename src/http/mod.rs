// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client layer
//!
//! Provides a lightweight HTTP client with cookie management and
//! pre-send hooks supplied at construction.

mod client;
mod request;
mod response;

pub use client::{HttpClient, HttpClientBuilder, HttpClientConfig, RequestBuilder};
pub use request::{CredentialsMode, Request};
pub use response::Response;

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("csrf-relay/", env!("CARGO_PKG_VERSION"));

/// Common HTTP headers
pub mod headers {
    pub const ACCEPT: &str = "accept";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const COOKIE: &str = "cookie";
    pub const SET_COOKIE: &str = "set-cookie";
}
