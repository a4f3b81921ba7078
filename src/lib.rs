// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # csrf-relay
//!
//! Echo a page's CSRF cookie back to the server as a request header.
//!
//! Frameworks with cookie-based CSRF protection set a token cookie
//! (`csrftoken`) and expect state-changing requests from the page to carry
//! it in a header (`X-CSRFToken`). This crate loads a page, reads the token
//! once when the page is ready, and builds an HTTP client whose pre-send hook
//! attaches the header to every same-origin request. Cross-origin requests
//! never see the token.
//!
//! ## Example
//!
//! ```rust,no_run
//! use csrf_relay::{Page, PageConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let page = Page::open("https://example.com/dashboard/", PageConfig::default()).await?;
//!
//!     // Same-origin: carries X-CSRFToken
//!     let resp = page.post("/api/items/", "name=widget").await?;
//!     println!("{}", resp.status);
//!
//!     Ok(())
//! }
//! ```
//!
//! The cookie lookup is usable on its own:
//!
//! ```
//! let token = csrf_relay::cookie::lookup("csrftoken", Some("csrftoken=abc%20def"));
//! assert_eq!(token.as_deref(), Some("abc def"));
//! ```

pub mod cookie;
pub mod csrf;
pub mod error;
pub mod http;
pub mod network;
pub mod page;

// Cookies
pub use cookie::{lookup, Cookie, CookieJar, SameSite};

// CSRF
pub use csrf::{CsrfConfig, CsrfHeaderInjector, Installer};

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{CredentialsMode, HttpClient, HttpClientConfig, Request, Response};

// Network
pub use network::{InterceptAction, InterceptorChain, RequestInterceptor, RequestLogger};

// Page
pub use page::{Page, PageConfig};

/// csrf-relay version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
