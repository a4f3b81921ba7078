// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! CSRF token relay
//!
//! When a page becomes ready, [`Installer`] reads the token cookie once and
//! produces a [`CsrfHeaderInjector`]. The injector is passed to the page's
//! [`HttpClient`](crate::http::HttpClient) at construction and attaches the
//! token header to same-origin requests.

mod config;
mod injector;
mod installer;

pub use config::{CsrfConfig, DEFAULT_COOKIE_NAME, DEFAULT_HEADER_NAME};
pub use injector::CsrfHeaderInjector;
pub use installer::Installer;
