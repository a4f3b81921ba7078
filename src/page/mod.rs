// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Page lifecycle
//!
//! Opening a page loads its document and cookies, then fires the one-time
//! ready step that installs the CSRF hook on the page's request client.

mod config;
#[allow(clippy::module_inception)]
mod page;

pub use config::PageConfig;
pub use page::Page;
