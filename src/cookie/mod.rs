// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Cookie handling
//!
//! [`lookup`] reads a single value out of a cookie string. [`CookieJar`]
//! stores what the server sets and renders the string a page script sees.

mod jar;
mod lookup;

pub use jar::{Cookie, CookieJar, SameSite};
pub use lookup::lookup;
