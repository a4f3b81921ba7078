// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request interception

mod interceptor;

pub use interceptor::{InterceptAction, InterceptorChain, RequestInterceptor, RequestLogger};
