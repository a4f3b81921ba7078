// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! One-shot installation of the CSRF header hook

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::header::HeaderName;

use super::config::CsrfConfig;
use super::injector::CsrfHeaderInjector;
use crate::cookie;
use crate::error::Result;

#[derive(Debug)]
enum InstallState {
    Unregistered,
    Registered(Arc<CsrfHeaderInjector>),
}

/// Reads the token once and hands out the resulting hook.
///
/// `Registered` is terminal: later calls to [`Installer::install`] return
/// the same injector without looking at the cookie source again.
#[derive(Debug)]
pub struct Installer {
    config: CsrfConfig,
    header: HeaderName,
    state: RwLock<InstallState>,
}

impl Installer {
    /// Create an installer, validating the configured names
    pub fn new(config: CsrfConfig) -> Result<Self> {
        let header = config.validate()?;
        Ok(Self {
            config,
            header,
            state: RwLock::new(InstallState::Unregistered),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &CsrfConfig {
        &self.config
    }

    /// Read the token from `cookie_source` and register the hook
    pub fn install(&self, cookie_source: Option<&str>) -> Arc<CsrfHeaderInjector> {
        let mut state = self.state.write();
        if let InstallState::Registered(ref injector) = *state {
            tracing::debug!("CSRF hook already registered");
            return Arc::clone(injector);
        }

        let token = cookie::lookup(&self.config.cookie_name, cookie_source);
        if token.is_some() {
            tracing::info!(cookie = %self.config.cookie_name, "CSRF token found");
        } else {
            tracing::info!(
                cookie = %self.config.cookie_name,
                "No CSRF token cookie, requests will go out without the header"
            );
        }

        let injector = Arc::new(CsrfHeaderInjector::new(self.header.clone(), token));
        *state = InstallState::Registered(Arc::clone(&injector));
        injector
    }

    /// Whether the hook has been registered
    pub fn is_registered(&self) -> bool {
        matches!(*self.state.read(), InstallState::Registered(_))
    }

    /// The registered hook, if any
    pub fn injector(&self) -> Option<Arc<CsrfHeaderInjector>> {
        match *self.state.read() {
            InstallState::Registered(ref injector) => Some(Arc::clone(injector)),
            InstallState::Unregistered => None,
        }
    }
}
