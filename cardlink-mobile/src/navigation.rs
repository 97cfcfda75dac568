// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mobile Navigation and Analytics Callbacks
//!
//! Callback interfaces implemented in Swift (iOS) or Kotlin (Android), and
//! the adapters that plug them into the core dispatcher.

use std::sync::Arc;

use cardlink_core::deeplink::{
    AnalyticsEvent, AnalyticsSink, NavigationError, Navigator, ParamMap, Screen,
};

/// Callback interface for the app's screen router.
#[uniffi::export(callback_interface)]
pub trait MobileNavigator: Send + Sync {
    /// Whether the router can accept navigation yet.
    fn is_ready(&self) -> bool;

    /// Open `screen` with parameters given as a JSON object.
    ///
    /// Block until navigation has completed.
    ///
    /// Returns empty string on success, error message on failure.
    fn navigate(&self, screen: String, params_json: String) -> String;
}

/// Callback interface for the app's analytics backend.
#[uniffi::export(callback_interface)]
pub trait MobileAnalytics: Send + Sync {
    /// Record an event. `payload_json` is a JSON object.
    fn track(&self, event_name: String, payload_json: String);
}

/// Adapts a [`MobileNavigator`] to the core [`Navigator`] trait.
pub(crate) struct NavigatorBridge<'a> {
    inner: &'a dyn MobileNavigator,
}

impl<'a> NavigatorBridge<'a> {
    pub(crate) fn new(inner: &'a dyn MobileNavigator) -> Self {
        NavigatorBridge { inner }
    }
}

impl Navigator for NavigatorBridge<'_> {
    fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }

    fn navigate(&self, screen: Screen, params: &ParamMap) -> Result<(), NavigationError> {
        let params_json = serde_json::to_string(params)
            .map_err(|e| NavigationError::new(format!("could not encode params: {}", e)))?;

        let error = self.inner.navigate(screen.as_str().to_string(), params_json);
        if error.is_empty() {
            Ok(())
        } else {
            Err(NavigationError::new(error))
        }
    }
}

/// Adapts a [`MobileAnalytics`] to the core [`AnalyticsSink`] trait.
pub(crate) struct AnalyticsBridge {
    inner: Arc<dyn MobileAnalytics>,
}

impl AnalyticsBridge {
    pub(crate) fn new(inner: Arc<dyn MobileAnalytics>) -> Self {
        AnalyticsBridge { inner }
    }
}

impl AnalyticsSink for AnalyticsBridge {
    fn track(&self, event: &AnalyticsEvent) {
        let payload = serde_json::Value::Object(event.payload()).to_string();
        self.inner.track(event.name().to_string(), payload);
    }
}
