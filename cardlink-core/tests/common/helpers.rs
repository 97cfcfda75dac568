// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Test Navigators and Sinks

use std::sync::{Arc, Mutex};

use cardlink_core::deeplink::{
    AnalyticsEvent, AnalyticsSink, DeepLinkConfig, DeepLinkHandler, ManualClock, NavigationError,
    Navigator, ParamMap, RateLimitConfig, Screen,
};

/// 2023-11-14T22:13:20Z
pub const NOW_SECS: u64 = 1_700_000_000;

/// Navigator that records every call.
#[derive(Default)]
pub struct RecordingNavigator {
    calls: Mutex<Vec<(Screen, ParamMap)>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<(Screen, ParamMap)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, screen: Screen, params: &ParamMap) -> Result<(), NavigationError> {
        self.calls.lock().unwrap().push((screen, params.clone()));
        Ok(())
    }
}

/// Navigator whose every navigation fails.
pub struct FailingNavigator {
    pub message: String,
}

impl FailingNavigator {
    pub fn new(message: &str) -> Self {
        FailingNavigator {
            message: message.to_string(),
        }
    }
}

impl Navigator for FailingNavigator {
    fn navigate(&self, _screen: Screen, _params: &ParamMap) -> Result<(), NavigationError> {
        Err(NavigationError::new(self.message.clone()))
    }
}

/// Navigator that is never ready. Panics if navigation is attempted.
pub struct NotReadyNavigator;

impl Navigator for NotReadyNavigator {
    fn is_ready(&self) -> bool {
        false
    }

    fn navigate(&self, _screen: Screen, _params: &ParamMap) -> Result<(), NavigationError> {
        panic!("navigate called on a navigator that is not ready");
    }
}

/// Analytics sink that keeps every event.
#[derive(Default)]
pub struct CollectingSink {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events().iter().map(AnalyticsEvent::name).collect()
    }
}

impl AnalyticsSink for CollectingSink {
    fn track(&self, event: &AnalyticsEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Default configuration with a roomy rate limit.
pub fn test_config() -> DeepLinkConfig {
    DeepLinkConfig::default().with_rate_limit(RateLimitConfig {
        window_secs: 60,
        max_requests: 10,
        max_keys: 64,
    })
}

/// Handler wired to a manual clock and a collecting sink.
pub fn test_handler(
    config: DeepLinkConfig,
) -> (DeepLinkHandler, Arc<ManualClock>, Arc<CollectingSink>) {
    let clock = Arc::new(ManualClock::at_secs(NOW_SECS));
    let sink = Arc::new(CollectingSink::new());
    let handler = DeepLinkHandler::builder(config)
        .clock(clock.clone())
        .analytics(sink.clone())
        .build();
    (handler, clock, sink)
}
