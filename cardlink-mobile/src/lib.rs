// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! CardLink Mobile Bindings
//!
//! UniFFI bindings for Android and iOS platforms.
//! Exposes a simplified, mobile-friendly API on top of cardlink-core.
//!
//! The app registers its router as a [`MobileNavigator`] and hands every
//! incoming URL (launch URL and live "open URL" events) to
//! [`CardLinkMobile::handle_url`].

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use cardlink_core::deeplink::{self, DeepLinkConfig, DeepLinkHandler, HandleOptions};
use cardlink_core::share;

// === Modules ===

mod error;
mod navigation;
mod types;

// === Re-exports ===

pub use error::MobileError;
pub use navigation::{MobileAnalytics, MobileNavigator};
pub use types::{
    MobileHandleResult, MobileLinkConfig, MobileLinkType, MobileParsedLink, MobilePlatform,
};

use navigation::{AnalyticsBridge, NavigatorBridge};

uniffi::setup_scaffolding!();

fn to_btree(params: HashMap<String, String>) -> BTreeMap<String, String> {
    params.into_iter().collect()
}

// === Standalone Functions ===

/// Default configuration (`cardlink://`, `cardlink.app`, Android).
#[uniffi::export]
pub fn default_link_config() -> MobileLinkConfig {
    MobileLinkConfig::default()
}

/// Parse a deep link without dispatching it.
#[uniffi::export]
pub fn parse_deep_link(
    url: String,
    config: MobileLinkConfig,
) -> Result<MobileParsedLink, MobileError> {
    let config = DeepLinkConfig::try_from(config)?;
    let link = deeplink::parse(&url, &config)?;
    Ok(MobileParsedLink::from(&link))
}

/// Strict shape check. Returns false for an invalid configuration.
#[uniffi::export]
pub fn validate_deep_link_structure(url: String, config: MobileLinkConfig) -> bool {
    DeepLinkConfig::try_from(config)
        .map(|config| deeplink::validate_structure(&url, &config))
        .unwrap_or(false)
}

/// Build a custom-scheme link, e.g. `cardlink://card/abc123`.
#[uniffi::export]
pub fn generate_deep_link_url(
    config: MobileLinkConfig,
    link_type: MobileLinkType,
    params: HashMap<String, String>,
) -> Result<String, MobileError> {
    let config = DeepLinkConfig::try_from(config)?;
    Ok(deeplink::generate_deep_link_url(
        &config,
        link_type.into(),
        &to_btree(params),
    ))
}

/// Build a universal link, e.g. `https://cardlink.app/open/card/abc123`.
#[uniffi::export]
pub fn generate_universal_link_url(
    config: MobileLinkConfig,
    link_type: MobileLinkType,
    params: HashMap<String, String>,
) -> Result<String, MobileError> {
    let config = DeepLinkConfig::try_from(config)?;
    Ok(deeplink::generate_universal_link_url(
        &config,
        link_type.into(),
        &to_btree(params),
    ))
}

/// Check an identifier against the `[A-Za-z0-9_-]` allow-list.
#[uniffi::export]
pub fn is_safe_link_identifier(value: String) -> bool {
    deeplink::is_safe_identifier(&value)
}

/// Render a link as a QR code made of block characters.
#[uniffi::export]
pub fn render_share_qr(data: String) -> Result<String, MobileError> {
    Ok(share::render_qr(&data)?)
}

/// Render a link as an SVG QR code.
#[uniffi::export]
pub fn render_share_qr_svg(data: String) -> Result<String, MobileError> {
    Ok(share::render_qr_svg(&data)?)
}

// === Main Interface ===

/// Deep link dispatcher for mobile platforms.
///
/// Create one per app process; it owns the rate-limit state.
#[derive(uniffi::Object)]
pub struct CardLinkMobile {
    handler: DeepLinkHandler,
}

#[uniffi::export]
impl CardLinkMobile {
    /// Create a dispatcher without analytics.
    #[uniffi::constructor]
    pub fn new(config: MobileLinkConfig) -> Result<Arc<Self>, MobileError> {
        let config = DeepLinkConfig::try_from(config)?;
        Ok(Arc::new(CardLinkMobile {
            handler: DeepLinkHandler::new(config),
        }))
    }

    /// Create a dispatcher that reports to the given analytics backend.
    #[uniffi::constructor]
    pub fn with_analytics(
        config: MobileLinkConfig,
        analytics: Box<dyn MobileAnalytics>,
    ) -> Result<Arc<Self>, MobileError> {
        let config = DeepLinkConfig::try_from(config)?;
        let sink = AnalyticsBridge::new(Arc::from(analytics));
        Ok(Arc::new(CardLinkMobile {
            handler: DeepLinkHandler::builder(config)
                .analytics(Arc::new(sink))
                .build(),
        }))
    }

    /// Current configuration.
    pub fn config(&self) -> MobileLinkConfig {
        self.handler.config().clone().into()
    }

    /// Parse a link with this dispatcher's configuration.
    pub fn parse_url(&self, url: String) -> Result<MobileParsedLink, MobileError> {
        let link = self.handler.parse(&url)?;
        Ok(MobileParsedLink::from(&link))
    }

    /// Strict shape check with this dispatcher's configuration.
    pub fn validate_url(&self, url: String) -> bool {
        self.handler.validate_structure(&url)
    }

    /// Open a deep link.
    ///
    /// Never fails: errors are reported in the result, with a fallback URL
    /// on platforms that cannot open deep links in-app.
    pub fn handle_url(
        &self,
        url: String,
        navigator: Box<dyn MobileNavigator>,
        user: Option<String>,
    ) -> MobileHandleResult {
        let bridge = NavigatorBridge::new(navigator.as_ref());
        let result = self.handler.handle(&url, &bridge, &HandleOptions { user });
        MobileHandleResult::from(&result)
    }

    /// Open the URL the app was launched with, if there was one.
    pub fn handle_initial_url(
        &self,
        url: Option<String>,
        navigator: Box<dyn MobileNavigator>,
    ) -> Option<MobileHandleResult> {
        let bridge = NavigatorBridge::new(navigator.as_ref());
        self.handler
            .handle_initial(url.as_deref(), &bridge, &HandleOptions::default())
            .map(|result| MobileHandleResult::from(&result))
    }

    /// Universal share link for a card's share code.
    pub fn share_link(&self, share_code: String) -> String {
        share::share_link(self.handler.config(), &share_code)
    }

    /// Attempts left for a link in the current rate-limit window.
    pub fn remaining_attempts(&self, url: String) -> u32 {
        u32::try_from(self.handler.rate_limiter().remaining(&url)).unwrap_or(u32::MAX)
    }

    /// Drop rate-limit entries with no recent attempts. Returns how many
    /// were dropped.
    pub fn purge_rate_limits(&self) -> u32 {
        u32::try_from(self.handler.rate_limiter().purge_stale()).unwrap_or(u32::MAX)
    }

    /// Forget all rate-limit state.
    pub fn reset_rate_limits(&self) {
        self.handler.rate_limiter().reset();
    }
}

// INLINE_TEST_REQUIRED: Drives CardLinkMobile through Rust implementations of the callback interfaces
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Calls {
        navigations: Mutex<Vec<(String, String)>>,
        events: Mutex<Vec<(String, String)>>,
    }

    struct TestNavigator {
        calls: Arc<Calls>,
        ready: bool,
        error: String,
    }

    impl MobileNavigator for TestNavigator {
        fn is_ready(&self) -> bool {
            self.ready
        }

        fn navigate(&self, screen: String, params_json: String) -> String {
            self.calls
                .navigations
                .lock()
                .unwrap()
                .push((screen, params_json));
            self.error.clone()
        }
    }

    struct TestAnalytics {
        calls: Arc<Calls>,
    }

    impl MobileAnalytics for TestAnalytics {
        fn track(&self, event_name: String, payload_json: String) {
            self.calls
                .events
                .lock()
                .unwrap()
                .push((event_name, payload_json));
        }
    }

    fn navigator(calls: &Arc<Calls>) -> Box<dyn MobileNavigator> {
        Box::new(TestNavigator {
            calls: calls.clone(),
            ready: true,
            error: String::new(),
        })
    }

    fn mobile(calls: &Arc<Calls>) -> Arc<CardLinkMobile> {
        CardLinkMobile::with_analytics(
            MobileLinkConfig::default(),
            Box::new(TestAnalytics {
                calls: calls.clone(),
            }),
        )
        .unwrap()
    }

    #[test]
    fn test_handle_url_navigates_with_json_params() {
        let calls = Arc::new(Calls::default());
        let mobile = mobile(&calls);

        let result = mobile.handle_url(
            "cardlink://card/abc123".to_string(),
            navigator(&calls),
            None,
        );

        assert!(result.success);
        assert_eq!(result.screen.as_deref(), Some("CardView"));

        let navigations = calls.navigations.lock().unwrap();
        assert_eq!(navigations.len(), 1);
        assert_eq!(navigations[0].0, "CardView");
        let params: serde_json::Value = serde_json::from_str(&navigations[0].1).unwrap();
        assert_eq!(params, serde_json::json!({"cardId": "abc123"}));
    }

    #[test]
    fn test_analytics_reach_callback() {
        let calls = Arc::new(Calls::default());
        let mobile = mobile(&calls);

        mobile.handle_url(
            "cardlink://share/s1?source=qr".to_string(),
            navigator(&calls),
            None,
        );
        mobile.handle_url("cardlink://nope/1".to_string(), navigator(&calls), None);

        let events = calls.events.lock().unwrap();
        let names: Vec<&str> = events.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["deep_link_opened", "deep_link_failed"]);

        let opened: serde_json::Value = serde_json::from_str(&events[0].1).unwrap();
        assert_eq!(opened["type"], "share");
        assert_eq!(opened["source"], "qr");
    }

    #[test]
    fn test_navigation_error_string_is_failure() {
        let calls = Arc::new(Calls::default());
        let mobile = mobile(&calls);
        let failing = Box::new(TestNavigator {
            calls: calls.clone(),
            ready: true,
            error: "no such route".to_string(),
        });

        let result = mobile.handle_url("cardlink://card/x".to_string(), failing, None);
        assert!(!result.success);
        assert_eq!(result.error_code.as_deref(), Some("navigation_failed"));
        assert!(result.error.unwrap().contains("no such route"));
    }

    #[test]
    fn test_not_ready_navigator() {
        let calls = Arc::new(Calls::default());
        let mobile = mobile(&calls);
        let not_ready = Box::new(TestNavigator {
            calls: calls.clone(),
            ready: false,
            error: String::new(),
        });

        let result = mobile.handle_url("cardlink://card/x".to_string(), not_ready, None);
        assert_eq!(result.error_code.as_deref(), Some("navigation_unavailable"));
        assert!(calls.navigations.lock().unwrap().is_empty());
    }

    #[test]
    fn test_web_platform_fallback() {
        let calls = Arc::new(Calls::default());
        let config = MobileLinkConfig {
            platform: MobilePlatform::Web,
            ..MobileLinkConfig::default()
        };
        let mobile = CardLinkMobile::new(config).unwrap();

        let result = mobile.handle_url("cardlink://card/x".to_string(), navigator(&calls), None);
        assert!(!result.success);
        assert_eq!(
            result.fallback_url.as_deref(),
            Some("https://cardlink.app/open/card/x")
        );
    }

    #[test]
    fn test_handle_initial_url() {
        let calls = Arc::new(Calls::default());
        let mobile = mobile(&calls);

        assert!(mobile.handle_initial_url(None, navigator(&calls)).is_none());
        let result = mobile
            .handle_initial_url(
                Some("https://cardlink.app/open/profile/u1".to_string()),
                navigator(&calls),
            )
            .unwrap();
        assert_eq!(result.screen.as_deref(), Some("Profile"));
    }

    #[test]
    fn test_rate_limit_state_can_be_reset() {
        let calls = Arc::new(Calls::default());
        let config = MobileLinkConfig {
            rate_limit_max_requests: 1,
            ..MobileLinkConfig::default()
        };
        let mobile = CardLinkMobile::new(config).unwrap();
        let url = "cardlink://card/x".to_string();

        assert_eq!(mobile.remaining_attempts(url.clone()), 1);
        assert!(mobile.handle_url(url.clone(), navigator(&calls), None).success);
        assert_eq!(mobile.remaining_attempts(url.clone()), 0);
        let limited = mobile.handle_url(url.clone(), navigator(&calls), None);
        assert_eq!(limited.error_code.as_deref(), Some("rate_limited"));

        mobile.reset_rate_limits();
        assert_eq!(mobile.remaining_attempts(url.clone()), 1);
        assert!(mobile.handle_url(url, navigator(&calls), None).success);
        assert_eq!(mobile.purge_rate_limits(), 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = MobileLinkConfig {
            scheme: String::new(),
            ..MobileLinkConfig::default()
        };
        assert!(matches!(
            CardLinkMobile::new(config),
            Err(MobileError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_share_link_uses_config() {
        let mobile = CardLinkMobile::new(MobileLinkConfig::default()).unwrap();
        assert_eq!(
            mobile.share_link("abc".to_string()),
            "https://cardlink.app/open/share/abc"
        );
        assert_eq!(mobile.config(), MobileLinkConfig::default());
    }
}
