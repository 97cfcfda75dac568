// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deep Link Dispatcher
//!
//! Main entry point for opening a link. Each call runs, in order:
//!
//! 1. rate-limit check keyed by the raw URL
//! 2. navigator readiness
//! 3. platform check (web builds get a fallback URL instead)
//! 4. parsing
//! 5. `expires` check
//! 6. identifier allow-list (strict mode only)
//! 7. action building and parameter sanitizing
//! 8. navigation
//! 9. analytics
//!
//! Every failure comes back as a [`DeepLinkError`]; nothing is retried.
//!
//! # Example
//!
//! ```ignore
//! use cardlink_core::deeplink::{DeepLinkConfig, DeepLinkHandler, HandleOptions};
//!
//! let handler = DeepLinkHandler::new(DeepLinkConfig::default());
//! let action = handler.handle("cardlink://card/abc123", &navigator, &HandleOptions::default())?;
//! assert_eq!(action.screen.as_str(), "CardView");
//! ```

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::action::{NavigationAction, ParamMap, Screen};
use super::analytics::{AnalyticsEvent, AnalyticsSink, NoopAnalytics};
use super::clock::{Clock, SystemClock};
use super::generate::web_fallback_url;
use super::rate_limit::RateLimiter;
use super::sanitize::{is_safe_identifier, sanitize_params};
use super::{
    classify, parse, DeepLinkConfig, DeepLinkError, NavigationError, ParseError, ParsedLink,
};

/// Query parameter holding the link's expiry (Unix seconds).
const EXPIRES_PARAM: &str = "expires";

/// Host navigation layer.
pub trait Navigator {
    /// Whether the navigator can accept navigation right now.
    fn is_ready(&self) -> bool {
        true
    }

    /// Opens `screen` with `params`. Returns once navigation has completed.
    fn navigate(&self, screen: Screen, params: &ParamMap) -> Result<(), NavigationError>;
}

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct HandleOptions {
    /// Signed-in user, if any. Only recorded in logs.
    pub user: Option<String>,
}

/// Flattened result of [`DeepLinkHandler::handle`] for hosts that want a
/// plain record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandleOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen: Option<Screen>,
}

impl From<&Result<NavigationAction, DeepLinkError>> for HandleOutcome {
    fn from(result: &Result<NavigationAction, DeepLinkError>) -> Self {
        match result {
            Ok(action) => HandleOutcome {
                success: true,
                error: None,
                error_code: None,
                fallback_url: None,
                screen: Some(action.screen),
            },
            Err(err) => HandleOutcome {
                success: false,
                error: Some(err.to_string()),
                error_code: Some(err.code().to_string()),
                fallback_url: err.fallback_url().map(str::to_string),
                screen: None,
            },
        }
    }
}

impl From<Result<NavigationAction, DeepLinkError>> for HandleOutcome {
    fn from(result: Result<NavigationAction, DeepLinkError>) -> Self {
        HandleOutcome::from(&result)
    }
}

/// Deep link dispatcher.
///
/// Owns its rate limiter, analytics sink and clock, all injected through
/// [`DeepLinkHandlerBuilder`].
pub struct DeepLinkHandler {
    config: DeepLinkConfig,
    rate_limiter: RateLimiter,
    analytics: Arc<dyn AnalyticsSink>,
    clock: Arc<dyn Clock>,
}

impl DeepLinkHandler {
    /// Creates a handler with the system clock and no analytics.
    pub fn new(config: DeepLinkConfig) -> Self {
        DeepLinkHandlerBuilder::new(config).build()
    }

    pub fn builder(config: DeepLinkConfig) -> DeepLinkHandlerBuilder {
        DeepLinkHandlerBuilder::new(config)
    }

    pub fn config(&self) -> &DeepLinkConfig {
        &self.config
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Parses a link with this handler's configuration.
    pub fn parse(&self, url: &str) -> Result<ParsedLink, ParseError> {
        parse(url, &self.config)
    }

    /// Strict structural check with this handler's configuration.
    pub fn validate_structure(&self, url: &str) -> bool {
        classify::validate_structure(url, &self.config)
    }

    /// Opens a deep link.
    ///
    /// On success returns the action that was navigated to, with sanitized
    /// parameters.
    pub fn handle(
        &self,
        url: &str,
        navigator: &dyn Navigator,
        options: &HandleOptions,
    ) -> Result<NavigationAction, DeepLinkError> {
        debug!(url = %url, user = ?options.user, "handling deep link");

        if !self.rate_limiter.check(url) {
            warn!(url = %url, "deep link rate limited");
            return Err(DeepLinkError::RateLimited);
        }

        if !navigator.is_ready() {
            warn!(url = %url, "navigator not ready");
            return Err(DeepLinkError::NavigationUnavailable);
        }

        if !self.config.platform.supports_deep_links() {
            let fallback_url = web_fallback_url(url, &self.config);
            info!(url = %url, fallback = %fallback_url, "deep links unsupported, using web fallback");
            return Err(DeepLinkError::UnsupportedPlatform { fallback_url });
        }

        let link = match parse(url, &self.config) {
            Ok(link) => link,
            Err(err) => {
                self.report_failure(url, &err.to_string());
                return Err(err.into());
            }
        };
        debug!(link_type = %link.link_type(), action = %link.action, "parsed deep link");

        self.check_expiry(&link)?;

        if self.config.strict_identifiers {
            if let Err(err) = check_identifiers(&link) {
                self.report_failure(url, &err.to_string());
                return Err(err);
            }
        }

        let built = NavigationAction::for_link(&link);
        let action = NavigationAction {
            screen: built.screen,
            params: sanitize_params(&built.params, self.config.max_param_length),
        };

        if let Err(err) = navigator.navigate(action.screen, &action.params) {
            self.report_failure(url, err.message());
            return Err(err.into());
        }

        self.report_opened(&link);
        info!(screen = %action.screen, link_type = %link.link_type(), "deep link opened");
        Ok(action)
    }

    /// Opens the link the app was launched with, if any.
    pub fn handle_initial(
        &self,
        url: Option<&str>,
        navigator: &dyn Navigator,
        options: &HandleOptions,
    ) -> Option<Result<NavigationAction, DeepLinkError>> {
        let url = url.map(str::trim).filter(|u| !u.is_empty())?;
        debug!(url = %url, "handling initial launch URL");
        Some(self.handle(url, navigator, options))
    }

    fn check_expiry(&self, link: &ParsedLink) -> Result<(), DeepLinkError> {
        let Some(raw) = link.param(EXPIRES_PARAM) else {
            return Ok(());
        };

        // Signed and fractional timestamps are accepted.
        let expires = match raw.trim().parse::<f64>() {
            Ok(expires) if expires.is_finite() => expires,
            _ => {
                warn!(expires = %raw, "ignoring non-numeric expires parameter");
                return Ok(());
            }
        };

        if self.clock.now_secs() as f64 > expires {
            let expired_at = expires.floor() as i64;
            warn!(expired_at, "deep link expired");
            return Err(DeepLinkError::Expired { expired_at });
        }
        Ok(())
    }

    fn report_failure(&self, url: &str, reason: &str) {
        warn!(url = %url, reason = %reason, "deep link failed");
        self.analytics.track(&AnalyticsEvent::DeepLinkFailed {
            url: url.to_string(),
            reason: reason.to_string(),
            timestamp: self.clock.now_millis(),
        });
    }

    fn report_opened(&self, link: &ParsedLink) {
        let timestamp = self.clock.now_millis();
        let identifier = link.target.identifier().map(str::to_string);
        let campaign = link.param("campaign").map(str::to_string);

        self.analytics.track(&AnalyticsEvent::DeepLinkOpened {
            link_type: link.link_type(),
            identifier: identifier.clone(),
            source: link.param("source").map(str::to_string),
            campaign: campaign.clone(),
            timestamp,
        });

        if link.param("track_conversion") == Some("true") {
            self.analytics.track(&AnalyticsEvent::ConversionStart {
                link_type: link.link_type(),
                identifier,
                campaign,
                timestamp,
            });
        }
    }
}

fn check_identifiers(link: &ParsedLink) -> Result<(), DeepLinkError> {
    match link
        .target
        .identifiers()
        .into_iter()
        .find(|id| !is_safe_identifier(id))
    {
        Some(bad) => Err(DeepLinkError::InvalidIdentifier(bad.to_string())),
        None => Ok(()),
    }
}

/// Builder for [`DeepLinkHandler`].
pub struct DeepLinkHandlerBuilder {
    config: DeepLinkConfig,
    rate_limiter: Option<RateLimiter>,
    analytics: Option<Arc<dyn AnalyticsSink>>,
    clock: Option<Arc<dyn Clock>>,
}

impl DeepLinkHandlerBuilder {
    pub fn new(config: DeepLinkConfig) -> Self {
        DeepLinkHandlerBuilder {
            config,
            rate_limiter: None,
            analytics: None,
            clock: None,
        }
    }

    /// Uses the given rate limiter instead of one built from the config.
    pub fn rate_limiter(mut self, rate_limiter: RateLimiter) -> Self {
        self.rate_limiter = Some(rate_limiter);
        self
    }

    pub fn analytics(mut self, analytics: Arc<dyn AnalyticsSink>) -> Self {
        self.analytics = Some(analytics);
        self
    }

    /// Clock for expiry checks, and for the default rate limiter.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> DeepLinkHandler {
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let rate_limiter = self.rate_limiter.unwrap_or_else(|| {
            RateLimiter::with_clock(self.config.rate_limit.clone(), clock.clone())
        });

        DeepLinkHandler {
            config: self.config,
            rate_limiter,
            analytics: self.analytics.unwrap_or_else(|| Arc::new(NoopAnalytics)),
            clock,
        }
    }
}
