// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mobile-friendly data types.
//!
//! These types are wrappers around cardlink-core types that are compatible
//! with UniFFI for cross-language bindings.

use std::collections::HashMap;

use cardlink_core::deeplink::{
    DeepLinkConfig, DeepLinkError, LinkKind, LinkType, NavigationAction, ParsedLink, Platform,
    RateLimitConfig,
};

use crate::error::MobileError;

/// Mobile-friendly platform enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum MobilePlatform {
    Ios,
    Android,
    Web,
}

impl From<Platform> for MobilePlatform {
    fn from(platform: Platform) -> Self {
        match platform {
            Platform::Ios => MobilePlatform::Ios,
            Platform::Android => MobilePlatform::Android,
            Platform::Web => MobilePlatform::Web,
        }
    }
}

impl From<MobilePlatform> for Platform {
    fn from(platform: MobilePlatform) -> Self {
        match platform {
            MobilePlatform::Ios => Platform::Ios,
            MobilePlatform::Android => Platform::Android,
            MobilePlatform::Web => Platform::Web,
        }
    }
}

/// Mobile-friendly link type enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum MobileLinkType {
    Card,
    Profile,
    Share,
    Auth,
    Exchange,
    Event,
    Cards,
    Team,
    Unknown,
}

impl From<LinkType> for MobileLinkType {
    fn from(link_type: LinkType) -> Self {
        match link_type {
            LinkType::Card => MobileLinkType::Card,
            LinkType::Profile => MobileLinkType::Profile,
            LinkType::Share => MobileLinkType::Share,
            LinkType::Auth => MobileLinkType::Auth,
            LinkType::Exchange => MobileLinkType::Exchange,
            LinkType::Event => MobileLinkType::Event,
            LinkType::Cards => MobileLinkType::Cards,
            LinkType::Team => MobileLinkType::Team,
            LinkType::Unknown => MobileLinkType::Unknown,
        }
    }
}

impl From<MobileLinkType> for LinkType {
    fn from(link_type: MobileLinkType) -> Self {
        match link_type {
            MobileLinkType::Card => LinkType::Card,
            MobileLinkType::Profile => LinkType::Profile,
            MobileLinkType::Share => LinkType::Share,
            MobileLinkType::Auth => LinkType::Auth,
            MobileLinkType::Exchange => LinkType::Exchange,
            MobileLinkType::Event => LinkType::Event,
            MobileLinkType::Cards => LinkType::Cards,
            MobileLinkType::Team => LinkType::Team,
            MobileLinkType::Unknown => LinkType::Unknown,
        }
    }
}

/// Mobile-friendly deep link configuration.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct MobileLinkConfig {
    pub scheme: String,
    pub domain: String,
    pub universal_prefix: String,
    pub platform: MobilePlatform,
    pub rate_limit_window_secs: u64,
    pub rate_limit_max_requests: u32,
    pub strict_identifiers: bool,
}

impl Default for MobileLinkConfig {
    fn default() -> Self {
        DeepLinkConfig::default().into()
    }
}

impl From<DeepLinkConfig> for MobileLinkConfig {
    fn from(config: DeepLinkConfig) -> Self {
        MobileLinkConfig {
            scheme: config.scheme,
            domain: config.domain,
            universal_prefix: config.universal_prefix,
            platform: config.platform.into(),
            rate_limit_window_secs: config.rate_limit.window_secs,
            rate_limit_max_requests: u32::try_from(config.rate_limit.max_requests)
                .unwrap_or(u32::MAX),
            strict_identifiers: config.strict_identifiers,
        }
    }
}

impl TryFrom<MobileLinkConfig> for DeepLinkConfig {
    type Error = MobileError;

    fn try_from(config: MobileLinkConfig) -> Result<Self, Self::Error> {
        let defaults = DeepLinkConfig::default();
        let converted = DeepLinkConfig {
            scheme: config.scheme,
            domain: config.domain,
            universal_prefix: config.universal_prefix,
            platform: config.platform.into(),
            rate_limit: RateLimitConfig {
                window_secs: config.rate_limit_window_secs,
                max_requests: config.rate_limit_max_requests as usize,
                ..defaults.rate_limit
            },
            strict_identifiers: config.strict_identifiers,
            ..defaults
        };
        converted.validate()?;
        Ok(converted)
    }
}

/// Mobile-friendly parsed deep link.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct MobileParsedLink {
    /// "custom_scheme", "universal" or "intent"
    pub kind: String,
    pub link_type: MobileLinkType,
    pub action: String,
    pub card_id: Option<String>,
    pub user_id: Option<String>,
    /// Primary identifier for any type that has one.
    pub identifier: Option<String>,
    /// Card ids of a bulk link.
    pub ids: Vec<String>,
    pub params: HashMap<String, String>,
}

impl From<&ParsedLink> for MobileParsedLink {
    fn from(link: &ParsedLink) -> Self {
        let kind = match link.kind {
            LinkKind::CustomScheme => "custom_scheme",
            LinkKind::Universal => "universal",
            LinkKind::Intent => "intent",
        };
        let ids = match &link.target {
            cardlink_core::LinkTarget::Cards { ids } => ids.clone(),
            _ => Vec::new(),
        };

        MobileParsedLink {
            kind: kind.to_string(),
            link_type: link.link_type().into(),
            action: link.action.clone(),
            card_id: link.card_id().map(str::to_string),
            user_id: link.user_id().map(str::to_string),
            identifier: link.target.identifier().map(str::to_string),
            ids,
            params: link
                .params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

/// Result of handling a deep link.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct MobileHandleResult {
    pub success: bool,
    /// Human-readable error, if the link was not opened.
    pub error: Option<String>,
    /// Stable error code, e.g. "rate_limited" or "expired".
    pub error_code: Option<String>,
    /// Web URL to open instead, on platforms without in-app deep links.
    pub fallback_url: Option<String>,
    /// Screen that was opened.
    pub screen: Option<String>,
}

impl From<&Result<NavigationAction, DeepLinkError>> for MobileHandleResult {
    fn from(result: &Result<NavigationAction, DeepLinkError>) -> Self {
        let outcome = cardlink_core::HandleOutcome::from(result);
        MobileHandleResult {
            success: outcome.success,
            error: outcome.error,
            error_code: outcome.error_code,
            fallback_url: outcome.fallback_url,
            screen: outcome.screen.map(|s| s.as_str().to_string()),
        }
    }
}
