// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deep Link Error Types

use thiserror::Error;

/// Why a string could not be turned into a [`super::ParsedLink`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("not a recognized deep link")]
    NotADeepLink,

    #[error("malformed URL: {0}")]
    InvalidUrl(String),

    #[error("link has no type")]
    MissingType,

    #[error("unsupported link type: {0}")]
    UnsupportedType(String),
}

/// Failure reported by the host's navigation layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("navigation failed: {message}")]
pub struct NavigationError {
    message: String,
}

impl NavigationError {
    pub fn new(message: impl Into<String>) -> Self {
        NavigationError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors returned by [`super::DeepLinkHandler::handle`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeepLinkError {
    /// The same link was opened too often within the window.
    #[error("too many attempts to open this link, try again later")]
    RateLimited,

    /// The navigator cannot accept navigation yet.
    #[error("navigation is not available")]
    NavigationUnavailable,

    /// Deep links cannot be opened in-app on this platform.
    #[error("deep links are not supported on this platform")]
    UnsupportedPlatform { fallback_url: String },

    #[error("invalid deep link: {0}")]
    Parse(#[from] ParseError),

    /// The link carried an `expires` timestamp in the past.
    #[error("link expired at {expired_at}")]
    Expired { expired_at: i64 },

    /// Strict mode rejected an identifier.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

impl DeepLinkError {
    /// Web URL to open instead, when the platform cannot handle the link.
    pub fn fallback_url(&self) -> Option<&str> {
        match self {
            DeepLinkError::UnsupportedPlatform { fallback_url } => Some(fallback_url),
            _ => None,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            DeepLinkError::RateLimited => "rate_limited",
            DeepLinkError::NavigationUnavailable => "navigation_unavailable",
            DeepLinkError::UnsupportedPlatform { .. } => "unsupported_platform",
            DeepLinkError::Parse(_) => "invalid_link",
            DeepLinkError::Expired { .. } => "expired",
            DeepLinkError::InvalidIdentifier(_) => "invalid_identifier",
            DeepLinkError::Navigation(_) => "navigation_failed",
        }
    }
}

/// Invalid [`super::DeepLinkConfig`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("malformed configuration: {0}")]
    Malformed(String),

    #[error("invalid URL scheme: {0:?}")]
    InvalidScheme(String),

    #[error("invalid domain: {0:?}")]
    InvalidDomain(String),

    #[error("invalid universal link prefix: {0:?}")]
    InvalidPrefix(String),

    #[error("rate limit window and request cap must be non-zero")]
    InvalidRateLimit,
}
