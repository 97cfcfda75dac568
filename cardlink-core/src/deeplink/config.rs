// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deep link configuration

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::sanitize::MAX_PARAM_LENGTH;

/// Runtime the app is running on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    #[default]
    Android,
    /// Browser build. Deep links cannot be opened in-app here.
    Web,
}

impl Platform {
    pub fn supports_deep_links(&self) -> bool {
        !matches!(self, Platform::Web)
    }
}

/// Sliding-window rate limit settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Length of the trailing window in seconds.
    pub window_secs: u64,
    /// Attempts allowed per identifier within the window.
    pub max_requests: usize,
    /// Identifiers tracked at once before the oldest is evicted.
    pub max_keys: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: 60,
            max_requests: 10,
            max_keys: 1024,
        }
    }
}

/// Configuration for parsing and dispatching deep links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeepLinkConfig {
    /// Custom URL scheme, without `://` (e.g., "cardlink")
    pub scheme: String,

    /// Canonical web domain for universal links (e.g., "cardlink.app")
    pub domain: String,

    /// Leading path segment of universal links (e.g., "open")
    pub universal_prefix: String,

    /// Platform the handler runs on
    pub platform: Platform,

    /// Rate limiting of repeated link opens
    pub rate_limit: RateLimitConfig,

    /// Maximum length of a sanitized parameter value (characters)
    pub max_param_length: usize,

    /// Reject links whose identifiers are not plain `[A-Za-z0-9_-]` tokens
    pub strict_identifiers: bool,
}

impl Default for DeepLinkConfig {
    fn default() -> Self {
        Self {
            scheme: "cardlink".to_string(),
            domain: "cardlink.app".to_string(),
            universal_prefix: "open".to_string(),
            platform: Platform::default(),
            rate_limit: RateLimitConfig::default(),
            max_param_length: MAX_PARAM_LENGTH,
            strict_identifiers: false,
        }
    }
}

impl DeepLinkConfig {
    /// Loads a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: DeepLinkConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration can produce and recognize links.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scheme.is_empty()
            || !self
                .scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        {
            return Err(ConfigError::InvalidScheme(self.scheme.clone()));
        }
        if self.domain.is_empty() || self.domain.contains('/') {
            return Err(ConfigError::InvalidDomain(self.domain.clone()));
        }
        if self.universal_prefix.contains('/') {
            return Err(ConfigError::InvalidPrefix(self.universal_prefix.clone()));
        }
        if self.rate_limit.max_requests == 0 || self.rate_limit.window_secs == 0 {
            return Err(ConfigError::InvalidRateLimit);
        }
        Ok(())
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Enable the identifier allow-list check on dispatch
    pub fn with_strict_identifiers(mut self) -> Self {
        self.strict_identifiers = true;
        self
    }

    /// Base of generated universal links, e.g. `https://cardlink.app/open`.
    pub fn universal_base(&self) -> String {
        if self.universal_prefix.is_empty() {
            format!("https://{}", self.domain)
        } else {
            format!("https://{}/{}", self.domain, self.universal_prefix)
        }
    }
}
