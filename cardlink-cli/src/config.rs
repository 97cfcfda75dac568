// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI Configuration

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cardlink_core::{DeepLinkConfig, Platform};
use tracing::debug;

/// Settings gathered from flags and environment.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// JSON configuration file, applied first.
    pub config_file: Option<PathBuf>,
    /// Custom URL scheme override.
    pub scheme: Option<String>,
    /// Web domain override.
    pub domain: Option<String>,
    /// Platform override.
    pub platform: Option<Platform>,
    /// Enable the identifier allow-list.
    pub strict: bool,
}

impl CliConfig {
    /// Resolves the deep link configuration: defaults, then the config
    /// file, then flags.
    pub fn link_config(&self) -> Result<DeepLinkConfig> {
        let mut config = match &self.config_file {
            Some(path) => load_file(path)?,
            None => DeepLinkConfig::default(),
        };

        if let Some(scheme) = &self.scheme {
            config = config.with_scheme(scheme.as_str());
        }
        if let Some(domain) = &self.domain {
            config = config.with_domain(domain.as_str());
        }
        if let Some(platform) = self.platform {
            config = config.with_platform(platform);
        }
        if self.strict {
            config = config.with_strict_identifiers();
        }

        config.validate()?;
        debug!(
            scheme = %config.scheme,
            domain = %config.domain,
            platform = ?config.platform,
            strict = config.strict_identifiers,
            "resolved link configuration"
        );
        Ok(config)
    }
}

fn load_file(path: &Path) -> Result<DeepLinkConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    DeepLinkConfig::from_json(&json)
        .with_context(|| format!("Invalid config file {}", path.display()))
}
