// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Open Command
//!
//! Dispatches a link through the full handler pipeline and prints the
//! navigation it would trigger.

use anyhow::{anyhow, Result};
use cardlink_core::{
    DeepLinkConfig, DeepLinkError, DeepLinkHandler, HandleOptions, NavigationError, Navigator,
    ParamMap, Screen,
};

use crate::display;

/// Navigator that prints instead of switching screens.
struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, screen: Screen, params: &ParamMap) -> Result<(), NavigationError> {
        display::info(&format!("Navigating to {}", screen));
        display::display_params(params);
        Ok(())
    }
}

/// Dispatch a link.
///
/// With `browser`, a web fallback URL is opened in the system browser.
pub fn open_link(
    config: DeepLinkConfig,
    url: &str,
    user: Option<String>,
    browser: bool,
) -> Result<()> {
    let handler = DeepLinkHandler::new(config);
    let options = HandleOptions { user };

    match handler.handle(url, &ConsoleNavigator, &options) {
        Ok(action) => {
            display::success(&format!("Opened {}", action.screen));
            Ok(())
        }
        Err(DeepLinkError::UnsupportedPlatform { fallback_url }) => {
            display::warning("Deep links are not supported on this platform");
            display::info(&format!("Fallback URL: {}", fallback_url));

            if browser {
                match open::that(&fallback_url) {
                    Ok(_) => display::success("Opened browser"),
                    Err(e) => display::error(&format!("Failed to open: {}", e)),
                }
            }
            Ok(())
        }
        Err(e) => Err(anyhow!(e).context(format!("Could not open {}", url))),
    }
}
