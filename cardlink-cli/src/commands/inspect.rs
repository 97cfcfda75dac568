// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parse and Validate Commands

use anyhow::{bail, Result};
use cardlink_core::{classify, parse, validate_structure, DeepLinkConfig};

use crate::display;

/// Parse a link and print its parts.
pub fn parse_link(config: &DeepLinkConfig, url: &str, json: bool) -> Result<()> {
    let link = parse(url, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&link)?);
    } else {
        display::display_link(&link);
    }
    Ok(())
}

/// Check a link's structure. Fails when the link is not well-formed.
pub fn validate(config: &DeepLinkConfig, url: &str) -> Result<()> {
    if validate_structure(url, config) {
        display::success(&format!("Valid deep link: {}", url));
        return Ok(());
    }

    // The parser is more lenient, so say whether the link would still open.
    if classify(url, config).is_some() && parse(url, config).is_ok() {
        display::warning("Not structurally valid, but the link still parses");
    }
    bail!("Invalid deep link structure: {}", url)
}
