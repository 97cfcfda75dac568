// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Link Generation and Sharing Commands

use std::collections::BTreeMap;

use anyhow::{anyhow, bail, Result};
use cardlink_core::{
    generate_deep_link_url, generate_universal_link_url, render_qr, render_qr_svg, share_link,
    DeepLinkConfig, LinkType,
};

use crate::display;

/// Parses `key=value` arguments into a parameter map.
fn parse_params(pairs: &[String]) -> Result<BTreeMap<String, String>> {
    pairs
        .iter()
        .map(|pair| {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| anyhow!("Expected key=value, got '{}'", pair))?;
            if key.is_empty() {
                bail!("Empty parameter name in '{}'", pair);
            }
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Generate a link for a type and parameters.
pub fn generate(
    config: &DeepLinkConfig,
    link_type: &str,
    params: &[String],
    universal: bool,
    qr: bool,
) -> Result<()> {
    let link_type = LinkType::from_segment(link_type);
    if !link_type.is_known() {
        bail!(
            "Unknown link type. Expected one of: {}",
            LinkType::NAVIGABLE
                .iter()
                .map(LinkType::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    let params = parse_params(params)?;

    let url = if universal {
        generate_universal_link_url(config, link_type, &params)
    } else {
        generate_deep_link_url(config, link_type, &params)
    };

    println!("{}", url);
    if qr {
        display::display_qr_code(&render_qr(&url)?);
    }
    Ok(())
}

/// Print the share link for a card's share code.
pub fn share(config: &DeepLinkConfig, share_code: &str, qr: bool) -> Result<()> {
    let url = share_link(config, share_code);

    println!("{}", url);
    if qr {
        display::display_qr_code(&render_qr(&url)?);
    }
    Ok(())
}

/// Render any text as a QR code.
pub fn qr(data: &str, svg: bool) -> Result<()> {
    if svg {
        println!("{}", render_qr_svg(data)?);
    } else {
        display::display_qr_code(&render_qr(data)?);
    }
    Ok(())
}
