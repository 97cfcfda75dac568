// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Card Sharing
//!
//! Share links for a card's share code, and QR renderings of any link so
//! it can be scanned from another device.

use std::collections::BTreeMap;

use qrcode::render::svg;
use qrcode::QrCode;
use thiserror::Error;

use crate::deeplink::{generate_universal_link_url, DeepLinkConfig, LinkType};

/// Share errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    #[error("failed to encode QR code: {0}")]
    QrEncoding(String),
}

/// Universal share link for a card's share code, e.g.
/// `https://cardlink.app/open/share/<code>`.
pub fn share_link(config: &DeepLinkConfig, share_code: &str) -> String {
    let mut params = BTreeMap::new();
    params.insert("cardId".to_string(), share_code.to_string());
    generate_universal_link_url(config, LinkType::Share, &params)
}

fn encode(data: &str) -> Result<QrCode, ShareError> {
    QrCode::new(data.as_bytes()).map_err(|e| ShareError::QrEncoding(e.to_string()))
}

/// Renders `data` as a QR code made of block characters, one string row per
/// module row.
pub fn render_qr(data: &str) -> Result<String, ShareError> {
    let code = encode(data)?;

    Ok(code
        .render()
        .light_color(' ')
        .dark_color('█')
        .quiet_zone(false)
        .build())
}

/// Renders `data` as a standalone SVG document.
pub fn render_qr_svg(data: &str) -> Result<String, ShareError> {
    let code = encode(data)?;

    Ok(code
        .render()
        .min_dimensions(200, 200)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build())
}
