// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Link Generation
//!
//! Builds shareable links from a type and a parameter bag, the inverse of
//! the parser's identifier extraction. Inputs are not validated.

use std::collections::BTreeMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::form_urlencoded;

use super::classify::{classify_raw, Classified};
use super::{DeepLinkConfig, LinkType, DEFAULT_ACTION};

/// Characters escaped inside a path segment. `%` is included so decoding
/// gives back the original text.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Custom-scheme link, e.g. `cardlink://card/abc123?source=qr`.
pub fn generate_deep_link_url(
    config: &DeepLinkConfig,
    link_type: LinkType,
    params: &BTreeMap<String, String>,
) -> String {
    format!("{}://{}", config.scheme, link_path(link_type, params))
}

/// Universal link, e.g. `https://cardlink.app/open/card/abc123?source=qr`.
pub fn generate_universal_link_url(
    config: &DeepLinkConfig,
    link_type: LinkType,
    params: &BTreeMap<String, String>,
) -> String {
    format!("{}/{}", config.universal_base(), link_path(link_type, params))
}

/// Web URL to open when the platform cannot handle a deep link in-app.
///
/// Custom-scheme and intent links are rewritten onto the universal link
/// base, universal links are returned as they are, anything else falls
/// back to the site root.
pub fn web_fallback_url(url: &str, config: &DeepLinkConfig) -> String {
    let url = url.trim();
    match classify_raw(url, config) {
        Ok(Classified::Universal(_)) => url.to_string(),
        Ok(Classified::Intent(body)) => join(&config.universal_base(), body),
        Ok(Classified::CustomScheme(_)) => {
            let rest = url
                .split_once(':')
                .map(|(_, rest)| rest.trim_start_matches('/'))
                .unwrap_or_default();
            join(&config.universal_base(), rest)
        }
        Err(_) => format!("https://{}", config.domain),
    }
}

fn join(base: &str, rest: &str) -> String {
    let rest = rest.trim_start_matches('/');
    if rest.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base.trim_end_matches('/'), rest)
    }
}

/// `<type>[/<id>][/<action>][?query]`
fn link_path(link_type: LinkType, params: &BTreeMap<String, String>) -> String {
    let mut remaining = params.clone();
    let mut path = link_type.as_str().to_string();

    let segment_key = match link_type {
        LinkType::Auth | LinkType::Cards => Some("action"),
        other => other.id_key(),
    };
    if let Some(segment) = segment_key.and_then(|key| remaining.remove(key)) {
        push_segment(&mut path, &segment);
    }

    if link_type == LinkType::Card {
        if let Some(action) = remaining.remove("action") {
            if action != DEFAULT_ACTION {
                push_segment(&mut path, &action);
            }
        }
    }

    if !remaining.is_empty() {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(remaining.iter())
            .finish();
        path.push('?');
        path.push_str(&query);
    }

    path
}

fn push_segment(path: &mut String, segment: &str) {
    path.push('/');
    path.extend(utf8_percent_encode(segment, SEGMENT));
}
