// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Link Classification
//!
//! Decides which of the three link shapes a string is, and offers a
//! structural validator that is stricter than the parser.

use url::Url;

use super::{DeepLinkConfig, LinkKind, LinkType, ParseError};

pub(crate) const INTENT_PREFIX: &str = "intent://";

/// A classified link, keeping whatever the classifier had to parse.
pub(crate) enum Classified<'a> {
    /// Body of an intent link: the part between `intent://` and `#`.
    Intent(&'a str),
    CustomScheme(Url),
    Universal(Url),
}

impl Classified<'_> {
    pub(crate) fn kind(&self) -> LinkKind {
        match self {
            Classified::Intent(_) => LinkKind::Intent,
            Classified::CustomScheme(_) => LinkKind::CustomScheme,
            Classified::Universal(_) => LinkKind::Universal,
        }
    }
}

pub(crate) fn classify_raw<'a>(
    raw: &'a str,
    config: &DeepLinkConfig,
) -> Result<Classified<'a>, ParseError> {
    if let Some(rest) = raw.strip_prefix(INTENT_PREFIX) {
        let body = rest.split('#').next().unwrap_or_default();
        return Ok(Classified::Intent(body));
    }

    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(e) if has_scheme(raw, &config.scheme) => {
            return Err(ParseError::InvalidUrl(e.to_string()));
        }
        Err(_) => return Err(ParseError::NotADeepLink),
    };

    if url.scheme().eq_ignore_ascii_case(&config.scheme) {
        return Ok(Classified::CustomScheme(url));
    }

    if url.scheme() == "https" && is_canonical_host(url.host_str(), &config.domain) {
        return Ok(Classified::Universal(url));
    }

    Err(ParseError::NotADeepLink)
}

fn has_scheme(raw: &str, scheme: &str) -> bool {
    raw.split_once(':')
        .is_some_and(|(head, _)| head.eq_ignore_ascii_case(scheme))
}

fn is_canonical_host(host: Option<&str>, domain: &str) -> bool {
    let Some(host) = host else {
        return false;
    };
    let host = host.strip_prefix("www.").unwrap_or(host);
    host.eq_ignore_ascii_case(domain)
}

/// Non-empty `/`-separated segments of a path.
pub(crate) fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Returns the kind of deep link, or `None` if the string is not one.
pub fn classify(url: &str, config: &DeepLinkConfig) -> Option<LinkKind> {
    classify_raw(url.trim(), config).ok().map(|c| c.kind())
}

/// Strict shape check, independent of parsing.
///
/// - custom scheme: the host is a known type and the path is not empty
/// - universal: exactly `/<prefix>/<type>/<id>`
/// - intent: `<known type>/<id>` before the `#`
///
/// The parser accepts more than this (e.g. universal links without the
/// prefix), so callers that need strict input must call this first.
pub fn validate_structure(url: &str, config: &DeepLinkConfig) -> bool {
    match classify_raw(url.trim(), config) {
        Ok(Classified::CustomScheme(url)) => {
            let host = url.host_str().unwrap_or_default();
            LinkType::from_segment(host).is_known() && url.path().len() > 1
        }
        Ok(Classified::Universal(url)) => {
            let segments = path_segments(url.path());
            segments.len() == 3 && segments[0] == config.universal_prefix
        }
        Ok(Classified::Intent(body)) => {
            let path = body.split('?').next().unwrap_or_default();
            let segments = path_segments(path);
            segments.len() >= 2 && LinkType::from_segment(segments[0]).is_known()
        }
        Err(_) => false,
    }
}
