// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deep link URL parser
//!
//! Turns a raw link into a [`ParsedLink`]. All three link shapes share the
//! same per-type identifier rules:
//!
//! | Type | First segment | Second segment |
//! |---|---|---|
//! | `card` | `cardId` | action override (`/card/123/edit`) |
//! | `share` | `cardId` | - |
//! | `profile` | `userId` | - |
//! | `exchange` / `event` / `team` | `exchangeId` / `eventId` / `workspaceId` | - |
//! | `auth` / `cards` | action | - |
//!
//! Segments after the type are percent-decoded, the same way query values
//! are, so every link shape yields the same identifiers.
//!
//! The parser is deliberately more permissive than
//! [`super::validate_structure`].

use std::collections::BTreeMap;

use percent_encoding::percent_decode_str;
use url::{form_urlencoded, Url};

use super::classify::{classify_raw, path_segments, Classified};
use super::{
    DeepLinkConfig, LinkKind, LinkTarget, LinkType, ParseError, ParsedLink, DEFAULT_ACTION,
};

/// Action of a `cards` link that operates on the `ids` list.
const BULK_ACTION: &str = "bulk";

/// Parse a deep link into its type, identifier, action and parameters.
pub fn parse(url: &str, config: &DeepLinkConfig) -> Result<ParsedLink, ParseError> {
    match classify_raw(url.trim(), config)? {
        Classified::CustomScheme(url) => parse_custom_scheme(&url),
        Classified::Universal(url) => parse_universal(&url, config),
        Classified::Intent(body) => parse_intent(body),
    }
}

/// `cardlink://<type>/<id>[/<action>][?query]`
fn parse_custom_scheme(url: &Url) -> Result<ParsedLink, ParseError> {
    let host = url.host_str().unwrap_or_default();
    let segments = path_segments(url.path());

    // `cardlink:///card/1` and `cardlink:card/1` carry the type in the path.
    let (type_segment, rest) = if host.is_empty() {
        segments.split_first().ok_or(ParseError::MissingType)?
    } else {
        (&host, segments.as_slice())
    };

    build_link(
        LinkKind::CustomScheme,
        type_segment,
        rest,
        query_params(url),
        true,
    )
}

/// `https://<domain>[/open]/<type>/<id>[?query]`
fn parse_universal(url: &Url, config: &DeepLinkConfig) -> Result<ParsedLink, ParseError> {
    let segments = path_segments(url.path());
    let segments = match segments.split_first() {
        Some((first, rest)) if *first == config.universal_prefix => rest,
        _ => segments.as_slice(),
    };
    let (type_segment, rest) = segments.split_first().ok_or(ParseError::MissingType)?;

    build_link(LinkKind::Universal, type_segment, rest, query_params(url), true)
}

/// `intent://<type>/<id>#Intent;...;end`
///
/// The `#Intent;...;end` suffix has already been dropped by the classifier.
fn parse_intent(body: &str) -> Result<ParsedLink, ParseError> {
    let (path, query) = match body.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (body, None),
    };
    let segments = path_segments(path);
    let (type_segment, rest) = segments.split_first().ok_or(ParseError::MissingType)?;

    let params: BTreeMap<String, String> = query
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();

    build_link(LinkKind::Intent, type_segment, rest, params, false)
}

fn query_params(url: &Url) -> BTreeMap<String, String> {
    url.query_pairs().into_owned().collect()
}

/// Applies the per-type identifier rules to the segments after the type.
fn build_link(
    kind: LinkKind,
    type_segment: &str,
    rest: &[&str],
    params: BTreeMap<String, String>,
    allow_action: bool,
) -> Result<ParsedLink, ParseError> {
    let rest: Vec<String> = rest.iter().map(|s| decode_segment(s)).collect();
    let first = rest.first().cloned();
    let mut action = DEFAULT_ACTION.to_string();

    let target = match LinkType::from_segment(type_segment) {
        LinkType::Card => {
            if let (true, Some(segment)) = (allow_action, rest.get(1)) {
                action = segment.to_string();
            }
            LinkTarget::Card { card_id: first }
        }
        LinkType::Share => LinkTarget::Share { card_id: first },
        LinkType::Profile => LinkTarget::Profile { user_id: first },
        LinkType::Exchange => LinkTarget::Exchange { exchange_id: first },
        LinkType::Event => LinkTarget::Event { event_id: first },
        LinkType::Team => LinkTarget::Team {
            workspace_id: first,
        },
        LinkType::Auth => {
            if let (true, Some(segment)) = (allow_action, first) {
                action = segment;
            }
            LinkTarget::Auth
        }
        LinkType::Cards => {
            if let (true, Some(segment)) = (allow_action, first) {
                action = segment;
            }
            let ids = match params.get("ids") {
                Some(ids) if action == BULK_ACTION => split_ids(ids),
                _ => Vec::new(),
            };
            LinkTarget::Cards { ids }
        }
        LinkType::Unknown => return Err(ParseError::UnsupportedType(type_segment.to_string())),
    };

    Ok(ParsedLink {
        kind,
        target,
        action,
        params,
    })
}

fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

fn split_ids(ids: &str) -> Vec<String> {
    ids.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ids_drops_empty_pieces() {
        assert_eq!(split_ids("a, b,,c,"), vec!["a", "b", "c"]);
        assert!(split_ids("").is_empty());
    }

    #[test]
    fn test_path_segments_are_decoded() {
        assert_eq!(decode_segment("John%20Doe"), "John Doe");
        assert_eq!(decode_segment("caf%C3%A9"), "café");
        assert_eq!(decode_segment("a+b"), "a+b");
        assert_eq!(decode_segment("%FF"), "\u{FFFD}");
    }

    #[test]
    fn test_intent_action_is_never_overridden() {
        let link = parse_intent("card/abc/edit").unwrap();
        assert_eq!(link.action, DEFAULT_ACTION);
        assert_eq!(link.card_id(), Some("abc"));
    }

    #[test]
    fn test_custom_scheme_without_authority() {
        let config = DeepLinkConfig::default();
        let link = parse("cardlink:///card/abc", &config).unwrap();
        assert_eq!(link.card_id(), Some("abc"));
    }
}
