// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parser Tests
//!
//! Per-type identifier rules across the three link formats.

use cardlink_core::deeplink::{parse, DeepLinkConfig, LinkKind, LinkTarget, LinkType, ParseError};

fn config() -> DeepLinkConfig {
    DeepLinkConfig::default()
}

// ============================================================
// Custom Scheme
// ============================================================

#[test]
fn test_card_link_parses_with_default_action() {
    let link = parse("cardlink://card/abc123", &config()).unwrap();

    assert_eq!(link.kind, LinkKind::CustomScheme);
    assert_eq!(link.link_type(), LinkType::Card);
    assert_eq!(link.card_id(), Some("abc123"));
    assert_eq!(link.action, "view");
    assert!(link.params.is_empty());
}

#[test]
fn test_card_second_segment_is_action() {
    let link = parse("cardlink://card/123/edit", &config()).unwrap();
    assert_eq!(link.card_id(), Some("123"));
    assert_eq!(link.action, "edit");
}

#[test]
fn test_profile_link_carries_user_id() {
    let link = parse("cardlink://profile/user-9", &config()).unwrap();
    assert_eq!(
        link.target,
        LinkTarget::Profile {
            user_id: Some("user-9".to_string())
        }
    );
    assert_eq!(link.user_id(), Some("user-9"));
    assert_eq!(link.card_id(), None);
}

#[test]
fn test_share_link_carries_card_id() {
    let link = parse("cardlink://share/XyZ", &config()).unwrap();
    assert_eq!(link.link_type(), LinkType::Share);
    assert_eq!(link.card_id(), Some("XyZ"));
}

#[test]
fn test_exchange_event_team_identifiers() {
    let exchange = parse("cardlink://exchange/ex1", &config()).unwrap();
    assert_eq!(exchange.target.identifier(), Some("ex1"));
    assert_eq!(exchange.link_type(), LinkType::Exchange);

    let event = parse("cardlink://event/conf-2026", &config()).unwrap();
    assert_eq!(
        event.target,
        LinkTarget::Event {
            event_id: Some("conf-2026".to_string())
        }
    );

    let team = parse("cardlink://team/ws_42", &config()).unwrap();
    assert_eq!(
        team.target,
        LinkTarget::Team {
            workspace_id: Some("ws_42".to_string())
        }
    );
}

#[test]
fn test_auth_first_segment_is_action() {
    let link = parse("cardlink://auth/callback?code=xyz", &config()).unwrap();
    assert_eq!(link.target, LinkTarget::Auth);
    assert_eq!(link.action, "callback");
    assert_eq!(link.param("code"), Some("xyz"));
}

#[test]
fn test_bulk_ids_are_split() {
    let link = parse("cardlink://cards/bulk?ids=a,b,c", &config()).unwrap();
    assert_eq!(link.action, "bulk");
    assert_eq!(
        link.target,
        LinkTarget::Cards {
            ids: vec!["a".to_string(), "b".to_string(), "c".to_string()]
        }
    );
    // The raw value stays in the query bag.
    assert_eq!(link.param("ids"), Some("a,b,c"));
}

#[test]
fn test_ids_ignored_without_bulk_action() {
    let link = parse("cardlink://cards/list?ids=a,b", &config()).unwrap();
    assert_eq!(link.target, LinkTarget::Cards { ids: Vec::new() });
}

#[test]
fn test_query_params_are_decoded() {
    let link = parse(
        "cardlink://card/abc?source=qr&campaign=spring%20launch&expires=1999999999",
        &config(),
    )
    .unwrap();
    assert_eq!(link.param("source"), Some("qr"));
    assert_eq!(link.param("campaign"), Some("spring launch"));
    assert_eq!(link.param("expires"), Some("1999999999"));
}

#[test]
fn test_missing_identifier_is_allowed() {
    let link = parse("cardlink://card", &config()).unwrap();
    assert_eq!(link.card_id(), None);
}

#[test]
fn test_scheme_is_configurable() {
    let config = DeepLinkConfig::default().with_scheme("bizcard");
    assert!(parse("bizcard://card/1", &config).is_ok());
    assert_eq!(
        parse("cardlink://card/1", &config),
        Err(ParseError::NotADeepLink)
    );
}

// ============================================================
// Universal Links
// ============================================================

#[test]
fn test_universal_link_with_prefix() {
    let link = parse("https://cardlink.app/open/card/abc123", &config()).unwrap();
    assert_eq!(link.kind, LinkKind::Universal);
    assert_eq!(link.card_id(), Some("abc123"));
    assert_eq!(link.action, "view");
}

#[test]
fn test_universal_link_without_prefix_is_parsed() {
    let link = parse("https://cardlink.app/card/123", &config()).unwrap();
    assert_eq!(link.card_id(), Some("123"));
}

#[test]
fn test_universal_link_on_www_host() {
    let link = parse("https://www.cardlink.app/open/profile/u1?source=web", &config()).unwrap();
    assert_eq!(link.user_id(), Some("u1"));
    assert_eq!(link.param("source"), Some("web"));
}

#[test]
fn test_universal_link_on_other_host_is_rejected() {
    assert_eq!(
        parse("https://example.com/open/card/1", &config()),
        Err(ParseError::NotADeepLink)
    );
}

#[test]
fn test_plain_http_is_rejected() {
    assert_eq!(
        parse("http://cardlink.app/open/card/1", &config()),
        Err(ParseError::NotADeepLink)
    );
}

#[test]
fn test_universal_root_has_no_type() {
    assert_eq!(
        parse("https://cardlink.app/open", &config()),
        Err(ParseError::MissingType)
    );
}

// ============================================================
// Android Intents
// ============================================================

#[test]
fn test_intent_link() {
    let link = parse("intent://card/abc123#Intent;scheme=cardlink;end", &config()).unwrap();
    assert_eq!(link.kind, LinkKind::Intent);
    assert_eq!(link.card_id(), Some("abc123"));
    assert_eq!(link.action, "view");
}

#[test]
fn test_intent_query_is_kept() {
    let link = parse(
        "intent://share/abc?source=nfc#Intent;scheme=cardlink;package=app.cardlink;end",
        &config(),
    )
    .unwrap();
    assert_eq!(link.link_type(), LinkType::Share);
    assert_eq!(link.param("source"), Some("nfc"));
}

#[test]
fn test_intent_without_type() {
    assert_eq!(
        parse("intent://#Intent;end", &config()),
        Err(ParseError::MissingType)
    );
}

// ============================================================
// Rejections
// ============================================================

#[test]
fn test_unknown_type_is_unsupported() {
    assert_eq!(
        parse("cardlink://unknowntype/123", &config()),
        Err(ParseError::UnsupportedType("unknowntype".to_string()))
    );
}

// ============================================================
// Percent-Encoding
// ============================================================

#[test]
fn test_path_and_query_are_decoded_alike() {
    let link = parse("cardlink://card/caf%C3%A9?n=caf%C3%A9", &config()).unwrap();
    assert_eq!(link.card_id(), Some("café"));
    assert_eq!(link.param("n"), Some("café"));
}

#[test]
fn test_non_ascii_identifier_agrees_across_formats() {
    let custom = parse("cardlink://card/café", &config()).unwrap();
    let universal = parse("https://cardlink.app/open/card/café", &config()).unwrap();
    let intent = parse("intent://card/café#Intent;scheme=cardlink;end", &config()).unwrap();

    assert_eq!(custom.card_id(), Some("café"));
    assert_eq!(custom.target, universal.target);
    assert_eq!(custom.target, intent.target);
}

#[test]
fn test_encoded_space_is_decoded() {
    let link = parse("https://cardlink.app/open/profile/John%20Doe", &config()).unwrap();
    assert_eq!(link.user_id(), Some("John Doe"));
}

#[test]
fn test_garbage_is_not_a_deep_link() {
    assert_eq!(
        parse("not-a-valid-url", &config()),
        Err(ParseError::NotADeepLink)
    );
    assert_eq!(parse("", &config()), Err(ParseError::NotADeepLink));
    assert_eq!(
        parse("mailto:someone@example.com", &config()),
        Err(ParseError::NotADeepLink)
    );
}

#[test]
fn test_parsed_link_serializes_camel_case() {
    let link = parse("cardlink://card/abc?source=qr", &config()).unwrap();
    let json = serde_json::to_value(&link).unwrap();

    assert_eq!(json["kind"], "custom_scheme");
    assert_eq!(json["target"]["type"], "card");
    assert_eq!(json["target"]["cardId"], "abc");
    assert_eq!(json["action"], "view");
    assert_eq!(json["params"]["source"], "qr");
}
