// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deep Link Module
//!
//! Classifies, parses and dispatches CardLink deep links.
//!
//! # Supported formats
//!
//! | Kind | Pattern |
//! |---|---|
//! | Custom scheme | `cardlink://<type>/<id>[/<action>][?query]` |
//! | Universal link | `https://cardlink.app/open/<type>/<id>[?query]` |
//! | Android intent | `intent://<type>/<id>#Intent;scheme=cardlink;end` |
//!
//! # Module Structure
//!
//! - [`classify`] - Link kind detection and structural validation
//! - [`parser`] - Raw URL to [`ParsedLink`]
//! - [`sanitize`] - Denylist scrubbing of navigation parameters
//! - [`rate_limit`] - Sliding-window limiter keyed by link text
//! - [`action`] - [`ParsedLink`] to screen + parameter bag
//! - [`handler`] - The dispatcher tying the above together
//! - [`generate`] - Building shareable links

pub mod action;
pub mod analytics;
pub mod classify;
pub mod clock;
mod config;
mod error;
pub mod generate;
pub mod handler;
pub mod parser;
pub mod rate_limit;
pub mod sanitize;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use action::{NavigationAction, ParamMap, Screen};
pub use analytics::{AnalyticsEvent, AnalyticsSink, NoopAnalytics};
pub use classify::{classify, validate_structure};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DeepLinkConfig, Platform, RateLimitConfig};
pub use error::{ConfigError, DeepLinkError, NavigationError, ParseError};
pub use generate::{generate_deep_link_url, generate_universal_link_url, web_fallback_url};
pub use handler::{DeepLinkHandler, DeepLinkHandlerBuilder, HandleOptions, HandleOutcome, Navigator};
pub use parser::parse;
pub use rate_limit::RateLimiter;
pub use sanitize::{is_safe_identifier, sanitize_params, sanitize_value, MAX_PARAM_LENGTH};

/// Action used when a link does not name one.
pub const DEFAULT_ACTION: &str = "view";

/// How a link reached the app.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// `cardlink://...`
    CustomScheme,
    /// `https://cardlink.app/...`
    Universal,
    /// `intent://...#Intent;...;end`
    Intent,
}

/// Link type tag, taken from the first meaningful path segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Card,
    Profile,
    Share,
    Auth,
    Exchange,
    Event,
    Cards,
    Team,
    Unknown,
}

impl LinkType {
    /// Every type the parser can produce a record for.
    pub const NAVIGABLE: [LinkType; 8] = [
        LinkType::Card,
        LinkType::Profile,
        LinkType::Share,
        LinkType::Auth,
        LinkType::Exchange,
        LinkType::Event,
        LinkType::Cards,
        LinkType::Team,
    ];

    /// Maps a wire segment to its tag. Anything unrecognized is `Unknown`.
    pub fn from_segment(segment: &str) -> Self {
        match segment {
            "card" => LinkType::Card,
            "profile" => LinkType::Profile,
            "share" => LinkType::Share,
            "auth" => LinkType::Auth,
            "exchange" => LinkType::Exchange,
            "event" => LinkType::Event,
            "cards" => LinkType::Cards,
            "team" => LinkType::Team,
            _ => LinkType::Unknown,
        }
    }

    /// Wire name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Card => "card",
            LinkType::Profile => "profile",
            LinkType::Share => "share",
            LinkType::Auth => "auth",
            LinkType::Exchange => "exchange",
            LinkType::Event => "event",
            LinkType::Cards => "cards",
            LinkType::Team => "team",
            LinkType::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, LinkType::Unknown)
    }

    /// Parameter key under which the primary identifier travels.
    ///
    /// `None` for types whose first segment is an action instead.
    pub fn id_key(&self) -> Option<&'static str> {
        match self {
            LinkType::Card | LinkType::Share => Some("cardId"),
            LinkType::Profile => Some("userId"),
            LinkType::Exchange => Some("exchangeId"),
            LinkType::Event => Some("eventId"),
            LinkType::Team => Some("workspaceId"),
            LinkType::Auth | LinkType::Cards | LinkType::Unknown => None,
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a link points at. One variant per navigable [`LinkType`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LinkTarget {
    Card {
        #[serde(rename = "cardId", skip_serializing_if = "Option::is_none")]
        card_id: Option<String>,
    },
    Profile {
        #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
        user_id: Option<String>,
    },
    Share {
        #[serde(rename = "cardId", skip_serializing_if = "Option::is_none")]
        card_id: Option<String>,
    },
    Auth,
    Exchange {
        #[serde(rename = "exchangeId", skip_serializing_if = "Option::is_none")]
        exchange_id: Option<String>,
    },
    Event {
        #[serde(rename = "eventId", skip_serializing_if = "Option::is_none")]
        event_id: Option<String>,
    },
    /// Bulk operations over several cards (`cards/bulk?ids=a,b`).
    Cards {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        ids: Vec<String>,
    },
    Team {
        #[serde(rename = "workspaceId", skip_serializing_if = "Option::is_none")]
        workspace_id: Option<String>,
    },
}

impl LinkTarget {
    pub fn link_type(&self) -> LinkType {
        match self {
            LinkTarget::Card { .. } => LinkType::Card,
            LinkTarget::Profile { .. } => LinkType::Profile,
            LinkTarget::Share { .. } => LinkType::Share,
            LinkTarget::Auth => LinkType::Auth,
            LinkTarget::Exchange { .. } => LinkType::Exchange,
            LinkTarget::Event { .. } => LinkType::Event,
            LinkTarget::Cards { .. } => LinkType::Cards,
            LinkTarget::Team { .. } => LinkType::Team,
        }
    }

    pub fn card_id(&self) -> Option<&str> {
        match self {
            LinkTarget::Card { card_id } | LinkTarget::Share { card_id } => card_id.as_deref(),
            _ => None,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            LinkTarget::Profile { user_id } => user_id.as_deref(),
            _ => None,
        }
    }

    /// The single identifier this link is about, if any.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            LinkTarget::Card { card_id } | LinkTarget::Share { card_id } => card_id.as_deref(),
            LinkTarget::Profile { user_id } => user_id.as_deref(),
            LinkTarget::Exchange { exchange_id } => exchange_id.as_deref(),
            LinkTarget::Event { event_id } => event_id.as_deref(),
            LinkTarget::Team { workspace_id } => workspace_id.as_deref(),
            LinkTarget::Auth | LinkTarget::Cards { .. } => None,
        }
    }

    /// Every identifier carried by the target, bulk ids included.
    pub fn identifiers(&self) -> Vec<&str> {
        match self {
            LinkTarget::Cards { ids } => ids.iter().map(String::as_str).collect(),
            other => other.identifier().into_iter().collect(),
        }
    }

    /// Type-specific fields under their navigation parameter names.
    pub fn fields(&self) -> Vec<(&'static str, serde_json::Value)> {
        match self {
            LinkTarget::Cards { ids } if !ids.is_empty() => {
                vec![("ids", serde_json::Value::from(ids.clone()))]
            }
            LinkTarget::Cards { .. } | LinkTarget::Auth => Vec::new(),
            other => match (other.link_type().id_key(), other.identifier()) {
                (Some(key), Some(id)) => vec![(key, serde_json::Value::from(id))],
                _ => Vec::new(),
            },
        }
    }
}

/// A deep link broken into its parts.
///
/// Created per call and discarded after dispatch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedLink {
    /// How the link arrived.
    pub kind: LinkKind,
    /// What the link points at.
    pub target: LinkTarget,
    /// Sub-action, `"view"` unless the link overrides it.
    pub action: String,
    /// Decoded query parameters.
    pub params: BTreeMap<String, String>,
}

impl ParsedLink {
    pub fn link_type(&self) -> LinkType {
        self.target.link_type()
    }

    pub fn card_id(&self) -> Option<&str> {
        self.target.card_id()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.target.user_id()
    }

    /// Looks up a query parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}
