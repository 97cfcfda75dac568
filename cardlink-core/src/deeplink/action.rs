// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Navigation Actions
//!
//! Maps a parsed link to the screen it opens and the parameters that
//! screen receives.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{LinkType, ParsedLink};

/// Parameters handed to a screen.
pub type ParamMap = serde_json::Map<String, Value>;

/// Key removed from the flattened bag so params are never nested twice.
const NESTED_PARAMS_KEY: &str = "params";

/// Screens a deep link can open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    CardView,
    CardEdit,
    Profile,
    ShareCard,
    AuthCallback,
    BulkOperations,
    TeamCards,
    Home,
}

impl Screen {
    /// Screen for a link type and action.
    pub fn for_link(link_type: LinkType, action: &str) -> Self {
        match link_type {
            LinkType::Card if action == "edit" => Screen::CardEdit,
            LinkType::Card => Screen::CardView,
            LinkType::Profile => Screen::Profile,
            LinkType::Share => Screen::ShareCard,
            LinkType::Auth => Screen::AuthCallback,
            LinkType::Cards => Screen::BulkOperations,
            LinkType::Team => Screen::TeamCards,
            LinkType::Exchange | LinkType::Event | LinkType::Unknown => Screen::Home,
        }
    }

    /// Route name registered with the navigator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::CardView => "CardView",
            Screen::CardEdit => "CardEdit",
            Screen::Profile => "Profile",
            Screen::ShareCard => "ShareCard",
            Screen::AuthCallback => "AuthCallback",
            Screen::BulkOperations => "BulkOperations",
            Screen::TeamCards => "TeamCards",
            Screen::Home => "Home",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A screen plus the parameters to open it with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationAction {
    pub screen: Screen,
    pub params: ParamMap,
}

impl NavigationAction {
    /// Builds an action from a link type, its action, the type-specific
    /// fields and the query parameters.
    ///
    /// Fields win over query parameters of the same name.
    pub fn build<I>(
        link_type: LinkType,
        action: &str,
        fields: I,
        query: &BTreeMap<String, String>,
    ) -> Self
    where
        I: IntoIterator<Item = (&'static str, Value)>,
    {
        let mut params: ParamMap = query
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect();

        for (key, value) in fields {
            params.insert(key.to_string(), value);
        }
        params.remove(NESTED_PARAMS_KEY);

        NavigationAction {
            screen: Screen::for_link(link_type, action),
            params,
        }
    }

    pub fn for_link(link: &ParsedLink) -> Self {
        Self::build(
            link.link_type(),
            &link.action,
            link.target.fields(),
            &link.params,
        )
    }
}
