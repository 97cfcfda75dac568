// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Proptest Strategies
//!
//! Reusable proptest strategies for property-based testing.

use proptest::prelude::*;

use cardlink_core::deeplink::LinkType;

/// Any printable identifier, including characters that are URL syntax.
///
/// `.` and `..` are excluded: URL parsers resolve them as dot segments.
pub fn identifier_strategy() -> impl Strategy<Value = String> {
    "\\PC{1,24}".prop_filter("dot segments", |id| id != "." && id != "..")
}

/// Identifiers that can be written into any link form without escaping,
/// non-ASCII letters included.
pub fn raw_identifier_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9éüß日本_~-]{1,24}"
}

/// Query keys that carry no special meaning.
pub fn query_key_strategy() -> impl Strategy<Value = String> {
    "x[a-z]{1,8}"
}

/// Arbitrary printable query values, including characters that need
/// percent-encoding.
pub fn query_value_strategy() -> impl Strategy<Value = String> {
    "[ -~]{0,24}"
}

/// Link types whose first segment is an identifier.
pub fn identified_type_strategy() -> impl Strategy<Value = LinkType> {
    prop::sample::select(vec![
        LinkType::Card,
        LinkType::Profile,
        LinkType::Share,
        LinkType::Exchange,
        LinkType::Event,
        LinkType::Team,
    ])
}
