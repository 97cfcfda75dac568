// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! CardLink Core Library
//!
//! Deep link parsing, validation and dispatch for the CardLink business
//! card app, plus share link and QR generation.

pub mod deeplink;
pub mod share;

pub use deeplink::{
    classify, generate_deep_link_url, generate_universal_link_url, parse, sanitize_params,
    validate_structure, web_fallback_url, AnalyticsEvent, AnalyticsSink, ConfigError,
    DeepLinkConfig, DeepLinkError, DeepLinkHandler, HandleOptions, HandleOutcome, LinkKind,
    LinkTarget, LinkType, NavigationAction, NavigationError, Navigator, ParamMap, ParseError,
    ParsedLink, Platform, RateLimitConfig, RateLimiter, Screen,
};
pub use share::{render_qr, render_qr_svg, share_link, ShareError};
