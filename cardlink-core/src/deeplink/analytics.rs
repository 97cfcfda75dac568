// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Analytics Events
//!
//! Events the dispatcher emits at its decision points, and the sink trait
//! hosts implement to receive them.

use serde_json::Value;

use super::{LinkType, ParamMap};

/// Events emitted while handling deep links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsEvent {
    /// A link was dispatched to a screen.
    DeepLinkOpened {
        link_type: LinkType,
        /// Primary identifier of the link, if it has one.
        identifier: Option<String>,
        /// `source` query parameter.
        source: Option<String>,
        /// `campaign` query parameter.
        campaign: Option<String>,
        /// Unix millis.
        timestamp: u64,
    },

    /// A link could not be dispatched.
    DeepLinkFailed {
        url: String,
        reason: String,
        /// Unix millis.
        timestamp: u64,
    },

    /// A link asked for conversion tracking (`track_conversion=true`).
    ConversionStart {
        link_type: LinkType,
        identifier: Option<String>,
        campaign: Option<String>,
        /// Unix millis.
        timestamp: u64,
    },
}

impl AnalyticsEvent {
    /// Event name as reported to the analytics backend.
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::DeepLinkOpened { .. } => "deep_link_opened",
            AnalyticsEvent::DeepLinkFailed { .. } => "deep_link_failed",
            AnalyticsEvent::ConversionStart { .. } => "conversion_start",
        }
    }

    /// Event properties as a JSON object. Absent values are `null`.
    pub fn payload(&self) -> ParamMap {
        let mut payload = ParamMap::new();
        match self {
            AnalyticsEvent::DeepLinkOpened {
                link_type,
                identifier,
                source,
                campaign,
                timestamp,
            } => {
                payload.insert("type".into(), Value::from(link_type.as_str()));
                payload.insert("identifier".into(), Value::from(identifier.clone()));
                payload.insert("source".into(), Value::from(source.clone()));
                payload.insert("campaign".into(), Value::from(campaign.clone()));
                payload.insert("timestamp".into(), Value::from(*timestamp));
            }
            AnalyticsEvent::DeepLinkFailed {
                url,
                reason,
                timestamp,
            } => {
                payload.insert("url".into(), Value::from(url.as_str()));
                payload.insert("error".into(), Value::from(reason.as_str()));
                payload.insert("timestamp".into(), Value::from(*timestamp));
            }
            AnalyticsEvent::ConversionStart {
                link_type,
                identifier,
                campaign,
                timestamp,
            } => {
                payload.insert("type".into(), Value::from(link_type.as_str()));
                payload.insert("identifier".into(), Value::from(identifier.clone()));
                payload.insert("campaign".into(), Value::from(campaign.clone()));
                payload.insert("timestamp".into(), Value::from(*timestamp));
            }
        }
        payload
    }
}

/// Receives analytics events. Calls are fire-and-forget.
pub trait AnalyticsSink: Send + Sync {
    fn track(&self, event: &AnalyticsEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAnalytics;

impl AnalyticsSink for NoopAnalytics {
    fn track(&self, _event: &AnalyticsEvent) {}
}
