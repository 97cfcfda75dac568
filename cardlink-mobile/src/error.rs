// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mobile-friendly error types.

use cardlink_core::{ConfigError, ParseError, ShareError};

/// Mobile-friendly error type.
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MobileError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid link: {0}")]
    InvalidLink(String),

    #[error("QR code error: {0}")]
    QrCode(String),
}

impl From<ConfigError> for MobileError {
    fn from(err: ConfigError) -> Self {
        MobileError::InvalidConfig(err.to_string())
    }
}

impl From<ParseError> for MobileError {
    fn from(err: ParseError) -> Self {
        MobileError::InvalidLink(err.to_string())
    }
}

impl From<ShareError> for MobileError {
    fn from(err: ShareError) -> Self {
        MobileError::QrCode(err.to_string())
    }
}
