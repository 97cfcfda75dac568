// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Common Test Utilities
//!
//! Shared navigators, analytics sinks and proptest strategies used across
//! test modules.

#![allow(dead_code)]

pub mod helpers;
pub mod strategies;
