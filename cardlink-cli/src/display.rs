// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Display Helpers
//!
//! Terminal output formatting and styling.

use console::style;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use cardlink_core::{LinkKind, ParamMap, ParsedLink};

/// Prints a success message.
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Prints an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Prints a warning message.
pub fn warning(msg: &str) {
    println!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Prints an info message.
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn row(field: &str, value: impl Into<String>) -> Row {
    Row {
        field: field.to_string(),
        value: value.into(),
    }
}

fn kind_label(kind: LinkKind) -> &'static str {
    match kind {
        LinkKind::CustomScheme => "custom scheme",
        LinkKind::Universal => "universal link",
        LinkKind::Intent => "android intent",
    }
}

/// Displays a parsed link as a table.
pub fn display_link(link: &ParsedLink) {
    let mut rows = vec![
        row("kind", kind_label(link.kind)),
        row("type", link.link_type().as_str()),
        row("action", link.action.as_str()),
    ];

    let identifiers = link.target.identifiers();
    if let Some(key) = link.link_type().id_key() {
        rows.push(row(key, identifiers.first().copied().unwrap_or("-")));
    } else if !identifiers.is_empty() {
        rows.push(row("ids", identifiers.join(", ")));
    }

    for (key, value) in &link.params {
        rows.push(row(&format!("?{}", key), value.as_str()));
    }

    println!("{}", Table::new(rows).with(Style::rounded()));
}

/// Displays navigation parameters, one per line.
pub fn display_params(params: &ParamMap) {
    if params.is_empty() {
        println!("  {}", style("(no params)").dim());
        return;
    }
    for (key, value) in params {
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        println!("  {:12} {}", style(key).dim(), value);
    }
}

/// Displays a QR code in the terminal.
pub fn display_qr_code(qr: &str) {
    println!();
    println!("{}", qr);
    println!();
}
