// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! CardLink CLI
//!
//! Command-line interface for inspecting, dispatching and generating
//! CardLink deep links.

mod commands;
mod config;
mod display;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use tracing_subscriber::EnvFilter;

use cardlink_core::Platform;
use config::CliConfig;

#[derive(Parser)]
#[command(name = "cardlink")]
#[command(version, about = "Deep link tool for CardLink business cards")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file
    #[arg(long, global = true, env = "CARDLINK_CONFIG")]
    config: Option<PathBuf>,

    /// Custom URL scheme (default: cardlink)
    #[arg(long, global = true, env = "CARDLINK_SCHEME")]
    scheme: Option<String>,

    /// Web domain for universal links (default: cardlink.app)
    #[arg(long, global = true, env = "CARDLINK_DOMAIN")]
    domain: Option<String>,

    /// Platform to simulate when opening links
    #[arg(long, global = true, value_enum)]
    platform: Option<PlatformArg>,

    /// Reject identifiers outside [A-Za-z0-9_-]
    #[arg(long, global = true)]
    strict: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum PlatformArg {
    Ios,
    Android,
    Web,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Ios => Platform::Ios,
            PlatformArg::Android => Platform::Android,
            PlatformArg::Web => Platform::Web,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a link and show its parts
    Parse {
        /// Link to parse
        url: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a link's structure strictly
    Validate {
        /// Link to check
        url: String,
    },

    /// Dispatch a link and show the resulting navigation
    Open {
        /// Link to open
        url: String,

        /// Signed-in user
        #[arg(long)]
        user: Option<String>,

        /// Open the web fallback in the system browser
        #[arg(long)]
        browser: bool,
    },

    /// Generate a link
    Generate {
        /// Link type (card, profile, share, auth, exchange, event, cards, team)
        #[arg(value_name = "TYPE")]
        link_type: String,

        /// Parameters as key=value (e.g. cardId=abc123 source=qr)
        params: Vec<String>,

        /// Generate a universal (https) link instead of a custom-scheme link
        #[arg(long)]
        universal: bool,

        /// Also print a QR code
        #[arg(long)]
        qr: bool,
    },

    /// Print the share link for a card's share code
    Share {
        /// Share code
        code: String,

        /// Also print a QR code
        #[arg(long)]
        qr: bool,
    },

    /// Render text as a QR code
    Qr {
        /// Text or link to encode
        data: String,

        /// Print an SVG document instead
        #[arg(long)]
        svg: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let directive = format!("cardlink={}", level);

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = directive.parse() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = CliConfig {
        config_file: cli.config,
        scheme: cli.scheme,
        domain: cli.domain,
        platform: cli.platform.map(Platform::from),
        strict: cli.strict,
    };

    match cli.command {
        Commands::Parse { url, json } => {
            commands::inspect::parse_link(&config.link_config()?, &url, json)?;
        }
        Commands::Validate { url } => {
            commands::inspect::validate(&config.link_config()?, &url)?;
        }
        Commands::Open { url, user, browser } => {
            commands::open::open_link(config.link_config()?, &url, user, browser)?;
        }
        Commands::Generate {
            link_type,
            params,
            universal,
            qr,
        } => {
            commands::generate::generate(
                &config.link_config()?,
                &link_type,
                &params,
                universal,
                qr,
            )?;
        }
        Commands::Share { code, qr } => {
            commands::generate::share(&config.link_config()?, &code, qr)?;
        }
        Commands::Qr { data, svg } => {
            commands::generate::qr(&data, svg)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "cardlink", &mut io::stdout());
        }
    }

    Ok(())
}
