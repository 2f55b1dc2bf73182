//! Command-line front end standing in for the chat command handler.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use statscout::{Embed, LookupRequest, PlatformId, ProfileLookup, Settings};

#[derive(Parser)]
#[command(name = "statscout")]
#[command(about = "Look up Xbox and TikTok profile stats")]
#[command(version)]
pub struct Cli {
    /// Config file path (defaults to ./statscout.toml if present)
    #[arg(short, long, env = "STATSCOUT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the embed as Discord JSON instead of text
    #[arg(long)]
    json: bool,

    /// Platform to look the profile up on
    #[arg(value_enum)]
    platform: PlatformId,

    /// Username, gamertag or @handle
    identifier: String,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

/// Parse arguments and run one lookup.
///
/// Returns `Ok(false)` when the lookup failed; the user-facing message has
/// already been printed.
pub async fn run() -> anyhow::Result<bool> {
    let cli = Cli::parse();

    let settings = Settings::discover(cli.config.as_deref()).context("Failed to load settings")?;
    let color = settings.embed_color()?;
    debug!("Loaded settings: {:?}", settings);

    let fetcher = settings
        .http
        .fetcher_builder()
        .build()
        .context("Failed to create HTTP client")?;
    let lookup = ProfileLookup::with_identity(fetcher, settings.http.identity_policy());

    let request = LookupRequest::new(cli.platform, cli.identifier);
    let (embed, ok) = match lookup.lookup(&request).await {
        Ok(profile) => (Embed::from_profile(&profile, color), true),
        Err(err) => (Embed::from_error(&err, request.platform, color), false),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&embed)?);
    } else if ok {
        print!("{}", embed);
    } else {
        eprint!("{}", embed);
    }

    Ok(ok)
}
