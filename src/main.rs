//! Sievr CLI application entry point
//!
//! Command-line front end to the listing engine: renders pages of a JSON
//! dataset under a remembered query and exposes the query codec directly.
//!
//! # Usage
//!
//! ```bash
//! # First page with the remembered (or default) filters
//! sievr view posts.json
//!
//! # Toggle a tag and sort by date, oldest first
//! sievr view posts.json -t rust --sort date#ascending
//!
//! # Work with query strings directly
//! sievr encode --query "ref=home" 'tags=["rust","cli"]' page=2
//! sievr decode "?sort=~date-ascending~&page=2"
//!
//! # Page-number window for 20 results, 6 per page, on page 3
//! sievr window 20 -p 3
//!
//! # Remembered queries
//! sievr memory ls
//! ```
//!
//! # Configuration
//!
//! Settings are read from the user's config directory
//! (`~/.config/sievr/config.toml` on Linux); every setting has a default.
//! Logging is controlled with `SIEVR_LOG` (e.g. `SIEVR_LOG=sievr=trace`).

use sievr::{
    SievrError,
    cli::{Cli, Commands},
    commands,
    config::ListingConfig,
};
use std::env;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

type Result<T> = std::result::Result<T, SievrError>;

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("SIEVR_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "sievr=debug,warn"
        } else {
            "sievr=warn"
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> Result<ListingConfig> {
    let config = match &cli.config {
        Some(path) => ListingConfig::load_from(path)?,
        None => ListingConfig::load()?,
    };
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;
    let (json, quiet) = (cli.json, cli.quiet);

    match &cli.command {
        Commands::View(args) => commands::view(args, &config, json, quiet)?,
        Commands::Encode { query, pairs } => commands::encode(query, pairs, json)?,
        Commands::Decode { query, keys } => commands::decode(query, keys, json, quiet)?,
        Commands::Tags { data, max } => commands::tags(data, *max, &config, json, quiet)?,
        Commands::Window {
            total,
            page,
            page_size,
            window,
        } => commands::window(*total, *page, *page_size, *window, &config, json, quiet)?,
        Commands::Memory { command } => commands::memory(command, json, quiet)?,
    }

    Ok(())
}
