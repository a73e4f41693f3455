//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for sievr using the `clap` crate.
//!
//! # Commands
//!
//! - **view**: render one page of a JSON dataset, applying filter changes
//! - **encode** / **decode**: work with query strings directly
//! - **tags**: ranked tag census of a dataset
//! - **window**: page-number window for a result count
//! - **memory**: inspect and edit remembered queries
//!
//! Global flags: `--json` for machine-readable output, `--quiet` for bare
//! results, `--verbose` for debug logging, `--config` for an alternate
//! config file.

use crate::listing::SortSpec;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "sievr")]
#[command(about = "Filter, sort and paginate tagged listings through query strings", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Use this config file instead of the default one
    #[arg(short = 'c', long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Emit JSON instead of human-readable output
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show one page of a dataset, optionally changing the filters first
    #[command(visible_alias = "v")]
    View(ViewArgs),

    /// Merge values into a query string
    #[command(visible_alias = "e")]
    Encode {
        /// Existing query string to merge into
        #[arg(long = "query", value_name = "QUERY", default_value = "")]
        query: String,

        /// Values to set; VALUE is JSON, anything else is taken as a string
        #[arg(value_name = "KEY=VALUE", required = true)]
        pairs: Vec<String>,
    },

    /// Decode values from a query string
    #[command(visible_alias = "d")]
    Decode {
        /// Query string, with or without a leading '?'
        #[arg(value_name = "QUERY")]
        query: String,

        /// Keys to decode (default: sort, page, search, tags)
        #[arg(short = 'k', long = "key", value_name = "KEY", num_args = 1..)]
        keys: Vec<String>,
    },

    /// List a dataset's tags, most used first
    Tags {
        /// JSON file holding an array of items
        #[arg(value_name = "FILE")]
        data: PathBuf,

        /// Show at most this many tags (default: from config, 0 for all)
        #[arg(short = 'm', long = "max", value_name = "N")]
        max: Option<usize>,
    },

    /// Compute the page-number window for a result count
    #[command(visible_alias = "w")]
    Window {
        /// Number of items after filtering
        #[arg(value_name = "TOTAL")]
        total: u64,

        /// Current page
        #[arg(short = 'p', long = "page", default_value_t = 1)]
        page: u64,

        /// Items per page (default: from config)
        #[arg(long = "page-size", value_name = "N")]
        page_size: Option<u64>,

        /// Page buttons shown at once (default: from config)
        #[arg(long = "window", value_name = "N")]
        window: Option<u64>,
    },

    /// Remembered queries
    #[command(visible_alias = "m")]
    Memory {
        #[command(subcommand)]
        command: MemoryCommands,
    },
}

/// Arguments of the view command
#[derive(clap::Args, Debug, Clone)]
pub struct ViewArgs {
    /// JSON file holding an array of items
    #[arg(value_name = "FILE")]
    pub data: PathBuf,

    /// Route identifier the query is remembered under
    #[arg(short = 'r', long = "route", default_value = "/blog")]
    pub route: String,

    /// Query string currently in the address bar
    #[arg(long = "query", value_name = "QUERY", default_value = "")]
    pub query: String,

    /// Toggle a tag on or off (can be repeated)
    #[arg(short = 't', long = "tag", value_name = "TAG")]
    pub toggle: Vec<String>,

    /// Deactivate all tags before toggling
    #[arg(long = "clear-tags")]
    pub clear_tags: bool,

    /// Set the search text
    #[arg(short = 's', long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Set the sort, e.g. date#ascending
    #[arg(long = "sort", value_name = "KEY#DIRECTION")]
    pub sort: Option<SortSpec>,

    /// Go to a page
    #[arg(short = 'p', long = "page")]
    pub page: Option<u64>,

    /// Keep queries in memory for this run only
    #[arg(long = "no-memory")]
    pub no_memory: bool,
}

impl ViewArgs {
    /// Whether any filter change was requested
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.clear_tags
            || !self.toggle.is_empty()
            || self.search.is_some()
            || self.sort.is_some()
            || self.page.is_some()
    }
}

/// Query memory subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum MemoryCommands {
    /// Print the query remembered for a route
    Get {
        #[arg(value_name = "ROUTE")]
        route: String,
    },
    /// Remember a query for a route
    Set {
        #[arg(value_name = "ROUTE")]
        route: String,
        #[arg(value_name = "QUERY")]
        query: String,
    },
    /// List routes with a remembered query
    #[command(visible_alias = "ls")]
    List,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::SortDirection;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_view_changes() {
        let cli = Cli::try_parse_from([
            "sievr", "view", "posts.json", "-t", "rust", "-t", "cli", "--sort", "date#ascending", "--json",
        ])
        .unwrap();

        assert!(cli.json);
        let Commands::View(args) = cli.command else {
            panic!("expected view command");
        };
        assert_eq!(args.toggle, vec!["rust".to_string(), "cli".to_string()]);
        assert_eq!(args.sort, Some(SortSpec::new("date", SortDirection::Ascending)));
        assert_eq!(args.route, "/blog");
        assert!(args.has_changes());
    }

    #[test]
    fn test_parse_bad_sort_fails() {
        let result = Cli::try_parse_from(["sievr", "view", "posts.json", "--sort", "date"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_decode_keys() {
        let cli = Cli::try_parse_from(["sievr", "decode", "?page=2", "-k", "page", "search"]).unwrap();
        let Commands::Decode { query, keys } = cli.command else {
            panic!("expected decode command");
        };
        assert_eq!(query, "?page=2");
        assert_eq!(keys, vec!["page".to_string(), "search".to_string()]);
    }
}
