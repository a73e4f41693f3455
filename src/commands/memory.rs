//! Memory command - inspect and edit remembered queries

use crate::{
    SievrError,
    cli::MemoryCommands,
    memory::{FileQueryStore, QueryStore},
    output,
};
use colored::Colorize;

type Result<T> = std::result::Result<T, SievrError>;

/// Execute a query memory subcommand against the default store
///
/// # Errors
/// Returns an error if the store location cannot be determined or written
pub fn execute(command: &MemoryCommands, json: bool, quiet: bool) -> Result<()> {
    let store = FileQueryStore::open_default()?;
    run(&store, command, json, quiet)
}

fn run(store: &FileQueryStore, command: &MemoryCommands, json: bool, quiet: bool) -> Result<()> {
    match command {
        MemoryCommands::Get { route } => {
            let query = store.get(route);
            if json {
                output::print_json(&query)?;
            } else if let Some(query) = query {
                println!("{query}");
            } else if !quiet {
                println!("No query remembered for '{route}'");
            }
        }
        MemoryCommands::Set { route, query } => {
            let query = query.strip_prefix('?').unwrap_or(query);
            let changed = store.set(route, query);
            if json {
                output::print_json(&changed)?;
            } else if !quiet {
                if changed {
                    println!("{} {route}", "Remembered".green());
                } else {
                    println!("Query for '{route}' unchanged");
                }
            }
        }
        MemoryCommands::List => {
            let routes = store.routes();
            if json {
                output::print_json(&routes)?;
                return Ok(());
            }
            if routes.is_empty() {
                if !quiet {
                    println!("No remembered queries in {}", store.path().display());
                }
                return Ok(());
            }
            for route in routes {
                let query = store.get(&route).unwrap_or_default();
                if quiet {
                    println!("{route}\t{query}");
                } else {
                    println!("  {} {}", route.bold(), query.dimmed());
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_then_get_through_command() {
        let dir = TempDir::new().unwrap();
        let store = FileQueryStore::open(dir.path().join("queries.json"));

        let set = MemoryCommands::Set {
            route: "/blog".to_string(),
            query: "?page=2".to_string(),
        };
        run(&store, &set, false, true).unwrap();
        assert_eq!(store.get("/blog").as_deref(), Some("page=2"));

        let reopened = FileQueryStore::open(dir.path().join("queries.json"));
        assert_eq!(reopened.get("/blog").as_deref(), Some("page=2"));
    }
}
