//! Decode command - read values out of a query string

use crate::{SievrError, codec, listing::QUERY_KEYS, output};
use colored::Colorize;

type Result<T> = std::result::Result<T, SievrError>;

/// Execute the decode command
///
/// With no keys given, the listing keys are decoded.
///
/// # Errors
/// Returns an error if JSON output cannot be written
pub fn execute(query: &str, keys: &[String], json: bool, quiet: bool) -> Result<()> {
    let keys: Vec<&str> = if keys.is_empty() {
        QUERY_KEYS.to_vec()
    } else {
        keys.iter().map(String::as_str).collect()
    };

    let decoded = codec::decode_query(query, &keys);
    if json {
        output::print_json(&decoded)?;
        return Ok(());
    }

    let Some(decoded) = decoded else {
        if !quiet {
            println!("No values found for keys: {}", keys.join(", "));
        }
        return Ok(());
    };

    for (key, value) in &decoded {
        if quiet {
            println!("{key}={value}");
        } else {
            println!("  {} = {}", key.bold(), value);
        }
    }
    Ok(())
}
