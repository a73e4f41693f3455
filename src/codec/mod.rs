//! Query-string codec
//!
//! Converts typed values to tokens that can live inside a URL query string and
//! back. Tokens carry no type tag, so decoding infers the type from the shape
//! of the token:
//!
//! - a complete number literal decodes to a number (`3`, `1.5`, `0x10`)
//! - `true` / `false` decode to booleans
//! - `~a-b-c~` decodes to an array, each element decoded recursively
//! - `k1_v1-k2_v2` decodes to a flat object
//! - anything else is the percent-decoded string
//!
//! Encoding is the inverse with one asymmetry: empty strings, empty arrays,
//! `null`, and objects with any member that encodes to nothing all encode to
//! *absent*, and whole-query encoding removes such keys instead of writing an
//! empty token.
//!
//! ```
//! use serde_json::json;
//! use sievr::codec::{decode_query, encode_query};
//!
//! let query = encode_query("ref=home", &[("tags", json!(["rust", "cli"])), ("page", json!(2))]);
//! assert_eq!(query, "ref=home&tags=%7Erust-cli%7E&page=2");
//!
//! let decoded = decode_query(&query, &["tags", "page"]).unwrap();
//! assert_eq!(decoded["tags"], json!(["rust", "cli"]));
//! assert_eq!(decoded["page"], json!(2));
//! ```

pub mod coerce;
pub mod query;
pub mod slug;
pub mod value;

pub use query::{decode_query, encode_query};
pub use slug::{slugify, unslugify};
pub use value::{decode_value, encode_value};
