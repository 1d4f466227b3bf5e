//! Output format writers.
//!
//! This module provides writers for different output formats:
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of comments - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines (one comment per line) - requires `json-output` feature
//!
//! Every writer emits comments in thread order. `ID` and `ParentID` are
//! positions in that order, so a reply always points at an earlier row.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output", feature = "docx"))]
//! # fn main() -> commentpack::Result<()> {
//! use commentpack::core::output::{write_csv, write_jsonl, to_json};
//! use commentpack::core::models::OutputConfig;
//! use commentpack::extract::Extractor;
//!
//! let extraction = Extractor::new().extract_file("post.docx")?;
//! let config = OutputConfig::new().with_ids().with_parents();
//!
//! write_csv(&extraction, "comments.csv", &config)?;
//! write_jsonl(&extraction, "comments.jsonl", &config)?;
//! let json_string = to_json(&extraction, &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output", feature = "docx")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
