//! Output-side processing for extracted threads.
//!
//! This module contains:
//! - [`models`] - Output configuration
//! - [`processor`] - Thread statistics
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() {
//! use commentpack::core::{OutputConfig, ThreadStats, write_csv, write_json, write_jsonl};
//! # }
//! ```

pub mod models;
pub mod output;
pub mod processor;

// Re-export main types for convenience
pub use models::OutputConfig;

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};

pub use processor::ThreadStats;
