//! Output format selection.
//!
//! A format is picked by name (`csv`, `json`, `jsonl` or its alias `ndjson`) or
//! from the extension of the output path, then dispatched to the matching
//! writer in [`core::output`](crate::core::output).
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> commentpack::Result<()> {
//! use commentpack::format::{OutputFormat, write_to_format};
//! use commentpack::core::models::OutputConfig;
//! use commentpack::Extraction;
//!
//! let format = OutputFormat::from_path("comments.jsonl")?;
//! write_to_format(&Extraction::default(), "comments.jsonl", format, &OutputConfig::new())?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::comment::Extraction;
use crate::core::models::OutputConfig;
use crate::error::CommentpackError;

/// How a comment thread is written out.
///
/// ```rust
/// use commentpack::format::OutputFormat;
///
/// let format: OutputFormat = "ndjson".parse().unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Semicolon-delimited rows, one per comment
    #[default]
    Csv,

    /// A single pretty-printed array
    Json,

    /// One JSON object per line (also accepted as `ndjson`)
    ///
    /// Handy for feeding comments to line-oriented classifiers.
    Jsonl,
}

impl OutputFormat {
    const ALL: &'static [OutputFormat] = &[OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl];

    /// Every format, in menu order.
    pub fn all() -> &'static [OutputFormat] {
        Self::ALL
    }

    /// Every name accepted by [`FromStr`](std::str::FromStr), aliases included.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "json", "jsonl", "ndjson"]
    }

    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Cargo feature the writer for this format lives behind.
    fn feature(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(OutputFormat::Csv),
            "json" => Some(OutputFormat::Json),
            "jsonl" | "ndjson" => Some(OutputFormat::Jsonl),
            _ => None,
        }
    }

    /// Picks the format from the extension of `path`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`CommentpackError::InvalidFormat`] for a missing or unknown
    /// extension.
    pub fn from_path(path: &str) -> Result<Self, CommentpackError> {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_name(ext).ok_or_else(|| {
            CommentpackError::invalid_format(
                "output",
                format!("unknown file extension '.{}' (expected csv, json or jsonl)", ext),
            )
        })
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OutputFormat::Csv => "CSV",
            OutputFormat::Json => "JSON",
            OutputFormat::Jsonl => "JSONL",
        })
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = CommentpackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            CommentpackError::invalid_format(
                "output",
                format!(
                    "unknown format '{}' (expected one of: {})",
                    s,
                    OutputFormat::all_names().join(", ")
                ),
            )
        })
    }
}

#[allow(dead_code)]
fn feature_disabled(format: OutputFormat) -> CommentpackError {
    CommentpackError::invalid_format(
        "output",
        format!("{} output requires the '{}' feature", format, format.feature()),
    )
}

/// Writes the thread to `path` in `format`.
///
/// # Errors
///
/// Fails if the writer for `format` is compiled out or the file cannot be
/// written.
#[allow(unused_variables)]
pub fn write_to_format(
    extraction: &Extraction,
    path: &str,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<(), CommentpackError> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(extraction, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(extraction, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(extraction, path, config),
        #[allow(unreachable_patterns)]
        other => Err(feature_disabled(other)),
    }
}

/// Renders the thread as a string in `format`.
///
/// ```rust
/// # #[cfg(feature = "csv-output")]
/// # fn example() -> commentpack::Result<()> {
/// use commentpack::format::{OutputFormat, to_format_string};
/// use commentpack::core::models::OutputConfig;
/// use commentpack::Extraction;
///
/// let csv = to_format_string(&Extraction::default(), OutputFormat::Csv, &OutputConfig::new())?;
/// assert_eq!(csv.trim(), "Author;Text");
/// # Ok(())
/// # }
/// ```
#[allow(unused_variables)]
pub fn to_format_string(
    extraction: &Extraction,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String, CommentpackError> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(extraction, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(extraction, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(extraction, config),
        #[allow(unreachable_patterns)]
        other => Err(feature_disabled(other)),
    }
}
