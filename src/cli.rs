//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options, convertible to
//!   [`format::OutputFormat`](crate::format::OutputFormat)

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::ExtractConfig;
use crate::core::models::OutputConfig;

/// Rebuild threaded comment lists from exported .docx posts.
#[derive(Parser, Debug, Clone)]
#[command(name = "commentpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    commentpack post_1.docx
    commentpack post_1.docx -o comments.csv --ids --parents
    commentpack post_1.docx -o comments.jsonl --links --post
    commentpack post_1.docx --db comments.db")]
pub struct Args {
    /// Path to the exported .docx document
    pub input: PathBuf,

    /// Store comments in this SQLite database
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Write the threaded comments to this file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Output format (default: from the output extension, else csv)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Include comment positions in output
    #[arg(long)]
    pub ids: bool,

    /// Include parent positions in output
    #[arg(short = 'p', long)]
    pub parents: bool,

    /// Include commenter profile links in output
    #[arg(short = 'l', long)]
    pub links: bool,

    /// Include post metadata in output
    #[arg(long)]
    pub post: bool,

    /// Summary marker that ends the header
    #[arg(long, value_name = "TEXT")]
    pub marker: Option<String>,

    /// Verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Extraction settings selected on the command line.
    pub fn extract_config(&self) -> ExtractConfig {
        match &self.marker {
            Some(marker) => ExtractConfig::new().with_summary_marker(marker),
            None => ExtractConfig::new(),
        }
    }

    /// Output columns selected on the command line.
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            include_ids: self.ids,
            include_parents: self.parents,
            include_links: self.links,
            include_post: self.post,
        }
    }

    /// Format to write `output` in.
    pub fn output_format(&self, output: &str) -> crate::format::OutputFormat {
        match self.format {
            Some(format) => format.into(),
            None => crate::format::OutputFormat::from_path(output).unwrap_or_default(),
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV with semicolon delimiter
    #[default]
    Csv,

    /// JSON array of comments
    Json,

    /// JSON Lines - one JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::format::OutputFormat::from(*self).fmt(f)
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("commentpack").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_minimal_args() {
        let args = parse(&["post.docx"]);
        assert_eq!(args.input, PathBuf::from("post.docx"));
        assert!(args.output.is_none());
        assert!(args.db.is_none());
        assert_eq!(args.output_config(), OutputConfig::new());
    }

    #[test]
    fn test_missing_input_is_error() {
        assert!(Args::try_parse_from(["commentpack"]).is_err());
    }

    #[test]
    fn test_output_flags() {
        let args = parse(&["post.docx", "--ids", "-p", "--links", "--post"]);
        assert_eq!(args.output_config(), OutputConfig::all());
    }

    #[test]
    fn test_format_from_extension_or_flag() {
        let args = parse(&["post.docx", "-o", "out.jsonl"]);
        assert_eq!(args.output_format("out.jsonl"), crate::format::OutputFormat::Jsonl);

        let args = parse(&["post.docx", "-o", "out.txt"]);
        assert_eq!(args.output_format("out.txt"), crate::format::OutputFormat::Csv);

        let args = parse(&["post.docx", "-o", "out.txt", "-f", "json"]);
        assert_eq!(args.output_format("out.txt"), crate::format::OutputFormat::Json);
    }

    #[test]
    fn test_marker_is_normalized() {
        let args = parse(&["post.docx", "--marker", "Post Summary ="]);
        assert_eq!(args.extract_config().summary_marker, "postsummary=");
    }

    #[test]
    fn test_format_display() {
        assert_eq!(OutputFormat::Jsonl.to_string(), "JSONL");
    }
}
