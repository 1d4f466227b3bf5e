//! Configuration for document extraction.
//!
//! [`ExtractConfig`] holds the conventions the export format relies on: the
//! summary marker, the header keys, and the punctuation stripped from
//! `@mentions`. The defaults match the exports this crate was built for.
//!
//! # Example
//!
//! ```rust
//! use commentpack::config::ExtractConfig;
//!
//! let config = ExtractConfig::new()
//!     .with_summary_marker("post_summary=")
//!     .with_mention_trim(".,!");
//!
//! assert_eq!(config.summary_marker, "post_summary=");
//! ```

use serde::{Deserialize, Serialize};

/// Marker that opens the post summary and ends the header.
pub const DEFAULT_SUMMARY_MARKER: &str = "client_post_summary=";

/// Characters stripped from the end of a mention token.
pub const DEFAULT_MENTION_TRIM: &str = ".,:;!?";

/// Keys of the three positional header lines.
pub const DEFAULT_METADATA_KEYS: [&str; 3] =
    ["client_account_id", "client_account_link", "client_post_id"];

/// Configuration for extracting comments from a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Normalized marker (lower case, no whitespace) that opens the summary
    /// (default: `client_post_summary=`)
    pub summary_marker: String,

    /// Keys stripped from the three header lines, in order
    pub metadata_keys: [String; 3],

    /// Characters trimmed from the end of a mention token (default: `.,:;!?`)
    pub mention_trim: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            summary_marker: DEFAULT_SUMMARY_MARKER.to_string(),
            metadata_keys: DEFAULT_METADATA_KEYS.map(str::to_string),
            mention_trim: DEFAULT_MENTION_TRIM.to_string(),
        }
    }
}

impl ExtractConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the summary marker. It is normalized the same way paragraph text
    /// is; markers read from a serialized config are normalized when matched.
    #[must_use]
    pub fn with_summary_marker(mut self, marker: impl AsRef<str>) -> Self {
        self.summary_marker = crate::block::normalize(marker.as_ref());
        self
    }

    /// Sets the header keys.
    #[must_use]
    pub fn with_metadata_keys(mut self, keys: [&str; 3]) -> Self {
        self.metadata_keys = keys.map(str::to_string);
        self
    }

    /// Sets the characters trimmed from mention tokens.
    #[must_use]
    pub fn with_mention_trim(mut self, chars: impl Into<String>) -> Self {
        self.mention_trim = chars.into();
        self
    }
}
