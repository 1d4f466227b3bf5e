//! Output configuration.

use serde::{Deserialize, Serialize};

/// Configuration for output format.
/// Controls which optional columns are included in the output.
///
/// Author and text are always written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Include the comment's position in the thread list
    pub include_ids: bool,
    /// Include the parent's position for replies
    pub include_parents: bool,
    /// Include the commenter's profile URL
    pub include_links: bool,
    /// Include the post metadata on every row
    pub include_post: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables every optional column.
    pub fn all() -> Self {
        Self {
            include_ids: true,
            include_parents: true,
            include_links: true,
            include_post: true,
        }
    }

    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.include_ids = true;
        self
    }

    #[must_use]
    pub fn with_parents(mut self) -> Self {
        self.include_parents = true;
        self
    }

    #[must_use]
    pub fn with_links(mut self) -> Self {
        self.include_links = true;
        self
    }

    #[must_use]
    pub fn with_post(mut self) -> Self {
        self.include_post = true;
        self
    }
}
