//! Comment and post records produced by extraction.
//!
//! # Overview
//!
//! - [`PostMetadata`] - the post the thread belongs to, once per document
//! - [`RawComment`] - one segmented comment, in document order
//! - [`ThreadedComment`] - a raw comment plus its resolved parent position
//! - [`StoredComment`] - a threaded comment after the store assigned ids
//! - [`Extraction`] - everything one document yields, plus warnings
//!
//! # Examples
//!
//! ```
//! use commentpack::{RawComment, ThreadedComment};
//!
//! let root = ThreadedComment::new(RawComment::new("bob", "hello"));
//! let reply = ThreadedComment::new(RawComment::new("carol", "@bob hi")).with_parent(0);
//!
//! assert!(root.is_top_level());
//! assert_eq!(reply.parent(), Some(0));
//! assert_eq!(reply.mention(), Some("bob"));
//! ```

use serde::{Deserialize, Serialize};

use crate::thread::mentioned_account;

/// Durable identity assigned by a storage collaborator.
pub type CommentId = i64;

/// Metadata of the post a comment thread belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMetadata {
    /// Account that published the post
    pub client_account_id: String,
    /// Profile URL of that account
    pub client_account_link: String,
    /// Post identifier (usually its URL)
    pub client_post_id: String,
    /// Post summary text, empty when the document has none
    pub client_post_summary: String,
}

impl PostMetadata {
    /// Creates metadata from the three header fields and a summary.
    pub fn new(
        account_id: impl Into<String>,
        account_link: impl Into<String>,
        post_id: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            client_account_id: account_id.into(),
            client_account_link: account_link.into(),
            client_post_id: post_id.into(),
            client_post_summary: summary.into(),
        }
    }
}

/// A comment as segmented from the document, before threading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawComment {
    /// Display name of the commenting account (may be empty)
    pub commenter_account_id: String,
    /// Profile URL of the commenting account (empty when unresolved)
    pub commenter_account_link: String,
    /// Comment paragraphs joined with newlines
    pub comment_text: String,
}

impl RawComment {
    /// Creates a comment with an author and text but no profile link.
    pub fn new(account_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            commenter_account_id: account_id.into(),
            commenter_account_link: String::new(),
            comment_text: text.into(),
        }
    }

    /// Builder method to set the profile link.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.commenter_account_link = link.into();
        self
    }

    /// Appends a paragraph, newline-joined with what was collected so far.
    pub fn push_line(&mut self, line: &str) {
        if !self.comment_text.is_empty() {
            self.comment_text.push('\n');
        }
        self.comment_text.push_str(line);
    }

    /// Returns the commenting account.
    pub fn author(&self) -> &str {
        &self.commenter_account_id
    }

    /// Returns the comment text.
    pub fn text(&self) -> &str {
        &self.comment_text
    }

    /// Returns the account named by a leading `@mention`, if any.
    pub fn mention(&self) -> Option<&str> {
        mentioned_account(&self.comment_text, crate::config::DEFAULT_MENTION_TRIM)
    }
}

/// A comment with its resolved reply parent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadedComment {
    /// The segmented comment
    #[serde(flatten)]
    pub comment: RawComment,

    /// Position of the parent in the same list. Always smaller than this
    /// comment's own position.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub parent: Option<usize>,
}

impl ThreadedComment {
    /// Wraps a raw comment as a top-level comment.
    pub fn new(comment: RawComment) -> Self {
        Self {
            comment,
            parent: None,
        }
    }

    /// Builder method to set the parent position.
    #[must_use]
    pub fn with_parent(mut self, parent: usize) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Returns the parent position, if any.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Returns `true` if the comment has no parent.
    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns the commenting account.
    pub fn author(&self) -> &str {
        self.comment.author()
    }

    /// Returns the comment text.
    pub fn text(&self) -> &str {
        self.comment.text()
    }

    /// Returns the account named by a leading `@mention`, if any.
    pub fn mention(&self) -> Option<&str> {
        self.comment.mention()
    }
}

/// A threaded comment after persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredComment {
    /// Durable id assigned by the store
    pub id: CommentId,
    /// Durable id of the parent comment
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub parent_id: Option<CommentId>,
    /// The threaded comment that was stored
    #[serde(flatten)]
    pub comment: ThreadedComment,
}

/// A non-fatal condition met while extracting a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractionWarning {
    /// A hyperlink's relationship id is missing or not in the table; the
    /// account URL was left empty.
    UnresolvedHyperlinkTarget {
        /// Index of the hyperlink block
        block: usize,
        /// The relationship id, if the hyperlink had one
        rel_id: Option<String>,
    },
    /// A comment boundary was found but the hyperlink carried no author text;
    /// the comment was kept with an empty account id.
    EmptySegment {
        /// Index of the hyperlink block
        block: usize,
    },
    /// More non-empty header lines than expected precede the summary; only the
    /// first ones were used.
    ExtraHeaderLines {
        /// Number of header lines found
        count: usize,
    },
}

impl std::fmt::Display for ExtractionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionWarning::UnresolvedHyperlinkTarget { block, rel_id } => match rel_id {
                Some(id) => write!(f, "block {}: hyperlink target '{}' not found", block, id),
                None => write!(f, "block {}: hyperlink has no target", block),
            },
            ExtractionWarning::EmptySegment { block } => {
                write!(f, "block {}: comment author is empty", block)
            }
            ExtractionWarning::ExtraHeaderLines { count } => {
                write!(f, "{} header lines before the summary, extra lines ignored", count)
            }
        }
    }
}

/// Everything extracted from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Post metadata
    pub post: PostMetadata,
    /// Threaded comments in document order
    pub comments: Vec<ThreadedComment>,
    /// Non-fatal conditions, in the order they were met
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub warnings: Vec<ExtractionWarning>,
}

impl Extraction {
    /// Number of extracted comments.
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    /// Returns `true` if no comments were extracted.
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Returns the raw comments, in order.
    pub fn raw_comments(&self) -> impl Iterator<Item = &RawComment> {
        self.comments.iter().map(|c| &c.comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_line_joins_with_newline() {
        let mut comment = RawComment::new("bob", "");
        comment.push_line("first");
        comment.push_line("second");
        assert_eq!(comment.text(), "first\nsecond");
    }

    #[test]
    fn test_mention_accessor() {
        assert_eq!(RawComment::new("carol", "@bob, agreed").mention(), Some("bob"));
        assert_eq!(RawComment::new("carol", "no mention").mention(), None);
    }

    #[test]
    fn test_threaded_serialization_flattens() {
        let c = ThreadedComment::new(RawComment::new("bob", "hello").with_link("https://x/bob"))
            .with_parent(3);
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains(r#""commenter_account_id":"bob""#));
        assert!(json.contains(r#""parent":3"#));

        let top = ThreadedComment::new(RawComment::new("bob", "hello"));
        assert!(!serde_json::to_string(&top).unwrap().contains("parent"));
    }

    #[test]
    fn test_warning_display() {
        let w = ExtractionWarning::UnresolvedHyperlinkTarget {
            block: 4,
            rel_id: Some("rId9".into()),
        };
        assert_eq!(w.to_string(), "block 4: hyperlink target 'rId9' not found");
        assert_eq!(
            ExtractionWarning::EmptySegment { block: 2 }.to_string(),
            "block 2: comment author is empty"
        );
    }

    #[test]
    fn test_extraction_len() {
        let extraction = Extraction {
            post: PostMetadata::default(),
            comments: vec![ThreadedComment::new(RawComment::new("a", "b"))],
            warnings: vec![],
        };
        assert_eq!(extraction.len(), 1);
        assert!(!extraction.is_empty());
        assert_eq!(extraction.raw_comments().count(), 1);
    }
}
