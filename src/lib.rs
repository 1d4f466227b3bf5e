//! # Commentpack
//!
//! Rebuilds threaded comment lists from social-media posts exported as
//! `.docx` documents.
//!
//! ## Overview
//!
//! An export starts with a short header (account, account link, post id) and
//! the post summary, followed by the comments. Comments carry no explicit
//! delimiters: each one starts with the author's avatar image(s), then a
//! hyperlink to the author's profile, then the comment paragraphs. Replies are
//! marked by a leading `@name`.
//!
//! Commentpack recovers:
//! - the post metadata and summary,
//! - every comment with its author and profile link,
//! - the reply structure, resolving `@name` to the latest earlier comment by
//!   that account.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "docx", feature = "json-output"))]
//! # fn main() -> commentpack::Result<()> {
//! use commentpack::prelude::*;
//!
//! let extraction = Extractor::new().extract_file("post_1.docx")?;
//! for comment in &extraction.comments {
//!     println!("{}: {}", comment.author(), comment.text());
//! }
//!
//! write_json(&extraction, "comments.json", &OutputConfig::new().with_parents())?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "docx", feature = "json-output")))]
//! # fn main() {}
//! ```
//!
//! ## Storing comments
//!
//! ```rust
//! use commentpack::prelude::*;
//!
//! let extraction = Extraction {
//!     post: PostMetadata::default(),
//!     comments: build_threads(vec![
//!         RawComment::new("bob", "hello"),
//!         RawComment::new("carol", "@bob hi"),
//!     ]),
//!     warnings: vec![],
//! };
//!
//! let mut store = MemoryStore::new();
//! let stored = import(&extraction, &mut store)?;
//! assert_eq!(stored[1].parent_id, Some(stored[0].id));
//! # Ok::<(), CommentpackError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`docx`] - `.docx` package reader (feature `docx`)
//! - [`block`] - body elements and their classification into [`Block`]s
//! - [`relationships`] - relationship table and hyperlink resolution
//! - [`summary`] - post summary and header metadata
//! - [`segmenter`] - splitting the block stream into comments
//! - [`thread`] - `@mention` reply threading
//! - [`extract`] - the whole pipeline, [`Extractor`](extract::Extractor)
//! - [`store`] - storage collaborators ([`MemoryStore`](store::MemoryStore),
//!   `SqliteStore`) and ordered import
//! - [`analysis`] - per-round analysis records
//! - [`core`] - output configuration, statistics and writers
//! - [`format`] - output format selection
//! - [`config`] - extraction conventions
//! - [`error`] - unified error types ([`CommentpackError`], [`Result`])
//! - [`prelude`] - convenient re-exports

pub mod analysis;
pub mod block;
#[cfg(feature = "cli")]
pub mod cli;
pub mod comment;
pub mod config;
pub mod core;
#[cfg(feature = "docx")]
pub mod docx;
pub mod error;
pub mod extract;
pub mod format;
pub mod relationships;
pub mod segmenter;
pub mod store;
pub mod summary;
pub mod thread;

// Re-export the main types at the crate root for convenience
pub use block::Block;
pub use comment::{
    CommentId, Extraction, ExtractionWarning, PostMetadata, RawComment, StoredComment,
    ThreadedComment,
};
pub use error::{CommentpackError, Result};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use commentpack::prelude::*;
/// ```
pub mod prelude {
    // Records
    pub use crate::comment::{
        CommentId, Extraction, ExtractionWarning, PostMetadata, RawComment, StoredComment,
        ThreadedComment,
    };

    // Error types
    pub use crate::error::{CommentpackError, Result};

    // Pipeline
    pub use crate::block::{Block, RawElement, classify, classify_all};
    pub use crate::config::ExtractConfig;
    pub use crate::extract::Extractor;
    pub use crate::relationships::{RelationshipTable, resolve};
    pub use crate::segmenter::segment;
    pub use crate::summary::{extract_metadata, extract_summary};
    pub use crate::thread::{ThreadBuilder, build_threads};

    #[cfg(feature = "docx")]
    pub use crate::docx::DocxDocument;

    // Storage
    #[cfg(feature = "sqlite")]
    pub use crate::store::SqliteStore;
    pub use crate::store::{CommentRecord, CommentStore, MemoryStore, import};

    // Analysis records
    pub use crate::analysis::{AnalysisResult, AnalysisRound, CommentStatus};

    // Output
    pub use crate::core::models::OutputConfig;
    pub use crate::core::processor::ThreadStats;
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};
    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
}
