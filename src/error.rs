//! Unified error types for commentpack.
//!
//! This module provides a single [`CommentpackError`] enum covering every fatal
//! failure in the library. Degraded-but-recoverable conditions found while
//! segmenting a document are not errors; they are reported as
//! [`ExtractionWarning`](crate::comment::ExtractionWarning)s on the extraction
//! result instead.
//!
//! # Fatal vs. recorded
//!
//! - **Fatal**: the document cannot be opened or enumerated
//!   ([`DocumentParse`](CommentpackError::DocumentParse)), or its header does not
//!   carry the three positional metadata lines
//!   ([`MalformedMetadata`](CommentpackError::MalformedMetadata)). Nothing is
//!   stored for that document.
//! - **Recorded**: unmapped hyperlink targets and boundaries without author
//!   text. Processing continues.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for commentpack operations.
///
/// # Example
///
/// ```rust
/// use commentpack::error::Result;
/// use commentpack::RawComment;
///
/// fn my_function() -> Result<Vec<RawComment>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, CommentpackError>;

/// The error type for all commentpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CommentpackError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The output file cannot be created
    /// - Disk is full (when writing output)
    ///
    /// Failures to open or read an input document are
    /// [`DocumentParse`](CommentpackError::DocumentParse) instead.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The document could not be opened or its body could not be enumerated.
    ///
    /// Carries the file path, when known, for operator diagnosis.
    #[error("Failed to read document{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    DocumentParse {
        /// The underlying parse error
        #[source]
        source: ParseErrorKind,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// Fewer than three non-empty header lines precede the summary section.
    #[error("Malformed metadata header: expected {expected} non-empty lines before the summary, found {found}")]
    MalformedMetadata {
        /// Number of header lines found
        found: usize,
        /// Number of header lines required
        expected: usize,
    },

    /// A value doesn't match the expected structure.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Analysis round outside of the supported range.
    #[error("Invalid analysis round {round}. Expected 1..={max}")]
    InvalidRound {
        /// The round that was requested
        round: u8,
        /// Highest supported round
        max: u8,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing/serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// SQLite storage error.
    #[cfg(feature = "sqlite")]
    #[error("Storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Kinds of document parse errors.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// The `.docx` archive could not be read
    #[cfg(feature = "docx")]
    #[error("{0}")]
    Archive(#[from] zip::result::ZipError),
    /// Malformed XML inside a document part
    #[cfg(feature = "docx")]
    #[error("{0}")]
    Xml(#[from] quick_xml::Error),
    /// The file could not be opened or a part could not be read
    #[error("{0}")]
    Io(#[from] io::Error),
    /// A required part is missing from the package
    #[error("missing part '{0}'")]
    MissingPart(String),
    /// The document has no body element
    #[error("document has no body")]
    MissingBody,
    /// Generic parsing error
    #[error("{0}")]
    Other(String),
}

impl From<std::string::FromUtf8Error> for CommentpackError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        CommentpackError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl CommentpackError {
    /// Creates a document parse error.
    pub fn document_parse(source: impl Into<ParseErrorKind>, path: Option<PathBuf>) -> Self {
        CommentpackError::DocumentParse {
            source: source.into(),
            path,
        }
    }

    /// Creates a malformed metadata error for a header with `found` lines.
    pub fn malformed_metadata(found: usize) -> Self {
        CommentpackError::MalformedMetadata {
            found,
            expected: crate::summary::METADATA_LINES,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        CommentpackError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Attaches a file path to a document parse error that has none.
    #[must_use]
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            CommentpackError::DocumentParse { source, path: None } => {
                CommentpackError::DocumentParse {
                    source,
                    path: Some(path.into()),
                }
            }
            other => other,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, CommentpackError::Io(_))
    }

    /// Returns `true` if this is a document parse error.
    pub fn is_document_parse(&self) -> bool {
        matches!(self, CommentpackError::DocumentParse { .. })
    }

    /// Returns `true` if the document header was malformed.
    pub fn is_malformed_metadata(&self) -> bool {
        matches!(self, CommentpackError::MalformedMetadata { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, CommentpackError::InvalidFormat { .. })
    }
}

impl From<String> for ParseErrorKind {
    fn from(message: String) -> Self {
        ParseErrorKind::Other(message)
    }
}

impl From<&str> for ParseErrorKind {
    fn from(message: &str) -> Self {
        ParseErrorKind::Other(message.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================
