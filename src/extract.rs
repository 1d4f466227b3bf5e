//! End-to-end extraction of one document.
//!
//! [`Extractor`] runs the stages in order: classification, metadata and
//! summary, segmentation, threading. Each call is an independent run with its
//! own threading index.
//!
//! ```
//! use commentpack::block::Block;
//! use commentpack::extract::Extractor;
//! use commentpack::relationships::RelationshipTable;
//!
//! let blocks = vec![
//!     Block::paragraph("acme"),
//!     Block::paragraph("https://social.example/acme"),
//!     Block::paragraph("post-1"),
//!     Block::paragraph("client_post_summary=Launch"),
//!     Block::image(),
//!     Block::link("bob", "rBob"),
//!     Block::paragraph("hello"),
//!     Block::image(),
//!     Block::link("carol", "rCarol"),
//!     Block::paragraph("@bob hi"),
//! ];
//! let table = RelationshipTable::new().with("rBob", "https://social.example/bob");
//!
//! let extraction = Extractor::new().extract_blocks(&blocks, &table)?;
//! assert_eq!(extraction.post.client_post_summary, "Launch");
//! assert_eq!(extraction.comments[1].parent(), Some(0));
//! # Ok::<(), commentpack::CommentpackError>(())
//! ```

use tracing::{debug, warn};

use crate::block::{Block, RawElement, classify_all};
use crate::comment::Extraction;
use crate::config::ExtractConfig;
use crate::error::Result;
use crate::relationships::RelationshipTable;
use crate::segmenter::segment;
use crate::summary::extract_metadata;
use crate::thread::build_threads_with;

/// Extracts threaded comments from documents.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractConfig,
}

impl Extractor {
    /// Creates an extractor with the default conventions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor with custom conventions.
    pub fn with_config(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Extracts from an already classified block sequence.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedMetadata`](crate::CommentpackError::MalformedMetadata)
    /// when the header is incomplete. Degraded links and empty authors are
    /// reported in [`Extraction::warnings`].
    pub fn extract_blocks(&self, blocks: &[Block], table: &RelationshipTable) -> Result<Extraction> {
        let (post, header_warning) = extract_metadata(blocks, &self.config)?;
        let segmentation = segment(blocks, table, &self.config.summary_marker);
        let comments = build_threads_with(segmentation.comments, &self.config);

        let mut warnings: Vec<_> = header_warning.into_iter().collect();
        warnings.extend(segmentation.warnings);
        for w in &warnings {
            warn!("{}", w);
        }

        let replies = comments.iter().filter(|c| !c.is_top_level()).count();
        debug!(
            post = %post.client_post_id,
            comments = comments.len(),
            replies,
            "extracted comment thread"
        );

        Ok(Extraction {
            post,
            comments,
            warnings,
        })
    }

    /// Classifies raw body elements, then extracts.
    pub fn extract_elements(
        &self,
        elements: &[RawElement],
        table: &RelationshipTable,
    ) -> Result<Extraction> {
        self.extract_blocks(&classify_all(elements), table)
    }

    /// Extracts from the XML of a document part and its relationship part.
    #[cfg(feature = "docx")]
    pub fn extract_parts(&self, document_xml: &str, rels_xml: Option<&str>) -> Result<Extraction> {
        let doc = crate::docx::DocxDocument::from_xml(document_xml, rels_xml)?;
        self.extract_elements(&doc.body, &doc.relationships)
    }

    /// Opens a `.docx` file and extracts from it.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read as a `.docx` package or its header is
    /// malformed.
    #[cfg(feature = "docx")]
    pub fn extract_file(&self, path: impl AsRef<std::path::Path>) -> Result<Extraction> {
        let doc = crate::docx::DocxDocument::open(path)?;
        self.extract_elements(&doc.body, &doc.relationships)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::ExtractionWarning;

    fn header() -> Vec<Block> {
        vec![
            Block::paragraph("client_account_id = acme"),
            Block::paragraph("client_account_link = https://social.example/acme"),
            Block::paragraph("client_post_id = post-1"),
            Block::paragraph("client_post_summary = Big news"),
            Block::paragraph("More details"),
        ]
    }

    fn table() -> RelationshipTable {
        RelationshipTable::new()
            .with("rBob", "https://social.example/bob")
            .with("rCarol", "https://social.example/carol")
    }

    #[test]
    fn test_full_pipeline() {
        let mut blocks = header();
        blocks.extend([
            Block::image(),
            Block::image(),
            Block::link("bob", "rBob"),
            Block::paragraph("first"),
            Block::image(),
            Block::link("bob", "rBob"),
            Block::paragraph("second"),
            Block::image(),
            Block::link("carol", "rCarol"),
            Block::paragraph("@bob, replying"),
        ]);

        let extraction = Extractor::new().extract_blocks(&blocks, &table()).unwrap();
        assert_eq!(extraction.post.client_account_id, "acme");
        assert_eq!(extraction.post.client_post_summary, "Big news\n\nMore details");
        assert_eq!(extraction.len(), 3);
        assert_eq!(extraction.comments[2].parent(), Some(1));
        assert!(extraction.warnings.is_empty());
    }

    #[test]
    fn test_warnings_are_collected_in_order() {
        let mut blocks = vec![Block::paragraph("extra")];
        blocks.extend(header());
        blocks.extend([Block::image(), Block::link("", "rNope")]);

        let extraction = Extractor::new().extract_blocks(&blocks, &table()).unwrap();
        assert_eq!(extraction.warnings.len(), 3);
        assert_eq!(extraction.warnings[0], ExtractionWarning::ExtraHeaderLines { count: 4 });
        assert!(matches!(
            extraction.warnings[1],
            ExtractionWarning::UnresolvedHyperlinkTarget { .. }
        ));
    }

    #[test]
    fn test_malformed_header_is_fatal() {
        let blocks = vec![
            Block::paragraph("only one line"),
            Block::paragraph("client_post_summary=x"),
            Block::image(),
            Block::link("bob", "rBob"),
        ];
        let err = Extractor::new().extract_blocks(&blocks, &table()).unwrap_err();
        assert!(err.is_malformed_metadata());
    }

    #[test]
    fn test_reextraction_is_idempotent() {
        let mut blocks = header();
        blocks.extend([
            Block::image(),
            Block::link("bob", "rBob"),
            Block::paragraph("x"),
            Block::image(),
            Block::link("carol", "rCarol"),
            Block::paragraph("@bob y"),
        ]);
        let extractor = Extractor::new();
        let first = extractor.extract_blocks(&blocks, &table()).unwrap();
        let second = extractor.extract_blocks(&blocks, &table()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_marker() {
        let blocks = vec![
            Block::paragraph("a"),
            Block::paragraph("b"),
            Block::paragraph("c"),
            Block::paragraph("Summary: the post"),
            Block::image(),
            Block::link("bob", "rBob"),
            Block::paragraph("hi"),
        ];
        let extractor = Extractor::with_config(ExtractConfig::new().with_summary_marker("summary:"));
        let extraction = extractor.extract_blocks(&blocks, &table()).unwrap();
        assert_eq!(extraction.len(), 1);
        assert_eq!(extraction.comments[0].author(), "bob");
    }

    #[cfg(feature = "docx")]
    #[test]
    fn test_extract_parts() {
        let document = r#"<w:document xmlns:w="w" xmlns:r="r"><w:body>
            <w:p><w:r><w:t>acme</w:t></w:r></w:p>
            <w:p><w:r><w:t>https://social.example/acme</w:t></w:r></w:p>
            <w:p><w:r><w:t>post-1</w:t></w:r></w:p>
            <w:p><w:r><w:t>client_post_summary=Hello</w:t></w:r></w:p>
            <w:p><w:r><w:drawing/></w:r></w:p>
            <w:p><w:hyperlink r:id="rId3"><w:r><w:t>bob</w:t></w:r></w:hyperlink></w:p>
            <w:p><w:r><w:t>nice</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let rels = r#"<Relationships><Relationship Id="rId3" Target="https://social.example/bob"/></Relationships>"#;

        let extraction = Extractor::new().extract_parts(document, Some(rels)).unwrap();
        assert_eq!(extraction.len(), 1);
        assert_eq!(
            extraction.comments[0].comment.commenter_account_link,
            "https://social.example/bob"
        );
        assert_eq!(extraction.comments[0].text(), "nice");
    }
}
