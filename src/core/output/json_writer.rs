//! JSON output writer.

use std::fs::File;
use std::io::Write;

use serde::Serialize;

use crate::comment::{Extraction, PostMetadata, ThreadedComment};
use crate::core::models::OutputConfig;
use crate::error::Result;

/// Minimal comment structure for JSON output.
/// Only includes fields enabled in `OutputConfig`.
#[derive(Serialize)]
pub(super) struct JsonComment<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<usize>,
    author: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    author_link: Option<&'a str>,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    post: Option<&'a PostMetadata>,
}

impl<'a> JsonComment<'a> {
    pub(super) fn from_threaded(
        extraction: &'a Extraction,
        position: usize,
        comment: &'a ThreadedComment,
        config: &OutputConfig,
    ) -> Self {
        Self {
            id: config.include_ids.then_some(position),
            author: comment.author(),
            author_link: config
                .include_links
                .then_some(comment.comment.commenter_account_link.as_str()),
            text: comment.text(),
            parent_id: if config.include_parents {
                comment.parent
            } else {
                None
            },
            post: config.include_post.then_some(&extraction.post),
        }
    }
}

/// Writes the thread to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"author": "bob", "text": "hello"},
///   {"author": "carol", "text": "@bob hi"}
/// ]
/// ```
pub fn write_json(extraction: &Extraction, output_path: &str, config: &OutputConfig) -> Result<()> {
    let json = to_json(extraction, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts the thread to a JSON array string.
pub fn to_json(extraction: &Extraction, config: &OutputConfig) -> Result<String> {
    let comments: Vec<JsonComment<'_>> = extraction
        .comments
        .iter()
        .enumerate()
        .map(|(i, c)| JsonComment::from_threaded(extraction, i, c, config))
        .collect();

    Ok(serde_json::to_string_pretty(&comments)?)
}
