//! Post summary and header metadata.
//!
//! A document opens with three header lines (account id, account link, post
//! id), followed by a paragraph carrying the summary marker
//! (`client_post_summary=...`) and the summary text, which runs until the first
//! image.

use crate::block::{Block, normalize};
use crate::comment::{ExtractionWarning, PostMetadata};
use crate::config::ExtractConfig;
use crate::error::{CommentpackError, Result};

/// Number of positional header lines before the summary.
pub const METADATA_LINES: usize = 3;

/// Index of the first non-image block whose normalized text contains the
/// normalized `marker`.
pub fn find_marker(blocks: &[Block], marker: &str) -> Option<usize> {
    let marker = normalize(marker);
    blocks
        .iter()
        .position(|b| !b.is_image() && normalize(b.text()).contains(&marker))
}

/// Extracts the post summary.
///
/// Collection starts at the marker paragraph (only the text after its first
/// `=` is kept) and continues through non-empty paragraphs until the first
/// image. Lines are separated by a blank line. Without a marker the summary
/// is empty.
///
/// ```
/// use commentpack::block::Block;
/// use commentpack::summary::extract_summary;
///
/// let blocks = [
///     Block::paragraph("client_post_summary = Big news"),
///     Block::paragraph("More details"),
///     Block::image(),
///     Block::paragraph("not summary"),
/// ];
/// assert_eq!(extract_summary(&blocks, "client_post_summary="), "Big news\n\nMore details");
/// ```
pub fn extract_summary(blocks: &[Block], marker: &str) -> String {
    let Some(start) = find_marker(blocks, marker) else {
        return String::new();
    };

    let mut lines: Vec<&str> = Vec::new();
    if let Some((_, first)) = blocks[start].text().split_once('=') {
        let first = first.trim();
        if !first.is_empty() {
            lines.push(first);
        }
    }

    for block in &blocks[start + 1..] {
        if block.is_image() {
            break;
        }
        let text = block.text().trim();
        if !text.is_empty() {
            lines.push(text);
        }
    }

    lines.join("\n\n").trim().to_string()
}

/// Builds the post metadata from the header lines and the summary.
///
/// The first three non-empty, non-image lines before the summary marker are the
/// account id, account link and post id (the whole document is used when the
/// marker is absent). A line starting with its configured key has the key and
/// a following `=` removed.
///
/// # Errors
///
/// Returns [`CommentpackError::MalformedMetadata`] when fewer than three header
/// lines are present. Extra header lines are reported as a warning.
pub fn extract_metadata(
    blocks: &[Block],
    config: &ExtractConfig,
) -> Result<(PostMetadata, Option<ExtractionWarning>)> {
    let marker = find_marker(blocks, &config.summary_marker);
    let header = &blocks[..marker.unwrap_or(blocks.len())];

    let lines: Vec<&str> = header
        .iter()
        .filter(|b| !b.is_image())
        .map(|b| b.text())
        .filter(|t| !t.is_empty())
        .collect();

    if lines.len() < METADATA_LINES {
        return Err(CommentpackError::malformed_metadata(lines.len()));
    }

    // Without a marker the "header" is the whole document, so surplus lines
    // are expected there.
    let warning = (marker.is_some() && lines.len() > METADATA_LINES)
        .then_some(ExtractionWarning::ExtraHeaderLines { count: lines.len() });

    let [id_key, link_key, post_key] = &config.metadata_keys;
    let post = PostMetadata::new(
        strip_key(lines[0], id_key),
        strip_key(lines[1], link_key),
        strip_key(lines[2], post_key),
        extract_summary(blocks, &config.summary_marker),
    );
    Ok((post, warning))
}

/// Removes a leading `key =` from a header line.
fn strip_key<'a>(line: &'a str, key: &str) -> &'a str {
    let line = line.trim();
    let Some(head) = line.get(..key.len()) else {
        return line;
    };
    if !head.eq_ignore_ascii_case(key) {
        return line;
    }
    let rest = line[key.len()..].trim_start();
    rest.strip_prefix('=').unwrap_or(rest).trim()
}
