//! CSV output writer.

use std::fs::File;
use std::io::Write;

use crate::comment::{Extraction, ThreadedComment};
use crate::core::models::OutputConfig;
use crate::error::Result;

/// Writes the thread to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: Depends on OutputConfig
///   - Basic: `Author`, `Text`
///   - With IDs: `ID`, `Author`, `Text`
///   - With links: `Author`, `AuthorLink`, `Text`
///   - With parents: `Author`, `Text`, `ParentID`
///   - With post: `AccountID`, `AccountLink`, `PostID`, `PostSummary` appended
/// - Encoding: UTF-8
pub fn write_csv(extraction: &Extraction, output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_csv_to(extraction, file, config)
}

/// Converts the thread to a CSV string.
pub fn to_csv(extraction: &Extraction, config: &OutputConfig) -> Result<String> {
    let mut buf = Vec::new();
    write_csv_to(extraction, &mut buf, config)?;
    Ok(String::from_utf8(buf)?)
}

fn write_csv_to<W: Write>(extraction: &Extraction, out: W, config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(build_header(config))?;
    for (position, comment) in extraction.comments.iter().enumerate() {
        writer.write_record(build_record(extraction, position, comment, config))?;
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = Vec::new();

    if config.include_ids {
        header.push("ID");
    }
    header.push("Author");
    if config.include_links {
        header.push("AuthorLink");
    }
    header.push("Text");
    if config.include_parents {
        header.push("ParentID");
    }
    if config.include_post {
        header.extend(["AccountID", "AccountLink", "PostID", "PostSummary"]);
    }

    header
}

/// Build CSV record for a single comment.
fn build_record(
    extraction: &Extraction,
    position: usize,
    comment: &ThreadedComment,
    config: &OutputConfig,
) -> Vec<String> {
    let mut record = Vec::new();

    if config.include_ids {
        record.push(position.to_string());
    }
    record.push(comment.comment.commenter_account_id.clone());
    if config.include_links {
        record.push(comment.comment.commenter_account_link.clone());
    }
    record.push(comment.comment.comment_text.clone());
    if config.include_parents {
        record.push(comment.parent.map(|p| p.to_string()).unwrap_or_default());
    }
    if config.include_post {
        let post = &extraction.post;
        record.push(post.client_account_id.clone());
        record.push(post.client_account_link.clone());
        record.push(post.client_post_id.clone());
        record.push(post.client_post_summary.clone());
    }

    record
}
