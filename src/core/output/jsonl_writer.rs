//! JSON Lines (JSONL) output writer.
//!
//! One comment per line, ready for RAG ingestion or line-oriented tools.

use std::fs::File;
use std::io::{BufWriter, Write};

use super::json_writer::JsonComment;
use crate::comment::Extraction;
use crate::core::models::OutputConfig;
use crate::error::Result;

/// Writes the thread to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"author":"bob","text":"hello"}
/// {"author":"carol","text":"@bob hi"}
/// ```
pub fn write_jsonl(extraction: &Extraction, output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_jsonl_to(extraction, BufWriter::new(file), config)
}

/// Converts the thread to a JSONL string.
pub fn to_jsonl(extraction: &Extraction, config: &OutputConfig) -> Result<String> {
    let mut buf = Vec::new();
    write_jsonl_to(extraction, &mut buf, config)?;
    Ok(String::from_utf8(buf)?)
}

fn write_jsonl_to<W: Write>(extraction: &Extraction, mut writer: W, config: &OutputConfig) -> Result<()> {
    for (i, comment) in extraction.comments.iter().enumerate() {
        let line = serde_json::to_string(&JsonComment::from_threaded(extraction, i, comment, config))?;
        writeln!(writer, "{line}")?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::{PostMetadata, RawComment};
    use crate::thread::build_threads;
    use std::io::{BufRead, BufReader};
    use tempfile::NamedTempFile;

    fn sample() -> Extraction {
        Extraction {
            post: PostMetadata::new("acme", "https://social.example/acme", "post-1", "Launch"),
            comments: build_threads(vec![
                RawComment::new("bob", "hello").with_link("https://social.example/bob"),
                RawComment::new("carol", "@bob hi"),
            ]),
            warnings: vec![],
        }
    }

    #[test]
    fn test_write_jsonl_basic() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_jsonl(&sample(), path, &OutputConfig::new()).unwrap();

        let file = std::fs::File::open(path).unwrap();
        let lines: Vec<String> = BufReader::new(file).lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["author"], "bob");
        assert_eq!(first["text"], "hello");
    }

    #[test]
    fn test_jsonl_with_links_and_parents() {
        let jsonl = to_jsonl(&sample(), &OutputConfig::new().with_links().with_parents()).unwrap();
        let second: serde_json::Value = serde_json::from_str(jsonl.lines().nth(1).unwrap()).unwrap();
        assert_eq!(second["parent_id"], 0);
        assert_eq!(second["author_link"], "");

        let first: serde_json::Value = serde_json::from_str(jsonl.lines().next().unwrap()).unwrap();
        assert_eq!(first["author_link"], "https://social.example/bob");
    }

    #[test]
    fn test_jsonl_no_array_brackets() {
        let jsonl = to_jsonl(&sample(), &OutputConfig::new()).unwrap();
        assert!(!jsonl.contains('['));
        assert!(!jsonl.contains(']'));
    }

    #[test]
    fn test_jsonl_empty_thread() {
        assert_eq!(to_jsonl(&Extraction::default(), &OutputConfig::new()).unwrap(), "");
    }
}
