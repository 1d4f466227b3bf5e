//! Fixture builder for synthetic `.docx` exports.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// One body element of a fixture document.
#[derive(Debug, Clone)]
pub enum Part {
    Text(String),
    Image,
    Link { text: String, rel_id: String },
}

/// Builds `word/document.xml` and its relationship part.
#[derive(Debug, Clone, Default)]
pub struct DocxFixture {
    parts: Vec<Part>,
    rels: Vec<(String, String)>,
    skip_rels_part: bool,
}

impl DocxFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard header plus summary paragraph and the image that closes it.
    pub fn with_header(post_id: &str, summary: &str) -> Self {
        Self::new()
            .text("client_account_id = acme")
            .text("client_account_link = https://social.example/acme")
            .text(&format!("client_post_id = {}", post_id))
            .text(&format!("client_post_summary = {}", summary))
            .image()
    }

    pub fn text(mut self, text: &str) -> Self {
        self.parts.push(Part::Text(text.to_string()));
        self
    }

    pub fn image(mut self) -> Self {
        self.parts.push(Part::Image);
        self
    }

    /// Adds a hyperlink paragraph and its relationship.
    pub fn link(mut self, text: &str, rel_id: &str, target: &str) -> Self {
        self.parts.push(Part::Link {
            text: text.to_string(),
            rel_id: rel_id.to_string(),
        });
        self.rels.push((rel_id.to_string(), target.to_string()));
        self
    }

    /// Adds a hyperlink paragraph whose relationship is missing.
    pub fn dangling_link(mut self, text: &str, rel_id: &str) -> Self {
        self.parts.push(Part::Link {
            text: text.to_string(),
            rel_id: rel_id.to_string(),
        });
        self
    }

    /// Avatar image, author link, then the comment paragraphs.
    pub fn comment(self, author: &str, lines: &[&str]) -> Self {
        let rel_id = format!("rId{}", self.rels.len() + 10);
        let target = format!("https://social.example/{}", author);
        let mut fixture = self.image().link(author, &rel_id, &target);
        for line in lines {
            fixture = fixture.text(line);
        }
        fixture
    }

    pub fn without_rels_part(mut self) -> Self {
        self.skip_rels_part = true;
        self
    }

    pub fn document_xml(&self) -> String {
        let mut body = String::new();
        for part in &self.parts {
            match part {
                Part::Text(text) => body.push_str(&format!(
                    r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
                    escape(text)
                )),
                Part::Image => body.push_str(
                    r#"<w:p><w:r><w:drawing><wp:inline><a:graphic/></wp:inline></w:drawing></w:r></w:p>"#,
                ),
                Part::Link { text, rel_id } => body.push_str(&format!(
                    r#"<w:p><w:hyperlink r:id="{}"><w:r><w:rPr><w:rStyle w:val="Hyperlink"/></w:rPr><w:t>{}</w:t></w:r></w:hyperlink></w:p>"#,
                    rel_id,
                    escape(text)
                )),
            }
        }
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:wp="wp" xmlns:a="a"><w:body>{}<w:sectPr/></w:body></w:document>"#,
            body
        )
    }

    pub fn rels_xml(&self) -> String {
        let rels: String = self
            .rels
            .iter()
            .map(|(id, target)| {
                format!(
                    r#"<Relationship Id="{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="{}" TargetMode="External"/>"#,
                    id,
                    escape(target)
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
            rels
        )
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        zip.start_file("word/document.xml", options).unwrap();
        zip.write_all(self.document_xml().as_bytes()).unwrap();
        if !self.skip_rels_part {
            zip.start_file("word/_rels/document.xml.rels", options).unwrap();
            zip.write_all(self.rels_xml().as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.to_bytes()).unwrap();
        path
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// The bob/carol thread used across test files.
pub fn bob_and_carol() -> DocxFixture {
    DocxFixture::with_header("post-1", "Launch day")
        .comment("bob", &["hello"])
        .comment("carol", &["@bob hi"])
}
