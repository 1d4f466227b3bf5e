//! `.docx` package reader.
//!
//! A `.docx` file is a zip archive. Only two parts matter here:
//!
//! - `word/document.xml`: the body, whose direct children become
//!   [`RawElement`]s in document order
//! - `word/_rels/document.xml.rels`: relationship ids to hyperlink targets
//!
//! Everything else in the package (styles, media, numbering) is ignored.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, info};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::block::RawElement;
use crate::error::{CommentpackError, ParseErrorKind, Result};
use crate::relationships::RelationshipTable;

/// Archive path of the main document part.
pub const DOCUMENT_PART: &str = "word/document.xml";
/// Archive path of the main document's relationship part.
pub const RELATIONSHIPS_PART: &str = "word/_rels/document.xml.rels";

/// The parts of a `.docx` document needed for extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocxDocument {
    /// Direct children of `w:body`, in order
    pub body: Vec<RawElement>,
    /// Relationship table of the main document part
    pub relationships: RelationshipTable,
}

impl DocxDocument {
    /// Opens a `.docx` file.
    ///
    /// # Errors
    ///
    /// Returns [`CommentpackError::DocumentParse`] carrying `path` if the file
    /// cannot be opened or is not a readable `.docx` package.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            CommentpackError::document_parse(ParseErrorKind::Io(e), Some(path.to_path_buf()))
        })?;
        let doc = Self::from_reader(file).map_err(|e| e.with_path(path))?;
        info!(
            path = %path.display(),
            elements = doc.body.len(),
            relationships = doc.relationships.len(),
            "opened document"
        );
        Ok(doc)
    }

    /// Reads a `.docx` package from any seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive =
            ZipArchive::new(reader).map_err(|e| CommentpackError::document_parse(e, None))?;

        let document_xml = read_part(&mut archive, DOCUMENT_PART)?
            .ok_or_else(|| missing_part(DOCUMENT_PART))?;
        let rels_xml = read_part(&mut archive, RELATIONSHIPS_PART)?;
        if rels_xml.is_none() {
            debug!("no relationship part, hyperlinks will not resolve");
        }

        Self::from_xml(&document_xml, rels_xml.as_deref())
    }

    /// Builds a document from the raw XML of its parts.
    ///
    /// A missing relationship part gives an empty table.
    pub fn from_xml(document_xml: &str, rels_xml: Option<&str>) -> Result<Self> {
        let body = parse_body(document_xml)?;
        let relationships = match rels_xml {
            Some(xml) => parse_relationships(xml)?,
            None => RelationshipTable::new(),
        };
        Ok(Self {
            body,
            relationships,
        })
    }
}

fn missing_part(name: &str) -> CommentpackError {
    CommentpackError::document_parse(ParseErrorKind::MissingPart(name.to_string()), None)
}

/// Reads a part as text, `None` if the archive does not contain it.
fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(CommentpackError::document_parse(e, None)),
    };
    let mut xml = String::new();
    file.read_to_string(&mut xml)
        .map_err(|e| CommentpackError::document_parse(ParseErrorKind::Io(e), None))?;
    Ok(Some(xml))
}

fn xml_error(err: impl Into<quick_xml::Error>) -> CommentpackError {
    CommentpackError::document_parse(ParseErrorKind::Xml(err.into()), None)
}

/// Turns a start tag into an element with its local name and attributes.
fn element_from(start: &BytesStart<'_>) -> Result<RawElement> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut element = RawElement::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(xml_error)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(xml_error)?;
        element.attrs.push((key, value.into_owned()));
    }
    Ok(element)
}

/// Parses an XML document into its root element.
fn parse_tree(xml: &str) -> Result<RawElement> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<RawElement> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_error)? {
            Event::Start(e) => stack.push(element_from(&e)?),
            Event::Empty(e) => {
                let element = element_from(&e)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            Event::Text(e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&e.unescape().map_err(xml_error)?);
                }
            }
            Event::CData(e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(_) => {
                let Some(element) = stack.pop() else {
                    return Err(CommentpackError::document_parse("unbalanced end tag", None));
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            Event::Eof => {
                return Err(CommentpackError::document_parse(
                    "unexpected end of document",
                    None,
                ));
            }
            _ => {}
        }
        buf.clear();
    }
}

/// Returns the direct children of the document body.
///
/// # Errors
///
/// Fails on malformed XML or when there is no `body` element under the root.
pub fn parse_body(document_xml: &str) -> Result<Vec<RawElement>> {
    let root = parse_tree(document_xml)?;
    let body = root
        .children
        .into_iter()
        .find(|e| e.name == "body")
        .ok_or_else(|| CommentpackError::document_parse(ParseErrorKind::MissingBody, None))?;
    debug!(elements = body.children.len(), "parsed document body");
    Ok(body.children)
}

/// Parses a relationship part into id → target.
pub fn parse_relationships(rels_xml: &str) -> Result<RelationshipTable> {
    let root = parse_tree(rels_xml)?;
    let table: RelationshipTable = root
        .children
        .iter()
        .filter(|e| e.name == "Relationship")
        .filter_map(|e| Some((e.attr("Id")?, e.attr("Target")?)))
        .collect();
    debug!(relationships = table.len(), "parsed relationships");
    Ok(table)
}
