//! Document body elements and their classification into blocks.
//!
//! A [`RawElement`] is a light element tree for one body child of the source
//! document (a `w:p`, `w:tbl`, `w:sectPr`, ...). [`classify`] turns it into a
//! [`Block`], the closed set of variants every downstream stage matches on.
//!
//! ```
//! use commentpack::block::{Block, RawElement, classify};
//!
//! let paragraph = RawElement::new("p")
//!     .with_child(RawElement::new("r").with_child(RawElement::text_run("hello")));
//!
//! assert_eq!(classify(&paragraph), Block::paragraph("hello"));
//! ```

use serde::{Deserialize, Serialize};

/// Local name of a text-run leaf.
const TEXT_RUN: &str = "t";
/// Local name of an embedded drawing.
const DRAWING: &str = "drawing";
/// Local name of a hyperlink wrapper.
const HYPERLINK: &str = "hyperlink";
/// Qualified name of the relationship id attribute on hyperlinks.
const REL_ID_ATTR: &str = "r:id";

/// A raw element of the document body.
///
/// Names are local names (namespace prefix removed); attribute keys keep their
/// qualified form (`r:id`, `w:anchor`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawElement {
    /// Local element name
    pub name: String,
    /// Attributes as (qualified key, unescaped value)
    pub attrs: Vec<(String, String)>,
    /// Character data directly inside this element
    pub text: String,
    /// Child elements in document order
    pub children: Vec<RawElement>,
}

impl RawElement {
    /// Creates an element with no attributes, text, or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a `t` text-run leaf.
    pub fn text_run(text: impl Into<String>) -> Self {
        Self {
            name: TEXT_RUN.to_string(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// Builder method to append a child element.
    #[must_use]
    pub fn with_child(mut self, child: RawElement) -> Self {
        self.children.push(child);
        self
    }

    /// Builder method to add an attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    /// Returns the value of an attribute by qualified key.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Depth-first, pre-order walk over this element and all descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Pre-order iterator returned by [`RawElement::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a RawElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a RawElement;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// A classified document block.
///
/// Identity is positional: a block is addressed by its index in the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Block {
    /// Plain paragraph (or any element without drawings or hyperlinks).
    Paragraph {
        /// Trimmed concatenated text
        text: String,
    },
    /// Element that embeds at least one drawing. Text is kept but never used
    /// as comment content.
    Image {
        /// Trimmed concatenated text
        text: String,
    },
    /// Paragraph carrying a hyperlink.
    Link {
        /// Trimmed concatenated text (the account display name)
        text: String,
        /// Relationship id of the first hyperlink, if it had one
        rel_id: Option<String>,
    },
}

impl Block {
    /// Creates a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }

    /// Creates an image block without text.
    pub fn image() -> Self {
        Block::Image {
            text: String::new(),
        }
    }

    /// Creates a hyperlink-bearing paragraph.
    pub fn link(text: impl Into<String>, rel_id: impl Into<String>) -> Self {
        Block::Link {
            text: text.into(),
            rel_id: Some(rel_id.into()),
        }
    }

    /// Creates a hyperlink-bearing paragraph without a relationship id.
    pub fn link_without_target(text: impl Into<String>) -> Self {
        Block::Link {
            text: text.into(),
            rel_id: None,
        }
    }

    /// Returns the block text.
    pub fn text(&self) -> &str {
        match self {
            Block::Paragraph { text } | Block::Image { text } | Block::Link { text, .. } => text,
        }
    }

    /// Returns `true` for image blocks.
    pub fn is_image(&self) -> bool {
        matches!(self, Block::Image { .. })
    }

    /// Returns `true` for hyperlink-bearing paragraphs.
    pub fn is_link(&self) -> bool {
        matches!(self, Block::Link { .. })
    }
}

/// Classifies a raw body element.
///
/// Any drawing makes the element an [`Block::Image`], whatever its text. A
/// hyperlink makes it a [`Block::Link`] carrying the first relationship id
/// found among its hyperlinks. Everything else is a
/// [`Block::Paragraph`]; elements without text runs end up as empty paragraphs.
pub fn classify(element: &RawElement) -> Block {
    let mut text = String::new();
    let mut has_drawing = false;
    let mut hyperlink: Option<Option<String>> = None;

    for node in element.descendants() {
        match node.name.as_str() {
            TEXT_RUN => text.push_str(&node.text),
            DRAWING => has_drawing = true,
            HYPERLINK => match node.attr(REL_ID_ATTR) {
                Some(id) if !matches!(hyperlink, Some(Some(_))) => {
                    hyperlink = Some(Some(id.to_string()));
                }
                None if hyperlink.is_none() => hyperlink = Some(None),
                _ => {}
            },
            _ => {}
        }
    }

    let text = text.trim().to_string();
    if has_drawing {
        return Block::Image { text };
    }
    match hyperlink {
        Some(rel_id) => Block::Link { text, rel_id },
        None => Block::Paragraph { text },
    }
}

/// Classifies every element of a document body, preserving order.
pub fn classify_all(elements: &[RawElement]) -> Vec<Block> {
    elements.iter().map(classify).collect()
}

/// Normalizes text for marker matching: lower-cased, whitespace removed.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
