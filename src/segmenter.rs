//! Comment segmentation over a classified block stream.
//!
//! The export has no explicit comment delimiters. A comment starts where a run
//! of images (the author's avatar) is immediately followed by a hyperlink
//! paragraph (the author's profile); the paragraphs after that are the comment
//! text, up to the next such avatar run.
//!
//! ```text
//! ... client_post_summary=...      SeekingMarker
//! [img][img] [link: bob]           Scanning -> opens bob
//! "hello"                          Collecting
//! [img]     [link: carol]          boundary: emit bob, reopen at [img]
//! "@bob hi"                        Collecting
//! <end>                            flush carol
//! ```

use tracing::debug;

use crate::block::{Block, normalize};
use crate::comment::{ExtractionWarning, RawComment};
use crate::relationships::{RelationshipTable, resolve};

/// A maximal run of consecutive image blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageChain {
    /// Index of the first image
    pub start: usize,
    /// Number of images in the run (at least 1)
    pub len: usize,
}

impl ImageChain {
    /// Index of the block right after the run.
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Measures the image run starting at `start`, if that block is an image.
pub fn image_chain_at(blocks: &[Block], start: usize) -> Option<ImageChain> {
    let len = blocks
        .get(start..)?
        .iter()
        .take_while(|b| b.is_image())
        .count();
    (len > 0).then_some(ImageChain { start, len })
}

/// Returns the avatar chain at `start` and the index of its author link, when
/// the image run there is followed by a hyperlink paragraph.
fn avatar_at(blocks: &[Block], start: usize) -> Option<(ImageChain, usize)> {
    let chain = image_chain_at(blocks, start)?;
    blocks
        .get(chain.end())
        .filter(|b| b.is_link())
        .map(|_| (chain, chain.end()))
}

/// Output of one segmentation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    /// Comments in the order they were opened
    pub comments: Vec<RawComment>,
    /// Degraded conditions met along the way
    pub warnings: Vec<ExtractionWarning>,
}

#[derive(Debug)]
enum State {
    SeekingMarker,
    Scanning,
    Collecting(RawComment),
}

/// Splits the blocks after the summary marker into raw comments.
///
/// Blocks before the first paragraph containing `marker` (normalized) belong
/// to the header and are skipped. An image run followed by a hyperlink opens a
/// comment whose author comes from that hyperlink; an image run without one is
/// inline content and is dropped. Comment lines are trimmed and blank ones are
/// skipped.
pub fn segment(blocks: &[Block], table: &RelationshipTable, marker: &str) -> Segmentation {
    let marker = normalize(marker);
    let mut out = Segmentation::default();
    let mut state = State::SeekingMarker;
    let mut i = 0;

    while i < blocks.len() {
        let block = &blocks[i];
        state = match state {
            State::SeekingMarker => {
                i += 1;
                if !block.is_image() && normalize(block.text()).contains(&marker) {
                    State::Scanning
                } else {
                    State::SeekingMarker
                }
            }
            State::Scanning => match image_chain_at(blocks, i) {
                Some(chain) => match avatar_at(blocks, i) {
                    Some((_, link_index)) => {
                        let comment = open_comment(blocks, link_index, table, &mut out.warnings);
                        i = link_index + 1;
                        State::Collecting(comment)
                    }
                    None => {
                        i = chain.end();
                        State::Scanning
                    }
                },
                None => {
                    i += 1;
                    State::Scanning
                }
            },
            State::Collecting(mut comment) => match image_chain_at(blocks, i) {
                Some(_) if avatar_at(blocks, i).is_some() => {
                    // Leave the cursor on this image so Scanning reopens here.
                    out.comments.push(comment);
                    State::Scanning
                }
                Some(chain) => {
                    i = chain.end();
                    State::Collecting(comment)
                }
                None => {
                    let text = block.text().trim();
                    if !text.is_empty() {
                        comment.push_line(text);
                    }
                    i += 1;
                    State::Collecting(comment)
                }
            },
        };
    }

    if let State::Collecting(comment) = state {
        out.comments.push(comment);
    }

    debug!(
        comments = out.comments.len(),
        warnings = out.warnings.len(),
        "segmented block stream"
    );
    out
}

/// Opens a comment authored by the hyperlink block at `link_index`.
fn open_comment(
    blocks: &[Block],
    link_index: usize,
    table: &RelationshipTable,
    warnings: &mut Vec<ExtractionWarning>,
) -> RawComment {
    let link = &blocks[link_index];
    let (account_id, account_url) = resolve(link, table);

    if account_url.is_empty() {
        let rel_id = match link {
            Block::Link { rel_id, .. } => rel_id.clone(),
            _ => None,
        };
        warnings.push(ExtractionWarning::UnresolvedHyperlinkTarget {
            block: link_index,
            rel_id,
        });
    }
    if account_id.is_empty() {
        warnings.push(ExtractionWarning::EmptySegment { block: link_index });
    }

    RawComment::new(account_id, String::new()).with_link(account_url)
}
