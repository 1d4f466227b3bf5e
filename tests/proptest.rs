//! Property-based tests for commentpack.
//!
//! These tests generate random block streams and comment lists to find edge
//! cases in segmentation and threading.

use proptest::prelude::*;

use commentpack::block::Block;
use commentpack::relationships::RelationshipTable;
use commentpack::segmenter::segment;
use commentpack::thread::build_threads;
use commentpack::{RawComment, ThreadedComment};

const MARKER: &str = "client_post_summary=";

/// Generate a random comment using fast strategies (no regex!)
fn arb_comment() -> impl Strategy<Value = RawComment> {
    (
        prop::sample::select(vec![
            "alice".to_string(),
            "bob".to_string(),
            "carol".to_string(),
            "Иван".to_string(),
            String::new(),
        ]),
        prop::sample::select(vec![
            "Hello".to_string(),
            "@alice hi".to_string(),
            "@bob, agreed".to_string(),
            "@carol?".to_string(),
            "@Иван: привет".to_string(),
            "@".to_string(),
            "@@bob".to_string(),
            "email me@bob".to_string(),
            String::new(),
            "Special;chars\"here\nnewline".to_string(),
        ]),
    )
        .prop_map(|(author, text)| RawComment::new(author, text))
}

fn arb_comments(max_len: usize) -> impl Strategy<Value = Vec<RawComment>> {
    prop::collection::vec(arb_comment(), 0..max_len)
}

/// Any block, including links with and without targets.
fn arb_block() -> impl Strategy<Value = Block> {
    prop_oneof![
        3 => Just(Block::image()),
        2 => prop::sample::select(vec!["bob", "carol", ""]).prop_map(|t| Block::link(t, "r1")),
        1 => prop::sample::select(vec!["x", ""]).prop_map(Block::link_without_target),
        3 => prop::sample::select(vec!["", "text", "@bob hi", "client_post_summary=x"])
            .prop_map(Block::paragraph),
    ]
}

/// One well-formed comment unit: an avatar chain, a link, some paragraphs.
fn arb_unit() -> impl Strategy<Value = Vec<Block>> {
    (1..4_usize, 0..4_usize, prop::sample::select(vec!["bob", "carol", "dave"])).prop_map(
        |(images, paragraphs, author)| {
            let mut blocks = vec![Block::image(); images];
            blocks.push(Block::link(author, "r1"));
            for i in 0..paragraphs {
                blocks.push(Block::paragraph(format!("line {}", i)));
            }
            blocks
        },
    )
}

fn table() -> RelationshipTable {
    RelationshipTable::new().with("r1", "https://social.example/u")
}

fn check_parents(threaded: &[ThreadedComment]) -> Result<(), TestCaseError> {
    for (i, comment) in threaded.iter().enumerate() {
        if let Some(parent) = comment.parent() {
            prop_assert!(parent < i);
            prop_assert_eq!(Some(threaded[parent].author()), comment.mention());
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // SEGMENTER PROPERTIES
    // ============================================

    /// N well-formed units after the marker give exactly N comments
    #[test]
    fn well_formed_units_give_one_comment_each(units in prop::collection::vec(arb_unit(), 0..20)) {
        let mut blocks = vec![Block::paragraph("client_post_summary = x"), Block::paragraph("more")];
        for unit in &units {
            blocks.extend(unit.iter().cloned());
        }

        let seg = segment(&blocks, &table(), MARKER);

        prop_assert_eq!(seg.comments.len(), units.len());
        prop_assert!(seg.warnings.is_empty());
    }

    /// Nothing before the marker becomes a comment
    #[test]
    fn no_comments_without_marker(units in prop::collection::vec(arb_unit(), 0..10)) {
        let blocks: Vec<Block> = units.into_iter().flatten().collect();
        let seg = segment(&blocks, &table(), MARKER);
        prop_assert!(seg.comments.is_empty());
    }

    /// Random block streams never panic and never yield more comments than links
    #[test]
    fn segment_never_panics(blocks in prop::collection::vec(arb_block(), 0..60)) {
        let seg = segment(&blocks, &table(), MARKER);
        let links = blocks.iter().filter(|b| b.is_link()).count();
        prop_assert!(seg.comments.len() <= links);
    }

    /// Segmentation is a pure function of its input
    #[test]
    fn segment_is_deterministic(blocks in prop::collection::vec(arb_block(), 0..60)) {
        prop_assert_eq!(segment(&blocks, &table(), MARKER), segment(&blocks, &table(), MARKER));
    }

    // ============================================
    // THREADING PROPERTIES
    // ============================================

    /// Threading preserves count and order
    #[test]
    fn threading_preserves_comments(comments in arb_comments(40)) {
        let threaded = build_threads(comments.clone());
        prop_assert_eq!(threaded.len(), comments.len());
        for (t, c) in threaded.iter().zip(&comments) {
            prop_assert_eq!(&t.comment, c);
        }
    }

    /// Parents come earlier and are authored by the mentioned account
    #[test]
    fn parents_precede_children(comments in arb_comments(40)) {
        check_parents(&build_threads(comments))?;
    }

    /// A parent is the latest earlier comment by the mentioned account
    #[test]
    fn parent_is_last_writer(comments in arb_comments(40)) {
        let threaded = build_threads(comments);
        for (i, comment) in threaded.iter().enumerate() {
            if let Some(parent) = comment.parent() {
                let author = threaded[parent].author();
                prop_assert!(threaded[parent + 1..i].iter().all(|c| c.author() != author));
            }
        }
    }

    /// Threading the same input twice gives the same result
    #[test]
    fn threading_is_deterministic(comments in arb_comments(40)) {
        prop_assert_eq!(build_threads(comments.clone()), build_threads(comments));
    }
}
