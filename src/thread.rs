//! Reply threading through `@mention` back-references.
//!
//! A comment whose text starts with `@name` replies to the most recent comment
//! written by `name` before it. Every comment, parent or not, then becomes the
//! most recent comment of its own author.

use std::collections::HashMap;

use crate::comment::{RawComment, ThreadedComment};
use crate::config::{DEFAULT_MENTION_TRIM, ExtractConfig};

/// Returns the account named by a leading `@mention`.
///
/// The mention is the first whitespace-delimited token with one leading `@`
/// removed and any trailing characters from `trim_chars` stripped. Returns
/// `None` when the text does not start with `@` or the token is empty.
///
/// ```
/// use commentpack::thread::mentioned_account;
///
/// assert_eq!(mentioned_account("@bob, agreed", ".,:;!?"), Some("bob"));
/// assert_eq!(mentioned_account("hi @bob", ".,:;!?"), None);
/// assert_eq!(mentioned_account("@!", ".,:;!?"), None);
/// ```
pub fn mentioned_account<'a>(text: &'a str, trim_chars: &str) -> Option<&'a str> {
    if !text.starts_with('@') {
        return None;
    }
    let token = text.split_whitespace().next()?;
    let name = token
        .strip_prefix('@')?
        .trim()
        .trim_end_matches(|c: char| trim_chars.contains(c));
    (!name.is_empty()).then_some(name)
}

/// Last-writer-wins index from account to that account's latest comment.
///
/// `K` is whatever identifies a comment for the caller: a list position when
/// threading in memory, a durable id when importing into a store.
#[derive(Debug, Clone)]
pub struct ThreadBuilder<K> {
    last_comment: HashMap<String, K>,
    mention_trim: String,
}

impl<K: Copy> Default for ThreadBuilder<K> {
    fn default() -> Self {
        Self::new(DEFAULT_MENTION_TRIM)
    }
}

impl<K: Copy> ThreadBuilder<K> {
    /// Creates an empty index.
    pub fn new(mention_trim: impl Into<String>) -> Self {
        Self {
            last_comment: HashMap::new(),
            mention_trim: mention_trim.into(),
        }
    }

    /// Returns the parent of `comment`, looked up before it is recorded.
    pub fn resolve(&self, comment: &RawComment) -> Option<K> {
        let account = mentioned_account(comment.text(), &self.mention_trim)?;
        self.last_comment.get(account).copied()
    }

    /// Makes `key` the latest comment of `author`.
    pub fn record(&mut self, author: &str, key: K) {
        self.last_comment.insert(author.to_string(), key);
    }

    /// Latest comment of `author`, if any.
    pub fn last_comment(&self, author: &str) -> Option<K> {
        self.last_comment.get(author).copied()
    }

    /// Number of distinct authors seen.
    pub fn len(&self) -> usize {
        self.last_comment.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.last_comment.is_empty()
    }
}

/// Threads comments using the default mention punctuation.
pub fn build_threads(comments: Vec<RawComment>) -> Vec<ThreadedComment> {
    build_threads_with(comments, &ExtractConfig::default())
}

/// Threads comments, in order, with a fresh index.
pub fn build_threads_with(comments: Vec<RawComment>, config: &ExtractConfig) -> Vec<ThreadedComment> {
    let mut builder = ThreadBuilder::<usize>::new(config.mention_trim.as_str());
    comments
        .into_iter()
        .enumerate()
        .map(|(position, comment)| {
            let parent = builder.resolve(&comment);
            builder.record(comment.author(), position);
            ThreadedComment { comment, parent }
        })
        .collect()
}
