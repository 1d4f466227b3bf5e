//! Thread statistics.

use std::collections::HashSet;

use crate::comment::ThreadedComment;

/// Statistics about an extracted thread
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThreadStats {
    /// Number of comments
    pub total: usize,
    /// Comments without a parent
    pub top_level: usize,
    /// Comments resolved to a parent
    pub replies: usize,
    /// Distinct non-empty authors
    pub unique_commenters: usize,
    /// Comments whose author link text was empty
    pub anonymous: usize,
}

impl ThreadStats {
    /// Computes the statistics of a threaded list.
    pub fn from_comments(comments: &[ThreadedComment]) -> Self {
        let replies = comments.iter().filter(|c| !c.is_top_level()).count();
        let unique_commenters = comments
            .iter()
            .map(ThreadedComment::author)
            .filter(|a| !a.is_empty())
            .collect::<HashSet<_>>()
            .len();
        let anonymous = comments.iter().filter(|c| c.author().is_empty()).count();

        Self {
            total: comments.len(),
            top_level: comments.len() - replies,
            replies,
            unique_commenters,
            anonymous,
        }
    }

    /// Share of comments that are replies, in percent.
    pub fn reply_ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.replies as f64 / self.total as f64 * 100.0
    }
}
