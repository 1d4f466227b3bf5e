//! Per-round comment analysis records.
//!
//! Each stored comment can be classified up to [`AnalysisRound::MAX`] times.
//! A round's answer is an [`AnalysisResult`]: a stance plus a set of topic
//! flags, in the JSON shape the classifier returns:
//!
//! ```json
//! {"comment_status": "disagree", "against_shelf": true, "coordination_signs": false}
//! ```
//!
//! Missing flags default to `false`; a missing status stays unset.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CommentpackError, Result};

/// Index of an analysis round, `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct AnalysisRound(u8);

impl AnalysisRound {
    /// Highest supported round.
    pub const MAX: u8 = 5;

    /// Creates a round, rejecting values outside `1..=5`.
    pub fn new(round: u8) -> Result<Self> {
        if (1..=Self::MAX).contains(&round) {
            Ok(Self(round))
        } else {
            Err(CommentpackError::InvalidRound {
                round,
                max: Self::MAX,
            })
        }
    }

    /// Returns the round number.
    pub fn get(self) -> u8 {
        self.0
    }

    /// All rounds, in order.
    pub fn all() -> impl Iterator<Item = AnalysisRound> {
        (1..=Self::MAX).map(AnalysisRound)
    }
}

impl TryFrom<u8> for AnalysisRound {
    type Error = CommentpackError;

    fn try_from(round: u8) -> Result<Self> {
        Self::new(round)
    }
}

impl From<AnalysisRound> for u8 {
    fn from(round: AnalysisRound) -> Self {
        round.0
    }
}

impl fmt::Display for AnalysisRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stance of a comment towards the post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    Support,
    Disagree,
    Unclear,
}

impl CommentStatus {
    /// Stored representation.
    pub fn as_str(self) -> &'static str {
        match self {
            CommentStatus::Support => "support",
            CommentStatus::Disagree => "disagree",
            CommentStatus::Unclear => "unclear",
        }
    }
}

impl fmt::Display for CommentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommentStatus {
    type Err = CommentpackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "support" => Ok(CommentStatus::Support),
            "disagree" => Ok(CommentStatus::Disagree),
            "unclear" => Ok(CommentStatus::Unclear),
            other => Err(CommentpackError::invalid_format(
                "comment status",
                format!("unknown status '{}'. Expected: support, disagree, unclear", other),
            )),
        }
    }
}

/// Classification of one comment in one round.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    pub comment_status: Option<CommentStatus>,
    pub against_northwest: bool,
    pub against_shelf: bool,
    pub against_burrup: bool,
    pub narrative_a: bool,
    pub narrative_b: bool,
    pub accusation_of_lies: bool,
    pub coordination_signs: bool,
}

impl AnalysisResult {
    /// Parses a classifier answer.
    #[cfg(feature = "json-output")]
    pub fn from_json(answer: &str) -> Result<Self> {
        Ok(serde_json::from_str(answer.trim())?)
    }

    /// Builder method to set the stance.
    #[must_use]
    pub fn with_status(mut self, status: CommentStatus) -> Self {
        self.comment_status = Some(status);
        self
    }

    /// Number of topic flags set.
    pub fn flag_count(&self) -> usize {
        [
            self.against_northwest,
            self.against_shelf,
            self.against_burrup,
            self.narrative_a,
            self.narrative_b,
            self.accusation_of_lies,
            self.coordination_signs,
        ]
        .into_iter()
        .filter(|f| *f)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_bounds() {
        assert!(AnalysisRound::new(0).is_err());
        assert_eq!(AnalysisRound::new(1).unwrap().get(), 1);
        assert_eq!(AnalysisRound::new(5).unwrap().get(), 5);
        let err = AnalysisRound::new(6).unwrap_err();
        assert!(matches!(err, CommentpackError::InvalidRound { round: 6, max: 5 }));
    }

    #[test]
    fn test_all_rounds() {
        let rounds: Vec<u8> = AnalysisRound::all().map(AnalysisRound::get).collect();
        assert_eq!(rounds, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Support".parse::<CommentStatus>().unwrap(), CommentStatus::Support);
        assert_eq!(" unclear ".parse::<CommentStatus>().unwrap(), CommentStatus::Unclear);
        assert!("neutral".parse::<CommentStatus>().unwrap_err().is_invalid_format());
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_result_from_partial_json() {
        let result = AnalysisResult::from_json(
            r#"{"comment_status": "disagree", "against_shelf": true}"#,
        )
        .unwrap();
        assert_eq!(result.comment_status, Some(CommentStatus::Disagree));
        assert!(result.against_shelf);
        assert!(!result.coordination_signs);
        assert_eq!(result.flag_count(), 1);
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_result_rejects_bad_json() {
        assert!(AnalysisResult::from_json("not json").is_err());
        assert!(AnalysisResult::from_json(r#"{"comment_status": "maybe"}"#).is_err());
    }

    #[test]
    fn test_round_deserialize_validates() {
        assert!(serde_json::from_str::<AnalysisRound>("3").is_ok());
        assert!(serde_json::from_str::<AnalysisRound>("9").is_err());
    }
}
