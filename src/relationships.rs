//! Relationship table and hyperlink resolution.
//!
//! Hyperlinks in the document body point at their targets indirectly, through
//! relationship ids (`rId5`) listed in the document's relationship part.

use std::collections::HashMap;

use crate::block::Block;

/// Mapping from relationship id to target URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipTable {
    targets: HashMap<String, String>,
}

impl RelationshipTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a relationship.
    pub fn insert(&mut self, id: impl Into<String>, target: impl Into<String>) {
        self.targets.insert(id.into(), target.into());
    }

    /// Builder method to add a relationship.
    #[must_use]
    pub fn with(mut self, id: impl Into<String>, target: impl Into<String>) -> Self {
        self.insert(id, target);
        self
    }

    /// Returns the target for a relationship id.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.targets.get(id).map(String::as_str)
    }

    /// Number of relationships.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns `true` if the table has no relationships.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RelationshipTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            targets: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Resolves the account behind a hyperlink block.
///
/// Returns `(account_id, account_url)`. The id is the trimmed block text and may be
/// empty. The url is empty when the block has no relationship id or the id is
/// not in the table; that is a degraded result, not an error.
///
/// ```
/// use commentpack::block::Block;
/// use commentpack::relationships::{RelationshipTable, resolve};
///
/// let table = RelationshipTable::new().with("r1", "http://x");
/// assert_eq!(resolve(&Block::link("alice", "r1"), &table), ("alice".into(), "http://x".into()));
/// assert_eq!(resolve(&Block::link("alice", "r2"), &table), ("alice".into(), String::new()));
/// ```
pub fn resolve(block: &Block, table: &RelationshipTable) -> (String, String) {
    let url = match block {
        Block::Link {
            rel_id: Some(id), ..
        } => table.get(id).unwrap_or_default().to_string(),
        _ => String::new(),
    };
    (block.text().trim().to_string(), url)
}
