//! Storage collaborators for extracted comments.
//!
//! A [`CommentStore`] persists one comment per call and hands back the durable
//! id it assigned. [`import`] drives a store through one extraction, strictly
//! in document order, so each reply can reference the id its parent got.
//!
//! - [`MemoryStore`]: keeps records in a `Vec`, ids 1, 2, 3...
//! - [`SqliteStore`]: the `comments_analysis` table (feature `sqlite`)

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

use tracing::{debug, info};

use crate::comment::{CommentId, Extraction, PostMetadata, RawComment, StoredComment};
use crate::config::ExtractConfig;
use crate::error::Result;
use crate::thread::ThreadBuilder;

/// One comment as handed to a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentRecord<'a> {
    /// The post the comment belongs to
    pub post: &'a PostMetadata,
    /// The comment itself
    pub comment: &'a RawComment,
    /// Durable id of the parent, already assigned by this store
    pub parent_id: Option<CommentId>,
}

/// Persists comments one at a time.
pub trait CommentStore {
    /// Stores a comment and returns its durable id.
    ///
    /// Ids must be unique within the store and returned before the next call.
    fn store(&mut self, record: &CommentRecord<'_>) -> Result<CommentId>;
}

/// In-memory store, mostly for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<StoredRecord>,
}

/// A record kept by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    /// Id assigned on insert
    pub id: CommentId,
    /// Post the comment belongs to
    pub post: PostMetadata,
    /// The stored comment
    pub comment: RawComment,
    /// Id of the parent comment, if it is a reply
    pub parent_id: Option<CommentId>,
}

impl MemoryStore {
    /// Creates an empty store. The first id it assigns is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records stored so far, in insertion order.
    pub fn records(&self) -> &[StoredRecord] {
        &self.records
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing was stored yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CommentStore for MemoryStore {
    fn store(&mut self, record: &CommentRecord<'_>) -> Result<CommentId> {
        let id = self.records.last().map_or(1, |r| r.id + 1);
        self.records.push(StoredRecord {
            id,
            post: record.post.clone(),
            comment: record.comment.clone(),
            parent_id: record.parent_id,
        });
        Ok(id)
    }
}

/// Stores every comment of an extraction, in order.
///
/// Parents are resolved against the ids this store returned, with the same
/// last-writer-wins rule used for in-memory threading. A failing `store` call
/// aborts the import; comments stored before it stay stored.
pub fn import<S: CommentStore>(extraction: &Extraction, store: &mut S) -> Result<Vec<StoredComment>> {
    import_with(extraction, store, &ExtractConfig::default())
}

/// Like [`import`], with the mention punctuation from `config`.
pub fn import_with<S: CommentStore>(
    extraction: &Extraction,
    store: &mut S,
    config: &ExtractConfig,
) -> Result<Vec<StoredComment>> {
    let mut builder = ThreadBuilder::<CommentId>::new(config.mention_trim.as_str());
    let mut stored = Vec::with_capacity(extraction.comments.len());

    for threaded in &extraction.comments {
        let comment = &threaded.comment;
        let parent_id = builder.resolve(comment);
        let id = store.store(&CommentRecord {
            post: &extraction.post,
            comment,
            parent_id,
        })?;
        builder.record(comment.author(), id);
        debug!(id, ?parent_id, author = comment.author(), "stored comment");

        stored.push(StoredComment {
            id,
            parent_id,
            comment: threaded.clone(),
        });
    }

    info!(
        post = %extraction.post.client_post_id,
        stored = stored.len(),
        "imported comments"
    );
    Ok(stored)
}
