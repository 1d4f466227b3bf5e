//! SQLite-backed comment store.

use std::path::Path;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::debug;

use super::{CommentRecord, CommentStore, StoredRecord};
use crate::analysis::{AnalysisResult, AnalysisRound};
use crate::comment::{CommentId, PostMetadata, RawComment};
use crate::error::Result;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS comments_analysis (
        id                     INTEGER PRIMARY KEY AUTOINCREMENT,
        comment_text           TEXT NOT NULL,
        commenter_account_id   TEXT,
        commenter_account_link TEXT,
        client_account_id      TEXT,
        client_account_link    TEXT,
        client_post_id         TEXT,
        client_post_summary    TEXT,
        parent_comment_id      INTEGER REFERENCES comments_analysis(id),
        last_analysis_date     TEXT,
        created_at             TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_comments_post ON comments_analysis(client_post_id);

    CREATE TABLE IF NOT EXISTS comment_analyses (
        comment_id         INTEGER NOT NULL REFERENCES comments_analysis(id),
        round              INTEGER NOT NULL CHECK (round BETWEEN 1 AND 5),
        analysis_date      TEXT NOT NULL,
        comment_status     TEXT CHECK (comment_status IN ('support', 'disagree', 'unclear')),
        against_northwest  BOOLEAN NOT NULL DEFAULT 0,
        against_shelf      BOOLEAN NOT NULL DEFAULT 0,
        against_burrup     BOOLEAN NOT NULL DEFAULT 0,
        narrative_a        BOOLEAN NOT NULL DEFAULT 0,
        narrative_b        BOOLEAN NOT NULL DEFAULT 0,
        accusation_of_lies BOOLEAN NOT NULL DEFAULT 0,
        coordination_signs BOOLEAN NOT NULL DEFAULT 0,
        PRIMARY KEY (comment_id, round)
    );
";

const SELECT_COMMENT: &str = "SELECT id, comment_text, commenter_account_id, commenter_account_link,
            client_account_id, client_account_link, client_post_id, client_post_summary,
            parent_comment_id
     FROM comments_analysis";

/// Comment store over a SQLite database.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (creating if needed) a database file and its schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        debug!(path = %path.as_ref().display(), "opened comment database");
        Self::init(conn)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Number of stored comments.
    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM comments_analysis", [], |row| row.get(0))?;
        Ok(usize::try_from(n).unwrap_or_default())
    }

    /// Comments of one post, in insertion order.
    pub fn fetch_post_comments(&self, post_id: &str) -> Result<Vec<StoredRecord>> {
        let sql = format!("{SELECT_COMMENT} WHERE client_post_id = ?1 ORDER BY id");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([post_id], record_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Comments never analyzed, in insertion order.
    pub fn fetch_unanalyzed(&self) -> Result<Vec<StoredRecord>> {
        let sql = format!("{SELECT_COMMENT} WHERE last_analysis_date IS NULL ORDER BY id");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], record_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Saves (or replaces) the analysis of a comment for one round and stamps
    /// the comment's last analysis date.
    pub fn save_analysis(
        &mut self,
        comment_id: CommentId,
        round: AnalysisRound,
        result: &AnalysisResult,
    ) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT OR REPLACE INTO comment_analyses (
                comment_id, round, analysis_date, comment_status,
                against_northwest, against_shelf, against_burrup,
                narrative_a, narrative_b, accusation_of_lies, coordination_signs
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                comment_id,
                round.get(),
                now,
                result.comment_status.map(|s| s.as_str()),
                result.against_northwest,
                result.against_shelf,
                result.against_burrup,
                result.narrative_a,
                result.narrative_b,
                result.accusation_of_lies,
                result.coordination_signs,
            ],
        )?;
        tx.execute(
            "UPDATE comments_analysis SET last_analysis_date = ?1 WHERE id = ?2",
            params![now, comment_id],
        )?;
        tx.commit()?;
        debug!(comment_id, round = round.get(), "saved analysis");
        Ok(())
    }

    /// Loads the analysis of a comment for one round, if saved.
    pub fn load_analysis(
        &self,
        comment_id: CommentId,
        round: AnalysisRound,
    ) -> Result<Option<AnalysisResult>> {
        let row = self
            .conn
            .query_row(
                "SELECT comment_status, against_northwest, against_shelf, against_burrup,
                        narrative_a, narrative_b, accusation_of_lies, coordination_signs
                 FROM comment_analyses WHERE comment_id = ?1 AND round = ?2",
                params![comment_id, round.get()],
                |row| {
                    let status: Option<String> = row.get(0)?;
                    let result = AnalysisResult {
                        comment_status: None,
                        against_northwest: row.get(1)?,
                        against_shelf: row.get(2)?,
                        against_burrup: row.get(3)?,
                        narrative_a: row.get(4)?,
                        narrative_b: row.get(5)?,
                        accusation_of_lies: row.get(6)?,
                        coordination_signs: row.get(7)?,
                    };
                    Ok((status, result))
                },
            )
            .optional()?;

        let Some((status, mut result)) = row else {
            return Ok(None);
        };
        result.comment_status = status.as_deref().map(str::parse).transpose()?;
        Ok(Some(result))
    }
}

impl CommentStore for SqliteStore {
    fn store(&mut self, record: &CommentRecord<'_>) -> Result<CommentId> {
        let post = record.post;
        let comment = record.comment;
        self.conn.execute(
            "INSERT INTO comments_analysis (
                comment_text, commenter_account_id, commenter_account_link,
                client_account_id, client_account_link, client_post_id, client_post_summary,
                parent_comment_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                comment.comment_text,
                comment.commenter_account_id,
                comment.commenter_account_link,
                post.client_account_id,
                post.client_account_link,
                post.client_post_id,
                post.client_post_summary,
                record.parent_id,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<StoredRecord> {
    Ok(StoredRecord {
        id: row.get(0)?,
        comment: RawComment {
            comment_text: row.get(1)?,
            commenter_account_id: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            commenter_account_link: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        },
        post: PostMetadata {
            client_account_id: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            client_account_link: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
            client_post_id: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
            client_post_summary: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
        },
        parent_id: row.get(8)?,
    })
}
