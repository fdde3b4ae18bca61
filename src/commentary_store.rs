use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

use crate::persist::app_cache_dir;

#[derive(Debug, Error)]
#[error("commentary store error: {0}")]
pub struct StoreError(#[from] rusqlite::Error);

/// Single-table key-value store for matchup commentary, keyed by the
/// ordered (home_team, away_team) pair. One row per key, enforced by the
/// unique constraint rather than a read-then-write.
pub struct CommentaryStore {
    conn: Connection,
}

impl CommentaryStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let conn = Connection::open(path)?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Stored text for the key, or an empty string when no record exists.
    /// Absence is not an error.
    pub fn load(&self, home_team: &str, away_team: &str) -> Result<String, StoreError> {
        let text = self
            .conn
            .query_row(
                "SELECT commentary FROM game_commentary
                 WHERE home_team = ?1 AND away_team = ?2",
                params![home_team, away_team],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(text.unwrap_or_default())
    }

    pub fn save(&self, home_team: &str, away_team: &str, text: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO game_commentary (home_team, away_team, commentary, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(home_team, away_team) DO UPDATE SET
                 commentary = excluded.commentary,
                 updated_at = excluded.updated_at",
            params![home_team, away_team, text, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn record_count(&self) -> Result<i64, StoreError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM game_commentary", [], |row| {
                row.get::<_, i64>(0)
            })?;
        Ok(count)
    }
}

pub fn default_db_path() -> Option<PathBuf> {
    app_cache_dir().map(|dir| dir.join("commentary.db"))
}

fn init_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode = WAL;
        CREATE TABLE IF NOT EXISTS game_commentary (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            home_team TEXT NOT NULL,
            away_team TEXT NOT NULL,
            commentary TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE(home_team, away_team)
        );
        "#,
    )
}
