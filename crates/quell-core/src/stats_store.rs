//! SQLite persistence for per-run statistics.
//!
//! Each finished run is stored as one row keyed by a run name (usually the
//! package or project being checked), so the next run can compare against
//! the previous one.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::config::StatsConfig;
use crate::stats::LinterStats;

/// Errors from the statistics store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

/// A run loaded back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedRun {
    pub id: i64,
    pub run_name: String,
    pub created_at: String,
    pub msg_status: u32,
    pub stats: LinterStats,
}

pub struct StatsStore {
    conn: Connection,
}

impl StatsStore {
    /// Open or create the stats database at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open the store named by the config, relative to the quell directory.
    /// Returns `None` when persistence is turned off.
    pub fn from_config(quell_dir: &Path, config: &StatsConfig) -> Result<Option<Self>, StoreError> {
        if !config.persistent {
            tracing::debug!("stats persistence disabled");
            return Ok(None);
        }
        Self::open(&quell_dir.join(&config.db)).map(Some)
    }

    /// Create an in-memory store (for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS runs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                run_name TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                msg_status INTEGER NOT NULL DEFAULT 0,
                stats TEXT NOT NULL DEFAULT '{}'
            );
            CREATE INDEX IF NOT EXISTS idx_runs_name ON runs(run_name);",
        )?;
        Ok(())
    }

    /// Persist the statistics of a finished run. Returns the new row id.
    pub fn save_run(
        &self,
        run_name: &str,
        msg_status: u32,
        stats: &LinterStats,
    ) -> Result<i64, StoreError> {
        let stats_json = serde_json::to_string(stats)?;
        self.conn.execute(
            "INSERT INTO runs (run_name, msg_status, stats) VALUES (?1, ?2, ?3)",
            params![run_name, msg_status, stats_json],
        )?;
        tracing::debug!(run_name, msg_status, "saved run statistics");
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent run saved under `run_name`.
    pub fn load_latest(&self, run_name: &str) -> Result<Option<SavedRun>, StoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, run_name, created_at, msg_status, stats
                 FROM runs WHERE run_name = ?1 ORDER BY id DESC LIMIT 1",
                params![run_name],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, u32>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;
        let Some((id, run_name, created_at, msg_status, stats_json)) = row else {
            return Ok(None);
        };
        Ok(Some(SavedRun {
            id,
            run_name,
            created_at,
            msg_status,
            stats: serde_json::from_str(&stats_json)?,
        }))
    }

    /// Number of runs stored under `run_name`.
    pub fn run_count(&self, run_name: &str) -> Result<u64, StoreError> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM runs WHERE run_name = ?1",
            params![run_name],
            |r| r.get(0),
        )?;
        Ok(count)
    }
}
