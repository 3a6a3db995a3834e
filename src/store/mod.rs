//! Flat key-value persistence over SQLite: one row per logical slice, JSON
//! values, RFC 3339 timestamps on the wire. Best effort only — each slice
//! saves independently and no cross-record transaction is attempted.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};

/// Record keys, one per logical slice of core state.
pub mod keys {
    pub const SETTINGS: &str = "settings";
    pub const TIMER: &str = "timer";
    pub const SESSIONS: &str = "sessions";
    pub const STATS: &str = "stats";
}

pub struct KvStore {
    conn: Connection,
    path: PathBuf,
}

impl KvStore {
    pub fn open(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create store directory {}", parent.display())
            })?;
        }

        let conn = Connection::open(&path)
            .with_context(|| format!("failed to open store at {}", path.display()))?;

        if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
            error!("Failed to enable WAL mode: {err}");
        }

        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )
        .context("failed to create kv table")?;

        info!("Store initialized at {}", path.display());
        Ok(Self { conn, path })
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Read one record, deserializing its JSON payload. Absent keys are not
    /// an error; they come back as `None` so first runs fall through to
    /// defaults.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let raw: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .with_context(|| format!("failed to read record '{key}'"))?;

        match raw {
            Some(json) => {
                let value = serde_json::from_str(&json)
                    .with_context(|| format!("failed to parse record '{key}'"))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Write one record, replacing any previous value under the key.
    pub fn put_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)
            .with_context(|| format!("failed to serialize record '{key}'"))?;

        self.conn
            .execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                                updated_at = excluded.updated_at",
                params![key, json, Utc::now().to_rfc3339()],
            )
            .with_context(|| format!("failed to write record '{key}'"))?;
        Ok(())
    }

    pub fn delete(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .with_context(|| format!("failed to delete record '{key}'"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_store(test_name: &str) -> (KvStore, PathBuf) {
        let counter = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = env::temp_dir().join(format!(
            "taskmaster_test_{}_{}_{}",
            std::process::id(),
            test_name,
            counter
        ));
        let _ = fs::remove_dir_all(&dir);
        let store = KvStore::open(dir.join("store.sqlite3")).unwrap();
        (store, dir)
    }

    #[test]
    fn absent_key_reads_as_none() {
        let (store, dir) = temp_store("absent");
        let value: Option<Vec<String>> = store.get_json("missing").unwrap();
        assert!(value.is_none());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn put_then_get_round_trips() {
        let (store, dir) = temp_store("roundtrip");

        store.put_json(keys::SESSIONS, &vec!["a", "b"]).unwrap();
        let value: Option<Vec<String>> = store.get_json(keys::SESSIONS).unwrap();
        assert_eq!(value, Some(vec!["a".to_string(), "b".to_string()]));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn put_replaces_existing_value() {
        let (store, dir) = temp_store("replace");

        store.put_json("k", &1u32).unwrap();
        store.put_json("k", &2u32).unwrap();
        let value: Option<u32> = store.get_json("k").unwrap();
        assert_eq!(value, Some(2));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn delete_removes_record() {
        let (store, dir) = temp_store("delete");

        store.put_json("k", &1u32).unwrap();
        store.delete("k").unwrap();
        let value: Option<u32> = store.get_json("k").unwrap();
        assert!(value.is_none());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_record_surfaces_an_error() {
        let (store, dir) = temp_store("corrupt");

        store.put_json("k", &"not a number").unwrap();
        let result: Result<Option<u32>> = store.get_json("k");
        assert!(result.is_err());

        let _ = fs::remove_dir_all(&dir);
    }
}
