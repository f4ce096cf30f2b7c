use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};
use tracing::info;

use crate::error::StorageError;
use crate::storage::{PreferenceStore, ScanRecord, Storage};

pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    pub fn new(db_path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn migrate(&self) -> Result<(), StorageError> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS scans (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                url TEXT NOT NULL,
                title TEXT NOT NULL,
                price INTEGER NOT NULL,
                mileage INTEGER NOT NULL,
                first_registration TEXT NOT NULL,
                rating TEXT NOT NULL,
                ai_market_estimate INTEGER NOT NULL,
                ai_potential INTEGER NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_scans_url ON scans(url)",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS language_prefs (
                user_key TEXT PRIMARY KEY,
                language TEXT NOT NULL,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        info!("Database migration completed");
        Ok(())
    }

    async fn save_scan(&self, scan: &ScanRecord) -> Result<(), StorageError> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "INSERT INTO scans (url, title, price, mileage, first_registration, rating, ai_market_estimate, ai_potential)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                scan.url,
                scan.title,
                scan.price as i64,
                scan.mileage as i64,
                scan.first_registration,
                scan.rating,
                scan.ai_market_estimate as i64,
                scan.ai_potential,
            ],
        )?;

        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for SqliteStorage {
    async fn language(&self, user_key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.conn.lock().unwrap();

        let language = conn
            .query_row(
                "SELECT language FROM language_prefs WHERE user_key = ?1",
                params![user_key],
                |row| row.get(0),
            )
            .optional()?;

        Ok(language)
    }

    async fn set_language(&self, user_key: &str, language: &str) -> Result<(), StorageError> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "INSERT INTO language_prefs (user_key, language) VALUES (?1, ?2)
             ON CONFLICT(user_key) DO UPDATE SET
                 language = excluded.language,
                 updated_at = CURRENT_TIMESTAMP",
            params![user_key, language],
        )?;

        Ok(())
    }
}
