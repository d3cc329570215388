// ABOUTME: SQLite-backed lead store with create-if-absent schema and additive migrations
// ABOUTME: Single-writer pool so concurrent callers insert one at a time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Lead Store
//!
//! A single append-only `leads` table. The schema is created on first use and
//! columns introduced after the initial deployment are added in place when
//! missing; rows written before a column existed keep `NULL` there.

mod leads;

use avatar_leads_core::constants::leads::TABLE;
use avatar_leads_core::errors::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::info;

/// Columns added after the initial `leads` schema, in the order they shipped
const ADDITIVE_COLUMNS: [(&str, &str); 4] = [
    ("phone", "TEXT"),
    ("company", "TEXT"),
    ("source", "TEXT"),
    ("extra", "TEXT"),
];

/// Durable, append-only store of captured leads
#[derive(Clone)]
pub struct LeadStore {
    pool: SqlitePool,
}

impl LeadStore {
    /// Open (creating if needed) the store at `database_url` and migrate it
    ///
    /// `sqlite::memory:` gives a private in-memory store that lives as long
    /// as this handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the database cannot be opened,
    /// or the migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid database URL '{database_url}': {e}")))?
            .create_if_missing(true);

        // One connection: inserts are serialised and an in-memory database
        // is never dropped by pool recycling
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open lead store: {e}")))?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Get a reference to the connection pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Ensure the `leads` table and all of its columns exist
    ///
    /// # Errors
    ///
    /// Returns an error if table creation, column inspection, or `ALTER TABLE` fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS leads (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                conversation_id TEXT,
                name TEXT,
                email TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create leads table: {e}")))?;

        let existing = self.column_names().await?;
        for (column, sql_type) in ADDITIVE_COLUMNS {
            if existing.iter().any(|name| name == column) {
                continue;
            }
            sqlx::query(&format!("ALTER TABLE {TABLE} ADD COLUMN {column} {sql_type}"))
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::database(format!("Failed to add column '{column}': {e}"))
                })?;
            info!(db.table = TABLE, db.column = column, "Added missing lead column");
        }

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_leads_conversation_id ON leads(conversation_id)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create lead index: {e}")))?;

        Ok(())
    }

    /// Column names currently present on the `leads` table
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be inspected
    pub async fn column_names(&self) -> AppResult<Vec<String>> {
        let rows = sqlx::query(&format!("PRAGMA table_info({TABLE})"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to inspect leads schema: {e}")))?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>("name")
                    .map_err(|e| AppError::database(format!("Malformed table_info row: {e}")))
            })
            .collect()
    }
}
