//! # SQLite database methods
//!
//! This module contains the "low-level" SQLite interactions.
//!
//! All of these are simple functions (rather than stateful structs) that accept a
//! `&mut SqliteConnection` argument. Callers can obtain a connection from a pool, or create an atomic
//! transaction as the need arises and call through to the functions without any other changes.
use std::{env, str::FromStr, time::Duration};

use log::info;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Error as SqlxError,
    SqlitePool,
};

pub mod balances;
pub mod orders;
pub mod payments;

const SQLITE_DB_URL: &str = "sqlite://data/cafe_payments.db";

pub fn db_url() -> String {
    let result = env::var("CPG_DATABASE_URL").unwrap_or_else(|_| {
        info!("CPG_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("Using database URL: {result}");
    result
}

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    // Truncate journal mode keeps every pooled connection on the latest committed state. Under WAL, an
    // idle pooled connection can serve a stale snapshot on its next read, breaking read-your-writes
    // across the pool. The busy timeout covers writer contention now that writers serialise on the
    // database lock.
    let options = SqliteConnectOptions::from_str(url)?
        .journal_mode(SqliteJournalMode::Truncate)
        .busy_timeout(Duration::from_secs(5));
    let pool =
        SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await?;
    Ok(pool)
}
