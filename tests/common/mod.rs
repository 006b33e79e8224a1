//! Shared helpers for integration tests.
//!
//! These tests need a running PostgreSQL instance named by `TEST_DATABASE_URL`.
//! When the variable is unset each test returns early without touching a database.

#![allow(dead_code)]

use contact_book::db::contacts;
use contact_book::Config;
use sqlx::{Connection, PgConnection};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicU32 = AtomicU32::new(0);

// Serializes schema creation across concurrently running tests
const SCHEMA_LOCK_KEY: i64 = 0x636f_6e74_6163_7473;

pub fn test_database_url() -> Option<String> {
    match std::env::var("TEST_DATABASE_URL") {
        Ok(url) if !url.is_empty() => Some(url),
        _ => {
            eprintln!("TEST_DATABASE_URL not set, skipping");
            None
        }
    }
}

pub fn test_config() -> Option<Config> {
    let url = test_database_url()?;
    Some(Config::from_iter([("DATABASE_URL", url)]).expect("Failed to build test config"))
}

/// Open a connection and make sure the schema exists.
pub async fn connect() -> Option<PgConnection> {
    let url = test_database_url()?;
    let mut conn = PgConnection::connect(&url)
        .await
        .expect("Failed to connect to test database");

    sqlx::query("SELECT pg_advisory_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut conn)
        .await
        .expect("Failed to take schema lock");
    contacts::create_schema(&mut conn)
        .await
        .expect("Failed to create schema");
    sqlx::query("SELECT pg_advisory_unlock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut conn)
        .await
        .expect("Failed to release schema lock");
    Some(conn)
}

fn unique_suffix() -> (u32, u32) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or_default();
    (COUNTER.fetch_add(1, Ordering::Relaxed), nanos)
}

/// Email address that no other test will reuse.
pub fn unique_email(prefix: &str) -> String {
    let (n, nanos) = unique_suffix();
    format!("{prefix}.{}.{n}.{nanos}@test.io", std::process::id())
}

/// Twelve-digit phone number that no other test will reuse.
pub fn unique_phone() -> String {
    let (n, nanos) = unique_suffix();
    format!("{:03}{:09}", n % 1000, nanos)
}
