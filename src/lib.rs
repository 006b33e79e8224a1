//! Contact book storage: clients and their phone numbers in PostgreSQL.
//!
//! Operations live in [`db::contacts`] and run against a caller-owned
//! connection or transaction. [`db::Database`] wraps a pool and runs each
//! operation in its own committed transaction.

pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use config::Config;
pub use db::Database;
pub use error::{ContactError, Result};
pub use models::{Client, ClientCriteria, ClientId, ClientPatch, NewClient, PhoneId, PhoneNumber};
