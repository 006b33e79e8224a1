use thiserror::Error;

use crate::models::ClientId;

pub type Result<T> = std::result::Result<T, ContactError>;

#[derive(Debug, Error)]
pub enum ContactError {
    /// A phone row pointed at a client that does not exist.
    #[error("Referenced client does not exist: {0}")]
    ReferentialIntegrity(#[source] sqlx::Error),

    #[error("Client {client_id} not found")]
    NotFound { client_id: ClientId },

    /// Overlong or missing values, rejected by the column constraints.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(#[source] sqlx::Error),

    #[error("Connection error: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] envy::Error),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SqlStateKind {
    ForeignKey,
    Constraint,
    Connection,
    Other,
}

// PostgreSQL SQLSTATE codes, see appendix A of the server manual
fn classify_sqlstate(code: &str) -> SqlStateKind {
    match code {
        "23503" => SqlStateKind::ForeignKey,
        "22001" | "23502" | "23505" | "23514" => SqlStateKind::Constraint,
        "28000" | "28P01" | "3D000" => SqlStateKind::Connection,
        c if c.starts_with("08") => SqlStateKind::Connection,
        _ => SqlStateKind::Other,
    }
}

impl From<sqlx::Error> for ContactError {
    fn from(err: sqlx::Error) -> Self {
        let kind = match &err {
            sqlx::Error::Database(db_err) => db_err
                .code()
                .map(|code| classify_sqlstate(&code))
                .unwrap_or(SqlStateKind::Other),
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => SqlStateKind::Connection,
            _ => SqlStateKind::Other,
        };

        match kind {
            SqlStateKind::ForeignKey => ContactError::ReferentialIntegrity(err),
            SqlStateKind::Constraint => ContactError::ConstraintViolation(err),
            SqlStateKind::Connection => ContactError::Connection(err),
            SqlStateKind::Other => ContactError::Database(err),
        }
    }
}
