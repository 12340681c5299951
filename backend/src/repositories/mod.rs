//! Database repositories
//!
//! Provides data access layer for database operations. Services see the
//! stores through the [`CredentialStore`] and [`TodoStore`] traits so the
//! handle can be injected (Postgres in production, in-memory in tests).

pub mod todo;
pub mod user;

#[cfg(test)]
pub mod memory;

use thiserror::Error;

pub use todo::{PgTodoRepository, TodoRecord, TodoStore, UpsertTodo};
pub use user::{CredentialStore, PgUserRepository, UserRecord};

/// Store-level failures
#[derive(Error, Debug)]
pub enum StoreError {
    /// A unique constraint rejected the write
    #[error("Duplicate key: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Map a write error, turning unique violations into [`StoreError::Duplicate`]
pub(crate) fn classify_write_error(err: sqlx::Error, key: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::Duplicate(key.to_string())
        }
        _ => StoreError::Database(err),
    }
}
