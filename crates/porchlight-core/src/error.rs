//! Error types for the leasing assistant crate.

use thiserror::Error;

/// Errors returned by inventory store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying SQLite failure.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Errors returned by front desk operations.
#[derive(Debug, Error)]
pub enum DeskError {
    /// Inventory store failure while serving a conversation.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
