//! Local persistence for the event collection.
//!
//! # Responsibility
//! - Abstract the key-value blob transport (`BlobStore`).
//! - Keep the in-memory collection and its persisted blob in sync.
//!
//! # Invariants
//! - The collection is stored as one blob under one well-known key.
//! - Reads never fail the caller: missing or malformed blobs load as empty.
//! - Writes replace the whole blob.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod blob;
pub mod event_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Write-path failure of the event store.
#[derive(Debug)]
pub enum StoreError {
    /// Blob transport failed.
    Db(DbError),
    /// Collection could not be encoded.
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode events: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}
