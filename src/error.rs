//! One error family for the whole store.

use std::path::PathBuf;

use thiserror::Error;

use crate::store::EntityKind;

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Everything the store can fail with, tag-discriminated.
///
/// A missing entity is not an error: `load` returns `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The id fails the slug syntax or names a reserved entity.
    #[error("invalid entity id {id:?}")]
    InvalidId { id: String },
    /// A path segment would escape the store tree.
    #[error("invalid path segment {segment:?}")]
    InvalidPath { segment: String },
    #[error("{kind} {id:?} already exists")]
    AlreadyExists { kind: EntityKind, id: String },
    #[error("parent directory {} is missing", .path.display())]
    ParentMissing { path: PathBuf },
    /// Metadata file is present but is not a JSON-LD object.
    #[error("malformed metadata in {}: {detail}", .path.display())]
    Malformed { path: PathBuf, detail: String },
    #[error("i/o failure on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
