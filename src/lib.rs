//! Annalist entity store: a hierarchical, file-backed repository of typed
//! JSON-LD documents.
//!
//! A site tree nests Site → Collection → RecordType → EntityData, with
//! record views, lists and fields alongside the types. Every entity is a
//! directory holding one metadata file; the store keeps ids, paths and
//! URIs consistent. The HTTP layer and renderers consume this crate; it
//! exposes no process entry point of its own.

mod config;
mod error;
mod id;
mod model;
mod scoped;
mod store;
mod uri;

pub use config::{BASE_DATA_DIR_VAR, SITE_BASE_URI_VAR, StoreConfig};
pub use error::{Result, StoreError};
pub use id::{GLOBAL_RESERVED, safe_join, valid_id};
pub use model::{EntityValues, JsonLdValue, vocab};
pub use scoped::{ScopedCwd, quiet_logs};
pub use store::{Entity, EntityKey, EntityKind, EntityStore, SITE_DIR};
pub use uri::{uri_params, uri_with_params};
