//! The file-backed entity store.
//!
//! One concrete store over tagged kinds: every lifecycle operation is a
//! function of the store configuration and an [`EntityKey`]. On disk the
//! store is a tree of JSON-LD metadata files laid out as
//! Site → Collection → RecordType → EntityData.

mod codec;
mod key;
mod kind;

pub use key::EntityKey;
pub use kind::{EntityKind, SITE_DIR};

use std::fs;
use std::path::PathBuf;

use serde_json::{Value, json};
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::id::valid_id;
use crate::model::{EntityValues, vocab};

/// Handle on one site tree. Cheap to clone; operations on disjoint
/// entities are safe to run from multiple threads.
#[derive(Clone)]
pub struct EntityStore {
    config: StoreConfig,
}

/// One materialized entity: its coordinates plus a cached property map.
/// Loading reads the metadata file once; the object never re-reads. The
/// caller owns mutation: change values, then ask the store to `save`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    key: EntityKey,
    values: EntityValues,
}

impl Entity {
    pub fn key(&self) -> &EntityKey {
        &self.key
    }
    pub fn kind(&self) -> EntityKind {
        self.key.kind()
    }
    pub fn id(&self) -> &str {
        self.key.id()
    }

    pub fn values(&self) -> &EntityValues {
        &self.values
    }
    pub fn get(&self, prop: &str) -> Option<&Value> {
        self.values.get(prop)
    }
    pub fn get_str(&self, prop: &str) -> Option<&str> {
        self.values.get_str(prop)
    }

    /// Replace the property map wholesale.
    pub fn set_values(&mut self, values: EntityValues) {
        self.values = values;
    }
    /// Merge `values` over the current properties; new entries win.
    pub fn update(&mut self, values: EntityValues) {
        self.values = self.values.clone().augment_with(values.into_map());
    }
    pub fn insert(&mut self, prop: &str, value: Value) {
        self.values.insert(prop, value);
    }

    /// Site-relative URI reference of the entity directory.
    pub fn reference(&self) -> String {
        self.key.reference()
    }
    /// Externally advertised URI under `base`.
    pub fn uri(&self, base: &str) -> String {
        self.key.uri(base)
    }
}

impl EntityStore {
    pub fn new(config: StoreConfig) -> EntityStore {
        info!(
            target: "store",
            base = %config.base_data_dir.display(),
            "configuring entity store"
        );
        EntityStore { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn dir(&self, key: &EntityKey) -> Result<PathBuf> {
        key.dir(&self.config.site_dir())
    }

    fn meta_path(&self, key: &EntityKey) -> Result<PathBuf> {
        key.meta_path(&self.config.site_dir())
    }

    /// An entity exists iff its metadata file is present.
    pub fn exists(&self, key: &EntityKey) -> Result<bool> {
        Ok(self.meta_path(key)?.is_file())
    }

    /// Create a new entity. The caller's values are merged with the
    /// kind's defaults; reserved ids are refused.
    pub fn create(&self, key: &EntityKey, values: EntityValues) -> Result<Entity> {
        self.create_inner(key, values, false)
    }

    /// Bootstrap channel: create a built-in entity under a reserved id.
    pub fn create_builtin(&self, key: &EntityKey, values: EntityValues) -> Result<Entity> {
        self.create_inner(key, values, true)
    }

    fn create_inner(&self, key: &EntityKey, values: EntityValues, builtin: bool) -> Result<Entity> {
        let kind = key.kind();
        if !builtin && kind.is_reserved(key.id()) {
            return Err(StoreError::InvalidId {
                id: key.id().to_owned(),
            });
        }
        if let Some(parent) = key.parent() {
            let parent_dir = self.dir(&parent)?;
            if !parent_dir.is_dir() {
                return Err(StoreError::ParentMissing { path: parent_dir });
            }
        }
        let meta = self.meta_path(key)?;
        if meta.is_file() {
            return Err(StoreError::AlreadyExists {
                kind,
                id: key.id().to_owned(),
            });
        }
        let dir = self.dir(key)?;
        fs::create_dir_all(&dir).map_err(|source| StoreError::io(&dir, source))?;
        let values = with_defaults(key, values);
        codec::write_json(&meta, values.as_map())?;
        debug!(target: "store", %kind, id = key.id(), "created entity");
        Ok(Entity {
            key: key.clone(),
            values,
        })
    }

    /// Load an entity. `Ok(None)` when it does not exist; `Malformed`
    /// when its metadata file cannot be parsed.
    pub fn load(&self, key: &EntityKey) -> Result<Option<Entity>> {
        match codec::read_json(&self.meta_path(key)?)? {
            Some(map) => Ok(Some(Entity {
                key: key.clone(),
                values: EntityValues::from(map),
            })),
            None => Ok(None),
        }
    }

    /// Persist an entity's current values. Atomic per entity: concurrent
    /// saves of the same entity are last-writer-wins at the rename
    /// boundary and never leave a partial file.
    pub fn save(&self, entity: &Entity) -> Result<()> {
        if let Some(parent) = entity.key.parent() {
            let parent_dir = self.dir(&parent)?;
            if !parent_dir.is_dir() {
                return Err(StoreError::ParentMissing { path: parent_dir });
            }
        }
        let dir = self.dir(&entity.key)?;
        fs::create_dir_all(&dir).map_err(|source| StoreError::io(&dir, source))?;
        codec::write_json(&self.meta_path(&entity.key)?, entity.values.as_map())?;
        debug!(target: "store", kind = %entity.kind(), id = entity.id(), "saved entity");
        Ok(())
    }

    /// Remove an entity and its subtree. Idempotent: removing an absent
    /// entity returns `Ok(false)`.
    pub fn remove(&self, key: &EntityKey) -> Result<bool> {
        let dir = self.dir(key)?;
        if !dir.is_dir() {
            return Ok(false);
        }
        fs::remove_dir_all(&dir).map_err(|source| StoreError::io(&dir, source))?;
        debug!(target: "store", kind = %key.kind(), id = key.id(), "removed entity");
        Ok(true)
    }

    /// Ids of `parent`'s children of `kind`, lexicographically sorted,
    /// reserved names skipped.
    pub fn children(&self, parent: &EntityKey, kind: EntityKind) -> Result<Vec<String>> {
        self.children_inner(parent, kind, false)
    }

    /// Like [`children`](EntityStore::children), but reserved names are
    /// included.
    pub fn children_all(&self, parent: &EntityKey, kind: EntityKind) -> Result<Vec<String>> {
        self.children_inner(parent, kind, true)
    }

    fn children_inner(
        &self,
        parent: &EntityKey,
        kind: EntityKind,
        include_reserved: bool,
    ) -> Result<Vec<String>> {
        let group_dir = parent.children_dir(&self.config.site_dir(), kind)?;
        let entries = match fs::read_dir(&group_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::io(&group_dir, source)),
        };
        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::io(&group_dir, source))?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if !valid_id(&name) {
                continue;
            }
            if !include_reserved && name.starts_with('_') {
                continue;
            }
            if !entry.path().join(kind.meta_file()).is_file() {
                continue;
            }
            ids.push(name);
        }
        ids.sort();
        Ok(ids)
    }

    /// The entity's URI under the configured site base, when one is set.
    pub fn entity_uri(&self, key: &EntityKey) -> Option<String> {
        self.config.site_base_uri.as_deref().map(|base| key.uri(base))
    }

    /// Bootstrap the site tree: site metadata plus the built-in
    /// `_annalist_site` collection. Idempotent; `values` seed the site
    /// metadata on first initialization only.
    pub fn init_site(&self, values: EntityValues) -> Result<Entity> {
        let site_key = EntityKey::site();
        let site = match self.load(&site_key)? {
            Some(site) => site,
            None => {
                info!(target: "store", site = %self.config.site_dir().display(), "initializing site");
                self.create(&site_key, values)?
            }
        };
        let site_coll = site_key.child(EntityKind::Collection, "_annalist_site")?;
        if !self.exists(&site_coll)? {
            self.create_builtin(
                &site_coll,
                EntityValues::new()
                    .augment(vocab::RDFS_LABEL, json!("Annalist site data"))
                    .augment(vocab::RDFS_COMMENT, json!("Collection of Annalist site-wide data.")),
            )?;
        }
        Ok(site)
    }

    /// Convenience enumerators over [`children`](EntityStore::children).
    pub fn collections(&self) -> Result<Vec<String>> {
        self.children(&EntityKey::Site, EntityKind::Collection)
    }
    pub fn types(&self, coll: &str) -> Result<Vec<String>> {
        self.children(&EntityKey::collection(coll)?, EntityKind::RecordType)
    }
    pub fn views(&self, coll: &str) -> Result<Vec<String>> {
        self.children(&EntityKey::collection(coll)?, EntityKind::RecordView)
    }
    pub fn lists(&self, coll: &str) -> Result<Vec<String>> {
        self.children(&EntityKey::collection(coll)?, EntityKind::RecordList)
    }
    pub fn fields(&self, coll: &str) -> Result<Vec<String>> {
        self.children(&EntityKey::collection(coll)?, EntityKind::RecordField)
    }
    pub fn entities(&self, coll: &str, type_id: &str) -> Result<Vec<String>> {
        self.children(
            &EntityKey::record_type(coll, type_id)?,
            EntityKind::EntityData,
        )
    }
}

/// Merge caller values with kind-specific defaults. Caller values win;
/// `@type` always ends up an array carrying the kind's own type.
fn with_defaults(key: &EntityKey, values: EntityValues) -> EntityValues {
    let kind = key.kind();
    let id = key.id().to_owned();
    let label = values.label().unwrap_or(&id).to_owned();
    let mut values = values
        .augment(vocab::CONTEXT, json!(vocab::ANNAL_CONTEXT))
        .augment(vocab::ID, json!(format!("./{}", key.reference())))
        .augment(vocab::ANNAL_ID, json!(id))
        .augment(vocab::RDFS_LABEL, json!(label))
        .augment(vocab::RDFS_COMMENT, json!(label))
        .augment(
            vocab::TYPE,
            json!([kind.type_uri(), vocab::ANNAL_ENTITY_ROOT]),
        );
    if let EntityKey::EntityData { type_id, .. } = key {
        values = values.augment(vocab::ANNAL_TYPE_ID, json!(type_id));
    }
    values.ensure_type(kind.type_uri())
}
