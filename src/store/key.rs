//! Typed entity coordinates.
//!
//! Entities never hold references to each other; they hold `(kind, id)`
//! coordinates and resolve them through the store. An [`EntityKey`] is the
//! complete coordinate of one entity in the site tree, validated at
//! construction.

use std::path::{Path, PathBuf};

use super::kind::EntityKind;
use crate::error::{Result, StoreError};
use crate::id::{check_id, safe_join};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKey {
    Site,
    Collection {
        coll: String,
    },
    RecordType {
        coll: String,
        id: String,
    },
    RecordView {
        coll: String,
        id: String,
    },
    RecordList {
        coll: String,
        id: String,
    },
    RecordField {
        coll: String,
        id: String,
    },
    EntityData {
        coll: String,
        type_id: String,
        id: String,
    },
}

impl EntityKey {
    pub fn site() -> EntityKey {
        EntityKey::Site
    }

    pub fn collection(coll: &str) -> Result<EntityKey> {
        check_id(coll)?;
        Ok(EntityKey::Collection {
            coll: coll.to_owned(),
        })
    }

    pub fn record_type(coll: &str, id: &str) -> Result<EntityKey> {
        check_id(coll)?;
        check_id(id)?;
        Ok(EntityKey::RecordType {
            coll: coll.to_owned(),
            id: id.to_owned(),
        })
    }

    pub fn record_view(coll: &str, id: &str) -> Result<EntityKey> {
        check_id(coll)?;
        check_id(id)?;
        Ok(EntityKey::RecordView {
            coll: coll.to_owned(),
            id: id.to_owned(),
        })
    }

    pub fn record_list(coll: &str, id: &str) -> Result<EntityKey> {
        check_id(coll)?;
        check_id(id)?;
        Ok(EntityKey::RecordList {
            coll: coll.to_owned(),
            id: id.to_owned(),
        })
    }

    pub fn record_field(coll: &str, id: &str) -> Result<EntityKey> {
        check_id(coll)?;
        check_id(id)?;
        Ok(EntityKey::RecordField {
            coll: coll.to_owned(),
            id: id.to_owned(),
        })
    }

    pub fn entity_data(coll: &str, type_id: &str, id: &str) -> Result<EntityKey> {
        check_id(coll)?;
        check_id(type_id)?;
        check_id(id)?;
        Ok(EntityKey::EntityData {
            coll: coll.to_owned(),
            type_id: type_id.to_owned(),
            id: id.to_owned(),
        })
    }

    /// The key of a child of this entity. Fails when `kind` cannot nest
    /// under this key, or when `id` is malformed.
    pub fn child(&self, kind: EntityKind, id: &str) -> Result<EntityKey> {
        match (self, kind) {
            (EntityKey::Site, EntityKind::Collection) => EntityKey::collection(id),
            (EntityKey::Collection { coll }, EntityKind::RecordType) => {
                EntityKey::record_type(coll, id)
            }
            (EntityKey::Collection { coll }, EntityKind::RecordView) => {
                EntityKey::record_view(coll, id)
            }
            (EntityKey::Collection { coll }, EntityKind::RecordList) => {
                EntityKey::record_list(coll, id)
            }
            (EntityKey::Collection { coll }, EntityKind::RecordField) => {
                EntityKey::record_field(coll, id)
            }
            (EntityKey::RecordType { coll, id: type_id }, EntityKind::EntityData) => {
                EntityKey::entity_data(coll, type_id, id)
            }
            _ => Err(StoreError::InvalidPath {
                segment: format!("{kind} under {}", self.kind()),
            }),
        }
    }

    pub fn parent(&self) -> Option<EntityKey> {
        match self {
            EntityKey::Site => None,
            EntityKey::Collection { .. } => Some(EntityKey::Site),
            EntityKey::RecordType { coll, .. }
            | EntityKey::RecordView { coll, .. }
            | EntityKey::RecordList { coll, .. }
            | EntityKey::RecordField { coll, .. } => Some(EntityKey::Collection { coll: coll.clone() }),
            EntityKey::EntityData { coll, type_id, .. } => Some(EntityKey::RecordType {
                coll: coll.clone(),
                id: type_id.clone(),
            }),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntityKey::Site => EntityKind::Site,
            EntityKey::Collection { .. } => EntityKind::Collection,
            EntityKey::RecordType { .. } => EntityKind::RecordType,
            EntityKey::RecordView { .. } => EntityKind::RecordView,
            EntityKey::RecordList { .. } => EntityKind::RecordList,
            EntityKey::RecordField { .. } => EntityKind::RecordField,
            EntityKey::EntityData { .. } => EntityKind::EntityData,
        }
    }

    /// The entity's local id, its directory name.
    pub fn id(&self) -> &str {
        match self {
            EntityKey::Site => "annalist_site",
            EntityKey::Collection { coll } => coll,
            EntityKey::RecordType { id, .. }
            | EntityKey::RecordView { id, .. }
            | EntityKey::RecordList { id, .. }
            | EntityKey::RecordField { id, .. }
            | EntityKey::EntityData { id, .. } => id,
        }
    }

    /// Absolute directory of this entity under `site_dir`. Pure: the same
    /// key always resolves to the same path.
    pub fn dir(&self, site_dir: &Path) -> Result<PathBuf> {
        let coll_seg = EntityKind::Collection.dir_segment();
        match self {
            EntityKey::Site => Ok(site_dir.to_path_buf()),
            EntityKey::Collection { coll } => safe_join(site_dir, &[coll_seg, coll]),
            EntityKey::RecordType { coll, id }
            | EntityKey::RecordView { coll, id }
            | EntityKey::RecordList { coll, id }
            | EntityKey::RecordField { coll, id } => {
                safe_join(site_dir, &[coll_seg, coll, self.kind().dir_segment(), id])
            }
            EntityKey::EntityData { coll, type_id, id } => safe_join(
                site_dir,
                &[
                    coll_seg,
                    coll,
                    EntityKind::EntityData.dir_segment(),
                    type_id,
                    id,
                ],
            ),
        }
    }

    /// Absolute path of this entity's metadata file under `site_dir`.
    pub fn meta_path(&self, site_dir: &Path) -> Result<PathBuf> {
        Ok(self.dir(site_dir)?.join(self.kind().meta_file()))
    }

    /// Directory holding this entity's children of `kind`. Listing it is
    /// how enumeration works.
    pub(crate) fn children_dir(&self, site_dir: &Path, kind: EntityKind) -> Result<PathBuf> {
        let coll_seg = EntityKind::Collection.dir_segment();
        match (self, kind) {
            (EntityKey::Site, EntityKind::Collection) => safe_join(site_dir, &[coll_seg]),
            (
                EntityKey::Collection { coll },
                EntityKind::RecordType
                | EntityKind::RecordView
                | EntityKind::RecordList
                | EntityKind::RecordField,
            ) => safe_join(site_dir, &[coll_seg, coll, kind.dir_segment()]),
            (EntityKey::RecordType { coll, id }, EntityKind::EntityData) => safe_join(
                site_dir,
                &[coll_seg, coll, EntityKind::EntityData.dir_segment(), id],
            ),
            _ => Err(StoreError::InvalidPath {
                segment: format!("{kind} under {}", self.kind()),
            }),
        }
    }

    /// Site-relative URI reference of the entity directory; trailing slash
    /// is canonical. The site root's reference is the empty string.
    pub fn reference(&self) -> String {
        match self {
            EntityKey::Site => String::new(),
            EntityKey::Collection { coll } => {
                format!("{}/{coll}/", EntityKind::Collection.uri_segment())
            }
            EntityKey::RecordType { coll, id }
            | EntityKey::RecordView { coll, id }
            | EntityKey::RecordList { coll, id }
            | EntityKey::RecordField { coll, id } => format!(
                "{}/{coll}/{}/{id}/",
                EntityKind::Collection.uri_segment(),
                self.kind().uri_segment()
            ),
            EntityKey::EntityData { coll, type_id, id } => format!(
                "{}/{coll}/{}/{type_id}/{id}/",
                EntityKind::Collection.uri_segment(),
                EntityKind::EntityData.uri_segment()
            ),
        }
    }

    /// Site-relative URI reference of the entity's metadata file.
    pub fn meta_reference(&self) -> String {
        format!("{}{}", self.reference(), self.kind().meta_file())
    }

    /// Externally advertised URI of the entity under `base`.
    pub fn uri(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.reference())
    }
}
