//! Entity kinds and their layout tables.
//!
//! The per-kind constants that the Site → Collection → RecordType →
//! EntityData tree hangs off: directory segment, metadata filename, URI
//! segment, JSON-LD type, reserved ids, and permitted parent kinds.

use std::fmt;

use crate::model::vocab;

/// Directory under `base_data_dir` holding the whole site tree.
pub const SITE_DIR: &str = "annalist_site";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Site,
    Collection,
    RecordType,
    RecordView,
    RecordList,
    RecordField,
    EntityData,
}

impl EntityKind {
    /// Fixed metadata filename inside the entity's directory.
    pub const fn meta_file(self) -> &'static str {
        match self {
            EntityKind::Site => "site_meta.jsonld",
            EntityKind::Collection => "coll_meta.jsonld",
            EntityKind::RecordType => "type_meta.jsonld",
            EntityKind::RecordView => "view_meta.jsonld",
            EntityKind::RecordList => "list_meta.jsonld",
            EntityKind::RecordField => "field_meta.jsonld",
            EntityKind::EntityData => "entity_data.jsonld",
        }
    }

    /// On-disk directory segment grouping children of this kind under
    /// their parent. The site itself sits at [`SITE_DIR`].
    pub(crate) const fn dir_segment(self) -> &'static str {
        match self {
            EntityKind::Site => SITE_DIR,
            EntityKind::Collection => "c",
            EntityKind::RecordType => "types",
            EntityKind::RecordView => "views",
            EntityKind::RecordList => "lists",
            EntityKind::RecordField => "fields",
            EntityKind::EntityData => "d",
        }
    }

    /// Segment used in entity URIs. The static-serving contract aliases
    /// `_type` → `types`, `_view` → `views`, `_list` → `lists` and
    /// `_field` → `fields` on disk; `c` and `d` serve as-is.
    pub(crate) const fn uri_segment(self) -> &'static str {
        match self {
            EntityKind::Site => "",
            EntityKind::Collection => "c",
            EntityKind::RecordType => "_type",
            EntityKind::RecordView => "_view",
            EntityKind::RecordList => "_list",
            EntityKind::RecordField => "_field",
            EntityKind::EntityData => "d",
        }
    }

    /// The stable CURIE identifying this kind in `@type`.
    pub const fn type_uri(self) -> &'static str {
        match self {
            EntityKind::Site => vocab::ANNAL_SITE,
            EntityKind::Collection => vocab::ANNAL_COLLECTION,
            EntityKind::RecordType => vocab::ANNAL_RECORD_TYPE,
            EntityKind::RecordView => vocab::ANNAL_RECORD_VIEW,
            EntityKind::RecordList => vocab::ANNAL_RECORD_LIST,
            EntityKind::RecordField => vocab::ANNAL_RECORD_FIELD,
            EntityKind::EntityData => vocab::ANNAL_ENTITY_DATA,
        }
    }

    /// Built-in ids of this kind, installed through the bootstrap channel.
    pub const fn builtin_ids(self) -> &'static [&'static str] {
        match self {
            EntityKind::Collection => &["_annalist_site"],
            EntityKind::RecordType => &["_type", "_initial_values"],
            EntityKind::RecordView => &["_view", "_initial_values"],
            EntityKind::RecordList => &["_list", "_initial_values"],
            EntityKind::RecordField => &["_field", "_initial_values"],
            EntityKind::Site | EntityKind::EntityData => &[],
        }
    }

    /// Ids beginning with `_` are system-reserved; only built-in entities
    /// may carry them.
    pub fn is_reserved(self, id: &str) -> bool {
        id.starts_with('_') || self.builtin_ids().contains(&id)
    }

    pub(crate) const fn parent_kind(self) -> Option<EntityKind> {
        match self {
            EntityKind::Site => None,
            EntityKind::Collection => Some(EntityKind::Site),
            EntityKind::RecordType
            | EntityKind::RecordView
            | EntityKind::RecordList
            | EntityKind::RecordField => Some(EntityKind::Collection),
            EntityKind::EntityData => Some(EntityKind::RecordType),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Site => "site",
            EntityKind::Collection => "collection",
            EntityKind::RecordType => "record type",
            EntityKind::RecordView => "record view",
            EntityKind::RecordList => "record list",
            EntityKind::RecordField => "record field",
            EntityKind::EntityData => "entity data",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::EntityKind;

    #[test]
    fn reserved_ids() {
        assert!(EntityKind::Collection.is_reserved("_annalist_site"));
        assert!(EntityKind::RecordType.is_reserved("_type"));
        assert!(EntityKind::RecordType.is_reserved("_anything"));
        assert!(!EntityKind::RecordType.is_reserved("note"));
        assert!(!EntityKind::EntityData.is_reserved("e1"));
        assert!(EntityKind::EntityData.is_reserved("_e1"));
    }

    #[test]
    fn parent_chain_reaches_site() {
        let mut kind = EntityKind::EntityData;
        let mut hops = 0;
        while let Some(parent) = kind.parent_kind() {
            kind = parent;
            hops += 1;
        }
        assert_eq!(kind, EntityKind::Site);
        assert_eq!(hops, 3);
    }
}
