//! Vocabulary terms used in stored metadata.

/// JSON-LD keywords. The codec treats their values as opaque.
pub const CONTEXT: &str = "@context";
pub const ID: &str = "@id";
pub const TYPE: &str = "@type";

/// Default `@context` reference written into new metadata files.
pub const ANNAL_CONTEXT: &str = "http://purl.org/annalist/2014/context.jsonld";

pub const ANNAL_ID: &str = "annal:id";
pub const ANNAL_TYPE_ID: &str = "annal:type_id";
pub const ANNAL_URI: &str = "annal:uri";
pub const ANNAL_ENTITY_ROOT: &str = "annal:EntityRoot";

pub const RDFS_LABEL: &str = "rdfs:label";
pub const RDFS_COMMENT: &str = "rdfs:comment";

pub const ANNAL_SITE: &str = "annal:Site";
pub const ANNAL_COLLECTION: &str = "annal:Collection";
pub const ANNAL_RECORD_TYPE: &str = "annal:RecordType";
pub const ANNAL_RECORD_VIEW: &str = "annal:RecordView";
pub const ANNAL_RECORD_LIST: &str = "annal:RecordList";
pub const ANNAL_RECORD_FIELD: &str = "annal:RecordField";
pub const ANNAL_ENTITY_DATA: &str = "annal:EntityData";
