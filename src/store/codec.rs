//! Canonical JSON-LD file codec.
//!
//! The store's external contract is a tree of JSON-LD files a human can
//! read and commit to version control: keys sorted, two-space indent,
//! trailing newline. Writes go to a sibling `.tmp` file and are renamed
//! into place, so the canonical filename never holds a partial document.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{Result, StoreError};

/// Read a metadata file. `Ok(None)` when the file does not exist.
pub(crate) fn read_json(path: &Path) -> Result<Option<Map<String, Value>>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(StoreError::io(path, source)),
    };
    let value: Value = serde_json::from_str(&text).map_err(|e| StoreError::Malformed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    match value {
        Value::Object(map) => Ok(Some(map)),
        other => Err(StoreError::Malformed {
            path: path.to_path_buf(),
            detail: format!("expected a JSON object, found {other}"),
        }),
    }
}

/// Write a metadata file atomically. `@context` and `@id` are opaque
/// values like any other key.
pub(crate) fn write_json(path: &Path, map: &Map<String, Value>) -> Result<()> {
    let mut text = serde_json::to_string_pretty(map).map_err(|e| StoreError::Malformed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    text.push('\n');

    let tmp = tmp_path(path);
    fs::write(&tmp, text).map_err(|source| StoreError::io(&tmp, source))?;
    fs::rename(&tmp, path).map_err(|source| StoreError::io(path, source))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = OsString::from(path.as_os_str());
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use serde_json::json;
    use tempfile::tempdir;

    use super::{read_json, write_json};
    use crate::error::StoreError;

    #[test]
    fn write_then_read() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("coll_meta.jsonld");
        let map = json!({"annal:id": "coll1", "rdfs:label": "C1"});
        write_json(&path, map.as_object().unwrap())?;
        assert_eq!(read_json(&path)?, Some(map.as_object().unwrap().clone()));
        Ok(())
    }

    #[test]
    fn canonical_text_form() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("type_meta.jsonld");
        let map = json!({"rdfs:label": "T1", "annal:id": "t1", "@id": "c/coll1/_type/t1/"});
        write_json(&path, map.as_object().unwrap())?;
        let text = std::fs::read_to_string(&path)?;
        assert_eq!(
            text,
            "{\n  \"@id\": \"c/coll1/_type/t1/\",\n  \"annal:id\": \"t1\",\n  \"rdfs:label\": \"T1\"\n}\n"
        );
        Ok(())
    }

    #[test]
    fn no_tmp_file_survives() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("entity_data.jsonld");
        write_json(&path, json!({"p:x": 42}).as_object().unwrap())?;
        let names: Vec<_> = std::fs::read_dir(dir.path())?
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["entity_data.jsonld"]);
        Ok(())
    }

    #[test]
    fn rewrite_replaces_content() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("entity_data.jsonld");
        write_json(&path, json!({"p:x": 1}).as_object().unwrap())?;
        write_json(&path, json!({"p:x": 2}).as_object().unwrap())?;
        let map = read_json(&path)?.unwrap();
        assert_eq!(map.get("p:x"), Some(&json!(2)));
        Ok(())
    }

    #[test]
    fn missing_file_is_none() -> Result<()> {
        let dir = tempdir()?;
        assert_eq!(read_json(&dir.path().join("ghost.jsonld"))?, None);
        Ok(())
    }

    #[test]
    fn unparseable_file_is_malformed() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("broken.jsonld");
        std::fs::write(&path, "{\"annal:id\": ")?;
        let err = read_json(&path).expect_err("must fail");
        assert!(matches!(err, StoreError::Malformed { .. }));
        Ok(())
    }

    #[test]
    fn non_object_document_is_malformed() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("array.jsonld");
        std::fs::write(&path, "[1, 2, 3]")?;
        let err = read_json(&path).expect_err("must fail");
        assert!(matches!(err, StoreError::Malformed { .. }));
        Ok(())
    }
}
