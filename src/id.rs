//! Identifier and path-segment discipline.

use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// Ids no entity of any kind may use.
pub const GLOBAL_RESERVED: [&str; 1] = ["_annalist"];

/// True iff `id` is a well-formed slug: one or more characters from
/// `[A-Za-z0-9_]`, and not globally reserved.
pub fn valid_id(id: &str) -> bool {
    if id.is_empty() || GLOBAL_RESERVED.contains(&id) {
        return false;
    }
    id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

pub(crate) fn check_id(id: &str) -> Result<()> {
    if valid_id(id) {
        Ok(())
    } else {
        Err(StoreError::InvalidId { id: id.to_owned() })
    }
}

/// Join `parts` onto `base`, refusing any part that could traverse out of
/// the tree. Ids have already been constrained by [`valid_id`]; this guards
/// the joints where raw strings reach the file system.
pub fn safe_join(base: &Path, parts: &[&str]) -> Result<PathBuf> {
    let mut path = base.to_path_buf();
    for part in parts {
        if part.is_empty() || *part == "." || *part == ".." || part.contains(['/', '\\']) {
            return Err(StoreError::InvalidPath {
                segment: (*part).to_owned(),
            });
        }
        path.push(part);
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{safe_join, valid_id};
    use crate::error::StoreError;

    #[test]
    fn well_formed_slugs() {
        assert!(valid_id("coll1"));
        assert!(valid_id("Entity_01"));
        assert!(valid_id("_annalist_site"));
        assert!(valid_id("_type"));
    }

    #[test]
    fn malformed_slugs() {
        assert!(!valid_id(""));
        assert!(!valid_id("a/b"));
        assert!(!valid_id("a b"));
        assert!(!valid_id("a-b"));
        assert!(!valid_id("a.b"));
        assert!(!valid_id("café"));
        assert!(!valid_id("_annalist"));
    }

    #[test]
    fn join_accepts_plain_segments() {
        let path = safe_join(Path::new("/data"), &["c", "coll1", "types"]).unwrap();
        assert_eq!(path, Path::new("/data/c/coll1/types"));
    }

    #[test]
    fn join_rejects_traversal() {
        for part in ["..", ".", "", "a/b", "a\\b"] {
            let err = safe_join(Path::new("/data"), &["c", part]).unwrap_err();
            assert!(matches!(err, StoreError::InvalidPath { segment } if segment == part));
        }
    }
}
