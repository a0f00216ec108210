//! Store configuration.
//!
//! Nothing here is global: a [`StoreConfig`] is an explicit value handed to
//! [`EntityStore::new`](crate::EntityStore::new).

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, StoreError};
use crate::store::SITE_DIR;

/// Environment variable naming the directory the site tree is rooted under.
pub const BASE_DATA_DIR_VAR: &str = "BASE_DATA_DIR";
/// Environment variable naming the URI prefix for entity URIs.
pub const SITE_BASE_URI_VAR: &str = "SITE_BASE_URI";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Absolute path under which `annalist_site/` is rooted.
    pub base_data_dir: PathBuf,
    /// URI prefix used when constructing entity URIs. Reading and writing
    /// entities does not need it.
    #[serde(default)]
    pub site_base_uri: Option<String>,
}

impl StoreConfig {
    pub fn new(base_data_dir: impl Into<PathBuf>) -> StoreConfig {
        StoreConfig {
            base_data_dir: base_data_dir.into(),
            site_base_uri: None,
        }
    }

    pub fn with_base_uri(mut self, uri: impl Into<String>) -> StoreConfig {
        self.site_base_uri = Some(uri.into());
        self
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<StoreConfig> {
        let text = fs::read_to_string(path).map_err(|source| StoreError::io(path, source))?;
        toml::from_str(&text).map_err(|e| StoreError::Malformed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
    }

    /// Read `BASE_DATA_DIR` and `SITE_BASE_URI` from the environment.
    /// `None` when `BASE_DATA_DIR` is not set.
    pub fn from_env() -> Option<StoreConfig> {
        let base_data_dir = env::var_os(BASE_DATA_DIR_VAR)?;
        Some(StoreConfig {
            base_data_dir: PathBuf::from(base_data_dir),
            site_base_uri: env::var(SITE_BASE_URI_VAR).ok(),
        })
    }

    /// The site root: `<base_data_dir>/annalist_site`.
    pub fn site_dir(&self) -> PathBuf {
        self.base_data_dir.join(SITE_DIR)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;

    use super::StoreConfig;
    use crate::error::StoreError;

    #[test]
    fn load_from_toml() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("annalist.toml");
        std::fs::write(
            &path,
            "base_data_dir = \"/srv/annalist\"\nsite_base_uri = \"http://example.org/annalist\"\n",
        )?;
        let config = StoreConfig::from_file(&path)?;
        assert_eq!(
            config,
            StoreConfig::new("/srv/annalist").with_base_uri("http://example.org/annalist")
        );
        assert_eq!(
            config.site_dir(),
            std::path::Path::new("/srv/annalist/annalist_site")
        );
        Ok(())
    }

    #[test]
    fn base_uri_is_optional() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("annalist.toml");
        std::fs::write(&path, "base_data_dir = \"/srv/annalist\"\n")?;
        let config = StoreConfig::from_file(&path)?;
        assert_eq!(config.site_base_uri, None);
        Ok(())
    }

    #[test]
    fn missing_file_is_io() {
        let err = StoreConfig::from_file(std::path::Path::new("/no/such/annalist.toml"))
            .expect_err("must fail");
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn bad_toml_is_malformed() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("annalist.toml");
        std::fs::write(&path, "base_data_dir = [not toml")?;
        let err = StoreConfig::from_file(&path).expect_err("must fail");
        assert!(matches!(err, StoreError::Malformed { .. }));
        Ok(())
    }
}
