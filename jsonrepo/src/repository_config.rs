use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::common::DEFAULT_BASE_PATH;
use crate::errors::{ErrorKind, RepoError, RepoResult};

/// Configuration of a repository.
///
/// The serialized form uses the keys `basePath`, `prettyPrint`, `backup` and
/// `autoCreateEntity`; keys that are missing take their defaults and unknown
/// keys are ignored.
///
/// | key | default |
/// |---|---|
/// | `basePath` | `data/db` |
/// | `prettyPrint` | `true` |
/// | `backup` | `false` |
/// | `autoCreateEntity` | `true` |
///
/// # Examples
///
/// ```rust
/// use jsonrepo::repository_config::RepositoryConfig;
///
/// let config: RepositoryConfig = serde_json::from_str(r#"{"backup": true}"#).unwrap();
/// assert!(config.backup());
/// assert!(config.pretty_print());
/// assert_eq!(config.base_path(), std::path::Path::new("data/db"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepositoryConfig {
    base_path: PathBuf,
    pretty_print: bool,
    backup: bool,
    auto_create_entity: bool,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            base_path: PathBuf::from(DEFAULT_BASE_PATH),
            pretty_print: true,
            backup: false,
            auto_create_entity: true,
        }
    }
}

impl RepositoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root directory of the entity files.
    ///
    /// An empty base path, which can only come from a deserialized
    /// configuration, resolves to the default.
    pub fn base_path(&self) -> &Path {
        if self.base_path.as_os_str().is_empty() {
            Path::new(DEFAULT_BASE_PATH)
        } else {
            &self.base_path
        }
    }

    pub fn set_base_path(&mut self, base_path: impl Into<PathBuf>) -> RepoResult<()> {
        let base_path = base_path.into();
        if base_path.as_os_str().is_empty() {
            log::error!("Base path cannot be empty");
            return Err(RepoError::new(
                "Base path cannot be empty",
                ErrorKind::ValidationError,
            ));
        }
        self.base_path = base_path;
        Ok(())
    }

    /// Whether entity files are written with 2-space indentation.
    pub fn pretty_print(&self) -> bool {
        self.pretty_print
    }

    pub fn set_pretty_print(&mut self, pretty_print: bool) {
        self.pretty_print = pretty_print;
    }

    /// Whether the previous entity file is copied to `{entity}.json.backup`
    /// before it is overwritten.
    pub fn backup(&self) -> bool {
        self.backup
    }

    pub fn set_backup(&mut self, backup: bool) {
        self.backup = backup;
    }

    /// Whether loading an absent entity creates it empty instead of failing.
    pub fn auto_create_entity(&self) -> bool {
        self.auto_create_entity
    }

    pub fn set_auto_create_entity(&mut self, auto_create_entity: bool) {
        self.auto_create_entity = auto_create_entity;
    }
}
