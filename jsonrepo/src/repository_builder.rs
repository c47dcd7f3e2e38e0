use std::path::PathBuf;

use crate::errors::{RepoError, RepoResult};
use crate::repository::Repository;
use crate::repository_config::RepositoryConfig;
use crate::store::{EntityStore, EntityStoreProvider, FileStore, MemoryStore};

/// Builder for opening a [Repository].
///
/// `RepositoryBuilder` starts from the default configuration and captures the
/// first configuration error, which is returned by [RepositoryBuilder::open].
///
/// # Examples
///
/// ```rust
/// use jsonrepo::repository::Repository;
///
/// let repository = Repository::builder()
///     .base_path(std::env::temp_dir().join("jsonrepo-builder-doc"))
///     .pretty_print(false)
///     .backup(true)
///     .open()
///     .unwrap();
/// assert!(repository.config().backup());
///
/// // errors are reported when the repository is opened
/// assert!(Repository::builder().base_path("").open().is_err());
/// ```
#[derive(Default)]
pub struct RepositoryBuilder {
    error: Option<RepoError>,
    config: RepositoryConfig,
    store: Option<EntityStore>,
    in_memory: bool,
}

impl RepositoryBuilder {
    pub fn new() -> Self {
        RepositoryBuilder {
            error: None,
            config: RepositoryConfig::new(),
            store: None,
            in_memory: false,
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: RepositoryConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the directory holding the entity files.
    ///
    /// An empty path is an error reported by `open()`.
    pub fn base_path(mut self, base_path: impl Into<PathBuf>) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_base_path(base_path) {
                self.error = Some(e);
            }
        }
        self
    }

    pub fn pretty_print(mut self, pretty_print: bool) -> Self {
        self.config.set_pretty_print(pretty_print);
        self
    }

    pub fn backup(mut self, backup: bool) -> Self {
        self.config.set_backup(backup);
        self
    }

    pub fn auto_create_entity(mut self, auto_create_entity: bool) -> Self {
        self.config.set_auto_create_entity(auto_create_entity);
        self
    }

    /// Keeps all collections in process memory instead of files.
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Uses a custom storage backend.
    ///
    /// The backend takes precedence over the storage settings of the
    /// configuration.
    pub fn store<T: EntityStoreProvider + 'static>(mut self, store: T) -> Self {
        self.store = Some(EntityStore::new(store));
        self
    }

    /// Opens the repository.
    ///
    /// No file is touched until the first operation.
    pub fn open(self) -> RepoResult<Repository> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let store = match self.store {
            Some(store) => store,
            None if self.in_memory => EntityStore::new(MemoryStore::with_config(&self.config)),
            None => EntityStore::new(FileStore::new(&self.config)),
        };
        Ok(Repository::new(self.config, store))
    }
}
