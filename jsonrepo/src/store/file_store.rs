use std::fs;
use std::io;
use std::path::Path;

use crate::collection::{Collection, Document};
use crate::errors::{ErrorKind, RepoError, RepoResult};
use crate::repository_config::RepositoryConfig;

use super::{EntityStoreProvider, PathResolver};

/// File backed entity store.
///
/// Each entity is one JSON file holding an array of documents. A persist
/// serializes the whole collection into `{entity}.json.tmp` and renames it
/// over `{entity}.json`, so readers only ever see a complete file. With
/// backups enabled the current file is first copied to
/// `{entity}.json.backup`; a failed copy is logged and ignored.
#[derive(Debug, Clone)]
pub struct FileStore {
    resolver: PathResolver,
    pretty_print: bool,
    backup: bool,
    auto_create_entity: bool,
}

impl FileStore {
    /// Creates a store below the configured base path.
    ///
    /// Nothing is touched on disk until the first load or persist.
    pub fn new(config: &RepositoryConfig) -> Self {
        FileStore {
            resolver: PathResolver::new(config.base_path()),
            pretty_print: config.pretty_print(),
            backup: config.backup(),
            auto_create_entity: config.auto_create_entity(),
        }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    fn ensure_parent(&self, path: &Path) -> RepoResult<()> {
        if let Some(parent) = path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                log::error!("Failed to create directory {}: {}", parent.display(), err);
                return Err(io_error(
                    &format!("Failed to create directory {}", parent.display()),
                    err,
                ));
            }
        }
        Ok(())
    }

    fn backup_entity(&self, entity: &str, path: &Path) -> RepoResult<()> {
        let backup_path = self.resolver.backup_path(entity)?;
        match fs::copy(path, &backup_path) {
            Ok(_) => log::debug!("Backed up {} to {}", path.display(), backup_path.display()),
            Err(err) => log::debug!("Skipping backup of entity '{}': {}", entity, err),
        }
        Ok(())
    }
}

impl EntityStoreProvider for FileStore {
    fn load(&self, entity: &str) -> RepoResult<Collection> {
        let path = self.resolver.entity_path(entity)?;
        self.ensure_parent(&path)?;

        match fs::read_to_string(&path) {
            Ok(content) => {
                let documents = parse_collection(entity, &content)?;
                log::debug!("Loaded {} document(s) from {}", documents.len(), path.display());
                Ok(documents)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                if self.auto_create_entity {
                    log::debug!("Creating entity '{}' at {}", entity, path.display());
                    self.persist(entity, &[])?;
                    Ok(Vec::new())
                } else {
                    log::error!("Entity '{}' does not exist at {}", entity, path.display());
                    Err(RepoError::new(
                        &format!("Entity '{}' does not exist", entity),
                        ErrorKind::NotFound,
                    ))
                }
            }
            Err(err) => {
                log::error!("Failed to read {}: {}", path.display(), err);
                Err(io_error(&format!("Failed to read entity '{}'", entity), err))
            }
        }
    }

    fn persist(&self, entity: &str, documents: &[Document]) -> RepoResult<()> {
        let path = self.resolver.entity_path(entity)?;
        self.ensure_parent(&path)?;

        let content = if self.pretty_print {
            serde_json::to_string_pretty(documents)
        } else {
            serde_json::to_string(documents)
        }
        .map_err(|err| {
            log::error!("Failed to encode entity '{}': {}", entity, err);
            RepoError::new_with_cause(
                &format!("Failed to encode entity '{}'", entity),
                ErrorKind::EncodingError,
                err.into(),
            )
        })?;

        if self.backup {
            self.backup_entity(entity, &path)?;
        }

        let temp_path = self.resolver.temp_path(entity)?;
        if let Err(err) = fs::write(&temp_path, content) {
            log::error!("Failed to write {}: {}", temp_path.display(), err);
            let _ = fs::remove_file(&temp_path);
            return Err(io_error(&format!("Failed to write entity '{}'", entity), err));
        }

        if let Err(err) = fs::rename(&temp_path, &path) {
            log::error!(
                "Failed to move {} to {}: {}",
                temp_path.display(),
                path.display(),
                err
            );
            let _ = fs::remove_file(&temp_path);
            return Err(io_error(&format!("Failed to write entity '{}'", entity), err));
        }

        log::debug!("Persisted {} document(s) to {}", documents.len(), path.display());
        Ok(())
    }

    fn lock_key(&self, entity: &str) -> RepoResult<String> {
        let path = self.resolver.entity_path(entity)?;
        Ok(path.to_string_lossy().into_owned())
    }
}

fn parse_collection(entity: &str, content: &str) -> RepoResult<Vec<Document>> {
    serde_json::from_str(content).map_err(|err| {
        log::error!("Entity '{}' is not a JSON array of documents: {}", entity, err);
        RepoError::new_with_cause(
            &format!("Entity '{}' is not a valid JSON array of documents: {}", entity, err),
            ErrorKind::ParseError,
            err.into(),
        )
    })
}

fn io_error(message: &str, err: io::Error) -> RepoError {
    let cause = RepoError::from(err);
    RepoError::new_with_cause(message, cause.kind().clone(), cause)
}
