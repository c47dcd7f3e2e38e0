use std::path::{Path, PathBuf};

use crate::common::{
    BACKUP_FILE_SUFFIX, ENTITY_FILE_EXTENSION, ENTITY_NAME_SEPARATOR, TEMP_FILE_SUFFIX,
};
use crate::errors::{ErrorKind, RepoError, RepoResult};

/// Maps entity names to their files below a base directory.
///
/// `users` resolves to `{base}/users.json`, `shop/orders` to
/// `{base}/shop/orders.json`. The backup and temporary files are siblings of
/// the entity file with `.backup` and `.tmp` appended.
#[derive(Debug, Clone)]
pub struct PathResolver {
    base_path: PathBuf,
}

impl PathResolver {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        PathResolver {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns `{base}/{entity}.json`.
    pub fn entity_path(&self, entity: &str) -> RepoResult<PathBuf> {
        self.resolve(entity, "")
    }

    /// Returns `{base}/{entity}.json.backup`.
    pub fn backup_path(&self, entity: &str) -> RepoResult<PathBuf> {
        self.resolve(entity, BACKUP_FILE_SUFFIX)
    }

    /// Returns `{base}/{entity}.json.tmp`.
    pub fn temp_path(&self, entity: &str) -> RepoResult<PathBuf> {
        self.resolve(entity, TEMP_FILE_SUFFIX)
    }

    fn resolve(&self, entity: &str, suffix: &str) -> RepoResult<PathBuf> {
        validate_entity_name(entity)?;

        let mut path = self.base_path.clone();
        let mut segments = entity.split(ENTITY_NAME_SEPARATOR).peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_some() {
                path.push(segment);
            } else {
                path.push(format!("{}.{}{}", segment, ENTITY_FILE_EXTENSION, suffix));
            }
        }
        Ok(path)
    }
}

/// Checks that an entity name is a safe relative name.
///
/// # Errors
///
/// Returns [ErrorKind::ValidationError] when the name is empty, absolute,
/// contains a backslash or NUL character, or has an empty, `.` or `..`
/// segment.
pub fn validate_entity_name(entity: &str) -> RepoResult<()> {
    if entity.is_empty() {
        log::error!("Entity name is empty");
        return Err(RepoError::new(
            "Entity name is required and must be a string",
            ErrorKind::ValidationError,
        ));
    }

    if entity.starts_with(ENTITY_NAME_SEPARATOR) {
        log::error!("Entity name {} is absolute", entity);
        return Err(RepoError::new(
            &format!("Entity name must be a relative name: {}", entity),
            ErrorKind::ValidationError,
        ));
    }

    if entity.contains('\\') || entity.contains('\0') {
        log::error!("Entity name {:?} contains an illegal character", entity);
        return Err(RepoError::new(
            &format!("Entity name contains an illegal character: {:?}", entity),
            ErrorKind::ValidationError,
        ));
    }

    let invalid_segment = entity
        .split(ENTITY_NAME_SEPARATOR)
        .any(|segment| segment.is_empty() || segment == "." || segment == "..");
    if invalid_segment {
        log::error!("Entity name {} has an invalid segment", entity);
        return Err(RepoError::new(
            &format!("Entity name contains an invalid segment: {}", entity),
            ErrorKind::ValidationError,
        ));
    }

    Ok(())
}
