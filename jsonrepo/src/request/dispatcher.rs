use crate::collection::OperationResult;
use crate::errors::RepoResult;
use crate::repository::Repository;

use super::{Operation, Request, Response};

impl Repository {
    /// Executes a request against this repository.
    ///
    /// The request's own `config` is ignored; the repository's configuration
    /// applies. Errors never escape: they are turned into a failure
    /// [Response].
    pub fn execute(&self, request: &Request) -> Response {
        match self.dispatch(request) {
            Ok((operation, entity, result)) => {
                log::debug!("{} on entity '{}': {}", operation, entity, result.message());
                Response::success(operation, entity, result)
            }
            Err(error) => {
                let operation = request.operation_label();
                let entity = request.entity_label();
                log::warn!("{} on entity '{}' failed: {}", operation, entity, error);
                Response::failure(&operation, &entity, &error)
            }
        }
    }

    fn dispatch<'a>(
        &self,
        request: &'a Request,
    ) -> RepoResult<(Operation, &'a str, OperationResult)> {
        let entity = request.validated_entity()?;
        let operation = request.validated_operation()?;

        let result = match operation {
            Operation::Add => {
                let documents = request.documents()?;
                self.add(entity, documents)?
            }
            Operation::Get => {
                let filter = request.filter()?;
                self.get(entity, &filter)?
            }
            Operation::Update => {
                let update = request.update_document()?;
                let filter = request.filter()?;
                self.update(entity, update, &filter)?
            }
            Operation::Delete => {
                let filter = request.filter()?;
                self.delete(entity, &filter)?
            }
        };
        Ok((operation, entity, result))
    }
}

/// Executes a request with the configuration it carries.
///
/// A request without `config` uses the default configuration, and missing
/// keys of a partial `config` take their defaults. A malformed `config`
/// yields a failure response labelled with the request's own operation and
/// entity. Entity files are shared
/// with every other repository of the process that uses the same base path.
///
/// # Examples
///
/// ```rust
/// use jsonrepo::doc;
/// use jsonrepo::repository_config::RepositoryConfig;
/// use jsonrepo::request::{execute, Request};
///
/// let mut config = RepositoryConfig::new();
/// config.set_base_path(std::env::temp_dir().join("jsonrepo-execute-doc")).unwrap();
///
/// let response = execute(&Request::new()
///     .entity("users")
///     .operation("GET")
///     .config(config));
/// assert!(response.success);
///
/// let response = execute(&Request::new().entity("users").operation("PURGE"));
/// assert!(!response.success);
/// assert_eq!(response.operation, "PURGE");
/// assert_eq!(response.message, "Operation must be one of: ADD, GET, UPDATE, DELETE");
/// ```
pub fn execute(request: &Request) -> Response {
    match request.repository_config() {
        Ok(config) => Repository::open(config.unwrap_or_default()).execute(request),
        Err(error) => {
            let operation = request.operation_label();
            let entity = request.entity_label();
            log::warn!("{} on entity '{}' failed: {}", operation, entity, error);
            Response::failure(&operation, &entity, &error)
        }
    }
}

/// Parses a JSON request and executes it like [execute].
///
/// Text that is not a request object yields a failure response labelled
/// `UNKNOWN`/`unknown`.
pub fn execute_json(json: &str) -> Response {
    match Request::from_json(json) {
        Ok(request) => execute(&request),
        Err(error) => Response::failure("UNKNOWN", "unknown", &error),
    }
}
