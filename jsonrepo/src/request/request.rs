use serde::{Deserialize, Serialize};

use crate::collection::Document;
use crate::common::Value;
use crate::doc;
use crate::errors::{ErrorKind, RepoError, RepoResult};
use crate::filter::{all, Filter};
use crate::repository_config::RepositoryConfig;

use super::Operation;

/// A request for one repository operation.
///
/// Every field is optional on the wire and only checked when the request is
/// executed, so a malformed request still produces a failure response that
/// names what was wrong. The checks run in order: entity, operation, data,
/// filters.
///
/// # Examples
///
/// ```rust
/// use jsonrepo::doc;
/// use jsonrepo::request::{Operation, Request};
///
/// let request = Request::new()
///     .entity("users")
///     .operation(Operation::Update)
///     .data(doc! { active: false })
///     .filters(doc! { "lastLogin": { "$lt": 2020 } });
///
/// let parsed = Request::from_json(
///     r#"{"entity": "users", "operation": "update",
///         "data": {"active": false}, "filters": {"lastLogin": {"$lt": 2020}}}"#,
/// ).unwrap();
/// assert_eq!(parsed.entity_name(), request.entity_name());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    entity: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    operation: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filters: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    config: Option<Value>,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a request from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::ValidationError] when the text is not a JSON
    /// object. Members are checked only when the request is executed.
    pub fn from_json(json: &str) -> RepoResult<Request> {
        serde_json::from_str(json).map_err(|err| {
            log::error!("Failed to parse request: {}", err);
            RepoError::new_with_cause(
                &format!("Invalid request: {}", err),
                ErrorKind::ValidationError,
                err.into(),
            )
        })
    }

    pub fn to_json(&self) -> RepoResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(Value::String(entity.into()));
        self
    }

    /// Sets the operation. Both [Operation]s and names are accepted.
    pub fn operation<T: ToString>(mut self, operation: T) -> Self {
        self.operation = Some(Value::String(operation.to_string()));
        self
    }

    /// Sets a single document as data.
    pub fn data(mut self, document: Document) -> Self {
        self.data = Some(Value::Document(document));
        self
    }

    /// Sets a batch of documents as data.
    pub fn data_batch(mut self, documents: Vec<Document>) -> Self {
        self.data = Some(Value::Array(documents.into_iter().map(Value::Document).collect()));
        self
    }

    pub fn filters(mut self, filters: Document) -> Self {
        self.filters = Some(Value::Document(filters));
        self
    }

    /// Sets the configuration used when the request is executed on its own.
    pub fn config(mut self, config: RepositoryConfig) -> Self {
        self.config = Some(Value::Document(doc! {
            basePath: (config.base_path().to_string_lossy().into_owned()),
            prettyPrint: (config.pretty_print()),
            backup: (config.backup()),
            autoCreateEntity: (config.auto_create_entity())
        }));
        self
    }

    /// The entity name, if the request carries one as a string.
    pub fn entity_name(&self) -> Option<&str> {
        self.entity.as_ref().and_then(Value::as_str)
    }

    /// The operation name as given, if the request carries one as a string.
    pub fn operation_name(&self) -> Option<&str> {
        self.operation.as_ref().and_then(Value::as_str)
    }

    /// The configuration carried by the request, with missing keys set to
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::ValidationError] when `config` is not an object or
    /// one of its keys has the wrong type.
    pub fn repository_config(&self) -> RepoResult<Option<RepositoryConfig>> {
        let config = match &self.config {
            None | Some(Value::Null) => return Ok(None),
            Some(config) => config,
        };

        serde_json::to_value(config)
            .and_then(serde_json::from_value)
            .map(Some)
            .map_err(|err| {
                log::error!("Request carries an invalid config: {}", err);
                RepoError::new_with_cause(
                    &format!("Invalid config: {}", err),
                    ErrorKind::ValidationError,
                    err.into(),
                )
            })
    }

    pub(crate) fn entity_label(&self) -> String {
        match self.entity_name() {
            Some(entity) if !entity.is_empty() => entity.to_string(),
            _ => "unknown".to_string(),
        }
    }

    pub(crate) fn operation_label(&self) -> String {
        match self.operation_name() {
            Some(operation) if !operation.is_empty() => operation.to_uppercase(),
            _ => "UNKNOWN".to_string(),
        }
    }

    pub(crate) fn validated_entity(&self) -> RepoResult<&str> {
        match self.entity_name() {
            Some(entity) if !entity.is_empty() => Ok(entity),
            _ => {
                log::error!("Request has no entity name");
                Err(RepoError::new(
                    "Entity name is required and must be a string",
                    ErrorKind::ValidationError,
                ))
            }
        }
    }

    pub(crate) fn validated_operation(&self) -> RepoResult<Operation> {
        match self.operation_name() {
            Some(operation) => operation.parse(),
            None => {
                log::error!("Request has no operation");
                Err(RepoError::new(
                    "Operation must be one of: ADD, GET, UPDATE, DELETE",
                    ErrorKind::ValidationError,
                ))
            }
        }
    }

    /// The documents to add: one document or a sequence of documents.
    pub(crate) fn documents(&self) -> RepoResult<Vec<Document>> {
        match self.required_data(Operation::Add)? {
            Value::Document(document) => Ok(vec![document.clone()]),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Document(document) => Ok(document.clone()),
                    other => {
                        log::error!("Data item is a {}, not an object", other.type_name());
                        Err(RepoError::new(
                            &format!("Data items must be objects, found {}", other.type_name()),
                            ErrorKind::ValidationError,
                        ))
                    }
                })
                .collect(),
            other => {
                log::error!("Data for ADD is a {}", other.type_name());
                Err(RepoError::new(
                    &format!(
                        "Data must be an object or an array of objects, found {}",
                        other.type_name()
                    ),
                    ErrorKind::ValidationError,
                ))
            }
        }
    }

    /// The document to merge into the matching documents.
    pub(crate) fn update_document(&self) -> RepoResult<&Document> {
        match self.required_data(Operation::Update)? {
            Value::Document(document) => Ok(document),
            other => {
                log::error!("Data for UPDATE is a {}", other.type_name());
                Err(RepoError::new(
                    &format!(
                        "Data for UPDATE operation must be an object, found {}",
                        other.type_name()
                    ),
                    ErrorKind::ValidationError,
                ))
            }
        }
    }

    /// Compiles the filter document. An absent filter selects everything.
    pub(crate) fn filter(&self) -> RepoResult<Filter> {
        match &self.filters {
            None => Ok(all()),
            Some(Value::Document(filters)) => Filter::from_document(filters),
            Some(other) => {
                log::error!("Filters are a {}, not an object", other.type_name());
                Err(RepoError::new(
                    &format!("Filters must be an object, found {}", other.type_name()),
                    ErrorKind::FilterError,
                ))
            }
        }
    }

    fn required_data(&self, operation: Operation) -> RepoResult<&Value> {
        match &self.data {
            Some(data) => Ok(data),
            None => {
                log::error!("Request for {} has no data", operation);
                Err(RepoError::new(
                    &format!("Data is required for {} operation", operation),
                    ErrorKind::ValidationError,
                ))
            }
        }
    }
}
