use serde::{Deserialize, Serialize};

use crate::collection::{Document, OperationResult};
use crate::errors::{RepoError, RepoResult};

use super::Operation;

/// The outcome of an executed [Request](super::Request).
///
/// A successful response carries the documents produced by the operation,
/// their count and a summary message. A failed one carries no data, a count
/// of zero, the error message and, in `error`, a diagnostic trace of the
/// error. The trace is meant for humans and its format is not stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    pub operation: String,
    pub entity: String,
    pub data: Option<Vec<Document>>,
    pub count: usize,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn success(operation: Operation, entity: &str, result: OperationResult) -> Self {
        let (documents, count, message) = result.into_parts();
        Response {
            success: true,
            operation: operation.to_string(),
            entity: entity.to_string(),
            data: Some(documents),
            count,
            message,
            error: None,
        }
    }

    pub fn failure(operation: &str, entity: &str, error: &RepoError) -> Self {
        Response {
            success: false,
            operation: operation.to_string(),
            entity: entity.to_string(),
            data: None,
            count: 0,
            message: error.message().to_string(),
            error: Some(format!("{:?}", error)),
        }
    }

    pub fn to_json(&self) -> RepoResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> RepoResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
