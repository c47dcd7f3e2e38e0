use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

/// Error kinds for repository operations.
///
/// Each kind describes one category of failure so callers can branch on the
/// cause without parsing messages.
///
/// # Examples
///
/// ```rust
/// use jsonrepo::errors::{ErrorKind, RepoError, RepoResult};
///
/// fn example() -> RepoResult<()> {
///     Err(RepoError::new("Duplicate _id: 42", ErrorKind::DuplicateKey))
/// }
///
/// assert_eq!(example().unwrap_err().kind(), &ErrorKind::DuplicateKey);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Request Errors
    /// A required request field (entity, operation, data or filter) is missing or malformed
    ValidationError,
    /// A document `_id` collides with an existing one
    DuplicateKey,

    // Filter Errors
    /// A filter names a comparison operator that does not exist
    UnknownOperator,
    /// A filter is structurally invalid (e.g. `$and` without a sequence)
    FilterError,

    // Storage Errors
    /// The entity does not exist and auto-creation is disabled
    NotFound,
    /// The stored artifact is not a valid JSON array of documents
    ParseError,
    /// Generic IO error
    IOError,
    /// Permission denied for file operation
    PermissionDenied,
    /// Error encoding data
    EncodingError,

    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ValidationError => write!(f, "Validation error"),
            ErrorKind::DuplicateKey => write!(f, "Duplicate key"),
            ErrorKind::UnknownOperator => write!(f, "Unknown operator"),
            ErrorKind::FilterError => write!(f, "Filter error"),
            ErrorKind::NotFound => write!(f, "Not found"),
            ErrorKind::ParseError => write!(f, "Parse error"),
            ErrorKind::IOError => write!(f, "IO error"),
            ErrorKind::PermissionDenied => write!(f, "Permission denied"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Error type of every fallible repository operation.
///
/// `RepoError` carries a human readable message, an [ErrorKind], an optional
/// cause and the backtrace captured where it was raised. The backtrace is only
/// rendered by the `Debug` implementation and is meant for diagnostics.
///
/// # Examples
///
/// ```rust
/// use jsonrepo::errors::{ErrorKind, RepoError};
///
/// let cause = RepoError::new("disk unplugged", ErrorKind::IOError);
/// let err = RepoError::new_with_cause("Failed to persist entity", ErrorKind::IOError, cause);
/// assert!(err.cause().is_some());
/// ```
#[derive(Clone)]
pub struct RepoError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<RepoError>>,
    backtrace: Backtrace,
}

impl RepoError {
    /// Creates a new `RepoError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        RepoError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Backtrace::new(),
        }
    }

    /// Creates a new `RepoError` wrapping the error that caused it.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: RepoError) -> Self {
        RepoError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Backtrace::new(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&RepoError> {
        self.cause.as_deref()
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}: {}\nCaused by: {:?}", self.error_kind, self.message, cause),
            None => write!(f, "{}: {}\n{:?}", self.error_kind, self.message, self.backtrace),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for repository operations.
pub type RepoResult<T> = Result<T, RepoError>;

impl From<std::io::Error> for RepoError {
    fn from(err: std::io::Error) -> Self {
        let error_kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IOError,
        };
        RepoError::new(&format!("IO error: {}", err), error_kind)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            RepoError::new(&format!("IO error: {}", err), ErrorKind::IOError)
        } else if err.is_syntax() || err.is_data() || err.is_eof() {
            RepoError::new(&format!("JSON parse error: {}", err), ErrorKind::ParseError)
        } else {
            RepoError::new(&format!("JSON encoding error: {}", err), ErrorKind::EncodingError)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_error_new_creates_error() {
        let error = RepoError::new("An error occurred", ErrorKind::IOError);
        assert_eq!(error.message, "An error occurred");
        assert_eq!(error.error_kind, ErrorKind::IOError);
        assert!(error.cause.is_none());
    }

    #[test]
    fn repo_error_new_with_cause_creates_error() {
        let error = RepoError::new_with_cause(
            "Failed to persist",
            ErrorKind::IOError,
            RepoError::new("disk full", ErrorKind::IOError),
        );
        assert_eq!(error.message(), "Failed to persist");
        assert_eq!(error.cause().map(|c| c.message()), Some("disk full"));
        assert!(error.source().is_some());
    }

    #[test]
    fn repo_error_source_returns_none_when_no_cause() {
        let error = RepoError::new("An error occurred", ErrorKind::IOError);
        assert!(error.source().is_none());
    }

    #[test]
    fn repo_error_display_formats_message_only() {
        let error = RepoError::new("Unknown operator: $weird", ErrorKind::UnknownOperator);
        assert_eq!(format!("{}", error), "Unknown operator: $weird");
    }

    #[test]
    fn repo_error_debug_formats_with_cause() {
        let error = RepoError::new_with_cause(
            "An error occurred",
            ErrorKind::ParseError,
            RepoError::new("bad json", ErrorKind::ParseError),
        );
        let formatted = format!("{:?}", error);
        assert!(formatted.contains("An error occurred"));
        assert!(formatted.contains("Caused by:"));
        assert!(formatted.contains("bad json"));
    }

    #[test]
    fn io_error_kinds_are_mapped() {
        let not_found: RepoError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(not_found.kind(), &ErrorKind::NotFound);

        let denied: RepoError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope").into();
        assert_eq!(denied.kind(), &ErrorKind::PermissionDenied);

        let other: RepoError = std::io::Error::other("boom").into();
        assert_eq!(other.kind(), &ErrorKind::IOError);
    }

    #[test]
    fn serde_json_syntax_error_is_parse_error() {
        let err = serde_json::from_str::<Vec<u8>>("[1, 2").unwrap_err();
        let repo_error: RepoError = err.into();
        assert_eq!(repo_error.kind(), &ErrorKind::ParseError);
    }

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::DuplicateKey.to_string(), "Duplicate key");
        assert_eq!(ErrorKind::UnknownOperator.to_string(), "Unknown operator");
        assert_eq!(ErrorKind::NotFound.to_string(), "Not found");
    }
}
