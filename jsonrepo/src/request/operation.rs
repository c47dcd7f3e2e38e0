use std::fmt::Display;
use std::str::FromStr;

use crate::errors::{ErrorKind, RepoError};

/// The operations a request can ask for.
///
/// Names are parsed case-insensitively and displayed upper-cased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Get,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "ADD",
            Operation::Get => "GET",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
        }
    }
}

impl FromStr for Operation {
    type Err = RepoError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_uppercase().as_str() {
            "ADD" => Ok(Operation::Add),
            "GET" => Ok(Operation::Get),
            "UPDATE" => Ok(Operation::Update),
            "DELETE" => Ok(Operation::Delete),
            _ => {
                log::error!("Unsupported operation {}", name);
                Err(RepoError::new(
                    "Operation must be one of: ADD, GET, UPDATE, DELETE",
                    ErrorKind::ValidationError,
                ))
            }
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
