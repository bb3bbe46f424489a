use thiserror::Error;

/// The only failure a repository reports. Connectivity problems, constraint
/// violations and corrupt rows all collapse into this one kind; a missing row
/// is an `Ok(None)`, never this error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Data access failed: {0}")]
pub struct DataAccessError(pub String);

impl DataAccessError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    DataAccess(#[from] DataAccessError),
    #[error("{0} not found")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
