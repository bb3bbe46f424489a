use serde::Serialize;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Rejected(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    DataAccess(String),

    #[error("Unreadable event: {0}")]
    BadEvent(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidInput(msg) => AppError::Rejected(msg),
            DomainError::NotFound(what) => AppError::NotFound(what),
            DomainError::DataAccess(inner) => AppError::DataAccess(inner.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::BadEvent(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Warning,
    Error,
}

/// What the user sees when an action fails: a modal with a title and the
/// failure message. The action is simply abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

impl AppError {
    pub fn notification(&self) -> Notification {
        let (level, title) = match self {
            AppError::Rejected(_) => (NotificationLevel::Warning, "Warning"),
            AppError::NotFound(_) => (NotificationLevel::Warning, "Not found"),
            AppError::DataAccess(_) => (NotificationLevel::Error, "Error"),
            AppError::BadEvent(_) => (NotificationLevel::Error, "Error"),
        };
        Notification {
            level,
            title: title.to_string(),
            message: self.to_string(),
        }
    }
}
