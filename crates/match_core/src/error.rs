use thiserror::Error;

use crate::domain::{AnnouncementId, RouteId};

/// Failure reported by a data-access adapter (candidate reads, match writes,
/// notifications).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DataAccessError {
    message: String,
}

impl DataAccessError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFound {
    #[error("announcement {0} not found")]
    Announcement(AnnouncementId),
    #[error("route {0} not found")]
    Route(RouteId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error(transparent)]
    NotFound(#[from] NotFound),
    #[error("data access failed: {0}")]
    DataAccess(#[from] DataAccessError),
    #[error("invalid matching criteria: {0}")]
    InvalidCriteria(String),
}
