use crate::repository::RepositoryError;

pub mod catalog;
pub mod errors;
pub mod recipes;
pub mod suggestions;

pub use errors::{ServiceError, ServiceResult};

/// Translate a repository failure into the error reported to callers.
///
/// Missing rows and constraint conflicts are expected outcomes; everything
/// else is logged and hidden behind [`ServiceError::Internal`].
pub(crate) fn repository_failure(context: &str, err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::NotFound => ServiceError::NotFound,
        RepositoryError::Conflict(message) => {
            log::warn!("{context}: {message}");
            ServiceError::Conflict(message)
        }
        other => {
            log::error!("{context}: {other}");
            ServiceError::Internal
        }
    }
}
