//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use wordy_core::model::{SettingsError, StudyGroupId};

/// Errors emitted by `SettingsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsServiceError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `WordService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WordServiceError {
    #[error("word not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `HomeService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HomeServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by a running quiz.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz is not in progress")]
    NotInProgress,
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error("study group not found: {0}")]
    StudyGroupNotFound(StudyGroupId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
