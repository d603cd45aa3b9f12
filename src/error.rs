use std::path::PathBuf;

use thiserror::Error;

/// Failures of the durable key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode projects: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("storage quota exceeded ({needed} bytes needed, limit is {limit})")]
    QuotaExceeded { needed: usize, limit: usize },
}

/// Rejected progress entry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProgressError {
    #[error("Progress is empty")]
    Empty,

    #[error("Progress must be a number, got '{0}'")]
    NotNumeric(String),

    #[error("Progress must be between 0 and 100, got {0}")]
    OutOfRange(f64),
}

/// Rejected add/edit form submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Project name is required")]
    MissingName,
}

/// Anything a dashboard action can report back to the user.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Progress(#[from] ProgressError),

    /// The change is applied in memory but did not reach the store.
    #[error("Changes not saved: {0}")]
    Unsaved(#[from] StoreError),
}
