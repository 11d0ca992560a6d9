use thiserror::Error;

/// Failures from the catalog service boundary.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network failure or non-2xx status. `operation` names the attempted
    /// call so degraded paths can log which half of the view broke.
    #[error("{operation} for movie {id} failed: {detail}")]
    RemoteFetch {
        operation: &'static str,
        id: i32,
        detail: String,
    },

    /// The response parsed as text but did not match the expected shape.
    #[error("{operation} for movie {id} returned an invalid payload: {source}")]
    InvalidPayload {
        operation: &'static str,
        id: i32,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    pub fn operation(&self) -> &'static str {
        match self {
            CatalogError::RemoteFetch { operation, .. } => operation,
            CatalogError::InvalidPayload { operation, .. } => operation,
        }
    }
}

/// Failures from the favorites persistence boundary.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The persisted blob exists but cannot be parsed. Never coerced to an
    /// empty list: doing so would destroy the user's favorites on the next
    /// write.
    #[error("favorites store is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// The write failed; the previously persisted value is left unchanged.
    #[error("favorites write failed: {0}")]
    Write(#[source] std::io::Error),

    /// The blob could not be read for a reason other than absence.
    #[error("favorites read failed: {0}")]
    Read(#[source] std::io::Error),
}

/// Top-level error surfaced to the UI layer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type AppResult<T> = Result<T, AppError>;
