use std::path::PathBuf;

use thiserror::Error;

use crate::catalogue::CatalogueError;
use crate::output::OutputError;

/// Errors that abort a generation run. All are raised before or while writing;
/// there is no partial recovery.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Catalogue error: {0}")]
    Catalogue(#[from] CatalogueError),
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Tenant run needs at least one tenant")]
    NoTenants,
    #[error("Duplicate tenant id: {0}")]
    DuplicateTenant(String),
    #[error("Failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

impl GenerationError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenerationError::Io {
            path: path.into(),
            source,
        }
    }
}
