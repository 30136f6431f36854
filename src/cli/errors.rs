use std::path::PathBuf;

use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config file not found: {path:?}")]
    MissingConfig { path: PathBuf },

    #[error("Input not found: {path:?}")]
    MissingInput { path: PathBuf },

    #[error("All {errors} images failed to process")]
    AllFailed { errors: usize },

    #[error(transparent)]
    Library(#[from] spritecut::Error),
}
