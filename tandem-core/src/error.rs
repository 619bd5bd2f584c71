//! Error types for the tandem ecosystem.

use thiserror::Error;

/// Errors that can occur in tandem operations.
#[derive(Error, Debug)]
pub enum TandemError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Provider '{0}' not found in PATH")]
    ProviderNotInstalled(String),

    #[error("Provider request timed out after {0}s")]
    ProviderTimeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for tandem operations.
pub type TandemResult<T> = Result<T, TandemError>;
