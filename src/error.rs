//! Error types for api-session.

use thiserror::Error;

/// Main error type for api-session operations.
///
/// The session holder itself has no failure modes: reads always succeed and
/// replacing the credential never fails. Errors only arise while restoring a
/// persisted credential during bootstrap.
#[derive(Error, Debug)]
pub enum ApiSessionError {
    /// A credential source failed to produce a value.
    #[error("credential source error: {0}")]
    CredentialSource(String),

    /// I/O error while reading a persisted credential.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for api-session operations.
pub type Result<T> = std::result::Result<T, ApiSessionError>;
