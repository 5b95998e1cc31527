//! One-shot credential restoration.
//!
//! A [`CredentialSource`] is a place a previously persisted credential can be
//! restored from before the first read of the session, e.g. a token file
//! written by an earlier run or an environment variable set by a wrapper
//! script. Sources are consulted exactly once via
//! [`SessionHolder::bootstrap`](super::SessionHolder::bootstrap); the holder
//! never watches them for later changes.

use std::path::{Path, PathBuf};

use crate::error::{ApiSessionError, Result};
use crate::session::Credential;

/// An external place a persisted credential can be read from.
pub trait CredentialSource {
    /// Load the persisted credential, if one exists.
    ///
    /// `Ok(None)` means nothing was persisted; an `Err` propagates to the
    /// bootstrap caller untouched.
    fn load(&self) -> Result<Option<Credential>>;
}

impl<F> CredentialSource for F
where
    F: Fn() -> Result<Option<Credential>>,
{
    fn load(&self) -> Result<Option<Credential>> {
        self()
    }
}

/// Reads a credential from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvCredentialSource {
    var: String,
}

impl EnvCredentialSource {
    /// Create a source reading from the given variable.
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    /// The variable this source reads from.
    pub fn var(&self) -> &str {
        &self.var
    }
}

impl CredentialSource for EnvCredentialSource {
    fn load(&self) -> Result<Option<Credential>> {
        match std::env::var(&self.var) {
            Ok(value) if !value.is_empty() => Ok(Some(Credential::new(value))),
            Ok(_) | Err(std::env::VarError::NotPresent) => Ok(None),
            Err(err) => Err(ApiSessionError::CredentialSource(format!(
                "{}: {}",
                self.var, err
            ))),
        }
    }
}

/// Reads a credential from a token file.
///
/// The file contents are trimmed of surrounding whitespace. A missing file
/// means no credential was persisted; any other I/O failure propagates.
#[derive(Debug, Clone)]
pub struct FileCredentialSource {
    path: PathBuf,
}

impl FileCredentialSource {
    /// Create a source reading from the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialSource for FileCredentialSource {
    fn load(&self) -> Result<Option<Credential>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(Credential::new(token)))
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
