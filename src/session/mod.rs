//! Session state management.
//!
//! This module provides the session holder that owns the shared client
//! instance and credential, the read-only snapshot type handed to consumers,
//! and the one-shot credential restoration sources used at startup.

mod bootstrap;
mod credential;
mod holder;
mod snapshot;

pub use bootstrap::{CredentialSource, EnvCredentialSource, FileCredentialSource};
pub use credential::Credential;
pub use holder::{SessionHandle, SessionHolder};
pub use snapshot::Session;
