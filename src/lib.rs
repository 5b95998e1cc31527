//! # api-session
//!
//! Shared API client session state for applications that talk to a single
//! backend host with a bearer credential.
//!
//! The crate centers on a [`SessionHolder`]: it owns one client instance and
//! one optional credential, and republishes them as an immutable snapshot
//! whenever the credential changes. Components receive a cloneable
//! [`SessionHandle`] through their constructors and read the current client
//! from it; a login or logout anywhere in the application swaps the client
//! for every reader at once.
//!
//! ## Features
//!
//! - **Atomic replacement**: the client is rebuilt and published in one step,
//!   so readers never see a client that lags the credential
//! - **Opaque clients**: any networking library plugs in via [`ClientFactory`]
//! - **One-shot bootstrap**: restore a persisted credential from a token file
//!   or environment variable at startup
//! - **Subscriptions**: await session replacements through a watch channel
//!
//! ## Quick Start
//!
//! ```
//! use api_session::{ApiClientFactory, SessionHolder};
//!
//! // Initialize logging
//! api_session::logging::try_init().ok();
//!
//! // Wire the holder up once near the application root
//! let holder = SessionHolder::new(ApiClientFactory, "");
//! let handle = holder.handle();
//!
//! // Hand `handle` clones down to components
//! assert!(!handle.session().is_authenticated());
//!
//! // A login event replaces the client for every reader
//! handle.set_credential("jwt-token");
//! assert_eq!(
//!     handle.session().credential().map(|c| c.expose()),
//!     Some("jwt-token"),
//! );
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;

// Re-export commonly used types
pub use client::{ApiClient, ApiClientFactory, ClientConfig, ClientFactory};
pub use config::{Config, ConfigError};
pub use error::{ApiSessionError, Result};
pub use session::{
    Credential, CredentialSource, EnvCredentialSource, FileCredentialSource, Session,
    SessionHandle, SessionHolder,
};
