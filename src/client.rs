//! Client construction interface.
//!
//! The session holder treats the network client as an opaque capability: it
//! only knows how to ask a [`ClientFactory`] for a new instance whenever the
//! credential changes. The actual networking library is supplied by the
//! embedding application; [`ApiClient`] is a minimal default handle that
//! records the configuration it was built with.

use serde::{Deserialize, Serialize};

use crate::session::Credential;

/// Configuration handed to a [`ClientFactory`] when building a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Host the client connects to.
    pub host: String,
    /// Credential to authenticate with, if any.
    pub credential: Option<Credential>,
}

impl ClientConfig {
    /// Create a config for the given host with no credential.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            credential: None,
        }
    }

    /// Attach a credential.
    pub fn with_credential(mut self, credential: impl Into<Credential>) -> Self {
        self.credential = Some(credential.into());
        self
    }
}

/// Constructs client instances from a [`ClientConfig`].
///
/// Construction is assumed total: a factory must produce a client for any
/// well-formed config. An invalid token is the client library's concern and
/// surfaces however that library surfaces it, never here.
pub trait ClientFactory: Send + Sync + 'static {
    /// The client handle type this factory produces.
    type Client: Clone + Send + Sync + 'static;

    /// Build a new client configured with the given host and credential.
    fn build(&self, config: &ClientConfig) -> Self::Client;
}

impl<C, F> ClientFactory for F
where
    F: Fn(&ClientConfig) -> C + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    type Client = C;

    fn build(&self, config: &ClientConfig) -> C {
        self(config)
    }
}

/// Default client handle.
///
/// Records the configuration it was built with and exposes it for
/// inspection. Network behavior belongs to the external client library; this
/// handle is what embedders use when they only need the session plumbing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    config: ClientConfig,
}

impl ApiClient {
    /// Build a client handle from the given configuration.
    pub fn connect(config: &ClientConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// The host this client was configured with.
    pub fn host(&self) -> &str {
        &self.config.host
    }

    /// The credential this client was configured with, if any.
    pub fn credential(&self) -> Option<&Credential> {
        self.config.credential.as_ref()
    }

    /// The full configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

/// Factory producing [`ApiClient`] handles.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiClientFactory;

impl ClientFactory for ApiClientFactory {
    type Client = ApiClient;

    fn build(&self, config: &ClientConfig) -> ApiClient {
        ApiClient::connect(config)
    }
}
