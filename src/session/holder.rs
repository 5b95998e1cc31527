//! The session holder.
//!
//! [`SessionHolder`] owns one client instance and one optional credential,
//! published together as an immutable [`Session`] snapshot through a watch
//! channel. Replacing the credential rebuilds the client and publishes the
//! new snapshot atomically, so a reader can never observe a client that lags
//! the credential it was built with.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::client::{ClientConfig, ClientFactory};
use crate::config::Config;
use crate::error::Result;
use crate::session::{Credential, CredentialSource, Session};

struct Inner<F: ClientFactory> {
    factory: F,
    host: String,
    tx: watch::Sender<Arc<Session<F::Client>>>,
    bootstrapped: AtomicBool,
}

/// Owns the current client instance and credential.
///
/// The holder is a cheaply cloneable handle to shared state; clones observe
/// and mutate the same session. Pass clones (or a [`SessionHandle`]) down
/// through constructors instead of relying on globals.
///
/// On creation the session starts unauthenticated with a client built for the
/// configured host. Each [`set_credential`](Self::set_credential) call asks
/// the factory for a fresh client and replaces the snapshot; all subsequent
/// reads, including by subscribers that predate the call, observe the new
/// client.
pub struct SessionHolder<F: ClientFactory> {
    inner: Arc<Inner<F>>,
}

impl<F: ClientFactory> Clone for SessionHolder<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: ClientFactory> SessionHolder<F> {
    /// Create a holder for the given host with no credential.
    pub fn new(factory: F, host: impl Into<String>) -> Self {
        let host = host.into();
        let client = factory.build(&ClientConfig::new(host.clone()));
        let (tx, _rx) = watch::channel(Arc::new(Session::new(client, None)));

        Self {
            inner: Arc::new(Inner {
                factory,
                host,
                tx,
                bootstrapped: AtomicBool::new(false),
            }),
        }
    }

    /// Create a holder from loaded configuration.
    pub fn with_config(factory: F, config: &Config) -> Self {
        Self::new(factory, config.api.host.clone())
    }

    /// The host every client built by this holder connects to.
    pub fn host(&self) -> &str {
        &self.inner.host
    }

    /// Current session snapshot.
    ///
    /// No side effects; always succeeds. The returned `Arc` keeps the same
    /// identity across reads until the credential changes, so consumers can
    /// use pointer equality to skip recomputation.
    pub fn session(&self) -> Arc<Session<F::Client>> {
        self.inner.tx.borrow().clone()
    }

    /// Clone of the current client instance.
    pub fn client(&self) -> F::Client {
        self.inner.tx.borrow().client().clone()
    }

    /// The currently active credential, if any.
    pub fn credential(&self) -> Option<Credential> {
        self.inner.tx.borrow().credential().cloned()
    }

    /// Store `token` as the active credential and rebuild the client.
    ///
    /// Accepts any token value; validation is the client library's concern.
    pub fn set_credential(&self, token: impl Into<Credential>) {
        self.replace(Some(token.into()));
    }

    /// Drop the active credential and rebuild an unauthenticated client.
    pub fn clear_credential(&self) {
        self.replace(None);
    }

    fn replace(&self, credential: Option<Credential>) {
        let authenticated = credential.is_some();
        // Build inside the channel's write path so construction and
        // publication are atomic with respect to readers.
        self.inner.tx.send_modify(|session| {
            let config = ClientConfig {
                host: self.inner.host.clone(),
                credential,
            };
            let client = self.inner.factory.build(&config);
            *session = Arc::new(Session::new(client, config.credential));
        });
        debug!(authenticated, "client replaced");
    }

    /// Subscribe to session replacements.
    ///
    /// The receiver starts at the current snapshot; `changed()` resolves
    /// after each subsequent replacement.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Session<F::Client>>> {
        self.inner.tx.subscribe()
    }

    /// Synchronize the session to an externally persisted credential.
    ///
    /// Runs at most once per holder: the first call consults the source and,
    /// if it yields a token, applies it via [`set_credential`](Self::set_credential);
    /// every later call is a no-op returning `Ok(false)`. The source is never
    /// watched for subsequent changes; a refresh elsewhere must be applied
    /// with an explicit `set_credential`.
    ///
    /// Returns `Ok(true)` when a credential was restored and applied. Source
    /// failures propagate untouched; the holder neither retries nor logs
    /// them.
    pub fn bootstrap<S>(&self, source: &S) -> Result<bool>
    where
        S: CredentialSource + ?Sized,
    {
        if self.inner.bootstrapped.swap(true, Ordering::SeqCst) {
            return Ok(false);
        }

        match source.load()? {
            Some(token) => {
                info!("credential restored from external source");
                self.set_credential(token);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Consumer-facing accessor pair for this holder.
    pub fn handle(&self) -> SessionHandle<F::Client> {
        let holder = self.clone();
        SessionHandle {
            rx: self.subscribe(),
            set: Arc::new(move |token| holder.set_credential(token)),
        }
    }
}

impl<F: ClientFactory> fmt::Debug for SessionHolder<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHolder")
            .field("host", &self.inner.host)
            .field("authenticated", &self.session().is_authenticated())
            .finish_non_exhaustive()
    }
}

/// The `{client, set_credential}` pair handed down to consumers.
///
/// Cloning is cheap and every clone shares the same setter identity and
/// observes the same holder. A handle built before any holder exists (see
/// [`unprovisioned`](Self::unprovisioned)) serves a default snapshot and
/// ignores setter calls.
pub struct SessionHandle<C> {
    rx: watch::Receiver<Arc<Session<C>>>,
    set: Arc<dyn Fn(Credential) + Send + Sync>,
}

impl<C> Clone for SessionHandle<C> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
            set: Arc::clone(&self.set),
        }
    }
}

impl<C: Clone + Send + Sync + 'static> SessionHandle<C> {
    /// Handle not backed by a holder.
    ///
    /// Serves the given client with no credential forever; the setter is a
    /// no-op. Useful as a default in code paths that may run before the
    /// application root wires up a real holder.
    pub fn unprovisioned(client: C) -> Self {
        let (_tx, rx) = watch::channel(Arc::new(Session::new(client, None)));
        Self {
            rx,
            set: Arc::new(|_| {}),
        }
    }

    /// Current session snapshot.
    pub fn session(&self) -> Arc<Session<C>> {
        self.rx.borrow().clone()
    }

    /// Clone of the current client instance.
    pub fn client(&self) -> C {
        self.rx.borrow().client().clone()
    }

    /// Forward a new credential to the owning holder.
    pub fn set_credential(&self, token: impl Into<Credential>) {
        (self.set)(token.into());
    }

    /// Subscribe to session replacements.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Session<C>>> {
        self.rx.clone()
    }
}

impl<C> fmt::Debug for SessionHandle<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle").finish_non_exhaustive()
    }
}
