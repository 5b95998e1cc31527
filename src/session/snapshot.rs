//! Session snapshot.

use super::Credential;

/// Point-in-time view of the held client and its credential.
///
/// Snapshots are read-only: consumers receive them behind an `Arc` from
/// [`SessionHolder::session`](super::SessionHolder::session) and can never
/// mutate the holder's state through one. The client always reflects the
/// credential stored alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session<C> {
    client: C,
    credential: Option<Credential>,
}

impl<C> Session<C> {
    pub(crate) fn new(client: C, credential: Option<Credential>) -> Self {
        Self { client, credential }
    }

    /// The client instance current at the time of this snapshot.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// The credential the client was built with, if any.
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// Whether a credential has been set.
    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }
}
