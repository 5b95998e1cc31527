//! Session holder integration tests.
//!
//! These tests exercise the complete flow end-to-end: default state,
//! credential replacement, one-shot bootstrap from persisted sources, and
//! subscriber visibility.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use api_session::{
    ApiClient, ApiClientFactory, ClientConfig, Config, Credential, FileCredentialSource,
    SessionHolder,
};
use tempfile::NamedTempFile;

/// Holder over the default client with the fixed default host.
fn default_holder() -> SessionHolder<ApiClientFactory> {
    SessionHolder::new(ApiClientFactory, "")
}

/// Holder whose factory counts how many clients it has built.
fn counting_holder() -> (SessionHolder<impl api_session::ClientFactory<Client = ApiClient>>, Arc<AtomicUsize>) {
    let builds = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&builds);
    let holder = SessionHolder::new(
        move |config: &ClientConfig| {
            counter.fetch_add(1, Ordering::SeqCst);
            ApiClient::connect(config)
        },
        "",
    );
    (holder, builds)
}

fn active_credential(holder: &SessionHolder<impl api_session::ClientFactory<Client = ApiClient>>) -> Option<String> {
    holder
        .session()
        .credential()
        .map(|c| c.expose().to_string())
}

// ============================================================================
// Default State
// ============================================================================

#[test]
fn default_session_has_no_credential() {
    let holder = default_holder();
    let session = holder.session();

    assert!(!session.is_authenticated());
    assert_eq!(session.client().host(), "");
    assert!(session.client().credential().is_none());
}

#[test]
fn configured_host_flows_into_every_client() {
    let holder = SessionHolder::new(ApiClientFactory, "api.example.com");
    assert_eq!(holder.session().client().host(), "api.example.com");

    holder.set_credential("abc");
    assert_eq!(holder.session().client().host(), "api.example.com");
}

// ============================================================================
// Credential Replacement
// ============================================================================

#[test]
fn set_credential_from_empty_state() {
    let holder = default_holder();
    holder.set_credential("abc");

    let expected = ClientConfig::new("").with_credential("abc");
    assert_eq!(holder.session().client().config(), &expected);
}

#[test]
fn latest_credential_always_wins() {
    let holder = default_holder();
    holder.set_credential("t1");
    holder.set_credential("t2");

    let session = holder.session();
    assert_eq!(
        session.client().credential().map(Credential::expose),
        Some("t2")
    );
    assert_eq!(active_credential(&holder), Some("t2".into()));
}

#[test]
fn repeated_set_preserves_observable_config() {
    let holder = default_holder();
    holder.set_credential("same");
    let first = holder.session().client().config().clone();

    holder.set_credential("same");
    let second = holder.session().client().config().clone();

    assert_eq!(first, second);
}

#[test]
fn every_set_builds_a_fresh_client() {
    let (holder, builds) = counting_holder();
    assert_eq!(builds.load(Ordering::SeqCst), 1); // default client

    holder.set_credential("t1");
    holder.set_credential("t2");
    assert_eq!(builds.load(Ordering::SeqCst), 3);
}

#[test]
fn clear_credential_returns_to_unauthenticated() {
    let holder = default_holder();
    holder.set_credential("abc");
    holder.clear_credential();

    let session = holder.session();
    assert!(!session.is_authenticated());
    assert!(session.client().credential().is_none());
}

// ============================================================================
// Snapshot Identity
// ============================================================================

#[test]
fn reads_without_changes_share_one_snapshot() {
    let holder = default_holder();
    let a = holder.session();
    let b = holder.session();
    assert!(Arc::ptr_eq(&a, &b));

    holder.set_credential("abc");
    assert!(!Arc::ptr_eq(&a, &holder.session()));
}

#[test]
fn handles_and_holder_observe_the_same_snapshot() {
    let holder = default_holder();
    let handle = holder.handle();
    let clone = handle.clone();

    holder.set_credential("abc");

    assert!(Arc::ptr_eq(&holder.session(), &handle.session()));
    assert!(Arc::ptr_eq(&handle.session(), &clone.session()));
}

// ============================================================================
// Bootstrap
// ============================================================================

#[test]
fn bootstrap_restores_persisted_token() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"xyz\n").unwrap();

    let holder = default_holder();
    let source = FileCredentialSource::new(file.path());

    assert!(holder.bootstrap(&source).unwrap());
    let after_mount = holder.session();
    let expected = ClientConfig::new("").with_credential("xyz");
    assert_eq!(after_mount.client().config(), &expected);

    // A second render without further calls observes the identical snapshot.
    assert!(Arc::ptr_eq(&after_mount, &holder.session()));
}

#[test]
fn bootstrap_is_single_pass() {
    let loads = AtomicUsize::new(0);
    let source = || -> api_session::Result<Option<Credential>> {
        loads.fetch_add(1, Ordering::SeqCst);
        Ok(Some(Credential::from("first")))
    };

    let holder = default_holder();
    assert!(holder.bootstrap(&source).unwrap());
    assert!(!holder.bootstrap(&source).unwrap());
    assert!(!holder.bootstrap(&source).unwrap());

    // The source was consulted exactly once.
    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert_eq!(active_credential(&holder), Some("first".into()));
}

#[test]
fn bootstrap_with_nothing_persisted_leaves_default() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileCredentialSource::new(dir.path().join("missing-token"));

    let holder = default_holder();
    assert!(!holder.bootstrap(&source).unwrap());
    assert!(!holder.session().is_authenticated());
}

#[test]
fn explicit_set_after_bootstrap_still_replaces() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"persisted").unwrap();

    let holder = default_holder();
    holder
        .bootstrap(&FileCredentialSource::new(file.path()))
        .unwrap();
    holder.set_credential("refreshed");

    assert_eq!(active_credential(&holder), Some("refreshed".into()));
}

// ============================================================================
// Subscriptions
// ============================================================================

#[tokio::test]
async fn subscribers_see_replacement_after_login() {
    let holder = default_holder();
    let mut rx = holder.subscribe();

    holder.set_credential("abc");
    rx.changed().await.unwrap();

    let session = rx.borrow().clone();
    assert_eq!(
        session.client().credential().map(Credential::expose),
        Some("abc")
    );
}

#[tokio::test]
async fn subscribers_see_logout() {
    let holder = default_holder();
    holder.set_credential("abc");

    let mut rx = holder.subscribe();
    holder.clear_credential();
    rx.changed().await.unwrap();

    assert!(!rx.borrow().is_authenticated());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn holder_from_config_file_with_bootstrap() {
    let mut token_file = NamedTempFile::new().unwrap();
    token_file.write_all(b"configured-token").unwrap();

    let json = format!(
        r#"{{
            "api": {{ "host": "api.example.com" }},
            "bootstrap": {{ "credential_file": {:?} }}
        }}"#,
        token_file.path()
    );
    let mut config_file = NamedTempFile::new().unwrap();
    config_file.write_all(json.as_bytes()).unwrap();

    let config = Config::from_file(config_file.path()).unwrap();
    let holder = SessionHolder::with_config(ApiClientFactory, &config);

    let source = config.credential_source().unwrap();
    assert!(holder.bootstrap(source.as_ref()).unwrap());

    let session = holder.session();
    assert_eq!(session.client().host(), "api.example.com");
    assert_eq!(
        session.client().credential().map(Credential::expose),
        Some("configured-token")
    );
}
