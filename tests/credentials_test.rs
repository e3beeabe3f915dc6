use std::path::PathBuf;

use spotufy::{
    error::Error,
    management::CredentialStore,
    types::{Credential, Scope},
    utils::generate_state,
};

fn temp_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("spotufy-test-{}", generate_state()))
        .join("credential.json")
}

#[tokio::test]
async fn test_persist_and_load() {
    let path = temp_path();
    let store = CredentialStore::at(&path);
    let credential = Credential::new("token", [Scope::UserTopRead].into_iter().collect(), 3600);

    store.persist(&credential).await.unwrap();
    let loaded = store.load().await.unwrap();

    assert_eq!(loaded.access_token, "token");
    assert!(loaded.has_scope(Scope::UserTopRead));
    assert_eq!(loaded.expiry, credential.expiry);

    store.clear().await.unwrap();
    assert!(!path.exists());
}

#[tokio::test]
async fn test_load_without_credential() {
    let store = CredentialStore::at(temp_path());

    let err = store.load().await.unwrap_err();

    assert!(matches!(err, Error::Unauthorized(_)));
}

#[tokio::test]
async fn test_expired_credential_is_removed() {
    let path = temp_path();
    let store = CredentialStore::at(&path);
    let stale = Credential::new("token", Default::default(), -60);

    store.persist(&stale).await.unwrap();
    let err = store.load().await.unwrap_err();

    assert!(matches!(err, Error::Unauthorized(_)));
    assert!(!path.exists());
}

#[tokio::test]
async fn test_clear_twice() {
    let store = CredentialStore::at(temp_path());

    store.clear().await.unwrap();
    store.clear().await.unwrap();
}
