//! Tests for the keychain façade

use super::*;
use crate::codec::SecretEncoding;
use crate::error::ErrorCode;
use crate::native::{Located, MockNativeStore, NativeStatus};

const UNICODE_PW: &str = "∆˚ˆ©ƒ®∂çµ˚¬˙ƒ®†¥";

fn untouched_mock() -> MockNativeStore {
    let mut mock = MockNativeStore::new();
    mock.expect_open_default_store().never();
    mock.expect_find_entry().never();
    mock.expect_add_entry().never();
    mock.expect_delete_entry().never();
    mock
}

#[tokio::test]
async fn test_unsupported_platform_checked_first() {
    let keychain = Keychain::<MockNativeStore>::from_native(None);
    assert!(!keychain.is_supported());
    assert!(keychain.native().is_none());

    // Even an empty request reports the platform before missing fields
    let empty = CredentialRequest::new();
    for err in [
        keychain.get_password(&empty).await.unwrap_err(),
        keychain.set_password(&empty).await.unwrap_err(),
        keychain.delete_password(&empty).await.unwrap_err(),
    ] {
        assert_eq!(err.code(), ErrorCode::UnsupportedPlatform);
    }
}

#[tokio::test]
async fn test_set_validation_order() {
    let keychain = Keychain::new(untouched_mock());

    let err = keychain
        .set_password(&CredentialRequest::new().service("svc").password("baz"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NoAccountProvided);

    let err = keychain
        .set_password(&CredentialRequest::new().account("foo").password("baz"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NoServiceProvided);

    let err = keychain
        .set_password(&CredentialRequest::new().account("foo").service("svc"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NoPasswordProvided);
}

#[tokio::test]
async fn test_get_and_delete_validation() {
    let keychain = Keychain::new(untouched_mock());

    let no_account = CredentialRequest::new().service("svc").password("baz");
    let no_service = CredentialRequest::new().account("foo").password("baz");

    assert_eq!(
        keychain.get_password(&no_account).await.unwrap_err(),
        KeychainError::NoAccountProvided
    );
    assert_eq!(
        keychain.get_password(&no_service).await.unwrap_err(),
        KeychainError::NoServiceProvided
    );
    assert_eq!(
        keychain.delete_password(&no_account).await.unwrap_err(),
        KeychainError::NoAccountProvided
    );
    assert_eq!(
        keychain.delete_password(&no_service).await.unwrap_err(),
        KeychainError::NoServiceProvided
    );
}

#[tokio::test]
async fn test_values_cross_boundary_encoded() {
    let mut mock = MockNativeStore::new();
    mock.expect_open_default_store().returning(|| Ok(()));
    mock.expect_add_entry()
        .withf(|_, service, account, secret| {
            service == "c3Zj" && account == "YWNjdA==" && secret == b"YmF6"
        })
        .times(1)
        .returning(|_, _, _, _| Ok(()));

    Keychain::new(mock).set("svc", "acct", "baz").await.unwrap();
}

#[tokio::test]
async fn test_get_decodes_payload() {
    let mut mock = MockNativeStore::new();
    mock.expect_open_default_store().returning(|| Ok(()));
    mock.expect_find_entry()
        .returning(|_, _, _, _| Ok(Located::Payload(Zeroizing::new(b"YmF6".to_vec()))));

    let secret = Keychain::new(mock).get("svc", "acct").await.unwrap();
    assert_eq!(secret.expose(), "baz");
}

#[tokio::test]
async fn test_get_reports_undecodable_payload() {
    let mut mock = MockNativeStore::new();
    mock.expect_open_default_store().returning(|| Ok(()));
    mock.expect_find_entry()
        .returning(|_, _, _, _| Ok(Located::Payload(Zeroizing::new(b"plain text".to_vec()))));

    let err = Keychain::new(mock).get("svc", "acct").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidPayload);
}

#[tokio::test]
async fn test_native_errors_pass_through() {
    let mut mock = MockNativeStore::new();
    mock.expect_open_default_store()
        .returning(|| Err(NativeStatus::new(-25294)));

    let err = Keychain::new(mock).delete("svc", "acct").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::StoreUnavailable);
    assert_eq!(err.status(), Some(NativeStatus::new(-25294)));
}

#[tokio::test]
async fn test_unicode_round_trip_in_memory() {
    let keychain = Keychain::in_memory();

    keychain.set("svc", "unicodeAccount", UNICODE_PW).await.unwrap();
    keychain.set("svc", "mixedAccount", "∆elta").await.unwrap();

    assert_eq!(keychain.get("svc", "unicodeAccount").await.unwrap().expose(), UNICODE_PW);
    assert_eq!(keychain.get("svc", "mixedAccount").await.unwrap().expose(), "∆elta");
}

#[tokio::test]
async fn test_store_only_sees_ascii_tokens() {
    let keychain = Keychain::in_memory();
    keychain.set("sérvice", "äccount", UNICODE_PW).await.unwrap();

    let store = keychain.native().unwrap();
    let service = SecretEncoding::Base64.encode("sérvice");
    let account = SecretEncoding::Base64.encode("äccount");
    let raw = store.raw_entry(&service, &account).unwrap();
    assert!(raw.is_ascii());
    assert!(service.is_ascii() && account.is_ascii());
}

#[tokio::test]
async fn test_raw_encoding_stores_plain_text() {
    let config = KeychainConfig::default().with_encoding(SecretEncoding::Raw);
    let keychain = Keychain::in_memory().with_config(config);

    keychain.set("svc", "acct", UNICODE_PW).await.unwrap();
    let raw = keychain.native().unwrap().raw_entry("svc", "acct").unwrap();
    assert_eq!(raw, UNICODE_PW.as_bytes());
    assert_eq!(keychain.get("svc", "acct").await.unwrap().expose(), UNICODE_PW);
}

#[tokio::test]
async fn test_service_prefix_applied() {
    let config = KeychainConfig::default()
        .with_encoding(SecretEncoding::Raw)
        .with_prefix("myapp");
    let keychain = Keychain::in_memory().with_config(config);

    keychain.set("openai", "key", "secret").await.unwrap();
    let store = keychain.native().unwrap();
    assert!(store.raw_entry("myapp-openai", "key").is_some());
    assert!(store.raw_entry("openai", "key").is_none());
}

#[tokio::test]
async fn test_clones_share_store() {
    let keychain = Keychain::in_memory();
    let clone = keychain.clone();

    keychain.set("svc", "acct", "shared").await.unwrap();
    assert_eq!(clone.get("svc", "acct").await.unwrap().expose(), "shared");
    assert!(format!("{:?}", clone).contains("supported: true"));
}
