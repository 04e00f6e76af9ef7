use super::*;

fn store(dir: &tempfile::TempDir) -> SessionStore {
    SessionStore::new(dir.path().join("session.json"))
}

#[test]
fn login_persists_trimmed_credential() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(&dir);

    let fp = login(&store, Some("  eyJhbGciOi.payload.sig\n")).unwrap();

    assert_eq!(store.token().unwrap().as_deref(), Some("eyJhbGciOi.payload.sig"));
    assert_eq!(fp, fingerprint("eyJhbGciOi.payload.sig"));
}

#[test]
fn login_without_credential_fails_and_keeps_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(&dir);

    assert!(matches!(login(&store, None), Err(ClientError::MissingCredential)));
    assert!(matches!(login(&store, Some("   ")), Err(ClientError::MissingCredential)));
    assert!(!store.path().exists());
}

#[test]
fn logout_removes_token_after_login() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(&dir);
    login(&store, Some("tok")).unwrap();

    assert!(logout(&store).unwrap());
    assert_eq!(store.token().unwrap(), None);
}

#[test]
fn logout_without_session_still_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(&dir);

    assert!(!logout(&store).unwrap());
    assert!(!logout(&store).unwrap());
    assert_eq!(store.token().unwrap(), None);
}

#[test]
fn fingerprint_is_short_stable_hex() {
    // sha256("abc") = ba7816bf8f01cfea...
    assert_eq!(fingerprint("abc"), "ba7816bf8f01");
    assert_eq!(fingerprint("abc").len(), FINGERPRINT_HEX_LEN);
    assert_ne!(fingerprint("abc"), fingerprint("abd"));
}
