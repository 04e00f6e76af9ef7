use super::*;

fn store_in(dir: &tempfile::TempDir) -> SessionStore {
    SessionStore::new(dir.path().join("state/session.json"))
}

#[test]
fn token_is_none_when_store_missing() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(store_in(&dir).token().unwrap(), None);
}

#[test]
fn set_token_creates_parent_and_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store.set_token("abc").unwrap();
    assert_eq!(store.token().unwrap().as_deref(), Some("abc"));

    store.set_token("def").unwrap();
    assert_eq!(store.token().unwrap().as_deref(), Some("def"));
}

#[test]
fn clear_token_removes_present_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.set_token("abc").unwrap();

    assert!(store.clear_token().unwrap());
    assert_eq!(store.token().unwrap(), None);
}

#[test]
fn clear_token_succeeds_when_key_absent() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    assert!(!store.clear_token().unwrap());
    assert!(!store.path().exists());
}

#[test]
fn clear_token_keeps_other_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), r#"{"google_token":"abc","theme":"dark"}"#).unwrap();

    assert!(store.clear_token().unwrap());

    let remaining: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(remaining, serde_json::json!({ "theme": "dark" }));
}

#[test]
fn empty_store_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), "").unwrap();

    assert_eq!(store.token().unwrap(), None);
}

#[test]
fn corrupt_store_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), "{not json").unwrap();

    assert!(matches!(store.token(), Err(ClientError::InvalidJson(_))));
}

fn write_store(store: &SessionStore, contents: &str) {
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), contents).unwrap();
}

fn read_store(store: &SessionStore) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap()
}

#[test]
fn clear_token_removes_null_token() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    write_store(&store, r#"{"google_token":null}"#);

    assert_eq!(store.token().unwrap(), None);
    assert!(store.clear_token().unwrap());
    assert_eq!(read_store(&store), serde_json::json!({}));
}

#[test]
fn clear_token_keeps_non_string_siblings() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    write_store(&store, r#"{"google_token":"abc","expires":1700000000,"flags":{"beta":true}}"#);

    assert!(store.clear_token().unwrap());
    assert_eq!(read_store(&store), serde_json::json!({ "expires": 1_700_000_000, "flags": { "beta": true } }));
}

#[test]
fn set_token_keeps_non_string_siblings() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    write_store(&store, r#"{"google_token":42,"expires":1700000000}"#);

    store.set_token("abc").unwrap();

    assert_eq!(read_store(&store), serde_json::json!({ "google_token": "abc", "expires": 1_700_000_000 }));
}

#[test]
fn clear_token_on_non_object_document_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    write_store(&store, "[1,2]");

    assert!(!store.clear_token().unwrap());
    assert_eq!(store.token().unwrap(), None);
    assert!(matches!(store.set_token("abc"), Err(ClientError::InvalidJson(_))));
}
