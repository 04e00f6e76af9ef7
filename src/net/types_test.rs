use super::*;

#[test]
fn file_entry_deserializes_listing_item() {
    let entries: Vec<FileEntry> =
        serde_json::from_str(r#"[{"name":"a.txt","is_directory":false},{"name":"sub","is_directory":true}]"#)
            .unwrap();
    assert_eq!(
        entries,
        vec![
            FileEntry { name: "a.txt".into(), is_directory: false },
            FileEntry { name: "sub".into(), is_directory: true },
        ]
    );
}

#[test]
fn file_entry_requires_is_directory() {
    assert!(serde_json::from_str::<FileEntry>(r#"{"name":"a.txt"}"#).is_err());
}

#[test]
fn error_body_prefers_message_over_error() {
    let body: ErrorBody =
        serde_json::from_str(r#"{"status":"error","message":"Directory does not exist","error":"x"}"#).unwrap();
    assert_eq!(body.into_message().as_deref(), Some("Directory does not exist"));
}

#[test]
fn error_body_falls_back_to_error_field() {
    let body: ErrorBody = serde_json::from_str(r#"{"error":"Invalid request method"}"#).unwrap();
    assert_eq!(body.into_message().as_deref(), Some("Invalid request method"));
}

#[test]
fn error_body_without_message_fields_has_no_message() {
    let body: ErrorBody = serde_json::from_str(r#"{"status":"error"}"#).unwrap();
    assert_eq!(body.into_message(), None);
}
