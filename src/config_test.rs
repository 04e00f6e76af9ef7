use super::*;

fn config(base_url: &str, root: Option<&str>) -> Result<ClientConfig, ClientError> {
    ClientConfig::new(base_url, root, PathBuf::from(DEFAULT_SESSION_FILE), HttpTimeouts::default())
}

#[test]
fn new_trims_trailing_slashes() {
    let cfg = config("http://127.0.0.1:8000/", Some("/srv/projects/")).unwrap();
    assert_eq!(cfg.api_base_url, "http://127.0.0.1:8000");
    assert_eq!(cfg.project_root.as_deref(), Some("/srv/projects"));
    assert_eq!(cfg.timeouts, HttpTimeouts::default());
}

#[test]
fn new_accepts_https_with_path_prefix() {
    let cfg = config("https://files.example.test/backend", None).unwrap();
    assert_eq!(cfg.api_base_url, "https://files.example.test/backend");
    assert!(cfg.project_root.is_none());
}

#[test]
fn new_keeps_windows_style_root() {
    let cfg = config(DEFAULT_API_BASE_URL, Some(r"C:\Users\dev\Projects\")).unwrap();
    assert_eq!(cfg.project_root.as_deref(), Some(r"C:\Users\dev\Projects"));
}

#[test]
fn new_keeps_filesystem_root() {
    let cfg = config(DEFAULT_API_BASE_URL, Some("/")).unwrap();
    assert_eq!(cfg.project_root.as_deref(), Some("/"));
}

#[test]
fn new_rejects_non_http_scheme() {
    let err = config("ftp://127.0.0.1", None).unwrap_err().to_string();
    assert!(err.contains("http:// or https://"));
}

#[test]
fn new_rejects_missing_host() {
    let err = config("http:///api", None).unwrap_err().to_string();
    assert!(err.contains("no host"));
}

#[test]
fn new_rejects_query_in_base_url() {
    assert!(config("http://127.0.0.1:8000/?x=1", None).is_err());
}

#[test]
fn new_rejects_blank_project_root() {
    let err = config(DEFAULT_API_BASE_URL, Some("   ")).unwrap_err().to_string();
    assert!(err.contains("project root is empty"));
}

#[test]
fn new_rejects_zero_timeouts() {
    let result = ClientConfig::new(
        DEFAULT_API_BASE_URL,
        None,
        PathBuf::from(DEFAULT_SESSION_FILE),
        HttpTimeouts { request_secs: 0, connect_secs: 5 },
    );
    assert!(matches!(result, Err(ClientError::InvalidConfig(_))));
}

#[test]
fn new_rejects_empty_session_file() {
    let result = ClientConfig::new(DEFAULT_API_BASE_URL, None, PathBuf::new(), HttpTimeouts::default());
    assert!(matches!(result, Err(ClientError::InvalidConfig(_))));
}

#[test]
fn require_project_root_errors_when_unset() {
    let cfg = config(DEFAULT_API_BASE_URL, None).unwrap();
    let err = cfg.require_project_root().unwrap_err().to_string();
    assert!(err.contains("PROJFILES_PROJECT_ROOT"));
}
