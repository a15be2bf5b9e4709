use crate::config::AppConfig;
use crate::db::{init_db, Database};
use crate::state::AppState;
use astra::{Body, Request, Response};
use std::io::Read;
use tempfile::TempDir;

pub const HEADER: &str = "city_name,state_code,country_code,lat,lon,country (2 letter)\n";

/// Fresh state backed by files in a temp dir. Keep the TempDir alive for the
/// length of the test.
pub fn test_state() -> (TempDir, AppState) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db = Database::new(dir.path().join("test.sqlite3").to_string_lossy().into_owned());

    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    let config = AppConfig {
        database_path: db.path().to_string(),
        audit_log_path: dir.path().join("logs").join("log.txt"),
        ..AppConfig::default()
    };

    (dir, AppState { db, config })
}

pub fn get(uri: &str) -> Request {
    http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn upload_request(file_name: &str, content: impl Into<Vec<u8>>) -> Request {
    http::Request::builder()
        .method("POST")
        .uri(format!("/fileupload?filename={file_name}"))
        .body(Body::from(content.into()))
        .unwrap()
}

pub fn body_string(resp: &mut Response) -> String {
    let mut bytes = Vec::new();
    resp.body_mut().reader().read_to_end(&mut bytes).unwrap();
    String::from_utf8(bytes).unwrap()
}

pub fn body_json(resp: &mut Response) -> serde_json::Value {
    serde_json::from_str(&body_string(resp)).unwrap()
}
