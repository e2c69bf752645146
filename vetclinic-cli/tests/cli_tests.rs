//! Integration tests for the vetclinic binary.

use std::{fs, path::Path, time::Duration};

use assert_cmd::cargo::cargo_bin_cmd;
use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use predicates::prelude::PredicateBooleanExt;
use serde_json::json;
use tempfile::TempDir;

/// Command with an isolated session file and no inherited backend settings.
fn vetclinic(session_dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("vetclinic");
    cmd.env("VETCLINIC_STORAGE_PATH", session_dir.path().join("session.json"))
        .env_remove("VETCLINIC_API_BASE_URL")
        .env_remove("VETCLINIC_PASSWORD")
        .env_remove("RUST_LOG")
        .timeout(Duration::from_secs(10));
    cmd
}

fn write_session(dir: &Path) {
    let session = json!({
        "authToken": "abc123",
        "currentUser": r#"{"username":"ana","firstName":"Ana","lastName":"Lee","role":"vet"}"#
    });
    fs::write(dir.join("session.json"), session.to_string()).unwrap();
}

async fn start_backend() -> String {
    let app = Router::new()
        .route(
            "/api/owners",
            get(|| async {
                Json(json!([
                    {"id": 1, "name": "Marko Petrovic", "email": "marko@example.com", "phone": "0611234567"}
                ]))
            }),
        )
        .route(
            "/api/auth/login",
            post(|Json(body): Json<serde_json::Value>| async move {
                if body["password"] == "secret" {
                    (
                        StatusCode::OK,
                        Json(json!({
                            "message": "Login successful",
                            "token": "t-42",
                            "user": {"id": 4, "username": "ana", "firstName": "Ana", "lastName": "Lee", "role": "vet"}
                        })),
                    )
                } else {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({"error": "Invalid credentials"})),
                    )
                }
            }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    vetclinic(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("login"))
        .stdout(predicates::str::contains("owners"))
        .stdout(predicates::str::contains("appointments"))
        .stdout(predicates::str::contains("--base-url"));
}

#[test]
fn test_routes_lists_navigation_table() {
    let dir = TempDir::new().unwrap();
    vetclinic(&dir)
        .arg("routes")
        .assert()
        .success()
        .stdout(predicates::str::contains("redirect to /login"))
        .stdout(predicates::str::contains("/treatments"))
        .stdout(predicates::str::is_match(r"/pets\s+pets\s+Pets view").unwrap())
        .stdout(predicates::str::is_match(r"(?m)^/\s+-\s+redirect to /login").unwrap());
}

#[test]
fn test_open_root_shows_login_view() {
    let dir = TempDir::new().unwrap();
    let root = vetclinic(&dir).args(["open", "/"]).output().unwrap();
    let login = vetclinic(&dir).args(["open", "/login"]).output().unwrap();

    assert!(root.status.success());
    assert_eq!(root.stdout, login.stdout);
    assert!(String::from_utf8_lossy(&root.stdout).contains("== Login =="));
}

#[test]
fn test_open_unknown_path_fails() {
    let dir = TempDir::new().unwrap();
    vetclinic(&dir)
        .args(["open", "/billing"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("no view is mapped to `/billing`"));
}

#[test]
fn test_config_writes_requested_format() {
    let dir = TempDir::new().unwrap();
    vetclinic(&dir)
        .current_dir(dir.path())
        .args(["config", "--format", "toml"])
        .assert()
        .success()
        .stdout(predicates::str::contains("vetclinic.toml"));

    let written = fs::read_to_string(dir.path().join("vetclinic.toml")).unwrap();
    assert!(written.contains("http://localhost:8081/api"));
}

#[test]
fn test_config_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    vetclinic(&dir)
        .current_dir(dir.path())
        .args(["config", "--format", "ini"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("unsupported configuration format"));
}

#[test]
fn test_whoami_reads_persisted_session() {
    let dir = TempDir::new().unwrap();
    write_session(dir.path());

    vetclinic(&dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicates::str::contains("Ana Lee"))
        .stdout(predicates::str::contains("role:     vet"));
}

#[test]
fn test_half_written_session_is_discarded() {
    let dir = TempDir::new().unwrap();
    let session_file = dir.path().join("session.json");
    fs::write(&session_file, r#"{"authToken":"abc123"}"#).unwrap();

    vetclinic(&dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicates::str::contains("Not signed in."))
        .stderr(predicates::str::contains("warning: stored session was corrupt"));
    assert!(!session_file.exists());
}

#[test]
fn test_logout_removes_session_file() {
    let dir = TempDir::new().unwrap();
    write_session(dir.path());

    vetclinic(&dir)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicates::str::contains("Signed out."));
    assert!(!dir.path().join("session.json").exists());
}

#[test]
fn test_connection_failure_is_reported() {
    let dir = TempDir::new().unwrap();
    vetclinic(&dir)
        .args(["owners", "list", "--base-url", "http://127.0.0.1:9/api"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("failed to fetch owners"));
}

#[test]
fn test_invalid_base_url_is_rejected() {
    let dir = TempDir::new().unwrap();
    vetclinic(&dir)
        .args(["owners", "list", "--base-url", "ftp://clinic.test/api"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("failed to load configuration"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_owners_list_against_backend() {
    let base_url = start_backend().await;
    let dir = TempDir::new().unwrap();

    vetclinic(&dir)
        .args(["owners", "list", "--base-url", &base_url])
        .assert()
        .success()
        .stdout(predicates::str::contains("Marko Petrovic"))
        .stdout(predicates::str::contains("marko@example.com"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_then_whoami() {
    let base_url = start_backend().await;
    let dir = TempDir::new().unwrap();

    vetclinic(&dir)
        .args(["login", "--username", "ana", "--base-url", &base_url])
        .env("VETCLINIC_PASSWORD", "wrong")
        .assert()
        .failure()
        .stderr(predicates::str::contains("Invalid credentials"));
    assert!(!dir.path().join("session.json").exists());

    vetclinic(&dir)
        .args(["login", "--username", "ana", "--base-url", &base_url])
        .env("VETCLINIC_PASSWORD", "secret")
        .assert()
        .success()
        .stdout(predicates::str::contains("Signed in as Ana Lee (vet)."));

    vetclinic(&dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicates::str::contains("Ana Lee").and(predicates::str::contains("username: ana")));
}
