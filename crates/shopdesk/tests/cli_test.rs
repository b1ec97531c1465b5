//! Integration tests for the `shopdesk` CLI binary.
//!
//! Argument parsing, help output, and completions run without a backend;
//! the end-to-end cases point the binary at a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `shopdesk` binary with env isolation.
///
/// Clears all `SHOPDESK_*` env vars and points config and data
/// directories at `home` so tests never touch the user's real files.
fn shopdesk_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("shopdesk");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("SHOPDESK_PROFILE")
        .env_remove("SHOPDESK_API_URL")
        .env_remove("SHOPDESK_DOMAIN_URL")
        .env_remove("SHOPDESK_OUTPUT")
        .env_remove("SHOPDESK_INSECURE")
        .env_remove("SHOPDESK_TIMEOUT")
        .env_remove("SHOPDESK_USERNAME")
        .env_remove("SHOPDESK_PASSWORD");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "code": 1000,
        "message": "OK",
        "data": data
    }))
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run(cmd: assert_cmd::Command) -> std::process::Output {
    let mut cmd = cmd;
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = shopdesk_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let home = tempfile::tempdir().unwrap();
    shopdesk_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("shops")
                .and(predicate::str::contains("employees"))
                .and(predicate::str::contains("customers"))
                .and(predicate::str::contains("login")),
        );
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();
    shopdesk_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("shopdesk"));
}

#[test]
fn test_completions_zsh() {
    let home = tempfile::tempdir().unwrap();
    shopdesk_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_shops_subcommands_exist() {
    let home = tempfile::tempdir().unwrap();
    shopdesk_cmd(home.path())
        .args(["shops", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("set-config")
                .and(predicate::str::contains("upload-avatar"))
                .and(predicate::str::contains("join-link")),
        );
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let home = tempfile::tempdir().unwrap();
    let output = shopdesk_cmd(home.path()).arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_shops_list_without_config_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    let output = shopdesk_cmd(home.path())
        .args(["shops", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("config"));
}

#[test]
fn test_employees_list_requires_shop() {
    let home = tempfile::tempdir().unwrap();
    shopdesk_cmd(home.path())
        .args(["employees", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--shop"));
}

#[test]
fn test_config_show_no_config() {
    let home = tempfile::tempdir().unwrap();
    shopdesk_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn test_config_set_then_profiles() {
    let home = tempfile::tempdir().unwrap();
    shopdesk_cmd(home.path())
        .args(["--profile", "staging", "config", "set", "api_url", "https://pos.example.com/api"])
        .assert()
        .success();
    shopdesk_cmd(home.path())
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("staging"));
}

#[test]
fn test_oversized_upload_rejected_before_request() {
    let home = tempfile::tempdir().unwrap();
    let image = home.path().join("huge.png");
    std::fs::write(&image, vec![0u8; 5 * 1024 * 1024 + 1]).unwrap();
    // Port 9 is never contacted: validation fails first.
    let output = shopdesk_cmd(home.path())
        .args(["--api-url", "http://127.0.0.1:9/api", "shops", "upload-avatar", "7"])
        .arg(&image)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("limit"));
}

// ── Against a mock backend ──────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_categories_list_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/category"))
        .respond_with(ok(json!({
            "data": [{"id": 1, "name": "Beverages"}, {"id": 2, "name": "Pastry"}],
            "total": 2
        })))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let mut cmd = shopdesk_cmd(home.path());
    cmd.args(["--api-url", &format!("{}/api", server.uri())])
        .args(["-o", "json-compact", "categories", "list"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(parsed[1]["name"], "Pastry");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_application_error_message_is_shown_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/shop/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 2004,
            "message": "Cửa hàng đã bị khóa"
        })))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let mut cmd = shopdesk_cmd(home.path());
    cmd.args(["--api-url", &format!("{}/api", server.uri()), "shops", "get", "3"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("Cửa hàng đã bị khóa"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_persists_session_and_401_clears_it() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"username": "mira", "password": "s3cret"})))
        .respond_with(ok(json!({
            "token": "tok-1",
            "role": "SHOP_OWNER",
            "username": "mira",
            "userId": 12
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/shop/owner/12"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let api_url = format!("{}/api", server.uri());

    let mut login = shopdesk_cmd(home.path());
    login
        .env("SHOPDESK_USERNAME", "mira")
        .env("SHOPDESK_PASSWORD", "s3cret")
        .args(["--api-url", &api_url, "login"]);
    let output = run(login).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let mut whoami = shopdesk_cmd(home.path());
    whoami.args(["--api-url", &api_url, "-o", "plain", "whoami"]);
    let output = run(whoami).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "mira");

    let mut mine = shopdesk_cmd(home.path());
    mine.args(["--api-url", &api_url, "shops", "mine"]);
    let output = run(mine).await;
    assert_eq!(output.status.code(), Some(3), "{}", combined_output(&output));

    let mut whoami = shopdesk_cmd(home.path());
    whoami.args(["--api-url", &api_url, "whoami"]);
    let output = run(whoami).await;
    assert_eq!(output.status.code(), Some(3));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_products_list_all_for_shop() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/product"))
        .and(query_param("shopId", "7"))
        .and(query_param("page", "1"))
        .respond_with(ok(json!({
            "data": [
                {"id": 1, "name": "Iced Latte", "price": 29000},
                {"id": 2, "name": "Banh Mi", "price": "25000.50"}
            ],
            "total": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let mut cmd = shopdesk_cmd(home.path());
    cmd.args(["--api-url", &format!("{}/api", server.uri())])
        .args(["-o", "json-compact", "products", "list", "--shop", "7", "--all"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
    assert_eq!(parsed[0]["name"], "Iced Latte");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_products_create_sends_flags_as_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/product"))
        .and(body_json(json!({"name": "Iced Latte", "stock": 12})))
        .respond_with(ok(json!({"id": 3, "name": "Iced Latte", "stock": 12})))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let mut cmd = shopdesk_cmd(home.path());
    cmd.args(["--api-url", &format!("{}/api", server.uri())])
        .args(["-o", "plain", "products", "create", "--name", "Iced Latte"])
        .args(["--set", "stock=12"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "3");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_product_masters_delete_with_yes() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/product-master/8"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let mut cmd = shopdesk_cmd(home.path());
    cmd.args(["--api-url", &format!("{}/api", server.uri())])
        .args(["--yes", "product-masters", "delete", "8"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
}

#[test]
fn test_profile_name_with_separator_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    let output = shopdesk_cmd(home.path())
        .args(["--profile", "../escape", "--api-url", "http://127.0.0.1:9/api", "whoami"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("profile"));
    assert!(!home.path().join("data").join("escape.toml").exists());
}
