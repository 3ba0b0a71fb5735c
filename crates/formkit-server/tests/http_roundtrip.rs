//! End-to-end: a real listener on a free port, driven with reqwest.

use std::path::Path;
use std::sync::Arc;

use formkit_core::{FormDefinition, ListEncoding};
use formkit_server::{DocumentStore, FormApp, FormServer};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

struct Running {
    base: String,
    handle: formkit_server::ShutdownHandle,
    thread: tokio::task::JoinHandle<()>,
}

impl Running {
    async fn stop(self) {
        self.handle.shutdown();
        self.thread.await.expect("server thread joins");
    }
}

fn start(output: &Path, encoding: ListEncoding) -> Running {
    let form = FormDefinition::from_json_str(
        r#"{"user": {"name": "Ann", "age": 30, "tags": ["a", "b"]}, "active": true}"#,
        r#"{"user": {"name": "str", "age": "int", "tags": "list[str]"}, "active": "bool"}"#,
    )
    .expect("form");
    let app = FormApp::new(
        Arc::new(form),
        encoding,
        "Profile",
        DocumentStore::new(output),
    );
    let server = FormServer::bind("127.0.0.1:0", app).expect("binds");
    let addr = server.local_addr().expect("ip listener");
    let handle = server.shutdown_handle();
    let thread = tokio::task::spawn_blocking(move || server.run(2));
    Running {
        base: format!("http://{addr}"),
        handle,
        thread,
    }
}

#[tokio::test]
async fn get_serves_rendered_form() {
    let dir = tempfile::tempdir().expect("tempdir");
    let running = start(&dir.path().join("out.json"), ListEncoding::Rows);

    let response = reqwest::get(format!("{}/", running.base))
        .await
        .expect("request");
    assert_eq!(response.status().as_u16(), 200);
    assert!(response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("text/html")));
    let body = response.text().await.expect("body");
    assert!(body.contains(r#"name="user.tags.2" value="""#));
    assert!(body.contains(r#"type="number" name="user.age" value="30""#));

    running.stop().await;
}

#[tokio::test]
async fn post_persists_validated_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("submitted_form.json");
    let running = start(&output, ListEncoding::Rows);

    let response = reqwest::Client::new()
        .post(format!("{}/submit", running.base))
        .form(&[
            ("user.name", "Ann Lee"),
            ("user.age", "31"),
            ("user.tags.1", "y"),
            ("user.tags.0", "x"),
            ("user.tags.2", "z"),
            ("user.tags.3", ""),
            ("active", "FALSE"),
        ])
        .send()
        .await
        .expect("request");
    assert_eq!(response.status().as_u16(), 200);
    assert!(response.text().await.expect("body").contains(r#"href="/""#));

    let text = std::fs::read_to_string(&output).expect("file written");
    assert!(text.starts_with("{\n    \"user\": {"));
    let saved: Value = serde_json::from_str(&text).expect("json");
    assert_eq!(
        saved,
        json!({"user": {"name": "Ann Lee", "age": 31, "tags": ["x", "y", "z"]}, "active": false})
    );

    running.stop().await;
}

#[tokio::test]
async fn comma_encoding_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("submitted_form.json");
    let running = start(&output, ListEncoding::Comma);

    let body = reqwest::get(format!("{}/", running.base))
        .await
        .expect("request")
        .text()
        .await
        .expect("body");
    assert!(body.contains(r#"name="user.tags" value="a, b""#));

    let response = reqwest::Client::new()
        .post(format!("{}/submit", running.base))
        .form(&[("user.tags", "p, q,, r"), ("user.age", "old")])
        .send()
        .await
        .expect("request");
    assert_eq!(response.status().as_u16(), 200);

    let saved: Value =
        serde_json::from_str(&std::fs::read_to_string(&output).expect("file")).expect("json");
    assert_eq!(saved, json!({"user": {"tags": ["p", "q", "r"], "age": "old"}}));

    running.stop().await;
}

#[tokio::test]
async fn unknown_path_is_404() {
    let dir = tempfile::tempdir().expect("tempdir");
    let running = start(&dir.path().join("out.json"), ListEncoding::Rows);

    let response = reqwest::get(format!("{}/nope", running.base))
        .await
        .expect("request");
    assert_eq!(response.status().as_u16(), 404);

    running.stop().await;
}

#[tokio::test]
async fn head_root_answers_like_get() {
    let dir = tempfile::tempdir().expect("tempdir");
    let running = start(&dir.path().join("out.json"), ListEncoding::Rows);

    let response = reqwest::Client::new()
        .head(format!("{}/", running.base))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status().as_u16(), 200);
    assert!(response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("text/html")));
    assert!(!dir.path().join("out.json").exists());

    running.stop().await;
}
