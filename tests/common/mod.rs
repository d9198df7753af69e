use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use comfy_copilot::{router, AppState, ChatResponseFrame, Config};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tower::ServiceExt;

#[allow(dead_code)]
pub const MULTIPART_BOUNDARY: &str = "copilot-test-boundary";

/// Router over a fresh state whose templates and uploads live in a tempdir
#[allow(dead_code)]
pub fn test_app() -> (Router, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let config = test_config(&tmp);
    (router(AppState::from_config(&config)), tmp)
}

#[allow(dead_code)]
pub fn test_config(tmp: &TempDir) -> Config {
    let mut config = Config::default();
    config.stream.char_delay_ms = 0;
    config.templates.dir = tmp.path().join("workflows");
    config.upload.dir = tmp.path().join("uploads");
    config.upload.public_base_url = "http://files.test/uploads".to_string();
    config
}

#[allow(dead_code)]
pub fn write_template(tmp: &TempDir, name: &str, contents: &str) -> PathBuf {
    let dir = tmp.path().join("workflows");
    fs::create_dir_all(&dir).expect("failed to create template dir");
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write template");
    path
}

#[allow(dead_code)]
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("request failed")
}

#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    send(app, request).await
}

#[allow(dead_code)]
pub async fn post_json(app: &Router, uri: &str, body: &Value) -> Response<Body> {
    post_raw(app, uri, serde_json::to_vec(body).expect("serialize body")).await
}

#[allow(dead_code)]
pub async fn post_raw(app: &Router, uri: &str, body: Vec<u8>) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .expect("build request");
    send(app, request).await
}

#[allow(dead_code)]
pub fn multipart_body(field: &str, filename: &str, data: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
        b = MULTIPART_BOUNDARY
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
    body
}

#[allow(dead_code)]
pub async fn post_multipart(app: &Router, uri: &str, body: Vec<u8>) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
        )
        .body(Body::from(body))
        .expect("build request");
    send(app, request).await
}

#[allow(dead_code)]
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body")
        .to_vec()
}

#[allow(dead_code)]
pub async fn json_body(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("parse response")
}

/// Parse an NDJSON reply stream into frames
#[allow(dead_code)]
pub async fn frames(response: Response<Body>) -> Vec<ChatResponseFrame> {
    let bytes = body_bytes(response).await;
    let text = String::from_utf8(bytes).expect("utf-8 body");
    assert!(text.ends_with('\n'), "stream must end with a newline");
    text.lines()
        .map(|line| serde_json::from_str(line).expect("parse frame"))
        .collect()
}

#[allow(dead_code)]
pub fn assert_status(response: &Response<Body>, status: StatusCode) {
    assert_eq!(response.status(), status, "unexpected status");
}
