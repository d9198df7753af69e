//! End-to-end tests for the node metadata routes

mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_repos_skips_builtins() {
    let (app, _tmp) = test_app();
    let response = get(&app, "/api/nodes/repos?node_types=KSampler,%20Foo%20,,Bar").await;
    assert_status(&response, StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(
        body,
        json!({
            "Bar": {
                "gitRepo": "example/Bar",
                "commitHash": "abc123Bar",
                "url": "https://github.com/example/Bar"
            },
            "Foo": {
                "gitRepo": "example/Foo",
                "commitHash": "abc123Foo",
                "url": "https://github.com/example/Foo"
            }
        })
    );
}

#[tokio::test]
async fn test_repos_all_builtin_is_empty_object() {
    let (app, _tmp) = test_app();
    let body = json_body(get(&app, "/api/nodes/repos?node_types=VAEDecode,SaveImage").await).await;
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_repos_without_names_is_bad_request() {
    let (app, _tmp) = test_app();

    for uri in ["/api/nodes/repos", "/api/nodes/repos?node_types=", "/nodes/fetch_repos"] {
        let response = get(&app, uri).await;
        assert_status(&response, StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(
            body["error"],
            "NodeTypes parameter is required and should be a list of node types"
        );
        assert_eq!(body["code"], "BAD_REQUEST");
    }
}

#[tokio::test]
async fn test_git_info_builtin_and_custom() {
    let (app, _tmp) = test_app();

    let body = json_body(get(&app, "/api/nodes/git-info/KSampler").await).await;
    assert_eq!(body, json!({ "is_builtin": true, "node_type": "KSampler" }));

    let body = json_body(get(&app, "/nodes/git-info/MyCustomNode").await).await;
    assert_eq!(body["is_builtin"], false);
    assert_eq!(body["repo_info"]["git_repo"], "example/MyCustomNode");
    assert_eq!(body["repo_info"]["commit_hash"], "abc123MyCu");
}

#[tokio::test]
async fn test_builtin_types_sorted_with_count() {
    let (app, _tmp) = test_app();
    let body = json_body(get(&app, "/api/nodes/builtin-types").await).await;

    let names: Vec<&str> = body["node_types"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(names, sorted);
    assert_eq!(body["count"], names.len());
    assert!(names.contains(&"KSampler"));
    assert!(body["timestamp"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_plugin_builtin_types_alias() {
    let (app, _tmp) = test_app();
    let api = json_body(get(&app, "/api/nodes/builtin-types").await).await;
    let plugin = json_body(get(&app, "/nodes/builtin-types").await).await;
    assert_eq!(api["node_types"], plugin["node_types"]);
}
