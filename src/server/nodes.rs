//! Node metadata handlers

use super::{ApiError, AppState};
use crate::nodes::{batch_describe, builtin_snapshot, describe, parse_node_types};
use crate::nodes::{BuiltinTypes, GitInfo, RepoSummary};
use axum::{
    extract::{Path, Query},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Query accepted by the batch lookup
#[derive(Debug, Deserialize)]
pub struct RepoQuery {
    /// Comma-separated node type names
    pub node_types: Option<String>,
}

/// Node routes mounted under `/api/nodes`
pub fn node_routes() -> Router<AppState> {
    Router::new()
        .route("/repos", get(node_repos))
        .route("/git-info/:node_type", get(git_info))
        .route("/builtin-types", get(builtin_types))
}

/// `GET /nodes/repos?node_types=a,b`
pub async fn node_repos(
    Query(query): Query<RepoQuery>,
) -> Result<Json<BTreeMap<String, RepoSummary>>, ApiError> {
    let names = query
        .node_types
        .as_deref()
        .map(parse_node_types)
        .unwrap_or_default();
    Ok(Json(batch_describe(&names)?))
}

/// `GET /nodes/git-info/:node_type`
pub async fn git_info(Path(node_type): Path<String>) -> Result<Json<GitInfo>, ApiError> {
    Ok(Json(describe(&node_type)?))
}

/// `GET /nodes/builtin-types`
pub async fn builtin_types() -> Json<BuiltinTypes> {
    Json(builtin_snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_node_repos_missing_query_is_bad_request() {
        let result = node_repos(Query(RepoQuery { node_types: None })).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_node_repos_blank_entries_only_is_bad_request() {
        let query = RepoQuery {
            node_types: Some(" , ,".to_string()),
        };
        assert!(node_repos(Query(query)).await.is_err());
    }

    #[tokio::test]
    async fn test_node_repos_skips_builtins() {
        let query = RepoQuery {
            node_types: Some("KSampler, MyCustomNode".to_string()),
        };
        let Json(map) = node_repos(Query(query)).await.unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["MyCustomNode"].git_repo, "example/MyCustomNode");
    }

    #[tokio::test]
    async fn test_git_info_custom_node() {
        let Json(info) = git_info(Path("Foo".to_string())).await.unwrap();
        assert!(!info.is_builtin);
        assert_eq!(info.repo_info.unwrap().commit_hash, "abc123Foo");
    }
}
