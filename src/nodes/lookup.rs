//! Repository descriptors for node types
//!
//! No external lookup happens here: descriptors for non-builtin nodes are
//! derived from the node name alone.

use super::registry::{builtin_count, builtin_types, is_builtin};
use crate::error::{CopilotError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Repository details in single-node responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoInfo {
    pub git_repo: String,
    pub commit_hash: String,
    pub url: String,
}

/// Repository details in batch responses (camelCase keys)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoSummary {
    pub git_repo: String,
    pub commit_hash: String,
    pub url: String,
}

impl From<RepoInfo> for RepoSummary {
    fn from(info: RepoInfo) -> Self {
        Self {
            git_repo: info.git_repo,
            commit_hash: info.commit_hash,
            url: info.url,
        }
    }
}

/// Result of a single node lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitInfo {
    pub is_builtin: bool,
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_info: Option<RepoInfo>,
}

/// Snapshot of the builtin registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinTypes {
    pub node_types: Vec<String>,
    pub count: usize,
    /// Seconds since the Unix epoch
    pub timestamp: i64,
}

/// Derive repository details from a node name
///
/// The commit hash is `abc123` followed by the first four characters of the
/// name (fewer if the name is shorter).
///
/// # Examples
///
/// ```
/// use comfy_copilot::nodes::fabricate_repo_info;
///
/// let info = fabricate_repo_info("Foo");
/// assert_eq!(info.git_repo, "example/Foo");
/// assert_eq!(info.commit_hash, "abc123Foo");
/// assert_eq!(info.url, "https://github.com/example/Foo");
/// ```
pub fn fabricate_repo_info(node_type: &str) -> RepoInfo {
    let prefix: String = node_type.chars().take(4).collect();
    RepoInfo {
        git_repo: format!("example/{}", node_type),
        commit_hash: format!("abc123{}", prefix),
        url: format!("https://github.com/example/{}", node_type),
    }
}

/// Describe a single node type
///
/// # Errors
///
/// Returns a validation error if `node_type` is empty
pub fn describe(node_type: &str) -> Result<GitInfo> {
    if node_type.is_empty() {
        return Err(CopilotError::Validation("Node type is required".to_string()).into());
    }

    if is_builtin(node_type) {
        return Ok(GitInfo {
            is_builtin: true,
            node_type: node_type.to_string(),
            repo_info: None,
        });
    }

    Ok(GitInfo {
        is_builtin: false,
        node_type: node_type.to_string(),
        repo_info: Some(fabricate_repo_info(node_type)),
    })
}

/// Describe many node types, omitting builtins
///
/// # Errors
///
/// Returns a validation error if `node_types` is empty
pub fn batch_describe<S: AsRef<str>>(node_types: &[S]) -> Result<BTreeMap<String, RepoSummary>> {
    if node_types.is_empty() {
        return Err(CopilotError::Validation(
            "NodeTypes parameter is required and should be a list of node types".to_string(),
        )
        .into());
    }

    Ok(node_types
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !is_builtin(name))
        .map(|name| (name.to_string(), fabricate_repo_info(name).into()))
        .collect())
}

/// Split a comma-separated list, trimming entries and dropping empty ones
pub fn parse_node_types(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Current builtin registry with a timestamp
pub fn builtin_snapshot() -> BuiltinTypes {
    BuiltinTypes {
        node_types: builtin_types().into_iter().map(str::to_string).collect(),
        count: builtin_count(),
        timestamp: chrono::Utc::now().timestamp(),
    }
}
