//! Node inspection commands
//!
//! Output is either a plain listing for a terminal or pretty-printed JSON
//! matching the HTTP response bodies.

use crate::error::{CopilotError, Result};
use crate::nodes::{builtin_snapshot, describe, GitInfo};
use serde::Serialize;

/// Print the builtin node registry
///
/// # Examples
///
/// ```no_run
/// use comfy_copilot::commands::nodes::list_builtin;
///
/// list_builtin(false).unwrap();
/// ```
pub fn list_builtin(json: bool) -> Result<()> {
    tracing::debug!("nodes::list_builtin json: {}", json);
    println!("{}", render_builtin(json)?);
    Ok(())
}

/// Print lookup details for one node type
///
/// # Errors
///
/// Returns a validation error if `node_type` is empty
pub fn show_node_info(node_type: &str, json: bool) -> Result<()> {
    tracing::debug!("nodes::show_node_info node_type: {}, json: {}", node_type, json);
    let info = describe(node_type)?;
    println!("{}", render_info(&info, json)?);
    Ok(())
}

fn serialize_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| CopilotError::Serialization(e).into())
}

fn render_builtin(json: bool) -> Result<String> {
    let snapshot = builtin_snapshot();
    if json {
        return serialize_pretty(&snapshot);
    }

    let mut out = format!("\nBuiltin node types ({}):\n\n", snapshot.count);
    for name in &snapshot.node_types {
        out.push_str("  ");
        out.push_str(name);
        out.push('\n');
    }
    Ok(out)
}

fn render_info(info: &GitInfo, json: bool) -> Result<String> {
    if json {
        return serialize_pretty(info);
    }

    let mut out = format!("Node type:   {}\n", info.node_type);
    match &info.repo_info {
        None => out.push_str("Builtin:     yes\n"),
        Some(repo) => {
            out.push_str("Builtin:     no\n");
            out.push_str(&format!("Repository:  {}\n", repo.git_repo));
            out.push_str(&format!("Commit:      {}\n", repo.commit_hash));
            out.push_str(&format!("URL:         {}\n", repo.url));
        }
    }
    Ok(out)
}
