//! Typed side-payloads carried by reply frames

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A workflow suggestion or catalog template
///
/// Every field is optional. Keys this struct does not know about are kept in
/// `extra` so catalog files round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Workflow {
    /// Numeric template id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Short machine-friendly name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Human readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Preview image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Serialized workflow graph
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow: Option<String>,
    /// Any additional keys from the source document
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A node shown in a recommendation card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub name: String,
    pub description: String,
    /// Image URL, empty when the node has none
    #[serde(default)]
    pub image: String,
    pub github_url: String,
    pub from_index: i64,
    pub to_index: i64,
}

impl NodeDescriptor {
    /// Descriptor with no image and zero position markers
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        github_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            image: String::new(),
            github_url: github_url.into(),
            from_index: 0,
            to_index: 0,
        }
    }
}

/// Installed and missing nodes for a downstream recommendation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeInfo {
    pub existing_nodes: Vec<NodeDescriptor>,
    pub missing_nodes: Vec<NodeDescriptor>,
}

/// Extension item attached to a reply
///
/// Serialized as `{"type": "<tag>", "data": <payload>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ExtItem {
    /// Workflow options to pick from
    Workflows(Vec<Workflow>),
    /// Node recommendations
    NodeInfo(NodeInfo),
    /// Suggested follow-up prompts
    Guides(Vec<String>),
}
