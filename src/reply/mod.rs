//! Streamed chat replies
//!
//! A reply is chosen from canned templates by ordered keyword rules and then
//! delivered as a sequence of [`ChatResponseFrame`]s:
//!
//! 1. a seed frame with empty text carrying the reply's extension payload,
//! 2. one frame per character holding the text accumulated so far,
//! 3. a closing frame with the full text and `finished = true`.
//!
//! Frame texts form a growing-prefix chain and exactly one frame per reply is
//! finished.

use serde::{Deserialize, Serialize};

pub mod emitter;
pub mod metrics;
pub mod payload;
pub mod rules;

pub use emitter::{encode_frame, frame_plan, ChannelSink, CollectingSink, FrameSink, StreamEmitter};
pub use payload::{ExtItem, NodeDescriptor, NodeInfo, Workflow};
pub use rules::{classify, KeywordRule};

/// Format tag carried by every frame
pub const TEXT_FORMAT: &str = "text";

/// What kind of reply a frame belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    /// Plain assistant message with follow-up guides
    Message,
    /// Workflow suggestions
    WorkflowOption,
    /// Downstream node recommendations
    DownstreamNodeRecommend,
}

impl ReplyKind {
    /// Wire name, also used as a metrics label
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyKind::Message => "message",
            ReplyKind::WorkflowOption => "workflow_option",
            ReplyKind::DownstreamNodeRecommend => "downstream_node_recommend",
        }
    }
}

/// One unit of a streamed reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponseFrame {
    pub session_id: String,
    /// Text accumulated so far
    pub text: String,
    pub finished: bool,
    #[serde(rename = "type")]
    pub kind: ReplyKind,
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<Vec<ExtItem>>,
}

/// A canned reply: its kind, full text and seed payload
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyTemplate {
    pub kind: ReplyKind,
    pub text: &'static str,
    pub ext: Vec<ExtItem>,
}
