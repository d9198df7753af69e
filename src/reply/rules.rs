//! Ordered keyword rules and the canned reply catalog
//!
//! Rules are checked in slice order against the lowercased message and the
//! first rule whose keyword occurs anywhere in it wins. A message mentioning
//! both "workflow" and "recommend" therefore gets the workflow reply.

use super::payload::{ExtItem, NodeDescriptor, NodeInfo, Workflow};
use super::{ReplyKind, ReplyTemplate};

/// A keyword paired with the reply it selects
pub struct KeywordRule<T> {
    /// Lowercase substring to look for
    pub keyword: &'static str,
    /// Builds the reply from the original (not lowercased) message
    pub build: fn(&str) -> T,
}

impl<T> KeywordRule<T> {
    /// True when the keyword occurs in an already lowercased message
    pub fn matches(&self, lowered: &str) -> bool {
        lowered.contains(self.keyword)
    }
}

/// Evaluate `rules` in order, falling back when none match
///
/// # Examples
///
/// ```
/// use comfy_copilot::reply::rules::{first_match, KeywordRule};
///
/// let rules = [KeywordRule { keyword: "hi", build: |_| 1 }];
/// assert_eq!(first_match(&rules, "Hi there", |_| 0), 1);
/// assert_eq!(first_match(&rules, "bye", |_| 0), 0);
/// ```
pub fn first_match<T>(rules: &[KeywordRule<T>], message: &str, fallback: fn(&str) -> T) -> T {
    let lowered = message.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| (rule.build)(message))
        .unwrap_or_else(|| fallback(message))
}

/// Streamed reply rules, highest priority first
pub const REPLY_RULES: &[KeywordRule<ReplyTemplate>] = &[
    KeywordRule {
        keyword: "workflow",
        build: workflow_option_reply,
    },
    KeywordRule {
        keyword: "recommend",
        build: node_recommend_reply,
    },
];

/// Pick the canned reply for a user message
pub fn classify(message: &str) -> ReplyTemplate {
    first_match(REPLY_RULES, message, guide_reply)
}

const WORKFLOW_OPTION_TEXT: &str =
    "Let me help you choose a workflow. Here are some options available:";
const NODE_RECOMMEND_TEXT: &str = "Here are some recommended nodes:";
const GUIDE_TEXT: &str = "I can help you with workflows, nodes, and more. Try asking about:";

/// Default text-to-image graph in ComfyUI API format
const BASIC_IMAGE_GEN_GRAPH: &str = r#"{"3":{"class_type":"KSampler","inputs":{"seed":0,"steps":20,"cfg":8,"sampler_name":"euler","scheduler":"normal","denoise":1,"model":["4",0],"positive":["6",0],"negative":["7",0],"latent_image":["5",0]}},"4":{"class_type":"CheckpointLoaderSimple","inputs":{"ckpt_name":"v1-5-pruned-emaonly.safetensors"}},"5":{"class_type":"EmptyLatentImage","inputs":{"width":512,"height":512,"batch_size":1}},"6":{"class_type":"CLIPTextEncode","inputs":{"text":"a beautiful landscape","clip":["4",1]}},"7":{"class_type":"CLIPTextEncode","inputs":{"text":"blurry","clip":["4",1]}},"8":{"class_type":"VAEDecode","inputs":{"samples":["3",0],"vae":["4",2]}},"9":{"class_type":"SaveImage","inputs":{"filename_prefix":"ComfyUI","images":["8",0]}}}"#;

/// The basic image generation workflow offered for workflow requests
pub fn basic_image_gen_workflow() -> Workflow {
    Workflow {
        name: Some("basic_image_gen".to_string()),
        description: Some("Create a basic image generation workflow".to_string()),
        image: Some("https://placehold.co/600x400".to_string()),
        workflow: Some(BASIC_IMAGE_GEN_GRAPH.to_string()),
        ..Workflow::default()
    }
}

fn workflow_option_reply(_message: &str) -> ReplyTemplate {
    ReplyTemplate {
        kind: ReplyKind::WorkflowOption,
        text: WORKFLOW_OPTION_TEXT,
        ext: vec![ExtItem::Workflows(vec![basic_image_gen_workflow()])],
    }
}

fn node_recommend_reply(_message: &str) -> ReplyTemplate {
    let node_info = NodeInfo {
        existing_nodes: vec![
            NodeDescriptor::new(
                "LoraLoader",
                "Load LoRA weights for conditioning.",
                "https://github.com/CompVis/taming-transformers",
            ),
            NodeDescriptor::new(
                "KSampler",
                "Generate images using K-diffusion sampling.",
                "https://github.com/CompVis/taming-transformers",
            ),
        ],
        missing_nodes: vec![NodeDescriptor::new(
            "CLIPTextEncode",
            "Encode text prompts for conditioning.",
            "https://github.com/CompVis/clip-interrogator",
        )],
    };

    ReplyTemplate {
        kind: ReplyKind::DownstreamNodeRecommend,
        text: NODE_RECOMMEND_TEXT,
        ext: vec![ExtItem::NodeInfo(node_info)],
    }
}

fn guide_reply(_message: &str) -> ReplyTemplate {
    ReplyTemplate {
        kind: ReplyKind::Message,
        text: GUIDE_TEXT,
        ext: vec![ExtItem::Guides(vec![
            "Create a workflow".to_string(),
            "Search for nodes".to_string(),
            "Get node recommendations".to_string(),
        ])],
    }
}
