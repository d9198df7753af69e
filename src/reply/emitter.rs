//! Frame emission for streamed replies
//!
//! [`StreamEmitter`] turns a user message into the frame sequence of its
//! canned reply and pushes each frame through a [`FrameSink`]. Once every
//! frame is accepted by the sink the user message is recorded in the session
//! store. A sink failure stops emission and nothing is recorded.

use super::metrics::StreamMetrics;
use super::rules::classify;
use super::{ChatResponseFrame, ReplyKind, ReplyTemplate, TEXT_FORMAT};
use crate::error::{CopilotError, Result};
use crate::session::{Message, SessionStore};
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Destination for reply frames
#[async_trait]
pub trait FrameSink: Send {
    /// Deliver one frame; an error means no further frames can be delivered
    async fn push(&mut self, frame: &ChatResponseFrame) -> Result<()>;
}

/// Sink feeding newline-delimited JSON into a bounded channel
///
/// The receiving half typically backs an HTTP response body. When the body
/// is dropped the next push fails.
#[derive(Debug)]
pub struct ChannelSink {
    tx: mpsc::Sender<Bytes>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<Bytes>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl FrameSink for ChannelSink {
    async fn push(&mut self, frame: &ChatResponseFrame) -> Result<()> {
        let line = encode_frame(frame)?;
        self.tx
            .send(line)
            .await
            .map_err(|_| CopilotError::Stream("response receiver dropped".to_string()).into())
    }
}

/// Sink that keeps every frame in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub frames: Vec<ChatResponseFrame>,
}

#[async_trait]
impl FrameSink for CollectingSink {
    async fn push(&mut self, frame: &ChatResponseFrame) -> Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

/// Serialize a frame as one NDJSON line
pub fn encode_frame(frame: &ChatResponseFrame) -> Result<Bytes> {
    let mut line = serde_json::to_vec(frame).map_err(CopilotError::from)?;
    line.push(b'\n');
    Ok(Bytes::from(line))
}

/// Build the full frame sequence for a reply
///
/// Produces the seed frame, one frame per character (by Unicode scalar
/// value) and the finished frame, `text.chars().count() + 2` frames total.
/// Only the seed frame carries the extension payload.
///
/// # Examples
///
/// ```
/// use comfy_copilot::reply::{frame_plan, classify};
///
/// let reply = classify("hello");
/// let frames = frame_plan("s1", &reply);
/// assert_eq!(frames.len(), reply.text.chars().count() + 2);
/// assert!(frames.last().unwrap().finished);
/// ```
pub fn frame_plan(session_id: &str, reply: &ReplyTemplate) -> Vec<ChatResponseFrame> {
    let frame = |text: String, finished: bool| ChatResponseFrame {
        session_id: session_id.to_string(),
        text,
        finished,
        kind: reply.kind,
        format: TEXT_FORMAT.to_string(),
        ext: None,
    };

    let mut frames = Vec::with_capacity(reply.text.len() + 2);

    let mut seed = frame(String::new(), false);
    seed.ext = Some(reply.ext.clone());
    frames.push(seed);

    let mut accumulated = String::with_capacity(reply.text.len());
    for ch in reply.text.chars() {
        accumulated.push(ch);
        frames.push(frame(accumulated.clone(), false));
    }

    frames.push(frame(reply.text.to_string(), true));
    frames
}

/// Emits canned replies frame by frame
pub struct StreamEmitter {
    store: Arc<dyn SessionStore>,
    char_delay: Duration,
}

impl StreamEmitter {
    /// Create an emitter recording into `store`, pausing `char_delay` after
    /// each character frame
    pub fn new(store: Arc<dyn SessionStore>, char_delay: Duration) -> Self {
        Self { store, char_delay }
    }

    /// Stream the reply for `message` into `sink`
    ///
    /// # Returns
    ///
    /// The kind of reply that was sent
    ///
    /// # Errors
    ///
    /// Returns the sink's error if a frame could not be delivered. The user
    /// message is not recorded in that case.
    pub async fn emit<S: FrameSink + ?Sized>(
        &self,
        session_id: &str,
        message: &str,
        sink: &mut S,
    ) -> Result<ReplyKind> {
        let reply = classify(message);
        let frames = frame_plan(session_id, &reply);
        let last = frames.len() - 1;
        let mut metrics = StreamMetrics::new(reply.kind);

        tracing::info!(session_id, kind = reply.kind.as_str(), frames = frames.len(), "Streaming reply");

        for (i, frame) in frames.iter().enumerate() {
            if let Err(e) = sink.push(frame).await {
                metrics.record_aborted(i);
                tracing::warn!(session_id, sent = i, "Reply stream aborted: {}", e);
                return Err(e);
            }
            if i > 0 && i < last && !self.char_delay.is_zero() {
                tokio::time::sleep(self.char_delay).await;
            }
        }

        self.store.append(session_id, Message::user(message)).await;
        metrics.record_completion(frames.len());
        tracing::debug!(session_id, elapsed_ms = metrics.elapsed().as_millis() as u64, "Reply stream finished");

        Ok(reply.kind)
    }
}
