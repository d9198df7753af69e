//! Metrics for streamed replies
//!
//! Every streamed reply is tracked from its first frame to either completion
//! or abort, labeled by reply kind.
//!
//! # Metrics
//!
//! - `copilot_stream_replies_total`: Counter of replies started
//! - `copilot_stream_duration_seconds`: Histogram of time from first to last frame
//! - `copilot_stream_frames_sent`: Histogram of frames delivered per reply
//! - `copilot_stream_aborted_total`: Counter of replies cut short by a sink failure
//! - `copilot_stream_active_count`: Gauge of replies currently streaming
//!
//! # Examples
//!
//! ```
//! use comfy_copilot::reply::metrics::StreamMetrics;
//! use comfy_copilot::reply::ReplyKind;
//!
//! let mut metrics = StreamMetrics::new(ReplyKind::Message);
//! metrics.record_completion(66);
//! ```

use super::ReplyKind;
use metrics::{decrement_gauge, histogram, increment_counter, increment_gauge};
use std::time::{Duration, Instant};

/// Metrics collection for a single streamed reply
#[derive(Debug)]
pub struct StreamMetrics {
    kind: ReplyKind,
    start: Instant,
    recorded: bool,
}

impl StreamMetrics {
    /// Starts tracking a reply and bumps the active gauge
    pub fn new(kind: ReplyKind) -> Self {
        increment_counter!("copilot_stream_replies_total", "kind" => kind.as_str());
        increment_gauge!("copilot_stream_active_count", 1.0, "kind" => kind.as_str());

        Self {
            kind,
            start: Instant::now(),
            recorded: false,
        }
    }

    /// Records a reply whose frames were all delivered
    ///
    /// Only the first call to `record_completion` or `record_aborted` counts.
    pub fn record_completion(&mut self, frames: usize) {
        if self.recorded {
            return;
        }
        self.recorded = true;

        histogram!(
            "copilot_stream_duration_seconds",
            self.start.elapsed().as_secs_f64(),
            "kind" => self.kind.as_str()
        );
        histogram!(
            "copilot_stream_frames_sent",
            frames as f64,
            "kind" => self.kind.as_str()
        );

        decrement_gauge!("copilot_stream_active_count", 1.0, "kind" => self.kind.as_str());
    }

    /// Records a reply that stopped after `frames_sent` frames
    pub fn record_aborted(&mut self, frames_sent: usize) {
        if self.recorded {
            return;
        }
        self.recorded = true;

        increment_counter!("copilot_stream_aborted_total", "kind" => self.kind.as_str());
        histogram!(
            "copilot_stream_frames_sent",
            frames_sent as f64,
            "kind" => self.kind.as_str()
        );

        decrement_gauge!("copilot_stream_active_count", 1.0, "kind" => self.kind.as_str());
    }

    /// Reply kind being tracked
    pub fn kind(&self) -> ReplyKind {
        self.kind
    }

    /// Time since the reply started
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Whether an outcome has been recorded
    pub fn is_recorded(&self) -> bool {
        self.recorded
    }
}

impl Drop for StreamMetrics {
    // Dropped futures (e.g. a cancelled request) still leave the gauge balanced.
    fn drop(&mut self) {
        if !self.recorded {
            decrement_gauge!("copilot_stream_active_count", 1.0, "kind" => self.kind.as_str());
        }
    }
}

/// Installs the Prometheus exporter when the `prometheus` feature is enabled
///
/// A no-op otherwise; always safe to call.
pub fn init_metrics_exporter() {
    #[cfg(feature = "prometheus")]
    {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let builder = PrometheusBuilder::new();
        let _ = builder.install().map_err(|e| {
            tracing::warn!("Failed to install Prometheus exporter: {}", e);
        });
    }
}
