//! Span export records.
//!
//! Spans cross the wire as JSON rather than the binary encoding used for
//! stats: they are variable-shape, evolve frequently, and flow at lower
//! rates, so simplicity wins over density. Open-shape fields stay
//! `serde_json::Value` so the surrounding span object model remains
//! external to this workspace.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The projection of one span sent to the daemon.
///
/// Every field serializes; receivers rely on the full key set being
/// present in each exported object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanData {
    pub trace_id: String,
    pub span_id: String,
    pub parent_span_id: String,
    pub name: String,
    pub kind: String,
    pub stack_trace: Value,
    /// Wall-clock start, seconds with fractional microseconds.
    pub start_time: f64,
    /// Wall-clock end, seconds with fractional microseconds.
    pub end_time: f64,
    pub status: Value,
    pub attributes: Value,
    pub time_events: Value,
    pub links: Value,
    pub same_process_as_parent_span: bool,
}

impl SpanData {
    pub fn new(
        trace_id: impl Into<String>,
        span_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            trace_id: trace_id.into(),
            span_id: span_id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}
