//! Message dispatchers.
//!
//! Each public operation builds its type-specific payload and makes one
//! submit call; framing belongs to the sink. Spans travel as JSON (they
//! are variable-shape and low-rate); everything else is the binary
//! encoding from `ocdaemon-wire`.

use ocdaemon_types::{
    Measure, Measurement, MeasurementValue, MessageType, SpanData, TagContext, View,
};
use ocdaemon_wire::{float, string, varint, FloatWidth};

use crate::session::DaemonClient;

impl DaemonClient {
    /// Export a batch of spans as one JSON payload.
    pub fn export_spans(&self, spans: &[SpanData]) -> bool {
        let payload = match serde_json::to_vec(spans) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "span export serialization failed");
                return false;
            }
        };
        self.send_with(MessageType::TraceExport, |_| payload)
    }

    /// Announce a measure definition to the daemon.
    pub fn create_measure(&self, measure: &Measure) -> bool {
        self.send_with(MessageType::MeasureCreate, |_| {
            encode_measure_create(measure)
        })
    }

    /// Set the daemon's stats reporting period in seconds.
    ///
    /// Periods below one second are rejected: no frame is sent and the
    /// call reports failure.
    pub fn set_reporting_period(&self, seconds: f64) -> bool {
        if seconds < 1.0 {
            return false;
        }
        self.send_with(MessageType::ViewReportingPeriod, |width| {
            let mut buf = Vec::with_capacity(float::WIRE_LEN);
            float::put_float(&mut buf, width, seconds);
            buf
        })
    }

    /// Register views. An empty batch succeeds without emitting a frame.
    pub fn register_views(&self, views: &[View]) -> bool {
        if views.is_empty() {
            return true;
        }
        self.send_with(MessageType::ViewRegister, |width| {
            encode_view_register(width, views)
        })
    }

    /// Unregister views by name. An empty batch succeeds without emitting
    /// a frame.
    pub fn unregister_views(&self, views: &[View]) -> bool {
        if views.is_empty() {
            return true;
        }
        self.send_with(MessageType::ViewUnregister, |_| {
            encode_view_unregister(views)
        })
    }

    /// Record measurements with their tag context and attachments. An
    /// empty measurement batch succeeds without emitting a frame.
    pub fn record_stats(
        &self,
        measurements: &[Measurement],
        tags: &TagContext,
        attachments: &[(String, String)],
    ) -> bool {
        if measurements.is_empty() {
            return true;
        }
        self.send_with(MessageType::StatsRecord, |width| {
            encode_stats_record(width, measurements, tags, attachments)
        })
    }
}

// ---------------------------------------------------------------------------
// Payload encoders
// ---------------------------------------------------------------------------

fn encode_measure_create(measure: &Measure) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.push(u8::from(measure.value_type));
    string::put_str(&mut buf, &measure.name);
    string::put_str(&mut buf, &measure.description);
    string::put_str(&mut buf, &measure.unit);
    buf
}

fn encode_view_register(width: FloatWidth, views: &[View]) -> Vec<u8> {
    let mut buf = Vec::new();
    varint::put_uvarint(&mut buf, views.len() as u64);
    for view in views {
        string::put_str(&mut buf, &view.name);
        string::put_str(&mut buf, &view.description);
        varint::put_uvarint(&mut buf, view.tag_keys.len() as u64);
        for key in &view.tag_keys {
            string::put_str(&mut buf, key);
        }
        string::put_str(&mut buf, &view.measure_name);
        varint::put_uvarint(&mut buf, u64::from(view.aggregation.type_code()));
        if let Some(bounds) = view.aggregation.bucket_bounds() {
            varint::put_uvarint(&mut buf, bounds.len() as u64);
            for bound in bounds {
                float::put_float(&mut buf, width, *bound);
            }
        }
    }
    buf
}

fn encode_view_unregister(views: &[View]) -> Vec<u8> {
    let mut buf = Vec::new();
    varint::put_uvarint(&mut buf, views.len() as u64);
    for view in views {
        string::put_str(&mut buf, &view.name);
    }
    buf
}

fn encode_stats_record(
    width: FloatWidth,
    measurements: &[Measurement],
    tags: &TagContext,
    attachments: &[(String, String)],
) -> Vec<u8> {
    let mut buf = Vec::new();
    varint::put_uvarint(&mut buf, measurements.len() as u64);
    for measurement in measurements {
        string::put_str(&mut buf, &measurement.measure_name);
        buf.push(u8::from(measurement.value.value_type()));
        match measurement.value {
            MeasurementValue::Int(value) => varint::put_uvarint(&mut buf, value),
            MeasurementValue::Float(value) => float::put_float(&mut buf, width, value),
            // Unknown carries the tag byte only; the receiver infers the
            // missing value bytes.
            MeasurementValue::Unknown => {}
        }
    }
    varint::put_uvarint(&mut buf, tags.len() as u64);
    for tag in tags.iter() {
        string::put_str(&mut buf, &tag.key);
        string::put_str(&mut buf, &tag.value);
    }
    varint::put_uvarint(&mut buf, attachments.len() as u64);
    for (key, value) in attachments {
        string::put_str(&mut buf, key);
        string::put_str(&mut buf, value);
    }
    buf
}
