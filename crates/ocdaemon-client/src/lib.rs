//! Client for shipping spans and stats to a local oc-daemon.
//!
//! The client holds one IPC transport for the process lifetime and writes
//! length-delimited binary frames under a hard per-send deadline (default
//! 5 ms). Delivery is best-effort and fire-and-forget: nothing is read
//! back, nothing is retried, and a send that misses its deadline leaves
//! frame resynchronization to the receiver.
//!
//! Typical usage:
//!
//! ```ignore
//! let client = DaemonClient::init(ClientOptions::default())?;
//! let _guard = client.shutdown_guard();
//!
//! client.create_measure(&Measure::int("requests").with_unit("1"));
//! client.record_stats(
//!     &[Measurement::int("requests", 1)],
//!     &TagContext::new().with_tag("route", "/api"),
//!     &[],
//! );
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod session;
pub mod sink;
pub mod transport;

pub use config::ClientOptions;
pub use error::{ClientError, ClientResult};
pub use session::{global, DaemonClient, ShutdownGuard};
pub use sink::{ExtensionDelegate, FrameSink};
pub use transport::Transport;

// Re-export the model types callers need to drive the API.
pub use ocdaemon_types::{
    Aggregation, Measure, Measurement, MeasurementValue, SpanData, Tag, TagContext, View,
};
