//! Protocol constants and the data model consumed by the oc-daemon client.
//!
//! The surrounding trace/span object model, samplers, and propagators live
//! outside this workspace; these types are the narrow contracts through
//! which their data reaches the wire.

pub mod measure;
pub mod message;
pub mod span;
pub mod tag;
pub mod view;

// Re-export commonly used items at the crate root.
pub use measure::{Measure, Measurement, MeasurementValue};
pub use message::{MeasurementValueType, MessageType, PROT_VERSION};
pub use span::SpanData;
pub use tag::{Tag, TagContext};
pub use view::{Aggregation, View};
