//! Byte-level wire codecs for the oc-daemon protocol.
//!
//! Everything in this crate is pure byte manipulation: varint and
//! length-prefixed string codecs, the fixed-width float field encoding,
//! and frame assembly. No I/O happens here; transports and send-time
//! budgeting live in `ocdaemon-client`.

pub mod error;
pub mod float;
pub mod frame;
pub mod string;
pub mod varint;

pub use error::WireError;
pub use float::FloatWidth;
pub use frame::{encode_frame, FrameHead, START_OF_MSG};
