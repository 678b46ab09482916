use thiserror::Error;

/// Errors raised while decoding wire data.
///
/// The encode side is infallible: encoders append to a caller-supplied
/// buffer and every representable input has a valid encoding.
#[derive(Debug, Error)]
pub enum WireError {
    /// The buffer ended before the field was complete.
    #[error("insufficient data: need {need} bytes but only {have} remain")]
    InsufficientData { need: usize, have: usize },

    /// A varint did not fit in 64 bits.
    #[error("varint overflows 64 bits")]
    VarintOverflow,

    /// A string field did not contain valid UTF-8.
    #[error("invalid UTF-8 string")]
    InvalidUtf8,
}
