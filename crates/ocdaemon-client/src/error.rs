//! Client error types.
//!
//! Errors only surface during initialization. Once a session is Ready,
//! every operation reports a plain success/failure boolean and never
//! raises (deadline misses and broken transports are expected, tolerated
//! conditions on this path).

use thiserror::Error;

/// Errors that can occur while establishing the daemon session.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No socket or pipe could be opened.
    #[error("transport unavailable: {0}")]
    Transport(#[from] std::io::Error),

    /// The REQ_INIT frame could not be delivered within the send budget.
    #[error("init handshake not delivered")]
    Handshake,

    /// No IPC transport exists for this target family.
    #[error("unsupported platform")]
    UnsupportedPlatform,
}

/// Convenience result type.
pub type ClientResult<T> = std::result::Result<T, ClientError>;
