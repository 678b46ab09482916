//! Wire-level protocol constants.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

/// Protocol version byte carried in the REQ_INIT payload.
pub const PROT_VERSION: u8 = 0x01;

/// Message type tags.
///
/// Tags partition by purpose: process lifecycle (0x01-0x02), request
/// lifecycle (0x03-0x04), trace (0x14), stats (0x28-0x2C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum MessageType {
    ProcInit = 0x01,
    ProcShutdown = 0x02,
    ReqInit = 0x03,
    ReqShutdown = 0x04,
    TraceExport = 0x14,
    MeasureCreate = 0x28,
    ViewReportingPeriod = 0x29,
    ViewRegister = 0x2a,
    ViewUnregister = 0x2b,
    StatsRecord = 0x2c,
}

/// Measurement value type tag, one byte on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoPrimitive, TryFromPrimitive,
)]
#[repr(u8)]
pub enum MeasurementValueType {
    Int = 0x01,
    Float = 0x02,
    Unknown = 0xff,
}
