//! Frame assembly.
//!
//! Every outbound message is one contiguous frame:
//!
//! ```text
//! START_OF_MSG : 4 bytes, all zero    TYPE       : 1 byte
//! SEQUENCE_NR  : varint               PROCESS_ID : varint
//! THREAD_ID    : varint               START_TIME : float field (8 bytes)
//! MSG_LEN      : varint               PAYLOAD    : MSG_LEN bytes
//! ```
//!
//! The four leading zero bytes are a resync marker: a reader that loses
//! frame alignment scans forward for four consecutive zeros followed by a
//! plausible type byte.

use crate::float::{self, FloatWidth};
use crate::string;
use crate::varint;

/// Recovery sentinel opening every frame.
pub const START_OF_MSG: [u8; 4] = [0x00, 0x00, 0x00, 0x00];

/// Header fields of one frame. The payload is supplied separately.
#[derive(Debug, Clone, Copy)]
pub struct FrameHead {
    /// Message type tag.
    pub msg_type: u8,
    /// Strictly increasing per-session sequence number.
    pub seq: u64,
    /// Sending process id.
    pub pid: u64,
    /// Sending thread id, 0 when the host has no thread concept.
    pub thread_id: u64,
    /// Wall-clock send time, seconds with fractional microseconds.
    pub start_time: f64,
    /// Session float width for the START_TIME field.
    pub float_width: FloatWidth,
}

/// Assemble a complete frame into one contiguous buffer.
pub fn encode_frame(head: &FrameHead, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(
        START_OF_MSG.len()
            + 1
            + varint::uvarint_len(head.seq)
            + varint::uvarint_len(head.pid)
            + varint::uvarint_len(head.thread_id)
            + float::WIRE_LEN
            + varint::uvarint_len(payload.len() as u64)
            + payload.len(),
    );
    frame.extend_from_slice(&START_OF_MSG);
    frame.push(head.msg_type);
    varint::put_uvarint(&mut frame, head.seq);
    varint::put_uvarint(&mut frame, head.pid);
    varint::put_uvarint(&mut frame, head.thread_id);
    float::put_float(&mut frame, head.float_width, head.start_time);
    string::put_bytes(&mut frame, payload);
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    fn head(msg_type: u8, seq: u64) -> FrameHead {
        FrameHead {
            msg_type,
            seq,
            pid: 7,
            thread_id: 1,
            start_time: 0.0,
            float_width: FloatWidth::F64,
        }
    }

    #[test]
    fn test_known_frame_bytes() {
        let frame = encode_frame(&head(0x2c, 1), &[0xab, 0xcd]);
        assert_eq!(
            frame,
            vec![
                0x00, 0x00, 0x00, 0x00, // START_OF_MSG
                0x2c, // TYPE
                0x01, // SEQUENCE_NR
                0x07, // PROCESS_ID
                0x01, // THREAD_ID
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // START_TIME
                0x02, // MSG_LEN
                0xab, 0xcd, // PAYLOAD
            ]
        );
    }

    #[test]
    fn test_frame_length_law() {
        for (seq, pid, tid, payload_len) in
            [(1u64, 7u64, 1u64, 0usize), (200, 99999, 0, 5), (1 << 40, 1, 300, 1000)]
        {
            let payload = vec![0x55; payload_len];
            let frame = encode_frame(
                &FrameHead {
                    msg_type: 0x14,
                    seq,
                    pid,
                    thread_id: tid,
                    start_time: 1234.5,
                    float_width: FloatWidth::F64,
                },
                &payload,
            );
            let expected = 4
                + 1
                + varint::uvarint_len(seq)
                + varint::uvarint_len(pid)
                + varint::uvarint_len(tid)
                + float::WIRE_LEN
                + varint::uvarint_len(payload_len as u64)
                + payload_len;
            assert_eq!(frame.len(), expected);
        }
    }

    #[test]
    fn test_frame_starts_with_sentinel_and_type() {
        let frame = encode_frame(&head(0x03, 1), b"payload");
        assert_eq!(&frame[..4], &START_OF_MSG);
        assert_ne!(frame[4], 0x00);
    }

    #[test]
    fn test_empty_payload() {
        let frame = encode_frame(&head(0x04, 2), &[]);
        // MSG_LEN is the single byte 0x00 and nothing follows it.
        assert_eq!(*frame.last().unwrap(), 0x00);
        assert_eq!(frame.len(), 4 + 1 + 1 + 1 + 1 + 8 + 1);
    }

    #[test]
    fn test_f32_frame_timestamp_padding() {
        let frame = encode_frame(
            &FrameHead {
                msg_type: 0x03,
                seq: 1,
                pid: 1,
                thread_id: 1,
                start_time: 1.5,
                float_width: FloatWidth::F32,
            },
            &[],
        );
        // START_TIME occupies bytes 8..16 for single-byte varint fields.
        assert_eq!(&frame[8..16], &[0x00, 0x00, 0x00, 0x00, 0xc0, 0x3f, 0x00, 0x00]);
    }
}
