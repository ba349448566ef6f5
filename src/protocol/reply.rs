//! Reply framing.
//!
//! Computes the satisfied sample count and assembles the exact byte layout
//! of the outgoing frame: `[optional tag header][payload]`.
//!
//! The payload always spans the full buffer offered by the host scheduler
//! this invocation, sized by the *available* count. The satisfied count only
//! governs how many samples are reported as consumed; a consumer that asks
//! for fewer samples than are available still receives a reply framed for
//! the full available count. This asymmetry is the established wire behavior
//! and is kept for compatibility (see DESIGN.md).

use bytes::{BufMut, Bytes, BytesMut};

/// An assembled reply and its satisfied-count bookkeeping.
#[derive(Debug, Clone)]
pub struct ReplyFrame {
    /// Complete reply message: `[header][payload]` or just `[payload]`.
    pub bytes: Bytes,
    /// `min(requested, available)`, signed. May be zero or negative when the
    /// consumer sends a degenerate request; callers clamp to zero before
    /// reporting consumption.
    pub satisfied: i64,
}

impl ReplyFrame {
    /// Satisfied count clamped to zero, suitable for reporting to the host
    /// scheduler as "samples consumed this invocation".
    #[inline]
    pub fn consumed(&self) -> usize {
        self.satisfied.max(0) as usize
    }
}

/// Assemble a reply frame.
///
/// `payload` must be exactly the offered sample bytes for this invocation
/// (`stride * available` bytes); `header` is empty when tag passing is
/// disabled.
pub fn frame_reply(requested: i32, available: usize, payload: &[u8], header: &[u8]) -> ReplyFrame {
    let satisfied = (requested as i64).min(available as i64);

    let mut buf = BytesMut::with_capacity(header.len() + payload.len());
    buf.put_slice(header);
    buf.put_slice(payload);

    ReplyFrame {
        bytes: buf.freeze(),
        satisfied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_satisfied_is_min_of_requested_and_available() {
        for (requested, available, expected) in
            [(5, 10, 5), (20, 10, 10), (10, 10, 10), (0, 10, 0)]
        {
            let payload = vec![0u8; available * 4];
            let frame = frame_reply(requested as i32, available, &payload, &[]);
            assert_eq!(frame.satisfied, expected);
        }
    }

    #[test]
    fn test_payload_sized_by_available_not_requested() {
        // itemsize=4, vlen=1, 10 samples offered, 5 requested: the reply
        // still carries all 40 payload bytes.
        let payload = vec![0xABu8; 40];
        let frame = frame_reply(5, 10, &payload, &[]);

        assert_eq!(frame.bytes.len(), 40);
        assert_eq!(frame.satisfied, 5);
    }

    #[test]
    fn test_over_ask_is_capped() {
        let payload = vec![0u8; 40];
        let frame = frame_reply(20, 10, &payload, &[]);

        assert_eq!(frame.satisfied, 10);
        assert_eq!(frame.bytes.len(), 40);
    }

    #[test]
    fn test_header_prepended_before_payload() {
        let header = b"HDR";
        let payload = b"payload-bytes";
        let frame = frame_reply(1, 1, payload, header);

        assert_eq!(frame.bytes.len(), header.len() + payload.len());
        assert_eq!(&frame.bytes[..3], header);
        assert_eq!(&frame.bytes[3..], payload);
    }

    #[test]
    fn test_no_header_starts_at_payload() {
        let payload = b"raw";
        let frame = frame_reply(1, 1, payload, &[]);
        assert_eq!(&frame.bytes[..], payload);
    }

    #[test]
    fn test_negative_request_clamps_consumed() {
        let payload = vec![0u8; 40];
        let frame = frame_reply(-7, 10, &payload, &[]);

        assert_eq!(frame.satisfied, -7);
        assert_eq!(frame.consumed(), 0);
        // The reply is still framed for the full available count.
        assert_eq!(frame.bytes.len(), 40);
    }

    #[test]
    fn test_zero_available_yields_empty_payload() {
        let frame = frame_reply(5, 0, &[], &[]);
        assert_eq!(frame.satisfied, 0);
        assert!(frame.bytes.is_empty());
    }

    #[test]
    fn test_payload_bytes_copied_verbatim() {
        let payload: Vec<u8> = (0..=255).collect();
        let frame = frame_reply(256, 256, &payload, &[]);
        assert_eq!(&frame.bytes[..], &payload[..]);
    }
}
