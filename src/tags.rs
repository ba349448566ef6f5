//! Stream tags and the binary tag-header codec.
//!
//! A tag is an out-of-band annotation pinned to an absolute sample offset.
//! When tag passing is enabled, every reply starts with a header blob that
//! carries the read offset at invocation start plus all tags whose offsets
//! fall inside the offered sample range.
//!
//! Header layout (all integers Big Endian):
//!
//! ```text
//! ┌───────────┬───────────┬──────────────────────────────────────────┐
//! │ offset    │ ntags     │ ntags × tag entries                      │
//! │ 8 bytes   │ 8 bytes   │ (offset u64, key_len u32, key bytes,     │
//! │ uint64 BE │ uint64 BE │  value_len u32, value bytes)             │
//! └───────────┴───────────┴──────────────────────────────────────────┘
//! ```
//!
//! The layout is deterministic: encoding the same `(offset, tags)` input
//! always produces the same bytes, so the header length is reproducible.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{BridgeError, Result};

/// Fixed prefix size: offset (8) + tag count (8).
pub const HEADER_PREFIX_SIZE: usize = 16;

/// An offset-addressed annotation attached to a position in the sample
/// stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Absolute sample offset this tag is pinned to.
    pub offset: u64,
    /// Tag key.
    pub key: String,
    /// Tag value (opaque bytes).
    pub value: Bytes,
}

impl Tag {
    /// Create a new tag.
    pub fn new(offset: u64, key: impl Into<String>, value: impl Into<Bytes>) -> Self {
        Self {
            offset,
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Snapshot the tags whose offsets fall in `[start, end)`.
///
/// Order is preserved from the input slice. The returned vector owns its
/// tags, so nothing borrowed from the host scheduler outlives the
/// invocation.
pub fn tags_in_range(tags: &[Tag], start: u64, end: u64) -> Vec<Tag> {
    tags.iter()
        .filter(|t| t.offset >= start && t.offset < end)
        .cloned()
        .collect()
}

/// Codec for the reply tag header.
///
/// Implemented as a marker struct with static methods, mirroring the
/// payload codecs: no state, compile-time selection.
pub struct TagHeaderCodec;

impl TagHeaderCodec {
    /// Encode a base offset and a tag snapshot into a header blob.
    pub fn encode(offset: u64, tags: &[Tag]) -> Bytes {
        let body: usize = tags
            .iter()
            .map(|t| 8 + 4 + t.key.len() + 4 + t.value.len())
            .sum();

        let mut buf = BytesMut::with_capacity(HEADER_PREFIX_SIZE + body);
        buf.put_u64(offset);
        buf.put_u64(tags.len() as u64);

        for tag in tags {
            buf.put_u64(tag.offset);
            buf.put_u32(tag.key.len() as u32);
            buf.put_slice(tag.key.as_bytes());
            buf.put_u32(tag.value.len() as u32);
            buf.put_slice(&tag.value);
        }

        buf.freeze()
    }

    /// Decode a header blob back into `(offset, tags)`.
    ///
    /// Returns an error if the blob is truncated or a declared length runs
    /// past the end of the buffer.
    pub fn decode(data: &[u8]) -> Result<(u64, Vec<Tag>)> {
        let mut cursor = Cursor::new(data);

        let offset = cursor.read_u64()?;
        let ntags = cursor.read_u64()?;

        let mut tags = Vec::with_capacity(ntags.min(1024) as usize);
        for _ in 0..ntags {
            let tag_offset = cursor.read_u64()?;

            let key_len = cursor.read_u32()? as usize;
            let key = cursor.read_slice(key_len)?;
            let key = String::from_utf8(key.to_vec())
                .map_err(|e| BridgeError::Protocol(format!("Tag key is not UTF-8: {}", e)))?;

            let value_len = cursor.read_u32()? as usize;
            let value = Bytes::copy_from_slice(cursor.read_slice(value_len)?);

            tags.push(Tag {
                offset: tag_offset,
                key,
                value,
            });
        }

        Ok((offset, tags))
    }
}

/// Minimal bounds-checked reader over a byte slice.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(len).filter(|&e| e <= self.data.len());
        match end {
            Some(end) => {
                let slice = &self.data[self.pos..end];
                self.pos = end;
                Ok(slice)
            }
            None => Err(BridgeError::Protocol(format!(
                "Tag header truncated: need {} bytes at position {}, have {}",
                len,
                self.pos,
                self.data.len()
            ))),
        }
    }

    fn read_u64(&mut self) -> Result<u64> {
        let bytes = self.read_slice(8)?;
        Ok(u64::from_be_bytes(bytes.try_into().expect("8-byte slice")))
    }

    fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_slice(4)?;
        Ok(u32::from_be_bytes(bytes.try_into().expect("4-byte slice")))
    }
}
