//! Protocol module - request decoding and reply framing.
//!
//! The wire protocol has exactly two message shapes:
//! - Request: 4-byte signed sample count (native byte order)
//! - Reply: `[optional tag header][payload]` in one message

mod request;
mod reply;

pub use reply::{frame_reply, ReplyFrame};
pub use request::{decode_request, REQUEST_SIZE};
