//! Request decoding.
//!
//! A request body is a single 4-byte signed integer: the number of samples
//! the consumer wants. The integer is in the platform's native byte order,
//! matching what a C consumer writes with a plain pointer cast. Anything
//! shorter than 4 bytes is malformed and rejected instead of read past the
//! end; trailing bytes beyond the integer are ignored.

use crate::error::{BridgeError, Result};

/// Size of a well-formed request body in bytes.
pub const REQUEST_SIZE: usize = 4;

/// Decode the requested sample count from a request body.
///
/// # Errors
///
/// Returns a protocol error if the body is shorter than [`REQUEST_SIZE`].
pub fn decode_request(body: &[u8]) -> Result<i32> {
    let bytes: [u8; REQUEST_SIZE] = body
        .get(..REQUEST_SIZE)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| {
            BridgeError::Protocol(format!(
                "Request body too short: {} bytes, expected {}",
                body.len(),
                REQUEST_SIZE
            ))
        })?;

    Ok(i32::from_ne_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_exact_size() {
        let body = 1234i32.to_ne_bytes();
        assert_eq!(decode_request(&body).unwrap(), 1234);
    }

    #[test]
    fn test_decode_negative_count() {
        let body = (-5i32).to_ne_bytes();
        assert_eq!(decode_request(&body).unwrap(), -5);
    }

    #[test]
    fn test_decode_zero_count() {
        let body = 0i32.to_ne_bytes();
        assert_eq!(decode_request(&body).unwrap(), 0);
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let mut body = 77i32.to_ne_bytes().to_vec();
        body.extend_from_slice(b"junk");
        assert_eq!(decode_request(&body).unwrap(), 77);
    }

    #[test]
    fn test_decode_short_body_rejected() {
        for len in 0..REQUEST_SIZE {
            let body = vec![0u8; len];
            let result = decode_request(&body);
            assert!(result.is_err(), "length {} must be rejected", len);
            assert!(result.unwrap_err().to_string().contains("too short"));
        }
    }
}
