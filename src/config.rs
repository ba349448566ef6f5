//! Bridge configuration.
//!
//! All knobs are fixed at construction and immutable for the lifetime of the
//! bridge: sample geometry (`itemsize`, `vlen`), the bind endpoint, the poll
//! timeout, and whether tag headers are prepended to replies.

use crate::error::{BridgeError, Result};

/// Construction-time configuration for a [`StreamBridge`](crate::StreamBridge).
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Bytes per scalar sample. Must be > 0.
    pub itemsize: usize,
    /// Samples per vector element. Must be > 0.
    pub vlen: usize,
    /// Transport bind endpoint, e.g. `tcp://127.0.0.1:5555`.
    pub endpoint: String,
    /// Poll timeout in milliseconds. 0 means a non-blocking poll; a negative
    /// value means block until a request arrives.
    pub timeout_ms: i64,
    /// Prepend a tag header blob to every reply.
    pub pass_tags: bool,
}

impl BridgeConfig {
    /// Create a new configuration.
    pub fn new(
        itemsize: usize,
        vlen: usize,
        endpoint: impl Into<String>,
        timeout_ms: i64,
        pass_tags: bool,
    ) -> Self {
        Self {
            itemsize,
            vlen,
            endpoint: endpoint.into(),
            timeout_ms,
            pass_tags,
        }
    }

    /// Byte size of one streaming element (`itemsize * vlen`).
    #[inline]
    pub fn stride(&self) -> usize {
        self.itemsize * self.vlen
    }

    /// Validate the configuration.
    ///
    /// Checks:
    /// - `itemsize` and `vlen` are non-zero
    /// - the endpoint is non-empty
    pub fn validate(&self) -> Result<()> {
        if self.itemsize == 0 {
            return Err(BridgeError::Config("itemsize must be > 0".to_string()));
        }

        if self.vlen == 0 {
            return Err(BridgeError::Config("vlen must be > 0".to_string()));
        }

        if self.endpoint.is_empty() {
            return Err(BridgeError::Config(
                "endpoint must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = BridgeConfig::new(4, 1, "tcp://127.0.0.1:5555", 100, false);
        assert!(config.validate().is_ok());
        assert_eq!(config.stride(), 4);
    }

    #[test]
    fn test_stride_uses_both_factors() {
        let config = BridgeConfig::new(8, 3, "tcp://127.0.0.1:5555", 100, true);
        assert_eq!(config.stride(), 24);
    }

    #[test]
    fn test_zero_itemsize_rejected() {
        let config = BridgeConfig::new(0, 1, "tcp://127.0.0.1:5555", 100, false);
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("itemsize"));
    }

    #[test]
    fn test_zero_vlen_rejected() {
        let config = BridgeConfig::new(4, 0, "tcp://127.0.0.1:5555", 100, false);
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("vlen"));
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        let config = BridgeConfig::new(4, 1, "", 100, false);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_timeout_allowed() {
        // Negative timeout means block forever. It is a valid configuration.
        let config = BridgeConfig::new(4, 1, "tcp://127.0.0.1:5555", -1, false);
        assert!(config.validate().is_ok());
    }
}
