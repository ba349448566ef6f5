//! # repstream
//!
//! A pull-based bridge that serves a buffered stream of fixed-size samples
//! to exactly one remote consumer at a time over a ZeroMQ REP socket.
//!
//! The consumer sends a request whose body is a 4-byte signed integer: the
//! number of samples it wants. The bridge answers with a single message of
//! `[optional tag header][payload]`, where the payload is raw sample bytes
//! copied verbatim from the buffer the host scheduler offered for the
//! current invocation.
//!
//! ## Architecture
//!
//! - **Transport** (`transport`): bound REP socket, bounded-timeout polling,
//!   one receive and one send per exchange
//! - **Protocol** (`protocol`): request decoding and reply framing
//! - **Tags** (`tags`): offset-addressed stream annotations and the binary
//!   header codec used when tag passing is enabled
//!
//! ## Example
//!
//! ```ignore
//! use repstream::{BridgeConfig, StreamBridge, StreamView};
//!
//! #[tokio::main]
//! async fn main() -> repstream::Result<()> {
//!     let config = BridgeConfig::new(4, 1, "tcp://127.0.0.1:5555", 100, false);
//!     let mut bridge = StreamBridge::bind(config).await?;
//!
//!     // Driven repeatedly by the host scheduler:
//!     let samples = vec![0u8; 40];
//!     let consumed = bridge
//!         .serve_once(StreamView::new(&samples, 10, 0, &[]))
//!         .await?;
//!     println!("consumed {consumed} samples");
//!     Ok(())
//! }
//! ```

pub mod compat;
pub mod config;
pub mod error;
pub mod protocol;
pub mod tags;
pub mod transport;

mod bridge;

pub use bridge::{StreamBridge, StreamView};
pub use config::BridgeConfig;
pub use error::{BridgeError, Result};
