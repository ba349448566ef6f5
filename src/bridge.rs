//! Bridge runtime - one request/reply exchange per invocation.
//!
//! The host scheduler drives [`StreamBridge::serve_once`] repeatedly, each
//! time handing over a [`StreamView`]: the sample buffer offered for this
//! invocation, how many samples it holds, the stream read offset, and the
//! tags covering the offered range. One invocation performs at most one full
//! poll → receive → frame → send cycle and reports how many samples the
//! consumer took, so the scheduler can advance its own bookkeeping.
//!
//! Nothing borrowed from the view is retained past the invocation: the tag
//! snapshot is copied before encoding and the payload bytes are copied into
//! the outgoing frame.

use bytes::Bytes;

use crate::compat::{PollTimeout, TransportVersion};
use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};
use crate::protocol::{decode_request, frame_reply};
use crate::tags::{tags_in_range, Tag, TagHeaderCodec};
use crate::transport::{RepChannel, RequestChannel};

/// Per-invocation handle to the host scheduler's stream state.
///
/// Borrowed for the duration of one [`StreamBridge::serve_once`] call.
#[derive(Debug, Clone, Copy)]
pub struct StreamView<'a> {
    samples: &'a [u8],
    available: usize,
    read_offset: u64,
    tags: &'a [Tag],
}

impl<'a> StreamView<'a> {
    /// Create a view over the samples offered this invocation.
    ///
    /// `samples` must hold at least `available` stride-sized elements;
    /// `read_offset` is the number of samples consumed since stream start;
    /// `tags` covers at least `[read_offset, read_offset + available)`.
    pub fn new(samples: &'a [u8], available: usize, read_offset: u64, tags: &'a [Tag]) -> Self {
        Self {
            samples,
            available,
            read_offset,
            tags,
        }
    }

    /// Samples offered this invocation.
    #[inline]
    pub fn available(&self) -> usize {
        self.available
    }

    /// Stream read offset at invocation start.
    #[inline]
    pub fn read_offset(&self) -> u64 {
        self.read_offset
    }
}

/// The REP bridge: serves one buffered sample exchange per invocation.
///
/// Generic over the transport channel so tests can observe sends without a
/// socket; production code uses [`StreamBridge::bind`] which yields a
/// `StreamBridge<RepChannel>`.
pub struct StreamBridge<C> {
    config: BridgeConfig,
    /// Version-adjusted poll timeout, fixed at construction.
    timeout: PollTimeout,
    channel: C,
}

impl StreamBridge<RepChannel> {
    /// Validate the configuration, bind the REP socket, and assemble the
    /// bridge. A bind failure is fatal: no bridge is constructed.
    pub async fn bind(config: BridgeConfig) -> Result<Self> {
        config.validate()?;
        let channel = RepChannel::bind(&config.endpoint).await?;
        Ok(Self::assemble(config, channel))
    }

    /// The resolved endpoint the bridge is serving on.
    pub fn local_endpoint(&self) -> &str {
        self.channel.endpoint()
    }
}

impl<C: RequestChannel> StreamBridge<C> {
    /// Assemble a bridge over an already-bound channel.
    pub fn with_channel(config: BridgeConfig, channel: C) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config, channel))
    }

    fn assemble(config: BridgeConfig, channel: C) -> Self {
        let timeout = PollTimeout::from_config(config.timeout_ms, TransportVersion::CURRENT);
        Self {
            config,
            timeout,
            channel,
        }
    }

    /// The bridge configuration.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// The version-adjusted poll timeout used for every exchange.
    pub fn poll_timeout(&self) -> PollTimeout {
        self.timeout
    }

    /// Attempt one full request/reply exchange.
    ///
    /// Returns the number of samples consumed: 0 when no request arrived
    /// within the poll timeout (an expected steady-state outcome, not an
    /// error), otherwise `min(requested, available)` clamped to zero.
    ///
    /// A malformed request (shorter than the 4-byte count) is contained: the
    /// bridge answers with a zero-length reply to keep the request/reply
    /// alternation intact and reports zero consumption. Transport failures
    /// propagate to the caller.
    pub async fn serve_once(&mut self, view: StreamView<'_>) -> Result<usize> {
        let offered_bytes = self
            .config
            .stride()
            .checked_mul(view.available)
            .ok_or_else(|| {
                BridgeError::Protocol(format!(
                    "Offered sample count {} overflows addressable bytes",
                    view.available
                ))
            })?;

        if view.samples.len() < offered_bytes {
            return Err(BridgeError::Protocol(format!(
                "Host buffer holds {} bytes but {} samples need {}",
                view.samples.len(),
                view.available,
                offered_bytes
            )));
        }

        if !self.channel.poll_for_request(&self.timeout).await? {
            return Ok(0);
        }

        let body = self.channel.receive()?;
        let requested = match decode_request(&body) {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!("Dropping malformed request: {}", e);
                self.channel.send(Bytes::new()).await?;
                return Ok(0);
            }
        };

        let header = if self.config.pass_tags {
            let range_end = view.read_offset.saturating_add(view.available as u64);
            let snapshot = tags_in_range(view.tags, view.read_offset, range_end);
            TagHeaderCodec::encode(view.read_offset, &snapshot)
        } else {
            Bytes::new()
        };

        let reply = frame_reply(
            requested,
            view.available,
            &view.samples[..offered_bytes],
            &header,
        );
        let consumed = reply.consumed();

        tracing::debug!(
            requested,
            available = view.available,
            satisfied = reply.satisfied,
            reply_len = reply.bytes.len(),
            "Serving sample request"
        );

        self.channel.send(reply.bytes).await?;
        Ok(consumed)
    }

    /// Close the underlying channel, discarding pending unsent data.
    pub async fn shutdown(mut self) -> Result<()> {
        self.channel.close().await
    }
}
