//! ZeroMQ REP channel.
//!
//! Uses the pure-Rust `zeromq` implementation (no C dependencies). The
//! socket binds exactly once at construction; a bind failure aborts
//! construction with no partially-bound state left live. Closing drops the
//! socket's queues immediately, which gives the zero-linger teardown the
//! protocol expects.

use async_trait::async_trait;
use bytes::Bytes;
use zeromq::{RepSocket, Socket, SocketRecv, SocketSend, ZmqMessage};

use crate::compat::PollTimeout;
use crate::error::{BridgeError, Result};
use crate::transport::RequestChannel;

/// A bound ZeroMQ REP socket serving one request/reply exchange at a time.
pub struct RepChannel {
    /// `None` after close.
    socket: Option<RepSocket>,
    /// Request observed by the last positive poll, not yet taken.
    pending: Option<Bytes>,
    /// Resolved bind endpoint (wildcard ports are filled in).
    endpoint: String,
}

impl RepChannel {
    /// Bind a REP socket to the given endpoint.
    ///
    /// Supports the transports the crate is built with, e.g.
    /// `tcp://127.0.0.1:5555` or `ipc:///tmp/samples.ipc`. A TCP port of 0
    /// binds an ephemeral port; [`endpoint`](Self::endpoint) reports the
    /// resolved address.
    pub async fn bind(endpoint: &str) -> Result<Self> {
        let mut socket = RepSocket::new();
        let resolved = socket.bind(endpoint).await?;

        tracing::debug!(endpoint = %resolved, "REP socket bound");

        Ok(Self {
            socket: Some(socket),
            pending: None,
            endpoint: resolved.to_string(),
        })
    }

    /// The resolved endpoint this channel is bound to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn socket_mut(&mut self) -> Result<&mut RepSocket> {
        self.socket.as_mut().ok_or(BridgeError::ChannelClosed)
    }

    /// Extract the request body from a received message.
    ///
    /// REQ peers send single-part bodies; only the first part is the
    /// request payload.
    fn message_body(message: ZmqMessage) -> Bytes {
        message.into_vec().into_iter().next().unwrap_or_default()
    }
}

#[async_trait]
impl RequestChannel for RepChannel {
    async fn poll_for_request(&mut self, timeout: &PollTimeout) -> Result<bool> {
        if self.pending.is_some() {
            return Ok(true);
        }

        let socket = self.socket_mut()?;

        let received = match timeout.as_duration() {
            // Negative timeout: block until a request arrives.
            None => Some(socket.recv().await?),
            Some(window) => match tokio::time::timeout(window, socket.recv()).await {
                Ok(message) => Some(message?),
                Err(_elapsed) => None,
            },
        };

        match received {
            Some(message) => {
                self.pending = Some(Self::message_body(message));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn receive(&mut self) -> Result<Bytes> {
        self.pending.take().ok_or_else(|| {
            BridgeError::Protocol(
                "receive() called without a prior positive poll".to_string(),
            )
        })
    }

    async fn send(&mut self, reply: Bytes) -> Result<()> {
        let socket = self.socket_mut()?;
        socket.send(ZmqMessage::from(reply)).await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(socket) = self.socket.take() {
            socket.close().await;
            tracing::debug!(endpoint = %self.endpoint, "REP socket closed");
        }
        self.pending = None;
        Ok(())
    }
}
