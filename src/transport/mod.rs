//! Transport module - the request/reply channel.
//!
//! [`RequestChannel`] is the seam between the bridge and the messaging
//! transport: bounded-timeout polling, single-message receive, and
//! single-message send. [`RepChannel`] is the production implementation over
//! a bound ZeroMQ REP socket; tests substitute mock channels to observe
//! protocol behavior without sockets.

mod rep;

use async_trait::async_trait;
use bytes::Bytes;

use crate::compat::PollTimeout;
use crate::error::Result;

pub use rep::RepChannel;

/// A bound, transaction-oriented request/reply channel.
///
/// The lifecycle is: construct (bound) → repeated (poll, [receive, send])
/// cycles → close. The peer cannot send a second request before receiving a
/// reply to the first, so at most one exchange is in flight at a time.
#[async_trait]
pub trait RequestChannel: Send {
    /// Wait up to `timeout` for an inbound request.
    ///
    /// Returns whether a request is ready to [`receive`](Self::receive). A
    /// request that arrives within the window is held internally, so a
    /// subsequent `receive` does not block. Never waits indefinitely unless
    /// the timeout says to block forever.
    async fn poll_for_request(&mut self, timeout: &PollTimeout) -> Result<bool>;

    /// Take the request observed by the last positive poll.
    ///
    /// Calling without a prior positive poll is a contract violation and
    /// returns a protocol error rather than blocking.
    fn receive(&mut self) -> Result<Bytes>;

    /// Queue exactly one reply message.
    ///
    /// Returns once the transport has accepted the message, not necessarily
    /// after delivery.
    async fn send(&mut self, reply: Bytes) -> Result<()>;

    /// Close the channel, discarding pending unsent data.
    ///
    /// Safe to call once; later calls are no-ops. No rebinding is supported
    /// after close.
    async fn close(&mut self) -> Result<()>;
}
