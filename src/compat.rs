//! Transport version compatibility.
//!
//! libzmq changed the unit of the poll timeout argument between major
//! versions: 2.x interprets it in microseconds, 3.x and later in
//! milliseconds. The configured timeout is always given in milliseconds; the
//! rescaling to the transport's native unit happens exactly once, at
//! construction, so the poll hot path never branches on version.
//!
//! The bundled pure-Rust transport speaks ZMTP 3.0, so in production the
//! stored timeout stays in milliseconds. Tests construct simulated versions
//! to pin the conversion.

use std::time::Duration;

/// First major version whose poll timeout is interpreted in milliseconds.
const MILLIS_TIMEOUT_MAJOR: u32 = 3;

/// A transport library version triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl TransportVersion {
    /// Protocol version implemented by the bundled transport (ZMTP 3.0).
    pub const CURRENT: Self = Self::new(3, 0, 0);

    /// Create a version triple.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

/// Unit of the ticks stored in a [`PollTimeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutUnit {
    Millis,
    Micros,
}

/// Poll timeout in transport-native units, fixed at construction.
///
/// Ticks follow the configured convention: `0` means a non-blocking poll,
/// a negative value means block until a request arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTimeout {
    ticks: i64,
    unit: TimeoutUnit,
}

impl PollTimeout {
    /// Convert a configured timeout (milliseconds) into the native unit of
    /// the given transport version.
    pub fn from_config(timeout_ms: i64, version: TransportVersion) -> Self {
        if version.major < MILLIS_TIMEOUT_MAJOR {
            Self {
                ticks: timeout_ms.saturating_mul(1000),
                unit: TimeoutUnit::Micros,
            }
        } else {
            Self {
                ticks: timeout_ms,
                unit: TimeoutUnit::Millis,
            }
        }
    }

    /// Stored tick count, in [`Self::unit`] units.
    #[inline]
    pub fn ticks(&self) -> i64 {
        self.ticks
    }

    /// Unit of the stored ticks.
    #[inline]
    pub fn unit(&self) -> TimeoutUnit {
        self.unit
    }

    /// Whether this timeout is a single non-blocking poll.
    #[inline]
    pub fn is_immediate(&self) -> bool {
        self.ticks == 0
    }

    /// Bounded wait duration, or `None` to block until a request arrives.
    pub fn as_duration(&self) -> Option<Duration> {
        if self.ticks < 0 {
            return None;
        }

        let ticks = self.ticks as u64;
        Some(match self.unit {
            TimeoutUnit::Millis => Duration::from_millis(ticks),
            TimeoutUnit::Micros => Duration::from_micros(ticks),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modern_major_keeps_milliseconds() {
        let timeout = PollTimeout::from_config(100, TransportVersion::new(3, 2, 5));
        assert_eq!(timeout.ticks(), 100);
        assert_eq!(timeout.unit(), TimeoutUnit::Millis);
    }

    #[test]
    fn test_legacy_major_scales_to_microseconds() {
        let timeout = PollTimeout::from_config(100, TransportVersion::new(2, 2, 0));
        assert_eq!(timeout.ticks(), 100_000);
        assert_eq!(timeout.unit(), TimeoutUnit::Micros);
    }

    #[test]
    fn test_scaling_factor_between_majors() {
        let legacy = PollTimeout::from_config(250, TransportVersion::new(2, 0, 0));
        let modern = PollTimeout::from_config(250, TransportVersion::new(4, 3, 4));
        assert_eq!(legacy.ticks(), modern.ticks() * 1000);
    }

    #[test]
    fn test_both_units_name_the_same_wall_clock_time() {
        let legacy = PollTimeout::from_config(250, TransportVersion::new(2, 0, 0));
        let modern = PollTimeout::from_config(250, TransportVersion::CURRENT);
        assert_eq!(legacy.as_duration(), modern.as_duration());
        assert_eq!(modern.as_duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_zero_is_immediate() {
        let timeout = PollTimeout::from_config(0, TransportVersion::CURRENT);
        assert!(timeout.is_immediate());
        assert_eq!(timeout.as_duration(), Some(Duration::ZERO));
    }

    #[test]
    fn test_negative_blocks_forever() {
        let timeout = PollTimeout::from_config(-1, TransportVersion::CURRENT);
        assert!(!timeout.is_immediate());
        assert_eq!(timeout.as_duration(), None);

        // The legacy scaling must not turn "block forever" into a bounded wait.
        let legacy = PollTimeout::from_config(-1, TransportVersion::new(2, 1, 0));
        assert_eq!(legacy.as_duration(), None);
    }

    #[test]
    fn test_current_version_is_zmtp_3() {
        assert_eq!(TransportVersion::CURRENT.major, 3);
    }
}
