//! Bus-silence watchdog
//!
//! Tracks the arrival time of the last accepted frame against a monotonic
//! millisecond clock. When the bus goes quiet the display shows a stale
//! indicator; telemetry keeps its last known values and is never zeroed.

use crate::config::CAN_TIMEOUT_MS;

/// Monitors time since the last accepted bus frame
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkMonitor {
    last_frame_ms: Option<u64>,
}

impl LinkMonitor {
    pub const fn new() -> Self {
        Self {
            last_frame_ms: None,
        }
    }

    /// Record an accepted frame at `now_ms`
    pub fn frame_received(&mut self, now_ms: u64) {
        self.last_frame_ms = Some(now_ms);
    }

    /// True when no frame has arrived within the timeout
    ///
    /// Stale until the first frame of the session arrives.
    pub fn is_stale(&self, now_ms: u64) -> bool {
        match self.last_frame_ms {
            Some(last) => now_ms.saturating_sub(last) >= CAN_TIMEOUT_MS,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_before_first_frame() {
        let link = LinkMonitor::new();
        assert!(link.is_stale(0));
        assert!(link.is_stale(10_000));
    }

    #[test]
    fn test_fresh_within_timeout() {
        let mut link = LinkMonitor::new();
        link.frame_received(1000);

        assert!(!link.is_stale(1000));
        assert!(!link.is_stale(1000 + CAN_TIMEOUT_MS - 1));
        assert!(link.is_stale(1000 + CAN_TIMEOUT_MS));
    }

    #[test]
    fn test_recovers_on_next_frame() {
        let mut link = LinkMonitor::new();
        link.frame_received(0);
        assert!(link.is_stale(CAN_TIMEOUT_MS + 500));

        link.frame_received(CAN_TIMEOUT_MS + 600);
        assert!(!link.is_stale(CAN_TIMEOUT_MS + 700));
    }
}
