//! Rolling sample history for the graph views
//!
//! One fixed-capacity ring per graphed channel, sampled on the display
//! refresh tick. Rendering walks oldest-to-newest and maps each sample
//! into the plot's vertical range.

use heapless::HistoryBuffer;

/// Samples kept per channel, one per display refresh
pub const HISTORY_LEN: usize = 64;

/// Rolling history of one telemetry channel
#[derive(Default)]
pub struct ChannelHistory {
    samples: HistoryBuffer<i16, HISTORY_LEN>,
}

impl ChannelHistory {
    pub const fn new() -> Self {
        Self {
            samples: HistoryBuffer::new(),
        }
    }

    /// Record one sample, evicting the oldest once full
    pub fn push(&mut self, value: i16) {
        self.samples.write(value);
    }

    /// Number of samples recorded, capped at capacity
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate samples oldest first
    pub fn iter(&self) -> impl Iterator<Item = &i16> {
        self.samples.oldest_ordered()
    }

    /// Observed (min, max) over the retained window, or None when empty
    pub fn span(&self) -> Option<(i16, i16)> {
        let mut iter = self.samples.oldest_ordered();
        let first = *iter.next()?;
        let mut lo = first;
        let mut hi = first;
        for &s in iter {
            lo = lo.min(s);
            hi = hi.max(s);
        }
        Some((lo, hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history() {
        let h = ChannelHistory::new();
        assert!(h.is_empty());
        assert_eq!(h.span(), None);
    }

    #[test]
    fn test_oldest_first_order() {
        let mut h = ChannelHistory::new();
        h.push(1);
        h.push(2);
        h.push(3);

        let collected: heapless::Vec<i16, 4> = h.iter().copied().collect();
        assert_eq!(collected.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut h = ChannelHistory::new();
        for i in 0..(HISTORY_LEN as i16 + 5) {
            h.push(i);
        }

        assert_eq!(h.len(), HISTORY_LEN);
        assert_eq!(h.iter().next(), Some(&5));
        assert_eq!(h.span(), Some((5, HISTORY_LEN as i16 + 4)));
    }

    #[test]
    fn test_span_tracks_window_only() {
        let mut h = ChannelHistory::new();
        h.push(100);
        for _ in 0..HISTORY_LEN {
            h.push(7);
        }
        // The 100 has been evicted
        assert_eq!(h.span(), Some((7, 7)));
    }
}
