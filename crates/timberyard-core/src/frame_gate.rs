//! Frame-budget gate layered over a faster redraw signal.
//!
//! The redraw signal fires far more often than loaders should move. The
//! gate admits a redraw as a tick only when at least `interval` has passed
//! since the previously admitted one, which pins the tick rate near
//! `1 / interval` regardless of how fast redraws arrive.

use std::time::Duration;

use tokio::time::Instant;

/// Admits at most one tick per `interval`.
#[derive(Debug, Clone, Copy)]
pub struct FrameGate {
    interval: Duration,
    last: Option<Instant>,
}

impl FrameGate {
    /// Create a gate that has not admitted anything yet.
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Decide whether the redraw at `now` should apply a tick.
    ///
    /// The first call always admits.
    pub fn admit(&mut self, now: Instant) -> bool {
        let within_budget = self
            .last
            .is_some_and(|last| now.saturating_duration_since(last) < self.interval);
        if within_budget {
            return false;
        }
        self.last = Some(now);
        true
    }

    /// The minimum spacing between admitted ticks.
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn at(start: Instant, ms: u64) -> Instant {
        start.checked_add(Duration::from_millis(ms)).unwrap()
    }

    #[test]
    fn first_redraw_is_admitted() {
        let mut gate = FrameGate::new(Duration::from_millis(50));
        assert!(gate.admit(Instant::now()));
    }

    #[test]
    fn redraws_inside_the_budget_are_skipped() {
        let mut gate = FrameGate::new(Duration::from_millis(50));
        let start = Instant::now();
        assert!(gate.admit(start));
        for ms in [10, 20, 30, 40, 49] {
            assert!(!gate.admit(at(start, ms)));
        }
        assert!(gate.admit(at(start, 50)));
    }

    #[test]
    fn late_redraw_restarts_the_budget_from_itself() {
        let mut gate = FrameGate::new(Duration::from_millis(50));
        let start = Instant::now();
        assert!(gate.admit(start));
        assert!(gate.admit(at(start, 80)));
        // Budget now runs from 80 ms, not 50 ms.
        assert!(!gate.admit(at(start, 120)));
        assert!(gate.admit(at(start, 130)));
    }

    #[test]
    fn ten_ms_redraws_yield_twenty_ticks_per_second() {
        let mut gate = FrameGate::new(Duration::from_millis(50));
        let start = Instant::now();
        let admitted = (0..100u64)
            .filter(|i| gate.admit(at(start, i.saturating_mul(10))))
            .count();
        assert_eq!(admitted, 20);
    }

    #[test]
    fn fresh_gate_admits_immediately_after_a_pause() {
        // Resume builds a new gate, so the first redraw after it applies.
        let start = Instant::now();
        let mut before = FrameGate::new(Duration::from_millis(50));
        assert!(before.admit(start));
        let mut after = FrameGate::new(before.interval());
        assert!(after.admit(at(start, 1)));
        assert_eq!(after.interval(), Duration::from_millis(50));
    }
}
