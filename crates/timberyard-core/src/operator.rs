//! Operator control state for bounded runs.
//!
//! This module provides shared atomic state read by the run loop and written
//! by whoever wants the simulation to stop (a Ctrl-C handler, a test, an
//! embedding UI). Pausing and resuming belong to the scheduler; the operator
//! only decides when a run is over.
//!
//! # Architecture
//!
//! The stop flag is an [`AtomicBool`] paired with a [`Notify`], so a waiting
//! run loop wakes immediately without polling. The state is shared via
//! [`Arc`](std::sync::Arc).

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, Notify};

use crate::config::SimulationBoundsConfig;

/// Reason why the simulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationEndReason {
    /// Reached the configured `max_ticks` limit.
    MaxTicksReached,
    /// Reached the configured `max_real_time_seconds` limit.
    MaxRealTimeReached,
    /// An operator issued a stop command.
    OperatorStop,
}

/// Shared operator control state.
#[derive(Debug)]
pub struct OperatorState {
    /// Whether a stop has been requested.
    stop_requested: AtomicBool,

    /// Wakes the run loop when a stop is requested.
    stop_notify: Notify,

    /// Wall-clock time when the run started.
    started_at: DateTime<Utc>,

    /// Maximum number of ticks (0 = unlimited).
    max_ticks: u64,

    /// Maximum wall-clock seconds (0 = unlimited).
    max_real_time_seconds: u64,

    /// Reason the simulation ended, if it has.
    end_reason: Mutex<Option<SimulationEndReason>>,
}

impl OperatorState {
    /// Create a new operator state from configuration.
    pub fn new(bounds: &SimulationBoundsConfig) -> Self {
        Self {
            stop_requested: AtomicBool::new(false),
            stop_notify: Notify::new(),
            started_at: Utc::now(),
            max_ticks: bounds.max_ticks,
            max_real_time_seconds: bounds.max_real_time_seconds,
            end_reason: Mutex::new(None),
        }
    }

    // -----------------------------------------------------------------------
    // Stop
    // -----------------------------------------------------------------------

    /// Request a clean simulation stop.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
        self.stop_notify.notify_one();
    }

    /// Check whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    /// Wait until a stop is requested.
    ///
    /// Returns immediately if one already was.
    pub async fn wait_for_stop(&self) {
        while !self.is_stop_requested() {
            self.stop_notify.notified().await;
        }
    }

    /// Record the reason the simulation ended.
    pub async fn set_end_reason(&self, reason: SimulationEndReason) {
        let mut guard = self.end_reason.lock().await;
        *guard = Some(reason);
    }

    /// Get the reason the simulation ended, if it has.
    pub async fn end_reason(&self) -> Option<SimulationEndReason> {
        *self.end_reason.lock().await
    }

    // -----------------------------------------------------------------------
    // Boundaries
    // -----------------------------------------------------------------------

    /// Check whether the tick limit has been reached.
    ///
    /// Returns `true` if `max_ticks > 0` and `current_tick >= max_ticks`.
    pub const fn tick_limit_reached(&self, current_tick: u64) -> bool {
        self.max_ticks > 0 && current_tick >= self.max_ticks
    }

    /// The wall-clock budget, or `None` when unlimited.
    pub const fn real_time_limit(&self) -> Option<Duration> {
        if self.max_real_time_seconds == 0 {
            None
        } else {
            Some(Duration::from_secs(self.max_real_time_seconds))
        }
    }

    /// Return the wall-clock start time.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Return elapsed seconds since the run started.
    pub fn elapsed_seconds(&self) -> u64 {
        let elapsed = Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds();
        // `num_seconds` can be negative if clocks are weird; treat as 0.
        u64::try_from(elapsed.max(0)).unwrap_or(u64::MAX)
    }

    /// Get the configured max ticks.
    pub const fn max_ticks(&self) -> u64 {
        self.max_ticks
    }

    /// Get the configured max real-time seconds.
    pub const fn max_real_time_seconds(&self) -> u64 {
        self.max_real_time_seconds
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn unbounded() -> SimulationBoundsConfig {
        SimulationBoundsConfig::default()
    }

    #[test]
    fn initial_state_is_not_stopped() {
        let state = OperatorState::new(&unbounded());
        assert!(!state.is_stop_requested());
        assert!(state.real_time_limit().is_none());
    }

    #[test]
    fn stop_request() {
        let state = OperatorState::new(&unbounded());
        state.request_stop();
        assert!(state.is_stop_requested());
    }

    #[test]
    fn tick_limit_zero_means_unlimited() {
        let state = OperatorState::new(&unbounded());
        assert!(!state.tick_limit_reached(999_999));
    }

    #[test]
    fn tick_limit_reached() {
        let bounds = SimulationBoundsConfig {
            max_ticks: 100,
            max_real_time_seconds: 0,
        };
        let state = OperatorState::new(&bounds);
        assert!(!state.tick_limit_reached(99));
        assert!(state.tick_limit_reached(100));
        assert!(state.tick_limit_reached(101));
    }

    #[test]
    fn real_time_limit_converts_seconds() {
        let bounds = SimulationBoundsConfig {
            max_ticks: 0,
            max_real_time_seconds: 90,
        };
        let state = OperatorState::new(&bounds);
        assert_eq!(state.real_time_limit(), Some(Duration::from_secs(90)));
    }

    #[tokio::test]
    async fn stop_wakes_a_waiter() {
        let state = Arc::new(OperatorState::new(&unbounded()));
        let waiter = {
            let state = Arc::clone(&state);
            tokio::spawn(async move { state.wait_for_stop().await })
        };
        state.request_stop();
        assert!(waiter.await.is_ok());
    }

    #[tokio::test]
    async fn stop_before_wait_returns_immediately() {
        let state = OperatorState::new(&unbounded());
        state.request_stop();
        state.wait_for_stop().await;
        assert!(state.is_stop_requested());
    }

    #[tokio::test]
    async fn end_reason_round_trip() {
        let state = OperatorState::new(&unbounded());
        assert!(state.end_reason().await.is_none());
        state.set_end_reason(SimulationEndReason::OperatorStop).await;
        assert_eq!(
            state.end_reason().await,
            Some(SimulationEndReason::OperatorStop)
        );
    }
}
