//! Bounded run loop around the scheduler.
//!
//! [`run_until_done`] starts the scheduler, follows its snapshot stream and
//! stops it again when one of these happens:
//!
//! - **Tick bound**: the animation tick counter reaches `max_ticks`
//! - **Time bound**: `max_real_time_seconds` of wall-clock time elapse
//! - **Operator stop**: [`OperatorState::request_stop`] is called
//!
//! The scheduler is left paused, not torn down, so the caller can inspect
//! the final state or resume it. A tick bound is also handed to the
//! scheduler as a tick limit, so the run ends on exactly `max_ticks` ticks.

use std::sync::Arc;

use timberyard_types::YardSnapshot;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::operator::{OperatorState, SimulationEndReason};
use crate::scheduler::{SchedulerError, YardScheduler};

/// Errors that can occur during a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Starting or stopping the scheduler failed.
    #[error("scheduler error: {source}")]
    Scheduler {
        /// The underlying scheduler error.
        #[from]
        source: SchedulerError,
    },
}

/// Result of a run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the run ended.
    pub end_reason: SimulationEndReason,
    /// The state after the scheduler was paused.
    pub final_snapshot: YardSnapshot,
    /// Animation ticks applied during this run.
    pub total_ticks: u64,
}

/// Callback invoked for every snapshot the scheduler publishes.
pub trait SnapshotCallback: Send {
    /// Called with each published snapshot, in order.
    fn on_snapshot(&mut self, snapshot: &YardSnapshot);
}

/// A no-op snapshot callback for testing.
pub struct NoOpCallback;

impl SnapshotCallback for NoOpCallback {
    fn on_snapshot(&mut self, _snapshot: &YardSnapshot) {}
}

/// Run the scheduler until a termination condition is met.
///
/// # Errors
///
/// Returns [`RunnerError`] if the scheduler cannot be started or a task
/// fails while stopping.
pub async fn run_until_done(
    scheduler: &mut YardScheduler,
    operator: &Arc<OperatorState>,
    callback: &mut dyn SnapshotCallback,
) -> Result<SimulationResult, RunnerError> {
    let mut snapshots = scheduler.subscribe();
    let start_tick = scheduler.snapshot().await.tick;

    info!(
        max_ticks = operator.max_ticks(),
        max_real_time_seconds = operator.max_real_time_seconds(),
        "Simulation starting"
    );

    let time_limit = operator.real_time_limit();
    let deadline = async {
        match time_limit {
            Some(limit) => tokio::time::sleep(limit).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(deadline);

    let previous_limit = scheduler.tick_limit();
    if operator.max_ticks() > 0 {
        scheduler.set_tick_limit(Some(start_tick.saturating_add(operator.max_ticks())));
    }

    let end_reason = if operator.is_stop_requested() {
        info!("Operator stop requested");
        SimulationEndReason::OperatorStop
    } else {
        scheduler.start().await?;
        loop {
            tokio::select! {
                biased;
                () = operator.wait_for_stop() => {
                    info!("Operator stop requested");
                    break SimulationEndReason::OperatorStop;
                }
                () = &mut deadline => {
                    info!(
                        max_seconds = operator.max_real_time_seconds(),
                        elapsed = operator.elapsed_seconds(),
                        "Real-time limit reached"
                    );
                    break SimulationEndReason::MaxRealTimeReached;
                }
                received = snapshots.recv() => match received {
                    Ok(snapshot) => {
                        callback.on_snapshot(&snapshot);
                        let run_ticks = snapshot.tick.saturating_sub(start_tick);
                        if operator.tick_limit_reached(run_ticks) {
                            info!(
                                tick = snapshot.tick,
                                max_ticks = operator.max_ticks(),
                                "Tick limit reached"
                            );
                            break SimulationEndReason::MaxTicksReached;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Run loop fell behind the snapshot stream");
                    }
                    Err(RecvError::Closed) => {
                        warn!("Snapshot stream closed");
                        break SimulationEndReason::OperatorStop;
                    }
                },
            }
        }
    };

    if scheduler.is_running() {
        scheduler.pause().await?;
    }
    scheduler.set_tick_limit(previous_limit);
    operator.set_end_reason(end_reason).await;

    let final_snapshot = scheduler.snapshot().await;
    let total_ticks = final_snapshot.tick.saturating_sub(start_tick);
    Ok(SimulationResult {
        end_reason,
        final_snapshot,
        total_ticks,
    })
}

/// Log the end of a run.
pub fn log_run_end(result: &SimulationResult) {
    let stats = &result.final_snapshot.stats;
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        stock_cycles = result.final_snapshot.stock_cycles,
        "Simulation ended"
    );

    if result.total_ticks == 0 {
        warn!("Simulation ended with no ticks executed");
    } else {
        info!(
            tick = result.final_snapshot.tick,
            total_stock = stats.total_stock,
            total_capacity = stats.total_capacity,
            utilization_pct = stats.utilization_pct,
            critical_zones = stats.critical_zones.len(),
            moving_loaders = stats.moving_loaders,
            "Final yard summary"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use timberyard_world::{StockDelta, create_starting_yard};

    use super::*;
    use crate::config::SimulationBoundsConfig;
    use crate::scheduler::SchedulerConfig;
    use crate::tick::YardState;

    fn make_scheduler() -> YardScheduler {
        let yard = create_starting_yard().unwrap();
        let state = YardState::new(
            yard.map,
            yard.loaders,
            yard.transitions,
            StockDelta::default(),
            42,
        )
        .unwrap();
        YardScheduler::new(state, SchedulerConfig::default())
    }

    fn bounds(max_ticks: u64, max_real_time_seconds: u64) -> SimulationBoundsConfig {
        SimulationBoundsConfig {
            max_ticks,
            max_real_time_seconds,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_by_max_ticks() {
        let mut scheduler = make_scheduler();
        let operator = Arc::new(OperatorState::new(&bounds(5, 0)));
        let mut cb = NoOpCallback;

        let result = run_until_done(&mut scheduler, &operator, &mut cb)
            .await
            .unwrap();

        assert_eq!(result.end_reason, SimulationEndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 5);
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.tick_limit(), None);
        assert!(!result.final_snapshot.running);
        assert_eq!(
            operator.end_reason().await,
            Some(SimulationEndReason::MaxTicksReached)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn tick_bound_is_never_exceeded() {
        let mut scheduler = make_scheduler();
        let operator = Arc::new(OperatorState::new(&bounds(5, 0)));
        let mut rx = scheduler.subscribe();
        let mut cb = NoOpCallback;

        let result = run_until_done(&mut scheduler, &operator, &mut cb)
            .await
            .unwrap();
        assert_eq!(result.total_ticks, 5);

        let mut max_seen = 0;
        while let Ok(snapshot) = rx.try_recv() {
            max_seen = max_seen.max(snapshot.tick);
        }
        assert_eq!(max_seen, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn second_run_counts_from_its_own_start() {
        let mut scheduler = make_scheduler();
        let mut cb = NoOpCallback;
        let first = Arc::new(OperatorState::new(&bounds(3, 0)));
        let _ = run_until_done(&mut scheduler, &first, &mut cb)
            .await
            .unwrap();

        let second = Arc::new(OperatorState::new(&bounds(4, 0)));
        let result = run_until_done(&mut scheduler, &second, &mut cb)
            .await
            .unwrap();
        assert_eq!(result.total_ticks, 4);
        assert_eq!(result.final_snapshot.tick, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_by_real_time() {
        let mut scheduler = make_scheduler();
        let operator = Arc::new(OperatorState::new(&bounds(0, 2)));
        let mut cb = NoOpCallback;

        let result = run_until_done(&mut scheduler, &operator, &mut cb)
            .await
            .unwrap();

        assert_eq!(result.end_reason, SimulationEndReason::MaxRealTimeReached);
        assert!((40..=41).contains(&result.total_ticks));
    }

    #[tokio::test(start_paused = true)]
    async fn operator_stop_before_start() {
        let mut scheduler = make_scheduler();
        let operator = Arc::new(OperatorState::new(&bounds(0, 0)));
        operator.request_stop();
        let mut cb = NoOpCallback;

        let result = run_until_done(&mut scheduler, &operator, &mut cb)
            .await
            .unwrap();

        assert_eq!(result.end_reason, SimulationEndReason::OperatorStop);
        assert_eq!(result.total_ticks, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn operator_stop_during_run() {
        let mut scheduler = make_scheduler();
        let operator = Arc::new(OperatorState::new(&bounds(0, 0)));
        let stopper = {
            let operator = Arc::clone(&operator);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(500)).await;
                operator.request_stop();
            })
        };
        let mut cb = NoOpCallback;

        let result = run_until_done(&mut scheduler, &operator, &mut cb)
            .await
            .unwrap();
        stopper.await.unwrap();

        assert_eq!(result.end_reason, SimulationEndReason::OperatorStop);
        assert!(result.total_ticks >= 9);
    }

    #[tokio::test(start_paused = true)]
    async fn callback_sees_every_tick() {
        struct CountCallback {
            ticks: Vec<u64>,
        }
        impl SnapshotCallback for CountCallback {
            fn on_snapshot(&mut self, snapshot: &YardSnapshot) {
                self.ticks.push(snapshot.tick);
            }
        }

        let mut scheduler = make_scheduler();
        let operator = Arc::new(OperatorState::new(&bounds(3, 0)));
        let mut cb = CountCallback { ticks: Vec::new() };

        let _ = run_until_done(&mut scheduler, &operator, &mut cb)
            .await
            .unwrap();

        // Start snapshot, then three ticks.
        assert_eq!(cb.ticks, vec![0, 1, 2, 3]);
    }
}
