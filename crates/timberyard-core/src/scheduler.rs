//! Dual-task scheduler driving the yard.
//!
//! [`YardScheduler`] owns two independently cancellable tokio tasks:
//!
//! - **Animation**: a redraw interval (default 10 ms) filtered through a
//!   [`FrameGate`] (default 50 ms), so loaders advance about 20 times a
//!   second.
//! - **Stock**: a fixed interval (default 3 s) whose first firing comes one
//!   full period after start.
//!
//! Both tasks lock the same [`YardState`], so a tick never overlaps a stock
//! cycle. [`YardScheduler::pause`] signals both tasks and waits for them to
//! exit: once it returns, nothing mutates the state until
//! [`YardScheduler::resume`] starts fresh timers from "now". Missed periods
//! are not replayed.
//!
//! Every applied tick, stock cycle and control operation publishes a
//! [`YardSnapshot`] on a broadcast channel.
//!
//! An optional tick limit stops the animation task from applying ticks past
//! a given tick number, so a bounded run never overshoots while the stop
//! request is in flight.

use std::sync::Arc;
use std::time::Duration;

use timberyard_types::{YardSnapshot, ZoneId};
use timberyard_world::WorldError;
use tokio::sync::{Mutex, broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::frame_gate::FrameGate;
use crate::tick::{YardState, run_animation_tick, run_stock_cycle};

/// Capacity of the snapshot broadcast channel.
///
/// A subscriber that falls behind by more than this many snapshots
/// receives [`broadcast::error::RecvError::Lagged`] and skips ahead.
const SNAPSHOT_CHANNEL_CAPACITY: usize = 256;

/// Errors from scheduler lifecycle and control operations.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// `start` or `resume` was called while the tasks were running.
    #[error("scheduler is already running")]
    AlreadyRunning,

    /// `pause` was called while the tasks were stopped.
    #[error("scheduler is not running")]
    NotRunning,

    /// A scheduled task panicked or was aborted.
    #[error("scheduler task failed: {source}")]
    Join {
        /// The underlying join error.
        #[from]
        source: tokio::task::JoinError,
    },

    /// A control operation was rejected by the yard.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },
}

/// Timer periods for the two tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Minimum spacing between applied animation ticks.
    pub tick_interval: Duration,
    /// Spacing of the redraw signal the frame gate filters.
    pub redraw_interval: Duration,
    /// Spacing of stock cycles.
    pub stock_interval: Duration,
}

impl SchedulerConfig {
    /// Take the periods from the loaded configuration.
    pub const fn from_config(config: &SimulationConfig) -> Self {
        Self {
            tick_interval: config.animation.tick_interval(),
            redraw_interval: config.animation.redraw_interval(),
            stock_interval: config.stock.interval(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

/// Handles of the running tasks and their shared cancel signal.
struct RunningTasks {
    cancel: watch::Sender<bool>,
    animation: JoinHandle<()>,
    stock: JoinHandle<()>,
}

/// Drives [`YardState`] from two timers with pause, resume and teardown.
pub struct YardScheduler {
    state: Arc<Mutex<YardState>>,
    config: SchedulerConfig,
    snapshots: broadcast::Sender<YardSnapshot>,
    tick_limit: Option<u64>,
    tasks: Option<RunningTasks>,
}

impl YardScheduler {
    /// Wrap a yard state. No timers run until [`start`](Self::start).
    pub fn new(state: YardState, config: SchedulerConfig) -> Self {
        let (snapshots, _) = broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY);
        Self {
            state: Arc::new(Mutex::new(state)),
            config,
            snapshots,
            tick_limit: None,
            tasks: None,
        }
    }

    /// Subscribe to published snapshots.
    pub fn subscribe(&self) -> broadcast::Receiver<YardSnapshot> {
        self.snapshots.subscribe()
    }

    /// Whether the timers are currently running.
    pub const fn is_running(&self) -> bool {
        self.tasks.is_some()
    }

    /// The timer periods in use.
    pub const fn config(&self) -> SchedulerConfig {
        self.config
    }

    /// Last tick number the animation task may apply, or `None` for no limit.
    ///
    /// Takes effect at the next [`start`](Self::start) or
    /// [`resume`](Self::resume).
    pub const fn set_tick_limit(&mut self, limit: Option<u64>) {
        self.tick_limit = limit;
    }

    /// The tick limit used by the next start or resume.
    pub const fn tick_limit(&self) -> Option<u64> {
        self.tick_limit
    }

    /// Render the current state.
    pub async fn snapshot(&self) -> YardSnapshot {
        self.state.lock().await.snapshot()
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Start both timers.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::AlreadyRunning`] if they are running.
    pub async fn start(&mut self) -> Result<(), SchedulerError> {
        self.spawn_tasks().await?;
        info!(
            tick_interval_ms = self.config.tick_interval.as_millis(),
            redraw_interval_ms = self.config.redraw_interval.as_millis(),
            stock_interval_ms = self.config.stock_interval.as_millis(),
            "Scheduler started"
        );
        Ok(())
    }

    /// Cancel both timers and wait for their tasks to finish.
    ///
    /// After this returns, no tick or stock cycle touches the state.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::NotRunning`] if nothing is running, or
    /// [`SchedulerError::Join`] if a task panicked.
    pub async fn pause(&mut self) -> Result<(), SchedulerError> {
        let tasks = self.tasks.take().ok_or(SchedulerError::NotRunning)?;
        tasks.cancel.send_replace(true);
        let animation = tasks.animation.await;
        let stock = tasks.stock.await;

        // The tasks are gone either way, so the flag is cleared before a
        // join failure is reported.
        let snapshot = {
            let mut state = self.state.lock().await;
            state.set_running(false);
            state.snapshot()
        };
        info!(tick = snapshot.tick, "Scheduler paused");
        self.publish(snapshot);
        animation?;
        stock?;
        Ok(())
    }

    /// Restart both timers from now. Missed periods are not replayed.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::AlreadyRunning`] if they are running.
    pub async fn resume(&mut self) -> Result<(), SchedulerError> {
        self.spawn_tasks().await?;
        info!("Scheduler resumed");
        Ok(())
    }

    /// Stop the timers if running and consume the scheduler.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Join`] if a task panicked.
    pub async fn shutdown(mut self) -> Result<(), SchedulerError> {
        if self.is_running() {
            self.pause().await?;
        }
        info!("Scheduler shut down");
        Ok(())
    }

    async fn spawn_tasks(&mut self) -> Result<(), SchedulerError> {
        if self.tasks.is_some() {
            return Err(SchedulerError::AlreadyRunning);
        }
        let snapshot = {
            let mut state = self.state.lock().await;
            state.set_running(true);
            state.snapshot()
        };
        self.publish(snapshot);

        let (cancel, cancel_rx) = watch::channel(false);
        let animation = tokio::spawn(animation_loop(
            Arc::clone(&self.state),
            self.snapshots.clone(),
            self.config,
            self.tick_limit,
            cancel_rx.clone(),
        ));
        let stock = tokio::spawn(stock_loop(
            Arc::clone(&self.state),
            self.snapshots.clone(),
            self.config.stock_interval,
            cancel_rx,
        ));
        self.tasks = Some(RunningTasks {
            cancel,
            animation,
            stock,
        });
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Control operations
    // -----------------------------------------------------------------------

    /// Clamp-add `delta` to a zone's stock and return the new stock.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::World`] wrapping
    /// [`WorldError::ZoneNotFound`] or [`WorldError::ZoneLocked`].
    pub async fn adjust_stock(&self, zone: &ZoneId, delta: i64) -> Result<u32, SchedulerError> {
        let (stock, snapshot) = {
            let mut state = self.state.lock().await;
            let stock = state.adjust_stock(zone, delta)?;
            (stock, state.snapshot())
        };
        self.publish(snapshot);
        Ok(stock)
    }

    /// Select a zone in the UI.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::World`] if the zone does not exist.
    pub async fn select_zone(&self, zone: ZoneId) -> Result<(), SchedulerError> {
        let snapshot = {
            let mut state = self.state.lock().await;
            state.select_zone(zone)?;
            state.snapshot()
        };
        self.publish(snapshot);
        Ok(())
    }

    /// Clear the UI selection.
    pub async fn clear_selection(&self) {
        self.update(YardState::clear_selection).await;
    }

    /// Toggle path drawing.
    pub async fn set_show_paths(&self, show: bool) {
        self.update(|state| state.set_show_paths(show)).await;
    }

    /// Toggle loader drawing.
    pub async fn set_show_loaders(&self, show: bool) {
        self.update(|state| state.set_show_loaders(show)).await;
    }

    async fn update(&self, apply: impl FnOnce(&mut YardState)) {
        let snapshot = {
            let mut state = self.state.lock().await;
            apply(&mut state);
            state.snapshot()
        };
        self.publish(snapshot);
    }

    /// Send a snapshot and return how many subscribers received it.
    fn publish(&self, snapshot: YardSnapshot) -> usize {
        self.snapshots.send(snapshot).unwrap_or(0)
    }
}

impl Drop for YardScheduler {
    fn drop(&mut self) {
        if let Some(tasks) = self.tasks.take() {
            tasks.animation.abort();
            tasks.stock.abort();
        }
    }
}

impl std::fmt::Debug for YardScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YardScheduler")
            .field("config", &self.config)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Task bodies
// ---------------------------------------------------------------------------

async fn animation_loop(
    state: Arc<Mutex<YardState>>,
    snapshots: broadcast::Sender<YardSnapshot>,
    config: SchedulerConfig,
    tick_limit: Option<u64>,
    mut cancel: watch::Receiver<bool>,
) {
    let mut redraw = tokio::time::interval(config.redraw_interval);
    redraw.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut gate = FrameGate::new(config.tick_interval);
    debug!(
        tick_interval_ms = gate.interval().as_millis(),
        tick_limit, "Animation task started"
    );

    loop {
        tokio::select! {
            biased;
            _ = cancel.changed() => break,
            now = redraw.tick() => {
                if !gate.admit(now) {
                    continue;
                }
                let snapshot = {
                    let mut state = state.lock().await;
                    if tick_limit.is_some_and(|limit| state.tick() >= limit) {
                        continue;
                    }
                    let _ = run_animation_tick(&mut state);
                    state.snapshot()
                };
                snapshots.send(snapshot).unwrap_or(0);
            }
        }
    }
    debug!("Animation task stopped");
}

async fn stock_loop(
    state: Arc<Mutex<YardState>>,
    snapshots: broadcast::Sender<YardSnapshot>,
    period: Duration,
    mut cancel: watch::Receiver<bool>,
) {
    let mut timer = tokio::time::interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; the first cycle is one period out.
    timer.tick().await;

    loop {
        tokio::select! {
            biased;
            _ = cancel.changed() => break,
            _ = timer.tick() => {
                let snapshot = {
                    let mut state = state.lock().await;
                    let _ = run_stock_cycle(&mut state);
                    state.snapshot()
                };
                snapshots.send(snapshot).unwrap_or(0);
            }
        }
    }
    debug!("Stock task stopped");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use timberyard_world::{StockDelta, create_starting_yard};
    use tokio::time::sleep;

    use super::*;

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

    #[tokio::test(start_paused = true)]
    async fn ticks_run_at_about_twenty_hertz() {
        let mut scheduler = make_scheduler();
        scheduler.start().await.unwrap();
        sleep(Duration::from_millis(1_000)).await;
        let tick = scheduler.snapshot().await.tick;
        assert!((20..=21).contains(&tick), "tick = {tick}");
        scheduler.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn pause_halts_everything() {
        let mut scheduler = make_scheduler();
        scheduler.start().await.unwrap();
        sleep(Duration::from_millis(3_500)).await;
        scheduler.pause().await.unwrap();

        let paused = scheduler.snapshot().await;
        assert!(!paused.running);
        assert_eq!(paused.stock_cycles, 1);

        sleep(Duration::from_secs(10)).await;
        let later = scheduler.snapshot().await;
        assert_eq!(later.tick, paused.tick);
        assert_eq!(later.stock_cycles, paused.stock_cycles);
        assert_eq!(later.loaders, paused.loaders);
    }

    #[tokio::test(start_paused = true)]
    async fn resume_does_not_catch_up() {
        let mut scheduler = make_scheduler();
        scheduler.start().await.unwrap();
        sleep(Duration::from_millis(200)).await;
        scheduler.pause().await.unwrap();
        let before = scheduler.snapshot().await.tick;

        sleep(Duration::from_secs(60)).await;
        scheduler.resume().await.unwrap();
        sleep(Duration::from_millis(120)).await;
        let after = scheduler.snapshot().await;
        assert!(after.running);
        // One tick on resume, then one per 50 ms.
        let gained = after.tick.saturating_sub(before);
        assert!((1..=4).contains(&gained), "gained = {gained}");
        assert_eq!(after.stock_cycles, 0);
        scheduler.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn first_stock_cycle_waits_one_period() {
        let mut scheduler = make_scheduler();
        scheduler.start().await.unwrap();
        sleep(Duration::from_millis(2_900)).await;
        assert_eq!(scheduler.snapshot().await.stock_cycles, 0);
        sleep(Duration::from_millis(200)).await;
        assert_eq!(scheduler.snapshot().await.stock_cycles, 1);
        scheduler.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_a_running_scheduler_stops_both_timers() {
        let mut scheduler = make_scheduler();
        let mut rx = scheduler.subscribe();
        scheduler.start().await.unwrap();
        sleep(Duration::from_millis(200)).await;
        let at_drop = scheduler.snapshot().await.tick;
        drop(scheduler);

        // Long enough for several stock periods and hundreds of redraws.
        sleep(Duration::from_secs(10)).await;
        let mut last_tick = 0;
        let closed = loop {
            match rx.recv().await {
                Ok(snapshot) => {
                    assert_eq!(snapshot.stock_cycles, 0);
                    last_tick = snapshot.tick;
                }
                Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => break true,
            }
        };
        assert!(closed);
        assert_eq!(last_tick, at_drop);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_task_still_clears_running_flag() {
        let mut scheduler = make_scheduler();
        scheduler.start().await.unwrap();
        sleep(Duration::from_millis(100)).await;
        scheduler.tasks.as_ref().unwrap().animation.abort();

        let result = scheduler.pause().await;
        assert!(matches!(result, Err(SchedulerError::Join { .. })));
        assert!(!scheduler.is_running());
        assert!(!scheduler.snapshot().await.running);
    }

    #[tokio::test(start_paused = true)]
    async fn tick_limit_caps_applied_ticks() {
        let mut scheduler = make_scheduler();
        scheduler.set_tick_limit(Some(5));
        scheduler.start().await.unwrap();
        sleep(Duration::from_secs(1)).await;
        assert_eq!(scheduler.snapshot().await.tick, 5);
        scheduler.pause().await.unwrap();

        scheduler.set_tick_limit(None);
        scheduler.resume().await.unwrap();
        sleep(Duration::from_millis(120)).await;
        assert!(scheduler.snapshot().await.tick > 5);
        scheduler.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn lifecycle_misuse_is_reported() {
        let mut scheduler = make_scheduler();
        assert!(matches!(
            scheduler.pause().await,
            Err(SchedulerError::NotRunning)
        ));
        scheduler.start().await.unwrap();
        assert!(matches!(
            scheduler.start().await,
            Err(SchedulerError::AlreadyRunning)
        ));
        assert!(matches!(
            scheduler.resume().await,
            Err(SchedulerError::AlreadyRunning)
        ));
        scheduler.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_are_broadcast() {
        let mut scheduler = make_scheduler();
        let mut rx = scheduler.subscribe();
        scheduler.start().await.unwrap();

        // The start snapshot comes first, then the first tick.
        let started = rx.recv().await.unwrap();
        assert!(started.running);
        assert_eq!(started.tick, 0);
        let first = rx.recv().await.unwrap();
        assert_eq!(first.tick, 1);
        scheduler.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn manual_adjustment_goes_through_while_paused() {
        let scheduler = make_scheduler();
        let zone = ZoneId::from("log-zone-pine-1");
        let snapshot = scheduler.snapshot().await;
        let view = snapshot.zones.get(&zone).unwrap();

        scheduler.select_zone(zone.clone()).await.unwrap();
        let stock = scheduler
            .adjust_stock(&zone, i64::from(view.max_capacity))
            .await
            .unwrap();
        assert_eq!(stock, view.max_capacity);

        let after = scheduler.snapshot().await;
        assert_eq!(after.selected_zone.unwrap().current_stock, view.max_capacity);
    }

    #[tokio::test(start_paused = true)]
    async fn locked_zone_adjustment_is_rejected() {
        let scheduler = make_scheduler();
        let result = scheduler.adjust_stock(&ZoneId::from("stem-zone"), 5).await;
        assert!(matches!(
            result,
            Err(SchedulerError::World {
                source: WorldError::ZoneLocked(_)
            })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn display_toggles_are_published() {
        let scheduler = make_scheduler();
        let mut rx = scheduler.subscribe();
        scheduler.set_show_paths(false).await;
        scheduler.set_show_loaders(false).await;
        scheduler.clear_selection().await;

        let first = rx.recv().await.unwrap();
        assert!(!first.display.show_paths);
        assert!(first.display.show_loaders);
        let second = rx.recv().await.unwrap();
        assert!(!second.display.show_loaders);
    }
}
