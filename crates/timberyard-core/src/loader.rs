//! Loader state machine: one pure transition per loader per tick.
//!
//! [`step_loader`] reads a loader's prior state plus the static yard and
//! returns the loader's next state. Nothing is mutated in place, so a tick
//! over the whole fleet ([`advance_loaders`]) observes only prior-tick
//! state and loaders never influence each other.
//!
//! Per tick, a loader:
//!
//! 1. Resolves its path. An unknown path leaves it unchanged ([`StepOutcome::PathMissing`]).
//! 2. Stays put if the path's allow-list excludes it ([`StepOutcome::Blocked`]).
//! 3. Otherwise adds `speed` to `progress`.
//! 4. On reaching the end of the path, resets to `0.0` and either switches
//!    to the next path of its cycle (applying the [`TransitionTable`]) or,
//!    without a cycle, reloads in place with a random load.
//! 5. Leaves the `loading` dwell once progress passes [`LOADING_DWELL_PROGRESS`].
//!
//! Overshoot past the end of a path is discarded, not carried into the
//! next one.

use rand::Rng;
use timberyard_types::{GeoPoint, Loader, LoaderStatus, TransitionEffect};
use timberyard_world::{TransitionTable, YardMap, interpolate_along_path};
use tracing::{debug, info};

/// Progress a loader must pass after a reload before it reads as moving again.
pub const LOADING_DWELL_PROGRESS: f64 = 0.05;

/// What happened to a loader during one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// Progress advanced along the same path.
    Advanced,
    /// The path was completed and the loader restarted at progress 0.
    Completed,
    /// The path's allow-list excludes this loader; nothing changed.
    Blocked,
    /// The loader's path id does not resolve; nothing changed.
    PathMissing,
}

/// Result of stepping one loader.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderStep {
    /// The loader's next state.
    pub loader: Loader,
    /// Interpolated position on its (possibly new) path, if that path resolves.
    pub position: Option<GeoPoint>,
    /// What the step did.
    pub outcome: StepOutcome,
}

/// Compute a loader's next state from its prior state.
pub fn step_loader(
    loader: &Loader,
    map: &YardMap,
    transitions: &TransitionTable,
    rng: &mut impl Rng,
) -> LoaderStep {
    let Some(path) = map.path(&loader.path_id) else {
        return LoaderStep {
            loader: loader.clone(),
            position: None,
            outcome: StepOutcome::PathMissing,
        };
    };

    if !path.permits(&loader.id) {
        return LoaderStep {
            loader: loader.clone(),
            position: Some(interpolate_along_path(&path.points, loader.progress)),
            outcome: StepOutcome::Blocked,
        };
    }

    let mut next = loader.clone();
    let advanced = loader.progress + loader.speed;

    let outcome = if advanced >= 1.0 {
        next.progress = 0.0;
        if loader.is_cyclic() {
            switch_to_next_path(&mut next, transitions);
        } else {
            reload_in_place(&mut next, rng);
        }
        info!(
            loader = %next.id,
            path = %next.path_id,
            carrying = next.carrying_logs,
            status = ?next.status,
            "Loader completed path"
        );
        StepOutcome::Completed
    } else {
        next.progress = advanced;
        if loader.status == LoaderStatus::Loading && advanced > LOADING_DWELL_PROGRESS {
            next.status = LoaderStatus::Moving;
        }
        StepOutcome::Advanced
    };

    let position = map
        .path(&next.path_id)
        .map(|p| interpolate_along_path(&p.points, next.progress));

    LoaderStep {
        loader: next,
        position,
        outcome,
    }
}

/// Step every loader against the same prior-tick yard.
pub fn advance_loaders(
    loaders: &[Loader],
    map: &YardMap,
    transitions: &TransitionTable,
    rng: &mut impl Rng,
) -> Vec<LoaderStep> {
    let steps: Vec<LoaderStep> = loaders
        .iter()
        .map(|loader| step_loader(loader, map, transitions, rng))
        .collect();
    debug!(loaders = steps.len(), "Loaders advanced");
    steps
}

/// Move a cyclic loader onto the next path of its sequence.
///
/// A loader whose current path is absent from its own sequence restarts at
/// the first entry.
fn switch_to_next_path(loader: &mut Loader, transitions: &TransitionTable) {
    let len = loader.path_sequence.len();
    let next_index = loader
        .path_sequence
        .iter()
        .position(|id| *id == loader.path_id)
        .and_then(|i| i.saturating_add(1).checked_rem(len))
        .unwrap_or(0);

    if let Some(next_path) = loader.path_sequence.get(next_index) {
        loader.path_id = next_path.clone();
    }

    match transitions.effect_for(&loader.path_id) {
        Some(TransitionEffect::Fill) => loader.carrying_logs = loader.max_load,
        Some(TransitionEffect::Empty) => loader.carrying_logs = 0,
        None => {}
    }
    loader.status = LoaderStatus::Moving;
}

/// Restart a shuttle loader on its own path with a fresh random load.
fn reload_in_place(loader: &mut Loader, rng: &mut impl Rng) {
    loader.status = LoaderStatus::Loading;
    loader.carrying_logs = if loader.max_load == 0 {
        0
    } else {
        rng.random_range(1..=loader.max_load)
    };
}
