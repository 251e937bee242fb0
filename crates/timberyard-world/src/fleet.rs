//! Loader fleet validation.
//!
//! The state machine trusts its inputs: it never checks that a speed is
//! positive or that a load fits the loader. This module closes that gap at
//! the boundary, when the fleet is first handed to the simulation. Path
//! references are deliberately not checked here; a loader on an unknown
//! path simply stalls.

use std::collections::BTreeSet;

use timberyard_types::Loader;

use crate::error::WorldError;

/// Check every loader's numeric preconditions and id uniqueness.
///
/// # Errors
///
/// Returns [`WorldError::DuplicateLoader`] for a repeated id, or
/// [`WorldError::InvalidLoader`] describing the first violated precondition.
pub fn validate_fleet(loaders: &[Loader]) -> Result<(), WorldError> {
    let mut seen = BTreeSet::new();
    for loader in loaders {
        if !seen.insert(&loader.id) {
            return Err(WorldError::DuplicateLoader(loader.id.clone()));
        }
        validate_loader(loader)?;
    }
    Ok(())
}

/// Check a single loader's numeric preconditions.
///
/// # Errors
///
/// Returns [`WorldError::InvalidLoader`] describing the violation.
pub fn validate_loader(loader: &Loader) -> Result<(), WorldError> {
    let invalid = |reason: String| WorldError::InvalidLoader {
        loader: loader.id.clone(),
        reason,
    };

    if !loader.speed.is_finite() || loader.speed <= 0.0 {
        return Err(invalid(format!(
            "speed must be positive and finite, got {}",
            loader.speed
        )));
    }
    if !(0.0..=1.0).contains(&loader.progress) {
        return Err(invalid(format!(
            "progress must lie in 0..=1, got {}",
            loader.progress
        )));
    }
    if loader.max_load == 0 {
        return Err(invalid("max_load must be at least 1".to_owned()));
    }
    if loader.carrying_logs > loader.max_load {
        return Err(invalid(format!(
            "carrying {} logs exceeds max_load {}",
            loader.carrying_logs, loader.max_load
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use timberyard_types::{LoaderStatus, PathId};

    use super::*;

    fn make_loader(id: &str) -> Loader {
        Loader {
            id: id.into(),
            name: id.to_owned(),
            path_id: PathId::from("p"),
            progress: 0.3,
            speed: 0.007,
            status: LoaderStatus::Moving,
            carrying_logs: 8,
            max_load: 10,
            color: String::from("#34d399"),
            path_sequence: Vec::new(),
            can_access_stem_zone: false,
        }
    }

    #[test]
    fn well_formed_fleet_passes() {
        assert!(validate_fleet(&[make_loader("a"), make_loader("b")]).is_ok());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = validate_fleet(&[make_loader("a"), make_loader("a")]);
        assert!(matches!(result, Err(WorldError::DuplicateLoader(_))));
    }

    #[test]
    fn non_positive_speed_is_rejected() {
        let mut loader = make_loader("a");
        loader.speed = 0.0;
        assert!(validate_loader(&loader).is_err());
        loader.speed = -0.1;
        assert!(validate_loader(&loader).is_err());
        loader.speed = f64::NAN;
        assert!(validate_loader(&loader).is_err());
    }

    #[test]
    fn out_of_range_progress_is_rejected() {
        let mut loader = make_loader("a");
        loader.progress = 1.2;
        assert!(validate_loader(&loader).is_err());
        loader.progress = 1.0;
        assert!(validate_loader(&loader).is_ok());
    }

    #[test]
    fn overloaded_loader_is_rejected() {
        let mut loader = make_loader("a");
        loader.carrying_logs = 11;
        assert!(validate_loader(&loader).is_err());
        loader.max_load = 0;
        loader.carrying_logs = 0;
        assert!(validate_loader(&loader).is_err());
    }
}
