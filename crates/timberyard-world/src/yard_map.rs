//! The yard: inventory zones and one-way transport paths.
//!
//! The [`YardMap`] is the static backbone of the simulation. Zones and paths
//! are inserted once when the yard is built and never removed. Only zone
//! stock mutates afterwards, either through the stock simulator or through
//! [`YardMap::adjust_stock`].

use std::collections::BTreeMap;

use timberyard_types::{Loader, LoaderStatus, Path, PathId, YardStats, Zone, ZoneId, ZoneView};
use tracing::info;

use crate::capacity::{capacity_pct, capacity_tier, rounded_pct};
use crate::error::WorldError;
use crate::stock::clamp_stock;

/// All zones and paths of the yard.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct YardMap {
    /// All zones indexed by their identifier.
    zones: BTreeMap<ZoneId, Zone>,
    /// All paths indexed by their identifier.
    paths: BTreeMap<PathId, Path>,
}

impl YardMap {
    /// Build a yard from zone and path definitions.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`add_zone`](Self::add_zone) or
    /// [`add_path`](Self::add_path).
    pub fn new(zones: Vec<Zone>, paths: Vec<Path>) -> Result<Self, WorldError> {
        let mut map = Self::default();
        for zone in zones {
            map.add_zone(zone)?;
        }
        for path in paths {
            map.add_path(path)?;
        }
        Ok(map)
    }

    // -------------------------------------------------------------------
    // Zone operations
    // -------------------------------------------------------------------

    /// Add a zone to the yard.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateZone`] if the id is taken, or
    /// [`WorldError::StockExceedsCapacity`] if the stock is above capacity.
    pub fn add_zone(&mut self, zone: Zone) -> Result<(), WorldError> {
        if self.zones.contains_key(&zone.id) {
            return Err(WorldError::DuplicateZone(zone.id));
        }
        if zone.current_stock > zone.max_capacity {
            return Err(WorldError::StockExceedsCapacity {
                zone: zone.id,
                stock: zone.current_stock,
                capacity: zone.max_capacity,
            });
        }
        self.zones.insert(zone.id.clone(), zone);
        Ok(())
    }

    /// Get a zone by id.
    pub fn zone(&self, id: &ZoneId) -> Option<&Zone> {
        self.zones.get(id)
    }

    /// Return the number of zones.
    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    /// Iterate over all zones in id order.
    pub fn zones(&self) -> impl Iterator<Item = (&ZoneId, &Zone)> {
        self.zones.iter()
    }

    /// Iterate over all zones mutably. Restricted to this crate so the
    /// stock invariant can only be touched through clamping code.
    pub(crate) fn zones_mut(&mut self) -> impl Iterator<Item = (&ZoneId, &mut Zone)> {
        self.zones.iter_mut()
    }

    /// Clamp-add `delta` to a zone's stock and return the new stock.
    ///
    /// Uses the same clamping rule as the stock simulator.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ZoneNotFound`] for an unknown zone, or
    /// [`WorldError::ZoneLocked`] when the zone is locked.
    pub fn adjust_stock(&mut self, id: &ZoneId, delta: i64) -> Result<u32, WorldError> {
        let zone = self
            .zones
            .get_mut(id)
            .ok_or_else(|| WorldError::ZoneNotFound(id.clone()))?;
        if zone.locked {
            return Err(WorldError::ZoneLocked(id.clone()));
        }
        let before = zone.current_stock;
        zone.current_stock = clamp_stock(before, delta, zone.max_capacity);
        info!(
            zone = %id,
            delta,
            before,
            after = zone.current_stock,
            "Manual stock adjustment"
        );
        Ok(zone.current_stock)
    }

    // -------------------------------------------------------------------
    // Path operations
    // -------------------------------------------------------------------

    /// Add a path to the yard.
    ///
    /// Endpoint zone ids are descriptive and are not checked against the
    /// zone set.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicatePath`] if the id is taken, or
    /// [`WorldError::DegeneratePath`] if the path has fewer than two points.
    pub fn add_path(&mut self, path: Path) -> Result<(), WorldError> {
        if self.paths.contains_key(&path.id) {
            return Err(WorldError::DuplicatePath(path.id));
        }
        if path.points.len() < 2 {
            return Err(WorldError::DegeneratePath {
                points: path.points.len(),
                path: path.id,
            });
        }
        self.paths.insert(path.id.clone(), path);
        Ok(())
    }

    /// Get a path by id.
    pub fn path(&self, id: &PathId) -> Option<&Path> {
        self.paths.get(id)
    }

    /// Return the number of paths.
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Iterate over all paths in id order.
    pub fn paths(&self) -> impl Iterator<Item = (&PathId, &Path)> {
        self.paths.iter()
    }

    // -------------------------------------------------------------------
    // Views and statistics
    // -------------------------------------------------------------------

    /// Render view of a single zone.
    pub fn zone_view(&self, id: &ZoneId) -> Option<ZoneView> {
        self.zones.get(id).map(view_of)
    }

    /// Render views of every zone, keyed by id.
    pub fn zone_views(&self) -> BTreeMap<ZoneId, ZoneView> {
        self.zones
            .iter()
            .map(|(id, zone)| (id.clone(), view_of(zone)))
            .collect()
    }

    /// Aggregate statistics. Locked zones are excluded from every figure.
    pub fn stats(&self, loaders: &[Loader]) -> YardStats {
        let unlocked = || self.zones.values().filter(|z| !z.locked);

        let total_stock: u64 = unlocked().map(|z| u64::from(z.current_stock)).sum();
        let total_capacity: u64 = unlocked().map(|z| u64::from(z.max_capacity)).sum();
        let critical_zones = unlocked()
            .filter(|z| z.is_stock_tracked())
            .filter(|z| capacity_tier(z.current_stock, z.max_capacity).is_critical())
            .map(|z| z.id.clone())
            .collect();
        let moving = loaders
            .iter()
            .filter(|l| l.status == LoaderStatus::Moving)
            .count();

        YardStats {
            total_stock,
            total_capacity,
            utilization_pct: rounded_pct(total_stock, total_capacity),
            critical_zones,
            moving_loaders: u32::try_from(moving).unwrap_or(u32::MAX),
        }
    }
}

/// Build the render view of a zone.
fn view_of(zone: &Zone) -> ZoneView {
    let tier = capacity_tier(zone.current_stock, zone.max_capacity);
    ZoneView {
        id: zone.id.clone(),
        name: zone.name.clone(),
        zone_type: zone.zone_type,
        current_stock: zone.current_stock,
        max_capacity: zone.max_capacity,
        locked: zone.locked,
        fill_pct: capacity_pct(zone.current_stock, zone.max_capacity),
        tier,
        fill_color: tier.color().to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use timberyard_types::{CapacityTier, GeoPoint, ZoneType};

    use super::*;

    fn make_zone(id: &str, stock: u32, max: u32, locked: bool) -> Zone {
        Zone {
            id: ZoneId::from(id),
            name: id.to_owned(),
            zone_type: ZoneType::Buffer,
            polygon: vec![
                GeoPoint::new(0.0, 0.0),
                GeoPoint::new(0.0, 1.0),
                GeoPoint::new(1.0, 1.0),
                GeoPoint::new(0.0, 0.0),
            ],
            log_type: None,
            max_capacity: max,
            current_stock: stock,
            color: String::from("#7c3aed"),
            locked,
            description: None,
        }
    }

    fn make_path(id: &str, n_points: usize) -> Path {
        let points = (0..n_points)
            .map(|i| GeoPoint::new(0.0, f64::from(u32::try_from(i).unwrap_or(0))))
            .collect();
        Path {
            id: PathId::from(id),
            name: id.to_owned(),
            points,
            from_zone_id: ZoneId::from("nowhere"),
            to_zone_id: ZoneId::from("elsewhere"),
            color: None,
            allowed_loader_ids: None,
        }
    }

    fn make_loader(id: &str, status: LoaderStatus) -> Loader {
        Loader {
            id: id.into(),
            name: id.to_owned(),
            path_id: PathId::from("p"),
            progress: 0.0,
            speed: 0.01,
            status,
            carrying_logs: 0,
            max_load: 10,
            color: String::from("#fbbf24"),
            path_sequence: Vec::new(),
            can_access_stem_zone: false,
        }
    }

    #[test]
    fn duplicate_zone_is_rejected() {
        let result = YardMap::new(
            vec![make_zone("a", 1, 10, false), make_zone("a", 2, 10, false)],
            Vec::new(),
        );
        assert!(matches!(result, Err(WorldError::DuplicateZone(_))));
    }

    #[test]
    fn overfull_zone_is_rejected() {
        let result = YardMap::new(vec![make_zone("a", 11, 10, false)], Vec::new());
        assert!(matches!(result, Err(WorldError::StockExceedsCapacity { .. })));
    }

    #[test]
    fn single_point_path_is_rejected() {
        let result = YardMap::new(Vec::new(), vec![make_path("p", 1)]);
        assert!(matches!(
            result,
            Err(WorldError::DegeneratePath { points: 1, .. })
        ));
    }

    #[test]
    fn path_endpoints_are_not_validated() {
        let map = YardMap::new(Vec::new(), vec![make_path("p", 2)]);
        assert!(map.is_ok_and(|m| m.path_count() == 1));
    }

    #[test]
    fn manual_adjustment_clamps_at_capacity() {
        let mut map = YardMap::new(vec![make_zone("z", 95, 100, false)], Vec::new())
            .unwrap_or_default();
        let after = map.adjust_stock(&ZoneId::from("z"), 10);
        assert_eq!(after.ok(), Some(100));
    }

    #[test]
    fn manual_adjustment_clamps_at_zero() {
        let mut map = YardMap::new(vec![make_zone("z", 3, 100, false)], Vec::new())
            .unwrap_or_default();
        let after = map.adjust_stock(&ZoneId::from("z"), -10);
        assert_eq!(after.ok(), Some(0));
    }

    #[test]
    fn manual_adjustment_rejects_locked_and_unknown_zones() {
        let mut map = YardMap::new(vec![make_zone("locked", 320, 500, true)], Vec::new())
            .unwrap_or_default();
        assert!(matches!(
            map.adjust_stock(&ZoneId::from("locked"), 5),
            Err(WorldError::ZoneLocked(_))
        ));
        assert!(matches!(
            map.adjust_stock(&ZoneId::from("ghost"), 5),
            Err(WorldError::ZoneNotFound(_))
        ));
        assert_eq!(
            map.zone(&ZoneId::from("locked")).map(|z| z.current_stock),
            Some(320)
        );
    }

    #[test]
    fn zone_view_derives_capacity_fields() {
        let map = YardMap::new(vec![make_zone("z", 72, 80, false)], Vec::new())
            .unwrap_or_default();
        let view = map.zone_view(&ZoneId::from("z"));
        assert!(view.is_some());
        if let Some(view) = view {
            assert_eq!(view.fill_pct, 90);
            assert_eq!(view.tier, CapacityTier::Warning);
            assert_eq!(view.fill_color, "#f97316");
        }
    }

    #[test]
    fn stats_exclude_locked_zones() {
        let map = YardMap::new(
            vec![
                make_zone("a", 50, 100, false),
                make_zone("b", 95, 100, false),
                make_zone("locked", 320, 500, true),
                make_zone("untracked", 0, 0, false),
            ],
            Vec::new(),
        )
        .unwrap_or_default();
        let loaders = vec![
            make_loader("l1", LoaderStatus::Moving),
            make_loader("l2", LoaderStatus::Loading),
            make_loader("l3", LoaderStatus::Moving),
        ];
        let stats = map.stats(&loaders);
        assert_eq!(stats.total_stock, 145);
        assert_eq!(stats.total_capacity, 200);
        assert_eq!(stats.utilization_pct, 73);
        assert_eq!(stats.critical_zones, vec![ZoneId::from("b")]);
        assert_eq!(stats.moving_loaders, 2);
    }

    #[test]
    fn stats_on_empty_yard_are_zero() {
        let stats = YardMap::default().stats(&[]);
        assert_eq!(stats, YardStats::default());
    }
}
