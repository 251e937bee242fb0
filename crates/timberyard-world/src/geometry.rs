//! Planar polyline geometry for placing loaders on their paths.
//!
//! Progress along a path is measured as a fraction of the polyline's total
//! Euclidean length. Coordinates are treated as flat: no projection or
//! great-circle correction is applied, which is accurate enough at yard
//! scale and keeps the result exactly reproducible.

use timberyard_types::GeoPoint;

/// Where a progress value lands on a polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathLocation {
    /// Index of the segment containing the point (`points[segment]` to
    /// `points[segment + 1]`).
    pub segment: usize,
    /// Arc length travelled from the first point.
    pub distance: f64,
    /// The interpolated point.
    pub point: GeoPoint,
}

/// Total Euclidean length of a polyline. Zero for fewer than two points.
pub fn path_length(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| match pair {
            [a, b] => a.distance_to(*b),
            _ => 0.0,
        })
        .sum()
}

/// Locate the point at progress `t` along a polyline.
///
/// Rules, applied in order:
/// 1. Empty input has no location (`None`).
/// 2. A single point is returned regardless of `t`.
/// 3. `t <= 0` yields the first point, `t >= 1` the last point.
/// 4. A polyline whose points all coincide has no location (`None`).
/// 5. Otherwise the segment containing `t * length` is found by linear scan
///    and the point is interpolated within it.
pub fn locate_along_path(points: &[GeoPoint], t: f64) -> Option<PathLocation> {
    let first = *points.first()?;
    let last = *points.last()?;

    if points.len() == 1 {
        return Some(PathLocation {
            segment: 0,
            distance: 0.0,
            point: first,
        });
    }

    let total = path_length(points);
    let last_segment = points.len().saturating_sub(2);

    if t <= 0.0 {
        return Some(PathLocation {
            segment: 0,
            distance: 0.0,
            point: first,
        });
    }
    if t >= 1.0 {
        return Some(PathLocation {
            segment: last_segment,
            distance: total,
            point: last,
        });
    }
    if total <= 0.0 || !total.is_finite() {
        return None;
    }

    let target = t * total;
    let mut accumulated = 0.0_f64;
    for (segment, pair) in points.windows(2).enumerate() {
        let [a, b] = pair else { continue };
        let len = a.distance_to(*b);
        if accumulated + len >= target {
            // Zero-length segments cannot contain a target strictly past
            // `accumulated`, so `len > 0` here except for the first segment.
            let seg_t = if len > 0.0 {
                (target - accumulated) / len
            } else {
                0.0
            };
            return Some(PathLocation {
                segment,
                distance: target,
                point: a.lerp(*b, seg_t),
            });
        }
        accumulated += len;
    }

    // Rounding left the target a hair past the accumulated length.
    Some(PathLocation {
        segment: last_segment,
        distance: total,
        point: last,
    })
}

/// Interpolate the position at progress `t` along a polyline.
///
/// Returns [`GeoPoint::ZERO`] for empty or zero-length input. See
/// [`locate_along_path`] for the exact rules.
pub fn interpolate_along_path(points: &[GeoPoint], t: f64) -> GeoPoint {
    locate_along_path(points, t).map_or(GeoPoint::ZERO, |loc| loc.point)
}
