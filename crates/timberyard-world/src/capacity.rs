//! Capacity-to-percent and capacity-to-color mappings for zone fill levels.
//!
//! All comparisons use exact integer arithmetic so the tier boundaries
//! behave precisely at 70% and 90%:
//!
//! - `ratio > 0.90` is `10 * current > 9 * max`
//! - `ratio >= 0.70` is `10 * current >= 7 * max`

use timberyard_types::CapacityTier;

/// Classify a fill level into a [`CapacityTier`].
///
/// `max == 0` marks a zone that is not stock-tracked and yields
/// [`CapacityTier::Neutral`].
pub fn capacity_tier(current: u32, max: u32) -> CapacityTier {
    if max == 0 {
        return CapacityTier::Neutral;
    }
    let current = u64::from(current);
    let max = u64::from(max);
    if current.saturating_mul(10) > max.saturating_mul(9) {
        CapacityTier::Critical
    } else if current.saturating_mul(10) >= max.saturating_mul(7) {
        CapacityTier::Warning
    } else {
        CapacityTier::Normal
    }
}

/// Display color for a fill level.
pub fn capacity_color(current: u32, max: u32) -> &'static str {
    capacity_tier(current, max).color()
}

/// Fill percentage rounded to the nearest integer, halves rounding up.
///
/// Returns 0 when `max == 0`.
pub fn capacity_pct(current: u32, max: u32) -> u32 {
    rounded_pct(u64::from(current), u64::from(max))
}

/// `part / whole * 100` rounded half away from zero, 0 when `whole == 0`.
///
/// Computed as `(200 * part + whole) / (2 * whole)` to stay in integers.
pub fn rounded_pct(part: u64, whole: u64) -> u32 {
    let Some(denominator) = whole.checked_mul(2).filter(|d| *d > 0) else {
        return 0;
    };
    let numerator = part.saturating_mul(200).saturating_add(whole);
    let pct = numerator.checked_div(denominator).unwrap_or(0);
    u32::try_from(pct).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_neutral() {
        assert_eq!(capacity_tier(0, 0), CapacityTier::Neutral);
        assert_eq!(capacity_pct(0, 0), 0);
        assert_eq!(capacity_color(0, 0), "#6b7280");
    }

    #[test]
    fn seventy_percent_is_warning() {
        assert_eq!(capacity_pct(70, 100), 70);
        assert_eq!(capacity_tier(70, 100), CapacityTier::Warning);
    }

    #[test]
    fn ninety_percent_is_still_warning() {
        assert_eq!(capacity_pct(90, 100), 90);
        assert_eq!(capacity_tier(90, 100), CapacityTier::Warning);
    }

    #[test]
    fn above_ninety_percent_is_critical() {
        assert_eq!(capacity_tier(91, 100), CapacityTier::Critical);
        assert_eq!(capacity_color(91, 100), "#dc2626");
    }

    #[test]
    fn below_seventy_percent_is_normal() {
        assert_eq!(capacity_tier(69, 100), CapacityTier::Normal);
        assert_eq!(capacity_tier(0, 100), CapacityTier::Normal);
        assert_eq!(capacity_color(10, 100), "#16a34a");
    }

    #[test]
    fn boundaries_hold_for_non_decimal_capacities() {
        // 56 / 80 = 0.70 exactly, 72 / 80 = 0.90 exactly.
        assert_eq!(capacity_tier(56, 80), CapacityTier::Warning);
        assert_eq!(capacity_tier(55, 80), CapacityTier::Normal);
        assert_eq!(capacity_tier(72, 80), CapacityTier::Warning);
        assert_eq!(capacity_tier(73, 80), CapacityTier::Critical);
    }

    #[test]
    fn percent_rounds_half_up() {
        // 1/8 = 12.5% -> 13, 1/3 = 33.3% -> 33, 2/3 = 66.7% -> 67.
        assert_eq!(capacity_pct(1, 8), 13);
        assert_eq!(capacity_pct(1, 3), 33);
        assert_eq!(capacity_pct(2, 3), 67);
        assert_eq!(capacity_pct(175, 200), 88);
    }

    #[test]
    fn rounded_pct_handles_large_totals() {
        assert_eq!(rounded_pct(1_500, 2_000), 75);
        assert_eq!(rounded_pct(0, 0), 0);
    }
}
