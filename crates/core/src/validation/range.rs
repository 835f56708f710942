//! Inclusive numeric ranges used by the calculated-entity schemas.

use super::violation::{RangeBound, ViolationKind};

/// An inclusive `[min, max]` interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

/// Normalized scores: `[0.0, 1.0]`.
pub const UNIT_RANGE: Range = Range { min: 0.0, max: 1.0 };

/// Relative weights: `[0.0, 100.0]`.
pub const WEIGHT_RANGE: Range = Range {
    min: 0.0,
    max: 100.0,
};

impl Range {
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Check `value` against the range, returning the violation if it falls
    /// outside. NaN is outside every range and is reported against `min`.
    pub fn check(&self, value: f64) -> Option<ViolationKind> {
        if self.contains(value) {
            return None;
        }
        let bound = if value > self.max {
            RangeBound::Max(self.max)
        } else {
            RangeBound::Min(self.min)
        };
        Some(ViolationKind::RangeViolation {
            value,
            min: self.min,
            max: self.max,
            bound,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn accepts_boundary_values() {
        assert!(UNIT_RANGE.check(0.0).is_none());
        assert!(UNIT_RANGE.check(0.5).is_none());
        assert!(UNIT_RANGE.check(1.0).is_none());
        assert!(WEIGHT_RANGE.check(100.0).is_none());
    }

    #[test]
    fn rejects_below_zero() {
        assert_matches!(
            UNIT_RANGE.check(-0.01),
            Some(ViolationKind::RangeViolation {
                bound: RangeBound::Min(min),
                ..
            }) if min == 0.0
        );
    }

    #[test]
    fn rejects_above_max() {
        assert_matches!(
            WEIGHT_RANGE.check(133.0),
            Some(ViolationKind::RangeViolation {
                value,
                bound: RangeBound::Max(max),
                ..
            }) if value == 133.0 && max == 100.0
        );
        assert!(!UNIT_RANGE.contains(1.01));
    }

    #[test]
    fn rejects_nan() {
        assert!(!UNIT_RANGE.contains(f64::NAN));
        assert_matches!(
            UNIT_RANGE.check(f64::NAN),
            Some(ViolationKind::RangeViolation {
                bound: RangeBound::Min(_),
                ..
            })
        );
        assert!(WEIGHT_RANGE.check(f64::NAN).is_some());
    }
}
