//! Percentage allocation across the fixed asset-class set.

use serde::{Deserialize, Serialize};

use crate::model::AssetClass;

/// Tolerance for the sum-to-100 invariant on stored table entries.
pub const SUM_EPSILON: f64 = 1e-6;

/// A percentage split across all asset classes.
///
/// Stored densely, indexed by [`AssetClass::index`]. Every transformation in
/// the engine (tilt, assembly) takes a vector by reference and returns a new
/// one; nothing mutates an allocation after it has been handed out.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AllocationVector {
    percents: [f64; AssetClass::COUNT],
}

impl AllocationVector {
    /// Build from `(class, percent)` pairs. Unlisted classes get 0%.
    #[must_use]
    pub fn from_pairs(pairs: &[(AssetClass, f64)]) -> Self {
        let mut percents = [0.0; AssetClass::COUNT];
        for (class, pct) in pairs {
            percents[class.index()] = *pct;
        }
        Self { percents }
    }

    /// Percentage allocated to `class`.
    #[inline]
    #[must_use]
    pub fn get(&self, class: AssetClass) -> f64 {
        self.percents[class.index()]
    }

    /// Set the percentage for `class`.
    pub fn set(&mut self, class: AssetClass, percent: f64) {
        self.percents[class.index()] = percent;
    }

    /// Sum of all class percentages.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.percents.iter().sum()
    }

    /// Whether the vector sums to 100 within `epsilon`.
    #[must_use]
    pub fn is_normalized(&self, epsilon: f64) -> bool {
        (self.sum() - 100.0).abs() <= epsilon
    }

    /// Iterate `(class, percent)` in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (AssetClass, f64)> + '_ {
        AssetClass::ALL.iter().map(|c| (*c, self.percents[c.index()]))
    }

    /// The class carrying the largest weight.
    ///
    /// Ties resolve to the earlier class in canonical order so that the
    /// rounding-residual assignment in the tilt engine is deterministic.
    #[must_use]
    pub fn largest_class(&self) -> AssetClass {
        let mut best = AssetClass::ALL[0];
        let mut best_pct = self.percents[0];
        for class in &AssetClass::ALL[1..] {
            let pct = self.percents[class.index()];
            if pct > best_pct {
                best = *class;
                best_pct = pct;
            }
        }
        best
    }
}

/// Per-class adjustable slack: the half-width of the range a table cell
/// describes, i.e. how far the tilt engine may move each class away from its
/// base percentage.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AllocationSlack {
    points: [f64; AssetClass::COUNT],
}

impl AllocationSlack {
    /// Build from `(class, points)` pairs. Unlisted classes get 0 slack.
    #[must_use]
    pub fn from_pairs(pairs: &[(AssetClass, f64)]) -> Self {
        let mut points = [0.0; AssetClass::COUNT];
        for (class, p) in pairs {
            points[class.index()] = *p;
        }
        Self { points }
    }

    /// Slack (percentage points) available for `class`.
    #[inline]
    #[must_use]
    pub fn get(&self, class: AssetClass) -> f64 {
        self.points[class.index()]
    }
}
