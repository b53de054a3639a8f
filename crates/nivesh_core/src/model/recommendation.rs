//! The recommendation object handed back to the out-of-scope caller.

use serde::{Deserialize, Serialize};

use crate::model::{AllocationVector, GoalType, HorizonBucket, Product, RiskProfile};

/// Money in integer paise (1/100 rupee).
///
/// Line-item amounts are kept in minor units so the "amounts sum exactly to
/// the requested total" invariant is integer arithmetic, not a float
/// tolerance. `i64` covers totals far beyond ₹10B.
pub type Paise = i64;

/// Convert whole rupees to paise.
#[inline]
#[must_use]
pub fn rupees(amount: i64) -> Paise {
    amount * 100
}

/// One concrete (product, percentage, amount) slot in the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product: Product,
    /// Share of the whole portfolio, in percent.
    pub allocated_percent: f64,
    /// Amount to invest, in paise.
    pub allocated_amount: Paise,
}

/// A complete recommendation: tilted allocation plus the concrete products
/// filling it, in deterministic order (canonical asset-class order, then
/// ranking order within each class).
///
/// Built once per request and never mutated; persistence is the caller's
/// concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub risk_profile: RiskProfile,
    pub horizon_bucket: HorizonBucket,
    pub goal: GoalType,
    /// Post-tilt allocation the line items implement.
    pub allocation: AllocationVector,
    /// Allocation the investor currently holds, when the caller supplied one;
    /// passed through for display alongside the recommendation.
    pub existing_allocation: Option<AllocationVector>,
    /// Total investable amount, in paise.
    pub total_amount: Paise,
    pub items: Vec<LineItem>,
}

impl Recommendation {
    /// Sum of line-item amounts, in paise. Equals `total_amount` by
    /// construction.
    #[must_use]
    pub fn invested_amount(&self) -> Paise {
        self.items.iter().map(|i| i.allocated_amount).sum()
    }
}
