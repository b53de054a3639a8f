//! Candidate financial products and their ranking scores.

use serde::{Deserialize, Serialize};

use crate::model::AssetClass;

/// Reference data for one candidate product, externally sourced and immutable
/// for the duration of one evaluation.
///
/// Scoring features are `Option`s: a missing feature is a reportable input
/// error, not a silently-zeroed value. Returns, volatility and expense ratio
/// are expected pre-normalized to decimal fractions (0.12 = 12%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub asset_class: AssetClass,
    /// Provider symbol, unique within one evaluation.
    pub symbol: String,
    /// Display name for the caller's UI.
    pub name: String,
    pub expense_ratio: Option<f64>,
    pub return_1y: Option<f64>,
    pub return_3y: Option<f64>,
    pub return_5y: Option<f64>,
    pub volatility: Option<f64>,
    /// Assets under management, informational only.
    pub aum: Option<f64>,
    /// Historical max drawdown, informational only.
    pub max_drawdown: Option<f64>,
}

/// A product paired with its composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductScore {
    pub product: Product,
    pub score: f64,
}

impl ProductScore {
    /// Total order used everywhere ranked products appear: score descending,
    /// then expense ratio ascending, then symbol ascending.
    ///
    /// The tie-break is explicit because financial rankings must not depend
    /// on the iteration order of any container.
    #[must_use]
    pub fn ranking_cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| {
                let a = self.product.expense_ratio.unwrap_or(f64::INFINITY);
                let b = other.product.expense_ratio.unwrap_or(f64::INFINITY);
                a.total_cmp(&b)
            })
            .then_with(|| self.product.symbol.cmp(&other.product.symbol))
    }
}
