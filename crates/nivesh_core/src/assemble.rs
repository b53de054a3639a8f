//! Portfolio assembler: tilted allocation × ranked products → line items.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, InputError, RecommendError};
use crate::model::{AllocationVector, AssetClass, LineItem, Paise, ProductScore};
use rustc_hash::FxHashMap;

/// How one asset class's percentage is divided across its ranked products.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum SplitPolicy {
    /// Every selected product gets an equal share of the class.
    #[default]
    Equal,
    /// Explicit weights applied in ranked order and normalized over the
    /// products actually present. A class with more products than weights
    /// only fills as many slots as there are weights.
    Weighted(Vec<f64>),
}

impl SplitPolicy {
    /// Reject weight lists that cannot be normalized.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let SplitPolicy::Weighted(weights) = self {
            if weights.is_empty() {
                return Err(ConfigError::InvalidSplitWeights {
                    reason: "weight list is empty",
                });
            }
            if weights.iter().any(|w| !w.is_finite() || *w <= 0.0) {
                return Err(ConfigError::InvalidSplitWeights {
                    reason: "weights must be positive and finite",
                });
            }
        }
        Ok(())
    }

    /// Normalized within-class weights for `count` ranked products.
    fn within_class_weights(&self, count: usize) -> Vec<f64> {
        match self {
            SplitPolicy::Equal => vec![1.0 / count as f64; count],
            SplitPolicy::Weighted(weights) => {
                let used = &weights[..weights.len().min(count)];
                let total: f64 = used.iter().sum();
                used.iter().map(|w| w / total).collect()
            }
        }
    }
}

/// Turn a tilted allocation and per-class rankings into concrete line items.
///
/// Items come out in canonical asset-class order, ranking order within each
/// class. Amounts are rounded to whole paise; the rounding residual lands on
/// the first line item so the grand total always equals `total_amount`
/// exactly. An asset class with a positive percentage but no ranked product
/// is an error, never a silent drop.
pub fn assemble(
    allocation: &AllocationVector,
    ranked_by_class: &FxHashMap<AssetClass, Vec<ProductScore>>,
    total_amount: Paise,
    policy: &SplitPolicy,
) -> Result<Vec<LineItem>, RecommendError> {
    if total_amount <= 0 {
        return Err(InputError::NonPositiveAmount {
            amount: total_amount,
        }
        .into());
    }
    policy.validate()?;

    let mut items = Vec::new();
    for class in AssetClass::ALL {
        let class_percent = allocation.get(class);
        if class_percent <= 0.0 {
            continue;
        }

        let ranked = ranked_by_class
            .get(&class)
            .map(Vec::as_slice)
            .unwrap_or_default();
        if ranked.is_empty() {
            return Err(RecommendError::InsufficientCandidates {
                class,
                percent: class_percent,
            });
        }

        let weights = policy.within_class_weights(ranked.len());
        for (scored, weight) in ranked.iter().zip(&weights) {
            let allocated_percent = class_percent * weight;
            let ideal = total_amount as f64 * allocated_percent / 100.0;
            items.push(LineItem {
                product: scored.product.clone(),
                allocated_percent,
                allocated_amount: ideal.round() as Paise,
            });
        }
    }

    // Hand the rounding residual to the first item so the total is exact.
    let invested: Paise = items.iter().map(|i| i.allocated_amount).sum();
    let residual = total_amount - invested;
    if residual != 0
        && let Some(first) = items.first_mut()
    {
        first.allocated_amount += residual;
    }

    Ok(items)
}
