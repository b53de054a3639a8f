//! Weighted-linear product scorer and per-class ranking.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, InputError};
use crate::model::{AssetClass, Product, ProductScore};

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

/// Weight tuple for the composite product score.
///
/// Feature inputs are assumed pre-normalized to comparable decimal scales;
/// the scorer applies the weights as-is. Cost-like features carry negative
/// weights so "lower is better" falls out of the same linear form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub return_5y: f64,
    pub return_3y: f64,
    pub volatility: f64,
    pub expense_ratio: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            return_5y: 0.4,
            return_3y: 0.3,
            volatility: -0.2,
            expense_ratio: -0.1,
        }
    }
}

impl ScoringWeights {
    /// Reject NaN/infinite weights, which would poison every ranking.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let features = [
            (self.return_5y, "return_5y"),
            (self.return_3y, "return_3y"),
            (self.volatility, "volatility"),
            (self.expense_ratio, "expense_ratio"),
        ];
        for (w, feature) in features {
            if !w.is_finite() {
                return Err(ConfigError::NonFiniteWeight { feature });
            }
        }
        Ok(())
    }
}

/// Score one product, failing if any feature the weight tuple needs is
/// absent.
fn score_product(product: &Product, weights: &ScoringWeights) -> Result<f64, InputError> {
    let feature = |value: Option<f64>, name: &'static str| {
        value.ok_or_else(|| InputError::MissingFeature {
            symbol: product.symbol.clone(),
            feature: name,
        })
    };
    let r5 = feature(product.return_5y, "return_5y")?;
    let r3 = feature(product.return_3y, "return_3y")?;
    let vol = feature(product.volatility, "volatility")?;
    let expense = feature(product.expense_ratio, "expense_ratio")?;

    Ok(weights.return_5y * r5
        + weights.return_3y * r3
        + weights.volatility * vol
        + weights.expense_ratio * expense)
}

/// Score and sort one asset class's candidates, best first.
///
/// Ordering is fully deterministic: score descending, then expense ratio
/// ascending, then symbol. Running this twice on identical input yields an
/// identical list.
pub fn rank_products(
    candidates: &[Product],
    weights: &ScoringWeights,
) -> Result<Vec<ProductScore>, InputError> {
    let mut scored = candidates
        .iter()
        .map(|p| {
            Ok(ProductScore {
                product: p.clone(),
                score: score_product(p, weights)?,
            })
        })
        .collect::<Result<Vec<_>, InputError>>()?;
    scored.sort_by(ProductScore::ranking_cmp);
    Ok(scored)
}

/// Rank every asset class's candidates and keep the top `top_k` per class.
///
/// Classes are independent, so with the `parallel` feature the per-class
/// ranking fans out across the rayon pool. The result map only contains
/// classes that had at least one candidate.
pub fn rank_by_class(
    candidates_by_class: &FxHashMap<AssetClass, Vec<Product>>,
    weights: &ScoringWeights,
    top_k: usize,
) -> Result<FxHashMap<AssetClass, Vec<ProductScore>>, InputError> {
    // Walk classes in canonical order so error reporting is deterministic
    // even when several classes have problems.
    let classes: Vec<AssetClass> = AssetClass::ALL
        .iter()
        .copied()
        .filter(|c| candidates_by_class.contains_key(c))
        .collect();

    let rank_one = |class: &AssetClass| -> Result<(AssetClass, Vec<ProductScore>), InputError> {
        let mut ranked = rank_products(&candidates_by_class[class], weights)?;
        ranked.truncate(top_k);
        Ok((*class, ranked))
    };

    #[cfg(feature = "parallel")]
    let ranked: Vec<_> = classes.par_iter().map(rank_one).collect::<Result<_, _>>()?;
    #[cfg(not(feature = "parallel"))]
    let ranked: Vec<_> = classes.iter().map(rank_one).collect::<Result<_, _>>()?;

    Ok(ranked.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(symbol: &str, r5: f64, r3: f64, vol: f64, expense: f64) -> Product {
        Product {
            asset_class: AssetClass::EquityIndex,
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            expense_ratio: Some(expense),
            return_1y: Some(0.10),
            return_3y: Some(r3),
            return_5y: Some(r5),
            volatility: Some(vol),
            aum: None,
            max_drawdown: None,
        }
    }

    #[test]
    fn test_default_weight_formula() {
        let p = product("A", 0.14, 0.12, 0.18, 0.005);
        let score = score_product(&p, &ScoringWeights::default()).unwrap();
        let expected = 0.4 * 0.14 + 0.3 * 0.12 - 0.2 * 0.18 - 0.1 * 0.005;
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_missing_feature_is_reported() {
        let mut p = product("A", 0.14, 0.12, 0.18, 0.005);
        p.volatility = None;
        let err = rank_products(&[p], &ScoringWeights::default()).unwrap_err();
        assert_eq!(
            err,
            InputError::MissingFeature {
                symbol: "A".to_string(),
                feature: "volatility",
            }
        );
    }

    #[test]
    fn test_ordering_is_deterministic_with_ties() {
        // Expense carries no score weight here, so B and C tie on score and
        // C wins on lower expense; A and D tie on everything and A wins
        // lexically.
        let weights = ScoringWeights {
            expense_ratio: 0.0,
            ..ScoringWeights::default()
        };
        let candidates = vec![
            product("D", 0.10, 0.10, 0.10, 0.010),
            product("B", 0.12, 0.10, 0.10, 0.012),
            product("A", 0.10, 0.10, 0.10, 0.010),
            product("C", 0.12, 0.10, 0.10, 0.008),
        ];
        let first = rank_products(&candidates, &weights).unwrap();
        let second = rank_products(&candidates, &weights).unwrap();
        let symbols: Vec<_> = first.iter().map(|s| s.product.symbol.as_str()).collect();
        assert_eq!(symbols, ["C", "B", "A", "D"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_rank_by_class_truncates_to_top_k() {
        let mut by_class = FxHashMap::default();
        by_class.insert(
            AssetClass::EquityIndex,
            vec![
                product("A", 0.10, 0.10, 0.10, 0.010),
                product("B", 0.14, 0.12, 0.10, 0.010),
                product("C", 0.12, 0.11, 0.10, 0.010),
                product("D", 0.08, 0.09, 0.10, 0.010),
            ],
        );
        let ranked = rank_by_class(&by_class, &ScoringWeights::default(), 2).unwrap();
        let top = &ranked[&AssetClass::EquityIndex];
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].product.symbol, "B");
        assert_eq!(top[1].product.symbol, "C");
    }
}
