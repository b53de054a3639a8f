//! Tests for the full recommendation pipeline.

use rustc_hash::FxHashMap;

use crate::engine::{EngineConfig, RecommendRequest, recommend};
use crate::error::RecommendError;
use crate::model::{AssetClass, GoalType, HorizonBucket, MarketSignal, Product, RiskProfile, rupees};

fn product(class: AssetClass, symbol: &str, r5: f64) -> Product {
    Product {
        asset_class: class,
        symbol: symbol.to_string(),
        name: symbol.to_string(),
        expense_ratio: Some(0.005),
        return_1y: Some(0.10),
        return_3y: Some(0.09),
        return_5y: Some(r5),
        volatility: Some(0.15),
        aum: Some(5_000.0),
        max_drawdown: Some(-0.30),
    }
}

/// Two candidates per asset class, enough to fill any table entry.
fn full_universe() -> FxHashMap<AssetClass, Vec<Product>> {
    let mut by_class = FxHashMap::default();
    for class in AssetClass::ALL {
        by_class.insert(
            class,
            vec![
                product(class, &format!("{class:?}-A"), 0.12),
                product(class, &format!("{class:?}-B"), 0.10),
            ],
        );
    }
    by_class
}

fn aggressive_long_request() -> RecommendRequest {
    RecommendRequest {
        risk_score: 80.0,
        horizon_years: 10,
        goal: GoalType::Retirement,
        income_level: Some(1_500_000.0),
        existing_allocation: None,
        total_amount: rupees(500_000),
        signal: MarketSignal::neutral(),
        candidates_by_class: full_universe(),
    }
}

/// Risk score 80, horizon 10y, neutral signals: the Aggressive/Long base
/// allocation comes back untouched by the tilt step.
#[test]
fn test_aggressive_long_neutral_market() {
    let config = EngineConfig::default();
    let rec = recommend(&aggressive_long_request(), &config).unwrap();

    assert_eq!(rec.risk_profile, RiskProfile::Aggressive);
    assert_eq!(rec.horizon_bucket, HorizonBucket::Long);

    let base = config
        .table
        .lookup(RiskProfile::Aggressive, HorizonBucket::Long)
        .unwrap()
        .base;
    assert_eq!(rec.allocation, base);
    assert_eq!(rec.allocation.get(AssetClass::EquityIndex), 75.0);
    assert_eq!(rec.allocation.get(AssetClass::HybridMf), 0.0);
}

#[test]
fn test_line_items_cover_the_full_amount() {
    let request = aggressive_long_request();
    let rec = recommend(&request, &EngineConfig::default()).unwrap();

    assert_eq!(rec.invested_amount(), request.total_amount);
    // Hybrid carries 0% for Aggressive/Long, so no hybrid line items.
    assert!(
        rec.items
            .iter()
            .all(|i| i.product.asset_class != AssetClass::HybridMf)
    );
    // Every other class of the entry is filled.
    for class in [
        AssetClass::EquityIndex,
        AssetClass::GiltBond,
        AssetClass::GoldEtf,
        AssetClass::FdLiquid,
    ] {
        let class_pct: f64 = rec
            .items
            .iter()
            .filter(|i| i.product.asset_class == class)
            .map(|i| i.allocated_percent)
            .sum();
        assert!(
            (class_pct - rec.allocation.get(class)).abs() < 1e-9,
            "{class} fills {class_pct}%, expected {}",
            rec.allocation.get(class)
        );
    }
}

#[test]
fn test_identical_requests_identical_recommendations() {
    let request = aggressive_long_request();
    let config = EngineConfig::default();
    let first = recommend(&request, &config).unwrap();
    let second = recommend(&request, &config).unwrap();
    assert_eq!(first, second);
}

/// An allocated class with an empty candidate list is an error, not a
/// silently smaller portfolio.
#[test]
fn test_missing_class_candidates_surface() {
    let mut request = aggressive_long_request();
    request.candidates_by_class.remove(&AssetClass::GoldEtf);

    let err = recommend(&request, &EngineConfig::default()).unwrap_err();
    assert_eq!(
        err,
        RecommendError::InsufficientCandidates {
            class: AssetClass::GoldEtf,
            percent: 10.0,
        }
    );
}

#[test]
fn test_invalid_score_rejected_at_the_entry_point() {
    let mut request = aggressive_long_request();
    request.risk_score = 250.0;
    assert!(matches!(
        recommend(&request, &EngineConfig::default()),
        Err(RecommendError::Input(_))
    ));
}

#[test]
fn test_existing_allocation_passes_through() {
    let mut request = aggressive_long_request();
    let existing = crate::model::AllocationVector::from_pairs(&[(AssetClass::FdLiquid, 100.0)]);
    request.existing_allocation = Some(existing);
    let rec = recommend(&request, &EngineConfig::default()).unwrap();
    assert_eq!(rec.existing_allocation, Some(existing));
}

#[test]
fn test_recommendation_serde_round_trip() {
    let rec = recommend(&aggressive_long_request(), &EngineConfig::default()).unwrap();
    let json = serde_json::to_string(&rec).unwrap();
    let back: crate::model::Recommendation = serde_json::from_str(&json).unwrap();
    assert_eq!(back, rec);
}
