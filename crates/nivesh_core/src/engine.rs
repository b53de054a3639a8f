//! The single logical entry point: classify → allocate → tilt → score →
//! assemble.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assemble::{SplitPolicy, assemble};
use crate::backtest::BacktestConfig;
use crate::classify::{ClassifierThresholds, classify};
use crate::error::{ConfigError, RecommendError};
use crate::model::{
    AllocationVector, AssetClass, GoalType, MarketSignal, Paise, Product, Recommendation,
};
use crate::score::{ScoringWeights, rank_by_class};
use crate::table::AllocationTable;
use crate::tilt::{TiltConfig, apply_valuation_tilt};

/// Everything tunable about the engine, with working defaults.
///
/// Built once per deployment and shared read-only across requests; the
/// pipeline itself keeps no state between requests, so evaluations can run
/// on independent threads without coordination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub thresholds: ClassifierThresholds,
    pub table: AllocationTable,
    pub tilt: TiltConfig,
    pub weights: ScoringWeights,
    /// Products selected per asset class.
    pub top_k: usize,
    pub split: SplitPolicy,
    pub backtest: BacktestConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thresholds: ClassifierThresholds::default(),
            table: AllocationTable::standard(),
            tilt: TiltConfig::default(),
            weights: ScoringWeights::default(),
            top_k: 3,
            split: SplitPolicy::default(),
            backtest: BacktestConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Run the startup consistency checks. A failure here is a deployment
    /// bug; callers should refuse to serve rather than degrade.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        self.table.validate()?;
        self.weights.validate()?;
        self.split.validate()?;
        Ok(())
    }
}

/// One recommendation request, fully materialized by the out-of-scope
/// collaborators: questionnaire output, a market-signal snapshot, and the
/// candidate universe per asset class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    /// Questionnaire risk score in [0, 100].
    pub risk_score: f64,
    /// Investment horizon in whole years.
    pub horizon_years: i32,
    pub goal: GoalType,
    /// Annual income, pass-through context for the caller's records; the
    /// rule table does not read it.
    pub income_level: Option<f64>,
    /// The investor's current allocation, echoed on the recommendation for
    /// side-by-side display.
    pub existing_allocation: Option<AllocationVector>,
    /// Total investable amount, in paise.
    pub total_amount: Paise,
    pub signal: MarketSignal,
    pub candidates_by_class: FxHashMap<AssetClass, Vec<Product>>,
}

/// Produce a complete recommendation for one request.
///
/// Pure computation over already-fetched inputs: no I/O, no retries, no
/// shared mutable state. Identical inputs always produce an identical
/// recommendation.
pub fn recommend(
    request: &RecommendRequest,
    config: &EngineConfig,
) -> Result<Recommendation, RecommendError> {
    config.validate()?;

    let (profile, bucket) = classify(
        request.risk_score,
        request.horizon_years,
        request.goal,
        &config.thresholds,
    )?;
    let entry = config.table.lookup(profile, bucket)?;

    let allocation = apply_valuation_tilt(&entry.base, &entry.slack, &request.signal, &config.tilt);
    debug!(
        %profile,
        %bucket,
        equity = allocation.get(AssetClass::EquityIndex),
        "classified and tilted"
    );

    let ranked = rank_by_class(&request.candidates_by_class, &config.weights, config.top_k)?;
    let items = assemble(&allocation, &ranked, request.total_amount, &config.split)?;

    Ok(Recommendation {
        risk_profile: profile,
        horizon_bucket: bucket,
        goal: request.goal,
        allocation,
        existing_allocation: request.existing_allocation,
        total_amount: request.total_amount,
        items,
    })
}
