//! Base allocation rule table keyed by (risk tier, horizon bucket).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{
    AllocationSlack, AllocationVector, AssetClass, HorizonBucket, RiskProfile, SUM_EPSILON,
};

/// One cell of the rule table: the canonical base split plus the per-class
/// slack the tilt engine may spend.
///
/// Cells that describe a range ("50–60% equity") store the midpoint as the
/// base and the half-width as slack, keeping the base deterministic while
/// bounding how far valuation tilts can move it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub base: AllocationVector,
    pub slack: AllocationSlack,
}

/// The complete (RiskProfile × HorizonBucket) → allocation mapping.
///
/// The table is fixed at build time; a missing pair or a mis-summing entry is
/// a deployment bug, so `validate` runs at engine construction and `lookup`
/// reports `ConfigError` rather than a recoverable runtime error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationTable {
    entries: FxHashMap<(RiskProfile, HorizonBucket), AllocationEntry>,
}

impl AllocationTable {
    /// Build a table from explicit entries. Call [`validate`](Self::validate)
    /// before first use.
    #[must_use]
    pub fn new(entries: FxHashMap<(RiskProfile, HorizonBucket), AllocationEntry>) -> Self {
        Self { entries }
    }

    /// The built-in rule table.
    ///
    /// Equity exposure rises with risk tolerance and horizon; short horizons
    /// lean on FD/liquid regardless of tier. Slack mirrors the ranges the
    /// rules were written with: equity cells are ±10 points for Moderate and
    /// Aggressive tiers (±5 for Conservative), gold and gilt ±5.
    #[must_use]
    pub fn standard() -> Self {
        use AssetClass::*;
        use HorizonBucket::*;
        use RiskProfile::*;

        let entry = |eq: f64, hy: f64, gilt: f64, gold: f64, fd: f64, eq_slack: f64| {
            AllocationEntry {
                base: AllocationVector::from_pairs(&[
                    (EquityIndex, eq),
                    (HybridMf, hy),
                    (GiltBond, gilt),
                    (GoldEtf, gold),
                    (FdLiquid, fd),
                ]),
                slack: AllocationSlack::from_pairs(&[
                    (EquityIndex, eq_slack),
                    (GiltBond, 5.0),
                    (GoldEtf, 5.0),
                ]),
            }
        };

        let mut entries = FxHashMap::default();
        entries.insert((Conservative, Short), entry(0.0, 10.0, 25.0, 5.0, 60.0, 5.0));
        entries.insert(
            (Conservative, ShortMedium),
            entry(10.0, 15.0, 30.0, 10.0, 35.0, 5.0),
        );
        entries.insert(
            (Conservative, Medium),
            entry(20.0, 15.0, 30.0, 10.0, 25.0, 5.0),
        );
        entries.insert(
            (Conservative, Long),
            entry(30.0, 15.0, 25.0, 15.0, 15.0, 5.0),
        );

        entries.insert((Moderate, Short), entry(10.0, 15.0, 25.0, 10.0, 40.0, 10.0));
        entries.insert(
            (Moderate, ShortMedium),
            entry(25.0, 20.0, 25.0, 10.0, 20.0, 10.0),
        );
        entries.insert((Moderate, Medium), entry(40.0, 15.0, 20.0, 15.0, 10.0, 10.0));
        entries.insert((Moderate, Long), entry(55.0, 10.0, 15.0, 15.0, 5.0, 10.0));

        entries.insert(
            (Aggressive, Short),
            entry(25.0, 20.0, 20.0, 15.0, 20.0, 10.0),
        );
        entries.insert(
            (Aggressive, ShortMedium),
            entry(45.0, 15.0, 15.0, 15.0, 10.0, 10.0),
        );
        entries.insert(
            (Aggressive, Medium),
            entry(60.0, 10.0, 10.0, 15.0, 5.0, 10.0),
        );
        entries.insert((Aggressive, Long), entry(75.0, 0.0, 10.0, 10.0, 5.0, 10.0));

        Self { entries }
    }

    /// Check every (profile, bucket) pair is present, sums to 100 within
    /// tolerance, and carries no negative value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for profile in RiskProfile::ALL {
            for bucket in HorizonBucket::ALL {
                let entry = self.lookup(profile, bucket)?;
                let sum = entry.base.sum();
                if (sum - 100.0).abs() > SUM_EPSILON {
                    return Err(ConfigError::AllocationSumMismatch {
                        profile,
                        bucket,
                        sum,
                    });
                }
                for class in AssetClass::ALL {
                    if entry.base.get(class) < 0.0 || entry.slack.get(class) < 0.0 {
                        return Err(ConfigError::NegativeTableValue {
                            profile,
                            bucket,
                            class,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Look up the entry for a classified investor.
    pub fn lookup(
        &self,
        profile: RiskProfile,
        bucket: HorizonBucket,
    ) -> Result<&AllocationEntry, ConfigError> {
        self.entries
            .get(&(profile, bucket))
            .ok_or(ConfigError::MissingAllocationEntry { profile, bucket })
    }
}

impl Default for AllocationTable {
    fn default() -> Self {
        Self::standard()
    }
}
