//! Derived investor classification: risk tier and time-horizon bucket.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Risk tolerance tier, derived once from a questionnaire score in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskProfile {
    /// All tiers, used for exhaustive allocation-table validation.
    pub const ALL: [RiskProfile; 3] = [
        RiskProfile::Conservative,
        RiskProfile::Moderate,
        RiskProfile::Aggressive,
    ];
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskProfile::Conservative => "Conservative",
            RiskProfile::Moderate => "Moderate",
            RiskProfile::Aggressive => "Aggressive",
        };
        f.write_str(s)
    }
}

/// Investment time-horizon bucket, derived from a whole number of years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HorizonBucket {
    /// Under 1 year.
    Short,
    /// 1 to under 3 years.
    ShortMedium,
    /// 3 to under 5 years.
    Medium,
    /// 5 years or more.
    Long,
}

impl HorizonBucket {
    /// All buckets, used for exhaustive allocation-table validation.
    pub const ALL: [HorizonBucket; 4] = [
        HorizonBucket::Short,
        HorizonBucket::ShortMedium,
        HorizonBucket::Medium,
        HorizonBucket::Long,
    ];
}

impl fmt::Display for HorizonBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HorizonBucket::Short => "Short (<1y)",
            HorizonBucket::ShortMedium => "Short-Medium (1-3y)",
            HorizonBucket::Medium => "Medium (3-5y)",
            HorizonBucket::Long => "Long (5y+)",
        };
        f.write_str(s)
    }
}

/// What the investor says the money is for.
///
/// Carried through to the recommendation for caller-side display; the rule
/// table keys on (risk tier, horizon bucket) only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalType {
    ShortTerm,
    WealthCreation,
    Retirement,
    #[default]
    Unspecified,
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GoalType::ShortTerm => "Short-term",
            GoalType::WealthCreation => "Wealth Creation",
            GoalType::Retirement => "Retirement",
            GoalType::Unspecified => "No Specific Goal",
        };
        f.write_str(s)
    }
}
