//! Risk/horizon classifier: raw questionnaire output to discrete tiers.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, InputError};
use crate::model::{GoalType, HorizonBucket, RiskProfile};

/// Boundaries for mapping a risk score and a horizon onto discrete buckets.
///
/// These are parameters rather than hard-wired constants so deployments can
/// tune them and tests can probe the edges. Defaults follow the rule table:
/// score < 34 → Conservative, 34..=66 → Moderate, > 66 → Aggressive;
/// horizon < 1 / 1..3 / 3..5 / 5+ years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierThresholds {
    /// First score classified as Moderate.
    pub moderate_min: f64,
    /// First score classified as Aggressive.
    pub aggressive_min: f64,
    /// First horizon (years) in the Short-Medium bucket.
    pub short_medium_min: i32,
    /// First horizon (years) in the Medium bucket.
    pub medium_min: i32,
    /// First horizon (years) in the Long bucket.
    pub long_min: i32,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            moderate_min: 34.0,
            aggressive_min: 67.0,
            short_medium_min: 1,
            medium_min: 3,
            long_min: 5,
        }
    }
}

impl ClassifierThresholds {
    /// Check that the boundaries are strictly increasing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.moderate_min < self.aggressive_min) {
            return Err(ConfigError::InvalidThresholds {
                reason: "risk boundaries must satisfy moderate_min < aggressive_min",
            });
        }
        if !(self.short_medium_min < self.medium_min && self.medium_min < self.long_min) {
            return Err(ConfigError::InvalidThresholds {
                reason: "horizon boundaries must be strictly increasing",
            });
        }
        Ok(())
    }
}

/// Map a validated risk score and horizon onto `(RiskProfile, HorizonBucket)`.
///
/// Pure function, no side effects. The goal type travels alongside the
/// classification for display but does not move the thresholds.
pub fn classify(
    risk_score: f64,
    horizon_years: i32,
    _goal: GoalType,
    thresholds: &ClassifierThresholds,
) -> Result<(RiskProfile, HorizonBucket), InputError> {
    if !(0.0..=100.0).contains(&risk_score) || risk_score.is_nan() {
        return Err(InputError::RiskScoreOutOfRange { score: risk_score });
    }
    if horizon_years < 0 {
        return Err(InputError::NegativeHorizon {
            years: horizon_years,
        });
    }

    let profile = if risk_score < thresholds.moderate_min {
        RiskProfile::Conservative
    } else if risk_score < thresholds.aggressive_min {
        RiskProfile::Moderate
    } else {
        RiskProfile::Aggressive
    };

    let bucket = if horizon_years < thresholds.short_medium_min {
        HorizonBucket::Short
    } else if horizon_years < thresholds.medium_min {
        HorizonBucket::ShortMedium
    } else if horizon_years < thresholds.long_min {
        HorizonBucket::Medium
    } else {
        HorizonBucket::Long
    };

    Ok((profile, bucket))
}

/// Normalize raw questionnaire answers (0–10 per question) to a 0–100 score.
///
/// An empty answer set yields the neutral midpoint of 50.
#[must_use]
pub fn risk_score_from_answers(answers: &[u8]) -> f64 {
    if answers.is_empty() {
        return 50.0;
    }
    let total: u32 = answers.iter().map(|a| u32::from((*a).min(10))).sum();
    let max_total = answers.len() as u32 * 10;
    f64::from(total) / f64::from(max_total) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_tier_boundaries() {
        let t = ClassifierThresholds::default();
        let tier = |score| classify(score, 5, GoalType::default(), &t).unwrap().0;
        assert_eq!(tier(0.0), RiskProfile::Conservative);
        assert_eq!(tier(33.9), RiskProfile::Conservative);
        assert_eq!(tier(34.0), RiskProfile::Moderate);
        assert_eq!(tier(66.0), RiskProfile::Moderate);
        assert_eq!(tier(67.0), RiskProfile::Aggressive);
        assert_eq!(tier(100.0), RiskProfile::Aggressive);
    }

    #[test]
    fn test_horizon_buckets() {
        let t = ClassifierThresholds::default();
        let bucket = |years| classify(50.0, years, GoalType::default(), &t).unwrap().1;
        assert_eq!(bucket(0), HorizonBucket::Short);
        assert_eq!(bucket(1), HorizonBucket::ShortMedium);
        assert_eq!(bucket(2), HorizonBucket::ShortMedium);
        assert_eq!(bucket(3), HorizonBucket::Medium);
        assert_eq!(bucket(4), HorizonBucket::Medium);
        assert_eq!(bucket(5), HorizonBucket::Long);
        assert_eq!(bucket(40), HorizonBucket::Long);
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        let t = ClassifierThresholds::default();
        assert!(matches!(
            classify(101.0, 5, GoalType::default(), &t),
            Err(InputError::RiskScoreOutOfRange { .. })
        ));
        assert!(matches!(
            classify(-0.5, 5, GoalType::default(), &t),
            Err(InputError::RiskScoreOutOfRange { .. })
        ));
        assert!(matches!(
            classify(50.0, -1, GoalType::default(), &t),
            Err(InputError::NegativeHorizon { years: -1 })
        ));
    }

    #[test]
    fn test_score_from_answers() {
        assert_eq!(risk_score_from_answers(&[]), 50.0);
        assert_eq!(risk_score_from_answers(&[10, 10, 10]), 100.0);
        assert_eq!(risk_score_from_answers(&[0, 0]), 0.0);
        assert_eq!(risk_score_from_answers(&[5, 5, 5, 5]), 50.0);
        // Answers above the per-question scale are clamped, not amplified
        assert_eq!(risk_score_from_answers(&[200, 10]), 100.0);
    }
}
