use std::fmt;

use jiff::civil::Date;

use crate::model::{AssetClass, HorizonBucket, RiskProfile};

/// Malformed or out-of-range caller input.
///
/// Reported immediately and never retried; the core assumes its collaborators
/// re-validate and re-submit.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// Risk score must lie in [0, 100].
    RiskScoreOutOfRange { score: f64 },
    /// Horizon must be a non-negative number of years.
    NegativeHorizon { years: i32 },
    /// Total investable amount must be positive.
    NonPositiveAmount { amount: i64 },
    /// A scoring feature required by the weight tuple is absent.
    MissingFeature {
        symbol: String,
        feature: &'static str,
    },
    /// Backtest window must satisfy start < end.
    EmptyWindow { start: Date, end: Date },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::RiskScoreOutOfRange { score } => {
                write!(f, "risk score {score} outside [0, 100]")
            }
            InputError::NegativeHorizon { years } => {
                write!(f, "horizon of {years} years is negative")
            }
            InputError::NonPositiveAmount { amount } => {
                write!(f, "investable amount {amount} paise is not positive")
            }
            InputError::MissingFeature { symbol, feature } => {
                write!(f, "product {symbol} is missing required feature {feature}")
            }
            InputError::EmptyWindow { start, end } => {
                write!(f, "backtest window {start}..{end} is empty")
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Inconsistent engine configuration.
///
/// These indicate a deployment bug (a bad table or weight tuple baked into
/// the build), not a runtime condition the caller can recover from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The allocation table has no entry for a (profile, bucket) pair.
    MissingAllocationEntry {
        profile: RiskProfile,
        bucket: HorizonBucket,
    },
    /// A table entry does not sum to 100 within tolerance.
    AllocationSumMismatch {
        profile: RiskProfile,
        bucket: HorizonBucket,
        sum: f64,
    },
    /// A table entry carries a negative percentage or negative slack.
    NegativeTableValue {
        profile: RiskProfile,
        bucket: HorizonBucket,
        class: AssetClass,
    },
    /// A scoring weight is NaN or infinite.
    NonFiniteWeight { feature: &'static str },
    /// An explicit split-policy weight list is unusable.
    InvalidSplitWeights { reason: &'static str },
    /// Classifier thresholds are not strictly increasing.
    InvalidThresholds { reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingAllocationEntry { profile, bucket } => {
                write!(f, "allocation table has no entry for {profile}/{bucket}")
            }
            ConfigError::AllocationSumMismatch {
                profile,
                bucket,
                sum,
            } => {
                write!(
                    f,
                    "allocation table entry {profile}/{bucket} sums to {sum}, expected 100"
                )
            }
            ConfigError::NegativeTableValue {
                profile,
                bucket,
                class,
            } => {
                write!(
                    f,
                    "allocation table entry {profile}/{bucket} has a negative value for {class}"
                )
            }
            ConfigError::NonFiniteWeight { feature } => {
                write!(f, "scoring weight for {feature} is not finite")
            }
            ConfigError::InvalidSplitWeights { reason } => {
                write!(f, "invalid intra-class split weights: {reason}")
            }
            ConfigError::InvalidThresholds { reason } => {
                write!(f, "invalid classifier thresholds: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors surfaced by the `recommend` entry point.
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendError {
    Input(InputError),
    Config(ConfigError),
    /// An asset class carries a positive allocation but has no ranked product
    /// to fill it. Surfaced to the caller rather than silently dropping the
    /// allocation.
    InsufficientCandidates { class: AssetClass, percent: f64 },
}

impl fmt::Display for RecommendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendError::Input(e) => write!(f, "{e}"),
            RecommendError::Config(e) => write!(f, "{e}"),
            RecommendError::InsufficientCandidates { class, percent } => {
                write!(
                    f,
                    "no eligible product for {class} which carries {percent}% of the allocation"
                )
            }
        }
    }
}

impl std::error::Error for RecommendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecommendError::Input(e) => Some(e),
            RecommendError::Config(e) => Some(e),
            RecommendError::InsufficientCandidates { .. } => None,
        }
    }
}

impl From<InputError> for RecommendError {
    fn from(e: InputError) -> Self {
        RecommendError::Input(e)
    }
}

impl From<ConfigError> for RecommendError {
    fn from(e: ConfigError) -> Self {
        RecommendError::Config(e)
    }
}

/// Errors surfaced by the `backtest` entry point.
#[derive(Debug, Clone, PartialEq)]
pub enum BacktestError {
    Input(InputError),
    /// No price history was supplied for a selected product.
    MissingSeries { symbol: String },
    /// A selected product's history starts after the window start; a
    /// truncated simulation is never returned silently.
    InsufficientHistory {
        symbol: String,
        series_start: Option<Date>,
        window_start: Date,
    },
}

impl fmt::Display for BacktestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BacktestError::Input(e) => write!(f, "{e}"),
            BacktestError::MissingSeries { symbol } => {
                write!(f, "no price history supplied for {symbol}")
            }
            BacktestError::InsufficientHistory {
                symbol,
                series_start,
                window_start,
            } => match series_start {
                Some(start) => write!(
                    f,
                    "history for {symbol} starts {start}, after window start {window_start}"
                ),
                None => write!(f, "history for {symbol} is empty"),
            },
        }
    }
}

impl std::error::Error for BacktestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BacktestError::Input(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InputError> for BacktestError {
    fn from(e: InputError) -> Self {
        BacktestError::Input(e)
    }
}
