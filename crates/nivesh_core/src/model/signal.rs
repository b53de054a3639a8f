//! Market valuation signals consumed by the tilt engine.

use serde::{Deserialize, Serialize};

/// A point-in-time snapshot of the valuation signals the tilt engine reads.
///
/// The snapshot is supplied, already fetched, by an external collaborator and
/// is immutable for the duration of one evaluation. Prices are in whatever
/// unit the provider quotes; only ratios of the fields matter here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketSignal {
    /// Current Nifty 50 trailing P/E.
    pub nifty_pe: f64,
    /// Long-run average Nifty P/E.
    pub nifty_pe_avg: f64,
    /// Standard deviation of the historical Nifty P/E.
    pub nifty_pe_stdev: f64,
    /// Current gold price.
    pub gold_price: f64,
    /// Highest gold price over the trailing year.
    pub gold_1y_high: f64,
    /// Average gold price over the trailing year.
    pub gold_1y_avg: f64,
}

impl MarketSignal {
    /// A signal that triggers no tilt: P/E at its average, gold at its
    /// trailing-year average and well off its high.
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            nifty_pe: 20.0,
            nifty_pe_avg: 20.0,
            nifty_pe_stdev: 3.0,
            gold_price: 1900.0,
            gold_1y_high: 2100.0,
            gold_1y_avg: 1900.0,
        }
    }

    /// How many standard deviations the current P/E sits from its average.
    ///
    /// A non-positive stdev makes the z-score meaningless; it is reported as
    /// 0 so a degenerate snapshot produces no equity tilt.
    #[must_use]
    pub fn equity_z_score(&self) -> f64 {
        if self.nifty_pe_stdev <= 0.0 {
            return 0.0;
        }
        (self.nifty_pe - self.nifty_pe_avg) / self.nifty_pe_stdev
    }

    /// Whether gold trades within `fraction` of its trailing-year high
    /// (e.g. 0.95 means "at or above 95% of the 1y high").
    #[must_use]
    pub fn gold_near_high(&self, fraction: f64) -> bool {
        self.gold_1y_high > 0.0 && self.gold_price >= fraction * self.gold_1y_high
    }
}
