//! Valuation tilt engine: bounded, signal-driven perturbation of a base
//! allocation.
//!
//! Shifts are computed explicitly and then re-normalized in one pass rather
//! than applied as incremental mutations, so the sum-to-100 invariant holds
//! structurally. The engine only moves weight between classes that are
//! already present; it never introduces or removes a class.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{AllocationSlack, AllocationVector, AssetClass, MarketSignal};

/// Tunable bounds for the tilt rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TiltConfig {
    /// |z-score| beyond which the equity tilt engages.
    pub equity_z_threshold: f64,
    /// Maximum equity shift in percentage points (further capped by slack).
    pub equity_shift_cap: f64,
    /// Gold counts as "at peak" at or above this fraction of its 1y high.
    pub gold_high_fraction: f64,
    /// Maximum gold shift in percentage points.
    pub gold_shift_cap: f64,
    /// Per-class floor no shift may breach. Defaults to 0% everywhere.
    pub floors: AllocationVector,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            equity_z_threshold: 1.0,
            equity_shift_cap: 10.0,
            gold_high_fraction: 0.95,
            gold_shift_cap: 5.0,
            floors: AllocationVector::default(),
        }
    }
}

/// Apply the valuation tilts to `base` and return the adjusted vector.
///
/// Rules:
/// - equity z-score > threshold: move min(cap, equity slack) points out of
///   equity, split across Gold and Gilt by their current relative weights;
/// - equity z-score < -threshold: the symmetric move into equity, drawn
///   proportionally from Gold and Gilt down to their floors;
/// - gold at/above 95% of its 1y high: move up to 5 points out of Gold,
///   split across Equity and Gilt by their current relative weights.
///
/// All shift magnitudes are clamped silently so no class goes below its
/// floor or outside [0, 100]. A neutral signal returns `base` unchanged.
#[must_use]
pub fn apply_valuation_tilt(
    base: &AllocationVector,
    slack: &AllocationSlack,
    signal: &MarketSignal,
    config: &TiltConfig,
) -> AllocationVector {
    use AssetClass::{EquityIndex, GiltBond, GoldEtf};

    let mut adjusted = *base;
    let z = signal.equity_z_score();

    if z > config.equity_z_threshold {
        // Equity rich: shed equity into the defensive pair.
        let headroom = adjusted.get(EquityIndex) - config.floors.get(EquityIndex);
        let shift = config
            .equity_shift_cap
            .min(slack.get(EquityIndex))
            .min(headroom)
            .max(0.0);
        if shift > 0.0 {
            debug!(z, shift, "equity overvalued, shifting out of equity");
            adjusted.set(EquityIndex, adjusted.get(EquityIndex) - shift);
            distribute(&mut adjusted, shift, &[GoldEtf, GiltBond]);
        }
    } else if z < -config.equity_z_threshold {
        // Equity cheap: pull weight in from the defensive pair.
        let want = config.equity_shift_cap.min(slack.get(EquityIndex)).max(0.0);
        let drawn = draw_proportionally(&mut adjusted, want, &[GoldEtf, GiltBond], &config.floors);
        if drawn > 0.0 {
            debug!(z, drawn, "equity undervalued, shifting into equity");
            adjusted.set(EquityIndex, adjusted.get(EquityIndex) + drawn);
        }
    }

    // Independent of the equity tilt: trim gold when it sits at its peak.
    if signal.gold_near_high(config.gold_high_fraction) {
        let headroom = adjusted.get(GoldEtf) - config.floors.get(GoldEtf);
        let shift = config.gold_shift_cap.min(headroom).max(0.0);
        if shift > 0.0 {
            debug!(
                gold_price = signal.gold_price,
                gold_1y_high = signal.gold_1y_high,
                shift,
                "gold at peak, shifting out of gold"
            );
            adjusted.set(GoldEtf, adjusted.get(GoldEtf) - shift);
            distribute(&mut adjusted, shift, &[EquityIndex, GiltBond]);
        }
    }

    renormalize(&mut adjusted);
    adjusted
}

/// Split `amount` across `targets` in proportion to their current weights.
/// When the targets carry no weight at all, split equally.
fn distribute(alloc: &mut AllocationVector, amount: f64, targets: &[AssetClass]) {
    let total: f64 = targets.iter().map(|c| alloc.get(*c)).sum();
    if total > 0.0 {
        for class in targets {
            let share = amount * alloc.get(*class) / total;
            alloc.set(*class, alloc.get(*class) + share);
        }
    } else {
        let share = amount / targets.len() as f64;
        for class in targets {
            alloc.set(*class, alloc.get(*class) + share);
        }
    }
}

/// Draw up to `want` points from `sources` in proportion to their current
/// weights, never taking any class below its floor. Returns the amount
/// actually drawn.
fn draw_proportionally(
    alloc: &mut AllocationVector,
    want: f64,
    sources: &[AssetClass],
    floors: &AllocationVector,
) -> f64 {
    let total: f64 = sources.iter().map(|c| alloc.get(*c)).sum();
    if total <= 0.0 || want <= 0.0 {
        return 0.0;
    }
    let mut drawn = 0.0;
    for class in sources {
        let desired = want * alloc.get(*class) / total;
        let available = (alloc.get(*class) - floors.get(*class)).max(0.0);
        let take = desired.min(available);
        alloc.set(*class, alloc.get(*class) - take);
        drawn += take;
    }
    drawn
}

/// Rescale to exactly 100 and hand any rounding residual to the
/// largest-weight class.
fn renormalize(alloc: &mut AllocationVector) {
    let sum = alloc.sum();
    if sum > 0.0 && (sum - 100.0).abs() > f64::EPSILON {
        let scale = 100.0 / sum;
        for class in AssetClass::ALL {
            alloc.set(class, (alloc.get(class) * scale).clamp(0.0, 100.0));
        }
    }
    let residual = 100.0 - alloc.sum();
    if residual != 0.0 {
        let largest = alloc.largest_class();
        alloc.set(largest, alloc.get(largest) + residual);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AllocationSlack;

    fn moderate_long_base() -> (AllocationVector, AllocationSlack) {
        use AssetClass::*;
        (
            AllocationVector::from_pairs(&[
                (EquityIndex, 55.0),
                (HybridMf, 10.0),
                (GiltBond, 15.0),
                (GoldEtf, 15.0),
                (FdLiquid, 5.0),
            ]),
            AllocationSlack::from_pairs(&[(EquityIndex, 10.0), (GiltBond, 5.0), (GoldEtf, 5.0)]),
        )
    }

    fn overvalued_equity_signal() -> MarketSignal {
        MarketSignal {
            nifty_pe: 28.0,
            nifty_pe_avg: 20.0,
            nifty_pe_stdev: 3.0,
            ..MarketSignal::neutral()
        }
    }

    #[test]
    fn test_neutral_signal_is_identity() {
        let (base, slack) = moderate_long_base();
        let out = apply_valuation_tilt(&base, &slack, &MarketSignal::neutral(), &TiltConfig::default());
        assert_eq!(out, base);
    }

    #[test]
    fn test_overvalued_equity_shifts_to_gold_and_gilt() {
        let (base, slack) = moderate_long_base();
        let out = apply_valuation_tilt(
            &base,
            &slack,
            &overvalued_equity_signal(),
            &TiltConfig::default(),
        );
        // 10 points leave equity, split evenly since gold and gilt are equal
        assert!((out.get(AssetClass::EquityIndex) - 45.0).abs() < 1e-9);
        assert!((out.get(AssetClass::GoldEtf) - 20.0).abs() < 1e-9);
        assert!((out.get(AssetClass::GiltBond) - 20.0).abs() < 1e-9);
        assert!(out.is_normalized(0.01));
    }

    #[test]
    fn test_undervalued_equity_draws_from_gold_and_gilt() {
        let (base, slack) = moderate_long_base();
        let signal = MarketSignal {
            nifty_pe: 12.0,
            ..overvalued_equity_signal()
        };
        let out = apply_valuation_tilt(&base, &slack, &signal, &TiltConfig::default());
        assert!((out.get(AssetClass::EquityIndex) - 65.0).abs() < 1e-9);
        assert!((out.get(AssetClass::GoldEtf) - 10.0).abs() < 1e-9);
        assert!((out.get(AssetClass::GiltBond) - 10.0).abs() < 1e-9);
        assert!(out.is_normalized(0.01));
    }

    #[test]
    fn test_draw_clamps_at_floor() {
        let (base, slack) = moderate_long_base();
        let signal = MarketSignal {
            nifty_pe: 12.0,
            ..overvalued_equity_signal()
        };
        let config = TiltConfig {
            floors: AllocationVector::from_pairs(&[
                (AssetClass::GoldEtf, 12.0),
                (AssetClass::GiltBond, 12.0),
            ]),
            ..TiltConfig::default()
        };
        let out = apply_valuation_tilt(&base, &slack, &signal, &config);
        // Each source only had 3 points above its floor, so equity gains 6
        assert!((out.get(AssetClass::EquityIndex) - 61.0).abs() < 1e-9);
        assert!(out.get(AssetClass::GoldEtf) >= 12.0 - 1e-9);
        assert!(out.get(AssetClass::GiltBond) >= 12.0 - 1e-9);
        assert!(out.is_normalized(0.01));
    }

    #[test]
    fn test_gold_peak_shifts_out_of_gold() {
        let (base, slack) = moderate_long_base();
        let signal = MarketSignal {
            gold_price: 2050.0,
            gold_1y_high: 2100.0,
            ..MarketSignal::neutral()
        };
        let out = apply_valuation_tilt(&base, &slack, &signal, &TiltConfig::default());
        assert!((out.get(AssetClass::GoldEtf) - 10.0).abs() < 1e-9);
        // 5 points split across equity (55) and gilt (15) by weight
        assert!((out.get(AssetClass::EquityIndex) - (55.0 + 5.0 * 55.0 / 70.0)).abs() < 1e-9);
        assert!((out.get(AssetClass::GiltBond) - (15.0 + 5.0 * 15.0 / 70.0)).abs() < 1e-9);
        assert!(out.is_normalized(0.01));
    }

    #[test]
    fn test_combined_tilts_still_normalized() {
        let (base, slack) = moderate_long_base();
        let signal = MarketSignal {
            gold_price: 2100.0,
            gold_1y_high: 2100.0,
            ..overvalued_equity_signal()
        };
        let out = apply_valuation_tilt(&base, &slack, &signal, &TiltConfig::default());
        assert!(out.is_normalized(0.01));
        for (_, pct) in out.iter() {
            assert!((0.0..=100.0).contains(&pct));
        }
    }

    #[test]
    fn test_degenerate_stdev_means_no_equity_tilt() {
        let (base, slack) = moderate_long_base();
        let signal = MarketSignal {
            nifty_pe: 40.0,
            nifty_pe_stdev: 0.0,
            ..MarketSignal::neutral()
        };
        let out = apply_valuation_tilt(&base, &slack, &signal, &TiltConfig::default());
        assert_eq!(out, base);
    }
}
