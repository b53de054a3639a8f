//! Buy-and-hold backtest simulator.
//!
//! Unit counts are fixed at the window start from each line item's amount and
//! never rebalanced. The simulation calendar is the merged set of quote dates
//! of the selected products inside the window; a product without a quote on
//! some calendar date is forward-filled from its last known price rather than
//! producing a gap.

use std::collections::BTreeSet;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BacktestError, InputError};
use crate::model::{
    BacktestResult, BacktestSummary, Comparator, PriceHistories, PriceSeries, Recommendation,
};

/// Trading days per year, used to annualize daily return statistics.
const TRADING_DAYS: f64 = 252.0;

/// Knobs for the simulator and its benchmark comparators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Symbol whose history drives the index-only comparator. The comparator
    /// is omitted when no history is supplied under this symbol.
    pub index_symbol: String,
    /// Assumed annual rate for the fixed-deposit comparator.
    pub fd_annual_rate: f64,
    /// Annual risk-free rate for the Sharpe ratio.
    pub risk_free_rate: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            index_symbol: "NIFTY50".to_string(),
            fd_annual_rate: 0.06,
            risk_free_rate: 0.06,
        }
    }
}

/// Replay historical prices through an assembled recommendation.
///
/// Every selected product must have a supplied series that starts on or
/// before `window_start`; anything less is reported, never silently
/// truncated.
pub fn backtest(
    recommendation: &Recommendation,
    histories: &PriceHistories,
    window_start: Date,
    window_end: Date,
    config: &BacktestConfig,
) -> Result<BacktestResult, BacktestError> {
    if window_start >= window_end {
        return Err(InputError::EmptyWindow {
            start: window_start,
            end: window_end,
        }
        .into());
    }

    // Fix unit counts at the window start.
    let mut holdings: Vec<(&PriceSeries, f64)> = Vec::with_capacity(recommendation.items.len());
    for item in &recommendation.items {
        let symbol = &item.product.symbol;
        let series = histories
            .get(symbol)
            .ok_or_else(|| BacktestError::MissingSeries {
                symbol: symbol.clone(),
            })?;
        let covers_start = series.start_date().is_some_and(|d| d <= window_start);
        let start_price = if covers_start {
            series.price_on_or_before(window_start)
        } else {
            None
        };
        let Some(start_price) = start_price else {
            return Err(BacktestError::InsufficientHistory {
                symbol: symbol.clone(),
                series_start: series.start_date(),
                window_start,
            });
        };
        let units = item.allocated_amount as f64 / start_price;
        holdings.push((series, units));
    }

    let dates = merged_calendar(holdings.iter().map(|(s, _)| *s), window_start, window_end);
    debug!(
        holdings = holdings.len(),
        calendar_days = dates.len(),
        %window_start,
        %window_end,
        "running buy-and-hold simulation"
    );

    let values: Vec<f64> = dates
        .iter()
        .map(|date| {
            holdings
                .iter()
                .map(|(series, units)| {
                    // Coverage of the window start guarantees a fill price.
                    units * series.price_on_or_before(*date).unwrap_or(0.0)
                })
                .sum()
        })
        .collect();

    let initial_amount = recommendation.total_amount as f64;
    let summary = summarize(&dates, &values, initial_amount, config.risk_free_rate);

    let index_only = index_comparator(histories, &dates, initial_amount, config);
    let fd_only = fd_comparator(&dates, initial_amount, config);

    Ok(BacktestResult {
        dates,
        values,
        initial_amount,
        summary,
        index_only,
        fd_only,
    })
}

/// Sorted union of all series' quote dates inside the window, with the
/// window start always present as the first simulation date.
fn merged_calendar<'a>(
    series: impl Iterator<Item = &'a PriceSeries>,
    window_start: Date,
    window_end: Date,
) -> Vec<Date> {
    let mut calendar = BTreeSet::new();
    calendar.insert(window_start);
    for s in series {
        for d in s.dates() {
            if d >= window_start && d <= window_end {
                calendar.insert(d);
            }
        }
    }
    calendar.into_iter().collect()
}

/// Summary statistics for one simulated value series.
fn summarize(dates: &[Date], values: &[f64], initial: f64, risk_free_rate: f64) -> BacktestSummary {
    let final_value = values.last().copied().unwrap_or(initial);

    let days = match (dates.first(), dates.last()) {
        (Some(first), Some(last)) => (*last - *first).get_days(),
        _ => 0,
    };

    let cagr = if days > 0 && initial > 0.0 && final_value > 0.0 {
        (final_value / initial).powf(365.25 / days as f64) - 1.0
    } else {
        0.0
    };

    let total_return = if initial > 0.0 {
        final_value / initial - 1.0
    } else {
        0.0
    };

    BacktestSummary {
        final_value,
        cagr,
        max_drawdown: max_drawdown(values),
        total_return,
        sharpe_ratio: sharpe_ratio(values, risk_free_rate),
    }
}

/// Worst peak-to-trough decline as a non-positive fraction of the peak.
fn max_drawdown(values: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;
    for &value in values {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            let drawdown = (value - peak) / peak;
            if drawdown < worst {
                worst = drawdown;
            }
        }
    }
    worst
}

/// Annualized Sharpe ratio of daily returns over the risk-free rate.
/// Zero when there are fewer than two returns or no variance.
fn sharpe_ratio(values: &[f64], risk_free_rate: f64) -> f64 {
    let daily_rf = risk_free_rate / TRADING_DAYS;
    let excess: Vec<f64> = values
        .windows(2)
        .filter(|w| w[0] > 0.0)
        .map(|w| w[1] / w[0] - 1.0 - daily_rf)
        .collect();
    if excess.len() < 2 {
        return 0.0;
    }
    let n = excess.len() as f64;
    let mean = excess.iter().sum::<f64>() / n;
    let variance = excess.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std_dev = variance.sqrt();
    if std_dev == 0.0 {
        return 0.0;
    }
    mean / std_dev * TRADING_DAYS.sqrt()
}

/// 100%-index benchmark over the same calendar, when index history covering
/// the window was supplied.
fn index_comparator(
    histories: &PriceHistories,
    dates: &[Date],
    initial: f64,
    config: &BacktestConfig,
) -> Option<Comparator> {
    let series = histories.get(&config.index_symbol)?;
    let window_start = *dates.first()?;
    if !series.start_date().is_some_and(|d| d <= window_start) {
        return None;
    }
    let start_price = series.price_on_or_before(window_start)?;
    let units = initial / start_price;
    let values: Vec<f64> = dates
        .iter()
        .map(|d| units * series.price_on_or_before(*d).unwrap_or(0.0))
        .collect();
    let summary = summarize(dates, &values, initial, config.risk_free_rate);
    Some(Comparator {
        label: format!("{} Only", config.index_symbol),
        values,
        summary,
    })
}

/// Fixed-deposit benchmark: continuous compounding-free growth at the
/// assumed annual rate, evaluated on the same calendar.
fn fd_comparator(dates: &[Date], initial: f64, config: &BacktestConfig) -> Comparator {
    let values: Vec<f64> = match dates.first() {
        Some(first) => dates
            .iter()
            .map(|d| {
                let days = (*d - *first).get_days() as f64;
                initial * (1.0 + config.fd_annual_rate).powf(days / 365.0)
            })
            .collect(),
        None => Vec::new(),
    };
    let summary = summarize(dates, &values, initial, config.risk_free_rate);
    Comparator {
        label: "Fixed Deposit Only".to_string(),
        values,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_drawdown_monotonic_series_is_zero() {
        assert_eq!(max_drawdown(&[100.0, 110.0, 125.0]), 0.0);
    }

    #[test]
    fn test_max_drawdown_is_negative_fraction_of_peak() {
        // Peak 120, trough 90: drawdown -25%
        let dd = max_drawdown(&[100.0, 120.0, 90.0, 115.0]);
        assert!((dd - (-0.25)).abs() < 1e-12);
    }

    #[test]
    fn test_sharpe_zero_variance() {
        assert_eq!(sharpe_ratio(&[100.0, 100.0, 100.0], 0.0), 0.0);
    }
}
