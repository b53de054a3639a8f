//! Backtest output: the simulated value series and its summary statistics.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Summary statistics over one simulated value series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BacktestSummary {
    /// Portfolio value on the last simulated date, in paise.
    pub final_value: f64,
    /// Compound annual growth rate as a decimal fraction (0.10 = 10%/yr).
    pub cagr: f64,
    /// Worst peak-to-trough decline as a non-positive fraction of the peak
    /// (-0.25 = a 25% drawdown; 0 = the series never fell below a peak).
    pub max_drawdown: f64,
    /// Total return over the window as a decimal fraction.
    pub total_return: f64,
    /// Annualized Sharpe ratio of daily returns against the configured
    /// risk-free rate. 0 when the return series has no variance.
    pub sharpe_ratio: f64,
}

/// A benchmark series simulated with the same buy-and-hold method over the
/// same window, for apples-to-apples comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparator {
    /// Display label, e.g. "Nifty 50 Only" or "Fixed Deposit Only".
    pub label: String,
    pub values: Vec<f64>,
    pub summary: BacktestSummary,
}

/// The full result of one backtest request. Computed per request, never
/// persisted by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Simulation calendar: the merged quote dates of all selected products
    /// inside the window, ascending.
    pub dates: Vec<Date>,
    /// Portfolio value (paise) on each calendar date.
    pub values: Vec<f64>,
    /// Starting amount, in paise.
    pub initial_amount: f64,
    pub summary: BacktestSummary,
    /// Index-only benchmark; present when the configured index symbol had
    /// history supplied.
    pub index_only: Option<Comparator>,
    /// Fixed-deposit benchmark at the configured assumed annual rate.
    pub fd_only: Comparator,
}
