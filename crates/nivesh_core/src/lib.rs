//! Goal-based allocation and backtest engine
//!
//! This crate is the computational core of a robo-advisory flow. It maps a
//! questionnaire risk score and horizon onto a risk tier and horizon bucket,
//! looks up a baseline split across five Indian asset classes, tilts that
//! split with market-valuation signals (Nifty P/E z-score, gold vs. its
//! trailing-year high), ranks candidate products per class with a weighted
//! linear score, assembles concrete line items with exact integer-paise
//! accounting, and validates the result with a buy-and-hold backtest against
//! index-only and fixed-deposit benchmarks.
//!
//! Everything around it — questionnaire UI, persistence, authentication,
//! and data fetching — lives in out-of-scope collaborator layers. Those
//! layers hand the core already-fetched, immutable values and consume the
//! returned [`model::Recommendation`] and [`model::BacktestResult`].
//!
//! ```ignore
//! use nivesh_core::engine::{EngineConfig, RecommendRequest, recommend};
//! use nivesh_core::backtest::backtest;
//!
//! let config = EngineConfig::default();
//! let recommendation = recommend(&request, &config)?;
//! let result = backtest(
//!     &recommendation,
//!     &histories,
//!     window_start,
//!     window_end,
//!     &config.backtest,
//! )?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod assemble;
pub mod backtest;
pub mod classify;
pub mod engine;
pub mod error;
pub mod score;
pub mod table;
pub mod tilt;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use backtest::{BacktestConfig, backtest};
pub use engine::{EngineConfig, RecommendRequest, recommend};
pub use error::{BacktestError, ConfigError, InputError, RecommendError};
