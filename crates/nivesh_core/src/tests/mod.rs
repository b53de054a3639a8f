//! Scenario tests for the recommendation engine
//!
//! Tests are organized by topic:
//! - `end_to_end` - The full classify → tilt → score → assemble pipeline
//! - `backtest_sim` - Buy-and-hold simulation and its summary statistics
//!
//! Unit tests for individual rules live next to their modules.

mod end_to_end;
