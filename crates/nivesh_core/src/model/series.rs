//! Time-indexed price/NAV series, the opaque historical input to the
//! backtest simulator.

use jiff::civil::Date;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// An ordered `(date, price)` series for one product symbol.
///
/// Points must be strictly ascending by date; construction sorts and
/// deduplicates (first quote wins for a duplicated date) so lookups can use
/// binary search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    points: Vec<(Date, f64)>,
}

impl PriceSeries {
    /// Build a series from unordered points.
    #[must_use]
    pub fn new(symbol: impl Into<String>, mut points: Vec<(Date, f64)>) -> Self {
        points.sort_by_key(|(d, _)| *d);
        points.dedup_by_key(|(d, _)| *d);
        Self {
            symbol: symbol.into(),
            points,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First date with a quote, if any.
    #[must_use]
    pub fn start_date(&self) -> Option<Date> {
        self.points.first().map(|(d, _)| *d)
    }

    /// Last date with a quote, if any.
    #[must_use]
    pub fn end_date(&self) -> Option<Date> {
        self.points.last().map(|(d, _)| *d)
    }

    /// All quote dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.points.iter().map(|(d, _)| *d)
    }

    /// Last known price on or before `date` (forward fill).
    ///
    /// Returns `None` when the series starts after `date`.
    #[must_use]
    pub fn price_on_or_before(&self, date: Date) -> Option<f64> {
        match self.points.binary_search_by_key(&date, |(d, _)| *d) {
            Ok(i) => Some(self.points[i].1),
            Err(0) => None,
            Err(i) => Some(self.points[i - 1].1),
        }
    }
}

/// Price histories keyed by product symbol, as handed over by the
/// out-of-scope data-fetching collaborator.
pub type PriceHistories = FxHashMap<String, PriceSeries>;

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_forward_fill_lookup() {
        let s = PriceSeries::new(
            "NIFTYBEES",
            vec![
                (date(2024, 1, 1), 100.0),
                (date(2024, 1, 3), 104.0),
                (date(2024, 1, 8), 110.0),
            ],
        );
        assert_eq!(s.price_on_or_before(date(2024, 1, 1)), Some(100.0));
        // Gap dates fill from the last known quote
        assert_eq!(s.price_on_or_before(date(2024, 1, 2)), Some(100.0));
        assert_eq!(s.price_on_or_before(date(2024, 1, 5)), Some(104.0));
        assert_eq!(s.price_on_or_before(date(2024, 2, 1)), Some(110.0));
        // Before the series starts there is nothing to fill from
        assert_eq!(s.price_on_or_before(date(2023, 12, 31)), None);
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let s = PriceSeries::new(
            "GOLDBEES",
            vec![(date(2024, 2, 1), 55.0), (date(2024, 1, 1), 50.0)],
        );
        assert_eq!(s.start_date(), Some(date(2024, 1, 1)));
        assert_eq!(s.end_date(), Some(date(2024, 2, 1)));
    }
}
