//! The fixed set of asset classes the engine allocates across.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An investable asset class.
///
/// The set is closed: the allocation table, the tilt engine, and the
/// assembler all iterate these five classes in the canonical order below.
/// That order is also the outermost tie-break for anything that walks the
/// whole portfolio, so reordering variants is a breaking change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AssetClass {
    /// Broad-market index funds/ETFs (Nifty 50 trackers and the like).
    EquityIndex,
    /// Hybrid/balanced mutual funds mixing equity and debt.
    HybridMf,
    /// Government bond (gilt) funds.
    GiltBond,
    /// Gold exchange-traded funds.
    GoldEtf,
    /// Fixed deposits and liquid funds.
    FdLiquid,
}

impl AssetClass {
    /// All asset classes in canonical order.
    pub const ALL: [AssetClass; 5] = [
        AssetClass::EquityIndex,
        AssetClass::HybridMf,
        AssetClass::GiltBond,
        AssetClass::GoldEtf,
        AssetClass::FdLiquid,
    ];

    /// Number of asset classes.
    pub const COUNT: usize = Self::ALL.len();

    /// Dense array index for this class.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            AssetClass::EquityIndex => 0,
            AssetClass::HybridMf => 1,
            AssetClass::GiltBond => 2,
            AssetClass::GoldEtf => 3,
            AssetClass::FdLiquid => 4,
        }
    }

    /// Human-readable label for caller-side display.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AssetClass::EquityIndex => "Equity Index",
            AssetClass::HybridMf => "Hybrid Mutual Fund",
            AssetClass::GiltBond => "Gilt / Bond",
            AssetClass::GoldEtf => "Gold ETF",
            AssetClass::FdLiquid => "FD / Liquid",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_canonical_order() {
        for (i, class) in AssetClass::ALL.iter().enumerate() {
            assert_eq!(class.index(), i);
        }
    }
}
