mod allocation;
mod asset;
mod product;
mod profile;
mod recommendation;
mod results;
mod series;
mod signal;

pub use allocation::{AllocationSlack, AllocationVector, SUM_EPSILON};
pub use asset::AssetClass;
pub use product::{Product, ProductScore};
pub use profile::{GoalType, HorizonBucket, RiskProfile};
pub use recommendation::{LineItem, Paise, Recommendation, rupees};
pub use results::{BacktestResult, BacktestSummary, Comparator};
pub use series::{PriceHistories, PriceSeries};
pub use signal::MarketSignal;
