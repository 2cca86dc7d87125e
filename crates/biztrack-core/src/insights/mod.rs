//! Spend insights
//!
//! Expenses are grouped into categories (`grouping`), summed in first-occurrence order, and
//! every category over the share threshold is reported as an anomaly (`detector`). When
//! nothing stands out a single "healthy" info insight is returned instead.

pub mod detector;
pub mod grouping;

pub use detector::{CategorySpendMap, InsightDetector};
pub use grouping::expense_entries;
