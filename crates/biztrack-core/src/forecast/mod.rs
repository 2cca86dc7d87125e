//! Cash-flow forecasting
//!
//! Turns a stream's transaction history into a shaped forecast:
//!
//! - **Seasonality** - picks weekly/yearly components from the history span
//! - **Model** - fitting capability (`SeasonalModel`) with a built-in additive implementation
//! - **Engine** - fits, predicts over history + horizon, and shapes the result
//! - **Trend** - one growth percentage from the first and last predicted point
//! - **Fallback** - deterministic placeholder when history is too thin to fit
//! - **Cash flow** - runs income and expense streams and substitutes the fallback
//!
//! ## Usage
//!
//! ```rust,ignore
//! use biztrack_core::forecast::CashFlowForecaster;
//!
//! let forecaster = CashFlowForecaster::new(&config.forecast);
//! let result = forecaster.forecast(&income, &expense, 30)?;
//! println!("income trend: {}%", result.income.trend_percentage);
//! ```

pub mod additive;
pub mod cash_flow;
pub mod engine;
pub mod fallback;
pub mod model;
pub mod seasonality;
pub mod trend;

pub use additive::AdditiveSeasonalModel;
pub use cash_flow::{CashFlowForecast, CashFlowForecaster};
pub use engine::ForecastEngine;
pub use fallback::FallbackForecastGenerator;
pub use model::{make_future_dates, FittedModel, ModelPrediction, SeasonalModel};
pub use seasonality::{select_seasonality, SeasonalitySettings, YEARLY_SPAN_THRESHOLD_DAYS};
pub use trend::{compute_trend, TREND_EPSILON};
