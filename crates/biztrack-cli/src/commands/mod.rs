//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `common` - Shared utilities (config and model path resolution, history loading)
//! - `categorize` - Category suggestions for descriptions
//! - `forecast` - Cash-flow forecast from history files
//! - `insights` - Spend anomaly detection
//! - `serve` - Web server command
//! - `training` - Categorizer training and config display

pub mod categorize;
pub mod common;
pub mod forecast;
pub mod insights;
pub mod serve;
pub mod training;

// Re-export command functions for main.rs
pub use categorize::*;
pub use common::*;
pub use forecast::*;
pub use insights::*;
pub use serve::*;
pub use training::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
