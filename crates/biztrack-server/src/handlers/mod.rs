//! HTTP request handlers organized by prediction area
//!
//! Each submodule contains the handler and payload types for one endpoint.

pub mod categorize;
pub mod forecast;
pub mod health;
pub mod insights;

// Re-export all handlers for use in router
pub use categorize::*;
pub use forecast::*;
pub use health::*;
pub use insights::*;
