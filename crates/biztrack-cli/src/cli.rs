//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// BizTrack - Financial intelligence for small businesses
#[derive(Parser)]
#[command(name = "biztrack")]
#[command(about = "Cash-flow forecasts, expense categorization, and spend insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Analytics config file (TOML); overrides BIZTRACK_CONFIG
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Categorizer artifact; overrides BIZTRACK_MODEL_PATH
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the prediction API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
    },

    /// Forecast income and expenses from history files (JSON or CSV)
    Forecast {
        /// Income history file
        #[arg(short, long)]
        income: Option<PathBuf>,

        /// Expense history file
        #[arg(short, long)]
        expense: Option<PathBuf>,

        /// Days to forecast (config default when omitted)
        #[arg(short, long)]
        days: Option<u32>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Suggest categories for transaction descriptions
    Categorize {
        /// Descriptions to categorize
        descriptions: Vec<String>,

        /// Transaction file whose descriptions should be categorized
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Flag expense categories with an outsized share of spend
    Insights {
        /// Expense history file (JSON or CSV)
        #[arg(short, long)]
        file: PathBuf,

        /// Grouping key: description, vendor, suggested_category (config default when omitted)
        #[arg(short, long)]
        group_by: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Train the categorizer and save its artifact
    TrainCategorizer {
        /// Labeled CSV (`description,category`); built-in seed set when omitted
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Additive smoothing
        #[arg(long, default_value = "0.1")]
        alpha: f64,
    },

    /// Show the resolved analytics configuration
    Config,
}
