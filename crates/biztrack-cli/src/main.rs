//! BizTrack CLI - Financial analytics for small businesses
//!
//! Usage:
//!   biztrack serve --port 8000                    Start the prediction API
//!   biztrack forecast --income in.csv --days 30   Forecast cash flow
//!   biztrack categorize "Uber to client"          Suggest a category
//!   biztrack insights --file expenses.json        Find spend anomalies
//!   biztrack train-categorizer                    Train the categorizer

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Environment from .env, if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config_path = commands::config_path(cli.config.as_deref());
    let model_path = commands::model_path(cli.model.as_deref());

    match cli.command {
        Commands::Serve { port, host } => {
            let analytics = commands::load_config(config_path.as_deref())?;
            commands::cmd_serve(&analytics, &model_path, &host, port).await
        }
        Commands::Forecast {
            income,
            expense,
            days,
            json,
        } => {
            let analytics = commands::load_config(config_path.as_deref())?;
            commands::cmd_forecast(&analytics, income.as_deref(), expense.as_deref(), days, json)
        }
        Commands::Categorize {
            descriptions,
            file,
            json,
        } => {
            let analytics = commands::load_config(config_path.as_deref())?;
            commands::cmd_categorize(&analytics, &model_path, descriptions, file.as_deref(), json)
        }
        Commands::Insights {
            file,
            group_by,
            json,
        } => {
            let analytics = commands::load_config(config_path.as_deref())?;
            commands::cmd_insights(&analytics, &model_path, &file, group_by.as_deref(), json)
        }
        Commands::TrainCategorizer { data, alpha } => {
            commands::cmd_train_categorizer(data.as_deref(), &model_path, alpha)
        }
        Commands::Config => commands::cmd_config(config_path.as_deref()),
    }
}
