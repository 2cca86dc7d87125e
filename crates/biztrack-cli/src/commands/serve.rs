//! Server command implementation

use std::path::Path;

use anyhow::Result;

use biztrack_core::config::AnalyticsConfig;
use biztrack_server::ServerConfig;

/// Environment variable with comma-separated CORS origins
pub const ALLOWED_ORIGINS_ENV: &str = "BIZTRACK_ALLOWED_ORIGINS";

pub async fn cmd_serve(
    analytics: &AnalyticsConfig,
    model_path: &Path,
    host: &str,
    port: u16,
) -> Result<()> {
    println!("🚀 Starting BizTrack prediction server...");
    println!("   Listening: http://{}:{}", host, port);
    println!("   Categorizer artifact: {}", model_path.display());

    let config = ServerConfig::with_origins(&std::env::var(ALLOWED_ORIGINS_ENV).unwrap_or_default());
    if config.allowed_origins.is_empty() {
        println!("   🌐 CORS: any origin (set {} to restrict)", ALLOWED_ORIGINS_ENV);
    } else {
        println!("   🌐 CORS: {}", config.allowed_origins.join(", "));
    }
    println!();

    biztrack_server::serve_with_config(host, port, analytics, Some(model_path), config).await
}
