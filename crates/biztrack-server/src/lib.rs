//! BizTrack Web Server
//!
//! Axum-based prediction API for the BizTrack accounting product.
//!
//! - `POST /predict/category` suggests a category per transaction
//! - `POST /predict/forecast` forecasts income and expense streams
//! - `POST /predict/insights` flags categories with an outsized share of spend
//! - `GET /` reports service health
//!
//! The categorizer is chosen once at startup and shared read-only across requests.
//! Model fitting runs on the blocking thread pool.

use std::path::Path;
use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use biztrack_core::categorize::CategoryResolver;
use biztrack_core::config::{AnalyticsConfig, GroupBy};
use biztrack_core::forecast::CashFlowForecaster;
use biztrack_core::insights::InsightDetector;

mod handlers;

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "BizTrack AI Engine";

/// Longest forecast horizon a request may ask for (ten years of days)
pub const MAX_FORECAST_DAYS: i64 = 3650;

/// Server configuration
#[derive(Clone, Debug, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty or containing "*" = any origin)
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Parse a comma-separated origin list (as found in `BIZTRACK_ALLOWED_ORIGINS`)
    pub fn with_origins(origins: &str) -> Self {
        Self {
            allowed_origins: origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
        }
    }

    fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

/// Shared application state
pub struct AppState {
    pub forecaster: CashFlowForecaster,
    pub resolver: CategoryResolver,
    pub detector: InsightDetector,
    /// Grouping key for insight requests
    pub group_by: GroupBy,
    /// Horizon used when a forecast request omits `days`
    pub default_days: i64,
}

impl AppState {
    pub fn new(analytics: &AnalyticsConfig, resolver: CategoryResolver) -> Self {
        Self {
            forecaster: CashFlowForecaster::new(&analytics.forecast),
            resolver,
            detector: InsightDetector::from_config(&analytics.insights),
            group_by: analytics.insights.group_by,
            default_days: i64::from(analytics.forecast.default_days),
        }
    }
}

/// Build the router around an already-initialized categorizer
pub fn create_router(
    analytics: &AnalyticsConfig,
    resolver: CategoryResolver,
    config: ServerConfig,
) -> Router {
    let state = Arc::new(AppState::new(analytics, resolver));

    let predict_routes = Router::new()
        .route("/category", post(handlers::predict_category))
        .route("/forecast", post(handlers::predict_forecast))
        .route("/insights", post(handlers::predict_insights));

    // Build CORS layer
    let cors = if config.allows_any_origin() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    Router::new()
        .route("/", get(handlers::health_check))
        .nest("/predict", predict_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
}

/// Start the server
pub async fn serve(
    host: &str,
    port: u16,
    analytics: &AnalyticsConfig,
    model_path: Option<&Path>,
) -> anyhow::Result<()> {
    serve_with_config(host, port, analytics, model_path, ServerConfig::default()).await
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    host: &str,
    port: u16,
    analytics: &AnalyticsConfig,
    model_path: Option<&Path>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if config.allows_any_origin() {
        warn!("CORS allows any origin; set BIZTRACK_ALLOWED_ORIGINS to restrict");
    }

    let resolver = CategoryResolver::initialize(&analytics.categorize, model_path);
    info!(
        categorizer = resolver.kind(),
        group_by = analytics.insights.group_by.as_str(),
        threshold = analytics.insights.anomaly_threshold,
        "Prediction services ready"
    );

    let app = create_router(analytics, resolver, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unexpected failure inside a handler (a panicked fitting task, a resolver error)
///
/// Expected failures are reported in the response body instead; this always maps to a
/// 500 with a generic message while the cause goes to the log.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Request failed");

        let body = Json(serde_json::json!({
            "error": "An internal error occurred"
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
