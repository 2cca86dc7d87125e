//! Spend insight handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::AppState;
use biztrack_core::insights::expense_entries;
use biztrack_core::models::{Insight, Transaction};

/// Request body for insights
#[derive(Debug, Deserialize)]
pub struct InsightRequest {
    pub business_id: String,
    #[serde(default)]
    pub expense_history: Vec<Transaction>,
}

/// Insights, or an empty list plus the reason they could not be computed
#[derive(Debug, Serialize)]
pub struct InsightResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub insights: Vec<Insight>,
}

/// POST /predict/insights - Flag categories with an outsized share of spend
pub async fn predict_insights(
    State(state): State<Arc<AppState>>,
    Json(request): Json<InsightRequest>,
) -> Json<InsightResponse> {
    let result = expense_entries(&request.expense_history, state.group_by, &state.resolver)
        .and_then(|entries| state.detector.detect(&entries));

    match result {
        Ok(insights) => {
            tracing::debug!(
                business_id = %request.business_id,
                expenses = request.expense_history.len(),
                insights = insights.len(),
                "Insights computed"
            );
            Json(InsightResponse {
                error: None,
                insights,
            })
        }
        Err(e) => {
            tracing::warn!(business_id = %request.business_id, error = %e, "Insight computation failed");
            Json(InsightResponse {
                error: Some(e.to_string()),
                insights: Vec::new(),
            })
        }
    }
}
