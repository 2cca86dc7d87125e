//! Categorization handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};
use biztrack_core::models::Transaction;

/// Request body for categorization
#[derive(Debug, Deserialize)]
pub struct CategorizationRequest {
    pub transactions: Vec<Transaction>,
}

/// One suggestion, echoing the submitted description
#[derive(Debug, Serialize)]
pub struct CategorizedTransaction {
    pub description: Option<String>,
    pub suggested_category: String,
    pub confidence: f64,
}

#[derive(Debug, Serialize)]
pub struct CategorizationResponse {
    pub predictions: Vec<CategorizedTransaction>,
}

/// POST /predict/category - Suggest a category for each transaction
///
/// Predictions come back in request order, one per transaction.
pub async fn predict_category(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CategorizationRequest>,
) -> Result<Json<CategorizationResponse>, AppError> {
    let descriptions: Vec<String> = request
        .transactions
        .iter()
        .map(|tx| tx.description_text().to_string())
        .collect();

    let suggestions = state.resolver.resolve(&descriptions)?;

    tracing::debug!(
        count = suggestions.len(),
        categorizer = state.resolver.kind(),
        "Categorized transactions"
    );

    let predictions = request
        .transactions
        .into_iter()
        .zip(suggestions)
        .map(|(tx, suggestion)| CategorizedTransaction {
            description: tx.description,
            suggested_category: suggestion.category,
            confidence: suggestion.confidence,
        })
        .collect();

    Ok(Json(CategorizationResponse { predictions }))
}
