use serde::{Deserialize, Serialize};

use crate::models::domain::ScoredResult;

/// Response for the recommendations endpoint: the shortlist plus how many
/// providers were scored to produce it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<ScoredResult>,
    #[serde(rename = "totalProviders")]
    pub total_providers: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Record completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordCompletionResponse {
    pub success: bool,
    #[serde(rename = "completionId")]
    pub completion_id: String,
}
