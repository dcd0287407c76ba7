use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::QuizSession;

/// Request to score the catalog against a quiz
///
/// `answers` carries the wizard session as-is; an incomplete session is
/// rejected with the missing step names rather than scored with defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    pub answers: QuizSession,
    /// Shortlist size; defaults to the configured value and is capped by
    /// the configured maximum
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Request to record a completed quiz for conversion analytics
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordCompletionRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "provider_id", rename = "providerId")]
    pub provider_id: String,
    pub answers: QuizSession,
    /// Percentage shown to the user for the chosen provider
    #[validate(range(max = 100))]
    #[serde(alias = "match_percentage", rename = "matchPercentage")]
    pub match_percentage: u8,
}
