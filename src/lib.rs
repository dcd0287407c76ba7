//! VPNMatch - recommendation quiz scoring service for the VPN review platform
//!
//! The core is a pure scoring engine that ranks the provider catalog against
//! a completed five-step quiz and annotates every provider with a match
//! percentage. The service shell fetches the catalog from the site's content
//! store and records completed quizzes for conversion analytics.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_match_score, QuizSession, RecommendError, RecommendationResult, Recommender};
pub use crate::models::{ProviderRecord, QuizAnswers, RecommendRequest, RecommendResponse, ScoredResult, ScoringWeights};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let weights = ScoringWeights::default();
        assert_eq!(weights.max_score(), 100.0);
    }
}
