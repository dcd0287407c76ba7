use crate::core::scoring::calculate_match_score;
use crate::core::validate::validate_provider;
use crate::models::{ProviderRecord, QuizAnswers, ScoredResult, ScoringWeights};
use thiserror::Error;

/// Errors surfaced by the recommendation engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    #[error("quiz incomplete, unanswered steps: {}", .missing.join(", "))]
    IncompleteAnswers { missing: Vec<&'static str> },

    #[error("malformed provider record '{id}': invalid field '{field}'")]
    MalformedProvider { id: String, field: &'static str },
}

/// Result of one recommendation run
#[derive(Debug)]
pub struct RecommendationResult {
    pub results: Vec<ScoredResult>,
    pub total_providers: usize,
}

/// Recommendation orchestrator
///
/// # Pipeline stages
/// 1. Catalog record validation (fail fast on malformed data)
/// 2. Per-criterion scoring
/// 3. Percentage normalization against the maximum attainable score
/// 4. Stable descending sort (ties keep catalog order)
#[derive(Debug, Clone)]
pub struct Recommender {
    weights: ScoringWeights,
}

impl Recommender {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Score every provider in the catalog against a completed quiz
    ///
    /// Deterministic for fixed inputs: no clock, no randomness, no I/O.
    ///
    /// # Arguments
    /// * `providers` - The full provider catalog; an empty catalog yields an
    ///   empty result, not an error
    /// * `answers` - The completed five-step quiz
    ///
    /// # Returns
    /// One [`ScoredResult`] per provider, sorted by score descending. The
    /// shortlist cut shown to users (top 3 on the review site) belongs to
    /// the presentation layer; the engine never truncates.
    pub fn recommend(
        &self,
        providers: Vec<ProviderRecord>,
        answers: &QuizAnswers,
    ) -> Result<RecommendationResult, RecommendError> {
        let total_providers = providers.len();

        for provider in &providers {
            validate_provider(provider)?;
        }

        let max_score = self.weights.max_score();

        let mut results: Vec<ScoredResult> = providers
            .into_iter()
            .map(|provider| {
                let (score, _) = calculate_match_score(&provider, answers, &self.weights);
                let percentage = (score / max_score * 100.0).round().clamp(0.0, 100.0) as u8;

                ScoredResult {
                    id: provider.id,
                    name: provider.name,
                    slug: provider.slug,
                    overall_rating: provider.overall_rating,
                    speed_score: provider.speed_score,
                    security_score: provider.security_score,
                    streaming_score: provider.streaming_score,
                    price_monthly: provider.price_monthly,
                    price_yearly: provider.price_yearly,
                    price_two_year: provider.price_two_year,
                    max_devices: provider.max_devices,
                    countries: provider.countries,
                    free_tier: provider.free_tier,
                    torrent_support: provider.torrent_support,
                    netflix_support: provider.netflix_support,
                    kill_switch: provider.kill_switch,
                    no_logs: provider.no_logs,
                    affiliate_url: provider.affiliate_url,
                    match_score: score,
                    match_percentage: percentage,
                }
            })
            .collect();

        // Stable sort: equal scores keep catalog (editorial) order
        results.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(RecommendationResult {
            results,
            total_providers,
        })
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
