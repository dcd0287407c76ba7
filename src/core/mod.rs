// Core algorithm exports
pub mod engine;
pub mod scoring;
pub mod session;
pub mod validate;

pub use engine::{RecommendError, RecommendationResult, Recommender};
pub use scoring::{calculate_match_score, ScoreBreakdown};
pub use session::QuizSession;
pub use validate::validate_provider;
