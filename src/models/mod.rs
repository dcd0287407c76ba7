// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BudgetTier, DeviceCount, PrimaryUse, ProviderRecord, QuizAnswers, QuizCompletion, Region,
    ScoredResult, ScoringWeights, SpeedPriority,
};
pub use requests::{RecommendRequest, RecordCompletionRequest};
pub use responses::{ErrorResponse, HealthResponse, RecommendResponse, RecordCompletionResponse};
