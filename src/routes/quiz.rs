use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{RecommendError, Recommender};
use crate::models::{
    ErrorResponse, HealthResponse, ProviderRecord, QuizCompletion, RecommendRequest,
    RecommendResponse, RecordCompletionRequest, RecordCompletionResponse,
};
use crate::services::{CacheKey, CacheManager, CatalogClient, PostgresClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogClient>,
    pub cache: Arc<CacheManager>,
    pub postgres: Arc<PostgresClient>,
    pub recommender: Recommender,
    pub default_shortlist: usize,
    pub max_shortlist: usize,
}

/// Configure all quiz-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/quiz/recommendations", web::post().to(get_recommendations))
        .route("/quiz/completions", web::post().to(record_completion))
        .route("/quiz/completions/recent", web::get().to(recent_completions))
        .route("/quiz/stats", web::get().to(completion_stats));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Load the provider catalog, preferring the cache
async fn load_catalog(state: &AppState) -> Result<Vec<ProviderRecord>, HttpResponse> {
    let cache_key = CacheKey::providers();

    if let Ok(providers) = state.cache.get::<Vec<ProviderRecord>>(&cache_key).await {
        return Ok(providers);
    }

    match state.catalog.fetch_providers().await {
        Ok(providers) => {
            if let Err(e) = state.cache.set(&cache_key, &providers).await {
                tracing::warn!("Failed to cache provider catalog: {}", e);
            }
            Ok(providers)
        }
        Err(e) => {
            tracing::error!("Failed to fetch provider catalog: {}", e);
            Err(HttpResponse::BadGateway().json(ErrorResponse {
                error: "Catalog unavailable".to_string(),
                message: e.to_string(),
                status_code: 502,
            }))
        }
    }
}

/// Quiz recommendations endpoint
///
/// POST /api/v1/quiz/recommendations
///
/// Request body:
/// ```json
/// {
///   "answers": {
///     "primaryUse": "streaming",
///     "budget": "midrange",
///     "devices": "3-5",
///     "speedPriority": "important",
///     "location": "europe"
///   },
///   "limit": 3
/// }
/// ```
async fn get_recommendations(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    // An unfinished wizard must never reach scoring
    let answers = match req.answers.finish() {
        Ok(answers) => answers,
        Err(e) => {
            tracing::info!("Rejected incomplete quiz: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Incomplete answers".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    let limit = req
        .limit
        .unwrap_or(state.default_shortlist)
        .min(state.max_shortlist);

    let providers = match load_catalog(&state).await {
        Ok(providers) => providers,
        Err(response) => return response,
    };

    let result = match state.recommender.recommend(providers, &answers) {
        Ok(result) => result,
        Err(e @ RecommendError::MalformedProvider { .. }) => {
            tracing::error!("Catalog data error: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Catalog data error".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
        Err(e) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid request".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    // Presentation cut: the engine scored the full catalog, only the top
    // picks are surfaced to the user
    let total_providers = result.total_providers;
    let mut recommendations = result.results;
    recommendations.truncate(limit);

    tracing::info!(
        "Returning {} recommendations ({} providers scored, primary use: {})",
        recommendations.len(),
        total_providers,
        answers.primary_use.as_str()
    );

    HttpResponse::Ok().json(RecommendResponse {
        recommendations,
        total_providers,
    })
}

/// Record quiz completion endpoint
///
/// POST /api/v1/quiz/completions
///
/// Request body:
/// ```json
/// {
///   "providerId": "string",
///   "answers": { ...all five steps... },
///   "matchPercentage": 97
/// }
/// ```
async fn record_completion(
    state: web::Data<AppState>,
    req: web::Json<RecordCompletionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let answers = match req.answers.finish() {
        Ok(answers) => answers,
        Err(e) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Incomplete answers".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    // Resolve the provider against the catalog so completions only ever
    // reference real records (and pick up the slug for the dashboards)
    let providers = match load_catalog(&state).await {
        Ok(providers) => providers,
        Err(response) => return response,
    };

    let provider = match providers.iter().find(|p| p.id == req.provider_id) {
        Some(provider) => provider,
        None => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Unknown provider".to_string(),
                message: format!("No provider with id '{}' in the catalog", req.provider_id),
                status_code: 404,
            });
        }
    };

    let completion = QuizCompletion {
        provider_id: provider.id.clone(),
        provider_slug: provider.slug.clone(),
        answers,
        match_percentage: req.match_percentage,
        completed_at: chrono::Utc::now(),
    };

    // PostgreSQL is the source of truth; the content store mirror is
    // best-effort for the editorial dashboards
    match state.postgres.record_completion(&completion).await {
        Ok(()) => {
            if let Err(e) = state.catalog.record_completion(&completion).await {
                tracing::warn!(
                    "Completion recorded in PostgreSQL but content store mirror failed: {}",
                    e
                );
            }

            // The aggregate is stale now
            if let Err(e) = state.cache.delete(&CacheKey::completion_stats()).await {
                tracing::warn!("Failed to invalidate stats cache: {}", e);
            }

            HttpResponse::Ok().json(RecordCompletionResponse {
                success: true,
                completion_id: uuid::Uuid::new_v4().to_string(),
            })
        }
        Err(e) => {
            tracing::error!("Failed to record quiz completion: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to record completion".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Most recent completions
///
/// GET /api/v1/quiz/completions/recent?limit=20
///
/// Raw completion rows for editorial review and debugging.
async fn recent_completions(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let limit = query
        .get("limit")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(20)
        .min(100);

    match state.postgres.recent_completions(limit).await {
        Ok(completions) => {
            let count = completions.len();
            HttpResponse::Ok().json(serde_json::json!({
                "completions": completions,
                "count": count,
            }))
        }
        Err(e) => {
            tracing::error!("Failed to fetch recent completions: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch completions".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Per-provider completion counts
///
/// GET /api/v1/quiz/stats
async fn completion_stats(state: web::Data<AppState>) -> impl Responder {
    let cache_key = CacheKey::completion_stats();

    if let Ok(counts) = state
        .cache
        .get::<Vec<crate::services::ProviderCompletions>>(&cache_key)
        .await
    {
        let count = counts.len();
        return HttpResponse::Ok().json(serde_json::json!({
            "providers": counts,
            "count": count,
        }));
    }

    match state.postgres.completion_counts().await {
        Ok(counts) => {
            if let Err(e) = state.cache.set(&cache_key, &counts).await {
                tracing::warn!("Failed to cache completion stats: {}", e);
            }

            let count = counts.len();
            HttpResponse::Ok().json(serde_json::json!({
                "providers": counts,
                "count": count,
            }))
        }
        Err(e) => {
            tracing::error!("Failed to fetch completion stats: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch stats".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
