use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

use crate::models::QuizCompletion;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// Per-provider completion aggregate for the stats endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderCompletions {
    #[serde(rename = "providerId")]
    pub provider_id: String,
    pub completions: i64,
    #[serde(rename = "lastCompletedAt")]
    pub last_completed_at: chrono::DateTime<chrono::Utc>,
}

/// Stored quiz completion row, answers in wire spelling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCompletion {
    pub id: i64,
    #[serde(rename = "providerId")]
    pub provider_id: String,
    #[serde(rename = "providerSlug")]
    pub provider_slug: String,
    #[serde(rename = "primaryUse")]
    pub primary_use: String,
    pub budget: String,
    pub devices: String,
    #[serde(rename = "speedPriority")]
    pub speed_priority: String,
    pub location: String,
    #[serde(rename = "matchPercentage")]
    pub match_percentage: i16,
    #[serde(rename = "completedAt")]
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

/// PostgreSQL client for quiz completion analytics
///
/// Completions are the conversion signal for the review site: which
/// provider the quiz recommended and what the user answered. The content
/// store gets a best-effort mirror; this table is the source of truth.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, PostgresError> {
        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Record a completed quiz
    pub async fn record_completion(&self, completion: &QuizCompletion) -> Result<(), PostgresError> {
        let query = r#"
            INSERT INTO quiz_completions
                (provider_id, provider_slug, primary_use, budget, devices,
                 speed_priority, location, match_percentage, completed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#;

        sqlx::query(query)
            .bind(&completion.provider_id)
            .bind(&completion.provider_slug)
            .bind(completion.answers.primary_use.as_str())
            .bind(completion.answers.budget.as_str())
            .bind(completion.answers.devices.as_str())
            .bind(completion.answers.speed_priority.as_str())
            .bind(completion.answers.location.as_str())
            .bind(completion.match_percentage as i16)
            .bind(completion.completed_at)
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Recorded quiz completion: provider {} at {}%",
            completion.provider_id,
            completion.match_percentage
        );

        Ok(())
    }

    /// Completion counts per provider, most recommended first
    pub async fn completion_counts(&self) -> Result<Vec<ProviderCompletions>, PostgresError> {
        let query = r#"
            SELECT provider_id,
                   COUNT(*) AS completions,
                   MAX(completed_at) AS last_completed_at
            FROM quiz_completions
            GROUP BY provider_id
            ORDER BY completions DESC, provider_id
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let counts = rows
            .iter()
            .map(|row| ProviderCompletions {
                provider_id: row.get("provider_id"),
                completions: row.get("completions"),
                last_completed_at: row.get("last_completed_at"),
            })
            .collect();

        Ok(counts)
    }

    /// Most recent completions (for debugging/editorial review)
    pub async fn recent_completions(
        &self,
        limit: usize,
    ) -> Result<Vec<StoredCompletion>, PostgresError> {
        let query = r#"
            SELECT id, provider_id, provider_slug, primary_use, budget,
                   devices, speed_priority, location, match_percentage,
                   completed_at
            FROM quiz_completions
            ORDER BY completed_at DESC
            LIMIT $1
        "#;

        let rows = sqlx::query(query)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        let completions = rows
            .iter()
            .map(|row| StoredCompletion {
                id: row.get("id"),
                provider_id: row.get("provider_id"),
                provider_slug: row.get("provider_slug"),
                primary_use: row.get("primary_use"),
                budget: row.get("budget"),
                devices: row.get("devices"),
                speed_priority: row.get("speed_priority"),
                location: row.get("location"),
                match_percentage: row.get("match_percentage"),
                completed_at: row.get("completed_at"),
            })
            .collect();

        Ok(completions)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetTier, DeviceCount, PrimaryUse, QuizAnswers, Region, SpeedPriority};

    #[test]
    fn test_completion_binds_wire_spellings() {
        let completion = QuizCompletion {
            provider_id: "nord".to_string(),
            provider_slug: "nordicvpn".to_string(),
            answers: QuizAnswers {
                primary_use: PrimaryUse::Streaming,
                budget: BudgetTier::Midrange,
                devices: DeviceCount::ThreeToFive,
                speed_priority: SpeedPriority::NotPriority,
                location: Region::MiddleEast,
            },
            match_percentage: 97,
            completed_at: chrono::Utc::now(),
        };

        assert_eq!(completion.answers.devices.as_str(), "3-5");
        assert_eq!(completion.answers.speed_priority.as_str(), "notPriority");
        assert_eq!(completion.answers.location.as_str(), "middleEast");
    }
}
