use crate::models::{ProviderRecord, QuizCompletion};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the content store
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("content API returned error: {0}")]
    ApiError(String),

    #[error("unauthorized: invalid content API key")]
    Unauthorized,

    #[error("invalid response format: {0}")]
    InvalidResponse(String),

    #[error("malformed provider record '{id}': missing field '{field}'")]
    MalformedRecord { id: String, field: &'static str },
}

/// Content store client
///
/// The review site keeps its provider catalog in a headless content store.
/// This client fetches the published catalog, normalizes each row into a
/// [`ProviderRecord`], and mirrors quiz completions back for the editorial
/// dashboards.
pub struct CatalogClient {
    base_url: String,
    api_key: String,
    client: Client,
    collections: CatalogCollections,
}

/// Collection names in the content store
#[derive(Debug, Clone)]
pub struct CatalogCollections {
    pub providers: String,
    pub quiz_completions: String,
}

/// Raw catalog row: the union of the curated shape (camelCase) and the CMS
/// shape (snake_case), with every scored field optional so one malformed
/// row is reported by id instead of failing the whole batch
#[derive(Debug, Deserialize)]
struct RawProvider {
    id: String,
    name: Option<String>,
    slug: Option<String>,
    #[serde(rename = "overallRating", alias = "overall_rating")]
    overall_rating: Option<f64>,
    #[serde(rename = "speedScore", alias = "speed_score")]
    speed_score: Option<u8>,
    #[serde(rename = "securityScore", alias = "security_score")]
    security_score: Option<u8>,
    #[serde(rename = "streamingScore", alias = "streaming_score")]
    streaming_score: Option<u8>,
    #[serde(rename = "priceMonthly", alias = "price_monthly")]
    price_monthly: Option<f64>,
    #[serde(rename = "priceYearly", alias = "price_yearly")]
    price_yearly: Option<f64>,
    #[serde(rename = "priceTwoYear", alias = "price_two_year", default)]
    price_two_year: Option<f64>,
    #[serde(rename = "maxDevices", alias = "max_devices")]
    max_devices: Option<u16>,
    countries: Option<u16>,
    #[serde(rename = "freeTier", alias = "free_tier", default)]
    free_tier: bool,
    #[serde(rename = "torrentSupport", alias = "torrent_support", default)]
    torrent_support: bool,
    #[serde(rename = "netflixSupport", alias = "netflix_support", default)]
    netflix_support: bool,
    #[serde(rename = "killSwitch", alias = "kill_switch", default)]
    kill_switch: bool,
    #[serde(rename = "noLogs", alias = "no_logs", default)]
    no_logs: bool,
    #[serde(rename = "affiliateUrl", alias = "affiliate_url")]
    affiliate_url: Option<String>,
}

impl RawProvider {
    /// Resolve the raw shape into a normalized record, rejecting rows that
    /// are missing a field the scoring engine depends on
    fn normalize(self) -> Result<ProviderRecord, CatalogError> {
        fn require<T>(value: Option<T>, id: &str, field: &'static str) -> Result<T, CatalogError> {
            value.ok_or_else(|| CatalogError::MalformedRecord {
                id: id.to_string(),
                field,
            })
        }

        let id = self.id;
        Ok(ProviderRecord {
            name: require(self.name, &id, "name")?,
            slug: require(self.slug, &id, "slug")?,
            overall_rating: require(self.overall_rating, &id, "overallRating")?,
            speed_score: require(self.speed_score, &id, "speedScore")?,
            security_score: require(self.security_score, &id, "securityScore")?,
            streaming_score: require(self.streaming_score, &id, "streamingScore")?,
            price_monthly: require(self.price_monthly, &id, "priceMonthly")?,
            price_yearly: require(self.price_yearly, &id, "priceYearly")?,
            // Genuinely optional: not every provider sells a two-year plan
            price_two_year: self.price_two_year,
            max_devices: require(self.max_devices, &id, "maxDevices")?,
            countries: require(self.countries, &id, "countries")?,
            free_tier: self.free_tier,
            torrent_support: self.torrent_support,
            netflix_support: self.netflix_support,
            kill_switch: self.kill_switch,
            no_logs: self.no_logs,
            affiliate_url: require(self.affiliate_url, &id, "affiliateUrl")?,
            id,
        })
    }
}

impl CatalogClient {
    /// Create a new content store client
    pub fn new(base_url: String, api_key: String, collections: CatalogCollections) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
            collections,
        }
    }

    /// Fetch the published provider catalog
    pub async fn fetch_providers(&self) -> Result<Vec<ProviderRecord>, CatalogError> {
        let filter = r#"{"status":{"_eq":"published"}}"#;
        let url = format!(
            "{}/items/{}?filter={}&limit=-1",
            self.base_url.trim_end_matches('/'),
            self.collections.providers,
            urlencoding::encode(filter)
        );

        tracing::debug!("Fetching provider catalog from: {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(CatalogError::Unauthorized);
        }
        if !status.is_success() {
            return Err(CatalogError::ApiError(format!(
                "Failed to fetch providers: {}",
                status
            )));
        }

        let json: Value = response.json().await?;

        let rows = json
            .get("data")
            .and_then(|d| d.as_array())
            .ok_or_else(|| CatalogError::InvalidResponse("missing data array".into()))?;

        let providers = rows
            .iter()
            .map(|row| {
                let raw: RawProvider = serde_json::from_value(row.clone()).map_err(|e| {
                    CatalogError::InvalidResponse(format!("failed to parse provider row: {}", e))
                })?;
                raw.normalize()
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Fetched {} providers from the content store", providers.len());

        Ok(providers)
    }

    /// Mirror a quiz completion into the content store (best-effort; the
    /// PostgreSQL record is the source of truth)
    pub async fn record_completion(&self, completion: &QuizCompletion) -> Result<(), CatalogError> {
        let url = format!(
            "{}/items/{}",
            self.base_url.trim_end_matches('/'),
            self.collections.quiz_completions
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(completion)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CatalogError::ApiError(format!(
                "Failed to record completion: {}",
                response.status()
            )));
        }

        tracing::debug!(
            "Mirrored quiz completion for provider {} to the content store",
            completion.provider_id
        );

        Ok(())
    }
}
