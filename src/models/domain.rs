use serde::{Deserialize, Serialize};

/// VPN provider record, normalized at the catalog boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRecord {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(rename = "overallRating")]
    pub overall_rating: f64,
    #[serde(rename = "speedScore")]
    pub speed_score: u8,
    #[serde(rename = "securityScore")]
    pub security_score: u8,
    #[serde(rename = "streamingScore")]
    pub streaming_score: u8,
    #[serde(rename = "priceMonthly")]
    pub price_monthly: f64,
    #[serde(rename = "priceYearly")]
    pub price_yearly: f64,
    #[serde(rename = "priceTwoYear", default)]
    pub price_two_year: Option<f64>,
    #[serde(rename = "maxDevices")]
    pub max_devices: u16,
    pub countries: u16,
    #[serde(rename = "freeTier", default)]
    pub free_tier: bool,
    #[serde(rename = "torrentSupport", default)]
    pub torrent_support: bool,
    #[serde(rename = "netflixSupport", default)]
    pub netflix_support: bool,
    #[serde(rename = "killSwitch", default)]
    pub kill_switch: bool,
    #[serde(rename = "noLogs", default)]
    pub no_logs: bool,
    #[serde(rename = "affiliateUrl")]
    pub affiliate_url: String,
}

impl ProviderRecord {
    /// Effective monthly price: the two-year plan rate when the provider
    /// offers one, otherwise the yearly rate
    pub fn effective_price(&self) -> f64 {
        self.price_two_year.unwrap_or(self.price_yearly)
    }

    /// Plans with 100+ simultaneous connections are sold as "unlimited"
    pub fn unlimited_devices(&self) -> bool {
        self.max_devices >= 100
    }
}

/// What the user mainly needs the VPN for (quiz step 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryUse {
    Streaming,
    Privacy,
    Gaming,
    Torrenting,
    Work,
    Other,
}

impl PrimaryUse {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimaryUse::Streaming => "streaming",
            PrimaryUse::Privacy => "privacy",
            PrimaryUse::Gaming => "gaming",
            PrimaryUse::Torrenting => "torrenting",
            PrimaryUse::Work => "work",
            PrimaryUse::Other => "other",
        }
    }
}

/// Monthly price bracket the user is willing to pay (quiz step 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Free,
    Budget,
    Midrange,
    Premium,
}

impl BudgetTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Free => "free",
            BudgetTier::Budget => "budget",
            BudgetTier::Midrange => "midrange",
            BudgetTier::Premium => "premium",
        }
    }
}

/// How many devices connect at once (quiz step 3); wire spellings match
/// the ranges shown in the quiz UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceCount {
    #[serde(rename = "1-2")]
    OneToTwo,
    #[serde(rename = "3-5")]
    ThreeToFive,
    #[serde(rename = "6-10")]
    SixToTen,
    #[serde(rename = "unlimited")]
    Unlimited,
}

impl DeviceCount {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceCount::OneToTwo => "1-2",
            DeviceCount::ThreeToFive => "3-5",
            DeviceCount::SixToTen => "6-10",
            DeviceCount::Unlimited => "unlimited",
        }
    }
}

/// How much connection speed matters (quiz step 4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpeedPriority {
    Critical,
    Important,
    NotPriority,
}

impl SpeedPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedPriority::Critical => "critical",
            SpeedPriority::Important => "important",
            SpeedPriority::NotPriority => "notPriority",
        }
    }
}

/// Where the user mostly connects from (quiz step 5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Region {
    Europe,
    NorthAmerica,
    Asia,
    MiddleEast,
    Other,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Europe => "europe",
            Region::NorthAmerica => "northAmerica",
            Region::Asia => "asia",
            Region::MiddleEast => "middleEast",
            Region::Other => "other",
        }
    }
}

/// A fully answered quiz, complete by construction; partial drafts live in
/// [`crate::core::QuizSession`] until every step has a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswers {
    #[serde(rename = "primaryUse")]
    pub primary_use: PrimaryUse,
    pub budget: BudgetTier,
    pub devices: DeviceCount,
    #[serde(rename = "speedPriority")]
    pub speed_priority: SpeedPriority,
    pub location: Region,
}

/// Scored provider produced by one recommendation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredResult {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(rename = "overallRating")]
    pub overall_rating: f64,
    #[serde(rename = "speedScore")]
    pub speed_score: u8,
    #[serde(rename = "securityScore")]
    pub security_score: u8,
    #[serde(rename = "streamingScore")]
    pub streaming_score: u8,
    #[serde(rename = "priceMonthly")]
    pub price_monthly: f64,
    #[serde(rename = "priceYearly")]
    pub price_yearly: f64,
    #[serde(rename = "priceTwoYear")]
    pub price_two_year: Option<f64>,
    #[serde(rename = "maxDevices")]
    pub max_devices: u16,
    pub countries: u16,
    #[serde(rename = "freeTier")]
    pub free_tier: bool,
    #[serde(rename = "torrentSupport")]
    pub torrent_support: bool,
    #[serde(rename = "netflixSupport")]
    pub netflix_support: bool,
    #[serde(rename = "killSwitch")]
    pub kill_switch: bool,
    #[serde(rename = "noLogs")]
    pub no_logs: bool,
    #[serde(rename = "affiliateUrl")]
    pub affiliate_url: String,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    #[serde(rename = "matchPercentage")]
    pub match_percentage: u8,
}

/// Completed quiz event for conversion analytics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizCompletion {
    #[serde(rename = "providerId")]
    pub provider_id: String,
    #[serde(rename = "providerSlug")]
    pub provider_slug: String,
    pub answers: QuizAnswers,
    #[serde(rename = "matchPercentage")]
    pub match_percentage: u8,
    #[serde(rename = "completedAt")]
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

/// Points awarded per criterion; the sum is the maximum attainable score
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub primary_use: f64,
    pub budget: f64,
    pub devices: f64,
    pub speed: f64,
    pub coverage: f64,
}

impl ScoringWeights {
    /// Maximum attainable score, the denominator of the match percentage
    pub fn max_score(&self) -> f64 {
        self.primary_use + self.budget + self.devices + self.speed + self.coverage
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            primary_use: 30.0,
            budget: 25.0,
            devices: 20.0,
            speed: 15.0,
            coverage: 10.0,
        }
    }
}
