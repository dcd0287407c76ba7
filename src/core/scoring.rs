use crate::models::{BudgetTier, DeviceCount, PrimaryUse, ProviderRecord, QuizAnswers, ScoringWeights, SpeedPriority};

/// Points awarded to one provider, broken down by criterion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub primary_use: f64,
    pub budget: f64,
    pub devices: f64,
    pub speed: f64,
    pub coverage: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.primary_use + self.budget + self.devices + self.speed + self.coverage
    }
}

/// Calculate a match score for a provider against a completed quiz
///
/// Scoring formula (default weights):
/// score = primary_use (max 30)   # use-case fit against capability scores
///       + budget      (max 25)   # effective monthly price vs budget tier
///       + devices     (max 20)   # simultaneous-connection allowance
///       + speed       (max 15)   # speed score vs stated priority
///       + coverage    (max 10)   # server country count
///
/// Each criterion hands out either its full weight, proportional credit, or
/// a flat fallback; no criterion can exceed its weight. The total is later
/// normalized against [`ScoringWeights::max_score`] to a percentage.
pub fn calculate_match_score(
    provider: &ProviderRecord,
    answers: &QuizAnswers,
    weights: &ScoringWeights,
) -> (f64, ScoreBreakdown) {
    let breakdown = ScoreBreakdown {
        primary_use: primary_use_points(provider, answers.primary_use, weights.primary_use),
        budget: budget_points(provider, answers.budget, weights.budget),
        devices: device_points(provider, answers.devices, weights.devices),
        speed: speed_points(provider, answers.speed_priority, weights.speed),
        coverage: coverage_points(provider, weights.coverage),
    };

    (breakdown.total(), breakdown)
}

/// Use-case criterion. Providers clearing the capability threshold for the
/// selected use earn proportional credit; everything else, including a
/// near-miss on the threshold, gets the flat base.
#[inline]
fn primary_use_points(provider: &ProviderRecord, use_case: PrimaryUse, weight: f64) -> f64 {
    const BASE_POINTS: f64 = 20.0;
    const TORRENT_POINTS: f64 = 25.0;
    const TORRENT_SPEED_BONUS: f64 = 5.0;

    match use_case {
        PrimaryUse::Streaming if provider.streaming_score > 85 => {
            weight * provider.streaming_score as f64 / 100.0
        }
        PrimaryUse::Privacy if provider.security_score > 90 => {
            weight * provider.security_score as f64 / 100.0
        }
        PrimaryUse::Gaming if provider.speed_score > 85 => {
            weight * provider.speed_score as f64 / 100.0
        }
        PrimaryUse::Torrenting if provider.torrent_support => {
            TORRENT_POINTS + provider.speed_score as f64 / 100.0 * TORRENT_SPEED_BONUS
        }
        PrimaryUse::Work if provider.security_score > 88 => {
            weight * provider.security_score as f64 / 100.0
        }
        _ => BASE_POINTS,
    }
}

/// Budget criterion on the effective monthly price (two-year rate when the
/// provider sells one, yearly otherwise). Full points for a fit, partial
/// points for a near-miss on price.
#[inline]
fn budget_points(provider: &ProviderRecord, budget: BudgetTier, weight: f64) -> f64 {
    const PREMIUM_POINTS: f64 = 20.0;
    const NEAR_MISS_POINTS: f64 = 15.0;
    const FALLBACK_POINTS: f64 = 10.0;

    let price = provider.effective_price();

    match budget {
        BudgetTier::Free if provider.free_tier => weight,
        BudgetTier::Budget if price <= 4.0 => weight,
        BudgetTier::Midrange if price <= 8.0 => weight,
        BudgetTier::Premium if price >= 8.0 => PREMIUM_POINTS,
        // No free plan means no credit at all for the free tier
        BudgetTier::Free => 0.0,
        BudgetTier::Budget if price <= 6.0 => NEAR_MISS_POINTS,
        BudgetTier::Midrange if price <= 10.0 => NEAR_MISS_POINTS,
        _ => FALLBACK_POINTS,
    }
}

/// Device criterion: full points when the plan covers the selected range
#[inline]
fn device_points(provider: &ProviderRecord, devices: DeviceCount, weight: f64) -> f64 {
    const FALLBACK_POINTS: f64 = 10.0;

    let needed = match devices {
        DeviceCount::OneToTwo => 2,
        DeviceCount::ThreeToFive => 5,
        DeviceCount::SixToTen => 10,
        DeviceCount::Unlimited => 100,
    };

    if provider.max_devices >= needed {
        weight
    } else {
        FALLBACK_POINTS
    }
}

/// Speed criterion. "Not a priority" always earns the flat award; the
/// critical/important tiers earn full points at their threshold and half
/// credit scaled by the actual speed score below it (caps at 7.5).
#[inline]
fn speed_points(provider: &ProviderRecord, priority: SpeedPriority, weight: f64) -> f64 {
    const NOT_PRIORITY_POINTS: f64 = 10.0;

    let threshold = match priority {
        SpeedPriority::Critical => 90,
        SpeedPriority::Important => 80,
        SpeedPriority::NotPriority => return NOT_PRIORITY_POINTS,
    };

    if provider.speed_score >= threshold {
        weight
    } else {
        provider.speed_score as f64 / 100.0 * weight * 0.5
    }
}

/// Coverage criterion, tiered on the raw server country count.
///
/// The quiz collects the user's region but the catalog has no per-region
/// presence data, so the answer does not change this criterion.
/// TODO: weight by presence in the user's region once the catalog exposes
/// per-region server counts.
#[inline]
fn coverage_points(provider: &ProviderRecord, weight: f64) -> f64 {
    const WIDE_POINTS: f64 = 8.0;
    const NARROW_POINTS: f64 = 5.0;

    if provider.countries >= 100 {
        weight
    } else if provider.countries >= 60 {
        WIDE_POINTS
    } else {
        NARROW_POINTS
    }
}
