use crate::core::engine::RecommendError;
use crate::models::ProviderRecord;

/// Reject catalog records that would silently misrank if scored
///
/// Invariants: rating in [0, 5], capability scores in [0, 100], finite
/// non-negative prices, at least one device. Field names in the error use
/// the wire spelling so the content team can find the offending column.
pub fn validate_provider(provider: &ProviderRecord) -> Result<(), RecommendError> {
    let malformed = |field: &'static str| RecommendError::MalformedProvider {
        id: provider.id.clone(),
        field,
    };

    if provider.id.is_empty() {
        return Err(RecommendError::MalformedProvider {
            id: "<missing>".to_string(),
            field: "id",
        });
    }

    if !provider.overall_rating.is_finite() || !(0.0..=5.0).contains(&provider.overall_rating) {
        return Err(malformed("overallRating"));
    }
    if provider.speed_score > 100 {
        return Err(malformed("speedScore"));
    }
    if provider.security_score > 100 {
        return Err(malformed("securityScore"));
    }
    if provider.streaming_score > 100 {
        return Err(malformed("streamingScore"));
    }
    if !provider.price_monthly.is_finite() || provider.price_monthly < 0.0 {
        return Err(malformed("priceMonthly"));
    }
    if !provider.price_yearly.is_finite() || provider.price_yearly < 0.0 {
        return Err(malformed("priceYearly"));
    }
    if let Some(price) = provider.price_two_year {
        if !price.is_finite() || price < 0.0 {
            return Err(malformed("priceTwoYear"));
        }
    }
    if provider.max_devices == 0 {
        return Err(malformed("maxDevices"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_provider() -> ProviderRecord {
        ProviderRecord {
            id: "p1".to_string(),
            name: "Test VPN".to_string(),
            slug: "test-vpn".to_string(),
            overall_rating: 4.5,
            speed_score: 90,
            security_score: 92,
            streaming_score: 88,
            price_monthly: 11.99,
            price_yearly: 5.99,
            price_two_year: Some(3.99),
            max_devices: 8,
            countries: 90,
            free_tier: false,
            torrent_support: true,
            netflix_support: true,
            kill_switch: true,
            no_logs: true,
            affiliate_url: "https://example.com/go/test-vpn".to_string(),
        }
    }

    #[test]
    fn test_valid_record_passes() {
        assert!(validate_provider(&valid_provider()).is_ok());
    }

    #[test]
    fn test_rating_out_of_range() {
        let mut provider = valid_provider();
        provider.overall_rating = 5.2;

        let err = validate_provider(&provider).unwrap_err();
        assert_eq!(
            err,
            RecommendError::MalformedProvider {
                id: "p1".to_string(),
                field: "overallRating",
            }
        );
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut provider = valid_provider();
        provider.price_yearly = -1.0;
        assert!(validate_provider(&provider).is_err());
    }

    #[test]
    fn test_nan_two_year_price_rejected() {
        let mut provider = valid_provider();
        provider.price_two_year = Some(f64::NAN);

        let err = validate_provider(&provider).unwrap_err();
        assert!(matches!(
            err,
            RecommendError::MalformedProvider { field: "priceTwoYear", .. }
        ));
    }

    #[test]
    fn test_capability_score_above_hundred_rejected() {
        let mut provider = valid_provider();
        provider.streaming_score = 101;
        assert!(validate_provider(&provider).is_err());
    }

    #[test]
    fn test_zero_devices_rejected() {
        let mut provider = valid_provider();
        provider.max_devices = 0;
        assert!(validate_provider(&provider).is_err());
    }
}
