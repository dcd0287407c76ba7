// Integration tests for the VPNMatch recommendation engine

use vpnmatch::core::{QuizSession, RecommendError, Recommender};
use vpnmatch::models::{
    BudgetTier, DeviceCount, PrimaryUse, ProviderRecord, QuizAnswers, Region, SpeedPriority,
};

fn create_test_provider(id: &str, streaming_score: u8, price_yearly: f64, countries: u16) -> ProviderRecord {
    ProviderRecord {
        id: id.to_string(),
        name: format!("Provider {}", id),
        slug: format!("provider-{}", id),
        overall_rating: 4.3,
        speed_score: 86,
        security_score: 92,
        streaming_score,
        price_monthly: 11.99,
        price_yearly,
        price_two_year: None,
        max_devices: 7,
        countries,
        free_tier: false,
        torrent_support: true,
        netflix_support: true,
        kill_switch: true,
        no_logs: true,
        affiliate_url: format!("https://example.com/go/{}", id),
    }
}

fn create_test_answers() -> QuizAnswers {
    QuizAnswers {
        primary_use: PrimaryUse::Streaming,
        budget: BudgetTier::Midrange,
        devices: DeviceCount::ThreeToFive,
        speed_priority: SpeedPriority::Important,
        location: Region::Europe,
    }
}

fn test_catalog() -> Vec<ProviderRecord> {
    vec![
        create_test_provider("alpha", 96, 6.5, 110),
        create_test_provider("bravo", 70, 3.5, 45),
        create_test_provider("charlie", 88, 9.5, 70),
        create_test_provider("delta", 92, 7.9, 60),
        create_test_provider("echo", 55, 12.0, 30),
    ]
}

#[test]
fn test_determinism_across_repeated_runs() {
    let recommender = Recommender::with_default_weights();
    let answers = create_test_answers();

    let first = recommender.recommend(test_catalog(), &answers).unwrap();
    let second = recommender.recommend(test_catalog(), &answers).unwrap();

    assert_eq!(first.results.len(), second.results.len());
    for (a, b) in first.results.iter().zip(second.results.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.match_score, b.match_score);
        assert_eq!(a.match_percentage, b.match_percentage);
    }
}

#[test]
fn test_completeness_one_result_per_provider() {
    let recommender = Recommender::with_default_weights();
    let catalog = test_catalog();
    let expected = catalog.len();

    let result = recommender.recommend(catalog, &create_test_answers()).unwrap();

    assert_eq!(result.results.len(), expected);
    assert_eq!(result.total_providers, expected);

    let mut ids: Vec<&str> = result.results.iter().map(|r| r.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), expected, "duplicate provider in results");
}

#[test]
fn test_results_ordered_by_score_descending() {
    let recommender = Recommender::with_default_weights();

    let result = recommender
        .recommend(test_catalog(), &create_test_answers())
        .unwrap();

    for pair in result.results.windows(2) {
        assert!(
            pair[0].match_score >= pair[1].match_score,
            "results not sorted: {} < {}",
            pair[0].match_score,
            pair[1].match_score
        );
    }
}

#[test]
fn test_percentages_bounded() {
    let recommender = Recommender::with_default_weights();

    let result = recommender
        .recommend(test_catalog(), &create_test_answers())
        .unwrap();

    for scored in &result.results {
        assert!(scored.match_percentage <= 100);
    }
}

#[test]
fn test_reordering_catalog_preserves_scores() {
    let recommender = Recommender::with_default_weights();
    let answers = create_test_answers();

    let baseline = recommender.recommend(test_catalog(), &answers).unwrap();

    let mut reversed = test_catalog();
    reversed.reverse();
    let mut rotated = test_catalog();
    rotated.rotate_left(2);

    for shuffled in [reversed, rotated] {
        let result = recommender.recommend(shuffled, &answers).unwrap();

        let mut baseline_pairs: Vec<(String, u8)> = baseline
            .results
            .iter()
            .map(|r| (r.id.clone(), r.match_percentage))
            .collect();
        let mut shuffled_pairs: Vec<(String, u8)> = result
            .results
            .iter()
            .map(|r| (r.id.clone(), r.match_percentage))
            .collect();

        baseline_pairs.sort();
        shuffled_pairs.sort();
        assert_eq!(baseline_pairs, shuffled_pairs);
    }
}

#[test]
fn test_shortlist_contract() {
    let recommender = Recommender::with_default_weights();
    let answers = create_test_answers();

    // The engine returns everything; the consumer shows min(3, len)
    for catalog_size in [0, 1, 2, 3, 5] {
        let catalog: Vec<ProviderRecord> = test_catalog().into_iter().take(catalog_size).collect();
        let result = recommender.recommend(catalog, &answers).unwrap();

        assert_eq!(result.results.len(), catalog_size);

        let mut shortlist = result.results;
        shortlist.truncate(3);
        assert_eq!(shortlist.len(), catalog_size.min(3));
    }
}

#[test]
fn test_empty_catalog_returns_empty_result() {
    let recommender = Recommender::with_default_weights();

    let result = recommender
        .recommend(Vec::new(), &create_test_answers())
        .unwrap();

    assert!(result.results.is_empty());
    assert_eq!(result.total_providers, 0);
}

#[test]
fn test_incomplete_session_never_reaches_scoring() {
    let mut session = QuizSession::new();
    session.primary_use = Some(PrimaryUse::Streaming);
    session.budget = Some(BudgetTier::Midrange);

    let err = session.finish().unwrap_err();
    match err {
        RecommendError::IncompleteAnswers { missing } => {
            assert_eq!(missing, vec!["devices", "speedPriority", "location"]);
        }
        other => panic!("expected IncompleteAnswers, got {:?}", other),
    }
}

#[test]
fn test_completed_session_scores_end_to_end() {
    let session = QuizSession {
        primary_use: Some(PrimaryUse::Streaming),
        budget: Some(BudgetTier::Midrange),
        devices: Some(DeviceCount::ThreeToFive),
        speed_priority: Some(SpeedPriority::Important),
        location: Some(Region::Europe),
    };

    let answers = session.finish().unwrap();
    let recommender = Recommender::with_default_weights();
    let result = recommender.recommend(test_catalog(), &answers).unwrap();

    // "alpha" clears every threshold in this catalog
    assert_eq!(result.results[0].id, "alpha");
    assert!(result.results[0].match_percentage >= 90);
}

#[test]
fn test_malformed_record_rejected_by_id() {
    let recommender = Recommender::with_default_weights();
    let mut catalog = test_catalog();
    catalog[2].max_devices = 0;

    let err = recommender
        .recommend(catalog, &create_test_answers())
        .unwrap_err();

    assert_eq!(
        err,
        RecommendError::MalformedProvider {
            id: "charlie".to_string(),
            field: "maxDevices",
        }
    );
}

#[test]
fn test_pinned_percentage_for_streaming_seeker() {
    let recommender = Recommender::with_default_weights();
    let mut provider = create_test_provider("pinned", 95, 7.0, 65);
    provider.speed_score = 85;
    provider.max_devices = 6;

    let result = recommender
        .recommend(vec![provider], &create_test_answers())
        .unwrap();

    assert_eq!(result.results[0].match_score, 96.5);
    assert_eq!(result.results[0].match_percentage, 97);
}
