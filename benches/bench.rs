// Criterion benchmarks for the VPNMatch scoring engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vpnmatch::core::scoring::calculate_match_score;
use vpnmatch::core::Recommender;
use vpnmatch::models::{
    BudgetTier, DeviceCount, PrimaryUse, ProviderRecord, QuizAnswers, Region, ScoringWeights,
    SpeedPriority,
};

fn create_provider(id: usize) -> ProviderRecord {
    ProviderRecord {
        id: id.to_string(),
        name: format!("Provider {}", id),
        slug: format!("provider-{}", id),
        overall_rating: 3.0 + (id % 20) as f64 / 10.0,
        speed_score: 60 + (id % 40) as u8,
        security_score: 60 + (id % 40) as u8,
        streaming_score: 55 + (id % 45) as u8,
        price_monthly: 8.0 + (id % 8) as f64,
        price_yearly: 3.0 + (id % 9) as f64,
        price_two_year: if id % 3 == 0 { Some(2.0 + (id % 6) as f64) } else { None },
        max_devices: if id % 7 == 0 { 100 } else { 2 + (id % 10) as u16 },
        countries: 30 + (id % 90) as u16,
        free_tier: id % 5 == 0,
        torrent_support: id % 2 == 0,
        netflix_support: id % 3 != 0,
        kill_switch: true,
        no_logs: id % 4 != 0,
        affiliate_url: format!("https://example.com/go/{}", id),
    }
}

fn create_answers() -> QuizAnswers {
    QuizAnswers {
        primary_use: PrimaryUse::Streaming,
        budget: BudgetTier::Midrange,
        devices: DeviceCount::ThreeToFive,
        speed_priority: SpeedPriority::Important,
        location: Region::Europe,
    }
}

fn bench_single_score(c: &mut Criterion) {
    let provider = create_provider(1);
    let answers = create_answers();
    let weights = ScoringWeights::default();

    c.bench_function("calculate_match_score", |b| {
        b.iter(|| {
            calculate_match_score(
                black_box(&provider),
                black_box(&answers),
                black_box(&weights),
            )
        });
    });
}

fn bench_recommend(c: &mut Criterion) {
    let recommender = Recommender::with_default_weights();
    let answers = create_answers();

    let mut group = c.benchmark_group("recommend");

    for catalog_size in [10, 50, 100, 500, 1000].iter() {
        let catalog: Vec<ProviderRecord> = (0..*catalog_size).map(create_provider).collect();

        group.bench_with_input(
            BenchmarkId::new("full_catalog", catalog_size),
            catalog_size,
            |b, _| {
                b.iter(|| {
                    recommender
                        .recommend(black_box(catalog.clone()), black_box(&answers))
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_single_score, bench_recommend);
criterion_main!(benches);
