// Criterion benchmarks for SIPORT Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use siport_match::core::Matcher;
use siport_match::models::UserProfile;
use std::collections::HashSet;

const INDUSTRIES: &[&str] = &["Maritime", "Logistique", "Énergie", "Finance", "Tech"];
const CITIES: &[&str] = &["Casablanca", "Tanger", "Rabat", "Agadir", "Marseille"];
const ROLES: &[&str] = &["CEO", "Investisseur", "Marketing", "Communication", "Développeur", "Designer"];
const TOPICS: &[&str] = &["Ports", "IoT", "AI", "Export", "Douane", "Fret", "Hydrogène", "Cloud"];

fn pick(items: &[&str], id: usize, count: usize) -> Vec<String> {
    (0..count).map(|i| items[(id + i * 3) % items.len()].to_string()).collect()
}

fn create_candidate(id: usize) -> UserProfile {
    UserProfile {
        user_id: id.to_string(),
        company: format!("Company {}", id),
        role: ROLES[id % ROLES.len()].to_string(),
        industry: INDUSTRIES[id % INDUSTRIES.len()].to_string(),
        location: CITIES[id % CITIES.len()].to_string(),
        interests: pick(TOPICS, id, 4),
        looking_for: pick(TOPICS, id + 1, 2),
        offering: pick(TOPICS, id + 2, 2),
        ..Default::default()
    }
}

fn bench_score(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let anchor = create_candidate(0);
    let candidate = create_candidate(7);

    c.bench_function("compatibility_score", |b| {
        b.iter(|| matcher.score(black_box(&anchor), black_box(&candidate)));
    });
}

fn bench_recommend(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let anchor = create_candidate(0);
    let exclude: HashSet<String> = (1..20).map(|i| i.to_string()).collect();

    let mut group = c.benchmark_group("recommend");

    for candidate_count in [10, 100, 1000, 5000].iter() {
        let candidates: Vec<UserProfile> = (1..=*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("recommend", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    matcher.recommend(
                        black_box(&anchor),
                        black_box(&candidates),
                        black_box(&exclude),
                        black_box(10),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_score, bench_recommend);

criterion_main!(benches);
