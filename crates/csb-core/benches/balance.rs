use csb_core::{Agent, AwaySet, Balancer, Customer};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

struct Tier {
    name: &'static str,
    agents: u32,
    customers: u32,
}

const TIERS: [Tier; 3] = [
    Tier {
        name: "small",
        agents: 10,
        customers: 1_000,
    },
    Tier {
        name: "medium",
        agents: 1_000,
        customers: 10_000,
    },
    Tier {
        name: "large",
        agents: 10_000,
        customers: 1_000_000,
    },
];

/// Spread agent scores over `0..1000` and customer scores over `0..1200`
/// with a fixed multiplicative hash, so some customers stay unattended and
/// some scores repeat.
fn roster(tier: &Tier) -> (Vec<Agent>, Vec<Customer>) {
    let agents = (1..=tier.agents)
        .map(|id| Agent::new(id, id.wrapping_mul(2_654_435_761) % 1_000))
        .collect();
    let customers = (1..=tier.customers)
        .map(|id| Customer::new(id, id.wrapping_mul(40_503) % 1_200))
        .collect();
    (agents, customers)
}

/// Scenario-three shape: every agent shares score 0 except one.
fn skewed(tier: &Tier) -> (Vec<Agent>, Vec<Customer>) {
    let top = tier.agents - 1;
    let agents = (1..=tier.agents)
        .map(|id| Agent::new(id, if id == top { 100 } else { 0 }))
        .collect();
    let customers = (1..=tier.customers)
        .map(|id| Customer::new(id, 10))
        .collect();
    (agents, customers)
}

fn bench_execute(c: &mut Criterion) {
    let mut group = c.benchmark_group("balance.execute");
    let away = AwaySet::new();

    for tier in &TIERS {
        group.throughput(Throughput::Elements(u64::from(tier.customers)));

        let spread = roster(tier);
        group.bench_with_input(BenchmarkId::new("spread", tier.name), &spread, |b, (a, cs)| {
            b.iter(|| black_box(Balancer::new(a, cs, &away).execute()));
        });

        let skew = skewed(tier);
        group.bench_with_input(BenchmarkId::new("skewed", tier.name), &skew, |b, (a, cs)| {
            b.iter(|| black_box(Balancer::new(a, cs, &away).execute()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_execute);
criterion_main!(benches);
