use criterion::{Criterion, criterion_group, criterion_main};
use implied_vol::prelude::*;
use std::hint::black_box;

fn pricing_benchmarks(c: &mut Criterion) {
    let quote = MarketQuote::new(100.0, 100.0, 1.0, 0.05, 0.0);

    c.bench_function("call_price_atm", |b| {
        b.iter(|| BlackScholes::call_price(black_box(&quote), black_box(0.2)))
    });
}

fn solver_benchmarks(c: &mut Criterion) {
    let config = SolverConfig::default();
    let mut group = c.benchmark_group("solve_iv");

    for (name, strike) in [("itm", 80.0), ("atm", 100.0), ("otm", 130.0)] {
        let quote = MarketQuote::new(100.0, strike, 0.5, 0.05, 0.0);
        let quote = quote.with_observed_price(BlackScholes::call_price(&quote, 0.3));
        group.bench_function(name, |b| {
            b.iter(|| solve_iv(black_box(&quote), black_box(&config)))
        });
    }

    group.finish();
}

fn surface_benchmarks(c: &mut Criterion) {
    let strikes: Vec<f64> = (0..40).map(|i| 60.0 + 2.0 * i as f64).collect();
    let expiries: Vec<f64> = (1..=12).map(|m| m as f64 / 12.0).collect();
    let quote_at = |strike: f64, time: f64| {
        let quote = MarketQuote::new(100.0, strike, time, 0.03, 0.0);
        Some(quote.with_observed_price(BlackScholes::call_price(&quote, 0.25)))
    };

    let mut group = c.benchmark_group("surface_40x12");
    for parallel in [false, true] {
        let config = SurfaceConfig::new().with_parallel(parallel);
        let name = if parallel { "parallel" } else { "sequential" };
        group.bench_function(name, |b| {
            b.iter(|| VolatilitySurface::build(&strikes, &expiries, quote_at, &config))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    pricing_benchmarks,
    solver_benchmarks,
    surface_benchmarks
);
criterion_main!(benches);
