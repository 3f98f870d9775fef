//! Benchmarks for filtering and tab rendering
//!
//! Run with: cargo bench

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use salesdash::dashboard::{render, DashboardContext, TABS};
use salesdash::dataset::{GeoReference, SalesRecord, SalesTable};
use salesdash::query::{group_by, AggregationFunc, GroupKey, Measure, SalesFilter};

const REGIONS: [&str; 5] = ["Norte", "Nordeste", "Centro-Oeste", "Sudeste", "Sul"];
const BRANDS: [&str; 4] = ["Nike", "Adidas", "Puma", "Fila"];
const STATES: [&str; 6] = ["SP", "RJ", "MG", "BA", "RS", "AM"];

fn create_test_table(count: usize) -> SalesTable {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

    (0..count)
        .map(|i| {
            SalesRecord::default()
                .region(REGIONS[i % REGIONS.len()])
                .brand(BRANDS[i % BRANDS.len()])
                .product(format!("P{}", i % 50), format!("Product {}", i % 50))
                .location(STATES[i % STATES.len()], format!("City {}", i % 40))
                .salesperson(format!("Seller {}", i % 25))
                .gender(if i % 2 == 0 { "F" } else { "M" })
                .condition(if i % 3 == 0 { "Used" } else { "New" })
                .quantity((i % 7 + 1) as f64)
                .prices(10.0 + (i % 90) as f64, 12.0 + (i % 90) as f64)
                .total(50.0 + (i % 400) as f64)
                .net_profit((i % 60) as f64 - 10.0)
                .purchased_on(start + chrono::Days::new((i % 730) as u64))
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    for size in [1_000, 10_000, 100_000] {
        let table = create_test_table(size);
        let filter = SalesFilter::builder()
            .regions(&["Sudeste", "Sul"])
            .brands(&["Nike"])
            .between(
                NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            )
            .build();

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("apply_{}", size), |b| {
            b.iter(|| filter.apply(black_box(table.iter())))
        });

        let rows: Vec<&SalesRecord> = table.iter().collect();
        group.bench_function(format!("group_by_city_{}", size), |b| {
            b.iter(|| {
                group_by(
                    black_box(&rows),
                    &[GroupKey::City],
                    Measure::Total,
                    AggregationFunc::Sum,
                )
            })
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let ctx = DashboardContext::new(create_test_table(10_000), GeoReference::empty());
    let unrestricted = SalesFilter::default();

    for tab in &TABS {
        group.bench_function(tab.id, |b| {
            b.iter(|| render(&ctx, black_box(tab.id), &unrestricted).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filter, bench_render);
criterion_main!(benches);
