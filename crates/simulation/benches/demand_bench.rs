//! Criterion benchmarks for zone statistics and demand.
//!
//! Run with: cargo bench -p simulation --bench demand_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use simulation::game_params::DemandParams;
use simulation::grid::{Sector, TileKind, WorldGrid};
use simulation::zones::{
    compute_labour_stats, compute_sector_demand, compute_zone_demand, gather_zone_stats,
    DemandInputs,
};
use simulation::{buildings::BuildingRegistry, templates::TemplateCatalog};

fn bench_sector_demand(c: &mut Criterion) {
    let params = DemandParams::default();
    let inputs = DemandInputs {
        fill_fraction: 0.4,
        pending_zones: 120,
        population: 900,
        jobs: 600,
        unemployment_rate: 0.1,
        vacancy_rate: 0.05,
        power_balance: -12.0,
        power_consumed: 300.0,
        water_balance: 20.0,
        water_consumed: 150.0,
    };

    c.bench_function("compute_sector_demand", |b| {
        b.iter(|| {
            compute_sector_demand(
                black_box(&inputs),
                params.for_sector(black_box(Sector::Residential)),
            )
        });
    });
}

fn bench_zone_stats(c: &mut Criterion) {
    let mut grid = WorldGrid::new(64, 64);
    for y in 0..64 {
        for x in 0..64 {
            let kind = match (x + y) % 4 {
                0 => TileKind::Road,
                1 => TileKind::Residential,
                2 => TileKind::Commercial,
                _ => TileKind::Industrial,
            };
            grid.set_tile(x, y, kind);
        }
    }
    let registry = BuildingRegistry::default();
    let catalog = TemplateCatalog::default();
    let params = DemandParams::default();

    c.bench_function("gather_stats_and_demand_64x64", |b| {
        b.iter(|| {
            let stats = gather_zone_stats(black_box(&grid), &registry, &catalog);
            let labour = compute_labour_stats(stats.population as f32, stats.jobs as f32, 0.55);
            compute_zone_demand(&stats, &labour, &Default::default(), &params)
        });
    });
}

criterion_group!(benches, bench_sector_demand, bench_zone_stats);
criterion_main!(benches);
