//! Criterion benchmarks for the utility networks and a full simulation pass.
//!
//! Benchmarks:
//!   - recompute_networks on a 64x64 grid-plan city
//!   - run_simulation_pass on the same city
//!   - TestCity FixedUpdate tick (scheduled path)
//!
//! Run with: cargo bench -p simulation --bench network_bench --features bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use simulation::config::{GRID_HEIGHT, GRID_WIDTH};
use simulation::game_actions::Tool;
use simulation::grid::{Sector, WorldGrid};
use simulation::templates::{COAL_PLANT, WATER_PUMP};
use simulation::test_harness::TestCity;
use simulation::utilities::{recompute_networks, UtilityTotals};
use simulation::{run_simulation_pass, CityState};

// ---------------------------------------------------------------------------
// Helper: grid-plan layout
// ---------------------------------------------------------------------------

/// Roads every 6 rows and columns, a coal plant and pump in the corner, and
/// every block interior zoned, alternating residential and commercial.
fn layout() -> Vec<(Tool, usize, usize)> {
    let mut actions = vec![
        (Tool::Building(COAL_PLANT.into()), 1, 1),
        (Tool::Building(WATER_PUMP.into()), 3, 1),
    ];
    for y in 0..GRID_HEIGHT {
        for x in 0..GRID_WIDTH {
            if x < 6 && y < 6 {
                if x == 0 || y == 0 {
                    actions.push((Tool::Road, x, y));
                }
                continue;
            }
            if x % 6 == 0 || y % 6 == 0 {
                actions.push((Tool::Road, x, y));
            } else {
                let sector = if (x / 6 + y / 6) % 2 == 0 {
                    Sector::Residential
                } else {
                    Sector::Commercial
                };
                actions.push((Tool::Zone(sector), x, y));
            }
        }
    }
    actions
}

fn build_state() -> CityState {
    let mut state = CityState::new(WorldGrid::new(GRID_WIDTH, GRID_HEIGHT), 42);
    state.budget.funds = 1_000_000.0;
    for (tool, x, y) in layout() {
        let _ = state.apply_tool(&tool, x, y);
    }
    // Let the city grow a while so the registry is populated.
    for _ in 0..400 {
        run_simulation_pass(&mut state);
    }
    state
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_recompute_networks(c: &mut Criterion) {
    let mut state = build_state();
    let mut group = c.benchmark_group("networks");
    group.sample_size(200);

    group.bench_function("recompute_64x64", |b| {
        b.iter(|| {
            let mut totals = UtilityTotals::default();
            recompute_networks(
                black_box(&mut state.grid),
                &state.registry,
                &state.catalog,
                &mut totals,
            );
            black_box(totals)
        });
    });

    group.finish();
}

fn bench_simulation_pass(c: &mut Criterion) {
    let base = build_state();
    let mut group = c.benchmark_group("simulation_pass");
    group.sample_size(100);

    group.bench_function("plain_pass_64x64", |b| {
        let mut state = base.clone();
        b.iter(|| run_simulation_pass(black_box(&mut state)));
    });

    group.bench_function("scheduled_tick_64x64", |b| {
        let mut city = TestCity::new().with_budget(1_000_000.0);
        for (tool, x, y) in layout() {
            let _ = city.apply_tool(tool, x, y);
        }
        city.tick(400);
        b.iter(|| city.tick(1));
    });

    group.finish();
}

criterion_group!(benches, bench_recompute_networks, bench_simulation_pass);
criterion_main!(benches);
