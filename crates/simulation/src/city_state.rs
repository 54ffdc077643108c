//! The whole simulation as plain values, for driving passes without an ECS
//! world (benches, tools, determinism checks).

use crate::buildings::{update_building_states, BuildingRegistry};
use crate::config::DEFAULT_SEED;
use crate::debug_snapshot::{build_debug_snapshot, DebugSnapshot, DebugSources};
use crate::economy::{settle_day, CityBudget};
use crate::game_actions::{apply_tool, ActionResult, Tool, ToolContext};
use crate::game_params::GameParams;
use crate::grid::WorldGrid;
use crate::services::{update_service_coverage, ServiceStats};
use crate::sim_rng::SimRng;
use crate::templates::TemplateCatalog;
use crate::time_of_day::GameClock;
use crate::utilities::{recompute_networks, UtilityTotals};
use crate::zones::{
    compute_labour_stats, compute_zone_demand, compute_zone_loads, gather_zone_stats, grow_zones,
    LabourStats, ZoneDemand, ZoneLoads, ZoneStats,
};

#[derive(Debug, Clone)]
pub struct CityState {
    pub grid: WorldGrid,
    pub registry: BuildingRegistry,
    pub catalog: TemplateCatalog,
    pub params: GameParams,
    pub rng: SimRng,
    pub clock: GameClock,
    pub budget: CityBudget,
    pub totals: UtilityTotals,
    pub loads: ZoneLoads,
    pub zones: ZoneStats,
    pub labour: LabourStats,
    pub demand: ZoneDemand,
    pub services: ServiceStats,
}

impl Default for CityState {
    fn default() -> Self {
        Self::new(WorldGrid::default(), DEFAULT_SEED)
    }
}

impl CityState {
    pub fn new(grid: WorldGrid, seed: u64) -> Self {
        let params = GameParams::default();
        Self {
            grid,
            registry: BuildingRegistry::default(),
            catalog: TemplateCatalog::default(),
            budget: CityBudget::with_funds(params.economy.starting_funds),
            params,
            rng: SimRng::from_seed_u64(seed),
            clock: GameClock::default(),
            totals: UtilityTotals::default(),
            loads: ZoneLoads::default(),
            zones: ZoneStats::default(),
            labour: LabourStats::default(),
            demand: ZoneDemand::default(),
            services: ServiceStats::default(),
        }
    }

    pub fn apply_tool(&mut self, tool: &Tool, x: usize, y: usize) -> ActionResult {
        let mut ctx = ToolContext {
            grid: &mut self.grid,
            registry: &mut self.registry,
            catalog: &self.catalog,
            budget: &mut self.budget,
            costs: &self.params.tools,
        };
        apply_tool(tool, x, y, &mut ctx)
    }

    pub fn snapshot(&self) -> DebugSnapshot {
        build_debug_snapshot(&DebugSources {
            grid: &self.grid,
            registry: &self.registry,
            clock: &self.clock,
            budget: &self.budget,
            totals: &self.totals,
            labour: &self.labour,
            zones: &self.zones,
            services: &self.services,
            params: &self.params,
        })
    }
}

/// One fixed step in `SimulationSet` order: clock, networks, lifecycle,
/// zones, growth, services, then the daily budget.
pub fn run_simulation_pass(state: &mut CityState) {
    let new_day = state.clock.advance(state.params.economy.ticks_per_day);

    recompute_networks(
        &mut state.grid,
        &state.registry,
        &state.catalog,
        &mut state.totals,
    );

    update_building_states(&mut state.grid, &mut state.registry, &state.catalog);

    state.loads = compute_zone_loads(&state.grid, &state.registry, &state.catalog);
    state.zones = gather_zone_stats(&state.grid, &state.registry, &state.catalog);
    state.labour = compute_labour_stats(
        state.zones.population as f32,
        state.zones.jobs as f32,
        state.params.labour.worker_share,
    );
    state.demand = compute_zone_demand(
        &state.zones,
        &state.labour,
        &state.totals,
        &state.params.demand,
    );

    if state.clock.tick % state.params.growth.interval_ticks.max(1) == 0 {
        grow_zones(
            &mut state.grid,
            &mut state.registry,
            &state.catalog,
            &state.demand,
            &mut state.rng,
            &state.params.growth,
        );
    }

    state.services = update_service_coverage(
        &mut state.grid,
        &mut state.registry,
        &state.catalog,
        &state.loads,
        state.params.labour.worker_share,
    );

    if new_day {
        settle_day(
            &mut state.budget,
            &state.registry,
            &state.catalog,
            &state.labour,
            &state.params.economy,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildings::BuildingStatus;
    use crate::grid::{Sector, TileKind};
    use crate::templates::COAL_PLANT;

    fn small_town() -> CityState {
        let mut state = CityState::new(WorldGrid::new(16, 16), 9);
        assert!(state
            .apply_tool(&Tool::Building(COAL_PLANT.into()), 0, 0)
            .is_success());
        for x in 2..16 {
            state.apply_tool(&Tool::Road, x, 4);
            state.apply_tool(&Tool::Zone(Sector::Residential), x, 5);
        }
        for x in 3..16 {
            state.apply_tool(&Tool::Zone(Sector::Commercial), x, 3);
        }
        for y in 1..4 {
            assert!(state.apply_tool(&Tool::PowerLine, 2, y).is_success());
        }
        state
    }

    #[test]
    fn test_town_grows_under_power() {
        let mut state = small_town();
        // Stop between growth rolls so the newest buildings have had a
        // lifecycle pass.
        for _ in 0..205 {
            run_simulation_pass(&mut state);
        }
        assert!(state.grid.get(10, 5).unwrap().powered);
        let grown = state
            .registry
            .iter()
            .filter(|b| b.template_id != COAL_PLANT)
            .count();
        assert!(grown > 0, "some lots should have developed");
        assert!(state
            .registry
            .iter()
            .all(|b| b.state.status == BuildingStatus::Active));
        assert!(state.labour.population > 0.0);
    }

    #[test]
    fn test_passes_are_deterministic() {
        let mut a = small_town();
        let mut b = small_town();
        for _ in 0..120 {
            run_simulation_pass(&mut a);
            run_simulation_pass(&mut b);
        }
        assert_eq!(a.registry, b.registry);
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.demand, b.demand);
    }

    #[test]
    fn test_day_boundary_settles_budget() {
        let mut state = small_town();
        let funds = state.budget.funds;
        for _ in 0..state.params.economy.ticks_per_day {
            run_simulation_pass(&mut state);
        }
        assert_eq!(state.clock.day, 1);
        assert!(state.budget.last_expenses >= 60.0);
        assert!(
            (state.budget.funds - (funds + state.budget.last_income - state.budget.last_expenses))
                .abs()
                < 1e-6
        );
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = small_town();
        run_simulation_pass(&mut state);
        let snapshot = state.snapshot();
        assert_eq!(snapshot.tick, 1);
        assert_eq!(snapshot.utilities.power_produced, 40.0);
        assert_eq!(snapshot.buildings.total, state.registry.len());
        assert_eq!(state.grid.get(0, 0).map(|t| t.kind), Some(TileKind::PowerPlant));
    }
}
