use bevy::prelude::*;

use super::demand::{compute_sector_demand, DemandInputs, ZoneDemand};
use super::growth::grow_zones;
use super::labour::{compute_labour_stats, LabourStats};
use super::loads::{compute_zone_loads, ZoneLoads};
use super::stats::{gather_zone_stats, ZoneStats};
use crate::buildings::BuildingRegistry;
use crate::game_params::{DemandParams, GameParams};
use crate::grid::{Sector, WorldGrid};
use crate::sim_rng::SimRng;
use crate::templates::TemplateCatalog;
use crate::time_of_day::GameClock;
use crate::utilities::UtilityTotals;

/// Assembles the named demand inputs of one sector.
pub fn demand_inputs(
    sector: Sector,
    stats: &ZoneStats,
    labour: &LabourStats,
    totals: &UtilityTotals,
) -> DemandInputs {
    let sector_stats = stats.sector(sector);
    DemandInputs {
        fill_fraction: sector_stats.fill_fraction(),
        pending_zones: sector_stats.pending_tiles,
        population: stats.population,
        jobs: stats.jobs,
        unemployment_rate: labour.unemployment_rate,
        vacancy_rate: labour.vacancy_rate,
        power_balance: totals.power_balance(),
        power_consumed: totals.power_consumed,
        water_balance: totals.water_balance(),
        water_consumed: totals.water_consumed,
    }
}

/// All three sectors through [`compute_sector_demand`].
pub fn compute_zone_demand(
    stats: &ZoneStats,
    labour: &LabourStats,
    totals: &UtilityTotals,
    params: &DemandParams,
) -> ZoneDemand {
    let mut demand = ZoneDemand::default();
    for sector in Sector::ALL {
        let inputs = demand_inputs(sector, stats, labour, totals);
        demand.set(sector, compute_sector_demand(&inputs, params.for_sector(sector)));
    }
    demand
}

pub fn update_zone_loads(
    grid: Res<WorldGrid>,
    registry: Res<BuildingRegistry>,
    catalog: Res<TemplateCatalog>,
    mut loads: ResMut<ZoneLoads>,
) {
    *loads = compute_zone_loads(&grid, &registry, &catalog);
}

pub fn update_zone_stats(
    grid: Res<WorldGrid>,
    registry: Res<BuildingRegistry>,
    catalog: Res<TemplateCatalog>,
    params: Res<GameParams>,
    mut stats: ResMut<ZoneStats>,
    mut labour: ResMut<LabourStats>,
) {
    *stats = gather_zone_stats(&grid, &registry, &catalog);
    *labour = compute_labour_stats(
        stats.population as f32,
        stats.jobs as f32,
        params.labour.worker_share,
    );
}

pub fn update_zone_demand(
    stats: Res<ZoneStats>,
    labour: Res<LabourStats>,
    totals: Res<UtilityTotals>,
    params: Res<GameParams>,
    mut demand: ResMut<ZoneDemand>,
) {
    *demand = compute_zone_demand(&stats, &labour, &totals, &params.demand);
}

pub fn update_zone_growth(
    clock: Res<GameClock>,
    mut grid: ResMut<WorldGrid>,
    mut registry: ResMut<BuildingRegistry>,
    catalog: Res<TemplateCatalog>,
    demand: Res<ZoneDemand>,
    params: Res<GameParams>,
    mut rng: ResMut<SimRng>,
) {
    let interval = params.growth.interval_ticks.max(1);
    if clock.tick % interval != 0 {
        return;
    }
    let grown = grow_zones(
        &mut grid,
        &mut registry,
        &catalog,
        &demand,
        &mut rng,
        &params.growth,
    );
    if grown > 0 {
        debug!("Tick {}: {} zone buildings grew", clock.tick, grown);
    }
}
