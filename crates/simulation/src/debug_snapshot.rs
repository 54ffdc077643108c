//! Read-only introspection for HUDs and external tooling.
//!
//! Demand terms are recomputed through the same pure function the live
//! simulation uses, from the same inputs, so the snapshot shows exactly how
//! each value was reached. Nothing here mutates state.

use bevy::prelude::*;
use serde::Serialize;

use crate::buildings::{BuildingRegistry, BuildingStatus};
use crate::economy::CityBudget;
use crate::game_params::GameParams;
use crate::grid::{Sector, WorldGrid};
use crate::services::ServiceStats;
use crate::time_of_day::GameClock;
use crate::utilities::UtilityTotals;
use crate::zones::{
    compute_sector_demand, demand_inputs, DemandBreakdown, DemandInputs, LabourStats, ZoneStats,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorDemandDebug {
    pub sector: Sector,
    pub inputs: DemandInputs,
    pub breakdown: DemandBreakdown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildingCounts {
    pub total: usize,
    pub active: usize,
    pub no_power: usize,
    pub no_water: usize,
    pub damaged: usize,
    pub abandoned: usize,
}

impl BuildingCounts {
    pub fn from_registry(registry: &BuildingRegistry) -> Self {
        let mut counts = Self::default();
        for building in registry.iter() {
            counts.total += 1;
            match building.state.status {
                BuildingStatus::Active => counts.active += 1,
                BuildingStatus::InactiveNoPower => counts.no_power += 1,
                BuildingStatus::InactiveNoWater => counts.no_water += 1,
                BuildingStatus::InactiveDamaged => counts.damaged += 1,
            }
            if building.state.abandoned {
                counts.abandoned += 1;
            }
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugSnapshot {
    pub tick: u64,
    pub day: u64,
    pub funds: f64,
    pub tile_revision: u64,
    pub demand: Vec<SectorDemandDebug>,
    pub utilities: UtilityTotals,
    pub labour: LabourStats,
    pub zones: ZoneStats,
    pub services: ServiceStats,
    pub buildings: BuildingCounts,
}

/// Borrowed view of everything the snapshot reads.
pub struct DebugSources<'a> {
    pub grid: &'a WorldGrid,
    pub registry: &'a BuildingRegistry,
    pub clock: &'a GameClock,
    pub budget: &'a CityBudget,
    pub totals: &'a UtilityTotals,
    pub labour: &'a LabourStats,
    pub zones: &'a ZoneStats,
    pub services: &'a ServiceStats,
    pub params: &'a GameParams,
}

pub fn build_debug_snapshot(src: &DebugSources) -> DebugSnapshot {
    let demand = Sector::ALL
        .into_iter()
        .map(|sector| {
            let inputs = demand_inputs(sector, src.zones, src.labour, src.totals);
            let breakdown = compute_sector_demand(&inputs, src.params.demand.for_sector(sector));
            SectorDemandDebug {
                sector,
                inputs,
                breakdown,
            }
        })
        .collect();

    DebugSnapshot {
        tick: src.clock.tick,
        day: src.clock.day,
        funds: src.budget.funds,
        tile_revision: src.grid.tile_revision,
        demand,
        utilities: src.totals.clone(),
        labour: src.labour.clone(),
        zones: src.zones.clone(),
        services: src.services.clone(),
        buildings: BuildingCounts::from_registry(src.registry),
    }
}

/// Snapshot straight from an app world. `None` until every simulation
/// resource exists.
pub fn snapshot_from_world(world: &World) -> Option<DebugSnapshot> {
    let sources = DebugSources {
        grid: world.get_resource::<WorldGrid>()?,
        registry: world.get_resource::<BuildingRegistry>()?,
        clock: world.get_resource::<GameClock>()?,
        budget: world.get_resource::<CityBudget>()?,
        totals: world.get_resource::<UtilityTotals>()?,
        labour: world.get_resource::<LabourStats>()?,
        zones: world.get_resource::<ZoneStats>()?,
        services: world.get_resource::<ServiceStats>()?,
        params: world.get_resource::<GameParams>()?,
    };
    Some(build_debug_snapshot(&sources))
}
