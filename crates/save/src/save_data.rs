//! `SaveData`: a whole-state snapshot of every simulation resource.

use std::collections::BTreeMap;

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use simulation::buildings::BuildingRegistry;
use simulation::economy::CityBudget;
use simulation::game_actions::{ActionQueue, ActionResultLog};
use simulation::game_params::GameParams;
use simulation::grid::WorldGrid;
use simulation::services::ServiceStats;
use simulation::sim_rng::{RngState, SimRng};
use simulation::templates::{BuildingTemplate, TemplateCatalog};
use simulation::time_of_day::GameClock;
use simulation::utilities::UtilityTotals;
use simulation::zones::{LabourStats, ZoneDemand, ZoneLoads, ZoneStats};
use simulation::CityState;

use crate::save_error::SaveError;

/// Schema version written into every save. Loading does not migrate.
pub const CURRENT_SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct SaveData {
    pub version: u32,
    pub grid: WorldGrid,
    pub registry: BuildingRegistry,
    /// Runtime-registered templates only; the built-in table ships with
    /// the build.
    pub template_overlay: BTreeMap<String, BuildingTemplate>,
    pub totals: UtilityTotals,
    pub loads: ZoneLoads,
    pub zones: ZoneStats,
    pub labour: LabourStats,
    pub demand: ZoneDemand,
    pub services: ServiceStats,
    pub budget: CityBudget,
    pub clock: GameClock,
    pub params: GameParams,
    pub rng: RngState,
}

fn cloned<T: Resource + Clone>(world: &World, name: &'static str) -> Result<T, SaveError> {
    world
        .get_resource::<T>()
        .cloned()
        .ok_or(SaveError::MissingResource(name))
}

impl SaveData {
    /// Snapshots every simulation resource in `world`.
    pub fn capture(world: &World) -> Result<Self, SaveError> {
        let catalog = world
            .get_resource::<TemplateCatalog>()
            .ok_or(SaveError::MissingResource("TemplateCatalog"))?;
        let rng = world
            .get_resource::<SimRng>()
            .ok_or(SaveError::MissingResource("SimRng"))?;

        Ok(Self {
            version: CURRENT_SAVE_VERSION,
            grid: cloned(world, "WorldGrid")?,
            registry: cloned(world, "BuildingRegistry")?,
            template_overlay: catalog.overlay().clone(),
            totals: cloned(world, "UtilityTotals")?,
            loads: cloned(world, "ZoneLoads")?,
            zones: cloned(world, "ZoneStats")?,
            labour: cloned(world, "LabourStats")?,
            demand: cloned(world, "ZoneDemand")?,
            services: cloned(world, "ServiceStats")?,
            budget: cloned(world, "CityBudget")?,
            clock: cloned(world, "GameClock")?,
            params: cloned(world, "GameParams")?,
            rng: rng.state(),
        })
    }

    /// Replaces every simulation resource in `world` with the saved values.
    /// Pending tool actions from before the load are discarded.
    pub fn restore(self, world: &mut World) {
        world.insert_resource(self.grid);
        world.insert_resource(self.registry);
        world.insert_resource(TemplateCatalog::with_overlay(self.template_overlay));
        world.insert_resource(self.totals);
        world.insert_resource(self.loads);
        world.insert_resource(self.zones);
        world.insert_resource(self.labour);
        world.insert_resource(self.demand);
        world.insert_resource(self.services);
        world.insert_resource(self.budget);
        world.insert_resource(self.clock);
        world.insert_resource(self.params);
        world.insert_resource(SimRng::from_state(&self.rng));

        if let Some(mut queue) = world.get_resource_mut::<ActionQueue>() {
            queue.drain();
        }
        if let Some(mut log) = world.get_resource_mut::<ActionResultLog>() {
            log.clear();
        }
    }

    pub fn from_city_state(state: &CityState) -> Self {
        Self {
            version: CURRENT_SAVE_VERSION,
            grid: state.grid.clone(),
            registry: state.registry.clone(),
            template_overlay: state.catalog.overlay().clone(),
            totals: state.totals.clone(),
            loads: state.loads.clone(),
            zones: state.zones.clone(),
            labour: state.labour.clone(),
            demand: state.demand.clone(),
            services: state.services.clone(),
            budget: state.budget.clone(),
            clock: state.clock.clone(),
            params: state.params.clone(),
            rng: state.rng.state(),
        }
    }

    pub fn into_city_state(self) -> CityState {
        CityState {
            grid: self.grid,
            registry: self.registry,
            catalog: TemplateCatalog::with_overlay(self.template_overlay),
            params: self.params,
            rng: SimRng::from_state(&self.rng),
            clock: self.clock,
            budget: self.budget,
            totals: self.totals,
            loads: self.loads,
            zones: self.zones,
            labour: self.labour,
            demand: self.demand,
            services: self.services,
        }
    }
}
