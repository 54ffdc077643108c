//! Civic service coverage: which zone tiles a service building reaches over
//! roads and zones, and how its finite capacity is split between them.

mod allocation;
mod coverage;

pub use allocation::{
    allocate_service, tile_load, update_service_coverage, ServiceCoverage, ServiceStats,
};
pub use coverage::{reachable_zones, ServiceCandidate};

use bevy::prelude::*;

use crate::buildings::BuildingRegistry;
use crate::game_params::GameParams;
use crate::grid::WorldGrid;
use crate::templates::TemplateCatalog;
use crate::zones::ZoneLoads;

pub fn update_services(
    mut grid: ResMut<WorldGrid>,
    mut registry: ResMut<BuildingRegistry>,
    catalog: Res<TemplateCatalog>,
    loads: Res<ZoneLoads>,
    params: Res<GameParams>,
    mut stats: ResMut<ServiceStats>,
) {
    *stats = update_service_coverage(
        &mut grid,
        &mut registry,
        &catalog,
        &loads,
        params.labour.worker_share,
    );
}

pub struct ServicesPlugin;

impl Plugin for ServicesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ServiceStats>().add_systems(
            FixedUpdate,
            update_services.in_set(crate::SimulationSet::Services),
        );
    }
}
