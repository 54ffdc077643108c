use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::buildings::BuildingRegistry;
use crate::grid::WorldGrid;
use crate::templates::TemplateCatalog;

/// Population and job shares per tile, derived from occupied buildings.
/// A building's capacity is split evenly over its footprint.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct ZoneLoads {
    pub population: Vec<f32>,
    pub jobs: Vec<f32>,
    pub total_population: f32,
    pub total_jobs: f32,
}

impl ZoneLoads {
    pub fn population_at(&self, idx: usize) -> f32 {
        self.population.get(idx).copied().unwrap_or(0.0)
    }

    pub fn jobs_at(&self, idx: usize) -> f32 {
        self.jobs.get(idx).copied().unwrap_or(0.0)
    }
}

pub fn compute_zone_loads(
    grid: &WorldGrid,
    registry: &BuildingRegistry,
    catalog: &TemplateCatalog,
) -> ZoneLoads {
    let mut loads = ZoneLoads {
        population: vec![0.0; grid.len()],
        jobs: vec![0.0; grid.len()],
        ..Default::default()
    };

    for building in registry.iter().filter(|b| b.is_occupied()) {
        let Some(template) = catalog.get(&building.template_id) else {
            continue;
        };
        let tiles = template.tile_count().max(1) as f32;
        let pop_share = template.population_capacity as f32 / tiles;
        let job_share = template.jobs_capacity as f32 / tiles;
        for (x, y) in template.footprint(building.origin) {
            if !grid.in_bounds(x, y) {
                continue;
            }
            let idx = grid.index(x, y);
            loads.population[idx] += pop_share;
            loads.jobs[idx] += job_share;
        }
        loads.total_population += template.population_capacity as f32;
        loads.total_jobs += template.jobs_capacity as f32;
    }

    loads
}
