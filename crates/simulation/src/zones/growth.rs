use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use super::demand::ZoneDemand;
use crate::adjacency::{is_frontier_zone, zone_has_road_path};
use crate::buildings::{place_building, BuildingRegistry};
use crate::game_params::GrowthParams;
use crate::grid::{Sector, WorldGrid};
use crate::sim_rng::SimRng;
use crate::templates::{archetype_for, TemplateCatalog};

/// Pending lots of `sector` that may develop: powered, and either reaching a
/// road through zones or sitting on the edge of a zone blob.
pub fn growth_candidates(grid: &WorldGrid, sector: Sector) -> Vec<(usize, usize)> {
    let kind = sector.zone_kind();
    (0..grid.len())
        .map(|idx| grid.coords(idx))
        .filter(|&(x, y)| {
            grid.get(x, y)
                .is_some_and(|t| t.kind == kind && t.building_id.is_none() && t.powered)
        })
        .filter(|&(x, y)| zone_has_road_path(grid, x, y) || is_frontier_zone(grid, x, y))
        .collect()
}

/// One growth pass. Returns the number of buildings created.
///
/// Growth never charges funds.
pub fn grow_zones(
    grid: &mut WorldGrid,
    registry: &mut BuildingRegistry,
    catalog: &TemplateCatalog,
    demand: &ZoneDemand,
    rng: &mut SimRng,
    params: &GrowthParams,
) -> usize {
    let mut grown = 0;
    for sector in Sector::ALL {
        let value = demand.demand_for(sector);
        if value < params.min_demand {
            continue;
        }
        let Some(template) = catalog.get(archetype_for(sector)) else {
            continue;
        };
        let mut candidates = growth_candidates(grid, sector);
        candidates.shuffle(&mut rng.0);
        let chance = (value / crate::config::DEMAND_MAX).clamp(0.0, 1.0);

        for origin in candidates.into_iter().take(params.max_per_sector) {
            if rng.0.gen::<f32>() >= chance {
                continue;
            }
            match place_building(grid, registry, template, origin) {
                Ok(_) => grown += 1,
                Err(err) => debug!("Growth skipped {:?}: {}", origin, err),
            }
        }
    }
    grown
}
