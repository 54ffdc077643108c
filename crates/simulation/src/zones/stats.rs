use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::buildings::BuildingRegistry;
use crate::grid::{Sector, WorldGrid};
use crate::templates::{archetype_for, BuildingTemplate, TemplateCatalog};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct SectorStats {
    pub zoned_tiles: u32,
    /// Zoned tiles with no building yet.
    pub pending_tiles: u32,
    /// Capacity of every built zone building, whatever its status.
    pub built_capacity: f32,
    /// Capacity of active, non-abandoned zone buildings.
    pub occupied_capacity: f32,
    /// Per-tile capacity of the sector's archetype. Pending tiles are
    /// assumed to develop at this density.
    pub nominal_tile_capacity: f32,
}

impl SectorStats {
    /// Occupied over (built + pending × nominal) capacity, 0 when empty.
    pub fn fill_fraction(&self) -> f32 {
        let total = self.built_capacity + self.pending_tiles as f32 * self.nominal_tile_capacity;
        if total <= 0.0 {
            0.0
        } else {
            (self.occupied_capacity / total).clamp(0.0, 1.0)
        }
    }
}

/// Per-sector tallies read by the demand engine.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct ZoneStats {
    /// Indexed by [`Sector::index`].
    pub sectors: [SectorStats; 3],
    pub population: u32,
    pub jobs: u32,
}

impl ZoneStats {
    pub fn sector(&self, sector: Sector) -> &SectorStats {
        &self.sectors[sector.index()]
    }
}

/// Capacity a template contributes to its sector's fill fraction.
pub fn sector_capacity(template: &BuildingTemplate, sector: Sector) -> f32 {
    match sector {
        Sector::Residential => template.population_capacity as f32,
        Sector::Commercial | Sector::Industrial => template.jobs_capacity as f32,
    }
}

pub fn gather_zone_stats(
    grid: &WorldGrid,
    registry: &BuildingRegistry,
    catalog: &TemplateCatalog,
) -> ZoneStats {
    let mut stats = ZoneStats::default();

    for tile in &grid.tiles {
        let Some(sector) = tile.kind.sector() else {
            continue;
        };
        let entry = &mut stats.sectors[sector.index()];
        entry.zoned_tiles += 1;
        if tile.building_id.is_none() {
            entry.pending_tiles += 1;
        }
    }

    for sector in Sector::ALL {
        if let Some(template) = catalog.get(archetype_for(sector)) {
            let tiles = template.tile_count().max(1) as f32;
            stats.sectors[sector.index()].nominal_tile_capacity =
                sector_capacity(template, sector) / tiles;
        }
    }

    for building in registry.iter() {
        let Some(template) = catalog.get(&building.template_id) else {
            continue;
        };
        let occupied = building.is_occupied();
        if occupied {
            stats.population += template.population_capacity;
            stats.jobs += template.jobs_capacity;
        }
        if let Some(sector) = template.sector {
            let capacity = sector_capacity(template, sector);
            let entry = &mut stats.sectors[sector.index()];
            entry.built_capacity += capacity;
            if occupied {
                entry.occupied_capacity += capacity;
            }
        }
    }

    stats
}
