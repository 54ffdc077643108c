use std::collections::{BTreeSet, VecDeque};

use crate::adjacency::{is_power_carrier, is_water_carrier};
use crate::buildings::BuildingRegistry;
use crate::grid::{Tile, WorldGrid};
use crate::templates::TemplateCatalog;

/// Result of one network recompute.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NetworkSummary {
    pub produced: f32,
    pub consumed: f32,
    pub energized_tiles: usize,
    pub sources: usize,
}

impl NetworkSummary {
    pub fn balance(&self) -> f32 {
        self.produced - self.consumed
    }
}

/// Multi-source flood fill. Seeds are marked before the fill starts; a tile
/// is entered at most once. Returns the number of energized tiles.
fn flood_fill(
    grid: &mut WorldGrid,
    seeds: &[usize],
    is_carrier: fn(&Tile) -> bool,
    mark: fn(&mut Tile),
) -> usize {
    let mut visited = vec![false; grid.len()];
    let mut queue = VecDeque::with_capacity(seeds.len());

    for &idx in seeds {
        if visited[idx] {
            continue;
        }
        visited[idx] = true;
        mark(&mut grid.tiles[idx]);
        queue.push_back(idx);
    }

    let mut energized = queue.len();
    while let Some(idx) = queue.pop_front() {
        let (x, y) = grid.coords(idx);
        let (cells, count) = grid.neighbors4(x, y);
        for &(nx, ny) in &cells[..count] {
            let nidx = grid.index(nx, ny);
            if visited[nidx] || !is_carrier(&grid.tiles[nidx]) {
                continue;
            }
            visited[nidx] = true;
            mark(&mut grid.tiles[nidx]);
            energized += 1;
            queue.push_back(nidx);
        }
    }
    energized
}

/// Recomputes every tile's `powered` flag from the plant-marked tiles and
/// aggregates production and consumption.
///
/// Production counts each plant building once, and only while it is
/// active. Consumption does not limit propagation.
pub fn recompute_power(
    grid: &mut WorldGrid,
    registry: &BuildingRegistry,
    catalog: &TemplateCatalog,
) -> NetworkSummary {
    for tile in &mut grid.tiles {
        tile.powered = false;
    }
    let seeds: Vec<usize> = grid
        .tiles
        .iter()
        .enumerate()
        .filter(|(_, t)| t.has_power_plant())
        .map(|(idx, _)| idx)
        .collect();
    let energized_tiles = flood_fill(grid, &seeds, is_power_carrier, |t| t.powered = true);

    let mut summary = NetworkSummary {
        energized_tiles,
        ..Default::default()
    };
    let mut plants = BTreeSet::new();
    for building in registry.iter() {
        let Some(template) = catalog.get(&building.template_id) else {
            continue;
        };
        if !building.state.status.is_active() {
            continue;
        }
        if template.is_power_source() && plants.insert(building.id) {
            summary.produced += template.power_output;
        }
        summary.consumed += template.power_use;
    }
    summary.sources = plants.len();
    summary
}

/// Water counterpart of [`recompute_power`]. Only active water producers
/// seed the fill, from every tile of their footprint.
pub fn recompute_water(
    grid: &mut WorldGrid,
    registry: &BuildingRegistry,
    catalog: &TemplateCatalog,
) -> NetworkSummary {
    for tile in &mut grid.tiles {
        tile.watered = false;
    }

    let mut summary = NetworkSummary::default();
    let mut seeds = Vec::new();
    for building in registry.iter() {
        let Some(template) = catalog.get(&building.template_id) else {
            continue;
        };
        if !building.state.status.is_active() {
            continue;
        }
        if template.is_water_source() {
            summary.produced += template.water_output;
            summary.sources += 1;
            seeds.extend(
                template
                    .footprint(building.origin)
                    .filter(|&(x, y)| grid.in_bounds(x, y))
                    .map(|(x, y)| grid.index(x, y)),
            );
        }
        summary.consumed += template.water_use;
    }
    summary.energized_tiles = flood_fill(grid, &seeds, is_water_carrier, |t| t.watered = true);
    summary
}
