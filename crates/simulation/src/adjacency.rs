//! Orthogonal neighbourhood queries and the tile predicates every graph
//! traversal in the simulation is built on.

use pathfinding::prelude::bfs;

use crate::grid::{Tile, TileKind, WorldGrid};

/// The four orthogonal cells around `(x, y)`, clipped to the grid.
pub fn neighbours_of(grid: &WorldGrid, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
    let (cells, count) = grid.neighbors4(x, y);
    cells.into_iter().take(count)
}

pub fn is_zone(tile: &Tile) -> bool {
    tile.kind.is_zone()
}

/// Zones conduct power so a contiguous block of lots only needs one of them
/// to touch a line. Building footprints conduct for the same reason.
pub fn is_power_carrier(tile: &Tile) -> bool {
    matches!(tile.kind, TileKind::PowerLine | TileKind::Road | TileKind::Rail)
        || tile.has_power_plant()
        || tile.road_underlay
        || tile.rail_underlay
        || tile.power_overlay
        || tile.kind.is_zone()
        || tile.building_id.is_some()
}

pub fn is_water_carrier(tile: &Tile) -> bool {
    matches!(tile.kind, TileKind::WaterPipe | TileKind::WaterWorks)
        || tile.kind.is_zone()
        || tile.building_id.is_some()
}

pub fn has_road_access(grid: &WorldGrid, x: usize, y: usize) -> bool {
    neighbours_of(grid, x, y).any(|(nx, ny)| grid.get(nx, ny).is_some_and(Tile::is_road))
}

/// A zone tile with at least one orthogonal neighbour that is not a zone.
pub fn is_frontier_zone(grid: &WorldGrid, x: usize, y: usize) -> bool {
    let Some(tile) = grid.get(x, y) else {
        return false;
    };
    if !is_zone(tile) {
        return false;
    }
    neighbours_of(grid, x, y).any(|(nx, ny)| grid.get(nx, ny).is_some_and(|t| !is_zone(t)))
}

/// Whether the zone tile at `(x, y)` reaches a road through a connected blob
/// of zone tiles. Succeeds as soon as any visited zone tile (the origin
/// included) touches a road directly.
pub fn zone_has_road_path(grid: &WorldGrid, x: usize, y: usize) -> bool {
    if !grid.get(x, y).is_some_and(is_zone) {
        return false;
    }
    bfs(
        &(x, y),
        |&(cx, cy)| {
            neighbours_of(grid, cx, cy)
                .filter(|&(nx, ny)| grid.get(nx, ny).is_some_and(is_zone))
                .collect::<Vec<_>>()
        },
        |&(cx, cy)| has_road_access(grid, cx, cy),
    )
    .is_some()
}
