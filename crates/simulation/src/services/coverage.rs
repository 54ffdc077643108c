use std::collections::VecDeque;

use crate::adjacency::is_zone;
use crate::grid::WorldGrid;

/// A zone tile reachable from a service building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceCandidate {
    pub idx: usize,
    pub x: usize,
    pub y: usize,
    /// Steps from the nearest footprint tile.
    pub distance: u32,
}

/// Zone tiles within `radius` steps of the footprint, walking only through
/// road and zone tiles. Sorted by distance, then grid index.
pub fn reachable_zones(
    grid: &WorldGrid,
    origin: (usize, usize),
    size: (usize, usize),
    radius: u32,
) -> Vec<ServiceCandidate> {
    let mut distance: Vec<Option<u32>> = vec![None; grid.len()];
    let mut queue = VecDeque::new();

    let (ox, oy) = origin;
    for y in oy..oy + size.1 {
        for x in ox..ox + size.0 {
            if !grid.in_bounds(x, y) {
                continue;
            }
            let idx = grid.index(x, y);
            distance[idx] = Some(0);
            queue.push_back(idx);
        }
    }

    let mut found = Vec::new();
    while let Some(idx) = queue.pop_front() {
        let Some(dist) = distance[idx] else {
            continue;
        };
        if dist >= radius {
            continue;
        }
        let (x, y) = grid.coords(idx);
        let (cells, count) = grid.neighbors4(x, y);
        for &(nx, ny) in &cells[..count] {
            let nidx = grid.index(nx, ny);
            if distance[nidx].is_some() {
                continue;
            }
            let tile = &grid.tiles[nidx];
            let zone = is_zone(tile);
            if !zone && !tile.is_road() {
                continue;
            }
            distance[nidx] = Some(dist + 1);
            if zone {
                found.push(ServiceCandidate {
                    idx: nidx,
                    x: nx,
                    y: ny,
                    distance: dist + 1,
                });
            }
            queue.push_back(nidx);
        }
    }

    found.sort_by_key(|c| (c.distance, c.idx));
    found
}
