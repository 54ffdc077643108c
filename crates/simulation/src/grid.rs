use std::collections::BTreeMap;

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::buildings::BuildingId;
use crate::config::{HAPPINESS_EDIT_NUDGE, HAPPINESS_MAX, HAPPINESS_START};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode, Default)]
pub enum TileKind {
    #[default]
    Land,
    Water,
    Tree,
    Road,
    Rail,
    PowerLine,
    WaterPipe,
    Residential,
    Commercial,
    Industrial,
    PowerPlant,
    WaterWorks,
    Civic,
}

impl TileKind {
    pub fn sector(self) -> Option<Sector> {
        match self {
            TileKind::Residential => Some(Sector::Residential),
            TileKind::Commercial => Some(Sector::Commercial),
            TileKind::Industrial => Some(Sector::Industrial),
            _ => None,
        }
    }

    pub fn is_zone(self) -> bool {
        self.sector().is_some()
    }

    /// Kinds that only ever appear as part of a placed building footprint.
    pub fn is_building_kind(self) -> bool {
        matches!(
            self,
            TileKind::PowerPlant | TileKind::WaterWorks | TileKind::Civic
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            TileKind::Land => "Land",
            TileKind::Water => "Water",
            TileKind::Tree => "Tree",
            TileKind::Road => "Road",
            TileKind::Rail => "Rail",
            TileKind::PowerLine => "Power Line",
            TileKind::WaterPipe => "Water Pipe",
            TileKind::Residential => "Residential",
            TileKind::Commercial => "Commercial",
            TileKind::Industrial => "Industrial",
            TileKind::PowerPlant => "Power Plant",
            TileKind::WaterWorks => "Water Works",
            TileKind::Civic => "Civic",
        }
    }
}

/// Zoning sector. Each sector has its own demand value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode)]
pub enum Sector {
    Residential,
    Commercial,
    Industrial,
}

impl Sector {
    pub const ALL: [Sector; 3] = [Sector::Residential, Sector::Commercial, Sector::Industrial];

    pub fn zone_kind(self) -> TileKind {
        match self {
            Sector::Residential => TileKind::Residential,
            Sector::Commercial => TileKind::Commercial,
            Sector::Industrial => TileKind::Industrial,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Sector::Residential => 0,
            Sector::Commercial => 1,
            Sector::Industrial => 2,
        }
    }
}

/// Per-tile result of one service allocation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Encode, Decode, Default)]
pub struct TileService {
    pub served: bool,
    /// Fraction of this tile's load that received capacity, in [0, 1].
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct Tile {
    pub kind: TileKind,
    pub elevation: f32,
    pub happiness: f32,
    pub powered: bool,
    pub watered: bool,
    pub building_id: Option<BuildingId>,
    pub power_plant_type: Option<String>,
    pub power_plant_id: Option<BuildingId>,
    pub road_underlay: bool,
    pub rail_underlay: bool,
    pub power_overlay: bool,
    pub abandoned: bool,
    pub services: BTreeMap<String, TileService>,
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            kind: TileKind::Land,
            elevation: 0.0,
            happiness: HAPPINESS_START,
            powered: false,
            watered: false,
            building_id: None,
            power_plant_type: None,
            power_plant_id: None,
            road_underlay: false,
            rail_underlay: false,
            power_overlay: false,
            abandoned: false,
            services: BTreeMap::new(),
        }
    }
}

impl Tile {
    pub fn is_road(&self) -> bool {
        self.kind == TileKind::Road || self.road_underlay
    }

    pub fn is_rail(&self) -> bool {
        self.kind == TileKind::Rail || self.rail_underlay
    }

    pub fn has_power_plant(&self) -> bool {
        self.power_plant_id.is_some() || self.power_plant_type.is_some()
    }

    fn nudge_happiness(&mut self) {
        self.happiness = (self.happiness + HAPPINESS_EDIT_NUDGE).min(HAPPINESS_MAX);
    }

    fn clear_transport_layers(&mut self) {
        self.road_underlay = false;
        self.rail_underlay = false;
        self.power_overlay = false;
    }

    fn clear_building_refs(&mut self) {
        self.building_id = None;
        self.power_plant_type = None;
        self.power_plant_id = None;
        self.abandoned = false;
        self.services.clear();
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct WorldGrid {
    pub tiles: Vec<Tile>,
    pub width: usize,
    pub height: usize,
    /// Bumped on every structural change so consumers can skip unchanged grids.
    pub tile_revision: u64,
}

impl Default for WorldGrid {
    fn default() -> Self {
        Self::new(crate::config::GRID_WIDTH, crate::config::GRID_HEIGHT)
    }
}

impl WorldGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            tiles: vec![Tile::default(); width * height],
            width,
            height,
            tile_revision: 0,
        }
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> (usize, usize) {
        (idx % self.width, idx / self.width)
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Bounds-checked tile access. Out-of-range coordinates mean "no tile".
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<&Tile> {
        if self.in_bounds(x, y) {
            Some(&self.tiles[self.index(x, y)])
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Tile> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&mut self.tiles[idx])
        } else {
            None
        }
    }

    /// Returns up to 4 cardinal neighbors and the count of valid entries.
    /// Use `&result[..count]` to iterate over valid neighbors.
    pub fn neighbors4(&self, x: usize, y: usize) -> ([(usize, usize); 4], usize) {
        let mut result = [(0, 0); 4];
        let mut count = 0;
        if x > 0 {
            result[count] = (x - 1, y);
            count += 1;
        }
        if x + 1 < self.width {
            result[count] = (x + 1, y);
            count += 1;
        }
        if y > 0 {
            result[count] = (x, y - 1);
            count += 1;
        }
        if y + 1 < self.height {
            result[count] = (x, y + 1);
            count += 1;
        }
        (result, count)
    }

    /// Changes a tile's primary kind. This is the only way tool edits change a
    /// kind: transport layers are cleared, happiness is nudged up, and any
    /// building or plant back-reference is dropped.
    ///
    /// Returns `false` if the coordinates are out of range.
    pub fn set_tile(&mut self, x: usize, y: usize, kind: TileKind) -> bool {
        let Some(tile) = self.get_mut(x, y) else {
            return false;
        };
        tile.kind = kind;
        tile.clear_transport_layers();
        tile.nudge_happiness();
        tile.clear_building_refs();
        self.tile_revision += 1;
        true
    }

    /// Building-path counterpart of [`WorldGrid::set_tile`]: stamps one
    /// footprint tile with its owning building. `kind = None` keeps the
    /// current kind (zone buildings grow on their lot).
    pub(crate) fn stamp_building_tile(
        &mut self,
        x: usize,
        y: usize,
        kind: Option<TileKind>,
        id: BuildingId,
        plant_type: Option<&str>,
    ) {
        let Some(tile) = self.get_mut(x, y) else {
            return;
        };
        if let Some(kind) = kind {
            tile.kind = kind;
        }
        tile.clear_transport_layers();
        tile.nudge_happiness();
        tile.building_id = Some(id);
        tile.abandoned = false;
        tile.services.clear();
        tile.powered = false;
        tile.watered = false;
        match plant_type {
            Some(plant) => {
                tile.power_plant_type = Some(plant.to_string());
                tile.power_plant_id = Some(id);
            }
            None => {
                tile.power_plant_type = None;
                tile.power_plant_id = None;
            }
        }
        self.tile_revision += 1;
    }

    /// Overwrites the crossing flags of a tile. Counts as a structural edit.
    pub fn set_underlays(&mut self, x: usize, y: usize, road: bool, rail: bool, power: bool) {
        let Some(tile) = self.get_mut(x, y) else {
            return;
        };
        tile.road_underlay = road;
        tile.rail_underlay = rail;
        tile.power_overlay = power;
        self.tile_revision += 1;
    }

    pub fn count_kind(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|t| t.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_is_absent() {
        let grid = WorldGrid::new(8, 8);
        assert!(grid.get(8, 0).is_none());
        assert!(grid.get(0, 8).is_none());
        assert!(grid.get(7, 7).is_some());
    }

    #[test]
    fn test_neighbors() {
        let grid = WorldGrid::new(8, 8);
        assert_eq!(grid.neighbors4(0, 0).1, 2);
        assert_eq!(grid.neighbors4(4, 4).1, 4);
        assert_eq!(grid.neighbors4(7, 7).1, 2);
        assert_eq!(grid.neighbors4(0, 4).1, 3);
    }

    #[test]
    fn test_coords_roundtrip() {
        let grid = WorldGrid::new(10, 6);
        for (x, y) in [(0, 0), (9, 0), (3, 5), (9, 5)] {
            assert_eq!(grid.coords(grid.index(x, y)), (x, y));
        }
    }

    #[test]
    fn test_set_tile_bumps_revision_and_nudges_happiness() {
        let mut grid = WorldGrid::new(4, 4);
        let before = grid.get(1, 1).unwrap().happiness;
        assert!(grid.set_tile(1, 1, TileKind::Road));
        assert_eq!(grid.tile_revision, 1);
        let tile = grid.get(1, 1).unwrap();
        assert_eq!(tile.kind, TileKind::Road);
        assert!(tile.happiness > before);
        assert!(!grid.set_tile(4, 1, TileKind::Road));
        assert_eq!(grid.tile_revision, 1);
    }

    #[test]
    fn test_happiness_is_capped() {
        let mut grid = WorldGrid::new(2, 2);
        for _ in 0..500 {
            grid.set_tile(0, 0, TileKind::Land);
        }
        assert_eq!(grid.get(0, 0).unwrap().happiness, HAPPINESS_MAX);
    }

    #[test]
    fn test_set_tile_clears_back_references_and_layers() {
        let mut grid = WorldGrid::new(4, 4);
        grid.stamp_building_tile(2, 2, Some(TileKind::PowerPlant), BuildingId(7), Some("coal"));
        grid.set_underlays(2, 2, true, false, true);
        grid.set_tile(2, 2, TileKind::Land);
        let tile = grid.get(2, 2).unwrap();
        assert!(tile.building_id.is_none());
        assert!(tile.power_plant_id.is_none());
        assert!(tile.power_plant_type.is_none());
        assert!(!tile.road_underlay && !tile.power_overlay);
    }

    #[test]
    fn test_stamp_keeps_zone_kind_when_none() {
        let mut grid = WorldGrid::new(4, 4);
        grid.set_tile(1, 1, TileKind::Residential);
        grid.stamp_building_tile(1, 1, None, BuildingId(3), None);
        let tile = grid.get(1, 1).unwrap();
        assert_eq!(tile.kind, TileKind::Residential);
        assert_eq!(tile.building_id, Some(BuildingId(3)));
        assert!(!tile.has_power_plant());
    }

    #[test]
    fn test_underlay_counts_as_road() {
        let mut grid = WorldGrid::new(3, 3);
        grid.set_tile(1, 1, TileKind::PowerLine);
        grid.set_underlays(1, 1, true, false, false);
        assert!(grid.get(1, 1).unwrap().is_road());
    }
}
