//! Assertion helpers for `TestCity` integration tests.

use crate::buildings::BuildingStatus;
use crate::grid::TileKind;

use super::TestCity;

impl TestCity {
    pub fn assert_funds(&self, expected: f64) {
        let funds = self.budget().funds;
        assert!(
            (funds - expected).abs() < 1e-6,
            "Expected funds {expected}, got {funds}"
        );
    }

    pub fn assert_tile_kind(&self, x: usize, y: usize, expected: TileKind) {
        let kind = self.tile(x, y).kind;
        assert_eq!(
            kind, expected,
            "Expected {expected:?} at ({x}, {y}), found {kind:?}"
        );
    }

    pub fn assert_powered(&self, x: usize, y: usize) {
        assert!(self.tile(x, y).powered, "Expected ({x}, {y}) to be powered");
    }

    pub fn assert_unpowered(&self, x: usize, y: usize) {
        assert!(
            !self.tile(x, y).powered,
            "Expected ({x}, {y}) to be unpowered"
        );
    }

    pub fn assert_has_building(&self, x: usize, y: usize) {
        assert!(
            self.tile(x, y).building_id.is_some(),
            "Expected building at ({x}, {y}), found none"
        );
    }

    pub fn assert_building_status(&self, x: usize, y: usize, expected: BuildingStatus) {
        let Some(building) = self.building_at(x, y) else {
            panic!("Expected building at ({x}, {y}), found none");
        };
        assert_eq!(
            building.state.status, expected,
            "Building {} at ({x}, {y}) has status {}",
            building.id,
            building.state.status.name()
        );
    }

    pub fn assert_demand_in_range(&self) {
        for sector in crate::grid::Sector::ALL {
            let value = self.demand().demand_for(sector);
            assert!(
                (0.0..=100.0).contains(&value),
                "{sector:?} demand {value} out of range"
            );
        }
    }
}
