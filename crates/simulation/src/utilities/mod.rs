mod network;
#[cfg(test)]
mod tests;

pub use network::{recompute_power, recompute_water, NetworkSummary};

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::buildings::BuildingRegistry;
use crate::grid::WorldGrid;
use crate::templates::TemplateCatalog;

/// City-wide utility production and consumption from the last network pass.
/// The balances are informational; a deficit does not cut tiles off.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct UtilityTotals {
    pub power_produced: f32,
    pub power_consumed: f32,
    pub water_produced: f32,
    pub water_consumed: f32,
    pub powered_tiles: usize,
    pub watered_tiles: usize,
}

impl UtilityTotals {
    pub fn power_balance(&self) -> f32 {
        self.power_produced - self.power_consumed
    }

    pub fn water_balance(&self) -> f32 {
        self.water_produced - self.water_consumed
    }

    pub fn apply(&mut self, power: NetworkSummary, water: NetworkSummary) {
        self.power_produced = power.produced;
        self.power_consumed = power.consumed;
        self.powered_tiles = power.energized_tiles;
        self.water_produced = water.produced;
        self.water_consumed = water.consumed;
        self.watered_tiles = water.energized_tiles;
    }
}

/// Power first, then water, then store the totals.
pub fn recompute_networks(
    grid: &mut WorldGrid,
    registry: &BuildingRegistry,
    catalog: &TemplateCatalog,
    totals: &mut UtilityTotals,
) {
    let power = recompute_power(grid, registry, catalog);
    let water = recompute_water(grid, registry, catalog);
    totals.apply(power, water);
}

pub fn update_utility_networks(
    mut grid: ResMut<WorldGrid>,
    registry: Res<BuildingRegistry>,
    catalog: Res<TemplateCatalog>,
    mut totals: ResMut<UtilityTotals>,
) {
    let was_short = totals.power_balance() < 0.0;
    recompute_networks(&mut grid, &registry, &catalog, &mut totals);
    let short = totals.power_balance() < 0.0;
    if short && !was_short {
        warn!(
            "Power deficit: producing {:.1} MW, consuming {:.1} MW",
            totals.power_produced, totals.power_consumed
        );
    }
}

pub struct UtilitiesPlugin;

impl Plugin for UtilitiesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UtilityTotals>().add_systems(
            FixedUpdate,
            update_utility_networks.in_set(crate::SimulationSet::Networks),
        );
    }
}
