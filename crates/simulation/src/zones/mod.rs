pub mod demand;
pub mod growth;
pub mod labour;
pub mod loads;
pub mod stats;
pub mod systems;


pub use demand::{
    compute_sector_demand, DemandBreakdown, DemandInputs, SectorCoefficients, ZoneDemand,
};
pub use growth::{grow_zones, growth_candidates};
pub use labour::{compute_labour_stats, LabourStats};
pub use loads::{compute_zone_loads, ZoneLoads};
pub use stats::{gather_zone_stats, SectorStats, ZoneStats};
pub use systems::{
    compute_zone_demand, demand_inputs, update_zone_demand, update_zone_growth, update_zone_loads,
    update_zone_stats,
};

use bevy::prelude::*;

pub struct ZonesPlugin;

impl Plugin for ZonesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ZoneDemand>()
            .init_resource::<ZoneLoads>()
            .init_resource::<ZoneStats>()
            .init_resource::<LabourStats>()
            .add_systems(
                FixedUpdate,
                (update_zone_loads, update_zone_stats, update_zone_demand)
                    .chain()
                    .in_set(crate::SimulationSet::Zones),
            )
            .add_systems(
                FixedUpdate,
                update_zone_growth.in_set(crate::SimulationSet::Growth),
            );
    }
}
