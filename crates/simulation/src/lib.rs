use bevy::prelude::*;

pub mod adjacency;
pub mod buildings;
pub mod city_state;
pub mod config;
pub mod debug_snapshot;
pub mod economy;
pub mod game_actions;
pub mod game_params;
pub mod grid;
pub mod services;
pub mod sim_rng;
pub mod simulation_sets;
pub mod templates;
pub mod terrain;
pub mod time_of_day;
pub mod utilities;
pub mod zones;

#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use city_state::{run_simulation_pass, CityState};
pub use simulation_sets::SimulationSet;

use crate::config::TICK_SECONDS;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::PreSim,
                SimulationSet::Networks,
                SimulationSet::Lifecycle,
                SimulationSet::Zones,
                SimulationSet::Growth,
                SimulationSet::Services,
                SimulationSet::PostSim,
            )
                .chain(),
        );

        app.insert_resource(Time::<Fixed>::from_seconds(TICK_SECONDS))
            .init_resource::<grid::WorldGrid>()
            .init_resource::<game_params::GameParams>()
            .init_resource::<sim_rng::SimRng>()
            .init_resource::<time_of_day::GameClock>()
            .init_resource::<economy::CityBudget>()
            .add_systems(
                FixedUpdate,
                time_of_day::tick_game_clock.in_set(SimulationSet::PreSim),
            )
            .add_systems(
                FixedUpdate,
                economy::settle_daily_budget.in_set(SimulationSet::PostSim),
            );

        app.add_plugins((
            game_actions::GameActionsPlugin,
            utilities::UtilitiesPlugin,
            buildings::BuildingsPlugin,
            zones::ZonesPlugin,
            services::ServicesPlugin,
        ));
    }
}
