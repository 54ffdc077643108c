//! # TestCity: headless integration test harness
//!
//! Wraps a `bevy::app::App` with `MinimalPlugins` + `SimulationPlugin` so
//! integration tests run the real schedule without a window or renderer.

mod assertions;
mod queries;
mod setup;

use bevy::app::App;
use bevy::prelude::*;

use crate::config::DEFAULT_SEED;
use crate::economy::CityBudget;
use crate::grid::WorldGrid;
use crate::sim_rng::SimRng;
use crate::SimulationPlugin;

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
///
/// Use builder methods to set up city state, then call `tick()` to advance the
/// simulation and query/assert on the resulting resources.
pub struct TestCity {
    app: App,
}

impl Default for TestCity {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCity {
    /// An empty 64x64 city of bare land with default funds.
    pub fn new() -> Self {
        Self::with_size(crate::config::GRID_WIDTH, crate::config::GRID_HEIGHT)
    }

    /// An empty city of bare land with the given dimensions.
    pub fn with_size(width: usize, height: usize) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);

        // Inserted before the plugin so its init_resource calls keep them.
        app.insert_resource(WorldGrid::new(width, height));
        app.insert_resource(SimRng::from_seed_u64(DEFAULT_SEED));
        app.insert_resource(CityBudget::default());
        app.add_plugins(SimulationPlugin);

        // Run one update so Startup systems execute.
        app.update();

        Self { app }
    }
}
