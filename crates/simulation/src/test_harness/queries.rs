//! Query and simulation-tick methods for `TestCity`.

use bevy::prelude::*;

use crate::buildings::{BuildingInstance, BuildingRegistry};
use crate::debug_snapshot::{snapshot_from_world, DebugSnapshot};
use crate::economy::CityBudget;
use crate::game_actions::{ActionQueue, ActionResultLog, ActionSource, GameAction};
use crate::grid::{Tile, TileKind, WorldGrid};
use crate::services::ServiceStats;
use crate::time_of_day::GameClock;
use crate::utilities::UtilityTotals;
use crate::zones::{LabourStats, ZoneDemand};

use super::TestCity;

impl TestCity {
    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run N fixed-update ticks by directly executing the `FixedUpdate`
    /// schedule. This bypasses Bevy's time system entirely, so the number of
    /// passes does not depend on wall-clock time.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    /// Queues an action for the next tick's `PreSim` phase.
    pub fn queue_action(&mut self, action: GameAction) {
        let tick = self.clock().tick;
        self.app
            .world_mut()
            .resource_mut::<ActionQueue>()
            .push(tick, ActionSource::Script, action);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn grid(&self) -> &WorldGrid {
        self.resource::<WorldGrid>()
    }

    pub fn budget(&self) -> &CityBudget {
        self.resource::<CityBudget>()
    }

    pub fn clock(&self) -> &GameClock {
        self.resource::<GameClock>()
    }

    pub fn registry(&self) -> &BuildingRegistry {
        self.resource::<BuildingRegistry>()
    }

    pub fn totals(&self) -> &UtilityTotals {
        self.resource::<UtilityTotals>()
    }

    pub fn demand(&self) -> &ZoneDemand {
        self.resource::<ZoneDemand>()
    }

    pub fn labour(&self) -> &LabourStats {
        self.resource::<LabourStats>()
    }

    pub fn services(&self) -> &ServiceStats {
        self.resource::<ServiceStats>()
    }

    pub fn action_log(&self) -> &ActionResultLog {
        self.resource::<ActionResultLog>()
    }

    /// Panics on out-of-range coordinates.
    pub fn tile(&self, x: usize, y: usize) -> &Tile {
        self.grid()
            .get(x, y)
            .unwrap_or_else(|| panic!("({x}, {y}) is outside the grid"))
    }

    pub fn building_at(&self, x: usize, y: usize) -> Option<&BuildingInstance> {
        self.registry().building_at(self.grid(), x, y)
    }

    pub fn building_count(&self) -> usize {
        self.registry().len()
    }

    pub fn tile_count(&self, kind: TileKind) -> usize {
        self.grid().count_kind(kind)
    }

    pub fn debug_snapshot(&self) -> DebugSnapshot {
        snapshot_from_world(self.app.world())
            .unwrap_or_else(|| panic!("simulation resources missing from the test world"))
    }
}
