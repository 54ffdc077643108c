//! Builder methods for setting up `TestCity` state.

use bevy::prelude::*;

use crate::buildings::{BuildingId, BuildingRegistry};
use crate::economy::CityBudget;
use crate::game_actions::{apply_tool, ActionResult, Tool, ToolContext};
use crate::game_params::GameParams;
use crate::grid::{Sector, TileKind, WorldGrid};
use crate::sim_rng::SimRng;
use crate::templates::{BuildingTemplate, TemplateCatalog};
use crate::terrain::generate_terrain;

use super::TestCity;

impl TestCity {
    // -----------------------------------------------------------------------
    // World Setup (builder pattern: consumes and returns Self)
    // -----------------------------------------------------------------------

    pub fn with_budget(mut self, funds: f64) -> Self {
        if let Some(mut budget) = self.app.world_mut().get_resource_mut::<CityBudget>() {
            budget.funds = funds;
        }
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.app.world_mut().insert_resource(SimRng::from_seed_u64(seed));
        self
    }

    pub fn with_params(mut self, params: GameParams) -> Self {
        self.app.world_mut().insert_resource(params);
        self
    }

    pub fn with_terrain(mut self, seed: i32) -> Self {
        generate_terrain(&mut self.app.world_mut().resource_mut::<WorldGrid>(), seed);
        self
    }

    /// Sets a tile kind directly, bypassing tool validation and cost.
    pub fn with_tile(mut self, x: usize, y: usize, kind: TileKind) -> Self {
        self.app
            .world_mut()
            .resource_mut::<WorldGrid>()
            .set_tile(x, y, kind);
        self
    }

    /// Applies `tool` and panics if it is rejected.
    pub fn with_tool(mut self, tool: Tool, x: usize, y: usize) -> Self {
        let result = self.apply_tool(tool.clone(), x, y);
        assert!(
            result.is_success(),
            "{} at ({x}, {y}) failed: {}",
            tool.name(),
            result.message()
        );
        self
    }

    /// Horizontal or vertical road from (x0, y0) to (x1, y1), inclusive.
    pub fn with_road(self, x0: usize, y0: usize, x1: usize, y1: usize) -> Self {
        self.with_line(Tool::Road, x0, y0, x1, y1)
    }

    pub fn with_power_line(self, x0: usize, y0: usize, x1: usize, y1: usize) -> Self {
        self.with_line(Tool::PowerLine, x0, y0, x1, y1)
    }

    pub fn with_water_pipe(self, x0: usize, y0: usize, x1: usize, y1: usize) -> Self {
        self.with_line(Tool::WaterPipe, x0, y0, x1, y1)
    }

    fn with_line(mut self, tool: Tool, x0: usize, y0: usize, x1: usize, y1: usize) -> Self {
        for y in y0.min(y1)..=y0.max(y1) {
            for x in x0.min(x1)..=x0.max(x1) {
                self = self.with_tool(tool.clone(), x, y);
            }
        }
        self
    }

    pub fn with_zone_rect(
        mut self,
        x0: usize,
        y0: usize,
        x1: usize,
        y1: usize,
        sector: Sector,
    ) -> Self {
        for y in y0.min(y1)..=y0.max(y1) {
            for x in x0.min(x1)..=x0.max(x1) {
                self = self.with_tool(Tool::Zone(sector), x, y);
            }
        }
        self
    }

    pub fn with_building(self, template_id: &str, x: usize, y: usize) -> Self {
        self.with_tool(Tool::Building(template_id.to_string()), x, y)
    }

    pub fn with_template(mut self, template: BuildingTemplate) -> Self {
        self.app
            .world_mut()
            .resource_mut::<TemplateCatalog>()
            .register(template);
        self
    }

    // -----------------------------------------------------------------------
    // Direct edits (usable mid-test)
    // -----------------------------------------------------------------------

    /// Applies a tool the way an external caller would, outside the queue.
    pub fn apply_tool(&mut self, tool: Tool, x: usize, y: usize) -> ActionResult {
        let world = self.app.world_mut();
        world.resource_scope(|world, mut grid: Mut<WorldGrid>| {
            world.resource_scope(|world, mut registry: Mut<BuildingRegistry>| {
                world.resource_scope(|world, mut budget: Mut<CityBudget>| {
                    let catalog = world.resource::<TemplateCatalog>();
                    let params = world.resource::<GameParams>();
                    let mut ctx = ToolContext {
                        grid: &mut grid,
                        registry: &mut registry,
                        catalog,
                        budget: &mut budget,
                        costs: &params.tools,
                    };
                    apply_tool(&tool, x, y, &mut ctx)
                })
            })
        })
    }

    pub fn set_building_health(&mut self, id: BuildingId, health: f32) -> bool {
        self.app
            .world_mut()
            .resource_mut::<BuildingRegistry>()
            .set_health(id, health)
    }
}
