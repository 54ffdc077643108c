#[cfg(test)]
mod tests {
    use crate::adjacency::is_power_carrier;
    use crate::buildings::{BuildingId, BuildingRegistry};
    use crate::economy::CityBudget;
    use crate::game_actions::{
        apply_tool, execute_single, tool_cost, ActionError, ActionResult, GameAction, Tool,
        ToolContext,
    };
    use crate::game_params::ToolCosts;
    use crate::grid::{Sector, TileKind, WorldGrid};
    use crate::templates::{TemplateCatalog, COAL_PLANT, HYDRO_PLANT, RES_LOW};

    struct World {
        grid: WorldGrid,
        registry: BuildingRegistry,
        catalog: TemplateCatalog,
        budget: CityBudget,
        costs: ToolCosts,
    }

    impl World {
        fn new(funds: f64) -> Self {
            Self {
                grid: WorldGrid::new(8, 8),
                registry: BuildingRegistry::default(),
                catalog: TemplateCatalog::default(),
                budget: CityBudget::with_funds(funds),
                costs: ToolCosts::default(),
            }
        }

        fn ctx(&mut self) -> ToolContext<'_> {
            ToolContext {
                grid: &mut self.grid,
                registry: &mut self.registry,
                catalog: &self.catalog,
                budget: &mut self.budget,
                costs: &self.costs,
            }
        }

        fn apply(&mut self, tool: Tool, x: usize, y: usize) -> ActionResult {
            apply_tool(&tool, x, y, &mut self.ctx())
        }

        fn kind(&self, x: usize, y: usize) -> TileKind {
            self.grid.get(x, y).map(|t| t.kind).unwrap_or_default()
        }
    }

    #[test]
    fn test_road_charges_once() {
        let mut world = World::new(100.0);
        assert!(world.apply(Tool::Road, 1, 1).is_success());
        assert_eq!(world.kind(1, 1), TileKind::Road);
        assert_eq!(world.budget.funds, 90.0);
    }

    #[test]
    fn test_out_of_bounds_changes_nothing() {
        let mut world = World::new(100.0);
        let result = world.apply(Tool::Road, 8, 0);
        assert_eq!(result, ActionResult::Error(ActionError::OutOfBounds));
        assert_eq!(world.budget.funds, 100.0);
        assert_eq!(world.grid.tile_revision, 0);
    }

    #[test]
    fn test_insufficient_funds_is_atomic() {
        let mut world = World::new(5.0);
        let result = world.apply(Tool::Road, 2, 2);
        assert_eq!(
            result,
            ActionResult::Error(ActionError::InsufficientFunds {
                cost: 10.0,
                funds: 5.0
            })
        );
        assert_eq!(world.kind(2, 2), TileKind::Land);
        assert_eq!(world.budget.funds, 5.0);
        assert_eq!(world.grid.tile_revision, 0);
    }

    #[test]
    fn test_water_rejects_construction() {
        let mut world = World::new(1_000.0);
        world.grid.tiles[0].kind = TileKind::Water;
        assert!(matches!(
            world.apply(Tool::Road, 0, 0),
            ActionResult::Error(ActionError::InvalidTile(_))
        ));
        assert_eq!(
            world.apply(Tool::Bulldoze, 0, 0),
            ActionResult::Error(ActionError::NothingToBulldoze)
        );
        assert_eq!(world.budget.funds, 1_000.0);
    }

    #[test]
    fn test_power_line_over_road_keeps_road() {
        let mut world = World::new(1_000.0);
        world.apply(Tool::Road, 3, 3);
        assert!(world.apply(Tool::PowerLine, 3, 3).is_success());
        let tile = world.grid.get(3, 3).unwrap();
        assert_eq!(tile.kind, TileKind::PowerLine);
        assert!(tile.road_underlay);
        assert!(tile.is_road());
        assert!(is_power_carrier(tile));
        assert_eq!(world.budget.funds, 985.0);
    }

    #[test]
    fn test_power_line_over_rail_keeps_rail() {
        let mut world = World::new(1_000.0);
        world.apply(Tool::Rail, 3, 3);
        assert!(world.apply(Tool::PowerLine, 3, 3).is_success());
        let tile = world.grid.get(3, 3).unwrap();
        assert!(tile.rail_underlay);
        assert!(tile.is_rail());
    }

    #[test]
    fn test_road_over_power_line_sets_overlay() {
        let mut world = World::new(1_000.0);
        world.apply(Tool::PowerLine, 4, 4);
        assert!(world.apply(Tool::Road, 4, 4).is_success());
        let tile = world.grid.get(4, 4).unwrap();
        assert_eq!(tile.kind, TileKind::Road);
        assert!(tile.power_overlay);
        assert!(is_power_carrier(tile));

        // A second line on the same crossing is rejected.
        assert!(matches!(
            world.apply(Tool::PowerLine, 4, 4),
            ActionResult::Error(ActionError::InvalidTile(_))
        ));
    }

    #[test]
    fn test_zoning_and_rezoning() {
        let mut world = World::new(0.0);
        // Zoning is free, so it works even with no money.
        assert!(world.apply(Tool::Zone(Sector::Residential), 1, 1).is_success());
        assert!(matches!(
            world.apply(Tool::Zone(Sector::Residential), 1, 1),
            ActionResult::Error(ActionError::InvalidTile(_))
        ));
        assert!(world.apply(Tool::Zone(Sector::Industrial), 1, 1).is_success());
        assert_eq!(world.kind(1, 1), TileKind::Industrial);
    }

    #[test]
    fn test_unknown_template() {
        let mut world = World::new(100_000.0);
        assert_eq!(
            world.apply(Tool::Building("castle".into()), 1, 1),
            ActionResult::Error(ActionError::UnknownTemplate("castle".into()))
        );
        assert_eq!(world.budget.funds, 100_000.0);
    }

    #[test]
    fn test_building_placement_charges_template_cost() {
        let mut world = World::new(21_000.0);
        assert!(world
            .apply(Tool::Building(HYDRO_PLANT.into()), 0, 0)
            .is_success());
        assert_eq!(world.budget.funds, 1_000.0);
        assert_eq!(world.registry.len(), 1);
        assert_eq!(world.kind(1, 1), TileKind::PowerPlant);
    }

    #[test]
    fn test_building_footprint_must_fit() {
        let mut world = World::new(100_000.0);
        assert_eq!(
            world.apply(Tool::Building(COAL_PLANT.into()), 7, 7),
            ActionResult::Error(ActionError::OutOfBounds)
        );
        assert!(world.registry.is_empty());
    }

    #[test]
    fn test_building_overlap_is_blocked() {
        let mut world = World::new(100_000.0);
        world.apply(Tool::Building(COAL_PLANT.into()), 2, 2);
        let funds = world.budget.funds;
        assert_eq!(
            world.apply(Tool::Building(COAL_PLANT.into()), 3, 3),
            ActionResult::Error(ActionError::BlockedByBuilding)
        );
        assert_eq!(
            world.apply(Tool::Road, 3, 3),
            ActionResult::Error(ActionError::BlockedByBuilding)
        );
        assert_eq!(world.budget.funds, funds);
        assert_eq!(world.registry.len(), 1);
    }

    #[test]
    fn test_building_on_water_is_invalid() {
        let mut world = World::new(100_000.0);
        let idx = world.grid.index(3, 2);
        world.grid.tiles[idx].kind = TileKind::Water;
        assert!(matches!(
            world.apply(Tool::Building(COAL_PLANT.into()), 2, 2),
            ActionResult::Error(ActionError::InvalidTile(_))
        ));
        assert!(world.registry.is_empty());
    }

    #[test]
    fn test_zone_building_needs_matching_zoning() {
        let mut world = World::new(100.0);
        assert!(matches!(
            world.apply(Tool::Building(RES_LOW.into()), 1, 1),
            ActionResult::Error(ActionError::InvalidTile(_))
        ));
        world.apply(Tool::Zone(Sector::Residential), 1, 1);
        assert!(world.apply(Tool::Building(RES_LOW.into()), 1, 1).is_success());
        assert_eq!(world.kind(1, 1), TileKind::Residential);
        assert!(world.grid.get(1, 1).unwrap().building_id.is_some());
    }

    #[test]
    fn test_bulldoze_removes_whole_building() {
        let mut world = World::new(100_000.0);
        world.apply(Tool::Building(COAL_PLANT.into()), 2, 2);
        assert!(world.apply(Tool::Bulldoze, 3, 3).is_success());
        assert!(world.registry.is_empty());
        for (x, y) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
            assert_eq!(world.kind(x, y), TileKind::Land);
            assert!(world.grid.get(x, y).unwrap().building_id.is_none());
        }
    }

    #[test]
    fn test_bulldoze_clears_tile_and_rejects_empty_land() {
        let mut world = World::new(100.0);
        world.apply(Tool::Tree, 5, 5);
        assert!(world.apply(Tool::Bulldoze, 5, 5).is_success());
        assert_eq!(world.kind(5, 5), TileKind::Land);
        assert_eq!(
            world.apply(Tool::Bulldoze, 5, 5),
            ActionResult::Error(ActionError::NothingToBulldoze)
        );
        assert_eq!(world.budget.funds, 100.0 - 2.0 - 1.0);
    }

    #[test]
    fn test_tool_costs() {
        let catalog = TemplateCatalog::default();
        let costs = ToolCosts::default();
        assert_eq!(tool_cost(&Tool::Rail, &costs, &catalog), Some(25.0));
        assert_eq!(
            tool_cost(&Tool::Building(HYDRO_PLANT.into()), &costs, &catalog),
            Some(20_000.0)
        );
        assert_eq!(tool_cost(&Tool::Building("nope".into()), &costs, &catalog), None);
    }

    #[test]
    fn test_rect_applies_every_tile() {
        let mut world = World::new(1_000.0);
        let action = GameAction::ApplyToolRect {
            tool: Tool::Road,
            min: (3, 1),
            max: (0, 1),
        };
        assert!(execute_single(&action, &mut world.ctx()).is_success());
        assert_eq!(world.grid.count_kind(TileKind::Road), 4);
        assert_eq!(world.budget.funds, 960.0);
    }

    #[test]
    fn test_rect_reports_error_when_nothing_changes() {
        let mut world = World::new(1_000.0);
        let action = GameAction::ApplyToolRect {
            tool: Tool::Bulldoze,
            min: (0, 0),
            max: (1, 1),
        };
        assert_eq!(
            execute_single(&action, &mut world.ctx()),
            ActionResult::Error(ActionError::NothingToBulldoze)
        );
    }

    #[test]
    fn test_rect_is_clipped_to_the_grid() {
        let mut world = World::new(1_000.0);
        let action = GameAction::ApplyToolRect {
            tool: Tool::Zone(Sector::Residential),
            min: (0, 0),
            max: (usize::MAX, usize::MAX),
        };
        assert!(execute_single(&action, &mut world.ctx()).is_success());
        assert_eq!(world.grid.count_kind(TileKind::Residential), 64);
        assert_eq!(world.budget.funds, 1_000.0);
    }

    #[test]
    fn test_rect_entirely_off_grid_is_out_of_bounds() {
        let mut world = World::new(1_000.0);
        let revision = world.grid.tile_revision;
        let action = GameAction::ApplyToolRect {
            tool: Tool::Road,
            min: (8, 0),
            max: (usize::MAX, usize::MAX),
        };
        assert_eq!(
            execute_single(&action, &mut world.ctx()),
            ActionResult::Error(ActionError::OutOfBounds)
        );
        assert_eq!(world.grid.tile_revision, revision);
        assert_eq!(world.budget.funds, 1_000.0);
    }

    #[test]
    fn test_set_building_health_rejects_nan() {
        let mut world = World::new(100_000.0);
        world.apply(Tool::Building(COAL_PLANT.into()), 0, 0);
        let set = GameAction::SetBuildingHealth {
            building: BuildingId(0),
            health: f32::NAN,
        };
        assert_eq!(
            execute_single(&set, &mut world.ctx()),
            ActionResult::Error(ActionError::InvalidHealth)
        );
        assert_eq!(world.registry.get(BuildingId(0)).unwrap().state.health, 100.0);
    }

    #[test]
    fn test_set_building_health_action() {
        let mut world = World::new(100_000.0);
        world.apply(Tool::Building(COAL_PLANT.into()), 0, 0);
        let set = GameAction::SetBuildingHealth {
            building: BuildingId(0),
            health: 10.0,
        };
        assert!(execute_single(&set, &mut world.ctx()).is_success());
        assert_eq!(world.registry.get(BuildingId(0)).unwrap().state.health, 10.0);

        let missing = GameAction::SetBuildingHealth {
            building: BuildingId(9),
            health: 10.0,
        };
        assert_eq!(
            execute_single(&missing, &mut world.ctx()),
            ActionResult::Error(ActionError::UnknownBuilding)
        );
    }

    #[test]
    fn test_messages_are_readable() {
        assert_eq!(ActionResult::Success.message(), "OK");
        let err = ActionResult::Error(ActionError::InsufficientFunds {
            cost: 20_000.0,
            funds: 150.0,
        });
        assert_eq!(err.message(), "Not enough money: costs $20000, you have $150");
    }

    #[test]
    fn test_action_serialization() {
        let action = GameAction::ApplyTool {
            tool: Tool::Zone(Sector::Commercial),
            pos: (10, 20),
        };
        let json = serde_json::to_string(&action).unwrap();
        let decoded: GameAction = serde_json::from_str(&json).unwrap();
        assert_eq!(action, decoded);
    }
}
