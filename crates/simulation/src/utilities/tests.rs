#[cfg(test)]
mod tests {
    use crate::buildings::{
        place_building, update_building_states, BuildingRegistry, BuildingStatus,
    };
    use crate::grid::{TileKind, WorldGrid};
    use crate::templates::{
        TemplateCatalog, COAL_PLANT, HYDRO_PLANT, RES_LOW, WATER_PUMP, WIND_TURBINE,
    };
    use crate::utilities::{recompute_networks, recompute_power, recompute_water, UtilityTotals};

    fn setup(width: usize, height: usize) -> (WorldGrid, BuildingRegistry, TemplateCatalog) {
        (
            WorldGrid::new(width, height),
            BuildingRegistry::default(),
            TemplateCatalog::default(),
        )
    }

    fn line(grid: &mut WorldGrid, y: usize, xs: std::ops::RangeInclusive<usize>, kind: TileKind) {
        for x in xs {
            grid.set_tile(x, y, kind);
        }
    }

    fn powered_mask(grid: &WorldGrid) -> Vec<bool> {
        grid.tiles.iter().map(|t| t.powered).collect()
    }

    #[test]
    fn test_multi_tile_plant_counted_once() {
        let (mut grid, mut registry, catalog) = setup(8, 8);
        place_building(&mut grid, &mut registry, catalog.get(HYDRO_PLANT).unwrap(), (2, 2))
            .unwrap();
        let summary = recompute_power(&mut grid, &registry, &catalog);
        assert_eq!(summary.produced, 60.0);
        assert_eq!(summary.sources, 1);
        assert_eq!(summary.consumed, 0.0);
    }

    #[test]
    fn test_power_flows_along_lines_and_roads() {
        let (mut grid, mut registry, catalog) = setup(12, 6);
        place_building(&mut grid, &mut registry, catalog.get(COAL_PLANT).unwrap(), (0, 0))
            .unwrap();
        line(&mut grid, 1, 2..=5, TileKind::PowerLine);
        line(&mut grid, 1, 6..=8, TileKind::Road);
        grid.set_tile(9, 1, TileKind::Residential);

        recompute_power(&mut grid, &registry, &catalog);
        for x in 0..=9 {
            assert!(grid.get(x, 1).unwrap().powered, "({x}, 1) should be powered");
        }
        assert!(!grid.get(10, 1).unwrap().powered);
        assert!(!grid.get(5, 3).unwrap().powered);
    }

    #[test]
    fn test_non_carriers_block_power() {
        let (mut grid, mut registry, catalog) = setup(10, 3);
        place_building(&mut grid, &mut registry, catalog.get(HYDRO_PLANT).unwrap(), (0, 0))
            .unwrap();
        line(&mut grid, 1, 2..=3, TileKind::PowerLine);
        grid.set_tile(4, 1, TileKind::WaterPipe);
        line(&mut grid, 1, 5..=6, TileKind::PowerLine);

        recompute_power(&mut grid, &registry, &catalog);
        assert!(grid.get(3, 1).unwrap().powered);
        assert!(!grid.get(4, 1).unwrap().powered);
        assert!(!grid.get(5, 1).unwrap().powered);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let (mut grid, mut registry, catalog) = setup(16, 16);
        place_building(&mut grid, &mut registry, catalog.get(COAL_PLANT).unwrap(), (0, 0))
            .unwrap();
        place_building(&mut grid, &mut registry, catalog.get(WATER_PUMP).unwrap(), (2, 0))
            .unwrap();
        line(&mut grid, 1, 3..=10, TileKind::Road);
        line(&mut grid, 2, 3..=10, TileKind::Residential);
        update_building_states(&mut grid, &mut registry, &catalog);

        let mut totals = UtilityTotals::default();
        recompute_networks(&mut grid, &registry, &catalog, &mut totals);
        let first_grid = grid.clone();
        let first_totals = totals.clone();

        recompute_networks(&mut grid, &registry, &catalog, &mut totals);
        assert_eq!(grid, first_grid);
        assert_eq!(totals, first_totals);
    }

    #[test]
    fn test_adding_carrier_never_deenergizes() {
        let (mut grid, mut registry, catalog) = setup(12, 6);
        place_building(&mut grid, &mut registry, catalog.get(HYDRO_PLANT).unwrap(), (0, 0))
            .unwrap();
        line(&mut grid, 1, 2..=6, TileKind::PowerLine);
        recompute_power(&mut grid, &registry, &catalog);
        let before = powered_mask(&grid);

        grid.set_tile(7, 1, TileKind::PowerLine);
        grid.set_tile(6, 2, TileKind::Road);
        recompute_power(&mut grid, &registry, &catalog);
        let after = powered_mask(&grid);

        for (idx, was) in before.iter().enumerate() {
            if *was {
                assert!(after[idx], "tile {idx} lost power after expansion");
            }
        }
        assert!(grid.get(7, 1).unwrap().powered);
        assert!(grid.get(6, 2).unwrap().powered);
    }

    #[test]
    fn test_deficit_does_not_cut_tiles() {
        let (mut grid, mut registry, catalog) = setup(20, 4);
        // One 5 MW turbine feeding 12 houses at 1 MW each (after activation).
        place_building(
            &mut grid,
            &mut registry,
            catalog.get(WIND_TURBINE).unwrap(),
            (0, 1),
        )
        .unwrap();
        line(&mut grid, 1, 1..=12, TileKind::Residential);
        for x in 1..=12 {
            place_building(&mut grid, &mut registry, catalog.get(RES_LOW).unwrap(), (x, 1))
                .unwrap();
        }
        recompute_power(&mut grid, &registry, &catalog);
        update_building_states(&mut grid, &mut registry, &catalog);
        let summary = recompute_power(&mut grid, &registry, &catalog);

        assert_eq!(summary.produced, 5.0);
        assert_eq!(summary.consumed, 12.0);
        assert!(summary.balance() < 0.0);
        for x in 1..=12 {
            assert!(grid.get(x, 1).unwrap().powered);
        }
    }

    #[test]
    fn test_inactive_plant_still_seeds_but_produces_nothing() {
        let (mut grid, mut registry, catalog) = setup(8, 8);
        let id =
            place_building(&mut grid, &mut registry, catalog.get(COAL_PLANT).unwrap(), (0, 0))
                .unwrap();
        registry.set_health(id, 0.0);
        update_building_states(&mut grid, &mut registry, &catalog);
        assert_eq!(
            registry.get(id).unwrap().state.status,
            BuildingStatus::InactiveDamaged
        );
        grid.set_tile(2, 0, TileKind::PowerLine);

        let summary = recompute_power(&mut grid, &registry, &catalog);
        assert_eq!(summary.produced, 0.0);
        assert!(grid.get(2, 0).unwrap().powered);
    }

    #[test]
    fn test_water_needs_an_active_pump() {
        let (mut grid, mut registry, catalog) = setup(10, 4);
        place_building(&mut grid, &mut registry, catalog.get(WIND_TURBINE).unwrap(), (0, 0))
            .unwrap();
        let pump =
            place_building(&mut grid, &mut registry, catalog.get(WATER_PUMP).unwrap(), (1, 0))
                .unwrap();
        line(&mut grid, 0, 2..=5, TileKind::WaterPipe);

        // Pump placed unpowered: no water yet.
        let summary = recompute_water(&mut grid, &registry, &catalog);
        assert_eq!(summary.produced, 0.0);
        assert!(!grid.get(3, 0).unwrap().watered);

        recompute_power(&mut grid, &registry, &catalog);
        update_building_states(&mut grid, &mut registry, &catalog);
        assert!(registry.get(pump).unwrap().state.status.is_active());

        let summary = recompute_water(&mut grid, &registry, &catalog);
        assert_eq!(summary.produced, 60.0);
        assert!(grid.get(1, 0).unwrap().watered);
        assert!(grid.get(5, 0).unwrap().watered);
        assert!(!grid.get(6, 0).unwrap().watered);
        // Roads do not carry water.
        grid.set_tile(6, 0, TileKind::Road);
        grid.set_tile(7, 0, TileKind::WaterPipe);
        recompute_water(&mut grid, &registry, &catalog);
        assert!(!grid.get(7, 0).unwrap().watered);
    }

    #[test]
    fn test_balances() {
        let totals = UtilityTotals {
            power_produced: 40.0,
            power_consumed: 12.5,
            water_produced: 60.0,
            water_consumed: 75.0,
            ..Default::default()
        };
        assert_eq!(totals.power_balance(), 27.5);
        assert_eq!(totals.water_balance(), -15.0);
    }
}
