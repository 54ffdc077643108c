//! Zone growth and the building lifecycle across many scheduled ticks.

use crate::buildings::BuildingStatus;
use crate::config::ABANDON_AFTER_TROUBLE_TICKS;
use crate::game_actions::Tool;
use crate::game_params::GameParams;
use crate::grid::Sector;
use crate::templates::{COAL_PLANT, RES_LOW};
use crate::test_harness::TestCity;

/// Coal plant feeding a road with residential lots on both sides.
fn powered_street() -> TestCity {
    TestCity::with_size(24, 12)
        .with_building(COAL_PLANT, 0, 4)
        .with_road(2, 5, 23, 5)
        .with_zone_rect(2, 4, 23, 4, Sector::Residential)
        .with_zone_rect(2, 6, 23, 6, Sector::Residential)
}

#[test]
fn test_powered_zones_grow() {
    let mut city = powered_street();
    assert_eq!(city.building_count(), 1);
    city.tick(100);

    let homes = city.registry().count_for_template(RES_LOW);
    assert!(homes > 0, "expected residential growth, got none");
    // Growth never charges funds.
    city.assert_funds(20_000.0 - 10_000.0 - 22.0 * 10.0);
    city.assert_demand_in_range();
}

#[test]
fn test_unpowered_zones_never_grow() {
    let mut city = TestCity::with_size(24, 12)
        .with_road(2, 5, 23, 5)
        .with_zone_rect(2, 4, 23, 4, Sector::Residential);
    city.tick(100);
    assert_eq!(city.building_count(), 0);
    assert!(city.demand().breakdown_for(Sector::Residential).seeded);
}

#[test]
fn test_growth_caps_per_pass() {
    let mut city = powered_street();
    // Ticks 1..=10 contain exactly one growth pass.
    city.tick(10);
    let homes = city.registry().count_for_template(RES_LOW);
    let cap = city.resource::<GameParams>().growth.max_per_sector;
    assert!(homes <= cap, "{homes} homes grew in one pass, cap is {cap}");
}

#[test]
fn test_cut_power_leads_to_abandonment_and_recovery() {
    let mut city = TestCity::with_size(12, 8)
        .with_building(COAL_PLANT, 0, 0)
        .with_power_line(2, 1, 4, 1)
        .with_zone_rect(5, 1, 5, 1, Sector::Residential)
        .with_building(RES_LOW, 5, 1);
    city.tick(2);
    city.assert_building_status(5, 1, BuildingStatus::Active);
    assert_eq!(city.labour().population, 10.0);

    assert!(city.apply_tool(Tool::Bulldoze, 3, 1).is_success());
    city.tick(1);
    city.assert_building_status(5, 1, BuildingStatus::InactiveNoPower);
    assert!(!city.building_at(5, 1).unwrap().state.abandoned);

    city.tick(ABANDON_AFTER_TROUBLE_TICKS);
    let home = city.building_at(5, 1).unwrap();
    assert!(home.state.abandoned);
    assert!(city.tile(5, 1).abandoned);
    assert_eq!(city.labour().population, 0.0);
    assert_eq!(city.debug_snapshot().buildings.abandoned, 1);

    assert!(city.apply_tool(Tool::PowerLine, 3, 1).is_success());
    city.tick(1);
    city.assert_building_status(5, 1, BuildingStatus::Active);
    assert!(!city.building_at(5, 1).unwrap().state.abandoned);
    assert!(!city.tile(5, 1).abandoned);
}

#[test]
fn test_damage_is_an_external_input() {
    let mut city = TestCity::with_size(8, 8).with_building(COAL_PLANT, 0, 0);
    city.tick(1);
    let id = city.building_at(0, 0).unwrap().id;

    assert!(city.set_building_health(id, 0.0));
    city.tick(1);
    city.assert_building_status(0, 0, BuildingStatus::InactiveDamaged);
    // Production is summed before the lifecycle pass sees the damage.
    assert_eq!(city.totals().power_produced, 40.0);
    city.tick(1);
    assert_eq!(city.totals().power_produced, 0.0);

    // Plant tiles still seed the network while the plant is damaged.
    assert!(city.tile(1, 1).powered);

    assert!(city.set_building_health(id, 50.0));
    city.tick(2);
    city.assert_building_status(0, 0, BuildingStatus::Active);
    assert_eq!(city.totals().power_produced, 40.0);
}
