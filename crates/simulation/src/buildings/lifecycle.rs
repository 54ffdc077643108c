use bevy::prelude::*;

use super::registry::BuildingRegistry;
use super::types::BuildingStatus;
use crate::config::ABANDON_AFTER_TROUBLE_TICKS;
use crate::grid::WorldGrid;
use crate::templates::{BuildingTemplate, TemplateCatalog};

/// Status a building would have given the current tile flags.
///
/// Damage wins over everything. Utilities must reach *every* footprint
/// tile; partial coverage counts as missing.
pub fn evaluate_status(
    grid: &WorldGrid,
    template: &BuildingTemplate,
    origin: (usize, usize),
    health: f32,
) -> BuildingStatus {
    if health <= 0.0 {
        return BuildingStatus::InactiveDamaged;
    }
    let all_tiles = |pred: fn(&crate::grid::Tile) -> bool| {
        template
            .footprint(origin)
            .all(|(x, y)| grid.get(x, y).is_some_and(pred))
    };
    if template.requires_power && !all_tiles(|t| t.powered) {
        return BuildingStatus::InactiveNoPower;
    }
    if template.water_use > 0.0 && !all_tiles(|t| t.watered) {
        return BuildingStatus::InactiveNoWater;
    }
    BuildingStatus::Active
}

/// One lifecycle pass over every instance: refreshes status, counts trouble
/// passes and flags zone buildings that stayed in trouble too long as
/// abandoned (mirrored onto their tiles).
///
/// Instances whose template can no longer be resolved keep their status.
pub fn update_building_states(
    grid: &mut WorldGrid,
    registry: &mut BuildingRegistry,
    catalog: &TemplateCatalog,
) {
    let mut abandonment_changes = Vec::new();

    for building in registry.buildings.values_mut() {
        let Some(template) = catalog.get(&building.template_id) else {
            continue;
        };
        let state = &mut building.state;
        let was_abandoned = state.abandoned;
        state.status = evaluate_status(grid, template, building.origin, state.health);

        if state.status.is_active() {
            state.trouble_ticks = 0;
            state.abandoned = false;
        } else {
            state.trouble_ticks = state.trouble_ticks.saturating_add(1);
            if template.sector.is_some() && state.trouble_ticks >= ABANDON_AFTER_TROUBLE_TICKS {
                state.abandoned = true;
            }
        }

        if state.abandoned != was_abandoned {
            let cells: Vec<_> = template.footprint(building.origin).collect();
            abandonment_changes.push((building.id, cells, state.abandoned));
        }
    }

    for (id, cells, abandoned) in abandonment_changes {
        if abandoned {
            info!("Building {} abandoned", id);
        }
        for (x, y) in cells {
            if let Some(tile) = grid.get_mut(x, y) {
                if tile.building_id == Some(id) {
                    tile.abandoned = abandoned;
                }
            }
        }
    }
}

/// Bevy system wrapper for [`update_building_states`].
pub fn update_building_lifecycle(
    mut grid: ResMut<WorldGrid>,
    mut registry: ResMut<BuildingRegistry>,
    catalog: Res<TemplateCatalog>,
) {
    update_building_states(&mut grid, &mut registry, &catalog);
}
