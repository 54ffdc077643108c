//! Single-tile tool application.
//!
//! Every tool runs the same pipeline: bounds, template lookup, tile
//! validity, overlap, funds. Only when all of them pass is the grid touched,
//! and the cost is charged exactly once afterwards.

use bevy::prelude::*;

use crate::buildings::{
    place_building, remove_building, validate_placement, BuildingId, BuildingRegistry,
    PlacementError,
};
use crate::economy::CityBudget;
use crate::game_params::ToolCosts;
use crate::grid::{Tile, TileKind, WorldGrid};
use crate::templates::{BuildingTemplate, TemplateCatalog};

use super::{ActionError, ActionResult, Tool};

/// Everything a tool may read or mutate.
pub struct ToolContext<'a> {
    pub grid: &'a mut WorldGrid,
    pub registry: &'a mut BuildingRegistry,
    pub catalog: &'a TemplateCatalog,
    pub budget: &'a mut CityBudget,
    pub costs: &'a ToolCosts,
}

/// The validated change a tool will make.
enum TileEdit {
    Set(TileKind),
    /// Sets the kind, then the crossing flags `(road, rail, power)`.
    Cross(TileKind, bool, bool, bool),
    RemoveBuilding(BuildingId),
    PlaceBuilding,
}

/// Price of one use of `tool`, or `None` for an unknown template.
pub fn tool_cost(tool: &Tool, costs: &ToolCosts, catalog: &TemplateCatalog) -> Option<f64> {
    let cost = match tool {
        Tool::Bulldoze => costs.bulldoze,
        Tool::Road => costs.road,
        Tool::Rail => costs.rail,
        Tool::PowerLine => costs.power_line,
        Tool::WaterPipe => costs.water_pipe,
        Tool::Tree => costs.tree,
        Tool::Zone(_) => costs.zone,
        Tool::Building(id) => catalog.get(id)?.cost,
    };
    Some(cost)
}

pub fn apply_tool(tool: &Tool, x: usize, y: usize, ctx: &mut ToolContext) -> ActionResult {
    match try_apply(tool, x, y, ctx) {
        Ok(()) => {
            debug!("Applied {} at ({}, {})", tool.name(), x, y);
            ActionResult::Success
        }
        Err(e) => ActionResult::Error(e),
    }
}

fn try_apply(tool: &Tool, x: usize, y: usize, ctx: &mut ToolContext) -> Result<(), ActionError> {
    let tile = ctx.grid.get(x, y).ok_or(ActionError::OutOfBounds)?;

    let template = match tool {
        Tool::Building(id) => Some(
            ctx.catalog
                .get(id)
                .ok_or_else(|| ActionError::UnknownTemplate(id.clone()))?,
        ),
        _ => None,
    };

    let edit = match template {
        Some(template) => {
            check_building_site(ctx.grid, template, (x, y))?;
            TileEdit::PlaceBuilding
        }
        None => check_tile(tool, tile)?,
    };

    let cost = match template {
        Some(template) => template.cost,
        None => tool_cost(tool, ctx.costs, ctx.catalog).unwrap_or_default(),
    };
    if cost > 0.0 && !ctx.budget.can_afford(cost) {
        return Err(ActionError::InsufficientFunds {
            cost,
            funds: ctx.budget.funds,
        });
    }

    match edit {
        TileEdit::Set(kind) => {
            ctx.grid.set_tile(x, y, kind);
        }
        TileEdit::Cross(kind, road, rail, power) => {
            ctx.grid.set_tile(x, y, kind);
            ctx.grid.set_underlays(x, y, road, rail, power);
        }
        TileEdit::RemoveBuilding(id) => {
            remove_building(ctx.grid, ctx.registry, id);
        }
        TileEdit::PlaceBuilding => {
            // Site already validated.
            if let Some(template) = template {
                place_building(ctx.grid, ctx.registry, template, (x, y))
                    .map_err(placement_error)?;
            }
        }
    }

    ctx.budget.charge(cost);
    Ok(())
}

fn occupant(tile: &Tile) -> Option<BuildingId> {
    tile.building_id.or(tile.power_plant_id)
}

fn invalid(reason: impl Into<String>) -> ActionError {
    ActionError::InvalidTile(reason.into())
}

/// Tile validity then overlap for the single-tile tools.
fn check_tile(tool: &Tool, tile: &Tile) -> Result<TileEdit, ActionError> {
    if matches!(tool, Tool::Bulldoze) {
        return bulldoze_edit(tile);
    }
    if occupant(tile).is_some() || tile.kind.is_building_kind() {
        return Err(ActionError::BlockedByBuilding);
    }

    let kind = tile.kind;
    let clear = matches!(kind, TileKind::Land | TileKind::Tree);
    if kind == TileKind::Water {
        return Err(invalid("water"));
    }

    match tool {
        Tool::Road => match kind {
            _ if clear => Ok(TileEdit::Set(TileKind::Road)),
            TileKind::PowerLine if !tile.road_underlay && !tile.rail_underlay => {
                Ok(TileEdit::Cross(TileKind::Road, false, false, true))
            }
            _ if tile.is_road() => Err(invalid("already a road")),
            other => Err(invalid(other.name())),
        },
        Tool::Rail => match kind {
            _ if clear => Ok(TileEdit::Set(TileKind::Rail)),
            _ if tile.is_rail() => Err(invalid("already a rail")),
            other => Err(invalid(other.name())),
        },
        Tool::PowerLine => match kind {
            _ if clear => Ok(TileEdit::Set(TileKind::PowerLine)),
            TileKind::Road if !tile.power_overlay => {
                Ok(TileEdit::Cross(TileKind::PowerLine, true, false, false))
            }
            TileKind::Rail => Ok(TileEdit::Cross(TileKind::PowerLine, false, true, false)),
            TileKind::PowerLine | TileKind::Road => Err(invalid("already a power line")),
            other => Err(invalid(other.name())),
        },
        Tool::WaterPipe => match kind {
            _ if clear => Ok(TileEdit::Set(TileKind::WaterPipe)),
            other => Err(invalid(other.name())),
        },
        Tool::Tree => match kind {
            TileKind::Land => Ok(TileEdit::Set(TileKind::Tree)),
            other => Err(invalid(other.name())),
        },
        Tool::Zone(sector) => {
            let zone = sector.zone_kind();
            if kind == zone {
                Err(invalid("already zoned"))
            } else if clear || kind.is_zone() {
                Ok(TileEdit::Set(zone))
            } else {
                Err(invalid(kind.name()))
            }
        }
        Tool::Bulldoze | Tool::Building(_) => Err(invalid(kind.name())),
    }
}

fn bulldoze_edit(tile: &Tile) -> Result<TileEdit, ActionError> {
    if let Some(id) = occupant(tile) {
        return Ok(TileEdit::RemoveBuilding(id));
    }
    match tile.kind {
        TileKind::Land | TileKind::Water => Err(ActionError::NothingToBulldoze),
        _ => Ok(TileEdit::Set(TileKind::Land)),
    }
}

/// Tile validity then overlap for a whole footprint. Zone buildings need
/// their sector's zoning under every cell; everything else needs clear land.
fn check_building_site(
    grid: &WorldGrid,
    template: &BuildingTemplate,
    origin: (usize, usize),
) -> Result<(), ActionError> {
    let fits = origin.0.checked_add(template.width).is_some_and(|e| e <= grid.width)
        && origin.1.checked_add(template.height).is_some_and(|e| e <= grid.height);
    if !fits {
        return Err(ActionError::OutOfBounds);
    }

    for (x, y) in template.footprint(origin) {
        let Some(tile) = grid.get(x, y) else {
            return Err(ActionError::OutOfBounds);
        };
        if occupant(tile).is_some() {
            continue;
        }
        match template.sector {
            Some(sector) if tile.kind != sector.zone_kind() => {
                return Err(invalid(format!("needs {} zoning", sector.zone_kind().name())));
            }
            Some(_) => {}
            None if matches!(tile.kind, TileKind::Land | TileKind::Tree) => {}
            None => return Err(invalid(tile.kind.name())),
        }
    }

    validate_placement(grid, template, origin).map_err(placement_error)
}

fn placement_error(e: PlacementError) -> ActionError {
    match e {
        PlacementError::OutOfBounds { .. } => ActionError::OutOfBounds,
        PlacementError::Overlap { .. } => ActionError::BlockedByBuilding,
    }
}
