//! Action executor system: drains the [`ActionQueue`] each fixed-update tick
//! and applies every queued [`GameAction`], recording results in the
//! [`ActionResultLog`].

use bevy::prelude::*;

use crate::buildings::BuildingRegistry;
use crate::economy::CityBudget;
use crate::game_params::GameParams;
use crate::grid::WorldGrid;
use crate::templates::TemplateCatalog;

use super::result_log::ActionResultLog;
use super::tools::{apply_tool, ToolContext};
use super::{ActionError, ActionQueue, ActionResult, GameAction, Tool};

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

/// Drains all pending actions from the queue and executes them in order.
pub fn execute_queued_actions(
    mut queue: ResMut<ActionQueue>,
    mut log: ResMut<ActionResultLog>,
    mut grid: ResMut<WorldGrid>,
    mut registry: ResMut<BuildingRegistry>,
    catalog: Res<TemplateCatalog>,
    mut budget: ResMut<CityBudget>,
    params: Res<GameParams>,
) {
    if queue.is_empty() {
        return;
    }
    let mut ctx = ToolContext {
        grid: &mut grid,
        registry: &mut registry,
        catalog: &catalog,
        budget: &mut budget,
        costs: &params.tools,
    };
    for queued in queue.drain() {
        let result = execute_single(&queued.action, &mut ctx);
        if let ActionResult::Error(e) = &result {
            debug!("{:?} from {:?} rejected: {}", queued.action, queued.source, e);
        }
        log.push(queued.action, result);
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

pub fn execute_single(action: &GameAction, ctx: &mut ToolContext) -> ActionResult {
    match action {
        GameAction::ApplyTool { tool, pos } => apply_tool(tool, pos.0, pos.1, ctx),
        GameAction::ApplyToolRect { tool, min, max } => execute_tool_rect(tool, *min, *max, ctx),
        GameAction::SetBuildingHealth { building, health } => {
            if !health.is_finite() {
                ActionResult::Error(ActionError::InvalidHealth)
            } else if ctx.registry.set_health(*building, *health) {
                ActionResult::Success
            } else {
                ActionResult::Error(ActionError::UnknownBuilding)
            }
        }
    }
}

/// Succeeds if any tile in the rectangle changed; otherwise reports the
/// first tile's error. The rectangle is clipped to the grid first.
fn execute_tool_rect(
    tool: &Tool,
    min: (usize, usize),
    max: (usize, usize),
    ctx: &mut ToolContext,
) -> ActionResult {
    let (lx, hx) = (min.0.min(max.0), min.0.max(max.0));
    let (ly, hy) = (min.1.min(max.1), min.1.max(max.1));
    if lx >= ctx.grid.width || ly >= ctx.grid.height {
        return ActionResult::Error(ActionError::OutOfBounds);
    }
    let hx = hx.min(ctx.grid.width - 1);
    let hy = hy.min(ctx.grid.height - 1);

    let mut first_error = None;
    let mut applied = 0usize;
    for y in ly..=hy {
        for x in lx..=hx {
            match apply_tool(tool, x, y, ctx) {
                ActionResult::Success => applied += 1,
                ActionResult::Error(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
    }

    match first_error {
        Some(e) if applied == 0 => ActionResult::Error(e),
        _ => ActionResult::Success,
    }
}
