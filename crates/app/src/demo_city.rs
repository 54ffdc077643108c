//! A small scripted town, queued through the tool boundary like any other
//! caller would. Tiles the terrain makes unusable (water) are simply
//! rejected and show up in the action log.

use bevy::prelude::*;

use simulation::game_actions::{ActionQueue, ActionSource, GameAction, Tool};
use simulation::grid::Sector;
use simulation::templates::{ELEMENTARY_SCHOOL, WATER_PUMP, WIND_TURBINE};

/// Width of the town in tiles, counted from its origin.
const TOWN_WIDTH: usize = 31;

fn town_actions(origin: (usize, usize)) -> Vec<GameAction> {
    let (ox, oy) = origin;
    let at = |dx: usize, dy: usize| (ox + dx, oy + dy);
    let rect = |tool: Tool, min: (usize, usize), max: (usize, usize)| GameAction::ApplyToolRect {
        tool,
        min: at(min.0, min.1),
        max: at(max.0, max.1),
    };
    let single = |tool: Tool, dx: usize, dy: usize| GameAction::ApplyTool {
        tool,
        pos: at(dx, dy),
    };

    let last = TOWN_WIDTH - 1;
    let mut actions: Vec<GameAction> = [(0, 1), (1, 1), (0, 2), (1, 2)]
        .into_iter()
        .map(|(dx, dy)| single(Tool::Building(WIND_TURBINE.into()), dx, dy))
        .collect();
    actions.extend([
        rect(Tool::Road, (0, 3), (last, 3)),
        single(Tool::Building(WATER_PUMP.into()), 4, 4),
        single(Tool::Building(ELEMENTARY_SCHOOL.into()), 5, 4),
        rect(Tool::Zone(Sector::Residential), (7, 4), (last, 5)),
        rect(Tool::Zone(Sector::Commercial), (3, 2), (last, 2)),
        rect(Tool::Zone(Sector::Industrial), (3, 1), (last, 1)),
    ]);
    actions
}

/// Queues the town for the next simulation tick.
pub fn queue_demo_city(world: &mut World, origin: (usize, usize)) {
    let tick = world
        .get_resource::<simulation::time_of_day::GameClock>()
        .map_or(0, |clock| clock.tick);
    let Some(mut queue) = world.get_resource_mut::<ActionQueue>() else {
        warn!("No action queue; demo city skipped");
        return;
    };
    let actions = town_actions(origin);
    info!("Queued {} demo city actions at {:?}", actions.len(), origin);
    for action in actions {
        queue.push(tick, ActionSource::Script, action);
    }
}
