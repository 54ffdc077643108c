//! The tool boundary: everything outside the simulation changes the world
//! through a [`Tool`] applied at a tile, either directly with [`apply_tool`]
//! or queued as a [`GameAction`] for the next tick.

pub mod actions;
pub mod executor;
pub mod plugin;
pub mod queue;
pub mod result_log;
pub mod results;
pub mod tools;

pub use actions::*;
pub use executor::{execute_queued_actions, execute_single};
pub use plugin::GameActionsPlugin;
pub use queue::*;
pub use result_log::ActionResultLog;
pub use results::*;
pub use tools::{apply_tool, tool_cost, ToolContext};

#[cfg(test)]
mod tests;
