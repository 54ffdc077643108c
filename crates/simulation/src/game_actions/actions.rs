use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::buildings::BuildingId;
use crate::grid::Sector;

/// What a single click does to one tile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub enum Tool {
    Bulldoze,
    Road,
    Rail,
    PowerLine,
    WaterPipe,
    Tree,
    Zone(Sector),
    /// Places the template with this id, origin at the clicked tile.
    Building(String),
}

impl Tool {
    pub fn name(&self) -> &str {
        match self {
            Tool::Bulldoze => "bulldoze",
            Tool::Road => "road",
            Tool::Rail => "rail",
            Tool::PowerLine => "power line",
            Tool::WaterPipe => "water pipe",
            Tool::Tree => "tree",
            Tool::Zone(Sector::Residential) => "residential zone",
            Tool::Zone(Sector::Commercial) => "commercial zone",
            Tool::Zone(Sector::Industrial) => "industrial zone",
            Tool::Building(id) => id.as_str(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Encode, Decode)]
pub enum GameAction {
    ApplyTool {
        tool: Tool,
        pos: (usize, usize),
    },
    /// Applies `tool` to every tile of the inclusive rectangle, row by row.
    /// Each tile is an independent edit with its own cost.
    ApplyToolRect {
        tool: Tool,
        min: (usize, usize),
        max: (usize, usize),
    },
    SetBuildingHealth {
        building: BuildingId,
        health: f32,
    },
}
