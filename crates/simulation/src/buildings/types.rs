use std::collections::BTreeMap;
use std::fmt;

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::config::BUILDING_HEALTH_MAX;

/// Stable handle of a placed building. Assigned monotonically and never reused.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
pub struct BuildingId(pub u32);

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode, Default)]
pub enum BuildingStatus {
    #[default]
    Active,
    InactiveNoPower,
    InactiveNoWater,
    InactiveDamaged,
}

impl BuildingStatus {
    pub fn is_active(self) -> bool {
        self == BuildingStatus::Active
    }

    pub fn name(self) -> &'static str {
        match self {
            BuildingStatus::Active => "Active",
            BuildingStatus::InactiveNoPower => "No Power",
            BuildingStatus::InactiveNoWater => "No Water",
            BuildingStatus::InactiveDamaged => "Damaged",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct BuildingState {
    pub status: BuildingStatus,
    /// 0 ..= 100. Set externally; the lifecycle only reads it.
    pub health: f32,
    /// Capacity consumed per service id in the last allocation pass.
    pub slots_used: BTreeMap<String, f32>,
    /// Consecutive lifecycle passes spent outside `Active`.
    pub trouble_ticks: u32,
    pub abandoned: bool,
}

impl Default for BuildingState {
    fn default() -> Self {
        Self {
            status: BuildingStatus::Active,
            health: BUILDING_HEALTH_MAX,
            slots_used: BTreeMap::new(),
            trouble_ticks: 0,
            abandoned: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct BuildingInstance {
    pub id: BuildingId,
    pub template_id: String,
    /// Top-left footprint cell.
    pub origin: (usize, usize),
    pub state: BuildingState,
}

impl BuildingInstance {
    /// Active and not abandoned: the building currently houses or employs.
    pub fn is_occupied(&self) -> bool {
        self.state.status.is_active() && !self.state.abandoned
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlacementError {
    OutOfBounds {
        origin: (usize, usize),
        width: usize,
        height: usize,
    },
    Overlap {
        x: usize,
        y: usize,
        occupant: Option<BuildingId>,
    },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::OutOfBounds {
                origin,
                width,
                height,
            } => write!(
                f,
                "{width}x{height} footprint at ({}, {}) leaves the map",
                origin.0, origin.1
            ),
            PlacementError::Overlap {
                x,
                y,
                occupant: Some(id),
            } => write!(f, "tile ({x}, {y}) is occupied by building {id}"),
            PlacementError::Overlap { x, y, occupant: None } => {
                write!(f, "tile ({x}, {y}) already hosts a power plant")
            }
        }
    }
}

impl std::error::Error for PlacementError {}
