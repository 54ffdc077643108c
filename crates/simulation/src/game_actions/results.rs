use std::fmt;

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Encode, Decode)]
pub enum ActionResult {
    Success,
    Error(ActionError),
}

impl ActionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ActionResult::Success)
    }

    pub fn error(&self) -> Option<&ActionError> {
        match self {
            ActionResult::Error(e) => Some(e),
            ActionResult::Success => None,
        }
    }

    /// Human-readable outcome, suitable for a status bar.
    pub fn message(&self) -> String {
        match self {
            ActionResult::Success => "OK".to_string(),
            ActionResult::Error(e) => e.to_string(),
        }
    }
}

impl From<Result<(), ActionError>> for ActionResult {
    fn from(result: Result<(), ActionError>) -> Self {
        match result {
            Ok(()) => ActionResult::Success,
            Err(e) => ActionResult::Error(e),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Encode, Decode)]
pub enum ActionError {
    OutOfBounds,
    /// The tool cannot be used on this tile; the payload names the reason.
    InvalidTile(String),
    BlockedByBuilding,
    InsufficientFunds { cost: f64, funds: f64 },
    UnknownTemplate(String),
    NothingToBulldoze,
    UnknownBuilding,
    /// Health must be a finite number.
    InvalidHealth,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::OutOfBounds => write!(f, "Outside the map"),
            ActionError::InvalidTile(reason) => write!(f, "Can't build here: {reason}"),
            ActionError::BlockedByBuilding => write!(f, "A building is in the way"),
            ActionError::InsufficientFunds { cost, funds } => {
                write!(f, "Not enough money: costs ${cost:.0}, you have ${funds:.0}")
            }
            ActionError::UnknownTemplate(id) => write!(f, "Unknown building '{id}'"),
            ActionError::NothingToBulldoze => write!(f, "Nothing to bulldoze"),
            ActionError::UnknownBuilding => write!(f, "No such building"),
            ActionError::InvalidHealth => write!(f, "Health must be a number"),
        }
    }
}

impl std::error::Error for ActionError {}
