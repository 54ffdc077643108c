use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::game_params::GameParams;

/// Simulation clock. One tick per fixed step; days are a fixed number of
/// ticks (`EconomyParams::ticks_per_day`).
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct GameClock {
    pub tick: u64,
    pub day: u64,
}

impl GameClock {
    /// Advances one tick. Returns `true` when a new day starts.
    pub fn advance(&mut self, ticks_per_day: u64) -> bool {
        self.tick += 1;
        let day = self.tick / ticks_per_day.max(1);
        if day != self.day {
            self.day = day;
            true
        } else {
            false
        }
    }

    pub fn is_day_boundary(&self, ticks_per_day: u64) -> bool {
        self.tick > 0 && self.tick % ticks_per_day.max(1) == 0
    }

    pub fn formatted(&self) -> String {
        format!("Day {} (tick {})", self.day, self.tick)
    }
}

pub fn tick_game_clock(mut clock: ResMut<GameClock>, params: Res<GameParams>) {
    if clock.advance(params.economy.ticks_per_day) {
        debug!("{}", clock.formatted());
    }
}
