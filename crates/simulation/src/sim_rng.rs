//! Deterministic simulation RNG resource.
//!
//! Wraps `ChaCha8Rng` so identical seeds produce identical growth. Systems
//! take `ResMut<SimRng>` and never reach for `rand::thread_rng()`.

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_SEED;

/// Full internal state of a `ChaCha8Rng`, in a form both save codecs accept.
/// The 128-bit word position is split into two halves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct RngState {
    pub seed: [u8; 32],
    pub word_pos_hi: u64,
    pub word_pos_lo: u64,
    pub stream: u64,
}

#[derive(Resource, Debug, Clone)]
pub struct SimRng(pub ChaCha8Rng);

impl Default for SimRng {
    fn default() -> Self {
        Self::from_seed_u64(DEFAULT_SEED)
    }
}

impl SimRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn state(&self) -> RngState {
        let word_pos = self.0.get_word_pos();
        RngState {
            seed: self.0.get_seed(),
            word_pos_hi: (word_pos >> 64) as u64,
            word_pos_lo: word_pos as u64,
            stream: self.0.get_stream(),
        }
    }

    pub fn from_state(state: &RngState) -> Self {
        let mut rng = ChaCha8Rng::from_seed(state.seed);
        rng.set_stream(state.stream);
        rng.set_word_pos(((state.word_pos_hi as u128) << 64) | state.word_pos_lo as u128);
        Self(rng)
    }
}
