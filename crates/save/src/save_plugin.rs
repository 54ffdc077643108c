use bevy::prelude::*;

use crate::save_codec::{decode_save, encode_save, SaveFormat};
use crate::save_data::SaveData;
use crate::save_error::SaveError;

// ---------------------------------------------------------------------------
// Slot resource
// ---------------------------------------------------------------------------

/// Opaque byte slot the outside world reads saves from and writes loads
/// into. Where the bytes go (disk, browser storage, network) is not this
/// crate's business.
#[derive(Resource, Debug, Default)]
pub struct SaveSlot {
    pub bytes: Option<Vec<u8>>,
    /// Message of the most recent failed save or load, cleared on success.
    pub last_error: Option<String>,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Serialize the world into [`SaveSlot::bytes`].
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct SaveGameEvent {
    pub format: SaveFormat,
}

/// Restore the world from [`SaveSlot::bytes`].
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct LoadGameEvent;

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SaveGameEvent>()
            .add_event::<LoadGameEvent>()
            .init_resource::<SaveSlot>()
            .add_systems(Update, (exclusive_save, exclusive_load).chain());
    }
}

// ---------------------------------------------------------------------------
// Exclusive systems
// ---------------------------------------------------------------------------

/// Handles at most one save per frame; extra events in the same frame are
/// dropped after the last one's format is taken.
pub(crate) fn exclusive_save(world: &mut World) {
    let Some(event) = world
        .resource_mut::<Events<SaveGameEvent>>()
        .drain()
        .last()
    else {
        return;
    };

    let result = SaveData::capture(world).and_then(|data| encode_save(&data, event.format));
    let mut slot = world.resource_mut::<SaveSlot>();
    match result {
        Ok(bytes) => {
            info!("Saved {} bytes ({:?})", bytes.len(), event.format);
            slot.bytes = Some(bytes);
            slot.last_error = None;
        }
        Err(err) => {
            warn!("Save failed: {err}");
            slot.last_error = Some(err.to_string());
        }
    }
}

pub(crate) fn exclusive_load(world: &mut World) {
    if world
        .resource_mut::<Events<LoadGameEvent>>()
        .drain()
        .last()
        .is_none()
    {
        return;
    }

    let result = match world.resource::<SaveSlot>().bytes.as_deref() {
        Some(bytes) => decode_save(bytes),
        None => Err(SaveError::Decode("save slot is empty".into())),
    };

    match result {
        Ok(data) => {
            let tick = data.clock.tick;
            data.restore(world);
            world.resource_mut::<SaveSlot>().last_error = None;
            info!("Loaded save at tick {tick}");
        }
        Err(err) => {
            warn!("Load failed: {err}");
            world.resource_mut::<SaveSlot>().last_error = Some(err.to_string());
        }
    }
}
