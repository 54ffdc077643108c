//! Whole-file helpers over the codecs. The format of a file being read is
//! sniffed from its bytes, never from its extension.

use std::path::Path;

use crate::atomic_write::atomic_write;
use crate::save_codec::{decode_save, encode_save, SaveFormat};
use crate::save_data::SaveData;
use crate::save_error::SaveError;

pub fn write_save_file(path: &Path, data: &SaveData, format: SaveFormat) -> Result<(), SaveError> {
    let bytes = encode_save(data, format)?;
    atomic_write(path, &bytes)?;
    Ok(())
}

pub fn read_save_file(path: &Path) -> Result<SaveData, SaveError> {
    let bytes = std::fs::read(path)?;
    decode_save(&bytes)
}
