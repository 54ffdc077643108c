//! JSON and binary codecs for [`SaveData`].
//!
//! Binary saves are `bitcode` encoded, lz4 compressed and wrapped in the
//! checksummed header from [`crate::file_header`]. JSON saves are plain
//! `serde_json`. [`decode_save`] accepts either.

use serde::{Deserialize, Serialize};

use crate::file_header::{has_magic, unwrap_header, wrap_with_header, FLAG_COMPRESSED};
use crate::save_data::SaveData;
use crate::save_error::SaveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaveFormat {
    #[default]
    Binary,
    Json,
}

impl SaveFormat {
    pub fn extension(self) -> &'static str {
        match self {
            SaveFormat::Binary => "bin",
            SaveFormat::Json => "json",
        }
    }
}

pub fn encode_json(data: &SaveData) -> Result<String, SaveError> {
    serde_json::to_string(data).map_err(|e| SaveError::Encode(e.to_string()))
}

pub fn decode_json(text: &str) -> Result<SaveData, SaveError> {
    Ok(serde_json::from_str(text)?)
}

pub fn encode_binary(data: &SaveData) -> Result<Vec<u8>, SaveError> {
    let encoded = bitcode::encode(data);
    let compressed = lz4_flex::compress_prepend_size(&encoded);
    Ok(wrap_with_header(&compressed, FLAG_COMPRESSED))
}

pub fn decode_binary(bytes: &[u8]) -> Result<SaveData, SaveError> {
    let (header, payload) = unwrap_header(bytes)?;
    if header.is_compressed() {
        let raw = lz4_flex::decompress_size_prepended(payload)?;
        Ok(bitcode::decode(&raw)?)
    } else {
        Ok(bitcode::decode(payload)?)
    }
}

pub fn encode_save(data: &SaveData, format: SaveFormat) -> Result<Vec<u8>, SaveError> {
    match format {
        SaveFormat::Binary => encode_binary(data),
        SaveFormat::Json => encode_json(data).map(String::into_bytes),
    }
}

/// Sniffs the format from the first bytes.
pub fn detect_format(bytes: &[u8]) -> Option<SaveFormat> {
    if has_magic(bytes) {
        return Some(SaveFormat::Binary);
    }
    match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{') => Some(SaveFormat::Json),
        _ => None,
    }
}

pub fn decode_save(bytes: &[u8]) -> Result<SaveData, SaveError> {
    match detect_format(bytes) {
        Some(SaveFormat::Binary) => decode_binary(bytes),
        Some(SaveFormat::Json) => {
            let text = std::str::from_utf8(bytes)
                .map_err(|e| SaveError::Decode(format!("JSON save is not UTF-8: {e}")))?;
            decode_json(text)
        }
        None => Err(SaveError::UnknownFormat(
            "expected a binary save header or a JSON object".into(),
        )),
    }
}
