// ---------------------------------------------------------------------------
// file_header – Binary save header with magic bytes, version, and checksum
// ---------------------------------------------------------------------------
//
// Header format (20 bytes, fixed-size, little-endian):
//   [0..4]   Magic bytes: "TILE" (0x54494C45)
//   [4..8]   Format version (u32)
//   [8..12]  Flags (u32: bit 0 = lz4 compressed)
//   [12..16] Payload size as stored (u32)
//   [16..20] xxHash32 checksum of the payload (everything after the header)
//
// The header carries no timestamp, so equal states encode to equal bytes.

use xxhash_rust::xxh32::xxh32;

use crate::save_error::SaveError;

/// Magic bytes identifying a binary save.
pub const MAGIC: [u8; 4] = *b"TILE";

/// Size of the file header in bytes.
pub const HEADER_SIZE: usize = 20;

pub const HEADER_FORMAT_VERSION: u32 = 1;

/// Flag bit: payload is lz4 block-compressed with a size prefix.
pub const FLAG_COMPRESSED: u32 = 1;

const XXHASH_SEED: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub format_version: u32,
    pub flags: u32,
    pub payload_size: u32,
    pub checksum: u32,
}

impl FileHeader {
    pub fn new(payload: &[u8], flags: u32) -> Self {
        Self {
            format_version: HEADER_FORMAT_VERSION,
            flags,
            payload_size: payload.len() as u32,
            checksum: xxh32(payload, XXHASH_SEED),
        }
    }

    pub fn is_compressed(&self) -> bool {
        self.flags & FLAG_COMPRESSED != 0
    }
}

/// Returns `[header] ++ [payload]`.
pub fn wrap_with_header(payload: &[u8], flags: u32) -> Vec<u8> {
    let header = FileHeader::new(payload, flags);
    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&header.format_version.to_le_bytes());
    out.extend_from_slice(&header.flags.to_le_bytes());
    out.extend_from_slice(&header.payload_size.to_le_bytes());
    out.extend_from_slice(&header.checksum.to_le_bytes());
    out.extend_from_slice(payload);
    out
}

pub fn has_magic(bytes: &[u8]) -> bool {
    bytes.len() >= MAGIC.len() && bytes[..MAGIC.len()] == MAGIC
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Parses and validates the header, returning it with the payload slice.
///
/// # Errors
///
/// - `UnknownFormat` if the magic is missing, the buffer is shorter than the
///   header, or the header comes from a newer build.
/// - `Decode` if the stored payload size disagrees with the buffer.
/// - `Checksum` if the payload was modified or damaged.
pub fn unwrap_header(bytes: &[u8]) -> Result<(FileHeader, &[u8]), SaveError> {
    if !has_magic(bytes) {
        return Err(SaveError::UnknownFormat("missing binary save magic".into()));
    }
    if bytes.len() < HEADER_SIZE {
        return Err(SaveError::UnknownFormat(format!(
            "binary save is too short ({} bytes, need at least {HEADER_SIZE} for header)",
            bytes.len()
        )));
    }

    let header = FileHeader {
        format_version: read_u32(bytes, 4),
        flags: read_u32(bytes, 8),
        payload_size: read_u32(bytes, 12),
        checksum: read_u32(bytes, 16),
    };

    if header.format_version > HEADER_FORMAT_VERSION {
        return Err(SaveError::UnknownFormat(format!(
            "header format version {}, this build supports up to {HEADER_FORMAT_VERSION}",
            header.format_version
        )));
    }

    let payload = &bytes[HEADER_SIZE..];
    if payload.len() != header.payload_size as usize {
        return Err(SaveError::Decode(format!(
            "payload is {} bytes, header says {}",
            payload.len(),
            header.payload_size
        )));
    }

    let computed = xxh32(payload, XXHASH_SEED);
    if computed != header.checksum {
        return Err(SaveError::Checksum {
            expected: header.checksum,
            found: computed,
        });
    }

    Ok((header, payload))
}
