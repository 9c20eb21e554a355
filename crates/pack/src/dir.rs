//! ICONDIR / ICONDIRENTRY records
//!
//! ## Table of Contents
//! - **IcoHeader**: 6-byte file header (reserved, type, count)
//! - **IcoDirectoryEntry**: 16-byte per-frame record
//! - **read_directory**: Parse and bounds-check the directory of a packed file
//!
//! All multi-byte fields are little-endian.

use crate::error::{PackError, Result};

/// Size of the ICONDIR header in bytes.
pub const HEADER_LEN: usize = 6;

/// Size of one ICONDIRENTRY record in bytes.
pub const ENTRY_LEN: usize = 16;

/// Resource type for icons (cursors use 2).
pub const ICON_TYPE: u16 = 1;

/// Upper bound on frames per file.
pub const MAX_FRAMES: usize = 256;

/// File header preceding the directory entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcoHeader {
    /// Number of directory entries that follow
    pub count: u16,
}

impl IcoHeader {
    /// Append the header to `out`.
    pub fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&ICON_TYPE.to_le_bytes());
        out.extend_from_slice(&self.count.to_le_bytes());
    }

    /// Parse a header from the start of `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let raw = bytes.get(..HEADER_LEN).ok_or(PackError::Truncated {
            needed: HEADER_LEN,
            available: bytes.len(),
        })?;

        let reserved = u16::from_le_bytes([raw[0], raw[1]]);
        let kind = u16::from_le_bytes([raw[2], raw[3]]);
        let count = u16::from_le_bytes([raw[4], raw[5]]);

        if reserved != 0 {
            return Err(PackError::header(format!("reserved field is {}", reserved)));
        }
        if kind != ICON_TYPE {
            return Err(PackError::header(format!("resource type is {}, expected 1", kind)));
        }
        if count == 0 {
            return Err(PackError::header("directory is empty"));
        }

        Ok(Self { count })
    }
}

/// One directory record describing an embedded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcoDirectoryEntry {
    /// Width byte; 0 means 256
    pub width: u8,
    /// Height byte; 0 means 256
    pub height: u8,
    /// Palette size; 0 for true-colour and PNG frames
    pub color_count: u8,
    /// Color planes (0 or 1)
    pub planes: u16,
    /// Bits per pixel; 0 lets the embedded PNG convey its own depth
    pub bits_per_pixel: u16,
    /// Payload length in bytes
    pub size: u32,
    /// Absolute payload offset from the start of the file
    pub offset: u32,
}

impl IcoDirectoryEntry {
    /// Entry for a PNG-compressed square frame.
    ///
    /// `edge` must already be validated to `1..=256`; 256 wraps to 0.
    pub fn png(edge: u32, size: u32, offset: u32) -> Self {
        let dim = (edge % 256) as u8;
        Self {
            width: dim,
            height: dim,
            color_count: 0,
            planes: 0,
            bits_per_pixel: 0,
            size,
            offset,
        }
    }

    /// Logical width in pixels.
    pub fn width_px(&self) -> u32 {
        expand(self.width)
    }

    /// Logical height in pixels.
    pub fn height_px(&self) -> u32 {
        expand(self.height)
    }

    /// Byte range of the payload inside the file.
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = self.offset as usize;
        start..start + self.size as usize
    }

    /// Append the 16-byte record to `out`.
    pub fn encode(&self, out: &mut Vec<u8>) {
        out.push(self.width);
        out.push(self.height);
        out.push(self.color_count);
        out.push(0); // reserved
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.bits_per_pixel.to_le_bytes());
        out.extend_from_slice(&self.size.to_le_bytes());
        out.extend_from_slice(&self.offset.to_le_bytes());
    }

    /// Parse a record from exactly [`ENTRY_LEN`] bytes.
    pub fn decode(raw: &[u8; ENTRY_LEN]) -> Self {
        Self {
            width: raw[0],
            height: raw[1],
            color_count: raw[2],
            planes: u16::from_le_bytes([raw[4], raw[5]]),
            bits_per_pixel: u16::from_le_bytes([raw[6], raw[7]]),
            size: u32::from_le_bytes([raw[8], raw[9], raw[10], raw[11]]),
            offset: u32::from_le_bytes([raw[12], raw[13], raw[14], raw[15]]),
        }
    }
}

fn expand(dim: u8) -> u32 {
    if dim == 0 {
        256
    } else {
        dim as u32
    }
}

/// Read the header and every directory entry of a packed file.
///
/// Each entry's payload range is checked against the buffer length, so the
/// returned ranges can be sliced without further checks.
pub fn read_directory(bytes: &[u8]) -> Result<Vec<IcoDirectoryEntry>> {
    let header = IcoHeader::decode(bytes)?;
    let count = header.count as usize;
    let dir_end = HEADER_LEN + ENTRY_LEN * count;

    if bytes.len() < dir_end {
        return Err(PackError::Truncated {
            needed: dir_end,
            available: bytes.len(),
        });
    }

    let mut entries = Vec::with_capacity(count);
    for chunk in bytes[HEADER_LEN..dir_end].chunks_exact(ENTRY_LEN) {
        let mut raw = [0u8; ENTRY_LEN];
        raw.copy_from_slice(chunk);
        let entry = IcoDirectoryEntry::decode(&raw);

        let end = entry.range().end;
        if (entry.offset as usize) < dir_end {
            return Err(PackError::header(format!(
                "payload offset {} overlaps the directory",
                entry.offset
            )));
        }
        if end > bytes.len() {
            return Err(PackError::Truncated {
                needed: end,
                available: bytes.len(),
            });
        }
        entries.push(entry);
    }

    Ok(entries)
}
