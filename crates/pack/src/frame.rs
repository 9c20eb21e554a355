//! Frame model
//!
//! A frame is one resolution variant of an icon: a square PNG image with a
//! known edge length. Payloads are held as [`Bytes`] so the same buffer can be
//! shared between the resize stage, the packer and tests without copying.

use bytes::Bytes;

use crate::error::{PackError, Result};

/// The eight-byte signature every PNG stream starts with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Smallest edge length an ICO directory entry can describe.
pub const MIN_EDGE: u32 = 1;

/// Largest edge length an ICO directory entry can describe (stored as 0).
pub const MAX_EDGE: u32 = 256;

/// A square PNG-encoded image at one icon size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizedFrame {
    edge: u32,
    data: Bytes,
}

impl ResizedFrame {
    /// Wrap an already encoded PNG payload with its declared edge length.
    ///
    /// Nothing is validated here; [`pack`](crate::pack::pack) checks the edge range and
    /// payload before emitting anything.
    pub fn new(edge: u32, data: impl Into<Bytes>) -> Self {
        Self {
            edge,
            data: data.into(),
        }
    }

    /// Build a frame from PNG bytes, taking the edge length from the IHDR chunk.
    ///
    /// Fails if the header cannot be decoded or the image is not square.
    pub fn from_png(data: impl Into<Bytes>) -> Result<Self> {
        let data = data.into();
        let (width, height) = {
            let reader = png::Decoder::new(&data[..])
                .read_info()
                .map_err(|e| PackError::InvalidPng(e.to_string()))?;
            let info = reader.info();
            (info.width, info.height)
        };

        if width != height {
            return Err(PackError::InvalidPng(format!(
                "image is {}x{}, frames must be square",
                width, height
            )));
        }

        Ok(Self { edge: width, data })
    }

    /// Declared edge length in pixels.
    pub fn edge(&self) -> u32 {
        self.edge
    }

    /// Encoded payload.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the payload holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True when the payload starts with the PNG signature.
    pub fn is_png(&self) -> bool {
        self.data.starts_with(&PNG_SIGNATURE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::png_bytes;

    #[test]
    fn test_from_png_reads_edge() {
        let frame = ResizedFrame::from_png(png_bytes(48, 48)).unwrap();
        assert_eq!(frame.edge(), 48);
        assert!(frame.is_png());
        assert!(!frame.is_empty());
    }

    #[test]
    fn test_from_png_rejects_non_square() {
        let err = ResizedFrame::from_png(png_bytes(16, 32)).unwrap_err();
        assert!(matches!(err, PackError::InvalidPng(_)));
    }

    #[test]
    fn test_from_png_rejects_garbage() {
        let err = ResizedFrame::from_png(&b"definitely not a png"[..]).unwrap_err();
        assert!(matches!(err, PackError::InvalidPng(_)));
    }

    #[test]
    fn test_new_keeps_declared_edge() {
        let frame = ResizedFrame::new(300, vec![1u8, 2, 3]);
        assert_eq!(frame.edge(), 300);
        assert_eq!(frame.len(), 3);
        assert!(!frame.is_png());
    }
}
