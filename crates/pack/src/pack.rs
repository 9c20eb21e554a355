//! ICO assembly
//!
//! Lays out the header, the directory and every payload in one forward pass.
//! Offsets are assigned in input order, so the directory order always matches
//! the order frames were handed in.

use crate::dir::{IcoDirectoryEntry, IcoHeader, ENTRY_LEN, HEADER_LEN, MAX_FRAMES};
use crate::error::{PackError, Result};
use crate::frame::{ResizedFrame, MAX_EDGE, MIN_EDGE};

/// Bytes occupied by the header and directory for `count` frames.
pub fn header_len(count: usize) -> usize {
    HEADER_LEN + ENTRY_LEN * count
}

/// Exact length of the file [`pack`] would produce for `frames`.
pub fn packed_len(frames: &[ResizedFrame]) -> usize {
    header_len(frames.len()) + frames.iter().map(ResizedFrame::len).sum::<usize>()
}

/// Pack PNG frames into an ICO file.
///
/// Frames keep their input order in both the directory and the payload area.
/// Fails without producing output if any frame is unusable.
pub fn pack(frames: &[ResizedFrame]) -> Result<Vec<u8>> {
    if frames.is_empty() || frames.len() > MAX_FRAMES {
        return Err(PackError::InvalidFrameCount(frames.len()));
    }

    let entries = layout(frames)?;

    let mut out = Vec::with_capacity(packed_len(frames));
    IcoHeader {
        count: frames.len() as u16,
    }
    .encode(&mut out);
    for entry in &entries {
        entry.encode(&mut out);
    }
    for frame in frames {
        out.extend_from_slice(frame.data());
    }

    debug_assert_eq!(out.len(), packed_len(frames));
    Ok(out)
}

/// Validate every frame and assign its directory entry.
fn layout(frames: &[ResizedFrame]) -> Result<Vec<IcoDirectoryEntry>> {
    let mut offset = u32::try_from(header_len(frames.len()))
        .map_err(|_| PackError::InvalidFrameCount(frames.len()))?;
    let mut entries = Vec::with_capacity(frames.len());

    for (index, frame) in frames.iter().enumerate() {
        let edge = frame.edge();
        if !(MIN_EDGE..=MAX_EDGE).contains(&edge) {
            return Err(PackError::InvalidDimension { index, edge });
        }
        if frame.is_empty() {
            return Err(PackError::encoding(index, "payload is empty"));
        }
        if !frame.is_png() {
            return Err(PackError::encoding(index, "payload is not PNG-encoded"));
        }

        let size = u32::try_from(frame.len())
            .map_err(|_| PackError::encoding(index, "payload exceeds 4 GiB"))?;
        entries.push(IcoDirectoryEntry::png(edge, size, offset));

        offset = offset
            .checked_add(size)
            .ok_or_else(|| PackError::encoding(index, "file would exceed 4 GiB"))?;
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dir::read_directory;
    use crate::test_support::png_frame;

    #[test]
    fn test_single_frame_layout() {
        let frame = png_frame(16);
        let k = frame.len();

        let out = pack(std::slice::from_ref(&frame)).unwrap();
        assert_eq!(out.len(), 6 + 16 + k);

        let entries = read_directory(&out).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].offset, 22);
        assert_eq!(entries[0].size as usize, k);
        assert_eq!(&out[22..], &frame.data()[..]);
    }

    #[test]
    fn test_second_offset_follows_first_payload() {
        let frames = vec![png_frame(16), png_frame(32)];
        let out = pack(&frames).unwrap();

        let entries = read_directory(&out).unwrap();
        assert_eq!(entries[0].width_px(), 16);
        assert_eq!(entries[1].width_px(), 32);
        assert_eq!(entries[1].offset as usize, 6 + 32 + frames[0].len());
    }

    #[test]
    fn test_input_order_is_kept() {
        let frames = vec![png_frame(48), png_frame(16), png_frame(32)];
        let out = pack(&frames).unwrap();

        let edges: Vec<u32> = read_directory(&out)
            .unwrap()
            .iter()
            .map(IcoDirectoryEntry::width_px)
            .collect();
        assert_eq!(edges, vec![48, 16, 32]);
    }

    #[test]
    fn test_offsets_are_ascending_and_contiguous() {
        let frames = vec![png_frame(16), png_frame(24), png_frame(32), png_frame(64)];
        let out = pack(&frames).unwrap();
        let entries = read_directory(&out).unwrap();

        let mut expected = header_len(frames.len());
        for (entry, frame) in entries.iter().zip(&frames) {
            assert_eq!(entry.offset as usize, expected);
            assert_eq!(&out[entry.range()], &frame.data()[..]);
            expected += frame.len();
        }
        assert_eq!(expected, out.len());
    }

    #[test]
    fn test_directory_fields_signal_png() {
        let out = pack(&[png_frame(32)]).unwrap();
        let entry = read_directory(&out).unwrap()[0];
        assert_eq!(entry.color_count, 0);
        assert_eq!(entry.planes, 0);
        assert_eq!(entry.bits_per_pixel, 0);
    }

    #[test]
    fn test_deterministic() {
        let frames = vec![png_frame(16), png_frame(32), png_frame(256)];
        assert_eq!(pack(&frames).unwrap(), pack(&frames).unwrap());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(pack(&[]).unwrap_err(), PackError::InvalidFrameCount(0));
    }

    #[test]
    fn test_too_many_frames() {
        let frame = png_frame(1);
        let frames = vec![frame; 257];
        assert_eq!(pack(&frames).unwrap_err(), PackError::InvalidFrameCount(257));
    }

    #[test]
    fn test_max_frames_accepted() {
        let frame = png_frame(1);
        let frames = vec![frame.clone(); 256];
        let out = pack(&frames).unwrap();
        assert_eq!(out.len(), 6 + 16 * 256 + 256 * frame.len());
        assert_eq!(read_directory(&out).unwrap().len(), 256);
    }

    #[test]
    fn test_edge_256_encodes_as_zero() {
        let out = pack(&[png_frame(256)]).unwrap();
        assert_eq!(out[6], 0);
        assert_eq!(out[7], 0);
    }

    #[test]
    fn test_invalid_dimensions() {
        let data = png_frame(16).data().clone();

        let zero = ResizedFrame::new(0, data.clone());
        assert_eq!(
            pack(&[zero]).unwrap_err(),
            PackError::InvalidDimension { index: 0, edge: 0 }
        );

        let big = ResizedFrame::new(257, data.clone());
        assert_eq!(
            pack(&[png_frame(16), big]).unwrap_err(),
            PackError::InvalidDimension { index: 1, edge: 257 }
        );
    }

    #[test]
    fn test_empty_payload() {
        let err = pack(&[ResizedFrame::new(16, Vec::new())]).unwrap_err();
        assert!(matches!(err, PackError::EncodingError { index: 0, .. }));
    }

    #[test]
    fn test_non_png_payload() {
        let frames = vec![png_frame(16), ResizedFrame::new(32, vec![0u8; 64])];
        let err = pack(&frames).unwrap_err();
        assert!(matches!(err, PackError::EncodingError { index: 1, .. }));
    }

    #[test]
    fn test_packed_len_matches_output() {
        let frames = vec![png_frame(16), png_frame(128)];
        assert_eq!(packed_len(&frames), pack(&frames).unwrap().len());
    }
}
