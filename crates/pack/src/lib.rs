//! # pngico-pack
//!
//! Packs square PNG images into a single multi-resolution ICO file.
//!
//! ## Layout
//!
//! An ICO file is a 6-byte header, one 16-byte directory entry per frame, and
//! the frame payloads back to back. Frames are embedded as PNG, so every entry
//! leaves colour planes and bit depth at 0 and lets the PNG describe itself.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pngico_pack::{pack, ResizedFrame};
//!
//! fn build(pngs: Vec<Vec<u8>>) -> pngico_pack::Result<Vec<u8>> {
//!     let frames = pngs
//!         .into_iter()
//!         .map(ResizedFrame::from_png)
//!         .collect::<pngico_pack::Result<Vec<_>>>()?;
//!     pack(&frames)
//! }
//! ```

#![warn(missing_docs)]

pub mod dir;
pub mod error;
pub mod frame;
pub mod pack;

pub use dir::{read_directory, IcoDirectoryEntry, IcoHeader, MAX_FRAMES};
pub use error::{PackError, Result};
pub use frame::{ResizedFrame, MAX_EDGE, MIN_EDGE};
pub use pack::{pack, packed_len};
