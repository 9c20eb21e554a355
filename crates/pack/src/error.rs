//! Error types for the ICO packer
//!
//! ## Table of Contents
//! - **PackError**: Every way packing or reading a directory can fail
//! - **Result**: Type alias for `Result<T, PackError>`

use thiserror::Error;

/// Result type alias for packer operations
pub type Result<T> = std::result::Result<T, PackError>;

/// Main error type for packer operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PackError {
    /// Frame list is empty or longer than an ICO directory can describe
    #[error("invalid frame count: {0} (expected 1..=256)")]
    InvalidFrameCount(usize),

    /// Frame edge length outside `1..=256`
    #[error("frame {index} has invalid edge length {edge} (expected 1..=256)")]
    InvalidDimension {
        /// Position of the frame in the input
        index: usize,
        /// Declared edge length
        edge: u32,
    },

    /// Frame payload is missing, not PNG, or too large to address
    #[error("frame {index} cannot be embedded: {reason}")]
    EncodingError {
        /// Position of the frame in the input
        index: usize,
        /// What was wrong with the payload
        reason: String,
    },

    /// PNG header could not be read, or the image is not square
    #[error("invalid PNG frame: {0}")]
    InvalidPng(String),

    /// Buffer ends before the header, directory or a payload does
    #[error("truncated ICO data: need {needed} bytes, have {available}")]
    Truncated {
        /// Bytes required to continue
        needed: usize,
        /// Bytes actually present
        available: usize,
    },

    /// Header fields do not describe an icon
    #[error("invalid ICO header: {0}")]
    InvalidHeader(String),
}

impl PackError {
    /// Create an encoding error for the frame at `index`
    pub fn encoding(index: usize, reason: impl Into<String>) -> Self {
        Self::EncodingError {
            index,
            reason: reason.into(),
        }
    }

    /// Create a header error
    pub fn header(msg: impl Into<String>) -> Self {
        Self::InvalidHeader(msg.into())
    }
}
