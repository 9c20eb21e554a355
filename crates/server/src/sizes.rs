// =============================================================================
// pngico Server - Requested Sizes
// =============================================================================
// The `sizes` form field arrives as an untrusted JSON string. It is parsed
// strictly here before anything is decoded or resized.
// =============================================================================

use std::fmt;

use pngico_pack::{MAX_EDGE, MIN_EDGE};
use serde_json::Value;

/// A requested square icon edge length in `1..=256`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SizeSpec(u16);

impl SizeSpec {
    /// Validate an edge length.
    pub fn new(edge: u32) -> Option<Self> {
        if (MIN_EDGE..=MAX_EDGE).contains(&edge) {
            Some(Self(edge as u16))
        } else {
            None
        }
    }

    pub fn edge(self) -> u32 {
        self.0 as u32
    }
}

impl fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.0, self.0)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SizesError {
    #[error("expected a JSON array of integers")]
    Malformed,

    #[error("at least one size is required")]
    Empty,

    #[error("{0} is not an integer between 1 and 256")]
    OutOfRange(String),

    #[error("{count} sizes requested, at most {max} allowed")]
    TooMany { count: usize, max: usize },
}

/// Parse the `sizes` field.
///
/// Duplicates are dropped; the first occurrence keeps its position, so the
/// resulting order is the order the caller asked for.
pub fn parse_sizes(raw: &str, max_count: usize) -> Result<Vec<SizeSpec>, SizesError> {
    let values: Vec<Value> = serde_json::from_str(raw).map_err(|_| SizesError::Malformed)?;
    if values.is_empty() {
        return Err(SizesError::Empty);
    }

    let mut sizes = Vec::with_capacity(values.len());
    for value in &values {
        let size = value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .and_then(SizeSpec::new)
            .ok_or_else(|| SizesError::OutOfRange(value.to_string()))?;
        if !sizes.contains(&size) {
            sizes.push(size);
        }
    }

    if sizes.len() > max_count {
        return Err(SizesError::TooMany {
            count: sizes.len(),
            max: max_count,
        });
    }

    Ok(sizes)
}
