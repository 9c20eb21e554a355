// =============================================================================
// pngico Server - Decode & Resize
// =============================================================================
// Table of Contents:
// 1. Errors
// 2. Decoding
// 3. Per-size Resize
// 4. Fan-out
// =============================================================================

use std::io::Cursor;
use std::sync::Arc;

use futures::future::try_join_all;
use image::{imageops::FilterType, DynamicImage, ImageError, ImageFormat, ImageReader, Limits};
use pngico_pack::{PackError, ResizedFrame};

use crate::sizes::SizeSpec;

// -----------------------------------------------------------------------------
// 1. Errors
// -----------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ResizeError {
    #[error("failed to decode source image: {0}")]
    Decode(String),

    #[error("source image exceeds {max}x{max} pixels")]
    TooLarge { max: u32 },

    #[error("failed to encode {size} frame: {message}")]
    Encode { size: SizeSpec, message: String },

    #[error("resize task failed: {0}")]
    Join(String),

    #[error("resized frame rejected: {0}")]
    Frame(#[from] PackError),
}

// -----------------------------------------------------------------------------
// 2. Decoding
// -----------------------------------------------------------------------------

/// Decode an uploaded image, refusing anything wider or taller than `max_dimension`.
///
/// The limit is enforced by the decoder from the header, before pixel data is
/// allocated.
pub fn decode_source(bytes: &[u8], max_dimension: u32) -> Result<DynamicImage, ResizeError> {
    let mut limits = Limits::default();
    limits.max_image_width = Some(max_dimension);
    limits.max_image_height = Some(max_dimension);

    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ResizeError::Decode(e.to_string()))?;
    reader.limits(limits);

    let image = reader.decode().map_err(|e| match e {
        ImageError::Limits(_) => ResizeError::TooLarge { max: max_dimension },
        other => ResizeError::Decode(other.to_string()),
    })?;

    if image.width() == 0 || image.height() == 0 {
        return Err(ResizeError::Decode("image has no pixels".into()));
    }

    Ok(image)
}

// -----------------------------------------------------------------------------
// 3. Per-size Resize
// -----------------------------------------------------------------------------

/// Scale `source` to cover a `size` square, center-crop, and encode as RGBA PNG.
pub fn resize_frame(source: &DynamicImage, size: SizeSpec) -> Result<ResizedFrame, ResizeError> {
    let edge = size.edge();
    let resized = source.resize_to_fill(edge, edge, FilterType::Lanczos3);
    let rgba = DynamicImage::ImageRgba8(resized.into_rgba8());

    let mut buffer = Vec::new();
    rgba.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| ResizeError::Encode {
            size,
            message: e.to_string(),
        })?;

    let frame = ResizedFrame::from_png(buffer)?;
    if frame.edge() != edge {
        return Err(ResizeError::Encode {
            size,
            message: format!("encoder produced a {}px frame", frame.edge()),
        });
    }
    Ok(frame)
}

// -----------------------------------------------------------------------------
// 4. Fan-out
// -----------------------------------------------------------------------------

/// Resize `source` to every requested size concurrently.
///
/// One blocking task runs per size. Frames come back in the order of `sizes`,
/// whatever order the tasks finish in. The first failure fails the whole call.
pub async fn resize_all(
    source: Arc<DynamicImage>,
    sizes: &[SizeSpec],
) -> Result<Vec<ResizedFrame>, ResizeError> {
    let tasks = sizes.iter().map(|&size| {
        let source = Arc::clone(&source);
        async move {
            tokio::task::spawn_blocking(move || resize_frame(&source, size))
                .await
                .map_err(|e| ResizeError::Join(e.to_string()))?
        }
    });

    try_join_all(tasks).await
}
