// =============================================================================
// pngico Server - Conversion Pipeline
// =============================================================================
// decode -> resize fan-out -> pack, under one time budget. All or nothing.
// =============================================================================

use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use pngico_pack::{read_directory, PackError};

use crate::config::Config;
use crate::resize::{decode_source, resize_all, ResizeError};
use crate::sizes::SizeSpec;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("invalid source image: {0}")]
    InvalidImage(#[source] ResizeError),

    #[error("resize failed: {0}")]
    Resize(#[source] ResizeError),

    #[error("packing failed: {0}")]
    Pack(#[from] PackError),

    #[error("conversion exceeded {0:?}")]
    TimedOut(Duration),
}

/// Runs conversions with the limits taken from [`Config`].
#[derive(Debug, Clone)]
pub struct Converter {
    max_source_dimension: u32,
    timeout: Duration,
}

impl Converter {
    pub fn new(config: &Config) -> Self {
        Self {
            max_source_dimension: config.max_source_dimension,
            timeout: config.request_timeout,
        }
    }

    /// Convert `source` into an ICO holding one frame per entry of `sizes`,
    /// in that order.
    ///
    /// On timeout the response is abandoned; blocking resize tasks already
    /// running finish in the background and their output is dropped.
    pub async fn convert(&self, source: Bytes, sizes: &[SizeSpec]) -> Result<Vec<u8>, ConvertError> {
        let started = Instant::now();
        let ico = tokio::time::timeout(self.timeout, self.run(source, sizes))
            .await
            .map_err(|_| ConvertError::TimedOut(self.timeout))??;

        tracing::info!(
            frames = sizes.len(),
            bytes = ico.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Converted image to ICO"
        );
        Ok(ico)
    }

    async fn run(&self, source: Bytes, sizes: &[SizeSpec]) -> Result<Vec<u8>, ConvertError> {
        let max = self.max_source_dimension;
        let image = tokio::task::spawn_blocking(move || decode_source(&source, max))
            .await
            .map_err(|e| ConvertError::Resize(ResizeError::Join(e.to_string())))?
            .map_err(ConvertError::InvalidImage)?;

        tracing::debug!(
            width = image.width(),
            height = image.height(),
            "Decoded source image"
        );

        let frames = resize_all(Arc::new(image), sizes)
            .await
            .map_err(ConvertError::Resize)?;
        let ico = pngico_pack::pack(&frames)?;

        if tracing::enabled!(tracing::Level::DEBUG) {
            for entry in read_directory(&ico)? {
                tracing::debug!(
                    width = entry.width_px(),
                    height = entry.height_px(),
                    size = entry.size,
                    offset = entry.offset,
                    "Packed frame"
                );
            }
        }

        Ok(ico)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_upload(width: u32, height: u32) -> Bytes {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 200]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        Bytes::from(buf)
    }

    fn sizes(edges: &[u32]) -> Vec<SizeSpec> {
        edges.iter().map(|&e| SizeSpec::new(e).unwrap()).collect()
    }

    #[tokio::test]
    async fn test_convert_produces_directory_in_order() {
        let converter = Converter::new(&Config::default());
        let ico = converter
            .convert(png_upload(64, 64), &sizes(&[32, 16, 256]))
            .await
            .unwrap();

        let edges: Vec<u32> = read_directory(&ico)
            .unwrap()
            .iter()
            .map(|e| e.width_px())
            .collect();
        assert_eq!(edges, vec![32, 16, 256]);
    }

    #[tokio::test]
    async fn test_convert_rejects_undecodable_source() {
        let converter = Converter::new(&Config::default());
        let err = converter
            .convert(Bytes::from_static(b"GIF? no."), &sizes(&[16]))
            .await
            .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidImage(ResizeError::Decode(_))));
    }

    #[tokio::test]
    async fn test_convert_rejects_oversized_source() {
        let config = Config {
            max_source_dimension: 16,
            ..Config::default()
        };
        let err = Converter::new(&config)
            .convert(png_upload(17, 4), &sizes(&[16]))
            .await
            .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidImage(ResizeError::TooLarge { .. })));
    }

    #[tokio::test]
    async fn test_convert_with_no_sizes_fails_in_packer() {
        let converter = Converter::new(&Config::default());
        let err = converter.convert(png_upload(8, 8), &[]).await.unwrap_err();
        assert!(matches!(err, ConvertError::Pack(PackError::InvalidFrameCount(0))));
    }
}
