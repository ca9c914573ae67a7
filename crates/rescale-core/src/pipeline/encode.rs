//! Output encoding.
//!
//! The image is encoded into memory first and written in one call, so an
//! encoder failure never leaves a file at the output path.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::Path;

use crate::config::OutputConfig;
use crate::error::PipelineError;

/// Encodes images in the format implied by the output extension.
pub struct ImageEncoder {
    config: OutputConfig,
}

impl ImageEncoder {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Output format for `path`, if it has an extension we can write.
    pub fn format_for(path: &Path) -> Result<ImageFormat, PipelineError> {
        let unsupported = || PipelineError::UnsupportedFormat {
            path: path.to_path_buf(),
            format: path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("none")
                .to_string(),
        };
        let format = ImageFormat::from_path(path).map_err(|_| unsupported())?;
        if !format.writing_enabled() {
            return Err(unsupported());
        }
        Ok(format)
    }

    /// Encode `image` for `path` without touching the filesystem.
    pub fn encode(&self, image: &DynamicImage, path: &Path) -> Result<Vec<u8>, PipelineError> {
        let format = Self::format_for(path)?;
        let encode_error = |e: image::ImageError| PipelineError::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let mut buffer = Cursor::new(Vec::new());
        match format {
            ImageFormat::Jpeg => {
                // JPEG has no alpha channel
                let rgb;
                let image = if image.color().has_alpha() {
                    rgb = DynamicImage::ImageRgb8(image.to_rgb8());
                    &rgb
                } else {
                    image
                };
                let encoder = JpegEncoder::new_with_quality(&mut buffer, self.config.jpeg_quality);
                image.write_with_encoder(encoder).map_err(encode_error)?;
            }
            _ => image.write_to(&mut buffer, format).map_err(encode_error)?,
        }
        Ok(buffer.into_inner())
    }

    /// Encode and write `image` to `path`. Returns the number of bytes written.
    pub fn write(&self, image: &DynamicImage, path: &Path) -> Result<u64, PipelineError> {
        let bytes = self.encode(image, path)?;
        std::fs::write(path, &bytes).map_err(|e| PipelineError::Encode {
            path: path.to_path_buf(),
            message: format!("Cannot write file: {}", e),
        })?;
        Ok(bytes.len() as u64)
    }
}
