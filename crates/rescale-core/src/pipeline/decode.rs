//! Image decoding with content-based format detection and size limits.

use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;
use std::path::Path;

use super::plan::Dimensions;
use crate::config::LimitsConfig;
use crate::error::PipelineError;

/// Image decoder with configurable limits.
pub struct ImageDecoder {
    limits: LimitsConfig,
}

/// Result of decoding an image.
#[derive(Debug)]
pub struct DecodedImage {
    /// The decoded image data
    pub image: DynamicImage,
    /// Detected image format
    pub format: ImageFormat,
    /// Source size in pixels
    pub dimensions: Dimensions,
    /// Original file size in bytes
    pub file_size: u64,
}

impl ImageDecoder {
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Read and decode the file at `path`.
    pub fn decode(&self, path: &Path) -> Result<DecodedImage, PipelineError> {
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PipelineError::FileNotFound(path.to_path_buf()),
            _ => PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot read file: {}", e),
            },
        })?;
        self.decode_bytes(bytes, path)
    }

    /// Decode an in-memory buffer. `path` is used for extension fallback and errors.
    pub fn decode_bytes(&self, bytes: Vec<u8>, path: &Path) -> Result<DecodedImage, PipelineError> {
        let file_size = bytes.len() as u64;
        let mut reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot detect image format: {}", e),
            })?;

        let format = match reader.format() {
            Some(f) => f,
            None => ImageFormat::from_path(path).map_err(|_| PipelineError::UnsupportedFormat {
                path: path.to_path_buf(),
                format: path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("unknown")
                    .to_string(),
            })?,
        };

        reader.set_format(format);
        let image = reader.decode().map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let (width, height) = image.dimensions();
        let max_dim = self.limits.max_image_dimension;
        if width > max_dim || height > max_dim {
            return Err(PipelineError::ImageTooLarge {
                path: path.to_path_buf(),
                width,
                height,
                max_dim,
            });
        }

        Ok(DecodedImage {
            image,
            format,
            dimensions: Dimensions::new(width, height),
            file_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([10, 20, 30]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_reports_dimensions() {
        let decoder = ImageDecoder::new(LimitsConfig::default());
        let decoded = decoder
            .decode_bytes(png_bytes(37, 91), Path::new("noise.png"))
            .unwrap();
        assert_eq!(decoded.dimensions, Dimensions::new(37, 91));
        assert_eq!(decoded.format, ImageFormat::Png);
        assert!(decoded.file_size > 0);
    }

    #[test]
    fn test_format_detected_by_content() {
        // PNG bytes behind a .jpg name still decode as PNG
        let decoder = ImageDecoder::new(LimitsConfig::default());
        let decoded = decoder
            .decode_bytes(png_bytes(4, 4), Path::new("misnamed.jpg"))
            .unwrap();
        assert_eq!(decoded.format, ImageFormat::Png);
    }

    #[test]
    fn test_corrupt_bytes_fail() {
        let decoder = ImageDecoder::new(LimitsConfig::default());
        let mut bytes = png_bytes(8, 8);
        bytes.truncate(20);
        let err = decoder.decode_bytes(bytes, Path::new("cut.png")).unwrap_err();
        assert!(matches!(err, PipelineError::Decode { .. }));
    }

    #[test]
    fn test_unknown_content_and_extension() {
        let decoder = ImageDecoder::new(LimitsConfig::default());
        let err = decoder
            .decode_bytes(b"plain text, not pixels".to_vec(), Path::new("notes.txt"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_dimension_limit() {
        let limits = LimitsConfig {
            max_image_dimension: 64,
            ..LimitsConfig::default()
        };
        let err = ImageDecoder::new(limits)
            .decode_bytes(png_bytes(65, 10), Path::new("wide.png"))
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::ImageTooLarge {
                width: 65,
                max_dim: 64,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_file_maps_to_not_found() {
        let decoder = ImageDecoder::new(LimitsConfig::default());
        let err = decoder.decode(Path::new("/nonexistent/pic.png")).unwrap_err();
        assert!(matches!(err, PipelineError::FileNotFound(_)));
    }
}
