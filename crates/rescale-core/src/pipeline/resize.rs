//! Resampling on top of `fast_image_resize`.
//!
//! Images with alpha are resized as RGBA8, everything else as RGB8. Higher bit
//! depths are narrowed to 8 bits per channel.

use fast_image_resize as fr;
use image::{DynamicImage, ImageBuffer, Rgb, Rgba};
use std::path::Path;

use super::plan::{Dimensions, Interpolation};
use crate::error::PipelineError;

impl Interpolation {
    fn filter(self) -> fr::FilterType {
        match self {
            // Box convolution averages every covered source pixel when shrinking.
            Interpolation::Area => fr::FilterType::Box,
            Interpolation::Cubic => fr::FilterType::CatmullRom,
        }
    }
}

/// Resize `image` to exactly `target` with the given filter family.
///
/// `path` only labels errors.
pub fn resample(
    image: &DynamicImage,
    target: Dimensions,
    interpolation: Interpolation,
    path: &Path,
) -> Result<DynamicImage, PipelineError> {
    let resize_error = |message: String| PipelineError::Resize {
        path: path.to_path_buf(),
        message,
    };

    if target.is_empty() {
        return Err(resize_error(format!("target size {} is empty", target)));
    }

    let has_alpha = image.color().has_alpha();
    let (pixel_type, raw) = if has_alpha {
        (fr::PixelType::U8x4, image.to_rgba8().into_raw())
    } else {
        (fr::PixelType::U8x3, image.to_rgb8().into_raw())
    };

    let src = fr::images::Image::from_vec_u8(image.width(), image.height(), raw, pixel_type)
        .map_err(|e| resize_error(format!("cannot wrap source buffer: {}", e)))?;
    let mut dst = fr::images::Image::new(target.width, target.height, pixel_type);

    let options =
        fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(interpolation.filter()));
    fr::Resizer::new()
        .resize(&src, &mut dst, &options)
        .map_err(|e| resize_error(e.to_string()))?;

    let buffer = dst.into_vec();
    let resized = if has_alpha {
        ImageBuffer::<Rgba<u8>, _>::from_raw(target.width, target.height, buffer)
            .map(DynamicImage::ImageRgba8)
    } else {
        ImageBuffer::<Rgb<u8>, _>::from_raw(target.width, target.height, buffer)
            .map(DynamicImage::ImageRgb8)
    };
    resized.ok_or_else(|| resize_error("resized buffer has unexpected length".to_string()))
}
