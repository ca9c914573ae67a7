//! Synthetic source images for the self-test.

use image::{ImageFormat, Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};

use crate::error::SelfTestError;
use crate::pipeline::Dimensions;

/// Seed for the noise fixture.
pub const NOISE_SEED: u64 = 12345;

/// A generated fixture on disk.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub name: &'static str,
    pub path: PathBuf,
    pub dimensions: Dimensions,
}

/// 50x50 filled with one colour.
pub fn solid() -> RgbImage {
    RgbImage::from_pixel(50, 50, Rgb([50, 100, 150]))
}

/// 37 wide, 91 high, seeded random pixels.
pub fn noise() -> RgbImage {
    let mut rng = StdRng::seed_from_u64(NOISE_SEED);
    RgbImage::from_fn(37, 91, |_, _| Rgb(rng.gen::<[u8; 3]>()))
}

/// 150x100 black canvas with three overlapping filled rectangles.
pub fn rectangles() -> RgbImage {
    let mut img = RgbImage::new(150, 100);
    fill_rect(&mut img, (10, 10), (80, 70), Rgb([0, 255, 0]));
    fill_rect(&mut img, (40, 30), (120, 90), Rgb([0, 0, 255]));
    fill_rect(&mut img, (60, 5), (140, 40), Rgb([255, 0, 0]));
    img
}

/// Fill the rectangle between two inclusive corners, clipped to the image.
fn fill_rect(img: &mut RgbImage, from: (u32, u32), to: (u32, u32), colour: Rgb<u8>) {
    let x_end = to.0.min(img.width().saturating_sub(1));
    let y_end = to.1.min(img.height().saturating_sub(1));
    for y in from.1..=y_end {
        for x in from.0..=x_end {
            img.put_pixel(x, y, colour);
        }
    }
}

/// Write `test1.png`, `test2.png` and `test3.png` into `dir`, creating it if needed.
pub fn generate(dir: &Path) -> Result<Vec<Fixture>, SelfTestError> {
    std::fs::create_dir_all(dir).map_err(|e| SelfTestError::Generate {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })?;

    let images = [
        ("test1.png", solid()),
        ("test2.png", noise()),
        ("test3.png", rectangles()),
    ];

    images
        .into_iter()
        .map(|(name, img)| -> Result<Fixture, SelfTestError> {
            let path = dir.join(name);
            img.save_with_format(&path, ImageFormat::Png)
                .map_err(|e| SelfTestError::Generate {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
            Ok(Fixture {
                name,
                path,
                dimensions: Dimensions::new(img.width(), img.height()),
            })
        })
        .collect()
}
