//! Image scaling pipeline components.
//!
//! - **validate**: Pre-decode file checks
//! - **decode**: Load and decode images with format detection
//! - **plan**: Target size and interpolation policy
//! - **resize**: Area/cubic resampling
//! - **encode**: Encode to the output format and write
//! - **scaler**: Runs the stages for one request

pub mod decode;
pub mod encode;
pub mod plan;
pub mod resize;
pub mod scaler;
pub mod validate;

pub use decode::{DecodedImage, ImageDecoder};
pub use encode::ImageEncoder;
pub use plan::{Dimensions, Interpolation, ScalePlan};
pub use resize::resample;
pub use scaler::Scaler;
pub use validate::Validator;
