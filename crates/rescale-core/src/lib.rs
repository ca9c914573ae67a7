//! Rescale Core - image resizing by scale factor or exact size.
//!
//! One request runs one synchronous pass:
//!
//! ```text
//! Validate → Decode → Plan (target size + interpolation) → Resample → Encode
//! ```
//!
//! A dry run stops after planning and writes nothing.
//!
//! # Usage
//!
//! ```rust,no_run
//! use rescale_core::{Config, ScaleMode, ScaleRequest, Scaler};
//!
//! fn main() -> rescale_core::Result<()> {
//!     let config = Config::load()?;
//!     let scaler = Scaler::new(&config);
//!
//!     let request = ScaleRequest::new(ScaleMode::Relative, "in.png", "out.png", 0.5, 0.5, false)?;
//!     let plan = scaler.scale(&request)?;
//!     println!("{} -> {} ({})", plan.source, plan.target, plan.interpolation);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod request;
pub mod self_test;

pub use config::Config;
pub use error::{
    ConfigError, PipelineError, PipelineResult, RequestError, RescaleError, Result, SelfTestError,
};
pub use pipeline::{Dimensions, Interpolation, ScalePlan, Scaler};
pub use request::{ScaleMode, ScaleParams, ScaleRequest};
pub use self_test::SelfTestReport;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
