//! Pipeline orchestration: validate, decode, plan, resample, encode.

use std::path::Path;
use std::time::Instant;

use crate::config::{Config, LimitsConfig};
use crate::error::{PipelineError, Result};
use crate::request::ScaleRequest;

use super::decode::ImageDecoder;
use super::encode::ImageEncoder;
use super::plan::ScalePlan;
use super::resize::resample;
use super::validate::Validator;

/// Runs scale requests. Holds no image state between calls.
pub struct Scaler {
    validator: Validator,
    decoder: ImageDecoder,
    encoder: ImageEncoder,
    limits: LimitsConfig,
}

impl Scaler {
    pub fn new(config: &Config) -> Self {
        Self {
            validator: Validator::new(config.limits.clone()),
            decoder: ImageDecoder::new(config.limits.clone()),
            encoder: ImageEncoder::new(config.output.clone()),
            limits: config.limits.clone(),
        }
    }

    /// Run one request and return the plan that was executed.
    ///
    /// In a dry run the source is decoded to learn its size and nothing is
    /// written. Otherwise the output file exists on `Ok` and is untouched on
    /// any decode, plan or resize error.
    pub fn scale(&self, request: &ScaleRequest) -> Result<ScalePlan> {
        let start = Instant::now();
        let input = request.input();
        tracing::debug!("Scaling {:?} ({})", input, request.mode());

        self.validator.validate(input)?;

        let decoded = self.decoder.decode(input)?;
        tracing::debug!(
            "  Decoded {:?} {} ({} bytes) in {:?}",
            decoded.format,
            decoded.dimensions,
            decoded.file_size,
            start.elapsed()
        );

        let plan = ScalePlan::new(request, decoded.dimensions);
        self.check_target(&plan, input)?;
        tracing::debug!("  Plan: {} -> {} ({})", plan.source, plan.target, plan.interpolation);

        if request.is_dry_run() {
            tracing::info!("Dry run, not writing {:?}", request.output());
            return Ok(plan);
        }

        let resize_start = Instant::now();
        let resized = resample(&decoded.image, plan.target, plan.interpolation, input)?;
        drop(decoded);
        tracing::trace!("  Resize: {:?}", resize_start.elapsed());

        let written = self.encoder.write(&resized, request.output())?;
        tracing::info!(
            "Wrote {:?} ({}, {} bytes) in {:?}",
            request.output(),
            plan.target,
            written,
            start.elapsed()
        );

        Ok(plan)
    }

    fn check_target(&self, plan: &ScalePlan, input: &Path) -> std::result::Result<(), PipelineError> {
        if plan.target.is_empty() {
            return Err(PipelineError::Resize {
                path: input.to_path_buf(),
                message: format!("target size {} is empty", plan.target),
            });
        }
        let max_dim = self.limits.max_output_dimension;
        if plan.target.max_side() > max_dim {
            return Err(PipelineError::TargetTooLarge {
                path: input.to_path_buf(),
                width: plan.target.width,
                height: plan.target.height,
                max_dim,
            });
        }
        Ok(())
    }
}
