//! Scale requests: mode, paths and validated parameters.
//!
//! A [`ScaleRequest`] can only be built with parameters that are usable, so
//! every range check happens here, before the pipeline touches the disk.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::RequestError;

/// How the target size is derived from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    /// Multiply source dimensions by per-axis factors
    Relative,
    /// Use exact pixel dimensions
    Absolute,
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaleMode::Relative => write!(f, "Relative"),
            ScaleMode::Absolute => write!(f, "Absolute"),
        }
    }
}

/// Validated mode parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ScaleParams {
    /// Finite factors, both > 0
    Relative { scale_x: f64, scale_y: f64 },
    /// Pixel sizes, both >= 1
    Absolute { width: u32, height: u32 },
}

impl ScaleParams {
    pub fn mode(&self) -> ScaleMode {
        match self {
            ScaleParams::Relative { .. } => ScaleMode::Relative,
            ScaleParams::Absolute { .. } => ScaleMode::Absolute,
        }
    }
}

impl fmt::Display for ScaleParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaleParams::Relative { scale_x, scale_y } => write!(f, "{}, {}", scale_x, scale_y),
            ScaleParams::Absolute { width, height } => write!(f, "{}, {}", width, height),
        }
    }
}

/// A single resize job. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleRequest {
    input: PathBuf,
    output: PathBuf,
    params: ScaleParams,
    dry_run: bool,
}

impl ScaleRequest {
    /// Build a request from raw mode parameters.
    ///
    /// In absolute mode `a` and `b` are truncated toward zero, so `199.9`
    /// becomes `199` and `0.5` is rejected.
    pub fn new(
        mode: ScaleMode,
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        a: f64,
        b: f64,
        dry_run: bool,
    ) -> Result<Self, RequestError> {
        let params = match mode {
            ScaleMode::Relative => ScaleParams::Relative {
                scale_x: check_scale("sx", a)?,
                scale_y: check_scale("sy", b)?,
            },
            ScaleMode::Absolute => ScaleParams::Absolute {
                width: check_size("width", a)?,
                height: check_size("height", b)?,
            },
        };
        Ok(Self {
            input: input.into(),
            output: output.into(),
            params,
            dry_run,
        })
    }

    /// Build a request from command-line positionals.
    ///
    /// Relative: `<in> <out> <sx> [sy]`, where `sy` defaults to `sx`.
    /// Absolute: `<in> <out> <w> <h>` or `<in> <out> <WxH>`.
    pub fn from_positionals(
        mode: ScaleMode,
        args: &[String],
        dry_run: bool,
    ) -> Result<Self, RequestError> {
        let input = args.first().ok_or(RequestError::MissingArgument("input"))?;
        let output = args.get(1).ok_or(RequestError::MissingArgument("output"))?;

        match mode {
            ScaleMode::Relative => {
                let sx = args.get(2).ok_or(RequestError::MissingArgument("sx"))?;
                let sx = parse_number("sx", sx)?;
                let sy = match args.get(3) {
                    Some(sy) => parse_number("sy", sy)?,
                    None => sx,
                };
                if let Some(extra) = args.get(4) {
                    return Err(RequestError::UnexpectedArgument(extra.clone()));
                }
                Self::new(mode, input, output, sx, sy, dry_run)
            }
            ScaleMode::Absolute => {
                let first = args.get(2).ok_or(RequestError::MissingArgument("width"))?;
                if first.contains(['x', 'X']) {
                    let (width, height) = parse_dimensions(first)?;
                    if let Some(extra) = args.get(3) {
                        return Err(RequestError::UnexpectedArgument(extra.clone()));
                    }
                    return Self::new(mode, input, output, width, height, dry_run);
                }
                let height = args.get(3).ok_or(RequestError::MissingArgument("height"))?;
                if let Some(extra) = args.get(4) {
                    return Err(RequestError::UnexpectedArgument(extra.clone()));
                }
                let width = parse_number("width", first)?;
                let height = parse_number("height", height)?;
                Self::new(mode, input, output, width, height, dry_run)
            }
        }
    }

    pub fn mode(&self) -> ScaleMode {
        self.params.mode()
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn params(&self) -> ScaleParams {
        self.params
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

/// Parse a decimal parameter, naming it in the error.
pub fn parse_number(name: &'static str, value: &str) -> Result<f64, RequestError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| RequestError::InvalidNumber {
            name,
            value: value.to_string(),
        })
}

/// Parse a `WxH` token such as `640x480` into `(width, height)`.
///
/// Truncation and range checks are left to [`ScaleRequest::new`], so
/// `640.5x480` and `0x10` both parse.
pub fn parse_dimensions(value: &str) -> Result<(f64, f64), RequestError> {
    let invalid = || RequestError::InvalidDimensions(value.to_string());
    let (w, h) = value.split_once(['x', 'X']).ok_or_else(invalid)?;
    let w = w.trim().parse::<f64>().map_err(|_| invalid())?;
    let h = h.trim().parse::<f64>().map_err(|_| invalid())?;
    Ok((w, h))
}

fn check_scale(name: &'static str, value: f64) -> Result<f64, RequestError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(RequestError::InvalidScale { name, value })
    }
}

fn check_size(name: &'static str, value: f64) -> Result<u32, RequestError> {
    if value.is_finite() && value.trunc() >= 1.0 {
        // Saturates above u32::MAX; the output limit rejects it later.
        Ok(value.trunc() as u32)
    } else {
        Err(RequestError::InvalidSize { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_relative_rejects_non_positive_factors() {
        let err = ScaleRequest::new(ScaleMode::Relative, "a.png", "b.png", 0.0, 1.0, false)
            .unwrap_err();
        assert_eq!(err, RequestError::InvalidScale { name: "sx", value: 0.0 });

        let err = ScaleRequest::new(ScaleMode::Relative, "a.png", "b.png", 1.0, -2.0, false)
            .unwrap_err();
        assert_eq!(err, RequestError::InvalidScale { name: "sy", value: -2.0 });
    }

    #[test]
    fn test_relative_rejects_nan_and_infinity() {
        assert!(ScaleRequest::new(ScaleMode::Relative, "a", "b", f64::NAN, 1.0, false).is_err());
        assert!(
            ScaleRequest::new(ScaleMode::Relative, "a", "b", 1.0, f64::INFINITY, false).is_err()
        );
    }

    #[test]
    fn test_absolute_truncates() {
        let req =
            ScaleRequest::new(ScaleMode::Absolute, "a.png", "b.png", 199.9, 50.2, false).unwrap();
        assert_eq!(
            req.params(),
            ScaleParams::Absolute {
                width: 199,
                height: 50
            }
        );
    }

    #[test]
    fn test_absolute_rejects_sub_pixel_sizes() {
        let err =
            ScaleRequest::new(ScaleMode::Absolute, "a.png", "b.png", 0.9, 10.0, false).unwrap_err();
        assert!(matches!(err, RequestError::InvalidSize { name: "width", .. }));

        let err =
            ScaleRequest::new(ScaleMode::Absolute, "a.png", "b.png", 10.0, -3.0, false).unwrap_err();
        assert!(matches!(err, RequestError::InvalidSize { name: "height", .. }));
    }

    #[test]
    fn test_from_positionals_relative_defaults_sy_to_sx() {
        let req = ScaleRequest::from_positionals(
            ScaleMode::Relative,
            &args(&["in.png", "out.png", "1.5"]),
            false,
        )
        .unwrap();
        assert_eq!(
            req.params(),
            ScaleParams::Relative {
                scale_x: 1.5,
                scale_y: 1.5
            }
        );
        assert_eq!(req.input(), Path::new("in.png"));
        assert_eq!(req.output(), Path::new("out.png"));
        assert!(!req.is_dry_run());
    }

    #[test]
    fn test_from_positionals_absolute_wxh() {
        let req = ScaleRequest::from_positionals(
            ScaleMode::Absolute,
            &args(&["in.png", "out.png", "640x480"]),
            true,
        )
        .unwrap();
        assert_eq!(
            req.params(),
            ScaleParams::Absolute {
                width: 640,
                height: 480
            }
        );
        assert!(req.is_dry_run());
    }

    #[test]
    fn test_from_positionals_absolute_wxh_truncates_fractions() {
        let wxh = ScaleRequest::from_positionals(
            ScaleMode::Absolute,
            &args(&["in.png", "out.png", "640.5x480.9"]),
            false,
        )
        .unwrap();
        let separate = ScaleRequest::from_positionals(
            ScaleMode::Absolute,
            &args(&["in.png", "out.png", "640.5", "480.9"]),
            false,
        )
        .unwrap();
        assert_eq!(
            wxh.params(),
            ScaleParams::Absolute {
                width: 640,
                height: 480
            }
        );
        assert_eq!(wxh.params(), separate.params());
    }

    #[test]
    fn test_from_positionals_absolute_separate_values() {
        let req = ScaleRequest::from_positionals(
            ScaleMode::Absolute,
            &args(&["in.png", "out.png", "75", "50"]),
            false,
        )
        .unwrap();
        assert_eq!(req.mode(), ScaleMode::Absolute);
        assert_eq!(
            req.params(),
            ScaleParams::Absolute {
                width: 75,
                height: 50
            }
        );
    }

    #[test]
    fn test_from_positionals_absolute_needs_height() {
        let err = ScaleRequest::from_positionals(
            ScaleMode::Absolute,
            &args(&["in.png", "out.png", "75"]),
            false,
        )
        .unwrap_err();
        assert_eq!(err, RequestError::MissingArgument("height"));
    }

    #[test]
    fn test_from_positionals_absolute_wxh_rejects_zero() {
        let err = ScaleRequest::from_positionals(
            ScaleMode::Absolute,
            &args(&["in.png", "out.png", "0x10"]),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, RequestError::InvalidSize { name: "width", .. }));
    }

    #[test]
    fn test_from_positionals_reports_missing_paths() {
        let err = ScaleRequest::from_positionals(ScaleMode::Relative, &[], false).unwrap_err();
        assert_eq!(err, RequestError::MissingArgument("input"));

        let err =
            ScaleRequest::from_positionals(ScaleMode::Relative, &args(&["in.png"]), false)
                .unwrap_err();
        assert_eq!(err, RequestError::MissingArgument("output"));
    }

    #[test]
    fn test_from_positionals_rejects_garbage_number() {
        let err = ScaleRequest::from_positionals(
            ScaleMode::Relative,
            &args(&["in.png", "out.png", "half"]),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, RequestError::InvalidNumber { name: "sx", .. }));
    }

    #[test]
    fn test_parse_dimensions() {
        assert_eq!(parse_dimensions("200x150").unwrap(), (200.0, 150.0));
        assert_eq!(parse_dimensions("32X16").unwrap(), (32.0, 16.0));
        assert_eq!(parse_dimensions("640.5x480").unwrap(), (640.5, 480.0));
        assert!(parse_dimensions("200x").is_err());
        assert!(parse_dimensions("ax2").is_err());
        assert!(parse_dimensions("200").is_err());
    }

    #[test]
    fn test_params_display() {
        let params = ScaleParams::Relative {
            scale_x: 0.5,
            scale_y: 2.0,
        };
        assert_eq!(params.to_string(), "0.5, 2");
        assert_eq!(ScaleMode::Absolute.to_string(), "Absolute");
    }
}
