//! Target size computation and interpolation policy.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::request::{ScaleMode, ScaleParams, ScaleRequest};

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True if either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Largest side.
    pub fn max_side(&self) -> u32 {
        self.width.max(self.height)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.width, self.height)
    }
}

/// Resampling filter family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Area averaging, used when shrinking on either axis
    Area,
    /// Cubic convolution, used when enlarging or keeping size
    Cubic,
}

impl Interpolation {
    /// Area if the target is smaller than the source on either axis.
    pub fn choose(source: Dimensions, target: Dimensions) -> Self {
        if target.width < source.width || target.height < source.height {
            Interpolation::Area
        } else {
            Interpolation::Cubic
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interpolation::Area => write!(f, "area"),
            Interpolation::Cubic => write!(f, "cubic"),
        }
    }
}

/// Everything decided about a request once the source size is known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalePlan {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(flatten)]
    pub params: ScaleParams,
    pub source: Dimensions,
    pub target: Dimensions,
    pub interpolation: Interpolation,
}

impl ScalePlan {
    pub fn new(request: &ScaleRequest, source: Dimensions) -> Self {
        let params = request.params();
        let target = target_size(params, source);
        Self {
            input: request.input().to_path_buf(),
            output: request.output().to_path_buf(),
            params,
            source,
            target,
            interpolation: Interpolation::choose(source, target),
        }
    }

    pub fn mode(&self) -> ScaleMode {
        self.params.mode()
    }
}

impl fmt::Display for ScalePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mode: {}", self.mode())?;
        writeln!(f, "Input: {}", self.input.display())?;
        writeln!(f, "Output: {}", self.output.display())?;
        writeln!(f, "Params: {}", self.params)?;
        writeln!(f, "Source size: {}", self.source)?;
        writeln!(f, "Target size: {}", self.target)?;
        write!(f, "Interpolation: {}", self.interpolation)
    }
}

/// Relative sizes are rounded to the nearest pixel; absolute sizes pass through.
pub fn target_size(params: ScaleParams, source: Dimensions) -> Dimensions {
    match params {
        ScaleParams::Relative { scale_x, scale_y } => Dimensions {
            width: scale_axis(source.width, scale_x),
            height: scale_axis(source.height, scale_y),
        },
        ScaleParams::Absolute { width, height } => Dimensions { width, height },
    }
}

fn scale_axis(length: u32, factor: f64) -> u32 {
    // Float-to-int casts saturate, so huge factors clamp to u32::MAX.
    (f64::from(length) * factor).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relative(sx: f64, sy: f64) -> ScaleParams {
        ScaleParams::Relative {
            scale_x: sx,
            scale_y: sy,
        }
    }

    #[test]
    fn test_relative_target_rounds() {
        let src = Dimensions::new(50, 50);
        assert_eq!(target_size(relative(0.5, 2.0), src), Dimensions::new(25, 100));

        let src = Dimensions::new(37, 91);
        assert_eq!(target_size(relative(2.0, 2.0), src), Dimensions::new(74, 182));

        let src = Dimensions::new(150, 100);
        assert_eq!(target_size(relative(0.4, 1.6), src), Dimensions::new(60, 160));

        // 37 * 0.5 = 18.5 rounds away from zero
        let src = Dimensions::new(37, 3);
        assert_eq!(target_size(relative(0.5, 0.5), src), Dimensions::new(19, 2));
    }

    #[test]
    fn test_relative_target_can_collapse_to_zero() {
        let src = Dimensions::new(1, 1);
        let target = target_size(relative(0.1, 1.0), src);
        assert!(target.is_empty());
    }

    #[test]
    fn test_absolute_target_is_exact() {
        let params = ScaleParams::Absolute {
            width: 200,
            height: 200,
        };
        for src in [Dimensions::new(50, 50), Dimensions::new(37, 91), Dimensions::new(1, 4000)] {
            assert_eq!(target_size(params, src), Dimensions::new(200, 200));
        }
    }

    #[test]
    fn test_interpolation_policy() {
        let src = Dimensions::new(100, 100);
        assert_eq!(Interpolation::choose(src, Dimensions::new(50, 50)), Interpolation::Area);
        // shrinking on one axis is enough
        assert_eq!(Interpolation::choose(src, Dimensions::new(200, 99)), Interpolation::Area);
        assert_eq!(Interpolation::choose(src, Dimensions::new(99, 200)), Interpolation::Area);
        assert_eq!(Interpolation::choose(src, Dimensions::new(100, 100)), Interpolation::Cubic);
        assert_eq!(Interpolation::choose(src, Dimensions::new(300, 100)), Interpolation::Cubic);
    }

    #[test]
    fn test_plan_from_request() {
        let request =
            ScaleRequest::new(ScaleMode::Relative, "in.png", "out.png", 0.5, 2.0, true).unwrap();
        let plan = ScalePlan::new(&request, Dimensions::new(50, 50));
        assert_eq!(plan.mode(), ScaleMode::Relative);
        assert_eq!(plan.target, Dimensions::new(25, 100));
        assert_eq!(plan.interpolation, Interpolation::Area);

        let text = plan.to_string();
        assert!(text.contains("Target size: 25 x 100"));
        assert!(text.contains("Interpolation: area"));
    }

    #[test]
    fn test_plan_json_shape() {
        let request =
            ScaleRequest::new(ScaleMode::Absolute, "in.png", "out.png", 200.0, 150.0, true)
                .unwrap();
        let plan = ScalePlan::new(&request, Dimensions::new(150, 100));
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["mode"], "absolute");
        assert_eq!(json["width"], 200);
        assert_eq!(json["target"]["height"], 150);
        assert_eq!(json["interpolation"], "cubic");
    }
}
