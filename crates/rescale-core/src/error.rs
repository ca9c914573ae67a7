//! Error types for Rescale.
//!
//! Errors are organized by stage so every message carries the path and the
//! step that failed.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Rescale operations.
#[derive(Error, Debug)]
pub enum RescaleError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Malformed or out-of-range scale request
    #[error("Invalid request: {0}")]
    Request(#[from] RequestError),

    /// Load/resize/store errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Self-test failures
    #[error("Self-test failed: {0}")]
    SelfTest(#[from] SelfTestError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised while building a [`crate::ScaleRequest`], before any I/O.
#[derive(Error, Debug, PartialEq)]
pub enum RequestError {
    /// A required positional parameter is absent
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    /// More positionals than the mode accepts
    #[error("Unexpected argument: {0:?}")]
    UnexpectedArgument(String),

    /// A parameter is not a number
    #[error("Invalid number for {name}: {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    /// A `WxH` token could not be split into two integers
    #[error("Invalid dimensions {0:?}, expected <W>x<H>")]
    InvalidDimensions(String),

    /// Relative factor is not a finite positive number
    #[error("Scale factor {name} must be > 0 (got {value})")]
    InvalidScale { name: &'static str, value: f64 },

    /// Absolute size truncates to less than one pixel
    #[error("Target {name} must be >= 1 (got {value})")]
    InvalidSize { name: &'static str, value: f64 },
}

/// Pipeline errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// Source dimensions exceed limit
    #[error("Image too large: {path} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// Format could not be detected or has no encoder
    #[error("Unsupported format for {path}: {format}")]
    UnsupportedFormat { path: PathBuf, format: String },

    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Resampling failed or the target is degenerate
    #[error("Resize error for {path}: {message}")]
    Resize { path: PathBuf, message: String },

    /// Computed target exceeds the output limit
    #[error("Target too large for {path}: {width}x{height} > {max_dim}")]
    TargetTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// Image encoding or the final write failed
    #[error("Encode error for {path}: {message}")]
    Encode { path: PathBuf, message: String },
}

/// Self-test harness failures. The harness stops at the first one.
#[derive(Error, Debug)]
pub enum SelfTestError {
    /// Fixture generation failed
    #[error("could not generate {path}: {message}")]
    Generate { path: PathBuf, message: String },

    /// A scale case returned an error
    #[error("scaling failed for {input}: {source}")]
    Scale {
        input: String,
        #[source]
        source: Box<RescaleError>,
    },

    /// Output dimensions differ from the expected ones
    #[error("size verification failed for {output}: expected {expected}, got {actual}")]
    SizeMismatch {
        output: String,
        expected: String,
        actual: String,
    },

    /// A dry run left a file at the output path
    #[error("dry run created {0}")]
    DryRunWroteOutput(PathBuf),
}

/// Convenience type alias for Rescale results.
pub type Result<T> = std::result::Result<T, RescaleError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
