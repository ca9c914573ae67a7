//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

/// Resource limits to protect against problematic inputs and outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum input file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum source dimension (width or height)
    pub max_image_dimension: u32,

    /// Maximum target dimension (width or height)
    pub max_output_dimension: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            max_image_dimension: 10000,
            max_output_dimension: 16384,
        }
    }
}

/// Encoder settings for the written file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// JPEG quality (1-100), used when the output path ends in .jpg/.jpeg
    pub jpeg_quality: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { jpeg_quality: 90 }
    }
}

/// Self-test harness settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfTestConfig {
    /// Directory the fixtures and outputs are written to (`~` is expanded)
    pub output_dir: String,
}

impl Default for SelfTestConfig {
    fn default() -> Self {
        Self {
            output_dir: "rescale-self-test".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
