//! Input checks before decode.

use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::PipelineError;

/// Validates input files before they are read.
pub struct Validator {
    limits: LimitsConfig,
}

impl Validator {
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Checks:
    /// - File exists and is a regular file
    /// - File size is within limits and non-zero
    pub fn validate(&self, path: &Path) -> Result<(), PipelineError> {
        if !path.exists() {
            return Err(PipelineError::FileNotFound(path.to_path_buf()));
        }

        let metadata = std::fs::metadata(path).map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot read metadata: {}", e),
        })?;

        if !metadata.is_file() {
            return Err(PipelineError::Decode {
                path: path.to_path_buf(),
                message: "Not a regular file".to_string(),
            });
        }

        if metadata.len() == 0 {
            return Err(PipelineError::Decode {
                path: path.to_path_buf(),
                message: "File is empty".to_string(),
            });
        }

        let max_bytes = self.limits.max_file_size_mb.saturating_mul(1024 * 1024);
        if metadata.len() > max_bytes {
            return Err(PipelineError::FileTooLarge {
                path: path.to_path_buf(),
                size_mb: metadata.len() / (1024 * 1024),
                max_mb: self.limits.max_file_size_mb,
            });
        }

        Ok(())
    }
}
