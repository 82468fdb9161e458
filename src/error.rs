use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Ghostscript unavailable: {0}")]
    DelegateUnavailable(String),

    #[error("Ghostscript failed (exit code {}): {stderr}", exit_code_label(.code))]
    DelegateFailure { code: Option<i32>, stderr: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] ConfigError),
}

impl CompressError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn unavailable<T: Into<String>>(msg: T) -> Self {
        Self::DelegateUnavailable(msg.into())
    }

    pub fn failure(code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self::DelegateFailure {
            code,
            stderr: stderr.into(),
        }
    }
}

fn exit_code_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("DPI must be positive, got {0}")]
    InvalidDpi(u32),

    #[error("Threshold must be within 0-100%, got {0}")]
    InvalidThreshold(f64),

    #[error("DPI factor must be within (0, 1), got {0}")]
    InvalidDpiFactor(f64),

    #[error("Unknown profile: {0}")]
    UnknownProfile(String),
}
