use std::fmt;

use serde::Serialize;

use super::PassSettings;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Which pass of the two-step fallback produced an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Initial,
    Escalated,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Initial => write!(f, "Pass 1"),
            Stage::Escalated => write!(f, "Pass 2 (aggressive)"),
        }
    }
}

/// Outcome of one delegate pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attempt {
    pub stage: Stage,
    pub settings: PassSettings,
    pub output_size_bytes: u64,
    pub reduction_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompressionResult {
    pub original_size_bytes: u64,
    pub final_size_bytes: u64,
    /// Negative when the output grew
    pub reduction_percent: f64,
    pub attempts_made: u32,
    pub used_fallback: bool,
    pub final_settings: PassSettings,
    pub attempts: Vec<Attempt>,
}

impl CompressionResult {
    pub(crate) fn from_attempts(
        original_size_bytes: u64,
        initial: Attempt,
        escalated: Option<Attempt>,
    ) -> Self {
        let last = escalated.as_ref().unwrap_or(&initial);
        let (final_size_bytes, reduction_percent, final_settings) =
            (last.output_size_bytes, last.reduction_percent, last.settings);
        let used_fallback = escalated.is_some();

        let mut attempts = vec![initial];
        attempts.extend(escalated);

        Self {
            original_size_bytes,
            final_size_bytes,
            reduction_percent,
            attempts_made: attempts.len() as u32,
            used_fallback,
            final_settings,
            attempts,
        }
    }

    pub fn original_mb(&self) -> f64 {
        self.original_size_bytes as f64 / BYTES_PER_MB
    }

    pub fn final_mb(&self) -> f64 {
        self.final_size_bytes as f64 / BYTES_PER_MB
    }

    /// One-line human summary, e.g.
    /// `report.pdf: 9.54 MB -> 1.91 MB (reduction 80.0%) [profile: /screen @ 100 dpi]`
    pub fn summary(&self, name: &str) -> String {
        format!(
            "{}: {:.2} MB -> {:.2} MB (reduction {:.1}%) [profile: {} @ {} dpi]",
            name,
            self.original_mb(),
            self.final_mb(),
            self.reduction_percent,
            self.final_settings.profile,
            self.final_settings.dpi
        )
    }
}

/// Percentage saved going from `original` to `compressed` bytes.
///
/// Zero-byte originals report 0 rather than dividing by zero.
pub fn reduction_percent(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    100.0 * (original as f64 - compressed as f64) / original as f64
}
