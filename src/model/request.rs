use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::defaults::*;
use crate::error::ConfigError;

use super::Profile;

/// Settings for a single Ghostscript pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassSettings {
    pub profile: Profile,
    pub dpi: u32,
}

impl PassSettings {
    pub fn new(profile: Profile, dpi: u32) -> Self {
        Self { profile, dpi }
    }

    /// True when `self` is at least as strong as `other` on both axes and
    /// stronger on at least one.
    pub fn is_more_aggressive_than(&self, other: &PassSettings) -> bool {
        self.profile >= other.profile
            && self.dpi <= other.dpi
            && (self.profile > other.profile || self.dpi < other.dpi)
    }
}

/// How the second pass is derived from the first one
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FallbackPolicy {
    /// Re-run with a fixed profile and dpi
    Fixed { profile: Profile, dpi: u32 },
    /// Move one profile down the ladder and scale the dpi
    StepDown { dpi_factor: f64 },
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        FallbackPolicy::Fixed {
            profile: DEFAULT_FALLBACK_PROFILE,
            dpi: DEFAULT_FALLBACK_DPI,
        }
    }
}

impl FallbackPolicy {
    /// Settings for the escalated pass, or `None` when nothing stronger
    /// than `first` can be derived.
    ///
    /// The proposal is clamped so it never relaxes either axis relative to
    /// the first pass.
    pub fn escalate(&self, first: &PassSettings) -> Option<PassSettings> {
        let proposal = match *self {
            FallbackPolicy::Fixed { profile, dpi } => PassSettings::new(profile, dpi),
            FallbackPolicy::StepDown { dpi_factor } => {
                let scaled = (first.dpi as f64 * dpi_factor).round() as u32;
                PassSettings::new(
                    first.profile.downgrade().unwrap_or(first.profile),
                    scaled.max(MIN_DPI),
                )
            }
        };

        let clamped = PassSettings::new(
            proposal.profile.max(first.profile),
            proposal.dpi.min(first.dpi),
        );

        clamped.is_more_aggressive_than(first).then_some(clamped)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            FallbackPolicy::Fixed { dpi: 0, .. } => Err(ConfigError::InvalidDpi(0)),
            FallbackPolicy::StepDown { dpi_factor } if !(dpi_factor > 0.0 && dpi_factor < 1.0) => {
                Err(ConfigError::InvalidDpiFactor(dpi_factor))
            }
            _ => Ok(()),
        }
    }
}

/// One compression job: consumed by a single `compress` call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionRequest {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub profile: Profile,
    /// Colour and grayscale image resolution
    pub dpi: u32,
    /// Monochrome image resolution, unchanged by escalation
    pub mono_dpi: u32,
    pub aggressive_fallback: bool,
    pub aggressive_threshold_percent: f64,
    pub fallback_policy: FallbackPolicy,
}

impl CompressionRequest {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            profile: DEFAULT_PROFILE,
            dpi: DEFAULT_DPI,
            mono_dpi: DEFAULT_MONO_DPI,
            aggressive_fallback: true,
            aggressive_threshold_percent: DEFAULT_THRESHOLD_PERCENT,
            fallback_policy: FallbackPolicy::default(),
        }
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_mono_dpi(mut self, mono_dpi: u32) -> Self {
        self.mono_dpi = mono_dpi;
        self
    }

    /// Enable the aggressive second pass below `threshold_percent` reduction
    pub fn with_fallback(mut self, threshold_percent: f64) -> Self {
        self.aggressive_fallback = true;
        self.aggressive_threshold_percent = threshold_percent;
        self
    }

    pub fn without_fallback(mut self) -> Self {
        self.aggressive_fallback = false;
        self
    }

    pub fn with_fallback_policy(mut self, policy: FallbackPolicy) -> Self {
        self.fallback_policy = policy;
        self
    }

    pub fn input(&self) -> &Path {
        &self.input_path
    }

    pub fn output(&self) -> &Path {
        &self.output_path
    }

    /// Settings of the first pass
    pub fn initial_settings(&self) -> PassSettings {
        PassSettings::new(self.profile, self.dpi)
    }

    /// Check the numeric invariants. Path checks happen at compress time.
    ///
    /// Threshold and fallback policy only matter when the fallback is on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dpi == 0 {
            return Err(ConfigError::InvalidDpi(self.dpi));
        }
        if self.mono_dpi == 0 {
            return Err(ConfigError::InvalidDpi(self.mono_dpi));
        }
        if !self.aggressive_fallback {
            return Ok(());
        }
        let threshold = self.aggressive_threshold_percent;
        if !(0.0..=100.0).contains(&threshold) {
            return Err(ConfigError::InvalidThreshold(threshold));
        }
        self.fallback_policy.validate()
    }
}
