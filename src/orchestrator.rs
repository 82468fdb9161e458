//! Compression attempt orchestration
//!
//! Runs the delegate once, measures the result, and escalates at most once
//! to stronger settings when the reduction falls below the request's
//! threshold. The flow is Initial -> (Escalated) -> done; a failed delegate
//! call is never retried.

use std::fs;
use std::path::Path;

use crate::delegate::{CompressionDelegate, Invocation};
use crate::error::CompressError;
use crate::model::{
    reduction_percent, Attempt, CompressionRequest, CompressionResult, PassSettings, Stage,
};
use crate::probe::{FileSizeProbe, FsProbe};

/// Drives one or two delegate passes per request.
///
/// Holds no per-request state, so a shared orchestrator can serve
/// independent requests from several threads.
#[derive(Debug, Clone)]
pub struct Orchestrator<D, P = FsProbe> {
    delegate: D,
    probe: P,
}

impl<D: CompressionDelegate> Orchestrator<D> {
    pub fn new(delegate: D) -> Self {
        Self {
            delegate,
            probe: FsProbe,
        }
    }
}

impl<D, P> Orchestrator<D, P> {
    pub fn with_probe<Q: FileSizeProbe>(self, probe: Q) -> Orchestrator<D, Q> {
        Orchestrator {
            delegate: self.delegate,
            probe,
        }
    }
}

impl<D: CompressionDelegate, P: FileSizeProbe> Orchestrator<D, P> {
    /// Compress `request.input_path` into `request.output_path`.
    ///
    /// # Errors
    ///
    /// * `InvalidRequest` for out-of-range dpi or threshold values
    /// * `Io` when the input is missing or the output location is unusable;
    ///   a missing input never reaches the delegate
    /// * `DelegateUnavailable` / `DelegateFailure` from either pass
    pub fn compress(
        &self,
        request: &CompressionRequest,
    ) -> Result<CompressionResult, CompressError> {
        request.validate()?;

        let original = self
            .probe
            .size_of(request.input())
            .map_err(|e| CompressError::io(request.input(), e))?;

        ensure_parent_dir(request.output())?;

        let initial =
            self.run_pass(request, Stage::Initial, request.initial_settings(), original)?;

        let escalated = match self.escalation(request, &initial) {
            Some(settings) => Some(self.run_pass(request, Stage::Escalated, settings, original)?),
            None => None,
        };

        let result = CompressionResult::from_attempts(original, initial, escalated);

        log::info!(
            "{} -> {} bytes ({:.1}%) after {} pass(es)",
            result.original_size_bytes,
            result.final_size_bytes,
            result.reduction_percent,
            result.attempts_made
        );

        Ok(result)
    }

    /// Settings for the aggressive pass, if one is due
    fn escalation(&self, request: &CompressionRequest, initial: &Attempt) -> Option<PassSettings> {
        if !request.aggressive_fallback {
            return None;
        }

        if initial.reduction_percent >= request.aggressive_threshold_percent {
            log::debug!(
                "Reduction {:.1}% meets threshold {:.1}%",
                initial.reduction_percent,
                request.aggressive_threshold_percent
            );
            return None;
        }

        match request.fallback_policy.escalate(&initial.settings) {
            Some(settings) => {
                log::info!(
                    "Reduction {:.1}% below threshold {:.1}%, escalating to {} @ {}dpi",
                    initial.reduction_percent,
                    request.aggressive_threshold_percent,
                    settings.profile,
                    settings.dpi
                );
                Some(settings)
            }
            None => {
                log::warn!(
                    "Reduction {:.1}% below threshold {:.1}%, but nothing stronger than {} @ {}dpi is available",
                    initial.reduction_percent,
                    request.aggressive_threshold_percent,
                    initial.settings.profile,
                    initial.settings.dpi
                );
                None
            }
        }
    }

    fn run_pass(
        &self,
        request: &CompressionRequest,
        stage: Stage,
        settings: PassSettings,
        original: u64,
    ) -> Result<Attempt, CompressError> {
        log::info!("{}: {} @ {}dpi", stage, settings.profile, settings.dpi);

        self.delegate.compress(&Invocation {
            input: request.input(),
            output: request.output(),
            settings,
            mono_dpi: request.mono_dpi,
        })?;

        let output_size_bytes = self
            .probe
            .size_of(request.output())
            .map_err(|e| CompressError::io(request.output(), e))?;

        Ok(Attempt {
            stage,
            settings,
            output_size_bytes,
            reduction_percent: reduction_percent(original, output_size_bytes),
        })
    }
}

fn ensure_parent_dir(output: &Path) -> Result<(), CompressError> {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| CompressError::io(parent, e))
        }
        _ => Ok(()),
    }
}
