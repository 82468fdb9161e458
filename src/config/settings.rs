use crate::cli::Args;
use crate::delegate::GhostscriptConfig;
use crate::model::{CompressionRequest, FallbackPolicy};

/// Runtime settings assembled from the command line
#[derive(Debug, Clone)]
pub struct Settings {
    pub request: CompressionRequest,
    pub ghostscript: GhostscriptConfig,
    /// Emit the result as JSON instead of the human summary
    pub json: bool,
}

impl Settings {
    /// Create settings from CLI arguments
    pub fn from_args(args: &Args) -> Self {
        let policy = if args.step_down {
            FallbackPolicy::StepDown {
                dpi_factor: args.dpi_factor,
            }
        } else {
            FallbackPolicy::Fixed {
                profile: args.fallback_profile,
                dpi: args.fallback_dpi,
            }
        };

        let mut request = CompressionRequest::new(&args.input, args.output_path())
            .with_profile(args.profile)
            .with_dpi(args.dpi)
            .with_mono_dpi(args.mono_dpi)
            .with_fallback(args.threshold)
            .with_fallback_policy(policy);

        if !args.fallback_enabled() {
            request = request.without_fallback();
        }

        Self {
            request,
            ghostscript: GhostscriptConfig {
                executable: args.gs_path.clone(),
                quiet: args.quiet_gs(),
            },
            json: args.json,
        }
    }
}
