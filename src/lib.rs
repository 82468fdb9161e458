pub mod cli;
pub mod config;
pub mod delegate;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod probe;

pub use config::Settings;
pub use delegate::{CompressionDelegate, Ghostscript, GhostscriptConfig, Invocation};
pub use error::{CompressError, ConfigError};
pub use model::{CompressionRequest, CompressionResult, FallbackPolicy, PassSettings, Profile};
pub use orchestrator::Orchestrator;
pub use probe::{FileSizeProbe, FsProbe};

/// Compress a PDF with the system Ghostscript.
///
/// This is the recommended entry point for library consumers who do not need
/// a custom delegate.
///
/// # Example
///
/// ```no_run
/// use pdf_reducer::{compress_pdf, CompressionRequest, GhostscriptConfig, Profile};
///
/// let request = CompressionRequest::new("scan.pdf", "output/scan_reduced.pdf")
///     .with_profile(Profile::Printer)
///     .with_fallback(25.0);
///
/// let result = compress_pdf(&request, GhostscriptConfig::default()).unwrap();
/// println!("{}", result.summary("scan.pdf"));
/// ```
pub fn compress_pdf(
    request: &CompressionRequest,
    config: GhostscriptConfig,
) -> Result<CompressionResult, CompressError> {
    Orchestrator::new(Ghostscript::new(config)).compress(request)
}
