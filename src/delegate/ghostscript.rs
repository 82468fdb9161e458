//! Ghostscript `pdfwrite` delegate

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::defaults::GS_CANDIDATES;
use crate::error::CompressError;

use super::{CompressionDelegate, Invocation};

/// How to find and run Ghostscript
#[derive(Debug, Clone)]
pub struct GhostscriptConfig {
    /// Explicit executable; the search path is used when unset
    pub executable: Option<PathBuf>,
    /// Pass -dQUIET and discard Ghostscript's stdout
    pub quiet: bool,
}

impl Default for GhostscriptConfig {
    fn default() -> Self {
        Self {
            executable: None,
            quiet: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Ghostscript {
    config: GhostscriptConfig,
}

impl Ghostscript {
    pub fn new(config: GhostscriptConfig) -> Self {
        Self { config }
    }

    /// Resolve the executable to run.
    pub fn locate(&self) -> Result<PathBuf, CompressError> {
        if let Some(ref explicit) = self.config.executable {
            return which::which(explicit).map_err(|e| {
                CompressError::unavailable(format!("{}: {}", explicit.display(), e))
            });
        }

        GS_CANDIDATES
            .iter()
            .find_map(|name| which::which(name).ok())
            .ok_or_else(|| {
                CompressError::unavailable(format!(
                    "none of {} found on PATH; install Ghostscript or pass --gs-path",
                    GS_CANDIDATES.join(", ")
                ))
            })
    }
}

impl CompressionDelegate for Ghostscript {
    fn compress(&self, invocation: &Invocation<'_>) -> Result<(), CompressError> {
        let exe = self.locate()?;
        let args = build_args(invocation, self.config.quiet);

        // A leftover file would pass for this run's output
        remove_stale_output(invocation.output)?;

        log::debug!("Running {} {:?}", exe.display(), args);

        let output = Command::new(&exe)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(if self.config.quiet {
                Stdio::null()
            } else {
                Stdio::inherit()
            })
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| spawn_error(&exe, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CompressError::failure(
                output.status.code(),
                stderr.trim().to_string(),
            ));
        }

        if !invocation.output.is_file() {
            return Err(CompressError::failure(
                output.status.code(),
                format!("no output written to {}", invocation.output.display()),
            ));
        }

        Ok(())
    }
}

fn remove_stale_output(output: &Path) -> Result<(), CompressError> {
    match fs::remove_file(output) {
        Ok(()) => {
            log::debug!("Removed previous output {}", output.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(CompressError::io(output, e)),
    }
}

fn spawn_error(exe: &Path, err: io::Error) -> CompressError {
    CompressError::unavailable(format!("failed to execute {}: {}", exe.display(), err))
}

/// Build the `pdfwrite` argument vector for one pass.
///
/// Colour and grayscale images share the pass dpi; monochrome images keep
/// their own resolution.
pub fn build_args(invocation: &Invocation<'_>, quiet: bool) -> Vec<OsString> {
    let settings = invocation.settings;
    let mut args: Vec<OsString> = [
        "-sDEVICE=pdfwrite".to_string(),
        "-dCompatibilityLevel=1.4".to_string(),
        format!("-dPDFSETTINGS={}", settings.profile.gs_setting()),
        "-dDetectDuplicateImages=true".to_string(),
        "-dCompressFonts=true".to_string(),
        "-dSubsetFonts=true".to_string(),
        "-dColorImageDownsampleType=/Bicubic".to_string(),
        format!("-dColorImageResolution={}", settings.dpi),
        "-dGrayImageDownsampleType=/Bicubic".to_string(),
        format!("-dGrayImageResolution={}", settings.dpi),
        "-dMonoImageDownsampleType=/Subsample".to_string(),
        format!("-dMonoImageResolution={}", invocation.mono_dpi),
        "-dNOPAUSE".to_string(),
    ]
    .into_iter()
    .map(OsString::from)
    .collect();

    if quiet {
        args.push("-dQUIET".into());
    }
    args.push("-dBATCH".into());

    let mut output_flag = OsString::from("-sOutputFile=");
    output_flag.push(invocation.output);
    args.push(output_flag);
    args.push(invocation.input.into());

    args
}
