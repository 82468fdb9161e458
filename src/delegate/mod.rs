//! External compression delegate
//!
//! The orchestrator only talks to the [`CompressionDelegate`] trait, so the
//! Ghostscript process can be swapped for a test double.

pub mod ghostscript;

use std::path::Path;

use crate::error::CompressError;
use crate::model::PassSettings;

pub use ghostscript::{build_args, Ghostscript, GhostscriptConfig};

/// Everything a delegate needs for one pass
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub settings: PassSettings,
    pub mono_dpi: u32,
}

/// A blocking external compressor.
///
/// Implementations write the compressed file to `invocation.output`,
/// overwriting anything already there.
pub trait CompressionDelegate {
    fn compress(&self, invocation: &Invocation<'_>) -> Result<(), CompressError>;
}

impl<D: CompressionDelegate + ?Sized> CompressionDelegate for &D {
    fn compress(&self, invocation: &Invocation<'_>) -> Result<(), CompressError> {
        (**self).compress(invocation)
    }
}

impl<D: CompressionDelegate + ?Sized> CompressionDelegate for Box<D> {
    fn compress(&self, invocation: &Invocation<'_>) -> Result<(), CompressError> {
        (**self).compress(invocation)
    }
}
