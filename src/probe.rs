//! File size measurement

use std::fs;
use std::io;
use std::path::Path;

/// Byte length of a file on disk
pub trait FileSizeProbe {
    /// Fails if `path` does not exist or is not a regular file
    fn size_of(&self, path: &Path) -> io::Result<u64>;
}

/// Probe backed by `std::fs::metadata`
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl FileSizeProbe for FsProbe {
    fn size_of(&self, path: &Path) -> io::Result<u64> {
        let metadata = fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            ));
        }
        Ok(metadata.len())
    }
}
