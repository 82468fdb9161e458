use crate::model::Profile;

/// Default quality profile for the first pass
pub const DEFAULT_PROFILE: Profile = Profile::Ebook;

/// Default colour/grayscale image resolution
pub const DEFAULT_DPI: u32 = 150;

/// Default monochrome image resolution
pub const DEFAULT_MONO_DPI: u32 = 300;

/// Reduction (percent) below which the aggressive pass kicks in
pub const DEFAULT_THRESHOLD_PERCENT: f64 = 10.0;

/// Profile used by the aggressive pass
pub const DEFAULT_FALLBACK_PROFILE: Profile = Profile::Screen;

/// Colour/grayscale resolution used by the aggressive pass
pub const DEFAULT_FALLBACK_DPI: u32 = 100;

/// DPI multiplier for the step-down fallback policy
pub const DEFAULT_DPI_FACTOR: f64 = 2.0 / 3.0;

/// Floor for scaled resolutions
pub const MIN_DPI: u32 = 36;

/// Ghostscript executable names, searched in order
pub const GS_CANDIDATES: [&str; 3] = ["gs", "gswin64c", "gswin32c"];

/// Environment variable naming an explicit Ghostscript executable
pub const GS_ENV_VAR: &str = "PDF_REDUCER_GS";

/// Suffix appended to the input stem for the default output name
pub const OUTPUT_SUFFIX: &str = "_reduced";
