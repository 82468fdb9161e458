use clap::Parser;
use std::path::PathBuf;

use crate::config::defaults::*;
use crate::model::Profile;

#[derive(Parser, Debug)]
#[command(name = "pdf-reducer")]
#[command(
    author,
    version,
    about = "Shrink PDF files with Ghostscript, retrying with stronger settings when needed"
)]
pub struct Args {
    /// Input PDF file path
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output PDF file path (defaults to <input>_reduced.pdf next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Ghostscript quality profile for the first pass
    #[arg(short, long, default_value = "ebook", value_parser = parse_profile)]
    pub profile: Profile,

    /// Colour and grayscale image resolution
    #[arg(short, long, default_value_t = DEFAULT_DPI, value_parser = clap::value_parser!(u32).range(1..))]
    pub dpi: u32,

    /// Monochrome image resolution
    #[arg(long, default_value_t = DEFAULT_MONO_DPI, value_parser = clap::value_parser!(u32).range(1..))]
    pub mono_dpi: u32,

    /// Never run the aggressive second pass
    #[arg(long)]
    pub no_fallback: bool,

    /// Run the aggressive pass when the reduction is below this percentage
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD_PERCENT, value_parser = parse_percent)]
    pub threshold: f64,

    /// Profile for the aggressive pass
    #[arg(long, default_value = "screen", value_parser = parse_profile)]
    pub fallback_profile: Profile,

    /// Colour and grayscale resolution for the aggressive pass
    #[arg(long, default_value_t = DEFAULT_FALLBACK_DPI, value_parser = clap::value_parser!(u32).range(1..))]
    pub fallback_dpi: u32,

    /// Derive the aggressive pass by stepping one profile down and scaling the dpi
    #[arg(long, conflicts_with_all = ["fallback_profile", "fallback_dpi"])]
    pub step_down: bool,

    /// DPI multiplier used with --step-down
    #[arg(long, default_value_t = DEFAULT_DPI_FACTOR, requires = "step_down")]
    pub dpi_factor: f64,

    /// Explicit Ghostscript executable
    #[arg(long, env = GS_ENV_VAR)]
    pub gs_path: Option<PathBuf>,

    /// Let Ghostscript print its own progress output
    #[arg(long)]
    pub show_gs_output: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Get the output path, defaulting to `<stem>_reduced.pdf` beside the input
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let stem = self
                .input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "result".to_string());
            self.input
                .with_file_name(format!("{}{}.pdf", stem, OUTPUT_SUFFIX))
        })
    }

    /// Check if the aggressive pass is enabled
    pub fn fallback_enabled(&self) -> bool {
        !self.no_fallback
    }

    /// Check if Ghostscript should run with -dQUIET
    pub fn quiet_gs(&self) -> bool {
        !self.show_gs_output
    }
}

/// Parse a profile name, bare (`ebook`) or Ghostscript style (`/ebook`)
fn parse_profile(s: &str) -> Result<Profile, String> {
    s.parse::<Profile>().map_err(|e| {
        let choices: Vec<String> = Profile::all()
            .iter()
            .map(|p| format!("{} (~{} dpi)", &p.gs_setting()[1..], p.nominal_dpi()))
            .collect();
        format!("{}; expected one of {}", e, choices.join(", "))
    })
}

fn parse_percent(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number: {}", s))?;
    if !(0.0..=100.0).contains(&value) {
        return Err(format!("{} is not within 0-100", value));
    }
    Ok(value)
}
