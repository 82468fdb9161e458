use anyhow::{Context, Result};
use clap::Parser;

use pdf_reducer::cli::Args;
use pdf_reducer::config::Settings;
use pdf_reducer::compress_pdf;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    let settings = Settings::from_args(&args);
    let request = &settings.request;

    log::info!(
        "Compressing {} -> {}",
        request.input_path.display(),
        request.output_path.display()
    );

    let result = compress_pdf(request, settings.ghostscript.clone()).with_context(|| {
        format!("Failed to compress {}", request.input_path.display())
    })?;

    if settings.json {
        let json =
            serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        println!("{}", json);
    } else {
        let name = request
            .input_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| request.input_path.display().to_string());
        println!("{}", result.summary(&name));
        println!("Saved to: {}", request.output_path.display());
    }

    Ok(())
}
