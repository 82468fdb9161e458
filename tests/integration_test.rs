use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::Command;

use pdf_reducer::{
    CompressError, CompressionDelegate, CompressionRequest, Invocation, Orchestrator,
    PassSettings, Profile,
};
use tempfile::TempDir;

/// Deterministic stand-in for Ghostscript: output size depends only on the
/// input size and the pass settings.
struct ModelDelegate;

impl CompressionDelegate for ModelDelegate {
    fn compress(&self, invocation: &Invocation<'_>) -> Result<(), CompressError> {
        let input = fs::metadata(invocation.input)
            .map_err(|e| CompressError::io(invocation.input, e))?
            .len();
        let kept_percent = match invocation.settings.profile {
            Profile::Prepress => 95,
            Profile::Printer => 80,
            Profile::Ebook => 50,
            Profile::Screen => 20,
        };
        File::create(invocation.output)
            .and_then(|f| f.set_len(input * kept_percent / 100))
            .map_err(|e| CompressError::io(invocation.output, e))
    }
}

fn sized_file(path: &Path, size: u64) -> PathBuf {
    File::create(path).unwrap().set_len(size).unwrap();
    path.to_path_buf()
}

#[test]
fn test_prepress_falls_back_to_screen() {
    let dir = TempDir::new().unwrap();
    let input = sized_file(&dir.path().join("brochure.pdf"), 10_000_000);
    let output = dir.path().join("output/brochure_reduced.pdf");

    let request = CompressionRequest::new(&input, &output)
        .with_profile(Profile::Prepress)
        .with_dpi(300)
        .with_fallback(50.0);

    let result = Orchestrator::new(ModelDelegate).compress(&request).unwrap();

    assert_eq!(result.original_size_bytes, 10_000_000);
    assert_eq!(result.attempts[0].output_size_bytes, 9_500_000);
    assert_eq!(result.attempts_made, 2);
    assert!(result.used_fallback);
    assert_eq!(result.final_size_bytes, 2_000_000);
    assert_eq!(result.reduction_percent, 80.0);
    assert_eq!(result.final_settings, PassSettings::new(Profile::Screen, 100));

    // The reported size is the real size of the file on disk
    assert_eq!(fs::metadata(&output).unwrap().len(), result.final_size_bytes);
}

#[test]
fn test_repeated_runs_are_stable() {
    let dir = TempDir::new().unwrap();
    let input = sized_file(&dir.path().join("in.pdf"), 123_456);
    let request = CompressionRequest::new(&input, dir.path().join("out.pdf"));
    let orchestrator = Orchestrator::new(ModelDelegate);

    let first = orchestrator.compress(&request).unwrap();
    let second = orchestrator.compress(&request).unwrap();

    assert_eq!(first.reduction_percent, second.reduction_percent);
    assert_eq!(first, second);
}

#[test]
fn test_concurrent_independent_requests() {
    let dir = TempDir::new().unwrap();
    let orchestrator = &Orchestrator::new(ModelDelegate);

    let requests: Vec<_> = (1..=8u64)
        .map(|i| {
            let input = sized_file(&dir.path().join(format!("in{i}.pdf")), i * 10_000);
            CompressionRequest::new(input, dir.path().join(format!("out/out{i}.pdf")))
                .without_fallback()
        })
        .collect();

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = requests
            .iter()
            .map(|request| scope.spawn(move || orchestrator.compress(request)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, result) in results.into_iter().enumerate() {
        let result = result.unwrap();
        let original = (i as u64 + 1) * 10_000;
        assert_eq!(result.original_size_bytes, original);
        assert_eq!(result.final_size_bytes, original / 2);
        assert_eq!(result.attempts_made, 1);
    }
}

#[test]
fn test_missing_input_fails_with_io_error() {
    let dir = TempDir::new().unwrap();
    let request =
        CompressionRequest::new(dir.path().join("nope.pdf"), dir.path().join("out.pdf"));

    let err = Orchestrator::new(ModelDelegate)
        .compress(&request)
        .unwrap_err();

    assert!(matches!(err, CompressError::Io { .. }));
    assert!(!dir.path().join("out.pdf").exists());
}

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pdf-reducer"))
}

#[test]
fn test_cli_reports_missing_input() {
    let dir = TempDir::new().unwrap();
    let output = binary()
        .arg(dir.path().join("missing.pdf"))
        .args(["--gs-path", "/nonexistent/gs"])
        .output()
        .expect("Failed to run pdf-reducer");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to compress"), "stderr: {stderr}");
}

#[test]
fn test_cli_reports_missing_ghostscript() {
    let dir = TempDir::new().unwrap();
    let input = sized_file(&dir.path().join("in.pdf"), 1000);

    let output = binary()
        .arg(&input)
        .env("PDF_REDUCER_GS", "/nonexistent/gs")
        .output()
        .expect("Failed to run pdf-reducer");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Ghostscript unavailable"), "stderr: {stderr}");
}

#[cfg(unix)]
mod with_fake_ghostscript {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Copies the input (last argument) to the -sOutputFile target, so
    /// nothing is ever saved and the fallback always triggers.
    const COPY_SCRIPT: &str = r#"#!/bin/sh
for a in "$@"; do
  case "$a" in
    -sOutputFile=*) out="${a#-sOutputFile=}" ;;
  esac
  last="$a"
done
cp "$last" "$out"
"#;

    fn fake_gs(dir: &Path) -> PathBuf {
        let path = dir.join("gs");
        fs::write(&path, COPY_SCRIPT).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_cli_json_report() {
        let dir = TempDir::new().unwrap();
        let gs = fake_gs(dir.path());
        let input = sized_file(&dir.path().join("scan.pdf"), 4096);

        let output = binary()
            .arg(&input)
            .arg("--gs-path")
            .arg(&gs)
            .arg("--json")
            .output()
            .expect("Failed to run pdf-reducer");
        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["original_size_bytes"], 4096);
        assert_eq!(json["final_size_bytes"], 4096);
        assert_eq!(json["attempts_made"], 2);
        assert_eq!(json["used_fallback"], true);
        assert_eq!(json["final_settings"]["profile"], "screen");

        assert!(dir.path().join("scan_reduced.pdf").exists());
    }

    #[test]
    fn test_cli_human_report_without_fallback() {
        let dir = TempDir::new().unwrap();
        let gs = fake_gs(dir.path());
        let input = sized_file(&dir.path().join("scan.pdf"), 4096);
        let target = dir.path().join("out/small.pdf");

        let output = binary()
            .arg(&input)
            .arg("-o")
            .arg(&target)
            .arg("--no-fallback")
            .env("PDF_REDUCER_GS", &gs)
            .output()
            .expect("Failed to run pdf-reducer");
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("scan.pdf: 0.00 MB -> 0.00 MB (reduction 0.0%)"));
        assert!(stdout.contains("[profile: /ebook @ 150 dpi]"));
        assert!(stdout.contains("Saved to:"));
        assert!(target.exists());
    }
}
