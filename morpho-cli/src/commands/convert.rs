//! Convert command implementation

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use morpho_core::conversion_for_tag;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Convert a file through the same dispatch table the server uses
pub fn convert(input: &str, tag: &str, output: Option<&str>) -> Result<()> {
    let input_path = Path::new(input);

    let conversion = conversion_for_tag(tag)
        .with_context(|| format!("Unsupported conversion tag '{}' (see `morpho formats`)", tag))?;

    // Set up progress bar with animation
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    // Read input file
    pb.set_message("Reading input file...");
    let data = std::fs::read(input_path)
        .with_context(|| format!("Failed to open input file: {}", input))?;

    let original_filename = input_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("input");

    // Convert
    pb.set_message(format!("Running {}...", tag));
    let converted = conversion
        .convert(&data, original_filename)
        .with_context(|| format!("Failed to convert {}", input))?;

    tracing::info!(
        "Converted {} bytes -> {} bytes of {}",
        data.len(),
        converted.data.len(),
        converted.mime
    );

    // Write output file
    let output_path = match output {
        Some(path) => PathBuf::from(path),
        None => input_path.with_file_name(&converted.filename),
    };

    std::fs::write(&output_path, &converted.data)
        .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;

    pb.finish_with_message(format!("Converted {} -> {}", input, output_path.display()));

    Ok(())
}
