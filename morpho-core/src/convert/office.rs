//! Document conversions through a headless LibreOffice process
//!
//! Both directions share one engine: the upload is written into a scratch
//! directory, `soffice --headless --convert-to <target>` runs against it,
//! and the produced file is read back. The scratch directory is removed
//! best-effort; a failed cleanup is logged and tolerated.

use super::{replace_extension, Conversion, Converted};
use crate::error::{ConvertError, Result};
use std::process::Command;

const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Resolve the LibreOffice binary, overridable for non-standard installs.
fn soffice_binary() -> String {
    std::env::var("MORPHO_SOFFICE").unwrap_or_else(|_| "soffice".to_string())
}

/// Run the transcoder over a scratch copy of the input and read the result
/// back into memory.
fn transcode(
    input: &[u8],
    input_ext: &str,
    target_ext: &str,
    infilter: Option<&str>,
) -> Result<Vec<u8>> {
    let scratch = tempfile::tempdir()?;
    let input_path = scratch.path().join(format!("input.{}", input_ext));
    std::fs::write(&input_path, input)?;

    let binary = soffice_binary();
    let mut command = Command::new(&binary);
    command.arg("--headless");
    if let Some(filter) = infilter {
        command.arg(format!("--infilter={}", filter));
    }
    let output = command
        .arg("--convert-to")
        .arg(target_ext)
        .arg("--outdir")
        .arg(scratch.path())
        .arg(&input_path)
        .output()
        .map_err(|e| ConvertError::Office(format!("Failed to launch {}: {}", binary, e)))?;

    if !output.status.success() {
        return Err(ConvertError::Office(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    let output_path = scratch.path().join(format!("input.{}", target_ext));
    let data = std::fs::read(&output_path).map_err(|_| {
        ConvertError::Office(format!("{} produced no {} output", binary, target_ext))
    })?;

    if let Err(e) = scratch.close() {
        tracing::warn!("Failed to remove transcoder scratch dir: {}", e);
    }

    Ok(data)
}

/// Convert a DOCX upload to PDF
pub struct WordToPdf;

impl Conversion for WordToPdf {
    fn convert(&self, input: &[u8], original_filename: &str) -> Result<Converted> {
        let data = transcode(input, "docx", "pdf", None)?;

        Ok(Converted {
            data,
            mime: self.output_mime(),
            filename: replace_extension(original_filename, "pdf"),
        })
    }

    fn tag(&self) -> &'static str {
        "word_to_pdf"
    }

    fn output_mime(&self) -> &'static str {
        "application/pdf"
    }
}

/// Convert a PDF upload to DOCX
pub struct PdfToWord;

impl Conversion for PdfToWord {
    fn convert(&self, input: &[u8], original_filename: &str) -> Result<Converted> {
        // Writer's PDF import filter must be forced, otherwise soffice opens
        // the PDF in Draw and refuses the docx target.
        let data = transcode(input, "pdf", "docx", Some("writer_pdf_import"))?;

        Ok(Converted {
            data,
            mime: self.output_mime(),
            filename: replace_extension(original_filename, "docx"),
        })
    }

    fn tag(&self) -> &'static str {
        "pdf_to_word"
    }

    fn output_mime(&self) -> &'static str {
        DOCX_MIME
    }
}
