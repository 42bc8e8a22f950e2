//! Formats command implementation

use anyhow::Result;
use morpho_core::{conversion_for_tag, SUPPORTED_TAGS};

/// List every conversion tag with the MIME type it produces
pub fn formats() -> Result<()> {
    for tag in SUPPORTED_TAGS {
        if let Some(conversion) = conversion_for_tag(tag) {
            println!("{:<12} {}", tag, conversion.output_mime());
        }
    }
    Ok(())
}
