//! Conversions from an uploaded byte stream to a downloadable result

mod image_pdf;
mod office;
mod pdf_image;
mod raster;

pub use raster::{JpgToPng, PngToJpg};
pub use image_pdf::ImageToPdf;
pub use office::{PdfToWord, WordToPdf};
pub use pdf_image::{PageFormat, PdfToImages};

use crate::error::ConvertError;

/// All conversion tags the dispatcher accepts, in the order they are shown
/// in the upload form.
pub const SUPPORTED_TAGS: &[&str] = &[
    "jpg_to_png",
    "png_to_jpg",
    "jpg_to_pdf",
    "png_to_pdf",
    "word_to_pdf",
    "pdf_to_word",
    "pdf_to_jpg",
    "pdf_to_png",
];

/// A finished conversion: the output bytes plus everything needed to serve
/// them as a download.
#[derive(Debug, Clone)]
pub struct Converted {
    pub data: Vec<u8>,
    pub mime: &'static str,
    pub filename: String,
}

/// Trait for converting an uploaded file into another format
pub trait Conversion: Send + Sync {
    /// Run the conversion on the raw upload bytes. The original filename is
    /// only used to derive the output filename.
    fn convert(&self, input: &[u8], original_filename: &str) -> Result<Converted, ConvertError>;

    /// Tag this conversion is dispatched under
    fn tag(&self) -> &'static str;

    /// MIME type of the produced bytes
    fn output_mime(&self) -> &'static str;
}

/// Get the conversion for a tag. Unknown tags are rejected by returning
/// `None`; callers surface the error instead of silently dropping the
/// request.
pub fn conversion_for_tag(tag: &str) -> Option<Box<dyn Conversion>> {
    match tag {
        "jpg_to_png" => Some(Box::new(JpgToPng)),
        "png_to_jpg" => Some(Box::new(PngToJpg)),
        "jpg_to_pdf" => Some(Box::new(ImageToPdf::jpg())),
        "png_to_pdf" => Some(Box::new(ImageToPdf::png())),
        "word_to_pdf" => Some(Box::new(WordToPdf)),
        "pdf_to_word" => Some(Box::new(PdfToWord)),
        "pdf_to_jpg" => Some(Box::new(PdfToImages::jpg())),
        "pdf_to_png" => Some(Box::new(PdfToImages::png())),
        _ => None,
    }
}

/// Derive the output filename by swapping the original's final extension.
/// Uploads without an extension simply gain one.
pub(crate) fn replace_extension(original: &str, ext: &str) -> String {
    let base = file_stem(original);
    format!("{}.{}", base, ext)
}

pub(crate) fn file_stem(original: &str) -> &str {
    std::path::Path::new(original)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("converted")
}
