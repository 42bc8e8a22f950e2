//! PDF -> raster page archives
//!
//! Every page of the input PDF is rendered through pdfium and encoded as a
//! raster image; the pages are bundled into a single ZIP archive with
//! entries named `<basename>_page_<n>.<ext>` (1-based).

use super::{file_stem, replace_extension, Conversion, Converted};
use crate::error::ConvertError;
use image::ImageFormat;
use pdfium_render::prelude::*;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Cap on the longest rendered edge, in pixels. Page sizes vary wildly;
/// capping pixels rather than DPI keeps memory bounded for oversized pages.
const MAX_PAGE_EDGE_PX: i32 = 1024;

/// Raster format for rendered pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    Jpeg,
    Png,
}

impl PageFormat {
    fn extension(self) -> &'static str {
        match self {
            PageFormat::Jpeg => "jpg",
            PageFormat::Png => "png",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            PageFormat::Jpeg => ImageFormat::Jpeg,
            PageFormat::Png => ImageFormat::Png,
        }
    }
}

/// Render every page of a PDF into a ZIP of raster images
pub struct PdfToImages {
    format: PageFormat,
    tag: &'static str,
}

impl PdfToImages {
    pub fn jpg() -> Self {
        Self {
            format: PageFormat::Jpeg,
            tag: "pdf_to_jpg",
        }
    }

    pub fn png() -> Self {
        Self {
            format: PageFormat::Png,
            tag: "pdf_to_png",
        }
    }
}

fn entry_name(original_filename: &str, page: usize, ext: &str) -> String {
    format!("{}_page_{}.{}", file_stem(original_filename), page, ext)
}

impl Conversion for PdfToImages {
    fn convert(&self, input: &[u8], original_filename: &str) -> Result<Converted, ConvertError> {
        let pdfium = Pdfium::default();
        let document = pdfium
            .load_pdf_from_byte_slice(input, None)
            .map_err(|e| ConvertError::Pdf(format!("Failed to load PDF: {:?}", e)))?;

        let render_config = PdfRenderConfig::new()
            .set_target_width(MAX_PAGE_EDGE_PX)
            .set_maximum_height(MAX_PAGE_EDGE_PX);

        let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        let page_count = document.pages().len();
        tracing::debug!("Rendering {} pages of {}", page_count, original_filename);

        for (index, page) in document.pages().iter().enumerate() {
            let bitmap = page
                .render_with_config(&render_config)
                .map_err(|e| ConvertError::Pdf(format!("Failed to render page {}: {:?}", index + 1, e)))?;

            let rendered = image::DynamicImage::ImageRgb8(bitmap.as_image().to_rgb8());
            let mut encoded = Cursor::new(Vec::new());
            rendered.write_to(&mut encoded, self.format.image_format())?;

            archive.start_file(
                entry_name(original_filename, index + 1, self.format.extension()),
                options,
            )?;
            archive.write_all(encoded.get_ref())?;
        }

        let data = archive.finish()?.into_inner();

        Ok(Converted {
            data,
            mime: self.output_mime(),
            filename: replace_extension(original_filename, "zip"),
        })
    }

    fn tag(&self) -> &'static str {
        self.tag
    }

    fn output_mime(&self) -> &'static str {
        "application/zip"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_names_are_one_based() {
        assert_eq!(entry_name("slides.pdf", 1, "jpg"), "slides_page_1.jpg");
        assert_eq!(entry_name("slides.pdf", 12, "png"), "slides_page_12.png");
    }

    #[test]
    fn test_entry_name_drops_only_final_extension() {
        assert_eq!(entry_name("a.b.pdf", 2, "jpg"), "a.b_page_2.jpg");
    }

    #[test]
    fn test_archive_filename_is_zip() {
        // The archive itself is named after the input, not the page format.
        assert_eq!(replace_extension("slides.pdf", "zip"), "slides.zip");
    }

    #[test]
    #[ignore = "needs a pdfium library on the loader path"]
    fn test_garbage_input_is_a_pdf_error() {
        let result = PdfToImages::png().convert(b"not a pdf", "x.pdf");
        assert!(matches!(result, Err(ConvertError::Pdf(_))));
    }
}
