//! Image -> PDF composition
//!
//! The upload is decoded, flattened to RGB, and embedded as a DCT-encoded
//! image XObject on a single page scaled to fit A4.

use super::{replace_extension, Conversion, Converted};
use crate::error::ConvertError;
use image::ImageFormat;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref};
use std::io::Cursor;

// A4 in PDF points (72 DPI)
const A4_WIDTH: f32 = 595.0;
const A4_HEIGHT: f32 = 842.0;

/// Wrap a JPEG or PNG upload in a single-page PDF
pub struct ImageToPdf {
    tag: &'static str,
}

impl ImageToPdf {
    pub fn jpg() -> Self {
        Self { tag: "jpg_to_pdf" }
    }

    pub fn png() -> Self {
        Self { tag: "png_to_pdf" }
    }
}

/// Fit the image into an A4 page, preserving its aspect ratio.
fn page_size(img_width: u32, img_height: u32) -> (f32, f32) {
    let img_ratio = img_width as f32 / img_height as f32;
    let a4_ratio = A4_WIDTH / A4_HEIGHT;

    if img_ratio > a4_ratio {
        (A4_WIDTH, A4_WIDTH / img_ratio)
    } else {
        (A4_HEIGHT * img_ratio, A4_HEIGHT)
    }
}

fn compose_pdf(jpeg_data: &[u8], width: u32, height: u32) -> Vec<u8> {
    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let image_id = Ref::new(4);
    let content_id = Ref::new(5);
    let image_name = Name(b"Im1");

    let (page_width, page_height) = page_size(width, height);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, page_width, page_height));
    page.parent(page_tree_id);
    page.contents(content_id);
    page.resources().x_objects().pair(image_name, image_id);
    page.finish();

    let mut xobject = pdf.image_xobject(image_id, jpeg_data);
    xobject.filter(Filter::DctDecode);
    xobject.width(width as i32);
    xobject.height(height as i32);
    xobject.color_space().device_rgb();
    xobject.bits_per_component(8);
    xobject.finish();

    let mut content = Content::new();
    content.save_state();
    content.transform([page_width, 0.0, 0.0, page_height, 0.0, 0.0]);
    content.x_object(image_name);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    pdf.finish()
}

impl Conversion for ImageToPdf {
    fn convert(&self, input: &[u8], original_filename: &str) -> Result<Converted, ConvertError> {
        let img = image::load_from_memory(input)?;
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();

        // DCTDecode embeds the JPEG stream directly, so re-encode once here.
        let mut jpeg = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(rgb).write_to(&mut jpeg, ImageFormat::Jpeg)?;

        Ok(Converted {
            data: compose_pdf(jpeg.get_ref(), width, height),
            mime: self.output_mime(),
            filename: replace_extension(original_filename, "pdf"),
        })
    }

    fn tag(&self) -> &'static str {
        self.tag
    }

    fn output_mime(&self) -> &'static str {
        "application/pdf"
    }
}
