//! Conversion tests for morpho-core
//!
//! These tests drive conversions through the public dispatch table, the way
//! the server and CLI do, and verify the contract every tag shares: output
//! bytes in the target container, the expected MIME type, and a filename
//! derived from the upload's basename.
//!
//! The pdfium- and LibreOffice-backed tags need external engines and are
//! exercised in their modules behind `#[ignore]`; here they are checked at
//! the dispatch level only.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use morpho_core::{conversion_for_tag, ResultStore, SUPPORTED_TAGS};
use std::io::Cursor;
use std::time::Duration;

fn sample_image(format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 16, Rgb([90, 120, 200])));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).expect("encode sample image");
    out.into_inner()
}

#[test]
fn test_dispatch_covers_exactly_the_supported_tags() {
    assert_eq!(SUPPORTED_TAGS.len(), 8);
    for tag in SUPPORTED_TAGS {
        assert!(conversion_for_tag(tag).is_some(), "missing: {}", tag);
    }
    assert!(conversion_for_tag("bmp_to_tiff").is_none());
}

#[test]
fn test_output_mime_per_tag() {
    let expected = [
        ("jpg_to_png", "image/png"),
        ("png_to_jpg", "image/jpeg"),
        ("jpg_to_pdf", "application/pdf"),
        ("png_to_pdf", "application/pdf"),
        ("word_to_pdf", "application/pdf"),
        (
            "pdf_to_word",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ),
        ("pdf_to_jpg", "application/zip"),
        ("pdf_to_png", "application/zip"),
    ];

    for (tag, mime) in expected {
        let conversion = conversion_for_tag(tag).unwrap();
        assert_eq!(conversion.output_mime(), mime, "tag {}", tag);
    }
}

#[test]
fn test_jpg_to_png_end_to_end() {
    let conversion = conversion_for_tag("jpg_to_png").unwrap();
    let converted = conversion
        .convert(&sample_image(ImageFormat::Jpeg), "holiday.jpg")
        .unwrap();

    assert_eq!(converted.filename, "holiday.png");
    assert_eq!(converted.mime, "image/png");
    assert_eq!(
        image::guess_format(&converted.data).unwrap(),
        ImageFormat::Png
    );
}

#[test]
fn test_png_to_jpg_end_to_end() {
    let conversion = conversion_for_tag("png_to_jpg").unwrap();
    let converted = conversion
        .convert(&sample_image(ImageFormat::Png), "diagram.png")
        .unwrap();

    assert_eq!(converted.filename, "diagram.jpg");
    assert_eq!(
        image::guess_format(&converted.data).unwrap(),
        ImageFormat::Jpeg
    );
}

#[test]
fn test_image_to_pdf_end_to_end() {
    for (tag, input_format, name) in [
        ("jpg_to_pdf", ImageFormat::Jpeg, "scan.jpg"),
        ("png_to_pdf", ImageFormat::Png, "scan.png"),
    ] {
        let conversion = conversion_for_tag(tag).unwrap();
        let converted = conversion
            .convert(&sample_image(input_format), name)
            .unwrap();

        assert_eq!(converted.filename, "scan.pdf", "tag {}", tag);
        assert!(converted.data.starts_with(b"%PDF-"), "tag {}", tag);
    }
}

#[test]
fn test_converted_result_roundtrips_through_the_store() {
    let conversion = conversion_for_tag("jpg_to_png").unwrap();
    let converted = conversion
        .convert(&sample_image(ImageFormat::Jpeg), "photo.jpg")
        .unwrap();

    let store = ResultStore::default();
    let id = store.put(converted.clone());

    let fetched = store.get(&id).expect("fresh entry should be readable");
    assert_eq!(fetched.data, converted.data);
    assert_eq!(fetched.filename, "photo.png");

    // Reads do not consume the entry.
    assert!(store.get(&id).is_some());
}

#[test]
fn test_store_expiry_bounds_result_lifetime() {
    let store = ResultStore::new(Duration::ZERO);
    let conversion = conversion_for_tag("png_to_jpg").unwrap();
    let converted = conversion
        .convert(&sample_image(ImageFormat::Png), "old.png")
        .unwrap();

    let id = store.put(converted);
    assert!(store.get(&id).is_none());
}
