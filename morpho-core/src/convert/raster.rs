//! Image re-encoding conversions (JPEG <-> PNG)

use super::{replace_extension, Conversion, Converted};
use crate::error::ConvertError;
use image::ImageFormat;
use std::io::Cursor;

/// Re-encode a JPEG upload as PNG
pub struct JpgToPng;

impl Conversion for JpgToPng {
    fn convert(&self, input: &[u8], original_filename: &str) -> Result<Converted, ConvertError> {
        let img = image::load_from_memory(input)?;
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png)?;

        Ok(Converted {
            data: out.into_inner(),
            mime: self.output_mime(),
            filename: replace_extension(original_filename, "png"),
        })
    }

    fn tag(&self) -> &'static str {
        "jpg_to_png"
    }

    fn output_mime(&self) -> &'static str {
        "image/png"
    }
}

/// Re-encode a PNG upload as JPEG
///
/// JPEG has no alpha channel, so the pixel data is flattened to RGB before
/// encoding.
pub struct PngToJpg;

impl Conversion for PngToJpg {
    fn convert(&self, input: &[u8], original_filename: &str) -> Result<Converted, ConvertError> {
        let img = image::load_from_memory(input)?;
        let rgb = image::DynamicImage::ImageRgb8(img.to_rgb8());
        let mut out = Cursor::new(Vec::new());
        rgb.write_to(&mut out, ImageFormat::Jpeg)?;

        Ok(Converted {
            data: out.into_inner(),
            mime: self.output_mime(),
            filename: replace_extension(original_filename, "jpg"),
        })
    }

    fn tag(&self) -> &'static str {
        "png_to_jpg"
    }

    fn output_mime(&self) -> &'static str {
        "image/jpeg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

    fn sample_jpeg() -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([200, 40, 40])));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Jpeg).unwrap();
        out.into_inner()
    }

    fn sample_png_with_alpha() -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([0, 120, 0, 128])));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_jpg_to_png() {
        let converted = JpgToPng.convert(&sample_jpeg(), "photo.jpg").unwrap();

        assert_eq!(converted.mime, "image/png");
        assert_eq!(converted.filename, "photo.png");
        assert_eq!(
            image::guess_format(&converted.data).unwrap(),
            ImageFormat::Png
        );
    }

    #[test]
    fn test_png_to_jpg_flattens_alpha() {
        let converted = PngToJpg.convert(&sample_png_with_alpha(), "logo.png").unwrap();

        assert_eq!(converted.mime, "image/jpeg");
        assert_eq!(converted.filename, "logo.jpg");
        assert_eq!(
            image::guess_format(&converted.data).unwrap(),
            ImageFormat::Jpeg
        );
    }

    #[test]
    fn test_garbage_input_is_an_error() {
        let result = JpgToPng.convert(b"definitely not an image", "x.jpg");
        assert!(matches!(result, Err(ConvertError::Image(_))));
    }
}
