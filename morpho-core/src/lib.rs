//! Morpho Core Library
//!
//! This crate provides the conversion dispatch and the ephemeral result
//! store for the Morpho file-conversion service. Every conversion takes an
//! uploaded byte stream plus the original filename and produces output
//! bytes, a MIME type, and a derived output filename.

pub mod convert;
pub mod error;
pub mod store;

pub use convert::{conversion_for_tag, Conversion, Converted, SUPPORTED_TAGS};
pub use error::{ConvertError, Result};
pub use store::ResultStore;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_supported_tag_dispatches() {
        for tag in SUPPORTED_TAGS {
            let conversion = conversion_for_tag(tag);
            assert!(conversion.is_some(), "no conversion for tag {}", tag);
            assert_eq!(conversion.unwrap().tag(), *tag);
        }
    }
}
