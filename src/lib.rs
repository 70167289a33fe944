//! rust_qr_gen - QR and Micro QR code generation library
//!
//! A pure Rust encoder for QR Code and Micro QR Code symbols: mixed-mode
//! segmentation, Reed-Solomon error correction, module placement and mask
//! selection, producing a module matrix ready for rendering.
//!
//! ```
//! let qr = rust_qr_gen::encode("HELLO WORLD").unwrap();
//! assert_eq!(qr.size(), 29); // version 1 plus the quiet zone
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// The encoding pipeline (segmentation, error correction, placement, masking)
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (QrCodeData, BitMatrix, Version, etc.)
pub mod models;

pub use encoder::{Encoder, VersionRequest};
pub use error::EncodeError;
pub use models::{BitMatrix, ECLevel, EciMode, MaskPattern, QrCodeData, Version};

/// Encode text into the smallest standard QR symbol at EC level M
///
/// # Arguments
/// * `text` - The payload; non-Latin-1 text is encoded as UTF-8
///
/// # Returns
/// The finished symbol with its quiet zone
pub fn encode(text: &str) -> Result<QrCodeData, EncodeError> {
    Encoder::new().encode(text)
}

/// Encode text into the smallest standard QR symbol at a chosen EC level
pub fn encode_with_ec(text: &str, ec_level: ECLevel) -> Result<QrCodeData, EncodeError> {
    Encoder::new().with_ec_level(ec_level).encode(text)
}
