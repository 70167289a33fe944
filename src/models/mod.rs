pub mod matrix;
pub mod qr_code;

pub use matrix::BitMatrix;
pub use qr_code::{ECLevel, EciMode, MaskPattern, QrCodeData, Version, QUIET_ZONE_WIDTH};
