//! BCH-protected format and version information strings.
//!
//! Format information is 5 data bits (EC level + mask for standard
//! symbols, symbol number + mask for Micro) extended to 15 bits with a
//! BCH(15,5) remainder over generator 0x537, then XORed with a fixed mask
//! so the all-zero word never appears. Version information (versions 7+)
//! is 6 data bits extended to 18 with a BCH(18,6) remainder over 0x1F25.

use crate::models::{ECLevel, MaskPattern};

/// XOR mask applied to standard format information
const FORMAT_MASK: u16 = 0x5412;
/// XOR mask applied to Micro format information
const MICRO_FORMAT_MASK: u16 = 0x4445;

/// BCH(15,5) extension of 5 data bits with generator 0x537
fn bch_15_5(data: u16) -> u16 {
    debug_assert!(data >> 5 == 0);
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * 0x537);
    }
    (data << 10) | rem
}

/// The 15-bit format word for a standard symbol
pub fn format_bits(ec_level: ECLevel, mask: MaskPattern) -> u16 {
    let data = ((ec_level.format_bits() as u16) << 3) | mask.index() as u16;
    bch_15_5(data) ^ FORMAT_MASK
}

/// The 15-bit format word for a Micro symbol: 3-bit symbol number plus the
/// 2-bit Micro mask reference
pub fn micro_format_bits(symbol_number: u8, micro_mask_index: u8) -> u16 {
    debug_assert!(symbol_number < 8 && micro_mask_index < 4);
    let data = ((symbol_number as u16) << 2) | micro_mask_index as u16;
    bch_15_5(data) ^ MICRO_FORMAT_MASK
}

/// The 18-bit version word for standard versions 7-40
pub fn version_bits(version: u8) -> u32 {
    assert!((7..=40).contains(&version), "no version info below 7");
    let mut rem = version as u32;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * 0x1F25);
    }
    ((version as u32) << 12) | rem
}
