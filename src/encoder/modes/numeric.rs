//! Numeric mode segment writer (Mode 0001)
//!
//! Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits.

use crate::encoder::bitstream::BitBuffer;

/// Check that every character is a decimal digit
pub fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Payload bit length for a digit count, headers excluded
pub fn payload_bits(chars: usize) -> usize {
    (chars / 3) * 10
        + match chars % 3 {
            0 => 0,
            1 => 4,
            _ => 7,
        }
}

/// Write the digits of `text` into the bit buffer.
/// Panics on non-digit input; callers validate the alphabet first.
pub fn write(text: &str, buf: &mut BitBuffer) {
    let digits = text.as_bytes();
    for group in digits.chunks(3) {
        let mut value: u32 = 0;
        for &d in group {
            assert!(d.is_ascii_digit(), "non-digit in numeric segment");
            value = value * 10 + (d - b'0') as u32;
        }
        let bits = match group.len() {
            3 => 10,
            2 => 7,
            _ => 4,
        };
        buf.append_bits(value, bits);
    }
}
