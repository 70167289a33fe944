//! Alphanumeric mode segment writer (Mode 0010)
//!
//! Alphabet: digits, A-Z, space and `$%*+-./:`. Pairs of characters pack
//! into 11 bits (value = first * 45 + second), a trailing single character
//! into 6 bits.

use crate::encoder::bitstream::BitBuffer;

/// Value of a character in the 45-character alphanumeric table, or `None`
/// when it is outside the alphabet
pub fn char_value(c: u8) -> Option<u32> {
    match c {
        b'0'..=b'9' => Some((c - b'0') as u32),
        b'A'..=b'Z' => Some((c - b'A') as u32 + 10),
        b' ' => Some(36),
        b'$' => Some(37),
        b'%' => Some(38),
        b'*' => Some(39),
        b'+' => Some(40),
        b'-' => Some(41),
        b'.' => Some(42),
        b'/' => Some(43),
        b':' => Some(44),
        _ => None,
    }
}

/// Check that every character is in the alphanumeric alphabet
pub fn is_alphanumeric(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| char_value(b).is_some())
}

/// Payload bit length for a character count, headers excluded
pub fn payload_bits(chars: usize) -> usize {
    (chars / 2) * 11 + (chars % 2) * 6
}

/// Write the characters of `text` into the bit buffer.
/// Panics on out-of-alphabet input; callers validate first.
pub fn write(text: &str, buf: &mut BitBuffer) {
    for pair in text.as_bytes().chunks(2) {
        let first = char_value(pair[0]).expect("character outside alphanumeric alphabet");
        if pair.len() == 2 {
            let second = char_value(pair[1]).expect("character outside alphanumeric alphabet");
            buf.append_bits(first * 45 + second, 11);
        } else {
            buf.append_bits(first, 6);
        }
    }
}
