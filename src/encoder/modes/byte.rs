//! Byte mode segment writer (Mode 0100)
//!
//! 8 bits per byte. Bytes are ISO-8859-1 by default; UTF-8 payloads are
//! declared through an ECI header (see [`crate::models::EciMode`]).

use crate::encoder::bitstream::BitBuffer;

/// Payload bit length for a byte count, headers excluded
pub fn payload_bits(bytes: usize) -> usize {
    bytes * 8
}

/// Encode text as ISO-8859-1, or `None` when a character falls outside
/// the Latin-1 range
pub fn encode_latin1(text: &str) -> Option<Vec<u8>> {
    text.chars()
        .map(|c| {
            let cp = c as u32;
            if cp <= 0xFF { Some(cp as u8) } else { None }
        })
        .collect()
}

/// Write raw bytes into the bit buffer
pub fn write(data: &[u8], buf: &mut BitBuffer) {
    for &b in data {
        buf.append_bits(b as u32, 8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_bits() {
        assert_eq!(payload_bits(0), 0);
        assert_eq!(payload_bits(7), 56);
    }

    #[test]
    fn test_latin1() {
        assert_eq!(encode_latin1("abc"), Some(b"abc".to_vec()));
        assert_eq!(encode_latin1("caf\u{e9}"), Some(vec![0x63, 0x61, 0x66, 0xE9]));
        assert_eq!(encode_latin1("\u{2603}"), None); // snowman is not Latin-1
    }

    #[test]
    fn test_write() {
        let mut buf = BitBuffer::new();
        write(&[0x48, 0x69], &mut buf);
        assert_eq!(buf.len(), 16);
        assert_eq!(buf.as_bytes(), &[0x48, 0x69]);
    }
}
