//! QR code data mode segment builders
//!
//! This module contains the segment writers for the supported data modes:
//! - Numeric: Efficient encoding for digits (0-9)
//! - Alphanumeric: Digits, A-Z, space and `$%*+-./:`
//! - Byte: 8-bit data (ISO-8859-1 by default, UTF-8 behind an ECI header)
//!
//! Kanji mode is not supported.

pub mod alphanumeric;
pub mod byte;
pub mod numeric;

use super::bitstream::BitBuffer;
use crate::models::{EciMode, Version};

/// Mode indicator value for an ECI header in standard symbols (0111)
const ECI_MODE_INDICATOR: u32 = 0b0111;

/// Bit cost of an ECI header: 4-bit mode indicator + 8-bit designator
const ECI_HEADER_BITS: usize = 12;

/// Data encoding mode, ordered from most to least restrictive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Mode {
    /// Digits 0-9, 3 characters per 10 bits
    Numeric,
    /// The 45-character alphanumeric set, 2 characters per 11 bits
    Alphanumeric,
    /// Raw 8-bit data
    Byte,
}

impl Mode {
    /// Most restrictive mode whose alphabet covers every character
    pub fn classify(text: &str) -> Mode {
        if numeric::is_numeric(text) {
            Mode::Numeric
        } else if alphanumeric::is_alphanumeric(text) {
            Mode::Alphanumeric
        } else {
            Mode::Byte
        }
    }

    /// Length of the mode indicator in bits
    pub fn indicator_bits(&self, version: Version) -> usize {
        match version {
            Version::Standard(_) => 4,
            Version::Micro(m) => m as usize - 1,
        }
    }

    /// Value of the mode indicator
    pub fn indicator_value(&self, version: Version) -> u32 {
        match version {
            Version::Standard(_) => match self {
                Mode::Numeric => 0b0001,
                Mode::Alphanumeric => 0b0010,
                Mode::Byte => 0b0100,
            },
            Version::Micro(_) => match self {
                Mode::Numeric => 0,
                Mode::Alphanumeric => 1,
                Mode::Byte => 2,
            },
        }
    }

    /// Width of the character count indicator in bits; depends on the
    /// version band for standard symbols and on the M-version for Micro
    pub fn count_bits(&self, version: Version) -> usize {
        match version {
            Version::Standard(_) => match self {
                Mode::Numeric => [10, 12, 14][version.band()],
                Mode::Alphanumeric => [9, 11, 13][version.band()],
                Mode::Byte => [8, 16, 16][version.band()],
            },
            Version::Micro(m) => match self {
                Mode::Numeric => m as usize + 2,
                Mode::Alphanumeric => m as usize + 1,
                Mode::Byte => m as usize + 1,
            },
        }
    }

    /// Whether this mode exists at the given version (M1 is numeric-only,
    /// M2 adds alphanumeric, M3 adds byte)
    pub fn available_in(&self, version: Version) -> bool {
        match version {
            Version::Standard(_) => true,
            Version::Micro(m) => match self {
                Mode::Numeric => true,
                Mode::Alphanumeric => m >= 2,
                Mode::Byte => m >= 3,
            },
        }
    }
}

/// One self-describing bit segment: mode indicator + count indicator +
/// payload bits. A payload is an ordered sequence of segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A run of digits
    Numeric(String),
    /// A run of characters from the 45-character alphanumeric set
    Alphanumeric(String),
    /// Raw bytes, optionally preceded by an ECI header declaring their
    /// character set
    Byte {
        /// The payload bytes
        data: Vec<u8>,
        /// ECI character set; `None` and `Default` emit no header
        eci: EciMode,
    },
}

impl Segment {
    /// The segment's encoding mode
    pub fn mode(&self) -> Mode {
        match self {
            Segment::Numeric(_) => Mode::Numeric,
            Segment::Alphanumeric(_) => Mode::Alphanumeric,
            Segment::Byte { .. } => Mode::Byte,
        }
    }

    /// Value written into the count indicator: characters for numeric and
    /// alphanumeric segments, bytes for byte segments
    pub fn char_count(&self) -> usize {
        match self {
            Segment::Numeric(text) | Segment::Alphanumeric(text) => text.len(),
            Segment::Byte { data, .. } => data.len(),
        }
    }

    /// Total bit length of this segment at the given version, headers
    /// included. Computable without writing, so version selection can run
    /// before serialization (two-pass encode).
    pub fn bit_len(&self, version: Version) -> usize {
        let mode = self.mode();
        let mut bits = mode.indicator_bits(version) + mode.count_bits(version);
        bits += match self {
            Segment::Numeric(text) => numeric::payload_bits(text.len()),
            Segment::Alphanumeric(text) => alphanumeric::payload_bits(text.len()),
            Segment::Byte { data, eci } => {
                let header = match (version, eci.designator()) {
                    (Version::Standard(_), Some(_)) => ECI_HEADER_BITS,
                    _ => 0,
                };
                header + byte::payload_bits(data.len())
            }
        };
        bits
    }

    /// Serialize this segment into the bit buffer
    pub fn write(&self, buf: &mut BitBuffer, version: Version) {
        let mode = self.mode();
        if let Segment::Byte { eci, .. } = self {
            if let (Version::Standard(_), Some(designator)) = (version, eci.designator()) {
                buf.append_bits(ECI_MODE_INDICATOR, 4);
                buf.append_bits(designator as u32, 8);
            }
        }
        buf.append_bits(mode.indicator_value(version), mode.indicator_bits(version));
        buf.append_bits(self.char_count() as u32, mode.count_bits(version));
        match self {
            Segment::Numeric(text) => numeric::write(text, buf),
            Segment::Alphanumeric(text) => alphanumeric::write(text, buf),
            Segment::Byte { data, .. } => byte::write(data, buf),
        }
    }
}

/// Total bit length of a segment sequence at a version
pub fn total_bits(segments: &[Segment], version: Version) -> usize {
    segments.iter().map(|s| s.bit_len(version)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Mode::classify("0123456789"), Mode::Numeric);
        assert_eq!(Mode::classify("A05"), Mode::Alphanumeric);
        assert_eq!(Mode::classify("HELLO WORLD"), Mode::Alphanumeric);
        assert_eq!(Mode::classify("Hello"), Mode::Byte);
        assert_eq!(Mode::classify("HTTP://X.COM"), Mode::Alphanumeric);
    }

    #[test]
    fn test_count_bits_by_band() {
        let mode = Mode::Numeric;
        assert_eq!(mode.count_bits(Version::Standard(9)), 10);
        assert_eq!(mode.count_bits(Version::Standard(10)), 12);
        assert_eq!(mode.count_bits(Version::Standard(27)), 14);
        assert_eq!(Mode::Byte.count_bits(Version::Standard(9)), 8);
        assert_eq!(Mode::Byte.count_bits(Version::Standard(10)), 16);
        assert_eq!(Mode::Numeric.count_bits(Version::Micro(1)), 3);
        assert_eq!(Mode::Byte.count_bits(Version::Micro(4)), 5);
    }

    #[test]
    fn test_micro_mode_availability() {
        assert!(Mode::Numeric.available_in(Version::Micro(1)));
        assert!(!Mode::Alphanumeric.available_in(Version::Micro(1)));
        assert!(Mode::Alphanumeric.available_in(Version::Micro(2)));
        assert!(!Mode::Byte.available_in(Version::Micro(2)));
        assert!(Mode::Byte.available_in(Version::Micro(3)));
    }

    #[test]
    fn test_segment_bit_len() {
        // 4 (mode) + 10 (count) + 20 (6 digits)
        let seg = Segment::Numeric("012345".into());
        assert_eq!(seg.bit_len(Version::Standard(1)), 34);

        // "A05": 4 + 9 + 11 + 6
        let seg = Segment::Alphanumeric("A05".into());
        assert_eq!(seg.bit_len(Version::Standard(1)), 30);

        // ECI header adds 12 bits on standard symbols only
        let plain = Segment::Byte {
            data: b"ab".to_vec(),
            eci: EciMode::Default,
        };
        let utf8 = Segment::Byte {
            data: b"ab".to_vec(),
            eci: EciMode::Utf8,
        };
        assert_eq!(plain.bit_len(Version::Standard(1)), 28);
        assert_eq!(utf8.bit_len(Version::Standard(1)), 40);
        assert_eq!(utf8.bit_len(Version::Micro(4)), 24);
    }

    #[test]
    fn test_segment_write_alphanumeric() {
        // "A05" at version 1: 0010 000000011 then "A0" = 10*45+0 = 450,
        // then "5" = 5
        let seg = Segment::Alphanumeric("A05".into());
        let mut buf = BitBuffer::new();
        seg.write(&mut buf, Version::Standard(1));
        assert_eq!(buf.len(), 30);
        let bits: String = (0..buf.len())
            .map(|i| if buf.bit(i) { '1' } else { '0' })
            .collect();
        assert_eq!(bits, "001000000011".to_owned() + "00111000010" + "000101");
    }

    #[test]
    fn test_micro_segment_write() {
        // M2 numeric "123": indicator 1 bit (0), count 4 bits, payload 10
        let seg = Segment::Numeric("123".into());
        assert_eq!(seg.bit_len(Version::Micro(2)), 15);
        let mut buf = BitBuffer::new();
        seg.write(&mut buf, Version::Micro(2));
        assert_eq!(buf.len(), 15);
        let bits: String = (0..buf.len())
            .map(|i| if buf.bit(i) { '1' } else { '0' })
            .collect();
        assert_eq!(bits, "0".to_owned() + "0011" + "0001111011");
    }

    #[test]
    fn test_total_bits_recomputed_per_band() {
        let segs = vec![Segment::Byte {
            data: vec![0u8; 100],
            eci: EciMode::Default,
        }];
        assert_eq!(total_bits(&segs, Version::Standard(9)), 812);
        assert_eq!(total_bits(&segs, Version::Standard(10)), 820);
    }

    #[test]
    fn test_m1_headerless_numeric() {
        // M1 has no mode indicator, a 3-bit count indicator
        let seg = Segment::Numeric("12345".into());
        assert_eq!(seg.bit_len(Version::Micro(1)), 3 + 17);
    }
}
