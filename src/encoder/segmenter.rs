//! Mode-switch optimized segmentation (ISO/IEC 18004 Annex J.2).
//!
//! Scans Latin-1 input left to right and partitions it into a sequence of
//! numeric/alphanumeric/byte segments that minimizes total bit length.
//! Short runs of a stricter mode stay in the current mode because the
//! mode-switch header overhead would exceed the savings; the run-length
//! thresholds vary with the version band (1-9, 10-26, 27-40) since header
//! widths grow with the version.

use super::modes::Segment;
use super::modes::alphanumeric::char_value;
use crate::models::EciMode;

// Look-ahead thresholds per version band. Annex J.2 exclusive-subset rules.
const INIT_ALNUM_BEFORE_BYTE: [usize; 3] = [6, 7, 8];
const INIT_DIGIT_BEFORE_BYTE: [usize; 3] = [4, 4, 5];
const INIT_DIGIT_BEFORE_ALNUM: [usize; 3] = [7, 8, 9];
const BYTE_TO_NUMERIC: [usize; 3] = [6, 8, 9];
const BYTE_TO_ALNUM: [usize; 3] = [11, 15, 16];
const ALNUM_TO_NUMERIC: [usize; 3] = [13, 15, 17];

/// Exclusive character class, unlike the nested mode alphabets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Digit,
    /// Alphanumeric but not a digit
    Alnum,
    Byte,
}

fn class_of(b: u8) -> Class {
    if b.is_ascii_digit() {
        Class::Digit
    } else if char_value(b).is_some() {
        Class::Alnum
    } else {
        Class::Byte
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanMode {
    Numeric,
    Alphanumeric,
    Byte,
}

/// Length of the run of digits starting at `i`
fn digit_run(data: &[u8], i: usize) -> usize {
    data[i..].iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Length of the run of alphanumeric-class characters (digits included)
/// starting at `i`
fn alnum_run(data: &[u8], i: usize) -> usize {
    data[i..]
        .iter()
        .take_while(|&&b| class_of(b) != Class::Byte)
        .count()
}

/// Mode to start scanning in, selected by look-ahead from position `i`
fn initial_mode(data: &[u8], i: usize, band: usize) -> ScanMode {
    match class_of(data[i]) {
        Class::Byte => ScanMode::Byte,
        Class::Alnum => {
            let run = alnum_run(data, i);
            let followed_by_byte = i + run < data.len();
            if followed_by_byte && run < INIT_ALNUM_BEFORE_BYTE[band] {
                ScanMode::Byte
            } else {
                ScanMode::Alphanumeric
            }
        }
        Class::Digit => {
            let run = digit_run(data, i);
            match data.get(i + run).map(|&b| class_of(b)) {
                Some(Class::Byte) if run < INIT_DIGIT_BEFORE_BYTE[band] => ScanMode::Byte,
                Some(Class::Alnum) if run < INIT_DIGIT_BEFORE_ALNUM[band] => {
                    ScanMode::Alphanumeric
                }
                _ => ScanMode::Numeric,
            }
        }
    }
}

/// Partition `data` (Latin-1 bytes) into a minimal segment sequence for
/// the given version band
pub fn optimize(data: &[u8], band: usize) -> Vec<Segment> {
    assert!(band < 3, "version band out of range: {band}");
    if data.is_empty() {
        return Vec::new();
    }

    let mut segments: Vec<Segment> = Vec::new();
    let mut start = 0;
    let mut i = 0;
    let mut mode = initial_mode(data, 0, band);

    let flush = |segments: &mut Vec<Segment>, mode: ScanMode, start: &mut usize, end: usize| {
        if end > *start {
            segments.push(make_segment(mode, &data[*start..end]));
            *start = end;
        }
    };

    while i < data.len() {
        let class = class_of(data[i]);
        match mode {
            ScanMode::Numeric => match class {
                Class::Digit => i += 1,
                Class::Alnum => {
                    flush(&mut segments, mode, &mut start, i);
                    mode = ScanMode::Alphanumeric;
                }
                Class::Byte => {
                    flush(&mut segments, mode, &mut start, i);
                    mode = ScanMode::Byte;
                }
            },
            ScanMode::Alphanumeric => match class {
                Class::Alnum => i += 1,
                Class::Digit => {
                    let run = digit_run(data, i);
                    if run >= ALNUM_TO_NUMERIC[band] {
                        flush(&mut segments, mode, &mut start, i);
                        mode = ScanMode::Numeric;
                    } else {
                        i += run;
                    }
                }
                Class::Byte => {
                    flush(&mut segments, mode, &mut start, i);
                    mode = ScanMode::Byte;
                }
            },
            ScanMode::Byte => match class {
                Class::Byte => i += 1,
                Class::Digit => {
                    let run = digit_run(data, i);
                    if run >= BYTE_TO_NUMERIC[band] {
                        flush(&mut segments, mode, &mut start, i);
                        mode = ScanMode::Numeric;
                    } else if alnum_run(data, i) >= BYTE_TO_ALNUM[band] {
                        flush(&mut segments, mode, &mut start, i);
                        mode = ScanMode::Alphanumeric;
                    } else {
                        i += run;
                    }
                }
                Class::Alnum => {
                    if alnum_run(data, i) >= BYTE_TO_ALNUM[band] {
                        flush(&mut segments, mode, &mut start, i);
                        mode = ScanMode::Alphanumeric;
                    } else {
                        // Advance one character only: a numeric run long
                        // enough to leave byte mode may start inside this
                        // alphanumeric run
                        i += 1;
                    }
                }
            },
        }
    }
    flush(&mut segments, mode, &mut start, data.len());
    segments
}

fn make_segment(mode: ScanMode, data: &[u8]) -> Segment {
    match mode {
        ScanMode::Numeric => {
            Segment::Numeric(String::from_utf8(data.to_vec()).expect("digit run is ASCII"))
        }
        ScanMode::Alphanumeric => {
            Segment::Alphanumeric(String::from_utf8(data.to_vec()).expect("alnum run is ASCII"))
        }
        ScanMode::Byte => Segment::Byte {
            data: data.to_vec(),
            eci: EciMode::Default,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::modes::{Mode, total_bits};
    use crate::models::Version;

    fn modes_of(segments: &[Segment]) -> Vec<Mode> {
        segments.iter().map(|s| s.mode()).collect()
    }

    #[test]
    fn test_single_class_inputs() {
        assert_eq!(modes_of(&optimize(b"1234567890", 0)), vec![Mode::Numeric]);
        assert_eq!(
            modes_of(&optimize(b"HELLO WORLD", 0)),
            vec![Mode::Alphanumeric]
        );
        assert_eq!(modes_of(&optimize(b"hello world", 0)), vec![Mode::Byte]);
        assert!(optimize(b"", 0).is_empty());
    }

    #[test]
    fn test_short_digit_run_stays_in_byte() {
        // A 3-digit run inside byte data is cheaper left in byte mode
        let segments = optimize(b"hello123world", 0);
        assert_eq!(modes_of(&segments), vec![Mode::Byte]);
    }

    #[test]
    fn test_long_digit_run_switches_to_numeric() {
        let segments = optimize(b"hello12345678901234", 0);
        assert_eq!(modes_of(&segments), vec![Mode::Byte, Mode::Numeric]);
        match &segments[1] {
            Segment::Numeric(text) => assert_eq!(text, "12345678901234"),
            other => panic!("expected numeric segment, got {other:?}"),
        }
    }

    #[test]
    fn test_threshold_is_band_dependent() {
        // 7 digits: enough to leave byte mode in band 0 (threshold 6),
        // not in band 1 (threshold 8)
        let payload = b"hello1234567";
        assert_eq!(
            modes_of(&optimize(payload, 0)),
            vec![Mode::Byte, Mode::Numeric]
        );
        assert_eq!(modes_of(&optimize(payload, 1)), vec![Mode::Byte]);
    }

    #[test]
    fn test_initial_short_alnum_before_byte() {
        // "ABC" run of 3 < 6 followed by bytes: start in byte mode
        assert_eq!(modes_of(&optimize(b"ABCdef", 0)), vec![Mode::Byte]);
        // long enough alnum run earns its own segment
        assert_eq!(
            modes_of(&optimize(b"ABCDEFGHIJKLMNOPdef", 0)),
            vec![Mode::Alphanumeric, Mode::Byte]
        );
    }

    #[test]
    fn test_initial_digits_before_alnum() {
        // 4 digits < 7 followed by alphanumeric: start alphanumeric
        assert_eq!(
            modes_of(&optimize(b"1234ABCDEF", 0)),
            vec![Mode::Alphanumeric]
        );
        // 9 digits >= 7: numeric segment first
        assert_eq!(
            modes_of(&optimize(b"123456789ABCDEF", 0)),
            vec![Mode::Numeric, Mode::Alphanumeric]
        );
    }

    #[test]
    fn test_optimized_never_longer_than_single_mode() {
        let version = Version::Standard(2);
        for payload in [
            &b"Hello 1234567890 WORLD xyz"[..],
            b"4912345678904",
            b"http://example.com/path?id=1234567890123",
            b"ABCDEF123456abcdef",
        ] {
            let optimized = optimize(payload, 0);
            let single = vec![Segment::Byte {
                data: payload.to_vec(),
                eci: EciMode::Default,
            }];
            assert!(
                total_bits(&optimized, version) <= total_bits(&single, version),
                "optimized segmentation regressed for {payload:?}"
            );
        }
    }
}
