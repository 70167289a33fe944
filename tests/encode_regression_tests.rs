//! End-to-end encoding regression tests.
//!
//! Each test drives the public API and checks structural properties of
//! the produced symbols: side lengths, function patterns, capacity
//! boundaries and error reporting.

use rust_qr_gen::encoder::{Encoder, VersionRequest};
use rust_qr_gen::{ECLevel, EncodeError, QrCodeData, Version, encode, encode_with_ec};

fn symbol_size(qr: &QrCodeData) -> usize {
    qr.version().size()
}

#[test]
fn test_standard_side_lengths() {
    // side = 4 * version + 17, quiet zone adds 8
    let qr = encode("HELLO WORLD").unwrap();
    assert_eq!(qr.version(), Version::Standard(1));
    assert_eq!(symbol_size(&qr), 21);
    assert_eq!(qr.size(), 29);

    for v in [1u8, 7, 21, 40] {
        let encoder = Encoder::new().with_version(VersionRequest::Fixed(Version::Standard(v)));
        let qr = encoder.encode("A").unwrap();
        assert_eq!(symbol_size(&qr), 4 * v as usize + 17);
    }
}

#[test]
fn test_micro_side_lengths() {
    // side = 2 * m + 9
    let cases = [("12345", 11), ("1234567890", 13), ("abcdefg", 15), ("abcdefghijklmno", 17)];
    for (payload, expected) in cases {
        let qr = Encoder::new()
            .with_version(VersionRequest::MicroAuto)
            .encode(payload)
            .unwrap();
        assert_eq!(symbol_size(&qr), expected, "payload {payload:?}");
    }
}

#[test]
fn test_quiet_zone_toggle() {
    let with = encode("QUIET").unwrap();
    let without = Encoder::new().without_quiet_zone().encode("QUIET").unwrap();
    assert_eq!(with.size(), without.size() + 8);
    assert!(with.has_quiet_zone());
    assert!(!without.has_quiet_zone());
    // border of the quiet-zone symbol is light
    for i in 0..with.size() {
        assert!(!with.is_dark(i, 0));
        assert!(!with.is_dark(0, i));
        assert!(!with.is_dark(i, with.size() - 1));
        assert!(!with.is_dark(with.size() - 1, i));
    }
}

#[test]
fn test_finder_patterns_present() {
    let qr = Encoder::new().without_quiet_zone().encode("A05").unwrap();
    let size = qr.size();
    assert_eq!(size, 21);
    // center and corner of each finder are dark, the ring is light
    for (left, top) in [(0, 0), (size - 7, 0), (0, size - 7)] {
        assert!(qr.is_dark(left + 3, top + 3));
        assert!(qr.is_dark(left, top));
        assert!(!qr.is_dark(left + 1, top + 1));
    }
    // dark module
    assert!(qr.is_dark(8, size - 8));
    // timing pattern alternates between the finders
    for i in 8..size - 8 {
        assert_eq!(qr.is_dark(i, 6), i % 2 == 0);
        assert_eq!(qr.is_dark(6, i), i % 2 == 0);
    }
}

#[test]
fn test_a05_at_level_q() {
    // "A05" at 1-Q: a single 3-character alphanumeric segment, codewords
    // 20 19 C2 14 00 EC 11 EC 11 EC 11 EC 11, mask pattern 0. Pinned
    // module by module so any placement or mask regression shows up.
    let expected = [
        "#######.##.#..#######",
        "#.....#.##..#.#.....#",
        "#.###.#.#.#.#.#.###.#",
        "#.###.#.#...#.#.###.#",
        "#.###.#.#####.#.###.#",
        "#.....#.......#.....#",
        "#######.#.#.#.#######",
        "........#####........",
        ".##.#.##..###.#.#####",
        "#....#....#...#..#.##",
        "..##.###.###....###.#",
        "##...#.###.#..#....#.",
        ".##..##.#.#...#.#.##.",
        "........#..#.#.#.#...",
        "#######.#.##.###..#..",
        "#.....#..#..##.###...",
        "#.###.#.###.####..#.#",
        "#.###.#..#....#...##.",
        "#.###.#.###.#...#...#",
        "#.....#.#.#...#...###",
        "#######..#..#.#.#.#.#",
    ];
    let qr = Encoder::new()
        .with_ec_level(ECLevel::Q)
        .without_quiet_zone()
        .encode("A05")
        .unwrap();
    assert_eq!(qr.version(), Version::Standard(1));
    assert_eq!(qr.size(), 21);
    for (y, row) in expected.iter().enumerate() {
        for (x, c) in row.bytes().enumerate() {
            assert_eq!(
                qr.is_dark(x, y),
                c == b'#',
                "module mismatch at ({x},{y})"
            );
        }
    }
    // quiet-zone variant grows by the 4-module border on every side
    let padded = encode_with_ec("A05", ECLevel::Q).unwrap();
    assert_eq!(padded.size(), 29);
    for (y, row) in expected.iter().enumerate() {
        for (x, c) in row.bytes().enumerate() {
            assert_eq!(padded.is_dark(x + 4, y + 4), c == b'#');
        }
    }
}

#[test]
fn test_capacity_boundaries_numeric() {
    // published numeric capacities at EC level M
    let v1 = "1".repeat(34);
    assert_eq!(encode(&v1).unwrap().version(), Version::Standard(1));
    let v2 = "1".repeat(35);
    assert_eq!(encode(&v2).unwrap().version(), Version::Standard(2));
}

#[test]
fn test_capacity_boundaries_byte() {
    // 2953 bytes is the version 40-L byte capacity
    let max = "a".repeat(2953);
    let qr = encode_with_ec(&max, ECLevel::L).unwrap();
    assert_eq!(qr.version(), Version::Standard(40));

    let over = "a".repeat(2954);
    let err = encode_with_ec(&over, ECLevel::L).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::DataTooLong {
            max_capacity: 2953,
            ..
        }
    ));
}

#[test]
fn test_micro_overflow_reports_m4_capacity() {
    // M4-L byte capacity is 15
    let err = Encoder::new()
        .with_version(VersionRequest::MicroAuto)
        .encode(&"a".repeat(16))
        .unwrap_err();
    assert!(matches!(
        err,
        EncodeError::DataTooLong {
            ec_level: ECLevel::L,
            max_capacity: 15,
            ..
        }
    ));
}

#[test]
fn test_invalid_fixed_version() {
    let err = Encoder::new()
        .with_version(VersionRequest::Fixed(Version::Standard(41)))
        .encode("A")
        .unwrap_err();
    assert_eq!(err, EncodeError::InvalidVersion(41));
}

#[test]
fn test_higher_ec_grows_symbol() {
    let text = "ERROR CORRECTION LEVELS";
    let low = encode_with_ec(text, ECLevel::L).unwrap();
    let high = encode_with_ec(text, ECLevel::H).unwrap();
    assert!(high.version().number() >= low.version().number());
}

#[test]
fn test_binary_payload_roundtrip_structure() {
    let data: Vec<u8> = (0u8..=255).collect();
    let qr = Encoder::new().encode_binary(&data).unwrap();
    // 256 bytes of byte mode need at least version 9 at EC level M
    assert!(qr.version().number() >= 9);
    assert_eq!(symbol_size(&qr), 4 * qr.version().number() as usize + 17);
}

#[test]
fn test_dark_count_within_bounds() {
    // masking keeps the dark proportion away from the extremes
    let qr = Encoder::new().without_quiet_zone().encode("BALANCE 42").unwrap();
    let total = qr.size() * qr.size();
    let dark = qr.dark_module_count();
    assert!(dark > total / 5 && dark < total * 4 / 5);
}

#[test]
fn test_micro_quiet_zone_width() {
    let qr = Encoder::new()
        .with_version(VersionRequest::MicroAuto)
        .encode("1")
        .unwrap();
    assert_eq!(qr.version(), Version::Micro(1));
    assert_eq!(qr.size(), 11 + 8);
}
