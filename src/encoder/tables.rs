//! QR specification capacity tables.
//!
//! ECC codeword counts and block layouts per (version, EC level), Micro QR
//! capacities, per-mode character capacities, and alignment pattern center
//! coordinates. All values are the published ISO/IEC 18004 constants; data
//! codeword counts for standard symbols are derived from the raw module
//! total rather than tabulated.

use super::modes::Mode;
use crate::models::{ECLevel, Version};

/// Block layout for one (version, EC level) pair
///
/// Blocks come in two groups: `group1_blocks` short blocks of
/// `group1_data_len` data codewords, then `group2_blocks` blocks holding
/// one more. All blocks share `ecc_per_block`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EccInfo {
    /// Total codewords in the symbol (data + ECC)
    pub total_codewords: usize,
    /// Data codewords across all blocks
    pub total_data_codewords: usize,
    /// Usable data bits; equals `total_data_codewords * 8` except for
    /// M1/M3 symbols whose final data codeword is 4 bits
    pub total_data_bits: usize,
    /// ECC codewords per block (generator degree)
    pub ecc_per_block: usize,
    /// Number of short blocks
    pub group1_blocks: usize,
    /// Data codewords per short block
    pub group1_data_len: usize,
    /// Number of long blocks (one extra data codeword each)
    pub group2_blocks: usize,
}

// Tables from the QR Code specification (Model 2).
// Index: [ec_level][version]
const ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    [
        -1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    [
        -1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        -1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        -1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        -1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

// Micro QR capacities. Index: [micro_version - 1][ec_level]; -1 marks an
// unavailable (version, level) pair. M1 carries error detection only and
// is treated as level L.
const MICRO_DATA_BITS: [[i16; 3]; 4] = [
    [20, -1, -1],   // M1
    [40, 32, -1],   // M2
    [84, 68, -1],   // M3
    [128, 112, 80], // M4
];

const MICRO_ECC_CODEWORDS: [[i8; 3]; 4] = [
    [2, -1, -1],  // M1
    [5, 6, -1],   // M2
    [6, 8, -1],   // M3
    [8, 10, 14],  // M4
];

const MICRO_TOTAL_CODEWORDS: [usize; 4] = [5, 10, 17, 24];

/// Total modules available for codewords in a standard symbol
fn num_raw_data_modules(version: u8) -> usize {
    let ver = version as usize;
    let mut result = (16 * ver + 128) * ver + 64;
    if ver >= 2 {
        let numalign = ver / 7 + 2;
        result -= (25 * numalign - 10) * numalign - 55;
        if ver >= 7 {
            result -= 36;
        }
    }
    result
}

/// Check whether an EC level is available for a version. Standard versions
/// accept all four; Micro availability follows the capacity table.
pub fn ec_level_available(version: Version, ec_level: ECLevel) -> bool {
    match version {
        Version::Standard(_) => true,
        Version::Micro(m) => {
            ec_level != ECLevel::H && MICRO_DATA_BITS[m as usize - 1][ec_level.index()] > 0
        }
    }
}

/// Block layout for a (version, EC level) pair.
///
/// Panics when the pair is invalid; callers validate versions and Micro
/// EC availability before reaching the table.
pub fn ecc_info(version: Version, ec_level: ECLevel) -> EccInfo {
    match version {
        Version::Standard(v) => {
            assert!((1..=40).contains(&v), "version out of range: {v}");
            let ecc_per_block = ECC_CODEWORDS_PER_BLOCK[ec_level.index()][v as usize] as usize;
            let num_blocks = NUM_ERROR_CORRECTION_BLOCKS[ec_level.index()][v as usize] as usize;
            let total_codewords = num_raw_data_modules(v) / 8;
            let total_data_codewords = total_codewords - ecc_per_block * num_blocks;
            let group1_blocks = num_blocks - total_codewords % num_blocks;
            let group1_data_len = total_codewords / num_blocks - ecc_per_block;
            EccInfo {
                total_codewords,
                total_data_codewords,
                total_data_bits: total_data_codewords * 8,
                ecc_per_block,
                group1_blocks,
                group1_data_len,
                group2_blocks: num_blocks - group1_blocks,
            }
        }
        Version::Micro(m) => {
            assert!((1..=4).contains(&m), "Micro version out of range: {m}");
            let bits = MICRO_DATA_BITS[m as usize - 1][ec_level.index()];
            assert!(bits > 0, "EC level {ec_level:?} unavailable for M{m}");
            let total_data_bits = bits as usize;
            let ecc_per_block = MICRO_ECC_CODEWORDS[m as usize - 1][ec_level.index()] as usize;
            let total_data_codewords = (total_data_bits + 7) / 8;
            EccInfo {
                total_codewords: MICRO_TOTAL_CODEWORDS[m as usize - 1],
                total_data_codewords,
                total_data_bits,
                ecc_per_block,
                group1_blocks: 1,
                group1_data_len: total_data_codewords,
                group2_blocks: 0,
            }
        }
    }
}

/// Usable data bits at a (version, EC level) pair
pub fn total_data_bits(version: Version, ec_level: ECLevel) -> usize {
    ecc_info(version, ec_level).total_data_bits
}

/// Terminator length in bits: up to 4 zero bits for standard symbols,
/// 3/5/7/9 for M1-M4
pub fn terminator_bits(version: Version) -> usize {
    match version {
        Version::Standard(_) => 4,
        Version::Micro(m) => 2 * m as usize + 1,
    }
}

/// The 3-bit symbol number written into Micro format information
pub fn micro_symbol_number(version: u8, ec_level: ECLevel) -> u8 {
    match (version, ec_level) {
        (1, ECLevel::L) => 0,
        (2, ECLevel::L) => 1,
        (2, ECLevel::M) => 2,
        (3, ECLevel::L) => 3,
        (3, ECLevel::M) => 4,
        (4, ECLevel::L) => 5,
        (4, ECLevel::M) => 6,
        (4, ECLevel::Q) => 7,
        _ => panic!("no Micro symbol number for M{version} at {ec_level:?}"),
    }
}

/// Maximum character capacity for a mode at a (version, EC level) pair
pub fn max_characters(version: Version, ec_level: ECLevel, mode: Mode) -> usize {
    let header = mode.indicator_bits(version) + mode.count_bits(version);
    let bits = total_data_bits(version, ec_level).saturating_sub(header);
    match mode {
        Mode::Numeric => {
            let full = (bits / 10) * 3;
            match bits % 10 {
                0..=3 => full,
                4..=6 => full + 1,
                _ => full + 2,
            }
        }
        Mode::Alphanumeric => {
            let full = (bits / 11) * 2;
            if bits % 11 >= 6 { full + 1 } else { full }
        }
        Mode::Byte => bits / 8,
    }
}

/// Alignment pattern center coordinates for a standard version, in
/// ascending order. Version 1 has none; version 32 is irregular.
pub fn alignment_pattern_positions(version: u8) -> Vec<usize> {
    if version == 1 {
        return Vec::new();
    }
    let num_align = (version / 7 + 2) as usize;
    let size = 4 * version as usize + 17;
    let step = if version == 32 {
        26
    } else {
        ((version as usize * 4 + num_align * 2 + 1) / (num_align * 2 - 2)) * 2
    };
    let mut positions = vec![6];
    let mut pos = size - 7;
    for _ in 0..num_align - 1 {
        positions.push(pos);
        pos = pos.wrapping_sub(step);
    }
    positions[1..].reverse();
    positions.sort_unstable();
    positions
}
