//! Mask selection.
//!
//! Every candidate mask is tried on a clone of the finished matrix with
//! its format information already written, then scored. Standard symbols
//! use the four penalty rules of the symbology; Micro symbols use the
//! edge-darkness rating, negated here so the same lowest-score-wins loop
//! covers both. Ties keep the first candidate in pattern order.

use super::placement::{self, BlockedModules};
use super::tables;
use crate::models::{BitMatrix, ECLevel, MaskPattern, Version};

/// XOR a mask pattern over every non-reserved module
pub fn apply_mask(matrix: &mut BitMatrix, blocked: &BlockedModules, pattern: MaskPattern) {
    let size = matrix.size();
    for y in 0..size {
        for x in 0..size {
            if !blocked.is_blocked(x, y) && pattern.is_masked(x, y) {
                matrix.toggle(x, y);
            }
        }
    }
}

/// Try every candidate mask, apply the best one to `matrix` together with
/// its format information, and return the chosen pattern
pub fn select_and_apply(
    matrix: &mut BitMatrix,
    blocked: &BlockedModules,
    version: Version,
    ec_level: ECLevel,
) -> MaskPattern {
    let candidates: &[MaskPattern] = match version {
        Version::Standard(_) => &MaskPattern::ALL,
        Version::Micro(_) => &MaskPattern::MICRO,
    };
    let mut best: Option<(MaskPattern, u8, i32)> = None;
    for (index, &pattern) in candidates.iter().enumerate() {
        let mut trial = matrix.clone();
        write_format(&mut trial, version, ec_level, pattern, index as u8);
        apply_mask(&mut trial, blocked, pattern);
        let score = score(&trial, version);
        if best.is_none_or(|(_, _, s)| score < s) {
            best = Some((pattern, index as u8, score));
        }
    }
    // candidate list is never empty
    let (pattern, index, _) = best.unwrap_or((candidates[0], 0, 0));
    write_format(matrix, version, ec_level, pattern, index);
    apply_mask(matrix, blocked, pattern);
    pattern
}

fn write_format(
    matrix: &mut BitMatrix,
    version: Version,
    ec_level: ECLevel,
    pattern: MaskPattern,
    micro_index: u8,
) {
    match version {
        Version::Standard(_) => placement::write_format(matrix, ec_level, pattern),
        Version::Micro(m) => {
            let symbol = tables::micro_symbol_number(m, ec_level);
            placement::write_micro_format(matrix, symbol, micro_index);
        }
    }
}

fn score(matrix: &BitMatrix, version: Version) -> i32 {
    match version {
        Version::Standard(_) => penalty_score(matrix),
        // higher edge rating is better, flipped for the minimizing loop
        Version::Micro(_) => -micro_rating(matrix),
    }
}

/// Sum of the four penalty rules for a fully masked standard symbol
pub fn penalty_score(matrix: &BitMatrix) -> i32 {
    penalty_runs(matrix) + penalty_blocks(matrix) + penalty_finder_like(matrix)
        + penalty_balance(matrix)
}

/// Rule 1: rows or columns with five or more same-colored modules in a row
fn penalty_runs(matrix: &BitMatrix) -> i32 {
    let size = matrix.size();
    let mut score = 0;
    for line in 0..size {
        let mut row_color = matrix.get(0, line);
        let mut row_run = 1i32;
        let mut col_color = matrix.get(line, 0);
        let mut col_run = 1i32;
        for i in 1..size {
            let row = matrix.get(i, line);
            if row == row_color {
                row_run += 1;
                if row_run == 5 {
                    score += 3;
                } else if row_run > 5 {
                    score += 1;
                }
            } else {
                row_color = row;
                row_run = 1;
            }
            let col = matrix.get(line, i);
            if col == col_color {
                col_run += 1;
                if col_run == 5 {
                    score += 3;
                } else if col_run > 5 {
                    score += 1;
                }
            } else {
                col_color = col;
                col_run = 1;
            }
        }
    }
    score
}

/// Rule 2: 2x2 blocks of a single color
fn penalty_blocks(matrix: &BitMatrix) -> i32 {
    let size = matrix.size();
    let mut score = 0;
    for y in 0..size - 1 {
        for x in 0..size - 1 {
            let c = matrix.get(x, y);
            if c == matrix.get(x + 1, y) && c == matrix.get(x, y + 1) && c == matrix.get(x + 1, y + 1)
            {
                score += 3;
            }
        }
    }
    score
}

// finder-like run with a four-module light margin on one side
const FINDER_SEQ: [bool; 11] = [
    true, false, true, true, true, false, true, false, false, false, false,
];

/// Rule 3: 1:1:3:1:1 finder-like sequences next to four light modules
fn penalty_finder_like(matrix: &BitMatrix) -> i32 {
    let size = matrix.size();
    if size < 11 {
        return 0;
    }
    let mut score = 0;
    for line in 0..size {
        for start in 0..=size - 11 {
            let mut fwd_row = true;
            let mut rev_row = true;
            let mut fwd_col = true;
            let mut rev_col = true;
            for (k, &want) in FINDER_SEQ.iter().enumerate() {
                let row = matrix.get(start + k, line);
                let col = matrix.get(line, start + k);
                fwd_row &= row == want;
                rev_row &= row == FINDER_SEQ[10 - k];
                fwd_col &= col == want;
                rev_col &= col == FINDER_SEQ[10 - k];
            }
            if fwd_row || rev_row {
                score += 40;
            }
            if fwd_col || rev_col {
                score += 40;
            }
        }
    }
    score
}

/// Rule 4: deviation of the dark-module proportion from 50 percent
fn penalty_balance(matrix: &BitMatrix) -> i32 {
    let size = matrix.size();
    let total = (size * size) as i32;
    let dark = matrix.count_dark() as i32;
    let percent = dark * 100 / total;
    let prev = (percent / 5) * 5;
    let next = prev + 5;
    let deviation = (prev - 50).abs().min((next - 50).abs());
    deviation / 5 * 10
}

/// Micro symbol rating: dark-module counts along the right and bottom
/// edges, weighted so the smaller count dominates
pub fn micro_rating(matrix: &BitMatrix) -> i32 {
    let size = matrix.size();
    let mut right = 0i32;
    let mut bottom = 0i32;
    for i in 1..size {
        if matrix.get(size - 1, i) {
            right += 1;
        }
        if matrix.get(i, size - 1) {
            bottom += 1;
        }
    }
    if right <= bottom {
        right * 16 + bottom
    } else {
        bottom * 16 + right
    }
}
