//! Structural module placement.
//!
//! Builds the function patterns of a symbol in a fixed order — finders,
//! separators, alignment patterns, timing patterns, format/version
//! reservations, dark module — reserving each footprint in
//! [`BlockedModules`] before the next step runs, then threads the
//! data/ECC bitstream through the unreserved modules in the standard's
//! boustrophedon traversal. The reservation set lives for one encode call
//! and is consulted again during masking.

use super::format_info;
use crate::models::{BitMatrix, ECLevel, MaskPattern, Version};

/// Set of modules reserved for structural patterns; data placement and
/// masking never touch a blocked module
#[derive(Debug, Clone)]
pub struct BlockedModules {
    blocked: BitMatrix,
}

impl BlockedModules {
    /// Empty reservation set for a symbol of the given side length
    pub fn new(size: usize) -> Self {
        Self {
            blocked: BitMatrix::new(size),
        }
    }

    /// Reserve a single module
    pub fn block(&mut self, x: usize, y: usize) {
        self.blocked.set(x, y, true);
    }

    /// Reserve a rectangular region, clipped at the symbol edge
    pub fn block_rect(&mut self, x: usize, y: usize, width: usize, height: usize) {
        for dy in 0..height {
            for dx in 0..width {
                self.blocked.set(x + dx, y + dy, true);
            }
        }
    }

    /// Check whether a module is reserved
    pub fn is_blocked(&self, x: usize, y: usize) -> bool {
        self.blocked.get(x, y)
    }

    /// Check whether any module of a rectangle is reserved
    pub fn any_blocked(&self, x: usize, y: usize, width: usize, height: usize) -> bool {
        for dy in 0..height {
            for dx in 0..width {
                if self.blocked.get(x + dx, y + dy) {
                    return true;
                }
            }
        }
        false
    }

    /// Number of unreserved modules
    pub fn free_count(&self) -> usize {
        let size = self.blocked.size();
        size * size - self.blocked.count_dark()
    }
}

/// Builds the module matrix for one encode call
pub struct ModulePlacer {
    matrix: BitMatrix,
    blocked: BlockedModules,
    version: Version,
}

impl ModulePlacer {
    /// Draw all function patterns and reservations for a version
    pub fn new(version: Version) -> Self {
        let size = version.size();
        let mut placer = Self {
            matrix: BitMatrix::new(size),
            blocked: BlockedModules::new(size),
            version,
        };
        placer.place_finder_patterns();
        placer.place_alignment_patterns();
        placer.place_timing_patterns();
        placer.reserve_format_areas();
        placer.place_version_info();
        placer
    }

    /// The reservation set built so far
    pub fn blocked(&self) -> &BlockedModules {
        &self.blocked
    }

    /// Finder patterns with their separator margins. Standard symbols get
    /// all three corners; Micro symbols only the top-left.
    fn place_finder_patterns(&mut self) {
        let size = self.matrix.size();
        let corners: &[(usize, usize)] = match self.version {
            Version::Standard(_) => &[(0, 0), (size - 7, 0), (0, size - 7)],
            Version::Micro(_) => &[(0, 0)],
        };
        for &(left, top) in corners {
            for dy in 0..7usize {
                for dx in 0..7usize {
                    // concentric squares: 3x3 core, light ring, dark border
                    let dist = dx.abs_diff(3).max(dy.abs_diff(3));
                    self.matrix.set(left + dx, top + dy, dist != 2);
                }
            }
            // separator: one light module between the finder and the
            // symbol interior, an 8x8 footprint anchored at the corner
            let sep_x = left.saturating_sub(1);
            let sep_y = top.saturating_sub(1);
            self.blocked.block_rect(sep_x, sep_y, 8, 8);
        }
    }

    /// Alignment patterns at the version's center coordinates; any pattern
    /// overlapping an existing reservation (the finder corners) is skipped
    fn place_alignment_patterns(&mut self) {
        let Version::Standard(v) = self.version else {
            return; // Micro symbols have no alignment patterns
        };
        let centers = super::tables::alignment_pattern_positions(v);
        for &cy in &centers {
            for &cx in &centers {
                if self.blocked.any_blocked(cx - 2, cy - 2, 5, 5) {
                    continue;
                }
                for dy in 0..5usize {
                    for dx in 0..5usize {
                        // 5x5 bullseye: dark border and center, light ring
                        let dist = dx.abs_diff(2).max(dy.abs_diff(2));
                        self.matrix.set(cx - 2 + dx, cy - 2 + dy, dist != 1);
                    }
                }
                self.blocked.block_rect(cx - 2, cy - 2, 5, 5);
            }
        }
    }

    /// Alternating timing lines: row/column 6 for standard symbols,
    /// row/column 0 for Micro. Modules already reserved (separators,
    /// alignment patterns straddling the line) are left untouched.
    fn place_timing_patterns(&mut self) {
        let size = self.matrix.size();
        let (line, start, end) = match self.version {
            Version::Standard(_) => (6, 8, size - 8),
            Version::Micro(_) => (0, 8, size),
        };
        for i in start..end {
            if !self.blocked.is_blocked(i, line) {
                self.matrix.set(i, line, i % 2 == 0);
                self.blocked.block(i, line);
            }
            if !self.blocked.is_blocked(line, i) {
                self.matrix.set(line, i, i % 2 == 0);
                self.blocked.block(line, i);
            }
        }
    }

    /// Reserve the format information areas and place the dark module
    /// (standard only); the format bits themselves are written during mask
    /// selection
    fn reserve_format_areas(&mut self) {
        let size = self.matrix.size();
        match self.version {
            Version::Standard(_) => {
                for i in 0..9 {
                    self.blocked.block(8, i);
                    self.blocked.block(i, 8);
                }
                for i in 0..8 {
                    self.blocked.block(size - 1 - i, 8);
                    self.blocked.block(8, size - 1 - i);
                }
                // the always-dark module next to the bottom-left finder
                self.matrix.set(8, size - 8, true);
            }
            Version::Micro(_) => {
                for i in 1..=8 {
                    self.blocked.block(8, i);
                }
                for i in 1..=7 {
                    self.blocked.block(i, 8);
                }
            }
        }
    }

    /// Version information blocks (two 3x6 areas) for standard versions 7+;
    /// their content is mask-independent, so they are written here
    fn place_version_info(&mut self) {
        let Version::Standard(v) = self.version else {
            return;
        };
        if v < 7 {
            return;
        }
        let size = self.matrix.size();
        let bits = format_info::version_bits(v);
        for i in 0..18 {
            let bit = (bits >> i) & 1 == 1;
            let a = size - 11 + i % 3;
            let b = i / 3;
            self.matrix.set(a, b, bit);
            self.matrix.set(b, a, bit);
        }
        self.blocked.block_rect(size - 11, 0, 3, 6);
        self.blocked.block_rect(0, size - 11, 6, 3);
    }

    /// Thread the final bitstream into the unreserved modules: two-column
    /// zig-zag from the right edge, alternating up/down, skipping the
    /// timing column for standard symbols. Surplus modules (remainder
    /// bits) stay light.
    pub fn place_data(&mut self, bits: &[bool]) {
        let size = self.matrix.size() as i32;
        let micro = self.version.is_micro();
        let mut i = 0usize;
        let mut right = size - 1;
        let mut pair = 0usize;
        while right >= 1 {
            if !micro && right == 6 {
                right = 5; // timing column
            }
            let upward = if micro {
                pair % 2 == 0
            } else {
                (right + 1) & 2 == 0
            };
            for vert in 0..size {
                for j in 0..2 {
                    let x = (right - j) as usize;
                    let y = if upward { size - 1 - vert } else { vert } as usize;
                    if !self.blocked.is_blocked(x, y) && i < bits.len() {
                        self.matrix.set(x, y, bits[i]);
                        i += 1;
                    }
                }
            }
            right -= 2;
            pair += 1;
        }
        debug_assert_eq!(i, bits.len(), "bitstream did not fit the data region");
    }

    /// Tear down into the finished (pre-mask) matrix and its reservations
    pub fn into_parts(self) -> (BitMatrix, BlockedModules) {
        (self.matrix, self.blocked)
    }
}

/// Write both copies of the standard 15-bit format word for an (EC level,
/// mask) choice, plus the dark module
pub fn write_format(matrix: &mut BitMatrix, ec_level: ECLevel, mask: MaskPattern) {
    let size = matrix.size();
    let bits = format_info::format_bits(ec_level, mask);
    let bit = |i: usize| (bits >> i) & 1 == 1;
    // first copy, wrapped around the top-left finder
    for i in 0..6 {
        matrix.set(8, i, bit(i));
    }
    matrix.set(8, 7, bit(6));
    matrix.set(8, 8, bit(7));
    matrix.set(7, 8, bit(8));
    for i in 9..15 {
        matrix.set(14 - i, 8, bit(i));
    }
    // second copy, split between the other two finders
    for i in 0..8 {
        matrix.set(size - 1 - i, 8, bit(i));
    }
    for i in 8..15 {
        matrix.set(8, size - 15 + i, bit(i));
    }
    matrix.set(8, size - 8, true);
}

/// Write the single Micro format word around the top-left finder
pub fn write_micro_format(matrix: &mut BitMatrix, symbol_number: u8, micro_mask_index: u8) {
    let bits = format_info::micro_format_bits(symbol_number, micro_mask_index);
    let bit = |i: usize| (bits >> i) & 1 == 1;
    for i in 0..8 {
        matrix.set(8, i + 1, bit(i));
    }
    for i in 8..15 {
        matrix.set(15 - i, 8, bit(i));
    }
}
