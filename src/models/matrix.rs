/// Compact bit matrix holding the modules of a QR symbol
///
/// `true` = dark module, `false` = light module. Out-of-range reads return
/// light; out-of-range writes are ignored, which lets pattern drawing clip
/// at the symbol edge without bounds arithmetic at every call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    size: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create a square matrix with all modules light
    pub fn new(size: usize) -> Self {
        let bytes_needed = (size * size + 7) / 8;
        Self {
            size,
            data: vec![0; bytes_needed],
        }
    }

    /// Side length in modules (width = height)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get module at (x, y); x is the column, y the row
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.size || y >= self.size {
            return false;
        }
        let index = y * self.size + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set module at (x, y)
    pub fn set(&mut self, x: usize, y: usize, dark: bool) {
        if x >= self.size || y >= self.size {
            return;
        }
        let index = y * self.size + x;
        if dark {
            self.data[index / 8] |= 1 << (index % 8);
        } else {
            self.data[index / 8] &= !(1 << (index % 8));
        }
    }

    /// Flip module at (x, y)
    pub fn toggle(&mut self, x: usize, y: usize) {
        if x >= self.size || y >= self.size {
            return;
        }
        let index = y * self.size + x;
        self.data[index / 8] ^= 1 << (index % 8);
    }

    /// Number of dark modules in the whole matrix
    pub fn count_dark(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Copy this matrix into the center of a larger one, adding a light
    /// border of `margin` modules on every side
    pub fn with_margin(&self, margin: usize) -> BitMatrix {
        let mut out = BitMatrix::new(self.size + 2 * margin);
        for y in 0..self.size {
            for x in 0..self.size {
                if self.get(x, y) {
                    out.set(x + margin, y + margin, true);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_toggle() {
        let mut matrix = BitMatrix::new(21);
        assert_eq!(matrix.size(), 21);

        matrix.set(3, 4, true);
        assert!(matrix.get(3, 4));
        assert!(!matrix.get(4, 3));

        matrix.toggle(3, 4);
        assert!(!matrix.get(3, 4));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut matrix = BitMatrix::new(11);
        matrix.set(11, 11, true); // Should not panic
        assert!(!matrix.get(11, 11));
    }

    #[test]
    fn test_count_dark() {
        let mut matrix = BitMatrix::new(5);
        assert_eq!(matrix.count_dark(), 0);
        matrix.set(0, 0, true);
        matrix.set(4, 4, true);
        matrix.set(2, 3, true);
        assert_eq!(matrix.count_dark(), 3);
    }

    #[test]
    fn test_with_margin() {
        let mut matrix = BitMatrix::new(3);
        matrix.set(1, 1, true);
        let padded = matrix.with_margin(4);
        assert_eq!(padded.size(), 11);
        assert!(padded.get(5, 5));
        assert_eq!(padded.count_dark(), 1);
    }
}
