//! Reed-Solomon ECC codeword generation.
//!
//! For each codeword block the data codewords are treated as a polynomial
//! over GF(256), multiplied by x^degree and reduced modulo the generator
//! polynomial g(x) = prod_{i=0}^{degree-1} (x - alpha^i). The remainder's
//! coefficients are the block's ECC codewords (systematic encoding).

use super::galois::Gf256;

/// Generator polynomial of a fixed degree, reusable across blocks
pub struct ReedSolomonGenerator {
    /// Coefficients from highest to lowest degree, excluding the leading
    /// (monic) term
    coefficients: Vec<u8>,
}

impl ReedSolomonGenerator {
    /// Build the generator polynomial of the given degree by repeated
    /// multiplication of (x - alpha^i) terms
    pub fn new(degree: usize) -> Self {
        assert!(
            (1..=254).contains(&degree),
            "generator degree out of range: {degree}"
        );
        let mut coefficients = vec![0u8; degree];
        coefficients[degree - 1] = 1; // start with the monomial x^0

        // Multiply by (x - alpha^i) for i = 0..degree
        let mut root: u8 = 1;
        for _ in 0..degree {
            for j in 0..degree {
                coefficients[j] = Gf256::mul(coefficients[j], root);
                if j + 1 < degree {
                    coefficients[j] ^= coefficients[j + 1];
                }
            }
            root = Gf256::mul(root, 2);
        }
        Self { coefficients }
    }

    /// Degree of the generator = number of ECC codewords per block
    pub fn degree(&self) -> usize {
        self.coefficients.len()
    }

    /// Polynomial long division of `data` * x^degree by the generator;
    /// returns the remainder coefficients (the ECC codewords)
    pub fn remainder(&self, data: &[u8]) -> Vec<u8> {
        let mut result = vec![0u8; self.degree()];
        for &b in data {
            let factor = b ^ result[0];
            result.rotate_left(1);
            *result.last_mut().unwrap() = 0;
            for (x, &coef) in result.iter_mut().zip(self.coefficients.iter()) {
                *x ^= Gf256::mul(coef, factor);
            }
        }
        result
    }

    /// Check that a full codeword (data followed by its ECC bytes) is a
    /// multiple of the generator polynomial
    pub fn divides(&self, codewords: &[u8]) -> bool {
        self.remainder(&codewords[..codewords.len() - self.degree()])
            == codewords[codewords.len() - self.degree()..]
    }
}
