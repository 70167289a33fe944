//! GF(256) arithmetic for Reed-Solomon codeword generation.
//!
//! QR codes use the field generated by the primitive polynomial
//! x^8 + x^4 + x^3 + x^2 + 1 (0x11D). Multiplication goes through log/exp
//! tables built once at process start; after initialization the tables are
//! read-only and safe to share across threads.

use std::sync::OnceLock;

/// Primitive polynomial for GF(2^8): x^8 + x^4 + x^3 + x^2 + 1 = 0x11D.
const PRIM_POLY: u16 = 0x11D;

struct GfTables {
    exp: [u8; 512],
    log: [u8; 256],
}

fn build_gf_tables() -> GfTables {
    let mut exp = [0u8; 512];
    let mut log = [0u8; 256];

    let mut x: u16 = 1;
    for i in 0..255u16 {
        exp[i as usize] = x as u8;
        exp[(i + 255) as usize] = x as u8; // wrap-around for easy modular access
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIM_POLY;
        }
    }
    exp[510] = exp[0];
    exp[511] = exp[1];

    GfTables { exp, log }
}

fn gf_tables() -> &'static GfTables {
    static TABLES: OnceLock<GfTables> = OnceLock::new();
    TABLES.get_or_init(build_gf_tables)
}

/// GF(256) field operations
pub struct Gf256;

impl Gf256 {
    /// Multiply two field elements
    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let t = gf_tables();
        let log_sum = t.log[a as usize] as usize + t.log[b as usize] as usize;
        t.exp[log_sum]
    }

    /// alpha^n for the field generator alpha = 2
    pub fn exp(n: usize) -> u8 {
        gf_tables().exp[n % 255]
    }

    /// Discrete logarithm. Panics on 0, which has no logarithm; hitting
    /// this is an encoder bug, not an input error.
    pub fn log(a: u8) -> u8 {
        assert_ne!(a, 0, "log(0) is undefined in GF(256)");
        gf_tables().log[a as usize]
    }

    /// a^n
    pub fn pow(a: u8, n: usize) -> u8 {
        if a == 0 {
            return if n == 0 { 1 } else { 0 };
        }
        let t = gf_tables();
        let exp_idx = (t.log[a as usize] as usize * (n % 255)) % 255;
        t.exp[exp_idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_identity_and_zero() {
        for a in 0..=255u8 {
            assert_eq!(Gf256::mul(a, 1), a);
            assert_eq!(Gf256::mul(1, a), a);
            assert_eq!(Gf256::mul(a, 0), 0);
            assert_eq!(Gf256::mul(0, a), 0);
        }
    }

    #[test]
    fn test_mul_commutative() {
        for a in [3u8, 7, 100, 255] {
            for b in [2u8, 29, 133, 254] {
                assert_eq!(Gf256::mul(a, b), Gf256::mul(b, a));
            }
        }
    }

    #[test]
    fn test_known_products() {
        // 2 * 128 wraps through the primitive polynomial: 0x100 ^ 0x11D = 0x1D
        assert_eq!(Gf256::mul(2, 128), 0x1D);
        // log-add law: alpha^10 * alpha^20 = alpha^30
        assert_eq!(Gf256::mul(Gf256::exp(10), Gf256::exp(20)), Gf256::exp(30));
    }

    #[test]
    fn test_exp_log_roundtrip() {
        for a in 1..=255u8 {
            assert_eq!(Gf256::exp(Gf256::log(a) as usize), a);
        }
    }

    #[test]
    fn test_exp_cycle() {
        assert_eq!(Gf256::exp(0), 1);
        assert_eq!(Gf256::exp(1), 2);
        assert_eq!(Gf256::exp(255), 1);
        assert_eq!(Gf256::exp(8), 29); // first wrap: x^8 = 0x11D & 0xFF
    }

    #[test]
    #[should_panic(expected = "log(0)")]
    fn test_log_zero_panics() {
        Gf256::log(0);
    }

    #[test]
    fn test_pow() {
        assert_eq!(Gf256::pow(2, 8), 29);
        assert_eq!(Gf256::pow(0, 0), 1);
        assert_eq!(Gf256::pow(0, 5), 0);
        for a in 1..=255u8 {
            assert_eq!(Gf256::pow(a, 0), 1);
            assert_eq!(Gf256::pow(a, 1), a);
        }
    }
}
