// Galois field GF(2^8)
//------------------------------------------------------------------------------

/// Reduction polynomial x^8 + x^4 + x^3 + x^2 + 1
pub const PRIMITIVE_POLY: u16 = 0x11D;

/// Exponent and log tables over GF(256) with generator element 2.
///
/// The exponent table is doubled in length so that `exp[log[a] + log[b]]`
/// never needs a modulo.
#[derive(Debug)]
pub struct GaloisField {
    exp: [u8; 512],
    log: [u8; 256],
}

impl GaloisField {
    pub const fn new() -> Self {
        let mut exp = [0u8; 512];
        let mut log = [0u8; 256];

        let mut x: u16 = 1;
        let mut i = 0;
        while i < 255 {
            exp[i] = x as u8;
            log[x as usize] = i as u8;
            x <<= 1;
            if x & 0x100 != 0 {
                x ^= PRIMITIVE_POLY;
            }
            i += 1;
        }
        while i < 512 {
            exp[i] = exp[i - 255];
            i += 1;
        }

        Self { exp, log }
    }

    #[inline]
    pub fn exp(&self, i: usize) -> u8 {
        self.exp[i]
    }

    #[inline]
    pub fn log(&self, a: u8) -> u8 {
        debug_assert!(a != 0, "Log of zero is undefined");
        self.log[a as usize]
    }

    #[inline]
    pub fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.exp(self.log(a) as usize + self.log(b) as usize)
    }

    pub fn poly_mul(&self, p: &[u8], q: &[u8]) -> Vec<u8> {
        let mut res = vec![0; p.len() + q.len() - 1];
        for (i, &a) in p.iter().enumerate() {
            for (j, &b) in q.iter().enumerate() {
                res[i + j] ^= self.mul(a, b);
            }
        }
        res
    }

    /// Product of (x - 2^i) for i in 0..degree, highest order coefficient first
    pub fn generator_poly(&self, degree: usize) -> Vec<u8> {
        (0..degree).fold(vec![1], |g, i| self.poly_mul(&g, &[1, self.exp(i)]))
    }
}

impl Default for GaloisField {
    fn default() -> Self {
        Self::new()
    }
}

pub static GF256: GaloisField = GaloisField::new();

#[cfg(test)]
mod galois_tests {
    use super::{GaloisField, GF256};

    #[test]
    fn test_exp_log_inverse() {
        for a in 1..=255u8 {
            assert_eq!(GF256.exp(GF256.log(a) as usize), a);
        }
    }

    #[test]
    fn test_exp_table_wraps() {
        assert_eq!(GF256.exp(0), 1);
        assert_eq!(GF256.exp(8), 0x1D);
        for i in 255..510 {
            assert_eq!(GF256.exp(i), GF256.exp(i - 255));
        }
    }

    #[test]
    fn test_mul() {
        assert_eq!(GF256.mul(0, 37), 0);
        assert_eq!(GF256.mul(37, 0), 0);
        assert_eq!(GF256.mul(1, 37), 37);
        assert_eq!(GF256.mul(2, 0x80), 0x1D);
        assert_eq!(GF256.mul(3, 7), 9);
        for a in 0..=255u8 {
            for b in [1u8, 2, 29, 142, 255] {
                assert_eq!(GF256.mul(a, b), GF256.mul(b, a));
            }
        }
    }

    #[test]
    fn test_generator_poly() {
        let gf = GaloisField::new();
        assert_eq!(gf.generator_poly(0), vec![1]);
        assert_eq!(gf.generator_poly(1), vec![1, 1]);
        assert_eq!(gf.generator_poly(2), vec![1, 3, 2]);

        // Log form: 0, 251, 67, 46, 61, 118, 70, 64, 94, 32, 45
        let exp_log = [251u8, 67, 46, 61, 118, 70, 64, 94, 32, 45];
        let g = gf.generator_poly(10);
        assert_eq!(g.len(), 11);
        assert_eq!(g[0], 1);
        for (c, l) in g[1..].iter().zip(exp_log) {
            assert_eq!(gf.log(*c), l);
        }
    }
}
