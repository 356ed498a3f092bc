//! Plain-domain arithmetic modulo a fixed prime.

mod sqrt;

use self::sqrt::Algorithm;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;

/// Modular reduction helper bound to a prime modulus `p`.
///
/// Works on ordinary (non-Montgomery) integers. It is used where values
/// cross the boundary of the Montgomery domain: affine conversion, curve
/// equation checks and point decompression.
#[derive(Clone, Debug)]
pub struct Modular {
    modulus: BigUint,
    sqrt: Algorithm,
}

impl Modular {
    /// Create a reducer for the given odd prime modulus.
    pub fn new(modulus: BigUint) -> Self {
        let sqrt = Algorithm::for_modulus(&modulus);
        Self { modulus, sqrt }
    }

    /// The modulus `p`.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Returns `x mod p`.
    pub fn reduce(&self, x: &BigUint) -> BigUint {
        x % &self.modulus
    }

    /// Returns `x mod p` in `[0, p)` for a signed `x`.
    pub fn reduce_signed(&self, x: &BigInt) -> BigUint {
        let r = x.magnitude() % &self.modulus;
        if x.sign() == Sign::Minus && !r.is_zero() {
            &self.modulus - r
        } else {
            r
        }
    }

    /// Returns `a·b mod p`.
    pub fn multiply(&self, a: &BigUint, b: &BigUint) -> BigUint {
        a * b % &self.modulus
    }

    /// Returns `a² mod p`.
    pub fn square(&self, a: &BigUint) -> BigUint {
        self.multiply(a, a)
    }

    /// Returns `a³ mod p`.
    pub fn cube(&self, a: &BigUint) -> BigUint {
        self.multiply(&self.square(a), a)
    }

    /// Returns `a + b mod p`.
    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.modulus
    }

    /// Returns `a - b mod p`.
    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let a = a % &self.modulus;
        let b = b % &self.modulus;
        if a >= b {
            a - b
        } else {
            &self.modulus - (b - a)
        }
    }

    /// Returns `-a mod p`.
    pub fn neg(&self, a: &BigUint) -> BigUint {
        self.sub(&BigUint::zero(), a)
    }

    /// Returns `a⁻¹ mod p`, or `None` if `a ≡ 0`.
    ///
    /// Uses Fermat's little theorem, `a^(p-2) ≡ a⁻¹`.
    ///
    /// **This operation is variable time.**
    pub fn invert(&self, a: &BigUint) -> Option<BigUint> {
        let a = self.reduce(a);
        if a.is_zero() {
            return None;
        }
        Some(a.modpow(&(&self.modulus - 2u8), &self.modulus))
    }

    /// Returns a square root of `a mod p`, or `None` if `a` is a quadratic
    /// non-residue.
    ///
    /// Which of the two roots is returned is unspecified; callers needing a
    /// particular parity should select between `r` and `p - r`.
    ///
    /// **This operation is variable time.**
    pub fn sqrt(&self, a: &BigUint) -> Option<BigUint> {
        self.sqrt.sqrt(&self.reduce(a), &self.modulus)
    }
}

impl PartialEq for Modular {
    fn eq(&self, other: &Self) -> bool {
        self.modulus == other.modulus
    }
}

impl Eq for Modular {}

#[cfg(test)]
mod tests {
    use super::Modular;
    use num_bigint::{BigInt, BigUint};

    fn p23() -> Modular {
        Modular::new(BigUint::from(23u8))
    }

    #[test]
    fn reduce_signed_normalizes_negatives() {
        let m = p23();
        assert_eq!(m.reduce_signed(&BigInt::from(-1)), BigUint::from(22u8));
        assert_eq!(m.reduce_signed(&BigInt::from(-46)), BigUint::from(0u8));
        assert_eq!(m.reduce_signed(&BigInt::from(-47)), BigUint::from(22u8));
        assert_eq!(m.reduce_signed(&BigInt::from(50)), BigUint::from(4u8));
    }

    #[test]
    fn sub_wraps() {
        let m = p23();
        assert_eq!(
            m.sub(&BigUint::from(3u8), &BigUint::from(7u8)),
            BigUint::from(19u8)
        );
        assert_eq!(m.neg(&BigUint::from(0u8)), BigUint::from(0u8));
    }

    #[test]
    fn invert() {
        let m = p23();
        assert_eq!(m.invert(&BigUint::from(20u8)), Some(BigUint::from(15u8)));
        assert_eq!(m.invert(&BigUint::from(23u8)), None);
    }

    #[test]
    fn cube() {
        let m = p23();
        assert_eq!(m.cube(&BigUint::from(3u8)), BigUint::from(4u8));
    }
}
