//! Modular square root implementations, adapted from <https://eprint.iacr.org/2012/685.pdf>.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

/// Square root algorithms.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) enum Algorithm {
    /// Atkins algorithm for `q ≡ 5 (mod 8)`.
    Atkins {
        /// `(q - 5) / 8`
        exp: BigUint,
        /// `2^((q - 5) / 8)`
        t: BigUint,
    },

    /// Shanks algorithm for `q ≡ 3 (mod 4)`.
    Shanks {
        /// `(q + 1) / 4`
        exp: BigUint,
    },

    /// Tonelli-Shanks algorithm for any odd prime.
    TonelliShanks {
        /// `q - 1 = 2^s · t` with `t` odd.
        s: u32,
        /// `(t - 1) / 2`
        t_minus_1_over_2: BigUint,
        /// Primitive `2^s`-th root of unity, `c^t` for a non-residue `c`.
        root_of_unity: BigUint,
    },
}

impl Algorithm {
    /// Determine the best algorithm to use with a particular modulus.
    pub(super) fn for_modulus(p: &BigUint) -> Self {
        if mod_residue(p, 4) == 3 {
            Self::Shanks {
                exp: (p + 1u8) >> 2,
            }
        } else if mod_residue(p, 8) == 5 {
            let exp: BigUint = (p - 5u8) >> 3;
            let t = BigUint::from(2u8).modpow(&exp, p);
            Self::Atkins { exp, t }
        } else {
            let p_minus_1 = p - 1u8;
            let s = p_minus_1.trailing_zeros().unwrap_or(0) as u32;
            let t: BigUint = &p_minus_1 >> s;
            let c = non_residue(p);
            Self::TonelliShanks {
                s,
                t_minus_1_over_2: (&t - 1u8) >> 1,
                root_of_unity: c.modpow(&t, p),
            }
        }
    }

    /// Returns the square root of `a mod p`, or `None` if no square root exists.
    ///
    /// `a` must already be reduced.
    pub(super) fn sqrt(&self, a: &BigUint, p: &BigUint) -> Option<BigUint> {
        if a.is_zero() {
            return Some(BigUint::zero());
        }

        let x = match self {
            Self::Atkins { exp, t } => sqrt_atkins(a, p, exp, t),
            Self::Shanks { exp } => a.modpow(exp, p),
            Self::TonelliShanks {
                s,
                t_minus_1_over_2,
                root_of_unity,
            } => sqrt_tonelli_shanks(a, p, *s, t_minus_1_over_2, root_of_unity)?,
        };

        if &x * &x % p == *a { Some(x) } else { None }
    }
}

/// Atkins algorithm for `q ≡ 5 (mod 8)`.
///
/// From <https://eprint.iacr.org/2012/685.pdf> (page 10, algorithm 3)
fn sqrt_atkins(a: &BigUint, p: &BigUint, exp: &BigUint, t: &BigUint) -> BigUint {
    let a1 = a.modpow(exp, p);
    let b = t * &a1 % p;
    let ab = a * &b % p;
    let i = (BigUint::from(2u8) * &ab * &b) % p;
    let i_minus_1 = (i + p - 1u8) % p;
    ab * i_minus_1 % p
}

/// Tonelli-Shanks algorithm works for every odd prime.
///
/// Variable-time rendition of <https://eprint.iacr.org/2012/685.pdf> (page 12, algorithm 5).
fn sqrt_tonelli_shanks(
    a: &BigUint,
    p: &BigUint,
    s: u32,
    t_minus_1_over_2: &BigUint,
    root_of_unity: &BigUint,
) -> Option<BigUint> {
    let w = a.modpow(t_minus_1_over_2, p);

    let mut v = s;
    let mut x = a * &w % p;
    let mut b = &x * &w % p;
    let mut z = root_of_unity.clone();

    while !b.is_one() {
        // least k with b^(2^k) = 1
        let mut k = 0;
        let mut tmp = b.clone();
        while !tmp.is_one() {
            tmp = &tmp * &tmp % p;
            k += 1;
            if k == v {
                return None;
            }
        }

        for _ in 0..(v - k - 1) {
            z = &z * &z % p;
        }

        x = x * &z % p;
        z = &z * &z % p;
        b = b * &z % p;
        v = k;
    }

    Some(x)
}

/// Smallest quadratic non-residue modulo `p`, found with Euler's criterion.
fn non_residue(p: &BigUint) -> BigUint {
    let legendre_exp = (p - 1u8) >> 1;
    let p_minus_1 = p - 1u8;
    let mut c = BigUint::from(2u8);
    while c < *p && c.modpow(&legendre_exp, p) != p_minus_1 {
        c += 1u8;
    }
    c
}

/// Compute residue classes of the modulus for selecting particular square root algorithms.
fn mod_residue(p: &BigUint, n: u32) -> u32 {
    p.mod_floor(&BigUint::from(n)).to_u32().unwrap_or(0)
}
