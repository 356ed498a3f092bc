//! Field elements in Montgomery form over a runtime modulus, multiplied with
//! word-level Montgomery reduction (REDC).

use crate::{Error, Result};
use alloc::{boxed::Box, vec, vec::Vec};
use bigint::{Limb, Word};
use core::mem;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::{CryptoRng, RngCore};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// Number of bytes in a [`Word`].
const WORD_BYTES: usize = mem::size_of::<Word>();

/// Number of bits in a [`Word`].
const WORD_BITS: usize = WORD_BYTES * 8;

/// Montgomery parameters for an odd modulus `p`.
///
/// With `n` the number of machine words needed to hold `p` and `w` the word
/// width, the Montgomery radix is `R = 2^(w·n)`. These parameters are
/// computed once per modulus and shared read-only by everything that performs
/// arithmetic modulo `p`.
#[derive(Clone, Debug)]
pub struct MontyParams {
    /// Modulus as an integer.
    modulus: BigUint,

    /// Modulus as little-endian limbs.
    limbs: Box<[Limb]>,

    /// `-p⁻¹ mod 2^w`
    p_dash: Limb,

    /// `R mod p`
    r: BigUint,

    /// `R² mod p`
    r2: BigUint,

    /// `R² mod p` as raw limbs, the REDC multiplier for [`Self::to_montgomery`].
    r2_limbs: FieldElement,

    /// `R⁻¹ mod p`
    r_inv: BigUint,

    /// `R mod p` as a field element, i.e. one in Montgomery form.
    one: FieldElement,
}

impl MontyParams {
    /// Compute Montgomery parameters for the given modulus.
    ///
    /// The modulus must be an odd prime. Only oddness (and `p ≥ 3`) is
    /// checked here: primality is the caller's responsibility.
    pub fn new(modulus: &BigUint) -> Result<Self> {
        if modulus.is_even() || *modulus < BigUint::from(3u8) {
            return Err(Error);
        }

        let words = modulus.bits().div_ceil(WORD_BITS as u64) as usize;
        let limbs = limbs_from_uint(modulus, words);
        let p_dash = Limb(word_inverse(limbs[0].0).wrapping_neg());

        let r = (BigUint::one() << (WORD_BITS * words)) % modulus;
        let r2 = &r * &r % modulus;
        let r_inv = r.modpow(&(modulus - 2u8), modulus);
        let one = FieldElement {
            limbs: limbs_from_uint(&r, words),
        };
        let r2_limbs = FieldElement {
            limbs: limbs_from_uint(&r2, words),
        };

        Ok(Self {
            modulus: modulus.clone(),
            limbs,
            p_dash,
            r,
            r2,
            r2_limbs,
            r_inv,
            one,
        })
    }

    /// The modulus `p`.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Number of machine words in the modulus.
    pub fn words(&self) -> usize {
        self.limbs.len()
    }

    /// Number of limbs a [`MontyScratch`] needs: `2·words + 1`.
    pub fn scratch_len(&self) -> usize {
        2 * self.words() + 1
    }

    /// REDC multiplier `p' = -p⁻¹ mod 2^w`.
    pub fn p_dash(&self) -> Word {
        self.p_dash.0
    }

    /// Montgomery radix residue `R mod p`.
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// `R² mod p`, the multiplier that maps a plain value into the domain
    /// with a single REDC.
    pub fn r2(&self) -> &BigUint {
        &self.r2
    }

    /// `R⁻¹ mod p`.
    pub fn r_inv(&self) -> &BigUint {
        &self.r_inv
    }

    /// Additive identity.
    pub fn zero(&self) -> FieldElement {
        FieldElement {
            limbs: vec![Limb::ZERO; self.words()].into_boxed_slice(),
        }
    }

    /// Multiplicative identity, i.e. `R mod p`.
    pub fn one(&self) -> FieldElement {
        self.one.clone()
    }

    /// Lift a plain integer into the Montgomery domain: `x·R mod p`.
    ///
    /// `x` is reduced modulo `p` first, then multiplied by `R²` with a single
    /// REDC.
    pub fn to_montgomery(&self, x: &BigUint) -> FieldElement {
        let plain = FieldElement {
            limbs: limbs_from_uint(&(x % &self.modulus), self.words()),
        };
        let mut out = self.zero();
        self.mul_into(&mut out, &plain, &self.r2_limbs, &mut MontyScratch::new(self));
        out
    }

    /// Bring a Montgomery-form element back to a plain integer: `a·R⁻¹ mod p`.
    pub fn from_montgomery(&self, a: &FieldElement) -> BigUint {
        a.to_uint() * &self.r_inv % &self.modulus
    }

    /// Sample a uniformly random element.
    ///
    /// A value twice the width of the modulus is reduced, which leaves a
    /// negligible bias.
    pub fn random(&self, mut rng: impl CryptoRng + RngCore) -> FieldElement {
        let mut bytes = vec![0u8; 2 * self.words() * WORD_BYTES];
        rng.fill_bytes(&mut bytes);
        let value = BigUint::from_bytes_le(&bytes) % &self.modulus;
        bytes.zeroize();
        FieldElement {
            limbs: limbs_from_uint(&value, self.words()),
        }
    }

    /// Returns `a·b·R⁻¹ mod p`.
    pub fn mul(
        &self,
        a: &FieldElement,
        b: &FieldElement,
        scratch: &mut MontyScratch,
    ) -> FieldElement {
        let mut out = self.zero();
        self.mul_into(&mut out, a, b, scratch);
        out
    }

    /// Returns `a²·R⁻¹ mod p`.
    pub fn square(&self, a: &FieldElement, scratch: &mut MontyScratch) -> FieldElement {
        let mut out = self.zero();
        self.square_into(&mut out, a, scratch);
        out
    }

    /// Writes `a·b·R⁻¹ mod p` into `out`.
    ///
    /// Multiplying by zero short-circuits to zero without touching `scratch`.
    pub fn mul_into(
        &self,
        out: &mut FieldElement,
        a: &FieldElement,
        b: &FieldElement,
        scratch: &mut MontyScratch,
    ) {
        if bool::from(a.is_zero() | b.is_zero()) {
            out.set_zero();
            return;
        }

        let n = self.words();
        let z = scratch.reset(2 * n + 1);

        // Schoolbook multiplication.
        for i in 0..n {
            let mut carry = Limb::ZERO;
            for j in 0..n {
                let (w, c) = z[i + j].mac(a.limbs[i], b.limbs[j], carry);
                z[i + j] = w;
                carry = c;
            }
            z[i + n] = carry;
        }

        self.redc(z, out);
    }

    /// Writes `a²·R⁻¹ mod p` into `out`.
    pub fn square_into(
        &self,
        out: &mut FieldElement,
        a: &FieldElement,
        scratch: &mut MontyScratch,
    ) {
        if bool::from(a.is_zero()) {
            out.set_zero();
            return;
        }

        let n = self.words();
        let z = scratch.reset(2 * n + 1);

        // Off-diagonal products, each computed once.
        for i in 0..n {
            let mut carry = Limb::ZERO;
            for j in (i + 1)..n {
                let (w, c) = z[i + j].mac(a.limbs[i], a.limbs[j], carry);
                z[i + j] = w;
                carry = c;
            }
            z[i + n] = carry;
        }

        // Double them.
        let mut top = Limb::ZERO;
        for w in z[..2 * n].iter_mut() {
            let next = Limb(w.0 >> (WORD_BITS - 1));
            *w = Limb((w.0 << 1) | top.0);
            top = next;
        }
        z[2 * n] = top;

        // Add the squares on the diagonal.
        let mut carry = Limb::ZERO;
        for i in 0..n {
            let (lo, hi) = Limb::ZERO.mac(a.limbs[i], a.limbs[i], Limb::ZERO);
            let (w, c) = z[2 * i].adc(lo, carry);
            z[2 * i] = w;
            let (w, c) = z[2 * i + 1].adc(hi, c);
            z[2 * i + 1] = w;
            carry = c;
        }
        z[2 * n] = z[2 * n].adc(carry, Limb::ZERO).0;

        self.redc(z, out);
    }

    /// Montgomery reduction of the `2n+1`-limb value held in `z`.
    ///
    /// After the `n` reduction rounds the result is the upper `n+1` limbs of
    /// `z`, which is below `2p`; one conditional subtraction brings it into
    /// `[0, p)`.
    fn redc(&self, z: &mut [Limb], out: &mut FieldElement) {
        let n = self.words();
        debug_assert_eq!(z.len(), 2 * n + 1);

        for i in 0..n {
            let u = Limb(z[i].0.wrapping_mul(self.p_dash.0));
            let mut carry = Limb::ZERO;
            for j in 0..n {
                let (w, c) = z[i + j].mac(u, self.limbs[j], carry);
                z[i + j] = w;
                carry = c;
            }
            for w in z[(i + n)..].iter_mut() {
                let (sum, c) = w.adc(Limb::ZERO, carry);
                *w = sum;
                carry = c;
            }
        }

        out.limbs.copy_from_slice(&z[n..2 * n]);
        self.reduce_once(&mut out.limbs, z[2 * n]);
    }

    /// Subtract `p` from `hi·2^(w·n) + limbs` if the value is at least `p`.
    ///
    /// The value must be below `2p`.
    fn reduce_once(&self, limbs: &mut [Limb], hi: Limb) {
        let mut borrow = Limb::ZERO;
        for (w, &m) in limbs.iter_mut().zip(self.limbs.iter()) {
            let (diff, b) = w.sbb(m, borrow);
            *w = diff;
            borrow = b;
        }
        let (_, borrow) = hi.sbb(Limb::ZERO, borrow);

        // If the subtraction underflowed, borrow = 0xfff...fff and adding the
        // masked modulus back restores the original value.
        let mut carry = Limb::ZERO;
        for (w, &m) in limbs.iter_mut().zip(self.limbs.iter()) {
            let (sum, c) = w.adc(Limb(m.0 & borrow.0), carry);
            *w = sum;
            carry = c;
        }
    }

    /// Writes `a + b mod p` into `out`.
    pub fn add_into(&self, out: &mut FieldElement, a: &FieldElement, b: &FieldElement) {
        out.copy_from(a);
        self.add_assign(out, b);
    }

    /// `a = a + b mod p`
    pub fn add_assign(&self, a: &mut FieldElement, b: &FieldElement) {
        let mut carry = Limb::ZERO;
        for (wa, &wb) in a.limbs.iter_mut().zip(b.limbs.iter()) {
            let (sum, c) = wa.adc(wb, carry);
            *wa = sum;
            carry = c;
        }
        self.reduce_once(&mut a.limbs, carry);
    }

    /// `a = 2a mod p`
    pub fn double_assign(&self, a: &mut FieldElement) {
        let mut carry = Limb::ZERO;
        for w in a.limbs.iter_mut() {
            let (sum, c) = w.adc(*w, carry);
            *w = sum;
            carry = c;
        }
        self.reduce_once(&mut a.limbs, carry);
    }

    /// Writes `a - b mod p` into `out`.
    pub fn sub_into(&self, out: &mut FieldElement, a: &FieldElement, b: &FieldElement) {
        out.copy_from(a);
        self.sub_assign(out, b);
    }

    /// `a = a - b mod p`
    pub fn sub_assign(&self, a: &mut FieldElement, b: &FieldElement) {
        let mut borrow = Limb::ZERO;
        for (wa, &wb) in a.limbs.iter_mut().zip(b.limbs.iter()) {
            let (diff, bw) = wa.sbb(wb, borrow);
            *wa = diff;
            borrow = bw;
        }

        let mut carry = Limb::ZERO;
        for (w, &m) in a.limbs.iter_mut().zip(self.limbs.iter()) {
            let (sum, c) = w.adc(Limb(m.0 & borrow.0), carry);
            *w = sum;
            carry = c;
        }
    }

    /// `a = -a mod p`
    pub fn neg_assign(&self, a: &mut FieldElement) {
        let was_zero = a.is_zero();
        let mut borrow = Limb::ZERO;
        for (w, &m) in a.limbs.iter_mut().zip(self.limbs.iter()) {
            let (diff, b) = m.sbb(*w, borrow);
            *w = diff;
            borrow = b;
        }

        // `p - 0` is not canonical.
        for w in a.limbs.iter_mut() {
            w.conditional_assign(&Limb::ZERO, was_zero);
        }
    }

    /// Returns `a + b mod p`.
    pub fn add(&self, a: &FieldElement, b: &FieldElement) -> FieldElement {
        let mut out = a.clone();
        self.add_assign(&mut out, b);
        out
    }

    /// Returns `a - b mod p`.
    pub fn sub(&self, a: &FieldElement, b: &FieldElement) -> FieldElement {
        let mut out = a.clone();
        self.sub_assign(&mut out, b);
        out
    }

    /// Returns `-a mod p`.
    pub fn neg(&self, a: &FieldElement) -> FieldElement {
        let mut out = a.clone();
        self.neg_assign(&mut out);
        out
    }
}

impl PartialEq for MontyParams {
    fn eq(&self, other: &Self) -> bool {
        self.modulus == other.modulus
    }
}

impl Eq for MontyParams {}

/// Element of a prime field in Montgomery form (`a·R mod p`).
///
/// The modulus is not stored: every operation goes through the
/// [`MontyParams`] the element was created with. Elements created from
/// different parameters must not be mixed.
#[derive(Clone, Debug)]
pub struct FieldElement {
    limbs: Box<[Limb]>,
}

impl FieldElement {
    /// Determine if this element is zero.
    pub fn is_zero(&self) -> Choice {
        self.limbs
            .iter()
            .fold(Choice::from(1), |acc, w| acc & w.ct_eq(&Limb::ZERO))
    }

    /// Little-endian limbs of the Montgomery representation.
    pub fn as_limbs(&self) -> &[Limb] {
        &self.limbs
    }

    /// Overwrite `self` with `other`, reusing the existing allocation.
    pub fn copy_from(&mut self, other: &Self) {
        self.limbs.copy_from_slice(&other.limbs);
    }

    /// Set `self` to zero.
    pub fn set_zero(&mut self) {
        self.limbs.iter_mut().for_each(|w| *w = Limb::ZERO);
    }

    /// Assign `other` to `self` if `choice` is set.
    pub fn conditional_assign(&mut self, other: &Self, choice: Choice) {
        for (a, b) in self.limbs.iter_mut().zip(other.limbs.iter()) {
            a.conditional_assign(b, choice);
        }
    }

    /// Montgomery representation as an integer, still scaled by `R`.
    fn to_uint(&self) -> BigUint {
        let bytes: Vec<u8> = self
            .limbs
            .iter()
            .flat_map(|w| w.0.to_le_bytes())
            .collect();
        BigUint::from_bytes_le(&bytes)
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        if self.limbs.len() != other.limbs.len() {
            return Choice::from(0);
        }
        self.limbs
            .iter()
            .zip(other.limbs.iter())
            .fold(Choice::from(1), |acc, (a, b)| acc & a.ct_eq(b))
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement {}

impl Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.limbs.iter_mut().for_each(|w| w.zeroize());
    }
}

/// Reusable scratch memory for Montgomery multiplication.
///
/// Holds `2n+1` limbs for an `n`-limb modulus. The buffer is cleared before
/// every product and wiped on drop, so partial products never outlive the
/// operation that produced them.
#[derive(Clone, Debug, Default)]
pub struct MontyScratch {
    words: Vec<Limb>,
}

impl MontyScratch {
    /// Allocate scratch memory sized for the given parameters.
    pub fn new(params: &MontyParams) -> Self {
        Self {
            words: vec![Limb::ZERO; params.scratch_len()],
        }
    }

    /// Number of limbs currently held.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no memory has been allocated yet.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Zero the buffer, growing it to `len` limbs if needed.
    fn reset(&mut self, len: usize) -> &mut [Limb] {
        if self.words.len() < len {
            self.words.resize(len, Limb::ZERO);
        }
        self.words.iter_mut().for_each(|w| *w = Limb::ZERO);
        &mut self.words[..len]
    }
}

impl Zeroize for MontyScratch {
    fn zeroize(&mut self) {
        self.words.iter_mut().for_each(|w| w.zeroize());
    }
}

impl Drop for MontyScratch {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Little-endian limbs of `x`, zero padded to `len` limbs.
fn limbs_from_uint(x: &BigUint, len: usize) -> Box<[Limb]> {
    let bytes = x.to_bytes_le();
    debug_assert!(bytes.len() <= len * WORD_BYTES || x.is_zero());

    let mut limbs = vec![Limb::ZERO; len];
    for (w, chunk) in limbs.iter_mut().zip(bytes.chunks(WORD_BYTES)) {
        let mut buf = [0u8; WORD_BYTES];
        buf[..chunk.len()].copy_from_slice(chunk);
        *w = Limb(Word::from_le_bytes(buf));
    }
    limbs.into_boxed_slice()
}

/// Inverse of an odd word modulo `2^w`, by Newton iteration.
fn word_inverse(w: Word) -> Word {
    debug_assert!(w & 1 == 1);

    // `w·w ≡ 1 (mod 8)` for odd `w`, and every step doubles the number of
    // correct low bits.
    let mut inv = w;
    let mut correct_bits = 3;
    while correct_bits < WORD_BITS {
        inv = inv.wrapping_mul((2 as Word).wrapping_sub(w.wrapping_mul(inv)));
        correct_bits *= 2;
    }
    inv
}

#[cfg(test)]
mod tests {
    use super::{MontyParams, MontyScratch, word_inverse};
    use bigint::{Limb, Word};
    use num_bigint::BigUint;

    fn p256() -> BigUint {
        BigUint::parse_bytes(
            b"ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
            16,
        )
        .unwrap()
    }

    #[test]
    fn word_inverse_is_exact() {
        for w in [1 as Word, 3, 23, 0xffff_fff1, Word::MAX] {
            assert_eq!(w.wrapping_mul(word_inverse(w)), 1);
        }
    }

    #[test]
    fn p_dash_negates_inverse() {
        let params = MontyParams::new(&p256()).unwrap();
        let p0 = params.limbs[0].0;
        assert_eq!(p0.wrapping_mul(params.p_dash()), Word::MAX);
    }

    #[test]
    fn rejects_even_and_tiny_moduli() {
        assert!(MontyParams::new(&BigUint::from(24u8)).is_err());
        assert!(MontyParams::new(&BigUint::from(1u8)).is_err());
        assert!(MontyParams::new(&BigUint::from(0u8)).is_err());
        assert!(MontyParams::new(&BigUint::from(3u8)).is_ok());
    }

    #[test]
    fn radix_constants() {
        let p = BigUint::from(23u8);
        let params = MontyParams::new(&p).unwrap();
        assert_eq!(params.words(), 1);
        assert_eq!(params.scratch_len(), 3);
        assert_eq!(params.r() * params.r_inv() % &p, BigUint::from(1u8));
        assert_eq!(params.r2(), &(params.r() * params.r() % &p));
        assert_eq!(params.from_montgomery(&params.one()), BigUint::from(1u8));
    }

    #[test]
    fn to_montgomery_scales_by_r() {
        for p in [BigUint::from(23u8), p256()] {
            let params = MontyParams::new(&p).unwrap();
            for x in [0u32, 1, 5, 22, 23, 46, 0xdead_beef] {
                let x = BigUint::from(x);
                let lifted = params.to_montgomery(&x);
                assert_eq!(lifted.to_uint(), &x % &p * params.r() % &p);
            }
            assert_eq!(params.to_montgomery(&BigUint::from(1u8)), params.one());
            assert_eq!(
                params.to_montgomery(params.r2()).to_uint(),
                params.r2() * params.r() % &p
            );
        }
    }

    #[test]
    fn zero_operand_skips_scratch() {
        let params = MontyParams::new(&p256()).unwrap();
        let mut scratch = MontyScratch::default();
        let x = params.to_montgomery(&BigUint::from(5u8));
        let product = params.mul(&params.zero(), &x, &mut scratch);
        assert!(bool::from(product.is_zero()));
        assert!(scratch.is_empty());
    }

    #[test]
    fn dirty_scratch_is_cleared() {
        let params = MontyParams::new(&p256()).unwrap();
        let mut scratch = MontyScratch::new(&params);
        scratch.words.iter_mut().for_each(|w| *w = Limb::MAX);

        let a = params.to_montgomery(&BigUint::from(1234567u32));
        let b = params.to_montgomery(&BigUint::from(7654321u32));
        let product = params.mul(&a, &b, &mut scratch);
        assert_eq!(
            params.from_montgomery(&product),
            BigUint::from(1234567u64 * 7654321u64)
        );
    }

    #[test]
    fn negation_of_zero_is_zero() {
        let params = MontyParams::new(&BigUint::from(23u8)).unwrap();
        let zero = params.zero();
        assert_eq!(params.neg(&zero), zero);

        let x = params.to_montgomery(&BigUint::from(5u8));
        let minus_x = params.neg(&x);
        assert_eq!(params.from_montgomery(&minus_x), BigUint::from(18u8));
        assert!(bool::from(params.add(&x, &minus_x).is_zero()));
    }
}
