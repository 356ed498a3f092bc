//! Curve domain parameters.

use crate::{ProjectivePoint, Result, Workspace};
use gfp_field::{FieldElement, Modular, MontyParams};
use num_bigint::{BigInt, BigUint};

/// Short Weierstrass curve `y² = x³ + ax + b` over GF(p).
///
/// Holds the plain coefficients together with the Montgomery constants every
/// point on the curve computes with. A domain is immutable once built and
/// is shared by reference by all of its points.
#[derive(Clone, Debug)]
pub struct CurveDomain {
    params: MontyParams,
    modular: Modular,

    /// `a mod p`
    a: BigUint,

    /// `b mod p`
    b: BigUint,

    /// `a·R mod p`
    a_r: FieldElement,

    /// `b·R mod p`
    b_r: FieldElement,

    /// Width of one encoded coordinate: `⌈bits(p) / 8⌉`.
    byte_len: usize,
}

impl CurveDomain {
    /// Build the domain for `y² = x³ + ax + b (mod p)`.
    ///
    /// `a` and `b` are reduced into `[0, p)`, so negative coefficients such as
    /// `a = -3` may be passed directly. `p` must be an odd prime; an even or
    /// too small modulus is rejected with [`Error::InvalidArgument`], but the
    /// curve parameters are otherwise not validated.
    ///
    /// [`Error::InvalidArgument`]: crate::Error::InvalidArgument
    pub fn new(p: &BigUint, a: &BigInt, b: &BigInt) -> Result<Self> {
        let params = MontyParams::new(p)?;
        let modular = Modular::new(p.clone());

        let a = modular.reduce_signed(a);
        let b = modular.reduce_signed(b);
        let a_r = params.to_montgomery(&a);
        let b_r = params.to_montgomery(&b);
        let byte_len = p.bits().div_ceil(8) as usize;

        log::trace!(
            "curve domain over {}-bit prime, {} words",
            p.bits(),
            params.words()
        );

        Ok(Self {
            params,
            modular,
            a,
            b,
            a_r,
            b_r,
            byte_len,
        })
    }

    /// Field modulus `p`.
    pub fn p(&self) -> &BigUint {
        self.params.modulus()
    }

    /// Coefficient `a`, reduced.
    pub fn a(&self) -> &BigUint {
        &self.a
    }

    /// Coefficient `b`, reduced.
    pub fn b(&self) -> &BigUint {
        &self.b
    }

    /// Coefficient `a` in the Montgomery domain.
    pub fn a_r(&self) -> &FieldElement {
        &self.a_r
    }

    /// Coefficient `b` in the Montgomery domain.
    pub fn b_r(&self) -> &FieldElement {
        &self.b_r
    }

    /// Montgomery parameters of the base field.
    pub fn params(&self) -> &MontyParams {
        &self.params
    }

    /// Plain-domain arithmetic modulo `p`.
    pub fn modular(&self) -> &Modular {
        &self.modular
    }

    /// Length in bytes of one encoded field element.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// The point at infinity on this curve.
    pub fn identity(&self) -> ProjectivePoint<'_> {
        ProjectivePoint::identity(self)
    }

    /// Point with the given affine coordinates, checked to lie on the curve.
    pub fn point(&self, x: &BigUint, y: &BigUint) -> Result<ProjectivePoint<'_>> {
        ProjectivePoint::from_affine(self, x, y)
    }

    /// Fresh scratch memory sized for this curve.
    pub fn workspace(&self) -> Workspace {
        Workspace::new(self)
    }

    /// Right-hand side of the curve equation, `x³ + ax + b mod p`.
    pub(crate) fn rhs(&self, x: &BigUint) -> BigUint {
        let m = &self.modular;
        let ax = m.multiply(&self.a, x);
        m.add(&m.add(&m.cube(x), &ax), &self.b)
    }
}

impl PartialEq for CurveDomain {
    fn eq(&self, other: &Self) -> bool {
        self.p() == other.p() && self.a == other.a && self.b == other.b
    }
}

impl Eq for CurveDomain {}
