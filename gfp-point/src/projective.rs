//! Projective curve points.

use crate::{CurveDomain, Error, Result, Workspace, mul, point_arithmetic, sec1};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use gfp_field::{FieldElement, MontyScratch};
use num_bigint::{BigInt, BigUint};

/// Point on a short Weierstrass curve in Jacobian coordinates.
///
/// `(X, Y, Z)` represents the affine point `(X/Z², Y/Z³)`; every coordinate
/// is held in the Montgomery domain of the curve's base field. The point is
/// the identity (point at infinity) iff `Z = 0`, canonically `(0, 1, 0)`.
///
/// A point borrows the [`CurveDomain`] it lives on. Adding or subtracting
/// points on different curves panics.
#[derive(Clone, Debug)]
pub struct ProjectivePoint<'c> {
    curve: &'c CurveDomain,
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
}

impl<'c> ProjectivePoint<'c> {
    /// Additive identity of the group a.k.a. the point at infinity.
    pub fn identity(curve: &'c CurveDomain) -> Self {
        let params = curve.params();
        Self {
            curve,
            x: params.zero(),
            y: params.one(),
            z: params.zero(),
        }
    }

    /// Point with affine coordinates `(x, y)`.
    ///
    /// Coordinates must be reduced and satisfy the curve equation, otherwise
    /// [`Error::IllegalPoint`] is returned.
    pub fn from_affine(curve: &'c CurveDomain, x: &BigUint, y: &BigUint) -> Result<Self> {
        if x >= curve.p() || y >= curve.p() {
            return Err(Error::IllegalPoint("coordinate is not reduced modulo p"));
        }

        let point = Self::from_affine_unchecked(curve, x, y);
        point.check_invariants()?;
        Ok(point)
    }

    /// Point with affine coordinates `(x, y)`, without checking that it is on
    /// the curve. Coordinates are reduced modulo `p`.
    pub fn from_affine_unchecked(curve: &'c CurveDomain, x: &BigUint, y: &BigUint) -> Self {
        let params = curve.params();
        Self {
            curve,
            x: params.to_montgomery(x),
            y: params.to_montgomery(y),
            z: params.one(),
        }
    }

    /// Decode a SEC1 octet string. See [`sec1::decode_point`].
    pub fn from_sec1_bytes(curve: &'c CurveDomain, bytes: &[u8]) -> Result<Self> {
        sec1::decode_point(bytes, curve)
    }

    /// Encode as a SEC1 octet string. See [`sec1::encode_point`].
    pub fn to_sec1_bytes(&self, format: sec1::PointFormat) -> alloc::vec::Vec<u8> {
        sec1::encode_point(self, format)
    }

    /// Curve this point lives on.
    pub fn curve(&self) -> &'c CurveDomain {
        self.curve
    }

    /// Is this point the identity?
    pub fn is_identity(&self) -> bool {
        self.z.is_zero().into()
    }

    /// Jacobian coordinates `(X, Y, Z)` in the Montgomery domain.
    pub fn coordinates(&self) -> (&FieldElement, &FieldElement, &FieldElement) {
        (&self.x, &self.y, &self.z)
    }

    /// Replace `self` with a fresh identity on the same curve.
    pub(crate) fn set_identity(&mut self) {
        *self = Self::identity(self.curve);
    }

    /// `self = -self`
    pub fn negate(&mut self) {
        if !self.is_identity() {
            self.curve.params().neg_assign(&mut self.y);
        }
    }

    /// `self = self + other`, using `ws` for scratch memory.
    ///
    /// # Panics
    ///
    /// If `self` and `other` lie on different curves. The same holds for
    /// [`sub_assign_with`](Self::sub_assign_with) and the `+`/`-` operators.
    pub fn add_assign_with(&mut self, other: &Self, ws: &mut Workspace) {
        assert!(
            core::ptr::eq(self.curve, other.curve) || self.curve == other.curve,
            "points lie on different curves"
        );
        ws.fit(self.curve.params());
        point_arithmetic::add(self, other, ws);
    }

    /// `self = self - other`, using `ws` for scratch memory.
    ///
    /// # Panics
    ///
    /// If `self` and `other` lie on different curves.
    pub fn sub_assign_with(&mut self, other: &Self, ws: &mut Workspace) {
        let mut neg = other.clone();
        neg.negate();
        self.add_assign_with(&neg, ws);
    }

    /// `self = 2·self`, using `ws` for scratch memory.
    pub fn double_with(&mut self, ws: &mut Workspace) {
        ws.fit(self.curve.params());
        point_arithmetic::double(self, ws);
    }

    /// `self = k·self`, using `ws` for scratch memory.
    ///
    /// **This operation is variable time** with respect to `k`: the number of
    /// doublings depends only on the bit length, but additions are skipped
    /// for zero windows.
    pub fn mul_assign_with(&mut self, k: &BigInt, ws: &mut Workspace) {
        ws.fit(self.curve.params());
        mul::mul(self, k, ws);
    }

    /// Returns `2·self`.
    pub fn double(&self) -> Self {
        let mut out = self.clone();
        out.double_with(&mut Workspace::new(self.curve));
        out
    }

    /// Affine `x`-coordinate, `X/Z² mod p`.
    pub fn affine_x(&self) -> Result<BigUint> {
        let (_, zinv2, _) = self.z_inverses()?;
        let m = self.curve.modular();
        let x = self.curve.params().from_montgomery(&self.x);
        Ok(m.multiply(&x, &zinv2))
    }

    /// Affine `y`-coordinate, `Y/Z³ mod p`.
    pub fn affine_y(&self) -> Result<BigUint> {
        let (_, _, zinv3) = self.z_inverses()?;
        let m = self.curve.modular();
        let y = self.curve.params().from_montgomery(&self.y);
        Ok(m.multiply(&y, &zinv3))
    }

    /// Affine coordinates `(x, y)` with a single inversion.
    ///
    /// Returns [`Error::IllegalTransformation`] for the identity.
    pub fn to_affine(&self) -> Result<(BigUint, BigUint)> {
        let (_, zinv2, zinv3) = self.z_inverses()?;
        let params = self.curve.params();
        let m = self.curve.modular();
        let x = m.multiply(&params.from_montgomery(&self.x), &zinv2);
        let y = m.multiply(&params.from_montgomery(&self.y), &zinv3);
        Ok((x, y))
    }

    /// `(Z⁻¹, Z⁻², Z⁻³)` in the plain domain.
    fn z_inverses(&self) -> Result<(BigUint, BigUint, BigUint)> {
        if self.is_identity() {
            return Err(Error::IllegalTransformation);
        }

        let m = self.curve.modular();
        let z = self.curve.params().from_montgomery(&self.z);
        let zinv = m.invert(&z).ok_or(Error::IllegalTransformation)?;
        let zinv2 = m.square(&zinv);
        let zinv3 = m.multiply(&zinv2, &zinv);
        Ok((zinv, zinv2, zinv3))
    }

    /// Check that the point satisfies the curve equation.
    ///
    /// For Jacobian coordinates the equation reads
    /// `Y² = X³ + a·X·Z⁴ + b·Z⁶`, which holds for every representative of a
    /// point, whether or not `Z = 1`. The identity always passes.
    pub fn check_invariants(&self) -> Result<()> {
        if self.is_identity() {
            return Ok(());
        }

        let params = self.curve.params();
        let m = self.curve.modular();
        let x = params.from_montgomery(&self.x);
        let y = params.from_montgomery(&self.y);
        let z = params.from_montgomery(&self.z);

        let z2 = m.square(&z);
        let z4 = m.square(&z2);
        let z6 = m.multiply(&z4, &z2);

        let lhs = m.square(&y);
        let ax = m.multiply(&m.multiply(self.curve.a(), &x), &z4);
        let bz = m.multiply(self.curve.b(), &z6);
        let rhs = m.add(&m.add(&m.cube(&x), &ax), &bz);

        if lhs == rhs {
            Ok(())
        } else {
            Err(Error::IllegalPoint("point is not on the curve"))
        }
    }
}

impl PartialEq for ProjectivePoint<'_> {
    /// Points are equal when they lie on the same curve and represent the
    /// same affine point. Compares `X1·Z2² = X2·Z1²` and `Y1·Z2³ = Y2·Z1³`
    /// so no inversion is needed.
    fn eq(&self, other: &Self) -> bool {
        if self.curve != other.curve {
            return false;
        }

        match (self.is_identity(), other.is_identity()) {
            (true, true) => return true,
            (false, false) => (),
            _ => return false,
        }

        let params = self.curve.params();
        let mut scratch = MontyScratch::new(params);

        let z1_2 = params.square(&self.z, &mut scratch);
        let z2_2 = params.square(&other.z, &mut scratch);
        let x1 = params.mul(&self.x, &z2_2, &mut scratch);
        let x2 = params.mul(&other.x, &z1_2, &mut scratch);
        if x1 != x2 {
            return false;
        }

        let z1_3 = params.mul(&z1_2, &self.z, &mut scratch);
        let z2_3 = params.mul(&z2_2, &other.z, &mut scratch);
        let y1 = params.mul(&self.y, &z2_3, &mut scratch);
        let y2 = params.mul(&other.y, &z1_3, &mut scratch);
        y1 == y2
    }
}

impl Eq for ProjectivePoint<'_> {}

//
// Operator impls, each allocating a fresh `Workspace`.
//

impl<'c> Add<&ProjectivePoint<'c>> for &ProjectivePoint<'c> {
    type Output = ProjectivePoint<'c>;

    fn add(self, other: &ProjectivePoint<'c>) -> ProjectivePoint<'c> {
        let mut out = self.clone();
        out += other;
        out
    }
}

impl<'c> Add<&ProjectivePoint<'c>> for ProjectivePoint<'c> {
    type Output = ProjectivePoint<'c>;

    fn add(mut self, other: &ProjectivePoint<'c>) -> ProjectivePoint<'c> {
        self += other;
        self
    }
}

impl<'c> Add<ProjectivePoint<'c>> for ProjectivePoint<'c> {
    type Output = ProjectivePoint<'c>;

    fn add(self, other: ProjectivePoint<'c>) -> ProjectivePoint<'c> {
        self + &other
    }
}

impl<'c> AddAssign<&ProjectivePoint<'c>> for ProjectivePoint<'c> {
    fn add_assign(&mut self, rhs: &ProjectivePoint<'c>) {
        let mut ws = Workspace::new(self.curve);
        self.add_assign_with(rhs, &mut ws);
    }
}

impl<'c> Sub<&ProjectivePoint<'c>> for &ProjectivePoint<'c> {
    type Output = ProjectivePoint<'c>;

    fn sub(self, other: &ProjectivePoint<'c>) -> ProjectivePoint<'c> {
        let mut out = self.clone();
        out -= other;
        out
    }
}

impl<'c> Sub<&ProjectivePoint<'c>> for ProjectivePoint<'c> {
    type Output = ProjectivePoint<'c>;

    fn sub(mut self, other: &ProjectivePoint<'c>) -> ProjectivePoint<'c> {
        self -= other;
        self
    }
}

impl<'c> Sub<ProjectivePoint<'c>> for ProjectivePoint<'c> {
    type Output = ProjectivePoint<'c>;

    fn sub(self, other: ProjectivePoint<'c>) -> ProjectivePoint<'c> {
        self - &other
    }
}

impl<'c> SubAssign<&ProjectivePoint<'c>> for ProjectivePoint<'c> {
    fn sub_assign(&mut self, rhs: &ProjectivePoint<'c>) {
        let mut ws = Workspace::new(self.curve);
        self.sub_assign_with(rhs, &mut ws);
    }
}

impl<'c> Neg for ProjectivePoint<'c> {
    type Output = ProjectivePoint<'c>;

    fn neg(mut self) -> ProjectivePoint<'c> {
        self.negate();
        self
    }
}

impl<'c> Neg for &ProjectivePoint<'c> {
    type Output = ProjectivePoint<'c>;

    fn neg(self) -> ProjectivePoint<'c> {
        -self.clone()
    }
}

impl<'c> Mul<&BigInt> for &ProjectivePoint<'c> {
    type Output = ProjectivePoint<'c>;

    fn mul(self, k: &BigInt) -> ProjectivePoint<'c> {
        let mut out = self.clone();
        out *= k;
        out
    }
}

impl<'c> Mul<&BigInt> for ProjectivePoint<'c> {
    type Output = ProjectivePoint<'c>;

    fn mul(mut self, k: &BigInt) -> ProjectivePoint<'c> {
        self *= k;
        self
    }
}

impl MulAssign<&BigInt> for ProjectivePoint<'_> {
    fn mul_assign(&mut self, k: &BigInt) {
        let mut ws = Workspace::new(self.curve);
        self.mul_assign_with(k, &mut ws);
    }
}

#[cfg(test)]
mod tests {
    use super::ProjectivePoint;
    use crate::{CurveDomain, Error};
    use num_bigint::{BigInt, BigUint};

    fn toy() -> CurveDomain {
        CurveDomain::new(&BigUint::from(23u8), &BigInt::from(1), &BigInt::from(1)).unwrap()
    }

    fn pt(curve: &CurveDomain, x: u8, y: u8) -> ProjectivePoint<'_> {
        ProjectivePoint::from_affine(curve, &BigUint::from(x), &BigUint::from(y)).unwrap()
    }

    #[test]
    fn identity_is_canonical() {
        let curve = toy();
        let id = ProjectivePoint::identity(&curve);
        let (x, y, z) = id.coordinates();
        assert!(bool::from(x.is_zero()));
        assert_eq!(y, &curve.params().one());
        assert!(bool::from(z.is_zero()));
        assert!(id.is_identity());
        assert_eq!(id.check_invariants(), Ok(()));
    }

    #[test]
    fn identity_has_no_affine_coordinates() {
        let curve = toy();
        let id = curve.identity();
        assert_eq!(id.affine_x(), Err(Error::IllegalTransformation));
        assert_eq!(id.affine_y(), Err(Error::IllegalTransformation));
        assert_eq!(id.to_affine(), Err(Error::IllegalTransformation));
    }

    #[test]
    fn affine_round_trip() {
        let curve = toy();
        let p = pt(&curve, 3, 10);
        assert_eq!(p.affine_x().unwrap(), BigUint::from(3u8));
        assert_eq!(p.affine_y().unwrap(), BigUint::from(10u8));
    }

    #[test]
    fn off_curve_is_rejected() {
        let curve = toy();
        let err = ProjectivePoint::from_affine(&curve, &BigUint::from(3u8), &BigUint::from(11u8))
            .unwrap_err();
        assert!(matches!(err, Error::IllegalPoint(_)));

        let unreduced =
            ProjectivePoint::from_affine(&curve, &BigUint::from(26u8), &BigUint::from(10u8));
        assert!(matches!(unreduced, Err(Error::IllegalPoint(_))));

        let unchecked =
            ProjectivePoint::from_affine_unchecked(&curve, &BigUint::from(3u8), &BigUint::from(11u8));
        assert!(matches!(unchecked.check_invariants(), Err(Error::IllegalPoint(_))));
    }

    #[test]
    fn invariants_hold_for_non_trivial_z() {
        let curve = toy();
        let p = pt(&curve, 3, 10);
        let q = p.double() + &p;
        assert_ne!(q.coordinates().2, &curve.params().one());
        assert_eq!(q.check_invariants(), Ok(()));
        assert_eq!(q, pt(&curve, 19, 5));
    }

    #[test]
    fn negate() {
        let curve = toy();
        let p = pt(&curve, 3, 10);
        assert_eq!(-&p, pt(&curve, 3, 13));

        let mut id = curve.identity();
        id.negate();
        assert_eq!(id.coordinates().1, &curve.params().one());
    }

    #[test]
    fn equality_is_projective() {
        let curve = toy();
        let p = pt(&curve, 7, 12);
        let q = pt(&curve, 3, 10).double();
        assert_eq!(p, q);
        assert_ne!(p, curve.identity());
        assert_ne!(curve.identity(), p);
        assert_eq!(curve.identity(), curve.identity());
    }

    #[test]
    fn points_on_different_curves_differ() {
        let c1 = toy();
        let c2 = CurveDomain::new(&BigUint::from(23u8), &BigInt::from(1), &BigInt::from(2)).unwrap();
        assert_ne!(c1.identity(), c2.identity());
    }

    #[test]
    #[should_panic(expected = "different curves")]
    fn adding_across_curves_of_equal_width_panics() {
        let c1 = toy();
        let c2 = CurveDomain::new(&BigUint::from(23u8), &BigInt::from(1), &BigInt::from(2)).unwrap();
        let p = pt(&c1, 3, 10);
        let q = pt(&c2, 0, 5);
        let _ = &p + &q;
    }

    #[test]
    #[should_panic(expected = "different curves")]
    fn subtracting_across_curves_of_other_width_panics() {
        let toy = toy();
        let p256 = crate::named::secp256r1().unwrap();
        let mut p = pt(&toy, 3, 10);
        let mut ws = crate::Workspace::new(&toy);
        p.sub_assign_with(&p256.generator(), &mut ws);
    }

    #[test]
    fn adding_across_equal_domains_is_allowed() {
        let c1 = toy();
        let c2 = toy();
        let p = pt(&c1, 3, 10);
        let q = pt(&c2, 3, 10);
        assert_eq!(&p + &q, pt(&c1, 7, 12));
    }
}
