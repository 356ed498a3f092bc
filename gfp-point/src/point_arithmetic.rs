//! Jacobian point addition and doubling over a caller-supplied workspace.
//!
//! Both formulas write their results into workspace temporaries and then swap
//! them into the point, so no field element is allocated on the hot path.

use crate::{ProjectivePoint, Workspace};
use core::mem;

/// `lhs = lhs + rhs`
///
/// Jacobian addition, `add-1998-cmo-2`:
///
/// ```text
/// U1 = X1·Z2²   S1 = Y1·Z2³   U2 = X2·Z1²   S2 = Y2·Z1³
/// H  = U2 - U1  r  = S2 - S1
/// X3 = r² - H³ - 2·U1·H²
/// Y3 = r·(U1·H² - X3) - S1·H³
/// Z3 = Z1·Z2·H
/// ```
///
/// `H = 0` means the inputs share an `x`-coordinate: the result is `2·lhs`
/// when `r = 0` as well, and the identity otherwise.
pub(crate) fn add(lhs: &mut ProjectivePoint<'_>, rhs: &ProjectivePoint<'_>, ws: &mut Workspace) {
    if rhs.is_identity() {
        return;
    }

    if lhs.is_identity() {
        lhs.x.copy_from(&rhs.x);
        lhs.y.copy_from(&rhs.y);
        lhs.z.copy_from(&rhs.z);
        return;
    }

    let params = lhs.curve().params();

    let (h_is_zero, r_is_zero) = {
        let Workspace { scratch, temps } = &mut *ws;
        let [rhs_z2, u1, s1, lhs_z2, u2, s2, h, r, x, ..] = temps;

        params.square_into(rhs_z2, &rhs.z, scratch); // Z2²
        params.mul_into(u1, &lhs.x, rhs_z2, scratch); // U1
        params.mul_into(x, &rhs.z, rhs_z2, scratch); // Z2³
        params.mul_into(s1, &lhs.y, x, scratch); // S1

        params.square_into(lhs_z2, &lhs.z, scratch); // Z1²
        params.mul_into(u2, &rhs.x, lhs_z2, scratch); // U2
        params.mul_into(x, &lhs.z, lhs_z2, scratch); // Z1³
        params.mul_into(s2, &rhs.y, x, scratch); // S2

        params.sub_into(h, u2, u1);
        params.sub_into(r, s2, s1);

        (bool::from(h.is_zero()), bool::from(r.is_zero()))
    };

    if h_is_zero {
        if r_is_zero {
            double(lhs, ws);
        } else {
            lhs.set_identity();
        }
        return;
    }

    let Workspace { scratch, temps } = ws;
    let [rhs_z2, u1, s1, lhs_z2, u2, s2, h, r, x, y, z] = temps;

    params.square_into(u2, h, scratch); // H²
    params.mul_into(s2, u2, h, scratch); // H³
    params.mul_into(lhs_z2, u1, u2, scratch); // U1·H²

    params.square_into(x, r, scratch);
    params.sub_assign(x, s2);
    params.sub_assign(x, lhs_z2);
    params.sub_assign(x, lhs_z2); // X3

    params.sub_assign(lhs_z2, x);
    params.mul_into(y, r, lhs_z2, scratch);
    params.mul_into(rhs_z2, s1, s2, scratch); // S1·H³
    params.sub_assign(y, rhs_z2); // Y3

    params.mul_into(u2, &lhs.z, &rhs.z, scratch);
    params.mul_into(z, u2, h, scratch); // Z3

    mem::swap(&mut lhs.x, x);
    mem::swap(&mut lhs.y, y);
    mem::swap(&mut lhs.z, z);
}

/// `point = 2·point`
///
/// Jacobian doubling for an arbitrary `a`-coefficient, `dbl-1998-cmo-2`:
///
/// ```text
/// S  = 4·X1·Y1²
/// M  = 3·X1² + a·Z1⁴
/// X3 = M² - 2·S
/// Y3 = M·(S - X3) - 8·Y1⁴
/// Z3 = 2·Y1·Z1
/// ```
pub(crate) fn double(point: &mut ProjectivePoint<'_>, ws: &mut Workspace) {
    if point.is_identity() || bool::from(point.y.is_zero()) {
        point.set_identity();
        return;
    }

    let curve = point.curve();
    let params = curve.params();
    let Workspace { scratch, temps } = ws;
    let [y_2, s, z4, a_z4, m, u, x, y, z, ..] = temps;

    params.square_into(y_2, &point.y, scratch); // Y²
    params.mul_into(s, &point.x, y_2, scratch);
    params.double_assign(s);
    params.double_assign(s); // S

    params.square_into(a_z4, &point.z, scratch); // Z²
    params.square_into(z4, a_z4, scratch); // Z⁴
    params.mul_into(a_z4, curve.a_r(), z4, scratch); // a·Z⁴

    params.square_into(m, &point.x, scratch); // X²
    params.add_into(u, m, m);
    params.add_assign(u, m); // 3·X²
    params.add_into(m, a_z4, u); // M

    params.square_into(x, m, scratch);
    params.sub_assign(x, s);
    params.sub_assign(x, s); // X3

    params.square_into(u, y_2, scratch);
    params.double_assign(u);
    params.double_assign(u);
    params.double_assign(u); // 8·Y⁴

    params.sub_assign(s, x);
    params.mul_into(y, m, s, scratch);
    params.sub_assign(y, u); // Y3

    params.mul_into(z, &point.y, &point.z, scratch);
    params.double_assign(z); // Z3

    mem::swap(&mut point.x, x);
    mem::swap(&mut point.y, y);
    mem::swap(&mut point.z, z);
}

#[cfg(test)]
mod tests {
    use super::{add, double};
    use crate::{CurveDomain, ProjectivePoint, Workspace};
    use num_bigint::{BigInt, BigUint};

    fn toy() -> CurveDomain {
        CurveDomain::new(&BigUint::from(23u8), &BigInt::from(1), &BigInt::from(1)).unwrap()
    }

    fn pt(curve: &CurveDomain, x: u8, y: u8) -> ProjectivePoint<'_> {
        ProjectivePoint::from_affine(curve, &BigUint::from(x), &BigUint::from(y)).unwrap()
    }

    #[test]
    fn doubling_matches_known_value() {
        let curve = toy();
        let mut ws = Workspace::new(&curve);
        let mut p = pt(&curve, 3, 10);
        double(&mut p, &mut ws);
        assert_eq!(p, pt(&curve, 7, 12));
    }

    #[test]
    fn doubling_two_torsion_is_identity() {
        let curve = toy();
        let mut ws = Workspace::new(&curve);
        let mut p = pt(&curve, 4, 0);
        double(&mut p, &mut ws);
        assert!(p.is_identity());
    }

    #[test]
    fn adding_equal_points_doubles() {
        let curve = toy();
        let mut ws = Workspace::new(&curve);
        let mut p = pt(&curve, 3, 10);
        let q = p.clone();
        add(&mut p, &q, &mut ws);
        assert_eq!(p, pt(&curve, 7, 12));
    }

    #[test]
    fn adding_inverse_is_identity() {
        let curve = toy();
        let mut ws = Workspace::new(&curve);
        let mut p = pt(&curve, 3, 10);
        add(&mut p, &pt(&curve, 3, 13), &mut ws);
        assert!(p.is_identity());
        assert_eq!(p.coordinates().1, &curve.params().one());
    }

    #[test]
    fn identity_is_neutral() {
        let curve = toy();
        let mut ws = Workspace::new(&curve);
        let p = pt(&curve, 9, 16);

        let mut q = curve.identity();
        add(&mut q, &p, &mut ws);
        assert_eq!(q, p);

        add(&mut q, &curve.identity(), &mut ws);
        assert_eq!(q, p);
    }

    #[test]
    fn addition_of_distinct_points() {
        let curve = toy();
        let mut ws = Workspace::new(&curve);
        let mut p = pt(&curve, 3, 10);
        add(&mut p, &pt(&curve, 7, 12), &mut ws);
        assert_eq!(p, pt(&curve, 19, 5));
        assert_eq!(p.check_invariants(), Ok(()));

        // mixed-z inputs: 3P + 2P = 5P
        let mut two_p = pt(&curve, 3, 10);
        double(&mut two_p, &mut ws);
        add(&mut p, &two_p, &mut ws);
        assert_eq!(p, pt(&curve, 9, 16));
    }
}
