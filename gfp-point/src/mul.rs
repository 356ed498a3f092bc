//! Scalar multiplication.

use crate::{ProjectivePoint, Workspace, point_arithmetic};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

/// `point = k·point` with a 2-bit fixed window.
///
/// Precomputes `P`, `2P` and `3P`, then scans the magnitude of `k` two bits
/// at a time from the top: each window doubles twice and adds the matching
/// multiple when the window is non-zero. An odd bit length leaves bit 0 for
/// a final doubling and conditional add.
pub(crate) fn mul(point: &mut ProjectivePoint<'_>, k: &BigInt, ws: &mut Workspace) {
    let magnitude = k.magnitude();

    if magnitude.is_zero() || point.is_identity() {
        point.set_identity();
        return;
    }

    if k.sign() == Sign::Minus {
        point.negate();
    }

    if magnitude.is_one() {
        return;
    }

    if *magnitude == BigUint::from(2u8) {
        point_arithmetic::double(point, ws);
        return;
    }

    let p1 = point.clone();
    let mut p2 = point.clone();
    point_arithmetic::double(&mut p2, ws);
    let mut p3 = p2.clone();
    point_arithmetic::add(&mut p3, &p1, ws);

    point.set_identity();

    let bits = magnitude.bits();
    let mut pos = bits;
    while pos >= 2 + bits % 2 {
        pos -= 2;
        point_arithmetic::double(point, ws);
        point_arithmetic::double(point, ws);

        let window = (u8::from(magnitude.bit(pos + 1)) << 1) | u8::from(magnitude.bit(pos));
        match window {
            1 => point_arithmetic::add(point, &p1, ws),
            2 => point_arithmetic::add(point, &p2, ws),
            3 => point_arithmetic::add(point, &p3, ws),
            _ => (),
        }
    }

    if bits % 2 == 1 {
        point_arithmetic::double(point, ws);
        if magnitude.bit(0) {
            point_arithmetic::add(point, &p1, ws);
        }
    }
}
