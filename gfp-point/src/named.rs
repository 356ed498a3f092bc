//! Standard curve parameter sets.
//!
//! Parameters are taken from [SEC 2: Recommended Elliptic Curve Domain Parameters].
//!
//! [SEC 2: Recommended Elliptic Curve Domain Parameters]: https://www.secg.org/sec2-v2.pdf

use crate::{CurveDomain, ProjectivePoint, Result};
use hex_literal::hex;
use num_bigint::{BigInt, BigUint};

/// A curve together with its base point and the order of that point.
#[derive(Clone, Debug)]
pub struct NamedCurve {
    name: &'static str,
    domain: CurveDomain,
    gx: BigUint,
    gy: BigUint,
    order: BigUint,
}

impl NamedCurve {
    fn new(
        name: &'static str,
        p: &[u8],
        a: BigInt,
        b: &[u8],
        gx: &[u8],
        gy: &[u8],
        order: &[u8],
    ) -> Result<Self> {
        let b = BigInt::from(BigUint::from_bytes_be(b));
        let domain = CurveDomain::new(&BigUint::from_bytes_be(p), &a, &b)?;
        Ok(Self {
            name,
            domain,
            gx: BigUint::from_bytes_be(gx),
            gy: BigUint::from_bytes_be(gy),
            order: BigUint::from_bytes_be(order),
        })
    }

    /// SEC2 name of the curve.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Curve parameters.
    pub fn domain(&self) -> &CurveDomain {
        &self.domain
    }

    /// Affine coordinates of the base point.
    pub fn generator_coordinates(&self) -> (&BigUint, &BigUint) {
        (&self.gx, &self.gy)
    }

    /// Base point of the curve.
    pub fn generator(&self) -> ProjectivePoint<'_> {
        ProjectivePoint::from_affine_unchecked(&self.domain, &self.gx, &self.gy)
    }

    /// Order `n` of the base point.
    pub fn order(&self) -> &BigUint {
        &self.order
    }
}

/// NIST P-224.
pub fn secp224r1() -> Result<NamedCurve> {
    NamedCurve::new(
        "secp224r1",
        &hex!("ffffffffffffffffffffffffffffffff000000000000000000000001"),
        BigInt::from(-3),
        &hex!("b4050a850c04b3abf54132565044b0b7d7bfd8ba270b39432355ffb4"),
        &hex!("b70e0cbd6bb4bf7f321390b94a03c1d356c21122343280d6115c1d21"),
        &hex!("bd376388b5f723fb4c22dfe6cd4375a05a07476444d5819985007e34"),
        &hex!("ffffffffffffffffffffffffffff16a2e0b8f03e13dd29455c5c2a3d"),
    )
}

/// NIST P-256.
pub fn secp256r1() -> Result<NamedCurve> {
    NamedCurve::new(
        "secp256r1",
        &hex!("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff"),
        BigInt::from(-3),
        &hex!("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b"),
        &hex!("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"),
        &hex!("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"),
        &hex!("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551"),
    )
}

/// The Koblitz curve used by Bitcoin.
pub fn secp256k1() -> Result<NamedCurve> {
    NamedCurve::new(
        "secp256k1",
        &hex!("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"),
        BigInt::from(0),
        &hex!("07"),
        &hex!("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
        &hex!("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"),
        &hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"),
    )
}
