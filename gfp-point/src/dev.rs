//! Development-related functionality.

/// Implement group law tests for a curve with a known base point and order.
///
/// The first argument names the generated test module, the second is an
/// expression evaluating to a [`NamedCurve`](crate::named::NamedCurve).
#[macro_export]
macro_rules! test_group_law {
    ($name:ident, $curve:expr) => {
        mod $name {
            #[allow(unused_imports)]
            use super::*;
            use $crate::{
                ProjectivePoint, Workspace,
                named::NamedCurve,
                num_bigint::BigInt,
                sec1::PointFormat,
            };

            fn curve() -> NamedCurve {
                $curve
            }

            #[test]
            fn generator_is_on_curve() {
                let curve = curve();
                assert_eq!(curve.generator().check_invariants(), Ok(()));
                let (x, y) = curve.generator().to_affine().unwrap();
                let (gx, gy) = curve.generator_coordinates();
                assert_eq!((&x, &y), (gx, gy));
            }

            #[test]
            fn projective_identity_addition() {
                let curve = curve();
                let identity = curve.domain().identity();
                let generator = curve.generator();

                assert_eq!(&identity + &generator, generator);
                assert_eq!(&generator + &identity, generator);
            }

            #[test]
            fn projective_add_vs_double() {
                let curve = curve();
                let generator = curve.generator();
                assert_eq!(&generator + &generator, generator.double());
            }

            #[test]
            fn projective_add_and_sub() {
                let curve = curve();
                let basepoint = curve.generator();
                let identity = curve.domain().identity();

                assert_eq!(&basepoint - &basepoint, identity);
                assert_eq!(&basepoint + &(-&basepoint), identity);

                let double = basepoint.double();
                assert_eq!(&double - &basepoint, basepoint);
            }

            #[test]
            fn order_annihilates_generator() {
                let curve = curve();
                let n = BigInt::from(curve.order().clone());
                assert!((curve.generator() * &n).is_identity());

                let n_minus_1 = n - 1;
                assert_eq!(curve.generator() * &n_minus_1, -curve.generator());
            }

            #[test]
            fn scalar_multiplication_distributes() {
                let curve = curve();
                let g = curve.generator();
                let mut ws = Workspace::new(curve.domain());

                let k1 = BigInt::from(0x1234_5678_9abc_def0u64);
                let k2 = BigInt::from(-0x0fed_cba9_8765_4321i64);

                let mut lhs = g.clone();
                lhs.mul_assign_with(&(&k1 + &k2), &mut ws);

                let mut rhs = g.clone();
                rhs.mul_assign_with(&k1, &mut ws);
                let mut other = g.clone();
                other.mul_assign_with(&k2, &mut ws);
                rhs.add_assign_with(&other, &mut ws);

                assert_eq!(lhs, rhs);
            }

            #[test]
            fn small_scalars() {
                let curve = curve();
                let g = curve.generator();
                let identity = curve.domain().identity();

                assert_eq!(&g * &BigInt::from(0), identity);
                assert_eq!(&g * &BigInt::from(1), g);
                assert_eq!(&g * &BigInt::from(-1), -&g);
                assert_eq!(&g * &BigInt::from(2), g.double());
                assert_eq!(&g * &BigInt::from(-2), -g.double());
                assert_eq!(&g * &BigInt::from(3), &g.double() + &g);
            }

            #[test]
            fn sec1_round_trip() {
                let curve = curve();
                let mut point = curve.generator();
                point *= &BigInt::from(0xdead_beefu32);

                for format in [
                    PointFormat::Uncompressed,
                    PointFormat::Compressed,
                    PointFormat::Hybrid,
                ] {
                    let bytes = point.to_sec1_bytes(format);
                    let decoded = ProjectivePoint::from_sec1_bytes(curve.domain(), &bytes).unwrap();
                    assert_eq!(decoded, point);
                    assert_eq!(decoded.to_sec1_bytes(format), bytes);
                }

                let identity = curve.domain().identity();
                assert_eq!(identity.to_sec1_bytes(PointFormat::Compressed), [0u8]);
            }

            #[test]
            fn compressed_parity_matches_tag() {
                let curve = curve();
                let (_, y) = curve.generator().to_affine().unwrap();
                let bytes = curve.generator().to_sec1_bytes(PointFormat::Compressed);
                assert_eq!(bytes[0] & 1 == 1, y.bit(0));
                assert_eq!(bytes.len(), 1 + curve.domain().byte_len());

                let decoded = ProjectivePoint::from_sec1_bytes(curve.domain(), &bytes).unwrap();
                assert_eq!(decoded.affine_y().unwrap(), y);
            }
        }
    };
}
