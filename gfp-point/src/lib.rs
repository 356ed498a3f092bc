#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

//! ## Usage
//!
//! ```
//! use gfp_point::{CurveDomain, num_bigint::{BigInt, BigUint}, sec1::PointFormat};
//!
//! // y² = x³ + x + 1 over GF(23)
//! let curve = CurveDomain::new(&BigUint::from(23u8), &BigInt::from(1), &BigInt::from(1))?;
//! let p = curve.point(&BigUint::from(3u8), &BigUint::from(10u8))?;
//!
//! let mut ws = curve.workspace();
//! let mut q = p.clone();
//! q.mul_assign_with(&BigInt::from(2), &mut ws);
//! assert_eq!(q.to_affine()?, (BigUint::from(7u8), BigUint::from(12u8)));
//!
//! let bytes = q.to_sec1_bytes(PointFormat::Compressed);
//! assert_eq!(gfp_point::sec1::decode_point(&bytes, &curve)?, q);
//! # Ok::<(), gfp_point::Error>(())
//! ```

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "dev")]
pub mod dev;
pub mod named;
pub mod sec1;

mod curve;
mod error;
mod mul;
mod point_arithmetic;
mod projective;
mod workspace;

pub use crate::{
    curve::CurveDomain,
    error::{Error, Result},
    projective::ProjectivePoint,
    workspace::{TEMPORARIES, Workspace},
};
pub use gfp_field::{self, FieldElement};
pub use num_bigint;
