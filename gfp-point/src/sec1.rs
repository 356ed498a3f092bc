//! SEC1 elliptic curve point encoding.
//!
//! Implements the `Elliptic-Curve-Point-to-Octet-String` and
//! `Octet-String-to-Elliptic-Curve-Point` conversions of
//! [SEC 1: Elliptic Curve Cryptography] §2.3.3 and §2.3.4, together with the
//! hybrid format of ANSI X9.62.
//!
//! [SEC 1: Elliptic Curve Cryptography]: https://www.secg.org/sec1-v2.pdf

use crate::{CurveDomain, Error, ProjectivePoint, Result};
use alloc::vec::Vec;
use num_bigint::BigUint;
use num_integer::Integer;

/// Output format for [`encode_point`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PointFormat {
    /// `04 ‖ X ‖ Y`
    Uncompressed,

    /// `02 ‖ X` or `03 ‖ X`, by the parity of `Y`.
    Compressed,

    /// `06 ‖ X ‖ Y` or `07 ‖ X ‖ Y`, by the parity of `Y`.
    Hybrid,
}

impl TryFrom<u8> for PointFormat {
    type Error = Error;

    /// Format codes: `0` uncompressed, `1` compressed, `2` hybrid.
    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(PointFormat::Uncompressed),
            1 => Ok(PointFormat::Compressed),
            2 => Ok(PointFormat::Hybrid),
            _ => Err(Error::InvalidArgument("unknown point format")),
        }
    }
}

impl From<PointFormat> for u8 {
    fn from(format: PointFormat) -> u8 {
        match format {
            PointFormat::Uncompressed => 0,
            PointFormat::Compressed => 1,
            PointFormat::Hybrid => 2,
        }
    }
}

/// Tag byte which leads every encoded point.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Tag {
    /// Point at infinity
    Identity = 0,

    /// Compressed point with even y-coordinate
    CompressedEvenY = 2,

    /// Compressed point with odd y-coordinate
    CompressedOddY = 3,

    /// Uncompressed point
    Uncompressed = 4,

    /// Hybrid point with even y-coordinate
    HybridEvenY = 6,

    /// Hybrid point with odd y-coordinate
    HybridOddY = 7,
}

impl Tag {
    /// Parse a tag value from a byte.
    pub fn from_u8(byte: u8) -> Result<Self> {
        match byte {
            0 => Ok(Tag::Identity),
            2 => Ok(Tag::CompressedEvenY),
            3 => Ok(Tag::CompressedOddY),
            4 => Ok(Tag::Uncompressed),
            6 => Ok(Tag::HybridEvenY),
            7 => Ok(Tag::HybridOddY),
            _ => Err(Error::InvalidArgument("invalid SEC1 tag")),
        }
    }

    /// Is this a compressed point?
    pub fn is_compressed(self) -> bool {
        matches!(self, Tag::CompressedEvenY | Tag::CompressedOddY)
    }

    /// Is this a hybrid point?
    pub fn is_hybrid(self) -> bool {
        matches!(self, Tag::HybridEvenY | Tag::HybridOddY)
    }

    /// Parity of `y` carried in the tag's low bit.
    pub fn y_is_odd(self) -> bool {
        (self as u8) & 1 == 1
    }

    /// Length of the payload following a tag, for coordinates of
    /// `field_len` bytes.
    pub fn payload_len(self, field_len: usize) -> usize {
        match self {
            Tag::Identity => 0,
            Tag::CompressedEvenY | Tag::CompressedOddY => field_len,
            Tag::Uncompressed | Tag::HybridEvenY | Tag::HybridOddY => 2 * field_len,
        }
    }

    /// Tag for `format` and the given parity of `y`.
    fn for_format(format: PointFormat, y_is_odd: bool) -> Self {
        match (format, y_is_odd) {
            (PointFormat::Uncompressed, _) => Tag::Uncompressed,
            (PointFormat::Compressed, false) => Tag::CompressedEvenY,
            (PointFormat::Compressed, true) => Tag::CompressedOddY,
            (PointFormat::Hybrid, false) => Tag::HybridEvenY,
            (PointFormat::Hybrid, true) => Tag::HybridOddY,
        }
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> u8 {
        tag as u8
    }
}

/// Encode `point` as a SEC1 octet string.
///
/// The identity encodes as the single byte `00`. Coordinates are written
/// big-endian, zero padded to `⌈bits(p) / 8⌉` bytes.
pub fn encode_point(point: &ProjectivePoint<'_>, format: PointFormat) -> Vec<u8> {
    let (x, y) = match point.to_affine() {
        Ok(coords) => coords,
        Err(_) => return Vec::from([u8::from(Tag::Identity)]),
    };

    let n = point.curve().byte_len();
    let tag = Tag::for_format(format, y.is_odd());

    let mut out = Vec::with_capacity(1 + tag.payload_len(n));
    out.push(tag.into());
    write_field(&mut out, &x, n);
    if !tag.is_compressed() {
        write_field(&mut out, &y, n);
    }
    out
}

/// Decode a SEC1 octet string into a point on `curve`.
///
/// Input of at most one byte decodes to the identity. Compressed points are
/// decompressed through a modular square root, picking the root whose parity
/// matches the tag. Hybrid points carry both coordinates and are rejected
/// when the stored `y` differs from the decompressed one.
///
/// The payload must be exactly one (compressed) or two (uncompressed,
/// hybrid) coordinates of [`CurveDomain::byte_len`] bytes. The decoded point
/// always satisfies [`ProjectivePoint::check_invariants`].
pub fn decode_point<'c>(bytes: &[u8], curve: &'c CurveDomain) -> Result<ProjectivePoint<'c>> {
    let Some((&tag_byte, payload)) = bytes.split_first() else {
        return Ok(curve.identity());
    };

    if payload.is_empty() {
        return Ok(curve.identity());
    }

    let reject = |err: Error| {
        log::debug!(
            "rejecting SEC1 point with tag {:#04x} and {}-byte payload: {}",
            tag_byte,
            payload.len(),
            err
        );
        err
    };

    let tag = Tag::from_u8(tag_byte).map_err(reject)?;
    let n = curve.byte_len();
    if tag == Tag::Identity || payload.len() != tag.payload_len(n) {
        return Err(reject(Error::InvalidArgument("invalid SEC1 encoding length")));
    }

    let x = read_field(curve, &payload[..n]).map_err(reject)?;
    let y = if tag.is_compressed() {
        decompress_y(curve, &x, tag.y_is_odd()).map_err(reject)?
    } else {
        let y = read_field(curve, &payload[n..]).map_err(reject)?;
        if tag.is_hybrid() && decompress_y(curve, &x, tag.y_is_odd()).map_err(reject)? != y {
            return Err(reject(Error::IllegalPoint("hybrid y-coordinate mismatch")));
        }
        y
    };

    let point = ProjectivePoint::from_affine_unchecked(curve, &x, &y);
    point.check_invariants().map_err(reject)?;
    Ok(point)
}

/// Recover `y` from `x` and its parity: `y = √(x³ + ax + b) mod p`.
pub fn decompress_y(curve: &CurveDomain, x: &BigUint, y_is_odd: bool) -> Result<BigUint> {
    let m = curve.modular();
    let y = m
        .sqrt(&curve.rhs(x))
        .ok_or(Error::IllegalPoint("x-coordinate is not on the curve"))?;

    let y = if y.is_odd() == y_is_odd { y } else { m.neg(&y) };
    if y.is_odd() != y_is_odd {
        // y = 0 has no odd root
        return Err(Error::IllegalPoint("no square root with the requested parity"));
    }
    Ok(y)
}

/// Fixed-width big-endian coordinate, rejected when not below `p`.
fn read_field(curve: &CurveDomain, bytes: &[u8]) -> Result<BigUint> {
    let value = BigUint::from_bytes_be(bytes);
    if &value >= curve.p() {
        return Err(Error::IllegalPoint("coordinate is not reduced modulo p"));
    }
    Ok(value)
}

fn write_field(out: &mut Vec<u8>, value: &BigUint, len: usize) {
    let bytes = value.to_bytes_be();
    out.resize(out.len() + len - bytes.len(), 0);
    out.extend_from_slice(&bytes);
}
