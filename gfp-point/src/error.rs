//! Error types.

use core::fmt;

/// Error type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The caller passed something that can never be valid: an unknown
    /// encoding tag or format code, a payload of the wrong length, or a
    /// modulus Montgomery arithmetic cannot use.
    InvalidArgument(&'static str),

    /// Coordinates which do not describe a point on the curve.
    IllegalPoint(&'static str),

    /// Affine coordinates were requested for the point at infinity.
    IllegalTransformation,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Error::IllegalPoint(msg) => write!(f, "illegal point: {msg}"),
            Error::IllegalTransformation => {
                f.write_str("the point at infinity has no affine coordinates")
            }
        }
    }
}

impl From<gfp_field::Error> for Error {
    fn from(_: gfp_field::Error) -> Error {
        Error::InvalidArgument("field modulus must be an odd prime")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
