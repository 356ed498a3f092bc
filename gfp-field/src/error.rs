//! Error types.

use core::fmt;

/// Error type.
///
/// Returned when a modulus cannot be used for Montgomery arithmetic, i.e. it
/// is even or smaller than 3.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Error;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("field modulus must be an odd prime")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
