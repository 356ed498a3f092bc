//! Group law tests for the standard curves.

#![cfg(feature = "dev")]

use gfp_point::{named, test_group_law};

test_group_law!(secp224r1, named::secp224r1().unwrap());
test_group_law!(secp256r1, named::secp256r1().unwrap());
test_group_law!(secp256k1, named::secp256k1().unwrap());
