//! Caller-owned scratch memory for point arithmetic.

use crate::CurveDomain;
use core::array;
use gfp_field::{FieldElement, MontyParams, MontyScratch};
use zeroize::Zeroize;

/// Number of temporary field elements in a [`Workspace`].
///
/// Addition needs eleven, doubling nine.
pub const TEMPORARIES: usize = 11;

/// Scratch memory for point addition, doubling and scalar multiplication.
///
/// Holds the Montgomery reduction buffer and a fixed pool of temporary field
/// elements. Create one per computation (or per thread) and pass it to every
/// `*_with` call so that the arithmetic itself never allocates. Contents are
/// wiped on drop.
#[derive(Clone, Debug)]
pub struct Workspace {
    pub(crate) scratch: MontyScratch,
    pub(crate) temps: [FieldElement; TEMPORARIES],
}

impl Workspace {
    /// Allocate a workspace sized for the given curve.
    pub fn new(curve: &CurveDomain) -> Self {
        let params = curve.params();
        Self {
            scratch: MontyScratch::new(params),
            temps: array::from_fn(|_| params.zero()),
        }
    }

    /// Re-allocate the temporaries if they were sized for a modulus of a
    /// different word count.
    pub(crate) fn fit(&mut self, params: &MontyParams) {
        if self.temps[0].as_limbs().len() != params.words() {
            self.zeroize();
            self.temps = array::from_fn(|_| params.zero());
        }
    }
}

impl Zeroize for Workspace {
    fn zeroize(&mut self) {
        self.scratch.zeroize();
        self.temps.iter_mut().for_each(Zeroize::zeroize);
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        self.zeroize();
    }
}
