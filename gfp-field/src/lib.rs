#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod error;
mod modular;
mod monty;

pub use crate::{
    error::{Error, Result},
    modular::Modular,
    monty::{FieldElement, MontyParams, MontyScratch},
};
pub use bigint::{Limb, Word};
pub use num_bigint;
pub use rand_core;
pub use subtle;
pub use zeroize;
