//! This library is an internal component of [`blockray`],
//! which defines the block-local geometry: primitives, colors, and transforms.
//! Do not depend on this library; use only [`blockray`] instead.
//!
//! [`blockray`]: https://crates.io/crates/blockray/

#![no_std]
// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    warn(clippy::std_instead_of_core, clippy::std_instead_of_alloc)
)]

#[cfg(any(feature = "std", test))]
#[cfg_attr(test, macro_use)]
extern crate std;
#[allow(unused_imports)]
#[macro_use]
extern crate alloc;

/// Do not use this module directly; its contents are re-exported from `blockray`.
pub mod math;

/// Do not use this module directly; its contents are re-exported from `blockray`.
pub mod raycast;

// reexport for convenience of our tests
#[doc(hidden)]
pub use euclid;
