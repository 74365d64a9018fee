//! Block geometry and ray intersection for rendering voxel worlds.
//!
//! Every kind of block in a world has a [`BlockModel`](model::BlockModel) describing its
//! shape as a list of planar [quads](math::Quad) or [axis-aligned boxes](math::Aab), with
//! a [texture](texture::Texture) and optional [tint](tint::Tint) for each. A renderer walks
//! a [`Ray`](raycast::Ray) through the world grid and asks the model of each block it
//! passes through whether the ray strikes it; on a hit, the model writes the surface
//! color, normal, and texture coordinates into the ray and advances it to the hit point.
//!
//! Models are built once per block type and state, and are then immutable: one model may
//! be shared by any number of rendering threads, each with its own [`Ray`](raycast::Ray).
//! The [`catalog`] module builds the models of a few particular block types.
//!
//! ## Package features
//!
//! This package, `blockray`, defines the following feature flags:
//!
//! * `"std"` (enabled by default):
//!   If disabled, the library becomes `no_std` compatible, at this cost:
//!   * Error types do not implement [`std::error::Error`].
//!   * Float operations use [`libm`](https://docs.rs/libm) instead of the standard library.
//! * `"serde"`:
//!   Enables [`serde`] serialization of the declarative data types such as
//!   [`Tint`](tint::Tint), [`Facing`](facing::Facing), and
//!   [`AnimationSettings`](model::AnimationSettings).
#![no_std]
// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    warn(clippy::std_instead_of_core, clippy::std_instead_of_alloc)
)]

#[allow(unused_imports)] // false positive unused macro_use
#[macro_use]
extern crate alloc;
#[cfg(any(feature = "std", test))]
#[cfg_attr(test, macro_use)]
extern crate std;

pub mod catalog;
pub mod facing;
pub mod math;
pub mod model;
pub mod raycast;
pub mod scene;
pub mod texture;
pub mod tint;

// reexport for convenience of our users and tests
#[doc(hidden)]
pub use euclid;
