//! Mathematical utilities and decisions: coordinate systems, geometric primitives,
//! colors, and transforms.

#[doc(inline)]
pub use blockray_base::math::*;
