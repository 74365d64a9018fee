//! Mathematical utilities and decisions.

pub use euclid::Angle;

mod aab;
pub use aab::*;
mod axis;
pub use axis::*;
mod color;
pub use color::*;
mod coord;
pub use coord::*;
mod face;
pub use face::*;
mod quad;
pub use quad::*;
#[cfg(feature = "serde")]
mod serde_impls;
mod transform;
pub use transform::*;

/// Error from constructing a geometric primitive out of invalid coordinates.
///
/// Primitives are built once, when a block type's geometry table is built, so these
/// errors indicate a mistake in that table rather than any condition of rendering.
#[derive(Clone, Copy, Debug, PartialEq, displaydoc::Display)]
#[non_exhaustive]
pub enum GeometryError {
    /// quad corners {origin:?}, {u_end:?}, {v_end:?} do not span a parallelogram
    DegenerateQuad {
        /// The first corner given.
        origin: [FreeCoordinate; 3],
        /// The corner at the end of the U edge.
        u_end: [FreeCoordinate; 3],
        /// The corner at the end of the V edge.
        v_end: [FreeCoordinate; 3],
    },
    /// box bounds are misordered or NaN: lower {lower:?} upper {upper:?}
    InvalidBox {
        /// The lower corner given.
        lower: [FreeCoordinate; 3],
        /// The upper corner given.
        upper: [FreeCoordinate; 3],
    },
}

#[cfg(feature = "std")]
impl std::error::Error for GeometryError {}

/// Strips the unit from a point, for inclusion in error reports.
#[inline]
pub(crate) fn to_array<U>(p: euclid::Point3D<FreeCoordinate, U>) -> [FreeCoordinate; 3] {
    [p.x, p.y, p.z]
}
