//! Numeric types used for coordinates and related quantities.

use euclid::{Point2D, Point3D, Vector3D};

/// Unit-of-measure type for positions within a single block, where the block occupies
/// the unit cube from `(0, 0, 0)` to `(1, 1, 1)`.
///
/// All block geometry (quads, boxes, transforms) is expressed in these units.
#[expect(clippy::exhaustive_enums)]
#[derive(Debug, Eq, PartialEq)]
pub enum Local {}

/// Unit-of-measure type for positions in the world grid, in which every block is a unit
/// cube whose lower corner has integer coordinates.
#[expect(clippy::exhaustive_enums)]
#[derive(Debug, Eq, PartialEq)]
pub enum World {}

/// Unit-of-measure type for texture coordinates, where the texture spans `0..=1` on
/// both axes.
#[expect(clippy::exhaustive_enums)]
#[derive(Debug, Eq, PartialEq)]
pub enum Texel {}

/// Coordinates that are locked to the block grid.
pub type GridCoordinate = i32;

/// Identifies a block (a cell of the world grid) by its lowest corner.
pub type GridPoint = Point3D<GridCoordinate, World>;

/// Coordinates that are not locked to the block grid.
///
/// Note: Because `GridCoordinate = i32` and `FreeCoordinate = f64`, which has
/// more than 32 bits of mantissa, the infallible conversion
/// `From<GridCoordinate> for FreeCoordinate` exists, which is often convenient.
pub type FreeCoordinate = f64;

/// Positions within a block.
pub type LocalPoint = Point3D<FreeCoordinate, Local>;

/// Displacements and directions within a block.
pub type LocalVector = Vector3D<FreeCoordinate, Local>;

/// Positions in the world.
pub type WorldPoint = Point3D<FreeCoordinate, World>;

/// Displacements and directions in the world.
pub type WorldVector = Vector3D<FreeCoordinate, World>;

/// Texture coordinates; `x` is U and `y` is V.
pub type TexPoint = Point2D<FreeCoordinate, Texel>;

/// The center of a block, about which every [`Transform`](crate::math::Transform)
/// rotates and scales.
pub const BLOCK_CENTER: LocalPoint = Point3D::new(0.5, 0.5, 0.5);
