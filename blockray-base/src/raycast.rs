//! Rays expressed in the coordinate system of a single block, and the numeric tolerances
//! shared by every intersection routine.

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::Float as _;

use euclid::Point3D;

use crate::math::{
    FreeCoordinate, GridCoordinate, GridPoint, LocalPoint, LocalVector, WorldPoint, WorldVector,
};

/// Tolerance used by every intersection and containment comparison.
///
/// Intersections slightly behind the ray origin (down to `-EPSILON`) still count, a plane
/// is only considered hit when the ray is not within `EPSILON` of parallel to it, a
/// texture sample is only considered opaque when its alpha exceeds `EPSILON`, and hits
/// within `EPSILON` outside of the unit cube are still accepted by the containment check.
pub const EPSILON: FreeCoordinate = 0.000005;

/// Distance along the ray direction used to decide which block a ray origin that lies
/// exactly on a block boundary belongs to.
///
/// The origin is nudged by `direction * OFFSET` before rounding down, so a ray starting on
/// a face belongs to the block it is about to enter.
pub const OFFSET: FreeCoordinate = 0.0001;

/// A ray in the coordinate system of one block, in which that block occupies the unit
/// cube `[0, 1]³`.
///
/// The magnitude of `direction` is the unit of the ray parameter `t`.
#[allow(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalRay {
    /// The starting point of the ray.
    pub origin: LocalPoint,
    /// The direction in which the ray extends.
    pub direction: LocalVector,
}

impl LocalRay {
    /// Constructs a [`LocalRay`] from convertible types (e.g. 3-element arrays).
    /// Other than the use of [`Into`], this is equivalent to a struct literal.
    ///
    /// ```
    /// # extern crate blockray_base as blockray;
    /// use blockray::euclid::{point3, vec3};
    /// use blockray::raycast::LocalRay;
    ///
    /// assert_eq!(
    ///     LocalRay::new([0.5, 2.0, 0.5], [0., -1., 0.]),
    ///     LocalRay {
    ///         origin: point3(0.5, 2.0, 0.5),
    ///         direction: vec3(0., -1., 0.),
    ///     }
    /// );
    /// ```
    #[allow(clippy::missing_inline_in_public_items)] // is generic already
    pub fn new(origin: impl Into<LocalPoint>, direction: impl Into<LocalVector>) -> Self {
        Self {
            origin: origin.into(),
            direction: direction.into(),
        }
    }

    /// Converts a world-space ray into the coordinates of the block it is in or about to
    /// enter, returning that block's position together with the local ray.
    ///
    /// ```
    /// # extern crate blockray_base as blockray;
    /// use blockray::euclid::{point3, vec3};
    /// use blockray::raycast::LocalRay;
    ///
    /// // Starting exactly on the boundary between two blocks, moving in -X.
    /// let (cube, local) = LocalRay::from_world(point3(3.0, 0.25, -0.5), vec3(-1.0, 0.0, 0.0));
    /// assert_eq!(cube, point3(2, 0, -1));
    /// assert_eq!(local.origin, point3(1.0, 0.25, 0.5));
    /// ```
    #[inline]
    pub fn from_world(origin: WorldPoint, direction: WorldVector) -> (GridPoint, Self) {
        let cube = containing_cube(origin, direction);
        let local = Self {
            origin: Point3D::new(
                origin.x - FreeCoordinate::from(cube.x),
                origin.y - FreeCoordinate::from(cube.y),
                origin.z - FreeCoordinate::from(cube.z),
            ),
            direction: direction.cast_unit(),
        };
        (cube, local)
    }

    /// Returns the point at parameter `t` along this ray.
    #[inline]
    #[must_use]
    pub fn at(&self, t: FreeCoordinate) -> LocalPoint {
        self.origin + self.direction * t
    }

    /// Returns whether the point at parameter `t` lies within the unit cube, allowing
    /// [`EPSILON`] of tolerance on every side.
    ///
    /// ```
    /// # extern crate blockray_base as blockray;
    /// use blockray::raycast::LocalRay;
    ///
    /// let ray = LocalRay::new([0.5, 0.5, -1.0], [0.0, 0.0, 1.0]);
    /// assert!(!ray.is_within_block_at(0.5));
    /// assert!(ray.is_within_block_at(1.0));
    /// assert!(ray.is_within_block_at(2.0));
    /// assert!(!ray.is_within_block_at(2.1));
    /// ```
    #[inline]
    pub fn is_within_block_at(&self, t: FreeCoordinate) -> bool {
        let p = self.at(t);
        !(p.x < -EPSILON
            || p.x > 1.0 + EPSILON
            || p.y < -EPSILON
            || p.y > 1.0 + EPSILON
            || p.z < -EPSILON
            || p.z > 1.0 + EPSILON)
    }
}

/// Returns the block that the given world-space ray origin belongs to: the block it is
/// inside, or, if it is on a boundary, the block it is about to enter.
///
/// Coordinates beyond the range of [`GridCoordinate`] saturate.
#[inline]
pub fn containing_cube(origin: WorldPoint, direction: WorldVector) -> GridPoint {
    let nudged = origin + direction * OFFSET;
    Point3D::new(
        nudged.x.floor() as GridCoordinate,
        nudged.y.floor() as GridCoordinate,
        nudged.z.floor() as GridCoordinate,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::{point3, vec3};
    use rstest::rstest;

    #[rstest]
    #[case::interior([0.25, 0.5, 0.75], [1.0, 0.0, 0.0], [0, 0, 0])]
    #[case::boundary_entering_positive([1.0, 0.5, 0.5], [1.0, 0.0, 0.0], [1, 0, 0])]
    #[case::boundary_entering_negative([1.0, 0.5, 0.5], [-1.0, 0.0, 0.0], [0, 0, 0])]
    #[case::negative_coordinates([-0.5, -1.0, -2.5], [0.0, 1.0, 0.0], [-1, -1, -3])]
    fn containing_cube_cases(
        #[case] origin: [FreeCoordinate; 3],
        #[case] direction: [FreeCoordinate; 3],
        #[case] expected: [GridCoordinate; 3],
    ) {
        assert_eq!(
            containing_cube(origin.into(), direction.into()),
            GridPoint::from(expected)
        );
    }

    #[test]
    fn from_world_is_relative_to_cube() {
        let (cube, local) = LocalRay::from_world(point3(10.25, -3.5, 7.0), vec3(0.0, 0.0, -2.0));
        assert_eq!(cube, point3(10, -4, 6));
        assert_eq!(local.origin, point3(0.25, 0.5, 1.0));
        assert_eq!(local.direction, vec3(0.0, 0.0, -2.0));
    }

    #[test]
    fn within_block_tolerance() {
        let ray = LocalRay::new([0.5, 0.5, 0.5], [1.0, 0.0, 0.0]);
        assert!(ray.is_within_block_at(0.5 + EPSILON / 2.0));
        assert!(!ray.is_within_block_at(0.5 + EPSILON * 2.0));
        assert!(ray.is_within_block_at(-0.5 - EPSILON / 2.0));
        assert!(!ray.is_within_block_at(-0.5 - EPSILON * 2.0));
    }
}
