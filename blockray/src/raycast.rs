//! Rays and the state a ray carries while it is traced through the world.

use euclid::point2;

#[doc(inline)]
pub use blockray_base::raycast::*;

use crate::math::{
    FreeCoordinate, GridPoint, LocalVector, Rgba, TexPoint, WorldPoint, WorldVector,
};

/// A ray being traced through the world, together with the results of the most recent
/// successful intersection.
///
/// [`BlockModel::intersect()`](crate::model::BlockModel::intersect) reads `origin` and
/// `direction`, and on a hit writes every other field and advances `origin` to the hit
/// point. On a miss it leaves the ray exactly as it was.
///
/// Each rendering thread owns its own rays; models never retain them.
#[allow(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Current position of the ray; after a hit, the hit point.
    pub origin: WorldPoint,
    /// Direction of travel. Its magnitude is the unit of `t` and `distance`.
    pub direction: WorldVector,
    /// Ray parameter of the most recent hit, measured from the origin the ray had before
    /// that hit.
    pub t: FreeCoordinate,
    /// Total ray parameter traveled across all hits so far.
    pub distance: FreeCoordinate,
    /// Surface color at the most recent hit, after tinting.
    pub color: Rgba,
    /// Surface normal at the most recent hit, as reported by the model.
    pub normal: WorldVector,
    /// Texture coordinates at the most recent hit.
    pub uv: TexPoint,
}

impl Ray {
    /// Constructs a [`Ray`] which has not hit anything yet.
    ///
    /// ```
    /// use blockray::raycast::Ray;
    ///
    /// let ray = Ray::new([0.5, 2.0, 0.5], [0.0, -1.0, 0.0]);
    /// assert_eq!(ray.distance, 0.0);
    /// assert_eq!(ray.t, f64::INFINITY);
    /// ```
    #[allow(clippy::missing_inline_in_public_items)] // is generic already
    pub fn new(origin: impl Into<WorldPoint>, direction: impl Into<WorldVector>) -> Self {
        Self {
            origin: origin.into(),
            direction: direction.into(),
            t: FreeCoordinate::INFINITY,
            distance: 0.0,
            color: Rgba::TRANSPARENT,
            normal: WorldVector::zero(),
            uv: point2(0.0, 0.0),
        }
    }

    /// Returns the block this ray is in, or about to enter if its origin is on a block
    /// boundary.
    #[inline]
    pub fn cube(&self) -> GridPoint {
        containing_cube(self.origin, self.direction)
    }

    /// Returns this ray in the coordinate system of [`Ray::cube()`].
    #[inline]
    pub fn local(&self) -> LocalRay {
        self.cube_and_local().1
    }

    /// Returns both [`Ray::cube()`] and [`Ray::local()`].
    #[inline]
    pub fn cube_and_local(&self) -> (GridPoint, LocalRay) {
        LocalRay::from_world(self.origin, self.direction)
    }

    /// Records a hit at ray parameter `t`: sets `t`, `normal`, and `uv`, adds `t` to
    /// `distance`, and moves `origin` to the hit point.
    ///
    /// Color is left for the caller to set, since tinting depends on the hit point.
    pub(crate) fn advance_to_hit(&mut self, t: FreeCoordinate, normal: LocalVector, uv: TexPoint) {
        self.t = t;
        self.distance += t;
        self.origin += self.direction * t;
        self.normal = normal.cast_unit();
        self.uv = uv;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::{point3, vec3};

    #[test]
    fn advance_to_hit_accumulates() {
        let mut ray = Ray::new([0.5, 3.0, 0.5], [0.0, -2.0, 0.0]);
        ray.advance_to_hit(0.5, vec3(0.0, 1.0, 0.0), point2(0.25, 0.75));
        assert_eq!(ray.origin, point3(0.5, 2.0, 0.5));
        ray.advance_to_hit(0.25, vec3(0.0, 1.0, 0.0), point2(0.25, 0.75));
        assert_eq!(ray.origin, point3(0.5, 1.5, 0.5));
        assert_eq!(ray.distance, 0.75);
        assert_eq!(ray.t, 0.25);
        assert_eq!(ray.normal, vec3(0.0, 1.0, 0.0));
    }

    #[test]
    fn local_is_relative_to_cube() {
        let ray = Ray::new([-2.5, 7.25, 4.0], [0.0, 0.0, 1.0]);
        assert_eq!(ray.cube(), point3(-3, 7, 4));
        assert_eq!(ray.local().origin, point3(0.5, 0.25, 0.0));
    }
}
