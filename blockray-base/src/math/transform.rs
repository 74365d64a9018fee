//! Affine transforms of block-local geometry. This module is private but reexported by
//! its parent.

use euclid::{Angle, Transform3D, Vector3D, vec3};

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::Float as _;

use crate::math::{Axis, BLOCK_CENTER, Face6, FreeCoordinate, Local, LocalPoint, LocalVector};

/// An affine transformation of block-local space.
///
/// Every rotation, scale, and reflection constructed here acts about the center of the
/// block, [`BLOCK_CENTER`], so that geometry which fills the block still fills it
/// afterward. Transforms are used to derive oriented variants of geometry tables when
/// those tables are built, never while evaluating rays.
///
/// Quarter turns are exact: their matrices contain only `0`, `1` and `-1`, so applying
/// one four times reproduces the original coordinates bit for bit whenever those
/// coordinates are multiples of a power of two, as block geometry usually is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform(Transform3D<FreeCoordinate, Local, Local>);

impl Transform {
    /// The transform which leaves every point unchanged.
    pub const IDENTITY: Self = Self(Transform3D::new(
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, //
    ));

    /// Rotation by 90° about the normal of `face`, passing through the block center,
    /// counterclockwise when viewed from outside that face (the right-hand rule).
    ///
    /// ```
    /// # extern crate blockray_base as blockray;
    /// use blockray::math::{Face6, LocalVector, Transform};
    ///
    /// // Turning about the downward axis takes north to east.
    /// let turn = Transform::quarter_turn(Face6::NY);
    /// assert_eq!(
    ///     turn.transform_vector(Face6::NZ.normal_vector()),
    ///     Face6::PX.normal_vector::<blockray::math::Local>(),
    /// );
    /// ```
    #[must_use]
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn quarter_turn(face: Face6) -> Self {
        Self::about_center(rotation_basis(face.axis(), 0.0, face.signum()))
    }

    /// Rotation by `angle` about a line parallel to `axis` through the block center,
    /// counterclockwise when viewed from the positive end of the axis.
    ///
    /// For multiples of 90°, prefer [`Transform::quarter_turn()`], which has no rounding
    /// error.
    #[must_use]
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn rotation(axis: Axis, angle: Angle<FreeCoordinate>) -> Self {
        Self::rotation_about(axis, angle, BLOCK_CENTER)
    }

    /// Rotation by `angle` about a line parallel to `axis` through `pivot`,
    /// counterclockwise when viewed from the positive end of the axis.
    ///
    /// ```
    /// # extern crate blockray_base as blockray;
    /// use blockray::euclid::point3;
    /// use blockray::math::{Angle, Axis, Transform};
    ///
    /// let hinge = Transform::rotation_about(Axis::Z, Angle::degrees(-22.5), point3(0.0, 0.25, 0.5));
    /// assert_eq!(hinge.transform_point(point3(0.0, 0.25, 0.0)), point3(0.0, 0.25, 0.0));
    /// ```
    #[must_use]
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn rotation_about(axis: Axis, angle: Angle<FreeCoordinate>, pivot: LocalPoint) -> Self {
        let (sin, cos) = angle.radians.sin_cos();
        Self::about(pivot, rotation_basis(axis, cos, sin))
    }

    /// Scaling by `factor` toward (or away from) the block center.
    #[must_use]
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn scale(factor: FreeCoordinate) -> Self {
        Self::about_center(Transform3D::scale(factor, factor, factor))
    }

    /// Reflection across the plane through the block center that is perpendicular to
    /// `axis`.
    #[must_use]
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn reflection(axis: Axis) -> Self {
        let mut scale = Vector3D::<FreeCoordinate, Local>::splat(1.0);
        scale[axis] = -1.0;
        Self::about_center(Transform3D::scale(scale.x, scale.y, scale.z))
    }

    /// Translation by `offset`.
    #[inline]
    #[must_use]
    pub fn translation(offset: LocalVector) -> Self {
        Self(Transform3D::translation(offset.x, offset.y, offset.z))
    }

    /// Returns the transform which applies `self` and then `next`.
    ///
    /// ```
    /// # extern crate blockray_base as blockray;
    /// use blockray::math::{Face6, Transform};
    ///
    /// let there_and_back = Transform::quarter_turn(Face6::PX).then(Transform::quarter_turn(Face6::NX));
    /// assert_eq!(there_and_back, Transform::IDENTITY);
    /// ```
    #[inline]
    #[must_use]
    pub fn then(self, next: Self) -> Self {
        Self(self.0.then(&next.0))
    }

    /// Returns the transform which applies `self` `count` times in succession.
    #[must_use]
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn repeat(self, count: u32) -> Self {
        (0..count).fold(Self::IDENTITY, |acc, _| acc.then(self))
    }

    /// Applies this transform to a point.
    #[inline]
    pub fn transform_point(&self, point: LocalPoint) -> LocalPoint {
        let m = &self.0;
        (self.transform_vector(point.to_vector()) + vec3(m.m41, m.m42, m.m43)).to_point()
    }

    /// Applies the linear part of this transform to a vector (ignoring translation).
    #[inline]
    pub fn transform_vector(&self, vector: LocalVector) -> LocalVector {
        self.0.transform_vector3d(vector)
    }

    /// Returns whether this transform preserves handedness, i.e. contains no reflection.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn preserves_orientation(&self) -> bool {
        self.0.determinant() > 0.0
    }

    fn about_center(linear: Transform3D<FreeCoordinate, Local, Local>) -> Self {
        Self::about(BLOCK_CENTER, linear)
    }

    /// Conjugates `linear` so that it acts about `pivot` instead of the origin.
    fn about(pivot: LocalPoint, linear: Transform3D<FreeCoordinate, Local, Local>) -> Self {
        let c = pivot.to_vector();
        Self(
            Transform3D::translation(-c.x, -c.y, -c.z)
                .then(&linear)
                .then(&Transform3D::translation(c.x, c.y, c.z)),
        )
    }
}

impl Default for Transform {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Builds the linear map rotating about `axis` (through the origin) given the cosine and
/// sine of the angle. Each row is the image of one basis vector.
fn rotation_basis(
    axis: Axis,
    cos: FreeCoordinate,
    sin: FreeCoordinate,
) -> Transform3D<FreeCoordinate, Local, Local> {
    let (ex, ey, ez): ([FreeCoordinate; 3], [FreeCoordinate; 3], [FreeCoordinate; 3]) = match axis
    {
        Axis::X => ([1.0, 0.0, 0.0], [0.0, cos, sin], [0.0, -sin, cos]),
        Axis::Y => ([cos, 0.0, -sin], [0.0, 1.0, 0.0], [sin, 0.0, cos]),
        Axis::Z => ([cos, sin, 0.0], [-sin, cos, 0.0], [0.0, 0.0, 1.0]),
    };
    Transform3D::new(
        ex[0], ex[1], ex[2], 0.0, //
        ey[0], ey[1], ey[2], 0.0, //
        ez[0], ez[1], ez[2], 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::point3;
    use rstest::rstest;

    #[rstest]
    fn quarter_turn_four_times_is_identity(
        #[values(Face6::NX, Face6::NY, Face6::NZ, Face6::PX, Face6::PY, Face6::PZ)] face: Face6,
    ) {
        let turn = Transform::quarter_turn(face);
        let p = point3(0.125, 0.75, 1.0);
        assert_eq!(turn.repeat(4).transform_point(p), p);
        assert_ne!(turn.transform_point(p), p);
    }

    #[rstest]
    fn quarter_turn_keeps_center_and_own_axis(
        #[values(Face6::NX, Face6::NY, Face6::NZ, Face6::PX, Face6::PY, Face6::PZ)] face: Face6,
    ) {
        let turn = Transform::quarter_turn(face);
        assert_eq!(turn.transform_point(BLOCK_CENTER), BLOCK_CENTER);
        assert_eq!(
            turn.transform_vector(face.normal_vector()),
            face.normal_vector()
        );
        assert!(turn.preserves_orientation());
    }

    /// The directions of the quarter turns, checked against the right-hand rule.
    #[rstest]
    #[case(Face6::PX, Face6::PY, Face6::PZ)]
    #[case(Face6::PY, Face6::PZ, Face6::PX)]
    #[case(Face6::PZ, Face6::PX, Face6::PY)]
    #[case(Face6::NY, Face6::NZ, Face6::PX)]
    #[case(Face6::NX, Face6::PY, Face6::NZ)]
    fn quarter_turn_direction(#[case] about: Face6, #[case] from: Face6, #[case] to: Face6) {
        assert_eq!(
            Transform::quarter_turn(about).transform_vector(from.normal_vector()),
            to.normal_vector()
        );
    }

    #[rstest]
    fn rotation_agrees_with_quarter_turn(#[values(Axis::X, Axis::Y, Axis::Z)] axis: Axis) {
        let general = Transform::rotation(axis, Angle::frac_pi_2());
        let exact = Transform::quarter_turn(axis.positive_face());
        let p = point3(0.25, 0.0, 0.875);
        let difference = general.transform_point(p) - exact.transform_point(p);
        assert!(difference.length() < 1e-12, "{difference:?}");
    }

    #[test]
    fn scale_about_center() {
        let t = Transform::scale(0.5);
        assert_eq!(t.transform_point(point3(0.0, 0.0, 0.0)), point3(0.25, 0.25, 0.25));
        assert_eq!(t.transform_point(point3(1.0, 1.0, 1.0)), point3(0.75, 0.75, 0.75));
    }

    #[test]
    fn reflection_mirrors_one_axis() {
        let t = Transform::reflection(Axis::X);
        assert_eq!(t.transform_point(point3(0.25, 0.5, 0.75)), point3(0.75, 0.5, 0.75));
        assert!(!t.preserves_orientation());
        assert_eq!(t.then(t), Transform::IDENTITY);
    }

    #[test]
    fn then_applies_in_order() {
        let t = Transform::translation(vec3(1.0, 0.0, 0.0)).then(Transform::scale(2.0));
        // (0.5 + 1) scaled about 0.5 by 2 is 2.5
        assert_eq!(t.transform_point(BLOCK_CENTER), point3(2.5, 0.5, 0.5));
    }
}
