use euclid::point2;

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::Float as _;

use crate::math::{
    FreeCoordinate, GeometryError, LocalPoint, LocalVector, TexPoint, Transform, to_array,
};
use crate::raycast::{EPSILON, LocalRay};

/// A planar parallelogram in block-local coordinates, with a texture mapped onto it.
///
/// A quad is defined by three corners: `origin`, the end of its U edge, and the end of its
/// V edge; the fourth corner is implied. The texture rectangle `[u0, u1, v0, v1]` is
/// mapped linearly so that `origin` has texture coordinates `(u0, v0)`, the end of the U
/// edge has `(u1, v0)`, and the end of the V edge has `(u0, v1)`.
///
/// The normal is the normalized cross product of the U edge and the V edge; it is always
/// derived from the corners, including after [transformation](Quad::transformed).
///
/// Quads are immutable once constructed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    origin: LocalPoint,
    u_edge: LocalVector,
    v_edge: LocalVector,
    /// Reciprocals of the squared lengths of the edges.
    u_inv_len2: FreeCoordinate,
    v_inv_len2: FreeCoordinate,
    normal: LocalVector,
    /// Plane constant: `normal · p + plane_d == 0` on the plane.
    plane_d: FreeCoordinate,
    /// `[u0, u1, v0, v1]` as given.
    uv: [FreeCoordinate; 4],
    double_sided: bool,
}

/// The result of a successful [`Quad::intersect()`].
#[allow(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadHit {
    /// Ray parameter of the hit point.
    pub t: FreeCoordinate,
    /// Texture coordinates of the hit point, already mapped into the quad's texture
    /// rectangle.
    pub uv: TexPoint,
}

impl Quad {
    /// Constructs a single-sided quad from three corners and a texture rectangle
    /// `[u0, u1, v0, v1]`.
    ///
    /// Panics if the corners do not span a parallelogram of nonzero area; see
    /// [`Quad::try_new()`] for the non-panicking version.
    #[inline]
    #[track_caller]
    pub fn new(
        origin: impl Into<LocalPoint>,
        u_end: impl Into<LocalPoint>,
        v_end: impl Into<LocalPoint>,
        uv: [FreeCoordinate; 4],
    ) -> Self {
        match Self::try_new(origin.into(), u_end.into(), v_end.into(), uv) {
            Ok(quad) => quad,
            Err(e) => panic!("invalid quad: {e}"),
        }
    }

    /// Constructs a single-sided quad from three corners and a texture rectangle
    /// `[u0, u1, v0, v1]`, or returns an error if the corners are collinear, coincident,
    /// or not finite.
    ///
    /// ```
    /// # extern crate blockray_base as blockray;
    /// use blockray::math::{LocalPoint, Quad};
    ///
    /// let floor = Quad::try_new(
    ///     LocalPoint::new(0.0, 0.0, 0.0),
    ///     LocalPoint::new(1.0, 0.0, 0.0),
    ///     LocalPoint::new(0.0, 0.0, 1.0),
    ///     [0.0, 1.0, 0.0, 1.0],
    /// ).unwrap();
    /// assert_eq!(floor.normal(), blockray::math::LocalVector::new(0.0, -1.0, 0.0));
    ///
    /// assert!(Quad::try_new(
    ///     LocalPoint::new(0.0, 0.0, 0.0),
    ///     LocalPoint::new(1.0, 0.0, 0.0),
    ///     LocalPoint::new(2.0, 0.0, 0.0),
    ///     [0.0, 1.0, 0.0, 1.0],
    /// ).is_err());
    /// ```
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn try_new(
        origin: LocalPoint,
        u_end: LocalPoint,
        v_end: LocalPoint,
        uv: [FreeCoordinate; 4],
    ) -> Result<Self, GeometryError> {
        let u_edge = u_end - origin;
        let v_edge = v_end - origin;
        let cross = u_edge.cross(v_edge);
        let cross_length = cross.length();
        let finite = cross_length.is_finite() && origin.to_vector().length().is_finite();
        if !(cross_length > 0.0 && finite) {
            return Err(GeometryError::DegenerateQuad {
                origin: to_array(origin),
                u_end: to_array(u_end),
                v_end: to_array(v_end),
            });
        }
        let normal = cross / cross_length;
        Ok(Self {
            origin,
            u_edge,
            v_edge,
            u_inv_len2: 1.0 / u_edge.square_length(),
            v_inv_len2: 1.0 / v_edge.square_length(),
            normal,
            plane_d: -normal.dot(origin.to_vector()),
            uv,
            double_sided: false,
        })
    }

    /// Returns a copy of this quad which is double-sided: models report its normal as
    /// facing whichever side a ray arrives from.
    #[inline]
    #[must_use]
    pub const fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    /// Whether this quad is double-sided; see [`Quad::double_sided()`].
    #[inline]
    pub const fn is_double_sided(&self) -> bool {
        self.double_sided
    }

    /// Returns the unit normal of the quad's plane.
    #[inline]
    pub const fn normal(&self) -> LocalVector {
        self.normal
    }

    /// Returns the three defining corners: origin, end of the U edge, and end of the
    /// V edge.
    #[inline]
    pub fn corners(&self) -> [LocalPoint; 3] {
        [
            self.origin,
            self.origin + self.u_edge,
            self.origin + self.v_edge,
        ]
    }

    /// Returns the texture rectangle `[u0, u1, v0, v1]`.
    #[inline]
    pub const fn uv_rect(&self) -> [FreeCoordinate; 4] {
        self.uv
    }

    /// Returns the area of the quad.
    #[inline]
    pub fn area(&self) -> FreeCoordinate {
        self.u_edge.cross(self.v_edge).length()
    }

    /// Returns a point on the quad, uniformly distributed over its area.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> LocalPoint {
        let a: FreeCoordinate = rng.random();
        let b: FreeCoordinate = rng.random();
        self.origin + self.u_edge * a + self.v_edge * b
    }

    /// Finds where `ray` strikes this quad, if it does so with a ray parameter greater
    /// than `-EPSILON` and less than `t_max`.
    ///
    /// Both sides of the quad can be hit; whether a quad is double-sided only affects the
    /// normal that models report. Rays within [`EPSILON`] of parallel to the plane miss.
    /// Points on the edges of the quad count as hits.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn intersect(&self, ray: &LocalRay, t_max: FreeCoordinate) -> Option<QuadHit> {
        let denom = ray.direction.dot(self.normal);
        if !(denom < -EPSILON || denom > EPSILON) {
            return None;
        }
        let t = -(ray.origin.to_vector().dot(self.normal) + self.plane_d) / denom;
        if !(t > -EPSILON && t < t_max) {
            return None;
        }
        let relative = ray.at(t) - self.origin;
        let u = relative.dot(self.u_edge) * self.u_inv_len2;
        let v = relative.dot(self.v_edge) * self.v_inv_len2;
        if (0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v) {
            let [u0, u1, v0, v1] = self.uv;
            Some(QuadHit {
                t,
                uv: point2(u0 + u * (u1 - u0), v0 + v * (v1 - v0)),
            })
        } else {
            None
        }
    }

    /// Returns this quad with every corner transformed, keeping its texture rectangle and
    /// sidedness. The normal is derived anew from the transformed corners, so a
    /// reflection reverses which side the normal points out of.
    ///
    /// Panics if the transform collapses the quad to zero area.
    #[must_use]
    #[track_caller]
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn transformed(&self, transform: &Transform) -> Self {
        let [o, u, v] = self.corners().map(|p| transform.transform_point(p));
        let mut quad = Self::new(o, u, v, self.uv);
        quad.double_sided = self.double_sided;
        quad
    }

    /// Returns whether this quad and `other` have the same corners, within `tolerance`
    /// on each coordinate, and the same texture rectangle and sidedness.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn approx_eq(&self, other: &Self, tolerance: FreeCoordinate) -> bool {
        self.uv == other.uv
            && self.double_sided == other.double_sided
            && self
                .corners()
                .iter()
                .zip(other.corners().iter())
                .all(|(a, b)| (*a - *b).abs().to_array().iter().all(|&c| c <= tolerance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Axis, Face6};
    use euclid::{Angle, point3, vec3};
    use rand::SeedableRng as _;
    use rstest::rstest;

    /// A quad standing vertically across the middle of the block, facing +Z.
    fn middle_quad() -> Quad {
        Quad::new(
            point3(0.0, 0.0, 0.5),
            point3(1.0, 0.0, 0.5),
            point3(0.0, 1.0, 0.5),
            [0.0, 1.0, 0.0, 1.0],
        )
    }

    #[test]
    fn derived_normal_and_area() {
        let quad = middle_quad();
        assert_eq!(quad.normal(), vec3(0.0, 0.0, 1.0));
        assert_eq!(quad.area(), 1.0);
    }

    #[test]
    fn center_hit_along_normal() {
        let quad = Quad::new(
            point3(0.0, 0.0, 0.5),
            point3(1.0, 0.0, 0.5),
            point3(0.0, 1.0, 0.5),
            [0.25, 0.75, 0.5, 1.0],
        );
        let ray = LocalRay::new([0.5, 0.5, 2.0], [0.0, 0.0, -1.0]);
        assert_eq!(
            quad.intersect(&ray, FreeCoordinate::INFINITY),
            Some(QuadHit {
                t: 1.5,
                uv: point2(0.5, 0.75),
            })
        );
    }

    #[test]
    fn back_face_is_hit() {
        let ray = LocalRay::new([0.5, 0.5, -1.0], [0.0, 0.0, 1.0]);
        assert_eq!(
            middle_quad()
                .intersect(&ray, FreeCoordinate::INFINITY)
                .map(|hit| hit.t),
            Some(1.5)
        );
    }

    #[rstest]
    #[case::parallel([0.5, 0.5, 0.0], [1.0, 0.0, 0.0], FreeCoordinate::INFINITY)]
    #[case::behind([0.5, 0.5, 0.0], [0.0, 0.0, -1.0], FreeCoordinate::INFINITY)]
    #[case::beyond_t_max([0.5, 0.5, 0.0], [0.0, 0.0, 1.0], 0.5)]
    #[case::outside_u([1.5, 0.5, 0.0], [0.0, 0.0, 1.0], FreeCoordinate::INFINITY)]
    #[case::outside_v([0.5, -0.25, 0.0], [0.0, 0.0, 1.0], FreeCoordinate::INFINITY)]
    fn misses(
        #[case] origin: [FreeCoordinate; 3],
        #[case] direction: [FreeCoordinate; 3],
        #[case] t_max: FreeCoordinate,
    ) {
        assert_eq!(
            middle_quad().intersect(&LocalRay::new(origin, direction), t_max),
            None
        );
    }

    #[test]
    fn edge_counts_as_hit() {
        let ray = LocalRay::new([1.0, 1.0, 0.0], [0.0, 0.0, 1.0]);
        assert_eq!(
            middle_quad()
                .intersect(&ray, FreeCoordinate::INFINITY)
                .map(|hit| hit.uv),
            Some(point2(1.0, 1.0))
        );
    }

    #[test]
    fn degenerate_is_error() {
        assert_eq!(
            Quad::try_new(
                point3(0.5, 0.5, 0.5),
                point3(0.5, 0.5, 0.5),
                point3(0.0, 1.0, 0.5),
                [0.0, 1.0, 0.0, 1.0],
            ),
            Err(GeometryError::DegenerateQuad {
                origin: [0.5, 0.5, 0.5],
                u_end: [0.5, 0.5, 0.5],
                v_end: [0.0, 1.0, 0.5],
            })
        );
        assert!(
            Quad::try_new(
                point3(0.0, 0.0, FreeCoordinate::NAN),
                point3(1.0, 0.0, 0.0),
                point3(0.0, 1.0, 0.0),
                [0.0, 1.0, 0.0, 1.0],
            )
            .is_err()
        );
    }

    #[test]
    fn double_sided_flag_survives_transform() {
        let quad = middle_quad().double_sided();
        assert!(quad.is_double_sided());
        assert!(
            quad.transformed(&Transform::quarter_turn(Face6::PY))
                .is_double_sided()
        );
    }

    #[rstest]
    fn four_quarter_turns_reproduce_quad(
        #[values(Face6::NX, Face6::NY, Face6::NZ, Face6::PX, Face6::PY, Face6::PZ)] face: Face6,
    ) {
        let quad = Quad::new(
            point3(0.125, 0.0, 0.25),
            point3(0.875, 0.5, 0.25),
            point3(0.125, 0.0, 0.75),
            [0.0, 0.5, 0.25, 1.0],
        );
        let turn = Transform::quarter_turn(face);
        let mut turned = quad;
        for _ in 0..4 {
            turned = turned.transformed(&turn);
        }
        assert!(turned.approx_eq(&quad, 1e-12), "{turned:?}");
        assert!((turned.normal() - quad.normal()).length() < 1e-12);
    }

    #[test]
    fn transform_rederives_normal() {
        let turned = middle_quad().transformed(&Transform::quarter_turn(Face6::NY));
        // -Z goes to +X, so +Z goes to -X.
        assert!((turned.normal() - vec3(-1.0, 0.0, 0.0)).length() < 1e-12);

        let mirrored = middle_quad().transformed(&Transform::reflection(Axis::X));
        assert!((mirrored.normal() - vec3(0.0, 0.0, -1.0)).length() < 1e-12);
    }

    #[test]
    fn arbitrary_rotation_keeps_area() {
        let turned = middle_quad().transformed(&Transform::rotation(Axis::Y, Angle::degrees(30.0)));
        assert!((turned.area() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn sample_is_on_quad() {
        let quad = middle_quad();
        let mut rng = rand_xoshiro::Xoshiro256Plus::seed_from_u64(7);
        for _ in 0..100 {
            let p = quad.sample(&mut rng);
            assert_eq!(p.z, 0.5);
            assert!((0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y), "{p:?}");
        }
    }
}
