use core::fmt;
use core::iter::FusedIterator;

use euclid::{Point3D, point2};

use crate::math::{
    Axis, Face6, FreeCoordinate, GeometryError, LocalPoint, LocalVector, TexPoint,
    Transform, to_array,
};
use crate::raycast::{EPSILON, LocalRay};

/// Axis-Aligned Box data type, in block-local coordinates.
///
/// Block models built from boxes use these to describe sub-volumes of the block such as
/// slabs, posts, and thin connecting arms.
#[derive(Copy, Clone, PartialEq)]
pub struct Aab {
    lower_bounds: LocalPoint,
    upper_bounds: LocalPoint,
}

/// The result of a successful [`Aab::intersect()`].
#[allow(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AabHit {
    /// Ray parameter of the hit point.
    pub t: FreeCoordinate,
    /// The face of the box that was struck.
    pub face: Face6,
    /// Texture coordinates of the hit point on that face.
    ///
    /// These are taken from the block-local position of the hit, not the position within
    /// the box, so that a box smaller than the block shows the matching part of a full
    /// block texture. See [`Aab::intersect()`] for the orientation of each face.
    pub uv: TexPoint,
}

impl Aab {
    /// The [`Aab`] which exactly fills the unit cube of a block.
    pub const FULL_BLOCK: Aab = Aab {
        lower_bounds: Point3D::new(0., 0., 0.),
        upper_bounds: Point3D::new(1., 1., 1.),
    };

    /// Constructs an [`Aab`] from individual coordinates.
    ///
    /// Panics if the bounds are misordered or NaN; see [`Aab::checked_new()`] for the
    /// non-panicking version.
    #[inline]
    #[track_caller]
    pub fn new(
        lx: FreeCoordinate,
        hx: FreeCoordinate,
        ly: FreeCoordinate,
        hy: FreeCoordinate,
        lz: FreeCoordinate,
        hz: FreeCoordinate,
    ) -> Self {
        Self::from_lower_upper(Point3D::new(lx, ly, lz), Point3D::new(hx, hy, hz))
    }

    /// Constructs an [`Aab`] from individual coordinates, or returns an error if the
    /// bounds are misordered or NaN.
    ///
    /// ```
    /// # extern crate blockray_base as blockray;
    /// use blockray::math::Aab;
    ///
    /// assert!(Aab::checked_new(0.0, 1.0, 0.0, 0.5, 0.0, 1.0).is_ok());
    /// assert!(Aab::checked_new(0.0, 1.0, 0.5, 0.0, 0.0, 1.0).is_err());
    /// ```
    #[inline]
    pub fn checked_new(
        lx: FreeCoordinate,
        hx: FreeCoordinate,
        ly: FreeCoordinate,
        hy: FreeCoordinate,
        lz: FreeCoordinate,
        hz: FreeCoordinate,
    ) -> Result<Self, GeometryError> {
        Self::checked_from_lower_upper(Point3D::new(lx, ly, lz), Point3D::new(hx, hy, hz))
    }

    /// Constructs an [`Aab`] from most-negative and most-positive corner points.
    ///
    /// Panics if the points are not in the proper order or if they are NaN.
    #[inline]
    #[track_caller]
    pub fn from_lower_upper(
        lower_bounds: impl Into<LocalPoint>,
        upper_bounds: impl Into<LocalPoint>,
    ) -> Self {
        match Self::checked_from_lower_upper(lower_bounds.into(), upper_bounds.into()) {
            Ok(aab) => aab,
            Err(e) => panic!("invalid AAB: {e}"),
        }
    }

    /// Constructs an [`Aab`] from most-negative and most-positive corner points.
    ///
    /// Returns an error if the points are not in the proper order or if they are NaN.
    #[inline]
    pub fn checked_from_lower_upper(
        lower_bounds: LocalPoint,
        upper_bounds: LocalPoint,
    ) -> Result<Self, GeometryError> {
        if lower_bounds.x <= upper_bounds.x
            && lower_bounds.y <= upper_bounds.y
            && lower_bounds.z <= upper_bounds.z
        {
            Ok(Self {
                lower_bounds,
                upper_bounds,
            })
        } else {
            Err(GeometryError::InvalidBox {
                lower: to_array(lower_bounds),
                upper: to_array(upper_bounds),
            })
        }
    }

    /// The most negative corner of the box.
    #[inline]
    pub const fn lower_bounds(&self) -> LocalPoint {
        self.lower_bounds
    }

    /// The most positive corner of the box.
    #[inline]
    pub const fn upper_bounds(&self) -> LocalPoint {
        self.upper_bounds
    }

    /// Size of the box in each axis; equivalent to
    /// `self.upper_bounds() - self.lower_bounds()`.
    #[inline]
    pub fn size(&self) -> LocalVector {
        self.upper_bounds - self.lower_bounds
    }

    /// The center of the enclosed volume.
    ///
    /// ```
    /// # extern crate blockray_base as blockray;
    /// use blockray::math::{Aab, LocalPoint};
    ///
    /// let aab = Aab::new(0.0, 1.0, 0.0, 0.5, 0.25, 0.75);
    /// assert_eq!(aab.center(), LocalPoint::new(0.5, 0.25, 0.5));
    /// ```
    #[inline]
    pub fn center(&self) -> LocalPoint {
        (self.lower_bounds + self.upper_bounds.to_vector()) * 0.5
    }

    /// Iterates over the eight corner points of the box.
    /// The ordering is deterministic but not currently declared stable.
    #[inline]
    pub fn corner_points(
        self,
    ) -> impl DoubleEndedIterator<Item = LocalPoint> + ExactSizeIterator + FusedIterator {
        let l = self.lower_bounds;
        let u = self.upper_bounds;
        (0..8).map(move |i| {
            Point3D::new(
                if i & 1 == 0 { l.x } else { u.x },
                if i & 2 == 0 { l.y } else { u.y },
                if i & 4 == 0 { l.z } else { u.z },
            )
        })
    }

    /// Returns whether this box, including the boundary, contains the point.
    ///
    /// ```
    /// # extern crate blockray_base as blockray;
    /// use blockray::math::{Aab, LocalPoint};
    ///
    /// let slab = Aab::new(0.0, 1.0, 0.0, 0.5, 0.0, 1.0);
    /// assert!(slab.contains(LocalPoint::new(0.5, 0.5, 0.5)));
    /// assert!(!slab.contains(LocalPoint::new(0.5, 0.75, 0.5)));
    /// ```
    #[inline]
    pub fn contains(&self, point: LocalPoint) -> bool {
        for axis in Axis::ALL {
            if !(self.lower_bounds[axis] <= point[axis] && point[axis] <= self.upper_bounds[axis]) {
                return false;
            }
        }
        true
    }

    /// Translate this box by the specified offset.
    ///
    /// Note that due to rounding error, the result may not have the same size.
    #[inline]
    #[must_use]
    #[track_caller] // in case of NaN
    pub fn translate(self, offset: LocalVector) -> Self {
        Self::from_lower_upper(self.lower_bounds + offset, self.upper_bounds + offset)
    }

    /// Returns the smallest box containing every corner of this box after it has been
    /// transformed.
    ///
    /// For quarter turns, reflections, scaling, and translation this is exactly the
    /// transformed box; for other rotations it is a bounding box.
    #[must_use]
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn transformed(self, transform: &Transform) -> Self {
        let mut lower = Point3D::splat(FreeCoordinate::INFINITY);
        let mut upper = Point3D::splat(FreeCoordinate::NEG_INFINITY);
        for corner in self.corner_points() {
            let p = transform.transform_point(corner);
            lower = lower.min(p);
            upper = upper.max(p);
        }
        Self::from_lower_upper(lower, upper)
    }

    /// Returns the area of one face of the box.
    #[inline]
    pub fn face_area(&self, face: Face6) -> FreeCoordinate {
        let size = self.size();
        let axis = face.axis();
        size[axis.increment()] * size[axis.decrement()]
    }

    /// Returns the total area of the six faces of the box.
    ///
    /// ```
    /// # extern crate blockray_base as blockray;
    /// use blockray::math::Aab;
    ///
    /// assert_eq!(Aab::FULL_BLOCK.surface_area(), 6.0);
    /// assert_eq!(Aab::new(0.0, 1.0, 0.0, 0.5, 0.0, 1.0).surface_area(), 4.0);
    /// ```
    #[inline]
    pub fn surface_area(&self) -> FreeCoordinate {
        Face6::ALL.iter().map(|&face| self.face_area(face)).sum()
    }

    /// Returns a point on the surface of this box, uniformly distributed over its area.
    ///
    /// A face is chosen with probability proportional to its area, then a point on it is
    /// chosen uniformly.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn sample_surface<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> LocalPoint {
        let total = self.surface_area();
        let mut remaining = rng.random::<FreeCoordinate>() * total;
        let mut chosen = Face6::PZ;
        for face in Face6::ALL {
            let area = self.face_area(face);
            if remaining < area {
                chosen = face;
                break;
            }
            remaining -= area;
        }

        let axis = chosen.axis();
        let mut point = LocalPoint::origin();
        point[axis] = if chosen.is_positive() {
            self.upper_bounds[axis]
        } else {
            self.lower_bounds[axis]
        };
        for other in [axis.increment(), axis.decrement()] {
            let (low, high) = (self.lower_bounds[other], self.upper_bounds[other]);
            point[other] = low + (high - low) * rng.random::<FreeCoordinate>();
        }
        point
    }

    /// Finds where `ray` first strikes the surface of this box, among hits whose ray
    /// parameter is less than `t_max` and greater than `-EPSILON`.
    ///
    /// Faces are tested in the order -X, +X, -Y, +Y, -Z, +Z and a later face only replaces
    /// an earlier one if it is strictly nearer, so on an edge or corner the earlier face
    /// wins. Hits from inside the box count; the face struck is the one the ray exits by.
    ///
    /// The texture coordinates of each face, in terms of the block-local hit point
    /// `(x, y, z)`, are chosen so that textures appear upright on the side faces and
    /// continue seamlessly around the block:
    ///
    /// | face | U       | V       |
    /// |------|---------|---------|
    /// | -X   | `z`     | `y`     |
    /// | +X   | `1 - z` | `y`     |
    /// | -Y   | `x`     | `z`     |
    /// | +Y   | `x`     | `1 - z` |
    /// | -Z   | `1 - x` | `y`     |
    /// | +Z   | `x`     | `y`     |
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn intersect(&self, ray: &LocalRay, t_max: FreeCoordinate) -> Option<AabHit> {
        let o = ray.origin;
        let d = ray.direction;
        let mut best: Option<AabHit> = None;
        let mut best_t = t_max;

        for face in [
            Face6::NX,
            Face6::PX,
            Face6::NY,
            Face6::PY,
            Face6::NZ,
            Face6::PZ,
        ] {
            let axis = face.axis();
            let plane = if face.is_positive() {
                self.upper_bounds[axis]
            } else {
                self.lower_bounds[axis]
            };
            // Division by a zero component yields an infinity or NaN, which fails the
            // range comparison.
            let t = (plane - o[axis]) / d[axis];
            if !(t < best_t && t > -EPSILON) {
                continue;
            }
            let (a1, a2) = (axis.increment(), axis.decrement());
            let p1 = o[a1] + d[a1] * t;
            let p2 = o[a2] + d[a2] * t;
            if p1 >= self.lower_bounds[a1]
                && p1 <= self.upper_bounds[a1]
                && p2 >= self.lower_bounds[a2]
                && p2 <= self.upper_bounds[a2]
            {
                let mut hit_point = o + d * t;
                hit_point[axis] = plane;
                best_t = t;
                best = Some(AabHit {
                    t,
                    face,
                    uv: face_uv(face, hit_point),
                });
            }
        }
        best
    }
}

fn face_uv(face: Face6, p: LocalPoint) -> TexPoint {
    match face {
        Face6::NX => point2(p.z, p.y),
        Face6::PX => point2(1.0 - p.z, p.y),
        Face6::NY => point2(p.x, p.z),
        Face6::PY => point2(p.x, 1.0 - p.z),
        Face6::NZ => point2(1.0 - p.x, p.y),
        Face6::PZ => point2(p.x, p.y),
    }
}

impl fmt::Debug for Aab {
    #[allow(clippy::missing_inline_in_public_items)]
    #[mutants::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Aab {
            lower_bounds: l,
            upper_bounds: u,
        } = *self;
        f.debug_tuple("Aab")
            .field(&(l.x..=u.x))
            .field(&(l.y..=u.y))
            .field(&(l.z..=u.z))
            .finish()
    }
}

/// [`Aab`] rejects NaN values, so it can implement [`Eq`]
/// even though it contains floats.
impl Eq for Aab {}
