//! Axis-aligned unit vectors: the [`Face6`] type, and [`FaceMap`] for per-face data.
//! This module is private but reexported by its parent.

use core::ops;

use euclid::Vector3D;

use crate::math::{Axis, FreeCoordinate};

/// Identifies a face of a cube or an orthogonal unit vector.
///
/// In block geometry, the faces are also the compass directions of the world:
/// [`NZ`](Self::NZ) is north, [`PX`](Self::PX) is east, [`PZ`](Self::PZ) is south,
/// [`NX`](Self::NX) is west, [`PY`](Self::PY) is up and [`NY`](Self::NY) is down.
#[expect(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, exhaust::Exhaust)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Face6 {
    /// Negative X; the face whose normal vector is `(-1, 0, 0)`; west.
    NX = 1,
    /// Negative Y; the face whose normal vector is `(0, -1, 0)`; downward.
    NY = 2,
    /// Negative Z; the face whose normal vector is `(0, 0, -1)`; north.
    NZ = 3,
    /// Positive X; the face whose normal vector is `(1, 0, 0)`; east.
    PX = 4,
    /// Positive Y; the face whose normal vector is `(0, 1, 0)`; upward.
    PY = 5,
    /// Positive Z; the face whose normal vector is `(0, 0, 1)`; south.
    PZ = 6,
}

impl Face6 {
    /// All the values of [`Face6`].
    pub const ALL: [Face6; 6] = [
        Face6::NX,
        Face6::NY,
        Face6::NZ,
        Face6::PX,
        Face6::PY,
        Face6::PZ,
    ];

    /// Returns which axis this face's normal vector is parallel to.
    #[inline]
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::NX | Self::PX => Axis::X,
            Self::NY | Self::PY => Axis::Y,
            Self::NZ | Self::PZ => Axis::Z,
        }
    }

    /// Returns whether this face is a “positive” face: one whose unit vector's nonzero
    /// coordinate is positive.
    ///
    /// ```
    /// # extern crate blockray_base as blockray;
    /// use blockray::math::Face6;
    ///
    /// assert_eq!(Face6::PX.is_positive(), true);
    /// assert_eq!(Face6::NX.is_positive(), false);
    /// ```
    #[inline]
    pub const fn is_positive(self) -> bool {
        matches!(self, Self::PX | Self::PY | Self::PZ)
    }

    /// Returns whether this face is a negative face: one whose unit vector's nonzero
    /// coordinate is negative.
    #[inline]
    pub const fn is_negative(self) -> bool {
        matches!(self, Self::NX | Self::NY | Self::NZ)
    }

    /// Returns the opposite face (maps [`PX`](Self::PX) to [`NX`](Self::NX) and so on).
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Face6 {
        match self {
            Face6::NX => Face6::PX,
            Face6::NY => Face6::PY,
            Face6::NZ => Face6::PZ,
            Face6::PX => Face6::NX,
            Face6::PY => Face6::NY,
            Face6::PZ => Face6::NZ,
        }
    }

    /// Returns `-1.0` for negative faces and `1.0` for positive faces.
    #[inline]
    pub const fn signum(self) -> FreeCoordinate {
        if self.is_positive() { 1.0 } else { -1.0 }
    }

    /// Returns the axis-aligned unit vector normal to this face.
    #[inline]
    #[must_use]
    pub fn normal_vector<U>(self) -> Vector3D<FreeCoordinate, U> {
        let mut v = Vector3D::zero();
        v[self.axis()] = self.signum();
        v
    }

    /// Dot product of this face as a unit vector and the given vector,
    /// implemented by selecting the relevant component.
    ///
    /// ```
    /// # extern crate blockray_base as blockray;
    /// use blockray::math::{Face6, LocalVector};
    ///
    /// let sample_vector = LocalVector::new(1.0, 2.0, 5.0_f64);
    /// for face in Face6::ALL {
    ///     assert_eq!(face.dot(sample_vector), face.normal_vector().dot(sample_vector));
    /// }
    /// ```
    #[inline]
    #[must_use]
    pub fn dot<U>(self, vector: Vector3D<FreeCoordinate, U>) -> FreeCoordinate {
        vector[self.axis()] * self.signum()
    }
}

/// Container for values keyed by [`Face6`]s. Always holds exactly six elements.
///
/// Block models that are made of boxes use this to hold per-face textures and tints.
#[expect(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FaceMap<V> {
    /// The value whose key is [`Face6::NX`].
    pub nx: V,
    /// The value whose key is [`Face6::NY`].
    pub ny: V,
    /// The value whose key is [`Face6::NZ`].
    pub nz: V,
    /// The value whose key is [`Face6::PX`].
    pub px: V,
    /// The value whose key is [`Face6::PY`].
    pub py: V,
    /// The value whose key is [`Face6::PZ`].
    pub pz: V,
}

#[allow(
    clippy::missing_inline_in_public_items,
    reason = "all methods are generic code"
)]
impl<V> FaceMap<V> {
    /// Constructs a [`FaceMap`] by using the provided function to compute
    /// a value for each [`Face6`] enum variant.
    #[inline]
    pub fn from_fn(mut f: impl FnMut(Face6) -> V) -> Self {
        Self {
            nx: f(Face6::NX),
            ny: f(Face6::NY),
            nz: f(Face6::NZ),
            px: f(Face6::PX),
            py: f(Face6::PY),
            pz: f(Face6::PZ),
        }
    }

    /// Constructs a [`FaceMap`] with every entry equal to `value`.
    #[inline]
    pub fn splat(value: V) -> Self
    where
        V: Clone,
    {
        Self::from_fn(|_| value.clone())
    }

    /// Iterate over the map's key-value pairs by reference, in the same order as [`Face6::ALL`].
    pub fn iter(&self) -> impl Iterator<Item = (Face6, &V)> {
        Face6::ALL.iter().copied().map(move |f| (f, &self[f]))
    }

    /// Iterate over the map values by reference, in the same order as [`Face6::ALL`].
    pub fn values(&self) -> impl Iterator<Item = &V> {
        Face6::ALL.iter().copied().map(move |f| &self[f])
    }

    /// Transform values.
    pub fn map<U>(self, mut f: impl FnMut(Face6, V) -> U) -> FaceMap<U> {
        FaceMap {
            nx: f(Face6::NX, self.nx),
            ny: f(Face6::NY, self.ny),
            nz: f(Face6::NZ, self.nz),
            px: f(Face6::PX, self.px),
            py: f(Face6::PY, self.py),
            pz: f(Face6::PZ, self.pz),
        }
    }

    /// Returns this map with one entry's value replaced.
    ///
    /// This may be used for constructing a map with only one interesting entry:
    ///
    /// ```
    /// # extern crate blockray_base as blockray;
    /// use blockray::math::{Face6, FaceMap};
    ///
    /// assert_eq!(
    ///     FaceMap::default().with(Face6::PY, 10),
    ///     {
    ///         let mut m = FaceMap::default();
    ///         m[Face6::PY] = 10;
    ///         m
    ///     },
    /// );
    /// ```
    #[inline]
    #[must_use]
    pub fn with(mut self, face: Face6, value: V) -> Self {
        self[face] = value;
        self
    }
}

impl<V> ops::Index<Face6> for FaceMap<V> {
    type Output = V;
    #[inline]
    fn index(&self, face: Face6) -> &V {
        match face {
            Face6::NX => &self.nx,
            Face6::NY => &self.ny,
            Face6::NZ => &self.nz,
            Face6::PX => &self.px,
            Face6::PY => &self.py,
            Face6::PZ => &self.pz,
        }
    }
}

impl<V> ops::IndexMut<Face6> for FaceMap<V> {
    #[inline]
    fn index_mut(&mut self, face: Face6) -> &mut V {
        match face {
            Face6::NX => &mut self.nx,
            Face6::NY => &mut self.ny,
            Face6::NZ => &mut self.nz,
            Face6::PX => &mut self.px,
            Face6::PY => &mut self.py,
            Face6::PZ => &mut self.pz,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::LocalVector;
    use alloc::vec::Vec;
    use exhaust::Exhaust as _;

    #[test]
    fn all_is_exhaustive() {
        assert_eq!(Face6::exhaust().collect::<Vec<_>>(), Face6::ALL.to_vec());
    }

    #[test]
    fn opposite_properties() {
        for face in Face6::ALL {
            assert_ne!(face, face.opposite());
            assert_eq!(face, face.opposite().opposite());
            assert_eq!(face.axis(), face.opposite().axis());
            assert_eq!(face.is_positive(), face.opposite().is_negative());
        }
    }

    #[test]
    fn normal_vector_is_unit_along_axis() {
        for face in Face6::ALL {
            let n: LocalVector = face.normal_vector();
            assert_eq!(n.length(), 1.0);
            assert_eq!(n[face.axis()], face.signum());
        }
    }

    #[test]
    fn face_map_iter_in_all_order() {
        let map = FaceMap::from_fn(|f| f as u8);
        assert_eq!(
            map.iter().map(|(f, &v)| (f, v)).collect::<Vec<_>>(),
            Face6::ALL.iter().map(|&f| (f, f as u8)).collect::<Vec<_>>(),
        );
    }

    #[test]
    fn face_map_map_and_index() {
        let map = FaceMap::splat(1).map(|f, v| if f == Face6::PY { v + 10 } else { v });
        assert_eq!(map[Face6::PY], 11);
        assert_eq!(map.values().sum::<i32>(), 16);
    }
}
