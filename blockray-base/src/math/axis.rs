use crate::math::Face6;

/// One of the three coordinate axes of block-local space.
///
/// Points and vectors can be indexed by an [`Axis`], which lets the box and transform
/// code treat the axes uniformly. [`Face6`] adds a direction along the axis.
#[expect(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, exhaust::Exhaust)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// `[X, Y, Z]`.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Returns the face on the positive end of this axis.
    #[inline]
    pub const fn positive_face(self) -> Face6 {
        match self {
            Axis::X => Face6::PX,
            Axis::Y => Face6::PY,
            Axis::Z => Face6::PZ,
        }
    }

    /// Returns the next axis in cyclic order: X to Y, Y to Z, Z to X.
    ///
    /// Together with [`Axis::decrement()`], this gives the two axes spanning the plane
    /// perpendicular to `self`, in right-handed order.
    #[inline]
    #[must_use]
    pub const fn increment(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::Z,
            Axis::Z => Axis::X,
        }
    }

    /// Returns the previous axis in cyclic order: X to Z, Y to X, Z to Y.
    #[inline]
    #[must_use]
    pub const fn decrement(self) -> Self {
        match self {
            Axis::X => Axis::Z,
            Axis::Y => Axis::X,
            Axis::Z => Axis::Y,
        }
    }
}

mod impl_index_axis {
    use super::Axis;
    use core::ops;

    macro_rules! index_by_axis {
        ($type:ident) => {
            impl<T, U> ops::Index<Axis> for euclid::$type<T, U> {
                type Output = T;

                #[inline]
                fn index(&self, axis: Axis) -> &T {
                    match axis {
                        Axis::X => &self.x,
                        Axis::Y => &self.y,
                        Axis::Z => &self.z,
                    }
                }
            }
            impl<T, U> ops::IndexMut<Axis> for euclid::$type<T, U> {
                #[inline]
                fn index_mut(&mut self, axis: Axis) -> &mut T {
                    match axis {
                        Axis::X => &mut self.x,
                        Axis::Y => &mut self.y,
                        Axis::Z => &mut self.z,
                    }
                }
            }
        };
    }
    index_by_axis!(Point3D);
    index_by_axis!(Vector3D);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{LocalPoint, LocalVector};
    use pretty_assertions::assert_eq;

    #[test]
    fn cyclic_order() {
        for axis in Axis::ALL {
            assert_eq!(axis.increment().decrement(), axis);
            assert_eq!(axis.increment().increment(), axis.decrement());
            // The three are distinct.
            assert_ne!(axis.increment(), axis);
            assert_ne!(axis.decrement(), axis);
        }
    }

    #[test]
    fn perpendicular_pair_is_right_handed() {
        for axis in Axis::ALL {
            let mut a = LocalVector::zero();
            let mut b = LocalVector::zero();
            a[axis.increment()] = 1.0;
            b[axis.decrement()] = 1.0;
            assert_eq!(a.cross(b), axis.positive_face().normal_vector());
        }
    }

    #[test]
    fn index_point() {
        let mut p = LocalPoint::new(0.25, 0.5, 0.75);
        assert_eq!([p[Axis::X], p[Axis::Y], p[Axis::Z]], [0.25, 0.5, 0.75]);
        p[Axis::Y] = 1.0;
        assert_eq!(p, LocalPoint::new(0.25, 1.0, 0.75));
    }
}
