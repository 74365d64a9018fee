//! The [`BlockModel`] contract and its implementations.
//!
//! A block model is the geometry of one block type in one state. The model types here
//! are thin data wrappers around shared evaluator functions; the same functions are
//! public so that models with unusual data layouts can reuse them:
//!
//! * [`intersect_quads()`] for lists of [`Quad`](crate::math::Quad)s,
//! * [`intersect_boxes()`] for lists of [`Aab`](crate::math::Aab)s,
//! * [`intersect_animated_quads()`] for quads whose textures change over time.

use alloc::string::String;
use core::fmt;

use rand::RngCore;

use crate::math::{FreeCoordinate, GeometryError, LocalPoint};
use crate::raycast::Ray;
use crate::scene::Scene;

mod animated;
pub use animated::*;
mod box_model;
pub use box_model::*;
mod quad_model;
pub use quad_model::*;

/// The geometry of a block type, which rays can be tested against.
///
/// Models are immutable once constructed, and are shared by every block of their type
/// and by every rendering thread.
pub trait BlockModel: fmt::Debug + Send + Sync {
    /// Tests `ray` against this model, where the ray's origin is in or at the boundary of
    /// the block this model occupies.
    ///
    /// On a hit, writes the color, normal, texture coordinates, and `t` of the hit into
    /// `ray`, advances its origin to the hit point and its distance by `t`, and returns
    /// `true`. Otherwise, returns `false` and leaves `ray` unchanged.
    fn intersect(&self, ray: &mut Ray, scene: &dyn Scene) -> bool;

    /// Returns the number of primitives in this model, for sampling emissive surfaces.
    fn face_count(&self) -> usize;

    /// Returns a point chosen uniformly at random from the surface of primitive `face`,
    /// in block-local coordinates.
    ///
    /// Panics if `face` is not less than [`BlockModel::face_count()`].
    fn sample(&self, face: usize, rng: &mut dyn RngCore) -> LocalPoint;

    /// Returns the surface area of primitive `face`.
    ///
    /// Panics if `face` is not less than [`BlockModel::face_count()`].
    fn face_surface_area(&self, face: usize) -> FreeCoordinate;

    /// Returns whether the origin of `ray` is inside the volume of this model.
    ///
    /// The default implementation returns `false`, which is correct for models made of
    /// surfaces only.
    #[inline]
    fn is_inside(&self, ray: &Ray) -> bool {
        let _ = ray;
        false
    }
}

/// A model with no geometry, for blocks that are never rendered.
#[expect(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct EmptyModel;

impl BlockModel for EmptyModel {
    #[inline]
    fn intersect(&self, _ray: &mut Ray, _scene: &dyn Scene) -> bool {
        false
    }

    #[inline]
    fn face_count(&self) -> usize {
        0
    }

    #[track_caller]
    #[allow(clippy::missing_inline_in_public_items)]
    fn sample(&self, face: usize, _rng: &mut dyn RngCore) -> LocalPoint {
        panic!("EmptyModel has no faces, but face {face} was requested")
    }

    #[track_caller]
    #[allow(clippy::missing_inline_in_public_items)]
    fn face_surface_area(&self, face: usize) -> FreeCoordinate {
        panic!("EmptyModel has no faces, but face {face} was requested")
    }
}

/// Error from constructing a [`BlockModel`] from invalid data.
///
/// These are configuration errors in a block type's definition. They are reported when
/// the model is built and never arise while evaluating rays.
#[derive(Clone, Debug, PartialEq, displaydoc::Display)]
#[non_exhaustive]
pub enum ModelError {
    /// unknown facing {0:?}
    UnknownFacing(String),

    /// unknown variant {key:?} for {block}
    UnknownVariant {
        /// Name of the block type whose variant was requested.
        block: &'static str,
        /// The variant key given.
        key: String,
    },

    /// expected {expected} {what} entries but got {actual}
    LengthMismatch {
        /// Which list had the wrong length.
        what: &'static str,
        /// The length required.
        expected: usize,
        /// The length given.
        actual: usize,
    },

    /// animation framerate {0} is not a finite nonnegative number
    InvalidFramerate(f64),

    /// invalid geometry
    Geometry(GeometryError),
}

#[cfg(feature = "std")]
impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::Geometry(e) => Some(e),
            ModelError::UnknownFacing(_)
            | ModelError::UnknownVariant { .. }
            | ModelError::LengthMismatch { .. }
            | ModelError::InvalidFramerate(_) => None,
        }
    }
}

impl From<GeometryError> for ModelError {
    #[inline]
    fn from(error: GeometryError) -> Self {
        ModelError::Geometry(error)
    }
}

/// Checks that a list parallel to the primitive list has the right length.
pub(crate) fn check_length(
    what: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), ModelError> {
    if expected == actual {
        Ok(())
    } else {
        log::warn!("model has {expected} primitives but {actual} {what} entries");
        Err(ModelError::LengthMismatch {
            what,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::UniformScene;
    use rand::SeedableRng as _;
    use rstest::rstest;

    #[rstest]
    #[case([0.5, 0.5, 0.5], [0.0, 0.0, 1.0])]
    #[case([-3.0, 100.0, 7.25], [1.0, -1.0, 0.5])]
    #[case([0.0, 0.0, 0.0], [0.0, 0.0, 0.0])]
    #[case([f64::NAN, 0.0, 0.0], [0.0, f64::INFINITY, 0.0])]
    fn empty_model_never_hits(#[case] origin: [f64; 3], #[case] direction: [f64; 3]) {
        let mut ray = Ray::new(origin, direction);
        ray.distance = 12.0;
        let before = format!("{ray:?}");
        assert!(!EmptyModel.intersect(&mut ray, &UniformScene::NEUTRAL));
        // Compare the debug text, which unlike `==` treats NaN as equal to itself.
        assert_eq!(format!("{ray:?}"), before);
        assert!(!EmptyModel.is_inside(&ray));
        assert_eq!(EmptyModel.face_count(), 0);
    }

    #[test]
    #[should_panic = "EmptyModel has no faces"]
    fn empty_model_sample_panics() {
        let mut rng = rand_xoshiro::Xoshiro256Plus::seed_from_u64(0);
        EmptyModel.sample(0, &mut rng);
    }

    #[cfg(feature = "std")]
    #[test]
    fn error_source() {
        use alloc::string::ToString as _;
        use std::error::Error as _;

        let geometry = GeometryError::InvalidBox {
            lower: [1.0, 0.0, 0.0],
            upper: [0.0, 1.0, 1.0],
        };
        let error = ModelError::from(geometry);
        assert_eq!(error.to_string(), "invalid geometry");
        assert!(error.source().is_some());
        assert_eq!(
            ModelError::UnknownFacing("northeast".into()).to_string(),
            "unknown facing \"northeast\""
        );
    }
}
