use alloc::sync::Arc;

use rand::RngCore;

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::Float as _;

use crate::math::{FreeCoordinate, GridPoint, LocalPoint, Quad};
use crate::model::quad_model::{apply_quad_candidate, evaluate_quads};
use crate::model::{BlockModel, ModelError, check_length};
use crate::raycast::Ray;
use crate::scene::Scene;
use crate::texture::TextureRef;
use crate::tint::Tint;

/// Whether all blocks of an animated type show the same frame at once.
#[expect(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, exhaust::Exhaust)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationMode {
    /// Every block shows the frame given by the scene time alone.
    #[default]
    Uniform,
    /// Each block's frame is offset by [`Scene::position_hash()`] of its position, so
    /// neighboring blocks are out of step.
    Positional,
}

/// How an [`AnimatedQuadModel`] chooses animation frames.
#[expect(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationSettings {
    /// Frames per second of scene time.
    pub framerate: f64,
    /// Whether frames are offset by block position.
    pub mode: AnimationMode,
}

impl AnimationSettings {
    /// Returns the frame number to show for the block at `cube`.
    ///
    /// The result is not reduced to any frame count; that is up to the
    /// [`Texture`](crate::texture::Texture).
    ///
    /// ```
    /// use blockray::euclid::point3;
    /// use blockray::model::{AnimationMode, AnimationSettings};
    /// use blockray::scene::UniformScene;
    ///
    /// let settings = AnimationSettings { framerate: 20.0, mode: AnimationMode::Uniform };
    /// let scene = UniformScene::NEUTRAL.at_time(1.26);
    /// assert_eq!(settings.frame(&scene, point3(0, 0, 0)), 25);
    /// ```
    #[inline]
    pub fn frame(&self, scene: &dyn Scene, cube: GridPoint) -> i64 {
        // Saturating conversion; NaN becomes frame 0.
        let frame = (scene.animation_time() * self.framerate).floor() as i64;
        match self.mode {
            AnimationMode::Uniform => frame,
            AnimationMode::Positional => frame.wrapping_add(scene.position_hash(cube)),
        }
    }
}

/// Like [`intersect_quads()`](super::intersect_quads), but samples each texture at the
/// animation frame `settings` selects for the block the ray is in.
#[allow(clippy::missing_inline_in_public_items)]
pub fn intersect_animated_quads(
    quads: &[Quad],
    textures: &[TextureRef],
    tints: Option<&[Tint]>,
    settings: &AnimationSettings,
    ray: &mut Ray,
    scene: &dyn Scene,
) -> bool {
    let (cube, local) = ray.cube_and_local();
    let frame = settings.frame(scene, cube);
    let quads = &quads[..quads.len().min(textures.len())];
    match evaluate_quads(quads, &local, |i, uv| textures[i].sample_frame(uv, frame)) {
        Some(candidate) => {
            apply_quad_candidate(candidate, tints, ray, scene);
            true
        }
        None => false,
    }
}

/// A [`QuadModel`](super::QuadModel) whose textures are animated.
#[derive(Clone, Debug)]
pub struct AnimatedQuadModel {
    quads: Arc<[Quad]>,
    textures: Arc<[TextureRef]>,
    tints: Option<Arc<[Tint]>>,
    settings: AnimationSettings,
}

impl AnimatedQuadModel {
    /// Constructs an [`AnimatedQuadModel`] with one texture per quad and no tints.
    ///
    /// Returns an error if the number of textures differs from the number of quads, or
    /// if the framerate is negative or not finite.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn new(
        quads: impl Into<Arc<[Quad]>>,
        textures: impl Into<Arc<[TextureRef]>>,
        settings: AnimationSettings,
    ) -> Result<Self, ModelError> {
        let quads = quads.into();
        let textures = textures.into();
        check_length("texture", quads.len(), textures.len())?;
        if !(settings.framerate.is_finite() && settings.framerate >= 0.0) {
            log::warn!("rejecting animation framerate {}", settings.framerate);
            return Err(ModelError::InvalidFramerate(settings.framerate));
        }
        Ok(Self {
            quads,
            textures,
            tints: None,
            settings,
        })
    }

    /// Constructs an [`AnimatedQuadModel`] from a built-in table whose lengths and
    /// settings are known to be valid.
    pub(crate) fn from_table(
        quads: Arc<[Quad]>,
        textures: Arc<[TextureRef]>,
        settings: AnimationSettings,
    ) -> Self {
        debug_assert_eq!(quads.len(), textures.len());
        debug_assert!(settings.framerate.is_finite() && settings.framerate >= 0.0);
        Self {
            quads,
            textures,
            tints: None,
            settings,
        }
    }

    /// Adds one [`Tint`] per quad.
    ///
    /// Returns an error if the number of tints differs from the number of quads.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn with_tints(mut self, tints: impl Into<Arc<[Tint]>>) -> Result<Self, ModelError> {
        let tints = tints.into();
        check_length("tint", self.quads.len(), tints.len())?;
        self.tints = Some(tints);
        Ok(self)
    }

    /// Returns the animation settings of this model.
    #[inline]
    pub fn settings(&self) -> &AnimationSettings {
        &self.settings
    }
}

impl BlockModel for AnimatedQuadModel {
    #[inline]
    fn intersect(&self, ray: &mut Ray, scene: &dyn Scene) -> bool {
        intersect_animated_quads(
            &self.quads,
            &self.textures,
            self.tints.as_deref(),
            &self.settings,
            ray,
            scene,
        )
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.quads.len()
    }

    #[inline]
    #[track_caller]
    fn sample(&self, face: usize, rng: &mut dyn RngCore) -> LocalPoint {
        self.quads[face].sample(rng)
    }

    #[inline]
    #[track_caller]
    fn face_surface_area(&self, face: usize) -> FreeCoordinate {
        self.quads[face].area()
    }
}
