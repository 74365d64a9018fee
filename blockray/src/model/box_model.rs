use alloc::sync::Arc;
use alloc::vec::Vec;

use euclid::point2;
use rand::RngCore;

use crate::math::{Aab, Face6, FaceMap, FreeCoordinate, LocalPoint, Rgba, TexPoint};
use crate::model::{BlockModel, ModelError, check_length};
use crate::raycast::{EPSILON, Ray};
use crate::scene::Scene;
use crate::texture::TextureRef;
use crate::tint::Tint;

/// A change of texture orientation applied to one face of a box before sampling.
///
/// Rotations turn the texture on the face, counterclockwise as seen from outside.
#[expect(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, exhaust::Exhaust)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UvMapping {
    /// Texture coordinates are used as computed.
    #[default]
    None,
    /// `(u, v)` becomes `(1 - v, u)`.
    Rotate90,
    /// `(u, v)` becomes `(1 - u, 1 - v)`.
    Rotate180,
    /// `(u, v)` becomes `(v, 1 - u)`.
    Rotate270,
    /// `(u, v)` becomes `(1 - u, v)`.
    FlipU,
    /// `(u, v)` becomes `(u, 1 - v)`.
    FlipV,
}

impl UvMapping {
    /// Applies this mapping to texture coordinates.
    ///
    /// ```
    /// use blockray::euclid::point2;
    /// use blockray::model::UvMapping;
    ///
    /// assert_eq!(UvMapping::Rotate90.apply(point2(0.25, 0.0)), point2(1.0, 0.25));
    /// ```
    #[inline]
    #[must_use]
    pub fn apply(self, uv: TexPoint) -> TexPoint {
        let TexPoint { x: u, y: v, .. } = uv;
        match self {
            UvMapping::None => uv,
            UvMapping::Rotate90 => point2(1.0 - v, u),
            UvMapping::Rotate180 => point2(1.0 - u, 1.0 - v),
            UvMapping::Rotate270 => point2(v, 1.0 - u),
            UvMapping::FlipU => point2(1.0 - u, v),
            UvMapping::FlipV => point2(u, 1.0 - v),
        }
    }
}

/// Tests `ray` against a list of boxes with parallel lists of per-face textures and,
/// optionally, per-face tints and texture mappings, and updates the ray as
/// [`BlockModel::intersect()`] describes.
///
/// Each box contributes the face the ray strikes first. That hit counts only if the face
/// has a texture and the sample there has alpha greater than [`EPSILON`]; a box whose
/// first face is a hole does not show its far side. Of the boxes that count, the nearest
/// wins, and among boxes hit at exactly the same distance, the last in the list.
///
/// Boxes lie within the block, so unlike [`intersect_quads()`](super::intersect_quads)
/// no containment check is made.
///
/// If the lists are of different lengths, only as many boxes as there are texture
/// entries are considered; boxes without tint or mapping entries are untinted and
/// unmapped.
#[allow(clippy::missing_inline_in_public_items)]
pub fn intersect_boxes(
    boxes: &[Aab],
    textures: &[FaceMap<Option<TextureRef>>],
    tints: Option<&[FaceMap<Tint>]>,
    uv_mapping: Option<&[FaceMap<UvMapping>]>,
    ray: &mut Ray,
    scene: &dyn Scene,
) -> bool {
    let local = ray.local();
    let mut best: Option<(usize, Face6, FreeCoordinate, TexPoint, Rgba)> = None;
    let mut best_t = FreeCoordinate::INFINITY;

    for (index, (aab, face_textures)) in boxes.iter().zip(textures).enumerate() {
        let Some(hit) = aab.intersect(&local, FreeCoordinate::INFINITY) else {
            continue;
        };
        if hit.t > best_t {
            continue;
        }
        let Some(texture) = &face_textures[hit.face] else {
            continue;
        };
        let mapping = uv_mapping
            .and_then(|m| m.get(index))
            .map_or(UvMapping::None, |m| m[hit.face]);
        let uv = mapping.apply(hit.uv);
        let color = texture.sample(uv);
        if f64::from(color.alpha()) <= EPSILON {
            continue;
        }
        best_t = hit.t;
        best = Some((index, hit.face, hit.t, uv, color));
    }

    let Some((index, face, t, uv, color)) = best else {
        return false;
    };
    let tint = tints
        .and_then(|tints| tints.get(index))
        .map_or(Tint::None, |tints| tints[face]);
    ray.advance_to_hit(t, face.normal_vector(), uv);
    ray.color = tint.apply(color, ray, scene);
    true
}

/// A [`BlockModel`] made of axis-aligned boxes, with a texture for each face of each box.
///
/// The primitives of a [`BoxModel`] for [`BlockModel::sample()`] and
/// [`BlockModel::face_surface_area()`] are whole boxes.
#[derive(Clone, Debug)]
pub struct BoxModel {
    boxes: Arc<[Aab]>,
    textures: Arc<[FaceMap<Option<TextureRef>>]>,
    tints: Option<Arc<[FaceMap<Tint>]>>,
    uv_mapping: Option<Arc<[FaceMap<UvMapping>]>>,
    opaque: bool,
}

impl BoxModel {
    /// Constructs a [`BoxModel`] from boxes and their per-face textures.
    /// Faces whose texture is [`None`] are invisible.
    ///
    /// Returns an error if the number of texture entries differs from the number of boxes.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn new(
        boxes: impl Into<Arc<[Aab]>>,
        textures: impl Into<Arc<[FaceMap<Option<TextureRef>>]>>,
    ) -> Result<Self, ModelError> {
        let boxes = boxes.into();
        let textures = textures.into();
        check_length("texture", boxes.len(), textures.len())?;
        Ok(Self {
            boxes,
            textures,
            tints: None,
            uv_mapping: None,
            opaque: false,
        })
    }

    /// Constructs a [`BoxModel`] with the same texture on every face of every box.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn with_texture(boxes: impl Into<Arc<[Aab]>>, texture: &TextureRef) -> Self {
        let boxes = boxes.into();
        let textures: Vec<FaceMap<Option<TextureRef>>> = boxes
            .iter()
            .map(|_| FaceMap::splat(Some(Arc::clone(texture))))
            .collect();
        Self {
            boxes,
            textures: textures.into(),
            tints: None,
            uv_mapping: None,
            opaque: false,
        }
    }

    /// Adds per-face tints for each box.
    ///
    /// Returns an error if the number of entries differs from the number of boxes.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn with_tints(
        mut self,
        tints: impl Into<Arc<[FaceMap<Tint>]>>,
    ) -> Result<Self, ModelError> {
        let tints = tints.into();
        check_length("tint", self.boxes.len(), tints.len())?;
        self.tints = Some(tints);
        Ok(self)
    }

    /// Adds per-face texture mappings for each box.
    ///
    /// Returns an error if the number of entries differs from the number of boxes.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn with_uv_mapping(
        mut self,
        uv_mapping: impl Into<Arc<[FaceMap<UvMapping>]>>,
    ) -> Result<Self, ModelError> {
        let uv_mapping = uv_mapping.into();
        check_length("UV mapping", self.boxes.len(), uv_mapping.len())?;
        self.uv_mapping = Some(uv_mapping);
        Ok(self)
    }

    /// Makes every hit on this model report an alpha of 1, whatever the texture's alpha.
    #[inline]
    #[must_use]
    pub fn opaque(mut self) -> Self {
        self.opaque = true;
        self
    }

    /// Returns the boxes of this model.
    #[inline]
    pub fn boxes(&self) -> &[Aab] {
        &self.boxes
    }
}

impl BlockModel for BoxModel {
    #[inline]
    fn intersect(&self, ray: &mut Ray, scene: &dyn Scene) -> bool {
        let hit = intersect_boxes(
            &self.boxes,
            &self.textures,
            self.tints.as_deref(),
            self.uv_mapping.as_deref(),
            ray,
            scene,
        );
        if hit && self.opaque {
            ray.color = ray.color.with_alpha(1.0);
        }
        hit
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.boxes.len()
    }

    #[inline]
    #[track_caller]
    fn sample(&self, face: usize, rng: &mut dyn RngCore) -> LocalPoint {
        self.boxes[face].sample_surface(rng)
    }

    #[inline]
    #[track_caller]
    fn face_surface_area(&self, face: usize) -> FreeCoordinate {
        self.boxes[face].surface_area()
    }

    #[inline]
    fn is_inside(&self, ray: &Ray) -> bool {
        let origin = ray.local().origin;
        self.boxes.iter().any(|aab| aab.contains(origin))
    }
}
