use alloc::sync::Arc;
use alloc::vec::Vec;

use rand::RngCore;

use crate::math::{FreeCoordinate, LocalPoint, LocalVector, Quad, Rgba, TexPoint};
use crate::model::{BlockModel, ModelError, check_length};
use crate::raycast::{EPSILON, LocalRay, Ray};
use crate::scene::Scene;
use crate::texture::TextureRef;
use crate::tint::Tint;

/// The accepted hit of [`evaluate_quads()`], not yet written to the ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct QuadCandidate {
    pub index: usize,
    pub t: FreeCoordinate,
    pub normal: LocalVector,
    pub uv: TexPoint,
    pub color: Rgba,
}

/// Walks `quads` in order, sampling each geometric hit with `sample`, and returns the
/// last hit whose sample is not transparent.
///
/// Each quad is tested only up to the parameter of the hit accepted so far, so the result
/// is usually but not necessarily the nearest: a later quad at exactly the same distance
/// as an earlier one also fails, while a hole in a nearer quad's texture lets a farther
/// quad tested later win.
///
/// Returns [`None`] if no hit was accepted or if the accepted hit lies outside the block.
pub(crate) fn evaluate_quads(
    quads: &[Quad],
    ray: &LocalRay,
    mut sample: impl FnMut(usize, TexPoint) -> Rgba,
) -> Option<QuadCandidate> {
    let mut best: Option<QuadCandidate> = None;
    let mut best_t = FreeCoordinate::INFINITY;
    for (index, quad) in quads.iter().enumerate() {
        let Some(hit) = quad.intersect(ray, best_t) else {
            continue;
        };
        let color = sample(index, hit.uv);
        if f64::from(color.alpha()) <= EPSILON {
            continue;
        }
        let normal = if quad.is_double_sided() && ray.direction.dot(quad.normal()) > 0.0 {
            -quad.normal()
        } else {
            quad.normal()
        };
        best_t = hit.t;
        best = Some(QuadCandidate {
            index,
            t: hit.t,
            normal,
            uv: hit.uv,
            color,
        });
    }

    // A quad's plane may reach slightly outside the block (as tilted geometry does);
    // hits there belong to a neighbor and must not show.
    best.filter(|candidate| ray.is_within_block_at(candidate.t))
}

/// Writes an accepted hit into `ray`: advances it, then tints the sampled color at the
/// new position.
pub(crate) fn apply_quad_candidate(
    candidate: QuadCandidate,
    tints: Option<&[Tint]>,
    ray: &mut Ray,
    scene: &dyn Scene,
) {
    let tint = tints
        .and_then(|tints| tints.get(candidate.index))
        .copied()
        .unwrap_or_default();
    ray.advance_to_hit(candidate.t, candidate.normal, candidate.uv);
    ray.color = tint.apply(candidate.color, ray, scene);
}

/// Tests `ray` against a list of quads with parallel lists of textures and, optionally,
/// tints, and updates the ray as [`BlockModel::intersect()`] describes.
///
/// Quads are tested in order and the last one found to be hit, with a texture sample
/// whose alpha exceeds [`EPSILON`], wins. Since each test is bounded by the best hit so
/// far, that is the nearest hit except where texture holes or ties intervene. A
/// double-sided quad reports the side of its normal facing the ray; a single-sided quad
/// is still hit from behind, but reports its fixed normal.
///
/// A hit outside the block of the ray's origin, beyond a tolerance of [`EPSILON`], is
/// discarded and the function returns `false`, even if another quad was hit inside it.
///
/// If the lists are of different lengths, only as many quads as there are textures are
/// considered; quads without a tint entry are untinted.
#[allow(clippy::missing_inline_in_public_items)]
pub fn intersect_quads(
    quads: &[Quad],
    textures: &[TextureRef],
    tints: Option<&[Tint]>,
    ray: &mut Ray,
    scene: &dyn Scene,
) -> bool {
    let quads = &quads[..quads.len().min(textures.len())];
    match evaluate_quads(quads, &ray.local(), |i, uv| textures[i].sample(uv)) {
        Some(candidate) => {
            apply_quad_candidate(candidate, tints, ray, scene);
            true
        }
        None => false,
    }
}

/// A [`BlockModel`] made of textured [`Quad`]s.
///
/// Each quad has its own texture and, optionally, its own [`Tint`].
/// The quad list is held by [`Arc`] so that orientation variants built by
/// [`facing_variants()`](crate::facing::facing_variants) can be shared between models.
#[derive(Clone, Debug)]
pub struct QuadModel {
    quads: Arc<[Quad]>,
    textures: Arc<[TextureRef]>,
    tints: Option<Arc<[Tint]>>,
    opaque: bool,
}

impl QuadModel {
    /// Constructs a [`QuadModel`] with one texture per quad and no tints.
    ///
    /// Returns an error if the number of textures differs from the number of quads.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn new(
        quads: impl Into<Arc<[Quad]>>,
        textures: impl Into<Arc<[TextureRef]>>,
    ) -> Result<Self, ModelError> {
        let quads = quads.into();
        let textures = textures.into();
        check_length("texture", quads.len(), textures.len())?;
        Ok(Self {
            quads,
            textures,
            tints: None,
            opaque: false,
        })
    }

    /// Constructs a [`QuadModel`] with every quad using the same texture.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn with_texture(quads: impl Into<Arc<[Quad]>>, texture: &TextureRef) -> Self {
        let quads = quads.into();
        let textures: Vec<TextureRef> = quads.iter().map(|_| Arc::clone(texture)).collect();
        Self {
            quads,
            textures: textures.into(),
            tints: None,
            opaque: false,
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

    /// Applies the same [`Tint`] to every quad.
    #[allow(clippy::missing_inline_in_public_items)]
    #[must_use]
    pub fn with_tint(mut self, tint: Tint) -> Self {
        self.tints = Some(self.quads.iter().map(|_| tint).collect());
        self
    }

    /// Makes every hit on this model report an alpha of 1, whatever the texture's alpha.
    /// Texture samples whose alpha is below the cutout threshold are still not hit.
    #[inline]
    #[must_use]
    pub fn opaque(mut self) -> Self {
        self.opaque = true;
        self
    }

    /// Returns the quads of this model.
    #[inline]
    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }
}

impl BlockModel for QuadModel {
    #[inline]
    fn intersect(&self, ray: &mut Ray, scene: &dyn Scene) -> bool {
        let hit = intersect_quads(
            &self.quads,
            &self.textures,
            self.tints.as_deref(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Rgb, Transform, WorldPoint};
    use crate::scene::{BiomeKind, UniformScene};
    use crate::texture::Image;
    use euclid::{point2, point3, vec3};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng as _;
    use rstest::rstest;

    fn solid(color: Rgba) -> TextureRef {
        Arc::new(color)
    }

    /// A quad across the middle of the block, facing +Z, with a full texture rectangle.
    fn middle_quad() -> Quad {
        Quad::new(
            point3(0.0, 0.0, 0.5),
            point3(1.0, 0.0, 0.5),
            point3(0.0, 1.0, 0.5),
            [0.0, 1.0, 0.0, 1.0],
        )
    }

    fn model(quads: Vec<Quad>, colors: &[Rgba]) -> QuadModel {
        QuadModel::new(quads, colors.iter().map(|&c| solid(c)).collect::<Vec<_>>()).unwrap()
    }

    #[test]
    fn hit_at_center_along_normal() {
        let quad = Quad::new(
            point3(0.25, 0.25, 0.75),
            point3(0.75, 0.25, 0.75),
            point3(0.25, 0.75, 0.75),
            [0.0, 0.5, 0.5, 1.0],
        );
        let model = model(vec![quad], &[Rgba::WHITE]);
        let mut ray = Ray::new([4.5, -2.5, 9.0], [0.0, 0.0, -1.0]);
        assert!(model.intersect(&mut ray, &UniformScene::NEUTRAL));
        assert_eq!(ray.t, 0.25);
        assert_eq!(ray.distance, 0.25);
        assert_eq!(ray.origin, point3(4.5, -2.5, 8.75));
        assert_eq!(ray.uv, point2(0.25, 0.75));
        assert_eq!(ray.normal, vec3(0.0, 0.0, 1.0));
        assert_eq!(ray.color, Rgba::WHITE);
    }

    #[test]
    fn double_sided_faces_the_ray_from_both_sides() {
        let model = model(vec![middle_quad().double_sided()], &[Rgba::WHITE]);
        for direction in [1.0, -1.0] {
            let mut ray = Ray::new([0.5, 0.5, 0.5 - direction * 0.5], [0.0, 0.0, direction]);
            assert!(model.intersect(&mut ray, &UniformScene::NEUTRAL));
            assert_eq!(ray.normal, vec3(0.0, 0.0, -direction));
            assert!(ray.normal.dot(ray.direction) < 0.0);
        }
    }

    #[test]
    fn single_sided_is_hit_from_behind_with_fixed_normal() {
        let model = model(vec![middle_quad()], &[Rgba::WHITE]);
        let mut ray = Ray::new([0.5, 0.5, 0.0], [0.0, 0.0, 1.0]);
        assert!(model.intersect(&mut ray, &UniformScene::NEUTRAL));
        assert_eq!(ray.t, 0.5);
        assert_eq!(ray.normal, vec3(0.0, 0.0, 1.0));
    }

    #[test]
    fn transparent_texel_is_a_hole() {
        // Left half opaque, right half transparent.
        let image = Image::new(2, 1, vec![Rgba::WHITE, Rgba::TRANSPARENT]).unwrap();
        let model = QuadModel::new(vec![middle_quad()], vec![Arc::new(image) as TextureRef])
            .unwrap();

        let mut ray = Ray::new([0.75, 0.5, 0.0], [0.0, 0.0, 1.0]);
        let before = ray;
        assert!(!model.intersect(&mut ray, &UniformScene::NEUTRAL));
        assert_eq!(ray, before);

        let mut ray = Ray::new([0.25, 0.5, 0.0], [0.0, 0.0, 1.0]);
        assert!(model.intersect(&mut ray, &UniformScene::NEUTRAL));
    }

    #[test]
    fn hole_reveals_farther_quad() {
        let near = middle_quad();
        let far = near.transformed(&Transform::translation(vec3(0.0, 0.0, 0.25)));
        let model = model(
            vec![near, far],
            &[Rgba::TRANSPARENT, Rgba::new(1.0, 0.0, 0.0, 1.0)],
        );
        let mut ray = Ray::new([0.5, 0.5, 0.0], [0.0, 0.0, 1.0]);
        assert!(model.intersect(&mut ray, &UniformScene::NEUTRAL));
        assert_eq!(ray.t, 0.75);
        assert_eq!(ray.color.red(), 1.0);
    }

    #[test]
    fn coplanar_tie_keeps_earlier_quad() {
        // The second test is bounded by the first hit's t, which it does not beat.
        let red = Rgba::new(1.0, 0.0, 0.0, 1.0);
        let blue = Rgba::new(0.0, 0.0, 1.0, 1.0);
        let model = model(vec![middle_quad(), middle_quad()], &[red, blue]);
        let mut ray = Ray::new([0.5, 0.5, 0.0], [0.0, 0.0, 1.0]);
        assert!(model.intersect(&mut ray, &UniformScene::NEUTRAL));
        assert_eq!(ray.color, red);
    }

    #[test]
    fn later_nearer_quad_wins() {
        let far = middle_quad().transformed(&Transform::translation(vec3(0.0, 0.0, 0.25)));
        let near = middle_quad();
        let red = Rgba::new(1.0, 0.0, 0.0, 1.0);
        let blue = Rgba::new(0.0, 0.0, 1.0, 1.0);
        let model = model(vec![far, near], &[red, blue]);
        let mut ray = Ray::new([0.5, 0.5, 0.0], [0.0, 0.0, 1.0]);
        assert!(model.intersect(&mut ray, &UniformScene::NEUTRAL));
        assert_eq!(ray.color, blue);
        assert_eq!(ray.t, 0.5);
    }

    /// A quad leaning out of the top of the block so that its upper edge is 0.1 outside.
    fn overhanging_quad() -> Quad {
        Quad::new(
            point3(0.0, 0.0, 0.5),
            point3(1.0, 0.0, 0.5),
            point3(0.0, 1.1, 0.5),
            [0.0, 1.0, 0.0, 1.0],
        )
    }

    #[test]
    fn containment_rejects_hit_outside_block() {
        let model = model(vec![overhanging_quad()], &[Rgba::WHITE]);
        let scene = UniformScene::NEUTRAL;

        // Start inside block (0, 0, 0), but strike the quad above it.
        let mut ray = Ray::new([0.5, 0.99, 0.0], [0.0, 0.1, 1.0]);
        let before = ray;
        assert!(!model.intersect(&mut ray, &scene));
        assert_eq!(ray, before);

        let mut ray = Ray::new([0.5, 0.5, 0.0], [0.0, 0.0, 1.0]);
        assert!(model.intersect(&mut ray, &scene));
        assert_eq!(ray.t, 0.5);
    }

    #[rstest]
    #[case::interior(0.5, true)]
    #[case::within_tolerance(1.0 + EPSILON * 0.5, true)]
    #[case::beyond_tolerance(1.0 + EPSILON * 2.0, false)]
    #[case::extremity(1.05, false)]
    fn containment_tolerance(#[case] y: FreeCoordinate, #[case] accepted: bool) {
        let quads = [overhanging_quad()];
        let ray = LocalRay::new([0.5, y, 0.0], [0.0, 0.0, 1.0]);
        assert_eq!(
            evaluate_quads(&quads, &ray, |_, _| Rgba::WHITE).is_some(),
            accepted
        );
    }

    #[test]
    fn tint_applies_at_hit_point() {
        #[derive(Debug)]
        struct ByHeight;
        impl Scene for ByHeight {
            fn biome_color(&self, kind: BiomeKind, position: WorldPoint) -> Rgb {
                assert_eq!(kind, BiomeKind::Foliage);
                Rgb::from_luminance(position.z as f32)
            }
            fn animation_time(&self) -> f64 {
                0.0
            }
        }

        let model = model(vec![middle_quad()], &[Rgba::new(1.0, 1.0, 1.0, 0.5)])
            .with_tints(vec![Tint::BiomeFoliage])
            .unwrap();
        let mut ray = Ray::new([0.5, 0.5, 0.0], [0.0, 0.0, 1.0]);
        assert!(model.intersect(&mut ray, &ByHeight));
        assert_eq!(ray.color, Rgba::new(0.5, 0.5, 0.5, 0.5));
    }

    #[test]
    fn opaque_forces_alpha() {
        let model = model(vec![middle_quad()], &[Rgba::new(0.2, 0.4, 0.6, 0.5)]).opaque();
        let mut ray = Ray::new([0.5, 0.5, 0.0], [0.0, 0.0, 1.0]);
        assert!(model.intersect(&mut ray, &UniformScene::NEUTRAL));
        assert_eq!(ray.color, Rgba::new(0.2, 0.4, 0.6, 1.0));
    }

    #[test]
    fn length_mismatch() {
        assert_eq!(
            QuadModel::new(vec![middle_quad()], Vec::<TextureRef>::new()).unwrap_err(),
            ModelError::LengthMismatch {
                what: "texture",
                expected: 1,
                actual: 0
            }
        );
        assert_eq!(
            model(vec![middle_quad()], &[Rgba::WHITE])
                .with_tints(vec![Tint::None, Tint::None])
                .unwrap_err(),
            ModelError::LengthMismatch {
                what: "tint",
                expected: 1,
                actual: 2
            }
        );
    }

    #[test]
    fn faces() {
        let quarter = Quad::new(
            point3(0.0, 0.0, 0.0),
            point3(0.5, 0.0, 0.0),
            point3(0.0, 0.5, 0.0),
            [0.0, 1.0, 0.0, 1.0],
        );
        let model = QuadModel::with_texture(vec![middle_quad(), quarter], &solid(Rgba::WHITE));
        assert_eq!(model.face_count(), 2);
        assert_eq!(model.face_surface_area(0), 1.0);
        assert_eq!(model.face_surface_area(1), 0.25);
        let mut rng = rand_xoshiro::Xoshiro256Plus::seed_from_u64(1);
        for _ in 0..20 {
            let p = model.sample(1, &mut rng);
            assert_eq!(p.z, 0.0);
            assert!(p.x <= 0.5 && p.y <= 0.5, "{p:?}");
        }
    }
}
