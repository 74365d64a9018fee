//! [`Tint`]: color modulation applied to texture samples at hit time.

use crate::math::{Rgb, Rgba};
use crate::raycast::Ray;
use crate::scene::{BiomeKind, Scene};

/// How to modulate the color sampled from a texture before it is reported as a hit.
///
/// The biome variants carry no color of their own; it is looked up from the
/// [`Scene`] at the position of the hit.
#[expect(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tint {
    /// Leave the sample unchanged.
    #[default]
    None,
    /// Multiply by a fixed linear-space color.
    Constant(Rgb),
    /// Multiply by the scene's foliage color.
    BiomeFoliage,
    /// Multiply by the scene's grass color.
    BiomeGrass,
    /// Multiply by the scene's water color.
    BiomeWater,
}

impl Tint {
    /// Returns which biome color this tint looks up, if any.
    #[inline]
    pub const fn biome_kind(self) -> Option<BiomeKind> {
        match self {
            Tint::BiomeFoliage => Some(BiomeKind::Foliage),
            Tint::BiomeGrass => Some(BiomeKind::Grass),
            Tint::BiomeWater => Some(BiomeKind::Water),
            Tint::None | Tint::Constant(_) => None,
        }
    }

    /// Returns the color multiplier this tint stands for at the current position of
    /// `ray`, or [`None`] if it leaves colors unchanged.
    ///
    /// Models call this after advancing the ray, so biome colors are those of the hit
    /// point.
    #[inline]
    pub fn resolve(self, ray: &Ray, scene: &dyn Scene) -> Option<Rgb> {
        match self {
            Tint::None => None,
            Tint::Constant(color) => Some(color),
            Tint::BiomeFoliage | Tint::BiomeGrass | Tint::BiomeWater => self
                .biome_kind()
                .map(|kind| scene.biome_color(kind, ray.origin)),
        }
    }

    /// Multiplies the RGB components of `color` by [`Tint::resolve()`], leaving alpha
    /// unchanged.
    ///
    /// ```
    /// use blockray::math::{Rgb, Rgba};
    /// use blockray::raycast::Ray;
    /// use blockray::scene::UniformScene;
    /// use blockray::tint::Tint;
    ///
    /// let ray = Ray::new([0.5, 0.5, 0.5], [0.0, 0.0, 1.0]);
    /// let tint = Tint::Constant(Rgb::new(0.25, 0.5, 0.75));
    /// assert_eq!(
    ///     tint.apply(Rgba::WHITE, &ray, &UniformScene::NEUTRAL),
    ///     Rgba::new(0.25, 0.5, 0.75, 1.0),
    /// );
    /// ```
    #[inline]
    #[must_use]
    pub fn apply(self, color: Rgba, ray: &Ray, scene: &dyn Scene) -> Rgba {
        match self.resolve(ray, scene) {
            Some(multiplier) => color.map_rgb(|rgb| rgb * multiplier),
            None => color,
        }
    }
}

impl From<Rgb> for Tint {
    #[inline]
    fn from(color: Rgb) -> Self {
        Tint::Constant(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::UniformScene;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn ray() -> Ray {
        Ray::new([10.5, 64.0, -3.25], [0.0, -1.0, 0.0])
    }

    #[test]
    fn constant_on_white_is_exact() {
        let triple = Rgb::new(0.3, 0.6, 0.9);
        let tinted = Tint::Constant(triple).apply(
            Rgb::ONE.with_alpha(0.4),
            &ray(),
            &UniformScene::NEUTRAL,
        );
        assert_eq!(tinted.to_rgb(), triple);
        assert_eq!(tinted.alpha(), 0.4);
    }

    #[test]
    fn none_is_identity() {
        let color = Rgba::new(0.1, 0.2, 0.3, 0.5);
        assert_eq!(Tint::None.resolve(&ray(), &UniformScene::NEUTRAL), None);
        assert_eq!(Tint::None.apply(color, &ray(), &UniformScene::NEUTRAL), color);
    }

    #[rstest]
    #[case(Tint::BiomeFoliage, Rgb::new(0.1, 0.2, 0.3))]
    #[case(Tint::BiomeGrass, Rgb::new(0.4, 0.5, 0.6))]
    #[case(Tint::BiomeWater, Rgb::new(0.7, 0.8, 0.9))]
    fn biome_lookup(#[case] tint: Tint, #[case] expected: Rgb) {
        let scene = UniformScene::NEUTRAL.with_biome_colors(
            Rgb::new(0.1, 0.2, 0.3),
            Rgb::new(0.4, 0.5, 0.6),
            Rgb::new(0.7, 0.8, 0.9),
        );
        assert_eq!(tint.resolve(&ray(), &scene), Some(expected));
        assert_eq!(
            tint.apply(Rgba::WHITE, &ray(), &scene),
            expected.with_alpha_one()
        );
    }

    #[test]
    fn biome_lookup_uses_ray_position() {
        #[derive(Debug)]
        struct Gradient;
        impl Scene for Gradient {
            fn biome_color(&self, _: BiomeKind, position: crate::math::WorldPoint) -> Rgb {
                Rgb::from_luminance(position.x as f32 / 16.0)
            }
            fn animation_time(&self) -> f64 {
                0.0
            }
        }
        assert_eq!(
            Tint::BiomeGrass.resolve(&ray(), &Gradient),
            Some(Rgb::from_luminance(10.5 / 16.0))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let tint = Tint::Constant(Rgb::new(0.5, 0.25, 1.0));
        let json = serde_json::to_string(&tint).unwrap();
        assert_eq!(serde_json::from_str::<Tint>(&json).unwrap(), tint);
    }
}
