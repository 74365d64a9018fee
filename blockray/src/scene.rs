//! The [`Scene`] collaborator: the parts of the surrounding world that block models
//! consult while evaluating a ray.

use crate::math::{GridPoint, Rgb, WorldPoint};

/// Which biome-dependent color a [`Tint`](crate::tint::Tint) asks for.
#[expect(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, exhaust::Exhaust)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BiomeKind {
    /// Color of leaves and vines.
    Foliage,
    /// Color of grass and ferns.
    Grass,
    /// Color of water.
    Water,
}

/// Information about the world which block models need in order to color a hit.
///
/// Implementations are consulted concurrently from every rendering thread, and must
/// return the same answer for the same arguments for the duration of a frame.
pub trait Scene {
    /// Returns the linear-space color multiplier for `kind` at `position`.
    fn biome_color(&self, kind: BiomeKind, position: WorldPoint) -> Rgb;

    /// Returns the scene time, in seconds, used to select animation frames.
    fn animation_time(&self) -> f64;

    /// Returns a deterministic pseudo-random value for the block at `cube`, used to
    /// offset animations so that neighboring blocks are out of phase.
    ///
    /// The default implementation is [`position_hash()`].
    #[inline]
    fn position_hash(&self, cube: GridPoint) -> i64 {
        position_hash(cube)
    }
}

/// Deterministic pseudo-random value for a block position.
///
/// This is the coordinate seed used throughout Minecraft-derived world data for per-block
/// variation, so animations offset by it line up with other renderers of the same world.
///
/// ```
/// use blockray::euclid::point3;
/// use blockray::scene::position_hash;
///
/// assert_eq!(position_hash(point3(0, 0, 0)), 0);
/// assert_eq!(position_hash(point3(1, 2, 3)), position_hash(point3(1, 2, 3)));
/// assert_ne!(position_hash(point3(1, 2, 3)), position_hash(point3(3, 2, 1)));
/// ```
#[inline]
pub fn position_hash(cube: GridPoint) -> i64 {
    let x = i64::from(cube.x);
    let y = i64::from(cube.y);
    let z = i64::from(cube.z);
    let l = x.wrapping_mul(3129871) ^ z.wrapping_mul(116129781) ^ y;
    let l = l
        .wrapping_mul(l)
        .wrapping_mul(42317861)
        .wrapping_add(l.wrapping_mul(11));
    l >> 16
}

/// A [`Scene`] with the same biome colors everywhere and a fixed time.
///
/// Useful for previews of individual blocks, and for tests.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct UniformScene {
    /// Result of [`Scene::biome_color()`] for [`BiomeKind::Foliage`].
    pub foliage: Rgb,
    /// Result of [`Scene::biome_color()`] for [`BiomeKind::Grass`].
    pub grass: Rgb,
    /// Result of [`Scene::biome_color()`] for [`BiomeKind::Water`].
    pub water: Rgb,
    /// Result of [`Scene::animation_time()`].
    pub time: f64,
}

impl UniformScene {
    /// A scene whose biome colors are all white (leaving tinted colors unchanged) at time
    /// zero.
    pub const NEUTRAL: Self = Self {
        foliage: Rgb::ONE,
        grass: Rgb::ONE,
        water: Rgb::ONE,
        time: 0.0,
    };

    /// Returns a copy of this scene at the given time.
    #[inline]
    #[must_use]
    pub const fn at_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    /// Returns a copy of this scene with the given biome colors.
    #[inline]
    #[must_use]
    pub const fn with_biome_colors(mut self, foliage: Rgb, grass: Rgb, water: Rgb) -> Self {
        self.foliage = foliage;
        self.grass = grass;
        self.water = water;
        self
    }
}

impl Default for UniformScene {
    #[inline]
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl Scene for UniformScene {
    #[inline]
    fn biome_color(&self, kind: BiomeKind, _position: WorldPoint) -> Rgb {
        match kind {
            BiomeKind::Foliage => self.foliage,
            BiomeKind::Grass => self.grass,
            BiomeKind::Water => self.water,
        }
    }

    #[inline]
    fn animation_time(&self) -> f64 {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::point3;

    #[test]
    fn position_hash_known_values() {
        // x = 1: l = 3129871; l * l * 42317861 + l * 11, wrapped, then shifted.
        let l: i64 = 3129871;
        let expected = l
            .wrapping_mul(l)
            .wrapping_mul(42317861)
            .wrapping_add(l * 11)
            >> 16;
        assert_eq!(position_hash(point3(1, 0, 0)), expected);
        // y enters without a multiplier.
        assert_eq!(position_hash(point3(0, 1, 0)), (42317861 + 11) >> 16);
    }

    #[test]
    fn position_hash_does_not_overflow_at_extremes() {
        let _ = position_hash(point3(i32::MAX, i32::MIN, i32::MAX));
        let _ = position_hash(point3(i32::MIN, i32::MAX, i32::MIN));
    }

    #[test]
    fn position_hash_varies_between_neighbors() {
        let center = position_hash(point3(10, 64, -20));
        for neighbor in [point3(11, 64, -20), point3(10, 65, -20), point3(10, 64, -19)] {
            assert_ne!(position_hash(neighbor), center, "{neighbor:?}");
        }
    }

    #[test]
    fn uniform_scene_answers() {
        let scene = UniformScene::NEUTRAL
            .with_biome_colors(
                Rgb::new(0.1, 0.2, 0.3),
                Rgb::new(0.4, 0.5, 0.6),
                Rgb::new(0.7, 0.8, 0.9),
            )
            .at_time(2.5);
        let p = point3(0.0, 0.0, 0.0);
        assert_eq!(scene.biome_color(BiomeKind::Grass, p), Rgb::new(0.4, 0.5, 0.6));
        assert_eq!(scene.biome_color(BiomeKind::Water, p), Rgb::new(0.7, 0.8, 0.9));
        assert_eq!(scene.animation_time(), 2.5);
    }
}
