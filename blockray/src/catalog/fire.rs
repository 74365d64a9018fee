use alloc::sync::Arc;

use euclid::point3;

use crate::catalog::LazyTable;
use crate::math::{Angle, Axis, Quad, Transform};
use crate::model::{AnimatedQuadModel, AnimationMode, AnimationSettings};
use crate::texture::TextureRef;

/// Fire textures advance one frame per game tick, and neighboring fires flicker out of
/// step.
pub const FIRE_ANIMATION: AnimationSettings = AnimationSettings {
    framerate: 20.0,
    mode: AnimationMode::Positional,
};

/// Four sheets of flame, one near each side of the block, each leaning in over the
/// center. They are taller than the block; the part above it is clipped.
fn fire_quads() -> Arc<[Quad]> {
    let near = 7.2 / 16.0;
    let far = 8.8 / 16.0;
    let height = 1.4;
    let uv = [0.0, 1.0, 0.0, 1.0];
    let lean = |axis, degrees| Transform::rotation(axis, Angle::degrees(degrees));
    let sheets = [
        (
            Quad::new(
                point3(0.0, 0.0, far),
                point3(1.0, 0.0, far),
                point3(0.0, height, far),
                uv,
            ),
            lean(Axis::X, -22.5),
        ),
        (
            Quad::new(
                point3(1.0, 0.0, near),
                point3(0.0, 0.0, near),
                point3(1.0, height, near),
                uv,
            ),
            lean(Axis::X, 22.5),
        ),
        (
            Quad::new(
                point3(far, 0.0, 1.0),
                point3(far, 0.0, 0.0),
                point3(far, height, 1.0),
                uv,
            ),
            lean(Axis::Z, 22.5),
        ),
        (
            Quad::new(
                point3(near, 0.0, 0.0),
                point3(near, 0.0, 1.0),
                point3(near, height, 0.0),
                uv,
            ),
            lean(Axis::Z, -22.5),
        ),
    ];
    sheets
        .iter()
        .map(|(quad, lean)| quad.transformed(lean).double_sided())
        .collect()
}

static FIRE: LazyTable<Arc<[Quad]>> = LazyTable::new("fire", fire_quads);

/// Returns the model of a fire block.
///
/// Fire has two flame textures, usually two [`FrameStrip`](crate::texture::FrameStrip)s
/// of the same length. Even-numbered sheets show `first` and odd-numbered sheets show
/// `second`, so that facing sheets differ.
#[allow(clippy::missing_inline_in_public_items)]
pub fn fire(first: &TextureRef, second: &TextureRef) -> AnimatedQuadModel {
    let quads = Arc::clone(FIRE.get());
    let textures = (0..quads.len())
        .map(|i| Arc::clone(if i % 2 == 0 { first } else { second }))
        .collect();
    AnimatedQuadModel::from_table(quads, textures, FIRE_ANIMATION)
}
