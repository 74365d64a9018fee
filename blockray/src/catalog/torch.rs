use alloc::sync::Arc;
use alloc::vec::Vec;

use euclid::point3;

use crate::catalog::{LazyTable, reject};
use crate::facing::{Facing, facing_variants, transform_quads};
use crate::math::{Angle, Axis, Face6, FreeCoordinate, Quad, Transform};
use crate::model::{ModelError, QuadModel};
use crate::texture::TextureRef;

/// Sixteenths of a block, the unit torch geometry is written in.
fn px(n: FreeCoordinate) -> FreeCoordinate {
    n / 16.0
}

/// Flame and stick tip, base, and the two crossed pairs of stick sides.
fn standing_quads() -> Arc<[Quad]> {
    let side_uv = [1.0, 0.0, 1.0, 0.0];
    Arc::new([
        Quad::new(
            point3(px(7.), px(10.), px(9.)),
            point3(px(9.), px(10.), px(9.)),
            point3(px(7.), px(10.), px(7.)),
            [px(7.), px(9.), px(8.), px(10.)],
        ),
        Quad::new(
            point3(px(7.), 0.0, px(7.)),
            point3(px(9.), 0.0, px(7.)),
            point3(px(7.), 0.0, px(9.)),
            [px(7.), px(9.), px(1.), px(3.)],
        ),
        Quad::new(
            point3(px(7.), 1.0, 1.0),
            point3(px(7.), 1.0, 0.0),
            point3(px(7.), 0.0, 1.0),
            side_uv,
        ),
        Quad::new(
            point3(px(9.), 1.0, 0.0),
            point3(px(9.), 1.0, 1.0),
            point3(px(9.), 0.0, 0.0),
            side_uv,
        ),
        Quad::new(
            point3(0.0, 1.0, px(7.)),
            point3(1.0, 1.0, px(7.)),
            point3(0.0, 0.0, px(7.)),
            side_uv,
        ),
        Quad::new(
            point3(1.0, 1.0, px(9.)),
            point3(0.0, 1.0, px(9.)),
            point3(1.0, 0.0, px(9.)),
            side_uv,
        ),
    ])
}

/// A torch mounted on the west wall, leaning east. Parts of the stick sides reach into
/// the neighboring blocks and are clipped by the quad evaluator's containment check.
fn east_wall_quads() -> Vec<Quad> {
    let side_uv = [1.0, 0.0, 1.0, 0.0];
    let unrotated = [
        Quad::new(
            point3(px(-1.), px(13.5), px(9.)),
            point3(px(1.), px(13.5), px(9.)),
            point3(px(-1.), px(13.5), px(7.)),
            [px(7.), px(9.), px(8.), px(10.)],
        ),
        Quad::new(
            point3(px(-1.), px(3.5), px(7.)),
            point3(px(1.), px(3.5), px(7.)),
            point3(px(-1.), px(3.5), px(9.)),
            [px(7.), px(9.), px(1.), px(3.)],
        ),
        Quad::new(
            point3(px(-1.), px(19.5), 1.0),
            point3(px(-1.), px(19.5), 0.0),
            point3(px(-1.), px(3.5), 1.0),
            side_uv,
        ),
        Quad::new(
            point3(px(1.), px(19.5), 0.0),
            point3(px(1.), px(19.5), 1.0),
            point3(px(1.), px(3.5), 0.0),
            side_uv,
        ),
        Quad::new(
            point3(px(-8.), px(19.5), px(7.)),
            point3(px(8.), px(19.5), px(7.)),
            point3(px(-8.), px(3.5), px(7.)),
            side_uv,
        ),
        Quad::new(
            point3(px(8.), px(19.5), px(9.)),
            point3(px(-8.), px(19.5), px(9.)),
            point3(px(8.), px(3.5), px(9.)),
            side_uv,
        ),
    ];
    let lean = Transform::rotation_about(
        Axis::Z,
        Angle::degrees(-22.5),
        point3(0.0, px(3.5), px(8.)),
    );
    unrotated.iter().map(|quad| quad.transformed(&lean)).collect()
}

fn wall_variants() -> [Arc<[Quad]>; 4] {
    let north = transform_quads(&east_wall_quads(), &Transform::quarter_turn(Face6::PY));
    facing_variants(&north)
}

static STANDING: LazyTable<Arc<[Quad]>> = LazyTable::new("standing torch", standing_quads);
static WALL: LazyTable<[Arc<[Quad]>; 4]> = LazyTable::new("wall torch", wall_variants);

/// Returns the model of a torch standing on the floor.
///
/// ```
/// use std::sync::Arc;
/// use blockray::catalog::standing_torch;
/// use blockray::math::Rgba;
/// use blockray::model::BlockModel;
/// use blockray::raycast::Ray;
/// use blockray::scene::UniformScene;
/// use blockray::texture::TextureRef;
///
/// let texture: TextureRef = Arc::new(Rgba::WHITE);
/// let torch = standing_torch(&texture);
/// let mut ray = Ray::new([0.5, 1.0, 0.5], [0.0, -1.0, 0.0]);
/// assert!(torch.intersect(&mut ray, &UniformScene::NEUTRAL));
/// assert_eq!(ray.t, 6.0 / 16.0);
/// ```
#[allow(clippy::missing_inline_in_public_items)]
pub fn standing_torch(texture: &TextureRef) -> QuadModel {
    QuadModel::with_texture(Arc::clone(STANDING.get()), texture)
}

/// Returns the model of a torch mounted on a wall, pointing away from the wall in the
/// direction `facing` names.
///
/// Returns an error if `facing` is not a facing name, or is `"up"` or `"down"`.
#[allow(clippy::missing_inline_in_public_items)]
pub fn wall_torch(facing: &str, texture: &TextureRef) -> Result<QuadModel, ModelError> {
    let facing: Facing = facing.parse().map_err(|e| reject("wall torch", e))?;
    let Some(index) = facing.horizontal_index() else {
        return Err(reject(
            "wall torch",
            ModelError::UnknownVariant {
                block: "wall_torch",
                key: facing.name().into(),
            },
        ));
    };
    Ok(QuadModel::with_texture(Arc::clone(&WALL.get()[index]), texture))
}
