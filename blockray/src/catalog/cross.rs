use alloc::sync::Arc;

use euclid::point3;

use crate::catalog::LazyTable;
use crate::math::Quad;
use crate::model::QuadModel;
use crate::texture::TextureRef;
use crate::tint::Tint;

/// Inset of the diagonal sheets from the block's vertical edges.
const INSET: f64 = 0.8 / 16.0;

fn cross_quads() -> Arc<[Quad]> {
    let (a, b) = (INSET, 1.0 - INSET);
    let uv = [0.0, 1.0, 0.0, 1.0];
    Arc::new([
        Quad::new(point3(a, 0.0, a), point3(b, 0.0, b), point3(a, 1.0, a), uv).double_sided(),
        Quad::new(point3(a, 0.0, b), point3(b, 0.0, a), point3(a, 1.0, b), uv).double_sided(),
    ])
}

static CROSS: LazyTable<Arc<[Quad]>> = LazyTable::new("cross plant", cross_quads);

/// Returns the model of a plant drawn as two crossed sheets, such as a flower, sapling,
/// or tall grass, colored by `tint`.
#[allow(clippy::missing_inline_in_public_items)]
pub fn cross_plant(texture: &TextureRef, tint: Tint) -> QuadModel {
    QuadModel::with_texture(Arc::clone(CROSS.get()), texture).with_tint(tint)
}
