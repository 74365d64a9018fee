use alloc::sync::Arc;

use crate::catalog::reject;
use crate::math::{Aab, Face6, FaceMap};
use crate::model::{BoxModel, ModelError};
use crate::texture::TextureRef;

/// Returns the model of a slab: half a block, in the lower half for `kind` `"bottom"`
/// or the upper half for `"top"`, or a whole block for `"double"`.
///
/// The top and bottom faces of the box take the textures of those names and the other
/// faces take `side`. Slabs are opaque.
///
/// Returns an error for any other `kind`.
///
/// ```
/// use std::sync::Arc;
/// use blockray::catalog::slab;
/// use blockray::math::Rgba;
/// use blockray::texture::TextureRef;
///
/// let stone: TextureRef = Arc::new(Rgba::new(0.5, 0.5, 0.5, 1.0));
/// assert!(slab("bottom", &stone, &stone, &stone).is_ok());
/// assert!(slab("sideways", &stone, &stone, &stone).is_err());
/// ```
#[allow(clippy::missing_inline_in_public_items)]
pub fn slab(
    kind: &str,
    top: &TextureRef,
    side: &TextureRef,
    bottom: &TextureRef,
) -> Result<BoxModel, ModelError> {
    let aab = match kind {
        "bottom" => Aab::new(0.0, 1.0, 0.0, 0.5, 0.0, 1.0),
        "top" => Aab::new(0.0, 1.0, 0.5, 1.0, 0.0, 1.0),
        "double" => Aab::FULL_BLOCK,
        _ => {
            return Err(reject(
                "slab",
                ModelError::UnknownVariant {
                    block: "slab",
                    key: kind.into(),
                },
            ));
        }
    };
    let textures = FaceMap::splat(Some(Arc::clone(side)))
        .with(Face6::PY, Some(Arc::clone(top)))
        .with(Face6::NY, Some(Arc::clone(bottom)));
    Ok(BoxModel::new(vec![aab], vec![textures])?.opaque())
}
