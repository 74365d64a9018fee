//! The [`Texture`] collaborator: colors sampled at texture coordinates.
//!
//! Texture storage and decoding belong to the caller; this module defines only the
//! sampling interface models use, plus a few simple implementations.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::math::{FreeCoordinate, Rgba, TexPoint};

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::Float as _;
use crate::model::ModelError;

/// A source of surface color, sampled at texture coordinates in `[0, 1]²`.
///
/// Implementations are sampled concurrently from every rendering thread.
pub trait Texture: fmt::Debug + Send + Sync {
    /// Returns the color at `uv`.
    ///
    /// The alpha of the result decides whether a hit counts: models treat samples whose
    /// alpha is not greater than [`EPSILON`](crate::raycast::EPSILON) as holes.
    fn sample(&self, uv: TexPoint) -> Rgba;

    /// Returns the color at `uv` in animation frame `frame`.
    ///
    /// `frame` may be any integer, including negative ones; implementations with a finite
    /// number of frames must reduce it modulo their frame count. The default
    /// implementation ignores `frame`, for textures which are not animated.
    #[inline]
    fn sample_frame(&self, uv: TexPoint, frame: i64) -> Rgba {
        let _ = frame;
        self.sample(uv)
    }
}

/// Shared handle to a [`Texture`]; the type models store.
pub type TextureRef = Arc<dyn Texture>;

/// A single color is a texture which is that color everywhere.
impl Texture for Rgba {
    #[inline]
    fn sample(&self, _uv: TexPoint) -> Rgba {
        *self
    }
}

/// A texture made of a grid of pixels, sampled without filtering.
///
/// Rows are stored top to bottom, so the first row is at `v = 1` and the last at `v = 0`,
/// matching the layout of image files.
#[derive(Clone, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Arc<[Rgba]>,
}

impl Image {
    /// Constructs an [`Image`] from its pixels in row-major order.
    ///
    /// Returns an error if `pixels` does not contain exactly `width * height` entries or if
    /// either dimension is zero.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn new(width: usize, height: usize, pixels: Vec<Rgba>) -> Result<Self, ModelError> {
        let expected = width.saturating_mul(height);
        if width == 0 || height == 0 || pixels.len() != expected {
            log::warn!(
                "rejecting {width}×{height} image with {} pixels",
                pixels.len()
            );
            return Err(ModelError::LengthMismatch {
                what: "pixel",
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels: pixels.into(),
        })
    }

    /// Width of the image in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the image in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    fn pixel_index(size: usize, coordinate: FreeCoordinate) -> usize {
        // Saturating float-to-int conversion also maps NaN to 0.
        let i = (coordinate * size as FreeCoordinate).floor() as isize;
        i.clamp(0, size as isize - 1) as usize
    }
}

impl Texture for Image {
    #[inline]
    fn sample(&self, uv: TexPoint) -> Rgba {
        let x = Self::pixel_index(self.width, uv.x);
        let y = Self::pixel_index(self.height, 1.0 - uv.y);
        self.pixels[y * self.width + x]
    }
}

impl fmt::Debug for Image {
    #[allow(clippy::missing_inline_in_public_items)]
    #[mutants::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// An animated texture made of a sequence of frames, each of which is a texture.
#[derive(Clone, Debug)]
pub struct FrameStrip {
    frames: Arc<[TextureRef]>,
}

impl FrameStrip {
    /// Constructs a [`FrameStrip`] from its frames, in order.
    ///
    /// Returns an error if there are no frames.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn new(frames: Vec<TextureRef>) -> Result<Self, ModelError> {
        if frames.is_empty() {
            log::warn!("rejecting animated texture with no frames");
            return Err(ModelError::LengthMismatch {
                what: "frame",
                expected: 1,
                actual: 0,
            });
        }
        Ok(Self {
            frames: frames.into(),
        })
    }

    /// Number of frames in the animation.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn frame(&self, frame: i64) -> &TextureRef {
        // The frame count is nonzero and far below i64::MAX.
        let count = self.frames.len() as i64;
        &self.frames[frame.rem_euclid(count) as usize]
    }
}

impl Texture for FrameStrip {
    /// Samples the first frame.
    #[inline]
    fn sample(&self, uv: TexPoint) -> Rgba {
        self.frame(0).sample(uv)
    }

    #[inline]
    fn sample_frame(&self, uv: TexPoint, frame: i64) -> Rgba {
        self.frame(frame).sample(uv)
    }
}
