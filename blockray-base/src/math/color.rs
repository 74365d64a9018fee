//! Color data types. This module is private but reexported by its parent.

use core::fmt;
use core::ops::Mul;

use euclid::{Vector3D, vec3};

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::Float as _;

/// A floating-point RGB color value.
///
/// * Each color component must have a non-NaN value.
///   Components have a nominal range of 0 to 1 but are not clamped.
/// * Color components are linear (gamma = 1), but use the same RGB primaries as sRGB
///   (Rec. 709).
///
/// When used as a tint, an [`Rgb`] is a per-channel multiplier.
#[derive(Clone, Copy, PartialEq)]
pub struct Rgb(Vector3D<f32, Intensity>);

/// A floating-point RGBA color value.
///
/// * Each color component must have a non-NaN value.
/// * Color components are linear (gamma = 1), but use the same RGB primaries as sRGB
///   (Rec. 709).
/// * The alpha is not premultiplied.
#[derive(Clone, Copy, PartialEq)]
pub struct Rgba {
    rgb: Rgb,
    alpha: f32,
}

/// Unit-of-measure type for vectors that contain color channels.
#[expect(clippy::exhaustive_enums)]
#[derive(Debug, Eq, PartialEq)]
pub enum Intensity {}

impl Rgb {
    /// Black; the constant equal to `Rgb::new(0., 0., 0.)`.
    pub const ZERO: Rgb = Rgb(vec3(0.0, 0.0, 0.0));
    /// Nominal white; the constant equal to `Rgb::new(1., 1., 1.)`.
    ///
    /// As a tint, this is the multiplier that leaves colors unchanged.
    pub const ONE: Rgb = Rgb(vec3(1.0, 1.0, 1.0));

    /// Constructs a color from components.
    ///
    /// Panics if any component is NaN.
    #[inline]
    #[track_caller]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        if r.is_nan() || g.is_nan() || b.is_nan() {
            panic!("color component is NaN");
        }
        Self(vec3(r, g, b))
    }

    /// Constructs a shade of gray (components all equal). Panics if any component is NaN.
    #[inline]
    #[track_caller]
    pub const fn from_luminance(luminance: f32) -> Self {
        Self::new(luminance, luminance, luminance)
    }

    /// Adds an alpha component to produce an [`Rgba`] color.
    ///
    /// Panics if `alpha` is NaN.
    #[inline]
    #[track_caller]
    pub const fn with_alpha(self, alpha: f32) -> Rgba {
        if alpha.is_nan() {
            panic!("alpha component is NaN");
        }
        Rgba { rgb: self, alpha }
    }

    /// Adds an alpha component of `1.0` (fully opaque) to produce an [`Rgba`] color.
    #[inline]
    pub const fn with_alpha_one(self) -> Rgba {
        Rgba {
            rgb: self,
            alpha: 1.0,
        }
    }

    /// Returns the red color component. Values are linear (gamma = 1).
    #[inline]
    pub const fn red(self) -> f32 {
        self.0.x
    }
    /// Returns the green color component. Values are linear (gamma = 1).
    #[inline]
    pub const fn green(self) -> f32 {
        self.0.y
    }
    /// Returns the blue color component. Values are linear (gamma = 1).
    #[inline]
    pub const fn blue(self) -> f32 {
        self.0.z
    }

    /// Converts sRGB 8-bits-per-component color to the corresponding linear [`Rgb`] value.
    ///
    /// ```
    /// # extern crate blockray_base as blockray;
    /// use blockray::math::Rgb;
    ///
    /// assert_eq!(Rgb::from_srgb8([0, 0, 0]), Rgb::ZERO);
    /// assert_eq!(Rgb::from_srgb8([255, 255, 255]), Rgb::ONE);
    /// ```
    #[inline]
    pub fn from_srgb8(rgb: [u8; 3]) -> Self {
        Self(vec3(
            component_from_srgb8(rgb[0]),
            component_from_srgb8(rgb[1]),
            component_from_srgb8(rgb[2]),
        ))
    }
}

impl Rgba {
    /// Transparent black (all components zero); identical to
    /// `Rgba::new(0.0, 0.0, 0.0, 0.0)` except for being a constant.
    pub const TRANSPARENT: Rgba = Rgba {
        rgb: Rgb::ZERO,
        alpha: 0.0,
    };
    /// Black; identical to `Rgba::new(0.0, 0.0, 0.0, 1.0)` except for being a constant.
    pub const BLACK: Rgba = Rgba {
        rgb: Rgb::ZERO,
        alpha: 1.0,
    };
    /// White; identical to `Rgba::new(1.0, 1.0, 1.0, 1.0)` except for being a constant.
    pub const WHITE: Rgba = Rgba {
        rgb: Rgb::ONE,
        alpha: 1.0,
    };

    /// Constructs a color from components. Panics if any component is NaN.
    #[inline]
    #[track_caller]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Rgb::new(r, g, b).with_alpha(a)
    }

    /// Returns the red color component. Values are linear (gamma = 1).
    #[inline]
    pub const fn red(self) -> f32 {
        self.rgb.red()
    }
    /// Returns the green color component. Values are linear (gamma = 1).
    #[inline]
    pub const fn green(self) -> f32 {
        self.rgb.green()
    }
    /// Returns the blue color component. Values are linear (gamma = 1).
    #[inline]
    pub const fn blue(self) -> f32 {
        self.rgb.blue()
    }
    /// Returns the alpha component.
    ///
    /// Note that the RGB components are not premultiplied by alpha.
    #[inline]
    pub const fn alpha(self) -> f32 {
        self.alpha
    }

    /// Discards the alpha component to produce an RGB color.
    #[inline]
    pub const fn to_rgb(self) -> Rgb {
        self.rgb
    }

    /// Returns this color with its alpha component replaced.
    ///
    /// Panics if `alpha` is NaN.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        self.rgb.with_alpha(alpha)
    }

    /// Applies a function to the RGB portion of this color.
    #[inline]
    #[must_use]
    pub fn map_rgb(self, f: impl FnOnce(Rgb) -> Rgb) -> Self {
        Self {
            rgb: f(self.rgb),
            alpha: self.alpha,
        }
    }

    /// Converts sRGB 8-bits-per-component color to the corresponding linear [`Rgba`] value.
    /// The alpha component is taken as linear.
    #[inline]
    pub fn from_srgb8(rgba: [u8; 4]) -> Self {
        Rgb::from_srgb8([rgba[0], rgba[1], rgba[2]]).with_alpha(f32::from(rgba[3]) / 255.0)
    }
}

impl From<Rgb> for [f32; 3] {
    #[inline]
    fn from(value: Rgb) -> Self {
        value.0.into()
    }
}
impl From<Rgba> for [f32; 4] {
    #[inline]
    fn from(value: Rgba) -> Self {
        [value.red(), value.green(), value.blue(), value.alpha]
    }
}

/// Multiplies two color values componentwise.
impl Mul<Rgb> for Rgb {
    type Output = Self;
    #[inline]
    fn mul(self, other: Rgb) -> Self {
        Self(self.0.component_mul(other.0))
    }
}

/// Multiplies this color value by a scalar.
impl Mul<f32> for Rgb {
    type Output = Self;
    /// Multiplies this color value by a scalar. Panics if the result is NaN.
    #[inline]
    #[track_caller]
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.red() * scalar, self.green() * scalar, self.blue() * scalar)
    }
}

impl fmt::Debug for Rgb {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            fmt,
            "Rgb({:?}, {:?}, {:?})",
            self.red(),
            self.green(),
            self.blue()
        )
    }
}
impl fmt::Debug for Rgba {
    #[allow(clippy::missing_inline_in_public_items)]
    #[mutants::skip]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            fmt,
            "Rgba({:?}, {:?}, {:?}, {:?})",
            self.red(),
            self.green(),
            self.blue(),
            self.alpha()
        )
    }
}

fn component_from_srgb8(c: u8) -> f32 {
    let c = f32::from(c) / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
