#![allow(clippy::missing_inline_in_public_items)]

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::math::{Rgb, Rgba};

// Colors are written as bare component arrays. Reading one goes through the same NaN
// check as the constructors.

impl Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        <[f32; 3]>::from(*self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [r, g, b] = <[f32; 3]>::deserialize(deserializer)?;
        if r.is_nan() || g.is_nan() || b.is_nan() {
            return Err(D::Error::custom("color component is NaN"));
        }
        Ok(Rgb::new(r, g, b))
    }
}

impl Serialize for Rgba {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        <[f32; 4]>::from(*self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [r, g, b, a] = <[f32; 4]>::deserialize(deserializer)?;
        if r.is_nan() || g.is_nan() || b.is_nan() || a.is_nan() {
            return Err(D::Error::custom("color component is NaN"));
        }
        Ok(Rgba::new(r, g, b, a))
    }
}
