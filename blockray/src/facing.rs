//! Block orientations, and derivation of oriented geometry from a canonical table.

use alloc::string::ToString as _;
use alloc::sync::Arc;
use core::fmt;
use core::str::FromStr;

use crate::math::{Face6, Quad, Transform};
use crate::model::ModelError;

/// The direction a block faces, as named in block state data.
///
/// Geometry tables are written for one facing, usually [`Facing::North`], and the other
/// facings are derived with [`Facing::from_north()`].
#[expect(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, exhaust::Exhaust)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Facing {
    /// Toward −Z.
    North,
    /// Toward +X.
    East,
    /// Toward +Z.
    South,
    /// Toward −X.
    West,
    /// Toward +Y.
    Up,
    /// Toward −Y.
    Down,
}

impl Facing {
    /// All facings.
    pub const ALL: [Facing; 6] = [
        Facing::North,
        Facing::East,
        Facing::South,
        Facing::West,
        Facing::Up,
        Facing::Down,
    ];

    /// The horizontal facings, in the order a clockwise turn (seen from above) visits
    /// them. [`Facing::horizontal_index()`] is the position in this list.
    pub const HORIZONTAL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    /// Returns the name of this facing as used in block state data.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Facing::North => "north",
            Facing::East => "east",
            Facing::South => "south",
            Facing::West => "west",
            Facing::Up => "up",
            Facing::Down => "down",
        }
    }

    /// Returns the face of the block this facing points out of.
    #[inline]
    pub const fn face(self) -> Face6 {
        match self {
            Facing::North => Face6::NZ,
            Facing::East => Face6::PX,
            Facing::South => Face6::PZ,
            Facing::West => Face6::NX,
            Facing::Up => Face6::PY,
            Facing::Down => Face6::NY,
        }
    }

    /// Inverse of [`Facing::face()`].
    #[inline]
    pub const fn from_face(face: Face6) -> Self {
        match face {
            Face6::NZ => Facing::North,
            Face6::PX => Facing::East,
            Face6::PZ => Facing::South,
            Face6::NX => Facing::West,
            Face6::PY => Facing::Up,
            Face6::NY => Facing::Down,
        }
    }

    /// Returns the number of clockwise quarter turns (seen from above) from north to
    /// this facing, or [`None`] for [`Facing::Up`] and [`Facing::Down`].
    #[inline]
    pub const fn horizontal_index(self) -> Option<usize> {
        match self {
            Facing::North => Some(0),
            Facing::East => Some(1),
            Facing::South => Some(2),
            Facing::West => Some(3),
            Facing::Up | Facing::Down => None,
        }
    }

    /// Returns the rotation which turns geometry facing north to face `self`.
    ///
    /// Horizontal facings turn about the vertical axis; up and down tip the north side
    /// over the east–west axis.
    ///
    /// ```
    /// use blockray::facing::Facing;
    /// use blockray::math::{Face6, Local};
    ///
    /// for facing in Facing::ALL {
    ///     assert_eq!(
    ///         facing.from_north().transform_vector(Face6::NZ.normal_vector::<Local>()),
    ///         facing.face().normal_vector(),
    ///     );
    /// }
    /// ```
    #[must_use]
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn from_north(self) -> Transform {
        match self.horizontal_index() {
            Some(turns) => Transform::quarter_turn(Face6::NY).repeat(turns as u32),
            None if self == Facing::Up => Transform::quarter_turn(Face6::PX),
            None => Transform::quarter_turn(Face6::NX),
        }
    }
}

impl fmt::Display for Facing {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Facing {
    type Err = ModelError;

    /// Parses the name of a facing, as used in block state data: `"north"`, `"east"`,
    /// `"south"`, `"west"`, `"up"` or `"down"`.
    ///
    /// ```
    /// use blockray::facing::Facing;
    ///
    /// assert_eq!("south".parse::<Facing>().unwrap(), Facing::South);
    /// assert!("sideways".parse::<Facing>().is_err());
    /// ```
    #[allow(clippy::missing_inline_in_public_items)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Facing::ALL
            .into_iter()
            .find(|facing| facing.name() == s)
            .ok_or_else(|| ModelError::UnknownFacing(s.to_string()))
    }
}

/// Returns a copy of `quads` with every quad transformed.
///
/// Panics if the transform collapses any quad to zero area, which no rotation does.
#[track_caller]
#[allow(clippy::missing_inline_in_public_items)]
pub fn transform_quads(quads: &[Quad], transform: &Transform) -> Arc<[Quad]> {
    quads.iter().map(|quad| quad.transformed(transform)).collect()
}

/// Builds the four horizontal orientations of a north-facing quad table, indexed by
/// [`Facing::horizontal_index()`].
///
/// Intended to be called once per table, when the table is first needed.
#[allow(clippy::missing_inline_in_public_items)]
pub fn facing_variants(north: &[Quad]) -> [Arc<[Quad]>; 4] {
    Facing::HORIZONTAL.map(|facing| transform_quads(north, &facing.from_north()))
}
