//! Move notation.
//!
//! Moves are case-sensitive tokens: a letter from `L R U D F B M E S X Y Z`,
//! optionally followed by `i` for the inverse (`R` and `Ri`). Sequences are
//! whitespace-delimited.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::geometry::{Point, BACK, DOWN, FRONT, LEFT, RIGHT, UP};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("Unknown move {0:?}")]
    Unknown(String),
}

/// One of the 24 named quarter turns.
///
/// Face turns (`L`..`Bi`) turn one outer layer, slice turns (`M`..`Si`) turn a
/// middle layer, and cube rotations (`X`..`Zi`) turn the whole cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Move {
    L,
    Li,
    R,
    Ri,
    U,
    Ui,
    D,
    Di,
    F,
    Fi,
    B,
    Bi,
    M,
    Mi,
    E,
    Ei,
    S,
    Si,
    X,
    Xi,
    Y,
    Yi,
    Z,
    Zi,
}

impl Move {
    pub const ALL: [Move; 24] = [
        Move::L,
        Move::Li,
        Move::R,
        Move::Ri,
        Move::U,
        Move::Ui,
        Move::D,
        Move::Di,
        Move::F,
        Move::Fi,
        Move::B,
        Move::Bi,
        Move::M,
        Move::Mi,
        Move::E,
        Move::Ei,
        Move::S,
        Move::Si,
        Move::X,
        Move::Xi,
        Move::Y,
        Move::Yi,
        Move::Z,
        Move::Zi,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Move::L => "L",
            Move::Li => "Li",
            Move::R => "R",
            Move::Ri => "Ri",
            Move::U => "U",
            Move::Ui => "Ui",
            Move::D => "D",
            Move::Di => "Di",
            Move::F => "F",
            Move::Fi => "Fi",
            Move::B => "B",
            Move::Bi => "Bi",
            Move::M => "M",
            Move::Mi => "Mi",
            Move::E => "E",
            Move::Ei => "Ei",
            Move::S => "S",
            Move::Si => "Si",
            Move::X => "X",
            Move::Xi => "Xi",
            Move::Y => "Y",
            Move::Yi => "Yi",
            Move::Z => "Z",
            Move::Zi => "Zi",
        }
    }

    /// The move that undoes this one.
    pub const fn inverse(self) -> Move {
        match self {
            Move::L => Move::Li,
            Move::Li => Move::L,
            Move::R => Move::Ri,
            Move::Ri => Move::R,
            Move::U => Move::Ui,
            Move::Ui => Move::U,
            Move::D => Move::Di,
            Move::Di => Move::D,
            Move::F => Move::Fi,
            Move::Fi => Move::F,
            Move::B => Move::Bi,
            Move::Bi => Move::B,
            Move::M => Move::Mi,
            Move::Mi => Move::M,
            Move::E => Move::Ei,
            Move::Ei => Move::E,
            Move::S => Move::Si,
            Move::Si => Move::S,
            Move::X => Move::Xi,
            Move::Xi => Move::X,
            Move::Y => Move::Yi,
            Move::Yi => Move::Y,
            Move::Z => Move::Zi,
            Move::Zi => Move::Z,
        }
    }

    /// True for the whole-cube rotations `X`, `Y`, `Z` and their inverses.
    pub const fn is_cube_rotation(self) -> bool {
        matches!(
            self,
            Move::X | Move::Xi | Move::Y | Move::Yi | Move::Z | Move::Zi
        )
    }

    /// The clockwise and counterclockwise turns of the face pointing along
    /// `face`, or `None` if `face` is not a unit face direction.
    pub fn face_turns(face: Point) -> Option<(Move, Move)> {
        match face {
            RIGHT => Some((Move::R, Move::Ri)),
            LEFT => Some((Move::L, Move::Li)),
            UP => Some((Move::U, Move::Ui)),
            DOWN => Some((Move::D, Move::Di)),
            FRONT => Some((Move::F, Move::Fi)),
            BACK => Some((Move::B, Move::Bi)),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Move::ALL
            .into_iter()
            .find(|candidate| candidate.name() == token)
            .ok_or_else(|| MoveParseError::Unknown(token.to_owned()))
    }
}

/// Parses a whitespace-delimited move sequence.
///
/// Every token is checked before anything is returned, so a bad token never
/// yields a partial sequence.
pub fn parse_sequence(sequence: &str) -> Result<Vec<Move>, MoveParseError> {
    sequence.split_whitespace().map(str::parse).collect()
}

/// Formats moves as a space-separated string.
pub fn format_sequence(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|mv| mv.name())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Moves used to scramble a cube: the twelve face turns.
pub const SCRAMBLE_MOVES: [Move; 12] = [
    Move::L,
    Move::R,
    Move::U,
    Move::D,
    Move::F,
    Move::B,
    Move::Li,
    Move::Ri,
    Move::Ui,
    Move::Di,
    Move::Fi,
    Move::Bi,
];

pub const DEFAULT_SCRAMBLE_LENGTH: usize = 25;

/// Picks `length` random face turns.
pub fn random_scramble(rng: &mut fastrand::Rng, length: usize) -> Vec<Move> {
    (0..length)
        .map(|_| SCRAMBLE_MOVES[rng.usize(..SCRAMBLE_MOVES.len())])
        .collect()
}
