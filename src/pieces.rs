//! Piece definitions and the sticker layout of the cube net.
//!
//! A piece stores one optional sticker color per axis. The number of stickers
//! decides the kind: one for a face center, two for an edge, three for a
//! corner.

use std::fmt;

use thiserror::Error;

use crate::geometry::{Matrix, Point};

/// A sticker color, one character of the cube string.
pub type Color = char;

/// Color slots indexed by axis (x, y, z). `None` means no sticker on that axis.
pub type ColorSlots = [Option<Color>; 3];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PieceError {
    #[error("A piece must have 1, 2 or 3 stickers, got {count}")]
    InvalidStickerCount { count: usize },
    #[error("Piece position {0} is outside the cube lattice")]
    OffLattice(Point),
    #[error("Stickers {colors:?} do not match the exposed axes of position {position}")]
    MismatchedStickers { position: Point, colors: ColorSlots },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Center,
    Edge,
    Corner,
}

impl PieceKind {
    pub const fn sticker_count(self) -> usize {
        match self {
            PieceKind::Center => 1,
            PieceKind::Edge => 2,
            PieceKind::Corner => 3,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PieceKind::Center => "center",
            PieceKind::Edge => "edge",
            PieceKind::Corner => "corner",
        })
    }
}

/// A single cubie: its lattice position and the color on each axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    position: Point,
    colors: ColorSlots,
    kind: PieceKind,
}

impl Piece {
    /// Creates a piece, checking that its stickers sit exactly on the axes
    /// where its position is nonzero.
    pub fn new(position: Point, colors: ColorSlots) -> Result<Self, PieceError> {
        if position.components().iter().any(|c| !(-1..=1).contains(c)) {
            return Err(PieceError::OffLattice(position));
        }

        let kind = match colors.iter().filter(|slot| slot.is_some()).count() {
            1 => PieceKind::Center,
            2 => PieceKind::Edge,
            3 => PieceKind::Corner,
            count => return Err(PieceError::InvalidStickerCount { count }),
        };

        let exposed_axes_match = (0..3).all(|axis| colors[axis].is_some() == (position[axis] != 0));
        if !exposed_axes_match {
            return Err(PieceError::MismatchedStickers { position, colors });
        }

        Ok(Self {
            position,
            colors,
            kind,
        })
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    #[inline]
    pub fn colors(&self) -> &ColorSlots {
        &self.colors
    }

    /// The sticker on `axis` (0 = x, 1 = y, 2 = z).
    #[inline]
    pub fn color(&self, axis: usize) -> Option<Color> {
        self.colors[axis]
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// The non-empty stickers, in axis order.
    pub fn stickers(&self) -> impl Iterator<Item = Color> + '_ {
        self.colors.iter().flatten().copied()
    }

    /// True if this piece carries exactly the given set of colors, in any order.
    ///
    /// Every sticker must appear in `colors` and vice versa, so `[W, W]` does
    /// not match a white-green edge.
    pub fn has_colors(&self, colors: &[Color]) -> bool {
        self.kind.sticker_count() == colors.len()
            && colors.iter().all(|color| self.colors.contains(&Some(*color)))
            && self.stickers().all(|sticker| colors.contains(&sticker))
    }

    /// Rotates the piece and moves its stickers with it.
    ///
    /// A quarter turn changes exactly two coordinates of a piece off the
    /// rotation axis, and the stickers on those two axes trade places. The
    /// displacement `new - old` marks those axes, except for pieces whose
    /// position keeps one of the two coordinates (e.g. (0, 1, 1) -> (0, 1, -1)),
    /// where the displacement has a single nonzero entry. Rotating the
    /// displacement and adding it back recovers the second axis.
    pub fn rotate(&mut self, matrix: &Matrix) {
        let before = self.position;
        self.position = *matrix * self.position;

        let mut displacement = self.position - before;
        if displacement.is_zero() {
            // piece lies on the rotation axis
            return;
        }
        if displacement.count(0) == 2 {
            displacement += *matrix * displacement;
        }

        let mut axes = (0..3).filter(|&axis| displacement[axis] != 0);
        if let (Some(first), Some(second)) = (axes.next(), axes.next()) {
            self.colors.swap(first, second);
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stickers: String = self.stickers().collect();
        write!(f, "({}, {}, {})", self.kind, stickers, self.position)
    }
}

/// Where the stickers of one piece come from in the 54-character cube string.
///
/// `stickers[axis]` is the string index of the sticker on that axis.
#[derive(Debug, Clone, Copy)]
pub struct PieceLayout {
    pub position: Point,
    pub stickers: [Option<usize>; 3],
}

const fn layout(x: i32, y: i32, z: i32, stickers: [Option<usize>; 3]) -> PieceLayout {
    PieceLayout {
        position: Point::new(x, y, z),
        stickers,
    }
}

/// Number of stickers in a cube string.
pub const STICKER_COUNT: usize = 54;

/// Number of pieces on a 3x3x3 cube.
pub const PIECE_COUNT: usize = 26;

/// The string indices read for each piece, following the net:
///
/// ```text
///             0  1  2
///             3  4  5
///             6  7  8
///  9 10 11   12 13 14   15 16 17   18 19 20
/// 21 22 23   24 25 26   27 28 29   30 31 32
/// 33 34 35   36 37 38   39 40 41   42 43 44
///            45 46 47
///            48 49 50
///            51 52 53
/// ```
///
/// Faces are up, then left/front/right/back side by side, then down. The back
/// face is read as seen from behind.
pub const STICKER_LAYOUT: [PieceLayout; PIECE_COUNT] = [
    // centers
    layout(1, 0, 0, [Some(28), None, None]),
    layout(-1, 0, 0, [Some(22), None, None]),
    layout(0, 1, 0, [None, Some(4), None]),
    layout(0, -1, 0, [None, Some(49), None]),
    layout(0, 0, 1, [None, None, Some(25)]),
    layout(0, 0, -1, [None, None, Some(31)]),
    // edges
    layout(1, 1, 0, [Some(16), Some(5), None]),
    layout(1, -1, 0, [Some(40), Some(50), None]),
    layout(1, 0, 1, [Some(27), None, Some(26)]),
    layout(1, 0, -1, [Some(29), None, Some(30)]),
    layout(-1, 1, 0, [Some(10), Some(3), None]),
    layout(-1, -1, 0, [Some(34), Some(48), None]),
    layout(-1, 0, 1, [Some(23), None, Some(24)]),
    layout(-1, 0, -1, [Some(21), None, Some(32)]),
    layout(0, 1, 1, [None, Some(7), Some(13)]),
    layout(0, 1, -1, [None, Some(1), Some(19)]),
    layout(0, -1, 1, [None, Some(46), Some(37)]),
    layout(0, -1, -1, [None, Some(52), Some(43)]),
    // corners
    layout(1, 1, 1, [Some(15), Some(8), Some(14)]),
    layout(1, 1, -1, [Some(17), Some(2), Some(18)]),
    layout(1, -1, 1, [Some(39), Some(47), Some(38)]),
    layout(1, -1, -1, [Some(41), Some(53), Some(42)]),
    layout(-1, 1, 1, [Some(11), Some(6), Some(12)]),
    layout(-1, 1, -1, [Some(9), Some(0), Some(20)]),
    layout(-1, -1, 1, [Some(35), Some(45), Some(36)]),
    layout(-1, -1, -1, [Some(33), Some(51), Some(44)]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{lattice_points, ROTATIONS, ROT_YZ_CW};

    /// A piece at `position` whose sticker on each exposed axis is labelled
    /// 'x', 'y' or 'z' after the axis it started on.
    fn labelled_piece(position: Point) -> Piece {
        let labels = ['x', 'y', 'z'];
        let colors = [0, 1, 2].map(|axis| (position[axis] != 0).then_some(labels[axis]));
        Piece::new(position, colors).unwrap()
    }

    #[test]
    fn test_kind_follows_sticker_count() {
        let center = Piece::new(Point::new(0, 1, 0), [None, Some('W'), None]).unwrap();
        let edge = Piece::new(Point::new(1, 1, 0), [Some('R'), Some('W'), None]).unwrap();
        let corner = Piece::new(Point::new(1, 1, 1), [Some('R'), Some('W'), Some('G')]).unwrap();
        assert_eq!(center.kind(), PieceKind::Center);
        assert_eq!(edge.kind(), PieceKind::Edge);
        assert_eq!(corner.kind(), PieceKind::Corner);
    }

    #[test]
    fn test_invalid_pieces_are_rejected() {
        assert_eq!(
            Piece::new(Point::new(0, 0, 0), [None, None, None]),
            Err(PieceError::InvalidStickerCount { count: 0 })
        );
        assert_eq!(
            Piece::new(Point::new(2, 0, 0), [Some('R'), None, None]),
            Err(PieceError::OffLattice(Point::new(2, 0, 0)))
        );
        assert!(matches!(
            Piece::new(Point::new(1, 0, 0), [None, Some('R'), None]),
            Err(PieceError::MismatchedStickers { .. })
        ));
    }

    #[test]
    fn test_rotation_keeps_stickers_on_their_faces() {
        // each sticker faces a direction; after rotating, it must be in the slot
        // of the axis that direction was rotated onto
        for rotation in ROTATIONS {
            for position in lattice_points() {
                let mut piece = labelled_piece(position);
                piece.rotate(&rotation);
                assert_eq!(piece.position(), rotation * position);

                for (axis, label) in ['x', 'y', 'z'].into_iter().enumerate() {
                    if position[axis] == 0 {
                        continue;
                    }
                    let facing = Point::new(0, 0, 0).with(axis, position[axis]);
                    let rotated_facing = rotation * facing;
                    let new_axis = (0..3).find(|&a| rotated_facing[a] != 0).unwrap();
                    assert_eq!(
                        piece.color(new_axis),
                        Some(label),
                        "{rotation:?} at {position}: sticker {label} lost"
                    );
                }
            }
        }
    }

    #[test]
    fn test_four_rotations_restore_piece() {
        for rotation in ROTATIONS {
            for position in lattice_points() {
                let original = labelled_piece(position);
                let mut piece = original.clone();
                for _ in 0..4 {
                    piece.rotate(&rotation);
                }
                assert_eq!(piece, original);
            }
        }
    }

    #[test]
    fn test_diagonal_edge_swaps_both_stickers() {
        let mut piece = Piece::new(Point::new(0, 1, 1), [None, Some('W'), Some('G')]).unwrap();
        piece.rotate(&ROT_YZ_CW);
        assert_eq!(piece.position(), Point::new(0, 1, -1));
        assert_eq!(piece.colors(), &[None, Some('G'), Some('W')]);
    }

    #[test]
    fn test_has_colors_ignores_order() {
        let corner = Piece::new(Point::new(1, 1, 1), [Some('R'), Some('W'), Some('G')]).unwrap();
        assert!(corner.has_colors(&['G', 'R', 'W']));
        assert!(!corner.has_colors(&['G', 'R']));
        assert!(!corner.has_colors(&['G', 'R', 'B']));
        assert!(!corner.has_colors(&['R', 'R', 'W']));
        assert!(!corner.has_colors(&['G', 'G', 'G']));

        let edge = Piece::new(Point::new(1, 0, 1), [Some('G'), None, Some('W')]).unwrap();
        assert!(edge.has_colors(&['W', 'G']));
        assert!(!edge.has_colors(&['W', 'W']));
        assert_eq!(corner.to_string(), "(corner, RWG, (1, 1, 1))");
    }

    #[test]
    fn test_sticker_layout_uses_every_index_once() {
        let mut seen = [false; STICKER_COUNT];
        for piece in &STICKER_LAYOUT {
            for index in piece.stickers.iter().flatten() {
                assert!(!seen[*index], "sticker {index} used twice");
                seen[*index] = true;
            }
        }
        assert!(seen.iter().all(|&used| used));
    }
}
