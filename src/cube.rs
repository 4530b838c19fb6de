//! The cube model: 26 pieces and the 24 named moves.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::geometry::{
    lattice_points, Matrix, Point, BACK, DOWN, FACES, FRONT, LEFT, RIGHT, ROT_XY_CC, ROT_XY_CW,
    ROT_XZ_CC, ROT_XZ_CW, ROT_YZ_CC, ROT_YZ_CW, UP, X_AXIS, Y_AXIS, Z_AXIS,
};
use crate::moves::{parse_sequence, Move, MoveParseError};
use crate::pieces::{
    Color, Piece, PieceError, PieceKind, PIECE_COUNT, STICKER_COUNT, STICKER_LAYOUT,
};

/// Sticker string of a solved cube.
///
/// Faces are orange (up), yellow (left), white (front), green (right),
/// blue (back) and red (down).
pub const SOLVED_CUBE_STR: &str = "OOOOOOOOOYYYWWWGGGBBBYYYWWWGGGBBBYYYWWWGGGBBBRRRRRRRRR";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    #[error("Cube string must have {expected} stickers, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error(transparent)]
    Piece(#[from] PieceError),
    #[error("Invalid piece layout: {0}")]
    InvalidLayout(String),
    #[error(transparent)]
    Move(#[from] MoveParseError),
}

/// A 3x3x3 cube addressed through an x-y-z coordinate system centered on the
/// core.
///
/// Pieces are stored as 6 centers, then 12 edges, then 8 corners. Moves only
/// rotate pieces in place; they are never added, removed or re-kinded.
#[derive(Debug, Clone)]
pub struct Cube {
    pieces: Vec<Piece>,
}

impl Cube {
    /// Builds a cube from a 54-sticker string laid out as the net in
    /// [`STICKER_LAYOUT`]. Whitespace is ignored.
    pub fn new(cube_str: &str) -> Result<Self, CubeError> {
        let stickers: Vec<Color> = cube_str.chars().filter(|c| !c.is_whitespace()).collect();
        if stickers.len() != STICKER_COUNT {
            return Err(CubeError::InvalidLength {
                expected: STICKER_COUNT,
                actual: stickers.len(),
            });
        }

        let pieces = STICKER_LAYOUT
            .iter()
            .map(|layout| Piece::new(layout.position, layout.stickers.map(|i| i.map(|i| stickers[i]))))
            .collect::<Result<Vec<_>, _>>()?;

        let cube = Self { pieces };
        cube.validate()?;
        Ok(cube)
    }

    /// Checks the piece kinds and that the pieces fill every lattice slot once.
    fn validate(&self) -> Result<(), CubeError> {
        if self.pieces.len() != PIECE_COUNT {
            return Err(CubeError::InvalidLayout(format!(
                "expected {PIECE_COUNT} pieces, got {}",
                self.pieces.len()
            )));
        }

        for (kind, expected) in [
            (PieceKind::Center, 6),
            (PieceKind::Edge, 12),
            (PieceKind::Corner, 8),
        ] {
            let count = self.pieces.iter().filter(|p| p.kind() == kind).count();
            if count != expected {
                return Err(CubeError::InvalidLayout(format!(
                    "expected {expected} {kind} pieces, got {count}"
                )));
            }
        }

        let positions: FxHashSet<Point> = self.pieces.iter().map(Piece::position).collect();
        if let Some(missing) = lattice_points().find(|point| !positions.contains(point)) {
            return Err(CubeError::InvalidLayout(format!(
                "no piece at {missing}"
            )));
        }

        Ok(())
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Pieces on the face pointing along `axis`.
    ///
    /// # Panics
    ///
    /// Panics if `axis` is not a unit face direction such as [`UP`].
    pub fn face(&self, axis: Point) -> Vec<&Piece> {
        assert_eq!(axis.count(0), 2, "{axis} is not a face direction");
        self.pieces
            .iter()
            .filter(|piece| piece.position().dot(axis) > 0)
            .collect()
    }

    /// Pieces in the middle layer spanned by `plane`.
    ///
    /// `plane` is the sum of two axes, e.g. `X_AXIS + Y_AXIS` for the layer
    /// with z = 0.
    ///
    /// # Panics
    ///
    /// Panics if `plane` does not have exactly two nonzero coordinates.
    pub fn slice(&self, plane: Point) -> Vec<&Piece> {
        let axis = slice_axis(plane);
        self.pieces
            .iter()
            .filter(|piece| piece.position()[axis] == 0)
            .collect()
    }

    /// The piece at a lattice point, if any (the core point has none).
    pub fn piece_at(&self, point: Point) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.position() == point)
    }

    /// The piece carrying exactly the given colors, in any order.
    ///
    /// Pieces move around as the cube is turned, so logical pieces are tracked
    /// by their colors rather than by index.
    pub fn find_piece(&self, colors: &[Color]) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.has_colors(colors))
    }

    /// Every distinct sticker color on the cube.
    pub fn colors(&self) -> FxHashSet<Color> {
        self.pieces.iter().flat_map(Piece::stickers).collect()
    }

    /// True if every face shows a single color.
    pub fn is_solved(&self) -> bool {
        FACES.into_iter().all(|face| {
            let axis = face_axis(face);
            let mut colors = self.face(face).into_iter().map(|piece| piece.color(axis));
            match colors.next() {
                Some(first) => colors.all(|color| color == first),
                None => false,
            }
        })
    }

    fn center_color(&self, face: Point) -> Color {
        self.piece_at(face)
            .and_then(|piece| piece.color(face_axis(face)))
            .unwrap_or_else(|| unreachable!("every cube has a center at {face}"))
    }

    pub fn left_color(&self) -> Color {
        self.center_color(LEFT)
    }

    pub fn right_color(&self) -> Color {
        self.center_color(RIGHT)
    }

    pub fn up_color(&self) -> Color {
        self.center_color(UP)
    }

    pub fn down_color(&self) -> Color {
        self.center_color(DOWN)
    }

    pub fn front_color(&self) -> Color {
        self.center_color(FRONT)
    }

    pub fn back_color(&self) -> Color {
        self.center_color(BACK)
    }

    fn rotate_face(&mut self, face: Point, matrix: Matrix) {
        for piece in self.pieces.iter_mut().filter(|p| p.position().dot(face) > 0) {
            piece.rotate(&matrix);
        }
    }

    fn rotate_slice(&mut self, plane: Point, matrix: Matrix) {
        let axis = slice_axis(plane);
        for piece in self.pieces.iter_mut().filter(|p| p.position()[axis] == 0) {
            piece.rotate(&matrix);
        }
    }

    fn rotate_all(&mut self, matrix: Matrix) {
        for piece in &mut self.pieces {
            piece.rotate(&matrix);
        }
    }

    /// Applies a single named move.
    pub fn apply(&mut self, mv: Move) {
        match mv {
            Move::L => self.rotate_face(LEFT, ROT_YZ_CC),
            Move::Li => self.rotate_face(LEFT, ROT_YZ_CW),
            Move::R => self.rotate_face(RIGHT, ROT_YZ_CW),
            Move::Ri => self.rotate_face(RIGHT, ROT_YZ_CC),
            Move::U => self.rotate_face(UP, ROT_XZ_CW),
            Move::Ui => self.rotate_face(UP, ROT_XZ_CC),
            Move::D => self.rotate_face(DOWN, ROT_XZ_CC),
            Move::Di => self.rotate_face(DOWN, ROT_XZ_CW),
            Move::F => self.rotate_face(FRONT, ROT_XY_CW),
            Move::Fi => self.rotate_face(FRONT, ROT_XY_CC),
            Move::B => self.rotate_face(BACK, ROT_XY_CC),
            Move::Bi => self.rotate_face(BACK, ROT_XY_CW),
            Move::M => self.rotate_slice(Y_AXIS + Z_AXIS, ROT_YZ_CC),
            Move::Mi => self.rotate_slice(Y_AXIS + Z_AXIS, ROT_YZ_CW),
            Move::E => self.rotate_slice(X_AXIS + Z_AXIS, ROT_XZ_CC),
            Move::Ei => self.rotate_slice(X_AXIS + Z_AXIS, ROT_XZ_CW),
            Move::S => self.rotate_slice(X_AXIS + Y_AXIS, ROT_XY_CW),
            Move::Si => self.rotate_slice(X_AXIS + Y_AXIS, ROT_XY_CC),
            Move::X => self.rotate_all(ROT_YZ_CW),
            Move::Xi => self.rotate_all(ROT_YZ_CC),
            Move::Y => self.rotate_all(ROT_XZ_CW),
            Move::Yi => self.rotate_all(ROT_XZ_CC),
            Move::Z => self.rotate_all(ROT_XY_CW),
            Move::Zi => self.rotate_all(ROT_XY_CC),
        }
    }

    /// Applies moves in order.
    pub fn apply_all(&mut self, moves: &[Move]) {
        for &mv in moves {
            self.apply(mv);
        }
    }

    /// Applies a whitespace-delimited move sequence such as `"R U Ri Ui"`.
    ///
    /// The whole sequence is parsed first, so an unknown token leaves the cube
    /// untouched.
    pub fn sequence(&mut self, moves: &str) -> Result<(), CubeError> {
        let moves = parse_sequence(moves)?;
        self.apply_all(&moves);
        Ok(())
    }
}

impl std::str::FromStr for Cube {
    type Err = CubeError;

    fn from_str(cube_str: &str) -> Result<Self, Self::Err> {
        Cube::new(cube_str)
    }
}

/// Cubes are equal when they show the same stickers in net order.
impl PartialEq for Cube {
    fn eq(&self, other: &Self) -> bool {
        self.color_list() == other.color_list()
    }
}

impl Eq for Cube {}

/// Index of the color slot facing along a face direction.
pub(crate) fn face_axis(face: Point) -> usize {
    (0..3).find(|&axis| face[axis] != 0).unwrap_or(0)
}

/// Index of the axis a slice plane leaves out.
fn slice_axis(plane: Point) -> usize {
    assert_eq!(plane.count(0), 1, "{plane} is not a slice plane");
    (0..3).find(|&axis| plane[axis] == 0).unwrap_or(0)
}
