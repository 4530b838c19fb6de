//! Net-order sticker listing and text rendering.
//!
//! The unfolded net puts the up face on top, the left, front, right and back
//! faces side by side, and the down face underneath:
//!
//! ```text
//!     UUU
//!     UUU
//!     UUU
//! LLL FFF RRR BBB
//! LLL FFF RRR BBB
//! LLL FFF RRR BBB
//!     DDD
//!     DDD
//!     DDD
//! ```
//!
//! The listing is the same order the cube string is read in, so
//! `Cube::new(&cube.flat_str())` rebuilds an equal cube.

use std::fmt;

use crate::cube::Cube;
use crate::geometry::Point;
use crate::pieces::{Color, Piece, STICKER_COUNT};

/// Rows of one face, top to bottom, each read left to right as seen from
/// outside the cube.
type FaceStickers = [[Color; 3]; 3];

/// Maps each lattice point to its piece.
struct PieceGrid<'a> {
    cells: [[[Option<&'a Piece>; 3]; 3]; 3],
}

impl<'a> PieceGrid<'a> {
    fn new(cube: &'a Cube) -> Self {
        let mut cells = [[[None; 3]; 3]; 3];
        for piece in cube.pieces() {
            let Point { x, y, z } = piece.position();
            cells[(x + 1) as usize][(y + 1) as usize][(z + 1) as usize] = Some(piece);
        }
        Self { cells }
    }

    /// Sticker on `axis` of the piece at (x, y, z).
    fn sticker(&self, x: i32, y: i32, z: i32, axis: usize) -> Color {
        self.cells[(x + 1) as usize][(y + 1) as usize][(z + 1) as usize]
            .and_then(|piece| piece.color(axis))
            .unwrap_or_else(|| unreachable!("every outer lattice point has a sticker on its face"))
    }

    /// Builds a face from `(row, column) -> (x, y, z)` coordinates.
    fn face(&self, axis: usize, coords: impl Fn(i32, i32) -> (i32, i32, i32)) -> FaceStickers {
        let mut face = [[' '; 3]; 3];
        for (row, stickers) in face.iter_mut().enumerate() {
            for (col, sticker) in stickers.iter_mut().enumerate() {
                let (x, y, z) = coords(row as i32 - 1, col as i32 - 1);
                *sticker = self.sticker(x, y, z, axis);
            }
        }
        face
    }
}

impl Cube {
    /// The 54 sticker colors in net order: up, three rows of
    /// left/front/right/back, then down.
    pub fn color_list(&self) -> [Color; STICKER_COUNT] {
        let grid = PieceGrid::new(self);

        let up = grid.face(1, |row, col| (col, 1, row));
        let left = grid.face(0, |row, col| (-1, -row, col));
        let front = grid.face(2, |row, col| (col, -row, 1));
        let right = grid.face(0, |row, col| (1, -row, -col));
        let back = grid.face(2, |row, col| (-col, -row, -1));
        let down = grid.face(1, |row, col| (col, -1, -row));

        let mut colors = [' '; STICKER_COUNT];
        let rows = up
            .iter()
            .flatten()
            .chain((0..3).flat_map(|row| {
                [&left, &front, &right, &back]
                    .into_iter()
                    .flat_map(move |face| face[row].iter())
            }))
            .chain(down.iter().flatten());
        for (slot, &color) in colors.iter_mut().zip(rows) {
            *slot = color;
        }
        colors
    }

    /// The net-order colors as one 54-character string.
    pub fn flat_str(&self) -> String {
        self.color_list().iter().collect()
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let colors = self.color_list();
        let line = |start: usize| colors[start..start + 3].iter().collect::<String>();

        for row in 0..3 {
            writeln!(f, "    {}", line(row * 3))?;
        }
        for row in 0..3 {
            let start = 9 + row * 12;
            writeln!(
                f,
                "{} {} {} {}",
                line(start),
                line(start + 3),
                line(start + 6),
                line(start + 9)
            )?;
        }
        for row in 0..3 {
            let down_row = line(45 + row * 3);
            if row < 2 {
                writeln!(f, "    {down_row}")?;
            } else {
                write!(f, "    {down_row}")?;
            }
        }
        Ok(())
    }
}
