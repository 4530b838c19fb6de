//! Layer-by-layer solver.
//!
//! Solves the front face first (cross, then corners), then the middle layer,
//! then the back face: orient its edges, place its corners, orient its
//! corners, and finally cycle its edges into place. Every step recognizes a
//! pattern on the live cube and answers with a fixed algorithm.
//!
//! Pieces move with every turn, so they are always looked up by their colors,
//! never by index.

use std::fmt;

use log::{debug, trace, warn};
use thiserror::Error;

use crate::cube::Cube;
use crate::geometry::{Point, DOWN, FRONT, LEFT, RIGHT, UP};
use crate::moves::Move;
use crate::pieces::{Color, Piece};

use algorithms::*;

/// Ceiling on every pattern-matching loop. Well-formed cubes never get close;
/// hitting it means the cube is unsolvable or a pattern was missed.
pub const MAX_LOOP_ITERATIONS: usize = 12;

/// Fixed move sequences used by the solver.
mod algorithms {
    use crate::moves::Move::{self, *};

    pub const CROSS_LEFT_DIRECT: &[Move] = &[L, L];
    pub const CROSS_LEFT_FLIPPED: &[Move] = &[E, L, Ei, Li];
    pub const CROSS_RIGHT_DIRECT: &[Move] = &[R, R];
    pub const CROSS_RIGHT_FLIPPED: &[Move] = &[Ei, R, E, Ri];

    // first layer corner, by which sticker shows the front color
    pub const CORNER_FRONT_ON_X: &[Move] = &[B, D, Bi, Di];
    pub const CORNER_FRONT_ON_Y: &[Move] = &[Bi, Ri, B, R];
    pub const CORNER_FRONT_ON_BACK: &[Move] = &[Ri, B, B, R, Bi, Bi, D, Bi, Di];

    // insert the back edge into the left-down slot
    pub const MIDDLE_EDGE_FROM_DOWN: &[Move] = &[B, L, Bi, Li, Bi, Di, B, D];
    pub const MIDDLE_EDGE_FROM_LEFT: &[Move] = &[Bi, Di, B, D, B, L, Bi, Li];

    pub const EDGE_FLIP_ADJACENT: &[Move] = &[D, F, R, Fi, Ri, Di];
    pub const EDGE_FLIP_LINE: &[Move] = &[D, R, F, Ri, Fi, Di];

    /// Swaps the two right corners of the front face.
    pub const CORNER_SWAP_ADJACENT: &[Move] = &[Li, Fi, L, D, F, Di, Li, F, L, F, F];
    /// Swaps the front-right-down corner with the front-left-up one.
    pub const CORNER_SWAP_DIAGONAL: &[Move] = &[F, Li, Fi, L, D, F, Di, Li, F, L, F];

    pub const CORNER_TWIST_A: &[Move] = &[Ri, Fi, R, Fi, Ri, F, F, R, F, F];
    pub const CORNER_TWIST_B: &[Move] = &[R, F, Ri, F, R, F, F, Ri, F, F];

    pub const EDGE_CYCLE: &[Move] = &[R, R, F, D, Ui, R, R, Di, U, F, R, R];
    pub const EDGE_H_PATTERN: &[Move] = &[
        Ri, S, Ri, Ri, S, S, Ri, Fi, Fi, R, Si, Si, Ri, Ri, Si, R, Fi, Fi,
    ];
    pub const FISH_SETUP: &[Move] = &[Di, Li];
    pub const FISH_UNDO: &[Move] = &[L, D];

    pub const FRONT_CW: &[Move] = &[F];
    pub const FRONT_CC: &[Move] = &[Fi];
    pub const FRONT_HALF: &[Move] = &[F, F];

    pub const FLIP_CUBE: &[Move] = &[X, X];
    pub const UNFLIP_CUBE: &[Move] = &[Xi, Xi];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Cross,
    FirstLayerCorners,
    SecondLayer,
    LastLayerEdgeOrientation,
    LastLayerCornerPermutation,
    LastLayerCornerOrientation,
    LastLayerEdgePermutation,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Cross => "cross",
            Phase::FirstLayerCorners => "first layer corners",
            Phase::SecondLayer => "second layer",
            Phase::LastLayerEdgeOrientation => "last layer edge orientation",
            Phase::LastLayerCornerPermutation => "last layer corner permutation",
            Phase::LastLayerCornerOrientation => "last layer corner orientation",
            Phase::LastLayerEdgePermutation => "last layer edge permutation",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("Stuck in loop during {phase} - unsolvable cube?\n{cube}")]
    Stuck { phase: Phase, cube: String },
    #[error("Unexpected state during {phase}: {reason}\n{cube}")]
    Inconsistent {
        phase: Phase,
        reason: &'static str,
        cube: String,
    },
    #[error("No piece has colors {colors:?}")]
    MissingPiece { colors: Vec<Color> },
}

type Step = fn(&mut Solver) -> Result<(), SolveError>;

const PHASES: [(Phase, Step); 7] = [
    (Phase::Cross, Solver::cross),
    (Phase::FirstLayerCorners, Solver::first_layer_corners),
    (Phase::SecondLayer, Solver::second_layer),
    (Phase::LastLayerEdgeOrientation, Solver::last_layer_edge_orientation),
    (Phase::LastLayerCornerPermutation, Solver::last_layer_corner_permutation),
    (Phase::LastLayerCornerOrientation, Solver::last_layer_corner_orientation),
    (Phase::LastLayerEdgePermutation, Solver::last_layer_edge_permutation),
];

/// Drives one cube to the solved state and records every move it makes.
///
/// The record replays the full transformation: applying `moves()` to a copy
/// of the starting cube yields the solver's final cube.
pub struct Solver {
    cube: Cube,
    moves: Vec<Move>,
    phase: Phase,
}

impl Solver {
    pub fn new(cube: Cube) -> Self {
        Self {
            cube,
            moves: Vec::new(),
            phase: Phase::Cross,
        }
    }

    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn into_moves(self) -> Vec<Move> {
        self.moves
    }

    /// Runs every phase in order. A cube that is already solved takes no moves.
    pub fn solve(&mut self) -> Result<(), SolveError> {
        if self.cube.is_solved() {
            debug!("cube is already solved");
            return Ok(());
        }

        for (phase, step) in PHASES {
            self.phase = phase;
            let start = self.moves.len();
            if let Err(err) = step(self) {
                warn!("solve aborted during {phase} after {} moves", self.moves.len());
                return Err(err);
            }
            debug!("{phase}: {} moves", self.moves.len() - start);
            trace!("after {phase}:\n{}", self.cube);
        }

        debug!("solved in {} moves", self.moves.len());
        Ok(())
    }

    /// Applies moves to the cube and records them. All solver turns go
    /// through here.
    fn perform(&mut self, moves: &[Move]) {
        self.cube.apply_all(moves);
        self.moves.extend_from_slice(moves);
    }

    fn turn(&mut self, mv: Move) {
        self.perform(&[mv]);
    }

    fn piece(&self, colors: &[Color]) -> Result<&Piece, SolveError> {
        self.cube
            .find_piece(colors)
            .ok_or_else(|| SolveError::MissingPiece {
                colors: colors.to_vec(),
            })
    }

    fn position(&self, colors: &[Color]) -> Result<Point, SolveError> {
        Ok(self.piece(colors)?.position())
    }

    /// Sticker on `axis` of the piece with the given colors.
    fn sticker(&self, colors: &[Color], axis: usize) -> Result<Option<Color>, SolveError> {
        Ok(self.piece(colors)?.color(axis))
    }

    /// True if the piece at `point` shows `color` on `axis`.
    fn shows(&self, point: Point, axis: usize, color: Color) -> bool {
        self.cube
            .piece_at(point)
            .is_some_and(|piece| piece.color(axis) == Some(color))
    }

    fn face_turns(&self, face: Point) -> Result<(Move, Move), SolveError> {
        Move::face_turns(face).ok_or_else(|| self.inconsistent("piece is not next to a face"))
    }

    fn stuck(&self) -> SolveError {
        SolveError::Stuck {
            phase: self.phase,
            cube: self.cube.to_string(),
        }
    }

    fn inconsistent(&self, reason: &'static str) -> SolveError {
        SolveError::Inconsistent {
            phase: self.phase,
            reason,
            cube: self.cube.to_string(),
        }
    }

    /// Counts one loop iteration, failing once the ceiling is reached.
    fn tick(&self, count: &mut usize) -> Result<(), SolveError> {
        *count += 1;
        if *count >= MAX_LOOP_ITERATIONS {
            return Err(self.stuck());
        }
        Ok(())
    }

    /// Repeats `mv` until `done` holds, returning how many turns it took.
    fn turn_until(
        &mut self,
        mv: Move,
        done: impl Fn(&Self) -> Result<bool, SolveError>,
    ) -> Result<usize, SolveError> {
        let mut count = 0;
        while !done(self)? {
            self.turn(mv);
            self.tick(&mut count)?;
        }
        Ok(count)
    }

    // --- cross ---

    /// Places the four front edges, rotating the cube so the up and down
    /// edges can reuse the left/right handling.
    fn cross(&mut self) -> Result<(), SolveError> {
        let front = self.cube.front_color();
        let left = self.cube.left_color();
        let right = self.cube.right_color();
        let up = self.cube.up_color();
        let down = self.cube.down_color();

        self.cross_edge(
            [front, left],
            left,
            self.cube.left_color(),
            CROSS_LEFT_DIRECT,
            CROSS_LEFT_FLIPPED,
        )?;
        self.cross_edge(
            [front, right],
            right,
            self.cube.right_color(),
            CROSS_RIGHT_DIRECT,
            CROSS_RIGHT_FLIPPED,
        )?;

        self.turn(Move::Z);
        self.cross_edge(
            [front, down],
            down,
            self.cube.left_color(),
            CROSS_LEFT_DIRECT,
            CROSS_LEFT_FLIPPED,
        )?;
        self.cross_edge(
            [front, up],
            up,
            self.cube.right_color(),
            CROSS_RIGHT_DIRECT,
            CROSS_RIGHT_FLIPPED,
        )?;
        self.turn(Move::Zi);
        Ok(())
    }

    /// Brings `edge` to the back layer, spins it under the face centered on
    /// `center`, then flips it onto the front.
    fn cross_edge(
        &mut self,
        edge: [Color; 2],
        center: Color,
        face_color: Color,
        direct: &[Move],
        flipped: &[Move],
    ) -> Result<(), SolveError> {
        let front = self.cube.front_color();
        let edge_pos = self.position(&edge)?;
        let face_pos = self.position(&[center])?;
        if edge_pos == Point::new(face_pos.x, face_pos.y, 1) && self.sticker(&edge, 2)? == Some(front) {
            return Ok(());
        }

        // turns that put back a neighbour displaced while freeing the edge
        let mut undo: Vec<Move> = Vec::new();
        if edge_pos.z == 0 {
            let (cw, cc) = self.face_turns(edge_pos.with(0, 0))?;
            if edge_pos == LEFT + UP || edge_pos == RIGHT + DOWN {
                self.turn(cw);
                undo.push(cc);
            } else {
                self.turn(cc);
                undo.push(cw);
            }
        } else if edge_pos.z == 1 {
            let (cw, cc) = self.face_turns(edge_pos.with(2, 0))?;
            self.perform(&[cc, cc]);
            // an edge that started on its own face (flipped) displaced nothing
            if self.position(&edge)?.x != self.position(&[center])?.x {
                undo.extend([cw, cw]);
            }
        }

        if self.position(&edge)?.z != -1 {
            return Err(self.inconsistent("cross edge did not reach the back layer"));
        }

        self.turn_until(Move::B, |solver| {
            let edge_pos = solver.position(&edge)?;
            let face_pos = solver.position(&[center])?;
            Ok((edge_pos.x, edge_pos.y) == (face_pos.x, face_pos.y))
        })?;
        self.perform(&undo);

        if self.sticker(&edge, 0)? == Some(face_color) {
            self.perform(direct);
        } else {
            self.perform(flipped);
        }
        Ok(())
    }

    // --- first layer corners ---

    /// Places the four front corners, turning the cube a quarter each time so
    /// every corner is handled in the front-right-down slot.
    fn first_layer_corners(&mut self) -> Result<(), SolveError> {
        let front = self.cube.front_color();
        let left = self.cube.left_color();
        let right = self.cube.right_color();
        let up = self.cube.up_color();
        let down = self.cube.down_color();

        self.place_front_right_down_corner([front, right, down], right, down, front)?;
        self.turn(Move::Z);
        self.place_front_right_down_corner([front, right, up], up, right, front)?;
        self.turn(Move::Z);
        self.place_front_right_down_corner([front, left, up], left, up, front)?;
        self.turn(Move::Z);
        self.place_front_right_down_corner([front, left, down], down, left, front)?;
        self.turn(Move::Z);
        Ok(())
    }

    /// `right_center` and `down_center` name the centers currently on the
    /// right and down faces; the corner belongs between them.
    fn place_front_right_down_corner(
        &mut self,
        corner: [Color; 3],
        right_center: Color,
        down_center: Color,
        front: Color,
    ) -> Result<(), SolveError> {
        let corner_pos = self.position(&corner)?;
        if corner_pos.z == 1 {
            let (cw, cc) = self.face_turns(Point::new(0, corner_pos.y, 0))?;
            let in_back_layer = |solver: &Self| -> Result<bool, SolveError> {
                Ok(solver.position(&corner)?.z == -1)
            };

            let mut undo = cc;
            let mut count = self.turn_until(cw, in_back_layer)?;
            if count > 1 {
                // the short way round is the other direction
                for _ in 0..count {
                    self.turn(cc);
                }
                count = self.turn_until(cc, in_back_layer)?;
                undo = cw;
            }
            // step the corner aside so the undo turns leave it in the back layer
            self.turn(Move::B);
            for _ in 0..count {
                self.turn(undo);
            }
        }

        self.turn_until(Move::B, |solver| {
            let corner_pos = solver.position(&corner)?;
            let right = solver.position(&[right_center])?;
            let down = solver.position(&[down_center])?;
            Ok((corner_pos.x, corner_pos.y) == (right.x, down.y))
        })?;

        if self.sticker(&corner, 0)? == Some(front) {
            self.perform(CORNER_FRONT_ON_X);
        } else if self.sticker(&corner, 1)? == Some(front) {
            self.perform(CORNER_FRONT_ON_Y);
        } else {
            self.perform(CORNER_FRONT_ON_BACK);
        }
        Ok(())
    }

    // --- second layer ---

    fn second_layer(&mut self) -> Result<(), SolveError> {
        let left = self.cube.left_color();
        let right = self.cube.right_color();
        let up = self.cube.up_color();
        let down = self.cube.down_color();

        for edge in [[left, down], [right, down], [right, up], [left, up]] {
            let (left_color, down_color) = (self.cube.left_color(), self.cube.down_color());
            self.place_middle_edge(edge, left_color, down_color)?;
            self.turn(Move::Z);
        }
        Ok(())
    }

    /// Inserts `edge` into the left-down slot of the middle layer.
    fn place_middle_edge(
        &mut self,
        edge: [Color; 2],
        left_color: Color,
        down_color: Color,
    ) -> Result<(), SolveError> {
        if self.position(&edge)?.z == 0 {
            // kick a misplaced middle edge out to the back layer
            let count = self.turn_until(Move::Z, |solver| {
                let pos = solver.position(&edge)?;
                Ok((pos.x, pos.y) == (-1, -1))
            })?;
            self.perform(MIDDLE_EDGE_FROM_DOWN);
            for _ in 0..count {
                self.turn(Move::Zi);
            }
        }

        if self.position(&edge)?.z != -1 {
            return Err(self.inconsistent("middle edge did not reach the back layer"));
        }

        let back = self.sticker(&edge, 2)?;
        if back == Some(left_color) {
            self.turn_until(Move::B, |solver| Ok(solver.position(&edge)?.y == -1))?;
            self.perform(MIDDLE_EDGE_FROM_DOWN);
        } else if back == Some(down_color) {
            self.turn_until(Move::B, |solver| Ok(solver.position(&edge)?.x == -1))?;
            self.perform(MIDDLE_EDGE_FROM_LEFT);
        } else {
            return Err(self.inconsistent("middle edge shows neither slot color on the back"));
        }
        Ok(())
    }

    // --- last layer: edge orientation ---

    /// The algorithm for the current pattern of front edges showing the front
    /// color, or `None` once all four do.
    fn edge_orientation_step(&self) -> Option<&'static [Move]> {
        let front = self.cube.front_color();
        let up = self.shows(Point::new(0, 1, 1), 2, front);
        let left = self.shows(Point::new(-1, 0, 1), 2, front);
        let down = self.shows(Point::new(0, -1, 1), 2, front);
        let right = self.shows(Point::new(1, 0, 1), 2, front);

        if up && left && down && right {
            None
        } else if (!up && !left && !down && !right) || (up && left) {
            Some(EDGE_FLIP_ADJACENT)
        } else if left && right {
            Some(EDGE_FLIP_LINE)
        } else {
            Some(FRONT_CW)
        }
    }

    /// Turns the back face to the front and makes a cross of its color.
    fn last_layer_edge_orientation(&mut self) -> Result<(), SolveError> {
        self.perform(FLIP_CUBE);
        let mut count = 0;
        while let Some(algorithm) = self.edge_orientation_step() {
            self.perform(algorithm);
            self.tick(&mut count)?;
        }
        self.perform(UNFLIP_CUBE);
        Ok(())
    }

    // --- last layer: corner permutation ---

    fn last_layer_corner_permutation(&mut self) -> Result<(), SolveError> {
        self.perform(FLIP_CUBE);
        let front = self.cube.front_color();
        let left = self.cube.left_color();
        let right = self.cube.right_color();
        let up = self.cube.up_color();
        let down = self.cube.down_color();

        let right_down = [front, right, down];
        let left_down = [front, left, down];
        let right_up = [front, right, up];
        let left_up = [front, left, up];

        let left_up_pos = self.position(&left_up)?;
        if left_up_pos == Point::new(1, -1, 1) {
            self.perform(CORNER_SWAP_ADJACENT);
            self.turn(Move::Zi);
            self.perform(CORNER_SWAP_ADJACENT);
            self.turn(Move::Z);
        } else if left_up_pos == Point::new(1, 1, 1) {
            self.turn(Move::Z);
            self.perform(CORNER_SWAP_DIAGONAL);
            self.turn(Move::Zi);
        } else if left_up_pos == Point::new(-1, -1, 1) {
            self.turn(Move::Zi);
            self.perform(CORNER_SWAP_ADJACENT);
            self.turn(Move::Z);
        }
        if self.position(&left_up)? != Point::new(-1, 1, 1) {
            return Err(self.inconsistent("left-up corner not placed"));
        }

        let left_down_pos = self.position(&left_down)?;
        if left_down_pos == Point::new(1, 1, 1) {
            self.perform(CORNER_SWAP_DIAGONAL);
            self.perform(CORNER_SWAP_ADJACENT);
        } else if left_down_pos == Point::new(1, -1, 1) {
            self.perform(CORNER_SWAP_ADJACENT);
        }
        if self.position(&left_down)? != Point::new(-1, -1, 1) {
            return Err(self.inconsistent("left-down corner not placed"));
        }

        if self.position(&right_up)? == Point::new(1, -1, 1) {
            self.perform(CORNER_SWAP_DIAGONAL);
        }
        if self.position(&right_up)? != Point::new(1, 1, 1)
            || self.position(&right_down)? != Point::new(1, -1, 1)
        {
            return Err(self.inconsistent("right corners not placed"));
        }

        self.perform(UNFLIP_CUBE);
        Ok(())
    }

    // --- last layer: corner orientation ---

    /// The algorithm for the current corner twist pattern, or `None` once all
    /// four corners show the front color on the front.
    fn corner_orientation_step(&self) -> Option<&'static [&'static [Move]]> {
        let front = self.cube.front_color();
        let shows = |x: i32, y: i32, axis: usize| self.shows(Point::new(x, y, 1), axis, front);

        if shows(1, 1, 2) && shows(1, -1, 2) && shows(-1, -1, 2) && shows(-1, 1, 2) {
            None
        } else if shows(1, 1, 1) && shows(-1, -1, 1) && shows(1, -1, 0) {
            Some(&[CORNER_TWIST_A])
        } else if shows(-1, 1, 1) && shows(1, 1, 0) && shows(1, -1, 1) {
            Some(&[CORNER_TWIST_B])
        } else if shows(-1, -1, 1) && shows(1, -1, 1) && shows(-1, 1, 2) && shows(1, 1, 2) {
            Some(&[CORNER_TWIST_B, FRONT_HALF, CORNER_TWIST_A])
        } else if shows(-1, 1, 1) && shows(-1, -1, 1) && shows(1, 1, 2) && shows(1, -1, 2) {
            Some(&[CORNER_TWIST_B, CORNER_TWIST_A])
        } else if shows(-1, 1, 1) && shows(1, -1, 0) {
            Some(&[CORNER_TWIST_A, FRONT_CW, CORNER_TWIST_B])
        } else if shows(1, 1, 1) && shows(1, -1, 1) && shows(-1, -1, 0) && shows(-1, 1, 0) {
            Some(&[CORNER_TWIST_A, FRONT_CC, CORNER_TWIST_A])
        } else if shows(1, 1, 0) && shows(1, -1, 0) && shows(-1, -1, 0) && shows(-1, 1, 0) {
            Some(&[CORNER_TWIST_A, FRONT_HALF, CORNER_TWIST_A])
        } else {
            Some(&[FRONT_CW])
        }
    }

    fn last_layer_corner_orientation(&mut self) -> Result<(), SolveError> {
        self.perform(FLIP_CUBE);
        let mut count = 0;
        while let Some(parts) = self.corner_orientation_step() {
            for part in parts {
                self.perform(part);
            }
            self.tick(&mut count)?;
        }

        // the layer is oriented; spin it until the corners line up
        let right_up = [
            self.cube.front_color(),
            self.cube.right_color(),
            self.cube.up_color(),
        ];
        self.turn_until(Move::F, |solver| {
            Ok(solver.position(&right_up)? == Point::new(1, 1, 1))
        })?;
        self.perform(UNFLIP_CUBE);
        Ok(())
    }

    // --- last layer: edge permutation ---

    /// Three edges cycled with the down and right ones in place but flipped
    /// the wrong way round.
    fn is_fish_pattern(&self) -> bool {
        let front = self.cube.front_color();
        self.shows(FRONT + DOWN, 2, self.cube.down_color())
            && self.shows(FRONT + RIGHT, 2, self.cube.right_color())
            && self.shows(FRONT + DOWN, 1, front)
            && self.shows(FRONT + RIGHT, 0, front)
    }

    /// Left and right edges swapped while up and down are in place.
    fn is_h_pattern(&self) -> bool {
        !self.shows(LEFT + FRONT, 0, self.cube.left_color())
            && !self.shows(RIGHT + FRONT, 0, self.cube.right_color())
            && self.shows(DOWN + FRONT, 1, self.cube.down_color())
            && self.shows(UP + FRONT, 1, self.cube.up_color())
    }

    /// The H pattern a quarter turn away: left and right in place, up and
    /// down showing the front color sideways.
    fn is_turned_h_pattern(&self) -> bool {
        let front = self.cube.front_color();
        self.shows(LEFT + FRONT, 0, self.cube.left_color())
            && self.shows(RIGHT + FRONT, 0, self.cube.right_color())
            && self.shows(DOWN + FRONT, 1, front)
            && self.shows(UP + FRONT, 1, front)
    }

    fn perform_fish(&mut self) {
        self.perform(FISH_SETUP);
        self.perform(EDGE_H_PATTERN);
        self.perform(FISH_UNDO);
    }

    fn last_layer_edge_permutation(&mut self) -> Result<(), SolveError> {
        self.perform(FLIP_CUBE);
        let front = self.cube.front_color();
        let edges = [
            [front, self.cube.right_color()],
            [front, self.cube.left_color()],
            [front, self.cube.up_color()],
            [front, self.cube.down_color()],
        ];

        let mut none_facing_front = true;
        for edge in &edges {
            if self.sticker(edge, 2)? == Some(front) {
                none_facing_front = false;
            }
        }
        if none_facing_front {
            self.align_h_pattern()?;
        }

        let mut any_facing_front = false;
        for edge in &edges {
            if self.sticker(edge, 2)? == Some(self.cube.front_color()) {
                any_facing_front = true;
            }
        }
        if any_facing_front {
            self.bring_placed_edge_left()?;
        }

        let mut count = 0;
        'solve: while !self.cube.is_solved() {
            for _ in 0..4 {
                if self.is_fish_pattern() {
                    self.perform_fish();
                    if self.cube.is_solved() {
                        break 'solve;
                    }
                } else {
                    self.turn(Move::Z);
                }
            }

            if self.is_h_pattern() {
                self.perform(EDGE_H_PATTERN);
            } else if self.is_turned_h_pattern() {
                self.turn(Move::Z);
                self.perform(EDGE_H_PATTERN);
                self.turn(Move::Zi);
            } else {
                self.perform(EDGE_CYCLE);
            }
            self.tick(&mut count)?;
        }

        self.perform(UNFLIP_CUBE);
        Ok(())
    }

    /// Spins the front face until the left edge matches the left center, applies
    /// the H algorithm and spins back.
    fn align_h_pattern(&mut self) -> Result<(), SolveError> {
        let mut count = 0;
        while !self.shows(LEFT + FRONT, 2, self.cube.left_color()) {
            self.turn(Move::F);
            count += 1;
            if count == 4 {
                return Err(self.inconsistent("no front edge matches the left center"));
            }
        }
        self.perform(EDGE_H_PATTERN);
        for _ in 0..count {
            self.turn(Move::Fi);
        }
        Ok(())
    }

    /// The colors of a front edge that already sits in its slot, if any.
    fn placed_edge(&self) -> Option<[Color; 2]> {
        let front = self.cube.front_color();
        [
            (LEFT + FRONT, 0, self.cube.left_color()),
            (RIGHT + FRONT, 0, self.cube.right_color()),
            (UP + FRONT, 1, self.cube.up_color()),
            (DOWN + FRONT, 1, self.cube.down_color()),
        ]
        .into_iter()
        .find(|&(slot, axis, color)| self.shows(slot, 2, front) && self.shows(slot, axis, color))
        .map(|(_, _, color)| [front, color])
    }

    /// Cycles edges until one sits in its slot, then turns the cube so that
    /// edge is on the left.
    fn bring_placed_edge_left(&mut self) -> Result<(), SolveError> {
        let mut count = 0;
        let edge = loop {
            if let Some(edge) = self.placed_edge() {
                break edge;
            }
            self.perform(EDGE_CYCLE);
            count += 1;
            if count % 3 == 0 {
                self.turn(Move::Z);
            }
            if count >= MAX_LOOP_ITERATIONS {
                return Err(self.stuck());
            }
        };

        self.turn_until(Move::Z, |solver| Ok(solver.position(&edge)? == LEFT + FRONT))?;

        let front = self.cube.front_color();
        if !(self.shows(LEFT + FRONT, 2, front) && self.shows(LEFT + FRONT, 0, self.cube.left_color())) {
            return Err(self.inconsistent("placed edge lost after turning the cube"));
        }
        Ok(())
    }
}

/// Solves `cube` and returns the moves used.
pub fn solve(cube: Cube) -> Result<Vec<Move>, SolveError> {
    let mut solver = Solver::new(cube);
    solver.solve()?;
    Ok(solver.into_moves())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::SOLVED_CUBE_STR;
    use crate::moves::random_scramble;

    fn scrambled(seed: u64) -> Cube {
        let mut cube = Cube::new(SOLVED_CUBE_STR).unwrap();
        cube.apply_all(&random_scramble(&mut fastrand::Rng::with_seed(seed), 25));
        cube
    }

    /// Runs phases in order up to and including `last`.
    fn run_until(solver: &mut Solver, last: Phase) {
        for (phase, step) in PHASES {
            solver.phase = phase;
            step(solver).unwrap();
            if phase == last {
                break;
            }
        }
    }

    fn front_cross_done(cube: &Cube) -> bool {
        let front = cube.front_color();
        [LEFT, RIGHT, UP, DOWN].into_iter().all(|side| {
            let axis = (0..3).find(|&a| side[a] != 0).unwrap();
            let edge = cube.piece_at(side + FRONT).unwrap();
            edge.color(2) == Some(front) && edge.color(axis) == cube.piece_at(side).unwrap().color(axis)
        })
    }

    fn front_layer_done(cube: &Cube) -> bool {
        let front = cube.front_color();
        cube.face(FRONT).iter().all(|piece| piece.color(2) == Some(front))
            && cube.pieces().iter().all(|piece| {
                let pos = piece.position();
                if pos.z != 1 {
                    return true;
                }
                // side stickers of the front layer match their centers
                (0..2).all(|axis| {
                    pos[axis] == 0
                        || piece.color(axis)
                            == cube.piece_at(Point::new(0, 0, 0).with(axis, pos[axis])).unwrap().color(axis)
                })
            })
    }

    fn middle_layer_done(cube: &Cube) -> bool {
        cube.pieces().iter().filter(|p| p.position().z == 0).all(|piece| {
            let pos = piece.position();
            (0..2).all(|axis| {
                pos[axis] == 0
                    || piece.color(axis)
                        == cube.piece_at(Point::new(0, 0, 0).with(axis, pos[axis])).unwrap().color(axis)
            })
        })
    }

    #[test]
    fn test_solved_cube_needs_no_moves() {
        let moves = solve(Cube::new(SOLVED_CUBE_STR).unwrap()).unwrap();
        assert!(moves.is_empty());
    }

    #[test]
    fn test_solves_short_scramble() {
        let mut cube = Cube::new(SOLVED_CUBE_STR).unwrap();
        cube.sequence("R U Ri Ui").unwrap();

        let mut solver = Solver::new(cube.clone());
        solver.solve().unwrap();
        assert!(solver.cube().is_solved());
        assert!(!solver.moves().is_empty());

        cube.apply_all(solver.moves());
        assert!(cube.is_solved());
    }

    #[test]
    fn test_every_single_move_is_solved() {
        for mv in Move::ALL {
            let mut cube = Cube::new(SOLVED_CUBE_STR).unwrap();
            cube.apply(mv);
            let mut solver = Solver::new(cube);
            solver.solve().unwrap_or_else(|err| panic!("{mv}: {err}"));
            assert!(solver.cube().is_solved(), "{mv} not solved");
        }
    }

    #[test]
    fn test_phases_build_on_each_other() {
        for seed in 0..20 {
            let mut solver = Solver::new(scrambled(seed));
            run_until(&mut solver, Phase::Cross);
            assert!(front_cross_done(solver.cube()), "seed {seed}: cross");

            let mut solver = Solver::new(scrambled(seed));
            run_until(&mut solver, Phase::FirstLayerCorners);
            assert!(front_layer_done(solver.cube()), "seed {seed}: first layer");

            let mut solver = Solver::new(scrambled(seed));
            run_until(&mut solver, Phase::SecondLayer);
            assert!(front_layer_done(solver.cube()), "seed {seed}: first layer kept");
            assert!(middle_layer_done(solver.cube()), "seed {seed}: second layer");
        }
    }

    #[test]
    fn test_record_reproduces_solver_cube() {
        for seed in 0..10 {
            let start = scrambled(seed);
            let mut solver = Solver::new(start.clone());
            solver.solve().unwrap();

            let mut replay = start;
            replay.apply_all(solver.moves());
            assert_eq!(&replay, solver.cube(), "seed {seed}");
        }
    }

    #[test]
    fn test_fish_finish_ends_with_unflip() {
        // a single L turn is finished by the fish algorithm mid-loop
        let mut start = Cube::new(SOLVED_CUBE_STR).unwrap();
        start.apply(Move::L);

        let mut solver = Solver::new(start.clone());
        solver.solve().unwrap();
        assert!(solver.cube().is_solved());
        assert!(solver
            .moves()
            .ends_with(&[Move::L, Move::D, Move::Xi, Move::Xi]));
        assert_eq!(solver.cube().front_color(), start.front_color());

        let mut replay = start;
        replay.apply_all(solver.moves());
        assert_eq!(&replay, solver.cube());
    }

    #[test]
    fn test_flipped_edge_gets_stuck() {
        // swap the two stickers of the up-front edge
        let mut stickers: Vec<char> = SOLVED_CUBE_STR.chars().collect();
        stickers.swap(7, 13);
        let cube = Cube::new(&stickers.iter().collect::<String>()).unwrap();

        let err = solve(cube).unwrap_err();
        assert!(
            matches!(err, SolveError::Stuck { .. } | SolveError::Inconsistent { .. }),
            "unexpected error {err:?}"
        );
    }

    #[test]
    fn test_twisted_corner_gets_stuck() {
        let mut stickers: Vec<char> = SOLVED_CUBE_STR.chars().collect();
        // rotate the stickers of the up-front-right corner
        let (up, front, right) = (stickers[8], stickers[14], stickers[15]);
        stickers[8] = front;
        stickers[14] = right;
        stickers[15] = up;
        let cube = Cube::new(&stickers.iter().collect::<String>()).unwrap();

        let err = solve(cube).unwrap_err();
        assert!(matches!(
            err,
            SolveError::Stuck { .. } | SolveError::Inconsistent { .. }
        ));
        assert!(err.to_string().contains("unsolvable") || err.to_string().contains("Unexpected"));
    }

    #[test]
    fn test_missing_color_combination() {
        // the left sticker of the left-front edge gets a color no center has
        let mut stickers: Vec<char> = SOLVED_CUBE_STR.chars().collect();
        stickers[23] = 'Q';
        let cube = Cube::new(&stickers.iter().collect::<String>()).unwrap();

        assert_eq!(
            solve(cube).unwrap_err(),
            SolveError::MissingPiece {
                colors: vec!['W', 'Y']
            }
        );
    }
}
