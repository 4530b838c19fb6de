//! Rubik's Cube Solver Library
//!
//! Models a 3x3x3 cube as 26 colored pieces on an integer lattice, solves it
//! layer by layer with fixed algorithms, and shortens the resulting move list.
//!
//! ```
//! use rubik::{optimize_moves, solve, Cube, SOLVED_CUBE_STR};
//!
//! let mut cube = Cube::new(SOLVED_CUBE_STR).unwrap();
//! cube.sequence("R U Ri Ui").unwrap();
//!
//! let moves = optimize_moves(&solve(cube.clone()).unwrap());
//! cube.apply_all(&moves);
//! assert!(cube.is_solved());
//! ```

pub mod cube;
pub mod geometry;
pub mod moves;
pub mod net;
pub mod optimize;
pub mod pieces;
pub mod solver;

pub use cube::{Cube, CubeError, SOLVED_CUBE_STR};
pub use moves::{format_sequence, parse_sequence, Move, MoveParseError};
pub use optimize::optimize_moves;
pub use solver::{solve, Phase, SolveError, Solver};
