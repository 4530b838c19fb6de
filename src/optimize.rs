//! Move list shortening.
//!
//! Three rewrite rules, each run until it stops firing:
//!
//! 1. A cube rotation and a later inverse rotation are removed, and the moves
//!    between them are relabelled to what they do without the rotation.
//! 2. Three identical moves become the inverse move.
//! 3. A move directly followed by its inverse is dropped.
//!
//! Every rule shortens the list when it fires and keeps the net effect on the
//! cube, so the whole pass is repeated until nothing changes.

use log::debug;
use rustc_hash::FxHashMap;

use crate::moves::Move::{self, *};

/// What each move becomes when the moves around it lose a clockwise `X`.
/// Moves missing from a table are unaffected, or are the inverse of an entry.
const X_CW: [(Move, Move); 8] = [
    (U, F),
    (B, U),
    (D, B),
    (F, D),
    (E, Si),
    (S, E),
    (Y, Z),
    (Z, Yi),
];

const Y_CW: [(Move, Move); 8] = [
    (B, L),
    (R, B),
    (F, R),
    (L, F),
    (S, Mi),
    (M, S),
    (Z, X),
    (X, Zi),
];

const Z_CW: [(Move, Move); 8] = [
    (U, L),
    (R, U),
    (D, R),
    (L, D),
    (E, Mi),
    (M, E),
    (Y, Xi),
    (X, Y),
];

/// Relabelling for the moves enclosed by `rotation` and its inverse.
fn rotation_table(rotation: Move) -> FxHashMap<Move, Move> {
    let (pairs, clockwise) = match rotation {
        X => (X_CW, true),
        Xi => (X_CW, false),
        Y => (Y_CW, true),
        Yi => (Y_CW, false),
        Z => (Z_CW, true),
        Zi => (Z_CW, false),
        _ => return FxHashMap::default(),
    };
    pairs
        .into_iter()
        .map(|(from, to)| if clockwise { (from, to) } else { (to, from) })
        .collect()
}

fn relabel(table: &FxHashMap<Move, Move>, mv: Move) -> Move {
    if let Some(&image) = table.get(&mv) {
        image
    } else if let Some(&image) = table.get(&mv.inverse()) {
        image.inverse()
    } else {
        mv
    }
}

/// The sequence that undoes `moves`.
pub fn invert(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|mv| mv.inverse()).collect()
}

/// Removes each cube rotation together with the last matching inverse
/// rotation after it, relabelling the moves in between.
pub fn apply_no_full_cube_rotation_optimization(moves: &mut Vec<Move>) {
    loop {
        let mut changed = false;
        let mut i = 0;
        while i < moves.len() {
            let rotation = moves[i];
            if rotation.is_cube_rotation() {
                let undo = moves
                    .iter()
                    .rposition(|&mv| mv == rotation.inverse())
                    .filter(|&j| j > i);
                if let Some(j) = undo {
                    let table = rotation_table(rotation);
                    let inner: Vec<Move> = moves[i + 1..j]
                        .iter()
                        .map(|&mv| relabel(&table, mv))
                        .collect();
                    moves.splice(i..=j, inner);
                    changed = true;
                }
            }
            i += 1;
        }
        if !changed {
            break;
        }
    }
}

/// Replaces three identical moves in a row with the inverse move.
pub fn apply_repeat_three_optimization(moves: &mut Vec<Move>) {
    loop {
        let mut changed = false;
        let mut i = 0;
        while i + 2 < moves.len() {
            if moves[i] == moves[i + 1] && moves[i + 1] == moves[i + 2] {
                moves[i] = moves[i].inverse();
                moves.drain(i + 1..i + 3);
                changed = true;
            } else {
                i += 1;
            }
        }
        if !changed {
            break;
        }
    }
}

/// Drops every move that is immediately undone.
pub fn apply_do_undo_optimization(moves: &mut Vec<Move>) {
    loop {
        let mut changed = false;
        let mut i = 0;
        while i + 1 < moves.len() {
            if moves[i].inverse() == moves[i + 1] {
                moves.drain(i..i + 2);
                changed = true;
            } else {
                i += 1;
            }
        }
        if !changed {
            break;
        }
    }
}

/// Returns a shorter list with the same effect on any cube.
pub fn optimize_moves(moves: &[Move]) -> Vec<Move> {
    let mut result = moves.to_vec();
    loop {
        let before = result.len();

        apply_no_full_cube_rotation_optimization(&mut result);
        debug!("cube rotations: {before} -> {} moves", result.len());

        let len = result.len();
        apply_repeat_three_optimization(&mut result);
        debug!("repeat three: {len} -> {} moves", result.len());

        let len = result.len();
        apply_do_undo_optimization(&mut result);
        debug!("do undo: {len} -> {} moves", result.len());

        // every rewrite shortens the list, so an unchanged length is a fixpoint
        if result.len() == before {
            return result;
        }
    }
}
