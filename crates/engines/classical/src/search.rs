//! Paranoid minimax with alpha-beta pruning
//!
//! The searching seat and its allies maximise; every other seat is assumed
//! to minimise the searching seat's score, which reduces multi-seat play to
//! a two-sided search. Each child is played on an owned copy of the position
//! with the rules' post-move clean-up (desert expiry, removal of kingless
//! seats) applied.

use rand::Rng;
use terra_core::{
    has_any_legal_move, is_in_check, next_seat, Move, Position, Seat, TerrainType,
};

use crate::eval::evaluate;
use crate::ordering::ordered_moves;

/// Base score of a decided game. Scores at or beyond it are mate-class.
pub const MATE: i32 = 100_000;
const INF: i32 = 2 * MATE;

/// Searches `pos` for `seat` and returns the best move with its score.
///
/// Returns `None` only when `seat` has no legal move.
pub fn best_move<R: Rng + ?Sized>(
    pos: &Position,
    seat: Seat,
    depth: u8,
    rng: &mut R,
) -> Option<(Move, i32)> {
    let mut nodes = 0;
    pick_best_move(pos, seat, depth, rng, &mut nodes)
}

/// [`best_move`] with a node counter for statistics.
pub fn pick_best_move<R: Rng + ?Sized>(
    pos: &Position,
    seat: Seat,
    depth: u8,
    rng: &mut R,
    nodes: &mut u64,
) -> Option<(Move, i32)> {
    let moves = ordered_moves(pos, seat, rng);
    let mut best: Option<(Move, i32)> = None;
    let mut alpha = -INF;

    for mv in moves {
        let child = play(pos, seat, mv);
        *nodes += 1;

        let score = minimax(
            &child,
            next_seat(&child, seat),
            seat,
            depth.saturating_sub(1),
            alpha,
            INF,
            rng,
            nodes,
        );

        if best.map_or(true, |(_, s)| score > s) {
            best = Some((mv, score));
        }
        alpha = alpha.max(score);
        if score >= MATE {
            break;
        }
    }
    best
}

/// `pos` after `seat` plays `mv`, with desert expiry and eliminations.
pub fn play(pos: &Position, seat: Seat, mv: Move) -> Position {
    let mut child = pos.clone();
    child.apply_move(mv);

    let stranded: Vec<_> = child
        .board
        .pieces_of(seat)
        .filter(|&(c, _)| c != mv.to && child.terrain_at(c) == TerrainType::Desert)
        .map(|(c, _)| c)
        .collect();
    for c in stranded {
        child.board.set(c, None);
    }

    for &s in child.mode.seats() {
        if child.board.king_of(s).is_none() {
            child.board.clear_seat(s);
        }
    }
    child
}

/// Recursive minimax with alpha-beta pruning, scored for `root`.
#[allow(clippy::too_many_arguments)]
fn minimax<R: Rng + ?Sized>(
    pos: &Position,
    to_move: Option<Seat>,
    root: Seat,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    rng: &mut R,
    nodes: &mut u64,
) -> i32 {
    let mode = pos.mode;
    let left = depth as i32;

    if pos.board.king_of(root).is_none() {
        return -MATE - left;
    }
    let enemies_left = mode
        .seats()
        .iter()
        .any(|&s| !mode.are_allies(s, root) && pos.board.king_of(s).is_some());
    if !enemies_left {
        return MATE + left;
    }

    let Some(side) = to_move else {
        return evaluate(pos, root);
    };
    let ours = mode.are_allies(side, root);

    if depth == 0 {
        if has_any_legal_move(pos, side) {
            return evaluate(pos, root);
        }
        return terminal(pos, side, ours, left);
    }

    let moves = ordered_moves(pos, side, rng);
    if moves.is_empty() {
        return terminal(pos, side, ours, left);
    }

    let mut best = if ours { -INF } else { INF };
    for mv in moves {
        let child = play(pos, side, mv);
        *nodes += 1;
        let score = minimax(
            &child,
            next_seat(&child, side),
            root,
            depth - 1,
            alpha,
            beta,
            rng,
            nodes,
        );

        if ours {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if alpha >= beta {
            break;
        }
    }
    best
}

/// Score when `side` has no legal move: mate against it when in check,
/// otherwise a stalemate.
fn terminal(pos: &Position, side: Seat, ours: bool, left: i32) -> i32 {
    if !is_in_check(pos, side) {
        return 0;
    }
    if ours {
        -MATE - left
    } else {
        MATE + left
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
