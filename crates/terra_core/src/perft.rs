use crate::{
    board::Position,
    movegen::{all_legal_moves, next_seat},
    types::Seat,
};

/// Pure perft node count.
/// Counts all legal positions reachable in `depth` plies, `seat` moving first
/// and the turn passing to the next seat that still has pieces.
pub fn perft(pos: &Position, seat: Seat, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = all_legal_moves(pos, seat);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in moves {
        let mut child = pos.clone();
        child.apply_move(mv);
        match next_seat(&child, seat) {
            Some(next) => nodes += perft(&child, next, depth - 1),
            None => nodes += 1,
        }
    }
    nodes
}
