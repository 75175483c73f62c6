//! Move ordering for the alpha-beta searcher.
//!
//! Order: hash move, then captures by MVV-LVA, then killer moves, then the
//! remainder in generation order. Good ordering is what makes the fail-hard
//! cutoffs in the searcher actually fire.

use crate::board::state::State;
use crate::board::types::Move;
use crate::search::board_scoring::piece_value;

/// Reorder `moves` in place for search.
///
/// The hash move (when present in the list) goes first; captures including
/// en passant follow, best victim first; then up to two killers; the rest
/// keep their relative order.
pub fn order_moves(
    moves: &mut Vec<Move>,
    state: &State,
    hash_move: Option<Move>,
    killer1: Option<Move>,
    killer2: Option<Move>,
) {
    let mut ordered = Vec::with_capacity(moves.len());

    if let Some(hash) = hash_move {
        if let Some(pos) = moves.iter().position(|m| m.same_squares(&hash)) {
            ordered.push(moves.remove(pos));
        }
    }

    let is_killer = |m: &Move| {
        killer1.map_or(false, |k| m.same_squares(&k)) || killer2.map_or(false, |k| m.same_squares(&k))
    };

    let mut captures = Vec::new();
    let mut killers = Vec::new();
    let mut rest = Vec::new();
    for mv in moves.drain(..) {
        if mv.capture || mv.en_passant {
            captures.push(mv);
        } else if is_killer(&mv) {
            killers.push(mv);
        } else {
            rest.push(mv);
        }
    }
    captures.sort_by_key(|m| -mvv_lva_score(state, m));

    ordered.extend(captures);
    ordered.extend(killers);
    ordered.extend(rest);
    *moves = ordered;
}

/// Most-valuable-victim / least-valuable-attacker score; higher tries first.
/// An en-passant destination is empty, so its victim counts zero.
fn mvv_lva_score(state: &State, mv: &Move) -> i32 {
    let victim = state
        .at(mv.to_col, mv.to_row)
        .map_or(0, |p| piece_value(p.kind));
    let attacker = state
        .at(mv.from_col, mv.from_row)
        .map_or(1, |p| piece_value(p.kind));
    victim * 10 - attacker
}
