//! Attack and check detection.

use crate::game_state::board::{Board, BoardMasks};
use crate::game_state::chess_types::*;
use crate::moves::slider_moves::{bishop_attacks, rook_attacks};
use crate::moves::step_moves::{king_attacks, knight_attacks, pawn_attacks};

#[inline]
pub fn is_king_in_check(board: &Board, side: Side) -> bool {
    let Some(king_sq) = board.king_square(side) else {
        return false;
    };
    is_square_attacked(&board.masks(), king_sq, side.opposite())
}

pub fn is_square_attacked(masks: &BoardMasks, square: Square, attacker: Side) -> bool {
    // A pawn of `attacker` hits `square` exactly when a pawn of the other
    // side on `square` would hit the attacker's pawn.
    if pawn_attacks(attacker.opposite(), square) & masks.of(attacker, PieceKind::Pawn) != 0 {
        return true;
    }

    if knight_attacks(square) & masks.of(attacker, PieceKind::Knight) != 0 {
        return true;
    }

    if king_attacks(square) & masks.of(attacker, PieceKind::King) != 0 {
        return true;
    }

    let queens = masks.of(attacker, PieceKind::Queen);
    let bishops_queens = masks.of(attacker, PieceKind::Bishop) | queens;
    if bishop_attacks(square, masks.all) & bishops_queens != 0 {
        return true;
    }

    let rooks_queens = masks.of(attacker, PieceKind::Rook) | queens;
    rook_attacks(square, masks.all) & rooks_queens != 0
}
