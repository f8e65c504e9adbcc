//! Movement geometry keyed by piece kind.
//!
//! A single exhaustive match maps each [`PieceKind`] to the squares it
//! controls from a given origin, so the rules engine never dispatches on
//! anything but the closed enum.

use crate::game_state::chess_types::{Piece, PieceKind, Square};
use crate::moves::slider_moves::{bishop_attacks, queen_attacks, rook_attacks};
use crate::moves::step_moves::{king_attacks, knight_attacks, pawn_attacks};

/// Squares `piece` on `square` attacks given total `occupancy`. Sliding rays
/// stop on (and include) the first occupied square. Pawns contribute only
/// their diagonal captures; forward pushes are not attacks.
#[inline]
pub fn attack_set(piece: Piece, square: Square, occupancy: u64) -> u64 {
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(piece.side, square),
        PieceKind::Knight => knight_attacks(square),
        PieceKind::Bishop => bishop_attacks(square, occupancy),
        PieceKind::Rook => rook_attacks(square, occupancy),
        PieceKind::Queen => queen_attacks(square, occupancy),
        PieceKind::King => king_attacks(square),
    }
}
