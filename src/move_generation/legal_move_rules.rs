//! Legality of a single proposed move.
//!
//! [`is_legal`] runs the checks in a fixed order and reports the first
//! failure: ownership, geometry, friendly capture, self-check, promotion.
//! On success it returns the [`Effect`] to apply; it never mutates the
//! board it was given.

use crate::errors::IllegalMoveReason;
use crate::game_state::board::{Board, BoardMasks};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{build_effect, Effect, MoveClass};
use crate::move_generation::legal_move_checks::{is_king_in_check, is_square_attacked};
use crate::moves::piece_geometry::attack_set;
use crate::moves::slider_moves::squares_between;
use crate::moves::step_moves::{king_attacks, pawn_attacks};

pub fn is_legal(
    board: &Board,
    side_to_move: Side,
    rights: Rights,
    mv: Move,
) -> Result<Effect, IllegalMoveReason> {
    let moved = match board.get(mv.from) {
        Some(piece) if piece.side == side_to_move => piece,
        _ => return Err(IllegalMoveReason::NotYourPiece),
    };

    let masks = board.masks();
    let class = classify_geometry(board, &masks, rights, moved, mv.from, mv.to)
        .ok_or(IllegalMoveReason::GeometryViolation)?;

    if matches!(board.get(mv.to), Some(target) if target.side == side_to_move) {
        return Err(IllegalMoveReason::FriendlyCapture);
    }

    // Test for self-check with a well-formed promotion so a bogus kind (a
    // second king, say) cannot distort the check test.
    let promotes = moved.kind == PieceKind::Pawn && mv.to.rank() == moved.side.promotion_rank();
    let promotion_ok = match mv.promotion {
        Some(kind) => promotes && kind.is_promotion_target(),
        None => !promotes,
    };
    let trial_move = Move {
        promotion: promotes.then_some(PieceKind::Queen),
        ..mv
    };

    let effect = build_effect(board, rights, if promotion_ok { mv } else { trial_move }, moved, class);
    let mut scratch = board.clone();
    effect.apply_to(&mut scratch);
    if is_king_in_check(&scratch, side_to_move) {
        return Err(IllegalMoveReason::SelfCheck);
    }

    if !promotion_ok {
        return Err(IllegalMoveReason::InvalidPromotion);
    }

    Ok(effect)
}

/// Work out whether `piece` can travel `from -> to` by its movement rules,
/// and which kind of move that is. Friendly occupancy of `to` is not judged
/// here.
pub fn classify_geometry(
    board: &Board,
    masks: &BoardMasks,
    rights: Rights,
    piece: Piece,
    from: Square,
    to: Square,
) -> Option<MoveClass> {
    match piece.kind {
        PieceKind::Pawn => classify_pawn(board, rights, piece.side, from, to),
        PieceKind::King => {
            if king_attacks(from) & to.mask() != 0 {
                Some(MoveClass::Standard)
            } else {
                classify_castle(board, masks, rights, piece.side, from, to)
            }
        }
        _ => (attack_set(piece, from, masks.all) & to.mask() != 0).then_some(MoveClass::Standard),
    }
}

#[inline]
pub(crate) const fn pawn_direction(side: Side) -> i8 {
    match side {
        Side::White => 1,
        Side::Black => -1,
    }
}

fn classify_pawn(
    board: &Board,
    rights: Rights,
    side: Side,
    from: Square,
    to: Square,
) -> Option<MoveClass> {
    let dir = pawn_direction(side);
    let one_step = from.offset(0, dir)?;

    if to == one_step {
        return board.get(to).is_none().then_some(MoveClass::Standard);
    }

    if from.rank() == side.pawn_start_rank() && Some(to) == from.offset(0, 2 * dir) {
        let clear = board.get(one_step).is_none() && board.get(to).is_none();
        return clear.then_some(MoveClass::DoublePawnPush);
    }

    if pawn_attacks(side, from) & to.mask() == 0 {
        return None;
    }

    if board.get(to).is_some() {
        return Some(MoveClass::Standard);
    }

    if rights.en_passant != Some(to) {
        return None;
    }

    let captured_square = to.offset(0, -dir)?;
    match board.get(captured_square) {
        Some(victim) if victim.side != side && victim.kind == PieceKind::Pawn => {
            Some(MoveClass::EnPassant { captured_square })
        }
        _ => None,
    }
}

/// Castling is legal geometry when the right is still held, the rook is on
/// its corner, the squares between king and rook are empty, and the king is
/// neither in check nor passing over an attacked square. The landing square
/// is left to the self-check test.
fn classify_castle(
    board: &Board,
    masks: &BoardMasks,
    rights: Rights,
    side: Side,
    from: Square,
    to: Square,
) -> Option<MoveClass> {
    let home = side.home_rank();
    if Some(from) != Square::new(4, home) {
        return None;
    }

    let (right, rook_file, rook_to_file) = if Some(to) == Square::new(6, home) {
        (kingside_right(side), 7, 5)
    } else if Some(to) == Square::new(2, home) {
        (queenside_right(side), 0, 3)
    } else {
        return None;
    };

    let rook_from = Square::new(rook_file, home)?;
    let rook_to = Square::new(rook_to_file, home)?;

    if !rights.can_castle(right)
        || board.get(rook_from) != Some(Piece::new(PieceKind::Rook, side))
        || squares_between(from, rook_from) & masks.all != 0
    {
        return None;
    }

    let enemy = side.opposite();
    if is_square_attacked(masks, from, enemy) || is_square_attacked(masks, rook_to, enemy) {
        return None;
    }

    Some(MoveClass::Castle { rook_from, rook_to })
}
