//! Move effects: the exact board deltas a validated move produces.
//!
//! The rules engine builds an [`Effect`] without touching the caller's board;
//! the state machine then applies it in one step. Every delta records the
//! occupant before and after, so an effect can be reverted exactly.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

/// What kind of special handling a move needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveClass {
    Standard,
    DoublePawnPush,
    EnPassant { captured_square: Square },
    Castle { rook_from: Square, rook_to: Square },
}

/// Change to a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareDelta {
    pub square: Square,
    pub before: Occupant,
    pub after: Occupant,
}

/// The full consequence of a legal move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effect {
    pub mv: Move,
    pub moved: Piece,
    pub captured: Option<Piece>,
    pub class: MoveClass,
    /// At most four entries (castling touches four squares).
    pub deltas: Vec<SquareDelta>,
    pub rights_before: Rights,
    pub rights_after: Rights,
}

impl Effect {
    /// Write every delta's `after` occupant.
    pub fn apply_to(&self, board: &mut Board) {
        for delta in &self.deltas {
            board.set(delta.square, delta.after);
        }
    }

    /// Restore every delta's `before` occupant, last delta first.
    pub fn revert_on(&self, board: &mut Board) {
        for delta in self.deltas.iter().rev() {
            board.set(delta.square, delta.before);
        }
    }

    /// Pawn moves and captures are irreversible and reset the fifty-move count.
    #[inline]
    pub fn resets_halfmove_clock(&self) -> bool {
        self.moved.kind == PieceKind::Pawn || self.captured.is_some()
    }
}

/// Assemble the effect of `mv` by `moved`. The caller has already decided
/// the move's geometry is valid and which `class` it belongs to.
pub fn build_effect(
    board: &Board,
    rights: Rights,
    mv: Move,
    moved: Piece,
    class: MoveClass,
) -> Effect {
    let mut deltas = Vec::with_capacity(4);
    let landing = Piece::new(mv.promotion.unwrap_or(moved.kind), moved.side);
    let mut captured = board.get(mv.to);

    deltas.push(SquareDelta {
        square: mv.from,
        before: Some(moved),
        after: None,
    });
    deltas.push(SquareDelta {
        square: mv.to,
        before: captured,
        after: Some(landing),
    });

    match class {
        MoveClass::EnPassant { captured_square } => {
            captured = board.get(captured_square);
            deltas.push(SquareDelta {
                square: captured_square,
                before: captured,
                after: None,
            });
        }
        MoveClass::Castle { rook_from, rook_to } => {
            deltas.push(SquareDelta {
                square: rook_from,
                before: board.get(rook_from),
                after: None,
            });
            deltas.push(SquareDelta {
                square: rook_to,
                before: board.get(rook_to),
                after: board.get(rook_from),
            });
        }
        MoveClass::Standard | MoveClass::DoublePawnPush => {}
    }

    let en_passant = match class {
        MoveClass::DoublePawnPush => {
            Square::from_index((mv.from.index() + mv.to.index()) / 2)
        }
        _ => None,
    };

    Effect {
        mv,
        moved,
        captured,
        class,
        deltas,
        rights_before: rights,
        rights_after: Rights::new(
            updated_castling_rights(rights.castling, moved, mv.from, mv.to),
            en_passant,
        ),
    }
}

fn updated_castling_rights(
    mut castling: CastlingRights,
    moved: Piece,
    from: Square,
    to: Square,
) -> CastlingRights {
    if moved.kind == PieceKind::King {
        castling &= !(kingside_right(moved.side) | queenside_right(moved.side));
    }

    // A rook leaving its corner, or anything landing on a corner (capturing
    // the rook there), clears the matching right.
    for sq in [from, to] {
        castling &= !corner_right(sq);
    }

    castling
}

fn corner_right(square: Square) -> CastlingRights {
    match square.index() {
        0 => CASTLE_WHITE_QUEENSIDE,
        7 => CASTLE_WHITE_KINGSIDE,
        56 => CASTLE_BLACK_QUEENSIDE,
        63 => CASTLE_BLACK_KINGSIDE,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::{build_effect, MoveClass};
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::*;

    fn sq(name: &str) -> Square {
        crate::utils::algebraic::algebraic_to_square(name).expect("test square should parse")
    }

    #[test]
    fn castling_effect_moves_king_and_rook_and_reverts() {
        let mut board = Board::empty();
        let king = Piece::new(PieceKind::King, Side::White);
        let rook = Piece::new(PieceKind::Rook, Side::White);
        board.set(sq("e1"), Some(king));
        board.set(sq("h1"), Some(rook));
        let original = board.clone();

        let effect = build_effect(
            &board,
            Rights::new(CASTLE_ALL, None),
            Move::new(sq("e1"), sq("g1")),
            king,
            MoveClass::Castle {
                rook_from: sq("h1"),
                rook_to: sq("f1"),
            },
        );
        effect.apply_to(&mut board);
        assert_eq!(board.get(sq("g1")), Some(king));
        assert_eq!(board.get(sq("f1")), Some(rook));
        assert_eq!(board.get(sq("h1")), None);
        assert_eq!(
            effect.rights_after.castling,
            CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE
        );

        effect.revert_on(&mut board);
        assert_eq!(board, original);
    }

    #[test]
    fn double_push_sets_en_passant_target() {
        let board = Board::starting_position();
        let pawn = Piece::new(PieceKind::Pawn, Side::White);
        let effect = build_effect(
            &board,
            Rights::new(CASTLE_ALL, None),
            Move::new(sq("e2"), sq("e4")),
            pawn,
            MoveClass::DoublePawnPush,
        );
        assert_eq!(effect.rights_after.en_passant, Some(sq("e3")));
        assert!(effect.resets_halfmove_clock());
    }

    #[test]
    fn capturing_a_corner_rook_clears_its_right() {
        let mut board = Board::empty();
        let bishop = Piece::new(PieceKind::Bishop, Side::White);
        board.set(sq("b7"), Some(bishop));
        board.set(sq("a8"), Some(Piece::new(PieceKind::Rook, Side::Black)));
        let effect = build_effect(
            &board,
            Rights::new(CASTLE_ALL, None),
            Move::new(sq("b7"), sq("a8")),
            bishop,
            MoveClass::Standard,
        );
        assert_eq!(effect.captured, Some(Piece::new(PieceKind::Rook, Side::Black)));
        assert_eq!(effect.rights_after.castling, CASTLE_ALL & !CASTLE_BLACK_QUEENSIDE);
    }
}
