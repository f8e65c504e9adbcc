//! Lazy move enumeration.
//!
//! Pseudo-legal candidates are produced per piece from the attack tables and
//! then pushed through [`is_legal`], which rejects anything that breaks the
//! movement rules or leaves the mover in check. Both sequences are lazy and
//! hold no state beyond the position they borrow, so calling again restarts
//! enumeration from scratch.

use crate::game_state::board::{Board, BoardMasks};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::Effect;
use crate::move_generation::legal_move_rules::{is_legal, pawn_direction};
use crate::moves::piece_geometry::attack_set;

const PROMOTION_CHOICES: [Option<PieceKind>; 4] = [
    Some(PieceKind::Knight),
    Some(PieceKind::Bishop),
    Some(PieceKind::Rook),
    Some(PieceKind::Queen),
];
const NO_PROMOTION: [Option<PieceKind>; 1] = [None];

/// Every `(piece, destination)` candidate for `side`, promotions expanded.
/// May include moves that leave the king in check or castle illegally.
pub fn pseudo_legal_moves<'a>(
    board: &'a Board,
    side: Side,
    rights: Rights,
) -> impl Iterator<Item = Move> + 'a {
    let masks = board.masks();
    board
        .pieces()
        .filter(move |(_, piece)| piece.side == side)
        .flat_map(move |(from, piece)| {
            let targets = candidate_targets(board, &masks, rights, from, piece);
            Square::iter_mask(targets).flat_map(move |to| {
                let promotes =
                    piece.kind == PieceKind::Pawn && to.rank() == piece.side.promotion_rank();
                let choices: &'static [Option<PieceKind>] = if promotes {
                    &PROMOTION_CHOICES
                } else {
                    &NO_PROMOTION
                };
                choices.iter().map(move |&promotion| Move {
                    from,
                    to,
                    promotion,
                })
            })
        })
}

/// Every legal move for `side`, as the effect it would have.
pub fn legal_moves<'a>(
    board: &'a Board,
    side: Side,
    rights: Rights,
) -> impl Iterator<Item = Effect> + 'a {
    pseudo_legal_moves(board, side, rights).filter_map(move |mv| is_legal(board, side, rights, mv).ok())
}

pub fn legal_moves_for(position: &Position) -> impl Iterator<Item = Effect> + '_ {
    legal_moves(&position.board, position.side_to_move, position.rights)
}

/// Cheaper than counting: stops at the first legal move.
pub fn has_legal_move(position: &Position) -> bool {
    legal_moves_for(position).next().is_some()
}

fn candidate_targets(
    board: &Board,
    masks: &BoardMasks,
    rights: Rights,
    from: Square,
    piece: Piece,
) -> u64 {
    let own = masks.by_side[piece.side.index()];
    let enemy = masks.by_side[piece.side.opposite().index()];

    match piece.kind {
        PieceKind::Pawn => {
            let dir = pawn_direction(piece.side);
            let mut targets = 0u64;
            if let Some(one) = from.offset(0, dir).filter(|sq| board.get(*sq).is_none()) {
                targets |= one.mask();
                if from.rank() == piece.side.pawn_start_rank() {
                    if let Some(two) = from.offset(0, 2 * dir).filter(|sq| board.get(*sq).is_none()) {
                        targets |= two.mask();
                    }
                }
            }
            let ep = rights.en_passant.map_or(0, Square::mask);
            targets | (attack_set(piece, from, masks.all) & (enemy | ep))
        }
        PieceKind::King => {
            let mut targets = attack_set(piece, from, masks.all) & !own;
            let home = piece.side.home_rank();
            if Some(from) == Square::new(4, home) {
                if rights.can_castle(kingside_right(piece.side)) {
                    targets |= Square::new(6, home).map_or(0, Square::mask);
                }
                if rights.can_castle(queenside_right(piece.side)) {
                    targets |= Square::new(2, home).map_or(0, Square::mask);
                }
            }
            targets
        }
        _ => attack_set(piece, from, masks.all) & !own,
    }
}

#[cfg(test)]
mod tests {
    use super::{legal_moves_for, pseudo_legal_moves};
    use crate::game_state::chess_types::*;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn startpos_has_twenty_legal_moves_of_pawns_and_knights() {
        let position = parse_fen(crate::game_state::chess_rules::STARTING_POSITION_FEN)
            .expect("starting FEN should parse")
            .position;
        let moves: Vec<_> = legal_moves_for(&position).collect();
        assert_eq!(moves.len(), 20);
        assert!(moves
            .iter()
            .all(|e| matches!(e.moved.kind, PieceKind::Pawn | PieceKind::Knight)));
    }

    #[test]
    fn enumeration_restarts_identically() {
        let position = parse_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .expect("FEN should parse")
            .position;
        let first: Vec<Move> = legal_moves_for(&position).map(|e| e.mv).collect();
        let second: Vec<Move> = legal_moves_for(&position).map(|e| e.mv).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 48);
    }

    #[test]
    fn promotions_expand_to_four_choices() {
        let position = parse_fen("7k/4P3/8/8/8/8/8/4K3 w - - 0 1")
            .expect("FEN should parse")
            .position;
        let promotions = pseudo_legal_moves(&position.board, Side::White, position.rights)
            .filter(|mv| mv.promotion.is_some())
            .count();
        assert_eq!(promotions, 4);
    }
}
