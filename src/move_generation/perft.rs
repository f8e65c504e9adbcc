//! Perft node counting for validating move generation against published
//! reference counts.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::MoveClass;
use crate::move_generation::legal_move_generator::legal_moves_for;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
    }
}

/// Count leaf nodes (and move categories at the leaves) `depth` plies deep.
pub fn perft(position: &Position, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for effect in legal_moves_for(position) {
        if depth == 1 {
            total.nodes += 1;
            total.captures += u64::from(effect.captured.is_some());
            total.en_passant += u64::from(matches!(effect.class, MoveClass::EnPassant { .. }));
            total.castles += u64::from(matches!(effect.class, MoveClass::Castle { .. }));
            total.promotions += u64::from(effect.mv.promotion.is_some());
            continue;
        }

        let mut board = position.board.clone();
        effect.apply_to(&mut board);
        let child = Position {
            board,
            side_to_move: position.side_to_move.opposite(),
            rights: effect.rights_after,
        };
        total.merge(perft(&child, depth - 1));
    }

    total
}

#[cfg(test)]
mod tests {
    use super::perft;
    use crate::utils::fen_parser::parse_fen;

    fn nodes(fen: &str, depth: u8) -> u64 {
        let position = parse_fen(fen).expect("perft FEN should parse").position;
        perft(&position, depth).nodes
    }

    #[test]
    fn startpos_reference_counts() {
        let fen = crate::game_state::chess_rules::STARTING_POSITION_FEN;
        assert_eq!(nodes(fen, 1), 20);
        assert_eq!(nodes(fen, 2), 400);
        assert_eq!(nodes(fen, 3), 8902);
    }

    #[test]
    fn kiwipete_reference_counts() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let position = parse_fen(fen).expect("kiwipete should parse").position;
        let depth_two = perft(&position, 2);
        assert_eq!(depth_two.nodes, 2039);
        assert_eq!(depth_two.captures, 351);
        assert_eq!(depth_two.en_passant, 1);
        assert_eq!(depth_two.castles, 91);
    }

    #[test]
    fn endgame_reference_counts() {
        let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
        assert_eq!(nodes(fen, 1), 14);
        assert_eq!(nodes(fen, 2), 191);
        assert_eq!(nodes(fen, 3), 2812);
    }

    #[test]
    fn promotion_heavy_reference_counts() {
        let fen = "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1";
        assert_eq!(nodes(fen, 1), 6);
        assert_eq!(nodes(fen, 2), 264);
        assert_eq!(nodes(fen, 3), 9467);
    }
}
