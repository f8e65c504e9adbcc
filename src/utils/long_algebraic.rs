//! Long algebraic move notation (`e2e4`, `e7e8q`).
//!
//! Parsing is purely syntactic: the result is a proposed [`Move`] that still
//! has to pass the rules engine.

use crate::errors::NotationError;
use crate::game_state::chess_types::{Move, PieceKind};
use crate::utils::algebraic::algebraic_to_square;

pub fn long_algebraic_to_move(long_algebraic: &str) -> Result<Move, NotationError> {
    let invalid = || NotationError::InvalidMove(long_algebraic.to_owned());
    if !long_algebraic.is_ascii() || !(4..=5).contains(&long_algebraic.len()) {
        return Err(invalid());
    }

    let from = algebraic_to_square(&long_algebraic[0..2]).map_err(|_| invalid())?;
    let to = algebraic_to_square(&long_algebraic[2..4]).map_err(|_| invalid())?;
    let promotion = match long_algebraic[4..].chars().next() {
        None => None,
        Some(letter) => Some(PieceKind::from_letter(letter).ok_or_else(invalid)?),
    };

    Ok(Move {
        from,
        to,
        promotion,
    })
}

#[inline]
pub fn move_to_long_algebraic(mv: Move) -> String {
    mv.to_string()
}

#[cfg(test)]
mod tests {
    use super::{long_algebraic_to_move, move_to_long_algebraic};
    use crate::game_state::chess_types::PieceKind;

    #[test]
    fn parses_plain_and_promotion_moves() {
        let mv = long_algebraic_to_move("e2e4").expect("e2e4 should parse");
        assert_eq!(mv.from.index(), 12);
        assert_eq!(mv.to.index(), 28);
        assert_eq!(mv.promotion, None);

        let promo = long_algebraic_to_move("a7a8n").expect("a7a8n should parse");
        assert_eq!(promo.promotion, Some(PieceKind::Knight));
        assert_eq!(move_to_long_algebraic(promo), "a7a8n");
    }

    #[test]
    fn rejects_malformed_moves() {
        for bad in ["", "e2", "e2e9", "e2e4x", "e2e4qq", "é2e4"] {
            assert!(long_algebraic_to_move(bad).is_err(), "{bad} should not parse");
        }
    }
}
