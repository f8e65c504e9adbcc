//! Fixed-width byte codec for proposed moves.
//!
//! Layout: `[from, to, promotion]`, where squares are indices `0..=63` and
//! the promotion byte is `0` for none or `1 + PieceKind::index()`. Any kind
//! decodes here; whether it is a legal promotion is the rules engine's call.

use crate::errors::MalformedMove;
use crate::game_state::chess_types::{Move, PieceKind, Square};

pub const MOVE_ENCODED_LEN: usize = 3;
pub const NO_PROMOTION_CODE: u8 = 0;

pub fn encode_move(mv: Move) -> [u8; MOVE_ENCODED_LEN] {
    [
        mv.from.index(),
        mv.to.index(),
        mv.promotion
            .map(|kind| kind.index() as u8 + 1)
            .unwrap_or(NO_PROMOTION_CODE),
    ]
}

pub fn decode_move(bytes: &[u8]) -> Result<Move, MalformedMove> {
    let [from, to, promotion] = <[u8; MOVE_ENCODED_LEN]>::try_from(bytes)
        .map_err(|_| MalformedMove::WrongLength(bytes.len()))?;

    let from = Square::from_index(from).ok_or(MalformedMove::SquareOutOfRange(from))?;
    let to = Square::from_index(to).ok_or(MalformedMove::SquareOutOfRange(to))?;
    let promotion = match promotion {
        NO_PROMOTION_CODE => None,
        code => Some(
            PieceKind::from_index((code - 1) as usize)
                .ok_or(MalformedMove::InvalidPromotionCode(code))?,
        ),
    };

    Ok(Move {
        from,
        to,
        promotion,
    })
}
