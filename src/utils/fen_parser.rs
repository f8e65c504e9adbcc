//! FEN-to-position parser.
//!
//! Builds a [`Position`] plus move clocks from a Forsyth-Edwards Notation
//! string. Used to set up arbitrary games and test positions.

use crate::errors::NotationError;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_square;

/// A parsed FEN record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenSetup {
    pub position: Position,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

pub fn parse_fen(fen: &str) -> Result<FenSetup, NotationError> {
    let invalid = |what: &str| NotationError::InvalidFen(format!("{what}: {fen}"));
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| invalid("missing halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| invalid("missing fullmove number"))?;

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let board = parse_board(board_part).map_err(|what| invalid(&what))?;
    let side_to_move = match side_part {
        "w" => Side::White,
        "b" => Side::Black,
        _ => return Err(invalid("invalid side to move")),
    };
    let castling = parse_castling_rights(castling_part).ok_or_else(|| invalid("invalid castling rights"))?;
    let en_passant = match en_passant_part {
        "-" => None,
        square => Some(algebraic_to_square(square)?),
    };
    let halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid("invalid halfmove clock"))?;
    let fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| invalid("invalid fullmove number"))?
        .max(1);

    Ok(FenSetup {
        position: Position {
            board,
            side_to_move,
            rights: Rights::new(castling, en_passant),
        },
        halfmove_clock,
        fullmove_number,
    })
}

fn parse_board(board_part: &str) -> Result<Board, String> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err("board layout must contain 8 ranks".to_owned());
    }

    let mut board = Board::empty();
    let mut kings = [0usize; 2];

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(format!("invalid empty-square count '{ch}'"));
                }
                file = file
                    .checked_add(empty_count as u8)
                    .filter(|&f| f <= 8)
                    .ok_or("board rank has too many files")?;
                continue;
            }

            let kind = PieceKind::from_letter(ch)
                .ok_or_else(|| format!("invalid piece character '{ch}'"))?;
            let side = if ch.is_ascii_uppercase() {
                Side::White
            } else {
                Side::Black
            };

            let square = Square::new(file, board_rank).ok_or("board rank has too many files")?;
            if kind == PieceKind::King {
                kings[side.index()] += 1;
                if kings[side.index()] > 1 {
                    return Err(format!("more than one {side} king"));
                }
            }
            board.set(square, Some(Piece::new(kind, side)));
            file += 1;
        }

        if file != 8 {
            return Err("board rank does not sum to 8 files".to_owned());
        }
    }

    Ok(board)
}

fn parse_castling_rights(castling_part: &str) -> Option<CastlingRights> {
    if castling_part == "-" {
        return Some(0);
    }

    castling_part.chars().try_fold(0, |rights, ch| {
        let right = match ch {
            'K' => CASTLE_WHITE_KINGSIDE,
            'Q' => CASTLE_WHITE_QUEENSIDE,
            'k' => CASTLE_BLACK_KINGSIDE,
            'q' => CASTLE_BLACK_QUEENSIDE,
            _ => return None,
        };
        Some(rights | right)
    })
}
