//! Position-to-FEN generation.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

pub fn generate_fen(position: &Position, halfmove_clock: u16, fullmove_number: u16) -> String {
    let side_to_move = match position.side_to_move {
        Side::White => "w",
        Side::Black => "b",
    };
    let en_passant = position
        .rights
        .en_passant
        .map_or_else(|| "-".to_owned(), |sq| sq.to_string());

    format!(
        "{} {} {} {} {} {}",
        generate_board_field(&position.board),
        side_to_move,
        generate_castling_field(position.rights.castling),
        en_passant,
        halfmove_clock,
        fullmove_number
    )
}

fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            let occupant = Square::new(file, rank).and_then(|sq| board.get(sq));
            if let Some(piece) = occupant {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece_to_fen_char(piece));
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn piece_to_fen_char(piece: Piece) -> char {
    let letter = piece.kind.letter();
    match piece.side {
        Side::White => letter.to_ascii_uppercase(),
        Side::Black => letter,
    }
}

fn generate_castling_field(castling: CastlingRights) -> String {
    let field: String = [
        (CASTLE_WHITE_KINGSIDE, 'K'),
        (CASTLE_WHITE_QUEENSIDE, 'Q'),
        (CASTLE_BLACK_KINGSIDE, 'k'),
        (CASTLE_BLACK_QUEENSIDE, 'q'),
    ]
    .into_iter()
    .filter(|(right, _)| castling & right != 0)
    .map(|(_, ch)| ch)
    .collect();

    if field.is_empty() {
        "-".to_owned()
    } else {
        field
    }
}

#[cfg(test)]
mod tests {
    use super::generate_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn regenerates_parsed_fens() {
        for fen in [
            STARTING_POSITION_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 b - - 12 40",
        ] {
            let setup = parse_fen(fen).expect("FEN should parse");
            assert_eq!(
                generate_fen(&setup.position, setup.halfmove_clock, setup.fullmove_number),
                fen
            );
        }
    }
}
