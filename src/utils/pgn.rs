//! PGN read/write utilities for game history interchange.
//!
//! Movetext is written in long algebraic notation, one token per ply, and
//! the result token is derived from the game status. Reading replays every
//! move through the state machine, so an imported game is fully validated.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::errors::{GameError, NotationError};
use crate::game_state::chess_rules::{RuleConfig, STARTING_POSITION_FEN};
use crate::game_state::chess_types::Side;
use crate::game_state::game_state::{GameState, GameStatus};
use crate::utils::long_algebraic::long_algebraic_to_move;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PgnError {
    #[error("invalid PGN header line: {0}")]
    InvalidHeader(String),
    #[error(transparent)]
    Notation(#[from] NotationError),
    #[error("PGN move {token} rejected: {source}")]
    Rejected { token: String, source: GameError },
}

#[derive(Debug, Clone)]
pub struct PgnGame {
    pub headers: BTreeMap<String, String>,
    pub game: GameState,
    pub result: String,
}

/// Seven-tag-roster headers for `game`, plus `SetUp`/`FEN` when the game did
/// not start from the standard position.
pub fn default_headers(game: &GameState, white: &str, black: &str) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "OhMyChess Game".to_owned());
    headers.insert("Site".to_owned(), "On-chain".to_owned());
    headers.insert("Date".to_owned(), "????.??.??".to_owned());
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), white.to_owned());
    headers.insert("Black".to_owned(), black.to_owned());
    headers.insert("Result".to_owned(), game.status().result_token().to_owned());

    let origin_fen = game.origin_fen();
    if origin_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), origin_fen);
    }

    headers
}

pub fn write_pgn(game: &GameState, white: &str, black: &str) -> String {
    write_pgn_with_headers(game, &default_headers(game, white, black))
}

pub fn write_pgn_with_headers(game: &GameState, headers: &BTreeMap<String, String>) -> String {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let origin = game.origin();
    let mut move_number = origin.move_number;
    let mut side = origin.position.side_to_move;
    let mut movetext_parts = Vec::<String>::with_capacity(game.history().len() + 2);

    if side == Side::Black && !game.history().is_empty() {
        movetext_parts.push(format!("{move_number}..."));
    }
    for mv in game.history() {
        if side == Side::White {
            movetext_parts.push(format!("{move_number}."));
        } else {
            move_number = move_number.saturating_add(1);
        }
        movetext_parts.push(mv.to_string());
        side = side.opposite();
    }

    movetext_parts.push(game.status().result_token().to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    out
}

pub fn read_pgn(pgn: &str, rules: RuleConfig) -> Result<PgnGame, PgnError> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext_lines = Vec::<&str>::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('[') {
            let (k, v) = parse_header_line(trimmed)?;
            headers.insert(k, v);
        } else {
            movetext_lines.push(trimmed);
        }
    }

    let mut game = match headers.get("FEN") {
        Some(fen) if headers.get("SetUp").map(String::as_str) == Some("1") => {
            GameState::from_fen(fen, rules)?
        }
        _ => GameState::with_rules(rules),
    };

    let mut result = "*".to_owned();
    let movetext = strip_pgn_comments_and_variations(&movetext_lines.join(" "));
    for token in movetext.split_whitespace() {
        if is_move_number_token(token) {
            continue;
        }

        let cleaned = trim_annotation_suffix(token);
        if is_result_token(cleaned) {
            result = cleaned.to_owned();
            break;
        }

        let mv = long_algebraic_to_move(cleaned)?;
        let side = game.side_to_move();
        game.apply_move(mv, side).map_err(|source| PgnError::Rejected {
            token: token.to_owned(),
            source,
        })?;
    }

    if let Some(header_result) = headers.get("Result").filter(|r| is_result_token(r)) {
        result = header_result.clone();
    }

    // A decisive result on an unfinished game can only be a resignation.
    if game.status() == GameStatus::InProgress {
        let loser = match result.as_str() {
            "1-0" => Some(Side::Black),
            "0-1" => Some(Side::White),
            _ => None,
        };
        if let Some(loser) = loser {
            game.resign(loser).map_err(|source| PgnError::Rejected {
                token: result.clone(),
                source,
            })?;
        }
    }

    Ok(PgnGame {
        headers,
        game,
        result,
    })
}

fn parse_header_line(line: &str) -> Result<(String, String), PgnError> {
    let invalid = || PgnError::InvalidHeader(line.to_owned());
    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(invalid)?;
    let (key, value_raw) = inner.split_once(' ').ok_or_else(invalid)?;
    let value = value_raw
        .trim()
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(invalid)?;

    Ok((key.trim().to_owned(), value.replace("\\\"", "\"")))
}

fn strip_pgn_comments_and_variations(text: &str) -> String {
    let mut out = String::new();
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => brace_depth = brace_depth.saturating_add(1),
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' => paren_depth = paren_depth.saturating_add(1),
            ')' => paren_depth = paren_depth.saturating_sub(1),
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

fn is_move_number_token(token: &str) -> bool {
    let digits = token.trim_end_matches('.');
    digits.len() < token.len() && !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn trim_annotation_suffix(token: &str) -> &str {
    token.trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'))
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::{read_pgn, write_pgn, PgnError};
    use crate::game_state::chess_rules::RuleConfig;
    use crate::game_state::chess_types::Side;
    use crate::game_state::game_state::{GameState, GameStatus};
    use crate::utils::long_algebraic::long_algebraic_to_move;

    fn play(game: &mut GameState, moves: &[&str]) {
        for lan in moves {
            let side = game.side_to_move();
            let mv = long_algebraic_to_move(lan).expect("LAN should parse");
            game.apply_move(mv, side).expect("move should apply");
        }
    }

    #[test]
    fn writes_numbered_movetext_and_result() {
        let mut game = GameState::new_game();
        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        let pgn = write_pgn(&game, "alice", "bob");
        assert!(pgn.contains("[White \"alice\"]"));
        assert!(pgn.contains("[Result \"0-1\"]"));
        assert!(pgn.ends_with("1. f2f3 e7e5 2. g2g4 d8h4 0-1\n"));
    }

    #[test]
    fn pgn_round_trip_restores_the_game() {
        let mut game = GameState::new_game();
        play(&mut game, &["e2e4", "e7e5", "g1f3", "b8c6"]);

        let parsed = read_pgn(&write_pgn(&game, "White", "Black"), RuleConfig::default())
            .expect("PGN should parse");
        assert_eq!(parsed.game.history(), game.history());
        assert_eq!(parsed.game.fen(), game.fen());
        assert_eq!(parsed.result, "*");
    }

    #[test]
    fn pgn_round_trip_custom_fen_and_resignation() {
        let mut game =
            GameState::from_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 7", RuleConfig::default())
                .expect("FEN should parse");
        play(&mut game, &["e8d7", "e2e4"]);
        game.resign(Side::Black).expect("resign should succeed");

        let pgn = write_pgn(&game, "White", "Black");
        assert!(pgn.contains("[SetUp \"1\"]"));
        assert!(pgn.contains("7... e8d7 8. e2e4 1-0"));

        let parsed = read_pgn(&pgn, RuleConfig::default()).expect("PGN should parse");
        assert_eq!(parsed.game.origin_fen(), game.origin_fen());
        assert_eq!(parsed.game.history(), game.history());
        assert_eq!(parsed.game.status(), GameStatus::Resigned(Side::White));
    }

    #[test]
    fn move_numbers_saturate_at_the_fullmove_limit() {
        let mut game =
            GameState::from_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 65535", RuleConfig::default())
                .expect("FEN should parse");
        play(&mut game, &["e8d7", "e2e4"]);
        let pgn = write_pgn(&game, "White", "Black");
        assert!(pgn.contains("65535... e8d7 65535. e2e4 *"));
    }

    #[test]
    fn illegal_movetext_is_rejected() {
        let pgn = "[Event \"x\"]\n\n1. e2e5 *\n";
        assert!(matches!(
            read_pgn(pgn, RuleConfig::default()),
            Err(PgnError::Rejected { .. })
        ));
    }
}
