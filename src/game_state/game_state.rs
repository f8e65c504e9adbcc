//! The game state machine.
//!
//! `GameState` owns the current position, the move clocks, the status, and
//! the append-only history of applied moves. It is only ever changed by
//! [`GameState::apply_move`] and [`GameState::resign`]; both build the
//! successor state completely before committing it, so a failed call leaves
//! the state exactly as it was.
//!
//! Terminal detection is re-derived from scratch on every move: mate and
//! stalemate by enumerating legal replies, repetition by replaying the
//! history from the origin position. Nothing is cached between calls.

use serde::{Deserialize, Serialize};

use crate::errors::{GameError, NotationError};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::RuleConfig;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::Effect;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{has_legal_move, legal_moves_for};
use crate::move_generation::legal_move_rules::is_legal;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::{parse_fen, FenSetup};

/// Why a game was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawReason {
    Repetition,
    FiftyMove,
    InsufficientMaterial,
}

/// Lifecycle of a game. Everything except `InProgress` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Checkmate(Side),
    Stalemate,
    Draw(DrawReason),
    Resigned(Side),
}

impl GameStatus {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// PGN result token.
    pub const fn result_token(self) -> &'static str {
        match self {
            GameStatus::InProgress => "*",
            GameStatus::Checkmate(Side::White) | GameStatus::Resigned(Side::White) => "1-0",
            GameStatus::Checkmate(Side::Black) | GameStatus::Resigned(Side::Black) => "0-1",
            GameStatus::Stalemate | GameStatus::Draw(_) => "1/2-1/2",
        }
    }
}

/// Read-only projection of a game, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    /// 64 occupant codes, a1 first (see [`Board::encode`]).
    pub board: Vec<u8>,
    pub fen: String,
    pub side_to_move: Side,
    pub status: GameStatus,
    pub move_number: u16,
    pub halfmove_clock: u16,
    pub in_check: bool,
    pub last_move: Option<Move>,
}

impl Position {
    pub fn starting() -> Self {
        Self {
            board: Board::starting_position(),
            side_to_move: Side::White,
            rights: Rights::new(CASTLE_ALL, None),
        }
    }

    /// The position reached by applying `effect` (which must have been
    /// produced for this position).
    pub fn after(&self, effect: &Effect) -> Self {
        let mut board = self.board.clone();
        effect.apply_to(&mut board);
        Self {
            board,
            side_to_move: self.side_to_move.opposite(),
            rights: effect.rights_after,
        }
    }
}

/// Where a game started; history is replayed from here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub position: Position,
    pub halfmove_clock: u16,
    pub move_number: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    origin: Origin,
    position: Position,
    move_number: u16,
    halfmove_clock: u16,
    status: GameStatus,
    history: Vec<Move>,
    rules: RuleConfig,
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_rules(RuleConfig::default())
    }
}

impl GameState {
    /// A fresh game at the standard starting position, White to move.
    #[inline]
    pub fn new_game() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: RuleConfig) -> Self {
        Self::from_origin(
            Origin {
                position: Position::starting(),
                halfmove_clock: 0,
                move_number: 1,
            },
            rules,
        )
    }

    /// Start a game from an arbitrary FEN position. The status is evaluated
    /// immediately, so a FEN that is already mate yields a finished game.
    pub fn from_fen(fen: &str, rules: RuleConfig) -> Result<Self, NotationError> {
        let FenSetup {
            position,
            halfmove_clock,
            fullmove_number,
        } = parse_fen(fen)?;
        let mut game = Self::from_origin(
            Origin {
                position,
                halfmove_clock,
                move_number: fullmove_number,
            },
            rules,
        );
        game.status = game.evaluate_status(&[game.position.clone()]);
        Ok(game)
    }

    fn from_origin(origin: Origin, rules: RuleConfig) -> Self {
        Self {
            position: origin.position.clone(),
            move_number: origin.move_number,
            halfmove_clock: origin.halfmove_clock,
            origin,
            status: GameStatus::InProgress,
            history: Vec::new(),
            rules,
        }
    }

    /// Rebuild a game by replaying `history` from `origin`. Fails with
    /// [`GameError::CorruptHistory`] if any recorded move is not legal in
    /// the position it was recorded for.
    pub fn replay(origin: Origin, history: &[Move], rules: RuleConfig) -> Result<Self, GameError> {
        let mut game = Self::from_origin(origin, rules);
        for (ply, mv) in history.iter().enumerate() {
            let effect = is_legal(
                &game.position.board,
                game.position.side_to_move,
                game.position.rights,
                *mv,
            )
            .map_err(|reason| GameError::CorruptHistory { ply, reason })?;
            game.advance(&effect);
        }
        let positions = game.replay_positions()?;
        game.status = game.evaluate_status(&positions);
        Ok(game)
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.position.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.position.side_to_move
    }

    #[inline]
    pub fn rights(&self) -> Rights {
        self.position.rights
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn move_number(&self) -> u16 {
        self.move_number
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    #[inline]
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    #[inline]
    pub fn rules(&self) -> RuleConfig {
        self.rules
    }

    pub fn fen(&self) -> String {
        generate_fen(&self.position, self.halfmove_clock, self.move_number)
    }

    pub fn origin_fen(&self) -> String {
        generate_fen(
            &self.origin.position,
            self.origin.halfmove_clock,
            self.origin.move_number,
        )
    }

    pub fn in_check(&self) -> bool {
        is_king_in_check(&self.position.board, self.position.side_to_move)
    }

    /// Legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.status.is_terminal() {
            return Vec::new();
        }
        legal_moves_for(&self.position).map(|effect| effect.mv).collect()
    }

    pub fn view(&self) -> GameStateSnapshot {
        GameStateSnapshot {
            board: self.position.board.encode().to_vec(),
            fen: self.fen(),
            side_to_move: self.position.side_to_move,
            status: self.status,
            move_number: self.move_number,
            halfmove_clock: self.halfmove_clock,
            in_check: self.in_check(),
            last_move: self.history.last().copied(),
        }
    }

    pub fn apply_move(&mut self, mv: Move, claimed_side: Side) -> Result<GameStateSnapshot, GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver);
        }
        if claimed_side != self.position.side_to_move {
            return Err(GameError::WrongTurn(claimed_side));
        }

        let effect = is_legal(
            &self.position.board,
            self.position.side_to_move,
            self.position.rights,
            mv,
        )?;

        let mut next = self.clone();
        next.advance(&effect);
        let positions = next.replay_positions()?;
        next.status = next.evaluate_status(&positions);

        if next.status.is_terminal() {
            log::info!(
                "game finished status={:?} move_number={} plies={}",
                next.status,
                next.move_number,
                next.history.len()
            );
        }

        *self = next;
        Ok(self.view())
    }

    pub fn resign(&mut self, side: Side) -> Result<GameStateSnapshot, GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver);
        }
        self.status = GameStatus::Resigned(side.opposite());
        log::info!("game finished status={:?} resigned_by={side}", self.status);
        Ok(self.view())
    }

    /// Every position of the game, origin first, current last.
    pub fn replay_positions(&self) -> Result<Vec<Position>, GameError> {
        let mut positions = Vec::with_capacity(self.history.len() + 1);
        let mut current = self.origin.position.clone();

        for (ply, mv) in self.history.iter().enumerate() {
            let effect = is_legal(&current.board, current.side_to_move, current.rights, *mv)
                .map_err(|reason| GameError::CorruptHistory { ply, reason })?;
            let next = current.after(&effect);
            positions.push(current);
            current = next;
        }
        positions.push(current);

        Ok(positions)
    }

    fn advance(&mut self, effect: &Effect) {
        let mover = self.position.side_to_move;
        self.position = self.position.after(effect);
        self.history.push(effect.mv);
        self.halfmove_clock = if effect.resets_halfmove_clock() {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        if mover == Side::Black {
            self.move_number = self.move_number.saturating_add(1);
        }
    }

    /// Status of the current position given every position of the game.
    fn evaluate_status(&self, positions: &[Position]) -> GameStatus {
        let side = self.position.side_to_move;

        if !has_legal_move(&self.position) {
            return if is_king_in_check(&self.position.board, side) {
                GameStatus::Checkmate(side.opposite())
            } else {
                GameStatus::Stalemate
            };
        }

        let occurrences = positions.iter().filter(|p| **p == self.position).count();
        if occurrences >= self.rules.repetition_limit {
            return GameStatus::Draw(DrawReason::Repetition);
        }

        if self.halfmove_clock >= self.rules.fifty_move_plies {
            return GameStatus::Draw(DrawReason::FiftyMove);
        }

        if self.rules.insufficient_material_draw && is_insufficient_material(&self.position.board) {
            return GameStatus::Draw(DrawReason::InsufficientMaterial);
        }

        GameStatus::InProgress
    }
}

/// Neither side can ever deliver mate: bare kings, a single minor piece, or
/// only bishops that all stand on one square colour.
pub fn is_insufficient_material(board: &Board) -> bool {
    let mut minors = 0usize;
    let mut bishop_colours = [false; 2];
    let mut knights = 0usize;

    for (sq, piece) in board.pieces() {
        match piece.kind {
            PieceKind::King => {}
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            PieceKind::Knight => {
                minors += 1;
                knights += 1;
            }
            PieceKind::Bishop => {
                minors += 1;
                bishop_colours[((sq.file() + sq.rank()) % 2) as usize] = true;
            }
        }
    }

    minors <= 1 || (knights == 0 && !(bishop_colours[0] && bishop_colours[1]))
}
