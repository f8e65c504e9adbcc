//! Errors used throughout the game core.
//!
//! Each layer has its own error type so callers can match on exactly the
//! failures that layer can produce:
//! - [`IllegalMoveReason`] is produced by the rules engine and is surfaced
//!   verbatim to the player who proposed the move.
//! - [`GameError`] is produced by the game state machine. Every variant means
//!   the call was rejected and the game state is exactly as before.
//! - [`MalformedBoard`] and [`MalformedMove`] come from the byte codecs. On
//!   persisted state they indicate corruption and are not recoverable.
//! - [`NotationError`] covers algebraic, long algebraic, and FEN text.

use thiserror::Error;

use crate::game_state::chess_types::Side;

/// Why the rules engine rejected a proposed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMoveReason {
    /// The source square is empty or holds an opponent's piece.
    #[error("the source square does not hold a piece of the side to move")]
    NotYourPiece,
    /// The piece cannot reach the destination (wrong shape, blocked path,
    /// or castling/en-passant conditions not met).
    #[error("the piece cannot move to the destination square")]
    GeometryViolation,
    /// The destination holds a piece of the moving side.
    #[error("the destination square holds a friendly piece")]
    FriendlyCapture,
    /// The move would leave the mover's own king attacked.
    #[error("the move would leave the mover's king in check")]
    SelfCheck,
    /// Missing promotion on the last rank, an invalid promotion kind, or a
    /// promotion requested for a move that does not promote.
    #[error("missing or invalid promotion piece")]
    InvalidPromotion,
}

/// Failure of a game state machine operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("it is not {0}'s turn")]
    WrongTurn(Side),
    #[error("the game is already over")]
    GameOver,
    #[error("caller is not permitted to perform this operation")]
    Unauthorized,
    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalMoveReason),
    /// Replaying the recorded history did not reproduce a legal game.
    #[error("recorded history is corrupt at ply {ply}: {reason}")]
    CorruptHistory { ply: usize, reason: IllegalMoveReason },
}

/// A board byte sequence that does not describe a valid board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedBoard {
    #[error("board encoding must be 64 bytes, got {0}")]
    WrongLength(usize),
    #[error("invalid occupant code {code} at square index {index}")]
    InvalidCode { index: usize, code: u8 },
    #[error("board holds more than one {0} king")]
    DuplicateKing(Side),
}

/// A move byte sequence that does not describe a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedMove {
    #[error("move encoding must be 3 bytes, got {0}")]
    WrongLength(usize),
    #[error("square index {0} is off the board")]
    SquareOutOfRange(u8),
    #[error("invalid promotion code {0}")]
    InvalidPromotionCode(u8),
}

/// Text notation that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("invalid algebraic square: {0}")]
    InvalidSquare(String),
    #[error("invalid long algebraic move: {0}")]
    InvalidMove(String),
    #[error("invalid FEN: {0}")]
    InvalidFen(String),
}
