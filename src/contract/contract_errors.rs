//! Caller-visible error taxonomy of the contract interface.
//!
//! Game-level rejections pass through unchanged inside [`ContractError::Game`]
//! so a client can still match on the exact [`IllegalMoveReason`].
//!
//! [`IllegalMoveReason`]: crate::errors::IllegalMoveReason

use thiserror::Error;

use crate::errors::{GameError, MalformedBoard, MalformedMove, NotationError};
use crate::game_state::chess_types::Side;

#[derive(Debug, Error)]
pub enum ContractError {
    /// The certificate did not verify, or the verified caller may not read.
    #[error("caller is not authorized for this query")]
    Unauthorized,
    #[error("the {0} seat is already taken")]
    SeatTaken(Side),
    #[error("no player holds the {0} seat")]
    SeatVacant(Side),
    #[error(transparent)]
    Game(#[from] GameError),
    /// Persisted board bytes are corrupt.
    #[error("stored board is corrupt: {0}")]
    MalformedBoard(#[from] MalformedBoard),
    #[error("stored move is corrupt: {0}")]
    MalformedMove(#[from] MalformedMove),
    #[error(transparent)]
    Notation(#[from] NotationError),
    /// Call payload was not valid JSON for any known call.
    #[error("invalid call payload: {0}")]
    InvalidCall(#[from] serde_json::Error),
    /// Persisted record is unreadable or inconsistent with its own history.
    #[error("stored state is inconsistent: {0}")]
    Storage(String),
}
