//! Canonical chess-rule constants and the tunable draw rules.
//!
//! Static rule literals used to initialize game state, plus [`RuleConfig`],
//! whose defaults are the standard FIDE thresholds.

use serde::{Deserialize, Deserializer, Serialize};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Occurrences of one position that end the game in a draw.
pub const REPETITION_LIMIT: usize = 3;

/// Smallest accepted repetition limit. Below it the current position alone
/// would already count as a repetition.
pub const MIN_REPETITION_LIMIT: usize = 2;

/// Plies without a capture or pawn move (fifty full moves) that end the game.
pub const FIFTY_MOVE_PLIES: u16 = 100;

/// Automatic draw rules applied after every move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Occurrences of the same position (placement, rights, side to move)
    /// that draw the game. Must be at least [`MIN_REPETITION_LIMIT`];
    /// deserialization rejects smaller values.
    #[serde(deserialize_with = "deserialize_repetition_limit")]
    pub repetition_limit: usize,
    /// Plies without a capture or pawn move that draw the game.
    pub fifty_move_plies: u16,
    /// Draw immediately when neither side has mating material.
    pub insufficient_material_draw: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            repetition_limit: REPETITION_LIMIT,
            fifty_move_plies: FIFTY_MOVE_PLIES,
            insufficient_material_draw: true,
        }
    }
}

fn deserialize_repetition_limit<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let limit = usize::deserialize(deserializer)?;
    if limit < MIN_REPETITION_LIMIT {
        return Err(serde::de::Error::custom(format!(
            "repetition_limit must be at least {MIN_REPETITION_LIMIT}, got {limit}"
        )));
    }
    Ok(limit)
}
