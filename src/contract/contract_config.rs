//! Instantiation-time configuration for a contract instance.
//!
//! Every field has a default, so an empty JSON object (or no config at all)
//! yields a public-read game under the standard draw rules.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_rules::RuleConfig;

/// Who may run read-only queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadPolicy {
    /// Any caller presenting a certificate that verifies.
    #[default]
    Public,
    /// Only the admin and seated players.
    PlayersOnly,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    pub read_policy: ReadPolicy,
    pub rules: RuleConfig,
}

impl ContractConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
