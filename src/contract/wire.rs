//! JSON call surface.
//!
//! A call is a JSON object tagged by `"call"`:
//!
//! ```json
//! {"call": "get_state"}
//! {"call": "move", "side": "White", "move": {"from": "e2", "to": "e4"}}
//! ```
//!
//! Responses are the JSON encoding of [`ContractResponse`].

use serde::{Deserialize, Serialize};

use crate::contract::authorization::{Certificate, CertificateVerifier, TransactionContext};
use crate::contract::contract_errors::ContractError;
use crate::contract::oh_my_chess::{OhMyChess, Seats};
use crate::game_state::chess_types::{Move, Side};
use crate::game_state::game_state::GameStateSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum ContractQuery {
    GetState,
    LegalMoves,
    History,
    Pgn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum ContractCommand {
    Join {
        side: Side,
    },
    Move {
        side: Side,
        #[serde(rename = "move")]
        mv: Move,
    },
    Resign {
        side: Side,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractResponse {
    State(GameStateSnapshot),
    Moves(Vec<Move>),
    Pgn(String),
    Seats(Seats),
}

impl OhMyChess {
    pub fn query(
        &self,
        query: ContractQuery,
        verifier: &dyn CertificateVerifier,
        certificate: &Certificate,
    ) -> Result<ContractResponse, ContractError> {
        Ok(match query {
            ContractQuery::GetState => ContractResponse::State(self.get_state(verifier, certificate)?),
            ContractQuery::LegalMoves => {
                ContractResponse::Moves(self.legal_moves(verifier, certificate)?)
            }
            ContractQuery::History => ContractResponse::Moves(self.history(verifier, certificate)?),
            ContractQuery::Pgn => ContractResponse::Pgn(self.pgn(verifier, certificate)?),
        })
    }

    pub fn execute(
        &mut self,
        command: ContractCommand,
        ctx: &TransactionContext,
    ) -> Result<ContractResponse, ContractError> {
        Ok(match command {
            ContractCommand::Join { side } => ContractResponse::Seats(self.join(ctx, side)?),
            ContractCommand::Move { side, mv } => {
                ContractResponse::State(self.make_move(ctx, side, mv)?)
            }
            ContractCommand::Resign { side } => ContractResponse::State(self.resign(ctx, side)?),
        })
    }

    pub fn dispatch_query(
        &self,
        json: &str,
        verifier: &dyn CertificateVerifier,
        certificate: &Certificate,
    ) -> Result<String, ContractError> {
        let query: ContractQuery = serde_json::from_str(json)?;
        log::debug!("dispatch query={query:?}");
        let response = self.query(query, verifier, certificate)?;
        Ok(serde_json::to_string(&response)?)
    }

    pub fn dispatch_command(
        &mut self,
        json: &str,
        ctx: &TransactionContext,
    ) -> Result<String, ContractError> {
        let command: ContractCommand = serde_json::from_str(json)?;
        log::debug!("dispatch command={command:?} caller={}", ctx.caller);
        let response = self.execute(command, ctx)?;
        Ok(serde_json::to_string(&response)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{ContractCommand, ContractQuery, ContractResponse};
    use crate::contract::contract_errors::ContractError;
    use crate::game_state::chess_types::*;
    use crate::utils::long_algebraic::long_algebraic_to_move;

    #[test]
    fn command_json_shape() {
        let command: ContractCommand = serde_json::from_str(
            r#"{"call":"move","side":"White","move":{"from":"e7","to":"e8","promotion":"Queen"}}"#,
        )
        .expect("command should parse");
        assert_eq!(
            command,
            ContractCommand::Move {
                side: Side::White,
                mv: long_algebraic_to_move("e7e8q").expect("move should parse"),
            }
        );
    }

    #[test]
    fn query_json_shape() {
        let query: ContractQuery =
            serde_json::from_str(r#"{"call":"legal_moves"}"#).expect("query should parse");
        assert_eq!(query, ContractQuery::LegalMoves);
        assert!(serde_json::from_str::<ContractQuery>(r#"{"call":"drop_table"}"#).is_err());
    }

    #[test]
    fn response_is_externally_tagged() {
        let json = serde_json::to_string(&ContractResponse::Pgn("*".to_owned()))
            .expect("response should serialize");
        assert_eq!(json, r#"{"pgn":"*"}"#);
    }

    #[test]
    fn bad_payload_is_an_invalid_call() {
        let err: ContractError = serde_json::from_str::<ContractCommand>("{")
            .map_err(ContractError::from)
            .expect_err("truncated JSON should fail");
        assert!(matches!(err, ContractError::InvalidCall(_)));
    }
}
