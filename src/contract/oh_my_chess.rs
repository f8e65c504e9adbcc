//! The OhMyChess contract: one game, two seats, and an admin.
//!
//! Queries take a [`Certificate`] and never mutate. Commands take the
//! [`TransactionContext`] of a signed transaction and mutate only through
//! the game state machine, so a rejected command leaves the contract as it
//! was. The host serializes commands per instance; nothing here locks.

use serde::{Deserialize, Serialize};

use crate::contract::authorization::{AccountId, Certificate, CertificateVerifier, TransactionContext};
use crate::contract::contract_config::{ContractConfig, ReadPolicy};
use crate::contract::contract_errors::ContractError;
use crate::errors::GameError;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::{GameState, GameStateSnapshot, GameStatus, Origin};
use crate::moves::move_descriptions::{decode_move, encode_move};
use crate::utils::fen_parser::parse_fen;
use crate::utils::pgn::write_pgn;

/// Which account plays each side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seats {
    pub white: Option<AccountId>,
    pub black: Option<AccountId>,
}

impl Seats {
    #[inline]
    pub fn get(&self, side: Side) -> Option<AccountId> {
        match side {
            Side::White => self.white,
            Side::Black => self.black,
        }
    }

    fn get_mut(&mut self, side: Side) -> &mut Option<AccountId> {
        match side {
            Side::White => &mut self.white,
            Side::Black => &mut self.black,
        }
    }

    pub fn holds(&self, account: AccountId) -> bool {
        self.white == Some(account) || self.black == Some(account)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OhMyChess {
    admin: AccountId,
    seats: Seats,
    config: ContractConfig,
    game: GameState,
}

/// Persisted form. The board is stored alongside the history so a load can
/// detect a record whose history no longer reproduces it.
#[derive(Debug, Serialize, Deserialize)]
struct StoredGame {
    admin: AccountId,
    seats: Seats,
    config: ContractConfig,
    origin_fen: String,
    board: Vec<u8>,
    history: Vec<Vec<u8>>,
    status: GameStatus,
}

impl OhMyChess {
    /// Standard starting position, no seats taken, the caller as admin.
    pub fn default(ctx: &TransactionContext) -> Self {
        Self::with_config(ctx, ContractConfig::default())
    }

    pub fn with_config(ctx: &TransactionContext, config: ContractConfig) -> Self {
        log::info!("instantiate admin={} read_policy={:?}", ctx.caller, config.read_policy);
        Self {
            admin: ctx.caller,
            seats: Seats::default(),
            config,
            game: GameState::with_rules(config.rules),
        }
    }

    pub fn with_players(ctx: &TransactionContext, white: AccountId, black: AccountId) -> Self {
        let mut contract = Self::default(ctx);
        contract.seats = Seats {
            white: Some(white),
            black: Some(black),
        };
        contract
    }

    #[inline]
    pub fn admin(&self) -> AccountId {
        self.admin
    }

    #[inline]
    pub fn seats(&self) -> Seats {
        self.seats
    }

    #[inline]
    pub fn config(&self) -> ContractConfig {
        self.config
    }

    #[inline]
    pub fn game(&self) -> &GameState {
        &self.game
    }

    // ---- queries ----

    pub fn get_state(
        &self,
        verifier: &dyn CertificateVerifier,
        certificate: &Certificate,
    ) -> Result<GameStateSnapshot, ContractError> {
        self.authorize_read(verifier, certificate)?;
        Ok(self.game.view())
    }

    pub fn legal_moves(
        &self,
        verifier: &dyn CertificateVerifier,
        certificate: &Certificate,
    ) -> Result<Vec<Move>, ContractError> {
        self.authorize_read(verifier, certificate)?;
        Ok(self.game.legal_moves())
    }

    pub fn history(
        &self,
        verifier: &dyn CertificateVerifier,
        certificate: &Certificate,
    ) -> Result<Vec<Move>, ContractError> {
        self.authorize_read(verifier, certificate)?;
        Ok(self.game.history().to_vec())
    }

    pub fn pgn(
        &self,
        verifier: &dyn CertificateVerifier,
        certificate: &Certificate,
    ) -> Result<String, ContractError> {
        self.authorize_read(verifier, certificate)?;
        let name = |side| self.seats.get(side).map_or_else(|| "?".to_owned(), |id| id.to_string());
        Ok(write_pgn(&self.game, &name(Side::White), &name(Side::Black)))
    }

    // ---- commands ----

    /// Seat the caller on `side`.
    pub fn join(&mut self, ctx: &TransactionContext, side: Side) -> Result<Seats, ContractError> {
        if self.game.status().is_terminal() {
            return Err(GameError::GameOver.into());
        }
        let seat = self.seats.get_mut(side);
        if seat.is_some() {
            log::warn!("join rejected caller={} side={side} reason=seat_taken", ctx.caller);
            return Err(ContractError::SeatTaken(side));
        }
        *seat = Some(ctx.caller);
        log::info!("join caller={} side={side}", ctx.caller);
        Ok(self.seats)
    }

    pub fn make_move(
        &mut self,
        ctx: &TransactionContext,
        side: Side,
        mv: Move,
    ) -> Result<GameStateSnapshot, ContractError> {
        self.authorize_seat(ctx, side)?;
        match self.game.apply_move(mv, side) {
            Ok(snapshot) => {
                log::info!("move side={side} mv={mv} status={:?}", snapshot.status);
                Ok(snapshot)
            }
            Err(err) => {
                log::debug!("move rejected side={side} mv={mv} reason={err}");
                Err(err.into())
            }
        }
    }

    pub fn resign(
        &mut self,
        ctx: &TransactionContext,
        side: Side,
    ) -> Result<GameStateSnapshot, ContractError> {
        self.authorize_seat(ctx, side)?;
        Ok(self.game.resign(side)?)
    }

    // ---- persistence ----

    pub fn to_storage(&self) -> Result<Vec<u8>, ContractError> {
        let record = StoredGame {
            admin: self.admin,
            seats: self.seats,
            config: self.config,
            origin_fen: self.game.origin_fen(),
            board: self.game.board().encode().to_vec(),
            history: self
                .game
                .history()
                .iter()
                .map(|mv| encode_move(*mv).to_vec())
                .collect(),
            status: self.game.status(),
        };
        serde_json::to_vec(&record).map_err(|err| ContractError::Storage(err.to_string()))
    }

    /// Load a persisted contract. The board bytes are validated, the history
    /// is replayed from the origin, and both must agree with the stored
    /// board and status.
    pub fn from_storage(bytes: &[u8]) -> Result<Self, ContractError> {
        let record: StoredGame =
            serde_json::from_slice(bytes).map_err(|err| ContractError::Storage(err.to_string()))?;

        let board = Board::decode(&record.board)?;
        let setup = parse_fen(&record.origin_fen)?;
        let history = record
            .history
            .iter()
            .map(|bytes| decode_move(bytes))
            .collect::<Result<Vec<_>, _>>()?;

        let origin = Origin {
            position: setup.position,
            halfmove_clock: setup.halfmove_clock,
            move_number: setup.fullmove_number,
        };
        let mut game = GameState::replay(origin, &history, record.config.rules)?;

        if *game.board() != board {
            log::warn!("storage rejected reason=board_mismatch plies={}", history.len());
            return Err(ContractError::Storage(
                "board does not match the replayed history".to_owned(),
            ));
        }

        // Resignation is the only outcome that replay cannot rederive.
        if let (GameStatus::Resigned(winner), GameStatus::InProgress) = (record.status, game.status()) {
            game.resign(winner.opposite())?;
        }
        if game.status() != record.status {
            log::warn!(
                "storage rejected reason=status_mismatch stored={:?} replayed={:?}",
                record.status,
                game.status()
            );
            return Err(ContractError::Storage(format!(
                "stored status {:?} does not match replayed status {:?}",
                record.status,
                game.status()
            )));
        }

        Ok(Self {
            admin: record.admin,
            seats: record.seats,
            config: record.config,
            game,
        })
    }

    fn authorize_read(
        &self,
        verifier: &dyn CertificateVerifier,
        certificate: &Certificate,
    ) -> Result<AccountId, ContractError> {
        let Some(caller) = verifier.verify(certificate) else {
            log::warn!("query rejected reason=certificate_not_verified");
            return Err(ContractError::Unauthorized);
        };

        let permitted = match self.config.read_policy {
            ReadPolicy::Public => true,
            ReadPolicy::PlayersOnly => caller == self.admin || self.seats.holds(caller),
        };
        if !permitted {
            log::warn!("query rejected caller={caller} reason=read_policy");
            return Err(ContractError::Unauthorized);
        }

        log::debug!("query authorized caller={caller}");
        Ok(caller)
    }

    fn authorize_seat(&self, ctx: &TransactionContext, side: Side) -> Result<(), ContractError> {
        match self.seats.get(side) {
            None => Err(ContractError::SeatVacant(side)),
            Some(owner) if owner == ctx.caller => Ok(()),
            Some(_) => {
                log::warn!("command rejected caller={} side={side} reason=not_seat_owner", ctx.caller);
                Err(GameError::Unauthorized.into())
            }
        }
    }
}
