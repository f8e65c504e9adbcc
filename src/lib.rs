//! Crate root module declarations for the OhMyChess contract.
//!
//! The board model, rules engine, and game state machine form the game
//! core; `contract` wraps one game behind certificate-gated queries and
//! transaction-gated commands. `utils` holds the notation codecs (FEN,
//! long algebraic, PGN) used by both layers and by the tests.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod moves {
    pub mod move_descriptions;
    pub mod piece_geometry;
    pub mod slider_moves;
    pub mod step_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_rules;
    pub mod perft;
}

pub mod contract {
    pub mod authorization;
    pub mod contract_config;
    pub mod contract_errors;
    pub mod oh_my_chess;
    pub mod wire;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod pgn;
    pub mod render_game_state;
}
