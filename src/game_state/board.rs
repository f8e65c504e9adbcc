//! Board storage and its fixed-width byte encoding.
//!
//! The board is a plain 64-entry mailbox. It carries no rule logic: move
//! legality lives in `move_generation`, which asks the board for occupancy
//! bitboards through [`Board::masks`] and feeds them to the attack tables.

use crate::errors::MalformedBoard;
use crate::game_state::chess_types::*;

/// Number of bytes in an encoded board.
pub const BOARD_ENCODED_LEN: usize = 64;

/// Code for an empty square. Pieces use `1..=6` for white and `7..=12` for
/// black, in [`PieceKind::index`] order.
pub const EMPTY_CODE: u8 = 0;
const BLACK_CODE_BASE: u8 = 7;
const MAX_CODE: u8 = 12;

/// One byte per square, `0 == a1` through `63 == h8`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Occupant; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

/// Occupancy bitboards derived from a board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardMasks {
    /// `[side][piece_kind]`
    pub pieces: [[u64; 6]; 2],
    pub by_side: [u64; 2],
    pub all: u64,
}

impl BoardMasks {
    #[inline]
    pub const fn of(&self, side: Side, kind: PieceKind) -> u64 {
        self.pieces[side.index()][kind.index()]
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            squares: [None; 64],
        }
    }

    /// Standard starting position.
    pub fn starting_position() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Self::empty();
        for side in [Side::White, Side::Black] {
            for (file, kind) in (0u8..).zip(BACK_RANK) {
                if let Some(sq) = Square::new(file, side.home_rank()) {
                    board.set(sq, Some(Piece::new(kind, side)));
                }
                if let Some(sq) = Square::new(file, side.pawn_start_rank()) {
                    board.set(sq, Some(Piece::new(PieceKind::Pawn, side)));
                }
            }
        }
        board
    }

    #[inline]
    pub fn get(&self, square: Square) -> Occupant {
        self.squares[square.index() as usize]
    }

    #[inline]
    pub fn set(&mut self, square: Square, occupant: Occupant) {
        self.squares[square.index() as usize] = occupant;
    }

    /// Every occupied square with its piece, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|piece| (sq, piece)))
    }

    pub fn masks(&self) -> BoardMasks {
        let mut masks = BoardMasks::default();
        for (sq, piece) in self.pieces() {
            masks.pieces[piece.side.index()][piece.kind.index()] |= sq.mask();
            masks.by_side[piece.side.index()] |= sq.mask();
        }
        masks.all = masks.by_side[0] | masks.by_side[1];
        masks
    }

    pub fn king_square(&self, side: Side) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.side == side && piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    pub fn encode(&self) -> [u8; BOARD_ENCODED_LEN] {
        let mut out = [EMPTY_CODE; BOARD_ENCODED_LEN];
        for (slot, occupant) in out.iter_mut().zip(self.squares.iter()) {
            *slot = occupant_to_code(*occupant);
        }
        out
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, MalformedBoard> {
        if bytes.len() != BOARD_ENCODED_LEN {
            return Err(MalformedBoard::WrongLength(bytes.len()));
        }

        let mut board = Self::empty();
        let mut kings = [0usize; 2];
        for (index, &code) in bytes.iter().enumerate() {
            let occupant =
                code_to_occupant(code).ok_or(MalformedBoard::InvalidCode { index, code })?;
            if let Some(piece) = occupant {
                if piece.kind == PieceKind::King {
                    kings[piece.side.index()] += 1;
                    if kings[piece.side.index()] > 1 {
                        return Err(MalformedBoard::DuplicateKing(piece.side));
                    }
                }
            }
            board.squares[index] = occupant;
        }

        Ok(board)
    }
}

#[inline]
pub fn occupant_to_code(occupant: Occupant) -> u8 {
    match occupant {
        None => EMPTY_CODE,
        Some(piece) => {
            let base = match piece.side {
                Side::White => 1,
                Side::Black => BLACK_CODE_BASE,
            };
            base + piece.kind.index() as u8
        }
    }
}

/// `None` when the code is out of range; `Some(None)` for an empty square.
#[inline]
pub fn code_to_occupant(code: u8) -> Option<Occupant> {
    match code {
        EMPTY_CODE => Some(None),
        1..=6 => PieceKind::from_index((code - 1) as usize).map(|kind| Some(Piece::new(kind, Side::White))),
        BLACK_CODE_BASE..=MAX_CODE => PieceKind::from_index((code - BLACK_CODE_BASE) as usize)
            .map(|kind| Some(Piece::new(kind, Side::Black))),
        _ => None,
    }
}
