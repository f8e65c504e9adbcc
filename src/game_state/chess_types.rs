//! Core value types shared by the board, rules engine, and contract layer.
//!
//! Squares are indexed `0 == a1`, `7 == h1`, `63 == h8`, which keeps the
//! bitboard attack tables in `moves` directly addressable by square index.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::NotationError;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

pub use crate::game_state::board::Board;
pub use crate::game_state::game_state::GameState;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl Side {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Rank a pawn of this side promotes on.
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Side::White => 7,
            Side::Black => 0,
        }
    }

    /// Rank this side's pawns start on.
    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Side::White => 1,
            Side::Black => 6,
        }
    }

    /// Rank the king and rooks start on.
    #[inline]
    pub const fn home_rank(self) -> u8 {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "white"),
            Side::Black => write!(f, "black"),
        }
    }
}

/// Piece kind (side is carried separately in [`Piece`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PieceKind::Pawn),
            1 => Some(PieceKind::Knight),
            2 => Some(PieceKind::Bishop),
            3 => Some(PieceKind::Rook),
            4 => Some(PieceKind::Queen),
            5 => Some(PieceKind::King),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }

    /// Lowercase letter used by FEN and long algebraic notation.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A piece standing on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }
}

/// Contents of one square.
pub type Occupant = Option<Piece>;

/// A board coordinate, guaranteed to lie on the 8x8 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square(u8);

impl Square {
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    #[inline]
    pub const fn mask(self) -> u64 {
        1u64 << self.0
    }

    /// Square displaced by `(d_file, d_rank)`, if still on the board.
    #[inline]
    pub const fn offset(self, d_file: i8, d_rank: i8) -> Option<Self> {
        let file = self.file() as i8 + d_file;
        let rank = self.rank() as i8 + d_rank;
        if file < 0 || file > 7 || rank < 0 || rank > 7 {
            None
        } else {
            Some(Square((rank * 8 + file) as u8))
        }
    }

    /// Iterate every square from a1 to h8.
    pub fn all() -> impl Iterator<Item = Square> + Clone {
        (0u8..64).map(Square)
    }

    /// Iterate the squares set in a bitboard, lowest index first.
    pub fn iter_mask(mut mask: u64) -> impl Iterator<Item = Square> {
        std::iter::from_fn(move || {
            if mask == 0 {
                return None;
            }
            let sq = mask.trailing_zeros() as u8;
            mask &= mask - 1;
            Some(Square(sq))
        })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&square_to_algebraic(*self))
    }
}

impl TryFrom<String> for Square {
    type Error = NotationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        algebraic_to_square(&value)
    }
}

impl From<Square> for String {
    fn from(value: Square) -> Self {
        square_to_algebraic(value)
    }
}

/// Compact castling rights bitmask. A right is lost once the king or the
/// corresponding rook has moved or the rook has been captured on its corner.
pub type CastlingRights = u8;

pub const CASTLE_WHITE_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_WHITE_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_BLACK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_BLACK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights =
    CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE | CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE;

#[inline]
pub const fn kingside_right(side: Side) -> CastlingRights {
    match side {
        Side::White => CASTLE_WHITE_KINGSIDE,
        Side::Black => CASTLE_BLACK_KINGSIDE,
    }
}

#[inline]
pub const fn queenside_right(side: Side) -> CastlingRights {
    match side {
        Side::White => CASTLE_WHITE_QUEENSIDE,
        Side::Black => CASTLE_BLACK_QUEENSIDE,
    }
}

/// Rights derived from history: castling availability and the en-passant
/// target, which is valid for exactly the move after a double pawn push.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rights {
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
}

impl Rights {
    #[inline]
    pub const fn new(castling: CastlingRights, en_passant: Option<Square>) -> Self {
        Self {
            castling,
            en_passant,
        }
    }

    #[inline]
    pub const fn can_castle(self, right: CastlingRights) -> bool {
        self.castling & right != 0
    }
}

/// A proposed move. Nothing about it is validated until it passes through
/// [`crate::move_generation::legal_move_rules::is_legal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    #[serde(default)]
    pub promotion: Option<PieceKind>,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    pub const fn with_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter())?;
        }
        Ok(())
    }
}

/// Everything that identifies a position for rule purposes: placement,
/// side to move, and rights. Two positions compare equal exactly when they
/// count as the same position for repetition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub board: Board,
    pub side_to_move: Side,
    pub rights: Rights,
}

#[cfg(test)]
mod tests {
    use super::{Move, PieceKind, Side, Square};

    #[test]
    fn square_offsets_stay_on_the_board() {
        let a1 = Square::new(0, 0).expect("a1 should exist");
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(1, 2), Square::new(1, 2));
        let h8 = Square::from_index(63).expect("h8 should exist");
        assert_eq!(h8.offset(0, 1), None);
        assert_eq!(Square::from_index(64), None);
        assert_eq!(Square::new(8, 0), None);
    }

    #[test]
    fn iter_mask_yields_ascending_squares() {
        let squares: Vec<u8> = Square::iter_mask(0b1010_0001).map(Square::index).collect();
        assert_eq!(squares, vec![0, 5, 7]);
    }

    #[test]
    fn move_displays_as_long_algebraic() {
        let e7 = Square::new(4, 6).expect("e7 should exist");
        let e8 = Square::new(4, 7).expect("e8 should exist");
        assert_eq!(Move::with_promotion(e7, e8, PieceKind::Queen).to_string(), "e7e8q");
        assert_eq!(Side::White.opposite(), Side::Black);
    }

    #[test]
    fn square_serializes_as_algebraic_text() {
        let e4 = Square::new(4, 3).expect("e4 should exist");
        let json = serde_json::to_string(&e4).expect("square should serialize");
        assert_eq!(json, "\"e4\"");
        let back: Square = serde_json::from_str(&json).expect("square should deserialize");
        assert_eq!(back, e4);
        assert!(serde_json::from_str::<Square>("\"z9\"").is_err());
    }
}
