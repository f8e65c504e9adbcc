//! Precomputed attack tables for the non-sliding pieces.
//!
//! Knight, king, and pawn-capture targets depend only on the origin square,
//! so they are built once at compile time from fixed `(file, rank)` offsets.

use crate::game_state::chess_types::{Side, Square};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const WHITE_PAWN_CAPTURE_OFFSETS: [(i32, i32); 2] = [(-1, 1), (1, 1)];
const BLACK_PAWN_CAPTURE_OFFSETS: [(i32, i32); 2] = [(-1, -1), (1, -1)];

pub const KNIGHT_ATTACKS: [u64; 64] = build_table(&KNIGHT_OFFSETS);
pub const KING_ATTACKS: [u64; 64] = build_table(&KING_OFFSETS);
pub const WHITE_PAWN_ATTACKS: [u64; 64] = build_table(&WHITE_PAWN_CAPTURE_OFFSETS);
pub const BLACK_PAWN_ATTACKS: [u64; 64] = build_table(&BLACK_PAWN_CAPTURE_OFFSETS);

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square.index() as usize]
}

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square.index() as usize]
}

/// Squares a pawn of `side` standing on `square` attacks diagonally.
#[inline]
pub const fn pawn_attacks(side: Side, square: Square) -> u64 {
    match side {
        Side::White => WHITE_PAWN_ATTACKS[square.index() as usize],
        Side::Black => BLACK_PAWN_ATTACKS[square.index() as usize],
    }
}

const fn build_table(offsets: &[(i32, i32)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut i = 0usize;

        while i < offsets.len() {
            attacks |= set_if_valid(file + offsets[i].0, rank + offsets[i].1);
            i += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn set_if_valid(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }

    1u64 << (rank * 8 + file)
}

#[cfg(test)]
mod tests {
    use super::{king_attacks, knight_attacks, pawn_attacks};
    use crate::game_state::chess_types::{Side, Square};

    fn sq(index: u8) -> Square {
        Square::from_index(index).expect("index should be on the board")
    }

    #[test]
    fn knight_attacks_from_d4_has_eight_targets() {
        assert_eq!(knight_attacks(sq(27)).count_ones(), 8);
        assert_eq!(knight_attacks(sq(0)).count_ones(), 2);
    }

    #[test]
    fn king_attacks_from_a1_has_three_targets() {
        assert_eq!(king_attacks(sq(0)).count_ones(), 3);
        assert_eq!(king_attacks(sq(27)).count_ones(), 8);
    }

    #[test]
    fn pawn_attacks_point_toward_the_enemy() {
        assert_eq!(pawn_attacks(Side::White, sq(12)), (1u64 << 19) | (1u64 << 21));
        assert_eq!(pawn_attacks(Side::Black, sq(52)), (1u64 << 43) | (1u64 << 45));
        assert_eq!(pawn_attacks(Side::White, sq(8)), 1u64 << 17);
        assert_eq!(pawn_attacks(Side::White, sq(60)), 0);
    }
}
