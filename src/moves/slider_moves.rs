//! Occupancy-aware ray attacks for bishops, rooks, and queens.
//!
//! A ray includes the first occupied square it meets (whatever its colour)
//! and stops there; callers mask off friendly pieces themselves.

use crate::game_state::chess_types::Square;

const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    trace_rays(square, &ROOK_DIRECTIONS, occupancy)
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    trace_rays(square, &BISHOP_DIRECTIONS, occupancy)
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    rook_attacks(square, occupancy) | bishop_attacks(square, occupancy)
}

/// Squares strictly between `a` and `b` when they share a rank, file, or
/// diagonal; empty otherwise.
pub fn squares_between(a: Square, b: Square) -> u64 {
    let df = b.file() as i32 - a.file() as i32;
    let dr = b.rank() as i32 - a.rank() as i32;
    let aligned = (df == 0) != (dr == 0) || (df != 0 && df.abs() == dr.abs());
    if !aligned {
        return 0;
    }

    let (step_f, step_r) = (df.signum(), dr.signum());
    let mut file = a.file() as i32 + step_f;
    let mut rank = a.rank() as i32 + step_r;
    let mut between = 0u64;
    while file != b.file() as i32 || rank != b.rank() as i32 {
        between |= 1u64 << (rank * 8 + file);
        file += step_f;
        rank += step_r;
    }

    between
}

fn trace_rays(square: Square, directions: &[(i32, i32)], occupancy: u64) -> u64 {
    let mut attacks = 0u64;

    for &(file_step, rank_step) in directions {
        let mut file = square.file() as i32 + file_step;
        let mut rank = square.rank() as i32 + rank_step;

        while (0..8).contains(&file) && (0..8).contains(&rank) {
            let bit = 1u64 << (rank * 8 + file);
            attacks |= bit;

            if (occupancy & bit) != 0 {
                break;
            }

            file += file_step;
            rank += rank_step;
        }
    }

    attacks
}

#[cfg(test)]
mod tests {
    use super::{bishop_attacks, queen_attacks, rook_attacks, squares_between};
    use crate::game_state::chess_types::Square;

    fn sq(index: u8) -> Square {
        Square::from_index(index).expect("index should be on the board")
    }

    #[test]
    fn open_board_ray_counts_from_d4() {
        assert_eq!(rook_attacks(sq(27), 0).count_ones(), 14);
        assert_eq!(bishop_attacks(sq(27), 0).count_ones(), 13);
        assert_eq!(queen_attacks(sq(27), 0).count_ones(), 27);
    }

    #[test]
    fn rook_blocker_stops_ray() {
        let blocker_on_a4 = 1u64 << 24;
        let attacks = rook_attacks(sq(0), blocker_on_a4);

        assert_ne!(attacks & (1u64 << 24), 0);
        assert_eq!(attacks & (1u64 << 32), 0);
    }

    #[test]
    fn bishop_blocker_stops_ray() {
        let blocker_on_e3 = 1u64 << 20;
        let attacks = bishop_attacks(sq(2), blocker_on_e3);

        assert_ne!(attacks & (1u64 << 20), 0);
        assert_eq!(attacks & (1u64 << 29), 0);
    }

    #[test]
    fn between_covers_lines_and_ignores_unaligned_pairs() {
        // e1..h1
        assert_eq!(squares_between(sq(4), sq(7)), (1u64 << 5) | (1u64 << 6));
        // a1..d4 diagonal
        assert_eq!(squares_between(sq(0), sq(27)), (1u64 << 9) | (1u64 << 18));
        // knight-shaped pair
        assert_eq!(squares_between(sq(0), sq(17)), 0);
        assert_eq!(squares_between(sq(0), sq(1)), 0);
    }
}
