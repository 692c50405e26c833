// patterns.rs - Named starting shapes and a pseudo-random fill
//
// Shapes are offsets from their top-left corner; `stamp` places one anywhere
// on the board, wrapping at the edges.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::grid::Board;

pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
    /// Rounds until the shape repeats (1 for still lifes)
    pub period: usize,
}

pub const BLOCK: Pattern = Pattern {
    name: "Block",
    cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
    period: 1,
};

pub const BLINKER: Pattern = Pattern {
    name: "Blinker",
    cells: &[(0, 0), (0, 1), (0, 2)],
    period: 2,
};

pub const TOAD: Pattern = Pattern {
    name: "Toad",
    cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    period: 2,
};

pub const BEACON: Pattern = Pattern {
    name: "Beacon",
    cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    period: 2,
};

/// Moves one row down and one column right every 4 rounds.
pub const GLIDER: Pattern = Pattern {
    name: "Glider",
    cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    period: 4,
};

pub const R_PENTOMINO: Pattern = Pattern {
    name: "R-pentomino",
    cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    period: 0, // never repeats on an open board
};

impl Pattern {
    /// Absolute cells of this shape with its corner at `origin`, wrapped.
    pub fn cells_at(&self, rows: usize, cols: usize, origin: (usize, usize)) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .map(|&(r, c)| ((origin.0 + r) % rows, (origin.1 + c) % cols))
            .collect()
    }

    /// Turn this shape's cells on, leaving the rest of the board alone.
    pub fn stamp(&self, board: &mut Board, origin: (usize, usize)) {
        for (row, col) in self.cells_at(board.rows(), board.cols(), origin) {
            board.set(row, col, true);
        }
    }
}

/// A board with about a third of its cells alive, the same for the same seed.
pub fn random_board(rows: usize, cols: usize, seed_value: u64) -> Board {
    let mut board = Board::new(rows, cols);

    let mut hasher = DefaultHasher::new();
    seed_value.hash(&mut hasher);
    let mut seed = hasher.finish();

    for row in 0..rows {
        for col in 0..cols {
            seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
            if (seed >> 16) % 3 == 0 {
                board.set(row, col, true);
            }
        }
    }
    board
}
