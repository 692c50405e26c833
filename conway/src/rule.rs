// rule.rs - B3/S23 on a torus
//
// Pure reads only. Neighbour coordinates wrap at every edge: index -1 maps to
// len-1 and index len maps to 0.

use crate::grid::Board;

/// The 8 wrapped neighbour positions of `(row, col)`, row by row.
pub fn neighbors(rows: usize, cols: usize, row: usize, col: usize) -> [(usize, usize); 8] {
    let up = if row == 0 { rows - 1 } else { row - 1 };
    let down = if row + 1 == rows { 0 } else { row + 1 };
    let left = if col == 0 { cols - 1 } else { col - 1 };
    let right = if col + 1 == cols { 0 } else { col + 1 };

    #[rustfmt::skip]
    let around = [
        (up, left),   (up, col),   (up, right),
        (row, left),               (row, right),
        (down, left), (down, col), (down, right),
    ];
    around
}

pub fn live_neighbors(board: &Board, row: usize, col: usize) -> u8 {
    neighbors(board.rows(), board.cols(), row, col)
        .iter()
        .filter(|&&(r, c)| board.is_alive(r, c))
        .count() as u8
}

/// State of `(row, col)` in the next round.
pub fn next_state(board: &Board, row: usize, col: usize) -> bool {
    match (board.is_alive(row, col), live_neighbors(board, row, col)) {
        (true, 2) | (_, 3) => true, // Survival or birth
        _ => false,                 // Death or stays dead
    }
}

/// Single-threaded step of the whole board.
pub fn advance(board: &Board) -> Board {
    let mut next = Board::new(board.rows(), board.cols());
    for row in 0..board.rows() {
        for col in 0..board.cols() {
            if next_state(board, row, col) {
                next.set(row, col, true);
            }
        }
    }
    next
}

/// `rounds` single-threaded steps.
pub fn advance_by(board: &Board, rounds: usize) -> Board {
    (0..rounds).fold(board.clone(), |b, _| advance(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_wraps_to_all_edges() {
        let mut n = neighbors(5, 5, 0, 0).to_vec();
        n.sort();
        let mut expected = vec![(4, 4), (4, 0), (4, 1), (0, 4), (0, 1), (1, 4), (1, 0), (1, 1)];
        expected.sort();
        assert_eq!(n, expected);
    }

    #[test]
    fn far_corner_wraps_to_origin() {
        let n = neighbors(5, 5, 4, 4);
        assert!(n.contains(&(0, 0)));
        assert!(n.contains(&(3, 3)));
        assert!(n.contains(&(0, 3)));
        assert!(n.contains(&(3, 0)));
    }

    #[test]
    fn counts_wrapped_neighbors() {
        let board = Board::with_live_cells(5, 5, [(4, 4), (4, 0), (0, 4)]).unwrap();
        assert_eq!(live_neighbors(&board, 0, 0), 3);
        assert!(next_state(&board, 0, 0));
    }

    #[test]
    fn survival_birth_and_death() {
        // alive with 2 -> alive
        let board = Board::with_live_cells(5, 5, [(2, 2), (1, 2), (3, 2)]).unwrap();
        assert!(next_state(&board, 2, 2));
        // dead with 2 -> dead
        assert!(!next_state(&board, 1, 1));
        // dead with 0 -> dead
        assert!(!next_state(&board, 2, 0));
        // alive with 1 -> dead
        assert!(!next_state(&board, 1, 2));
        // dead with 3 -> alive
        assert!(next_state(&board, 2, 1));

        // alive with 4 -> dead
        let crowded = Board::with_live_cells(5, 5, [(2, 2), (1, 1), (1, 3), (3, 1), (3, 3)]).unwrap();
        assert!(!next_state(&crowded, 2, 2));
    }

    #[test]
    fn reference_step_keeps_counter_exact() {
        let board = Board::with_live_cells(6, 6, [(0, 0), (0, 1), (1, 0), (5, 5), (2, 3)]).unwrap();
        let next = advance_by(&board, 3);
        assert_eq!(next.live_count(), next.count_live());
    }
}
