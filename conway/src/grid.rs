// grid.rs - Board storage and the lock that guards the shared copy
//
// Cells are stored row-major in one contiguous Vec. The board wraps at every
// edge, so there is no border row/column to skip.

use std::fmt;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::error::{LifeError, Result};
use crate::partition::Partition;

/// A `rows x cols` board of alive/dead cells with a maintained live count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
    live: usize,
}

impl Board {
    /// An all-dead board.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
            live: 0,
        }
    }

    /// A board with the given cells alive. Duplicates are counted once.
    pub fn with_live_cells<I>(rows: usize, cols: usize, alive: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut board = Self::new(rows, cols);
        for (row, col) in alive {
            if row >= rows || col >= cols {
                return Err(LifeError::malformed(format!(
                    "cell ({row}, {col}) is outside a {rows}x{cols} board"
                )));
            }
            board.set(row, col, true);
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The maintained live counter.
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Live cells recounted by walking the whole board.
    pub fn count_live(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    #[inline]
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.cells[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        let idx = self.index(row, col);
        match (self.cells[idx], alive) {
            (false, true) => self.live += 1,
            (true, false) => self.live -= 1,
            _ => {}
        }
        self.cells[idx] = alive;
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Row-major `(row, col)` of every alive cell.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(idx, _)| (idx / self.cols, idx % self.cols))
    }

    /// Copy `next` (row-major over `partition`) into the board and fold the
    /// change in alive cells into the live counter. Returns that change.
    pub fn commit(&mut self, partition: &Partition, next: &[bool]) -> isize {
        debug_assert_eq!(next.len(), partition.cell_count());

        let width = partition.cols.len();
        let mut delta: isize = 0;
        for (offset, row) in partition.rows.iter().enumerate() {
            let src = &next[offset * width..(offset + 1) * width];
            let start = self.index(row, partition.cols.start);
            let dst = &mut self.cells[start..start + width];
            for (old, &new) in dst.iter_mut().zip(src) {
                match (*old, new) {
                    (false, true) => delta += 1,
                    (true, false) => delta -= 1,
                    _ => {}
                }
                *old = new;
            }
        }
        self.live = self.live.wrapping_add_signed(delta);
        delta
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1)) {
            for &alive in row {
                f.write_str(if alive { " @" } else { " _" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The single board every worker reads and commits into.
///
/// Reads take the shared guard and writes the exclusive one. The round
/// barriers keep readers and writers in separate phases, so a compute-phase
/// read never waits on a writer.
#[derive(Debug)]
pub struct SharedBoard {
    inner: RwLock<Board>,
}

impl SharedBoard {
    pub fn new(board: Board) -> Self {
        Self { inner: RwLock::new(board) }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Board> {
        self.inner.read()
    }

    /// Commit one worker's scratch results under the exclusive lock.
    pub fn commit(&self, partition: &Partition, next: &[bool]) -> isize {
        let mut board = self.inner.write();
        board.commit(partition, next)
    }

    pub fn snapshot(&self) -> Board {
        self.inner.read().clone()
    }
}
