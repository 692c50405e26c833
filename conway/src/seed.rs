// seed.rs - Seed file loading
//
// Format, whitespace separated:
//
//   rows cols iterations pair_count
//   row col        (pair_count times, 0-indexed)

use std::fs;
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use crate::error::{LifeError, Result};
use crate::grid::Board;

/// Initial board and round count read from a seed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    pub board: Board,
    pub iterations: usize,
}

impl Seed {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LifeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let seed = Self::parse(&text)?;
        tracing::debug!(
            path = %path.display(),
            rows = seed.board.rows(),
            cols = seed.board.cols(),
            iterations = seed.iterations,
            live = seed.board.live_count(),
            "loaded seed"
        );
        Ok(seed)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut tokens = Tokens { inner: text.split_whitespace(), read: 0 };

        let rows: usize = tokens.take("rows")?;
        let cols: usize = tokens.take("cols")?;
        let iterations: usize = tokens.take("iterations")?;
        let pairs: usize = tokens.take("live pair count")?;
        if rows == 0 || cols == 0 {
            return Err(LifeError::malformed(format!("board must not be empty, got {rows}x{cols}")));
        }
        let area = rows
            .checked_mul(cols)
            .ok_or_else(|| LifeError::malformed(format!("board {rows}x{cols} is too large")))?;

        let mut alive = Vec::with_capacity(pairs.min(area));
        for pair in 0..pairs {
            let row: usize = tokens.take(&format!("row of pair {pair}"))?;
            let col: usize = tokens.take(&format!("col of pair {pair}"))?;
            alive.push((row, col));
        }

        let board = Board::with_live_cells(rows, cols, alive)?;
        Ok(Self { board, iterations })
    }

    /// The seed file text for this board.
    pub fn render(&self) -> String {
        let header = format!(
            "{} {} {} {}\n",
            self.board.rows(),
            self.board.cols(),
            self.iterations,
            self.board.live_count()
        );
        let pairs: String = self
            .board
            .alive_cells()
            .map(|(row, col)| format!("{row} {col}\n"))
            .collect();
        header + &pairs
    }
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
    read: usize,
}

impl Tokens<'_> {
    fn take<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let token = self
            .inner
            .next()
            .ok_or_else(|| LifeError::malformed(format!("missing {what} (after {} values)", self.read)))?;
        self.read += 1;
        token
            .parse()
            .map_err(|_| LifeError::malformed(format!("{what} must be a non-negative integer, got {token:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_pairs() {
        let seed = Seed::parse("5 6 10 3\n2 1\n2 2\n2 3\n").unwrap();
        assert_eq!(seed.iterations, 10);
        assert_eq!(seed.board.rows(), 5);
        assert_eq!(seed.board.cols(), 6);
        assert_eq!(seed.board.live_count(), 3);
        assert!(seed.board.is_alive(2, 3));
    }

    #[test]
    fn line_breaks_are_not_significant() {
        let seed = Seed::parse("3 3 1 2 0 0 1 1").unwrap();
        assert_eq!(seed.board.live_count(), 2);
    }

    #[test]
    fn short_header_is_malformed() {
        let err = Seed::parse("5 5 10").unwrap_err();
        assert!(matches!(err, LifeError::MalformedSeed(ref msg) if msg.contains("live pair count")));
    }

    #[test]
    fn missing_pair_is_malformed() {
        let err = Seed::parse("5 5 10 2\n1 1\n").unwrap_err();
        assert!(matches!(err, LifeError::MalformedSeed(_)));
    }

    #[test]
    fn non_numeric_and_negative_values_are_malformed() {
        assert!(Seed::parse("five 5 10 0").is_err());
        assert!(Seed::parse("5 5 10 1\n-1 2\n").is_err());
    }

    #[test]
    fn out_of_bounds_pair_is_malformed() {
        assert!(Seed::parse("4 4 1 1\n4 0\n").is_err());
    }

    #[test]
    fn empty_board_is_malformed() {
        assert!(Seed::parse("0 4 1 0").is_err());
    }

    #[test]
    fn render_reads_back() {
        let seed = Seed::parse("4 5 7 3\n0 4\n3 0\n1 1\n").unwrap();
        let text = seed.render();
        assert!(text.starts_with("4 5 7 3\n"));
        assert_eq!(Seed::parse(&text).unwrap(), seed);
    }
}
