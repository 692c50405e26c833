// partition.rs - Static split of the board between workers
//
// Each worker owns a contiguous band of rows or columns for the whole run.
// Bands are handed out in worker id order; the first `len % workers` bands
// are one unit longer than the rest.

use std::fmt;

use crate::error::{LifeError, Result};

/// Axis the board is cut along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Col,
}

impl Axis {
    /// Length of this axis on a `rows x cols` board.
    pub fn length(self, rows: usize, cols: usize) -> usize {
        match self {
            Axis::Row => rows,
            Axis::Col => cols,
        }
    }
}

/// Inclusive index range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

#[allow(clippy::len_without_is_empty)]
impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// The whole axis `[0, len-1]`. `len` must be non-zero.
    pub fn full(len: usize) -> Self {
        Self::new(0, len - 1)
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Cells owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub worker_id: usize,
    pub rows: Span,
    pub cols: Span,
}

impl Partition {
    pub fn cell_count(&self) -> usize {
        self.rows.len() * self.cols.len()
    }

    /// Row-major iterator over the owned `(row, col)` pairs.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows
            .iter()
            .flat_map(move |row| self.cols.iter().map(move |col| (row, col)))
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tid: {}, rows: {} : {} cols: {} : {}",
            self.worker_id, self.rows.start, self.rows.end, self.cols.start, self.cols.end
        )
    }
}

/// Split `[0, axis_length-1]` into `workers` non-empty contiguous spans.
pub fn partition_axis(axis_length: usize, workers: usize) -> Result<Vec<Span>> {
    if workers == 0 {
        return Err(LifeError::config("thread count must be at least 1"));
    }
    if workers > axis_length {
        return Err(LifeError::TooManyWorkers { workers, axis_length });
    }

    let base = axis_length / workers;
    let remainder = axis_length % workers;

    let mut spans = Vec::with_capacity(workers);
    let mut start = 0;
    for id in 0..workers {
        let len = if id < remainder { base + 1 } else { base };
        spans.push(Span::new(start, start + len - 1));
        start += len;
    }
    debug_assert_eq!(start, axis_length);
    Ok(spans)
}

/// One partition per worker, cutting the `rows x cols` board along `axis`.
pub fn partition_grid(rows: usize, cols: usize, workers: usize, axis: Axis) -> Result<Vec<Partition>> {
    if rows == 0 || cols == 0 {
        return Err(LifeError::config(format!("cannot partition an empty {rows}x{cols} board")));
    }

    let spans = partition_axis(axis.length(rows, cols), workers)?;
    let partitions = spans
        .into_iter()
        .enumerate()
        .map(|(worker_id, span)| match axis {
            Axis::Row => Partition { worker_id, rows: span, cols: Span::full(cols) },
            Axis::Col => Partition { worker_id, rows: Span::full(rows), cols: span },
        })
        .collect::<Vec<_>>();

    for p in &partitions {
        tracing::debug!(%p, cells = p.cell_count(), "partition");
    }
    Ok(partitions)
}

/// Owning worker id for every cell, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerMap {
    cols: usize,
    owners: Vec<usize>,
}

impl OwnerMap {
    pub fn new(rows: usize, cols: usize, partitions: &[Partition]) -> Self {
        let mut owners = vec![0; rows * cols];
        for p in partitions {
            for (row, col) in p.cells() {
                owners[row * cols + col] = p.worker_id;
            }
        }
        Self { cols, owners }
    }

    pub fn owner(&self, row: usize, col: usize) -> usize {
        self.owners[row * self.cols + col]
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.owners
    }
}
