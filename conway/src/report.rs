// report.rs - What the engine hands to whoever displays the board
//
// Renderers only ever see committed boards. For the graphical view they get a
// Frame that tags each alive cell with the worker that owns it; choosing
// colours is up to them.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use crate::grid::Board;
use crate::partition::{OwnerMap, Partition};

/// Output sink called by the reporting worker.
///
/// Every method has a no-op default so a sink only implements the outputs it
/// cares about.
pub trait Reporter: Send + Sync {
    /// Text mode: called once per round with the committed board.
    fn print_board(&self, _board: &Board, _round: usize, _live: usize) {}

    /// Graphical mode: called once per round with the committed frame.
    fn render_frame(&self, _frame: &Frame) {}

    /// Called by every worker once the last round is done, when partition
    /// diagnostics are enabled.
    fn report_partition(&self, _partition: &Partition, _rows: usize, _cols: usize) {}
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Committed board with each alive cell tagged by its owning worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub round: usize,
    pub rows: usize,
    pub cols: usize,
    pub live: usize,
    /// Row-major; `Some(worker_id)` for alive cells, `None` for dead ones.
    pub owners: Vec<Option<usize>>,
}

impl Frame {
    pub fn capture(board: &Board, owners: &OwnerMap, round: usize) -> Self {
        let owners = board
            .cells()
            .iter()
            .zip(owners.as_slice())
            .map(|(&alive, &owner)| alive.then_some(owner))
            .collect();

        Self {
            round,
            rows: board.rows(),
            cols: board.cols(),
            live: board.live_count(),
            owners,
        }
    }

    pub fn owner(&self, row: usize, col: usize) -> Option<usize> {
        self.owners[row * self.cols + col]
    }
}

/// `tid: 0, rows: 0 : 4 (10) cols: 0 : 9 (10)`
pub fn partition_line(partition: &Partition, rows: usize, cols: usize) -> String {
    format!(
        "tid: {}, rows: {} : {} ({}) cols: {} : {} ({})",
        partition.worker_id,
        partition.rows.start,
        partition.rows.end,
        rows,
        partition.cols.start,
        partition.cols.end,
        cols
    )
}

type Sink = Mutex<Box<dyn Write + Send>>;

/// Prints boards as ` @`/` _` rows.
pub struct TextReporter {
    boards: Sink,
    diagnostics: Sink,
    clear_screen: bool,
    frame_delay: Duration,
}

impl TextReporter {
    pub fn new(boards: impl Write + Send + 'static, diagnostics: impl Write + Send + 'static) -> Self {
        Self {
            boards: Mutex::new(Box::new(boards)),
            diagnostics: Mutex::new(Box::new(diagnostics)),
            clear_screen: false,
            frame_delay: Duration::ZERO,
        }
    }

    /// Boards on stderr, partition diagnostics on stdout.
    pub fn stdio() -> Self {
        Self::new(io::stderr(), io::stdout())
    }

    /// Clear the terminal before each board.
    pub fn with_clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    /// Pause after each board so the animation is watchable.
    pub fn with_frame_delay(mut self, delay: Duration) -> Self {
        self.frame_delay = delay;
        self
    }

    fn write_board(&self, board: &Board, round: usize, live: usize) -> io::Result<()> {
        let mut out = self.boards.lock();
        if self.clear_screen {
            out.write_all(b"\x1b[2J\x1b[H")?;
        }
        write!(out, "Round: {round}\n{board}Total live cells: {live}\n\n\n")?;
        out.flush()
    }
}

impl Reporter for TextReporter {
    fn print_board(&self, board: &Board, round: usize, live: usize) {
        if let Err(err) = self.write_board(board, round, live) {
            tracing::warn!(%err, round, "failed to print board");
        }
        if !self.frame_delay.is_zero() {
            thread::sleep(self.frame_delay);
        }
    }

    fn report_partition(&self, partition: &Partition, rows: usize, cols: usize) {
        let mut out = self.diagnostics.lock();
        if let Err(err) = writeln!(out, "{}", partition_line(partition, rows, cols)).and_then(|_| out.flush()) {
            tracing::warn!(%err, worker = partition.worker_id, "failed to print partition");
        }
    }
}
