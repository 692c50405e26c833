// coordinator.rs - Round protocol shared by all workers
//
// One round is five phases, run in the same order by every worker:
//
//   Compute         read the board, write next states into private scratch
//   AwaitComputed   barrier: nobody commits until everybody has computed
//   Commit          exclusive lock, copy scratch into the board, fold delta
//   AwaitCommitted  barrier: the whole board now holds this round
//   Report          reporting worker only; others go straight to Compute
//
// The reporter copies what it needs out of the board before leaving Report.
// No worker can commit the next round until the reporter has also passed the
// next AwaitComputed, so a report never sees a half-committed board.
//
// If a worker dies, `abort` tears both barriers down and every other worker
// leaves its loop at its next rendezvous.

use crate::barrier::{Aborted, RoundBarrier};
use crate::config::OutputMode;
use crate::grid::{Board, SharedBoard};
use crate::partition::{OwnerMap, Partition};
use crate::report::{Frame, Reporter};
use crate::rule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Compute,
    AwaitComputed,
    Commit,
    AwaitCommitted,
    Report,
}

impl Phase {
    /// Phases of one round, in order.
    pub const ROUND: [Phase; 5] = [
        Phase::Compute,
        Phase::AwaitComputed,
        Phase::Commit,
        Phase::AwaitCommitted,
        Phase::Report,
    ];
}

/// Shared state of one simulation run. Single use.
#[derive(Debug)]
pub struct RoundCoordinator {
    board: SharedBoard,
    computed: RoundBarrier,
    committed: RoundBarrier,
    owners: OwnerMap,
    iterations: usize,
    mode: OutputMode,
}

impl RoundCoordinator {
    /// `partitions` must cover `board` exactly once; the worker count is
    /// taken from it.
    pub fn new(board: Board, partitions: &[Partition], iterations: usize, mode: OutputMode) -> Self {
        let workers = partitions.len();
        let owners = OwnerMap::new(board.rows(), board.cols(), partitions);
        Self {
            board: SharedBoard::new(board),
            computed: RoundBarrier::new(workers),
            committed: RoundBarrier::new(workers),
            owners,
            iterations,
            mode,
        }
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn board(&self) -> &SharedBoard {
        &self.board
    }

    pub fn dimensions(&self) -> (usize, usize) {
        let board = self.board.read();
        (board.rows(), board.cols())
    }

    /// Next state of every cell in `partition`, row-major, into `out`.
    pub fn compute(&self, partition: &Partition, out: &mut [bool]) {
        let board = self.board.read();
        for (slot, (row, col)) in out.iter_mut().zip(partition.cells()) {
            *slot = rule::next_state(&board, row, col);
        }
    }

    pub fn await_computed(&self) -> Result<(), Aborted> {
        self.computed.wait()
    }

    pub fn commit(&self, partition: &Partition, next: &[bool]) -> isize {
        self.board.commit(partition, next)
    }

    pub fn await_committed(&self) -> Result<(), Aborted> {
        self.committed.wait()
    }

    /// Hand the committed board for `round` to `reporter`, as the output mode
    /// asks. The board lock is released before the reporter runs.
    pub fn report(&self, round: usize, reporter: &dyn Reporter) {
        match self.mode {
            OutputMode::None => {}
            OutputMode::Text => {
                let board = self.board.snapshot();
                reporter.print_board(&board, round, board.live_count());
            }
            OutputMode::Visual => {
                let frame = Frame::capture(&self.board.read(), &self.owners, round);
                reporter.render_frame(&frame);
            }
        }
    }

    /// Final rendezvous after the last round.
    pub fn finish(&self) -> Result<(), Aborted> {
        self.computed.wait()
    }

    /// Release every worker blocked at, or later arriving at, a barrier.
    pub fn abort(&self) {
        self.computed.abort();
        self.committed.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::{Axis, partition_grid};

    #[test]
    fn single_worker_round_matches_reference() {
        let board = Board::with_live_cells(5, 5, [(2, 1), (2, 2), (2, 3)]).unwrap();
        let parts = partition_grid(5, 5, 1, Axis::Row).unwrap();
        let coord = RoundCoordinator::new(board.clone(), &parts, 1, OutputMode::None);

        let mut scratch = vec![false; parts[0].cell_count()];
        coord.compute(&parts[0], &mut scratch);
        coord.await_computed().unwrap();
        let delta = coord.commit(&parts[0], &scratch);
        coord.await_committed().unwrap();

        assert_eq!(delta, 0);
        assert_eq!(coord.board().snapshot(), rule::advance(&board));
    }

    #[test]
    fn compute_does_not_touch_board() {
        let board = Board::with_live_cells(4, 4, [(0, 0), (0, 1), (1, 0)]).unwrap();
        let parts = partition_grid(4, 4, 2, Axis::Col).unwrap();
        let coord = RoundCoordinator::new(board.clone(), &parts, 1, OutputMode::None);

        let mut scratch = vec![false; parts[1].cell_count()];
        coord.compute(&parts[1], &mut scratch);
        assert_eq!(coord.board().snapshot(), board);
    }

    #[test]
    fn abort_fails_later_rendezvous() {
        let board = Board::new(4, 4);
        let parts = partition_grid(4, 4, 2, Axis::Row).unwrap();
        let coord = RoundCoordinator::new(board, &parts, 1, OutputMode::None);

        coord.abort();
        assert_eq!(coord.await_computed(), Err(Aborted));
        assert_eq!(coord.await_committed(), Err(Aborted));
        assert_eq!(coord.finish(), Err(Aborted));
    }

    #[test]
    fn round_has_five_phases_in_order() {
        assert_eq!(Phase::ROUND.first(), Some(&Phase::Compute));
        assert_eq!(Phase::ROUND.last(), Some(&Phase::Report));
        assert_eq!(Phase::ROUND.len(), 5);
    }
}
