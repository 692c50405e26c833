// worker.rs - One thread's share of the simulation

use crate::barrier::Aborted;
use crate::coordinator::{Phase, RoundCoordinator};
use crate::partition::Partition;
use crate::report::Reporter;

/// Next-round states for one partition, row-major. Allocated once and
/// reused every round.
#[derive(Debug, Clone)]
pub struct ScratchBuffer {
    cells: Vec<bool>,
}

impl ScratchBuffer {
    pub fn for_partition(partition: &Partition) -> Self {
        Self { cells: vec![false; partition.cell_count()] }
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }

    pub fn as_mut_slice(&mut self) -> &mut [bool] {
        &mut self.cells
    }
}

pub struct Worker {
    id: usize,
    partition: Partition,
    scratch: ScratchBuffer,
    is_reporter: bool,
    print_partition: bool,
}

impl Worker {
    /// Worker 0 is the reporter.
    pub fn new(partition: Partition, print_partition: bool) -> Self {
        Self {
            id: partition.worker_id,
            scratch: ScratchBuffer::for_partition(&partition),
            partition,
            is_reporter: partition.worker_id == 0,
            print_partition,
        }
    }

    pub fn is_reporter(&self) -> bool {
        self.is_reporter
    }

    /// Run every round, then the final rendezvous. Fails only when another
    /// worker died and the coordinator was aborted.
    pub fn run(&mut self, coordinator: &RoundCoordinator, reporter: &dyn Reporter) -> Result<(), Aborted> {
        tracing::debug!(worker = self.id, partition = %self.partition, "worker started");

        for round in 0..coordinator.iterations() {
            for phase in Phase::ROUND {
                if let Err(aborted) = self.step(phase, round, coordinator, reporter) {
                    tracing::debug!(worker = self.id, round, ?phase, "worker stopped: round aborted");
                    return Err(aborted);
                }
            }
        }

        coordinator.finish()?;
        if self.print_partition {
            let (rows, cols) = coordinator.dimensions();
            reporter.report_partition(&self.partition, rows, cols);
        }

        tracing::debug!(worker = self.id, "worker finished");
        Ok(())
    }

    fn step(
        &mut self,
        phase: Phase,
        round: usize,
        coordinator: &RoundCoordinator,
        reporter: &dyn Reporter,
    ) -> Result<(), Aborted> {
        tracing::trace!(worker = self.id, round, ?phase);
        match phase {
            Phase::Compute => coordinator.compute(&self.partition, self.scratch.as_mut_slice()),
            Phase::AwaitComputed => coordinator.await_computed()?,
            Phase::Commit => {
                let delta = coordinator.commit(&self.partition, self.scratch.as_slice());
                tracing::trace!(worker = self.id, round, delta, "committed");
            }
            Phase::AwaitCommitted => coordinator.await_committed()?,
            Phase::Report if self.is_reporter() => coordinator.report(round, reporter),
            Phase::Report => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputMode;
    use crate::grid::Board;
    use crate::partition::{Axis, Span, partition_grid};
    use crate::report::NullReporter;
    use crate::rule;

    #[test]
    fn scratch_is_sized_to_partition() {
        let p = Partition { worker_id: 2, rows: Span::new(3, 5), cols: Span::full(7) };
        assert_eq!(ScratchBuffer::for_partition(&p).as_slice().len(), 21);
    }

    #[test]
    fn only_worker_zero_reports() {
        let parts = partition_grid(4, 4, 2, Axis::Row).unwrap();
        assert!(Worker::new(parts[0], false).is_reporter());
        assert!(!Worker::new(parts[1], false).is_reporter());
    }

    #[test]
    fn lone_worker_runs_all_rounds() {
        let board = Board::with_live_cells(6, 6, [(1, 2), (2, 3), (3, 1), (3, 2), (3, 3)]).unwrap();
        let parts = partition_grid(6, 6, 1, Axis::Col).unwrap();
        let coord = RoundCoordinator::new(board.clone(), &parts, 4, OutputMode::None);

        let mut worker = Worker::new(parts[0], false);
        worker.run(&coord, &NullReporter).unwrap();

        assert_eq!(coord.board().snapshot(), rule::advance_by(&board, 4));
    }
}
