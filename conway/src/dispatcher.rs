// dispatcher.rs - Sets up a run, starts the workers, waits for them

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::OutputMode;
use crate::coordinator::RoundCoordinator;
use crate::error::{LifeError, Result};
use crate::grid::Board;
use crate::partition::{Axis, Partition, partition_grid};
use crate::report::Reporter;
use crate::worker::Worker;

/// Fixed for the lifetime of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub workers: usize,
    pub axis: Axis,
    pub mode: OutputMode,
    pub print_partitions: bool,
}

impl Settings {
    pub fn new(workers: usize, axis: Axis) -> Self {
        Self {
            workers,
            axis,
            mode: OutputMode::None,
            print_partitions: false,
        }
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_partition_report(mut self, enabled: bool) -> Self {
        self.print_partitions = enabled;
        self
    }
}

/// Result of a finished run.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub board: Board,
    pub rounds: usize,
    pub elapsed: Duration,
}

/// Aborts the run if the worker thread holding it unwinds.
struct AbortOnPanic<'a>(&'a RoundCoordinator);

impl Drop for AbortOnPanic<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.abort();
        }
    }
}

/// A validated run, ready to start.
#[derive(Debug)]
pub struct Simulation {
    board: Board,
    iterations: usize,
    settings: Settings,
    partitions: Vec<Partition>,
}

impl Simulation {
    /// Partition the board up front so a bad worker count fails before any
    /// thread exists.
    pub fn new(board: Board, iterations: usize, settings: Settings) -> Result<Self> {
        let partitions = partition_grid(board.rows(), board.cols(), settings.workers, settings.axis)?;
        Ok(Self {
            board,
            iterations,
            settings,
            partitions,
        })
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Run every round on one thread per partition and return the final board.
    pub fn run(self, reporter: Arc<dyn Reporter>) -> Result<Outcome> {
        let Self { board, iterations, settings, partitions } = self;
        tracing::info!(
            rows = board.rows(),
            cols = board.cols(),
            iterations,
            workers = settings.workers,
            axis = ?settings.axis,
            mode = ?settings.mode,
            "starting simulation"
        );

        let started = Instant::now();
        let coordinator = Arc::new(RoundCoordinator::new(board, &partitions, iterations, settings.mode));

        let mut handles = Vec::with_capacity(partitions.len());
        for partition in partitions {
            let coordinator_ref = Arc::clone(&coordinator);
            let reporter = Arc::clone(&reporter);
            let mut worker = Worker::new(partition, settings.print_partitions);
            let spawned = thread::Builder::new()
                .name(format!("gol-worker-{}", partition.worker_id))
                .spawn(move || {
                    let _guard = AbortOnPanic(&coordinator_ref);
                    worker.run(&coordinator_ref, reporter.as_ref())
                });
            match spawned {
                Ok(handle) => handles.push((partition.worker_id, handle)),
                Err(err) => {
                    // Workers already running would wait for this one forever
                    coordinator.abort();
                    for (_, handle) in handles {
                        let _ = handle.join();
                    }
                    return Err(LifeError::Spawn(err));
                }
            }
        }

        let mut failed = None;
        for (id, handle) in handles {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(_aborted)) => tracing::debug!(worker = id, "worker left an aborted run"),
                Err(_) => {
                    tracing::error!(worker = id, "worker panicked");
                    failed.get_or_insert(id);
                }
            }
        }
        if let Some(id) = failed {
            return Err(LifeError::WorkerPanicked(id));
        }

        let elapsed = started.elapsed();
        let board = coordinator.board().snapshot();
        tracing::info!(live = board.live_count(), elapsed = ?elapsed, "simulation finished");

        Ok(Outcome { board, rounds: iterations, elapsed })
    }
}
