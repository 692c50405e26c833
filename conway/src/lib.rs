//! # conway
//!
//! Conway's Game of Life on a toroidal board, run by a fixed pool of worker
//! threads.
//!
//! The board is cut into one contiguous band of rows or columns per worker.
//! Every round each worker computes its band into private scratch, all meet
//! at a barrier, each commits its band under the board's write lock, and all
//! meet again before the next round starts.
//!
//! ## Modules
//!
//! - `partition`: splitting the board between workers
//! - `grid`: the board and its shared, lock-guarded form
//! - `rule`: the B3/S23 rule with wraparound, plus a single-threaded stepper
//! - `coordinator`: the per-round phase protocol
//! - `worker`: one thread's loop and scratch buffer
//! - `dispatcher`: starting and joining a run
//! - `report`: output sinks for text and graphical display
//! - `seed`: seed file loading
//! - `patterns`: named shapes and random boards
//! - `config`: command line and environment settings

pub mod barrier;
pub mod config;
pub mod coordinator;
pub mod dispatcher;
pub mod error;
pub mod grid;
pub mod partition;
pub mod patterns;
pub mod report;
pub mod rule;
pub mod seed;
pub mod worker;

pub use crate::config::{Config, OutputMode};
pub use crate::coordinator::{Phase, RoundCoordinator};
pub use crate::dispatcher::{Outcome, Settings, Simulation};
pub use crate::error::{LifeError, Result};
pub use crate::grid::{Board, SharedBoard};
pub use crate::partition::{Axis, OwnerMap, Partition, Span, partition_axis, partition_grid};
pub use crate::report::{Frame, NullReporter, Reporter, TextReporter};
pub use crate::seed::Seed;
pub use crate::worker::{ScratchBuffer, Worker};
