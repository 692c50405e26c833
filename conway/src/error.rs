// error.rs - Error taxonomy for the simulation
//
// Every error here is fatal: it is raised during setup, before any worker
// thread starts, or when a worker thread dies.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LifeError {
    /// Wrong number of command line arguments
    #[error(
        "Wrong number of arguments.\nUsage: {program} <input file> <0|1|2> <num threads> <partition> <print_partition>"
    )]
    Usage { program: String },

    /// Invalid mode, axis, flag or thread count
    #[error("Configuration error: {0}")]
    Config(String),

    /// More workers than units along the partitioned axis
    #[error("Too many threads ({workers}) for an axis of length {axis_length}")]
    TooManyWorkers { workers: usize, axis_length: usize },

    /// Seed file missing or unreadable
    #[error("Cannot read seed file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Seed header or pairs malformed
    #[error("Malformed seed: {0}")]
    MalformedSeed(String),

    /// A worker thread could not be started
    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[source] io::Error),

    /// A worker thread panicked
    #[error("Worker {0} panicked")]
    WorkerPanicked(usize),
}

pub type Result<T> = std::result::Result<T, LifeError>;

impl LifeError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedSeed(msg.into())
    }

    /// True for errors caused by the run's parameters rather than its input data.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Usage { .. } | Self::Config(_) | Self::TooManyWorkers { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_configuration_errors() {
        assert!(LifeError::config("bad mode").is_configuration());
        assert!(LifeError::TooManyWorkers { workers: 9, axis_length: 4 }.is_configuration());
        assert!(!LifeError::malformed("short header").is_configuration());
        assert!(!LifeError::WorkerPanicked(2).is_configuration());
    }

    #[test]
    fn usage_message_names_program() {
        let msg = LifeError::Usage { program: "gol".into() }.to_string();
        assert!(msg.starts_with("Wrong number of arguments."));
        assert!(msg.contains("Usage: gol <input file>"));
    }
}
