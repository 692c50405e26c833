// config.rs - Run configuration from the command line and environment
//
// Positional arguments:
//   <seed file> <mode 0|1|2> <threads> <axis 0=row|1=col> <print partitions 0|1>

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{LifeError, Result};
use crate::partition::Axis;

/// Delay after each printed or drawn round when output is on.
pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(100);

/// What happens after each committed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Nothing; for timing runs
    None,
    /// Print the board to the terminal
    Text,
    /// Draw the board in a window, coloured by owning worker
    Visual,
}

impl OutputMode {
    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim() {
            "0" => Ok(Self::None),
            "1" => Ok(Self::Text),
            "2" => Ok(Self::Visual),
            other => Err(LifeError::config(format!("output mode must be 0, 1 or 2, got {other:?}"))),
        }
    }

    pub fn is_animated(self) -> bool {
        !matches!(self, Self::None)
    }
}

fn axis_from_code(code: &str) -> Result<Axis> {
    match code.trim() {
        "0" => Ok(Axis::Row),
        "1" => Ok(Axis::Col),
        other => Err(LifeError::config(format!("partition axis must be 0 (rows) or 1 (columns), got {other:?}"))),
    }
}

fn flag_from_code(name: &str, code: &str) -> Result<bool> {
    match code.trim() {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(LifeError::config(format!("{name} must be 0 or 1, got {other:?}"))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seed_path: PathBuf,
    pub mode: OutputMode,
    pub threads: usize,
    pub axis: Axis,
    pub print_partitions: bool,
    pub frame_delay: Duration,
}

impl Config {
    /// Parse `program seed mode threads axis print_partitions`.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let program = args.first().cloned().unwrap_or_else(|| "conway_threads".to_string());
        let [_, seed, mode, threads, axis, print] = args.as_slice() else {
            return Err(LifeError::Usage { program });
        };

        let mode = OutputMode::from_code(mode)?;
        let threads = threads
            .trim()
            .parse::<usize>()
            .map_err(|_| LifeError::config(format!("thread count must be a positive integer, got {threads:?}")))?;
        if threads == 0 {
            return Err(LifeError::config("thread count must be at least 1"));
        }

        Ok(Self {
            seed_path: PathBuf::from(seed),
            mode,
            threads,
            axis: axis_from_code(axis)?,
            print_partitions: flag_from_code("print_partition", print)?,
            frame_delay: if mode.is_animated() { DEFAULT_FRAME_DELAY } else { Duration::ZERO },
        })
    }

    /// Apply `GOL_FRAME_DELAY_MS` if set and valid.
    pub fn apply_env(mut self) -> Self {
        if let Ok(ms) = env::var("GOL_FRAME_DELAY_MS") {
            self = self.with_frame_delay_ms(&ms);
        }
        self
    }

    fn with_frame_delay_ms(mut self, ms: &str) -> Self {
        match ms.trim().parse::<u64>() {
            Ok(ms) => self.frame_delay = Duration::from_millis(ms),
            Err(_) => tracing::warn!(value = ms, "ignoring invalid GOL_FRAME_DELAY_MS"),
        }
        self
    }
}

/// Log level from `GOL_LOG`, INFO when unset or invalid.
pub fn log_level() -> tracing::Level {
    env::var("GOL_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(tracing::Level::INFO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_full_command_line() {
        let cfg = Config::from_args(args(&["gol", "board.txt", "1", "4", "1", "1"])).unwrap();
        assert_eq!(cfg.seed_path, PathBuf::from("board.txt"));
        assert_eq!(cfg.mode, OutputMode::Text);
        assert_eq!(cfg.threads, 4);
        assert_eq!(cfg.axis, Axis::Col);
        assert!(cfg.print_partitions);
        assert_eq!(cfg.frame_delay, DEFAULT_FRAME_DELAY);
    }

    #[test]
    fn quiet_mode_has_no_delay() {
        let cfg = Config::from_args(args(&["gol", "b.txt", "0", "2", "0", "0"])).unwrap();
        assert_eq!(cfg.mode, OutputMode::None);
        assert_eq!(cfg.frame_delay, Duration::ZERO);
    }

    #[test]
    fn wrong_argument_count_is_usage_error() {
        let err = Config::from_args(args(&["gol", "b.txt", "0"])).unwrap_err();
        assert!(matches!(err, LifeError::Usage { ref program } if program == "gol"));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::from_args(args(&["gol", "b", "3", "2", "0", "0"])).unwrap_err().is_configuration());
        assert!(Config::from_args(args(&["gol", "b", "0", "0", "0", "0"])).unwrap_err().is_configuration());
        assert!(Config::from_args(args(&["gol", "b", "0", "x", "0", "0"])).unwrap_err().is_configuration());
        assert!(Config::from_args(args(&["gol", "b", "0", "2", "2", "0"])).unwrap_err().is_configuration());
        assert!(Config::from_args(args(&["gol", "b", "0", "2", "0", "7"])).unwrap_err().is_configuration());
    }

    #[test]
    fn frame_delay_override() {
        let cfg = Config::from_args(args(&["gol", "b", "1", "1", "0", "0"])).unwrap();
        assert_eq!(cfg.clone().with_frame_delay_ms("5").frame_delay, Duration::from_millis(5));
        assert_eq!(cfg.with_frame_delay_ms("soon").frame_delay, DEFAULT_FRAME_DELAY);
    }
}
