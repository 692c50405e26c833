// main.rs - Parallel Conway's Game of Life on a torus
//
// usage: conway_threads <seed file> <0|1|2> <threads> <0=rows|1=cols> <print partitions 0|1>
//
//   mode 0: no output, just the total time
//   mode 1: print the board to the terminal after every round
//   mode 2: draw every round in a window, one colour per worker

use std::process::ExitCode;
use std::sync::Arc;

use conway::config::log_level;
use conway::{Config, LifeError, OutputMode, Seed, Settings, Simulation, TextReporter};

mod ui;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Life(#[from] LifeError),

    #[error("Viewer error: {0}")]
    Viewer(String),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(log_level())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<(), CliError> {
    let config = Config::from_args(std::env::args())?.apply_env();
    let seed = Seed::load(&config.seed_path)?;

    let settings = Settings::new(config.threads, config.axis)
        .with_mode(config.mode)
        .with_partition_report(config.print_partitions);
    let simulation = Simulation::new(seed.board, seed.iterations, settings)?;

    let outcome = match config.mode {
        OutputMode::None | OutputMode::Text => {
            let reporter = TextReporter::stdio()
                .with_clear_screen(config.mode == OutputMode::Text)
                .with_frame_delay(config.frame_delay);
            simulation.run(Arc::new(reporter))?
        }
        OutputMode::Visual => ui::run_viewer(simulation, &config)?,
    };

    tracing::debug!(rounds = outcome.rounds, live = outcome.board.live_count(), "done");
    println!("\nTotal time: {:0.3} seconds.", outcome.elapsed.as_secs_f64());
    Ok(())
}
