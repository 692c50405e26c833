// ui.rs - Window for graphical mode
//
// The simulation runs on its own thread; the reporting worker drops each
// committed frame into a FrameSink and the egui app paints the latest one.
// Alive cells take the colour of the worker that owns them.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use eframe::egui;
use egui::{Color32, Rect, Vec2};
use parking_lot::Mutex;

use conway::report::partition_line;
use conway::{Config, Frame, LifeError, Outcome, Partition, Reporter, Simulation};

use crate::CliError;

const TITLE: &str = "Parallel GOL";

const WORKER_COLORS: [Color32; 12] = [
    Color32::from_rgb(0, 200, 0),
    Color32::from_rgb(230, 60, 60),
    Color32::from_rgb(60, 120, 240),
    Color32::from_rgb(240, 200, 40),
    Color32::from_rgb(200, 80, 220),
    Color32::from_rgb(40, 210, 210),
    Color32::from_rgb(250, 140, 30),
    Color32::from_rgb(160, 230, 120),
    Color32::from_rgb(240, 120, 170),
    Color32::from_rgb(140, 110, 240),
    Color32::from_rgb(200, 200, 200),
    Color32::from_rgb(150, 100, 50),
];

fn worker_color(worker_id: usize) -> Color32 {
    WORKER_COLORS[worker_id % WORKER_COLORS.len()]
}

/// Latest committed frame, shared between the reporting worker and the window.
pub struct FrameSink {
    latest: Mutex<Option<Frame>>,
    frame_delay: Duration,
    finished: AtomicBool,
    closed: AtomicBool,
}

impl FrameSink {
    pub fn new(frame_delay: Duration) -> Self {
        Self {
            latest: Mutex::new(None),
            frame_delay,
            finished: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        }
    }

    pub fn latest(&self) -> Option<Frame> {
        self.latest.lock().clone()
    }

    pub fn mark_finished(&self) {
        self.finished.store(true, Ordering::Release);
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// The window is gone; stop pacing frames for it.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}

impl Reporter for FrameSink {
    fn render_frame(&self, frame: &Frame) {
        *self.latest.lock() = Some(frame.clone());
        if !self.closed.load(Ordering::Acquire) && !self.frame_delay.is_zero() {
            thread::sleep(self.frame_delay);
        }
    }

    fn report_partition(&self, partition: &Partition, rows: usize, cols: usize) {
        println!("{}", partition_line(partition, rows, cols));
    }
}

pub struct LifeViewer {
    frames: Arc<FrameSink>,
    iterations: usize,
    workers: usize,
    dead_color: Color32,
}

impl LifeViewer {
    pub fn new(frames: Arc<FrameSink>, iterations: usize, workers: usize) -> Self {
        Self {
            frames,
            iterations,
            workers,
            dead_color: Color32::from_rgb(40, 40, 40),
        }
    }
}

impl eframe::App for LifeViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let latest = self.frames.latest();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(TITLE);

            ui.horizontal(|ui| {
                match &latest {
                    Some(frame) => {
                        ui.label(format!("Round: {} / {}", frame.round + 1, self.iterations));
                        ui.separator();
                        ui.label(format!("Live cells: {}", frame.live));
                    }
                    None => {
                        ui.label("Waiting for the first round...");
                    }
                }
                ui.separator();
                ui.label(format!("Threads: {}", self.workers));
                if self.frames.is_finished() {
                    ui.separator();
                    ui.label("Finished");
                }
            });

            // One swatch per worker
            ui.horizontal_wrapped(|ui| {
                for id in 0..self.workers {
                    ui.colored_label(worker_color(id), format!("■ {id}"));
                }
            });

            ui.separator();

            let Some(frame) = &latest else { return };
            if frame.rows == 0 || frame.cols == 0 {
                return;
            }

            // Fit the board to the space left, up to 15px cells
            let available = ui.available_size();
            let box_size = (available.x / frame.cols as f32)
                .min(available.y / frame.rows as f32)
                .clamp(1.0, 15.0);
            let spacing = if box_size >= 4.0 { 0.5 } else { 0.0 };
            let total_size = Vec2::new(box_size * frame.cols as f32, box_size * frame.rows as f32);

            let (response, painter) = ui.allocate_painter(total_size, egui::Sense::hover());
            let start_pos = response.rect.min;

            painter.rect_filled(response.rect, 0.0, self.dead_color);

            for row in 0..frame.rows {
                for col in 0..frame.cols {
                    let Some(owner) = frame.owner(row, col) else { continue };

                    let x = start_pos.x + col as f32 * box_size;
                    let y = start_pos.y + row as f32 * box_size;
                    let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(box_size - spacing));
                    painter.rect_filled(rect, 1.0, worker_color(owner));
                }
            }
        });

        // Keep polling for frames until the run is over
        if !self.frames.is_finished() {
            ctx.request_repaint_after(Duration::from_millis(16));
        }
    }
}

/// Run `simulation` on a background thread while the window shows its rounds.
/// Returns once the window is closed and the simulation is done.
pub fn run_viewer(simulation: Simulation, config: &Config) -> Result<Outcome, CliError> {
    let sink = Arc::new(FrameSink::new(config.frame_delay));
    let workers = simulation.partitions().len();
    let iterations = simulation.iterations();

    let runner = {
        let sink = Arc::clone(&sink);
        let reporter: Arc<dyn Reporter> = sink.clone();
        thread::Builder::new()
            .name("gol-dispatcher".into())
            .spawn(move || {
                let outcome = simulation.run(reporter);
                sink.mark_finished();
                outcome
            })
            .map_err(LifeError::Spawn)?
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 950.0]),
        ..Default::default()
    };
    let viewer = LifeViewer::new(Arc::clone(&sink), iterations, workers);
    let shown = eframe::run_native(TITLE, options, Box::new(move |_cc| Box::new(viewer)));

    sink.close();
    let outcome = runner
        .join()
        .map_err(|_| CliError::Viewer("simulation thread panicked".into()))??;
    shown.map_err(|err| CliError::Viewer(err.to_string()))?;
    Ok(outcome)
}
