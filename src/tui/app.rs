// TUI application state
//
// The bars on screen are a replay of the delivered frames. Between runs they
// hold the last result (or a fresh random array); during a run they only
// change when a frame arrives.

use crate::config::{Config, SampleConfig};
use crate::events::{RunEvent, Stats};
use crate::logging::LogBuffer;
use crate::scheduler::{FrameStream, Scheduler};
use crate::sorting::sample;
use crate::sorting::{apply_frame, elements, Algorithm, Element, SortError};
use rand::rngs::StdRng;
use std::time::Instant;

/// One line of feedback under the bars
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub is_error: bool,
}

impl Status {
    fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}

/// Main application state for the TUI
pub struct App {
    /// Current bars, as last drawn
    pub bars: Vec<Element>,

    /// Selected algorithm (None until the user picks one)
    pub algorithm: Option<Algorithm>,

    /// Requested sample size; may differ from `bars.len()` if changed mid-run
    pub size: usize,

    sample: SampleConfig,

    scheduler: Scheduler,

    /// Event stream of the active run
    pub stream: Option<FrameStream>,

    /// Counters for the active or last run
    pub stats: Stats,

    run_started: Option<Instant>,

    pub status: Status,

    /// Log buffer for the log panel
    pub log_buffer: LogBuffer,

    rng: StdRng,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &Config, log_buffer: LogBuffer) -> Self {
        Self::with_parts(
            config,
            Scheduler::new(config.scheduler_config()),
            log_buffer,
            sample::sample_rng(None),
        )
    }

    pub fn with_parts(
        config: &Config,
        scheduler: Scheduler,
        log_buffer: LogBuffer,
        mut rng: StdRng,
    ) -> Self {
        let size = config.sample.clamp(config.sample.size);
        let bars = elements(&sample::values(&mut rng, size));

        Self {
            bars,
            algorithm: config.algorithm,
            size,
            sample: config.sample.clone(),
            scheduler,
            stream: None,
            stats: Stats::default(),
            run_started: None,
            status: Status::info("Pick an algorithm with ←/→ and press Enter"),
            log_buffer,
            rng,
            should_quit: false,
        }
    }

    /// True while a run's stream is being drained
    pub fn is_running(&self) -> bool {
        self.stream.is_some()
    }

    /// Title bar summary of the scheduler's current or last run
    pub fn run_label(&self) -> String {
        let state = self.scheduler.run_state();
        match state.run_id {
            None => "idle".to_string(),
            Some(id) if self.scheduler.is_running() => {
                format!("run #{} {}", id, state.phase.as_str())
            }
            Some(id) if state.completed => format!("run #{} done", id),
            Some(id) => format!("run #{} stopped", id),
        }
    }

    pub fn values(&self) -> Vec<u32> {
        self.bars.iter().map(|e| e.num).collect()
    }

    // ─── Controls ───

    pub fn next_algorithm(&mut self) {
        self.algorithm = Algorithm::cycle_next(self.algorithm);
    }

    pub fn prev_algorithm(&mut self) {
        self.algorithm = Algorithm::cycle_prev(self.algorithm);
    }

    /// Change the requested size; bars follow only when no run is active
    pub fn resize(&mut self, delta: isize) {
        let requested = self.size.saturating_add_signed(delta);
        let size = self.sample.clamp(requested);
        if size == self.size {
            return;
        }
        self.size = size;
        if !self.is_running() {
            self.regenerate();
        }
    }

    /// Fresh random bars at the requested size; ignored during a run
    pub fn regenerate(&mut self) {
        if self.is_running() {
            return;
        }
        self.bars = elements(&sample::values(&mut self.rng, self.size));
        self.stats = Stats::default();
        self.status = Status::info(format!("New array of {} values", self.size));
    }

    /// Ask the scheduler for a run over the current bars
    ///
    /// A rejection leaves the bars untouched and is shown in the status line.
    /// The scheduler frees its lock before the last buffered events arrive,
    /// so the app's own stream decides whether a run is still in flight.
    pub fn start_sort(&mut self) {
        if self.is_running() {
            self.status = Status::error("A sort is already in progress");
            return;
        }
        let values = self.values();
        match self.scheduler.request_sort(self.algorithm, self.size, &values) {
            Ok(stream) => {
                self.stream = Some(stream);
                self.stats = Stats::default();
                self.run_started = Some(Instant::now());
                if let Some(algorithm) = self.algorithm {
                    self.status = Status::info(format!("Running {}...", algorithm));
                }
            }
            Err(e) => self.status = Status::error(rejection_message(&e)),
        }
    }

    // ─── Run events ───

    pub fn apply_event(&mut self, event: RunEvent) {
        match event {
            RunEvent::Frame(frame) => {
                apply_frame(&mut self.bars, &frame);
                self.stats.record(&frame);
            }
            RunEvent::Completed {
                algorithm,
                frames,
                passes,
                ..
            } => {
                self.finish_run();
                self.status = Status::info(format!(
                    "{} finished: {} frames, {} passes",
                    algorithm, frames, passes
                ));
            }
            RunEvent::Failed { error, .. } => {
                self.finish_run();
                self.status = Status::error(format!("Run failed: {}", error));
            }
        }
    }

    /// The stream closed without a terminal marker
    pub fn stream_closed(&mut self) {
        if self.is_running() {
            self.finish_run();
            self.status = Status::error("Run ended unexpectedly");
        }
    }

    fn finish_run(&mut self) {
        self.stream = None;
        self.tick();
        self.run_started = None;
    }

    /// Refresh time-based counters
    pub fn tick(&mut self) {
        if let Some(started) = self.run_started {
            self.stats.elapsed = started.elapsed();
        }
    }
}

fn rejection_message(error: &SortError) -> String {
    match error {
        SortError::Busy => "A sort is already running".to_string(),
        other => format!("Cannot sort: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::SchedulerConfig;
    use crate::sorting::{is_sorted, Highlight};
    use futures::StreamExt;
    use std::time::Duration;

    fn test_app(size: usize) -> App {
        let mut config = Config::default();
        config.sample.size = size;
        let scheduler = Scheduler::new(SchedulerConfig {
            base_duration: Duration::ZERO,
            ..Default::default()
        });
        App::with_parts(
            &config,
            scheduler,
            LogBuffer::new(),
            sample::sample_rng(Some(1)),
        )
    }

    async fn drain(app: &mut App) {
        while let Some(stream) = app.stream.as_mut() {
            match stream.next().await {
                Some(event) => app.apply_event(event),
                None => app.stream_closed(),
            }
        }
    }

    #[test]
    fn test_initial_bars_match_size() {
        let app = test_app(16);
        assert_eq!(app.bars.len(), 16);
        assert_eq!(app.algorithm, None);
        assert!(!app.is_running());
        assert_eq!(app.run_label(), "idle");
    }

    #[test]
    fn test_resize_clamps_and_regenerates() {
        let mut app = test_app(10);
        app.resize(-100);
        assert_eq!(app.size, 2);
        assert_eq!(app.bars.len(), 2);

        app.resize(1000);
        assert_eq!(app.size, 100);
        assert_eq!(app.bars.len(), 100);
    }

    #[test]
    fn test_algorithm_cycles_through_none() {
        let mut app = test_app(4);
        app.prev_algorithm();
        let last = app.algorithm;
        assert!(last.is_some());
        app.next_algorithm();
        assert_eq!(app.algorithm, None);
    }

    #[test]
    fn test_sort_without_algorithm_is_rejected() {
        let mut app = test_app(5);
        let before = app.values();
        app.start_sort();

        assert!(!app.is_running());
        assert!(app.status.is_error);
        assert_eq!(app.values(), before);
    }

    #[tokio::test]
    async fn test_full_run_leaves_sorted_done_bars() {
        let mut app = test_app(12);
        app.algorithm = Some(Algorithm::Heap);
        app.start_sort();
        assert!(app.is_running());

        drain(&mut app).await;

        assert!(!app.is_running());
        assert!(!app.status.is_error);
        assert!(is_sorted(&app.values()));
        assert!(app.bars.iter().all(|e| e.highlight == Highlight::Done));
        assert!(app.stats.frames > 12);
        assert!(app.run_label().ends_with("done"));
    }

    #[tokio::test]
    async fn test_regenerate_ignored_while_running() {
        let mut app = test_app(6);
        app.algorithm = Some(Algorithm::Bubble);
        app.start_sort();

        let before = app.values();
        app.regenerate();
        assert_eq!(app.values(), before);

        drain(&mut app).await;
    }

    #[tokio::test]
    async fn test_start_ignored_until_stream_drained() {
        let mut app = test_app(3);
        app.algorithm = Some(Algorithm::Insertion);
        let initial = app.values();
        app.start_sort();

        // Instant run: the scheduler goes idle while events sit in the buffer
        tokio::time::sleep(Duration::from_millis(50)).await;
        app.start_sort();

        assert!(app.status.is_error);
        assert!(app.status.message.contains("in progress"));
        assert_eq!(app.values(), initial);

        drain(&mut app).await;
        assert!(!app.status.is_error);
        assert!(is_sorted(&app.values()));
        assert!(app.bars.iter().all(|e| e.highlight == Highlight::Done));
    }

    #[tokio::test]
    async fn test_resize_mid_run_causes_size_mismatch() {
        let mut app = test_app(6);
        app.algorithm = Some(Algorithm::Selection);
        app.start_sort();
        app.resize(2);

        assert_eq!(app.bars.len(), 6);
        drain(&mut app).await;

        app.start_sort();
        assert!(!app.is_running());
        assert!(app.status.message.contains("Requested 8"));

        app.regenerate();
        assert_eq!(app.bars.len(), 8);
        app.start_sort();
        assert!(app.is_running());
        drain(&mut app).await;
    }
}
