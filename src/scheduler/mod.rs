//! Run scheduler: turns an engine's frames into a timed stream
//!
//! The scheduler owns the only [`RunState`] and with it the global
//! "sort in progress" lock. A request is validated synchronously; on
//! success the engine runs on a blocking task and pushes frames into a
//! channel of capacity one, while a delivery task forwards them to the
//! consumer with a fixed delay between frames.
//!
//! # State machine
//!
//! ```text
//! Idle ──request_sort──▶ Running ──engine done──▶ Completing ──done pass──▶ Idle
//!                           │
//!                           └──engine error / panic / consumer gone──▶ Idle
//! ```

use crate::events::{next_run_id, RunEvent};
use crate::sorting::frame::{Frame, TraceEmitter};
use crate::sorting::{
    trace, Algorithm, Highlight, InvalidInput, Limits, RunReport, SortEngine, SortError,
};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;

/// Total animation time the per-frame delay is derived from
pub const DEFAULT_BASE_DURATION: Duration = Duration::from_millis(500);

/// Frames buffered between the delivery task and the consumer
const EVENT_BUFFER: usize = 64;

/// Ordered stream of a single run's events
pub type FrameStream = ReceiverStream<RunEvent>;

/// Scheduler lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Completing,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Completing => "completing",
        }
    }
}

/// The one run the scheduler tracks
#[derive(Debug, Clone, Default)]
pub struct RunState {
    pub phase: Phase,
    pub run_id: Option<u64>,
    pub algorithm: Option<Algorithm>,
    pub len: usize,
    /// Array snapshot at request time
    pub initial: Vec<u32>,
    /// Set when the last run delivered its done pass
    pub completed: bool,
}

/// Timing and resource settings for runs
#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    pub base_duration: Duration,
    pub limits: Limits,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            base_duration: DEFAULT_BASE_DURATION,
            limits: Limits::default(),
        }
    }
}

/// Delay between frames: `base / len`, so total duration stays roughly
/// constant across array sizes
pub fn frame_delay(base: Duration, len: usize) -> Duration {
    let divisor = u32::try_from(len.max(1)).unwrap_or(u32::MAX);
    base / divisor
}

/// Sequences engine frames into real time, one run at a time
#[derive(Clone)]
pub struct Scheduler {
    state: Arc<Mutex<RunState>>,
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(RunState::default())),
            config,
        }
    }

    pub fn phase(&self) -> Phase {
        lock(&self.state).phase
    }

    pub fn is_running(&self) -> bool {
        self.phase() != Phase::Idle
    }

    /// Snapshot of the current run state
    pub fn run_state(&self) -> RunState {
        lock(&self.state).clone()
    }

    /// Validate a request and start streaming its frames
    ///
    /// Rejections happen before the lock is taken and before any frame is
    /// produced, so a rejected request leaves the caller's array untouched.
    /// Must be called from within a tokio runtime.
    pub fn request_sort(
        &self,
        algorithm: Option<Algorithm>,
        len: usize,
        values: &[u32],
    ) -> Result<FrameStream, SortError> {
        let algorithm = algorithm.ok_or(SortError::InvalidInput(InvalidInput::NoAlgorithm))?;
        self.start(algorithm.engine(&self.config.limits), len, values)
    }

    /// Take the lock and spawn the engine and delivery tasks
    fn start(
        &self,
        engine: Box<dyn SortEngine>,
        len: usize,
        values: &[u32],
    ) -> Result<FrameStream, SortError> {
        let algorithm = engine.algorithm();
        let run_id = {
            let mut state = lock(&self.state);
            if state.phase != Phase::Idle {
                tracing::warn!(algorithm = algorithm.id(), "Sort rejected: run in progress");
                return Err(SortError::Busy);
            }
            if values.len() != len {
                return Err(InvalidInput::SizeMismatch {
                    requested: len,
                    actual: values.len(),
                }
                .into());
            }
            if let Err(e) = trace::validate(engine.as_ref(), len) {
                tracing::warn!(algorithm = algorithm.id(), len, "Sort rejected: {}", e);
                return Err(e);
            }

            let run_id = next_run_id();
            *state = RunState {
                phase: Phase::Running,
                run_id: Some(run_id),
                algorithm: Some(algorithm),
                len,
                initial: values.to_vec(),
                completed: false,
            };
            run_id
        };

        tracing::info!(
            run_id,
            algorithm = algorithm.id(),
            len,
            "Sort started ({})",
            algorithm
        );

        // Capacity 1: the engine blocks on every frame until delivery takes it
        let (frame_tx, frame_rx) = mpsc::channel::<Frame>(1);
        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);

        let initial = values.to_vec();
        let producer = tokio::task::spawn_blocking(move || {
            let mut sink = frame_tx;
            trace::run(engine.as_ref(), &initial, &mut sink)
        });

        let delivery = Delivery {
            run_id,
            len,
            delay: frame_delay(self.config.base_duration, len),
            state: self.state.clone(),
            events: event_tx,
        };
        tokio::spawn(delivery.run(frame_rx, producer));

        Ok(ReceiverStream::new(event_rx))
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

/// Lock the run state, recovering from a poisoned mutex
fn lock(state: &Mutex<RunState>) -> MutexGuard<'_, RunState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Delivery half of a run; lives on its own task
struct Delivery {
    run_id: u64,
    len: usize,
    delay: Duration,
    state: Arc<Mutex<RunState>>,
    events: mpsc::Sender<RunEvent>,
}

impl Delivery {
    async fn run(
        self,
        mut frames: mpsc::Receiver<Frame>,
        producer: JoinHandle<Result<RunReport, SortError>>,
    ) {
        let mut delivered: u64 = 0;

        while let Some(frame) = frames.recv().await {
            if !self.send(RunEvent::Frame(frame)).await {
                // Consumer dropped the stream; closing the channel stops the engine
                tracing::debug!(run_id = self.run_id, "Frame consumer gone, aborting run");
                drop(frames);
                let _ = producer.await;
                self.finish(Phase::Idle, false);
                return;
            }
            delivered += 1;
            tokio::time::sleep(self.delay).await;
        }

        let report = match producer.await {
            Ok(Ok(report)) => report,
            Ok(Err(error)) => return self.fail(error).await,
            Err(join_error) => return self.fail(SortError::Fault(join_error.to_string())).await,
        };

        self.set_phase(Phase::Completing);
        let mut emitter = TraceEmitter::resume(self.len, report.frames);
        for (position, &value) in report.sorted.iter().enumerate() {
            let frame = match emitter.emit(position, value, Highlight::Done) {
                Ok(frame) => frame,
                Err(error) => return self.fail(error).await,
            };
            if !self.send(RunEvent::Frame(frame)).await {
                self.finish(Phase::Idle, false);
                return;
            }
            delivered += 1;
            tokio::time::sleep(self.delay).await;
        }

        // Release the lock before announcing completion so the consumer can
        // immediately start another run
        self.finish(Phase::Idle, true);
        tracing::info!(
            run_id = self.run_id,
            algorithm = report.algorithm.id(),
            frames = delivered,
            passes = report.passes,
            "Sort completed"
        );
        self.send(RunEvent::Completed {
            run_id: self.run_id,
            algorithm: report.algorithm,
            frames: delivered,
            passes: report.passes,
        })
        .await;
    }

    async fn send(&self, event: RunEvent) -> bool {
        self.events.send(event).await.is_ok()
    }

    async fn fail(&self, error: SortError) {
        tracing::error!(run_id = self.run_id, "Sort failed: {}", error);
        self.finish(Phase::Idle, false);
        self.send(RunEvent::Failed {
            run_id: self.run_id,
            error,
        })
        .await;
    }

    fn set_phase(&self, phase: Phase) {
        tracing::debug!(run_id = self.run_id, ?phase, "Scheduler phase change");
        lock(&self.state).phase = phase;
    }

    fn finish(&self, phase: Phase, completed: bool) {
        let mut state = lock(&self.state);
        state.phase = phase;
        state.completed = completed;
    }
}
