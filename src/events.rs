// Events that flow from the scheduler to the presentation layer
//
// A run is a stream of Frame events terminated by exactly one Completed or
// Failed marker. Using an enum allows pattern matching and ensures type-safe
// communication between the scheduler task and its consumer.

use crate::sorting::{Algorithm, Frame, Highlight, SortError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Item of a run's output stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")] // Creates JSON like {"type": "frame", ...}
pub enum RunEvent {
    /// One visual tick
    Frame(Frame),

    /// The run finished and every position has been marked done
    Completed {
        run_id: u64,
        algorithm: Algorithm,
        /// Frames delivered, including reset and the done pass
        frames: u64,
        passes: usize,
    },

    /// The run was aborted; no done pass was delivered
    Failed { run_id: u64, error: SortError },
}

impl RunEvent {
    /// Whether this event ends the stream
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunEvent::Frame(_))
    }
}

/// Counters for the status bar, accumulated from delivered frames
#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub frames: u64,
    pub comparisons: u64,
    pub swaps: u64,
    pub pivots: u64,
    pub elapsed: Duration,
}

impl Stats {
    /// Fold one delivered frame into the counters
    pub fn record(&mut self, frame: &Frame) {
        self.frames += 1;
        if frame.has_highlight(Highlight::Comparing) {
            self.comparisons += 1;
        }
        if frame.has_highlight(Highlight::Swapping) {
            self.swaps += 1;
        }
        if frame.has_highlight(Highlight::Pivot) {
            self.pivots += 1;
        }
    }

    /// Frames per second over the elapsed time
    pub fn frame_rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.frames as f64 / secs
        }
    }
}

/// Helper to generate ids for correlating a run's log lines and events
pub fn next_run_id() -> u64 {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(1);

    COUNTER.fetch_add(1, Ordering::SeqCst)
}
