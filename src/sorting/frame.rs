//! Frames and the trace emitter
//!
//! A [`Frame`] is one visual tick: the positions it touches, their new
//! values and highlights, and a sequence number. The [`TraceEmitter`] only
//! builds frames; it validates positions and numbers frames but never
//! recomputes values or decides when a frame is shown.

use super::{Highlight, SortError};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// New state for a single position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    pub position: usize,
    pub value: u32,
    pub highlight: Highlight,
}

/// One atomic visual update, ordered by `seq`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub seq: u64,
    pub updates: Vec<Update>,
}

impl Frame {
    /// Whether any update in this frame carries the given highlight
    pub fn has_highlight(&self, highlight: Highlight) -> bool {
        self.updates.iter().any(|u| u.highlight == highlight)
    }
}

/// Builds sequence-numbered frames for an array of fixed length
#[derive(Debug, Clone)]
pub struct TraceEmitter {
    len: usize,
    next_seq: u64,
}

impl TraceEmitter {
    pub fn new(len: usize) -> Self {
        Self::resume(len, 0)
    }

    /// Continue numbering after frames produced elsewhere
    pub fn resume(len: usize, next_seq: u64) -> Self {
        Self { len, next_seq }
    }

    /// Sequence number the next frame will carry
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    pub fn emit(
        &mut self,
        position: usize,
        value: u32,
        highlight: Highlight,
    ) -> Result<Frame, SortError> {
        self.emit_batch(vec![Update {
            position,
            value,
            highlight,
        }])
    }

    /// Two positions updated in the same tick (swap-style synchrony)
    pub fn emit_pair(
        &mut self,
        pos_a: usize,
        value_a: u32,
        pos_b: usize,
        value_b: u32,
        highlight: Highlight,
    ) -> Result<Frame, SortError> {
        self.emit_batch(vec![
            Update {
                position: pos_a,
                value: value_a,
                highlight,
            },
            Update {
                position: pos_b,
                value: value_b,
                highlight,
            },
        ])
    }

    /// Any number of positions in one tick, each with its own highlight
    pub fn emit_batch(&mut self, updates: Vec<Update>) -> Result<Frame, SortError> {
        if updates.is_empty() {
            return Err(SortError::Fault("empty frame".to_string()));
        }
        if let Some(bad) = updates.iter().find(|u| u.position >= self.len) {
            return Err(SortError::Fault(format!(
                "position {} out of range for length {}",
                bad.position, self.len
            )));
        }

        let frame = Frame {
            seq: self.next_seq,
            updates,
        };
        self.next_seq += 1;
        Ok(frame)
    }
}

/// Destination for frames as an engine produces them
///
/// Each `push` is a suspension point: a channel-backed sink blocks until the
/// scheduler has room, so engines never run far ahead of delivery.
pub trait FrameSink {
    fn push(&mut self, frame: Frame) -> Result<(), SortError>;
}

impl FrameSink for Vec<Frame> {
    fn push(&mut self, frame: Frame) -> Result<(), SortError> {
        Vec::push(self, frame);
        Ok(())
    }
}

/// Channel sink used from the scheduler's blocking producer task
impl FrameSink for mpsc::Sender<Frame> {
    fn push(&mut self, frame: Frame) -> Result<(), SortError> {
        self.blocking_send(frame)
            .map_err(|_| SortError::Disconnected)
    }
}
