//! Trace recorder: the working array of one run plus its frame output
//!
//! Engines never touch the sink or the emitter directly. They read and
//! mutate the working array through [`Trace`] and call the `mark*` helpers,
//! each of which produces exactly one frame.

use super::engines::SortEngine;
use super::frame::{Frame, FrameSink, TraceEmitter, Update};
use super::{Algorithm, Highlight, InvalidInput, SortError};
use std::ops::Range;

/// Outcome of a finished engine run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub algorithm: Algorithm,
    /// Final working array
    pub sorted: Vec<u32>,
    /// Frames emitted, including the initial reset
    pub frames: u64,
    /// Algorithm-level passes (outer loops, gaps, digits, extractions, candidates)
    pub passes: usize,
}

/// Working array plus frame output for a single run
pub struct Trace<'s> {
    values: Vec<u32>,
    emitter: TraceEmitter,
    sink: &'s mut dyn FrameSink,
    passes: usize,
}

impl<'s> Trace<'s> {
    pub fn new(initial: &[u32], sink: &'s mut dyn FrameSink) -> Self {
        Self {
            values: initial.to_vec(),
            emitter: TraceEmitter::new(initial.len()),
            sink,
            passes: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, i: usize) -> u32 {
        self.values[i]
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        self.values.swap(i, j);
    }

    pub fn set(&mut self, i: usize, value: u32) {
        self.values[i] = value;
    }

    /// Replace the whole working array (same length)
    pub fn replace(&mut self, values: Vec<u32>) -> Result<(), SortError> {
        if values.len() != self.values.len() {
            return Err(SortError::Fault(format!(
                "working array length changed from {} to {}",
                self.values.len(),
                values.len()
            )));
        }
        self.values = values;
        Ok(())
    }

    pub fn begin_pass(&mut self) {
        self.passes += 1;
    }

    pub fn passes(&self) -> usize {
        self.passes
    }

    fn send(&mut self, frame: Frame) -> Result<(), SortError> {
        self.sink.push(frame)
    }

    /// One position, current value
    pub fn mark(&mut self, i: usize, highlight: Highlight) -> Result<(), SortError> {
        let value = self.value_at(i)?;
        let frame = self.emitter.emit(i, value, highlight)?;
        self.send(frame)
    }

    /// Two positions in the same tick, current values
    pub fn mark_pair(
        &mut self,
        i: usize,
        j: usize,
        highlight: Highlight,
    ) -> Result<(), SortError> {
        let (a, b) = (self.value_at(i)?, self.value_at(j)?);
        let frame = self.emitter.emit_pair(i, a, j, b, highlight)?;
        self.send(frame)
    }

    /// Several positions with individual highlights, current values
    pub fn mark_many(
        &mut self,
        marks: impl IntoIterator<Item = (usize, Highlight)>,
    ) -> Result<(), SortError> {
        let updates = marks
            .into_iter()
            .map(|(position, highlight)| {
                Ok(Update {
                    position,
                    value: self.value_at(position)?,
                    highlight,
                })
            })
            .collect::<Result<Vec<_>, SortError>>()?;
        let frame = self.emitter.emit_batch(updates)?;
        self.send(frame)
    }

    /// A contiguous range in one highlight; empty ranges emit nothing
    pub fn mark_range(
        &mut self,
        range: Range<usize>,
        highlight: Highlight,
    ) -> Result<(), SortError> {
        if range.is_empty() {
            return Ok(());
        }
        self.mark_many(range.map(|i| (i, highlight)))
    }

    fn value_at(&self, i: usize) -> Result<u32, SortError> {
        self.values.get(i).copied().ok_or_else(|| {
            SortError::Fault(format!(
                "position {} out of range for length {}",
                i,
                self.values.len()
            ))
        })
    }

    fn into_report(self, algorithm: Algorithm) -> RunReport {
        RunReport {
            algorithm,
            frames: self.emitter.next_seq(),
            passes: self.passes,
            sorted: self.values,
        }
    }
}

/// Preconditions shared by every engine, followed by the engine's own
pub fn validate(engine: &dyn SortEngine, len: usize) -> Result<(), SortError> {
    if len == 0 {
        return Err(InvalidInput::Empty.into());
    }
    engine.validate(len)
}

/// Run an engine to completion, pushing frames into `sink`
///
/// Frame 0 resets every position to `Default`; the engine's frames follow.
pub fn run(
    engine: &dyn SortEngine,
    initial: &[u32],
    sink: &mut dyn FrameSink,
) -> Result<RunReport, SortError> {
    validate(engine, initial.len())?;

    let mut trace = Trace::new(initial, sink);
    trace.mark_range(0..initial.len(), Highlight::Default)?;
    engine.sort(&mut trace)?;

    let report = trace.into_report(engine.algorithm());
    tracing::trace!(
        algorithm = report.algorithm.id(),
        frames = report.frames,
        passes = report.passes,
        "Engine finished"
    );
    Ok(report)
}

/// Run an engine and collect every frame in memory
#[cfg(test)]
pub fn record(
    engine: &dyn SortEngine,
    initial: &[u32],
) -> Result<(Vec<Frame>, RunReport), SortError> {
    let mut frames = Vec::new();
    let report = run(engine, initial, &mut frames)?;
    Ok((frames, report))
}
