//! Sorting core: algorithms instrumented to emit animation frames
//!
//! Each algorithm runs against a private working copy of the array and
//! reports every comparison, swap and write as a sequence-numbered [`Frame`].
//! Timing is not decided here; the scheduler owns that.
//!
//! # Architecture
//!
//! ```text
//! initial values → SortEngine::sort(&mut Trace) → TraceEmitter → FrameSink
//!                                                   (Vec<Frame> | channel)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod engines;
pub mod frame;
pub mod sample;
pub mod trace;

pub use engines::{Limits, SortEngine};
pub use frame::{Frame, FrameSink, TraceEmitter, Update};
pub use trace::{RunReport, Trace};

// ─────────────────────────────────────────────────────────────────────────────
// Elements
// ─────────────────────────────────────────────────────────────────────────────

/// Role an element currently plays in the algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    #[default]
    Default,
    Comparing,
    /// Exchanged or freshly written values, and the scan cursor next to a pivot
    Swapping,
    Pivot,
    Done,
}

impl Highlight {
    /// Whether the element is mid-operation (anything but default/done)
    pub fn is_transient(self) -> bool {
        !matches!(self, Highlight::Default | Highlight::Done)
    }
}

/// A single bar: its value plus the highlight it is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Element {
    pub num: u32,
    pub highlight: Highlight,
}

impl Element {
    pub fn new(num: u32) -> Self {
        Self {
            num,
            highlight: Highlight::Default,
        }
    }
}

/// Build a fresh, unhighlighted element array from raw values
pub fn elements(values: &[u32]) -> Vec<Element> {
    values.iter().copied().map(Element::new).collect()
}

/// Apply a delivered frame to a snapshot
///
/// Updates outside the snapshot are ignored; the emitter has already
/// validated positions against the run length.
pub fn apply_frame(snapshot: &mut [Element], frame: &Frame) {
    for update in &frame.updates {
        if let Some(element) = snapshot.get_mut(update.position) {
            element.num = update.value;
            element.highlight = update.highlight;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Algorithms
// ─────────────────────────────────────────────────────────────────────────────

/// Every algorithm the visualizer can animate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Bitonic,
    Bogo,
    Bubble,
    Cocktail,
    Gnome,
    Heap,
    Insertion,
    Merge,
    Quick,
    Radix,
    Selection,
    Shell,
}

impl Algorithm {
    /// All algorithms in menu order
    pub const ALL: [Algorithm; 12] = [
        Algorithm::Bitonic,
        Algorithm::Bogo,
        Algorithm::Bubble,
        Algorithm::Cocktail,
        Algorithm::Gnome,
        Algorithm::Heap,
        Algorithm::Insertion,
        Algorithm::Merge,
        Algorithm::Quick,
        Algorithm::Radix,
        Algorithm::Selection,
        Algorithm::Shell,
    ];

    /// Identifier used on the command line and in config files
    pub fn id(&self) -> &'static str {
        match self {
            Algorithm::Bitonic => "bitonic",
            Algorithm::Bogo => "bogo",
            Algorithm::Bubble => "bubble",
            Algorithm::Cocktail => "cocktail",
            Algorithm::Gnome => "gnome",
            Algorithm::Heap => "heap",
            Algorithm::Insertion => "insertion",
            Algorithm::Merge => "merge",
            Algorithm::Quick => "quick",
            Algorithm::Radix => "radix",
            Algorithm::Selection => "selection",
            Algorithm::Shell => "shell",
        }
    }

    /// Human-readable menu label
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Bitonic => "Bitonic Sort",
            Algorithm::Bogo => "Bogo Sort",
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Cocktail => "Cocktail Sort",
            Algorithm::Gnome => "Gnome Sort",
            Algorithm::Heap => "Heap Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Merge => "Merge Sort",
            Algorithm::Quick => "Quick Sort",
            Algorithm::Radix => "Radix Sort",
            Algorithm::Selection => "Selection Sort",
            Algorithm::Shell => "Shell Sort",
        }
    }

    /// Next entry in a menu cycle that includes "nothing selected"
    pub fn cycle_next(current: Option<Algorithm>) -> Option<Algorithm> {
        match current {
            None => Some(Self::ALL[0]),
            Some(algorithm) => {
                let idx = Self::ALL.iter().position(|a| *a == algorithm).unwrap_or(0);
                Self::ALL.get(idx + 1).copied()
            }
        }
    }

    /// Previous entry in a menu cycle that includes "nothing selected"
    pub fn cycle_prev(current: Option<Algorithm>) -> Option<Algorithm> {
        match current {
            None => Self::ALL.last().copied(),
            Some(algorithm) => {
                let idx = Self::ALL.iter().position(|a| *a == algorithm).unwrap_or(0);
                idx.checked_sub(1).map(|i| Self::ALL[i])
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    /// Accepts the identifier ("quick"), the kebab form ("quick-sort")
    /// or the menu label ("Quick Sort"), case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        let stem = normalized.strip_suffix("-sort").unwrap_or(&normalized);

        Self::ALL
            .iter()
            .copied()
            .find(|a| a.id() == stem)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|a| a.id()).collect();
                format!("unknown algorithm '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Why a sort request's input was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidInput {
    /// No algorithm was selected
    NoAlgorithm,
    /// Requested size differs from the materialized array (regeneration in flight)
    SizeMismatch { requested: usize, actual: usize },
    /// Bitonic networks only exist for power-of-two lengths
    NotPowerOfTwo { len: usize },
    /// Nothing to sort
    Empty,
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAlgorithm => write!(f, "Please choose a sorting algorithm"),
            Self::SizeMismatch { requested, actual } => write!(
                f,
                "Requested {} elements but the array holds {}",
                requested, actual
            ),
            Self::NotPowerOfTwo { len } => {
                write!(f, "Number of elements must be a power of 2 (got {})", len)
            }
            Self::Empty => write!(f, "Array is empty"),
        }
    }
}

/// Errors raised by the sorting core and the scheduler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortError {
    /// Algorithm preconditions violated; reported before the run starts
    InvalidInput(InvalidInput),
    /// The algorithm's cost is factorial in the length and the length is over the bound
    ResourceExhaustion {
        algorithm: Algorithm,
        len: usize,
        max_len: usize,
    },
    /// Another run holds the lock
    Busy,
    /// Internal engine fault; the run is aborted
    Fault(String),
    /// The frame consumer went away mid-run
    Disconnected,
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(reason) => write!(f, "Invalid input: {}", reason),
            Self::ResourceExhaustion {
                algorithm,
                len,
                max_len,
            } => write!(
                f,
                "{} is limited to {} elements (got {})",
                algorithm, max_len, len
            ),
            Self::Busy => write!(f, "A sort is already in progress"),
            Self::Fault(msg) => write!(f, "Engine fault: {}", msg),
            Self::Disconnected => write!(f, "Frame consumer disconnected"),
        }
    }
}

impl std::error::Error for SortError {}

impl From<InvalidInput> for SortError {
    fn from(reason: InvalidInput) -> Self {
        SortError::InvalidInput(reason)
    }
}

/// Check that a slice is non-decreasing
pub fn is_sorted(values: &[u32]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}
