use crate::sorting::trace::Trace;
use crate::sorting::{Algorithm, Highlight, SortError};

use super::SortEngine;

/// Top-down merge sort
///
/// Runs are addressed by their absolute range in the working array, so
/// every merge frame points at real positions rather than offsets into a
/// temporary buffer.
pub struct Merge;

impl Merge {
    fn sort_range(trace: &mut Trace<'_>, lo: usize, hi: usize) -> Result<(), SortError> {
        if hi - lo <= 1 {
            return Ok(());
        }

        let mid = lo + (hi - lo) / 2;
        Self::sort_range(trace, lo, mid)?;
        Self::sort_range(trace, mid, hi)?;
        Self::merge(trace, lo, mid, hi)
    }

    fn merge(trace: &mut Trace<'_>, lo: usize, mid: usize, hi: usize) -> Result<(), SortError> {
        trace.begin_pass();
        trace.mark_range(lo..hi, Highlight::Comparing)?;

        let left = trace.values()[lo..mid].to_vec();
        let right = trace.values()[mid..hi].to_vec();
        let mut merged = Vec::with_capacity(hi - lo);
        let (mut l, mut r) = (0, 0);

        // Ties take from the left run, keeping the merge stable
        while l < left.len() && r < right.len() {
            if left[l] > right[r] {
                merged.push(right[r]);
                r += 1;
            } else {
                merged.push(left[l]);
                l += 1;
            }
        }
        merged.extend_from_slice(&left[l..]);
        merged.extend_from_slice(&right[r..]);

        for (offset, value) in merged.into_iter().enumerate() {
            let position = lo + offset;
            if trace.get(position) != value {
                trace.set(position, value);
                trace.mark(position, Highlight::Swapping)?;
            }
            trace.mark(position, Highlight::Default)?;
        }

        Ok(())
    }
}

impl SortEngine for Merge {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Merge
    }

    fn sort(&self, trace: &mut Trace<'_>) -> Result<(), SortError> {
        let n = trace.len();
        Self::sort_range(trace, 0, n)
    }
}
