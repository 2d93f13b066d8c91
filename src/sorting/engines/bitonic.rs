use crate::sorting::trace::Trace;
use crate::sorting::{Algorithm, Highlight, InvalidInput, SortError};

use super::SortEngine;

/// Recursive bitonic sorting network; lengths must be powers of two
pub struct Bitonic;

impl Bitonic {
    /// Sort `count` elements from `low`, ascending or descending
    fn sort_run(
        trace: &mut Trace<'_>,
        low: usize,
        count: usize,
        ascending: bool,
    ) -> Result<(), SortError> {
        if count <= 1 {
            return Ok(());
        }

        let k = count / 2;
        Self::sort_run(trace, low, k, true)?;
        Self::sort_run(trace, low + k, k, false)?;
        Self::merge(trace, low, count, ascending)
    }

    /// Merge a bitonic run of `count` elements into one direction
    fn merge(
        trace: &mut Trace<'_>,
        low: usize,
        count: usize,
        ascending: bool,
    ) -> Result<(), SortError> {
        if count <= 1 {
            return Ok(());
        }

        trace.begin_pass();
        trace.mark_range(low..low + count, Highlight::Comparing)?;

        let k = count / 2;
        for i in low..low + k {
            trace.mark_pair(i, i + k, Highlight::Swapping)?;

            if (trace.get(i) > trace.get(i + k)) == ascending {
                trace.swap(i, i + k);
                trace.mark_pair(i, i + k, Highlight::Swapping)?;
            }

            trace.mark_pair(i, i + k, Highlight::Comparing)?;
        }

        trace.mark_range(low..low + count, Highlight::Default)?;

        Self::merge(trace, low, k, ascending)?;
        Self::merge(trace, low + k, k, ascending)
    }
}

impl SortEngine for Bitonic {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Bitonic
    }

    fn validate(&self, len: usize) -> Result<(), SortError> {
        if len.is_power_of_two() {
            Ok(())
        } else {
            Err(InvalidInput::NotPowerOfTwo { len }.into())
        }
    }

    fn sort(&self, trace: &mut Trace<'_>) -> Result<(), SortError> {
        let n = trace.len();
        Self::sort_run(trace, 0, n, true)
    }
}
