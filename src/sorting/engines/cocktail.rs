use crate::sorting::trace::Trace;
use crate::sorting::{Algorithm, Highlight, SortError};

use super::SortEngine;

/// Bidirectional bubble sort
///
/// Each round sweeps forward over `[start, end]`, shrinks `end`, then sweeps
/// backward. A sweep without swaps means the window is sorted.
pub struct Cocktail;

impl SortEngine for Cocktail {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Cocktail
    }

    fn sort(&self, trace: &mut Trace<'_>) -> Result<(), SortError> {
        let n = trace.len();
        if n < 2 {
            return Ok(());
        }

        let mut start = 0;
        let mut end = n - 1;

        while start < end {
            trace.begin_pass();
            let mut forward_sorted = true;
            let mut backward_sorted = true;

            for i in start..end {
                trace.mark_pair(i, i + 1, Highlight::Comparing)?;

                if trace.get(i) > trace.get(i + 1) {
                    trace.swap(i, i + 1);
                    trace.mark_pair(i, i + 1, Highlight::Swapping)?;
                    forward_sorted = false;
                }

                trace.mark_pair(i, i + 1, Highlight::Default)?;
            }

            end -= 1;

            if !forward_sorted {
                for i in (start + 1..=end).rev() {
                    trace.mark_pair(i, i - 1, Highlight::Comparing)?;

                    if trace.get(i) < trace.get(i - 1) {
                        trace.swap(i, i - 1);
                        trace.mark_pair(i, i - 1, Highlight::Swapping)?;
                        backward_sorted = false;
                    }

                    trace.mark_pair(i, i - 1, Highlight::Default)?;
                }
            }

            if forward_sorted || backward_sorted {
                break;
            }
            start += 1;
        }

        Ok(())
    }
}
