use crate::sorting::trace::Trace;
use crate::sorting::{Algorithm, Highlight, SortError};

use super::SortEngine;

/// Adjacent compare-and-swap; stops after a pass with no swap
pub struct Bubble;

impl SortEngine for Bubble {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Bubble
    }

    fn sort(&self, trace: &mut Trace<'_>) -> Result<(), SortError> {
        let n = trace.len();

        for end in (1..n).rev() {
            trace.begin_pass();
            let mut swapped = false;

            for j in 0..end {
                trace.mark_pair(j, j + 1, Highlight::Comparing)?;

                if trace.get(j) > trace.get(j + 1) {
                    trace.swap(j, j + 1);
                    trace.mark_pair(j, j + 1, Highlight::Swapping)?;
                    swapped = true;
                }

                trace.mark_pair(j, j + 1, Highlight::Default)?;
            }

            if !swapped {
                break;
            }
        }

        Ok(())
    }
}
