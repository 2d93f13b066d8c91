use crate::sorting::trace::Trace;
use crate::sorting::{Algorithm, Highlight, SortError};

use super::SortEngine;

/// Gapped insertion sort with gaps N/2, N/4, ..., 1
pub struct Shell;

impl SortEngine for Shell {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Shell
    }

    fn sort(&self, trace: &mut Trace<'_>) -> Result<(), SortError> {
        let n = trace.len();
        let mut gap = n / 2;

        while gap > 0 {
            trace.begin_pass();

            for i in gap..n {
                // Walk j = i - gap, i - 2*gap, ... while pairs are inverted
                let mut j = i - gap;
                loop {
                    trace.mark_pair(j, j + gap, Highlight::Comparing)?;

                    let in_order = trace.get(j) <= trace.get(j + gap);
                    if !in_order {
                        trace.swap(j, j + gap);
                        trace.mark_pair(j, j + gap, Highlight::Swapping)?;
                    }

                    trace.mark_pair(j, j + gap, Highlight::Default)?;

                    if in_order || j < gap {
                        break;
                    }
                    j -= gap;
                }
            }

            gap /= 2;
        }

        Ok(())
    }
}
