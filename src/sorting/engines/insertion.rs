use crate::sorting::trace::Trace;
use crate::sorting::{Algorithm, Highlight, SortError};

use super::SortEngine;

/// Swaps each new element left until its left neighbour is not greater
pub struct Insertion;

impl SortEngine for Insertion {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Insertion
    }

    fn sort(&self, trace: &mut Trace<'_>) -> Result<(), SortError> {
        let n = trace.len();

        for i in 1..n {
            trace.begin_pass();

            for j in (1..=i).rev() {
                trace.mark_pair(j, j - 1, Highlight::Comparing)?;

                let in_order = trace.get(j - 1) <= trace.get(j);
                if !in_order {
                    trace.swap(j - 1, j);
                    trace.mark_pair(j, j - 1, Highlight::Swapping)?;
                }

                trace.mark_pair(j, j - 1, Highlight::Default)?;

                if in_order {
                    break;
                }
            }
        }

        Ok(())
    }
}
