use crate::sorting::trace::Trace;
use crate::sorting::{Algorithm, Highlight, SortError};

use super::SortEngine;

/// Quick sort with a Hoare-style partition around the first element
///
/// Ranges are half-open `[lo, hi)`. Pending ranges live on an explicit
/// stack (depth can reach N on sorted input); the left side is always
/// processed before the right, matching the recursive visiting order.
pub struct Quick;

impl Quick {
    /// Partition `[lo, hi)` and return the pivot's final position
    fn partition(trace: &mut Trace<'_>, lo: usize, hi: usize) -> Result<usize, SortError> {
        let pivot = trace.get(lo);
        let mut i = lo;
        let mut j = hi;

        trace.mark_many(
            std::iter::once((lo, Highlight::Pivot))
                .chain((lo + 1..hi).map(|idx| (idx, Highlight::Comparing))),
        )?;

        while i < j {
            // Advance i past elements that belong left of the pivot
            loop {
                i += 1;
                if i != hi {
                    trace.mark(i, Highlight::Swapping)?;
                    if trace.get(i) <= pivot {
                        trace.mark(i, Highlight::Comparing)?;
                    }
                }
                if i == hi || trace.get(i) > pivot {
                    break;
                }
            }

            // Retreat j past elements that belong right of the pivot
            loop {
                j -= 1;
                if j != lo && j != i {
                    trace.mark(j, Highlight::Swapping)?;
                    if trace.get(j) > pivot {
                        trace.mark(j, Highlight::Comparing)?;
                    }
                }
                if j == lo || trace.get(j) <= pivot {
                    break;
                }
            }

            if i < j {
                trace.swap(i, j);
                trace.mark_pair(i, j, Highlight::Swapping)?;
            }

            let mut settle = Vec::with_capacity(2);
            if i != hi {
                settle.push((i, Highlight::Comparing));
            }
            if j != lo {
                settle.push((j, Highlight::Comparing));
            }
            if !settle.is_empty() {
                trace.mark_many(settle)?;
            }
        }

        if j != lo {
            trace.mark(j, Highlight::Swapping)?;
            trace.swap(lo, j);
            trace.mark_many([(j, Highlight::Pivot), (lo, Highlight::Swapping)])?;
        }

        trace.mark_range(lo..hi, Highlight::Default)?;
        Ok(j)
    }
}

impl SortEngine for Quick {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Quick
    }

    fn sort(&self, trace: &mut Trace<'_>) -> Result<(), SortError> {
        let mut pending = vec![(0, trace.len())];

        while let Some((lo, hi)) = pending.pop() {
            if lo >= hi {
                continue;
            }
            trace.begin_pass();
            let p = Self::partition(trace, lo, hi)?;

            pending.push((p + 1, hi));
            pending.push((lo, p));
        }

        Ok(())
    }
}
