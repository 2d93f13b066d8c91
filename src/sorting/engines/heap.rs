use crate::sorting::trace::Trace;
use crate::sorting::{Algorithm, Highlight, SortError};

use super::SortEngine;

/// Heap sort over an implicit max-heap
///
/// Sift-down and extract-max are ordinary frames; the heap boundary
/// `end` shrinks by one after each extraction.
pub struct Heap;

impl Heap {
    /// Restore the heap property below `root` within `[0, end)`
    fn sift_down(trace: &mut Trace<'_>, end: usize, root: usize) -> Result<(), SortError> {
        let mut i = root;

        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let children: Vec<usize> = [left, right].into_iter().filter(|&c| c < end).collect();

            trace.mark_many(
                std::iter::once((i, Highlight::Pivot))
                    .chain(children.iter().map(|&c| (c, Highlight::Comparing))),
            )?;

            let mut largest = i;
            for &child in &children {
                if trace.get(child) > trace.get(largest) {
                    largest = child;
                }
            }

            if largest != i {
                trace.mark_pair(i, largest, Highlight::Swapping)?;
                trace.swap(i, largest);
                trace.mark_pair(i, largest, Highlight::Swapping)?;
                trace.mark_many([(i, Highlight::Comparing), (largest, Highlight::Pivot)])?;
            }

            trace.mark_many(
                std::iter::once((i, Highlight::Default))
                    .chain(children.iter().map(|&c| (c, Highlight::Default))),
            )?;

            if largest == i {
                return Ok(());
            }
            i = largest;
        }
    }
}

impl SortEngine for Heap {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Heap
    }

    fn sort(&self, trace: &mut Trace<'_>) -> Result<(), SortError> {
        let n = trace.len();

        for i in (0..n / 2).rev() {
            Self::sift_down(trace, n, i)?;
        }

        for end in (1..n).rev() {
            trace.begin_pass();
            trace.mark_pair(0, end, Highlight::Comparing)?;
            trace.swap(0, end);
            trace.mark_pair(0, end, Highlight::Swapping)?;
            trace.mark_pair(0, end, Highlight::Default)?;
            Self::sift_down(trace, end, 0)?;
        }

        Ok(())
    }
}
