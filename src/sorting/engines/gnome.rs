use crate::sorting::trace::Trace;
use crate::sorting::{Algorithm, Highlight, SortError};

use super::SortEngine;

/// Walks forward while ordered, steps back after swapping an inversion
pub struct Gnome;

impl Gnome {
    /// Highlight the cursor and, when it has one, its left neighbour
    fn mark_cursor(trace: &mut Trace<'_>, i: usize, highlight: Highlight) -> Result<(), SortError> {
        if i == 0 {
            trace.mark(i, highlight)
        } else {
            trace.mark_pair(i, i - 1, highlight)
        }
    }
}

impl SortEngine for Gnome {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Gnome
    }

    fn sort(&self, trace: &mut Trace<'_>) -> Result<(), SortError> {
        let n = trace.len();
        let mut i = 0;

        while i < n {
            Self::mark_cursor(trace, i, Highlight::Comparing)?;

            if i == 0 || trace.get(i) >= trace.get(i - 1) {
                Self::mark_cursor(trace, i, Highlight::Default)?;
                i += 1;
            } else {
                trace.swap(i, i - 1);
                trace.mark_pair(i, i - 1, Highlight::Swapping)?;
                trace.mark_pair(i, i - 1, Highlight::Default)?;
                i -= 1;
            }
        }

        Ok(())
    }
}
