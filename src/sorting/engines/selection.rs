use crate::sorting::trace::Trace;
use crate::sorting::{Algorithm, Highlight, SortError};

use super::SortEngine;

/// Linear scan for the suffix minimum, one swap per pass at most
///
/// The pass start and the running minimum carry the `Pivot` highlight;
/// once a smaller element takes over, the pass start drops to `Comparing`
/// until the final swap.
pub struct Selection;

impl SortEngine for Selection {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Selection
    }

    fn sort(&self, trace: &mut Trace<'_>) -> Result<(), SortError> {
        let n = trace.len();

        for i in 0..n.saturating_sub(1) {
            trace.begin_pass();
            let mut min = i;

            trace.mark(i, Highlight::Pivot)?;

            for j in i + 1..n {
                trace.mark(j, Highlight::Comparing)?;

                if trace.get(j) < trace.get(min) {
                    let previous = if min == i {
                        (i, Highlight::Comparing)
                    } else {
                        (min, Highlight::Default)
                    };
                    trace.mark_many([previous, (j, Highlight::Pivot)])?;
                    min = j;
                } else {
                    trace.mark(j, Highlight::Default)?;
                }
            }

            if min == i {
                trace.mark(i, Highlight::Default)?;
            } else {
                trace.mark(min, Highlight::Comparing)?;
                trace.swap(i, min);
                trace.mark_pair(i, min, Highlight::Swapping)?;
                trace.mark_pair(i, min, Highlight::Default)?;
            }
        }

        Ok(())
    }
}
