//! Algorithm engines
//!
//! One engine per algorithm. An engine is timing-agnostic: it reads and
//! mutates the working array through a [`Trace`] and emits frames in the
//! order a viewer should see them. Preconditions are checked in
//! [`SortEngine::validate`] so rejected requests produce zero frames.

use super::trace::Trace;
use super::{Algorithm, SortError};

mod bitonic;
mod bogo;
mod bubble;
mod cocktail;
mod gnome;
mod heap;
mod insertion;
mod merge;
mod quick;
mod radix;
mod selection;
mod shell;

pub use bitonic::Bitonic;
pub use bogo::Bogo;
pub use bubble::Bubble;
pub use cocktail::Cocktail;
pub use gnome::Gnome;
pub use heap::Heap;
pub use insertion::Insertion;
pub use merge::Merge;
pub use quick::Quick;
pub use radix::Radix;
pub use selection::Selection;
pub use shell::Shell;

/// Default upper bound on bogo sort input length (8! = 40320 candidates)
pub const DEFAULT_BOGO_MAX_LEN: usize = 8;

/// Hard ceiling for a configured bogo bound (10! = 3628800 candidates)
pub const BOGO_MAX_LEN_CEILING: usize = 10;

/// Trait for instrumented sorting algorithms
///
/// # Sync Design
///
/// `sort` is synchronous. Every frame it emits goes through the trace's
/// sink; when that sink is the scheduler's bounded channel the call blocks
/// until delivery catches up, which makes each frame a suspension point.
pub trait SortEngine: Send + Sync {
    fn algorithm(&self) -> Algorithm;

    /// Check algorithm-specific preconditions for an array of `len` elements
    fn validate(&self, _len: usize) -> Result<(), SortError> {
        Ok(())
    }

    /// Sort the trace's working array, emitting frames as it goes
    fn sort(&self, trace: &mut Trace<'_>) -> Result<(), SortError>;
}

/// Resource bounds applied when building engines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub bogo_max_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            bogo_max_len: DEFAULT_BOGO_MAX_LEN,
        }
    }
}

impl Algorithm {
    /// Build the engine for this algorithm
    pub fn engine(&self, limits: &Limits) -> Box<dyn SortEngine> {
        match self {
            Algorithm::Bitonic => Box::new(Bitonic),
            Algorithm::Bogo => Box::new(Bogo {
                max_len: limits.bogo_max_len,
            }),
            Algorithm::Bubble => Box::new(Bubble),
            Algorithm::Cocktail => Box::new(Cocktail),
            Algorithm::Gnome => Box::new(Gnome),
            Algorithm::Heap => Box::new(Heap),
            Algorithm::Insertion => Box::new(Insertion),
            Algorithm::Merge => Box::new(Merge),
            Algorithm::Quick => Box::new(Quick),
            Algorithm::Radix => Box::new(Radix),
            Algorithm::Selection => Box::new(Selection),
            Algorithm::Shell => Box::new(Shell),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::trace::record;
    use crate::sorting::{apply_frame, elements, Frame, Highlight, InvalidInput};
    use proptest::prelude::*;

    /// Replay frames over the initial array, dropping highlights
    fn replay(initial: &[u32], frames: &[Frame]) -> Vec<u32> {
        let mut snapshot = elements(initial);
        for frame in frames {
            apply_frame(&mut snapshot, frame);
        }
        snapshot.into_iter().map(|e| e.num).collect()
    }

    fn swap_frames(algorithm: Algorithm, input: &[u32]) -> usize {
        let engine = algorithm.engine(&Limits::default());
        let (frames, _) = record(engine.as_ref(), input).unwrap();
        frames
            .iter()
            .filter(|f| f.has_highlight(Highlight::Swapping))
            .count()
    }

    /// Inputs every engine must handle (bitonic needs power-of-two lengths)
    fn fixtures() -> Vec<Vec<u32>> {
        vec![
            vec![42],
            vec![2, 1],
            vec![5, 5, 5, 5],
            vec![8, 7, 6, 5, 4, 3, 2, 1],
            vec![1, 2, 3, 4, 5, 6, 7, 8],
            vec![30, 5, 100, 5, 67, 30, 12, 99],
            vec![3, 1, 2],
            vec![9, 1, 8, 2, 7, 3],
            vec![
                55, 12, 99, 5, 34, 34, 78, 100, 6, 41, 23, 67, 89, 10, 5, 71,
            ],
        ]
    }

    #[test]
    fn test_every_engine_replays_to_reference_sort() {
        let limits = Limits::default();
        for algorithm in Algorithm::ALL {
            let engine = algorithm.engine(&limits);
            for input in fixtures() {
                if engine.validate(input.len()).is_err() {
                    continue;
                }
                let (frames, report) = record(engine.as_ref(), &input).unwrap();

                let mut expected = input.clone();
                expected.sort_unstable();

                assert_eq!(report.sorted, expected, "{} on {:?}", algorithm, input);
                assert_eq!(
                    replay(&input, &frames),
                    expected,
                    "{} replay on {:?}",
                    algorithm,
                    input
                );
                assert_eq!(report.frames, frames.len() as u64);
            }
        }
    }

    #[test]
    fn test_frames_are_numbered_without_gaps() {
        let input = vec![30, 5, 100, 5, 67, 30, 12, 99];
        for algorithm in Algorithm::ALL {
            let engine = algorithm.engine(&Limits::default());
            let (frames, _) = record(engine.as_ref(), &input).unwrap();
            for (i, frame) in frames.iter().enumerate() {
                assert_eq!(frame.seq, i as u64, "{}", algorithm);
            }
        }
    }

    #[test]
    fn test_first_frame_resets_every_position() {
        let input = vec![4, 3, 2, 1];
        let (frames, _) = record(&Bubble, &input).unwrap();
        let reset = &frames[0];

        assert_eq!(reset.updates.len(), input.len());
        assert!(reset.updates.iter().all(|u| u.highlight == Highlight::Default));
    }

    #[test]
    fn test_engines_leave_no_transient_highlight() {
        let input = vec![30, 5, 100, 5, 67, 30, 12, 99];
        for algorithm in Algorithm::ALL {
            let engine = algorithm.engine(&Limits::default());
            let (frames, _) = record(engine.as_ref(), &input).unwrap();

            let mut snapshot = elements(&input);
            for frame in &frames {
                apply_frame(&mut snapshot, frame);
            }
            assert!(
                snapshot.iter().all(|e| !e.highlight.is_transient()),
                "{} left {:?}",
                algorithm,
                snapshot
            );
        }
    }

    #[test]
    fn test_values_only_change_under_a_highlight() {
        let limits = Limits::default();
        for algorithm in Algorithm::ALL {
            let engine = algorithm.engine(&limits);
            for input in fixtures() {
                if engine.validate(input.len()).is_err() {
                    continue;
                }
                let (frames, _) = record(engine.as_ref(), &input).unwrap();

                let mut snapshot = elements(&input);
                for frame in frames.iter().skip(1) {
                    for update in &frame.updates {
                        if update.highlight == Highlight::Default {
                            assert_eq!(
                                snapshot[update.position].num, update.value,
                                "{} jumped position {} in frame {} on {:?}",
                                algorithm, update.position, frame.seq, input
                            );
                        }
                    }
                    apply_frame(&mut snapshot, frame);
                }
            }
        }
    }

    #[test]
    fn test_early_exit_emits_fewer_swaps_on_sorted_input() {
        let sorted: Vec<u32> = (1..=8).collect();
        let reversed: Vec<u32> = (1..=8).rev().collect();

        for algorithm in [
            Algorithm::Bubble,
            Algorithm::Cocktail,
            Algorithm::Shell,
            Algorithm::Insertion,
        ] {
            let on_sorted = swap_frames(algorithm, &sorted);
            let on_reversed = swap_frames(algorithm, &reversed);
            assert!(
                on_sorted < on_reversed,
                "{}: {} swaps sorted vs {} reversed",
                algorithm,
                on_sorted,
                on_reversed
            );
        }
    }

    #[test]
    fn test_bubble_stops_after_one_pass_on_sorted_input() {
        let sorted: Vec<u32> = (1..=8).collect();
        let (_, report) = record(&Bubble, &sorted).unwrap();
        assert_eq!(report.passes, 1);
    }

    #[test]
    fn test_bitonic_rejects_non_power_of_two() {
        let err = record(&Bitonic, &[6, 5, 4, 3, 2, 1]).unwrap_err();
        assert_eq!(err, SortError::InvalidInput(InvalidInput::NotPowerOfTwo { len: 6 }));

        let (_, report) = record(&Bitonic, &[8, 7, 6, 5, 4, 3, 2, 1]).unwrap();
        assert_eq!(report.sorted, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_radix_pass_count_matches_digits() {
        let input = [170, 45, 75, 90, 802, 24, 2, 66];
        let (_, report) = record(&Radix, &input).unwrap();

        assert_eq!(report.sorted, vec![2, 24, 45, 66, 75, 90, 170, 802]);
        assert_eq!(report.passes, 3);
    }

    #[test]
    fn test_bogo_finds_sorted_within_two_candidates() {
        let engine = Algorithm::Bogo.engine(&Limits::default());
        let (_, report) = record(engine.as_ref(), &[2, 1]).unwrap();

        assert_eq!(report.sorted, vec![1, 2]);
        assert!(report.passes <= 2);
    }

    #[test]
    fn test_bogo_rejects_over_bound() {
        let engine = Algorithm::Bogo.engine(&Limits { bogo_max_len: 4 });
        let err = record(engine.as_ref(), &[5, 4, 3, 2, 1]).unwrap_err();
        assert!(matches!(
            err,
            SortError::ResourceExhaustion {
                len: 5,
                max_len: 4,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_input_rejected_for_every_engine() {
        for algorithm in Algorithm::ALL {
            let engine = algorithm.engine(&Limits::default());
            assert_eq!(
                record(engine.as_ref(), &[]).unwrap_err(),
                SortError::InvalidInput(InvalidInput::Empty)
            );
        }
    }

    #[test]
    fn test_engine_reports_its_algorithm() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.engine(&Limits::default()).algorithm(), algorithm);
        }
    }

    proptest! {
        #[test]
        fn prop_comparison_engines_sort_and_permute(values in proptest::collection::vec(5u32..=100, 1..40)) {
            let limits = Limits::default();
            for algorithm in Algorithm::ALL {
                let engine = algorithm.engine(&limits);
                if engine.validate(values.len()).is_err() {
                    continue;
                }
                // Factorial enumeration; keep the property run fast
                if algorithm == Algorithm::Bogo && values.len() > 6 {
                    continue;
                }
                let (frames, report) = record(engine.as_ref(), &values).unwrap();

                let mut expected = values.clone();
                expected.sort_unstable();
                prop_assert_eq!(&report.sorted, &expected);
                prop_assert_eq!(replay(&values, &frames), expected);
            }
        }

        #[test]
        fn prop_radix_handles_wide_values(values in proptest::collection::vec(any::<u32>(), 1..30)) {
            let (frames, report) = record(&Radix, &values).unwrap();
            let mut expected = values.clone();
            expected.sort_unstable();
            prop_assert_eq!(&report.sorted, &expected);
            prop_assert_eq!(replay(&values, &frames), expected);
        }
    }
}
