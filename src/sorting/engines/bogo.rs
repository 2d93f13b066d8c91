use crate::sorting::trace::Trace;
use crate::sorting::{is_sorted, Algorithm, Highlight, SortError};

use super::SortEngine;

/// Exhaustive permutation search
///
/// Candidates are the permutations of the initial array's positions in
/// lexicographic order, starting from the identity. The order is fixed,
/// so a reverse-sorted input always costs the full N! candidates. Candidates
/// are generated one at a time rather than materialized up front.
///
/// Moving to a candidate flashes the positions whose value changed as
/// `Swapping`, then settles them back to `Default`. Unchanged positions emit
/// nothing.
pub struct Bogo {
    pub max_len: usize,
}

/// Advance `indices` to the next lexicographic permutation.
/// Returns false once the last permutation has been passed.
fn next_permutation(indices: &mut [usize]) -> bool {
    let Some(pivot) = indices.windows(2).rposition(|w| w[0] < w[1]) else {
        return false;
    };
    let successor = indices
        .iter()
        .rposition(|&x| x > indices[pivot])
        .unwrap_or(pivot + 1);
    indices.swap(pivot, successor);
    indices[pivot + 1..].reverse();
    true
}

impl SortEngine for Bogo {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Bogo
    }

    fn validate(&self, len: usize) -> Result<(), SortError> {
        if len > self.max_len {
            return Err(SortError::ResourceExhaustion {
                algorithm: Algorithm::Bogo,
                len,
                max_len: self.max_len,
            });
        }
        Ok(())
    }

    fn sort(&self, trace: &mut Trace<'_>) -> Result<(), SortError> {
        self.validate(trace.len())?;

        let initial = trace.values().to_vec();
        let mut indices: Vec<usize> = (0..initial.len()).collect();

        loop {
            trace.begin_pass();
            let candidate: Vec<u32> = indices.iter().map(|&k| initial[k]).collect();

            let changed: Vec<usize> = (0..candidate.len())
                .filter(|&p| trace.get(p) != candidate[p])
                .collect();
            let sorted = is_sorted(&candidate);
            trace.replace(candidate)?;

            if !changed.is_empty() {
                trace.mark_many(changed.iter().map(|&p| (p, Highlight::Swapping)))?;
                trace.mark_many(changed.iter().map(|&p| (p, Highlight::Default)))?;
            }

            if sorted {
                return Ok(());
            }
            if !next_permutation(&mut indices) {
                return Err(SortError::Fault(
                    "permutations exhausted without a sorted candidate".to_string(),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_permutation_lexicographic() {
        let mut indices = vec![0, 1, 2];
        let mut seen = vec![indices.clone()];
        while next_permutation(&mut indices) {
            seen.push(indices.clone());
        }

        assert_eq!(
            seen,
            vec![
                vec![0, 1, 2],
                vec![0, 2, 1],
                vec![1, 0, 2],
                vec![1, 2, 0],
                vec![2, 0, 1],
                vec![2, 1, 0],
            ]
        );
    }

    #[test]
    fn test_sorted_input_needs_one_candidate() {
        let mut sink: Vec<crate::sorting::Frame> = Vec::new();
        let mut trace = Trace::new(&[1, 2, 3], &mut sink);
        Bogo { max_len: 8 }.sort(&mut trace).unwrap();

        assert_eq!(trace.passes(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_candidate_change_flashes_then_settles() {
        let mut sink: Vec<crate::sorting::Frame> = Vec::new();
        let mut trace = Trace::new(&[2, 1], &mut sink);
        Bogo { max_len: 8 }.sort(&mut trace).unwrap();

        // Identity shows nothing; the swap to [1, 2] flashes both positions
        assert_eq!(trace.passes(), 2);
        assert_eq!(sink.len(), 2);
        assert!(sink[0]
            .updates
            .iter()
            .all(|u| u.highlight == Highlight::Swapping));
        assert_eq!(
            sink[0].updates.iter().map(|u| u.value).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert!(sink[1]
            .updates
            .iter()
            .all(|u| u.highlight == Highlight::Default));
    }

    #[test]
    fn test_reversed_input_visits_every_candidate() {
        let mut sink: Vec<crate::sorting::Frame> = Vec::new();
        let mut trace = Trace::new(&[4, 3, 2, 1], &mut sink);
        Bogo { max_len: 8 }.sort(&mut trace).unwrap();

        assert_eq!(trace.passes(), 24);
        assert_eq!(trace.values(), &[1, 2, 3, 4]);
    }
}
