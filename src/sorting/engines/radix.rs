use crate::sorting::trace::Trace;
use crate::sorting::{Algorithm, Highlight, SortError};

use super::SortEngine;

const BASE: u64 = 10;

/// LSD radix sort, base 10, one counting pass per digit of the maximum
pub struct Radix;

impl Radix {
    /// Stable counting placement of `values` by the digit at `exp`
    fn place_by_digit(values: &[u32], exp: u64) -> Vec<u32> {
        let digit = |v: u32| ((u64::from(v) / exp) % BASE) as usize;

        let mut count = [0usize; BASE as usize];
        for &v in values {
            count[digit(v)] += 1;
        }
        for d in 1..count.len() {
            count[d] += count[d - 1];
        }

        // Walking backwards keeps equal digits in their previous order
        let mut output = vec![0; values.len()];
        for &v in values.iter().rev() {
            let d = digit(v);
            count[d] -= 1;
            output[count[d]] = v;
        }
        output
    }
}

impl SortEngine for Radix {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Radix
    }

    fn sort(&self, trace: &mut Trace<'_>) -> Result<(), SortError> {
        let max = u64::from(trace.values().iter().copied().max().unwrap_or(0));
        let mut exp: u64 = 1;

        while max / exp > 0 {
            trace.begin_pass();
            let output = Self::place_by_digit(trace.values(), exp);

            for (i, value) in output.into_iter().enumerate() {
                trace.mark(i, Highlight::Comparing)?;
                trace.set(i, value);
                trace.mark(i, Highlight::Swapping)?;
                trace.mark(i, Highlight::Default)?;
            }

            exp *= BASE;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_by_digit_is_stable() {
        // 802 and 2 share the units digit; 802 came first and must stay first
        let placed = Radix::place_by_digit(&[802, 45, 2, 24], 1);
        assert_eq!(placed, vec![802, 2, 24, 45]);
    }

    #[test]
    fn test_zero_max_needs_no_pass() {
        let mut sink: Vec<crate::sorting::Frame> = Vec::new();
        let mut trace = Trace::new(&[0, 0], &mut sink);
        Radix.sort(&mut trace).unwrap();
        assert_eq!(trace.passes(), 0);
    }
}
