// Random sample generation for fresh arrays
//
// Values are drawn uniformly from VALUE_MIN..=VALUE_MAX. A seed makes the
// sequence reproducible (headless runs, tests); without one the generator
// is seeded from OS entropy.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

/// Smallest generated value
pub const VALUE_MIN: u32 = 5;

/// Largest generated value
pub const VALUE_MAX: u32 = 100;

/// Fixed range for generated values
pub const VALUE_RANGE: RangeInclusive<u32> = VALUE_MIN..=VALUE_MAX;

/// Generator for sample arrays, seeded when `seed` is given
pub fn sample_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// A fresh array of `len` values in the fixed value range
pub fn values<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<u32> {
    (0..len).map(|_| rng.gen_range(VALUE_RANGE)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_stay_in_range() {
        let mut rng = sample_rng(Some(7));
        let values = values(&mut rng, 500);

        assert_eq!(values.len(), 500);
        assert!(values.iter().all(|v| VALUE_RANGE.contains(v)));
        assert!(values.iter().any(|&v| v != values[0]));
    }

    #[test]
    fn test_same_seed_same_values() {
        let a = values(&mut sample_rng(Some(42)), 20);
        let b = values(&mut sample_rng(Some(42)), 20);
        let c = values(&mut sample_rng(Some(43)), 20);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_unseeded_generator_fills_request() {
        let mut rng = sample_rng(None);
        assert_eq!(values(&mut rng, 0), Vec::<u32>::new());
        assert_eq!(values(&mut rng, 3).len(), 3);
    }
}
