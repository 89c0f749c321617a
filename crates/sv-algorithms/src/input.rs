//! Random input generation

use std::ops::RangeInclusive;

use rand::Rng;
use sv_core::Value;

/// Range of generated values
pub const VALUE_RANGE: RangeInclusive<Value> = 10..=309;

/// Allowed array sizes
pub const SIZE_RANGE: RangeInclusive<usize> = 10..=100;

/// Draw `size` values uniformly from [`VALUE_RANGE`]
pub fn random_array<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<Value> {
    (0..size).map(|_| rng.gen_range(VALUE_RANGE)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_values_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let values = random_array(100, &mut rng);
        assert_eq!(values.len(), 100);
        assert!(values.iter().all(|v| VALUE_RANGE.contains(v)));
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let first = random_array(30, &mut StdRng::seed_from_u64(42));
        let second = random_array(30, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }
}
