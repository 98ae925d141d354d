use rand::Rng;

use crate::error::{ModelError, Result};

/// Draws index `i` with probability `weights[i] / sum(weights)`.
///
/// Weights need not be normalized. Negative or non-finite weights are
/// rejected rather than clamped, and an all-zero distribution is an error.
/// Weights whose sum overflows are rolled against relative to the largest.
pub fn sample_index<R: Rng + ?Sized>(rng: &mut R, weights: &[f64]) -> Result<usize> {
    if let Some((index, &weight)) = weights
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || **w < 0.0)
    {
        return Err(ModelError::InvalidWeight { index, weight });
    }

    let mut total: f64 = weights.iter().sum();
    if weights.is_empty() || total <= 0.0 {
        return Err(ModelError::EmptyDistribution);
    }

    let mut scale = 1.0;
    if !total.is_finite() {
        scale = weights.iter().copied().fold(0.0, f64::max);
        total = weights.iter().map(|w| w / scale).sum();
    }

    let mut roll = rng.gen_range(0.0..total);
    let mut fallback = None;
    for (i, &weight) in weights.iter().enumerate() {
        let weight = weight / scale;
        if weight <= 0.0 {
            continue;
        }
        if roll < weight {
            return Ok(i);
        }
        roll -= weight;
        fallback = Some(i);
    }

    // Rounding can leave a sliver of `roll` after the last bucket.
    fallback.ok_or(ModelError::EmptyDistribution)
}

/// Draws one item from `items`, weighted by the co-indexed entry of `weights`.
pub fn sample<'a, T, R: Rng + ?Sized>(
    rng: &mut R,
    items: &'a [T],
    weights: &[f64],
) -> Result<&'a T> {
    if items.len() != weights.len() {
        return Err(ModelError::LengthMismatch {
            items: items.len(),
            weights: weights.len(),
        });
    }
    let index = sample_index(rng, weights)?;
    Ok(&items[index])
}

/// Draws one item uniformly at random.
pub fn choose_uniform<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Result<&'a T> {
    if items.is_empty() {
        return Err(ModelError::EmptyDistribution);
    }
    Ok(&items[rng.gen_range(0..items.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn weights_one_to_three_give_three_quarters() {
        let mut rng = SmallRng::seed_from_u64(7);
        let items = ["low", "high"];
        let draws = 20_000;
        let high = (0..draws)
            .filter(|_| *sample(&mut rng, &items, &[1.0, 3.0]).unwrap() == "high")
            .count();
        let freq = high as f64 / draws as f64;
        assert!((freq - 0.75).abs() < 0.02, "frequency was {freq}");
    }

    #[test]
    fn zero_weight_items_are_never_drawn() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..1000 {
            let idx = sample_index(&mut rng, &[0.0, 2.0, 0.0]).unwrap();
            assert_eq!(idx, 1);
        }
    }

    #[test]
    fn empty_and_all_zero_are_errors() {
        let mut rng = SmallRng::seed_from_u64(1);
        let empty: [&str; 0] = [];
        assert_eq!(
            sample(&mut rng, &empty, &[]).unwrap_err(),
            ModelError::EmptyDistribution
        );
        assert_eq!(
            sample(&mut rng, &["a", "b"], &[0.0, 0.0]).unwrap_err(),
            ModelError::EmptyDistribution
        );
        assert!(choose_uniform(&mut rng, &empty).is_err());
    }

    #[test]
    fn rejects_negative_and_nan_weights() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(
            sample_index(&mut rng, &[1.0, -0.5]).unwrap_err(),
            ModelError::InvalidWeight { index: 1, weight: -0.5 }
        );
        assert!(matches!(
            sample_index(&mut rng, &[f64::NAN]),
            Err(ModelError::InvalidWeight { index: 0, .. })
        ));
    }

    #[test]
    fn overflowing_total_still_samples() {
        let mut rng = SmallRng::seed_from_u64(3);
        let weights = [f64::MAX, f64::MAX, 0.0];
        let mut seen = [false; 3];
        for _ in 0..200 {
            seen[sample_index(&mut rng, &weights).unwrap()] = true;
        }
        assert_eq!(seen, [true, true, false]);
        assert!(sample(&mut rng, &["x", "y"], &[f64::MAX, f64::MAX]).is_ok());
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(
            sample(&mut rng, &["a"], &[0.5, 0.5]).unwrap_err(),
            ModelError::LengthMismatch { items: 1, weights: 2 }
        );
    }

    #[test]
    fn same_seed_same_draws() {
        let weights = [0.2, 0.3, 0.5];
        let mut a = SmallRng::seed_from_u64(42);
        let mut b = SmallRng::seed_from_u64(42);
        let first: Vec<usize> = (0..50).map(|_| sample_index(&mut a, &weights).unwrap()).collect();
        let second: Vec<usize> = (0..50).map(|_| sample_index(&mut b, &weights).unwrap()).collect();
        assert_eq!(first, second);
    }
}
