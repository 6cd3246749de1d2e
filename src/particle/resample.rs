//! Multinomial resampling for particle populations.
//!
//! Draws N independent indices from the categorical distribution defined by
//! the normalized particle weights (inversion of the cumulative weight
//! vector, one uniform draw per offspring). Multinomial resampling is the
//! textbook scheme; lower-variance variants (systematic, stratified) are
//! deliberately out of scope.
use ndarray::ArrayView1;
use rand::Rng;

/// Draw `particles.len()` offspring with replacement, proportionally to
/// `weights`.
///
/// `weights` must be normalized (the filter normalizes before resampling);
/// entries beyond the last positive weight can never be selected. The
/// returned population has the same size as the input and uniform implied
/// weights.
///
/// # Panics
/// Panics in debug builds if the particle and weight lengths differ; the
/// filter owns both buffers and keeps them in lockstep.
pub fn multinomial_resample<T, R>(particles: &[T], weights: ArrayView1<f64>, rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    debug_assert_eq!(particles.len(), weights.len());

    let mut cumulative = Vec::with_capacity(weights.len());
    let mut acc = 0.0;
    for &w in weights.iter() {
        acc += w;
        cumulative.push(acc);
    }
    // Guard against the cumulative sum landing at 1 - ε: the final entry
    // must cover u draws arbitrarily close to 1.
    if let Some(last) = cumulative.last_mut() {
        *last = f64::max(*last, 1.0);
    }

    let mut offspring = Vec::with_capacity(particles.len());
    for _ in 0..particles.len() {
        let u = rng.gen::<f64>();
        let idx = cumulative.partition_point(|&c| c < u).min(particles.len() - 1);
        offspring.push(particles[idx].clone());
    }
    offspring
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - That a degenerate (one-hot) weight vector copies a single particle.
    // - That offspring counts track the weights on a seeded large draw.
    // - Seeded reproducibility.
    //
    // They intentionally DO NOT cover:
    // - Unnormalized weight vectors (the filter normalizes before calling).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A one-hot weight vector must clone the selected particle N times.
    //
    // Given
    // -----
    // - Three particles with all weight on index 1.
    //
    // Expect
    // ------
    // - Every offspring equals particle 1.
    fn one_hot_weights_select_one_particle() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let particles = vec![10usize, 20, 30];
        let weights = array![0.0, 1.0, 0.0];
        let offspring = multinomial_resample(&particles, weights.view(), &mut rng);
        assert_eq!(offspring, vec![20, 20, 20]);
    }

    #[test]
    // Purpose
    // -------
    // Offspring frequencies should approximate the weights for a large
    // population.
    //
    // Given
    // -----
    // - 10_000 particles labeled by index with weights [0.7, 0.2, 0.1]
    //   spread over three labels, seeded RNG.
    //
    // Expect
    // ------
    // - Each label's offspring share is within 0.02 of its weight.
    fn offspring_counts_track_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let n = 10_000;
        let particles: Vec<usize> = (0..n).map(|i| i % 3).collect();
        let target = [0.7, 0.2, 0.1];
        let mut weights = ndarray::Array1::<f64>::zeros(n);
        for (i, w) in weights.iter_mut().enumerate() {
            // n is divisible by neither label count evenly; spread the label
            // weight uniformly over its copies.
            let label = i % 3;
            let copies = (n / 3) + usize::from(label < n % 3);
            *w = target[label] / copies as f64;
        }
        let mass: f64 = weights.sum();
        weights.mapv_inplace(|w| w / mass);

        let offspring = multinomial_resample(&particles, weights.view(), &mut rng);
        for label in 0..3 {
            let share =
                offspring.iter().filter(|&&p| p == label).count() as f64 / offspring.len() as f64;
            assert!(
                (share - target[label]).abs() < 0.02,
                "label {label}: share {share} vs weight {}",
                target[label]
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // The same seed must reproduce the same offspring.
    //
    // Given
    // -----
    // - Two RNGs seeded identically.
    //
    // Expect
    // ------
    // - Identical resampled populations.
    fn resampling_is_reproducible_under_seed() {
        let particles = vec![1u8, 2, 3, 4];
        let weights = array![0.4, 0.3, 0.2, 0.1];

        let mut rng_a = ChaCha8Rng::seed_from_u64(123);
        let mut rng_b = ChaCha8Rng::seed_from_u64(123);
        let a = multinomial_resample(&particles, weights.view(), &mut rng_a);
        let b = multinomial_resample(&particles, weights.view(), &mut rng_b);
        assert_eq!(a, b);
    }
}
