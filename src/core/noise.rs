use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// One standard-normal sample (Box-Muller).
#[inline]
pub fn randn<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let u1: f32 = rng.random_range(f32::EPSILON..1.0);
    let u2: f32 = rng.random_range(0.0..TAU);
    (-2.0 * u1.ln()).sqrt() * u2.cos()
}

/// Gaussian white-noise stimulus, unit variance. This is the broadband test
/// sound played from the true location.
pub fn whitenoise(n: usize, seed: u64) -> Vec<f32> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..n).map(|_| randn(&mut rng)).collect()
}

/// Generate sine wave samples
pub fn sine(fs: f32, f: f32, n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| (TAU * f * (i as f32) / fs).sin())
        .collect()
}
