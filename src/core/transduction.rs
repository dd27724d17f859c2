//! Auditory-nerve static nonlinearity: half-wave rectification followed by
//! a compressive power law. Converts gammatone output into the drive
//! current for the input neuron layer.

#[derive(Clone, Copy, Debug)]
pub struct Transduction {
    /// Output gain applied after compression.
    pub gain: f32,
    /// Compression exponent, < 1 for a compressive law.
    pub exponent: f32,
}

impl Default for Transduction {
    fn default() -> Self {
        Self {
            gain: 15.0,
            exponent: 1.0 / 3.0,
        }
    }
}

impl Transduction {
    #[inline]
    pub fn apply_sample(&self, x: f32) -> f32 {
        self.gain * x.max(0.0).powf(self.exponent)
    }

    pub fn apply(&self, x: &mut [f32]) {
        for v in x.iter_mut() {
            *v = self.apply_sample(*v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn negative_input_clamps_to_zero() {
        let t = Transduction::default();
        assert_eq!(t.apply_sample(-0.5), 0.0);
        assert_eq!(t.apply_sample(-1e6), 0.0);
        assert_eq!(t.apply_sample(0.0), 0.0);
    }

    #[test]
    fn compressive_cube_root() {
        let t = Transduction::default();
        assert_abs_diff_eq!(t.apply_sample(1.0), 15.0, epsilon = 1e-5);
        assert_abs_diff_eq!(t.apply_sample(8.0), 30.0, epsilon = 1e-4);
        // compression: doubling the input less than doubles the output
        assert!(t.apply_sample(2.0) < 2.0 * t.apply_sample(1.0));
    }

    #[test]
    fn apply_runs_in_place() {
        let t = Transduction {
            gain: 2.0,
            exponent: 1.0,
        };
        let mut x = vec![-1.0, 0.25, 1.0];
        t.apply(&mut x);
        assert_eq!(x, vec![0.0, 0.5, 2.0]);
    }
}
