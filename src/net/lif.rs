//! Leaky integrate-and-fire population.
//!
//! Membrane equation dV/dt = (I - V)/tau + sigma * xi / sqrt(tau_noise),
//! integrated with Euler-Maruyama at the audio sample rate. Spikes reset V
//! and hold it at the reset value for the refractory period.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::noise::randn;
use crate::core::timebase::SimClock;

#[derive(Clone, Copy, Debug)]
pub struct LifParams {
    pub tau_ms: f32,
    pub threshold: f32,
    pub reset: f32,
    pub refractory_ms: f32,
    pub noise_sigma: f32,
    pub noise_tau_ms: f32,
}

impl Default for LifParams {
    fn default() -> Self {
        Self {
            tau_ms: 1.0,
            threshold: 1.0,
            reset: 0.0,
            refractory_ms: 5.0,
            noise_sigma: 0.1,
            noise_tau_ms: 0.5,
        }
    }
}

impl LifParams {
    /// Same membrane but no refractory hold; used for the coincidence
    /// detectors.
    pub fn without_refractoriness(self) -> Self {
        Self {
            refractory_ms: 0.0,
            ..self
        }
    }
}

pub struct LifPopulation {
    v: Vec<f32>,
    refract_remaining: Vec<u32>,
    spike_out: Vec<bool>,
    // precomputed per-step coefficients
    leak: f32,
    noise_scale: f32,
    refract_ticks: u32,
    threshold: f32,
    reset: f32,
    rng: StdRng,
}

impl LifPopulation {
    pub fn new(n: usize, params: LifParams, clock: SimClock, seed: u64) -> Self {
        let dt = clock.dt();
        let tau_s = params.tau_ms * 1e-3;
        let noise_tau_s = params.noise_tau_ms * 1e-3;
        Self {
            v: vec![params.reset; n],
            refract_remaining: vec![0; n],
            spike_out: vec![false; n],
            leak: dt / tau_s,
            noise_scale: params.noise_sigma * (dt / noise_tau_s).sqrt(),
            refract_ticks: clock.ms_to_ticks(params.refractory_ms) as u32,
            threshold: params.threshold,
            reset: params.reset,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.v.len()
    }

    pub fn is_empty(&self) -> bool {
        self.v.is_empty()
    }

    /// Synaptic jump on the membrane (delta synapse).
    #[inline]
    pub fn deliver(&mut self, unit: usize, weight: f32) {
        self.v[unit] += weight;
    }

    /// Advance one tick. `drive` is the per-unit input current I for this
    /// step; an empty slice means no external drive. Spike flags for the
    /// step are left in `spikes()`.
    ///
    /// The threshold is checked before integration so that synaptic jumps
    /// delivered since the previous step are seen at full height; a
    /// coincident pair of weight-0.5 jumps reaches a threshold of 1 exactly.
    pub fn step(&mut self, drive: &[f32]) {
        debug_assert!(drive.is_empty() || drive.len() == self.v.len());
        for i in 0..self.v.len() {
            self.spike_out[i] = false;

            if self.refract_remaining[i] > 0 {
                self.refract_remaining[i] -= 1;
                self.v[i] = self.reset;
                continue;
            }

            if self.v[i] >= self.threshold {
                self.spike_out[i] = true;
                self.v[i] = self.reset;
                self.refract_remaining[i] = self.refract_ticks;
                continue;
            }

            let current = if drive.is_empty() { 0.0 } else { drive[i] };
            let mut v = self.v[i];
            v += self.leak * (current - v);
            if self.noise_scale != 0.0 {
                v += self.noise_scale * randn(&mut self.rng);
            }
            self.v[i] = v;
        }
    }

    #[inline]
    pub fn spikes(&self) -> &[bool] {
        &self.spike_out
    }

    #[cfg(test)]
    pub fn potential(&self, unit: usize) -> f32 {
        self.v[unit]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLOCK: SimClock = SimClock { fs: 10_000.0 };

    fn quiet(params: LifParams) -> LifParams {
        LifParams {
            noise_sigma: 0.0,
            ..params
        }
    }

    #[test]
    fn suprathreshold_drive_fires_and_respects_refractoriness() {
        let params = quiet(LifParams::default());
        let mut pop = LifPopulation::new(1, params, CLOCK, 1);
        let drive = [10.0f32];

        let mut spike_ticks = Vec::new();
        for t in 0..2_000u32 {
            pop.step(&drive);
            if pop.spikes()[0] {
                spike_ticks.push(t);
            }
        }
        assert!(spike_ticks.len() > 10, "only {} spikes", spike_ticks.len());

        let refract = CLOCK.ms_to_ticks(5.0) as u32;
        for pair in spike_ticks.windows(2) {
            assert!(
                pair[1] - pair[0] > refract,
                "interval {} violates refractory {}",
                pair[1] - pair[0],
                refract
            );
        }
    }

    #[test]
    fn subthreshold_drive_stays_silent_without_noise() {
        let params = quiet(LifParams::default());
        let mut pop = LifPopulation::new(1, params, CLOCK, 2);
        for _ in 0..5_000 {
            pop.step(&[0.9]);
            assert!(!pop.spikes()[0]);
        }
        // membrane converged toward the drive current, not past it
        assert!(pop.potential(0) > 0.8 && pop.potential(0) < 0.9 + 1e-3);
    }

    #[test]
    fn delivered_weight_decays_between_steps() {
        let params = quiet(LifParams::default());
        let mut pop = LifPopulation::new(1, params, CLOCK, 3);
        pop.deliver(0, 0.5);
        assert!((pop.potential(0) - 0.5).abs() < 1e-6);
        pop.step(&[]);
        assert!(!pop.spikes()[0]);
        assert!(pop.potential(0) < 0.5, "leak should pull V toward zero");
    }

    #[test]
    fn coincident_jumps_cross_threshold_single_jump_does_not() {
        let params = quiet(LifParams::default()).without_refractoriness();
        let mut pop = LifPopulation::new(2, params, CLOCK, 4);

        // unit 0: both ears in the same tick
        pop.deliver(0, 0.5);
        pop.deliver(0, 0.5);
        // unit 1: one ear only
        pop.deliver(1, 0.5);
        pop.step(&[]);
        assert!(pop.spikes()[0], "coincident pair must fire");
        assert!(!pop.spikes()[1], "single input must not fire");
    }

    #[test]
    fn zero_drive_zero_noise_is_silent() {
        let params = quiet(LifParams::default());
        let mut pop = LifPopulation::new(4, params, CLOCK, 5);
        for _ in 0..1_000 {
            pop.step(&[]);
            assert!(pop.spikes().iter().all(|&s| !s));
        }
    }
}
