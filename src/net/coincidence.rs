//! Coincidence-detector network for one candidate location.
//!
//! Index layout, fixed here and used by the decoder:
//! - a *cell* is one (location, frequency) pair, location-major:
//!   `cell = location * n_channels + channel`;
//! - input units are ear-major above the cells: the left-ear block
//!   `0..n_channels` then the right-ear block `n_channels..2*n_channels`
//!   within a location.
//!
//! Locations are uncoupled, so each is simulated as its own block on the
//! shared sample clock; concatenating block counts in location order is
//! identical to one global pass.

use crate::core::timebase::SimClock;
use crate::net::lif::{LifParams, LifPopulation};

/// Per-cell spike counts for one location block: `counts[channel]`.
pub fn run_location_block(
    left_drive: &[Vec<f32>],
    right_drive: &[Vec<f32>],
    params: LifParams,
    synapse_weight: f32,
    clock: SimClock,
    seed: u64,
) -> Vec<u64> {
    let n_ch = left_drive.len();
    assert_eq!(n_ch, right_drive.len(), "ear channel counts differ");
    let n_samples = left_drive.first().map_or(0, Vec::len);

    let mut inputs = LifPopulation::new(2 * n_ch, params, clock, seed);
    let mut detectors = LifPopulation::new(
        n_ch,
        params.without_refractoriness(),
        clock,
        seed.wrapping_add(0x9E37_79B9),
    );

    let mut drive = vec![0.0f32; 2 * n_ch];
    let mut counts = vec![0u64; n_ch];

    for t in 0..n_samples {
        for ch in 0..n_ch {
            drive[ch] = left_drive[ch][t];
            drive[n_ch + ch] = right_drive[ch][t];
        }
        inputs.step(&drive);

        let spikes = inputs.spikes();
        for ch in 0..n_ch {
            if spikes[ch] {
                detectors.deliver(ch, synapse_weight);
            }
            if spikes[n_ch + ch] {
                detectors.deliver(ch, synapse_weight);
            }
        }

        detectors.step(&[]);
        for (count, &fired) in counts.iter_mut().zip(detectors.spikes()) {
            if fired {
                *count += 1;
            }
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLOCK: SimClock = SimClock { fs: 10_000.0 };

    fn quiet() -> LifParams {
        LifParams {
            noise_sigma: 0.0,
            ..LifParams::default()
        }
    }

    /// Strong drive in both ears at the same samples: the detector sees
    /// coincident jumps and fires. The same spikes staggered across ears
    /// must leave the detector silent.
    #[test]
    fn coincident_ears_beat_staggered_ears() {
        let n = 4_000;
        let burst = |offset: usize| -> Vec<f32> {
            (0..n)
                .map(|t| if (t + offset) % 200 == 0 { 50.0 } else { 0.0 })
                .collect()
        };

        let aligned = run_location_block(
            &[burst(0)],
            &[burst(0)],
            quiet(),
            0.5,
            CLOCK,
            7,
        );
        let staggered = run_location_block(
            &[burst(0)],
            &[burst(100)],
            quiet(),
            0.5,
            CLOCK,
            7,
        );

        assert!(aligned[0] > 10, "aligned counts too low: {}", aligned[0]);
        assert_eq!(staggered[0], 0, "staggered ears must not coincide");
    }

    #[test]
    fn silent_input_yields_zero_counts() {
        let zeros = vec![vec![0.0f32; 1_000]; 3];
        let counts = run_location_block(&zeros, &zeros, quiet(), 0.5, CLOCK, 1);
        assert_eq!(counts, vec![0, 0, 0]);
    }

    #[test]
    fn channels_are_independent() {
        let n = 4_000;
        let hot: Vec<f32> = (0..n).map(|t| if t % 100 == 0 { 50.0 } else { 0.0 }).collect();
        let cold = vec![0.0f32; n];

        let counts = run_location_block(
            &[hot.clone(), cold.clone()],
            &[hot, cold],
            quiet(),
            0.5,
            CLOCK,
            3,
        );
        assert!(counts[0] > 0);
        assert_eq!(counts[1], 0);
    }

    #[test]
    fn empty_block_is_empty() {
        let counts = run_location_block(&[], &[], quiet(), 0.5, CLOCK, 0);
        assert!(counts.is_empty());
    }
}
