//! Single-pass localization pipeline: stimulus -> true-location HRTF ->
//! channel swap -> exhaustive candidate HRTFs -> cochlea -> spiking
//! network -> decoded location estimate.

use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::core::erb::erb_space_n;
use crate::core::gammatone::gammatone_bank;
use crate::core::noise::whitenoise;
use crate::core::timebase::SimClock;
use crate::core::transduction::Transduction;
use crate::decoder::{decode, LocationScores};
use crate::hrtf::set::{Binaural, HrtfSet};
use crate::net::coincidence::run_location_block;
use crate::net::lif::LifParams;

/// Everything the caller needs to report and plot one run.
#[derive(Clone, Debug)]
pub struct Outcome {
    pub true_index: usize,
    pub scores: LocationScores,
    /// The binaural stimulus as heard from the true location (pre-swap),
    /// kept for the optional WAV dump.
    pub binaural: Binaural,
}

// Per-purpose seed streams so the stimulus, the index draw, and each
// location's membrane noise run on disjoint random sequences.
const STREAM_STIMULUS: u64 = 1;
const STREAM_INDEX: u64 = 2;
const STREAM_NOISE: u64 = 3;

/// Derive one stream's seed from the master seed (splitmix64 mix).
fn stream_seed(master: u64, stream: u64) -> u64 {
    let mut z = master.wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Draw a true location uniformly from the set.
pub fn pick_random_index(set: &HrtfSet, seed: u64) -> usize {
    let mut rng = rand::rngs::StdRng::seed_from_u64(stream_seed(seed, STREAM_INDEX));
    rng.random_range(0..set.num_indices())
}

pub fn localize(set: &HrtfSet, cfg: &AppConfig, true_index: usize) -> Outcome {
    assert!(true_index < set.num_indices(), "true index out of range");

    let clock = SimClock { fs: set.fs };
    let n_samples = clock.ms_to_ticks(cfg.stimulus.duration_ms) as usize;
    let num_indices = set.num_indices();
    let n_ch = cfg.cochlea.n_channels;

    info!(
        num_indices,
        n_channels = n_ch,
        fs = set.fs,
        duration_ms = cfg.stimulus.duration_ms,
        true_index,
        "localizing"
    );

    let sound = whitenoise(n_samples, stream_seed(cfg.stimulus.seed, STREAM_STIMULUS));
    let binaural = set.apply(true_index, &sound);
    let swapped = binaural.clone().swapped();

    let cf = erb_space_n(cfg.cochlea.cf_min_hz, cfg.cochlea.cf_max_hz, n_ch);
    let transduction = Transduction {
        gain: cfg.neurons.drive_gain,
        exponent: cfg.neurons.compression_exponent,
    };
    let lif = LifParams {
        tau_ms: cfg.neurons.tau_ms,
        threshold: cfg.neurons.threshold,
        reset: cfg.neurons.reset,
        refractory_ms: cfg.neurons.refractory_ms,
        noise_sigma: cfg.neurons.noise_sigma,
        noise_tau_ms: cfg.neurons.noise_tau_ms,
    };

    // Candidate locations are uncoupled; simulate one block per location on
    // the shared clock and concatenate the counts location-major.
    let mut counts = Vec::with_capacity(num_indices * n_ch);
    for loc in 0..num_indices {
        let hyp = set.apply_pair(loc, &swapped);

        let mut left = gammatone_bank(&hyp.left, &cf, set.fs);
        let mut right = gammatone_bank(&hyp.right, &cf, set.fs);
        for ch in left.iter_mut().chain(right.iter_mut()) {
            transduction.apply(ch);
        }

        let block = run_location_block(
            &left,
            &right,
            lif,
            cfg.neurons.synapse_weight,
            clock,
            stream_seed(cfg.stimulus.seed, STREAM_NOISE.wrapping_add(loc as u64)),
        );
        let total: u64 = block.iter().sum();
        debug!(loc, total, "simulated location block");
        counts.extend(block);
    }

    let scores = decode(&counts, num_indices, n_ch);
    match scores.estimate {
        Some(est) => {
            let d_true = set.directions[true_index];
            let d_est = set.directions[est];
            info!(
                estimate = est,
                true_index,
                est_azim = d_est.azim_deg,
                est_elev = d_est.elev_deg,
                true_azim = d_true.azim_deg,
                true_elev = d_true.elev_deg,
                "decoded location"
            );
        }
        None => info!("decoded no location (no coincidence spikes)"),
    }

    Outcome {
        true_index,
        scores,
        binaural,
    }
}
