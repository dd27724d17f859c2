//! Spike-count decoder: collapse per-(location, frequency) coincidence
//! counts into a per-location score and pick the arg-max.

use tracing::warn;

/// Per-location scores in [0, 1] plus the arg-max estimate. `estimate` is
/// `None` when no detector fired at all (an all-zero run carries no
/// location information; the scores stay zero instead of dividing by zero).
#[derive(Clone, Debug)]
pub struct LocationScores {
    pub scores: Vec<f32>,
    pub estimate: Option<usize>,
}

/// `counts` is location-major: `counts[loc * n_channels + ch]`.
pub fn decode(counts: &[u64], num_locations: usize, n_channels: usize) -> LocationScores {
    assert_eq!(
        counts.len(),
        num_locations * n_channels,
        "count vector does not match the cell grid"
    );

    // marginalize over frequency
    let totals: Vec<u64> = counts
        .chunks_exact(n_channels.max(1))
        .map(|cell| cell.iter().sum())
        .collect();

    let max = totals.iter().copied().max().unwrap_or(0);
    if max == 0 {
        warn!("no coincidence spikes at any location; estimate undefined");
        return LocationScores {
            scores: vec![0.0; num_locations],
            estimate: None,
        };
    }

    let scores: Vec<f32> = totals.iter().map(|&c| c as f32 / max as f32).collect();
    let estimate = totals
        .iter()
        .enumerate()
        .max_by_key(|&(_, &c)| c)
        .map(|(i, _)| i);

    LocationScores { scores, estimate }
}
