// core/erb.rs
// ERB-rate scale conversion and the cochlear center-frequency grid

/// Convert Hz to ERB-rate (Cam units, Glasberg & Moore 1990)
pub fn hz_to_erb(f_hz: f32) -> f32 {
    21.4 * (1.0 + 4.37 * f_hz / 1000.0).log10()
}

/// Convert ERB-rate (Cam) back to Hz
pub fn erb_to_hz(e_cam: f32) -> f32 {
    (10f32.powf(e_cam / 21.4) - 1.0) * 1000.0 / 4.37
}

/// ERB bandwidth in Hz (Glasberg & Moore 1990)
#[inline]
pub fn erb_bw_hz(f_hz: f32) -> f32 {
    24.7 * (4.37 * f_hz / 1000.0 + 1.0)
}

/// Construct exactly `n` frequencies (Hz) uniformly spaced in ERB-rate,
/// with the first at `f_min` and the last at `f_max`. This is the grid the
/// cochlear filterbank is tuned on.
pub fn erb_space_n(f_min: f32, f_max: f32, n: usize) -> Vec<f32> {
    match n {
        0 => Vec::new(),
        1 => vec![f_min],
        _ => {
            let e_min = hz_to_erb(f_min);
            let e_max = hz_to_erb(f_max);
            let step = (e_max - e_min) / (n - 1) as f32;
            (0..n).map(|i| erb_to_hz(e_min + step * i as f32)).collect()
        }
    }
}
