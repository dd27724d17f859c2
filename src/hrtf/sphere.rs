//! Synthetic spherical-head HRTF grid.
//!
//! A fallback so the pipeline runs without the IRCAM LISTEN download:
//! each direction gets a delta-like impulse-response pair carrying a
//! Woodworth interaural time delay, an azimuth level difference, and a
//! one-pole head-shadow low-pass on the far ear. Azimuth follows the
//! LISTEN convention (counterclockwise, 90 degrees = source at the left).

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::hrtf::set::{Direction, Hrtf, HrtfSet};

/// Speed of sound in air, m/s.
const SPEED_OF_SOUND: f32 = 343.0;

/// Average human head radius, m (Woodworth model).
const HEAD_RADIUS: f32 = 0.0875;

/// Maximum interaural level difference, dB, reached at +-90 degrees.
const ILD_MAX_DB: f32 = 6.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SphereConfig {
    #[serde(default = "SphereConfig::default_sample_rate")]
    pub sample_rate: u32,
    #[serde(default = "SphereConfig::default_ir_len")]
    pub ir_len: usize,
    #[serde(default = "SphereConfig::default_azim_step_deg")]
    pub azim_step_deg: f32,
    #[serde(default = "SphereConfig::default_elevations_deg")]
    pub elevations_deg: Vec<f32>,
}

impl SphereConfig {
    fn default_sample_rate() -> u32 {
        44_100
    }
    fn default_ir_len() -> usize {
        128
    }
    fn default_azim_step_deg() -> f32 {
        15.0
    }
    fn default_elevations_deg() -> Vec<f32> {
        vec![0.0]
    }
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            sample_rate: Self::default_sample_rate(),
            ir_len: Self::default_ir_len(),
            azim_step_deg: Self::default_azim_step_deg(),
            elevations_deg: Self::default_elevations_deg(),
        }
    }
}

/// Build the full grid: every elevation crossed with azimuths
/// 0, step, 2*step, ... below 360.
pub fn generate(cfg: &SphereConfig) -> HrtfSet {
    let fs = cfg.sample_rate as f32;
    let step = cfg.azim_step_deg.max(1.0);
    let n_azim = (360.0 / step).floor() as usize;

    let mut directions = Vec::new();
    let mut pairs = Vec::new();
    for &elev_deg in &cfg.elevations_deg {
        for a in 0..n_azim {
            let azim_deg = a as f32 * step;
            directions.push(Direction { azim_deg, elev_deg });
            pairs.push(direction_ir(fs, cfg.ir_len, azim_deg, elev_deg));
        }
    }
    HrtfSet {
        fs,
        directions,
        pairs,
    }
}

fn direction_ir(fs: f32, ir_len: usize, azim_deg: f32, elev_deg: f32) -> Hrtf {
    // Lateral displacement in [-1, 1], positive toward the left ear.
    let lateral = azim_deg.to_radians().sin() * elev_deg.to_radians().cos();
    let theta = lateral.clamp(-1.0, 1.0).asin();

    // Woodworth: full ITD = r/c * (theta + sin theta), split across the ears
    // around a common base delay so both IRs stay causal.
    let itd_s = HEAD_RADIUS / SPEED_OF_SOUND * (theta + theta.sin());
    let base_s = (ir_len as f32 / 4.0) / fs;
    let left_delay = (base_s - itd_s * 0.5) * fs;
    let right_delay = (base_s + itd_s * 0.5) * fs;

    let ild = ILD_MAX_DB * lateral; // dB, positive favors the left ear
    let left_gain = 10f32.powf(ild * 0.5 / 20.0);
    let right_gain = 10f32.powf(-ild * 0.5 / 20.0);

    let mut left = delta_ir(ir_len, left_delay, left_gain);
    let mut right = delta_ir(ir_len, right_delay, right_gain);

    // Head shadow: low-pass the far ear, harder the more lateral the source.
    let shadow_fc = 18_000.0 - 14_000.0 * lateral.abs();
    if lateral > 0.0 {
        one_pole_lp(&mut right, fs, shadow_fc);
    } else if lateral < 0.0 {
        one_pole_lp(&mut left, fs, shadow_fc);
    }

    Hrtf { left, right }
}

/// Fractional-delay impulse: two taps with linear interpolation.
fn delta_ir(ir_len: usize, delay_samples: f32, gain: f32) -> Vec<f32> {
    let mut ir = vec![0.0f32; ir_len];
    let d = delay_samples.max(0.0);
    let i = d.floor() as usize;
    let frac = d - d.floor();
    if i < ir_len {
        ir[i] = gain * (1.0 - frac);
    }
    if i + 1 < ir_len {
        ir[i + 1] = gain * frac;
    }
    ir
}

fn one_pole_lp(ir: &mut [f32], fs: f32, fc: f32) {
    let a = (-2.0 * PI * fc / fs).exp();
    let mut y = 0.0f32;
    for v in ir.iter_mut() {
        y = (1.0 - a) * *v + a * y;
        *v = y;
    }
}
