use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::hrtf::sphere::SphereConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StimulusConfig {
    /// Test-sound duration; also the simulated time.
    #[serde(default = "StimulusConfig::default_duration_ms")]
    pub duration_ms: f32,
    #[serde(default = "StimulusConfig::default_seed")]
    pub seed: u64,
}

impl StimulusConfig {
    fn default_duration_ms() -> f32 {
        500.0
    }
    fn default_seed() -> u64 {
        0
    }
}

impl Default for StimulusConfig {
    fn default() -> Self {
        Self {
            duration_ms: Self::default_duration_ms(),
            seed: Self::default_seed(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CochleaConfig {
    #[serde(default = "CochleaConfig::default_cf_min_hz")]
    pub cf_min_hz: f32,
    #[serde(default = "CochleaConfig::default_cf_max_hz")]
    pub cf_max_hz: f32,
    #[serde(default = "CochleaConfig::default_n_channels")]
    pub n_channels: usize,
}

impl CochleaConfig {
    fn default_cf_min_hz() -> f32 {
        150.0
    }
    fn default_cf_max_hz() -> f32 {
        5_000.0
    }
    fn default_n_channels() -> usize {
        40
    }
}

impl Default for CochleaConfig {
    fn default() -> Self {
        Self {
            cf_min_hz: Self::default_cf_min_hz(),
            cf_max_hz: Self::default_cf_max_hz(),
            n_channels: Self::default_n_channels(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeuronConfig {
    #[serde(default = "NeuronConfig::default_tau_ms")]
    pub tau_ms: f32,
    #[serde(default = "NeuronConfig::default_noise_sigma")]
    pub noise_sigma: f32,
    #[serde(default = "NeuronConfig::default_noise_tau_ms")]
    pub noise_tau_ms: f32,
    #[serde(default = "NeuronConfig::default_threshold")]
    pub threshold: f32,
    #[serde(default = "NeuronConfig::default_reset")]
    pub reset: f32,
    #[serde(default = "NeuronConfig::default_refractory_ms")]
    pub refractory_ms: f32,
    #[serde(default = "NeuronConfig::default_synapse_weight")]
    pub synapse_weight: f32,
    #[serde(default = "NeuronConfig::default_drive_gain")]
    pub drive_gain: f32,
    #[serde(default = "NeuronConfig::default_compression_exponent")]
    pub compression_exponent: f32,
}

impl NeuronConfig {
    fn default_tau_ms() -> f32 {
        1.0
    }
    fn default_noise_sigma() -> f32 {
        0.1
    }
    fn default_noise_tau_ms() -> f32 {
        0.5
    }
    fn default_threshold() -> f32 {
        1.0
    }
    fn default_reset() -> f32 {
        0.0
    }
    fn default_refractory_ms() -> f32 {
        5.0
    }
    fn default_synapse_weight() -> f32 {
        0.5
    }
    fn default_drive_gain() -> f32 {
        15.0
    }
    fn default_compression_exponent() -> f32 {
        1.0 / 3.0
    }
}

impl Default for NeuronConfig {
    fn default() -> Self {
        Self {
            tau_ms: Self::default_tau_ms(),
            noise_sigma: Self::default_noise_sigma(),
            noise_tau_ms: Self::default_noise_tau_ms(),
            threshold: Self::default_threshold(),
            reset: Self::default_reset(),
            refractory_ms: Self::default_refractory_ms(),
            synapse_weight: Self::default_synapse_weight(),
            drive_gain: Self::default_drive_gain(),
            compression_exponent: Self::default_compression_exponent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub stimulus: StimulusConfig,
    #[serde(default)]
    pub cochlea: CochleaConfig,
    #[serde(default)]
    pub neurons: NeuronConfig,
    /// Synthetic spherical-head grid, used when no IRCAM directory is given.
    #[serde(default)]
    pub sphere: SphereConfig,
}

impl AppConfig {
    /// Read the config if the file exists (defaults on parse failure),
    /// otherwise write the defaults out so the user has something to edit.
    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        warn!("failed to parse config {path}: {err}; using defaults");
                    }
                },
                Err(err) => {
                    warn!("failed to read config {path}: {err}; using defaults");
                }
            }
            return Self::default();
        }

        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                if let Err(err) = fs::write(path_obj, text) {
                    warn!("failed to write default config to {path}: {err}");
                }
            }
            Err(err) => warn!("failed to serialize default config: {err}"),
        }
        default_cfg
    }
}
