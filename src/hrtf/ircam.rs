//! IRCAM LISTEN database loader.
//!
//! The LISTEN distribution stores one stereo WAV per measured direction,
//! named `IRC_<subject>_C_R<radius_cm>_T<azim>_P<elev>.wav`, e.g.
//! `IRC_1002_C_R0195_T030_P315.wav`. Azimuth is 0..345 counterclockwise;
//! elevations below the horizontal plane are encoded 315..345 (i.e. 315
//! means -45 degrees). Locations are indexed in (elevation, azimuth) order
//! so a set loads to the same indices on every platform.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::hrtf::set::{Direction, Hrtf, HrtfSet};

#[derive(Debug, Error)]
pub enum IrcamError {
    #[error("cannot read HRTF directory {}: {1}", .0.display())]
    ReadDir(PathBuf, std::io::Error),
    #[error("no IRC_{subject}_C_*.wav files under {}", .dir.display())]
    NoFiles { subject: u32, dir: PathBuf },
    #[error("malformed IRCAM file name: {0}")]
    BadName(String),
    #[error("{}: expected stereo, got {channels} channel(s)", .path.display())]
    NotStereo { path: PathBuf, channels: u16 },
    #[error("{}: sample rate {got} does not match the set's {expected}", .path.display())]
    MixedRates { path: PathBuf, got: u32, expected: u32 },
    #[error("failed to read {}: {source}", .path.display())]
    Wav {
        path: PathBuf,
        source: hound::Error,
    },
}

/// Parse `T<azim>_P<elev>` out of a LISTEN file name. Returns the direction
/// in degrees with the 315..345 negative-elevation encoding decoded.
pub fn parse_direction(file_name: &str) -> Result<Direction, IrcamError> {
    let bad = || IrcamError::BadName(file_name.to_string());

    let stem = file_name.strip_suffix(".wav").ok_or_else(bad)?;
    let mut azim = None;
    let mut elev = None;
    for part in stem.split('_') {
        if let Some(v) = part.strip_prefix('T') {
            azim = v.parse::<f32>().ok();
        } else if let Some(v) = part.strip_prefix('P') {
            elev = v.parse::<f32>().ok();
        }
    }
    let azim_deg = azim.ok_or_else(bad)?;
    let mut elev_deg = elev.ok_or_else(bad)?;
    if elev_deg > 180.0 {
        elev_deg -= 360.0;
    }
    if !(0.0..360.0).contains(&azim_deg) || !(-90.0..=90.0).contains(&elev_deg) {
        return Err(bad());
    }
    Ok(Direction { azim_deg, elev_deg })
}

/// Load every direction of one subject from a LISTEN-style directory.
pub fn load_subject(dir: &Path, subject: u32) -> Result<HrtfSet, IrcamError> {
    let prefix = format!("IRC_{subject}_C_");

    let entries =
        fs::read_dir(dir).map_err(|e| IrcamError::ReadDir(dir.to_path_buf(), e))?;
    let mut files: Vec<(Direction, PathBuf)> = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if !name.starts_with(&prefix) || !name.ends_with(".wav") {
            continue;
        }
        files.push((parse_direction(&name)?, entry.path()));
    }
    if files.is_empty() {
        return Err(IrcamError::NoFiles {
            subject,
            dir: dir.to_path_buf(),
        });
    }

    files.sort_by(|a, b| {
        a.0.elev_deg
            .total_cmp(&b.0.elev_deg)
            .then(a.0.azim_deg.total_cmp(&b.0.azim_deg))
    });

    // files is non-empty; the first read fixes the set's rate
    let mut fs_hz = 0u32;
    let mut directions = Vec::with_capacity(files.len());
    let mut pairs = Vec::with_capacity(files.len());
    for (i, (direction, path)) in files.into_iter().enumerate() {
        let (rate, hrtf) = read_stereo_ir(&path)?;
        if i == 0 {
            fs_hz = rate;
        } else if rate != fs_hz {
            return Err(IrcamError::MixedRates {
                path,
                got: rate,
                expected: fs_hz,
            });
        }
        directions.push(direction);
        pairs.push(hrtf);
    }

    let fs = fs_hz as f32;
    debug!(
        subject,
        num_indices = pairs.len(),
        fs,
        "loaded IRCAM LISTEN subject"
    );
    Ok(HrtfSet {
        fs,
        directions,
        pairs,
    })
}

fn read_stereo_ir(path: &Path) -> Result<(u32, Hrtf), IrcamError> {
    let wav = |source| IrcamError::Wav {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = hound::WavReader::open(path).map_err(wav)?;
    let spec = reader.spec();
    if spec.channels != 2 {
        return Err(IrcamError::NotStereo {
            path: path.to_path_buf(),
            channels: spec.channels,
        });
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => {
            let samples: Result<Vec<f32>, _> = reader.samples::<f32>().collect();
            samples.map_err(wav)?
        }
        hound::SampleFormat::Int => {
            let scale = 1.0 / (1i64 << (spec.bits_per_sample - 1)) as f32;
            let samples: Result<Vec<i32>, _> = reader.samples::<i32>().collect();
            samples.map_err(wav)?.iter().map(|&v| v as f32 * scale).collect()
        }
    };

    let n = interleaved.len() / 2;
    let mut left = Vec::with_capacity(n);
    let mut right = Vec::with_capacity(n);
    for frame in interleaved.chunks_exact(2) {
        left.push(frame[0]);
        right.push(frame[1]);
    }
    Ok((spec.sample_rate, Hrtf { left, right }))
}
