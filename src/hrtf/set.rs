//! HRTF set: per-location left/right impulse responses with their spatial
//! coordinates, plus the filterbank operations of the localization model
//! (apply one location, swap ears, apply every location).

use crate::core::fft::fir_filter;

/// Spatial coordinate of one stored HRTF, in the database convention:
/// azimuth 0..360 counterclockwise, elevation -90..90.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Direction {
    pub azim_deg: f32,
    pub elev_deg: f32,
}

/// Impulse-response pair for one direction.
#[derive(Clone, Debug)]
pub struct Hrtf {
    pub left: Vec<f32>,
    pub right: Vec<f32>,
}

/// Two-channel signal.
#[derive(Clone, Debug)]
pub struct Binaural {
    pub left: Vec<f32>,
    pub right: Vec<f32>,
}

impl Binaural {
    /// Swap ears. Equivalent to swapping the channels of every subsequent
    /// filter, but cheaper to do once on the input.
    pub fn swapped(self) -> Self {
        Self {
            left: self.right,
            right: self.left,
        }
    }
}

/// Immutable collection of HRTFs for one subject, indexed 0..num_indices().
#[derive(Clone, Debug)]
pub struct HrtfSet {
    pub fs: f32,
    pub directions: Vec<Direction>,
    pub pairs: Vec<Hrtf>,
}

impl HrtfSet {
    pub fn num_indices(&self) -> usize {
        self.pairs.len()
    }

    /// Filter a mono sound through the HRTF pair at `index`.
    pub fn apply(&self, index: usize, sound: &[f32]) -> Binaural {
        let hrtf = &self.pairs[index];
        Binaural {
            left: fir_filter(sound, &hrtf.left),
            right: fir_filter(sound, &hrtf.right),
        }
    }

    /// Re-filter an already-binaural signal through the pair at `index`:
    /// left through the left IR, right through the right IR. One call per
    /// candidate location gives the exhaustive spatial filter bank.
    pub fn apply_pair(&self, index: usize, signal: &Binaural) -> Binaural {
        let hrtf = &self.pairs[index];
        Binaural {
            left: fir_filter(&signal.left, &hrtf.left),
            right: fir_filter(&signal.right, &hrtf.right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta_set() -> HrtfSet {
        // two locations: identity pair and a one-sample right-ear delay
        let id = Hrtf {
            left: vec![1.0],
            right: vec![1.0],
        };
        let delayed = Hrtf {
            left: vec![1.0],
            right: vec![0.0, 1.0],
        };
        HrtfSet {
            fs: 8000.0,
            directions: vec![
                Direction {
                    azim_deg: 0.0,
                    elev_deg: 0.0,
                },
                Direction {
                    azim_deg: 90.0,
                    elev_deg: 0.0,
                },
            ],
            pairs: vec![id, delayed],
        }
    }

    #[test]
    fn apply_identity_pair_passes_sound_through() {
        let set = delta_set();
        let sound = vec![1.0, -0.5, 0.25, 0.0];
        let out = set.apply(0, &sound);
        assert_eq!(out.left, sound);
        assert_eq!(out.right, sound);
    }

    #[test]
    fn apply_delayed_pair_shifts_right_ear() {
        let set = delta_set();
        let sound = vec![1.0, 0.0, 0.0, 0.0];
        let out = set.apply(1, &sound);
        assert_eq!(out.left, sound);
        assert_eq!(out.right, vec![0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn swapped_exchanges_ears() {
        let b = Binaural {
            left: vec![1.0],
            right: vec![2.0],
        };
        let s = b.swapped();
        assert_eq!(s.left, vec![2.0]);
        assert_eq!(s.right, vec![1.0]);
    }

    #[test]
    fn crossed_filters_align_at_true_location() {
        // After the swap, the candidate matching the true location composes
        // right*left on one path and left*right on the other; convolution
        // commutes so the two hypothesis channels must be identical.
        let set = delta_set();
        let sound = vec![0.3, -1.0, 0.7, 0.1, 0.0, 0.0];
        for index in 0..set.num_indices() {
            let swapped = set.apply(index, &sound).swapped();
            let hyp = set.apply_pair(index, &swapped);
            for (l, r) in hyp.left.iter().zip(hyp.right.iter()) {
                assert!((l - r).abs() < 1e-6, "channels diverge at index {index}");
            }
        }
    }
}
