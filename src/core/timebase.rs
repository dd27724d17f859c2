pub type Tick = u64;

/// Simulation clock. Neurons integrate at the audio sample rate, so one
/// tick is one sample and dt = 1/fs.
#[derive(Clone, Copy, Debug)]
pub struct SimClock {
    pub fs: f32,
}

impl SimClock {
    pub fn dt(&self) -> f32 {
        1.0 / self.fs
    }

    pub fn tick_to_sec(&self, t: Tick) -> f32 {
        t as f32 / self.fs
    }

    pub fn ms_to_ticks(&self, ms: f32) -> Tick {
        if ms <= 0.0 {
            return 0;
        }
        (ms as f64 * 1e-3 * self.fs as f64).round() as Tick
    }
}

#[cfg(test)]
mod tests {
    use super::{SimClock, Tick};

    #[test]
    fn ms_tick_round_trip() {
        let clock = SimClock { fs: 44_100.0 };
        let t: Tick = clock.ms_to_ticks(500.0);
        assert_eq!(t, 22_050);
        assert!((clock.tick_to_sec(t) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn refractory_ticks_at_audio_rate() {
        let clock = SimClock { fs: 44_100.0 };
        assert_eq!(clock.ms_to_ticks(5.0), 221);
        assert_eq!(clock.ms_to_ticks(0.0), 0);
        assert_eq!(clock.ms_to_ticks(-1.0), 0);
    }
}
