/// Decimates a continuous tick stream down to sample ticks.
///
/// The sampler counts capture ticks and selects every `interval`-th one as a
/// sample tick. The counter belongs to one detection run: create a fresh
/// sampler on activation so elapsed progress never leaks across runs.
#[derive(Debug, Clone)]
pub struct FrameSampler {
    interval: u32,
    counter: u64,
}

impl FrameSampler {
    /// Creates a sampler with the given decimation interval, clamped to the
    /// supported range.
    pub fn new(interval: u32) -> Self {
        Self {
            interval: clamp_interval(interval),
            counter: 0,
        }
    }

    /// Registers one tick and returns whether it is a sample tick.
    pub fn tick(&mut self) -> bool {
        self.counter += 1;
        self.counter % self.interval as u64 == 0
    }

    /// Number of ticks seen so far in this run.
    pub fn ticks(&self) -> u64 {
        self.counter
    }

    /// Current decimation interval.
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Changes the decimation interval, effective from the next tick.
    ///
    /// The tick counter is deliberately left untouched: resetting it here
    /// could make the next tick a sample tick again right after one fired.
    pub fn set_interval(&mut self, interval: u32) {
        self.interval = clamp_interval(interval);
    }
}

impl Default for FrameSampler {
    fn default() -> Self {
        Self::new(crate::DEFAULT_SAMPLE_INTERVAL)
    }
}

fn clamp_interval(interval: u32) -> u32 {
    interval.clamp(crate::MIN_SAMPLE_INTERVAL, crate::MAX_SAMPLE_INTERVAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_exactly_on_multiples_of_the_interval() {
        for interval in crate::MIN_SAMPLE_INTERVAL..=crate::MAX_SAMPLE_INTERVAL {
            let mut sampler = FrameSampler::new(interval);
            for tick in 1..=(interval as u64 * 3) {
                let sampled = sampler.tick();
                assert_eq!(
                    sampled,
                    tick % interval as u64 == 0,
                    "interval {interval}, tick {tick}"
                );
            }
        }
    }

    #[test]
    fn interval_is_clamped_to_supported_range() {
        assert_eq!(FrameSampler::new(0).interval(), crate::MIN_SAMPLE_INTERVAL);
        assert_eq!(
            FrameSampler::new(1000).interval(),
            crate::MAX_SAMPLE_INTERVAL
        );

        let mut sampler = FrameSampler::default();
        sampler.set_interval(2);
        assert_eq!(sampler.interval(), crate::MIN_SAMPLE_INTERVAL);
    }

    #[test]
    fn interval_change_does_not_double_sample() {
        let mut sampler = FrameSampler::new(30);
        for _ in 0..29 {
            assert!(!sampler.tick());
        }
        assert!(sampler.tick()); // tick 30 fires

        // Shrinking the interval right after a sample must not fire again
        // until a full new multiple is reached.
        sampler.set_interval(5);
        for tick in 31..=34 {
            assert!(!sampler.tick(), "tick {tick} must not sample");
        }
        assert!(sampler.tick()); // tick 35
    }

    #[test]
    fn fresh_sampler_starts_from_zero() {
        let mut sampler = FrameSampler::new(5);
        sampler.tick();
        sampler.tick();

        let mut restarted = FrameSampler::new(sampler.interval());
        assert_eq!(restarted.ticks(), 0);
        for _ in 0..4 {
            assert!(!restarted.tick());
        }
        assert!(restarted.tick());
    }
}
