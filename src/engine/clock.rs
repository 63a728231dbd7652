//! Wall-clock driven playback scheduling.
//!
//! The clock turns real elapsed milliseconds into a count of newly due source
//! samples. Played time is kept as whole milliseconds since the last speed change
//! and scaled in one expression, so the number of samples handed out after a run
//! of ticks depends only on the total time played, not on how that time was split
//! between ticks.
use std::ops::Range;
use crate::engine::SimError;
pub const DEFAULT_SPEED: f64 = 1.0;
#[derive(Clone, Debug)]
pub struct PlaybackClock {
    rate_hz: u32,
    source_len: usize,
    playing: bool,
    speed: f64,
    last_real_ms: u64,
    // Samples due before the current speed took effect.
    base_samples: f64,
    // Real milliseconds played at the current speed.
    epoch_ms: u64,
    supplied: u64,
    next_index: usize,
}
impl PlaybackClock {
    pub fn new(rate_hz: u32, source_len: usize, now_ms: u64) -> Self {
        Self {
            rate_hz,
            source_len,
            playing: true,
            speed: DEFAULT_SPEED,
            last_real_ms: now_ms,
            base_samples: 0.0,
            epoch_ms: 0,
            supplied: 0,
            next_index: 0,
        }
    }
    /// Advance to `now_ms` and return the range of source indices that became due.
    ///
    /// While paused the elapsed time is dropped, so resuming never fast-forwards.
    /// Once the source is exhausted every call returns an empty range.
    pub fn tick(&mut self, now_ms: u64) -> Range<usize> {
        let elapsed = now_ms.saturating_sub(self.last_real_ms);
        self.last_real_ms = now_ms;
        let start = self.next_index;
        if !self.playing {
            return start..start;
        }
        self.epoch_ms += elapsed;
        let due = self.accumulated_samples().floor() as u64;
        let new_count = due.saturating_sub(self.supplied);
        if new_count == 0 {
            return start..start;
        }
        self.supplied += new_count;
        let remaining = self.source_len - self.next_index;
        let clipped = (new_count.min(remaining as u64)) as usize;
        self.next_index += clipped;
        start..self.next_index
    }
    pub fn set_speed(&mut self, factor: f64) -> Result<(), SimError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(SimError::InvalidSpeed(factor));
        }
        self.base_samples = self.accumulated_samples();
        self.epoch_ms = 0;
        self.speed = factor;
        Ok(())
    }
    /// Flip play/pause. Returns the new playing state.
    pub fn toggle_play(&mut self, now_ms: u64) -> bool {
        self.playing = !self.playing;
        if self.playing {
            self.last_real_ms = now_ms;
        }
        self.playing
    }
    pub fn restart(&mut self, now_ms: u64) {
        self.base_samples = 0.0;
        self.epoch_ms = 0;
        self.supplied = 0;
        self.next_index = 0;
        self.last_real_ms = now_ms;
    }
    /// Point the clock at a different recording and restart it.
    pub fn rebind(&mut self, rate_hz: u32, source_len: usize, now_ms: u64) {
        self.rate_hz = rate_hz;
        self.source_len = source_len;
        self.restart(now_ms);
    }
    pub fn is_playing(&self) -> bool {
        self.playing
    }
    pub fn speed(&self) -> f64 {
        self.speed
    }
    /// Fractional number of samples that have come due since the last restart.
    pub fn accumulated_samples(&self) -> f64 {
        self.base_samples + f64::from(self.rate_hz) * self.speed * self.epoch_ms as f64 / 1000.0
    }
    pub fn supplied(&self) -> u64 {
        self.supplied
    }
    pub fn next_index(&self) -> usize {
        self.next_index
    }
    pub fn is_exhausted(&self) -> bool {
        self.next_index >= self.source_len
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    fn total_supplied(clock: &mut PlaybackClock, ticks: &[u64]) -> usize {
        let mut now = 0;
        let mut total = 0;
        for step in ticks {
            now += step;
            total += clock.tick(now).len();
        }
        total
    }
    #[test]
    fn supplies_whole_samples_as_time_passes() {
        let mut clock = PlaybackClock::new(120, 10_000, 0);
        assert_eq!(clock.tick(5), 0..0);
        // 120 Hz: 8.33 ms per sample
        assert_eq!(clock.tick(9), 0..1);
        assert_eq!(clock.tick(1000), 1..120);
        assert_eq!(clock.supplied(), 120);
    }
    #[test]
    fn subdivision_does_not_change_total() {
        let cases: [(u32, f64); 9] = [
            (120, 1.0),
            (720, 1.0),
            (500, 2.0),
            (1000, 1.5),
            (1000, 0.1),
            (1000, 1.1),
            (720, 1.3),
            (120, 0.7),
            (500, 2.3),
        ];
        for (rate, speed) in cases {
            let total_ms: u64 = 10_000;
            let expected = (f64::from(rate) * speed * total_ms as f64 / 1000.0).floor() as usize;
            let mut coarse = PlaybackClock::new(rate, usize::MAX / 2, 0);
            coarse.set_speed(speed).unwrap();
            assert_eq!(total_supplied(&mut coarse, &[total_ms]), expected);
            let mut fine = PlaybackClock::new(rate, usize::MAX / 2, 0);
            fine.set_speed(speed).unwrap();
            let jitter: Vec<u64> = (0..total_ms / 40)
                .flat_map(|_| [16u64, 17, 7])
                .collect();
            assert_eq!(jitter.iter().sum::<u64>(), total_ms);
            assert_eq!(total_supplied(&mut fine, &jitter), expected);
        }
    }
    #[test]
    fn paused_time_is_not_accumulated() {
        let mut paused = PlaybackClock::new(1000, 100_000, 0);
        assert!(!paused.toggle_play(0));
        assert_eq!(paused.tick(500), 0..0);
        assert_eq!(paused.tick(5_000), 0..0);
        assert_eq!(paused.accumulated_samples(), 0.0);
        assert!(paused.toggle_play(7_000));
        let resumed = paused.tick(7_250).len();
        let mut fresh = PlaybackClock::new(1000, 100_000, 0);
        assert_eq!(resumed, fresh.tick(250).len());
        assert_eq!(resumed, 250);
    }
    #[test]
    fn millisecond_ticks_match_single_tick() {
        for (rate, speed, total_ms) in [
            (1000, 0.1, 10u64),
            (1000, 1.1, 100),
            (720, 1.3, 1000),
            (120, 0.7, 10_000),
            (500, 2.3, 10_000),
        ] {
            let expected = (f64::from(rate) * speed * total_ms as f64 / 1000.0).floor() as usize;
            let mut clock = PlaybackClock::new(rate, usize::MAX / 2, 0);
            clock.set_speed(speed).unwrap();
            let ticks = vec![1u64; total_ms as usize];
            assert_eq!(total_supplied(&mut clock, &ticks), expected, "{rate} Hz x{speed}");
        }
    }
    #[test]
    fn speed_change_keeps_samples_already_due() {
        let mut clock = PlaybackClock::new(100, 10_000, 0);
        assert_eq!(clock.tick(1000), 0..100);
        clock.set_speed(0.5).unwrap();
        assert_eq!(clock.accumulated_samples(), 100.0);
        assert_eq!(clock.tick(2000), 100..150);
        clock.set_speed(3.0).unwrap();
        assert_eq!(clock.tick(2100), 150..180);
    }
    #[test]
    fn invalid_speed_keeps_previous_value() {
        let mut clock = PlaybackClock::new(120, 10, 0);
        clock.set_speed(2.0).unwrap();
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(clock.set_speed(bad).is_err());
        }
        assert_eq!(clock.speed(), 2.0);
    }
    #[test]
    fn clips_at_source_end_and_stays_exhausted() {
        let mut clock = PlaybackClock::new(100, 25, 0);
        assert_eq!(clock.tick(200), 0..20);
        assert_eq!(clock.tick(1000), 20..25);
        assert!(clock.is_exhausted());
        assert_eq!(clock.tick(5000), 25..25);
        assert_eq!(clock.next_index(), 25);
        assert!(clock.supplied() as f64 <= clock.accumulated_samples().floor());
    }
    #[test]
    fn restart_zeroes_counters() {
        let mut clock = PlaybackClock::new(100, 1000, 0);
        clock.tick(1234);
        clock.restart(2000);
        assert_eq!(clock.supplied(), 0);
        assert_eq!(clock.next_index(), 0);
        assert_eq!(clock.accumulated_samples(), 0.0);
        assert_eq!(clock.tick(2100), 0..10);
    }
    #[test]
    fn clock_going_backwards_counts_as_no_time() {
        let mut clock = PlaybackClock::new(100, 1000, 500);
        assert_eq!(clock.tick(100), 0..0);
        assert_eq!(clock.tick(200), 0..10);
    }
}
