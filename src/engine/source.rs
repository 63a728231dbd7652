use std::ops::Range;
use crate::engine::view::AxisBounds;
use crate::engine::SimError;
/// One arrived sample: milliseconds since the start of the source, and its amplitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimedPoint {
    pub timestamp_ms: u64,
    pub value: f64,
}
impl TimedPoint {
    pub fn new(timestamp_ms: u64, value: f64) -> Self {
        Self {
            timestamp_ms,
            value,
        }
    }
    /// `[x, y]` pair in the shape plotting backends expect.
    pub fn to_xy(self) -> [f64; 2] {
        [self.timestamp_ms as f64, self.value]
    }
}
/// Immutable, fully materialized recording replayed by a session.
#[derive(Clone, Debug)]
pub struct SampleSource {
    name: String,
    rate_hz: u32,
    samples: Vec<f64>,
}
impl SampleSource {
    pub fn new(
        name: impl Into<String>,
        rate_hz: u32,
        samples: Vec<f64>,
    ) -> Result<Self, SimError> {
        if rate_hz == 0 {
            return Err(SimError::InvalidSampleRate);
        }
        Ok(Self {
            name: name.into(),
            rate_hz,
            samples,
        })
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn rate_hz(&self) -> u32 {
        self.rate_hz
    }
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }
    /// `floor(index * 1000 / rate)`, exact in integer arithmetic.
    pub fn timestamp_ms(&self, index: usize) -> u64 {
        index as u64 * 1000 / u64::from(self.rate_hz)
    }
    /// Timestamped points for a range of source indices; indices past the end are skipped.
    pub fn timed_points(&self, range: Range<usize>) -> impl Iterator<Item = TimedPoint> + '_ {
        let end = range.end.min(self.samples.len());
        let start = range.start.min(end);
        (start..end).map(move |index| TimedPoint::new(self.timestamp_ms(index), self.samples[index]))
    }
    /// Amplitude axis covering the whole recording, padded and rounded to hundredths.
    pub fn amplitude_bounds(&self) -> AxisBounds {
        let mut iter = self.samples.iter().copied();
        let Some(first) = iter.next() else {
            return AxisBounds::new(-1.0, 1.0);
        };
        let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        AxisBounds::new(
            (min * 100.0 - 0.1).floor() / 100.0,
            (max * 100.0 + 0.1).ceil() / 100.0,
        )
    }
}
