use std::ops::Range;
use crate::engine::source::TimedPoint;
/// Append-only history of every raw point that has arrived since the last restart.
///
/// Entry `i` is always source index `i`. Nothing is trimmed while a session runs;
/// storage is reserved up front for the whole recording since sources never loop.
#[derive(Debug, Default)]
pub struct StreamBuffer {
    points: Vec<TimedPoint>,
}
impl StreamBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }
    /// Append a batch and return the index range it now occupies.
    pub fn append(&mut self, batch: impl IntoIterator<Item = TimedPoint>) -> Range<usize> {
        let start = self.points.len();
        self.points.extend(batch);
        start..self.points.len()
    }
    pub fn points(&self) -> &[TimedPoint] {
        &self.points
    }
    pub fn latest(&self) -> Option<TimedPoint> {
        self.points.last().copied()
    }
    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    /// Drop all history, keeping room for `capacity` points.
    pub fn reset(&mut self, capacity: usize) {
        self.points.clear();
        self.points.reserve(capacity);
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn append_reports_new_range() {
        let mut buffer = StreamBuffer::with_capacity(8);
        let first = buffer.append([TimedPoint::new(0, 1.0), TimedPoint::new(8, 2.0)]);
        assert_eq!(first, 0..2);
        let second = buffer.append([TimedPoint::new(16, 3.0)]);
        assert_eq!(second, 2..3);
        assert_eq!(buffer.latest(), Some(TimedPoint::new(16, 3.0)));
        assert_eq!(buffer.append(std::iter::empty()), 3..3);
    }
    #[test]
    fn reset_empties_history() {
        let mut buffer = StreamBuffer::with_capacity(2);
        buffer.append([TimedPoint::new(0, 1.0)]);
        buffer.reset(100);
        assert!(buffer.is_empty());
        assert!(buffer.latest().is_none());
    }
}
