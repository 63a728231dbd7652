use crate::engine::source::TimedPoint;
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}
impl AxisBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}
/// Width of the trailing time window shown in the display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    seconds: f64,
}
impl Viewport {
    pub const MIN_SECONDS: f64 = 0.25;
    pub const MAX_SECONDS: f64 = 5.0;
    pub fn new(seconds: f64) -> Self {
        Self {
            seconds: Self::clamp(seconds),
        }
    }
    pub fn seconds(&self) -> f64 {
        self.seconds
    }
    pub fn span_ms(&self) -> f64 {
        self.seconds * 1000.0
    }
    fn clamp(seconds: f64) -> f64 {
        if seconds.is_nan() {
            return Self::default().seconds;
        }
        seconds.clamp(Self::MIN_SECONDS, Self::MAX_SECONDS)
    }
}
impl Default for Viewport {
    fn default() -> Self {
        Viewport { seconds: 3.0 }
    }
}
/// Trailing x-axis range that follows the newest arrived sample.
#[derive(Clone, Debug)]
pub struct DisplayWindow {
    viewport: Viewport,
    latest_ms: Option<u64>,
    x_axis: AxisBounds,
}
impl DisplayWindow {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            latest_ms: None,
            x_axis: AxisBounds::new(0.0, viewport.span_ms()),
        }
    }
    pub fn recompute(&mut self, latest_ms: u64) -> AxisBounds {
        self.latest_ms = Some(latest_ms);
        let span = self.viewport.span_ms();
        let lower = (latest_ms as f64 - span).max(0.0);
        self.x_axis = AxisBounds::new(lower, lower + span);
        self.x_axis
    }
    /// Widen or narrow the viewport. Only the bounds move; no series is touched.
    pub fn zoom(&mut self, delta_seconds: f64) -> AxisBounds {
        self.viewport = Viewport::new(self.viewport.seconds + delta_seconds);
        match self.latest_ms {
            Some(latest) => self.recompute(latest),
            None => {
                self.x_axis = AxisBounds::new(0.0, self.viewport.span_ms());
                self.x_axis
            }
        }
    }
    pub fn reset(&mut self) {
        self.latest_ms = None;
        self.x_axis = AxisBounds::new(0.0, self.viewport.span_ms());
    }
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
    pub fn x_axis(&self) -> AxisBounds {
        self.x_axis
    }
}
/// One filter's output as handed to a renderer.
#[derive(Clone, Copy, Debug)]
pub struct SeriesView<'a> {
    pub name: &'static str,
    pub points: &'a [TimedPoint],
}
impl<'a> SeriesView<'a> {
    /// Points whose timestamps fall inside `bounds`. Relies on timestamps being sorted.
    pub fn visible(&self, bounds: AxisBounds) -> &'a [TimedPoint] {
        let start = self
            .points
            .partition_point(|p| (p.timestamp_ms as f64) < bounds.min);
        let end = self
            .points
            .partition_point(|p| (p.timestamp_ms as f64) <= bounds.max);
        &self.points[start..end.max(start)]
    }
}
/// Everything a renderer needs after a recompute.
#[derive(Clone, Debug)]
pub struct DisplayFrame<'a> {
    pub x_axis: AxisBounds,
    pub y_axis: AxisBounds,
    pub series: Vec<SeriesView<'a>>,
}
/// Push-only consumer of display frames.
pub trait RenderSink {
    fn present(&mut self, frame: &DisplayFrame<'_>);
}
/// Sink that drops every frame, for headless sessions.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;
impl RenderSink for NullSink {
    fn present(&mut self, _frame: &DisplayFrame<'_>) {}
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn viewport_is_clamped() {
        assert_eq!(Viewport::new(0.1).seconds(), 0.25);
        assert_eq!(Viewport::new(9.0).seconds(), 5.0);
        assert_eq!(Viewport::new(f64::NAN).seconds(), 3.0);
    }
    #[test]
    fn window_trails_latest_sample() {
        let mut window = DisplayWindow::new(Viewport::default());
        assert_eq!(window.x_axis(), AxisBounds::new(0.0, 3000.0));
        assert_eq!(window.recompute(1200), AxisBounds::new(0.0, 3000.0));
        assert_eq!(window.recompute(10_000), AxisBounds::new(7000.0, 10_000.0));
    }
    #[test]
    fn zoom_recomputes_from_last_sample() {
        let mut window = DisplayWindow::new(Viewport::new(3.0));
        window.recompute(10_000);
        assert_eq!(window.zoom(1.0), AxisBounds::new(6000.0, 10_000.0));
        assert_eq!(window.zoom(10.0), AxisBounds::new(5000.0, 10_000.0));
        assert_eq!(window.zoom(-20.0), AxisBounds::new(9750.0, 10_000.0));
        window.reset();
        assert_eq!(window.x_axis(), AxisBounds::new(0.0, 250.0));
    }
    #[test]
    fn visible_slice_uses_timestamps() {
        let points: Vec<TimedPoint> = (0..10).map(|i| TimedPoint::new(i * 100, i as f64)).collect();
        let series = SeriesView {
            name: "raw",
            points: &points,
        };
        let visible = series.visible(AxisBounds::new(250.0, 600.0));
        assert_eq!(visible.first().unwrap().timestamp_ms, 300);
        assert_eq!(visible.last().unwrap().timestamp_ms, 600);
        assert!(series.visible(AxisBounds::new(5000.0, 6000.0)).is_empty());
    }
}
