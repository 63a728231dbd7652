use log::{debug, info, warn};
use crate::engine::buffer::StreamBuffer;
use crate::engine::clock::PlaybackClock;
use crate::engine::error::SimError;
use crate::engine::filter::{FilterBank, FilterKind};
use crate::engine::source::{SampleSource, TimedPoint};
use crate::engine::view::{
    AxisBounds, DisplayFrame, DisplayWindow, NullSink, RenderSink, SeriesView, Viewport,
};
/// A replay of one catalog source through the filter bank.
///
/// Time is always passed in by the caller as milliseconds on a monotonic clock,
/// which keeps every operation deterministic and non-blocking.
pub struct SimulationSession {
    sources: Vec<SampleSource>,
    current: usize,
    clock: PlaybackClock,
    history: StreamBuffer,
    bank: FilterBank,
    window: DisplayWindow,
    sink: Box<dyn RenderSink>,
    exhausted_logged: bool,
}
impl SimulationSession {
    pub fn new(
        sources: Vec<SampleSource>,
        initial: usize,
        filters: &[FilterKind],
        viewport: Viewport,
        now_ms: u64,
    ) -> Result<Self, SimError> {
        if sources.is_empty() {
            return Err(SimError::EmptyCatalog);
        }
        let source = sources.get(initial).ok_or(SimError::SourceOutOfRange {
            index: initial,
            len: sources.len(),
        })?;
        info!(
            "session bound to '{}' ({} samples @ {} Hz), filters: {:?}",
            source.name(),
            source.len(),
            source.rate_hz(),
            filters.iter().map(|f| f.name()).collect::<Vec<_>>()
        );
        Ok(Self {
            clock: PlaybackClock::new(source.rate_hz(), source.len(), now_ms),
            history: StreamBuffer::with_capacity(source.len()),
            bank: FilterBank::new(filters),
            window: DisplayWindow::new(viewport),
            sink: Box::new(NullSink),
            exhausted_logged: false,
            sources,
            current: initial,
        })
    }
    pub fn set_sink(&mut self, sink: impl RenderSink + 'static) {
        self.sink = Box::new(sink);
    }
    /// Advance playback to `now_ms`, feed any due samples through the filters and
    /// push a frame to the sink. Returns the number of new samples.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        let due = self.clock.tick(now_ms);
        if due.is_empty() {
            if self.clock.is_exhausted() && !self.exhausted_logged && !self.history.is_empty() {
                info!("source '{}' fully replayed", self.source().name());
                self.exhausted_logged = true;
            }
            return 0;
        }
        let source = &self.sources[self.current];
        let appended = self.history.append(source.timed_points(due));
        let count = appended.len();
        self.bank.ingest(self.history.points(), appended);
        if let Some(latest) = self.history.latest() {
            self.window.recompute(latest.timestamp_ms);
        }
        debug!("tick: {count} new samples, {} total", self.history.len());
        self.present();
        count
    }
    /// Bind another catalog source and restart. Out-of-range indices leave the
    /// session untouched.
    pub fn set_source(&mut self, index: usize, now_ms: u64) -> Result<(), SimError> {
        let Some(source) = self.sources.get(index) else {
            warn!(
                "ignoring source index {index}; catalog has {} sources",
                self.sources.len()
            );
            return Err(SimError::SourceOutOfRange {
                index,
                len: self.sources.len(),
            });
        };
        info!("switching source to '{}'", source.name());
        self.clock.rebind(source.rate_hz(), source.len(), now_ms);
        self.current = index;
        self.restart(now_ms);
        Ok(())
    }
    pub fn restart(&mut self, now_ms: u64) {
        let capacity = self.source().len();
        self.clock.restart(now_ms);
        self.history.reset(capacity);
        self.bank.reset();
        self.window.reset();
        self.exhausted_logged = false;
        info!("restarted '{}'", self.source().name());
        self.present();
    }
    /// Returns the new playing state.
    pub fn toggle_play(&mut self, now_ms: u64) -> bool {
        let playing = self.clock.toggle_play(now_ms);
        info!("{}", if playing { "playing" } else { "paused" });
        playing
    }
    pub fn set_speed(&mut self, factor: f64) -> Result<(), SimError> {
        self.clock.set_speed(factor).map_err(|err| {
            warn!("{err}; keeping speed {}", self.clock.speed());
            err
        })
    }
    pub fn set_zoom(&mut self, delta_seconds: f64) {
        let bounds = self.window.zoom(delta_seconds);
        debug!(
            "zoom: window {:.2}s, x {:.0}..{:.0}",
            self.window.viewport().seconds(),
            bounds.min,
            bounds.max
        );
        if !self.history.is_empty() {
            self.present();
        }
    }
    /// Borrowed snapshot of the current bounds and every filter's series.
    pub fn frame(&self) -> DisplayFrame<'_> {
        build_frame(&self.window, self.source(), &self.bank)
    }
    /// Stop the session and release its buffers.
    pub fn dispose(self) {
        info!(
            "disposing session on '{}' after {} samples",
            self.source().name(),
            self.history.len()
        );
    }
    pub fn source(&self) -> &SampleSource {
        &self.sources[self.current]
    }
    pub fn source_index(&self) -> usize {
        self.current
    }
    pub fn sources(&self) -> &[SampleSource] {
        &self.sources
    }
    pub fn history(&self) -> &[TimedPoint] {
        self.history.points()
    }
    pub fn filters(&self) -> &FilterBank {
        &self.bank
    }
    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }
    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }
    pub fn speed(&self) -> f64 {
        self.clock.speed()
    }
    pub fn viewport(&self) -> Viewport {
        self.window.viewport()
    }
    pub fn x_axis(&self) -> AxisBounds {
        self.window.x_axis()
    }
    fn present(&mut self) {
        let frame = build_frame(&self.window, &self.sources[self.current], &self.bank);
        self.sink.present(&frame);
    }
}
fn build_frame<'a>(
    window: &DisplayWindow,
    source: &SampleSource,
    bank: &'a FilterBank,
) -> DisplayFrame<'a> {
    DisplayFrame {
        x_axis: window.x_axis(),
        y_axis: source.amplitude_bounds(),
        series: bank
            .filters()
            .iter()
            .map(|f| SeriesView {
                name: f.name(),
                points: f.output(),
            })
            .collect(),
    }
}
