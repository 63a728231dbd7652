// src/engine/mod.rs
pub mod buffer;
pub mod clock;
pub mod error;
pub mod filter;
pub mod plot;
pub mod session;
pub mod source;
pub mod view;
pub use buffer::StreamBuffer;
pub use clock::PlaybackClock;
pub use error::SimError;
pub use filter::{Filter, FilterBank, FilterKind};
pub use plot::{render_frame_png, PlotStyle};
pub use session::SimulationSession;
pub use source::{SampleSource, TimedPoint};
pub use view::{AxisBounds, DisplayFrame, DisplayWindow, NullSink, RenderSink, SeriesView, Viewport};
