//! Replays recorded sensor feeds in real time and runs a bank of denoising filters
//! over the stream for side-by-side display.
pub mod config;
pub mod engine;
pub mod fixtures;
pub use config::AppConfig;
pub use engine::{
    DisplayFrame, FilterKind, RenderSink, SampleSource, SimError, SimulationSession, TimedPoint,
    Viewport,
};
