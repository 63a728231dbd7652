use thiserror::Error;
#[derive(Debug, Error)]
pub enum SimError {
    #[error("sample rate must be greater than zero")]
    InvalidSampleRate,
    #[error("source catalog is empty")]
    EmptyCatalog,
    #[error("source index {index} out of range (catalog has {len} sources)")]
    SourceOutOfRange { index: usize, len: usize },
    #[error("playback speed must be finite and positive, got {0}")]
    InvalidSpeed(f64),
    #[error("failed to render plot: {0}")]
    Plot(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for SimError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        SimError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for SimError {
    fn from(value: image::ImageError) -> Self {
        SimError::Plot(value.to_string())
    }
}
