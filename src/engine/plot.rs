use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use plotters::prelude::*;
use crate::engine::error::SimError;
use crate::engine::view::DisplayFrame;
/// Snapshot appearance. Series take palette colours in registration order.
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub size: (u32, u32),
    pub background: RGBColor,
    pub palette: Vec<RGBColor>,
}
impl PlotStyle {
    fn series_color(&self, index: usize) -> RGBColor {
        match self.palette.len() {
            0 => WHITE,
            n => self.palette[index % n],
        }
    }
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            size: (1000, 360),
            background: BLACK,
            palette: vec![
                RGBColor(200, 200, 200),
                RGBColor(0, 200, 255),
                RGBColor(255, 200, 0),
                RGBColor(255, 0, 255),
                RGBColor(80, 220, 120),
            ],
        }
    }
}
/// Draw the visible part of every series in `frame` and encode it as PNG.
pub fn render_frame_png(frame: &DisplayFrame<'_>, style: PlotStyle) -> Result<Vec<u8>, SimError> {
    if frame.series.is_empty() {
        return Err(SimError::Plot("display frame has no series".into()));
    }
    let (width, height) = style.size;
    let mut pixels = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, style.size).into_drawing_area();
        root.fill(&style.background)?;
        let x = frame.x_axis;
        let y = frame.y_axis;
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption("Filters", ("sans-serif", 20).into_font().color(&WHITE))
            .set_label_area_size(LabelAreaPosition::Left, 45)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(x.min..x.max, y.min..y.max)?;
        chart
            .configure_mesh()
            .x_desc("ms")
            .light_line_style(&WHITE.mix(0.1))
            .draw()?;
        for (idx, series) in frame.series.iter().enumerate() {
            let color = style.series_color(idx);
            let points = series
                .visible(x)
                .iter()
                .map(|p| (p.timestamp_ms as f64, p.value));
            chart
                .draw_series(LineSeries::new(points, &color))?
                .label(series.name)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
        }
        chart
            .configure_series_labels()
            .border_style(&WHITE.mix(0.2))
            .background_style(&style.background)
            .draw()?;
        root.present()?;
    }
    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(&pixels, width, height, ExtendedColorType::Rgb8)?;
    Ok(png)
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{FilterKind, SampleSource, SimulationSession, Viewport};
    #[test]
    fn renders_session_frame_to_png() {
        let samples = (0..600).map(|i| (i as f64 * 0.1).sin()).collect();
        let source = SampleSource::new("sine", 120, samples).unwrap();
        let mut session =
            SimulationSession::new(vec![source], 0, &FilterKind::ALL, Viewport::default(), 0)
                .unwrap();
        session.tick(2000);
        let png = render_frame_png(&session.frame(), PlotStyle::default()).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
    #[test]
    fn empty_palette_falls_back_to_white() {
        let style = PlotStyle {
            palette: Vec::new(),
            ..PlotStyle::default()
        };
        assert_eq!(style.series_color(3), WHITE);
        let samples = (0..240).map(|i| (i as f64 * 0.2).cos()).collect();
        let source = SampleSource::new("cos", 120, samples).unwrap();
        let mut session =
            SimulationSession::new(vec![source], 0, &FilterKind::ALL, Viewport::default(), 0)
                .unwrap();
        session.tick(1500);
        let png = render_frame_png(&session.frame(), style).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
    #[test]
    fn empty_frame_is_an_error() {
        let source = SampleSource::new("sine", 120, vec![0.0; 4]).unwrap();
        let session =
            SimulationSession::new(vec![source], 0, &[], Viewport::default(), 0).unwrap();
        assert!(matches!(
            render_frame_png(&session.frame(), PlotStyle::default()),
            Err(SimError::Plot(_))
        ));
    }
}
