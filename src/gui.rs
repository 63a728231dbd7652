// src/gui.rs
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use anyhow::{Context, Result};
use eframe::egui;
use egui::Color32;
use egui_plot::{Legend, Line, Plot, PlotBounds, PlotPoints};
use log::{error, info};
use ecgsim::engine::{render_frame_png, AxisBounds, PlotStyle};
use ecgsim::{AppConfig, DisplayFrame, RenderSink, SampleSource, SimulationSession};
const ZOOM_STEP_SECONDS: f64 = 0.25;
const PALETTE: [Color32; 5] = [
    Color32::from_rgb(200, 200, 200),
    Color32::from_rgb(0, 200, 255),
    Color32::from_rgb(255, 200, 0),
    Color32::from_rgb(255, 0, 255),
    Color32::from_rgb(80, 220, 120),
];
/// Visible slice of every series, copied out of the last frame the session pushed.
struct PlotCache {
    x_axis: AxisBounds,
    y_axis: AxisBounds,
    series: Vec<(&'static str, Vec<[f64; 2]>)>,
}
impl PlotCache {
    fn from_frame(frame: &DisplayFrame<'_>) -> Self {
        Self {
            x_axis: frame.x_axis,
            y_axis: frame.y_axis,
            series: frame
                .series
                .iter()
                .map(|s| {
                    let points = s.visible(frame.x_axis).iter().map(|p| p.to_xy()).collect();
                    (s.name, points)
                })
                .collect(),
        }
    }
}
struct PlotFeed(Rc<RefCell<PlotCache>>);
impl RenderSink for PlotFeed {
    fn present(&mut self, frame: &DisplayFrame<'_>) {
        *self.0.borrow_mut() = PlotCache::from_frame(frame);
    }
}
pub struct EcgSimApp {
    session: SimulationSession,
    plot: Rc<RefCell<PlotCache>>,
    started_at: Instant,
    // Window creation happens after `new`; playback starts on the first frame.
    awaiting_first_frame: bool,
    tick_interval: Duration,
    speed: f64,
    snapshot_dir: PathBuf,
    log_messages: Vec<String>,
}
impl EcgSimApp {
    pub fn new(config: &AppConfig, sources: Vec<SampleSource>) -> Result<Self> {
        let mut session = SimulationSession::new(
            sources,
            config.initial_source,
            &config.filters,
            config.viewport(),
            0,
        )
        .context("failed to start simulation")?;
        session.set_speed(config.speed)?;
        let plot = Rc::new(RefCell::new(PlotCache::from_frame(&session.frame())));
        session.set_sink(PlotFeed(Rc::clone(&plot)));
        let first = format!("Replaying '{}'", session.source().name());
        Ok(Self {
            session,
            plot,
            started_at: Instant::now(),
            awaiting_first_frame: true,
            tick_interval: Duration::from_secs_f64(1.0 / config.tick_hz),
            speed: config.speed,
            snapshot_dir: config.snapshot_dir.clone(),
            log_messages: vec![first],
        })
    }
    fn now_ms(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }
    /// Re-anchor the session on the viewer clock so start-up time is not played.
    fn start_playback(&mut self) {
        self.awaiting_first_frame = false;
        self.started_at = Instant::now();
        self.session.restart(0);
    }
    fn log(&mut self, msg: &str) {
        self.log_messages.push(format!("> {}", msg));
        if self.log_messages.len() > 8 {
            self.log_messages.remove(0);
        }
    }
    fn select_source(&mut self, index: usize) {
        let now = self.now_ms();
        match self.session.set_source(index, now) {
            Ok(()) => {
                let msg = format!("Source: {}", self.session.source().name());
                self.log(&msg);
            }
            Err(err) => self.log(&err.to_string()),
        }
    }
    fn save_snapshot(&mut self) -> Result<PathBuf> {
        let png = render_frame_png(&self.session.frame(), PlotStyle::default())?;
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let name = format!(
            "snapshot_{}_{}.png",
            file_stem(self.session.source().name()),
            stamp
        );
        let path = self.snapshot_dir.join(name);
        std::fs::write(&path, png)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("snapshot saved to {}", path.display());
        Ok(path)
    }
    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("ecgsim");
        ui.label("Filter comparison");
        ui.separator();
        let mut selected = self.session.source_index();
        egui::ComboBox::from_label("Source")
            .selected_text(self.session.source().name())
            .show_ui(ui, |ui| {
                for (i, source) in self.session.sources().iter().enumerate() {
                    ui.selectable_value(&mut selected, i, source.name());
                }
            });
        if selected != self.session.source_index() {
            self.select_source(selected);
        }
        ui.horizontal(|ui| {
            let play_txt = if self.session.is_playing() { "⏸ Pause" } else { "▶ Play" };
            if ui.button(play_txt).clicked() {
                let now = self.now_ms();
                self.session.toggle_play(now);
            }
            if ui.button("🔄 Restart").clicked() {
                let now = self.now_ms();
                self.session.restart(now);
            }
        });
        let slider = egui::Slider::new(&mut self.speed, 0.1..=8.0)
            .logarithmic(true)
            .text("speed");
        if ui.add(slider).changed() {
            if let Err(err) = self.session.set_speed(self.speed) {
                self.speed = self.session.speed();
                self.log(&err.to_string());
            }
        }
        ui.horizontal(|ui| {
            if ui.button("−").clicked() {
                self.session.set_zoom(-ZOOM_STEP_SECONDS);
            }
            ui.label(format!("{:.2} s", self.session.viewport().seconds()));
            if ui.button("+").clicked() {
                self.session.set_zoom(ZOOM_STEP_SECONDS);
            }
        });
        if ui.button("💾 Save PNG").clicked() {
            match self.save_snapshot() {
                Ok(path) => self.log(&format!("Saved {}", path.display())),
                Err(err) => {
                    error!("{err:#}");
                    self.log(&format!("Snapshot failed: {err}"));
                }
            }
        }
        ui.separator();
        let source = self.session.source();
        ui.label(format!(
            "{} / {} samples @ {} Hz",
            self.session.history().len(),
            source.len(),
            source.rate_hz()
        ));
        if self.session.clock().is_exhausted() {
            ui.label(egui::RichText::new("End of source").color(Color32::YELLOW).small());
        }
        ui.add_space(10.0);
        egui::ScrollArea::vertical().max_height(140.0).show(ui, |ui| {
            for m in &self.log_messages {
                ui.monospace(m);
            }
        });
    }
    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            let now = self.now_ms();
            self.session.toggle_play(now);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::PlusEquals)) {
            self.session.set_zoom(ZOOM_STEP_SECONDS);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Minus)) {
            self.session.set_zoom(-ZOOM_STEP_SECONDS);
        }
    }
}
impl eframe::App for EcgSimApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.awaiting_first_frame {
            self.start_playback();
        }
        let now = self.now_ms();
        self.session.tick(now);
        self.handle_keys(ctx);
        egui::SidePanel::left("controls")
            .min_width(260.0)
            .show(ctx, |ui| self.controls(ui));
        egui::CentralPanel::default().show(ctx, |ui| {
            let cache = self.plot.borrow();
            let (x, y) = (cache.x_axis, cache.y_axis);
            Plot::new("filters")
                .legend(Legend::default())
                .allow_drag(false)
                .allow_zoom(false)
                .allow_scroll(false)
                .show(ui, |plot_ui| {
                    plot_ui.set_plot_bounds(PlotBounds::from_min_max([x.min, y.min], [x.max, y.max]));
                    for (idx, (name, points)) in cache.series.iter().enumerate() {
                        let color = PALETTE[idx % PALETTE.len()];
                        plot_ui.line(
                            Line::new(PlotPoints::new(points.clone()))
                                .name(*name)
                                .color(color),
                        );
                    }
                });
        });
        ctx.request_repaint_after(self.tick_interval);
    }
}
fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}
#[cfg(test)]
mod tests {
    use super::*;
    use ecgsim::{FilterKind, Viewport};
    #[test]
    fn plot_feed_keeps_visible_slice() {
        let samples = (0..1000).map(|i| i as f64).collect();
        let source = SampleSource::new("ramp", 100, samples).unwrap();
        let mut session =
            SimulationSession::new(vec![source], 0, &[FilterKind::Raw], Viewport::new(1.0), 0)
                .unwrap();
        let cache = Rc::new(RefCell::new(PlotCache::from_frame(&session.frame())));
        session.set_sink(PlotFeed(Rc::clone(&cache)));
        session.tick(5000);
        let cache = cache.borrow();
        assert_eq!(cache.x_axis, AxisBounds::new(3990.0, 4990.0));
        let (name, points) = &cache.series[0];
        assert_eq!(*name, "raw");
        assert_eq!(points.first(), Some(&[3990.0, 399.0]));
        assert_eq!(points.len(), 101);
    }
    #[test]
    fn first_frame_discards_startup_delay() {
        let samples = (0..1000).map(|i| i as f64).collect();
        let source = SampleSource::new("ramp", 100, samples).unwrap();
        let mut app = EcgSimApp::new(&AppConfig::default(), vec![source]).unwrap();
        // time spent opening the window
        app.session.tick(2_000);
        assert_eq!(app.session.history().len(), 200);
        app.start_playback();
        assert!(!app.awaiting_first_frame);
        assert!(app.session.history().is_empty());
        assert_eq!(app.session.clock().next_index(), 0);
        assert!(app.plot.borrow().series.iter().all(|(_, points)| points.is_empty()));
    }
    #[test]
    fn file_stem_is_filesystem_safe() {
        assert_eq!(file_stem("Sine + noise (8%)"), "sine___noise__8__");
    }
}
