// src/fixtures.rs
//! Sample sources for the viewer: generated sine waves and recordings stored as JSON.
use std::f64::consts::PI;
use std::path::Path;
use anyhow::{Context, Result};
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Deserialize;
use crate::config::{AppConfig, SyntheticConfig};
use crate::engine::SampleSource;
/// On-disk shape of a recorded source.
#[derive(Debug, Deserialize)]
struct SourceFile {
    name: String,
    rate: u32,
    samples: Vec<f64>,
}
pub fn parse_source(text: &str) -> Result<SampleSource> {
    let file: SourceFile = serde_json::from_str(text).context("invalid source JSON")?;
    let source = SampleSource::new(file.name, file.rate, file.samples)?;
    Ok(source)
}
pub fn load_source_file(path: &Path) -> Result<SampleSource> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read source {}", path.display()))?;
    let source = parse_source(&text).with_context(|| format!("in source {}", path.display()))?;
    info!(
        "loaded '{}' from {} ({} samples @ {} Hz)",
        source.name(),
        path.display(),
        source.len(),
        source.rate_hz()
    );
    Ok(source)
}
/// `seconds + 1` whole seconds of `amplitude * sin(2π f t)` plus uniform noise in
/// `[-noise, noise)`.
pub fn sine(
    name: &str,
    config: &SyntheticConfig,
    noise_amplitude: f64,
    rng: &mut StdRng,
) -> Result<SampleSource> {
    let rate = config.rate;
    let delta = 1.0 / f64::from(rate);
    let total = (config.seconds as usize + 1) * rate as usize;
    let mut t = 0.0;
    let mut samples = Vec::with_capacity(total);
    for _ in 0..total {
        let mut value = (t * 2.0 * PI * config.frequency_hz).sin() * config.amplitude;
        if noise_amplitude > 0.0 {
            value += rng.gen_range(-1.0..1.0) * noise_amplitude;
        }
        samples.push(value);
        t += delta;
    }
    Ok(SampleSource::new(name, rate, samples)?)
}
/// Clean, 8% and 33% noisy sine waves.
pub fn synthetic_sources(config: &SyntheticConfig) -> Result<Vec<SampleSource>> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let amp = config.amplitude;
    Ok(vec![
        sine("Sine", config, 0.0, &mut rng)?,
        sine("Sine + noise (8%)", config, amp * 0.08, &mut rng)?,
        sine("Sine + noise (33%)", config, amp * 0.33, &mut rng)?,
    ])
}
/// Recorded sources from the config, followed by the generated ones.
pub fn build_catalog(config: &AppConfig) -> Result<Vec<SampleSource>> {
    let mut catalog = Vec::new();
    for path in &config.source_files {
        catalog.push(load_source_file(path)?);
    }
    catalog.extend(synthetic_sources(&config.synthetic)?);
    Ok(catalog)
}
