// src/config.rs
use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use crate::engine::{FilterKind, Viewport};
pub const DEFAULT_CONFIG_FILE: &str = "ecgsim.json";
/// Parameters for the generated sine fixtures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    pub seconds: u32,
    pub rate: u32,
    pub frequency_hz: f64,
    pub amplitude: f64,
    /// Fixed seed for the noise generator; entropy when unset.
    pub seed: Option<u64>,
}
impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            seconds: 30,
            rate: 120,
            frequency_hz: 1.0,
            amplitude: 3.0,
            seed: None,
        }
    }
}
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tick_hz: f64,
    pub initial_source: usize,
    pub window_seconds: f64,
    pub speed: f64,
    pub filters: Vec<FilterKind>,
    pub source_files: Vec<PathBuf>,
    pub synthetic: SyntheticConfig,
    pub snapshot_dir: PathBuf,
}
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            initial_source: 0,
            window_seconds: Viewport::default().seconds(),
            speed: 1.0,
            filters: FilterKind::ALL.to_vec(),
            source_files: Vec::new(),
            synthetic: SyntheticConfig::default(),
            snapshot_dir: PathBuf::from("."),
        }
    }
}
impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(text).context("invalid config JSON")?;
        config.validate()?;
        Ok(config)
    }
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in config {}", path.display()))
    }
    /// Load from an explicit path, else `ecgsim.json` if present, else defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            return Self::load(fallback);
        }
        info!("no {DEFAULT_CONFIG_FILE} found, using defaults");
        Ok(Self::default())
    }
    pub fn validate(&self) -> Result<()> {
        if !self.tick_hz.is_finite() || self.tick_hz <= 0.0 {
            bail!("tick_hz must be a positive number, got {}", self.tick_hz);
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            bail!("speed must be a positive number, got {}", self.speed);
        }
        if !self.window_seconds.is_finite() {
            bail!("window_seconds must be finite");
        }
        if self.filters.is_empty() {
            bail!("at least one filter must be enabled");
        }
        for (i, kind) in self.filters.iter().enumerate() {
            if self.filters[..i].contains(kind) {
                bail!("filter '{}' listed twice", kind.name());
            }
        }
        if self.synthetic.rate == 0 {
            bail!("synthetic.rate must be greater than zero");
        }
        Ok(())
    }
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.window_seconds)
    }
}
