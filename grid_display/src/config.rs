// config.rs - Application configuration, loaded from JSON

use std::path::Path;

use anyhow::{Context, Result, bail};
use conway::LifeConfig;
use egui::Color32;
use serde::{Deserialize, Serialize};

/// Environment variable naming the JSON configuration file.
pub const CONFIG_ENV: &str = "GRID_DISPLAY_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub life: LifeConfig,
    pub display: DisplayConfig,
    /// Start with the simulation paused.
    pub start_paused: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            life: LifeConfig {
                initial_alive_probability: Some(0.33),
                cycle_history: 10,
                ..LifeConfig::default()
            },
            display: DisplayConfig::default(),
            start_paused: false,
        }
    }
}

/// Cell pixel geometry and colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Side of one painted cell in points.
    pub cell_size: f32,
    /// Gap between cells in points.
    pub spacing: f32,
    /// Derive grid dimensions from the window instead of `life.width/height`.
    pub fit_to_viewport: bool,
    pub live_color: [u8; 3],
    pub dead_color: [u8; 3],
    pub dying_color: [u8; 3],
    pub window_size: [f32; 2],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cell_size: 15.0,
            spacing: 0.5,
            fit_to_viewport: true,
            live_color: [0, 200, 0],
            dead_color: [40, 40, 40],
            dying_color: [120, 60, 20],
            window_size: [800.0, 950.0],
        }
    }
}

impl DisplayConfig {
    /// Distance between the origins of two adjacent cells.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.cell_size + self.spacing
    }

    pub fn color(rgb: [u8; 3]) -> Color32 {
        Color32::from_rgb(rgb[0], rgb[1], rgb[2])
    }
}

impl AppConfig {
    /// Reads the file named by [`CONFIG_ENV`], or falls back to defaults.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_path(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.life.validate()?;
        if !(self.display.cell_size > 0.0) {
            bail!("display.cell_size must be positive");
        }
        if !(self.display.spacing >= 0.0) {
            bail!("display.spacing must not be negative");
        }
        Ok(())
    }
}
