use std::path::Path;

use serde::Deserialize;

use crate::engine::error::SetupError;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub controls: Controls,
    #[serde(default)]
    pub view: InitialView,
}

impl Config {
    /// Reads a TOML config file, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Config, SetupError> {
        let Some(path) = path else {
            return Ok(Config::default());
        };

        let text = std::fs::read_to_string(path).map_err(|source| SetupError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = toml::from_str(&text).map_err(|source| SetupError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate().map_err(|message| SetupError::ConfigInvalid {
            path: path.to_path_buf(),
            message,
        })?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        let ppl = self.controls.pixels_per_line;
        if !(ppl.is_finite() && ppl > 0.0) {
            return Err(format!(
                "controls.pixels_per_line must be a positive number, got {}",
                ppl
            ));
        }

        Ok(())
    }

    /// Command-line values win over the file. `vsync` can only turn vsync on.
    pub fn apply_overrides(&mut self, width: Option<u32>, height: Option<u32>, vsync: bool) {
        if let Some(width) = width {
            self.window.width = width;
        }
        if let Some(height) = height {
            self.window.height = height;
        }
        if vsync {
            self.window.vsync = true;
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Off means immediate presentation, uncapped frame rate.
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Wilk".to_string(),
            vsync: false,
        }
    }
}

/// Step sizes applied per key-down or scroll event.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Controls {
    /// Pan distance at scale 1.0; divided by the current scale.
    pub pan_speed: f64,
    pub mega_scale: f64,
    pub iteration_step: f64,
    /// Pixel scroll deltas are divided by this to get lines.
    pub pixels_per_line: f64,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            pan_speed: 0.10,
            mega_scale: 128.0,
            iteration_step: 1.0,
            pixels_per_line: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct InitialView {
    pub offset: [f64; 2],
    pub scale: f64,
    pub iteration_cap: f64,
}

impl Default for InitialView {
    fn default() -> Self {
        Self {
            offset: [0.0, 0.0],
            scale: 1.0,
            iteration_cap: 100.0,
        }
    }
}
