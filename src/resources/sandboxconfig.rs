//! Sandbox configuration resource.
//!
//! Manages sandbox settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [field]
//! width = 24
//! height = 24
//! cell_size = 32
//!
//! [sandbox]
//! tick_rate = 60
//! snake_step = 0.15
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_FIELD_WIDTH: i32 = 24;
const DEFAULT_FIELD_HEIGHT: i32 = 24;
const DEFAULT_CELL_SIZE: i32 = 32;
const DEFAULT_TICK_RATE: u32 = 60;
const DEFAULT_SNAKE_STEP: f32 = 0.15;
const DEFAULT_CONFIG_PATH: &str = "./sandbox.ini";

/// Sandbox configuration resource.
///
/// Stores the play field dimensions and simulation pacing. Values come from
/// the INI file when one exists; otherwise the defaults above apply.
#[derive(Resource, Debug, Clone)]
pub struct SandboxConfig {
    /// Play field width in cells.
    pub field_width: i32,
    /// Play field height in cells.
    pub field_height: i32,
    /// Size of one field cell in pixels.
    pub cell_size: i32,
    /// Simulation ticks per second.
    pub tick_rate: u32,
    /// Seconds between snake steps.
    pub snake_step: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SandboxConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            tick_rate: DEFAULT_TICK_RATE,
            snake_step: DEFAULT_SNAKE_STEP,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [field] section
        if let Some(width) = config.getint("field", "width").ok().flatten() {
            self.field_width = width as i32;
        }
        if let Some(height) = config.getint("field", "height").ok().flatten() {
            self.field_height = height as i32;
        }
        if let Some(cell) = config.getint("field", "cell_size").ok().flatten() {
            self.cell_size = cell as i32;
        }

        // [sandbox] section
        if let Some(rate) = config.getuint("sandbox", "tick_rate").ok().flatten() {
            self.tick_rate = rate as u32;
        }
        if let Some(step) = config.getfloat("sandbox", "snake_step").ok().flatten() {
            self.snake_step = step as f32;
        }

        info!(
            "Loaded config: {}x{} field, cell_size={}, tick_rate={}, snake_step={}",
            self.field_width, self.field_height, self.cell_size, self.tick_rate, self.snake_step
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [field] section
        config.set("field", "width", Some(self.field_width.to_string()));
        config.set("field", "height", Some(self.field_height.to_string()));
        config.set("field", "cell_size", Some(self.cell_size.to_string()));

        // [sandbox] section
        config.set("sandbox", "tick_rate", Some(self.tick_rate.to_string()));
        config.set("sandbox", "snake_step", Some(self.snake_step.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Seconds covered by one simulation tick.
    pub fn tick_delta(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}
