//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`ISC_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Settings schema configuration
    #[serde(default)]
    pub schema: SchemaConfig,
    /// Probe system configuration
    #[serde(default)]
    pub probe: ProbeConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`ISC_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // ISC_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("ISC_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "iterscope".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Settings schema configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Embedded schema resource name
    pub resource: String,
    /// Qualified type name of the settings surface
    pub settings_type: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            resource: "cfd".to_string(),
            settings_type: "isd:RefCFDSettings".to_string(),
        }
    }
}

/// Initial values for the built-in probe system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Kinematic viscosity
    pub viscosity: f32,
    /// Diffusion rate for injected quantities
    pub diffusion_rate: f32,
    /// Impulse radius, normalized to the preview
    pub mouse_radius: f32,
    /// Relaxation iterations per tick
    pub iterations: i32,
    /// Seconds advanced per tick
    pub time_step: f32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            viscosity: 0.05,
            diffusion_rate: 0.25,
            mouse_radius: 0.04,
            iterations: 20,
            time_step: 0.016,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
