//! Application configuration.
//!
//! Loaded from a JSON file next to the binary; missing fields fall back
//! to defaults and the file is rewritten on load so new options show up
//! for editing.  CLI flags override individual values after loading.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub control: ControlConfig,
    pub keyboard: KeyboardTuning,
}

/// How to launch the hand-tracking helper process.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub command: String,
    pub args: Vec<String>,
    /// Hands below this detection score are ignored.
    pub min_score: f32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            command: "python3".to_string(),
            args: vec!["hand_provider.py".to_string()],
            min_score: 0.5,
        }
    }
}

/// System-control tuning.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Scroll wheel step per scroll gesture frame.
    pub scroll_step: i32,
    /// Display size override; `None` queries the OS.
    pub screen_width: Option<u32>,
    pub screen_height: Option<u32>,
    /// Where screenshots land; created at startup.
    pub screenshot_dir: String,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            scroll_step: 10,
            screen_width: None,
            screen_height: None,
            screenshot_dir: "screenshots".to_string(),
        }
    }
}

/// Virtual keyboard geometry, in camera-frame pixels.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardTuning {
    pub origin_x: f32,
    pub origin_y: f32,
    pub key_width: f32,
    pub key_height: f32,
    pub gap: f32,
    /// Shared key cooldown in seconds.
    pub press_cooldown_s: f32,
}

impl Default for KeyboardTuning {
    fn default() -> Self {
        Self {
            origin_x: 40.0,
            origin_y: 200.0,
            key_width: 80.0,
            key_height: 60.0,
            gap: 5.0,
            press_cooldown_s: 1.0,
        }
    }
}

impl AppConfig {
    /// Load the config file, creating it with defaults if absent.  A
    /// file that fails to parse is treated as defaults rather than a
    /// fatal error.
    pub fn load(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let content =
                fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            match serde_json::from_str::<AppConfig>(&content) {
                Ok(config) => {
                    info!("loaded configuration from {}", path.display());
                    config
                }
                Err(err) => {
                    warn!("ignoring unparsable config {}: {err}", path.display());
                    Self::default()
                }
            }
        } else {
            info!("no config at {}, writing defaults", path.display());
            Self::default()
        };

        config.save(path)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}
