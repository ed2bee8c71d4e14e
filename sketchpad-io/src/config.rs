//! Editor settings, stored as JSON.
//!
//! Every field has a default, so a partial file (or no file at all) is valid.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use sketchpad_core::{parse_hex, BrushWidth, Color32, ColorParseError, ToolState};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "sketchpad.json";

/// Overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "SKETCHPAD_CONFIG";

/// Largest surface side we accept, in pixels.
const MAX_CANVAS_SIDE: u32 = 16_384;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Initial surface size; the window resizes it afterwards.
    pub canvas_width: u32,
    pub canvas_height: u32,

    /// Cap on undo history entries. `None` keeps every snapshot.
    pub max_history: Option<usize>,

    /// Starting brush color as `#rrggbb`.
    pub default_color: String,
    pub default_width: u32,

    /// Where Save writes when no dialog is available.
    pub export_dir: PathBuf,

    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: sketchpad_core::canvas::DEFAULT_WIDTH,
            canvas_height: sketchpad_core::canvas::DEFAULT_HEIGHT,
            max_history: None,
            default_color: "#000000".into(),
            default_width: BrushWidth::DEFAULT,
            export_dir: PathBuf::from("."),
            log_filter: "info".into(),
        }
    }
}

impl EditorConfig {
    /// `$SKETCHPAD_CONFIG` if set, else `sketchpad.json` in the working directory.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Load from `path`. A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("read config file: {}", path.display()))?;
        let config: EditorConfig = serde_json::from_str(&data)
            .with_context(|| format!("parse config json: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("validate config: {}", path.display()))?;

        tracing::info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Save as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir: {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(self).context("serialize config to json")?;
        fs::write(path, json).with_context(|| format!("write config file: {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
        ] {
            if value == 0 || value > MAX_CANVAS_SIDE {
                tracing::error!(field, value, "canvas dimension out of range");
                return Err(ConfigError::CanvasSize { field, value });
            }
        }

        if !(BrushWidth::MIN..=BrushWidth::MAX).contains(&self.default_width) {
            tracing::warn!(
                default_width = self.default_width,
                "default_width outside [{}, {}], it will be clamped",
                BrushWidth::MIN,
                BrushWidth::MAX
            );
        }

        if self.max_history == Some(0) {
            tracing::error!("max_history must keep at least one state");
            return Err(ConfigError::ZeroHistory);
        }

        parse_hex(&self.default_color)?;
        Ok(())
    }

    /// Starting tool state derived from the configured color and width.
    pub fn tool_state(&self) -> ToolState {
        let mut state = ToolState::default();
        match parse_hex(&self.default_color) {
            Ok(color) => state.set_color(color),
            Err(e) => tracing::warn!(error = %e, "ignoring default_color"),
        }
        state.set_width(self.default_width);
        state
    }

    pub fn background(&self) -> Color32 {
        Color32::WHITE
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} is {value}, expected 1..=16384")]
    CanvasSize { field: &'static str, value: u32 },

    #[error("max_history must be at least 1 when set")]
    ZeroHistory,

    #[error("invalid default_color: {0}")]
    Color(#[from] ColorParseError),
}
