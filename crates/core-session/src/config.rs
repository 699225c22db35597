//! Session configuration.
//!
//! Two layers: [`SessionConfig`] is the explicit struct every session is
//! constructed from (validated once, at construction — a bad value is the
//! only fatal condition this crate knows); `load_host_config` is the
//! optional TOML file layer for hosts that want tunables on disk. Unknown
//! fields are ignored and a missing or unparsable file falls back to
//! defaults, so a stale config never blocks startup.

use core_buffer::LINE_CAP_MAX;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use thiserror::Error;
use tracing::info;

/// Construction-time configuration violations. Runtime edits never fail;
/// these are the only errors the core surfaces.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_lines must be within 1..={LINE_CAP_MAX}, got {got}")]
    MaxLinesOutOfRange { got: usize },
    #[error("viewport dimensions must be positive, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },
    #[error("blink interval must be at least one tick")]
    ZeroBlinkInterval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Hard cap on buffer lines, 1..=[`LINE_CAP_MAX`].
    pub max_lines: usize,
    /// Available pixel width for one line of text.
    pub viewport_width: u32,
    /// Available pixel height for the text area.
    pub viewport_height: u32,
    /// Double inserted backslashes and delete the pair atomically; a
    /// compatibility shim for hosts whose renderer re-interprets escapes.
    pub escape_backslash: bool,
    /// Host render ticks per caret visibility toggle.
    pub blink_interval: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_lines: 4,
            viewport_width: 480,
            viewport_height: 96,
            escape_backslash: false,
            blink_interval: 30,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=LINE_CAP_MAX).contains(&self.max_lines) {
            return Err(ConfigError::MaxLinesOutOfRange {
                got: self.max_lines,
            });
        }
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(ConfigError::EmptyViewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        if self.blink_interval == 0 {
            return Err(ConfigError::ZeroBlinkInterval);
        }
        Ok(())
    }
}

// ---- host config file ----------------------------------------------------

#[derive(Debug, Deserialize, Clone)]
struct EditorSection {
    #[serde(default = "EditorSection::default_max_lines")]
    max_lines: usize,
    #[serde(default)]
    escape_backslash: bool,
}

impl Default for EditorSection {
    fn default() -> Self {
        Self {
            max_lines: Self::default_max_lines(),
            escape_backslash: false,
        }
    }
}

impl EditorSection {
    const fn default_max_lines() -> usize {
        4
    }
}

#[derive(Debug, Deserialize, Clone)]
struct CaretSection {
    #[serde(default = "CaretSection::default_blink_interval")]
    blink_interval: u32,
}

impl Default for CaretSection {
    fn default() -> Self {
        Self {
            blink_interval: Self::default_blink_interval(),
        }
    }
}

impl CaretSection {
    const fn default_blink_interval() -> u32 {
        30
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
struct ConfigFile {
    #[serde(default)]
    editor: EditorSection,
    #[serde(default)]
    caret: CaretSection,
}

/// Config path convention: `linepad.toml` in the working directory.
pub fn discover() -> PathBuf {
    PathBuf::from("linepad.toml")
}

/// Load host tunables, merged over [`SessionConfig::default`]. Viewport
/// dimensions come from the host at runtime (terminal size, widget bounds),
/// never from the file. The result still goes through `validate` at session
/// construction.
pub fn load_host_config(path: Option<PathBuf>) -> SessionConfig {
    let path = path.unwrap_or_else(discover);
    let file = match fs::read_to_string(&path) {
        Ok(content) => match toml::from_str::<ConfigFile>(&content) {
            Ok(file) => file,
            Err(_e) => {
                info!(target: "config", path = %path.display(), "config parse failed, using defaults");
                ConfigFile::default()
            }
        },
        Err(_) => ConfigFile::default(),
    };
    SessionConfig {
        max_lines: file.editor.max_lines,
        escape_backslash: file.editor.escape_backslash,
        blink_interval: file.caret.blink_interval,
        ..SessionConfig::default()
    }
}
