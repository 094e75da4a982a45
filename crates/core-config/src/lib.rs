//! Configuration loading and parsing.
//!
//! Parses `getline.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [buffer]
//! capacity = 80
//! default = "default text"
//!
//! [editor]
//! variant = 5
//!
//! [validation]
//! allow = ["yes", "no", "maybe"]
//!
//! [alert]
//! bell = true
//! ```
//!
//! Every field is optional. A missing file yields defaults; a file that fails
//! to parse also yields defaults, with a warning. Unknown fields are ignored.
//! Command line values are layered on top through [`Overrides`] and the final
//! values are read from [`Settings`].

use anyhow::Result;
use core_events::Variant;
use core_text::DEFAULT_CAPACITY;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{debug, info, warn};

/// File name searched for in the working directory and the config dir.
pub const CONFIG_FILE_NAME: &str = "getline.toml";
pub const DEFAULT_VARIANT: u8 = 5;
/// Allow-list used by the validating preset when none is configured.
pub const DEFAULT_ALLOW: [&str; 3] = ["yes", "no", "maybe"];

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct BufferConfig {
    #[serde(default = "BufferConfig::default_capacity")]
    pub capacity: usize,
    #[serde(default)]
    pub default: Option<String>,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            capacity: Self::default_capacity(),
            default: None,
        }
    }
}

impl BufferConfig {
    const fn default_capacity() -> usize {
        DEFAULT_CAPACITY
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_variant")]
    pub variant: u8,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            variant: Self::default_variant(),
        }
    }
}

impl EditorConfig {
    const fn default_variant() -> u8 {
        DEFAULT_VARIANT
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    #[serde(default)]
    pub allow: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AlertConfig {
    #[serde(default = "AlertConfig::default_bell")]
    pub bell: bool,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            bell: Self::default_bell(),
        }
    }
}

impl AlertConfig {
    const fn default_bell() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub buffer: BufferConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub alert: AlertConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub path: Option<PathBuf>, // file the values came from, if any
    pub file: ConfigFile,      // parsed (or default) data
}

/// Command line values; `None` (or `false`) leaves the file value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub capacity: Option<usize>,
    pub default: Option<String>,
    pub variant: Option<u8>,
    pub allow: Option<Vec<String>>,
    pub no_bell: bool,
}

/// Resolved values for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub capacity: usize,
    pub default: Option<String>,
    pub variant: Variant,
    /// Allow-list to enforce on Enter; empty when the preset does not validate.
    pub allow: Vec<String>,
    pub bell: bool,
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("getline").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        debug!(target: "config", path = %path.display(), "config_file_absent");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                path: Some(path),
                file,
            })
        }
        Err(err) => {
            warn!(target: "config", path = %path.display(), error = %err, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

fn default_allow() -> Vec<String> {
    DEFAULT_ALLOW.iter().map(|s| s.to_string()).collect()
}

impl Config {
    /// Layer command line values over the file values.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(capacity) = overrides.capacity {
            self.file.buffer.capacity = capacity;
        }
        if let Some(default) = &overrides.default {
            self.file.buffer.default = Some(default.clone());
        }
        if let Some(variant) = overrides.variant {
            self.file.editor.variant = variant;
        }
        if let Some(allow) = &overrides.allow {
            self.file.validation.allow = Some(allow.clone());
        }
        if overrides.no_bell {
            self.file.alert.bell = false;
        }
    }

    /// Preset selected by `[editor] variant`; unknown numbers fall back to 5.
    pub fn variant(&self) -> Variant {
        let n = self.file.editor.variant;
        Variant::from_number(n).unwrap_or_else(|| {
            warn!(target: "config", requested = n, fallback = DEFAULT_VARIANT, "unknown_variant");
            Variant::Full
        })
    }

    /// Allow-list for the selected preset. Non-validating presets get none;
    /// the validating preset falls back to [`DEFAULT_ALLOW`] when the list is
    /// missing or empty.
    pub fn allow_list(&self) -> Vec<String> {
        if !self.variant().validates() {
            return Vec::new();
        }
        match &self.file.validation.allow {
            Some(list) if !list.is_empty() => list.clone(),
            Some(_) => {
                warn!(target: "config", fallback = ?DEFAULT_ALLOW, "empty_allow_list_using_default");
                default_allow()
            }
            None => default_allow(),
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            capacity: self.file.buffer.capacity,
            default: self.file.buffer.default.clone(),
            variant: self.variant(),
            allow: self.allow_list(),
            bell: self.file.alert.bell,
        }
    }
}
