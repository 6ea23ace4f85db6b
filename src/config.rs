use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::escape::{Encoding, EscapeOptions};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

// ── Final (merged) config types ──

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub shell: ShellConfig,
    #[serde(default)]
    pub escape: EscapeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Interpreter receiving rendered commands.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ShellConfig {
    /// Empty selects the platform default.
    #[serde(default)]
    pub program: String,
    /// Arguments placed before the rendered command, usually `-c`.
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct EscapeConfig {
    #[serde(default)]
    pub bash: bool,
    /// Encoding name; empty picks the mode's default.
    #[serde(default)]
    pub encoding: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub history: bool,
    #[serde(default)]
    pub history_path: String,
}

impl EscapeConfig {
    /// Escape options described by this section.
    pub fn options(&self) -> Result<EscapeOptions> {
        let encoding = match self.encoding.trim() {
            "" => None,
            name => Some(name.parse::<Encoding>()?),
        };
        Ok(EscapeOptions {
            encoding,
            bash: self.bash,
        })
    }
}

impl LoggingConfig {
    /// Parsed log level; unknown names fall back to `warn`.
    pub fn level_filter(&self) -> LevelFilter {
        match self.level.trim() {
            "" => LevelFilter::Warn,
            name => name.parse().unwrap_or_else(|_| {
                log::warn!("unknown log level {name:?}, using warn");
                LevelFilter::Warn
            }),
        }
    }

    /// History file with `~` and environment variables expanded.
    pub fn history_path(&self) -> Option<PathBuf> {
        if self.history_path.trim().is_empty() {
            return None;
        }
        match shellexpand::full(&self.history_path) {
            Ok(p) => Some(PathBuf::from(p.into_owned())),
            Err(e) => {
                log::warn!("cannot expand history path {:?}: {e}", self.history_path);
                None
            }
        }
    }
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    shell: ShellOverlay,
    #[serde(default)]
    escape: EscapeOverlay,
    #[serde(default)]
    logging: LoggingOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct ShellOverlay {
    program: Option<String>,
    /// Replaces the default argument list; argument order matters so lists
    /// are never merged.
    args: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
struct EscapeOverlay {
    bash: Option<bool>,
    encoding: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct LoggingOverlay {
    level: Option<String>,
    history: Option<bool>,
    history_path: Option<String>,
}

// ── Merge logic ──

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge user overlay from ~/.config/shcmd/config.toml (if exists)
    ///
    /// Values present in the overlay replace the defaults; omitted values
    /// are left alone. A missing overlay is fine, a malformed one is an
    /// [`Error::Config`].
    pub fn load() -> Result<Self> {
        let mut config = Self::default_config();
        if let Some(path) = Self::overlay_path() {
            config.apply_overlay_file(&path)?;
        }
        Ok(config)
    }

    /// Path of the user overlay file.
    pub fn overlay_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        Some(PathBuf::from(home).join(".config/shcmd/config.toml"))
    }

    /// Merge the overlay at `path`, if the file exists.
    pub fn apply_overlay_file(&mut self, path: &Path) -> Result<()> {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Ok(());
        };
        let overlay: ConfigOverlay = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        self.apply_overlay(overlay);
        Ok(())
    }

    /// Apply an overlay on top of this config.
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        let s = overlay.shell;
        set(&mut self.shell.program, s.program);
        set(&mut self.shell.args, s.args);

        let e = overlay.escape;
        set(&mut self.escape.bash, e.bash);
        set(&mut self.escape.encoding, e.encoding);

        let l = overlay.logging;
        set(&mut self.logging.level, l.level);
        set(&mut self.logging.history, l.history);
        set(&mut self.logging.history_path, l.history_path);
    }

    /// Apply an overlay from a TOML string.
    pub fn apply_overlay_str(&mut self, toml_str: &str) -> Result<()> {
        let overlay: ConfigOverlay =
            toml::from_str(toml_str).map_err(|e| Error::Config(e.to_string()))?;
        self.apply_overlay(overlay);
        Ok(())
    }

    /// The effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}
