use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ketodot_core::Palette;
use serde::Deserialize;

use crate::cli::Cli;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub palette: PaletteConfig,
    pub render: RenderConfig,
    pub watch: WatchConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Dot,
    Png,
    Svg,
    Jpg,
}

impl OutputFormat {
    pub fn is_image(self) -> bool {
        self != Self::Dot
    }

    /// Value passed to Graphviz as `-T<format>`.
    pub fn graphviz_name(self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Jpg => "jpg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.graphviz_name())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Replaces the built-in palette when set.
    pub colors: Option<Vec<String>>,
}

impl PaletteConfig {
    /// A fresh palette for one run.
    pub fn to_palette(&self) -> Palette {
        match &self.colors {
            Some(colors) => Palette::new(colors.iter().cloned()),
            None => Palette::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub dot_binary: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub debounce_ms: u64,
}

impl WatchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dot_binary: "dot".to_string(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 200 }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Layers the config file, `KETODOT_*` environment variables and command
    /// line flags, in that order, then validates the result.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(cli.config.as_deref())?;

        config.apply_env_overrides();
        config.apply_cli_overrides(cli);
        config.validate()?;

        Ok(config)
    }

    fn from_file(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = config_path else {
            return Ok(Self::default());
        };
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFile(path.display().to_string(), e.to_string()))?;
        toml::from_str::<AppConfig>(&contents).map_err(|e| ConfigError::ParseToml(e.to_string()))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("KETODOT_OUTPUT_FORMAT") {
            match v.as_str() {
                "dot" => self.output.format = OutputFormat::Dot,
                "png" => self.output.format = OutputFormat::Png,
                "svg" => self.output.format = OutputFormat::Svg,
                "jpg" => self.output.format = OutputFormat::Jpg,
                _ => {}
            }
        }
        if let Ok(v) = std::env::var("KETODOT_OUTPUT_PATH") {
            self.output.path = Some(PathBuf::from(v));
        }
        if let Ok(v) = std::env::var("KETODOT_DOT_BINARY") {
            self.render.dot_binary = v;
        }
        if let Ok(v) = std::env::var("KETODOT_WATCH_DEBOUNCE_MS")
            && let Ok(ms) = v.parse()
        {
            self.watch.debounce_ms = ms;
        }
        if let Ok(v) = std::env::var("KETODOT_LOG_LEVEL") {
            self.log.level = v;
        }
        if let Ok(v) = std::env::var("KETODOT_LOG_FORMAT") {
            match v.as_str() {
                "json" => self.log.format = LogFormat::Json,
                "pretty" => self.log.format = LogFormat::Pretty,
                _ => {}
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(format) = cli.format {
            self.output.format = format;
        }
        if let Some(ref path) = cli.output {
            self.output.path = Some(path.clone());
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref colors) = self.palette.colors {
            if colors.is_empty() {
                return Err(ConfigError::Validation(
                    "palette.colors must not be empty".to_string(),
                ));
            }
            let mut seen = HashSet::new();
            if let Some(duplicate) = colors.iter().find(|c| !seen.insert(c.as_str())) {
                return Err(ConfigError::Validation(format!(
                    "palette.colors contains '{duplicate}' more than once"
                )));
            }
        }
        if self.output.format.is_image() && self.output.path.is_none() {
            return Err(ConfigError::Validation(format!(
                "cannot write a {} image to stdout; provide an output file",
                self.output.format
            )));
        }
        if self.render.dot_binary.trim().is_empty() {
            return Err(ConfigError::Validation(
                "render.dot_binary must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{0}': {1}")]
    ReadFile(String, String),

    #[error("failed to parse TOML config: {0}")]
    ParseToml(String),

    #[error("config validation failed: {0}")]
    Validation(String),
}
