//! Configuration management for the gesture media control application
//!
//! Only the application shell is configurable. Gesture thresholds and
//! cooldowns are fixed in [`crate::constants`].

use crate::{
    action_sink::{create_sink, ActionSink},
    pose_source::{JsonLinesSource, PoseSource, SubprocessSource},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where hand poses come from
    pub source: SourceConfig,

    /// Where actions go
    pub sink: SinkConfig,

    /// Status overlay configuration
    pub overlay: OverlayConfig,
}

/// Pose source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Source type: "stdin", "file" or "command"
    pub kind: String,

    /// Recording path for the "file" source
    pub path: Option<PathBuf>,

    /// Estimator program for the "command" source
    pub command: Option<String>,

    /// Arguments passed to the estimator program
    pub args: Vec<String>,

    /// Stop after this many frames
    pub max_frames: Option<u64>,
}

/// Action sink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    /// Sink type: "x11", "log" or "record"
    pub kind: String,
}

/// Overlay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Log a status line for every frame with a hand
    pub enabled: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: "stdin".to_string(),
            path: None,
            command: None,
            args: Vec::new(),
            max_frames: None,
        }
    }
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self { kind: "x11".to_string() }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read and `Error::ConfigError`
    /// if it is not valid YAML for this structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` on invalid YAML.
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if serialization fails or `Error::Io` if
    /// the file cannot be written.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_yaml()?)?;

        Ok(())
    }

    /// Serialize configuration to YAML text
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))
    }

    /// Create the configured pose source
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` for an unknown or incomplete source, or
    /// the error raised while opening it.
    pub fn create_source(&self) -> Result<Box<dyn PoseSource>> {
        match self.source.kind.as_str() {
            "stdin" => Ok(Box::new(JsonLinesSource::stdin())),
            "file" => {
                let path = self
                    .source
                    .path
                    .as_ref()
                    .ok_or_else(|| Error::ConfigError("File source requires a path".to_string()))?;
                Ok(Box::new(JsonLinesSource::open(path)?))
            }
            "command" => {
                let program = self
                    .source
                    .command
                    .as_deref()
                    .ok_or_else(|| Error::ConfigError("Command source requires a command".to_string()))?;
                Ok(Box::new(SubprocessSource::spawn(program, &self.source.args)?))
            }
            kind => Err(Error::ConfigError(format!("Unknown source kind: {kind}"))),
        }
    }

    /// Create the configured action sink
    ///
    /// # Errors
    ///
    /// Returns the error raised by [`create_sink`].
    pub fn create_sink(&self) -> Result<Box<dyn ActionSink>> {
        create_sink(&self.sink.kind)
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        match self.source.kind.as_str() {
            "stdin" => {}
            "file" => match &self.source.path {
                None => return Err(Error::ConfigError("File source requires a path".to_string())),
                Some(path) if !path.exists() => {
                    return Err(Error::ConfigError(format!(
                        "Pose recording not found: {}",
                        path.display()
                    )));
                }
                Some(_) => {}
            },
            "command" => {
                if self.source.command.as_deref().map_or(true, |c| c.trim().is_empty()) {
                    return Err(Error::ConfigError("Command source requires a command".to_string()));
                }
            }
            kind => return Err(Error::ConfigError(format!("Unknown source kind: {kind}"))),
        }

        if self.source.max_frames == Some(0) {
            return Err(Error::ConfigError("Frame limit must be greater than 0".to_string()));
        }

        if !matches!(self.sink.kind.to_lowercase().as_str(), "x11" | "xtest" | "log" | "dry-run" | "none" | "record") {
            return Err(Error::ConfigError(format!("Unknown sink kind: {}", self.sink.kind)));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Gesture Media Control Configuration

# Hand pose source: stdin, file or command
source:
  kind: "command"
  command: "python3"
  args: ["hand_landmarks.py", "--camera", "0"]

# Action sink: x11 (media key injection) or log (dry run)
sink:
  kind: "x11"

# Per-frame status line at debug log level
overlay:
  enabled: true
"#;
