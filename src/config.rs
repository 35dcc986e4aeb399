//! @ai:module:intent Configuration structs for the statistics CLI
//! @ai:module:layer infrastructure
//! @ai:module:public_api Config, StatsConfig, OutputConfig
//! @ai:module:stateless true

use crate::attempt::OK_CODE;
use crate::output::OutputFormat;
use crate::window::STANDARD_WINDOWS;
use serde::{Deserialize, Serialize};

/// @ai:intent Main configuration, loaded from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// @ai:intent Which statistics are computed and which records count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(default = "default_windows")]
    pub windows: Vec<usize>,
    #[serde(default = "default_ok_code")]
    pub ok_code: i64,
}

/// @ai:intent Presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            windows: default_windows(),
            ok_code: default_ok_code(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: default_color(),
        }
    }
}

fn default_windows() -> Vec<usize> {
    STANDARD_WINDOWS.to_vec()
}

fn default_ok_code() -> i64 {
    OK_CODE
}

fn default_color() -> bool {
    true
}

impl Config {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.stats.sanitize();
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl StatsConfig {
    /// Zero-width windows are meaningless; duplicates would print twice.
    fn sanitize(&mut self) {
        let before = self.windows.len();
        let mut seen = Vec::with_capacity(before);
        self.windows.retain(|&n| {
            let keep = n > 0 && !seen.contains(&n);
            seen.push(n);
            keep
        });

        if self.windows.len() != before {
            tracing::warn!(
                "Ignored {} invalid or duplicate window sizes",
                before - self.windows.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.stats.windows, vec![3, 5, 12, 50, 100]);
        assert_eq!(config.stats.ok_code, 0);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.color);
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cubestats.toml");

        let mut config = Config::default();
        config.stats.windows = vec![5, 12];
        config.output.format = OutputFormat::JsonPretty;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cubestats.toml");
        std::fs::write(&path, "[output]\nformat = \"json\"\n").unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.output.format, OutputFormat::Json);
        assert!(loaded.output.color);
        assert_eq!(loaded.stats, StatsConfig::default());
    }

    #[test]
    fn test_invalid_windows_are_dropped() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cubestats.toml");
        std::fs::write(&path, "[stats]\nwindows = [0, 5, 5, 12]\n").unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.stats.windows, vec![5, 12]);
    }
}
