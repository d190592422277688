//! Autoplay configuration loaded from TOML.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use hitcircle_core::SessionConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "hitcircle.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub session: SessionConfig,
    /// Simulation step in ms
    pub tick_ms: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            tick_ms: 1000.0 / 60.0,
            viewport_width: 1024.0,
            viewport_height: 768.0,
        }
    }
}

impl CliConfig {
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, else from `hitcircle.toml` if present, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::load_file(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Self::default()),
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.session.validate()?;
        if !(self.tick_ms.is_finite() && self.tick_ms > 0.0) {
            bail!("tick_ms must be positive, got {}", self.tick_ms);
        }
        if !(self.viewport_width > 0.0 && self.viewport_height > 0.0) {
            bail!(
                "viewport must have a positive size, got {}x{}",
                self.viewport_width,
                self.viewport_height
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_empty_uses_defaults() {
        let config = CliConfig::parse("").unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_parse_partial() {
        let config = CliConfig::parse(
            r#"
tick_ms = 5.0

[session]
hit_window_ms = 100.0
"#,
        )
        .unwrap();
        assert_eq!(config.tick_ms, 5.0);
        assert_eq!(config.session.hit_window_ms, 100.0);
        assert_eq!(config.session.miss_threshold_ms, 200.0);
        assert_eq!(config.viewport_width, 1024.0);
    }

    #[test]
    fn test_parse_rejects_invalid_values() {
        assert!(CliConfig::parse("tick_ms = 0.0").is_err());
        assert!(CliConfig::parse("[session]\nhit_window_ms = -1.0").is_err());
        assert!(CliConfig::parse("viewport_height = 0.0").is_err());
        assert!(CliConfig::parse("tick_ms = \"fast\"").is_err());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "viewport_width = 1920.0\nviewport_height = 1080.0").unwrap();

        let config = CliConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.viewport_width, 1920.0);
        assert_eq!(config.viewport_height, 1080.0);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(CliConfig::load(Some(&missing)).is_err());
    }
}
