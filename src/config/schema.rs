use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::scoring::ScoringConfig;
use crate::tui::Theme;

fn default_flash_duration() -> String {
    "3s".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Scoring constants; `None` means the standard table
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    /// Players seated when an interactive session starts
    #[serde(default)]
    pub players: Vec<String>,

    /// How long status messages stay visible, e.g. "3s" or "1500ms"
    #[serde(default = "default_flash_duration")]
    pub flash_duration: String,

    #[serde(default)]
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: None,
            players: Vec::new(),
            flash_duration: default_flash_duration(),
            theme: Theme::default(),
        }
    }
}

impl Config {
    pub fn effective_scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }

    pub fn flash_duration(&self) -> Result<Duration> {
        humantime::parse_duration(self.flash_duration.trim())
            .with_context(|| format!("flash_duration: invalid duration '{}'", self.flash_duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.flash_duration().unwrap(), Duration::from_secs(3));
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
players:
  - Alice
  - Bob
flash_duration: 1500ms
theme: light
scoring:
  lines:
    penalty: 25
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.players, vec!["Alice", "Bob"]);
        assert_eq!(config.flash_duration().unwrap(), Duration::from_millis(1500));
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.effective_scoring().lines.penalty, 25);
    }

    #[test]
    fn test_missing_scoring_uses_defaults() {
        let config = Config::default();
        assert_eq!(config.effective_scoring(), ScoringConfig::default());
    }

    #[test]
    fn test_invalid_flash_duration() {
        let config = Config {
            flash_duration: "soon".to_string(),
            ..Config::default()
        };
        let err = config.flash_duration().unwrap_err();
        assert!(err.to_string().contains("flash_duration"));
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("queries: []");
        assert!(result.is_err());
    }
}
