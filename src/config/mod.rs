mod schema;
pub mod init;

pub use init::run_init_wizard;
pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/holdem-score/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("holdem-score"))
}

/// Get the default config file path (~/.config/holdem-score/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// With an explicit `path` the file must exist. Without one, the default
/// path is tried and built-in defaults are used when it is absent.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            read_config(&path)
        }
        None => {
            let default_path = get_config_path()?;
            if default_path.exists() {
                read_config(&default_path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let path = env::temp_dir().join("holdem_score_test_missing.yaml");
        let _ = fs::remove_file(&path);

        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_explicit_file() {
        let path = env::temp_dir().join("holdem_score_test_load.yaml");
        fs::write(&path, "players: [Ann, Ben]\n").unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.players, vec!["Ann", "Ben"]);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_yaml_reports_path() {
        let path = env::temp_dir().join("holdem_score_test_invalid.yaml");
        fs::write(&path, "players: [unclosed\n").unwrap();

        let err = load_config(Some(path.clone())).unwrap_err();
        assert!(format!("{:#}", err).contains("holdem_score_test_invalid.yaml"));

        let _ = fs::remove_file(&path);
    }
}
