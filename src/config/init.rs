use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{get_config_path, Config};
use crate::scoring::{validate_scoring, Counter, HandFormula, LineWeights, ScoringConfig};
use crate::tui::Theme;

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Keep asking until the answer parses as an integer.
fn prompt_integer(message: &str, default: i64) -> Result<i64> {
    loop {
        let input = prompt_with_default(message, &default.to_string())?;
        match input.parse::<i64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("  Invalid: must be a whole number. Try again."),
        }
    }
}

fn prompt_hand_formula(label: &str, default: HandFormula) -> Result<HandFormula> {
    let offset = prompt_integer(&format!("{} offset", label), default.offset)?;
    let points = prompt_integer(&format!("{} points per card", label), default.points)?;
    Ok(HandFormula { offset, points })
}

fn prompt_scoring() -> Result<ScoringConfig> {
    let defaults = ScoringConfig::default();

    println!();
    println!("Line-bonus weights (points per unit; penalties are subtracted).");
    let mut lines = LineWeights::default();
    for counter in Counter::ALL {
        let value = prompt_integer(counter.label(), defaults.lines.weight(counter))?;
        match counter {
            Counter::CompletedLines => lines.completed_lines = value,
            Counter::TetrisBonus => lines.tetris_bonus = value,
            Counter::ColumnBonus => lines.column_bonus = value,
            Counter::SquareBonus => lines.square_bonus = value,
            Counter::LShapeBonus => lines.l_shape_bonus = value,
            Counter::TShapeBonus => lines.t_shape_bonus = value,
            Counter::Penalties => lines.penalty = value,
        }
    }

    println!();
    println!("Hand scoring: delta = (cards - offset) x points.");
    let mut hands = defaults.hands.clone();
    hands.flush = prompt_hand_formula("Flush", defaults.hands.flush)?;
    hands.straight = prompt_hand_formula("Straight", defaults.hands.straight)?;
    hands.full_house = prompt_hand_formula("Full House", defaults.hands.full_house)?;

    Ok(ScoringConfig { lines, hands })
}

/// Serialize `config` as YAML and write it atomically, creating parent
/// directories as needed.
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit().context("Failed to save config")?;

    Ok(())
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the suggested config file path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("Tetris Hold'em Scorer Configuration");
    println!("===================================");

    // 1. Scoring
    println!();
    let scoring = if prompt_yes_no("Customize scoring? (n keeps the standard table)", false)? {
        loop {
            let candidate = prompt_scoring()?;
            match validate_scoring(&candidate) {
                Ok(()) => break Some(candidate),
                Err(errors) => {
                    println!("  Scoring is invalid:");
                    for error in errors {
                        println!("    - {}", error);
                    }
                    println!("  Let's try again.");
                }
            }
        }
    } else {
        None
    };

    // 2. Roster
    println!();
    println!("Players listed here are seated automatically when a game starts.");
    let mut players = Vec::new();
    loop {
        let name = prompt("Player name (empty to finish): ")?;
        if name.is_empty() {
            break;
        }
        players.push(name);
    }

    // 3. Display
    println!();
    let flash_duration = loop {
        let input = prompt_with_default("Status message duration", "3s")?;
        match humantime::parse_duration(&input) {
            Ok(_) => break input,
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };
    let theme = loop {
        let input = prompt_with_default("Theme (auto, dark, light)", "auto")?;
        match input.to_lowercase().as_str() {
            "auto" => break Theme::Auto,
            "dark" => break Theme::Dark,
            "light" => break Theme::Light,
            _ => println!("  Invalid: choose auto, dark or light."),
        }
    };

    // 4. Config path
    let default_config_path = match default_path {
        Some(path) => path,
        None => get_config_path()?,
    };
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 5. Write config
    let config = Config {
        scoring,
        players,
        flash_duration,
        theme,
    };
    write_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `holdem-score` to start a game.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_write_config_roundtrip() {
        let dir = env::temp_dir().join("holdem_score_test_init");
        let path = dir.join("config.yaml");
        let _ = std::fs::remove_file(&path);

        let config = Config {
            scoring: Some(ScoringConfig::default()),
            players: vec!["Ann".to_string(), "Ben".to_string()],
            flash_duration: "2s".to_string(),
            theme: Theme::Dark,
        };
        write_config(&path, &config).unwrap();

        let loaded = crate::config::load_config(Some(path.clone())).unwrap();
        assert_eq!(loaded, config);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
