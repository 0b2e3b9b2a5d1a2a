use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use holdem_score::config::Config;
use holdem_score::scoring::{
    calculate_hand, calculate_line_score, LineCounters, ScoreType, ScoringConfig,
};
use holdem_score::session::{tally, ScoreEntry, Session};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start an interactive scoring session (default if no subcommand)
    Play,
    /// Calculate a line-bonus score
    Lines {
        /// Completed lines
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        lines: String,
        /// Tetris bonuses
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        tetris: String,
        /// Column bonuses
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        column: String,
        /// Square bonuses
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        square: String,
        /// L-shape bonuses
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        l_shape: String,
        /// T-shape bonuses
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        t_shape: String,
        /// Penalties
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        penalties: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the points for one hand
    Hand {
        /// Flush, Straight or "Full House"
        score_type: String,
        /// Number of cards in the hand
        #[arg(allow_negative_numbers = true)]
        cards: i64,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Score a whole game and print the standings
    Tally {
        /// Player name, in seating order (repeatable)
        #[arg(short, long = "player")]
        players: Vec<String>,
        /// Hand event as NAME=TYPE:CARDS (repeatable, applied in order)
        #[arg(short, long = "score")]
        scores: Vec<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "holdem-score")]
#[command(about = "Score tracker for Tetris Hold'em", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/holdem-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            std::process::exit(EXIT_INPUT);
        }
    }
}

/// Load and validate the config, exiting with `EXIT_CONFIG` on any problem.
fn load_settings(path: Option<PathBuf>, verbose: bool) -> (Config, ScoringConfig, Duration) {
    let config = match holdem_score::config::load_config(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let scoring = config.effective_scoring();
    if let Err(errors) = holdem_score::scoring::validate_scoring(&scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let flash_duration = match config.flash_duration() {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if verbose {
        eprintln!(
            "Scoring: {}",
            if config.scoring.is_some() {
                "custom"
            } else {
                "standard"
            }
        );
        eprintln!("Loaded {} players from config", config.players.len());
    }

    (config, scoring, flash_duration)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Play);
    let config_path = cli.config.map(PathBuf::from);
    let use_colors = !cli.no_color && holdem_score::output::should_use_colors();

    match command {
        // Runs without loading the config so a broken file can be replaced
        Commands::Init => {
            if let Err(e) = holdem_score::config::run_init_wizard(config_path) {
                eprintln!("Init failed: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
        Commands::Play => {
            let (config, scoring, flash_duration) = load_settings(config_path, cli.verbose);
            let session = Session::with_players(&config.players);
            if cli.verbose && session.len() < config.players.len() {
                eprintln!(
                    "Skipped {} blank player names",
                    config.players.len() - session.len()
                );
            }

            let colors = holdem_score::tui::resolve_theme(config.theme);
            let app = holdem_score::tui::App::new(
                session,
                scoring,
                flash_duration,
                colors,
                cli.verbose,
            );
            if let Err(e) = holdem_score::tui::run_tui(app).await {
                eprintln!("TUI error: {:#}", e);
                std::process::exit(EXIT_INPUT);
            }
        }
        Commands::Lines {
            lines,
            tetris,
            column,
            square,
            l_shape,
            t_shape,
            penalties,
            json,
        } => {
            let (_, scoring, _) = load_settings(config_path, cli.verbose);
            let counters =
                LineCounters::from_text(&[lines, tetris, column, square, l_shape, t_shape, penalties]);
            let score = calculate_line_score(&counters, &scoring.lines);
            if json {
                print_json(&score);
            } else {
                println!(
                    "{}",
                    holdem_score::output::format_line_score(&score, cli.verbose, use_colors)
                );
            }
        }
        Commands::Hand {
            score_type,
            cards,
            json,
        } => {
            let (_, scoring, _) = load_settings(config_path, cli.verbose);
            let score_type = match ScoreType::parse(&score_type) {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };
            let result = calculate_hand(score_type, cards, &scoring.hands);
            if json {
                print_json(&result);
            } else {
                println!("{}", holdem_score::output::format_hand(&result, use_colors));
            }
        }
        Commands::Tally {
            players,
            scores,
            json,
        } => {
            let (_, scoring, _) = load_settings(config_path, cli.verbose);
            let mut entries = Vec::with_capacity(scores.len());
            for raw in &scores {
                match ScoreEntry::parse(raw) {
                    Ok(entry) => entries.push(entry),
                    Err(e) => {
                        eprintln!("{:#}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                }
            }

            let (session, skipped) = match tally(&players, &entries, &scoring.hands) {
                Ok(result) => result,
                Err(e) => {
                    eprintln!("{:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };
            if skipped > 0 {
                eprintln!("Warning: skipped {} blank player names", skipped);
            }
            if cli.verbose {
                eprintln!(
                    "Applied {} hands to {} players",
                    entries.len(),
                    session.len()
                );
            }

            if json {
                print_json(&holdem_score::output::standings_entries(&session));
            } else {
                println!(
                    "{}",
                    holdem_score::output::format_standings(&session, use_colors)
                );
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
