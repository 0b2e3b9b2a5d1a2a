use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::scoring::{HandResult, LineScore};
use crate::session::Session;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a total with thousands separators: "1,234", "-50".
pub fn format_points(points: i64) -> String {
    let digits = points.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if points < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Format a delta with an explicit sign: "+105", "-20", "0".
pub fn format_delta(delta: i64) -> String {
    if delta > 0 {
        format!("+{}", format_points(delta))
    } else {
        format_points(delta)
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
pub fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format the line-bonus result. With `detailed`, one line per counter
/// followed by the subtotals.
pub fn format_line_score(score: &LineScore, detailed: bool, use_colors: bool) -> String {
    let total = format_points(score.total);
    let total_line = if use_colors {
        format!("Score: {}", total.bold())
    } else {
        format!("Score: {}", total)
    };

    if !detailed {
        return total_line;
    }

    let label_width = score
        .breakdown
        .factors
        .iter()
        .map(|f| f.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<String> = score
        .breakdown
        .factors
        .iter()
        .map(|f| {
            let points = format!("{:>8}", format_delta(f.points));
            let points = if !use_colors || f.points == 0 {
                points
            } else if f.points < 0 {
                points.red().to_string()
            } else {
                points.green().to_string()
            };
            format!(
                "  {:<width$}  {:>4} x {:<4} {}",
                f.label,
                f.count,
                f.weight,
                points,
                width = label_width
            )
        })
        .collect();

    lines.push(format!(
        "  Base {}  Bonus {}  Penalty {}",
        format_points(score.breakdown.base),
        format_points(score.breakdown.bonus),
        format_points(score.breakdown.penalty)
    ));
    lines.push(total_line);
    lines.join("\n")
}

/// Format a single hand result: "Straight, 10 cards: +105  (10 - 3) x 15"
pub fn format_hand(result: &HandResult, use_colors: bool) -> String {
    let delta = format_delta(result.delta);
    if use_colors {
        format!(
            "{}, {} cards: {}  {}",
            result.score_type.cyan(),
            result.card_count,
            delta.bold(),
            result.formula.dimmed()
        )
    } else {
        format!(
            "{}, {} cards: {}  {}",
            result.score_type, result.card_count, delta, result.formula
        )
    }
}

/// One row of the standings for JSON output
#[derive(Debug, Serialize)]
pub struct StandingsEntry<'a> {
    pub rank: usize,
    pub seat: usize,
    pub name: &'a str,
    pub total_score: i64,
}

pub fn standings_entries(session: &Session) -> Vec<StandingsEntry<'_>> {
    session
        .standings()
        .into_iter()
        .enumerate()
        .map(|(rank, (seat, player))| StandingsEntry {
            rank: rank + 1,
            seat: seat + 1,
            name: &player.name,
            total_score: player.total_score,
        })
        .collect()
}

/// Format standings as a table: rank, name, total.
/// Totals are right-aligned; names are truncated only on a terminal.
pub fn format_standings(session: &Session, use_colors: bool) -> String {
    if session.is_empty() {
        return "No players.".to_string();
    }

    let entries = standings_entries(session);
    let score_width = entries
        .iter()
        .map(|e| format_points(e.total_score).len())
        .max()
        .unwrap_or(1);
    let name_width = entries
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(0);

    // Index column "99." + space, two-space separator before the score
    let fixed_width = 4 + 2 + score_width;
    let name_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => name_width.min(width - fixed_width),
        Some(_) => name_width.min(20),
        None => name_width,
    };

    entries
        .iter()
        .map(|entry| {
            let index_str = format!("{:>2}.", entry.rank);
            let name = truncate_name(entry.name, name_width);
            let score = format!("{:>width$}", format_points(entry.total_score), width = score_width);
            if use_colors {
                format!(
                    "{} {:<nw$}  {}",
                    index_str.dimmed(),
                    name,
                    score.bold(),
                    nw = name_width
                )
            } else {
                format!("{} {:<nw$}  {}", index_str, name, score, nw = name_width)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{
        calculate_hand, calculate_line_score, HandRules, LineCounters, LineWeights, ScoreType,
    };

    #[test]
    fn test_format_points_small() {
        assert_eq!(format_points(0), "0");
        assert_eq!(format_points(999), "999");
    }

    #[test]
    fn test_format_points_grouping() {
        assert_eq!(format_points(1_000), "1,000");
        assert_eq!(format_points(1_234_567), "1,234,567");
        assert_eq!(format_points(-12_500), "-12,500");
    }

    #[test]
    fn test_format_points_extremes() {
        assert_eq!(format_points(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn test_format_delta() {
        assert_eq!(format_delta(105), "+105");
        assert_eq!(format_delta(-20), "-20");
        assert_eq!(format_delta(0), "0");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Alice", 10), "Alice");
        assert_eq!(truncate_name("Bartholomew", 8), "Barth...");
        assert_eq!(truncate_name("Bob", 2), "Bo");
    }

    #[test]
    fn test_format_line_score_plain() {
        let counters = LineCounters {
            completed_lines: 12,
            ..LineCounters::default()
        };
        let score = calculate_line_score(&counters, &LineWeights::default());
        assert_eq!(format_line_score(&score, false, false), "Score: 1,200");
    }

    #[test]
    fn test_format_line_score_detailed() {
        let counters = LineCounters {
            completed_lines: 2,
            penalties: 1,
            ..LineCounters::default()
        };
        let score = calculate_line_score(&counters, &LineWeights::default());
        let output = format_line_score(&score, true, false);
        assert!(output.contains("Completed Lines"));
        assert!(output.contains("+200"));
        assert!(output.contains("-50"));
        assert!(output.contains("Base 200  Bonus 0  Penalty 50"));
        assert!(output.ends_with("Score: 150"));
    }

    #[test]
    fn test_format_hand() {
        let result = calculate_hand(ScoreType::FullHouse, 19, &HandRules::default());
        assert_eq!(
            format_hand(&result, false),
            "Full House, 19 cards: +240  (19 - 3) x 15"
        );
    }

    #[test]
    fn test_format_standings_empty() {
        assert_eq!(format_standings(&Session::new(), false), "No players.");
    }

    #[test]
    fn test_format_standings_order() {
        let mut session = Session::with_players(["Ann", "Ben"]);
        session.apply_delta(1, 1_500).unwrap();
        session.apply_delta(0, 90).unwrap();
        let output = format_standings(&session, false);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1. Ben"));
        assert!(lines[0].ends_with("1,500"));
        assert!(lines[1].starts_with(" 2. Ann"));
        assert!(lines[1].ends_with("90"));
    }

    #[test]
    fn test_standings_entries_json() {
        let mut session = Session::with_players(["Ann", "Ben"]);
        session.apply_delta(1, 10).unwrap();
        let json = serde_json::to_value(standings_entries(&session)).unwrap();
        assert_eq!(json[0]["name"], "Ben");
        assert_eq!(json[0]["seat"], 2);
        assert_eq!(json[1]["rank"], 2);
        assert_eq!(json[1]["total_score"], 0);
    }
}
