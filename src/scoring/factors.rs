use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Poker-style hand category recorded in card-hand mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreType {
    #[default]
    Flush,
    Straight,
    #[serde(rename = "Full House")]
    FullHouse,
}

impl ScoreType {
    pub const ALL: [ScoreType; 3] = [ScoreType::Flush, ScoreType::Straight, ScoreType::FullHouse];

    /// Parse a score type from its display name.
    ///
    /// Matching is case-insensitive and also accepts `full-house`,
    /// `full_house` and `fullhouse`.
    pub fn parse(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "flush" => Ok(ScoreType::Flush),
            "straight" => Ok(ScoreType::Straight),
            "fullhouse" => Ok(ScoreType::FullHouse),
            _ => bail!(
                "Unknown score type '{}'. Expected Flush, Straight or Full House",
                s.trim()
            ),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreType::Flush => "Flush",
            ScoreType::Straight => "Straight",
            ScoreType::FullHouse => "Full House",
        }
    }

    /// Next entry in selector order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            ScoreType::Flush => ScoreType::Straight,
            ScoreType::Straight => ScoreType::FullHouse,
            ScoreType::FullHouse => ScoreType::Flush,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            ScoreType::Flush => ScoreType::FullHouse,
            ScoreType::Straight => ScoreType::Flush,
            ScoreType::FullHouse => ScoreType::Straight,
        }
    }
}

impl fmt::Display for ScoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the seven line-bonus counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    CompletedLines,
    TetrisBonus,
    ColumnBonus,
    SquareBonus,
    LShapeBonus,
    TShapeBonus,
    Penalties,
}

impl Counter {
    /// Form order, also the order of the breakdown.
    pub const ALL: [Counter; 7] = [
        Counter::CompletedLines,
        Counter::TetrisBonus,
        Counter::ColumnBonus,
        Counter::SquareBonus,
        Counter::LShapeBonus,
        Counter::TShapeBonus,
        Counter::Penalties,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Counter::CompletedLines => "Completed Lines",
            Counter::TetrisBonus => "Tetris Bonus",
            Counter::ColumnBonus => "Column Bonus",
            Counter::SquareBonus => "Square Bonus",
            Counter::LShapeBonus => "L-Shape Bonus",
            Counter::TShapeBonus => "T-Shape Bonus",
            Counter::Penalties => "Penalties",
        }
    }

    pub fn is_penalty(&self) -> bool {
        matches!(self, Counter::Penalties)
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Read the leading integer of a text field.
///
/// Leading whitespace and an optional sign are allowed; anything after the
/// digits is ignored. Returns `None` when no digit follows. Values beyond the
/// `i64` range saturate.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(10) else { break };
        seen_digit = true;
        value = value.saturating_mul(10).saturating_add(d as i64);
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Parse a line-bonus counter. Empty and non-numeric input is 0; signed
/// values are kept as typed.
pub fn parse_count(s: &str) -> i64 {
    parse_leading_int(s).unwrap_or(0)
}

/// Parse the card-count field. Empty, non-numeric and zero input falls back
/// to `default`; every other value is kept as typed, including negatives.
pub fn parse_card_count(s: &str, default: i64) -> i64 {
    match parse_leading_int(s) {
        Some(0) | None => default,
        Some(n) => n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score_type_display_names() {
        assert_eq!(ScoreType::parse("Flush").unwrap(), ScoreType::Flush);
        assert_eq!(ScoreType::parse("Straight").unwrap(), ScoreType::Straight);
        assert_eq!(ScoreType::parse("Full House").unwrap(), ScoreType::FullHouse);
    }

    #[test]
    fn test_parse_score_type_loose_forms() {
        assert_eq!(ScoreType::parse("  flush ").unwrap(), ScoreType::Flush);
        assert_eq!(ScoreType::parse("full-house").unwrap(), ScoreType::FullHouse);
        assert_eq!(ScoreType::parse("FULL_HOUSE").unwrap(), ScoreType::FullHouse);
        assert_eq!(ScoreType::parse("fullhouse").unwrap(), ScoreType::FullHouse);
    }

    #[test]
    fn test_parse_score_type_unknown() {
        let err = ScoreType::parse("Royal Flush").unwrap_err();
        assert!(err.to_string().contains("Royal Flush"));
    }

    #[test]
    fn test_score_type_cycle() {
        let mut t = ScoreType::Flush;
        for _ in 0..3 {
            t = t.next();
        }
        assert_eq!(t, ScoreType::Flush);
        assert_eq!(ScoreType::Flush.previous(), ScoreType::FullHouse);
        assert_eq!(ScoreType::Straight.next(), ScoreType::FullHouse);
    }

    #[test]
    fn test_score_type_serde_uses_display_name() {
        let json = serde_json::to_string(&ScoreType::FullHouse).unwrap();
        assert_eq!(json, "\"Full House\"");
    }

    #[test]
    fn test_counter_index_matches_order() {
        for (i, counter) in Counter::ALL.iter().enumerate() {
            assert_eq!(counter.index(), i);
        }
        assert!(Counter::Penalties.is_penalty());
        assert!(!Counter::TetrisBonus.is_penalty());
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  7"), Some(7));
        assert_eq!(parse_leading_int("12abc"), Some(12));
        assert_eq!(parse_leading_int("3.7"), Some(3));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("+8"), Some(8));
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
    }

    #[test]
    fn test_parse_leading_int_saturates() {
        assert_eq!(parse_leading_int("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn test_parse_count_defaults_to_zero() {
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("lots"), 0);
        assert_eq!(parse_count("5"), 5);
        assert_eq!(parse_count("5 lines"), 5);
        assert_eq!(parse_count("99999999999"), 99_999_999_999);
    }

    #[test]
    fn test_parse_count_keeps_negative() {
        assert_eq!(parse_count("-4"), -4);
        assert_eq!(parse_count(" -2 penalties"), -2);
    }

    #[test]
    fn test_parse_card_count_defaults() {
        assert_eq!(parse_card_count("", 5), 5);
        assert_eq!(parse_card_count("x", 5), 5);
        assert_eq!(parse_card_count("0", 5), 5);
        assert_eq!(parse_card_count("12", 5), 12);
        assert_eq!(parse_card_count("25", 5), 25);
        assert_eq!(parse_card_count("-2", 5), -2);
    }
}
