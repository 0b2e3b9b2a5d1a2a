use serde::{Deserialize, Serialize};

use super::factors::{Counter, ScoreType};

/// Main scoring configuration.
///
/// The formula shapes are fixed; only the constants are configurable.
/// `ScoringConfig::default()` is the standard Tetris Hold'em table.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   lines:
///     tetris_bonus: 400
///     penalty: 75
///   hands:
///     flush: { offset: 4, points: 10 }
///     card_count: { min: 5, max: 19, default: 5 }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Per-unit weights for line-bonus mode
    #[serde(default)]
    pub lines: LineWeights,

    /// Formula constants for card-hand mode
    #[serde(default)]
    pub hands: HandRules,
}

/// Points per unit of each line-bonus counter.
///
/// `penalty` is stored positive and subtracted.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LineWeights {
    pub completed_lines: i64,
    pub tetris_bonus: i64,
    pub column_bonus: i64,
    pub square_bonus: i64,
    pub l_shape_bonus: i64,
    pub t_shape_bonus: i64,
    pub penalty: i64,
}

impl Default for LineWeights {
    fn default() -> Self {
        Self {
            completed_lines: 100,
            tetris_bonus: 300,
            column_bonus: 200,
            square_bonus: 150,
            l_shape_bonus: 100,
            t_shape_bonus: 100,
            penalty: 50,
        }
    }
}

impl LineWeights {
    pub fn weight(&self, counter: Counter) -> i64 {
        match counter {
            Counter::CompletedLines => self.completed_lines,
            Counter::TetrisBonus => self.tetris_bonus,
            Counter::ColumnBonus => self.column_bonus,
            Counter::SquareBonus => self.square_bonus,
            Counter::LShapeBonus => self.l_shape_bonus,
            Counter::TShapeBonus => self.t_shape_bonus,
            Counter::Penalties => self.penalty,
        }
    }

    /// Config key for a counter, used in validation messages.
    pub fn key(counter: Counter) -> &'static str {
        match counter {
            Counter::CompletedLines => "completed_lines",
            Counter::TetrisBonus => "tetris_bonus",
            Counter::ColumnBonus => "column_bonus",
            Counter::SquareBonus => "square_bonus",
            Counter::LShapeBonus => "l_shape_bonus",
            Counter::TShapeBonus => "t_shape_bonus",
            Counter::Penalties => "penalty",
        }
    }
}

/// `delta = (card_count - offset) * points`
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HandFormula {
    pub offset: i64,
    pub points: i64,
}

impl HandFormula {
    pub fn delta(&self, card_count: i64) -> i64 {
        card_count.saturating_sub(self.offset).saturating_mul(self.points)
    }
}

/// Range hint for the card-count entry widget. Never applied by the formula.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CardCountRange {
    pub min: i64,
    pub max: i64,
    pub default: i64,
}

impl Default for CardCountRange {
    fn default() -> Self {
        Self {
            min: 5,
            max: 19,
            default: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HandRules {
    pub flush: HandFormula,
    pub straight: HandFormula,
    pub full_house: HandFormula,
    pub card_count: CardCountRange,
}

impl Default for HandRules {
    fn default() -> Self {
        Self {
            flush: HandFormula {
                offset: 4,
                points: 10,
            },
            straight: HandFormula {
                offset: 3,
                points: 15,
            },
            full_house: HandFormula {
                offset: 3,
                points: 15,
            },
            card_count: CardCountRange::default(),
        }
    }
}

impl HandRules {
    pub fn formula(&self, score_type: ScoreType) -> &HandFormula {
        match score_type {
            ScoreType::Flush => &self.flush,
            ScoreType::Straight => &self.straight,
            ScoreType::FullHouse => &self.full_house,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_line_weights() {
        let weights = LineWeights::default();
        assert_eq!(weights.weight(Counter::CompletedLines), 100);
        assert_eq!(weights.weight(Counter::TetrisBonus), 300);
        assert_eq!(weights.weight(Counter::ColumnBonus), 200);
        assert_eq!(weights.weight(Counter::SquareBonus), 150);
        assert_eq!(weights.weight(Counter::LShapeBonus), 100);
        assert_eq!(weights.weight(Counter::TShapeBonus), 100);
        assert_eq!(weights.weight(Counter::Penalties), 50);
    }

    #[test]
    fn test_default_hand_rules() {
        let rules = HandRules::default();
        assert_eq!(rules.formula(ScoreType::Flush).delta(5), 10);
        assert_eq!(rules.formula(ScoreType::Straight).delta(10), 105);
        assert_eq!(rules.formula(ScoreType::FullHouse).delta(19), 240);
        assert_eq!(rules.card_count, CardCountRange::default());
    }

    #[test]
    fn test_hand_formula_saturates() {
        let formula = HandFormula {
            offset: 3,
            points: 15,
        };
        assert_eq!(formula.delta(i64::MAX), i64::MAX);
        assert_eq!(formula.delta(i64::MIN), i64::MIN);
    }

    #[test]
    fn test_scoring_config_serde_roundtrip() {
        let config = ScoringConfig::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: ScoringConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_line_weights_parse() {
        let yaml = r#"
lines:
  tetris_bonus: 400
  penalty: 75
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.lines.tetris_bonus, 400);
        assert_eq!(config.lines.penalty, 75);
        assert_eq!(config.lines.completed_lines, 100);
        assert_eq!(config.hands, HandRules::default());
    }

    #[test]
    fn test_partial_hand_rules_parse() {
        let yaml = r#"
hands:
  flush:
    offset: 4
    points: 20
  card_count:
    max: 25
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.hands.flush.points, 20);
        assert_eq!(config.hands.straight, HandRules::default().straight);
        assert_eq!(config.hands.card_count.min, 5);
        assert_eq!(config.hands.card_count.max, 25);
    }

    #[test]
    fn test_empty_scoring_config_parse() {
        let config: ScoringConfig = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, ScoringConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
lines:
  tetris: 400
"#;
        let result: Result<ScoringConfig, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_hand_formula_requires_both_fields() {
        let yaml = r#"
hands:
  straight:
    points: 20
"#;
        let result: Result<ScoringConfig, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }
}
