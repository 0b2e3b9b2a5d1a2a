use super::config::{LineWeights, ScoringConfig};
use super::factors::{Counter, ScoreType};

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for counter in Counter::ALL {
        let weight = config.lines.weight(counter);
        if weight < 0 {
            errors.push(format!(
                "scoring.lines.{}: must be non-negative (got {})",
                LineWeights::key(counter),
                weight
            ));
        }
    }

    for score_type in ScoreType::ALL {
        let formula = config.hands.formula(score_type);
        if formula.points <= 0 {
            errors.push(format!(
                "scoring.hands.{}.points: must be positive (got {})",
                hand_key(score_type),
                formula.points
            ));
        }
    }

    let range = &config.hands.card_count;
    if range.min > range.max {
        errors.push(format!(
            "scoring.hands.card_count: min {} is greater than max {}",
            range.min, range.max
        ));
    } else if range.default < range.min || range.default > range.max {
        errors.push(format!(
            "scoring.hands.card_count.default: {} is outside {}-{}",
            range.default, range.min, range.max
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn hand_key(score_type: ScoreType) -> &'static str {
    match score_type {
        ScoreType::Flush => "flush",
        ScoreType::Straight => "straight",
        ScoreType::FullHouse => "full_house",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{CardCountRange, HandFormula, HandRules};

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_negative_weight() {
        let config = ScoringConfig {
            lines: LineWeights {
                square_bonus: -1,
                ..LineWeights::default()
            },
            hands: HandRules::default(),
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.lines.square_bonus"));
    }

    #[test]
    fn test_zero_weight_allowed() {
        let config = ScoringConfig {
            lines: LineWeights {
                penalty: 0,
                ..LineWeights::default()
            },
            hands: HandRules::default(),
        };
        assert!(validate_scoring(&config).is_ok());
    }

    #[test]
    fn test_non_positive_hand_points() {
        let config = ScoringConfig {
            lines: LineWeights::default(),
            hands: HandRules {
                full_house: HandFormula {
                    offset: 3,
                    points: 0,
                },
                ..HandRules::default()
            },
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.hands.full_house.points"));
    }

    #[test]
    fn test_inverted_card_range() {
        let config = ScoringConfig {
            lines: LineWeights::default(),
            hands: HandRules {
                card_count: CardCountRange {
                    min: 19,
                    max: 5,
                    default: 5,
                },
                ..HandRules::default()
            },
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("min 19 is greater than max 5"));
    }

    #[test]
    fn test_default_outside_range() {
        let config = ScoringConfig {
            lines: LineWeights::default(),
            hands: HandRules {
                card_count: CardCountRange {
                    min: 5,
                    max: 19,
                    default: 20,
                },
                ..HandRules::default()
            },
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("card_count.default"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = ScoringConfig {
            lines: LineWeights {
                completed_lines: -100, // Error 1
                penalty: -50,          // Error 2
                ..LineWeights::default()
            },
            hands: HandRules {
                flush: HandFormula {
                    offset: 4,
                    points: -10, // Error 3
                },
                ..HandRules::default()
            },
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
