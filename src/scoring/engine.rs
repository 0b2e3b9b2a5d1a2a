use serde::Serialize;

use super::config::{HandRules, LineWeights};
use super::factors::{parse_count, Counter, ScoreType};

/// Snapshot of the seven line-bonus counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineCounters {
    pub completed_lines: i64,
    pub tetris_bonus: i64,
    pub column_bonus: i64,
    pub square_bonus: i64,
    pub l_shape_bonus: i64,
    pub t_shape_bonus: i64,
    pub penalties: i64,
}

impl LineCounters {
    /// Build counters from raw text fields in `Counter::ALL` order.
    /// Unparseable fields count as 0. Negative values are kept, so a negative
    /// penalty count adds points.
    pub fn from_text<S: AsRef<str>>(fields: &[S; 7]) -> Self {
        let mut counters = Self::default();
        for counter in Counter::ALL {
            counters.set(counter, parse_count(fields[counter.index()].as_ref()));
        }
        counters
    }

    pub fn get(&self, counter: Counter) -> i64 {
        match counter {
            Counter::CompletedLines => self.completed_lines,
            Counter::TetrisBonus => self.tetris_bonus,
            Counter::ColumnBonus => self.column_bonus,
            Counter::SquareBonus => self.square_bonus,
            Counter::LShapeBonus => self.l_shape_bonus,
            Counter::TShapeBonus => self.t_shape_bonus,
            Counter::Penalties => self.penalties,
        }
    }

    pub fn set(&mut self, counter: Counter, value: i64) {
        let slot = match counter {
            Counter::CompletedLines => &mut self.completed_lines,
            Counter::TetrisBonus => &mut self.tetris_bonus,
            Counter::ColumnBonus => &mut self.column_bonus,
            Counter::SquareBonus => &mut self.square_bonus,
            Counter::LShapeBonus => &mut self.l_shape_bonus,
            Counter::TShapeBonus => &mut self.t_shape_bonus,
            Counter::Penalties => &mut self.penalties,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FactorContribution {
    pub label: String, // e.g. "Tetris Bonus"
    pub count: i64,
    pub weight: i64,
    pub points: i64, // signed: penalties are negative
}

#[derive(Debug, Clone, Serialize)]
pub struct LineBreakdown {
    pub base: i64,
    pub bonus: i64,
    pub penalty: i64,
    pub factors: Vec<FactorContribution>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineScore {
    pub total: i64,
    pub breakdown: LineBreakdown,
}

/// Line-bonus total: `base + bonus - penalty`. Not floored, may be negative.
pub fn calculate_line_score(counters: &LineCounters, weights: &LineWeights) -> LineScore {
    let mut base = 0i64;
    let mut bonus = 0i64;
    let mut penalty = 0i64;
    let mut factors = Vec::with_capacity(Counter::ALL.len());

    for counter in Counter::ALL {
        let count = counters.get(counter);
        let weight = weights.weight(counter);
        let points = count.saturating_mul(weight);

        match counter {
            Counter::CompletedLines => base = base.saturating_add(points),
            Counter::Penalties => penalty = penalty.saturating_add(points),
            _ => bonus = bonus.saturating_add(points),
        }

        factors.push(FactorContribution {
            label: counter.label().to_string(),
            count,
            weight,
            points: if counter.is_penalty() {
                points.saturating_neg()
            } else {
                points
            },
        });
    }

    LineScore {
        total: base.saturating_add(bonus).saturating_sub(penalty),
        breakdown: LineBreakdown {
            base,
            bonus,
            penalty,
            factors,
        },
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HandResult {
    pub score_type: ScoreType,
    pub card_count: i64,
    pub delta: i64,
    pub formula: String, // e.g. "(10 - 3) x 15"
}

/// Card-hand delta. `card_count` is used as given, with no clamping.
pub fn hand_delta(score_type: ScoreType, card_count: i64, rules: &HandRules) -> i64 {
    rules.formula(score_type).delta(card_count)
}

pub fn calculate_hand(score_type: ScoreType, card_count: i64, rules: &HandRules) -> HandResult {
    let formula = rules.formula(score_type);
    HandResult {
        score_type,
        card_count,
        delta: formula.delta(card_count),
        formula: format!("({} - {}) x {}", card_count, formula.offset, formula.points),
    }
}
