use crate::scoring::{calculate_line_score, Counter, LineCounters, LineScore, LineWeights};

/// Line-bonus form: seven raw text fields and the last calculated total.
///
/// Editing a field never changes the displayed total; only
/// [`LineForm::calculate`] does.
#[derive(Debug, Clone)]
pub struct LineForm {
    fields: [String; 7],
    total: Option<i64>,
}

impl Default for LineForm {
    fn default() -> Self {
        Self {
            fields: std::array::from_fn(|_| "0".to_string()),
            total: None,
        }
    }
}

impl LineForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, counter: Counter) -> &str {
        &self.fields[counter.index()]
    }

    pub fn set_field(&mut self, counter: Counter, text: &str) {
        self.fields[counter.index()] = text.to_string();
    }

    /// Type into a field. A lone "0" is replaced rather than prefixed.
    pub fn push_char(&mut self, counter: Counter, c: char) {
        let field = &mut self.fields[counter.index()];
        if field == "0" {
            field.clear();
        }
        field.push(c);
    }

    pub fn pop_char(&mut self, counter: Counter) {
        self.fields[counter.index()].pop();
    }

    /// Current fields parsed with the silent-default rule.
    pub fn counters(&self) -> LineCounters {
        LineCounters::from_text(&self.fields)
    }

    /// Compute the total from the current fields and remember it.
    pub fn calculate(&mut self, weights: &LineWeights) -> LineScore {
        let score = calculate_line_score(&self.counters(), weights);
        self.total = Some(score.total);
        score
    }

    /// Last calculated total, `None` until calculated or after a reset.
    pub fn total(&self) -> Option<i64> {
        self.total
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
