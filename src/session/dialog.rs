//! Pending-input dialogs for adding players and hand scores.
//!
//! A dialog is `Closed` until opened. While open it owns the transient input.
//! Submitting applies at most one change to the [`Session`] and closes the
//! dialog; cancelling closes it and drops the input.

use super::types::{Session, SessionError};
use crate::scoring::{parse_card_count, HandRules, ScoreType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingInput {
    AddPlayer {
        name: String,
    },
    AddScore {
        player: usize,
        score_type: ScoreType,
        card_count: String,
    },
}

/// What a successful submit changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    PlayerAdded {
        index: usize,
    },
    ScoreAdded {
        player: usize,
        score_type: ScoreType,
        card_count: i64,
        delta: i64,
        total: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Applied(Applied),
    /// Submit is disabled for the current input; the dialog stays open.
    Blocked,
    /// No dialog was open.
    Closed,
}

#[derive(Debug, Clone, Default)]
pub struct Dialog {
    pending: Option<PendingInput>,
    /// Card count has not been typed into since the dialog opened; the next
    /// keystroke replaces the shown value instead of appending.
    card_count_untouched: bool,
}

impl Dialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingInput> {
        self.pending.as_ref()
    }

    pub fn open_add_player(&mut self) {
        self.pending = Some(PendingInput::AddPlayer {
            name: String::new(),
        });
    }

    /// Open the score dialog for an existing player. Returns false (and stays
    /// closed) when there is no such player.
    pub fn open_add_score(&mut self, session: &Session, player: usize, rules: &HandRules) -> bool {
        if session.player(player).is_none() {
            return false;
        }
        self.pending = Some(PendingInput::AddScore {
            player,
            score_type: ScoreType::default(),
            card_count: rules.card_count.default.to_string(),
        });
        self.card_count_untouched = true;
        true
    }

    /// Whether submit would do anything for the current input.
    pub fn can_submit(&self) -> bool {
        match &self.pending {
            Some(PendingInput::AddPlayer { name }) => !name.trim().is_empty(),
            Some(PendingInput::AddScore { .. }) => true,
            None => false,
        }
    }

    /// Append a character to the active text field.
    pub fn push_char(&mut self, c: char) {
        match &mut self.pending {
            Some(PendingInput::AddPlayer { name }) => name.push(c),
            Some(PendingInput::AddScore { card_count, .. }) => {
                if std::mem::take(&mut self.card_count_untouched) {
                    card_count.clear();
                }
                card_count.push(c);
            }
            None => {}
        }
    }

    pub fn pop_char(&mut self) {
        match &mut self.pending {
            Some(PendingInput::AddPlayer { name }) => {
                name.pop();
            }
            Some(PendingInput::AddScore { card_count, .. }) => {
                self.card_count_untouched = false;
                card_count.pop();
            }
            None => {}
        }
    }

    pub fn next_score_type(&mut self) {
        if let Some(PendingInput::AddScore { score_type, .. }) = &mut self.pending {
            *score_type = score_type.next();
        }
    }

    pub fn previous_score_type(&mut self) {
        if let Some(PendingInput::AddScore { score_type, .. }) = &mut self.pending {
            *score_type = score_type.previous();
        }
    }

    /// Spinner-style step of the card count. Stepping stays inside the
    /// configured range; typed values do not.
    pub fn step_card_count(&mut self, step: i64, rules: &HandRules) {
        if let Some(PendingInput::AddScore { card_count, .. }) = &mut self.pending {
            let range = &rules.card_count;
            let current = parse_card_count(card_count, range.default);
            let stepped = current.saturating_add(step).max(range.min).min(range.max);
            *card_count = stepped.to_string();
        }
    }

    /// Apply the pending input to the session.
    pub fn submit(
        &mut self,
        session: &mut Session,
        rules: &HandRules,
    ) -> Result<SubmitOutcome, SessionError> {
        let Some(pending) = self.pending.take() else {
            return Ok(SubmitOutcome::Closed);
        };

        match pending {
            PendingInput::AddPlayer { name } => match session.add_player(&name) {
                Ok(index) => Ok(SubmitOutcome::Applied(Applied::PlayerAdded { index })),
                Err(SessionError::EmptyPlayerName) => {
                    self.pending = Some(PendingInput::AddPlayer { name });
                    Ok(SubmitOutcome::Blocked)
                }
                Err(e) => Err(e),
            },
            PendingInput::AddScore {
                player,
                score_type,
                card_count,
            } => {
                let card_count = parse_card_count(&card_count, rules.card_count.default);
                let delta = session.record_hand(player, score_type, card_count, rules)?;
                let total = session.player(player).map(|p| p.total_score).unwrap_or_default();
                Ok(SubmitOutcome::Applied(Applied::ScoreAdded {
                    player,
                    score_type,
                    card_count,
                    delta,
                    total,
                }))
            }
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
