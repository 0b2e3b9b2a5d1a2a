use serde::Serialize;
use std::fmt;

use crate::scoring::{hand_delta, HandRules, ScoreType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub name: String,
    pub total_score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    EmptyPlayerName,
    UnknownPlayer(usize),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::EmptyPlayerName => write!(f, "Player name cannot be empty"),
            SessionError::UnknownPlayer(index) => write!(f, "No player at position {}", index + 1),
        }
    }
}

impl std::error::Error for SessionError {}

/// Ordered list of players for one game.
///
/// Players keep insertion order and are addressed by position. There is no
/// removal and no way to take back an applied delta.
#[derive(Debug, Clone, Default)]
pub struct Session {
    players: Vec<Player>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from a roster, skipping blank names.
    pub fn with_players<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut session = Self::new();
        for name in names {
            let _ = session.add_player(name.as_ref());
        }
        session
    }

    /// Add a player with a zero total. The name is stored trimmed and
    /// duplicates are allowed. Returns the new player's position.
    pub fn add_player(&mut self, name: &str) -> Result<usize, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyPlayerName);
        }
        self.players.push(Player {
            name: name.to_string(),
            total_score: 0,
        });
        Ok(self.players.len() - 1)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Position of the first player with exactly this (trimmed) name.
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.players.iter().position(|p| p.name == name)
    }

    /// Add `delta` to a player's total and return the new total.
    pub fn apply_delta(&mut self, index: usize, delta: i64) -> Result<i64, SessionError> {
        let player = self
            .players
            .get_mut(index)
            .ok_or(SessionError::UnknownPlayer(index))?;
        player.total_score = player.total_score.saturating_add(delta);
        Ok(player.total_score)
    }

    /// Score one hand for a player. Returns the delta that was applied.
    pub fn record_hand(
        &mut self,
        index: usize,
        score_type: ScoreType,
        card_count: i64,
        rules: &HandRules,
    ) -> Result<i64, SessionError> {
        let delta = hand_delta(score_type, card_count, rules);
        self.apply_delta(index, delta)?;
        Ok(delta)
    }

    /// Players ordered by total descending. Ties keep insertion order.
    pub fn standings(&self) -> Vec<(usize, &Player)> {
        let mut ranked: Vec<_> = self.players.iter().enumerate().collect();
        ranked.sort_by(|a, b| b.1.total_score.cmp(&a.1.total_score));
        ranked
    }
}
