use anyhow::{bail, Context, Result};

use super::types::Session;
use crate::scoring::{HandRules, ScoreType};

/// One `NAME=TYPE:CARDS` entry from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub player: String,
    pub score_type: ScoreType,
    pub card_count: i64,
}

impl ScoreEntry {
    /// Parse `NAME=TYPE:CARDS`, e.g. `Ann=Full House:12`.
    ///
    /// The last `=` separates the name and the last `:` separates the card
    /// count, so names may contain either character.
    pub fn parse(s: &str) -> Result<Self> {
        let Some((player, hand)) = s.rsplit_once('=') else {
            bail!("Invalid score '{}': expected NAME=TYPE:CARDS", s);
        };
        let Some((score_type, cards)) = hand.rsplit_once(':') else {
            bail!("Invalid score '{}': expected NAME=TYPE:CARDS", s);
        };

        let player = player.trim();
        if player.is_empty() {
            bail!("Invalid score '{}': missing player name", s);
        }
        let score_type = ScoreType::parse(score_type)?;
        let card_count: i64 = cards
            .trim()
            .parse()
            .with_context(|| format!("Invalid card count '{}' in '{}'", cards.trim(), s))?;

        Ok(Self {
            player: player.to_string(),
            score_type,
            card_count,
        })
    }
}

/// Seat `players` in order and apply each entry to the first player with
/// the matching name.
///
/// Blank player names are skipped and returned so the caller can report them.
pub fn tally(
    players: &[String],
    entries: &[ScoreEntry],
    rules: &HandRules,
) -> Result<(Session, usize)> {
    let mut session = Session::new();
    let mut skipped = 0;
    for name in players {
        if session.add_player(name).is_err() {
            skipped += 1;
        }
    }

    for entry in entries {
        let Some(index) = session.find_by_name(&entry.player) else {
            bail!("Score for unknown player '{}'", entry.player);
        };
        session.record_hand(index, entry.score_type, entry.card_count, rules)?;
    }

    Ok((session, skipped))
}
