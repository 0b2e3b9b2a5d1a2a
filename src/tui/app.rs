use crate::buffered_eprintln;
use crate::output::format_delta;
use crate::scoring::{Counter, LineScore, ScoringConfig};
use crate::session::{Applied, Dialog, LineForm, Player, Session, SubmitOutcome};
use crate::tui::theme::ThemeColors;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Players,
    Lines,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Dialog,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

pub struct App {
    pub session: Session,
    pub scoring: ScoringConfig,
    pub dialog: Dialog,
    pub line_form: LineForm,
    pub last_line_score: Option<LineScore>,
    pub table_state: ratatui::widgets::TableState,
    pub current_view: View,
    pub selected_counter: usize,
    pub show_help: bool,
    pub flash_message: Option<(String, FlashKind, Instant)>,
    pub flash_duration: Duration,
    pub colors: ThemeColors,
    pub should_quit: bool,
    pub verbose: bool,
}

impl App {
    pub fn new(
        session: Session,
        scoring: ScoringConfig,
        flash_duration: Duration,
        colors: ThemeColors,
        verbose: bool,
    ) -> Self {
        let mut table_state = ratatui::widgets::TableState::default();
        if !session.is_empty() {
            table_state.select(Some(0));
        }

        Self {
            session,
            scoring,
            dialog: Dialog::new(),
            line_form: LineForm::new(),
            last_line_score: None,
            table_state,
            current_view: View::Players,
            selected_counter: 0,
            show_help: false,
            flash_message: None,
            flash_duration,
            colors,
            should_quit: false,
            verbose,
        }
    }

    pub fn input_mode(&self) -> InputMode {
        if self.show_help {
            InputMode::Help
        } else if self.dialog.is_open() {
            InputMode::Dialog
        } else {
            InputMode::Normal
        }
    }

    pub fn next_row(&mut self) {
        let len = self.session.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.session.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    pub fn selected_player(&self) -> Option<&Player> {
        self.table_state
            .selected()
            .and_then(|i| self.session.player(i))
    }

    pub fn selected_counter(&self) -> Counter {
        Counter::ALL[self.selected_counter.min(Counter::ALL.len() - 1)]
    }

    pub fn next_counter(&mut self) {
        self.selected_counter = (self.selected_counter + 1) % Counter::ALL.len();
    }

    pub fn previous_counter(&mut self) {
        self.selected_counter = match self.selected_counter {
            0 => Counter::ALL.len() - 1,
            i => i - 1,
        };
    }

    pub fn update_flash(&mut self) {
        if let Some((_, _, timestamp)) = self.flash_message {
            if timestamp.elapsed() >= self.flash_duration {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String, kind: FlashKind) {
        self.flash_message = Some((msg, kind, Instant::now()));
    }

    /// Open the add-player dialog
    pub fn start_add_player(&mut self) {
        self.dialog.open_add_player();
    }

    /// Open the score dialog for the selected player
    pub fn start_add_score(&mut self) {
        let Some(index) = self.table_state.selected() else {
            self.show_flash("Add a player first (a)".to_string(), FlashKind::Info);
            return;
        };
        if !self
            .dialog
            .open_add_score(&self.session, index, &self.scoring.hands)
        {
            self.show_flash("No player selected".to_string(), FlashKind::Error);
        }
    }

    /// Submit the open dialog. Blocked submits leave the dialog open.
    pub fn submit_dialog(&mut self) {
        match self.dialog.submit(&mut self.session, &self.scoring.hands) {
            Ok(SubmitOutcome::Applied(Applied::PlayerAdded { index })) => {
                self.table_state.select(Some(index));
                let name = self.session.players()[index].name.clone();
                if self.verbose {
                    buffered_eprintln!("Player {} added: {}", index + 1, name);
                }
                self.show_flash(format!("Added player: {}", name), FlashKind::Success);
            }
            Ok(SubmitOutcome::Applied(Applied::ScoreAdded {
                player,
                score_type,
                card_count,
                delta,
                total,
            })) => {
                let name = self.session.players()[player].name.clone();
                if self.verbose {
                    buffered_eprintln!(
                        "{}: {} with {} cards -> {} (total {})",
                        name,
                        score_type,
                        card_count,
                        delta,
                        total
                    );
                }
                self.show_flash(
                    format!(
                        "{} {} ({}, {} cards)",
                        name,
                        format_delta(delta),
                        score_type,
                        card_count
                    ),
                    FlashKind::Success,
                );
            }
            Ok(SubmitOutcome::Blocked) | Ok(SubmitOutcome::Closed) => {}
            Err(e) => self.show_flash(format!("Error: {}", e), FlashKind::Error),
        }
    }

    pub fn cancel_dialog(&mut self) {
        self.dialog.cancel();
    }

    pub fn step_card_count(&mut self, step: i64) {
        self.dialog.step_card_count(step, &self.scoring.hands);
    }

    /// Type into the selected line-bonus field
    pub fn type_counter(&mut self, c: char) {
        let counter = self.selected_counter();
        self.line_form.push_char(counter, c);
    }

    pub fn backspace_counter(&mut self) {
        let counter = self.selected_counter();
        self.line_form.pop_char(counter);
    }

    pub fn calculate_lines(&mut self) {
        let score = self.line_form.calculate(&self.scoring.lines);
        if self.verbose {
            buffered_eprintln!(
                "Line score: base {} bonus {} penalty {} = {}",
                score.breakdown.base,
                score.breakdown.bonus,
                score.breakdown.penalty,
                score.total
            );
        }
        self.last_line_score = Some(score);
    }

    pub fn reset_lines(&mut self) {
        self.line_form.reset();
        self.last_line_score = None;
        self.show_flash("Form cleared".to_string(), FlashKind::Info);
    }

    /// Toggle between Players and Lines views
    pub fn toggle_view(&mut self) {
        self.current_view = match self.current_view {
            View::Players => View::Lines,
            View::Lines => View::Players,
        };
    }

    pub fn show_help(&mut self) {
        self.show_help = true;
    }

    pub fn dismiss_help(&mut self) {
        self.show_help = false;
    }

    /// Highest total, used to scale score bars
    pub fn max_score(&self) -> i64 {
        self.session
            .players()
            .iter()
            .map(|p| p.total_score)
            .max()
            .unwrap_or(0)
    }
}
