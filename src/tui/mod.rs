pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, Theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

use crate::session::PendingInput;

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(250);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(anyhow::Error::from(e));
        }

        match events.next().await {
            Some(Event::Key(key)) => handle_key_event(&mut app, key),
            Some(Event::Tick) => app.update_flash(),
            None => break Ok(()),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    crate::stderr_buffer::flush();

    result
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode() {
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
        app::InputMode::Dialog => handle_dialog_key(app, key),
        app::InputMode::Normal => match app.current_view {
            app::View::Players => handle_players_key(app, key),
            app::View::Lines => handle_lines_key(app, key),
        },
    }
}

fn handle_players_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.next_row(),
        KeyCode::Char('k') | KeyCode::Up => app.previous_row(),

        KeyCode::Char('a') => app.start_add_player(),
        KeyCode::Enter | KeyCode::Char('s') => app.start_add_score(),

        KeyCode::Tab => app.toggle_view(),
        KeyCode::Char('?') => app.show_help(),
        _ => {}
    }
}

fn handle_lines_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Char('j') | KeyCode::Down => app.next_counter(),
        KeyCode::Char('k') | KeyCode::Up => app.previous_counter(),

        // Field editing (digits and sign; anything else would parse as 0 anyway)
        KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => app.type_counter(c),
        KeyCode::Backspace => app.backspace_counter(),

        KeyCode::Enter | KeyCode::Char('c') => app.calculate_lines(),
        KeyCode::Char('x') => app.reset_lines(),

        KeyCode::Tab => app.toggle_view(),
        KeyCode::Char('?') => app.show_help(),
        _ => {}
    }
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    let is_score = matches!(app.dialog.pending(), Some(PendingInput::AddScore { .. }));

    match key.code {
        KeyCode::Enter => app.submit_dialog(),
        KeyCode::Esc => app.cancel_dialog(),
        KeyCode::Backspace => app.dialog.pop_char(),

        // Score dialog: selector and spinner
        KeyCode::Right | KeyCode::Tab if is_score => app.dialog.next_score_type(),
        KeyCode::Left | KeyCode::BackTab if is_score => app.dialog.previous_score_type(),
        KeyCode::Up if is_score => app.step_card_count(1),
        KeyCode::Down if is_score => app.step_card_count(-1),
        KeyCode::Char(c) if is_score && (c.is_ascii_digit() || c == '-') => {
            app.dialog.push_char(c)
        }

        // Name dialog: any printable character
        KeyCode::Char(c) if !is_score && !c.is_control() => app.dialog.push_char(c),

        // Ignore all other keys (don't propagate to Normal mode)
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringConfig;
    use crate::session::Session;
    use std::time::Duration;

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn test_app() -> App {
        App::new(
            Session::new(),
            ScoringConfig::default(),
            Duration::from_secs(3),
            ThemeColors::dark(),
            false,
        )
    }

    #[test]
    fn test_keyboard_game_flow() {
        let mut app = test_app();

        // Add two players; 'q' inside the dialog is text, not quit
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "quinn");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Rae");
        press(&mut app, KeyCode::Enter);
        assert!(!app.should_quit);
        assert_eq!(app.session.len(), 2);

        // Rae is selected after being added: Full House with 19 cards
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Backspace);
        type_str(&mut app, "19");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.player(1).unwrap().total_score, 240);

        // quinn: Flush with default 5 cards, twice
        press(&mut app, KeyCode::Char('k'));
        for _ in 0..2 {
            press(&mut app, KeyCode::Char('s'));
            press(&mut app, KeyCode::Enter);
        }
        assert_eq!(app.session.player(0).unwrap().total_score, 20);
    }

    #[test]
    fn test_typed_card_count_replaces_default() {
        let mut app = test_app();
        app.session.add_player("Ann").unwrap();
        app.table_state.select(Some(0));

        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "12");
        press(&mut app, KeyCode::Enter);

        // Flush with 12 cards
        assert_eq!(app.session.player(0).unwrap().total_score, 80);
    }

    #[test]
    fn test_negative_penalty_typed_in_line_calculator() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "1");
        press(&mut app, KeyCode::Char('k')); // wraps to Penalties
        type_str(&mut app, "-2");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.line_form.total(), Some(200));
    }

    #[test]
    fn test_escape_cancels_dialog() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Zed");
        press(&mut app, KeyCode::Esc);
        assert!(app.session.is_empty());
        assert_eq!(app.input_mode(), app::InputMode::Normal);
    }

    #[test]
    fn test_blank_name_enter_keeps_dialog() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode(), app::InputMode::Dialog);
        assert!(app.session.is_empty());
    }

    #[test]
    fn test_score_dialog_ignores_letters() {
        let mut app = test_app();
        app.session.add_player("Ann").unwrap();
        app.table_state.select(Some(0));
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "zz");
        assert!(matches!(
            app.dialog.pending(),
            Some(PendingInput::AddScore { card_count, .. }) if card_count == "5"
        ));
    }

    #[test]
    fn test_line_calculator_keys() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "3"); // Completed Lines
        press(&mut app, KeyCode::Char('j'));
        type_str(&mut app, "1"); // Tetris Bonus
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.line_form.total(), Some(600));

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.line_form.total(), None);
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.input_mode(), app::InputMode::Help);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.input_mode(), app::InputMode::Normal);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_dialog() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('a'));
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }
}
